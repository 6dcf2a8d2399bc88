/// Audio effects module
///
/// Volume ramps and volume input handling applied by the manager.

pub mod fade;
pub mod volume;

pub use fade::{validate_duration, Fade};
pub use volume::VolumePolicy;
