/// Volume input handling
///
/// Decides what happens to caller-supplied volumes outside [0, 1].

/// How volume inputs are treated before reaching a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VolumePolicy {
    /// Values are written to the channel unchanged
    #[default]
    PassThrough,

    /// Values are clamped to [0, 1]
    Clamp,
}

impl VolumePolicy {
    pub fn from_clamp(clamp: bool) -> Self {
        if clamp {
            VolumePolicy::Clamp
        } else {
            VolumePolicy::PassThrough
        }
    }

    /// Apply the policy to a volume input
    pub fn apply(&self, volume: f32) -> f32 {
        match self {
            VolumePolicy::PassThrough => volume,
            VolumePolicy::Clamp => volume.clamp(0.0, 1.0),
        }
    }
}
