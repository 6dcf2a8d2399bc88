/// Channel identifiers
///
/// The manager owns exactly three channels: two music decks and one effects channel.
use std::fmt;

/// Output channel slots owned by the manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelId {
    /// First music deck
    MusicA,

    /// Second music deck
    MusicB,

    /// One-shot sound effects
    Sfx,
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelId::MusicA => write!(f, "Music A"),
            ChannelId::MusicB => write!(f, "Music B"),
            ChannelId::Sfx => write!(f, "SFX"),
        }
    }
}

impl ChannelId {
    /// Both music decks, in selection order
    pub const MUSIC: [ChannelId; 2] = [ChannelId::MusicA, ChannelId::MusicB];

    /// Check if this is one of the music decks
    pub fn is_music(&self) -> bool {
        matches!(self, ChannelId::MusicA | ChannelId::MusicB)
    }

    /// The opposite music deck. The effects channel has no partner and maps to itself.
    pub fn other(&self) -> ChannelId {
        match self {
            ChannelId::MusicA => ChannelId::MusicB,
            ChannelId::MusicB => ChannelId::MusicA,
            ChannelId::Sfx => ChannelId::Sfx,
        }
    }

    /// Whether the channel loops its clip by default
    pub fn loops_by_default(&self) -> bool {
        self.is_music()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_display() {
        assert_eq!(ChannelId::MusicA.to_string(), "Music A");
        assert_eq!(ChannelId::Sfx.to_string(), "SFX");
    }

    #[test]
    fn test_other_deck() {
        assert_eq!(ChannelId::MusicA.other(), ChannelId::MusicB);
        assert_eq!(ChannelId::MusicB.other(), ChannelId::MusicA);
        assert_eq!(ChannelId::Sfx.other(), ChannelId::Sfx);
    }

    #[test]
    fn test_music_flags() {
        assert!(ChannelId::MusicA.is_music());
        assert!(ChannelId::MusicB.loops_by_default());
        assert!(!ChannelId::Sfx.is_music());
        assert!(!ChannelId::Sfx.loops_by_default());
    }
}
