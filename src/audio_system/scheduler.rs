/// Fade scheduler
///
/// Owns every in-flight transition and advances them once per tick. A
/// transition writes its first sample when it is scheduled and then one sample
/// per tick until it completes. Overlapping transitions are allowed; none
/// cancels another, and each writes its channels in scheduling order.

use super::channel::ChannelSet;
use super::clip::AudioClip;
use super::effects::Fade;
use super::source::ChannelId;

/// Which half of a fade-swap is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadePhase {
    /// Current content ramping to silence
    Out,

    /// New clip ramping up to full volume
    In,
}

/// One in-flight volume transition
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Fade out, swap to `clip`, fade back in on a single channel
    FadeSwap {
        fade: Fade,
        clip: AudioClip,
        phase: FadePhase,
    },

    /// Two ramps advanced together; `outgoing.channel` is stopped at the end
    CrossFade { outgoing: Fade, incoming: Fade },
}

impl Transition {
    /// Channels this transition writes to
    pub fn channels(&self) -> Vec<ChannelId> {
        match self {
            Transition::FadeSwap { fade, .. } => vec![fade.channel],
            Transition::CrossFade { outgoing, incoming } => {
                vec![outgoing.channel, incoming.channel]
            }
        }
    }

    pub fn is_cross_fade(&self) -> bool {
        matches!(self, Transition::CrossFade { .. })
    }

    /// Advance by `delta` seconds and write volumes. Returns true once complete.
    fn step(&mut self, delta: f32, channels: &mut ChannelSet) -> bool {
        match self {
            Transition::FadeSwap { fade, clip, phase } => {
                let volume = fade.advance(delta);
                channels.get_mut(fade.channel).set_volume(volume);

                if !fade.is_finished() {
                    return false;
                }

                match *phase {
                    FadePhase::Out => {
                        let channel = channels.get_mut(fade.channel);
                        channel.stop();
                        channel.play(clip);

                        tracing::debug!("Swapped {} to {}", fade.channel, clip);

                        *fade = Fade::fade_in(fade.channel, fade.duration);
                        *phase = FadePhase::In;
                        channel.set_volume(fade.volume());
                        false
                    }
                    FadePhase::In => true,
                }
            }
            Transition::CrossFade { outgoing, incoming } => {
                let out_volume = outgoing.advance(delta);
                let in_volume = incoming.advance(delta);
                channels.get_mut(outgoing.channel).set_volume(out_volume);
                channels.get_mut(incoming.channel).set_volume(in_volume);

                if outgoing.is_finished() && incoming.is_finished() {
                    channels.get_mut(outgoing.channel).stop();
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Write the t = 0 sample
    fn begin(&self, channels: &mut ChannelSet) {
        match self {
            Transition::FadeSwap { fade, .. } => {
                channels.get_mut(fade.channel).set_volume(fade.volume());
            }
            Transition::CrossFade { outgoing, incoming } => {
                channels.get_mut(outgoing.channel).set_volume(outgoing.volume());
                channels.get_mut(incoming.channel).set_volume(incoming.volume());
            }
        }
    }
}

/// Owner of all in-flight transitions
#[derive(Debug, Default)]
pub struct FadeScheduler {
    transitions: Vec<Transition>,
}

impl FadeScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a fade-out / swap / fade-in on `channel`.
    ///
    /// `duration` must already be validated as positive.
    pub fn schedule_fade_swap(
        &mut self,
        channels: &mut ChannelSet,
        channel: ChannelId,
        clip: AudioClip,
        duration: f32,
    ) {
        let target = channels.get_mut(channel);
        if !target.is_playing() {
            if let Some(current) = target.clip() {
                target.play(&current);
            }
        }

        let transition = Transition::FadeSwap {
            fade: Fade::fade_out(channel, duration),
            clip,
            phase: FadePhase::Out,
        };
        self.push(transition, channels);
    }

    /// Schedule a cross-fade: `outgoing` ramps 1 to 0, `incoming` ramps 0 to 1,
    /// and `outgoing` is stopped at the end.
    pub fn schedule_cross_fade(
        &mut self,
        channels: &mut ChannelSet,
        outgoing: ChannelId,
        incoming: ChannelId,
        duration: f32,
    ) {
        let transition = Transition::CrossFade {
            outgoing: Fade::fade_out(outgoing, duration),
            incoming: Fade::fade_in(incoming, duration),
        };
        self.push(transition, channels);
    }

    fn push(&mut self, transition: Transition, channels: &mut ChannelSet) {
        transition.begin(channels);
        tracing::debug!(
            "Scheduled {} on {:?} ({} in flight)",
            if transition.is_cross_fade() { "cross-fade" } else { "fade" },
            transition.channels(),
            self.transitions.len() + 1
        );
        self.transitions.push(transition);
    }

    /// Advance every transition by `delta` seconds. Returns how many completed.
    pub fn tick(&mut self, delta: f32, channels: &mut ChannelSet) -> usize {
        let before = self.transitions.len();
        self.transitions.retain_mut(|t| !t.step(delta, channels));
        let completed = before - self.transitions.len();

        if completed > 0 {
            tracing::debug!(
                "{} transition(s) completed, {} in flight",
                completed,
                self.transitions.len()
            );
        }
        completed
    }

    /// Drop every in-flight transition, leaving volumes where they are
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.transitions.len();
        self.transitions.clear();
        dropped
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Whether any transition writes to `channel`
    pub fn touches(&self, channel: ChannelId) -> bool {
        self.transitions
            .iter()
            .any(|t| t.channels().contains(&channel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio_system::channel::{AudioChannel, ChannelProbe, VirtualChannel};

    fn channel_set() -> (ChannelSet, ChannelProbe, ChannelProbe) {
        let a = VirtualChannel::new();
        let b = VirtualChannel::new();
        let (pa, pb) = (a.probe(), b.probe());
        let set = ChannelSet::new(Box::new(a), Box::new(b), Box::new(VirtualChannel::new()));
        (set, pa, pb)
    }

    #[test]
    fn test_fade_swap_sequence() {
        let (mut channels, probe, _) = channel_set();
        let old = AudioClip::silent("old");
        let new = AudioClip::silent("new");
        channels.get_mut(ChannelId::MusicA).play(&old);

        let mut scheduler = FadeScheduler::new();
        scheduler.schedule_fade_swap(&mut channels, ChannelId::MusicA, new.clone(), 1.0);
        assert_eq!(probe.volume(), 1.0);

        let mut samples = Vec::new();
        while !scheduler.is_empty() {
            scheduler.tick(0.25, &mut channels);
            samples.push((probe.volume(), probe.clip().unwrap()));
        }

        let volumes: Vec<f32> = samples.iter().map(|(v, _)| *v).collect();
        assert_eq!(volumes, vec![0.75, 0.5, 0.25, 0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(samples[2].1, old);
        assert_eq!(samples[3].1, new);
        assert!(probe.is_playing());
    }

    #[test]
    fn test_fade_swap_starts_idle_channel() {
        let (mut channels, probe, _) = channel_set();
        let old = AudioClip::silent("old");
        channels.get_mut(ChannelId::MusicA).play(&old);
        channels.get_mut(ChannelId::MusicA).stop();

        let mut scheduler = FadeScheduler::new();
        scheduler.schedule_fade_swap(
            &mut channels,
            ChannelId::MusicA,
            AudioClip::silent("new"),
            1.0,
        );
        assert!(probe.is_playing());
        assert_eq!(probe.clip(), Some(old));
    }

    #[test]
    fn test_cross_fade_sums_to_one() {
        let (mut channels, pa, pb) = channel_set();
        let mut scheduler = FadeScheduler::new();
        channels.get_mut(ChannelId::MusicA).play(&AudioClip::silent("a"));

        scheduler.schedule_cross_fade(&mut channels, ChannelId::MusicA, ChannelId::MusicB, 0.5);
        assert_eq!(pa.volume() + pb.volume(), 1.0);

        while !scheduler.is_empty() {
            scheduler.tick(1.0 / 60.0, &mut channels);
            assert!((pa.volume() + pb.volume() - 1.0).abs() < 1e-5);
        }

        assert_eq!(pa.volume(), 0.0);
        assert_eq!(pb.volume(), 1.0);
        assert!(!pa.is_playing());
    }

    #[test]
    fn test_overlapping_transitions_both_run() {
        let (mut channels, _, _) = channel_set();
        let mut scheduler = FadeScheduler::new();

        scheduler.schedule_fade_swap(
            &mut channels,
            ChannelId::MusicA,
            AudioClip::silent("x"),
            1.0,
        );
        scheduler.schedule_cross_fade(&mut channels, ChannelId::MusicA, ChannelId::MusicB, 2.0);
        assert_eq!(scheduler.len(), 2);
        assert!(scheduler.touches(ChannelId::MusicB));
        assert!(!scheduler.touches(ChannelId::Sfx));

        scheduler.tick(1.0, &mut channels); // fade-swap swaps
        assert_eq!(scheduler.len(), 2);
        scheduler.tick(1.0, &mut channels); // both finish
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_cancel_all() {
        let (mut channels, pa, _) = channel_set();
        let mut scheduler = FadeScheduler::new();
        scheduler.schedule_fade_swap(
            &mut channels,
            ChannelId::MusicA,
            AudioClip::silent("x"),
            1.0,
        );
        scheduler.tick(0.5, &mut channels);

        assert_eq!(scheduler.cancel_all(), 1);
        scheduler.tick(0.5, &mut channels);
        assert_eq!(pa.volume(), 0.5);
    }
}
