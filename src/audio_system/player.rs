/// Rodio-backed channel
///
/// Handles playback of one channel through a rodio sink. One-shots get a
/// sink of their own so they can overlap.

use std::io::Cursor;
use std::sync::Arc;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use super::channel::AudioChannel;
use super::clip::AudioClip;
use crate::error::AudioError;

/// Clip bytes shared with the decoder without copying
struct SharedBytes(Arc<Vec<u8>>);

impl AsRef<[u8]> for SharedBytes {
    fn as_ref(&self) -> &[u8] {
        self.0.as_slice()
    }
}

fn decode(clip: &AudioClip) -> Result<Decoder<Cursor<SharedBytes>>, AudioError> {
    let cursor = Cursor::new(SharedBytes(Arc::clone(clip.data())));
    Decoder::new(cursor).map_err(|e| AudioError::DecodeFailed(Box::new(e)))
}

/// Audio output device
///
/// The stream must outlive every channel created from it. It is not `Send`,
/// so it stays with the host while the channels move into the manager.
pub struct RodioOutput {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
}

impl RodioOutput {
    /// Open the default output device
    pub fn try_default() -> Result<Self, AudioError> {
        let (stream, stream_handle) =
            OutputStream::try_default().map_err(|e| AudioError::StreamInitFailed(Box::new(e)))?;

        tracing::info!("Opened default audio output device");

        Ok(Self {
            _stream: stream,
            stream_handle,
        })
    }

    /// Create a channel playing into this device
    pub fn channel(&self, looping: bool) -> RodioChannel {
        RodioChannel {
            stream_handle: self.stream_handle.clone(),
            sink: None,
            one_shots: Vec::new(),
            clip: None,
            volume: 1.0,
            looping,
        }
    }
}

/// Channel playing through rodio
pub struct RodioChannel {
    stream_handle: OutputStreamHandle,
    sink: Option<Sink>,
    one_shots: Vec<Sink>,
    clip: Option<AudioClip>,
    volume: f32,
    looping: bool,
}

impl RodioChannel {
    fn new_sink(&self, volume: f32) -> Result<Sink, AudioError> {
        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| AudioError::StreamInitFailed(Box::new(e)))?;
        sink.set_volume(volume);
        Ok(sink)
    }

    fn start(&self, clip: &AudioClip) -> Result<Sink, AudioError> {
        let source = decode(clip)?;
        let sink = self.new_sink(self.volume)?;

        if self.looping {
            sink.append(source.repeat_infinite());
        } else {
            sink.append(source);
        }

        Ok(sink)
    }
}

impl AudioChannel for RodioChannel {
    fn play(&mut self, clip: &AudioClip) {
        self.stop();

        match self.start(clip) {
            Ok(sink) => self.sink = Some(sink),
            Err(e) => tracing::warn!("Failed to play clip {}: {}", clip, e),
        }

        self.clip = Some(clip.clone());
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(sink) = &self.sink {
            sink.set_volume(volume);
        }
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn is_playing(&self) -> bool {
        self.sink
            .as_ref()
            .map(|s| !s.empty() && !s.is_paused())
            .unwrap_or(false)
    }

    // Takes effect on the next `play`; the current sink keeps its source chain.
    fn set_loop(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn is_looping(&self) -> bool {
        self.looping
    }

    fn clip(&self) -> Option<AudioClip> {
        self.clip.clone()
    }

    fn play_one_shot(&mut self, clip: &AudioClip, volume_scale: f32) {
        self.update();

        let result = decode(clip).and_then(|source| {
            let sink = self.new_sink(self.volume * volume_scale)?;
            sink.append(source);
            Ok(sink)
        });

        match result {
            Ok(sink) => self.one_shots.push(sink),
            Err(e) => tracing::warn!("Failed to play one-shot {}: {}", clip, e),
        }
    }

    fn active_one_shots(&self) -> usize {
        self.one_shots.iter().filter(|s| !s.empty()).count()
    }

    fn update(&mut self) {
        self.one_shots.retain(|s| !s.empty());
    }
}
