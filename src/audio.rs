use crate::assets::SoundClip;
use crate::error::AudioError;
use crate::theme::Theme;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::io::Cursor;

/// A sound that is currently looping.
pub trait LoopHandle {
    fn stop(&mut self);
}

/// Something that can start a clip looping forever.
pub trait AudioBackend {
    fn start_loop(&self, clip: &SoundClip) -> Result<Box<dyn LoopHandle>, AudioError>;
}

/// Plays through the default output device.
pub struct RodioBackend {
    // Dropping the stream silences every sink created from its handle.
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl RodioBackend {
    pub fn open() -> Result<Self, AudioError> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| AudioError::Device(e.to_string()))?;
        Ok(Self {
            _stream: stream,
            handle,
        })
    }
}

impl AudioBackend for RodioBackend {
    fn start_loop(&self, clip: &SoundClip) -> Result<Box<dyn LoopHandle>, AudioError> {
        let source = Decoder::new(Cursor::new(clip.bytes.clone()))?;
        let sink = Sink::try_new(&self.handle)?;
        sink.append(source.repeat_infinite());
        Ok(Box::new(RodioLoop { sink }))
    }
}

struct RodioLoop {
    sink: Sink,
}

impl LoopHandle for RodioLoop {
    fn stop(&mut self) {
        self.sink.stop();
    }
}

/// Used when no output device is available; every loop is a no-op.
pub struct SilentBackend;

impl AudioBackend for SilentBackend {
    fn start_loop(&self, _clip: &SoundClip) -> Result<Box<dyn LoopHandle>, AudioError> {
        Ok(Box::new(SilentLoop))
    }
}

struct SilentLoop;

impl LoopHandle for SilentLoop {
    fn stop(&mut self) {}
}

/// Opens the default device, degrading to silence if there is none.
pub fn default_backend() -> Box<dyn AudioBackend> {
    match RodioBackend::open() {
        Ok(backend) => Box::new(backend),
        Err(err) => {
            tracing::warn!(error = %err, "Audio unavailable, running without sound");
            Box::new(SilentBackend)
        }
    }
}

/// Holds at most one looping sound. Starting a new loop always stops the old
/// one first, and dropping the slot stops whatever is playing.
pub struct SoundSlot {
    backend: Box<dyn AudioBackend>,
    current: Option<(Theme, Box<dyn LoopHandle>)>,
}

impl SoundSlot {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            current: None,
        }
    }

    pub fn play(&mut self, clip: &SoundClip) {
        self.stop();
        match self.backend.start_loop(clip) {
            Ok(handle) => {
                tracing::debug!(theme = %clip.theme, "Started ambient loop");
                self.current = Some((clip.theme, handle));
            }
            Err(err) => {
                tracing::warn!(theme = %clip.theme, error = %err, "Failed to start ambient loop");
            }
        }
    }

    pub fn stop(&mut self) {
        if let Some((theme, mut handle)) = self.current.take() {
            handle.stop();
            tracing::debug!(%theme, "Stopped ambient loop");
        }
    }

    #[cfg(test)]
    pub fn playing(&self) -> Option<Theme> {
        self.current.as_ref().map(|(theme, _)| *theme)
    }
}

impl Drop for SoundSlot {
    fn drop(&mut self) {
        self.stop();
    }
}
