//! Audio transport abstraction.
//! The playback controller only ever talks to audio through these traits;
//! it never sees samples or formats.

use std::path::{Path, PathBuf};
use crate::core::time::Seconds;

/// Error type for audio transports
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Audio resource unavailable: {path}")]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Decode error: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
    #[error("Audio resource has no known duration: {0}")]
    UnknownDuration(PathBuf),
    #[error("Output stream error: {0}")]
    Stream(#[from] rodio::StreamError),
    #[error("Output sink error: {0}")]
    Sink(#[from] rodio::PlayError),
    #[error("Seek error: {0}")]
    Seek(#[from] rodio::source::SeekError),
}

/// A loaded audio resource that can be started, paused and repositioned.
///
/// Calls are fire-and-forget from the caller's point of view: a failure is
/// reported but never changes what the caller considers the playback state.
pub trait AudioTransport {
    /// Total length of the loaded resource
    fn duration(&self) -> Seconds;

    /// Start or resume output from the current position
    fn play(&mut self) -> Result<(), TransportError>;

    /// Pause output, keeping the current position
    fn pause(&mut self) -> Result<(), TransportError>;

    /// Move to an absolute position
    fn seek(&mut self, position: Seconds) -> Result<(), TransportError>;
}

/// Opens audio resources into transports
pub trait TransportLoader {
    type Transport: AudioTransport;

    fn load(&self, path: &Path) -> Result<Self::Transport, TransportError>;
}
