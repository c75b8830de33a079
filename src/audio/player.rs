//! rodio-backed audio transport.
//! Decoding and output are left entirely to rodio; this type only maps the
//! transport operations onto a paused-by-default `Sink`.

use rodio::{Decoder, OutputStream, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use crate::audio::transport::{AudioTransport, TransportError, TransportLoader};
use crate::core::time::{self, Seconds};

/// Audio player for a single local file
pub struct AudioPlayer {
    sink: Sink,
    // Output stops when the stream is dropped; declared after the sink so it outlives it
    _stream: OutputStream,
    path: PathBuf,
    duration: Seconds,
}

impl AudioPlayer {
    /// Open a file and queue it, paused at the start
    pub fn open(path: &Path) -> Result<Self, TransportError> {
        let source = decode(path)?;
        let duration = source
            .total_duration()
            .map(time::from_duration)
            .filter(|d| *d > 0.0)
            .ok_or_else(|| TransportError::UnknownDuration(path.to_path_buf()))?;

        let (stream, handle) = OutputStream::try_default()?;
        let sink = Sink::try_new(&handle)?;
        sink.pause();
        sink.append(source);

        info!(path = %path.display(), duration, "audio resource loaded");

        Ok(Self {
            _stream: stream,
            sink,
            path: path.to_path_buf(),
            duration,
        })
    }

    /// Path of the loaded resource
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-queue the resource once the sink has played it to the end
    fn ensure_queued(&mut self) -> Result<(), TransportError> {
        if self.sink.empty() {
            debug!(path = %self.path.display(), "re-queueing drained audio resource");
            self.sink.append(decode(&self.path)?);
        }
        Ok(())
    }
}

fn decode(path: &Path) -> Result<Decoder<BufReader<File>>, TransportError> {
    let file = File::open(path).map_err(|source| TransportError::ResourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Decoder::new(BufReader::new(file))?)
}

impl AudioTransport for AudioPlayer {
    fn duration(&self) -> Seconds {
        self.duration
    }

    fn play(&mut self) -> Result<(), TransportError> {
        self.ensure_queued()?;
        self.sink.play();
        Ok(())
    }

    fn pause(&mut self) -> Result<(), TransportError> {
        self.sink.pause();
        Ok(())
    }

    fn seek(&mut self, position: Seconds) -> Result<(), TransportError> {
        self.ensure_queued()?;
        let target = time::to_duration(position.min(self.duration));
        self.sink.try_seek(target)?;
        Ok(())
    }
}

impl Drop for AudioPlayer {
    fn drop(&mut self) {
        self.sink.stop();
    }
}

/// Loader producing [`AudioPlayer`] transports
#[derive(Debug, Clone, Copy, Default)]
pub struct AudioPlayerLoader;

impl TransportLoader for AudioPlayerLoader {
    type Transport = AudioPlayer;

    fn load(&self, path: &Path) -> Result<AudioPlayer, TransportError> {
        AudioPlayer::open(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_resource_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.mp3");

        let err = AudioPlayerLoader.load(&path).err().unwrap();
        match err {
            TransportError::ResourceUnavailable { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_garbage_file_fails_to_decode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.mp3");
        std::fs::write(&path, b"definitely not audio").unwrap();

        let err = AudioPlayerLoader.load(&path).err().unwrap();
        assert!(matches!(err, TransportError::Decode(_)));
    }
}
