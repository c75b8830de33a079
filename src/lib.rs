//! Single-screen music player with a spinning album-art disc.
//!
//! Playback state lives in [`playback::PlaybackController`]; the disc angle
//! follows it through [`playback::DiscRotation`]; both are driven by
//! cancellable timers from [`timer`] and coordinated per screen by
//! [`playback::PlayerScreen`].

pub mod audio;
pub mod config;
pub mod core;
pub mod playback;
pub mod timer;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;
