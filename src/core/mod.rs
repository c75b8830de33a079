//! Core types for the player.
//!
//! Time representation and formatting shared by the playback logic and
//! the UI.

pub mod time;

pub use time::{format_time, Seconds, ZERO};
