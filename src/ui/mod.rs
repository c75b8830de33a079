//! UI module for the egui-based player.
//! All player state is mutated on the UI thread, from `PlayerApp::update`.

pub mod app;
pub mod cover;
pub mod disc_view;
pub mod player_view;

pub use app::{run, LaunchError, PlayerApp};
