pub mod controller;
pub mod screen;
pub mod state;
pub mod sync;

pub use controller::PlaybackController;
pub use screen::PlayerScreen;
pub use state::{PlaybackSession, PlaybackState};
pub use sync::{DiscRotation, RotationState};
