pub mod player;
pub mod transport;

pub use player::{AudioPlayer, AudioPlayerLoader};
pub use transport::{AudioTransport, TransportError, TransportLoader};
