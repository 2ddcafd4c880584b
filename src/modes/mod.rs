pub mod play;
pub mod ticker;

pub use play::PlayMode;
pub use ticker::Ticker;
