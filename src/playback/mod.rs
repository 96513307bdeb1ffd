pub mod autoplay;
pub mod gesture;
pub mod player;
