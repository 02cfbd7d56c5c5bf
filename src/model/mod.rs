pub mod hero;
pub mod level;
pub mod phase;
pub mod player;
