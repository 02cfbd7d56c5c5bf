pub mod app;
pub mod backdrop;
pub mod screens;
pub mod settings;
pub mod theme;
pub mod typewriter;
