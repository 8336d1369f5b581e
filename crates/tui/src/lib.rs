pub mod app;
pub mod config;
pub mod download;
pub mod input;
pub mod keybinds;
pub mod messages;
pub mod ui;

pub use config::Config;
