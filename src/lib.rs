pub mod app;
pub mod config;
pub mod upload;
pub mod utils;

pub use app::VideoUploaderApp;
pub use config::{Cli, UploaderConfig};
