pub mod browser;
pub mod color;
pub mod file_size;
