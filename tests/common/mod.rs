use std::io::Write;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;
use video_uploader::upload::SelectedFile;
use video_uploader::utils::browser::{NavigationError, Navigator};

#[derive(Clone, Default)]
pub struct RecordingNavigator(Arc<Mutex<Vec<String>>>);

impl RecordingNavigator {
    pub fn visited(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &str) -> Result<(), NavigationError> {
        self.0.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

/// A real `.mp4`-named file of `size` bytes. Keep the handle alive for as
/// long as the file is needed.
#[allow(unused)]
pub fn video_fixture(size: u64) -> (NamedTempFile, SelectedFile) {
    let mut file = tempfile::Builder::new()
        .prefix("clip")
        .suffix(".mp4")
        .tempfile()
        .unwrap();
    file.write_all(&vec![7u8; size as usize]).unwrap();
    file.flush().unwrap();

    let selected = SelectedFile::from_path(file.path().to_path_buf(), None).unwrap();
    (file, selected)
}
