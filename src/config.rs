use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_UPLOAD_URL: &str = "http://127.0.0.1:5000/upload-video";
pub const DEFAULT_RESULT_URL: &str = "http://127.0.0.1:5000/sonuc";

#[derive(Parser, Debug)]
#[command(name = "video-uploader")]
#[command(about = "Upload a video to your channel through the upload service")]
#[command(version)]
pub struct Cli {
    /// Endpoint that receives the multipart upload
    #[arg(long, default_value = DEFAULT_UPLOAD_URL, env = "VIDEO_UPLOAD_URL")]
    pub upload_url: String,

    /// Page opened after a successful upload
    #[arg(long, default_value = DEFAULT_RESULT_URL, env = "VIDEO_RESULT_URL")]
    pub result_url: String,

    /// Also write the upload result to this JSON file
    #[arg(long, env = "VIDEO_HANDOFF_FILE")]
    pub handoff_file: Option<PathBuf>,
}

impl Cli {
    pub fn into_config(self) -> UploaderConfig {
        UploaderConfig {
            upload_url: self.upload_url,
            result_url: self.result_url,
            handoff_file: self.handoff_file,
            ..UploaderConfig::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct UploaderConfig {
    pub upload_url: String,
    pub result_url: String,
    pub handoff_file: Option<PathBuf>,
    pub status_hide_after: Duration,
    pub progress_hide_after: Duration,
    pub navigate_after: Duration,
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            upload_url: DEFAULT_UPLOAD_URL.to_string(),
            result_url: DEFAULT_RESULT_URL.to_string(),
            handoff_file: None,
            status_hide_after: Duration::from_millis(5000),
            progress_hide_after: Duration::from_millis(1500),
            navigate_after: Duration::from_millis(2000),
        }
    }
}
