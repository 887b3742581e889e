use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
    pub path: PathBuf,
}

impl SelectedFile {
    /// Builds a selection from a local path, guessing the MIME type from the
    /// extension when the caller has none.
    pub fn from_path(path: PathBuf, mime_type: Option<String>) -> std::io::Result<Self> {
        let size = std::fs::metadata(&path)?.len();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let mime_type = mime_type
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                mime_guess::from_path(&path)
                    .first_or_octet_stream()
                    .to_string()
            });

        Ok(Self {
            name,
            mime_type,
            size,
            path,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Privacy {
    #[default]
    Public,
    Unlisted,
    Private,
}

impl Privacy {
    pub const ALL: [Privacy; 3] = [Privacy::Public, Privacy::Unlisted, Privacy::Private];

    pub fn as_str(&self) -> &'static str {
        match self {
            Privacy::Public => "public",
            Privacy::Unlisted => "unlisted",
            Privacy::Private => "private",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Privacy::Public => "🌍 Public",
            Privacy::Unlisted => "🔗 Unlisted",
            Privacy::Private => "🔒 Private",
        }
    }
}

impl fmt::Display for Privacy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoType {
    #[default]
    Normal,
    Short,
}

impl VideoType {
    pub const ALL: [VideoType; 2] = [VideoType::Normal, VideoType::Short];

    pub fn as_str(&self) -> &'static str {
        match self {
            VideoType::Normal => "normal",
            VideoType::Short => "short",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VideoType::Normal => "🎬 Video",
            VideoType::Short => "📱 Short",
        }
    }
}

impl fmt::Display for VideoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadFormFields {
    pub title: String,
    pub description: String,
    pub tags: String,
    pub privacy: Privacy,
    pub video_type: VideoType,
}

/// Everything the worker thread needs for one submission.
#[derive(Debug, Clone)]
pub struct UploadJob {
    pub file: SelectedFile,
    pub fields: UploadFormFields,
}

/// Body returned by the upload endpoint, for both 200 and error statuses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub basarili: bool,
    pub video_id: Option<String>,
    pub video_linki: Option<String>,
    pub video_tipi: Option<String>,
    pub gizlilik: Option<String>,
    pub video_analiz: Option<serde_json::Value>,
    pub hata: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadResult {
    pub video_id: Option<String>,
    pub video_link: Option<String>,
    pub video_type: Option<String>,
    pub privacy: Option<String>,
    pub analysis: Option<serde_json::Value>,
}

impl From<UploadResponse> for UploadResult {
    fn from(response: UploadResponse) -> Self {
        Self {
            video_id: response.video_id,
            video_link: response.video_linki,
            video_type: response.video_tipi,
            privacy: response.gizlilik,
            analysis: response.video_analiz,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    Succeeded(UploadResult),
    /// 200 with `basarili: false`.
    Rejected(String),
    /// 200 whose body could not be parsed.
    Malformed,
    ServerError {
        status: u16,
        message: Option<String>,
    },
    Transport(String),
    ClientError(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadEvent {
    Progress { sent: u64, total: u64 },
    Finished(UploadOutcome),
}
