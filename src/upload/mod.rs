pub mod error;
pub mod handoff;
mod types;
mod uploader;
pub mod validation;

pub use error::{ClientError, HandoffError, IntakeError, SubmitError};
pub use handoff::{HandoffStore, JsonFileStore, MemoryStore};
pub use types::{
    Privacy, SelectedFile, UploadEvent, UploadFormFields, UploadJob, UploadOutcome,
    UploadResponse, UploadResult, VideoType,
};
pub use uploader::{classify_response, VideoUploader};
pub use uploader::{
    FIELD_DESCRIPTION, FIELD_FILE, FIELD_PRIVACY, FIELD_TAGS, FIELD_TITLE, FIELD_VIDEO_TYPE,
};
