use super::error::IntakeError;
use super::types::SelectedFile;

pub const ALLOWED_MIME_TYPES: [&str; 7] = [
    "video/mp4",
    "video/quicktime",
    "video/x-msvideo",
    "video/x-matroska",
    "video/x-flv",
    "video/x-ms-wmv",
    "video/webm",
];

/// Extensions the upload endpoint accepts, used as the picker filter.
pub const VIDEO_EXTENSIONS: [&str; 7] = ["mp4", "mov", "avi", "mkv", "flv", "wmv", "webm"];

pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024 * 1024;

pub fn is_allowed_mime(mime_type: &str) -> bool {
    ALLOWED_MIME_TYPES.contains(&mime_type)
}

/// Type is checked before size, so an oversized file of the wrong type
/// reports the type.
pub fn validate_file(file: &SelectedFile) -> Result<(), IntakeError> {
    if !is_allowed_mime(&file.mime_type) {
        return Err(IntakeError::UnsupportedType(file.mime_type.clone()));
    }

    if file.size > MAX_FILE_SIZE {
        return Err(IntakeError::TooLarge {
            size: file.size,
            max: MAX_FILE_SIZE,
        });
    }

    Ok(())
}
