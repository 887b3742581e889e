use crate::upload::error::ClientError;
use crate::upload::types::{UploadEvent, UploadJob, UploadOutcome, UploadResponse};
use futures::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;
use tokio_util::io::ReaderStream;
use tracing::{debug, error, info, warn};

pub const FIELD_FILE: &str = "video_dosyasi";
pub const FIELD_TITLE: &str = "video_baslik";
pub const FIELD_DESCRIPTION: &str = "video_aciklamasi";
pub const FIELD_TAGS: &str = "video_taglari";
pub const FIELD_PRIVACY: &str = "gizlilik_secenegi";
pub const FIELD_VIDEO_TYPE: &str = "video_tipi";

#[derive(Clone)]
pub struct VideoUploader {
    upload_url: String,
    client: Client,
}

impl VideoUploader {
    pub fn new(upload_url: impl Into<String>) -> Self {
        Self {
            upload_url: upload_url.into(),
            client: Client::new(),
        }
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }

    /// Runs one upload on a dedicated thread with its own runtime. Progress
    /// samples and exactly one `Finished` event are sent on `events`.
    pub fn spawn(self, job: UploadJob, events: Sender<UploadEvent>) -> JoinHandle<()> {
        std::thread::spawn(move || {
            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    let err = ClientError::Runtime(e);
                    error!("{}", err);
                    let _ = events.send(UploadEvent::Finished(UploadOutcome::ClientError(
                        err.to_string(),
                    )));
                    return;
                }
            };

            let outcome = rt.block_on(self.upload(&job, &events));
            let _ = events.send(UploadEvent::Finished(outcome));
        })
    }

    pub async fn upload(&self, job: &UploadJob, events: &Sender<UploadEvent>) -> UploadOutcome {
        let form = match self.build_form(job, events.clone()).await {
            Ok(form) => form,
            Err(e) => {
                error!("Failed to prepare upload of '{}': {}", job.file.name, e);
                return UploadOutcome::ClientError(e.to_string());
            }
        };

        info!(
            "Uploading '{}' ({} bytes) to {}",
            job.file.name, job.file.size, self.upload_url
        );

        let response = match self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!("Failed to send upload request: {}", e);
                return UploadOutcome::Transport(e.to_string());
            }
        };

        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                error!("Failed to read upload response: {}", e);
                return UploadOutcome::Transport(e.to_string());
            }
        };

        let outcome = classify_response(status, &body);
        match &outcome {
            UploadOutcome::Succeeded(result) => {
                info!("Upload accepted, video id {:?}", result.video_id)
            }
            other => warn!("Upload failed with status {}: {:?}", status, other),
        }
        outcome
    }

    async fn build_form(
        &self,
        job: &UploadJob,
        events: Sender<UploadEvent>,
    ) -> Result<Form, ClientError> {
        let open_error = |source: std::io::Error| ClientError::Open {
            path: job.file.path.display().to_string(),
            source,
        };

        let file = tokio::fs::File::open(&job.file.path)
            .await
            .map_err(open_error)?;
        let total = file.metadata().await.map_err(open_error)?.len();

        let mut sent = 0u64;
        let stream = ReaderStream::new(file).map(move |chunk| {
            if let Ok(bytes) = &chunk {
                sent += bytes.len() as u64;
                debug!("Upload progress {}/{}", sent, total);
                let _ = events.send(UploadEvent::Progress { sent, total });
            }
            chunk
        });

        let part = Part::stream_with_length(Body::wrap_stream(stream), total)
            .file_name(job.file.name.clone())
            .mime_str(&job.file.mime_type)
            .map_err(|source| ClientError::InvalidMime {
                mime: job.file.mime_type.clone(),
                source,
            })?;

        let fields = &job.fields;
        Ok(Form::new()
            .part(FIELD_FILE, part)
            .text(FIELD_TITLE, fields.title.clone())
            .text(FIELD_DESCRIPTION, fields.description.clone())
            .text(FIELD_TAGS, fields.tags.clone())
            .text(FIELD_PRIVACY, fields.privacy.as_str())
            .text(FIELD_VIDEO_TYPE, fields.video_type.as_str()))
    }
}

/// Maps a terminal HTTP status and body onto an outcome. Only 200 counts as
/// success; every other status is a server error whose `hata` is used when
/// the body parses.
pub fn classify_response(status: u16, body: &str) -> UploadOutcome {
    if status == 200 {
        return match serde_json::from_str::<UploadResponse>(body) {
            Ok(response) if response.basarili => UploadOutcome::Succeeded(response.into()),
            Ok(response) => UploadOutcome::Rejected(
                response
                    .hata
                    .unwrap_or_else(|| "Unknown error".to_string()),
            ),
            Err(_) => UploadOutcome::Malformed,
        };
    }

    let message = serde_json::from_str::<UploadResponse>(body)
        .ok()
        .and_then(|response| response.hata);
    UploadOutcome::ServerError { status, message }
}
