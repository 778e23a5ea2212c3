//! Mirrors message attachments into a MinIO-style object store.

use reqwest::StatusCode;
use serenity::model::channel::Attachment;
use tracing::{error, info};

use crate::config::Config;

/// What went wrong with a single attachment. Never escapes [`Uploader::upload_all`];
/// it only feeds the per-attachment log line.
#[derive(Debug, thiserror::Error)]
enum UploadError {
    #[error("could not download the attachment from Discord: {0}")]
    Download(#[from] serenity::Error),
    #[error("could not reach the object store: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("object store answered with status {0}")]
    Status(StatusCode),
}

pub struct Uploader {
    http: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
}

impl Uploader {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.minio_url.trim_end_matches('/').to_string(),
            username: config.minio_username.clone(),
            password: config.minio_password.clone(),
        }
    }

    /// Upload every attachment, one at a time, in message order.
    ///
    /// Returns the URLs of the uploads the store accepted. A failed
    /// attachment is logged and left out; callers cannot tell from the
    /// result which one failed.
    pub async fn upload_all(&self, attachments: &[Attachment]) -> Vec<String> {
        let mut urls = Vec::new();
        for attachment in attachments {
            match self.upload(attachment).await {
                Ok(url) => {
                    info!("File uploaded successfully: {url}");
                    urls.push(url);
                }
                Err(err) => {
                    error!("Failed to upload {} to MinIO: {err}", attachment.filename);
                }
            }
        }
        urls
    }

    async fn upload(&self, attachment: &Attachment) -> Result<String, UploadError> {
        let content = attachment.download().await?;
        let url = self.object_url(&attachment.filename);
        let response = self
            .http
            .put(&url)
            .basic_auth(&self.username, Some(&self.password))
            .body(content)
            .send()
            .await?;

        // The store contract treats exactly 200 as success.
        if response.status() == StatusCode::OK {
            Ok(url)
        } else {
            Err(UploadError::Status(response.status()))
        }
    }

    /// Destination for a filename: the base endpoint with the raw filename
    /// appended. Identical filenames overwrite each other in the store.
    fn object_url(&self, filename: &str) -> String {
        format!("{}/{}", self.base_url, filename)
    }
}
