use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use futures_util::{stream, StreamExt};
use lingolens_core::{ImageCandidate, LanguageCatalog, TranslationOutcome};
use lingolens_logging::{lens_debug, lens_info, lens_warn};
use reqwest::multipart::{Form, Part};
use url::Url;

use crate::wire::{parse_catalog, parse_failure, parse_translation};
use crate::ClientError;

/// Origin of the translation backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

const LANGUAGES_PATH: &str = "languages";
const TRANSLATE_PATH: &str = "translate-image";
const HEALTH_PATH: &str = "health";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: Url,
    pub connect_timeout: Duration,
    /// Bound on a whole image submission, upload included.
    pub request_timeout: Duration,
    /// Size of the slices the image is streamed in; one progress report per slice.
    pub upload_chunk_size: usize,
}

impl ClientSettings {
    pub fn with_base_url(base_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            ..Self::default()
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        // Joining against a base without a trailing slash would drop its last segment.
        if self.base_url.path().ends_with('/') {
            self.base_url.join(path)
        } else {
            Url::parse(&format!("{}/", self.base_url))?.join(path)
        }
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url"),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            upload_chunk_size: 64 * 1024,
        }
    }
}

/// Receives upload progress as a percentage in `0..=100`.
pub trait ProgressSink: Send + Sync {
    fn report(&self, percent: u8);
}

#[async_trait::async_trait]
pub trait TranslateClient: Send + Sync {
    async fn fetch_languages(&self) -> Result<LanguageCatalog, ClientError>;

    /// Uploads one image. Issues exactly one request; never retries.
    async fn translate_image(
        &self,
        image: &ImageCandidate,
        target_language: &str,
        sink: Arc<dyn ProgressSink>,
    ) -> Result<TranslationOutcome, ClientError>;

    /// Advisory only: transport failures read as `false`.
    async fn health_check(&self) -> bool;
}

#[derive(Debug, Clone)]
pub struct ReqwestTranslateClient {
    settings: ClientSettings,
}

impl ReqwestTranslateClient {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    fn build_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
    }

    fn file_part(&self, image: &ImageCandidate, sink: Arc<dyn ProgressSink>) -> Part {
        let length = image.bytes.len() as u64;
        let part = Part::stream_with_length(
            progress_body(image.bytes.clone(), self.settings.upload_chunk_size, sink.clone()),
            length,
        )
        .file_name(image.name.clone());
        match part.mime_str(&image.media_type) {
            Ok(part) => part,
            Err(err) => {
                lens_warn!(
                    "Sending {:?} without content type, {:?} rejected: {}",
                    image.name,
                    image.media_type,
                    err
                );
                Part::stream_with_length(
                    progress_body(image.bytes.clone(), self.settings.upload_chunk_size, sink),
                    length,
                )
                .file_name(image.name.clone())
            }
        }
    }
}

#[async_trait::async_trait]
impl TranslateClient for ReqwestTranslateClient {
    async fn fetch_languages(&self) -> Result<LanguageCatalog, ClientError> {
        let url = self
            .settings
            .endpoint(LANGUAGES_PATH)
            .map_err(|err| ClientError::CatalogFetch(err.to_string()))?;
        let client = self
            .build_client()
            .map_err(|err| ClientError::CatalogFetch(err.to_string()))?;

        let response = client
            .get(url)
            .send()
            .await
            .map_err(|err| ClientError::CatalogFetch(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::CatalogFetch(format!("http status {status}")));
        }
        let body = response
            .bytes()
            .await
            .map_err(|err| ClientError::CatalogFetch(err.to_string()))?;
        parse_catalog(&body)
    }

    async fn translate_image(
        &self,
        image: &ImageCandidate,
        target_language: &str,
        sink: Arc<dyn ProgressSink>,
    ) -> Result<TranslationOutcome, ClientError> {
        let url = self.settings.endpoint(TRANSLATE_PATH).map_err(|err| {
            lens_warn!("Invalid translate endpoint: {}", err);
            ClientError::Network
        })?;
        let client = self.build_client().map_err(map_reqwest_error)?;

        let form = Form::new()
            .part("file", self.file_part(image, sink))
            .text("target_language", target_language.to_string());

        lens_info!(
            "Uploading {:?} ({} bytes) for translation to {}",
            image.name,
            image.bytes.len(),
            target_language
        );
        let response = client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        lens_debug!("translate-image answered {} with {} bytes", status, body.len());

        if status.is_success() {
            parse_translation(&body)
        } else {
            Err(parse_failure(status, &body))
        }
    }

    async fn health_check(&self) -> bool {
        let Ok(url) = self.settings.endpoint(HEALTH_PATH) else {
            return false;
        };
        let Ok(client) = self.build_client() else {
            return false;
        };
        match client.post(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                lens_debug!("Health check failed: {}", err);
                false
            }
        }
    }
}

/// Streams `bytes` in slices, reporting the share handed to the transport so far.
fn progress_body(bytes: Bytes, chunk_size: usize, sink: Arc<dyn ProgressSink>) -> reqwest::Body {
    let total = bytes.len();
    let chunk_size = chunk_size.max(1);
    let chunks: Vec<Bytes> = (0..total)
        .step_by(chunk_size)
        .map(|start| bytes.slice(start..(start + chunk_size).min(total)))
        .collect();

    let mut sent = 0usize;
    let body = stream::iter(chunks).map(move |chunk| {
        sent += chunk.len();
        sink.report(upload_percent(sent as u64, total as u64));
        Ok::<Bytes, std::io::Error>(chunk)
    });
    reqwest::Body::wrap_stream(body)
}

/// `round(sent / total * 100)`, clamped to `0..=100`.
pub fn upload_percent(sent: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    let ratio = sent.min(total) as f64 / total as f64;
    (ratio * 100.0).round() as u8
}

fn map_reqwest_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        lens_warn!("Request timed out: {}", err);
        return ClientError::Timeout;
    }
    lens_warn!("Transport error: {}", err);
    ClientError::Network
}
