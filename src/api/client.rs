use crate::api::error::ApiError;
use crate::config::{Config, ConfigError};
use crate::upload::SelectedFile;
use reqwest::multipart;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, warn};

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub processed_file: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranslationResponse {
    #[serde(default)]
    pub original_text: String,
    #[serde(default)]
    pub translated_text: String,
    pub audio_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationOptions {
    pub source_lang: String,
    pub target_lang: String,
    pub voice_type: u8,
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    upload_path: String,
    translate_path: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            client: Client::new(),
            base_url: config.base_url()?,
            upload_path: config.upload_path.clone(),
            translate_path: config.translate_path.clone(),
        })
    }

    /// Absolute references pass through; relative ones hang off the API base URL.
    pub fn resolve(&self, reference: &str) -> Result<Url, ApiError> {
        match Url::parse(reference) {
            Ok(url) => Ok(url),
            Err(_) => self
                .base_url
                .join(reference)
                .map_err(|_| ApiError::InvalidReference(reference.to_string())),
        }
    }

    /// Endpoint `path` below the base URL, keeping any path prefix the base carries.
    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let prefix = format!("{}/", base.path());
            base.set_path(&prefix);
        }
        base.join(path.trim_start_matches('/'))
            .map_err(|_| ApiError::InvalidReference(path.to_string()))
    }

    pub async fn upload(&self, file: &SelectedFile) -> Result<UploadResponse, ApiError> {
        self.post_file(&self.upload_path, file, Vec::new()).await
    }

    pub async fn translate(
        &self,
        file: &SelectedFile,
        options: &TranslationOptions,
    ) -> Result<TranslationResponse, ApiError> {
        let fields = vec![
            ("source_lang", options.source_lang.clone()),
            ("target_lang", options.target_lang.clone()),
            ("voice_type", options.voice_type.to_string()),
        ];
        self.post_file(&self.translate_path, file, fields).await
    }

    pub async fn fetch_artifact(&self, reference: &str) -> Result<Vec<u8>, ApiError> {
        let url = self.resolve(reference)?;
        debug!("Fetching artifact from {}", url);

        let response = self.client.get(url).send().await?;
        let response = Self::check_status(response).await?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }

    async fn post_file<T: DeserializeOwned>(
        &self,
        path: &str,
        file: &SelectedFile,
        fields: Vec<(&'static str, String)>,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;

        let content = file.read().await?;
        let file_part = multipart::Part::bytes(content)
            .file_name(file.name.clone())
            .mime_str(&file.mime)?;

        let mut form = multipart::Form::new().part("file", file_part);
        for (name, value) in fields {
            form = form.text(name, value);
        }

        info!("Uploading '{}' ({} bytes) to {}", file.name, file.size, url);
        let response = self.client.post(url).multipart(form).send().await?;
        let response = Self::check_status(response).await?;

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn check_status(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.error);
        warn!("Request failed with status {}: {}", status, body);

        Err(ApiError::Rejected { status, message })
    }
}
