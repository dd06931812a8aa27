pub mod dto;

use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::warn;

use crate::error::AppError;

#[derive(Clone, Debug)]
pub struct TranscriptConfig {
    pub transcript_url: String,
    pub page_url: String,
    pub session_cookie: Option<String>,
}

impl TranscriptConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        let transcript_url = env::var("TRANSCRIPT_URL")
            .map_err(|_| AppError::BadRequest("TRANSCRIPT_URL is not set".to_string()))?;
        let page_url = env::var("TRANSCRIPT_PAGE_URL").unwrap_or_else(|_| transcript_url.clone());
        let session_cookie = env::var("TRANSCRIPT_COOKIE").ok();

        Ok(Self {
            transcript_url,
            page_url,
            session_cookie,
        })
    }
}

/// Where transcript data comes from. A failed fetch is data-absence
/// (`Ok(None)`), not an error: the caller decides how to render an empty
/// state.
#[async_trait]
pub trait TranscriptFetch: Send + Sync {
    /// Raw transcript JSON from the API endpoint.
    async fn fetch_transcript(&self) -> Result<Option<Value>, AppError>;

    /// Rendered transcript page HTML, for the scraping fallback.
    async fn fetch_page(&self) -> Result<Option<String>, AppError>;
}

pub struct TranscriptHttpClient {
    client: Client,
    config: TranscriptConfig,
}

impl TranscriptHttpClient {
    pub fn new(config: TranscriptConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::BadRequest(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, config })
    }

    async fn get(&self, url: &str) -> Option<reqwest::Response> {
        let mut request = self.client.get(url);
        if let Some(cookie) = &self.config.session_cookie {
            request = request.header("Cookie", cookie.clone());
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("transcript request to {} failed: {}", url, e);
                return None;
            }
        };

        if !response.status().is_success() {
            warn!("transcript source {} returned {}", url, response.status());
            return None;
        }

        Some(response)
    }
}

#[async_trait]
impl TranscriptFetch for TranscriptHttpClient {
    async fn fetch_transcript(&self) -> Result<Option<Value>, AppError> {
        let Some(response) = self.get(&self.config.transcript_url).await else {
            return Ok(None);
        };

        match response.json::<Value>().await {
            Ok(transcript) => Ok(Some(transcript)),
            Err(e) => {
                warn!("failed to decode transcript response: {}", e);
                Ok(None)
            }
        }
    }

    async fn fetch_page(&self) -> Result<Option<String>, AppError> {
        let Some(response) = self.get(&self.config.page_url).await else {
            return Ok(None);
        };

        match response.text().await {
            Ok(page) => Ok(Some(page)),
            Err(e) => {
                warn!("failed to read transcript page: {}", e);
                Ok(None)
            }
        }
    }
}

/// Serves a fixed document, for tests and offline development.
#[derive(Debug, Clone, Default)]
pub struct StaticTranscriptSource {
    pub transcript: Option<Value>,
    pub page: Option<String>,
}

impl StaticTranscriptSource {
    pub fn new(transcript: Value) -> Self {
        Self {
            transcript: Some(transcript),
            page: None,
        }
    }
}

#[async_trait]
impl TranscriptFetch for StaticTranscriptSource {
    async fn fetch_transcript(&self) -> Result<Option<Value>, AppError> {
        Ok(self.transcript.clone())
    }

    async fn fetch_page(&self) -> Result<Option<String>, AppError> {
        Ok(self.page.clone())
    }
}
