// Tomato Expert API repository implementation
use crate::application::diagnostics::EndpointChecker;
use crate::application::environmental_repository::EnvironmentalRepository;
use crate::domain::environment::{CriHistory, EnvironmentalData, HistoryWindow};
use crate::domain::farm::FarmLocation;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API request to {path} failed with status {status}: {body}")]
    Status {
        path: String,
        status: u16,
        body: String,
    },
}

/// Responses may arrive bare or wrapped as `{"data": ...}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(data) => data,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiRepository {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiRepository {
    pub fn new(base_url: String, token: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn history_path(window: HistoryWindow) -> String {
        format!(
            "/environmental/cri-history?period={}",
            urlencoding::encode(window.as_str())
        )
    }

    async fn send(&self, path: &str) -> Result<reqwest::Response> {
        let mut request = self
            .client
            .get(self.build_url(path))
            .header("Accept", "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        request
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", path))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(path).await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                path: path.to_string(),
                status,
                body,
            }
            .into());
        }

        let envelope = response
            .json::<Envelope<T>>()
            .await
            .with_context(|| format!("Failed to parse response from {}", path))?;

        Ok(envelope.into_inner())
    }
}

#[async_trait]
impl EnvironmentalRepository for ApiRepository {
    async fn fetch_latest(&self) -> Result<EnvironmentalData> {
        self.get_json("/environmental/latest").await
    }

    async fn fetch_history(&self, window: HistoryWindow) -> Result<CriHistory> {
        let path = Self::history_path(window);
        tracing::debug!("Fetching CRI history: {}", path);
        self.get_json(&path).await
    }

    async fn list_farm_locations(&self) -> Result<Vec<FarmLocation>> {
        self.get_json("/map/farm-locations").await
    }
}

#[async_trait]
impl EndpointChecker for ApiRepository {
    async fn check(&self, path: &str) -> Result<u16> {
        let response = self.send(path).await?;
        Ok(response.status().as_u16())
    }
}
