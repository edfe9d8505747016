use crate::config::ServiceSettings;
use crate::error::{CliError, Result};
use mutaplex::core::models::service::{
    CustomMutagenesisRequest, OligoDesignRequest, OligoDesignResponse,
    SaturationMutagenesisRequest, ScanningLibraryRequest, VariantResponse,
};
use mutaplex::engine::error::EngineError;
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

pub const CUSTOM_ENDPOINT: &str = "mutagenesis/custom";
pub const SATURATION_ENDPOINT: &str = "mutagenesis/saturation";
pub const SCANNING_ENDPOINT: &str = "mutagenesis/scanning";
pub const OLIGO_ENDPOINT: &str = "oligos/generate";

/// JSON client for the Sequence Design Service.
#[derive(Debug, Clone)]
pub struct DesignServiceClient {
    http: reqwest::Client,
    base_url: String,
}

impl DesignServiceClient {
    pub fn new(settings: &ServiceSettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn custom(&self, request: &CustomMutagenesisRequest) -> Result<VariantResponse> {
        self.post(CUSTOM_ENDPOINT, request).await
    }

    pub async fn saturation(&self, request: &SaturationMutagenesisRequest) -> Result<VariantResponse> {
        self.post(SATURATION_ENDPOINT, request).await
    }

    pub async fn scanning(&self, request: &ScanningLibraryRequest) -> Result<VariantResponse> {
        self.post(SCANNING_ENDPOINT, request).await
    }

    pub async fn design_oligos(&self, request: &OligoDesignRequest) -> Result<OligoDesignResponse> {
        self.post(OLIGO_ENDPOINT, request).await
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path);
        info!("Sending request to {}", url);
        let response = self.http.post(&url).json(body).send().await?;

        let status = response.status();
        let text = response.text().await?;
        debug!("Received {} ({} bytes) from {}", status, text.len(), url);

        if !status.is_success() {
            return Err(EngineError::upstream(failure_message(status, &text)).into());
        }
        serde_json::from_str(&text)
            .map_err(|e| CliError::Service(format!("invalid JSON from {}: {}", url, e)))
    }
}

/// Prefers the service's own `{ "error": ... }` text over the bare status line.
fn failure_message(status: StatusCode, body: &str) -> String {
    let reported = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string));
    match reported {
        Some(message) => format!("HTTP {}: {}", status.as_u16(), message),
        None => format!("HTTP {}", status),
    }
}
