//! Client for the campaign backend.
//!
//! The backend owns storage and the rule engine; this service only reads its
//! lists, forwards mutations, and relays diagnose and report results.

use crate::models::{
    Campaign, CampaignList, CreatedCampaign, Diagnosis, InsightList, InsightRecord, MessageResponse,
    NewCampaign, ReportFile,
};
use async_trait::async_trait;
use chrono::Local;
use reqwest::{header, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend answered with a non-success status.
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// The request never produced a response.
    #[error("backend unreachable: {0}")]
    Transport(String),

    /// The response body did not have the expected shape.
    #[error("unexpected backend response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BackendError::Parse(err.to_string())
        } else {
            BackendError::Transport(err.to_string())
        }
    }
}

#[async_trait]
pub trait CampaignApi: Send + Sync {
    async fn list_campaigns(&self) -> Result<Vec<Campaign>, BackendError>;

    async fn list_insights(&self) -> Result<Vec<InsightRecord>, BackendError>;

    async fn create_campaign(&self, campaign: &NewCampaign) -> Result<Campaign, BackendError>;

    async fn delete_campaign(&self, id: i64) -> Result<String, BackendError>;

    async fn diagnose(&self, id: i64) -> Result<Diagnosis, BackendError>;

    async fn report(&self, id: i64) -> Result<ReportFile, BackendError>;

    async fn seed(&self) -> Result<String, BackendError>;
}

#[derive(Debug, Clone)]
pub struct HttpCampaignApi {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl HttpCampaignApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        debug!(path, "backend GET");
        let response = self.client.get(self.url(path)).send().await?;
        decode(checked(response).await?).await
    }
}

#[async_trait]
impl CampaignApi for HttpCampaignApi {
    async fn list_campaigns(&self) -> Result<Vec<Campaign>, BackendError> {
        let list: CampaignList = self.get_json("/api/campaigns").await?;
        Ok(list.campaigns)
    }

    async fn list_insights(&self) -> Result<Vec<InsightRecord>, BackendError> {
        let list: InsightList = self.get_json("/api/insights").await?;
        Ok(list.insights)
    }

    async fn create_campaign(&self, campaign: &NewCampaign) -> Result<Campaign, BackendError> {
        let response = self
            .client
            .post(self.url("/api/campaigns"))
            .json(campaign)
            .send()
            .await?;
        let created: CreatedCampaign = decode(checked(response).await?).await?;
        Ok(created.campaign)
    }

    async fn delete_campaign(&self, id: i64) -> Result<String, BackendError> {
        let response = self
            .client
            .delete(self.url(&format!("/api/campaigns/{id}")))
            .send()
            .await?;
        let body: MessageResponse = decode(checked(response).await?).await?;
        Ok(body.message)
    }

    async fn diagnose(&self, id: i64) -> Result<Diagnosis, BackendError> {
        self.get_json(&format!("/api/diagnose/{id}")).await
    }

    async fn report(&self, id: i64) -> Result<ReportFile, BackendError> {
        let response = self
            .client
            .get(self.url(&format!("/api/report/{id}")))
            .send()
            .await?;
        let response = checked(response).await?;

        let headers = response.headers();
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("application/pdf")
            .to_string();
        let filename = headers
            .get(header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(attachment_filename)
            .unwrap_or_else(|| default_report_filename(id));
        let bytes = response.bytes().await?.to_vec();

        Ok(ReportFile {
            filename,
            content_type,
            bytes,
        })
    }

    async fn seed(&self) -> Result<String, BackendError> {
        let response = self.client.post(self.url("/api/seed")).send().await?;
        let body: MessageResponse = decode(checked(response).await?).await?;
        Ok(body.message)
    }
}

/// Turn a non-success response into `BackendError::Api`, echoing the
/// backend's `error` text when it sent one.
async fn checked(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => body.error,
        Err(_) if !text.trim().is_empty() => text.trim().to_string(),
        Err(_) => format!("backend returned status {status}"),
    };
    Err(BackendError::Api { status, message })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|err| BackendError::Parse(err.to_string()))
}

fn attachment_filename(disposition: &str) -> Option<String> {
    disposition
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

pub fn default_report_filename(id: i64) -> String {
    format!(
        "campaign_{id}_report_{}.pdf",
        Local::now().format("%Y%m%d_%H%M%S")
    )
}
