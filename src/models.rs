use crate::charts::{ChartConfig, SlotId};
use crate::health::{HealthStatus, HealthSummary};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Campaign {
    pub id: i64,
    pub name: String,
    pub budget: f64,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    #[serde(default)]
    pub ctr: Option<f64>,
    #[serde(default)]
    pub cpc: Option<f64>,
    #[serde(default)]
    pub conversion_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCampaign {
    pub name: String,
    pub budget: f64,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InsightRecord {
    pub campaign_id: i64,
    pub campaign_name: String,
    pub health_score: i64,
    pub issues_found: u32,
    pub top_issue: String,
}

#[derive(Debug, Deserialize)]
pub struct CampaignList {
    pub campaigns: Vec<Campaign>,
}

#[derive(Debug, Deserialize)]
pub struct InsightList {
    pub insights: Vec<InsightRecord>,
}

#[derive(Debug, Deserialize)]
pub struct CreatedCampaign {
    pub campaign: Campaign,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub severity: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub root_causes: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub metric_value: Option<f64>,
    #[serde(default)]
    pub threshold: Option<f64>,
}

/// Result of the backend's diagnose-by-id call. Displayed as-is, never recomputed here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnosis {
    #[serde(default)]
    pub campaign_id: Option<i64>,
    #[serde(default)]
    pub campaign_name: Option<String>,
    pub health_score: i64,
    pub status: String,
    pub summary: String,
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub metrics_analyzed: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct ReportFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CampaignRow {
    #[serde(flatten)]
    pub campaign: Campaign,
    pub health: HealthStatus,
    pub metrics_valid: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CampaignsResponse {
    pub campaigns: Vec<CampaignRow>,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Alert {
    pub campaign_id: i64,
    pub campaign_name: String,
    pub health_score: i64,
    pub issues_found: u32,
    pub top_issue: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MountedChart {
    pub slot: SlotId,
    pub instance: u64,
    pub config: ChartConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub tab: crate::view::Tab,
    pub refreshed_at: String,
    pub summary: HealthSummary,
    pub campaigns: Vec<CampaignRow>,
    pub alerts: Vec<Alert>,
    pub charts: Vec<MountedChart>,
}
