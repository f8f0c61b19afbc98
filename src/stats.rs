use crate::health::{validate_metric, HealthStatus, ScoreBands};
use crate::models::{Alert, Campaign, InsightRecord};

/// Benchmarks shown next to the averages: CTR %, CPC $, conversion %.
pub const BENCHMARK_CTR: f64 = 2.0;
pub const BENCHMARK_CPC: f64 = 5.0;
pub const BENCHMARK_CONVERSION: f64 = 2.0;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricAverages {
    pub ctr: f64,
    pub cpc: f64,
    pub conversion_rate: f64,
}

pub fn average_metrics(campaigns: &[Campaign]) -> MetricAverages {
    if campaigns.is_empty() {
        return MetricAverages::default();
    }

    let mut sums = MetricAverages::default();
    for campaign in campaigns {
        sums.ctr += usable(campaign.ctr);
        sums.cpc += usable(campaign.cpc);
        sums.conversion_rate += usable(campaign.conversion_rate);
    }

    let denom = campaigns.len() as f64;
    MetricAverages {
        ctr: round2(sums.ctr / denom),
        cpc: round2(sums.cpc / denom),
        conversion_rate: round2(sums.conversion_rate / denom),
    }
}

/// Insights whose score falls in the critical band, worst first.
pub fn critical_alerts(insights: &[InsightRecord]) -> Vec<Alert> {
    let mut alerts: Vec<Alert> = insights
        .iter()
        .filter(|insight| {
            ScoreBands::INSIGHTS.status(insight.health_score) == HealthStatus::Critical
        })
        .map(|insight| Alert {
            campaign_id: insight.campaign_id,
            campaign_name: insight.campaign_name.clone(),
            health_score: insight.health_score,
            issues_found: insight.issues_found,
            top_issue: insight.top_issue.clone(),
        })
        .collect();
    alerts.sort_by_key(|alert| (alert.health_score, alert.campaign_id));
    alerts
}

fn usable(value: Option<f64>) -> f64 {
    value
        .and_then(|value| validate_metric(value).ok())
        .unwrap_or_default()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
