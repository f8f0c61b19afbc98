//! Chart slots and the configurations drawn into them.
//!
//! A slot holds at most one live chart instance. Every render releases the
//! held instance first and only then attaches a new one, so a surface never
//! carries two overlapping charts.

use crate::health::{BarThresholds, HealthSummary, CRITICAL_COLOR, HEALTHY_COLOR, WARNING_COLOR};
use crate::models::Campaign;
use crate::stats::{MetricAverages, BENCHMARK_CONVERSION, BENCHMARK_CPC, BENCHMARK_CTR};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotId {
    HealthDistribution,
    MetricsBenchmark,
    CtrByCampaign,
    ConversionByCampaign,
    BudgetVsClicks,
}

impl SlotId {
    pub const ALL: [SlotId; 5] = [
        SlotId::HealthDistribution,
        SlotId::MetricsBenchmark,
        SlotId::CtrByCampaign,
        SlotId::ConversionByCampaign,
        SlotId::BudgetVsClicks,
    ];

    /// Id of the canvas element backing this slot on the page.
    pub fn canvas_id(self) -> &'static str {
        match self {
            SlotId::HealthDistribution => "health-chart",
            SlotId::MetricsBenchmark => "benchmark-chart",
            SlotId::CtrByCampaign => "ctr-chart",
            SlotId::ConversionByCampaign => "conversion-chart",
            SlotId::BudgetVsClicks => "budget-chart",
        }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canvas_id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Doughnut,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub background_color: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// Chart.js-shaped configuration; the page hands it to the chart library untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
}

pub fn health_distribution(summary: &HealthSummary) -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Doughnut,
        data: ChartData {
            labels: vec!["Healthy".into(), "Warning".into(), "Critical".into()],
            datasets: vec![Dataset {
                label: "Campaigns".into(),
                data: vec![
                    summary.healthy_count as f64,
                    summary.warning_count as f64,
                    summary.critical_count as f64,
                ],
                background_color: vec![
                    HEALTHY_COLOR.into(),
                    WARNING_COLOR.into(),
                    CRITICAL_COLOR.into(),
                ],
            }],
        },
    }
}

pub fn metrics_benchmark(averages: &MetricAverages) -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: vec!["CTR (%)".into(), "CPC ($)".into(), "Conversion (%)".into()],
            datasets: vec![
                Dataset {
                    label: "Average".into(),
                    data: vec![averages.ctr, averages.cpc, averages.conversion_rate],
                    background_color: vec!["#3b82f6".to_string(); 3],
                },
                Dataset {
                    label: "Benchmark".into(),
                    data: vec![BENCHMARK_CTR, BENCHMARK_CPC, BENCHMARK_CONVERSION],
                    background_color: vec!["#94a3b8".to_string(); 3],
                },
            ],
        },
    }
}

pub fn ctr_by_campaign(campaigns: &[Campaign]) -> ChartConfig {
    colored_bars("CTR (%)", campaigns, |c| c.ctr, BarThresholds::CTR)
}

pub fn conversion_by_campaign(campaigns: &[Campaign]) -> ChartConfig {
    colored_bars(
        "Conversion rate (%)",
        campaigns,
        |c| c.conversion_rate,
        BarThresholds::CONVERSION,
    )
}

pub fn budget_vs_clicks(campaigns: &[Campaign]) -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: labels(campaigns),
            datasets: vec![
                Dataset {
                    label: "Budget ($)".into(),
                    data: campaigns.iter().map(|c| c.budget).collect(),
                    background_color: vec!["#6366f1".to_string(); campaigns.len()],
                },
                Dataset {
                    label: "Clicks".into(),
                    data: campaigns.iter().map(|c| c.clicks as f64).collect(),
                    background_color: vec!["#14b8a6".to_string(); campaigns.len()],
                },
            ],
        },
    }
}

fn colored_bars(
    label: &str,
    campaigns: &[Campaign],
    metric: impl Fn(&Campaign) -> Option<f64>,
    thresholds: BarThresholds,
) -> ChartConfig {
    let data: Vec<f64> = campaigns.iter().map(|c| metric(c).unwrap_or_default()).collect();
    let background_color = data
        .iter()
        .map(|value| thresholds.color(*value).to_string())
        .collect();

    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: labels(campaigns),
            datasets: vec![Dataset {
                label: label.to_string(),
                data,
                background_color,
            }],
        },
    }
}

fn labels(campaigns: &[Campaign]) -> Vec<String> {
    campaigns.iter().map(|c| c.name.clone()).collect()
}

/// Where chart instances get drawn.
pub trait ChartSurface {
    type Instance;

    /// Whether the slot's backing surface exists in the current view.
    fn locate(&self, slot: SlotId) -> bool;

    fn attach(&mut self, slot: SlotId, config: ChartConfig) -> Self::Instance;

    fn release(&mut self, instance: Self::Instance);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotState {
    Empty,
    Attached,
}

#[derive(Debug)]
pub struct ChartSlot<I> {
    id: SlotId,
    instance: Option<I>,
}

impl<I> ChartSlot<I> {
    pub fn new(id: SlotId) -> Self {
        Self { id, instance: None }
    }

    pub fn id(&self) -> SlotId {
        self.id
    }

    pub fn instance(&self) -> Option<&I> {
        self.instance.as_ref()
    }

    pub fn state(&self) -> SlotState {
        if self.instance.is_some() {
            SlotState::Attached
        } else {
            SlotState::Empty
        }
    }

    /// Replace whatever the slot holds with a fresh chart built from `config`.
    /// A missing surface leaves the slot empty.
    pub fn render<S>(&mut self, surface: &mut S, config: ChartConfig)
    where
        S: ChartSurface<Instance = I>,
    {
        if let Some(previous) = self.instance.take() {
            surface.release(previous);
        }

        if !surface.locate(self.id) {
            debug!(slot = %self.id, "no surface for chart slot, leaving it empty");
            return;
        }

        self.instance = Some(surface.attach(self.id, config));
    }
}
