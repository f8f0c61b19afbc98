//! Dashboard view-model: one chart slot per visualization plus the page
//! surface they draw onto.

use crate::charts::{self, ChartConfig, ChartSlot, ChartSurface, SlotId};
use crate::health::{classify_campaign, metrics_valid, summarize};
use crate::models::{Campaign, CampaignRow, DashboardResponse, InsightRecord, MountedChart};
use crate::stats::{average_metrics, critical_alerts};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Overview,
    Analytics,
    Campaigns,
}

impl Tab {
    /// Canvases present on the page while this tab is shown.
    pub fn slots(self) -> &'static [SlotId] {
        match self {
            Tab::Overview => &[SlotId::HealthDistribution, SlotId::MetricsBenchmark],
            Tab::Analytics => &[
                SlotId::CtrByCampaign,
                SlotId::ConversionByCampaign,
                SlotId::BudgetVsClicks,
            ],
            Tab::Campaigns => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartHandle {
    pub id: u64,
    pub slot: SlotId,
}

#[derive(Debug)]
struct Mounted {
    instance: u64,
    config: ChartConfig,
}

/// Server-side record of which charts are mounted on which canvas.
#[derive(Debug, Default)]
pub struct PageSurface {
    tab: Tab,
    mounted: BTreeMap<SlotId, Mounted>,
    next_instance: u64,
    overlaps: u64,
}

impl PageSurface {
    pub fn show(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    /// Attaches that landed on a canvas still holding an instance.
    pub fn overlaps(&self) -> u64 {
        self.overlaps
    }

    pub fn mounted_count(&self) -> usize {
        self.mounted.len()
    }

    pub fn charts(&self) -> Vec<MountedChart> {
        self.mounted
            .iter()
            .map(|(slot, mounted)| MountedChart {
                slot: *slot,
                instance: mounted.instance,
                config: mounted.config.clone(),
            })
            .collect()
    }
}

impl ChartSurface for PageSurface {
    type Instance = ChartHandle;

    fn locate(&self, slot: SlotId) -> bool {
        self.tab.slots().contains(&slot)
    }

    fn attach(&mut self, slot: SlotId, config: ChartConfig) -> ChartHandle {
        self.next_instance += 1;
        let instance = self.next_instance;
        if let Some(stale) = self.mounted.insert(slot, Mounted { instance, config }) {
            self.overlaps += 1;
            warn!(%slot, stale = stale.instance, instance, "chart attached over a live instance");
        }
        debug!(%slot, instance, "chart attached");
        ChartHandle { id: instance, slot }
    }

    fn release(&mut self, handle: ChartHandle) {
        match self.mounted.get(&handle.slot) {
            Some(mounted) if mounted.instance == handle.id => {
                self.mounted.remove(&handle.slot);
                debug!(slot = %handle.slot, instance = handle.id, "chart released");
            }
            _ => debug!(slot = %handle.slot, instance = handle.id, "chart already gone"),
        }
    }
}

/// Explicit owned state for the five chart slots.
#[derive(Debug)]
pub struct DashboardModel<I> {
    pub health_distribution: ChartSlot<I>,
    pub metrics_benchmark: ChartSlot<I>,
    pub ctr_by_campaign: ChartSlot<I>,
    pub conversion_by_campaign: ChartSlot<I>,
    pub budget_vs_clicks: ChartSlot<I>,
}

impl<I> Default for DashboardModel<I> {
    fn default() -> Self {
        Self {
            health_distribution: ChartSlot::new(SlotId::HealthDistribution),
            metrics_benchmark: ChartSlot::new(SlotId::MetricsBenchmark),
            ctr_by_campaign: ChartSlot::new(SlotId::CtrByCampaign),
            conversion_by_campaign: ChartSlot::new(SlotId::ConversionByCampaign),
            budget_vs_clicks: ChartSlot::new(SlotId::BudgetVsClicks),
        }
    }
}

impl<I> DashboardModel<I> {
    pub fn slot(&self, id: SlotId) -> &ChartSlot<I> {
        match id {
            SlotId::HealthDistribution => &self.health_distribution,
            SlotId::MetricsBenchmark => &self.metrics_benchmark,
            SlotId::CtrByCampaign => &self.ctr_by_campaign,
            SlotId::ConversionByCampaign => &self.conversion_by_campaign,
            SlotId::BudgetVsClicks => &self.budget_vs_clicks,
        }
    }

    fn slot_mut(&mut self, id: SlotId) -> &mut ChartSlot<I> {
        match id {
            SlotId::HealthDistribution => &mut self.health_distribution,
            SlotId::MetricsBenchmark => &mut self.metrics_benchmark,
            SlotId::CtrByCampaign => &mut self.ctr_by_campaign,
            SlotId::ConversionByCampaign => &mut self.conversion_by_campaign,
            SlotId::BudgetVsClicks => &mut self.budget_vs_clicks,
        }
    }

    pub fn render<S>(&mut self, surface: &mut S, id: SlotId, config: ChartConfig)
    where
        S: ChartSurface<Instance = I>,
    {
        self.slot_mut(id).render(surface, config);
    }

    pub fn render_all<S>(
        &mut self,
        surface: &mut S,
        campaigns: &[Campaign],
        insights: &[InsightRecord],
    ) where
        S: ChartSurface<Instance = I>,
    {
        let summary = summarize(insights);
        let averages = average_metrics(campaigns);

        self.render(surface, SlotId::HealthDistribution, charts::health_distribution(&summary));
        self.render(surface, SlotId::MetricsBenchmark, charts::metrics_benchmark(&averages));
        self.render(surface, SlotId::CtrByCampaign, charts::ctr_by_campaign(campaigns));
        self.render(
            surface,
            SlotId::ConversionByCampaign,
            charts::conversion_by_campaign(campaigns),
        );
        self.render(surface, SlotId::BudgetVsClicks, charts::budget_vs_clicks(campaigns));
    }
}

#[derive(Debug, Default)]
pub struct Dashboard {
    pub model: DashboardModel<ChartHandle>,
    pub surface: PageSurface,
}

impl Dashboard {
    /// Redraw every slot against `tab` from freshly fetched data.
    pub fn refresh(
        &mut self,
        tab: Tab,
        campaigns: Vec<Campaign>,
        insights: &[InsightRecord],
    ) -> DashboardResponse {
        self.surface.show(tab);
        self.model.render_all(&mut self.surface, &campaigns, insights);

        DashboardResponse {
            tab,
            refreshed_at: Local::now().to_rfc3339(),
            summary: summarize(insights),
            campaigns: campaign_rows(campaigns),
            alerts: critical_alerts(insights),
            charts: self.surface.charts(),
        }
    }
}

pub fn campaign_rows(campaigns: Vec<Campaign>) -> Vec<CampaignRow> {
    campaigns
        .into_iter()
        .map(|campaign| CampaignRow {
            health: classify_campaign(&campaign),
            metrics_valid: metrics_valid(&campaign),
            campaign,
        })
        .collect()
}
