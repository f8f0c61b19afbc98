use crate::errors::AppError;
use crate::health::{classify_campaign, metrics_valid, validate_metric};
use crate::models::{
    CampaignRow, CampaignsResponse, DashboardResponse, Diagnosis, MessageResponse, NewCampaign,
};
use crate::state::AppState;
use crate::ui::render_index;
use crate::view::{campaign_rows, Tab};
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub tab: Tab,
}

pub async fn index() -> Html<String> {
    Html(render_index(Tab::default()))
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    Ok(Json(load_dashboard(&state, query.tab).await?))
}

/// Fetch both lists together and redraw. Any fetch failure returns before
/// the dashboard is touched, so the previous render stays as it was.
pub async fn load_dashboard(state: &AppState, tab: Tab) -> Result<DashboardResponse, AppError> {
    let (campaigns, insights) =
        tokio::try_join!(state.api.list_campaigns(), state.api.list_insights())?;

    let mut dashboard = state.dashboard.lock().await;
    let response = dashboard.refresh(tab, campaigns, &insights);
    info!(
        ?tab,
        campaigns = response.campaigns.len(),
        charts = response.charts.len(),
        "dashboard refreshed"
    );
    Ok(response)
}

pub async fn list_campaigns(
    State(state): State<AppState>,
) -> Result<Json<CampaignsResponse>, AppError> {
    let campaigns = campaign_rows(state.api.list_campaigns().await?);
    Ok(Json(CampaignsResponse {
        count: campaigns.len(),
        campaigns,
    }))
}

pub async fn create_campaign(
    State(state): State<AppState>,
    Json(payload): Json<NewCampaign>,
) -> Result<(StatusCode, Json<CampaignRow>), AppError> {
    let payload = validate_new_campaign(payload)?;
    let campaign = state.api.create_campaign(&payload).await?;
    info!(id = campaign.id, name = %campaign.name, "campaign created");

    Ok((
        StatusCode::CREATED,
        Json(CampaignRow {
            health: classify_campaign(&campaign),
            metrics_valid: metrics_valid(&campaign),
            campaign,
        }),
    ))
}

pub async fn delete_campaign(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let message = state.api.delete_campaign(id).await?;
    info!(id, "campaign deleted");
    Ok(Json(MessageResponse { message }))
}

pub async fn diagnose(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Diagnosis>, AppError> {
    Ok(Json(state.api.diagnose(id).await?))
}

pub async fn export_report(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let report = state.api.report(id).await?;
    info!(id, filename = %report.filename, bytes = report.bytes.len(), "report exported");

    let disposition = format!("attachment; filename=\"{}\"", report.filename);
    Ok((
        [
            (header::CONTENT_TYPE, report.content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report.bytes,
    )
        .into_response())
}

pub async fn seed(State(state): State<AppState>) -> Result<Json<MessageResponse>, AppError> {
    let message = state.api.seed().await?;
    info!("{message}");
    Ok(Json(MessageResponse { message }))
}

fn validate_new_campaign(mut payload: NewCampaign) -> Result<NewCampaign, AppError> {
    payload.name = payload.name.trim().to_string();
    if payload.name.is_empty() {
        return Err(AppError::bad_request("name must not be empty"));
    }
    validate_metric(payload.budget)
        .map_err(|err| AppError::bad_request(format!("budget: {err}")))?;
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendError, CampaignApi};
    use crate::charts::SlotId;
    use crate::models::{Campaign, InsightRecord, ReportFile};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct StubApi {
        fail_insights: AtomicBool,
        creates: AtomicUsize,
    }

    fn campaign(id: i64) -> Campaign {
        Campaign {
            id,
            name: format!("campaign {id}"),
            budget: 1000.0,
            impressions: 20_000,
            clicks: 600,
            conversions: 18,
            ctr: Some(3.0),
            cpc: Some(13.33),
            conversion_rate: Some(3.0),
            status: None,
            created_at: None,
        }
    }

    #[async_trait]
    impl CampaignApi for StubApi {
        async fn list_campaigns(&self) -> Result<Vec<Campaign>, BackendError> {
            Ok(vec![campaign(1), campaign(2)])
        }

        async fn list_insights(&self) -> Result<Vec<InsightRecord>, BackendError> {
            if self.fail_insights.load(Ordering::SeqCst) {
                return Err(BackendError::Api {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "insights unavailable".to_string(),
                });
            }
            Ok(vec![InsightRecord {
                campaign_id: 1,
                campaign_name: "campaign 1".to_string(),
                health_score: 80,
                issues_found: 1,
                top_issue: "HIGH_CPC_CRITICAL".to_string(),
            }])
        }

        async fn create_campaign(&self, new: &NewCampaign) -> Result<Campaign, BackendError> {
            self.creates.fetch_add(1, Ordering::SeqCst);
            let mut created = campaign(3);
            created.name = new.name.clone();
            Ok(created)
        }

        async fn delete_campaign(&self, id: i64) -> Result<String, BackendError> {
            Err(BackendError::Api {
                status: StatusCode::NOT_FOUND,
                message: format!("Campaign {id} not found"),
            })
        }

        async fn diagnose(&self, _id: i64) -> Result<Diagnosis, BackendError> {
            Err(BackendError::Transport("connection refused".to_string()))
        }

        async fn report(&self, id: i64) -> Result<ReportFile, BackendError> {
            Ok(ReportFile {
                filename: format!("campaign_{id}.pdf"),
                content_type: "application/pdf".to_string(),
                bytes: b"%PDF-1.4".to_vec(),
            })
        }

        async fn seed(&self) -> Result<String, BackendError> {
            Ok("Seeded 6 example campaigns!".to_string())
        }
    }

    fn state_with(api: Arc<StubApi>) -> AppState {
        AppState::new(api)
    }

    #[tokio::test]
    async fn dashboard_renders_requested_tab() {
        let state = state_with(Arc::new(StubApi::default()));
        let response = load_dashboard(&state, Tab::Analytics).await.unwrap();
        assert_eq!(response.campaigns.len(), 2);
        assert_eq!(response.summary.healthy_count, 1);
        let slots: Vec<SlotId> = response.charts.iter().map(|chart| chart.slot).collect();
        assert_eq!(
            slots,
            vec![SlotId::CtrByCampaign, SlotId::ConversionByCampaign, SlotId::BudgetVsClicks]
        );
    }

    #[tokio::test]
    async fn failed_fetch_keeps_previous_render() {
        let api = Arc::new(StubApi::default());
        let state = state_with(Arc::clone(&api));
        let first = load_dashboard(&state, Tab::Overview).await.unwrap();

        api.fail_insights.store(true, Ordering::SeqCst);
        let err = load_dashboard(&state, Tab::Analytics).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
        assert_eq!(err.message, "insights unavailable");

        let dashboard = state.dashboard.lock().await;
        assert_eq!(dashboard.surface.tab(), Tab::Overview);
        let kept: Vec<u64> = dashboard
            .surface
            .charts()
            .iter()
            .map(|chart| chart.instance)
            .collect();
        let before: Vec<u64> = first.charts.iter().map(|chart| chart.instance).collect();
        assert_eq!(kept, before);
    }

    #[tokio::test]
    async fn blank_name_is_rejected_before_the_backend() {
        let api = Arc::new(StubApi::default());
        let state = state_with(Arc::clone(&api));
        let payload = NewCampaign {
            name: "   ".to_string(),
            budget: 100.0,
            impressions: 10,
            clicks: 1,
            conversions: 0,
        };
        let err = create_campaign(State(state), Json(payload)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.creates.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn created_campaign_is_classified() {
        let api = Arc::new(StubApi::default());
        let payload = NewCampaign {
            name: " Spring Sale ".to_string(),
            budget: 8000.0,
            impressions: 20_000,
            clicks: 600,
            conversions: 18,
        };
        let (status, Json(row)) = create_campaign(State(state_with(api)), Json(payload))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(row.campaign.name, "Spring Sale");
        assert_eq!(row.health, crate::health::HealthStatus::Critical);
    }

    #[test]
    fn negative_budget_is_rejected() {
        let payload = NewCampaign {
            name: "x".to_string(),
            budget: -1.0,
            impressions: 0,
            clicks: 0,
            conversions: 0,
        };
        let err = validate_new_campaign(payload).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn backend_not_found_is_echoed() {
        let state = state_with(Arc::new(StubApi::default()));
        let err = delete_campaign(State(state), Path(42)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Campaign 42 not found");
    }

    #[tokio::test]
    async fn unreachable_backend_is_bad_gateway() {
        let state = state_with(Arc::new(StubApi::default()));
        let err = diagnose(State(state), Path(1)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn report_is_served_as_attachment() {
        let state = state_with(Arc::new(StubApi::default()));
        let response = export_report(State(state), Path(5)).await.unwrap();
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"campaign_5.pdf\""
        );
    }
}
