use crate::handlers;
use crate::state::AppState;
use axum::{routing::{delete, get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route(
            "/api/campaigns",
            get(handlers::list_campaigns).post(handlers::create_campaign),
        )
        .route("/api/campaigns/:id", delete(handlers::delete_campaign))
        .route("/api/diagnose/:id", get(handlers::diagnose))
        .route("/api/report/:id", get(handlers::export_report))
        .route("/api/seed", post(handlers::seed))
        .with_state(state)
}
