use crate::backend::CampaignApi;
use crate::view::Dashboard;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn CampaignApi>,
    pub dashboard: Arc<Mutex<Dashboard>>,
}

impl AppState {
    pub fn new(api: Arc<dyn CampaignApi>) -> Self {
        Self {
            api,
            dashboard: Arc::new(Mutex::new(Dashboard::default())),
        }
    }
}
