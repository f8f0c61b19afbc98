pub mod app;
pub mod backend;
pub mod charts;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod health;
pub mod models;
pub mod state;
pub mod stats;
pub mod ui;
pub mod view;

pub use app::router;
pub use backend::{CampaignApi, HttpCampaignApi};
pub use config::Config;
pub use health::{classify, summarize};
pub use state::AppState;
