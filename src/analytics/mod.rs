use serde::{Deserialize, Serialize};

use crate::persona::Persona;

pub mod endpoints;
pub mod manager;
pub use endpoints::*;

/// Headline numbers for the dashboard.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DashboardMetrics {
    pub total_campaigns: usize,
    pub avg_open_rate: u32,
    pub top_persona: String,
    pub recent_activity: String,
}

/// Engagement rollup for one persona across all distributed campaigns.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PersonaPerformance {
    pub persona: Persona,
    pub avg_open_rate: u32,
    pub avg_click_rate: u32,
    pub avg_unsubscribe_rate: u32,
    pub campaign_count: usize,
}
