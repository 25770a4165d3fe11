use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::campaign::CampaignId;
use crate::persona::Persona;
use crate::typedid::{TypedId, TypedIdMarker};

pub mod db;

pub type PerformanceId = TypedId<Performance>;

/// Simulated engagement metrics for one campaign/persona pair. Rates are
/// whole percentages. Written once at distribution time, never updated.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Performance {
    pub id: PerformanceId,
    pub campaign_id: CampaignId,
    pub persona: Persona,
    pub recipient_count: u32,
    pub open_rate: u32,
    pub click_rate: u32,
    pub unsubscribe_rate: u32,
    pub created_at: DateTime<Utc>,
}

impl TypedIdMarker for Performance {
    fn tag() -> &'static str {
        "PRF"
    }
}
