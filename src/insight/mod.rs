use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::campaign::CampaignId;
use crate::persona::Persona;
use crate::typedid::{TypedId, TypedIdMarker};

pub mod db;

pub type InsightId = TypedId<Insight>;

/// AI-generated analysis of a distributed campaign. At most one per campaign.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Insight {
    pub id: InsightId,
    pub campaign_id: CampaignId,
    pub summary: String,
    pub recommendations: String,
    pub top_performing_persona: Persona,
    pub created_at: DateTime<Utc>,
}

impl TypedIdMarker for Insight {
    fn tag() -> &'static str {
        "INS"
    }
}
