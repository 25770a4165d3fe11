use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::persona::Persona;
use crate::typedid::{TypedId, TypedIdMarker};

pub mod db;
pub mod endpoints;
pub mod manager;
pub use endpoints::*;

pub type CampaignId = TypedId<Campaign>;

pub const MIN_TOPIC_LENGTH: usize = 5;
pub const MAX_TOPIC_LENGTH: usize = 500;

/// A generated marketing campaign: one blog post plus one newsletter per
/// persona. Created as a draft and flipped to completed on distribution.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Campaign {
    pub id: CampaignId,
    pub topic: String,
    pub blog_title: String,
    pub blog_outline: String,
    pub blog_content: String,
    pub newsletter_founders: String,
    pub newsletter_creatives: String,
    pub newsletter_operations: String,
    pub status: CampaignStatus,
    pub created_at: DateTime<Utc>,
}

impl Campaign {
    pub fn newsletter(&self, persona: Persona) -> &str {
        match persona {
            Persona::Founders => &self.newsletter_founders,
            Persona::Creatives => &self.newsletter_creatives,
            Persona::Operations => &self.newsletter_operations,
        }
    }
}

impl TypedIdMarker for Campaign {
    fn tag() -> &'static str {
        "CPN"
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Draft,
    Completed,
}
