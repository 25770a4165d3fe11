use async_trait::async_trait;
use tracing::warn;

use crate::campaign::Campaign;
use crate::error::Error;
use crate::persona::Persona;

pub mod hubspot;
pub mod simulated;

/// Outcome of sending one persona's newsletter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DistributionResult {
    pub persona: Persona,
    pub recipient_count: u32,
    pub contacts_created: u32,
}

#[async_trait]
pub trait Crm: Send + Sync {
    /// Distribute the campaign's newsletters, returning one result per
    /// persona.
    async fn distribute_newsletters(
        &self,
        campaign: &Campaign,
    ) -> Result<Vec<DistributionResult>, Error>;
}

/// Size of the demo recipient pool for each persona segment.
pub fn recipient_count(persona: Persona) -> u32 {
    match persona {
        Persona::Founders => 15,
        Persona::Creatives => 25,
        Persona::Operations => 18,
    }
}

/// CRM failures are substituted with simulated results rather than surfaced
/// to the caller.
#[tracing::instrument(skip(crm, campaign), fields(campaign_id = %campaign.id))]
pub async fn distribute(crm: &dyn Crm, campaign: &Campaign) -> Vec<DistributionResult> {
    match crm.distribute_newsletters(campaign).await {
        Ok(results) => results,
        Err(err) => {
            warn!(
                "crm distribution failed, falling back to simulated results: {}",
                err
            );
            simulated::distribution_results()
        }
    }
}
