use async_trait::async_trait;

use crate::campaign::Campaign;
use crate::error::Error;
use crate::persona::Persona;

use super::{recipient_count, Crm, DistributionResult};

const SIMULATED_CONTACTS_PER_PERSONA: u32 = 3;

/// Distributor used when no CRM token is configured, and as the fallback when
/// the real CRM fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimulatedCrm;

#[async_trait]
impl Crm for SimulatedCrm {
    async fn distribute_newsletters(
        &self,
        _campaign: &Campaign,
    ) -> Result<Vec<DistributionResult>, Error> {
        Ok(distribution_results())
    }
}

pub fn distribution_results() -> Vec<DistributionResult> {
    Persona::ALL
        .iter()
        .map(|&persona| DistributionResult {
            persona,
            recipient_count: recipient_count(persona),
            contacts_created: SIMULATED_CONTACTS_PER_PERSONA,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distribution_covers_every_persona() {
        let results = distribution_results();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].persona, Persona::Founders);
        assert_eq!(results[0].recipient_count, 15);
        assert_eq!(results[1].persona, Persona::Creatives);
        assert_eq!(results[1].recipient_count, 25);
        assert_eq!(results[2].persona, Persona::Operations);
        assert_eq!(results[2].recipient_count, 18);
        assert!(results.iter().all(|r| r.contacts_created == 3));
    }
}
