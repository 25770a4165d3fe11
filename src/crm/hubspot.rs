use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::campaign::Campaign;
use crate::error::Error;
use crate::persona::Persona;

use super::{recipient_count, Crm, DistributionResult};

const DEFAULT_BASE_URL: &str = "https://api.hubapi.com";
const SAMPLE_CONTACTS_PER_PERSONA: u32 = 3;

/// CRM client against the HubSpot contacts REST API. Distribution creates a
/// handful of demo contacts per persona and tags them with the campaign; the
/// newsletter send itself stays simulated.
#[derive(Debug)]
pub struct HubSpotCrm {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl HubSpotCrm {
    pub fn new(access_token: String) -> HubSpotCrm {
        HubSpotCrm {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token,
        }
    }

    #[tracing::instrument(skip(self, campaign), fields(campaign_id = %campaign.id))]
    async fn sync_persona_contacts(
        &self,
        campaign: &Campaign,
        persona: Persona,
    ) -> Result<u32, Error> {
        let mut contacts_created = 0;

        for n in 1..=SAMPLE_CONTACTS_PER_PERSONA {
            let email = format!("{}.test{}@novamind-demo.com", persona, n);

            let response = self
                .client
                .post(format!("{}/crm/v3/objects/contacts", self.base_url))
                .bearer_auth(&self.access_token)
                .json(&ContactRequest {
                    properties: ContactProperties {
                        email: &email,
                        firstname: Some(persona.title()),
                        lastname: Some(&format!("User {}", n)),
                        persona_type: persona.key(),
                        campaign_id: &campaign.id.to_string(),
                        company: Some("NovaMind Demo Agency"),
                    },
                })
                .send()
                .await?;

            if response.status() == StatusCode::CONFLICT {
                // contact exists from a previous campaign, retag it
                if self.retag_contact(campaign, persona, &email).await? {
                    contacts_created += 1;
                }
            } else {
                response.error_for_status()?;
                contacts_created += 1;
            }
        }

        Ok(contacts_created)
    }

    async fn retag_contact(
        &self,
        campaign: &Campaign,
        persona: Persona,
        email: &str,
    ) -> Result<bool, Error> {
        let search: SearchResponse = self
            .client
            .post(format!(
                "{}/crm/v3/objects/contacts/search",
                self.base_url
            ))
            .bearer_auth(&self.access_token)
            .json(&SearchRequest {
                filter_groups: vec![FilterGroup {
                    filters: vec![Filter {
                        property_name: "email",
                        operator: "EQ",
                        value: email,
                    }],
                }],
            })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let existing = match search.results.into_iter().next() {
            Some(existing) => existing,
            None => return Ok(false),
        };

        self.client
            .patch(format!(
                "{}/crm/v3/objects/contacts/{}",
                self.base_url, existing.id
            ))
            .bearer_auth(&self.access_token)
            .json(&ContactRequest {
                properties: ContactProperties {
                    email,
                    firstname: None,
                    lastname: None,
                    persona_type: persona.key(),
                    campaign_id: &campaign.id.to_string(),
                    company: None,
                },
            })
            .send()
            .await?
            .error_for_status()?;

        Ok(true)
    }
}

#[async_trait]
impl Crm for HubSpotCrm {
    async fn distribute_newsletters(
        &self,
        campaign: &Campaign,
    ) -> Result<Vec<DistributionResult>, Error> {
        let mut results = Vec::with_capacity(Persona::ALL.len());

        for &persona in &Persona::ALL {
            let contacts_created = match self.sync_persona_contacts(campaign, persona).await {
                Ok(contacts_created) => contacts_created,
                Err(err) => {
                    // keep distributing to the other personas
                    warn!("failed to sync {} contacts: {}", persona, err);
                    0
                }
            };

            results.push(DistributionResult {
                persona,
                recipient_count: recipient_count(persona),
                contacts_created,
            });
        }

        Ok(results)
    }
}

#[derive(Debug, Serialize)]
struct ContactRequest<'a> {
    properties: ContactProperties<'a>,
}

#[derive(Debug, Serialize)]
struct ContactProperties<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    firstname: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lastname: Option<&'a str>,
    persona_type: &'a str,
    campaign_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    company: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    filter_groups: Vec<FilterGroup<'a>>,
}

#[derive(Debug, Serialize)]
struct FilterGroup<'a> {
    filters: Vec<Filter<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Filter<'a> {
    property_name: &'static str,
    operator: &'static str,
    value: &'a str,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: String,
}
