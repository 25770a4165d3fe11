use chrono::Utc;
use rand::Rng;

use crate::content::{self, ContentGenerator, PerformanceSample};
use crate::crm::{self, Crm, DistributionResult};
use crate::database::Database;
use crate::error::Error;
use crate::insight::{Insight, InsightId};
use crate::performance::{Performance, PerformanceId};

use super::{
    Campaign, CampaignId, CampaignStatus, MAX_TOPIC_LENGTH, MIN_TOPIC_LENGTH,
};

#[tracing::instrument(skip(db, generator))]
pub async fn generate_campaign(
    db: &dyn Database,
    generator: &dyn ContentGenerator,
    topic: String,
) -> Result<Campaign, Error> {
    let length = topic.chars().count();
    if length < MIN_TOPIC_LENGTH {
        return Err(Error::TopicTooShort { length });
    }
    if length > MAX_TOPIC_LENGTH {
        return Err(Error::TopicTooLong { length });
    }

    let content = content::marketing_content(generator, &topic).await;

    let campaign = Campaign {
        id: CampaignId::new(),
        topic,
        blog_title: content.blog_title,
        blog_outline: content.blog_outline,
        blog_content: content.blog_content,
        newsletter_founders: content.newsletter_founders,
        newsletter_creatives: content.newsletter_creatives,
        newsletter_operations: content.newsletter_operations,
        status: CampaignStatus::Draft,
        created_at: Utc::now(),
    };

    db.campaigns().insert_campaign(&campaign).await?;

    Ok(campaign)
}

#[tracing::instrument(skip(db))]
pub async fn get_campaigns(db: &dyn Database) -> Result<Vec<Campaign>, Error> {
    let campaigns = db.campaigns().fetch_campaigns().await?;

    Ok(campaigns)
}

#[tracing::instrument(skip(db))]
pub async fn get_recent_campaigns(db: &dyn Database, limit: usize) -> Result<Vec<Campaign>, Error> {
    let mut campaigns = db.campaigns().fetch_campaigns().await?;
    campaigns.truncate(limit);

    Ok(campaigns)
}

#[tracing::instrument(skip(db))]
pub async fn get_campaign_by_id(
    db: &dyn Database,
    campaign_id: CampaignId,
) -> Result<Campaign, Error> {
    let campaign = db
        .campaigns()
        .fetch_campaign_by_id(campaign_id)
        .await?
        .ok_or(Error::CampaignDoesNotExist { campaign_id })?;

    Ok(campaign)
}

/// Send the campaign's newsletters and close it out: one CRM result and one
/// simulated performance row per persona, a single insight, and the status
/// flipped to completed.
#[tracing::instrument(skip(db, crm, generator))]
pub async fn distribute_campaign(
    db: &dyn Database,
    crm: &dyn Crm,
    generator: &dyn ContentGenerator,
    campaign_id: CampaignId,
) -> Result<Vec<DistributionResult>, Error> {
    let campaign = get_campaign_by_id(db, campaign_id).await?;
    if campaign.status != CampaignStatus::Draft {
        return Err(Error::CampaignAlreadyDistributed {
            campaign_id,
            status: campaign.status,
        });
    }

    let results = crm::distribute(crm, &campaign).await;
    if results.is_empty() {
        return Err(Error::ExistentialState(
            "distribution produced no persona results".to_string(),
        ));
    }

    let now = Utc::now();
    let mut samples = Vec::with_capacity(results.len());
    for result in &results {
        let performance = Performance {
            id: PerformanceId::new(),
            campaign_id,
            persona: result.persona,
            recipient_count: result.recipient_count,
            open_rate: rand::thread_rng().gen_range(35..65),
            click_rate: rand::thread_rng().gen_range(8..20),
            unsubscribe_rate: rand::thread_rng().gen_range(0..3),
            created_at: now,
        };

        db.performance().insert_performance(&performance).await?;

        samples.push(PerformanceSample {
            persona: performance.persona,
            open_rate: performance.open_rate,
            click_rate: performance.click_rate,
        });
    }

    let top = samples
        .iter()
        .max_by_key(|sample| sample.open_rate)
        .ok_or_else(|| Error::ExistentialState("no performance samples recorded".to_string()))?;

    let generated = content::performance_insight(generator, &campaign.blog_title, &samples).await;
    let insight = Insight {
        id: InsightId::new(),
        campaign_id,
        summary: generated.summary,
        recommendations: generated.recommendations,
        top_performing_persona: top.persona,
        created_at: Utc::now(),
    };

    db.insights().insert_insight(&insight).await?;

    db.campaigns()
        .update_campaign_status(campaign_id, CampaignStatus::Completed)
        .await?;

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::simulated::SimulatedGenerator;
    use crate::crm::simulated::SimulatedCrm;
    use crate::database::MemoryDatabase;
    use crate::persona::Persona;

    #[tokio::test]
    async fn generate_campaign_stores_a_draft() {
        let db = MemoryDatabase::new();

        let campaign = generate_campaign(&db, &SimulatedGenerator, "AI onboarding flows".into())
            .await
            .unwrap();

        assert_eq!(campaign.topic, "AI onboarding flows".to_string());
        assert_eq!(campaign.status, CampaignStatus::Draft);
        assert!(campaign.blog_title.contains("AI onboarding flows"));
        assert!(!campaign.newsletter(Persona::Founders).is_empty());
        assert!(!campaign.newsletter(Persona::Creatives).is_empty());
        assert!(!campaign.newsletter(Persona::Operations).is_empty());

        let stored = get_campaign_by_id(&db, campaign.id).await.unwrap();
        assert_eq!(stored.id, campaign.id);
        assert_eq!(stored.status, CampaignStatus::Draft);
    }

    #[tokio::test]
    async fn generate_campaign_rejects_short_topic() {
        let db = MemoryDatabase::new();

        let result = generate_campaign(&db, &SimulatedGenerator, "wasp".into()).await;

        assert_eq!(result.unwrap_err(), Error::TopicTooShort { length: 4 });
        assert!(get_campaigns(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn generate_campaign_rejects_long_topic() {
        let db = MemoryDatabase::new();
        let topic = "x".repeat(501);

        let result = generate_campaign(&db, &SimulatedGenerator, topic).await;

        assert_eq!(result.unwrap_err(), Error::TopicTooLong { length: 501 });
    }

    #[tokio::test]
    async fn recent_campaigns_are_newest_first_and_limited() {
        let db = MemoryDatabase::new();
        for n in 0..7 {
            let topic = format!("campaign topic number {}", n);
            generate_campaign(&db, &SimulatedGenerator, topic)
                .await
                .unwrap();
        }

        let recent = get_recent_campaigns(&db, 5).await.unwrap();

        assert_eq!(recent.len(), 5);
        for window in recent.windows(2) {
            assert!(window[0].created_at >= window[1].created_at);
        }
    }

    #[tokio::test]
    async fn distribute_campaign_completes_the_lifecycle() {
        let db = MemoryDatabase::new();
        let campaign = generate_campaign(&db, &SimulatedGenerator, "client reporting".into())
            .await
            .unwrap();

        let results = distribute_campaign(&db, &SimulatedCrm, &SimulatedGenerator, campaign.id)
            .await
            .unwrap();

        assert_eq!(results.len(), 3);

        let rows = db
            .performance()
            .fetch_performance_by_campaign(campaign.id)
            .await
            .unwrap();
        assert_eq!(rows.len(), 3);
        for persona in Persona::ALL {
            let row = rows.iter().find(|row| row.persona == persona).unwrap();
            assert!((35..65).contains(&row.open_rate));
            assert!((8..20).contains(&row.click_rate));
            assert!(row.unsubscribe_rate < 3);
            assert_eq!(row.recipient_count, crate::crm::recipient_count(persona));
        }

        let insight = db
            .insights()
            .fetch_insight_by_campaign(campaign.id)
            .await
            .unwrap()
            .unwrap();
        let top_rate = rows.iter().map(|row| row.open_rate).max().unwrap();
        let top_row = rows
            .iter()
            .find(|row| row.persona == insight.top_performing_persona)
            .unwrap();
        assert_eq!(top_row.open_rate, top_rate);
        assert!(!insight.summary.is_empty());
        assert!(!insight.recommendations.is_empty());

        let stored = get_campaign_by_id(&db, campaign.id).await.unwrap();
        assert_eq!(stored.status, CampaignStatus::Completed);
    }

    #[tokio::test]
    async fn distribute_campaign_requires_an_existing_campaign() {
        let db = MemoryDatabase::new();
        let campaign_id = CampaignId::new();

        let result = distribute_campaign(&db, &SimulatedCrm, &SimulatedGenerator, campaign_id).await;

        assert_eq!(
            result.unwrap_err(),
            Error::CampaignDoesNotExist { campaign_id }
        );
    }

    #[tokio::test]
    async fn distribute_campaign_rejects_a_second_distribution() {
        let db = MemoryDatabase::new();
        let campaign = generate_campaign(&db, &SimulatedGenerator, "seasonal promotions".into())
            .await
            .unwrap();
        distribute_campaign(&db, &SimulatedCrm, &SimulatedGenerator, campaign.id)
            .await
            .unwrap();

        let result =
            distribute_campaign(&db, &SimulatedCrm, &SimulatedGenerator, campaign.id).await;

        assert_eq!(
            result.unwrap_err(),
            Error::CampaignAlreadyDistributed {
                campaign_id: campaign.id,
                status: CampaignStatus::Completed,
            }
        );
        let rows = db
            .performance()
            .fetch_performance_by_campaign(campaign.id)
            .await
            .unwrap();
        assert_eq!(rows.len(), 3, "no extra rows from the rejected attempt");
    }
}
