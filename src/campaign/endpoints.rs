use actix_web::web::{Data, Json, Path};
use actix_web::{get, post};
use chrono::{DateTime, Utc};
use futures::{stream, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};

use crate::content::ContentGenerator;
use crate::crm::{Crm, DistributionResult};
use crate::database::Database;
use crate::error::Error;
use crate::insight::{Insight, InsightId};
use crate::performance::{Performance, PerformanceId};
use crate::persona::Persona;

use super::{manager, Campaign, CampaignId, CampaignStatus};

const RECENT_CAMPAIGN_LIMIT: usize = 5;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GenerateCampaignBody {
    pub topic: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CampaignBody {
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
    pub performance: Vec<PerformanceBody>,
    pub insight: Option<InsightBody>,
}

impl CampaignBody {
    pub async fn render(db: &dyn Database, campaign: Campaign) -> Result<CampaignBody, Error> {
        let performance = db
            .performance()
            .fetch_performance_by_campaign(campaign.id)
            .await?;
        let insight = db.insights().fetch_insight_by_campaign(campaign.id).await?;

        Ok(CampaignBody {
            id: campaign.id,
            topic: campaign.topic,
            blog_title: campaign.blog_title,
            blog_outline: campaign.blog_outline,
            blog_content: campaign.blog_content,
            newsletter_founders: campaign.newsletter_founders,
            newsletter_creatives: campaign.newsletter_creatives,
            newsletter_operations: campaign.newsletter_operations,
            status: campaign.status,
            created_at: campaign.created_at,
            performance: performance.into_iter().map(PerformanceBody::render).collect(),
            insight: insight.map(InsightBody::render),
        })
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PerformanceBody {
    pub id: PerformanceId,
    pub campaign_id: CampaignId,
    pub persona: Persona,
    pub recipient_count: u32,
    pub open_rate: u32,
    pub click_rate: u32,
    pub unsubscribe_rate: u32,
    pub created_at: DateTime<Utc>,
}

impl PerformanceBody {
    pub fn render(performance: Performance) -> PerformanceBody {
        PerformanceBody {
            id: performance.id,
            campaign_id: performance.campaign_id,
            persona: performance.persona,
            recipient_count: performance.recipient_count,
            open_rate: performance.open_rate,
            click_rate: performance.click_rate,
            unsubscribe_rate: performance.unsubscribe_rate,
            created_at: performance.created_at,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InsightBody {
    pub id: InsightId,
    pub campaign_id: CampaignId,
    pub summary: String,
    pub recommendations: String,
    pub top_performing_persona: Persona,
    pub created_at: DateTime<Utc>,
}

impl InsightBody {
    pub fn render(insight: Insight) -> InsightBody {
        InsightBody {
            id: insight.id,
            campaign_id: insight.campaign_id,
            summary: insight.summary,
            recommendations: insight.recommendations,
            top_performing_persona: insight.top_performing_persona,
            created_at: insight.created_at,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DistributeCampaignResultBody {
    pub success: bool,
    pub distribution_results: Vec<DistributionResultBody>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DistributionResultBody {
    pub persona: Persona,
    pub recipient_count: u32,
    pub contacts_created: u32,
}

impl DistributionResultBody {
    pub fn render(result: DistributionResult) -> DistributionResultBody {
        DistributionResultBody {
            persona: result.persona,
            recipient_count: result.recipient_count,
            contacts_created: result.contacts_created,
        }
    }
}

#[post("/api/campaigns/generate")]
#[tracing::instrument(skip(db, generator))]
async fn generate_campaign(
    db: Data<Box<dyn Database>>,
    generator: Data<Box<dyn ContentGenerator>>,
    body: Json<GenerateCampaignBody>,
) -> Result<Json<CampaignBody>, Error> {
    let body = body.into_inner();

    let campaign = manager::generate_campaign(&***db, &***generator, body.topic).await?;

    // a fresh draft has no performance rows or insight to fetch
    let body = CampaignBody {
        id: campaign.id,
        topic: campaign.topic,
        blog_title: campaign.blog_title,
        blog_outline: campaign.blog_outline,
        blog_content: campaign.blog_content,
        newsletter_founders: campaign.newsletter_founders,
        newsletter_creatives: campaign.newsletter_creatives,
        newsletter_operations: campaign.newsletter_operations,
        status: campaign.status,
        created_at: campaign.created_at,
        performance: vec![],
        insight: None,
    };

    Ok(Json(body))
}

#[get("/api/campaigns")]
#[tracing::instrument(skip(db))]
async fn get_campaigns(db: Data<Box<dyn Database>>) -> Result<Json<Vec<CampaignBody>>, Error> {
    let campaigns = manager::get_campaigns(&***db).await?;

    let body = stream::iter(campaigns)
        .then(|campaign| CampaignBody::render(&***db, campaign))
        .try_collect()
        .await?;

    Ok(Json(body))
}

#[get("/api/campaigns/recent")]
#[tracing::instrument(skip(db))]
async fn get_recent_campaigns(
    db: Data<Box<dyn Database>>,
) -> Result<Json<Vec<CampaignBody>>, Error> {
    let campaigns = manager::get_recent_campaigns(&***db, RECENT_CAMPAIGN_LIMIT).await?;

    let body = stream::iter(campaigns)
        .then(|campaign| CampaignBody::render(&***db, campaign))
        .try_collect()
        .await?;

    Ok(Json(body))
}

#[post("/api/campaigns/{campaign_id}/distribute")]
#[tracing::instrument(skip(db, crm, generator))]
async fn distribute_campaign(
    db: Data<Box<dyn Database>>,
    crm: Data<Box<dyn Crm>>,
    generator: Data<Box<dyn ContentGenerator>>,
    params: Path<CampaignId>,
) -> Result<Json<DistributeCampaignResultBody>, Error> {
    let campaign_id = params.into_inner();

    let results =
        manager::distribute_campaign(&***db, &***crm, &***generator, campaign_id).await?;

    let body = DistributeCampaignResultBody {
        success: true,
        distribution_results: results
            .into_iter()
            .map(DistributionResultBody::render)
            .collect(),
    };

    Ok(Json(body))
}
