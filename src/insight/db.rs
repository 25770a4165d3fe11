use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::campaign::CampaignId;
use crate::error::Error;

use super::{Insight, InsightId};

#[async_trait]
pub trait InsightStore: Send + Sync {
    async fn insert_insight(&self, insight: &Insight) -> Result<(), Error>;

    async fn fetch_insight_by_campaign(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Option<Insight>, Error>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryInsightStore {
    insights: Arc<RwLock<HashMap<InsightId, Insight>>>,
}

#[async_trait]
impl InsightStore for MemoryInsightStore {
    #[tracing::instrument(skip(self))]
    async fn insert_insight(&self, insight: &Insight) -> Result<(), Error> {
        self.insights
            .write()
            .await
            .insert(insight.id, insight.clone());

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_insight_by_campaign(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Option<Insight>, Error> {
        let insight = self
            .insights
            .read()
            .await
            .values()
            .find(|insight| insight.campaign_id == campaign_id)
            .cloned();

        Ok(insight)
    }
}
