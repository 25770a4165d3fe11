use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::campaign::CampaignId;
use crate::error::Error;

use super::{Performance, PerformanceId};

#[async_trait]
pub trait PerformanceStore: Send + Sync {
    async fn insert_performance(&self, performance: &Performance) -> Result<(), Error>;

    async fn fetch_performance_by_campaign(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Vec<Performance>, Error>;

    async fn fetch_all_performance(&self) -> Result<Vec<Performance>, Error>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryPerformanceStore {
    rows: Arc<RwLock<HashMap<PerformanceId, Performance>>>,
}

#[async_trait]
impl PerformanceStore for MemoryPerformanceStore {
    #[tracing::instrument(skip(self))]
    async fn insert_performance(&self, performance: &Performance) -> Result<(), Error> {
        self.rows
            .write()
            .await
            .insert(performance.id, performance.clone());

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_performance_by_campaign(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Vec<Performance>, Error> {
        let mut rows: Vec<Performance> = self
            .rows
            .read()
            .await
            .values()
            .filter(|row| row.campaign_id == campaign_id)
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.created_at);

        Ok(rows)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_all_performance(&self) -> Result<Vec<Performance>, Error> {
        let mut rows: Vec<Performance> = self.rows.read().await.values().cloned().collect();
        rows.sort_by_key(|row| row.created_at);

        Ok(rows)
    }
}
