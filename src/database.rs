use crate::campaign::db::{CampaignStore, MemoryCampaignStore};
use crate::insight::db::{InsightStore, MemoryInsightStore};
use crate::performance::db::{MemoryPerformanceStore, PerformanceStore};

pub trait Database: Send + Sync {
    fn campaigns(&self) -> &dyn CampaignStore;
    fn performance(&self) -> &dyn PerformanceStore;
    fn insights(&self) -> &dyn InsightStore;
}

/// Process-wide keyed store. Clones share the underlying maps.
#[derive(Clone, Debug, Default)]
pub struct MemoryDatabase {
    campaigns: MemoryCampaignStore,
    performance: MemoryPerformanceStore,
    insights: MemoryInsightStore,
}

impl MemoryDatabase {
    pub fn new() -> MemoryDatabase {
        MemoryDatabase::default()
    }
}

impl Database for MemoryDatabase {
    fn campaigns(&self) -> &dyn CampaignStore {
        &self.campaigns
    }

    fn performance(&self) -> &dyn PerformanceStore {
        &self.performance
    }

    fn insights(&self) -> &dyn InsightStore {
        &self.insights
    }
}
