use async_trait::async_trait;
use tracing::warn;

use crate::error::Error;
use crate::persona::Persona;

pub mod openai;
pub mod simulated;

/// Output of the marketing-content generation step, one blog post plus one
/// newsletter per persona.
#[derive(Clone, Debug)]
pub struct GeneratedContent {
    pub blog_title: String,
    pub blog_outline: String,
    pub blog_content: String,
    pub newsletter_founders: String,
    pub newsletter_creatives: String,
    pub newsletter_operations: String,
}

#[derive(Clone, Debug)]
pub struct GeneratedInsight {
    pub summary: String,
    pub recommendations: String,
}

/// Per-persona engagement numbers fed into insight generation.
#[derive(Clone, Copy, Debug)]
pub struct PerformanceSample {
    pub persona: Persona,
    pub open_rate: u32,
    pub click_rate: u32,
}

#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate_marketing_content(&self, topic: &str) -> Result<GeneratedContent, Error>;

    async fn generate_performance_insight(
        &self,
        campaign_title: &str,
        samples: &[PerformanceSample],
    ) -> Result<GeneratedInsight, Error>;
}

/// Generation failures are substituted with canned content rather than
/// surfaced to the caller.
#[tracing::instrument(skip(generator))]
pub async fn marketing_content(generator: &dyn ContentGenerator, topic: &str) -> GeneratedContent {
    match generator.generate_marketing_content(topic).await {
        Ok(content) => content,
        Err(err) => {
            warn!(
                "content generation failed, falling back to simulated content: {}",
                err
            );
            simulated::marketing_content(topic)
        }
    }
}

#[tracing::instrument(skip(generator))]
pub async fn performance_insight(
    generator: &dyn ContentGenerator,
    campaign_title: &str,
    samples: &[PerformanceSample],
) -> GeneratedInsight {
    match generator
        .generate_performance_insight(campaign_title, samples)
        .await
    {
        Ok(insight) => insight,
        Err(err) => {
            warn!(
                "insight generation failed, falling back to simulated insight: {}",
                err
            );
            simulated::performance_insight(campaign_title, samples)
        }
    }
}
