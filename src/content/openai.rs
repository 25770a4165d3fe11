use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Error;

use super::{ContentGenerator, GeneratedContent, GeneratedInsight, PerformanceSample};

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const MODEL: &str = "gpt-5";

/// Content generator backed by the OpenAI chat-completions API. Responses are
/// requested as JSON objects and parsed leniently, with neutral defaults for
/// missing fields.
#[derive(Debug)]
pub struct OpenAiGenerator {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenAiGenerator {
    pub fn new(api_key: String) -> OpenAiGenerator {
        OpenAiGenerator {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
        }
    }

    #[tracing::instrument(skip(self, system, user))]
    async fn chat(&self, system: &str, user: &str, max_tokens: u32) -> Result<String, Error> {
        let request = ChatRequest {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user.to_string(),
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_object",
            },
            max_completion_tokens: max_tokens,
        };

        let response: ChatResponse = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::ExistentialState("chat completion had no choices".to_string()))?;

        Ok(choice.message.content)
    }
}

#[async_trait]
impl ContentGenerator for OpenAiGenerator {
    async fn generate_marketing_content(&self, topic: &str) -> Result<GeneratedContent, Error> {
        let blog_system = "You are a professional content writer for NovaMind, an AI startup \
            that helps creative agencies automate their workflows. Generate engaging, \
            informative blog posts about automation and AI for creative professionals. Output \
            must be valid JSON with: blogTitle (string), blogOutline (string with bullet \
            points), blogContent (string, 400-600 words).";
        let blog_user = format!(
            "Write a blog post about: {}. Make it practical, engaging, and focused on how \
             automation helps creative agencies. Format: {{ \"blogTitle\": \"...\", \
             \"blogOutline\": \"...\", \"blogContent\": \"...\" }}",
            topic
        );
        let blog: BlogJson = serde_json::from_str(&self.chat(blog_system, &blog_user, 2048).await?)?;

        let blog_title = blog
            .blog_title
            .unwrap_or_else(|| "Untitled Blog Post".to_string());
        let blog_outline = blog.blog_outline.unwrap_or_default();
        let blog_content = blog.blog_content.unwrap_or_default();

        let newsletter_system = "You are a newsletter writer for NovaMind. Create three SHORT \
            newsletter versions (150-200 words each) of a blog post, each customized for a \
            specific persona. Output must be valid JSON with: founders (string), creatives \
            (string), operations (string).";
        let newsletter_user = format!(
            "Blog Title: {}\n\nBlog Summary: {}\n\nCreate three newsletter versions:\n\
             1. \"founders\": For Founders/Decision-Makers - Focus on ROI, business growth, \
             efficiency gains, competitive advantage\n\
             2. \"creatives\": For Creative Professionals - Focus on inspiration, creative \
             freedom, time-saving for passion projects\n\
             3. \"operations\": For Operations Managers - Focus on workflow optimization, team \
             coordination, integration capabilities\n\
             Each should be 150-200 words, include a compelling subject line, and maintain \
             NovaMind's voice. Format: {{ \"founders\": \"...\", \"creatives\": \"...\", \
             \"operations\": \"...\" }}",
            blog_title, blog_outline
        );
        let newsletters: NewsletterJson =
            serde_json::from_str(&self.chat(newsletter_system, &newsletter_user, 2048).await?)?;

        Ok(GeneratedContent {
            blog_title,
            blog_outline,
            blog_content,
            newsletter_founders: newsletters.founders.unwrap_or_default(),
            newsletter_creatives: newsletters.creatives.unwrap_or_default(),
            newsletter_operations: newsletters.operations.unwrap_or_default(),
        })
    }

    async fn generate_performance_insight(
        &self,
        campaign_title: &str,
        samples: &[PerformanceSample],
    ) -> Result<GeneratedInsight, Error> {
        let performance_summary = samples
            .iter()
            .map(|sample| {
                format!(
                    "{}: {}% open, {}% click",
                    sample.persona, sample.open_rate, sample.click_rate
                )
            })
            .collect::<Vec<_>>()
            .join("; ");

        let system = "You are a marketing analytics expert. Analyze campaign performance and \
            provide actionable insights. Output must be valid JSON with: summary (string), \
            recommendations (string).";
        let user = format!(
            "Campaign: \"{}\"\n\nPerformance: {}\n\nAnalyze this data and provide:\n\
             1. A brief summary (2-3 sentences) of what the data shows\n\
             2. Actionable recommendations (2-3 specific suggestions) for improving future \
             campaigns\n\
             Format: {{ \"summary\": \"...\", \"recommendations\": \"...\" }}",
            campaign_title, performance_summary
        );
        let insight: InsightJson = serde_json::from_str(&self.chat(system, &user, 512).await?)?;

        Ok(GeneratedInsight {
            summary: insight
                .summary
                .unwrap_or_else(|| "Performance data analyzed.".to_string()),
            recommendations: insight
                .recommendations
                .unwrap_or_else(|| "Continue testing different approaches.".to_string()),
        })
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: &'static str,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
    max_completion_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlogJson {
    blog_title: Option<String>,
    blog_outline: Option<String>,
    blog_content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsletterJson {
    founders: Option<String>,
    creatives: Option<String>,
    operations: Option<String>,
}

#[derive(Debug, Deserialize)]
struct InsightJson {
    summary: Option<String>,
    recommendations: Option<String>,
}
