use async_trait::async_trait;

use crate::error::Error;

use super::{ContentGenerator, GeneratedContent, GeneratedInsight, PerformanceSample};

/// Deterministic generator used when no API key is configured, and as the
/// fallback when the real generator fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimulatedGenerator;

#[async_trait]
impl ContentGenerator for SimulatedGenerator {
    async fn generate_marketing_content(&self, topic: &str) -> Result<GeneratedContent, Error> {
        Ok(marketing_content(topic))
    }

    async fn generate_performance_insight(
        &self,
        campaign_title: &str,
        samples: &[PerformanceSample],
    ) -> Result<GeneratedInsight, Error> {
        Ok(performance_insight(campaign_title, samples))
    }
}

pub fn marketing_content(topic: &str) -> GeneratedContent {
    let blog_title = format!("How {} Transforms Creative Agency Workflows", topic);

    let blog_outline = format!(
        "\u{2022} Introduction to {topic} in the creative industry\n\
         \u{2022} Key benefits for agency efficiency\n\
         \u{2022} Real-world implementation strategies\n\
         \u{2022} Common challenges and solutions\n\
         \u{2022} Future trends and recommendations",
        topic = topic
    );

    let blog_content = format!(
        "In today's fast-paced creative industry, {topic} has emerged as a game-changing force \
         for agencies looking to streamline their operations and deliver exceptional results.\n\n\
         The adoption of {topic} represents more than just a technological upgrade. It is a \
         fundamental shift in how creative teams approach their daily workflows. By automating \
         repetitive tasks and providing intelligent insights, agencies can redirect their energy \
         toward what truly matters: creativity and client relationships.\n\n\
         One of the most significant advantages of {topic} is its ability to reduce time spent \
         on administrative tasks. Creative professionals often find themselves bogged down by \
         project management, client communications, and status updates. With the right \
         automation tools, these tasks can be handled efficiently, freeing up valuable creative \
         time.\n\n\
         Implementation doesn't have to be overwhelming. Start small by identifying your most \
         time-consuming manual processes. Many agencies begin with automated client reporting \
         or project tracking, gradually expanding to more complex workflows as team members \
         become comfortable with the new systems.\n\n\
         The future of {topic} in creative agencies looks promising. As artificial intelligence \
         continues to evolve, we can expect even more sophisticated automation capabilities \
         that anticipate needs and provide proactive solutions. Agencies that embrace these \
         changes now will be well-positioned for future success.\n\n\
         The key is to view {topic} not as a replacement for human creativity, but as a \
         powerful enabler that allows creative teams to focus on what they do best: creating \
         remarkable work that drives business results.",
        topic = topic
    );

    let newsletter_founders = format!(
        "Subject: How {topic} Can Drive 30% Efficiency Gains for Your Agency\n\n\
         Dear Decision-Maker,\n\n\
         Time is money, and in the creative agency world, every minute counts toward your \
         bottom line. We've seen firsthand how {topic} can transform agency operations, \
         delivering measurable ROI through increased efficiency and reduced overhead.\n\n\
         Our latest research shows that agencies implementing {topic} see an average 30% \
         reduction in administrative time, allowing teams to take on more projects without \
         expanding headcount. This directly impacts profitability and competitive \
         positioning.\n\n\
         The investment in {topic} pays for itself through faster project turnaround, improved \
         client satisfaction scores, and reduced operational costs. Leading agencies are \
         already seeing these benefits. Don't let your competition get ahead.\n\n\
         Ready to explore how {topic} can transform your agency's performance metrics?\n\n\
         Best regards,\nThe NovaMind Team",
        topic = topic
    );

    let newsletter_creatives = format!(
        "Subject: Reclaim Your Creative Time with {topic}\n\n\
         Hey Creative,\n\n\
         Imagine spending more time on actual creative work and less time on status updates, \
         file management, and administrative tasks. That's the promise of {topic}, and it's \
         already changing how creative professionals work.\n\n\
         The best part? {topic} doesn't replace your creativity. It amplifies it. By handling \
         the tedious stuff automatically, you get more space for experimentation, iteration, \
         and the kind of deep creative thinking that produces breakthrough work.\n\n\
         We've heard from designers, writers, and art directors who've reclaimed 10+ hours per \
         week by automating their workflows. That's 10 more hours for passion projects, skill \
         development, or simply delivering better work to clients.\n\n\
         Your creativity is too valuable to waste on repetitive tasks. Let {topic} handle the \
         busywork while you focus on creating work you're proud of.\n\n\
         Keep creating,\nThe NovaMind Team",
        topic = topic
    );

    let newsletter_operations = format!(
        "Subject: Streamline Your Agency Operations with {topic}\n\n\
         Hello Operations Manager,\n\n\
         Managing multiple projects, coordinating team workflows, and ensuring everything runs \
         smoothly is no small feat. {topic} is designed to make your job easier by automating \
         the coordination and tracking that currently eats up your day.\n\n\
         Here's what operations teams are achieving with {topic}:\n\
         \u{2022} Automated project status updates across all stakeholders\n\
         \u{2022} Seamless integration with existing tools and platforms\n\
         \u{2022} Real-time visibility into project health and resource allocation\n\
         \u{2022} Reduced manual data entry and reporting time by 60%\n\n\
         The reliability you need is built in. {topic} integrates with your current systems, \
         ensuring smooth data flow without disrupting established workflows. Your team stays \
         coordinated, projects stay on track, and you finally get the visibility you need.\n\n\
         Let's discuss how {topic} can optimize your specific workflow challenges.\n\n\
         Regards,\nThe NovaMind Team",
        topic = topic
    );

    GeneratedContent {
        blog_title,
        blog_outline,
        blog_content,
        newsletter_founders,
        newsletter_creatives,
        newsletter_operations,
    }
}

pub fn performance_insight(
    campaign_title: &str,
    samples: &[PerformanceSample],
) -> GeneratedInsight {
    let top = match samples.iter().max_by_key(|sample| sample.open_rate) {
        Some(top) => top,
        None => {
            return GeneratedInsight {
                summary: "Performance data analyzed.".to_string(),
                recommendations: "Continue testing different approaches.".to_string(),
            }
        }
    };

    let total_clicks: u32 = samples.iter().map(|sample| sample.click_rate).sum();
    let avg_click_rate =
        (f64::from(total_clicks) / samples.len() as f64).round() as u32;

    GeneratedInsight {
        summary: format!(
            "Campaign \"{}\" showed varied engagement across personas. {} achieved the highest \
             open rate at {}%, while overall click-through rates averaged {}%.",
            campaign_title, top.persona, top.open_rate, avg_click_rate
        ),
        recommendations: format!(
            "Consider A/B testing subject lines for lower-performing personas. Focus on {}'s \
             interests in future content. Experiment with different send times to optimize \
             engagement.",
            top.persona
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::Persona;

    #[test]
    fn marketing_content_mentions_topic_everywhere() {
        let content = marketing_content("workflow automation");

        assert!(content.blog_title.contains("workflow automation"));
        assert!(content.blog_outline.contains("workflow automation"));
        assert!(content.blog_content.contains("workflow automation"));
        assert!(content.newsletter_founders.contains("workflow automation"));
        assert!(content.newsletter_creatives.contains("workflow automation"));
        assert!(content.newsletter_operations.contains("workflow automation"));
    }

    #[test]
    fn performance_insight_highlights_top_persona() {
        let samples = [
            PerformanceSample {
                persona: Persona::Founders,
                open_rate: 40,
                click_rate: 10,
            },
            PerformanceSample {
                persona: Persona::Creatives,
                open_rate: 62,
                click_rate: 15,
            },
            PerformanceSample {
                persona: Persona::Operations,
                open_rate: 38,
                click_rate: 8,
            },
        ];

        let insight = performance_insight("Scaling Studio Output", &samples);

        assert!(insight.summary.contains("creatives"));
        assert!(insight.summary.contains("62%"));
        assert!(insight.summary.contains("11%"), "clicks average to 11");
        assert!(insight.recommendations.contains("creatives"));
    }

    #[test]
    fn performance_insight_tolerates_missing_samples() {
        let insight = performance_insight("Empty Campaign", &[]);

        assert_eq!(insight.summary, "Performance data analyzed.");
    }
}
