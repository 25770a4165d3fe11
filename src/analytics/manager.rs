use std::collections::HashSet;

use crate::campaign::CampaignId;
use crate::database::Database;
use crate::error::Error;
use crate::performance::Performance;
use crate::persona::Persona;

use super::{DashboardMetrics, PersonaPerformance};

const NO_TOP_PERSONA: &str = "\u{2014}";

#[tracing::instrument(skip(db))]
pub async fn get_dashboard_metrics(db: &dyn Database) -> Result<DashboardMetrics, Error> {
    let campaigns = db.campaigns().fetch_campaigns().await?;
    if campaigns.is_empty() {
        return Ok(DashboardMetrics {
            total_campaigns: 0,
            avg_open_rate: 0,
            top_persona: NO_TOP_PERSONA.to_string(),
            recent_activity: "No campaigns yet".to_string(),
        });
    }

    let rows = db.performance().fetch_all_performance().await?;
    let open_rates: Vec<u32> = rows.iter().map(|row| row.open_rate).collect();

    // top persona by average open rate, ties and all-zero averages keep "—"
    let mut top_persona = NO_TOP_PERSONA.to_string();
    let mut top_total: u64 = 0;
    let mut top_count: u64 = 1;
    for persona in Persona::ALL {
        let persona_rates: Vec<u64> = rows
            .iter()
            .filter(|row| row.persona == persona)
            .map(|row| u64::from(row.open_rate))
            .collect();
        if persona_rates.is_empty() {
            continue;
        }

        let total: u64 = persona_rates.iter().sum();
        let count = persona_rates.len() as u64;
        // compare total/count > top_total/top_count without dividing
        if total * top_count > top_total * count {
            top_total = total;
            top_count = count;
            top_persona = persona.title().to_string();
        }
    }

    // campaigns are sorted newest first
    let recent_activity = campaigns[0].created_at.format("%b %-d").to_string();

    Ok(DashboardMetrics {
        total_campaigns: campaigns.len(),
        avg_open_rate: average(&open_rates),
        top_persona,
        recent_activity,
    })
}

#[tracing::instrument(skip(db))]
pub async fn get_persona_performance(db: &dyn Database) -> Result<Vec<PersonaPerformance>, Error> {
    let rows = db.performance().fetch_all_performance().await?;
    if rows.is_empty() {
        return Ok(vec![]);
    }

    let mut rollups = Vec::new();
    for persona in Persona::ALL {
        let persona_rows: Vec<&Performance> =
            rows.iter().filter(|row| row.persona == persona).collect();
        if persona_rows.is_empty() {
            continue;
        }

        let open_rates: Vec<u32> = persona_rows.iter().map(|row| row.open_rate).collect();
        let click_rates: Vec<u32> = persona_rows.iter().map(|row| row.click_rate).collect();
        let unsubscribe_rates: Vec<u32> = persona_rows
            .iter()
            .map(|row| row.unsubscribe_rate)
            .collect();
        let campaigns: HashSet<CampaignId> =
            persona_rows.iter().map(|row| row.campaign_id).collect();

        rollups.push(PersonaPerformance {
            persona,
            avg_open_rate: average(&open_rates),
            avg_click_rate: average(&click_rates),
            avg_unsubscribe_rate: average(&unsubscribe_rates),
            campaign_count: campaigns.len(),
        });
    }

    Ok(rollups)
}

fn average(rates: &[u32]) -> u32 {
    if rates.is_empty() {
        return 0;
    }

    let total: u64 = rates.iter().map(|&rate| u64::from(rate)).sum();
    (total as f64 / rates.len() as f64).round() as u32
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};

    use super::*;
    use crate::campaign::{Campaign, CampaignStatus};
    use crate::database::MemoryDatabase;
    use crate::performance::PerformanceId;

    fn campaign_at(created_at: DateTime<Utc>) -> Campaign {
        Campaign {
            id: CampaignId::new(),
            topic: "automated client reporting".to_string(),
            blog_title: "Reporting on Autopilot".to_string(),
            blog_outline: "\u{2022} overview".to_string(),
            blog_content: "Body text.".to_string(),
            newsletter_founders: "Founders letter".to_string(),
            newsletter_creatives: "Creatives letter".to_string(),
            newsletter_operations: "Operations letter".to_string(),
            status: CampaignStatus::Completed,
            created_at,
        }
    }

    fn performance_row(
        campaign_id: CampaignId,
        persona: Persona,
        open_rate: u32,
        click_rate: u32,
        unsubscribe_rate: u32,
    ) -> Performance {
        Performance {
            id: PerformanceId::new(),
            campaign_id,
            persona,
            recipient_count: 20,
            open_rate,
            click_rate,
            unsubscribe_rate,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn dashboard_metrics_default_when_store_is_empty() {
        let db = MemoryDatabase::new();

        let metrics = get_dashboard_metrics(&db).await.unwrap();

        assert_eq!(metrics.total_campaigns, 0);
        assert_eq!(metrics.avg_open_rate, 0);
        assert_eq!(metrics.top_persona, "\u{2014}".to_string());
        assert_eq!(metrics.recent_activity, "No campaigns yet".to_string());
    }

    #[tokio::test]
    async fn dashboard_metrics_aggregate_open_rates() {
        let db = MemoryDatabase::new();
        let older = campaign_at(Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap());
        let newer = campaign_at(Utc.with_ymd_and_hms(2026, 3, 5, 12, 0, 0).unwrap());
        db.campaigns().insert_campaign(&older).await.unwrap();
        db.campaigns().insert_campaign(&newer).await.unwrap();
        for (persona, open) in [
            (Persona::Founders, 60),
            (Persona::Creatives, 40),
            (Persona::Operations, 47),
        ] {
            let row = performance_row(older.id, persona, open, 10, 1);
            db.performance().insert_performance(&row).await.unwrap();
        }

        let metrics = get_dashboard_metrics(&db).await.unwrap();

        assert_eq!(metrics.total_campaigns, 2);
        assert_eq!(metrics.avg_open_rate, 49, "(60 + 40 + 47) / 3 rounds to 49");
        assert_eq!(metrics.top_persona, "Founders".to_string());
        assert_eq!(metrics.recent_activity, "Mar 5".to_string());
    }

    #[tokio::test]
    async fn dashboard_metrics_without_performance_rows() {
        let db = MemoryDatabase::new();
        let campaign = campaign_at(Utc.with_ymd_and_hms(2026, 8, 30, 9, 0, 0).unwrap());
        db.campaigns().insert_campaign(&campaign).await.unwrap();

        let metrics = get_dashboard_metrics(&db).await.unwrap();

        assert_eq!(metrics.total_campaigns, 1);
        assert_eq!(metrics.avg_open_rate, 0);
        assert_eq!(metrics.top_persona, "\u{2014}".to_string());
        assert_eq!(metrics.recent_activity, "Aug 30".to_string());
    }

    #[tokio::test]
    async fn persona_performance_is_empty_without_rows() {
        let db = MemoryDatabase::new();

        let rollups = get_persona_performance(&db).await.unwrap();

        assert!(rollups.is_empty());
    }

    #[tokio::test]
    async fn persona_performance_rolls_up_by_persona() {
        let db = MemoryDatabase::new();
        let first = campaign_at(Utc.with_ymd_and_hms(2026, 4, 1, 8, 0, 0).unwrap());
        let second = campaign_at(Utc.with_ymd_and_hms(2026, 4, 2, 8, 0, 0).unwrap());
        db.campaigns().insert_campaign(&first).await.unwrap();
        db.campaigns().insert_campaign(&second).await.unwrap();

        let rows = [
            performance_row(first.id, Persona::Founders, 50, 10, 0),
            performance_row(second.id, Persona::Founders, 61, 15, 1),
            performance_row(first.id, Persona::Creatives, 44, 9, 2),
        ];
        for row in &rows {
            db.performance().insert_performance(row).await.unwrap();
        }

        let rollups = get_persona_performance(&db).await.unwrap();

        assert_eq!(rollups.len(), 2, "operations has no rows");

        let founders = &rollups[0];
        assert_eq!(founders.persona, Persona::Founders);
        assert_eq!(founders.avg_open_rate, 56, "(50 + 61) / 2 rounds to 56");
        assert_eq!(founders.avg_click_rate, 13, "(10 + 15) / 2 rounds to 13");
        assert_eq!(founders.avg_unsubscribe_rate, 1);
        assert_eq!(founders.campaign_count, 2);

        let creatives = &rollups[1];
        assert_eq!(creatives.persona, Persona::Creatives);
        assert_eq!(creatives.avg_open_rate, 44);
        assert_eq!(creatives.avg_click_rate, 9);
        assert_eq!(creatives.avg_unsubscribe_rate, 2);
        assert_eq!(creatives.campaign_count, 1);
    }
}
