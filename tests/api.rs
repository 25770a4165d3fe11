use std::time::Duration;

use awc::http::StatusCode;
use awc::Client;
use novamind_server::{
    CampaignBody, CampaignId, CampaignStatus, DashboardMetrics, DistributeCampaignResultBody,
    GenerateCampaignBody, Persona, PersonaPerformance,
};

const BASE_URL: &str = "http://localhost:8080";

async fn start_server() -> Client {
    let _ = std::thread::spawn(|| novamind_server::run(true));

    let client = Client::default();
    for _ in 0..50 {
        let response = client.get(format!("{}/api/metrics", BASE_URL)).send().await;
        if response.is_ok() {
            return client;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    panic!("server did not start");
}

#[actix_rt::test]
async fn generate_and_distribute_campaign() {
    let client = start_server().await;

    let body = GenerateCampaignBody {
        topic: "AI-assisted video production".into(),
    };
    let mut response = client
        .post(format!("{}/api/campaigns/generate", BASE_URL))
        .send_json(&body)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let campaign: CampaignBody = response.json().limit(1024 * 1024).await.unwrap();

    assert_eq!(campaign.topic, "AI-assisted video production".to_string());
    assert_eq!(campaign.status, CampaignStatus::Draft);
    assert!(campaign
        .blog_title
        .contains("AI-assisted video production"));
    assert!(campaign.performance.is_empty());
    assert!(campaign.insight.is_none());

    let mut response = client
        .post(format!(
            "{}/api/campaigns/{}/distribute",
            BASE_URL, campaign.id
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let result: DistributeCampaignResultBody = response.json().await.unwrap();

    assert!(result.success);
    assert_eq!(result.distribution_results.len(), 3);
    for persona in Persona::ALL {
        assert!(result
            .distribution_results
            .iter()
            .any(|r| r.persona == persona));
    }

    // a second distribution must be rejected
    let response = client
        .post(format!(
            "{}/api/campaigns/{}/distribute",
            BASE_URL, campaign.id
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let mut response = client
        .get(format!("{}/api/campaigns/recent", BASE_URL))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let recent: Vec<CampaignBody> = response.json().limit(10 * 1024 * 1024).await.unwrap();

    let distributed = recent
        .iter()
        .find(|c| c.id == campaign.id)
        .expect("distributed campaign is listed");
    assert_eq!(distributed.status, CampaignStatus::Completed);
    assert_eq!(distributed.performance.len(), 3);
    let insight = distributed.insight.as_ref().expect("insight was recorded");
    assert!(!insight.summary.is_empty());

    let mut response = client.get(format!("{}/api/metrics", BASE_URL)).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let metrics: DashboardMetrics = response.json().await.unwrap();
    assert!(metrics.total_campaigns >= 1);
    assert!(metrics.avg_open_rate >= 35 && metrics.avg_open_rate < 65);

    let mut response = client
        .get(format!("{}/api/analytics/persona-performance", BASE_URL))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let rollups: Vec<PersonaPerformance> = response.json().await.unwrap();
    assert_eq!(rollups.len(), 3);
    assert!(rollups.iter().all(|r| r.campaign_count >= 1));
}

#[actix_rt::test]
async fn rejects_invalid_requests() {
    let client = start_server().await;

    let body = GenerateCampaignBody {
        topic: "abc".into(),
    };
    let response = client
        .post(format!("{}/api/campaigns/generate", BASE_URL))
        .send_json(&body)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .post(format!(
            "{}/api/campaigns/{}/distribute",
            BASE_URL,
            CampaignId::new()
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client
        .get(format!("{}/api/unknown", BASE_URL))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
