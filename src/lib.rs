use actix_web::web::{self, Data, FormConfig, JsonConfig, PathConfig, QueryConfig};
use actix_web::{App, HttpServer, ResponseError};
use tracing::info;
use tracing_actix_web::TracingLogger;

pub mod analytics;
pub mod campaign;
pub mod content;
pub mod crm;
pub mod database;
pub mod error;
pub mod insight;
pub mod performance;
pub mod persona;
pub mod typedid;

pub use crate::analytics::{DashboardMetrics, PersonaPerformance};
pub use crate::campaign::{
    CampaignBody, CampaignId, CampaignStatus, DistributeCampaignResultBody, GenerateCampaignBody,
};
pub use crate::error::Error;
pub use crate::persona::Persona;

use crate::content::openai::OpenAiGenerator;
use crate::content::simulated::SimulatedGenerator;
use crate::content::ContentGenerator;
use crate::crm::hubspot::HubSpotCrm;
use crate::crm::simulated::SimulatedCrm;
use crate::crm::Crm;
use crate::database::{Database, MemoryDatabase};

/// Run the campaign server until shutdown. With `simulated` set, the AI and
/// CRM integrations are forced to their deterministic stand-ins regardless of
/// environment.
#[actix_web::main]
pub async fn run(simulated: bool) -> Result<(), Error> {
    let db = Data::new(Box::new(MemoryDatabase::new()) as Box<dyn Database>);
    let generator = Data::new(content_generator(simulated));
    let crm = Data::new(crm_client(simulated));

    let port = std::env::var("PORT")
        .ok()
        .and_then(|port| port.parse().ok())
        .unwrap_or(8080u16);

    info!("listening on 127.0.0.1:{}", port);

    HttpServer::new(move || {
        App::new()
            .app_data(JsonConfig::default().error_handler(|err, _req| {
                // format json errors with custom format
                Error::InvalidJson(err).into()
            }))
            .app_data(PathConfig::default().error_handler(|err, _req| {
                // format path errors with custom format
                Error::InvalidPath(err).into()
            }))
            .app_data(FormConfig::default().error_handler(|err, _req| {
                // format form errors with custom format
                Error::InvalidForm(err).into()
            }))
            .app_data(QueryConfig::default().error_handler(|err, _req| {
                // format query errors with custom format
                Error::InvalidQuery(err).into()
            }))
            .app_data(db.clone())
            .app_data(generator.clone())
            .app_data(crm.clone())
            .wrap(TracingLogger::default())
            .service(analytics::endpoints::get_dashboard_metrics)
            .service(analytics::endpoints::get_persona_performance)
            .service(campaign::endpoints::generate_campaign)
            .service(campaign::endpoints::get_campaigns)
            .service(campaign::endpoints::get_recent_campaigns)
            .service(campaign::endpoints::distribute_campaign)
            .default_service(web::to(|| async { Error::PathDoesNotExist.error_response() }))
    })
    .bind(("127.0.0.1", port))?
    .run()
    .await?;

    Ok(())
}

fn content_generator(simulated: bool) -> Box<dyn ContentGenerator> {
    if simulated {
        return Box::new(SimulatedGenerator);
    }

    match std::env::var("OPENAI_API_KEY") {
        Ok(api_key) => {
            info!("using the OpenAI content generator");
            Box::new(OpenAiGenerator::new(api_key))
        }
        Err(_) => {
            info!("OPENAI_API_KEY not set, using simulated content generation");
            Box::new(SimulatedGenerator)
        }
    }
}

fn crm_client(simulated: bool) -> Box<dyn Crm> {
    if simulated {
        return Box::new(SimulatedCrm);
    }

    match std::env::var("HUBSPOT_ACCESS_TOKEN") {
        Ok(access_token) => {
            info!("using the HubSpot crm client");
            Box::new(HubSpotCrm::new(access_token))
        }
        Err(_) => {
            info!("HUBSPOT_ACCESS_TOKEN not set, using simulated distribution");
            Box::new(SimulatedCrm)
        }
    }
}
