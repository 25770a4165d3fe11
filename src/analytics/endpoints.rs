use actix_web::get;
use actix_web::web::{Data, Json};

use crate::database::Database;
use crate::error::Error;

use super::{manager, DashboardMetrics, PersonaPerformance};

#[get("/api/metrics")]
#[tracing::instrument(skip(db))]
async fn get_dashboard_metrics(
    db: Data<Box<dyn Database>>,
) -> Result<Json<DashboardMetrics>, Error> {
    let metrics = manager::get_dashboard_metrics(&***db).await?;

    Ok(Json(metrics))
}

#[get("/api/analytics/persona-performance")]
#[tracing::instrument(skip(db))]
async fn get_persona_performance(
    db: Data<Box<dyn Database>>,
) -> Result<Json<Vec<PersonaPerformance>>, Error> {
    let rollups = manager::get_persona_performance(&***db).await?;

    Ok(Json(rollups))
}
