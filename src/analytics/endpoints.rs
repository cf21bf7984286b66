use actix_web::get;
use actix_web::web::{Data, Json, Query};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::error::Error;
use crate::scope::Scope;
use crate::utils::leading_integer;

use super::{manager, Attribution, Dashboard, DailyMetrics, Funnel, PlatformPerformance};

const DEFAULT_DAYS: usize = 30;
const MAX_DAYS: usize = 365;

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct TimeSeriesQuery {
    pub days: Option<String>,
}

impl TimeSeriesQuery {
    /// Zero or unparseable counts use the default, negative counts yield
    /// an empty series, and long ranges are capped at a year.
    pub fn days(&self) -> usize {
        let days = self
            .days
            .as_deref()
            .and_then(leading_integer)
            .filter(|days| *days != 0);

        match days {
            None => DEFAULT_DAYS,
            Some(days) if days < 0 => 0,
            Some(days) => (days as u64).min(MAX_DAYS as u64) as usize,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct AttributionQuery {
    pub model: Option<String>,
}

#[get("/api/analytics/funnel")]
#[tracing::instrument]
pub async fn get_funnel() -> Result<Json<Funnel>, Error> {
    Ok(Json(manager::get_funnel()))
}

#[get("/api/analytics/timeseries")]
#[tracing::instrument]
pub async fn get_time_series(
    query: Query<TimeSeriesQuery>,
) -> Result<Json<Vec<DailyMetrics>>, Error> {
    let mut rng = StdRng::from_entropy();
    let series = manager::generate_time_series(query.days(), &mut rng);

    Ok(Json(series))
}

#[get("/api/analytics/platforms")]
#[tracing::instrument]
pub async fn get_platform_comparison() -> Result<Json<Vec<PlatformPerformance>>, Error> {
    Ok(Json(manager::get_platform_comparison()))
}

#[get("/api/analytics/attribution")]
#[tracing::instrument]
pub async fn get_attribution(query: Query<AttributionQuery>) -> Result<Json<Attribution>, Error> {
    let model = query.model.as_deref().filter(|model| !model.is_empty());

    Ok(Json(manager::get_attribution(model)))
}

#[get("/api/dashboard")]
#[tracing::instrument(skip(db))]
pub async fn get_dashboard(
    db: Data<Box<dyn Database>>,
    scope: Scope,
) -> Result<Json<Dashboard>, Error> {
    let mut rng = StdRng::from_entropy();
    let dashboard = manager::get_dashboard(&***db, &scope, &mut rng).await?;

    Ok(Json(dashboard))
}
