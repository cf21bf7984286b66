use actix_web::get;
use actix_web::web::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

#[get("/api/health")]
pub async fn get_health() -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok",
        timestamp: Utc::now(),
    })
}
