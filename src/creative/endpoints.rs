use actix_web::web::{Data, Json, Path, Query};
use actix_web::{delete, get, post, HttpResponse};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::error::Error;
use crate::rules::insights::CreativeInsights;
use crate::scope::Scope;
use crate::utils::SuccessBody;

use super::{manager, Creative, CreativeDraft, CreativeId};

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreativeListQuery {
    pub campaign_id: Option<String>,
}

#[get("/api/creatives")]
#[tracing::instrument(skip(db))]
pub async fn get_creatives(
    db: Data<Box<dyn Database>>,
    scope: Scope,
    query: Query<CreativeListQuery>,
) -> Result<Json<Vec<Creative>>, Error> {
    let query = query.into_inner();
    let creatives = manager::get_creatives(&***db, &scope, query.campaign_id.as_deref()).await?;

    Ok(Json(creatives))
}

#[get("/api/creatives/{creative_id}")]
#[tracing::instrument(skip(db))]
pub async fn get_creative_by_id(
    db: Data<Box<dyn Database>>,
    scope: Scope,
    params: Path<CreativeId>,
) -> Result<Json<Creative>, Error> {
    let creative_id = params.into_inner();
    let creative = manager::get_creative_by_id(&***db, &scope, creative_id).await?;

    Ok(Json(creative))
}

#[post("/api/creatives")]
#[tracing::instrument(skip(db))]
pub async fn create_creative(
    db: Data<Box<dyn Database>>,
    scope: Scope,
    body: Json<CreativeDraft>,
) -> Result<HttpResponse, Error> {
    let creative = manager::create_creative(&***db, &scope, body.into_inner()).await?;

    Ok(HttpResponse::Created().json(creative))
}

#[delete("/api/creatives/{creative_id}")]
#[tracing::instrument(skip(db))]
pub async fn delete_creative(
    db: Data<Box<dyn Database>>,
    scope: Scope,
    params: Path<CreativeId>,
) -> Result<Json<SuccessBody>, Error> {
    let creative_id = params.into_inner();
    manager::delete_creative(&***db, &scope, creative_id).await?;

    Ok(Json(SuccessBody::new("Creative deleted")))
}

#[post("/api/creatives/{creative_id}/insights")]
#[tracing::instrument(skip(db))]
pub async fn get_creative_insights(
    db: Data<Box<dyn Database>>,
    scope: Scope,
    params: Path<CreativeId>,
) -> Result<Json<CreativeInsights>, Error> {
    let creative_id = params.into_inner();
    let mut rng = StdRng::from_entropy();
    let insights = manager::get_creative_insights(&***db, &scope, creative_id, &mut rng).await?;

    Ok(Json(insights))
}
