use actix_web::web::{Data, Json, Path, Query};
use actix_web::{delete, get, patch, post, put, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::error::Error;
use crate::rules::recommendations::{generate_campaign_recommendations, Recommendation};
use crate::scope::Scope;
use crate::utils::SuccessBody;

use super::{manager, Campaign, CampaignDraft, CampaignId, CampaignPatch};

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct CampaignListQuery {
    pub status: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct CampaignStatusBody {
    pub status: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CampaignDetailBody {
    #[serde(flatten)]
    pub campaign: Campaign,
    pub recommendations: Vec<Recommendation>,
}

impl CampaignDetailBody {
    pub fn render(campaign: Campaign) -> CampaignDetailBody {
        CampaignDetailBody {
            recommendations: generate_campaign_recommendations(&campaign),
            campaign,
        }
    }
}

#[get("/api/campaigns")]
#[tracing::instrument(skip(db))]
pub async fn get_campaigns(
    db: Data<Box<dyn Database>>,
    scope: Scope,
    query: Query<CampaignListQuery>,
) -> Result<Json<Vec<Campaign>>, Error> {
    let query = query.into_inner();
    let campaigns = manager::get_campaigns(&***db, &scope, query.status.as_deref()).await?;

    Ok(Json(campaigns))
}

#[get("/api/campaigns/{campaign_id}")]
#[tracing::instrument(skip(db))]
pub async fn get_campaign_by_id(
    db: Data<Box<dyn Database>>,
    scope: Scope,
    params: Path<CampaignId>,
) -> Result<Json<CampaignDetailBody>, Error> {
    let campaign_id = params.into_inner();
    let campaign = manager::get_campaign_by_id(&***db, &scope, campaign_id).await?;

    Ok(Json(CampaignDetailBody::render(campaign)))
}

#[post("/api/campaigns")]
#[tracing::instrument(skip(db))]
pub async fn create_campaign(
    db: Data<Box<dyn Database>>,
    scope: Scope,
    body: Json<CampaignDraft>,
) -> Result<HttpResponse, Error> {
    let campaign = manager::create_campaign(&***db, &scope, body.into_inner()).await?;

    Ok(HttpResponse::Created().json(campaign))
}

#[put("/api/campaigns/{campaign_id}")]
#[tracing::instrument(skip(db))]
pub async fn update_campaign(
    db: Data<Box<dyn Database>>,
    scope: Scope,
    params: Path<CampaignId>,
    body: Json<CampaignPatch>,
) -> Result<Json<Campaign>, Error> {
    let campaign_id = params.into_inner();
    let campaign =
        manager::update_campaign(&***db, &scope, campaign_id, body.into_inner()).await?;

    Ok(Json(campaign))
}

#[patch("/api/campaigns/{campaign_id}/status")]
#[tracing::instrument(skip(db))]
pub async fn update_campaign_status(
    db: Data<Box<dyn Database>>,
    scope: Scope,
    params: Path<CampaignId>,
    body: Json<CampaignStatusBody>,
) -> Result<Json<Campaign>, Error> {
    let campaign_id = params.into_inner();
    let status = body.into_inner().status;
    let campaign = manager::update_campaign_status(&***db, &scope, campaign_id, status).await?;

    Ok(Json(campaign))
}

#[delete("/api/campaigns/{campaign_id}")]
#[tracing::instrument(skip(db))]
pub async fn delete_campaign(
    db: Data<Box<dyn Database>>,
    scope: Scope,
    params: Path<CampaignId>,
) -> Result<Json<SuccessBody>, Error> {
    let campaign_id = params.into_inner();
    manager::delete_campaign(&***db, &scope, campaign_id).await?;

    Ok(Json(SuccessBody::new("Campaign deleted")))
}
