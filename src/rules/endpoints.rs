use actix_web::post;
use actix_web::web::Json;
use chrono::{Local, Timelike};

use crate::error::Error;

use super::audience::{estimate_audience_size, AudienceEstimate, AudienceRequest};
use super::bidding::{calculate_optimal_bid, BidRecommendation, BidRequest};
use super::budget::{generate_budget_recommendation, BudgetRecommendation, BudgetRequest};

#[post("/api/bidding/calculate")]
#[tracing::instrument]
pub async fn calculate_bid(body: Json<BidRequest>) -> Result<Json<BidRecommendation>, Error> {
    let hour = Local::now().hour();
    let recommendation = calculate_optimal_bid(&body, hour);

    Ok(Json(recommendation))
}

#[post("/api/audience/estimate")]
#[tracing::instrument]
pub async fn estimate_audience(
    body: Json<AudienceRequest>,
) -> Result<Json<AudienceEstimate>, Error> {
    Ok(Json(estimate_audience_size(&body)))
}

#[post("/api/budget/recommend")]
#[tracing::instrument]
pub async fn recommend_budget(
    body: Json<BudgetRequest>,
) -> Result<Json<BudgetRecommendation>, Error> {
    Ok(Json(generate_budget_recommendation(&body)))
}
