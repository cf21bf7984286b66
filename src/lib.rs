use std::sync::Arc;

use actix_web::web::{self, Data, JsonConfig, PathConfig, QueryConfig, ServiceConfig};
use actix_web::{App, HttpServer, ResponseError};
use chrono::Utc;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub mod analytics;
pub mod campaign;
pub mod config;
pub mod creative;
pub mod database;
pub mod error;
pub mod health;
pub mod placement;
pub mod rules;
pub mod scope;
pub mod seed;
pub mod team;
pub mod typedid;
pub mod user;
pub mod utils;

use crate::config::Config;
use crate::database::{Database, FileBackend, ReachDatabase};
use crate::error::Error;
use crate::placement::PlatformStatus;
use crate::scope::ScopePolicy;

/// Mounts every route along with the extractor error formatting. The caller
/// provides `Data<Box<dyn Database>>`, `Data<ScopePolicy>` and
/// `Data<PlatformStatus>`.
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.app_data(JsonConfig::default().error_handler(|err, _req| {
        // format json errors with custom format
        Error::InvalidJson(err).into()
    }))
    .app_data(PathConfig::default().error_handler(|err, _req| {
        // format path errors with custom format
        Error::InvalidPath(err).into()
    }))
    .app_data(QueryConfig::default().error_handler(|err, _req| {
        // format query errors with custom format
        Error::InvalidQuery(err).into()
    }))
    .service(health::get_health)
    .service(user::endpoints::register)
    .service(user::endpoints::login)
    .service(team::endpoints::get_team)
    .service(team::endpoints::invite_member)
    .service(team::endpoints::remove_member)
    .service(campaign::endpoints::get_campaigns)
    .service(campaign::endpoints::get_campaign_by_id)
    .service(campaign::endpoints::create_campaign)
    .service(campaign::endpoints::update_campaign)
    .service(campaign::endpoints::update_campaign_status)
    .service(campaign::endpoints::delete_campaign)
    .service(creative::endpoints::get_creatives)
    .service(creative::endpoints::get_creative_by_id)
    .service(creative::endpoints::create_creative)
    .service(creative::endpoints::delete_creative)
    .service(creative::endpoints::get_creative_insights)
    .service(placement::endpoints::get_platform_status)
    .service(placement::endpoints::get_placements)
    .service(rules::endpoints::calculate_bid)
    .service(rules::endpoints::estimate_audience)
    .service(rules::endpoints::recommend_budget)
    .service(analytics::endpoints::get_funnel)
    .service(analytics::endpoints::get_time_series)
    .service(analytics::endpoints::get_platform_comparison)
    .service(analytics::endpoints::get_attribution)
    .service(analytics::endpoints::get_dashboard)
    .default_service(web::to(|| async { Error::PathNotFound.error_response() }));
}

pub async fn run(config: Config) -> Result<(), Error> {
    info!("storing data in: {}", config.data_dir.display());
    let backend = FileBackend::new(config.data_dir.clone(), config.on_corrupt)?;
    let db = ReachDatabase::new(Arc::new(backend));

    if config.seed {
        seed::seed(&db).await?;
    }

    match &config.demo_domain {
        Some(domain) => info!("callers at @{} can see all @{} records", domain, domain),
        None => info!("demo domain sharing is disabled"),
    }

    let db = Data::new(Box::new(db) as Box<dyn Database>);
    let policy = Data::new(ScopePolicy::new(config.demo_domain.clone()));
    let platforms = Data::new(PlatformStatus::snapshot(Utc::now()));

    info!("listening on: {}", config.bind);
    HttpServer::new(move || {
        App::new()
            .app_data(db.clone())
            .app_data(policy.clone())
            .app_data(platforms.clone())
            .wrap(TracingLogger::default())
            .configure(configure)
    })
    .bind(&config.bind)?
    .run()
    .await?;

    Ok(())
}
