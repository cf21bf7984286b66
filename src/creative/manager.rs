use chrono::Utc;
use rand::Rng;

use crate::database::Database;
use crate::error::Error;
use crate::rules::insights::{generate_creative_insights, CreativeInsights};
use crate::scope::Scope;
use crate::utils::non_empty;

use super::{
    Creative, CreativeDraft, CreativeId, CreativeMetrics, Performance, PLACEHOLDER_THUMBNAIL,
};

#[tracing::instrument(skip(db))]
pub async fn get_creatives(
    db: &dyn Database,
    scope: &Scope,
    campaign_id: Option<&str>,
) -> Result<Vec<Creative>, Error> {
    let creatives = scope.filter(db.creatives().fetch_creatives().await?);

    let creatives = match campaign_id.filter(|id| !id.is_empty()) {
        Some(campaign_id) => creatives
            .into_iter()
            .filter(|creative| {
                creative
                    .campaign_id
                    .map_or(false, |id| id.to_string() == campaign_id)
            })
            .collect(),
        None => creatives,
    };

    Ok(creatives)
}

#[tracing::instrument(skip(db))]
pub async fn get_creative_by_id(
    db: &dyn Database,
    scope: &Scope,
    creative_id: CreativeId,
) -> Result<Creative, Error> {
    let creative = db
        .creatives()
        .fetch_creative_by_id(creative_id)
        .await?
        .filter(|creative| scope.can_see(&creative.user_email))
        .ok_or(Error::CreativeNotFound { creative_id })?;

    Ok(creative)
}

#[tracing::instrument(skip(db))]
pub async fn create_creative(
    db: &dyn Database,
    scope: &Scope,
    draft: CreativeDraft,
) -> Result<Creative, Error> {
    let creative = Creative {
        id: db.creatives().next_creative_id().await?,
        user_email: scope.owner(),
        name: non_empty(draft.name).unwrap_or_else(|| "Untitled Creative".to_string()),
        creative_type: non_empty(draft.creative_type).unwrap_or_else(|| "image".to_string()),
        format: non_empty(draft.format).unwrap_or_else(|| "banner".to_string()),
        dimensions: non_empty(draft.dimensions).unwrap_or_else(|| "1200x628".to_string()),
        campaign_id: draft.campaign_id,
        status: "active".to_string(),
        thumbnail: non_empty(draft.thumbnail)
            .unwrap_or_else(|| PLACEHOLDER_THUMBNAIL.to_string()),
        performance: Performance::New,
        metrics: CreativeMetrics::default(),
        created_at: Utc::now().date_naive(),
    };

    db.creatives().insert_creative(&creative).await?;

    Ok(creative)
}

#[tracing::instrument(skip(db))]
pub async fn delete_creative(
    db: &dyn Database,
    scope: &Scope,
    creative_id: CreativeId,
) -> Result<(), Error> {
    get_creative_by_id(db, scope, creative_id).await?;

    if !db.creatives().delete_creative(creative_id).await? {
        return Err(Error::CreativeNotFound { creative_id });
    }

    Ok(())
}

#[tracing::instrument(skip(db, rng))]
pub async fn get_creative_insights<R: Rng>(
    db: &dyn Database,
    scope: &Scope,
    creative_id: CreativeId,
    rng: &mut R,
) -> Result<CreativeInsights, Error> {
    let creative = get_creative_by_id(db, scope, creative_id).await?;

    Ok(generate_creative_insights(&creative, rng))
}
