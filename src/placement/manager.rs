use crate::campaign::Campaign;
use crate::database::Database;
use crate::error::Error;
use crate::scope::Scope;

use super::{Placement, PlacementFilter, PlacementId};

/// Builds one placement per (network, type) pair for the campaign's platforms,
/// numbered upwards from `first_id`. Unrecognized platforms get no placements.
pub fn placements_for_campaign(campaign: &Campaign, first_id: PlacementId) -> Vec<Placement> {
    let mut next_id = first_id;
    let mut placements = vec![];

    for key in &campaign.platforms {
        let (platform, types) = match key.placement_types() {
            Some(info) => info,
            None => continue,
        };

        for placement_type in types.iter() {
            placements.push(Placement {
                id: next_id,
                user_email: campaign.user_email.clone(),
                campaign_id: campaign.id,
                platform: platform.to_string(),
                placement_type: placement_type.to_string(),
                status: "active".to_string(),
                impressions: 0,
                clicks: 0,
                ctr: 0.0,
                spend: 0.0,
            });
            next_id = next_id.next();
        }
    }

    placements
}

#[tracing::instrument(skip(db))]
pub async fn create_placements_for_campaign(
    db: &dyn Database,
    campaign: &Campaign,
) -> Result<Vec<Placement>, Error> {
    let first_id = db.placements().next_placement_id().await?;
    let placements = placements_for_campaign(campaign, first_id);

    if !placements.is_empty() {
        db.placements().insert_placements(&placements).await?;
    }

    Ok(placements)
}

#[tracing::instrument(skip(db))]
pub async fn get_placements(
    db: &dyn Database,
    scope: &Scope,
    filter: &PlacementFilter,
) -> Result<Vec<Placement>, Error> {
    let placements = db.placements().fetch_placements().await?;

    let placements = scope
        .filter(placements)
        .into_iter()
        .filter(|placement| filter.matches(placement))
        .collect();

    Ok(placements)
}
