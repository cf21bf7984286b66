use actix_web::get;
use actix_web::web::{Data, Json, Query};
use serde::Serialize;

use crate::campaign::{self, Campaign};
use crate::creative::{self, Creative};
use crate::database::Database;
use crate::error::Error;
use crate::scope::Scope;

use super::{manager, Placement, PlacementFilter, PlatformStatus};

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementBody {
    #[serde(flatten)]
    pub placement: Placement,
    pub campaign_name: String,
    pub creative_name: Option<String>,
    pub creative_thumbnail: Option<String>,
}

impl PlacementBody {
    pub fn render(
        placement: Placement,
        campaigns: &[Campaign],
        creatives: &[Creative],
    ) -> PlacementBody {
        let campaign_name = campaigns
            .iter()
            .find(|campaign| campaign.id == placement.campaign_id)
            .map(|campaign| campaign.name.clone())
            .unwrap_or_else(|| "Unknown Campaign".to_string());

        let creative = creatives.iter().find(|creative| {
            creative.campaign_id == Some(placement.campaign_id) && creative.status == "active"
        });

        PlacementBody {
            campaign_name,
            creative_name: creative.map(|creative| creative.name.clone()),
            creative_thumbnail: creative.map(|creative| creative.thumbnail.clone()),
            placement,
        }
    }
}

#[get("/api/platforms/status")]
#[tracing::instrument(skip(platforms))]
pub async fn get_platform_status(platforms: Data<PlatformStatus>) -> Json<PlatformStatus> {
    Json(platforms.get_ref().clone())
}

#[get("/api/placements")]
#[tracing::instrument(skip(db))]
pub async fn get_placements(
    db: Data<Box<dyn Database>>,
    scope: Scope,
    query: Query<PlacementFilter>,
) -> Result<Json<Vec<PlacementBody>>, Error> {
    let filter = query.into_inner();
    let (placements, campaigns, creatives) = futures::try_join!(
        manager::get_placements(&***db, &scope, &filter),
        campaign::manager::get_campaigns(&***db, &scope, None),
        creative::manager::get_creatives(&***db, &scope, None),
    )?;

    let body = placements
        .into_iter()
        .map(|placement| PlacementBody::render(placement, &campaigns, &creatives))
        .collect();

    Ok(Json(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::CampaignId;
    use crate::creative::{CreativeId, CreativeMetrics, Performance};
    use crate::placement::PlacementId;
    use chrono::NaiveDate;

    fn placement(campaign: u64) -> Placement {
        Placement {
            id: PlacementId::new(1),
            user_email: String::new(),
            campaign_id: CampaignId::new(campaign),
            platform: "Meta".to_string(),
            placement_type: "Feed".to_string(),
            status: "active".to_string(),
            impressions: 0,
            clicks: 0,
            ctr: 0.0,
            spend: 0.0,
        }
    }

    fn creative(id: u64, campaign: u64, status: &str) -> Creative {
        Creative {
            id: CreativeId::new(id),
            user_email: String::new(),
            name: format!("Creative {}", id),
            creative_type: "image".to_string(),
            format: "banner".to_string(),
            dimensions: "1200x628".to_string(),
            campaign_id: Some(CampaignId::new(campaign)),
            status: status.to_string(),
            thumbnail: format!("https://example.com/{}.png", id),
            performance: Performance::New,
            metrics: CreativeMetrics::default(),
            created_at: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
        }
    }

    #[test]
    fn render_uses_first_active_creative() {
        let creatives = vec![
            creative(1, 2, "paused"),
            creative(2, 1, "active"),
            creative(3, 2, "active"),
            creative(4, 2, "active"),
        ];

        let body = PlacementBody::render(placement(2), &[], &creatives);

        assert_eq!(body.campaign_name, "Unknown Campaign");
        assert_eq!(body.creative_name.as_deref(), Some("Creative 3"));
        assert_eq!(
            body.creative_thumbnail.as_deref(),
            Some("https://example.com/3.png")
        );
    }

    #[test]
    fn render_without_creative_is_null() {
        let body = PlacementBody::render(placement(5), &[], &[]);
        let json = serde_json::to_value(&body).unwrap();

        assert!(json["creativeName"].is_null());
        assert!(json["creativeThumbnail"].is_null());
        assert_eq!(json["campaignId"], "camp-005");
        assert_eq!(json["type"], "Feed");
    }
}
