use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::campaign::CampaignId;
use crate::database::Record;
use crate::scope::Owned;
use crate::typedid::{TypedId, TypedIdMarker};

pub mod db;
pub mod endpoints;
pub mod manager;

pub type PlacementId = TypedId<Placement>;

/// An ad slot on one network, tied to a campaign.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub id: PlacementId,
    #[serde(default)]
    pub user_email: String,
    pub campaign_id: CampaignId,
    pub platform: String,
    #[serde(rename = "type")]
    pub placement_type: String,
    pub status: String,
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub ctr: f64,
    #[serde(default)]
    pub spend: f64,
}

impl TypedIdMarker for Placement {
    fn prefix() -> &'static str {
        "pl"
    }
}

impl Record for Placement {
    const COLLECTION: &'static str = "placements";

    fn key(&self) -> String {
        self.id.to_string()
    }
}

impl Owned for Placement {
    fn owner(&self) -> &str {
        &self.user_email
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementFilter {
    pub platform: Option<String>,
    pub status: Option<String>,
    pub campaign_id: Option<String>,
}

impl PlacementFilter {
    pub fn matches(&self, placement: &Placement) -> bool {
        if let Some(platform) = self.platform.as_deref().filter(|p| !p.is_empty()) {
            if !placement.platform.eq_ignore_ascii_case(platform) {
                return false;
            }
        }
        if let Some(status) = self.status.as_deref().filter(|s| !s.is_empty()) {
            if placement.status != status {
                return false;
            }
        }
        if let Some(campaign_id) = self.campaign_id.as_deref().filter(|c| !c.is_empty()) {
            if placement.campaign_id.to_string() != campaign_id {
                return false;
            }
        }
        true
    }
}

/// Connection state of each ad network, captured once when the server starts.
#[derive(Clone, Debug, Serialize)]
pub struct PlatformStatus {
    pub google: PlatformConnection,
    pub meta: PlatformConnection,
    pub linkedin: PlatformConnection,
    pub glimmora: PlatformConnection,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformConnection {
    pub name: &'static str,
    pub connected: bool,
    pub last_sync: DateTime<Utc>,
    pub account_id: &'static str,
    pub placements: Vec<PlacementSummary>,
    pub metrics: PlatformMetrics,
}

#[derive(Clone, Debug, Serialize)]
pub struct PlacementSummary {
    #[serde(rename = "type")]
    pub placement_type: &'static str,
    pub active: u32,
    pub total: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct PlatformMetrics {
    pub impressions: u64,
    pub clicks: u64,
    pub spend: f64,
    pub conversions: u64,
}

impl PlatformStatus {
    pub fn snapshot(now: DateTime<Utc>) -> PlatformStatus {
        let summary = |placement_type, active, total| PlacementSummary {
            placement_type,
            active,
            total,
        };

        PlatformStatus {
            google: PlatformConnection {
                name: "Google Ads",
                connected: true,
                last_sync: now,
                account_id: "GA-482-991-3307",
                placements: vec![
                    summary("Search", 4, 6),
                    summary("Display", 3, 5),
                    summary("YouTube", 1, 2),
                ],
                metrics: PlatformMetrics {
                    impressions: 1_080_000,
                    clicks: 43_200,
                    spend: 20000.0,
                    conversions: 864,
                },
            },
            meta: PlatformConnection {
                name: "Meta",
                connected: true,
                last_sync: now,
                account_id: "act_7731045529",
                placements: vec![
                    summary("Feed", 3, 4),
                    summary("Stories", 2, 3),
                    summary("Reels", 1, 2),
                ],
                metrics: PlatformMetrics {
                    impressions: 840_000,
                    clicks: 33_600,
                    spend: 12500.0,
                    conversions: 672,
                },
            },
            linkedin: PlatformConnection {
                name: "LinkedIn",
                connected: true,
                last_sync: now,
                account_id: "LI-50821934",
                placements: vec![
                    summary("Sponsored Content", 2, 3),
                    summary("Message Ads", 1, 2),
                ],
                metrics: PlatformMetrics {
                    impressions: 480_000,
                    clicks: 19_200,
                    spend: 15000.0,
                    conversions: 311,
                },
            },
            glimmora: PlatformConnection {
                name: "Glimmora Reach",
                connected: true,
                last_sync: now,
                account_id: "GR-INTERNAL-001",
                placements: vec![
                    summary("Glimmora Display", 5, 8),
                    summary("Glimmora Native", 3, 5),
                    summary("Glimmora Search", 2, 4),
                ],
                metrics: PlatformMetrics {
                    impressions: 620_000,
                    clicks: 24_800,
                    spend: 8500.0,
                    conversions: 496,
                },
            },
        }
    }
}
