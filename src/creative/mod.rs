use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::campaign::CampaignId;
use crate::database::Record;
use crate::scope::Owned;
use crate::typedid::{TypedId, TypedIdMarker};
use crate::utils::lenient_id;

pub mod db;
pub mod endpoints;
pub mod manager;

pub type CreativeId = TypedId<Creative>;

pub const PLACEHOLDER_THUMBNAIL: &str = "https://placehold.co/1200x628/6b4d3d/white?text=Creative";

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Creative {
    pub id: CreativeId,
    #[serde(default)]
    pub user_email: String,
    pub name: String,
    #[serde(rename = "type")]
    pub creative_type: String,
    pub format: String,
    pub dimensions: String,
    #[serde(default)]
    pub campaign_id: Option<CampaignId>,
    pub status: String,
    pub thumbnail: String,
    #[serde(default)]
    pub performance: Performance,
    #[serde(default)]
    pub metrics: CreativeMetrics,
    pub created_at: NaiveDate,
}

impl TypedIdMarker for Creative {
    fn prefix() -> &'static str {
        "cr"
    }
}

impl Record for Creative {
    const COLLECTION: &'static str = "creatives";

    fn key(&self) -> String {
        self.id.to_string()
    }
}

impl Owned for Creative {
    fn owner(&self) -> &str {
        &self.user_email
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Performance {
    New,
    Low,
    Medium,
    High,
}

impl Default for Performance {
    fn default() -> Performance {
        Performance::New
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CreativeMetrics {
    pub impressions: u64,
    pub clicks: u64,
    pub ctr: f64,
    pub conversions: u64,
}

/// The fields accepted when creating a creative. Anything missing is defaulted.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreativeDraft {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub creative_type: Option<String>,
    pub format: Option<String>,
    pub dimensions: Option<String>,
    #[serde(deserialize_with = "lenient_id")]
    pub campaign_id: Option<CampaignId>,
    pub thumbnail: Option<String>,
}
