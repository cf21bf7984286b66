use std::fmt::{self, Display};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::database::Record;
use crate::scope::Owned;
use crate::typedid::{TypedId, TypedIdMarker};
use crate::utils::{lenient_count, lenient_number};

pub mod db;
pub mod endpoints;
pub mod manager;

pub type CampaignId = TypedId<Campaign>;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: CampaignId,
    #[serde(default)]
    pub user_email: String,
    pub name: String,
    pub status: CampaignStatus,
    pub objective: Objective,
    #[serde(default)]
    pub platforms: Vec<PlatformKey>,
    #[serde(default)]
    pub campaign_type: String,
    #[serde(default)]
    pub ad_copy: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub target_url: String,
    #[serde(default)]
    pub budget: Budget,
    #[serde(default)]
    pub schedule: Schedule,
    #[serde(default)]
    pub targeting: Targeting,
    #[serde(default)]
    pub bidding: Bidding,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<CampaignMetrics>,
    pub created_at: NaiveDate,
}

impl TypedIdMarker for Campaign {
    fn prefix() -> &'static str {
        "camp"
    }
}

impl Record for Campaign {
    const COLLECTION: &'static str = "campaigns";

    fn key(&self) -> String {
        self.id.to_string()
    }
}

impl Owned for Campaign {
    fn owner(&self) -> &str {
        &self.user_email
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Active,
    Paused,
    Completed,
    Draft,
}

impl CampaignStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Active => "active",
            CampaignStatus::Paused => "paused",
            CampaignStatus::Completed => "completed",
            CampaignStatus::Draft => "draft",
        }
    }
}

impl FromStr for CampaignStatus {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(CampaignStatus::Active),
            "paused" => Ok(CampaignStatus::Paused),
            "completed" => Ok(CampaignStatus::Completed),
            "draft" => Ok(CampaignStatus::Draft),
            _ => Err(()),
        }
    }
}

impl Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The marketing goal of a campaign. Unrecognized goals are kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum Objective {
    Awareness,
    Consideration,
    Conversion,
    Other(String),
}

impl Objective {
    pub fn as_str(&self) -> &str {
        match self {
            Objective::Awareness => "awareness",
            Objective::Consideration => "consideration",
            Objective::Conversion => "conversion",
            Objective::Other(other) => other,
        }
    }
}

impl From<String> for Objective {
    fn from(s: String) -> Objective {
        match s.as_str() {
            "awareness" => Objective::Awareness,
            "consideration" => Objective::Consideration,
            "conversion" => Objective::Conversion,
            _ => Objective::Other(s),
        }
    }
}

impl From<Objective> for String {
    fn from(objective: Objective) -> String {
        match objective {
            Objective::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ad network a campaign runs on. Unrecognized keys are kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum PlatformKey {
    Glimmora,
    Google,
    Meta,
    Linkedin,
    Other(String),
}

impl PlatformKey {
    pub fn as_str(&self) -> &str {
        match self {
            PlatformKey::Glimmora => "glimmora",
            PlatformKey::Google => "google",
            PlatformKey::Meta => "meta",
            PlatformKey::Linkedin => "linkedin",
            PlatformKey::Other(other) => other,
        }
    }

    /// The placement network name and the placement types created for it.
    pub fn placement_types(&self) -> Option<(&'static str, [&'static str; 2])> {
        match self {
            PlatformKey::Glimmora => Some(("Glimmora", ["Display", "Native"])),
            PlatformKey::Google => Some(("Google", ["Search", "Display"])),
            PlatformKey::Meta => Some(("Meta", ["Feed", "Stories"])),
            PlatformKey::Linkedin => Some(("LinkedIn", ["Sponsored Content", "Message Ads"])),
            PlatformKey::Other(_) => None,
        }
    }
}

impl From<String> for PlatformKey {
    fn from(s: String) -> PlatformKey {
        match s.as_str() {
            "glimmora" => PlatformKey::Glimmora,
            "google" => PlatformKey::Google,
            "meta" => PlatformKey::Meta,
            "linkedin" => PlatformKey::Linkedin,
            _ => PlatformKey::Other(s),
        }
    }
}

impl From<PlatformKey> for String {
    fn from(key: PlatformKey) -> String {
        match key {
            PlatformKey::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum BudgetType {
    Daily,
    Lifetime,
    Other(String),
}

impl Default for BudgetType {
    fn default() -> BudgetType {
        BudgetType::Daily
    }
}

impl From<String> for BudgetType {
    fn from(s: String) -> BudgetType {
        match s.as_str() {
            "daily" => BudgetType::Daily,
            "lifetime" => BudgetType::Lifetime,
            _ => BudgetType::Other(s),
        }
    }
}

impl From<BudgetType> for String {
    fn from(budget_type: BudgetType) -> String {
        match budget_type {
            BudgetType::Daily => "daily".to_string(),
            BudgetType::Lifetime => "lifetime".to_string(),
            BudgetType::Other(other) => other,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Budget {
    pub total: f64,
    pub spent: f64,
    pub daily: f64,
    #[serde(rename = "type")]
    pub budget_type: BudgetType,
}

impl Budget {
    /// A budget of `total` with nothing spent yet.
    pub fn new(total: f64, budget_type: BudgetType) -> Budget {
        let mut budget = Budget {
            total: 0.0,
            spent: 0.0,
            daily: 0.0,
            budget_type,
        };
        budget.set_total(total);
        budget
    }

    /// Non-daily budgets spread the total over thirty days.
    pub fn set_total(&mut self, total: f64) {
        self.total = total;
        self.daily = match self.budget_type {
            BudgetType::Daily => total,
            _ => (total / 30.0).round(),
        };
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Schedule {
    pub start: String,
    pub end: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Targeting {
    pub age_range: [u32; 2],
    pub gender: String,
    pub locations: Vec<String>,
    pub interests: Vec<String>,
}

impl Default for Targeting {
    fn default() -> Targeting {
        Targeting {
            age_range: [18, 55],
            gender: "all".to_string(),
            locations: vec![],
            interests: vec![],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Bidding {
    pub strategy: String,
    pub max_bid: f64,
}

impl Default for Bidding {
    fn default() -> Bidding {
        Bidding {
            strategy: "cpc".to_string(),
            max_bid: 2.50,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CampaignMetrics {
    pub impressions: u64,
    pub clicks: u64,
    pub ctr: f64,
    pub conversions: u64,
    pub cpa: f64,
    pub spend: f64,
    pub roas: f64,
}

/// The fields accepted when creating a campaign. Anything missing is defaulted.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CampaignDraft {
    pub name: Option<String>,
    pub status: Option<String>,
    pub objective: Option<String>,
    pub platforms: Option<Vec<PlatformKey>>,
    pub campaign_type: Option<String>,
    pub ad_copy: Option<String>,
    pub description: Option<String>,
    pub target_url: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub budget_amount: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub budget: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub daily_budget: Option<f64>,
    pub budget_type: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(deserialize_with = "lenient_count")]
    pub age_min: Option<u64>,
    #[serde(deserialize_with = "lenient_count")]
    pub age_max: Option<u64>,
    pub gender: Option<String>,
    pub locations: Option<Vec<String>>,
    pub interests: Option<Vec<String>>,
    pub bidding_strategy: Option<String>,
}

/// The fields accepted when updating a campaign. Anything missing is left as is.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CampaignPatch {
    pub name: Option<String>,
    pub objective: Option<String>,
    pub platforms: Option<Vec<PlatformKey>>,
    pub ad_copy: Option<String>,
    pub description: Option<String>,
    pub target_url: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub budget_amount: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub budget: Option<f64>,
    pub budget_type: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub targeting: Option<TargetingPatch>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TargetingPatch {
    pub age_range: Option<[u32; 2]>,
    pub gender: Option<String>,
    pub locations: Option<Vec<String>>,
    pub interests: Option<Vec<String>>,
}

impl Targeting {
    pub fn merge(&mut self, patch: TargetingPatch) {
        if let Some(age_range) = patch.age_range {
            self.age_range = age_range;
        }
        if let Some(gender) = patch.gender {
            self.gender = gender;
        }
        if let Some(locations) = patch.locations {
            self.locations = locations;
        }
        if let Some(interests) = patch.interests {
            self.interests = interests;
        }
    }
}
