use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::Record;
use crate::typedid::{TypedId, TypedIdMarker};

pub mod db;
pub mod endpoints;
pub mod manager;

/// Numbered by the millisecond the invitation was made.
pub type TeamMemberId = TypedId<TeamMember>;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: TeamMemberId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub company: String,
    pub status: MemberStatus,
    pub invited_by: String,
    pub invited_at: DateTime<Utc>,
}

impl TypedIdMarker for TeamMember {
    fn prefix() -> &'static str {
        "tm"
    }
}

impl Record for TeamMember {
    const COLLECTION: &'static str = "team";

    fn key(&self) -> String {
        self.id.to_string()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Invited,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Invitation {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
}
