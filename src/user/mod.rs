use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::Record;

pub mod db;
pub mod endpoints;
pub mod manager;

/// A registered account. Passwords are stored as given; this is demo data only.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for User {
    const COLLECTION: &'static str = "users";
    const KEY: &'static str = "email";

    fn key(&self) -> String {
        self.email.clone()
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Up to two uppercase initials, one per space separated word.
pub fn avatar_initials(name: &str) -> String {
    name.split(' ')
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}
