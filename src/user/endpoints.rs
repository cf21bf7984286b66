use actix_web::post;
use actix_web::web::{Data, Json};
use actix_web::HttpResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::error::Error;

use super::{manager, Credentials, Registration, User};

/// A user as returned to clients, without the password.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    pub email: String,
    pub name: String,
    pub role: String,
    pub avatar: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl UserBody {
    pub fn render(user: User) -> UserBody {
        UserBody {
            email: user.email,
            name: user.name,
            role: user.role,
            avatar: user.avatar,
            company: user.company,
            created_at: user.created_at,
        }
    }
}

#[post("/api/auth/register")]
#[tracing::instrument(skip(db, body))]
pub async fn register(
    db: Data<Box<dyn Database>>,
    body: Json<Registration>,
) -> Result<HttpResponse, Error> {
    let user = manager::register_user(&***db, body.into_inner()).await?;

    Ok(HttpResponse::Created().json(UserBody::render(user)))
}

#[post("/api/auth/login")]
#[tracing::instrument(skip(db, body))]
pub async fn login(
    db: Data<Box<dyn Database>>,
    body: Json<Credentials>,
) -> Result<Json<UserBody>, Error> {
    let user = manager::login_user(&***db, body.into_inner()).await?;

    Ok(Json(UserBody::render(user)))
}
