use actix_web::web::{Data, Json, Path};
use actix_web::{delete, get, post, HttpResponse};

use crate::database::Database;
use crate::error::Error;
use crate::scope::Scope;
use crate::utils::SuccessBody;

use super::{manager, Invitation, TeamMember, TeamMemberId};

#[get("/api/team")]
#[tracing::instrument(skip(db))]
pub async fn get_team(
    db: Data<Box<dyn Database>>,
    scope: Scope,
) -> Result<Json<Vec<TeamMember>>, Error> {
    let members = manager::get_team(&***db, &scope).await?;

    Ok(Json(members))
}

#[post("/api/team")]
#[tracing::instrument(skip(db))]
pub async fn invite_member(
    db: Data<Box<dyn Database>>,
    scope: Scope,
    body: Json<Invitation>,
) -> Result<HttpResponse, Error> {
    let member = manager::invite_member(&***db, &scope, body.into_inner()).await?;

    Ok(HttpResponse::Created().json(member))
}

#[delete("/api/team/{member_id}")]
#[tracing::instrument(skip(db))]
pub async fn remove_member(
    db: Data<Box<dyn Database>>,
    params: Path<TeamMemberId>,
) -> Result<Json<SuccessBody>, Error> {
    let member_id = params.into_inner();
    manager::remove_member(&***db, member_id).await?;

    Ok(Json(SuccessBody::new("Team member removed")))
}
