use chrono::Utc;

use crate::database::Database;
use crate::error::Error;
use crate::scope::Scope;
use crate::user;
use crate::utils::non_empty;

use super::{Invitation, MemberStatus, TeamMember, TeamMemberId};

/// Members invited to the caller's company. Unknown callers have no team.
#[tracing::instrument(skip(db))]
pub async fn get_team(db: &dyn Database, scope: &Scope) -> Result<Vec<TeamMember>, Error> {
    let caller = match scope.caller() {
        Some(caller) => user::manager::get_user_by_email(db, caller).await?,
        None => None,
    };

    let company = match caller {
        Some(caller) if !caller.company.is_empty() => caller.company,
        _ => return Ok(vec![]),
    };

    let members = db
        .team()
        .fetch_members()
        .await?
        .into_iter()
        .filter(|member| member.company == company)
        .collect();

    Ok(members)
}

#[tracing::instrument(skip(db))]
pub async fn invite_member(
    db: &dyn Database,
    scope: &Scope,
    invitation: Invitation,
) -> Result<TeamMember, Error> {
    let caller_email = scope.owner();
    let caller = user::manager::get_user_by_email(db, &caller_email)
        .await?
        .ok_or_else(|| Error::CallerNotRegistered {
            email: caller_email.clone(),
        })?;

    let members = db.team().fetch_members().await?;
    let email = invitation.email.to_lowercase();
    let already_invited = members
        .iter()
        .any(|member| member.email.to_lowercase() == email && member.company == caller.company);
    if already_invited {
        return Err(Error::TeamMemberAlreadyInvited {
            email: invitation.email,
            company: caller.company,
        });
    }

    let now = Utc::now();
    let newest = members.iter().map(|member| member.id.number()).max();
    let millis = now.timestamp_millis().max(0) as u64;
    let id = match newest {
        Some(newest) if newest >= millis => TeamMemberId::new(newest + 1),
        _ => TeamMemberId::new(millis),
    };

    let member = TeamMember {
        id,
        name: invitation.name,
        email: invitation.email,
        role: non_empty(invitation.role).unwrap_or_else(|| "viewer".to_string()),
        company: caller.company,
        status: MemberStatus::Invited,
        invited_by: caller_email,
        invited_at: now,
    };

    db.team().insert_member(&member).await?;

    Ok(member)
}

#[tracing::instrument(skip(db))]
pub async fn remove_member(db: &dyn Database, member_id: TeamMemberId) -> Result<(), Error> {
    if !db.team().delete_member(member_id).await? {
        return Err(Error::TeamMemberNotFound { member_id });
    }

    Ok(())
}
