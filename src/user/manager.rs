use chrono::Utc;

use crate::database::Database;
use crate::error::Error;
use crate::utils::non_empty;

use super::{avatar_initials, Credentials, Registration, User};

#[tracing::instrument(skip(db, registration), fields(email = %registration.email))]
pub async fn register_user(db: &dyn Database, registration: Registration) -> Result<User, Error> {
    if db
        .users()
        .find_user_by_email(&registration.email)
        .await?
        .is_some()
    {
        return Err(Error::EmailAlreadyRegistered {
            email: registration.email,
        });
    }

    let user = User {
        avatar: avatar_initials(&registration.name),
        email: registration.email,
        password: registration.password,
        name: registration.name,
        role: non_empty(registration.role).unwrap_or_else(|| "admin".to_string()),
        company: registration.company.unwrap_or_default(),
        created_at: Some(Utc::now()),
    };

    db.users().insert_user(&user).await?;

    Ok(user)
}

#[tracing::instrument(skip(db, credentials), fields(email = %credentials.email))]
pub async fn login_user(db: &dyn Database, credentials: Credentials) -> Result<User, Error> {
    let user = db
        .users()
        .find_user_by_email(&credentials.email)
        .await?
        .filter(|user| user.password == credentials.password)
        .ok_or(Error::InvalidCredentials)?;

    Ok(user)
}

#[tracing::instrument(skip(db))]
pub async fn get_user_by_email(db: &dyn Database, email: &str) -> Result<Option<User>, Error> {
    let user = db.users().fetch_user_by_email(email).await?;

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::ReachDatabase;

    fn registration(name: &str, email: &str) -> Registration {
        Registration {
            name: name.to_string(),
            email: email.to_string(),
            password: "hunter2".to_string(),
            company: None,
            role: None,
        }
    }

    #[tokio::test]
    async fn register_fills_defaults() {
        let db = ReachDatabase::in_memory();

        let user = register_user(&db, registration("ada lovelace", "ada@acme.io"))
            .await
            .unwrap();

        assert_eq!(user.avatar, "AL");
        assert_eq!(user.role, "admin");
        assert_eq!(user.company, "");
        assert!(user.created_at.is_some());
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email_ignoring_case() {
        let db = ReachDatabase::in_memory();
        register_user(&db, registration("Ada", "ada@acme.io"))
            .await
            .unwrap();

        let result = register_user(&db, registration("Other Ada", "ADA@Acme.io")).await;

        assert_eq!(
            result.unwrap_err(),
            Error::EmailAlreadyRegistered {
                email: "ADA@Acme.io".to_string()
            }
        );
    }

    #[tokio::test]
    async fn login_matches_email_ignoring_case() {
        let db = ReachDatabase::in_memory();
        register_user(&db, registration("Ada", "ada@acme.io"))
            .await
            .unwrap();

        let user = login_user(
            &db,
            Credentials {
                email: "Ada@ACME.io".to_string(),
                password: "hunter2".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(user.email, "ada@acme.io");
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let db = ReachDatabase::in_memory();
        register_user(&db, registration("Ada", "ada@acme.io"))
            .await
            .unwrap();

        let wrong_password = login_user(
            &db,
            Credentials {
                email: "ada@acme.io".to_string(),
                password: "Hunter2".to_string(),
            },
        )
        .await;
        let unknown_user = login_user(
            &db,
            Credentials {
                email: "bob@acme.io".to_string(),
                password: "hunter2".to_string(),
            },
        )
        .await;

        assert_eq!(wrong_password.unwrap_err(), Error::InvalidCredentials);
        assert_eq!(unknown_user.unwrap_err(), Error::InvalidCredentials);
    }
}
