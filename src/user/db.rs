use async_trait::async_trait;

use crate::database::UserCollection;
use crate::error::Error;

use super::User;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert_user(&self, user: &User) -> Result<(), Error>;

    /// Exact match on the stored email.
    async fn fetch_user_by_email(&self, email: &str) -> Result<Option<User>, Error>;

    /// Case-insensitive match on the stored email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, Error>;

    async fn seed_users(&self, users: &[User]) -> Result<bool, Error>;
}

#[async_trait]
impl UserStore for UserCollection {
    #[tracing::instrument(skip(self, user))]
    async fn insert_user(&self, user: &User) -> Result<(), Error> {
        self.insert_one(user).await
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_user_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        self.find_one(|user| user.email == email).await
    }

    #[tracing::instrument(skip(self))]
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        let email = email.to_lowercase();
        self.find_one(move |user| user.email.to_lowercase() == email)
            .await
    }

    #[tracing::instrument(skip(self, users))]
    async fn seed_users(&self, users: &[User]) -> Result<bool, Error> {
        self.seed(users).await
    }
}
