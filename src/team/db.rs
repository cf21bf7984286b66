use async_trait::async_trait;

use crate::database::TeamCollection;
use crate::error::Error;

use super::{TeamMember, TeamMemberId};

#[async_trait]
pub trait TeamStore: Send + Sync {
    async fn insert_member(&self, member: &TeamMember) -> Result<(), Error>;

    async fn fetch_members(&self) -> Result<Vec<TeamMember>, Error>;

    async fn delete_member(&self, member_id: TeamMemberId) -> Result<bool, Error>;

    async fn seed_members(&self, members: &[TeamMember]) -> Result<bool, Error>;
}

#[async_trait]
impl TeamStore for TeamCollection {
    #[tracing::instrument(skip(self))]
    async fn insert_member(&self, member: &TeamMember) -> Result<(), Error> {
        self.insert_one(member).await
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_members(&self) -> Result<Vec<TeamMember>, Error> {
        self.find_all().await
    }

    #[tracing::instrument(skip(self))]
    async fn delete_member(&self, member_id: TeamMemberId) -> Result<bool, Error> {
        self.delete_one(&member_id.to_string()).await
    }

    #[tracing::instrument(skip(self, members))]
    async fn seed_members(&self, members: &[TeamMember]) -> Result<bool, Error> {
        self.seed(members).await
    }
}
