use async_trait::async_trait;

use crate::database::CreativeCollection;
use crate::error::Error;

use super::{Creative, CreativeId};

#[async_trait]
pub trait CreativeStore: Send + Sync {
    async fn insert_creative(&self, creative: &Creative) -> Result<(), Error>;

    async fn fetch_creatives(&self) -> Result<Vec<Creative>, Error>;

    async fn fetch_creative_by_id(
        &self,
        creative_id: CreativeId,
    ) -> Result<Option<Creative>, Error>;

    async fn delete_creative(&self, creative_id: CreativeId) -> Result<bool, Error>;

    async fn next_creative_id(&self) -> Result<CreativeId, Error>;

    async fn seed_creatives(&self, creatives: &[Creative]) -> Result<bool, Error>;
}

#[async_trait]
impl CreativeStore for CreativeCollection {
    #[tracing::instrument(skip(self))]
    async fn insert_creative(&self, creative: &Creative) -> Result<(), Error> {
        self.insert_one(creative).await
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_creatives(&self) -> Result<Vec<Creative>, Error> {
        self.find_all().await
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_creative_by_id(
        &self,
        creative_id: CreativeId,
    ) -> Result<Option<Creative>, Error> {
        self.find_one(|creative| creative.id == creative_id).await
    }

    #[tracing::instrument(skip(self))]
    async fn delete_creative(&self, creative_id: CreativeId) -> Result<bool, Error> {
        self.delete_one(&creative_id.to_string()).await
    }

    #[tracing::instrument(skip(self))]
    async fn next_creative_id(&self) -> Result<CreativeId, Error> {
        self.next_id().await
    }

    #[tracing::instrument(skip(self, creatives))]
    async fn seed_creatives(&self, creatives: &[Creative]) -> Result<bool, Error> {
        self.seed(creatives).await
    }
}
