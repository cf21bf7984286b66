use async_trait::async_trait;

use crate::database::PlacementCollection;
use crate::error::Error;

use super::{Placement, PlacementId};

#[async_trait]
pub trait PlacementStore: Send + Sync {
    async fn insert_placements(&self, placements: &[Placement]) -> Result<(), Error>;

    async fn fetch_placements(&self) -> Result<Vec<Placement>, Error>;

    async fn next_placement_id(&self) -> Result<PlacementId, Error>;

    async fn seed_placements(&self, placements: &[Placement]) -> Result<bool, Error>;
}

#[async_trait]
impl PlacementStore for PlacementCollection {
    #[tracing::instrument(skip(self, placements))]
    async fn insert_placements(&self, placements: &[Placement]) -> Result<(), Error> {
        self.insert_many(placements).await
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_placements(&self) -> Result<Vec<Placement>, Error> {
        self.find_all().await
    }

    #[tracing::instrument(skip(self))]
    async fn next_placement_id(&self) -> Result<PlacementId, Error> {
        self.next_id().await
    }

    #[tracing::instrument(skip(self, placements))]
    async fn seed_placements(&self, placements: &[Placement]) -> Result<bool, Error> {
        self.seed(placements).await
    }
}
