use async_trait::async_trait;

use crate::database::CampaignCollection;
use crate::error::Error;

use super::{Campaign, CampaignId};

#[async_trait]
pub trait CampaignStore: Send + Sync {
    async fn insert_campaign(&self, campaign: &Campaign) -> Result<(), Error>;

    async fn fetch_campaigns(&self) -> Result<Vec<Campaign>, Error>;

    async fn fetch_campaign_by_id(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Option<Campaign>, Error>;

    async fn update_campaign(&self, campaign: &Campaign) -> Result<bool, Error>;

    async fn delete_campaign(&self, campaign_id: CampaignId) -> Result<bool, Error>;

    async fn next_campaign_id(&self) -> Result<CampaignId, Error>;

    async fn seed_campaigns(&self, campaigns: &[Campaign]) -> Result<bool, Error>;
}

#[async_trait]
impl CampaignStore for CampaignCollection {
    #[tracing::instrument(skip(self))]
    async fn insert_campaign(&self, campaign: &Campaign) -> Result<(), Error> {
        self.insert_one(campaign).await
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_campaigns(&self) -> Result<Vec<Campaign>, Error> {
        self.find_all().await
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_campaign_by_id(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Option<Campaign>, Error> {
        self.find_one(|campaign| campaign.id == campaign_id).await
    }

    #[tracing::instrument(skip(self))]
    async fn update_campaign(&self, campaign: &Campaign) -> Result<bool, Error> {
        self.replace_one(campaign).await
    }

    #[tracing::instrument(skip(self))]
    async fn delete_campaign(&self, campaign_id: CampaignId) -> Result<bool, Error> {
        self.delete_one(&campaign_id.to_string()).await
    }

    #[tracing::instrument(skip(self))]
    async fn next_campaign_id(&self) -> Result<CampaignId, Error> {
        self.next_id().await
    }

    #[tracing::instrument(skip(self, campaigns))]
    async fn seed_campaigns(&self, campaigns: &[Campaign]) -> Result<bool, Error> {
        self.seed(campaigns).await
    }
}
