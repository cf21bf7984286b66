use chrono::Utc;

use crate::database::Database;
use crate::error::Error;
use crate::placement;
use crate::scope::Scope;
use crate::utils::non_empty;

use super::{
    Bidding, Budget, BudgetType, Campaign, CampaignDraft, CampaignId, CampaignMetrics,
    CampaignPatch, CampaignStatus, Objective, PlatformKey, Schedule, Targeting,
};

const DEFAULT_TOTAL_BUDGET: f64 = 5000.0;
const DEFAULT_DAILY_BUDGET: f64 = 500.0;

fn parse_status(status: &str) -> Result<CampaignStatus, Error> {
    status.parse().map_err(|_| Error::InvalidCampaignStatus {
        status: status.to_string(),
    })
}

/// The first amount that is given and non-zero.
fn first_amount(amounts: &[Option<f64>]) -> Option<f64> {
    amounts.iter().flatten().copied().find(|amount| *amount != 0.0)
}

/// Ages beyond `u32` saturate.
fn age(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[tracing::instrument(skip(db))]
pub async fn get_campaigns(
    db: &dyn Database,
    scope: &Scope,
    status: Option<&str>,
) -> Result<Vec<Campaign>, Error> {
    let campaigns = scope.filter(db.campaigns().fetch_campaigns().await?);

    let campaigns = match status.filter(|status| !status.is_empty() && *status != "all") {
        Some(status) => campaigns
            .into_iter()
            .filter(|campaign| campaign.status.as_str() == status)
            .collect(),
        None => campaigns,
    };

    Ok(campaigns)
}

#[tracing::instrument(skip(db))]
pub async fn get_campaign_by_id(
    db: &dyn Database,
    scope: &Scope,
    campaign_id: CampaignId,
) -> Result<Campaign, Error> {
    let campaign = db
        .campaigns()
        .fetch_campaign_by_id(campaign_id)
        .await?
        .filter(|campaign| scope.can_see(&campaign.user_email))
        .ok_or(Error::CampaignNotFound { campaign_id })?;

    Ok(campaign)
}

#[tracing::instrument(skip(db))]
pub async fn create_campaign(
    db: &dyn Database,
    scope: &Scope,
    draft: CampaignDraft,
) -> Result<Campaign, Error> {
    let status = match non_empty(draft.status) {
        Some(status) => parse_status(&status)?,
        None => CampaignStatus::Active,
    };

    let amount = first_amount(&[draft.budget_amount, draft.budget, draft.daily_budget]);
    let budget_type = non_empty(draft.budget_type)
        .map(BudgetType::from)
        .unwrap_or_default();
    let daily = match budget_type {
        BudgetType::Daily => amount.unwrap_or(DEFAULT_DAILY_BUDGET),
        _ => {
            let total = first_amount(&[draft.budget_amount, draft.budget]);
            (total.unwrap_or(DEFAULT_TOTAL_BUDGET) / 30.0).round()
        }
    };

    let age_min = draft.age_min.filter(|age| *age != 0).unwrap_or(18);
    let age_max = draft.age_max.filter(|age| *age != 0).unwrap_or(55);

    let today = Utc::now().date_naive();
    let campaign = Campaign {
        id: db.campaigns().next_campaign_id().await?,
        user_email: scope.owner(),
        name: non_empty(draft.name).unwrap_or_else(|| "Untitled Campaign".to_string()),
        status,
        objective: non_empty(draft.objective)
            .map(Objective::from)
            .unwrap_or(Objective::Awareness),
        platforms: draft.platforms.unwrap_or_else(|| vec![PlatformKey::Glimmora]),
        campaign_type: non_empty(draft.campaign_type).unwrap_or_else(|| "display".to_string()),
        ad_copy: draft.ad_copy.unwrap_or_default(),
        description: draft.description.unwrap_or_default(),
        target_url: draft.target_url.unwrap_or_default(),
        budget: Budget {
            total: amount.unwrap_or(DEFAULT_TOTAL_BUDGET),
            spent: 0.0,
            daily,
            budget_type,
        },
        schedule: Schedule {
            start: non_empty(draft.start_date).unwrap_or_else(|| today.to_string()),
            end: draft.end_date.unwrap_or_default(),
        },
        targeting: Targeting {
            age_range: [age(age_min), age(age_max)],
            gender: non_empty(draft.gender).unwrap_or_else(|| "all".to_string()),
            locations: draft.locations.unwrap_or_default(),
            interests: draft.interests.unwrap_or_default(),
        },
        bidding: Bidding {
            strategy: non_empty(draft.bidding_strategy).unwrap_or_else(|| "cpc".to_string()),
            ..Bidding::default()
        },
        metrics: Some(CampaignMetrics::default()),
        created_at: today,
    };

    db.campaigns().insert_campaign(&campaign).await?;
    placement::manager::create_placements_for_campaign(db, &campaign).await?;

    Ok(campaign)
}

#[tracing::instrument(skip(db))]
pub async fn update_campaign(
    db: &dyn Database,
    scope: &Scope,
    campaign_id: CampaignId,
    patch: CampaignPatch,
) -> Result<Campaign, Error> {
    let mut campaign = get_campaign_by_id(db, scope, campaign_id).await?;

    if let Some(name) = non_empty(patch.name) {
        campaign.name = name;
    }
    if let Some(objective) = non_empty(patch.objective) {
        campaign.objective = Objective::from(objective);
    }
    if let Some(platforms) = patch.platforms {
        campaign.platforms = platforms;
    }
    if let Some(ad_copy) = patch.ad_copy {
        campaign.ad_copy = ad_copy;
    }
    if let Some(description) = patch.description {
        campaign.description = description;
    }
    if let Some(target_url) = patch.target_url {
        campaign.target_url = target_url;
    }

    if let Some(amount) = first_amount(&[patch.budget_amount, patch.budget]) {
        if let Some(budget_type) = non_empty(patch.budget_type) {
            campaign.budget.budget_type = BudgetType::from(budget_type);
        }
        campaign.budget.set_total(amount);
    }

    if let Some(start) = non_empty(patch.start_date) {
        campaign.schedule.start = start;
    }
    if let Some(end) = non_empty(patch.end_date) {
        campaign.schedule.end = end;
    }

    if let Some(targeting) = patch.targeting {
        campaign.targeting.merge(targeting);
    }

    save_campaign(db, &campaign).await?;

    Ok(campaign)
}

#[tracing::instrument(skip(db))]
pub async fn update_campaign_status(
    db: &dyn Database,
    scope: &Scope,
    campaign_id: CampaignId,
    status: Option<String>,
) -> Result<Campaign, Error> {
    let mut campaign = get_campaign_by_id(db, scope, campaign_id).await?;

    campaign.status = parse_status(status.as_deref().unwrap_or_default())?;
    save_campaign(db, &campaign).await?;

    Ok(campaign)
}

#[tracing::instrument(skip(db))]
pub async fn delete_campaign(
    db: &dyn Database,
    scope: &Scope,
    campaign_id: CampaignId,
) -> Result<(), Error> {
    get_campaign_by_id(db, scope, campaign_id).await?;

    if !db.campaigns().delete_campaign(campaign_id).await? {
        return Err(Error::CampaignNotFound { campaign_id });
    }

    Ok(())
}

async fn save_campaign(db: &dyn Database, campaign: &Campaign) -> Result<(), Error> {
    if !db.campaigns().update_campaign(campaign).await? {
        return Err(Error::CampaignNotFound {
            campaign_id: campaign.id,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::TargetingPatch;
    use crate::database::ReachDatabase;
    use crate::placement::PlacementFilter;
    use crate::scope::ScopePolicy;

    fn scope(caller: &str) -> Scope {
        Scope::new(
            Some(caller.to_string()),
            ScopePolicy::new(Some("glimmora.com".to_string())),
        )
    }

    #[tokio::test]
    async fn create_campaign_fills_defaults() {
        let db = ReachDatabase::in_memory();

        let campaign = create_campaign(&db, &scope("owner@acme.io"), CampaignDraft::default())
            .await
            .unwrap();

        assert_eq!(campaign.id.to_string(), "camp-001");
        assert_eq!(campaign.user_email, "owner@acme.io");
        assert_eq!(campaign.name, "Untitled Campaign");
        assert_eq!(campaign.status, CampaignStatus::Active);
        assert_eq!(campaign.objective, Objective::Awareness);
        assert_eq!(campaign.platforms, vec![PlatformKey::Glimmora]);
        assert_eq!(campaign.campaign_type, "display");
        assert_eq!(campaign.budget.total, 5000.0);
        assert_eq!(campaign.budget.daily, 500.0);
        assert_eq!(campaign.budget.budget_type, BudgetType::Daily);
        assert_eq!(campaign.schedule.start, campaign.created_at.to_string());
        assert_eq!(campaign.schedule.end, "");
        assert_eq!(campaign.targeting, Targeting::default());
        assert_eq!(campaign.bidding, Bidding::default());
        assert_eq!(campaign.metrics, Some(CampaignMetrics::default()));
    }

    #[tokio::test]
    async fn lifetime_budget_derives_daily_from_total() {
        let db = ReachDatabase::in_memory();
        let draft = CampaignDraft {
            budget_amount: Some(9000.0),
            budget_type: Some("lifetime".to_string()),
            ..CampaignDraft::default()
        };

        let campaign = create_campaign(&db, &scope("owner@acme.io"), draft)
            .await
            .unwrap();

        assert_eq!(campaign.budget.total, 9000.0);
        assert_eq!(campaign.budget.daily, 300.0);
    }

    #[tokio::test]
    async fn daily_budget_falls_back_to_daily_amount() {
        let db = ReachDatabase::in_memory();
        let draft = CampaignDraft {
            budget_amount: Some(0.0),
            daily_budget: Some(250.0),
            budget_type: Some("daily".to_string()),
            ..CampaignDraft::default()
        };

        let campaign = create_campaign(&db, &scope("owner@acme.io"), draft)
            .await
            .unwrap();

        assert_eq!(campaign.budget.total, 250.0);
        assert_eq!(campaign.budget.daily, 250.0);
    }

    #[tokio::test]
    async fn oversized_ages_saturate() {
        let db = ReachDatabase::in_memory();
        let draft = CampaignDraft {
            age_min: Some(21),
            age_max: Some(4_294_967_297),
            ..CampaignDraft::default()
        };

        let campaign = create_campaign(&db, &scope("owner@acme.io"), draft)
            .await
            .unwrap();

        assert_eq!(campaign.targeting.age_range, [21, u32::MAX]);
    }

    #[tokio::test]
    async fn create_campaign_rejects_unknown_status() {
        let db = ReachDatabase::in_memory();
        let draft = CampaignDraft {
            status: Some("archived".to_string()),
            ..CampaignDraft::default()
        };

        let result = create_campaign(&db, &scope("owner@acme.io"), draft).await;

        assert_eq!(
            result.unwrap_err(),
            Error::InvalidCampaignStatus {
                status: "archived".to_string()
            }
        );
    }

    #[tokio::test]
    async fn campaign_ids_are_sequential() {
        let db = ReachDatabase::in_memory();
        let owner = scope("owner@acme.io");

        let first = create_campaign(&db, &owner, CampaignDraft::default())
            .await
            .unwrap();
        let second = create_campaign(&db, &owner, CampaignDraft::default())
            .await
            .unwrap();

        assert_eq!(first.id.to_string(), "camp-001");
        assert_eq!(second.id.to_string(), "camp-002");
    }

    #[tokio::test]
    async fn get_campaigns_filters_by_status() {
        let db = ReachDatabase::in_memory();
        let owner = scope("owner@acme.io");
        create_campaign(&db, &owner, CampaignDraft::default())
            .await
            .unwrap();
        let paused = CampaignDraft {
            status: Some("paused".to_string()),
            ..CampaignDraft::default()
        };
        create_campaign(&db, &owner, paused).await.unwrap();

        let all = get_campaigns(&db, &owner, Some("all")).await.unwrap();
        let unfiltered = get_campaigns(&db, &owner, None).await.unwrap();
        let paused = get_campaigns(&db, &owner, Some("paused")).await.unwrap();
        let bogus = get_campaigns(&db, &owner, Some("bogus")).await.unwrap();

        assert_eq!(all.len(), 2);
        assert_eq!(unfiltered.len(), 2);
        assert_eq!(paused.len(), 1);
        assert_eq!(paused[0].status, CampaignStatus::Paused);
        assert!(bogus.is_empty());
    }

    #[tokio::test]
    async fn campaigns_are_hidden_from_other_callers() {
        let db = ReachDatabase::in_memory();
        let campaign = create_campaign(&db, &scope("owner@acme.io"), CampaignDraft::default())
            .await
            .unwrap();

        let result = get_campaign_by_id(&db, &scope("intruder@acme.io"), campaign.id).await;
        let listed = get_campaigns(&db, &scope("intruder@acme.io"), None)
            .await
            .unwrap();

        assert_eq!(
            result.unwrap_err(),
            Error::CampaignNotFound {
                campaign_id: campaign.id
            }
        );
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn demo_domain_callers_share_campaigns() {
        let db = ReachDatabase::in_memory();
        let campaign = create_campaign(
            &db,
            &scope("admin@glimmora.com"),
            CampaignDraft::default(),
        )
        .await
        .unwrap();

        let found = get_campaign_by_id(&db, &scope("analyst@glimmora.com"), campaign.id)
            .await
            .unwrap();

        assert_eq!(found.id, campaign.id);
    }

    #[tokio::test]
    async fn update_campaign_merges_patch() {
        let db = ReachDatabase::in_memory();
        let owner = scope("owner@acme.io");
        let draft = CampaignDraft {
            name: Some("Spring Sale".to_string()),
            locations: Some(vec!["US".to_string()]),
            end_date: Some("2025-12-31".to_string()),
            ..CampaignDraft::default()
        };
        let campaign = create_campaign(&db, &owner, draft).await.unwrap();

        let patch = CampaignPatch {
            name: Some(String::new()),
            objective: Some("conversion".to_string()),
            description: Some("Now with more spring".to_string()),
            budget: Some(3000.0),
            budget_type: Some("lifetime".to_string()),
            start_date: Some("2025-11-01".to_string()),
            targeting: Some(TargetingPatch {
                gender: Some("female".to_string()),
                ..TargetingPatch::default()
            }),
            ..CampaignPatch::default()
        };
        let updated = update_campaign(&db, &owner, campaign.id, patch)
            .await
            .unwrap();

        assert_eq!(updated.name, "Spring Sale");
        assert_eq!(updated.objective, Objective::Conversion);
        assert_eq!(updated.description, "Now with more spring");
        assert_eq!(updated.budget.total, 3000.0);
        assert_eq!(updated.budget.daily, 100.0);
        assert_eq!(updated.budget.budget_type, BudgetType::Lifetime);
        assert_eq!(updated.schedule.start, "2025-11-01");
        assert_eq!(updated.schedule.end, "2025-12-31");
        assert_eq!(updated.targeting.gender, "female");
        assert_eq!(updated.targeting.locations, vec!["US".to_string()]);

        let stored = get_campaign_by_id(&db, &owner, campaign.id).await.unwrap();
        assert_eq!(stored.budget, updated.budget);
    }

    #[tokio::test]
    async fn update_status_validates_value() {
        let db = ReachDatabase::in_memory();
        let owner = scope("owner@acme.io");
        let campaign = create_campaign(&db, &owner, CampaignDraft::default())
            .await
            .unwrap();

        let invalid =
            update_campaign_status(&db, &owner, campaign.id, Some("finished".to_string())).await;
        let missing = update_campaign_status(&db, &owner, campaign.id, None).await;
        let paused = update_campaign_status(&db, &owner, campaign.id, Some("paused".to_string()))
            .await
            .unwrap();

        assert_eq!(
            invalid.unwrap_err(),
            Error::InvalidCampaignStatus {
                status: "finished".to_string()
            }
        );
        assert_eq!(
            missing.unwrap_err(),
            Error::InvalidCampaignStatus {
                status: String::new()
            }
        );
        assert_eq!(paused.status, CampaignStatus::Paused);
    }

    #[tokio::test]
    async fn update_status_of_missing_campaign_is_not_found() {
        let db = ReachDatabase::in_memory();
        let campaign_id = CampaignId::new(42);

        let result = update_campaign_status(
            &db,
            &scope("owner@acme.io"),
            campaign_id,
            Some("bogus".to_string()),
        )
        .await;

        assert_eq!(result.unwrap_err(), Error::CampaignNotFound { campaign_id });
    }

    #[tokio::test]
    async fn delete_campaign_leaves_placements() {
        let db = ReachDatabase::in_memory();
        let owner = scope("owner@acme.io");
        let campaign = create_campaign(&db, &owner, CampaignDraft::default())
            .await
            .unwrap();

        delete_campaign(&db, &owner, campaign.id).await.unwrap();

        let result = get_campaign_by_id(&db, &owner, campaign.id).await;
        let again = delete_campaign(&db, &owner, campaign.id).await;
        let placements =
            placement::manager::get_placements(&db, &owner, &PlacementFilter::default())
                .await
                .unwrap();

        assert!(result.is_err());
        assert_eq!(
            again.unwrap_err(),
            Error::CampaignNotFound {
                campaign_id: campaign.id
            }
        );
        assert_eq!(placements.len(), 2);
    }
}
