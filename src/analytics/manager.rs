use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::Rng;

use crate::campaign::{self, CampaignStatus};
use crate::database::Database;
use crate::error::Error;
use crate::scope::Scope;
use crate::utils::round2;

use super::{
    Attribution, Dashboard, DailyMetrics, Funnel, PlatformPerformance, ATTRIBUTION_MODELS, FUNNEL,
    PLATFORM_COMPARISON, PLATFORM_DISTRIBUTION,
};

const BASE_IMPRESSIONS: f64 = 75_000.0;
const BASE_CLICKS: f64 = 3_000.0;
const BASE_CONVERSIONS: f64 = 55.0;
const BASE_SPEND: f64 = 1_200.0;

const DASHBOARD_DAYS: usize = 7;

pub fn series_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 1).unwrap_or(NaiveDate::MIN)
}

fn weekend_factor(date: NaiveDate) -> f64 {
    match date.weekday() {
        Weekday::Sat | Weekday::Sun => 0.75,
        _ => 1.1,
    }
}

/// Daily delivery for `days` days from the series start, trending upward
/// by up to 15% over the period.
pub fn generate_time_series<R: Rng>(days: usize, rng: &mut R) -> Vec<DailyMetrics> {
    let start = series_start();

    (0..days)
        .map(|i| {
            let date = start + Duration::days(i as i64);
            let trend = 1.0 + (i as f64 / days as f64) * 0.15;
            let jitter = 0.85 + rng.gen::<f64>() * 0.3;
            let factor = weekend_factor(date) * trend * jitter;

            let impressions = (BASE_IMPRESSIONS * factor).round() as u64;
            let clicks = (BASE_CLICKS * factor).round() as u64;
            let conversions = (BASE_CONVERSIONS * factor).round() as u64;
            let spend = round2(BASE_SPEND * factor);

            let ctr = if impressions > 0 {
                round2(clicks as f64 / impressions as f64 * 100.0)
            } else {
                0.0
            };
            let cpc = if clicks > 0 {
                round2(spend / clicks as f64)
            } else {
                0.0
            };

            DailyMetrics {
                date,
                impressions,
                clicks,
                conversions,
                spend,
                ctr,
                cpc,
            }
        })
        .collect()
}

pub fn get_funnel() -> Funnel {
    FUNNEL
}

pub fn get_platform_comparison() -> Vec<PlatformPerformance> {
    PLATFORM_COMPARISON.to_vec()
}

/// Unknown models fall back to last click.
pub fn get_attribution(model: Option<&str>) -> Attribution {
    let model = model.unwrap_or("last_click");

    ATTRIBUTION_MODELS
        .iter()
        .find(|(key, _)| *key == model)
        .unwrap_or(&ATTRIBUTION_MODELS[0])
        .1
        .clone()
}

#[tracing::instrument(skip(db, rng))]
pub async fn get_dashboard<R: Rng>(
    db: &dyn Database,
    scope: &Scope,
    rng: &mut R,
) -> Result<Dashboard, Error> {
    let campaigns = campaign::manager::get_campaigns(db, scope, None).await?;

    let active_campaigns = campaigns
        .iter()
        .filter(|campaign| campaign.status == CampaignStatus::Active)
        .count();
    let total_budget: f64 = campaigns.iter().map(|campaign| campaign.budget.total).sum();
    let total_spent: f64 = campaigns.iter().map(|campaign| campaign.budget.spent).sum();
    let total_impressions = campaigns
        .iter()
        .filter_map(|campaign| campaign.metrics.as_ref())
        .map(|metrics| metrics.impressions)
        .sum();
    let total_conversions = campaigns
        .iter()
        .filter_map(|campaign| campaign.metrics.as_ref())
        .map(|metrics| metrics.conversions)
        .sum();

    let budget_utilization = if total_budget > 0.0 {
        (total_spent / total_budget * 100.0).round() as u32
    } else {
        0
    };

    let growth = |value: f64| if campaigns.is_empty() { 0.0 } else { value };

    Ok(Dashboard {
        active_campaigns,
        active_campaigns_growth: growth(12.5),
        total_budget,
        total_spent,
        budget_utilization,
        total_impressions,
        impressions_growth: growth(8.3),
        total_conversions,
        conversions_growth: growth(15.2),
        recent_campaigns: campaigns.iter().take(6).cloned().collect(),
        platform_distribution: PLATFORM_DISTRIBUTION.to_vec(),
        performance_data: generate_time_series(DASHBOARD_DAYS, rng),
    })
}
