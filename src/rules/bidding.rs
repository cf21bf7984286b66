use serde::{Deserialize, Serialize};

use crate::utils::{lenient_number, round2};

const BASE_BID: f64 = 2.00;
const CONFIDENCE: u32 = 82;

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BidRequest {
    #[serde(deserialize_with = "lenient_number")]
    pub audience: Option<f64>,
    pub platform: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub budget: Option<f64>,
    pub objective: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BidRecommendation {
    pub suggested_bid: f64,
    pub confidence: u32,
    pub reasoning: Vec<String>,
    pub min: f64,
    pub max: f64,
    pub breakdown: BidBreakdown,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BidBreakdown {
    pub base_bid: f64,
    pub audience_factor: f64,
    pub platform_factor: f64,
    pub objective_factor: f64,
    pub time_factor: f64,
}

fn audience_factor(audience: f64) -> f64 {
    if audience < 100_000.0 {
        1.3
    } else if audience < 500_000.0 {
        1.1
    } else if audience > 1_000_000.0 {
        0.9
    } else {
        1.0
    }
}

fn platform_factor(platform: &str) -> f64 {
    match platform {
        "google" => 1.0,
        "meta" => 0.95,
        "linkedin" => 1.8,
        _ => 1.0,
    }
}

fn platform_name(platform: &str) -> &str {
    match platform {
        "google" => "Google Ads",
        "meta" => "Meta",
        "linkedin" => "LinkedIn",
        other => other,
    }
}

fn objective_factor(objective: &str) -> f64 {
    match objective {
        "awareness" => 0.8,
        "consideration" => 1.0,
        "conversion" => 1.2,
        _ => 1.0,
    }
}

/// Morning and evening peaks cost more, the small hours less.
fn time_factor(hour: u32) -> f64 {
    match hour {
        9..=12 => 1.15,
        18..=21 => 1.10,
        0..=6 => 0.85,
        _ => 1.0,
    }
}

/// Suggests a cost-per-click bid for the given local clock `hour` (0-23).
pub fn calculate_optimal_bid(request: &BidRequest, hour: u32) -> BidRecommendation {
    let audience = request.audience.unwrap_or(500_000.0);
    let platform = request.platform.as_deref().unwrap_or("google");
    let objective = request.objective.as_deref().unwrap_or("conversion");

    let audience_factor = audience_factor(audience);
    let platform_factor = platform_factor(platform);
    let objective_factor = objective_factor(objective);
    let time_factor = time_factor(hour);

    let suggested_bid =
        round2(BASE_BID * audience_factor * platform_factor * objective_factor * time_factor);

    let mut reasoning = vec![];
    if audience_factor > 1.0 {
        reasoning.push(format!(
            "Niche audience ({}K) increases bid by {}%",
            (audience / 1000.0).round(),
            ((audience_factor - 1.0) * 100.0).round()
        ));
    } else if audience_factor < 1.0 {
        reasoning.push(format!(
            "Broad audience ({:.1}M) reduces bid by {}%",
            audience / 1_000_000.0,
            ((1.0 - audience_factor) * 100.0).round()
        ));
    }

    reasoning.push(format!(
        "{} platform multiplier: {}x",
        platform_name(platform),
        platform_factor
    ));

    match objective {
        "conversion" => reasoning
            .push("Conversion objective requires higher bids for quality traffic".to_string()),
        "awareness" => {
            reasoning.push("Awareness objective allows lower bids for broader reach".to_string())
        }
        _ => {}
    }

    if time_factor > 1.0 {
        reasoning.push(format!(
            "Peak hours detected: +{}% bid adjustment",
            ((time_factor - 1.0) * 100.0).round()
        ));
    } else if time_factor < 1.0 {
        reasoning.push(format!(
            "Off-peak hours: -{}% bid reduction opportunity",
            ((1.0 - time_factor) * 100.0).round()
        ));
    }

    let efficient_platform = if platform_factor <= 1.0 {
        platform_name(platform)
    } else {
        "Google Ads"
    };
    reasoning.push(format!(
        "Recommended platform: {} for best CPM efficiency",
        efficient_platform
    ));

    BidRecommendation {
        suggested_bid,
        confidence: CONFIDENCE,
        reasoning,
        min: round2(suggested_bid * 0.75),
        max: round2(suggested_bid * 1.35),
        breakdown: BidBreakdown {
            base_bid: BASE_BID,
            audience_factor,
            platform_factor,
            objective_factor,
            time_factor,
        },
    }
}
