use chrono::NaiveDate;
use serde::Serialize;

use crate::campaign::Campaign;

pub mod endpoints;
pub mod manager;

/// One day of account-wide delivery.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DailyMetrics {
    pub date: NaiveDate,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub spend: f64,
    pub ctr: f64,
    pub cpc: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Funnel {
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub click_rate: f64,
    pub conversion_rate: f64,
    pub cost_per_conversion: f64,
}

pub const FUNNEL: Funnel = Funnel {
    impressions: 2_400_000,
    clicks: 96_000,
    conversions: 1847,
    click_rate: 4.0,
    conversion_rate: 1.92,
    cost_per_conversion: 28.42,
};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlatformPerformance {
    pub platform: &'static str,
    pub impressions: u64,
    pub clicks: u64,
    pub ctr: f64,
    pub cpc: f64,
    pub conversions: u64,
    pub cpa: f64,
    pub spend: f64,
    pub roas: f64,
}

pub const PLATFORM_COMPARISON: [PlatformPerformance; 4] = [
    PlatformPerformance {
        platform: "Glimmora Reach",
        impressions: 620_000,
        clicks: 24_800,
        ctr: 4.0,
        cpc: 0.85,
        conversions: 496,
        cpa: 17.14,
        spend: 8500.0,
        roas: 4.8,
    },
    PlatformPerformance {
        platform: "Google Ads",
        impressions: 1_080_000,
        clicks: 43_200,
        ctr: 4.0,
        cpc: 1.85,
        conversions: 864,
        cpa: 23.15,
        spend: 20000.0,
        roas: 3.4,
    },
    PlatformPerformance {
        platform: "Meta",
        impressions: 840_000,
        clicks: 33_600,
        ctr: 4.0,
        cpc: 1.49,
        conversions: 672,
        cpa: 18.60,
        spend: 12500.0,
        roas: 4.1,
    },
    PlatformPerformance {
        platform: "LinkedIn",
        impressions: 480_000,
        clicks: 19_200,
        ctr: 4.0,
        cpc: 4.69,
        conversions: 311,
        cpa: 48.23,
        spend: 15000.0,
        roas: 1.8,
    },
];

/// Percentage of conversion credit per channel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChannelCredit {
    #[serde(rename = "Organic Search")]
    pub organic_search: u32,
    #[serde(rename = "Paid Search")]
    pub paid_search: u32,
    #[serde(rename = "Social")]
    pub social: u32,
    #[serde(rename = "Direct")]
    pub direct: u32,
    #[serde(rename = "Email")]
    pub email: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Attribution {
    pub model: &'static str,
    pub description: &'static str,
    pub breakdown: ChannelCredit,
}

const fn credit(organic: u32, paid: u32, social: u32, direct: u32, email: u32) -> ChannelCredit {
    ChannelCredit {
        organic_search: organic,
        paid_search: paid,
        social,
        direct,
        email,
    }
}

/// The attribution models by lookup key. The first entry is the fallback.
pub const ATTRIBUTION_MODELS: [(&str, Attribution); 5] = [
    (
        "last_click",
        Attribution {
            model: "Last Click",
            description: "Gives 100% credit to the last touchpoint before conversion.",
            breakdown: credit(35, 28, 22, 10, 5),
        },
    ),
    (
        "first_click",
        Attribution {
            model: "First Click",
            description: "Gives 100% credit to the first touchpoint in the customer journey.",
            breakdown: credit(20, 35, 30, 8, 7),
        },
    ),
    (
        "linear",
        Attribution {
            model: "Linear",
            description: "Distributes credit equally across all touchpoints.",
            breakdown: credit(22, 25, 28, 14, 11),
        },
    ),
    (
        "time_decay",
        Attribution {
            model: "Time Decay",
            description: "Gives more credit to touchpoints closer to conversion.",
            breakdown: credit(30, 30, 20, 12, 8),
        },
    ),
    (
        "position_based",
        Attribution {
            model: "Position Based",
            description:
                "Gives 40% credit to first and last touchpoints, 20% distributed among middle.",
            breakdown: credit(28, 32, 18, 12, 10),
        },
    ),
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlatformShare {
    pub name: &'static str,
    pub value: u32,
}

pub const PLATFORM_DISTRIBUTION: [PlatformShare; 4] = [
    PlatformShare {
        name: "Google Ads",
        value: 35,
    },
    PlatformShare {
        name: "Meta",
        value: 25,
    },
    PlatformShare {
        name: "LinkedIn",
        value: 15,
    },
    PlatformShare {
        name: "Glimmora Reach",
        value: 25,
    },
];

/// Headline numbers for the caller's campaigns.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub active_campaigns: usize,
    pub active_campaigns_growth: f64,
    pub total_budget: f64,
    pub total_spent: f64,
    pub budget_utilization: u32,
    pub total_impressions: u64,
    pub impressions_growth: f64,
    pub total_conversions: u64,
    pub conversions_growth: f64,
    pub recent_campaigns: Vec<Campaign>,
    pub platform_distribution: Vec<PlatformShare>,
    pub performance_data: Vec<DailyMetrics>,
}
