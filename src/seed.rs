use chrono::NaiveDate;
use tracing::info;

use crate::campaign::{
    Bidding, Budget, BudgetType, Campaign, CampaignId, CampaignMetrics, CampaignStatus, Objective,
    PlatformKey, Schedule, Targeting,
};
use crate::creative::{Creative, CreativeId, CreativeMetrics, Performance};
use crate::database::Database;
use crate::error::Error;
use crate::placement::{Placement, PlacementId};
use crate::user::User;
use crate::utils::round2;

/// Owner of every seeded campaign, creative and placement.
pub const DEMO_OWNER: &str = "admin@glimmora.com";

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

/// Writes the demo data set into every collection that does not exist yet.
pub async fn seed(db: &dyn Database) -> Result<(), Error> {
    if db.campaigns().seed_campaigns(&demo_campaigns()).await? {
        info!("seeded campaigns");
    }
    if db.creatives().seed_creatives(&demo_creatives()).await? {
        info!("seeded creatives");
    }
    if db.placements().seed_placements(&demo_placements()).await? {
        info!("seeded placements");
    }
    if db.users().seed_users(&demo_users()).await? {
        info!("seeded users");
    }
    if db.team().seed_members(&[]).await? {
        info!("seeded team");
    }

    Ok(())
}

struct CampaignSeed {
    number: u64,
    name: &'static str,
    status: CampaignStatus,
    objective: Objective,
    platforms: Vec<PlatformKey>,
    total: f64,
    spent: f64,
    budget_type: BudgetType,
    start: NaiveDate,
    end: NaiveDate,
    metrics: Option<CampaignMetrics>,
}

fn metrics(
    impressions: u64,
    clicks: u64,
    conversions: u64,
    spend: f64,
    roas: f64,
) -> CampaignMetrics {
    CampaignMetrics {
        impressions,
        clicks,
        ctr: round2(clicks as f64 / impressions as f64 * 100.0),
        conversions,
        cpa: round2(spend / conversions as f64),
        spend,
        roas,
    }
}

fn demo_campaigns() -> Vec<Campaign> {
    let seeds = vec![
        CampaignSeed {
            number: 1,
            name: "Summer Collection Launch",
            status: CampaignStatus::Active,
            objective: Objective::Conversion,
            platforms: vec![PlatformKey::Google, PlatformKey::Meta],
            total: 15000.0,
            spent: 9850.0,
            budget_type: BudgetType::Lifetime,
            start: date(2025, 9, 1),
            end: date(2025, 11, 30),
            metrics: Some(metrics(485_000, 19_400, 388, 9850.0, 3.8)),
        },
        CampaignSeed {
            number: 2,
            name: "Brand Awareness Q4",
            status: CampaignStatus::Active,
            objective: Objective::Awareness,
            platforms: vec![PlatformKey::Meta, PlatformKey::Glimmora],
            total: 25000.0,
            spent: 18900.0,
            budget_type: BudgetType::Lifetime,
            start: date(2025, 10, 1),
            end: date(2025, 12, 31),
            metrics: Some(metrics(1_240_000, 34_720, 412, 18900.0, 1.6)),
        },
        CampaignSeed {
            number: 3,
            name: "B2B Lead Generation",
            status: CampaignStatus::Paused,
            objective: Objective::Consideration,
            platforms: vec![PlatformKey::Linkedin],
            total: 12000.0,
            spent: 4200.0,
            budget_type: BudgetType::Lifetime,
            start: date(2025, 8, 15),
            end: date(2025, 11, 15),
            metrics: Some(metrics(96_000, 2_976, 96, 4200.0, 2.4)),
        },
        CampaignSeed {
            number: 4,
            name: "Holiday Retargeting",
            status: CampaignStatus::Draft,
            objective: Objective::Conversion,
            platforms: vec![PlatformKey::Google, PlatformKey::Glimmora],
            total: 400.0,
            spent: 0.0,
            budget_type: BudgetType::Daily,
            start: date(2025, 11, 20),
            end: date(2026, 1, 5),
            metrics: None,
        },
    ];

    seeds
        .into_iter()
        .map(|seed| {
            let mut budget = Budget::new(seed.total, seed.budget_type);
            budget.spent = seed.spent;

            Campaign {
                id: CampaignId::new(seed.number),
                user_email: DEMO_OWNER.to_string(),
                name: seed.name.to_string(),
                status: seed.status,
                objective: seed.objective,
                platforms: seed.platforms,
                campaign_type: "display".to_string(),
                ad_copy: String::new(),
                description: String::new(),
                target_url: String::new(),
                budget,
                schedule: Schedule {
                    start: seed.start.to_string(),
                    end: seed.end.to_string(),
                },
                targeting: Targeting {
                    age_range: [25, 54],
                    gender: "all".to_string(),
                    locations: vec!["United States".to_string()],
                    interests: vec![],
                },
                bidding: Bidding::default(),
                metrics: seed.metrics,
                created_at: seed.start,
            }
        })
        .collect()
}

fn demo_creatives() -> Vec<Creative> {
    let creative = |number: u64,
                    name: &str,
                    creative_type: &str,
                    format: &str,
                    dimensions: &str,
                    campaign: u64,
                    performance: Performance,
                    metrics: CreativeMetrics| Creative {
        id: CreativeId::new(number),
        user_email: DEMO_OWNER.to_string(),
        name: name.to_string(),
        creative_type: creative_type.to_string(),
        format: format.to_string(),
        dimensions: dimensions.to_string(),
        campaign_id: Some(CampaignId::new(campaign)),
        status: "active".to_string(),
        thumbnail: format!(
            "https://placehold.co/{}/6b4d3d/white?text=Creative+{}",
            dimensions, number
        ),
        performance,
        metrics,
        created_at: date(2025, 9, 1),
    };

    let delivery = |impressions: u64, clicks: u64, conversions: u64| CreativeMetrics {
        impressions,
        clicks,
        ctr: round2(clicks as f64 / impressions as f64 * 100.0),
        conversions,
    };

    vec![
        creative(
            1,
            "Summer Hero Banner",
            "image",
            "banner",
            "1200x628",
            1,
            Performance::High,
            delivery(210_000, 9_450, 236),
        ),
        creative(
            2,
            "Summer Story Reel",
            "video",
            "story",
            "1080x1920",
            1,
            Performance::Medium,
            delivery(175_000, 5_600, 98),
        ),
        creative(
            3,
            "Q4 Brand Carousel",
            "image",
            "carousel",
            "1080x1080",
            2,
            Performance::Low,
            delivery(640_000, 13_440, 150),
        ),
        creative(
            4,
            "B2B Whitepaper Ad",
            "image",
            "banner",
            "1200x627",
            3,
            Performance::Medium,
            delivery(96_000, 2_976, 96),
        ),
    ]
}

fn demo_placements() -> Vec<Placement> {
    let placement = |number: u64,
                     campaign: u64,
                     platform: &str,
                     placement_type: &str,
                     status: &str,
                     impressions: u64,
                     clicks: u64,
                     spend: f64| Placement {
        id: PlacementId::new(number),
        user_email: DEMO_OWNER.to_string(),
        campaign_id: CampaignId::new(campaign),
        platform: platform.to_string(),
        placement_type: placement_type.to_string(),
        status: status.to_string(),
        impressions,
        clicks,
        ctr: if impressions > 0 {
            round2(clicks as f64 / impressions as f64 * 100.0)
        } else {
            0.0
        },
        spend,
    };

    vec![
        placement(1, 1, "Google", "Search", "active", 180_000, 8_100, 4200.0),
        placement(2, 1, "Google", "Display", "active", 95_000, 2_850, 1450.0),
        placement(3, 1, "Meta", "Feed", "active", 140_000, 6_020, 2900.0),
        placement(4, 1, "Meta", "Stories", "paused", 70_000, 2_430, 1300.0),
        placement(5, 2, "Meta", "Feed", "active", 520_000, 15_080, 8600.0),
        placement(6, 2, "Meta", "Stories", "active", 310_000, 8_680, 4700.0),
        placement(7, 2, "Glimmora", "Display", "active", 260_000, 7_020, 3800.0),
        placement(8, 2, "Glimmora", "Native", "active", 150_000, 3_940, 1800.0),
        placement(9, 3, "LinkedIn", "Sponsored Content", "paused", 72_000, 2_376, 3100.0),
        placement(10, 3, "LinkedIn", "Message Ads", "paused", 24_000, 600, 1100.0),
    ]
}

fn demo_users() -> Vec<User> {
    let user = |email: &str,
                password: &str,
                name: &str,
                role: &str,
                avatar: &str,
                company: &str| User {
        email: email.to_string(),
        password: password.to_string(),
        name: name.to_string(),
        role: role.to_string(),
        avatar: avatar.to_string(),
        company: company.to_string(),
        created_at: None,
    };

    vec![
        user(
            "admin@glimmora.com",
            "admin123",
            "Admin User",
            "admin",
            "AU",
            "Glimmora Inc",
        ),
        user(
            "manager@glimmora.com",
            "manager123",
            "Sarah Chen",
            "campaign_manager",
            "SC",
            "Glimmora Inc",
        ),
        user(
            "analyst@glimmora.com",
            "analyst123",
            "Raj Patel",
            "analyst",
            "RP",
            "Glimmora Inc",
        ),
        user("demo@glimmora.com", "demo123", "Demo User", "viewer", "DU", "Demo Corp"),
    ]
}
