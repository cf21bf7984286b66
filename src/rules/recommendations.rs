use serde::Serialize;

use crate::campaign::Campaign;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub priority: Priority,
    pub title: &'static str,
    pub description: &'static str,
    pub impact: &'static str,
}

const IMPROVE_CTR: Recommendation = Recommendation {
    kind: "optimization",
    priority: Priority::High,
    title: "Improve Click-Through Rate",
    description: "Your CTR is below industry average. Consider refreshing ad creatives and testing new headlines.",
    impact: "+15-25% CTR improvement expected",
};

const BUDGET_PACING: Recommendation = Recommendation {
    kind: "budget",
    priority: Priority::Medium,
    title: "Budget Pacing Alert",
    description: "You've spent 70%+ of your budget. Consider adjusting daily spend to maintain campaign duration.",
    impact: "Extend campaign by 5-7 days",
};

const IMPROVE_ROAS: Recommendation = Recommendation {
    kind: "performance",
    priority: Priority::High,
    title: "Improve Return on Ad Spend",
    description: "ROAS is below target. Recommend narrowing audience targeting and focusing on high-intent keywords.",
    impact: "+40% ROAS improvement potential",
};

const AB_TEST: Recommendation = Recommendation {
    kind: "general",
    priority: Priority::Low,
    title: "A/B Test Ad Variations",
    description: "Running 2-3 creative variations can improve overall campaign performance by identifying top performers.",
    impact: "+10-20% performance uplift",
};

/// Rule-based advice for a campaign, in a fixed order and always ending
/// with the A/B testing suggestion.
pub fn generate_campaign_recommendations(campaign: &Campaign) -> Vec<Recommendation> {
    let mut recommendations = vec![];

    if let Some(metrics) = &campaign.metrics {
        if metrics.ctr < 3.5 {
            recommendations.push(IMPROVE_CTR);
        }
    }

    // spend against a zero total reads as overspent; nothing spent never fires
    let budget = &campaign.budget;
    if budget.spent / budget.total > 0.7 {
        recommendations.push(BUDGET_PACING);
    }

    if let Some(metrics) = &campaign.metrics {
        if metrics.roas < 2.0 {
            recommendations.push(IMPROVE_ROAS);
        }
    }

    recommendations.push(AB_TEST);

    recommendations
}
