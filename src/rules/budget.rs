use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BudgetRequest {
    pub objective: Option<String>,
    pub platforms: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRecommendation {
    pub min: u64,
    pub max: u64,
    pub daily_min: u64,
    pub daily_max: u64,
    pub reasoning: String,
}

struct BudgetRange {
    min: f64,
    max: f64,
    daily_min: f64,
    daily_max: f64,
}

fn base_range(objective: &str) -> BudgetRange {
    match objective {
        "awareness" => BudgetRange {
            min: 3000.0,
            max: 15000.0,
            daily_min: 100.0,
            daily_max: 500.0,
        },
        "conversion" => BudgetRange {
            min: 8000.0,
            max: 25000.0,
            daily_min: 250.0,
            daily_max: 800.0,
        },
        _ => BudgetRange {
            min: 5000.0,
            max: 20000.0,
            daily_min: 150.0,
            daily_max: 650.0,
        },
    }
}

/// Suggests a total and daily budget range for an objective spread over
/// some number of platforms.
pub fn generate_budget_recommendation(request: &BudgetRequest) -> BudgetRecommendation {
    let objective = request.objective.as_deref().unwrap_or("consideration");
    let platform_count = request.platforms.as_ref().map_or(1, Vec::len);

    // an explicitly empty platform list scales below a single platform
    let multiplier = 1.0 + (platform_count as f64 - 1.0) * 0.3;
    let scale = |value: f64| (value * multiplier).round() as u64;

    let range = base_range(objective);

    BudgetRecommendation {
        min: scale(range.min),
        max: scale(range.max),
        daily_min: scale(range.daily_min),
        daily_max: scale(range.daily_max),
        reasoning: format!(
            "Based on {} objective across {} platform(s). Industry benchmarks suggest this range for optimal reach and frequency.",
            objective, platform_count
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(objective: Option<&str>, platforms: Option<&[&str]>) -> BudgetRequest {
        BudgetRequest {
            objective: objective.map(str::to_string),
            platforms: platforms.map(|p| p.iter().map(|s| s.to_string()).collect()),
        }
    }

    #[test]
    fn single_platform_uses_base_table() {
        let rec = generate_budget_recommendation(&request(Some("awareness"), Some(&["google"])));

        assert_eq!(rec.min, 3000);
        assert_eq!(rec.max, 15000);
        assert_eq!(rec.daily_min, 100);
        assert_eq!(rec.daily_max, 500);
        assert_eq!(
            rec.reasoning,
            "Based on awareness objective across 1 platform(s). Industry benchmarks suggest this range for optimal reach and frequency."
        );
    }

    #[test]
    fn more_platforms_scale_the_range() {
        let rec = generate_budget_recommendation(&request(
            Some("conversion"),
            Some(&["google", "meta", "linkedin"]),
        ));

        assert_eq!(rec.min, 12800);
        assert_eq!(rec.max, 40000);
        assert_eq!(rec.daily_min, 400);
        assert_eq!(rec.daily_max, 1280);
    }

    #[test]
    fn missing_fields_fall_back_to_consideration_on_one_platform() {
        let rec = generate_budget_recommendation(&BudgetRequest::default());

        assert_eq!(rec.min, 5000);
        assert_eq!(rec.max, 20000);
        assert_eq!(rec.daily_min, 150);
        assert_eq!(rec.daily_max, 650);
        assert!(rec.reasoning.starts_with("Based on consideration objective across 1 platform(s)."));
    }

    #[test]
    fn unknown_objective_uses_consideration_table() {
        let rec = generate_budget_recommendation(&request(Some("retention"), None));

        assert_eq!(rec.min, 5000);
        assert!(rec.reasoning.starts_with("Based on retention objective"));
    }

    #[test]
    fn empty_platform_list_shrinks_the_range() {
        let rec = generate_budget_recommendation(&request(Some("awareness"), Some(&[])));

        assert_eq!(rec.min, 2100);
        assert_eq!(rec.daily_max, 350);
    }

    #[test]
    fn range_grows_with_platform_count() {
        let platforms = ["google", "meta", "linkedin", "glimmora", "tiktok"];
        for objective in ["awareness", "consideration", "conversion"] {
            let mut previous = None;
            for count in 0..=platforms.len() {
                let rec = generate_budget_recommendation(&request(
                    Some(objective),
                    Some(&platforms[..count]),
                ));
                if let Some((min, max)) = previous {
                    assert!(rec.min >= min);
                    assert!(rec.max >= max);
                }
                previous = Some((rec.min, rec.max));
            }
        }
    }
}
