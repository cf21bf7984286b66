use serde::{Deserialize, Serialize};

use crate::utils::lenient_number;

const BASE_POOL: f64 = 2_000_000.0;
const FULL_AGE_SPAN: f64 = 37.0;

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AudienceRequest {
    #[serde(deserialize_with = "lenient_number")]
    pub age_min: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub age_max: Option<f64>,
    pub gender: Option<String>,
    pub locations: Option<Vec<String>>,
    pub interests: Option<Vec<String>>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AudienceQuality {
    Broad,
    Balanced,
    Niche,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AudienceEstimate {
    pub min: u64,
    pub max: u64,
    pub formatted: String,
    pub quality: AudienceQuality,
}

fn round_thousands(value: f64) -> u64 {
    ((value / 1000.0).round() * 1000.0) as u64
}

/// Sizes the reachable audience for a targeting selection.
pub fn estimate_audience_size(request: &AudienceRequest) -> AudienceEstimate {
    let age_min = request.age_min.filter(|age| *age != 0.0).unwrap_or(18.0);
    let age_max = request.age_max.filter(|age| *age != 0.0).unwrap_or(55.0);
    let age_span = (age_max - age_min).max(0.0);

    let mut size = BASE_POOL * (age_span / FULL_AGE_SPAN);

    if let Some(gender) = request.gender.as_deref() {
        if !gender.is_empty() && gender != "all" {
            size *= 0.52;
        }
    }

    // no location list at all reads as a single location
    let location_count = request.locations.as_ref().map_or(1, Vec::len);
    match location_count {
        1 => size *= 0.3,
        2..=3 => size *= 0.5,
        _ => {}
    }

    let interest_count = request.interests.as_ref().map_or(0, Vec::len);
    if interest_count > 0 {
        size *= (1.0 - interest_count as f64 * 0.08).max(0.1);
    }

    let min = round_thousands(size * 0.8);
    let max = round_thousands(size * 1.2);

    AudienceEstimate {
        min,
        max,
        formatted: format!("{}K - {}K", min / 1000, max / 1000),
        quality: quality(min),
    }
}

/// Tiers by the low end of the estimate; both thresholds are exclusive.
fn quality(min: u64) -> AudienceQuality {
    if min > 500_000 {
        AudienceQuality::Broad
    } else if min > 100_000 {
        AudienceQuality::Balanced
    } else {
        AudienceQuality::Niche
    }
}
