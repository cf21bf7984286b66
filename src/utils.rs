use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SuccessBody {
    pub message: String,
}

impl SuccessBody {
    pub fn new(message: impl Into<String>) -> SuccessBody {
        SuccessBody {
            message: message.into(),
        }
    }
}

/// Rounds to two decimal places, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Empty strings count as absent.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Accepts a number or a numeric string; anything else reads as absent.
pub fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(value.as_ref().and_then(number_from_value))
}

/// Like [`lenient_number`] but truncated to a non-negative integer.
pub fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = lenient_number(deserializer)?;

    Ok(number.filter(|n| n.is_finite() && *n >= 0.0).map(|n| n as u64))
}

/// Accepts a string that parses as `T`; empty or malformed values read as
/// absent.
pub fn lenient_id<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(match value {
        Some(Value::String(s)) => s.trim().parse::<T>().ok(),
        _ => None,
    })
}

/// Leading integer of a string, ignoring whatever follows it.
pub fn leading_integer(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let digits_start = usize::from(value.starts_with(['-', '+']));
    let digits_end = value[digits_start..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(value.len(), |end| digits_start + end);

    if digits_end == digits_start {
        return None;
    }

    // digits are all valid here, so a failed parse is an overflow
    let negative = value.starts_with('-');
    Some(
        value[..digits_end]
            .parse::<i64>()
            .unwrap_or(if negative { i64::MIN } else { i64::MAX }),
    )
}

fn number_from_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    number.filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::campaign::CampaignId;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "lenient_number")]
        amount: Option<f64>,
        #[serde(default, deserialize_with = "lenient_count")]
        count: Option<u64>,
        #[serde(default, deserialize_with = "lenient_id")]
        campaign: Option<CampaignId>,
    }

    fn sample(json: &str) -> Sample {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn lenient_number_accepts_strings() {
        assert_eq!(sample(r#"{"amount": "1500"}"#).amount, Some(1500.0));
        assert_eq!(sample(r#"{"amount": 12.5}"#).amount, Some(12.5));
    }

    #[test]
    fn lenient_number_defaults_garbage() {
        assert_eq!(sample(r#"{"amount": "lots"}"#).amount, None);
        assert_eq!(sample(r#"{"amount": [1]}"#).amount, None);
        assert_eq!(sample(r#"{"amount": null}"#).amount, None);
        assert_eq!(sample(r#"{}"#).amount, None);
    }

    #[test]
    fn lenient_count_drops_negatives() {
        assert_eq!(sample(r#"{"count": -4}"#).count, None);
        assert_eq!(sample(r#"{"count": "42.9"}"#).count, Some(42));
    }

    #[test]
    fn lenient_id_drops_blank_and_foreign_ids() {
        assert_eq!(sample(r#"{"campaign": "camp-004"}"#).campaign, Some(CampaignId::new(4)));
        assert_eq!(sample(r#"{"campaign": ""}"#).campaign, None);
        assert_eq!(sample(r#"{"campaign": "legacy-7"}"#).campaign, None);
        assert_eq!(sample(r#"{"campaign": 4}"#).campaign, None);
    }

    #[test]
    fn leading_integer_ignores_trailing_text() {
        assert_eq!(leading_integer("7abc"), Some(7));
        assert_eq!(leading_integer("2.9"), Some(2));
        assert_eq!(leading_integer(" -5 days"), Some(-5));
        assert_eq!(leading_integer("abc"), None);
        assert_eq!(leading_integer("-"), None);
        assert_eq!(leading_integer("99999999999999999999"), Some(i64::MAX));
        assert_eq!(leading_integer(""), None);
    }

    #[test]
    fn round2_rounds_half_up() {
        assert_eq!(round2(6.4584), 6.46);
        assert_eq!(round2(0.125), 0.13);
    }
}
