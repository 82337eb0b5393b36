use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use tracing::warn;

use crate::error::CustomError;

/// Keeps only ASCII digits; an empty remainder is zero. Digit runs beyond
/// `u64::MAX` become `u64::MAX`, which amount validation rejects.
pub fn sanitize_amount(raw: &str) -> u64 {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u64::MAX)
}

pub fn des_from_str<T: DeserializeOwned>(body: &str) -> Result<T, CustomError> {
    serde_json::from_str(body).map_err(CustomError::JsonError)
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS[.f]` or a bare `YYYY-MM-DD`.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

// The API serializes its NUMERIC columns either as JSON numbers or as
// decimal strings ("3.000"), depending on the server's encoder.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Int(u64),
    Float(f64),
    Text(String),
}

impl NumberOrText {
    fn fraction(&self) -> Option<f64> {
        let value = match self {
            NumberOrText::Int(_) => return None,
            NumberOrText::Float(v) => *v,
            NumberOrText::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        (value.fract() != 0.0).then_some(value)
    }

    fn into_u64(self) -> Result<u64, String> {
        match self {
            NumberOrText::Int(v) => Ok(v),
            NumberOrText::Float(v) => float_to_u64(v),
            NumberOrText::Text(s) => {
                let s = s.trim();
                match s.parse::<u64>() {
                    Ok(v) => Ok(v),
                    Err(_) => s
                        .parse::<f64>()
                        .map_err(|_| format!("invalid number '{s}'"))
                        .and_then(float_to_u64),
                }
            }
        }
    }
}

fn float_to_u64(v: f64) -> Result<u64, String> {
    if v.is_finite() && v >= 0.0 && v <= u64::MAX as f64 {
        Ok(v.round() as u64)
    } else {
        Err(format!("number out of range: {v}"))
    }
}

pub fn lenient_u64<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    NumberOrText::deserialize(d)?
        .into_u64()
        .map_err(serde::de::Error::custom)
}

/// Rates are whole percentages; fractional API values are rounded.
pub fn lenient_percentage<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    let raw = NumberOrText::deserialize(d)?;
    let fraction = raw.fraction();
    let value = raw.into_u64().map_err(serde::de::Error::custom)?;
    if let Some(rate) = fraction {
        warn!("interest rate {} rounded to {}%", rate, value);
    }
    u32::try_from(value).map_err(serde::de::Error::custom)
}

pub fn optional_lenient_u32<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    match Option::<NumberOrText>::deserialize(d)? {
        None => Ok(None),
        Some(v) => {
            let value = v.into_u64().map_err(serde::de::Error::custom)?;
            u32::try_from(value)
                .map(Some)
                .map_err(serde::de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation;

    #[test]
    fn sanitize_amount_drops_non_digits() {
        assert_eq!(sanitize_amount("1a2b3"), 123);
        assert_eq!(sanitize_amount("1,000,000원"), 1_000_000);
        assert_eq!(sanitize_amount("-50"), 50);
        assert_eq!(sanitize_amount("12.5"), 125);
    }

    #[test]
    fn sanitize_amount_empty_is_zero() {
        assert_eq!(sanitize_amount(""), 0);
        assert_eq!(sanitize_amount("abc"), 0);
        assert_eq!(sanitize_amount("000"), 0);
    }

    #[test]
    fn overlong_amounts_never_pass_the_amount_bound() {
        let mut errors = Vec::new();
        validation::amount("cash_amount", sanitize_amount("999,999,999,999"), &mut errors);
        assert!(errors.is_empty());
        for raw in ["1,000,000,000,000", "99999999999999999999999"] {
            let mut errors = Vec::new();
            validation::amount("cash_amount", sanitize_amount(raw), &mut errors);
            assert_eq!(errors.len(), 1, "{raw} should be rejected");
        }
    }

    #[test]
    fn parse_datetime_accepts_common_shapes() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_datetime("2024-05-01"), Some(expected));
        assert_eq!(parse_datetime("2024-05-01T00:00:00"), Some(expected));
        assert_eq!(parse_datetime("2024-05-01T09:00:00+09:00"), Some(expected));
        assert_eq!(parse_datetime("yesterday"), None);
    }

    #[derive(Deserialize)]
    struct Rate {
        #[serde(deserialize_with = "lenient_percentage")]
        rate: u32,
    }

    #[test]
    fn fractional_rates_are_rounded_and_detected() {
        let r: Rate = serde_json::from_str(r#"{"rate": "3.500"}"#).unwrap();
        assert_eq!(r.rate, 4);
        let r: Rate = serde_json::from_str(r#"{"rate": "3.000"}"#).unwrap();
        assert_eq!(r.rate, 3);

        assert_eq!(NumberOrText::Text("3.500".to_string()).fraction(), Some(3.5));
        assert_eq!(NumberOrText::Text("3.000".to_string()).fraction(), None);
        assert_eq!(NumberOrText::Float(2.25).fraction(), Some(2.25));
        assert_eq!(NumberOrText::Int(3).fraction(), None);
    }

    #[derive(Deserialize)]
    struct Amounts {
        #[serde(deserialize_with = "lenient_u64")]
        amount: u64,
    }

    #[test]
    fn lenient_u64_reads_numbers_and_decimal_strings() {
        let a: Amounts = serde_json::from_str(r#"{"amount": 50000}"#).unwrap();
        assert_eq!(a.amount, 50000);
        let a: Amounts = serde_json::from_str(r#"{"amount": "50000"}"#).unwrap();
        assert_eq!(a.amount, 50000);
        let a: Amounts = serde_json::from_str(r#"{"amount": "50000.000"}"#).unwrap();
        assert_eq!(a.amount, 50000);
        assert!(serde_json::from_str::<Amounts>(r#"{"amount": -1}"#).is_err());
        assert!(serde_json::from_str::<Amounts>(r#"{"amount": "ten"}"#).is_err());
    }
}
