use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde_json::Value;

use crate::constants::{DATE_FORMAT, ERR_INVALID_TIME};
use crate::error::{AppError, Result};

static DATE_SHAPE: OnceLock<Regex> = OnceLock::new();

/// Validate and parse a `YYYY-MM-DD` date string.
///
/// The shape check runs first, so `2024-3-6` and `06-03-2024` fail
/// without ever reaching the parser. Parsing then rejects shapes that
/// are not real dates, like `2024-02-31`.
pub fn validate_date(raw: &str) -> Result<NaiveDate> {
    let shape =
        DATE_SHAPE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));
    if !shape.is_match(raw) {
        return Err(AppError::InvalidDate);
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| AppError::InvalidDate)
}

/// Extract elapsed seconds from a submission.
///
/// Clients send this field as a JSON number or a numeric string, and
/// some send fractional seconds. Fractions are truncated toward zero.
pub fn parse_time(value: &Value) -> Result<i64> {
    match value {
        Value::Number(n) => {
            if let Some(t) = n.as_i64() {
                return Ok(t);
            }
            if let Some(f) = n.as_f64() {
                return Ok(f.trunc() as i64);
            }
            Err(AppError::InvalidInput(ERR_INVALID_TIME.to_string()))
        }
        Value::String(s) => {
            let s = s.trim();
            if let Ok(t) = s.parse::<i64>() {
                return Ok(t);
            }
            if let Ok(f) = s.parse::<f64>() {
                if f.is_finite() {
                    return Ok(f.trunc() as i64);
                }
            }
            Err(AppError::InvalidInput(ERR_INVALID_TIME.to_string()))
        }
        _ => Err(AppError::InvalidInput(ERR_INVALID_TIME.to_string())),
    }
}
