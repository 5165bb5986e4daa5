//! Cell type inference
//!
//! A raw CSV field is tried as an integer, then a float, then a date in the
//! configured pattern, and kept as text otherwise. The order is part of the
//! output format: `"123"` is always an integer, never a float.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Typed value of one CSV field
#[derive(Debug, Clone, PartialEq)]
pub enum InferredValue {
    Integer(i64),
    Float(f64),
    Date(NaiveDateTime),
    Text(String),
}

impl InferredValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            InferredValue::Integer(_) => "integer",
            InferredValue::Float(_) => "float",
            InferredValue::Date(_) => "date",
            InferredValue::Text(_) => "text",
        }
    }
}

/// Classify `raw`.
///
/// `date_format` uses `strftime` directives and must match the whole field.
/// Leading zeros do not prevent integer parsing (`"007"` is 7).
pub fn infer(raw: &str, date_format: &str) -> InferredValue {
    let trimmed = raw.trim();

    if let Ok(i) = trimmed.parse::<i64>() {
        return InferredValue::Integer(i);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        if f.is_finite() {
            return InferredValue::Float(f);
        }
    }
    if let Some(date) = parse_date(raw, date_format) {
        return InferredValue::Date(date);
    }
    InferredValue::Text(raw.to_string())
}

/// Parse a date or date-time, filling the missing half with midnight or 1900-01-01
fn parse_date(raw: &str, format: &str) -> Option<NaiveDateTime> {
    if !whitespace_fits(raw, format) {
        return None;
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
        return Some(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(time) = NaiveTime::parse_from_str(raw, format) {
        return NaiveDate::from_ymd_opt(1900, 1, 1).map(|d| d.and_time(time));
    }
    None
}

/// chrono skips whitespace before every numeric field. Only accept
/// whitespace where the pattern has some.
fn whitespace_fits(raw: &str, format: &str) -> bool {
    let starts = |s: &str| s.starts_with(char::is_whitespace);
    let ends = |s: &str| s.ends_with(char::is_whitespace);
    if (starts(raw) && !starts(format)) || (ends(raw) && !ends(format)) {
        return false;
    }
    whitespace_runs(raw) <= whitespace_runs(format)
}

fn whitespace_runs(s: &str) -> usize {
    let mut runs = 0;
    let mut in_run = false;
    for c in s.chars() {
        let ws = c.is_whitespace();
        if ws && !in_run {
            runs += 1;
        }
        in_run = ws;
    }
    runs
}
