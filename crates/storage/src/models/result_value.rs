use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ValidationFailure;
use crate::models::workout::ResultType;

/// A performance value as submitted by a client, before it has been
/// checked against the workout's result type. JSON numbers arrive as
/// `Integer`/`Number`, anything quoted as `Text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum RawResultValue {
    Integer(i64),
    Number(f64),
    Text(String),
}

/// A typed performance value. The variant always matches the owning
/// workout's result type; the three-nullable-columns shape only exists at
/// the row-mapping boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResultValue {
    Reps(i32),
    Weight(Decimal),
    TimeSeconds(i32),
}

impl ResultValue {
    pub fn result_type(&self) -> ResultType {
        match self {
            ResultValue::Reps(_) => ResultType::Reps,
            ResultValue::Weight(_) => ResultType::Weight,
            ResultValue::TimeSeconds(_) => ResultType::Time,
        }
    }

    /// Rebuild the tagged value from the nullable column triple. Returns
    /// `None` when no column is set; picks the single set column otherwise.
    pub fn from_columns(
        reps: Option<i32>,
        weight: Option<Decimal>,
        seconds: Option<i32>,
    ) -> Option<ResultValue> {
        match (reps, weight, seconds) {
            (Some(n), _, _) => Some(ResultValue::Reps(n)),
            (_, Some(kg), _) => Some(ResultValue::Weight(kg)),
            (_, _, Some(s)) => Some(ResultValue::TimeSeconds(s)),
            (None, None, None) => None,
        }
    }

    pub fn reps_column(&self) -> Option<i32> {
        match self {
            ResultValue::Reps(n) => Some(*n),
            _ => None,
        }
    }

    pub fn weight_column(&self) -> Option<Decimal> {
        match self {
            ResultValue::Weight(kg) => Some(*kg),
            _ => None,
        }
    }

    pub fn seconds_column(&self) -> Option<i32> {
        match self {
            ResultValue::TimeSeconds(s) => Some(*s),
            _ => None,
        }
    }

    pub fn format(&self) -> String {
        self.result_type().format(self)
    }
}

/// Parse a clock duration in `mm:ss` or `hh:mm:ss` form into total seconds.
/// Components must be non-negative integers; anything else is rejected.
pub fn parse_duration(raw: &str) -> Result<i32, ValidationFailure> {
    let reject = || ValidationFailure::InvalidTimeFormat(raw.to_string());

    let parts: Vec<&str> = raw.trim().split(':').collect();
    let parsed: Vec<i64> = parts
        .iter()
        .map(|part| {
            if part.is_empty() || part.len() > 9 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(reject());
            }
            part.parse::<i64>().map_err(|_| reject())
        })
        .collect::<Result<_, _>>()?;

    let total = match parsed.as_slice() {
        [minutes, seconds] => minutes * 60 + seconds,
        [hours, minutes, seconds] => hours * 3600 + minutes * 60 + seconds,
        _ => return Err(reject()),
    };

    i32::try_from(total).map_err(|_| reject())
}

/// Format seconds for display: `h:mm:ss` from one hour up, `m:ss` below.
/// Inverse-compatible with `parse_duration` for canonical inputs.
pub fn format_duration(total_seconds: i32) -> String {
    let total_seconds = total_seconds.max(0);
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minutes_and_seconds() {
        assert_eq!(parse_duration("1:05"), Ok(65));
        assert_eq!(parse_duration("0:00"), Ok(0));
        assert_eq!(parse_duration("12:34"), Ok(754));
    }

    #[test]
    fn parses_hours_minutes_seconds() {
        assert_eq!(parse_duration("1:02:03"), Ok(3723));
        assert_eq!(parse_duration("2:00:00"), Ok(7200));
    }

    #[test]
    fn rejects_malformed_durations() {
        for raw in ["", "90", "1:2:3:4", "1:xx", "-1:30", "1:", ":30", "1.5:00"] {
            assert_eq!(
                parse_duration(raw),
                Err(ValidationFailure::InvalidTimeFormat(raw.to_string())),
                "expected rejection for {raw:?}"
            );
        }
    }

    #[test]
    fn formats_below_one_hour_as_m_ss() {
        assert_eq!(format_duration(65), "1:05");
        assert_eq!(format_duration(754), "12:34");
        assert_eq!(format_duration(0), "0:00");
    }

    #[test]
    fn formats_from_one_hour_as_h_mm_ss() {
        assert_eq!(format_duration(3723), "1:02:03");
        assert_eq!(format_duration(3600), "1:00:00");
    }

    #[test]
    fn duration_round_trips_for_canonical_inputs() {
        for raw in ["1:05", "12:34", "1:02:03", "0:59", "10:00:00"] {
            let seconds = parse_duration(raw).unwrap();
            assert_eq!(format_duration(seconds), raw);
        }
    }

    #[test]
    fn column_triple_round_trips() {
        let value = ResultValue::TimeSeconds(95);
        assert_eq!(
            ResultValue::from_columns(
                value.reps_column(),
                value.weight_column(),
                value.seconds_column()
            ),
            Some(value)
        );
        assert_eq!(ResultValue::from_columns(None, None, None), None);
    }
}
