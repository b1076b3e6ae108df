use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::ValidationFailure;
use crate::models::result_value::{RawResultValue, ResultValue, format_duration, parse_duration};

/// How a workout measures performance. The variant fixes all three
/// value-dependent behaviors in one place: parsing a raw submission,
/// comparing two results, and formatting a value for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    Reps,
    Weight,
    Time,
}

impl fmt::Display for ResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResultType::Reps => "reps",
            ResultType::Weight => "weight",
            ResultType::Time => "time",
        };
        f.write_str(name)
    }
}

impl ResultType {
    /// Convert a heterogeneous raw submission into the typed value this
    /// workout stores. Rejects value shapes belonging to another type.
    pub fn normalize(self, raw: &RawResultValue) -> Result<ResultValue, ValidationFailure> {
        match self {
            ResultType::Reps => {
                let reps = match raw {
                    RawResultValue::Integer(n) => i32::try_from(*n).ok(),
                    RawResultValue::Text(s) => s.trim().parse::<i32>().ok(),
                    RawResultValue::Number(_) => None,
                };
                match reps {
                    Some(n) if n > 0 => Ok(ResultValue::Reps(n)),
                    _ => Err(ValidationFailure::TypeMismatch(self)),
                }
            }
            ResultType::Weight => {
                let weight = match raw {
                    RawResultValue::Integer(n) => rust_decimal::Decimal::try_from(*n).ok(),
                    RawResultValue::Number(x) => rust_decimal::Decimal::try_from(*x).ok(),
                    RawResultValue::Text(s) => s.trim().parse::<rust_decimal::Decimal>().ok(),
                };
                match weight {
                    Some(w) if w > rust_decimal::Decimal::ZERO => Ok(ResultValue::Weight(w)),
                    _ => Err(ValidationFailure::TypeMismatch(self)),
                }
            }
            ResultType::Time => match raw {
                RawResultValue::Text(s) => parse_duration(s).map(ResultValue::TimeSeconds),
                _ => Err(ValidationFailure::TypeMismatch(self)),
            },
        }
    }

    /// Order two optional results best-first for this workout type: lower
    /// times win, higher reps and weights win. A missing value (or a value
    /// of the wrong variant) always sorts last.
    pub fn compare(self, a: Option<&ResultValue>, b: Option<&ResultValue>) -> Ordering {
        match self {
            ResultType::Time => cmp_asc(time_key(a), time_key(b)),
            ResultType::Reps => cmp_desc(reps_key(a), reps_key(b)),
            ResultType::Weight => cmp_desc(weight_key(a), weight_key(b)),
        }
    }

    /// Render a value for display. Times round-trip with `parse_duration`.
    pub fn format(self, value: &ResultValue) -> String {
        match value {
            ResultValue::Reps(n) => n.to_string(),
            ResultValue::Weight(kg) => kg.normalize().to_string(),
            ResultValue::TimeSeconds(seconds) => format_duration(*seconds),
        }
    }
}

fn time_key(v: Option<&ResultValue>) -> Option<i32> {
    match v {
        Some(ResultValue::TimeSeconds(seconds)) => Some(*seconds),
        _ => None,
    }
}

fn reps_key(v: Option<&ResultValue>) -> Option<i32> {
    match v {
        Some(ResultValue::Reps(n)) => Some(*n),
        _ => None,
    }
}

fn weight_key(v: Option<&ResultValue>) -> Option<rust_decimal::Decimal> {
    match v {
        Some(ResultValue::Weight(kg)) => Some(*kg),
        _ => None,
    }
}

/// Smaller key first; `None` last.
fn cmp_asc<K: Ord>(a: Option<K>, b: Option<K>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Larger key first; `None` last.
fn cmp_desc<K: Ord>(a: Option<K>, b: Option<K>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Workout {
    pub workout_id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub result_type: ResultType,
    pub created_at: chrono::NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn reps(n: i32) -> Option<ResultValue> {
        Some(ResultValue::Reps(n))
    }

    fn secs(s: i32) -> Option<ResultValue> {
        Some(ResultValue::TimeSeconds(s))
    }

    #[test]
    fn reps_normalize_accepts_positive_integers() {
        assert_eq!(
            ResultType::Reps.normalize(&RawResultValue::Integer(42)),
            Ok(ResultValue::Reps(42))
        );
        assert_eq!(
            ResultType::Reps.normalize(&RawResultValue::Text("17".into())),
            Ok(ResultValue::Reps(17))
        );
    }

    #[test]
    fn reps_normalize_rejects_garbage() {
        for raw in [
            RawResultValue::Text("abc".into()),
            RawResultValue::Integer(0),
            RawResultValue::Integer(-3),
            RawResultValue::Number(12.5),
        ] {
            assert_eq!(
                ResultType::Reps.normalize(&raw),
                Err(ValidationFailure::TypeMismatch(ResultType::Reps))
            );
        }
    }

    #[test]
    fn weight_normalize_accepts_numbers_and_numeric_text() {
        assert_eq!(
            ResultType::Weight.normalize(&RawResultValue::Number(102.5)),
            Ok(ResultValue::Weight(Decimal::new(1025, 1)))
        );
        assert_eq!(
            ResultType::Weight.normalize(&RawResultValue::Integer(80)),
            Ok(ResultValue::Weight(Decimal::from(80)))
        );
        assert_eq!(
            ResultType::Weight.normalize(&RawResultValue::Text("60.25".into())),
            Ok(ResultValue::Weight(Decimal::new(6025, 2)))
        );
    }

    #[test]
    fn weight_normalize_rejects_non_positive() {
        assert_eq!(
            ResultType::Weight.normalize(&RawResultValue::Number(0.0)),
            Err(ValidationFailure::TypeMismatch(ResultType::Weight))
        );
    }

    #[test]
    fn time_normalize_requires_duration_text() {
        assert_eq!(
            ResultType::Time.normalize(&RawResultValue::Text("2:10".into())),
            Ok(ResultValue::TimeSeconds(130))
        );
        assert_eq!(
            ResultType::Time.normalize(&RawResultValue::Integer(130)),
            Err(ValidationFailure::TypeMismatch(ResultType::Time))
        );
    }

    #[test]
    fn time_compares_ascending() {
        assert_eq!(
            ResultType::Time.compare(secs(95).as_ref(), secs(130).as_ref()),
            Ordering::Less
        );
    }

    #[test]
    fn reps_compare_descending() {
        assert_eq!(
            ResultType::Reps.compare(reps(100).as_ref(), reps(90).as_ref()),
            Ordering::Less
        );
        assert_eq!(
            ResultType::Reps.compare(reps(90).as_ref(), reps(100).as_ref()),
            Ordering::Greater
        );
    }

    #[test]
    fn missing_value_sorts_last_in_both_directions() {
        assert_eq!(
            ResultType::Time.compare(secs(3000).as_ref(), None),
            Ordering::Less
        );
        assert_eq!(ResultType::Reps.compare(None, reps(1).as_ref()), Ordering::Greater);
    }

    #[test]
    fn format_weight_drops_trailing_zeroes() {
        let value = ResultValue::Weight(Decimal::new(1025, 1));
        assert_eq!(ResultType::Weight.format(&value), "102.5");
        let whole = ResultValue::Weight(Decimal::new(800, 1));
        assert_eq!(ResultType::Weight.format(&whole), "80");
    }
}
