//! Value extraction for contradiction detection.
//!
//! Each [`ValueKind`] has a token pattern used to locate a candidate value
//! after a keyword, and a parser that normalizes the token so differently
//! written values can be compared.

pub mod dates;
pub mod numeric;

use crate::vocabulary::ValueKind;
use dates::DateValue;
use regex::Regex;
use std::fmt;
use thiserror::Error;

/// A token was shaped like a value but does not denote one
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("invalid date '{0}'")]
    InvalidDate(String),

    #[error("amount out of range '{0}'")]
    OutOfRange(String),

    #[error("unrecognized value '{0}'")]
    Unrecognized(String),
}

/// A normalized value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    Date(DateValue),
    /// Integer cents
    Money(u64),
    /// Whole days
    Duration(u64),
}

impl Value {
    /// Whether two values of the same kind cannot both be true
    pub fn conflicts_with(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Date(a), Value::Date(b)) => a.conflicts_with(b),
            (Value::Money(a), Value::Money(b)) => a != b,
            (Value::Duration(a), Value::Duration(b)) => a != b,
            _ => true,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Date(d) => write!(f, "{}", d),
            Value::Money(cents) => write!(f, "${}.{:02}", cents / 100, cents % 100),
            Value::Duration(days) => write!(f, "{} days", days),
        }
    }
}

/// Locate the value token of `kind` that starts no later than `max_start`.
///
/// Money prefers a token that is clearly an amount ("$5,000") over a bare
/// number ("phase 2") appearing earlier in the window.
pub fn find_token(kind: ValueKind, haystack: &str, max_start: usize) -> Option<(usize, usize)> {
    let pattern: &Regex = match kind {
        ValueKind::Date => &*dates::DATE_TOKEN,
        ValueKind::Money => &*numeric::MONEY_TOKEN,
        ValueKind::Duration => &*numeric::DURATION_TOKEN,
    };
    let mut candidates = pattern
        .find_iter(haystack)
        .take_while(|m| m.start() <= max_start);

    let found = match kind {
        ValueKind::Money => {
            let all: Vec<_> = candidates
                .filter(|m| numeric::is_money_candidate(m.as_str()))
                .collect();
            all.iter()
                .find(|m| numeric::is_marked_amount(m.as_str()))
                .or_else(|| all.first())
                .copied()
        }
        _ => candidates.next(),
    };
    found.map(|m| (m.start(), m.end()))
}

/// Normalize a token previously found by [`find_token`]
pub fn parse_value(kind: ValueKind, raw: &str) -> Result<Value, ValueError> {
    match kind {
        ValueKind::Date => dates::parse_date(raw).map(Value::Date),
        ValueKind::Money => numeric::parse_money(raw).map(Value::Money),
        ValueKind::Duration => numeric::parse_duration(raw).map(Value::Duration),
    }
}
