// Date token extraction and normalization
use super::ValueError;
use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::fmt;

const MONTH: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?";

lazy_static! {
    /// ISO, US numeric, "Mon D, YYYY", "D Month YYYY" and "Month YYYY"
    pub static ref DATE_TOKEN: Regex = Regex::new(&format!(
        r"(?i)\b(?:(?P<iso_y>\d{{4}})-(?P<iso_m>\d{{1,2}})-(?P<iso_d>\d{{1,2}})\b|(?P<us_m>\d{{1,2}})/(?P<us_d>\d{{1,2}})/(?P<us_y>\d{{4}})\b|(?P<mdy_m>{m})\s+(?P<mdy_d>\d{{1,2}})(?:st|nd|rd|th)?,?\s+(?P<mdy_y>\d{{4}})\b|(?P<dmy_d>\d{{1,2}})(?:st|nd|rd|th)?\s+(?P<dmy_m>{m}),?\s+(?P<dmy_y>\d{{4}})\b|(?P<my_m>{m}),?\s+(?P<my_y>\d{{4}})\b)",
        m = MONTH
    ))
    .unwrap();
}

/// A calendar date, or just a month when the text gives no day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateValue {
    Day(NaiveDate),
    Month { year: i32, month: u32 },
}

impl DateValue {
    /// A month agrees with any day inside it; otherwise values must be equal
    pub fn conflicts_with(&self, other: &DateValue) -> bool {
        match (self, other) {
            (DateValue::Day(a), DateValue::Day(b)) => a != b,
            (DateValue::Month { year, month }, DateValue::Day(d))
            | (DateValue::Day(d), DateValue::Month { year, month }) => {
                d.year() != *year || d.month() != *month
            }
            (a, b) => a != b,
        }
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateValue::Day(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            DateValue::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
        }
    }
}

pub fn parse_date(raw: &str) -> Result<DateValue, ValueError> {
    let caps = DATE_TOKEN
        .captures(raw)
        .ok_or_else(|| ValueError::Unrecognized(raw.to_string()))?;
    let invalid = || ValueError::InvalidDate(raw.to_string());

    let (year, month, day) = if caps.name("iso_y").is_some() {
        (
            number(&caps, "iso_y")?,
            number(&caps, "iso_m")?,
            Some(number(&caps, "iso_d")?),
        )
    } else if caps.name("us_y").is_some() {
        (
            number(&caps, "us_y")?,
            number(&caps, "us_m")?,
            Some(number(&caps, "us_d")?),
        )
    } else if caps.name("mdy_y").is_some() {
        (
            number(&caps, "mdy_y")?,
            month(&caps, "mdy_m")?,
            Some(number(&caps, "mdy_d")?),
        )
    } else if caps.name("dmy_y").is_some() {
        (
            number(&caps, "dmy_y")?,
            month(&caps, "dmy_m")?,
            Some(number(&caps, "dmy_d")?),
        )
    } else {
        (
            number(&caps, "my_y")?,
            month(&caps, "my_m")?,
            None,
        )
    };

    let year = i32::try_from(year).map_err(|_| invalid())?;
    match day {
        Some(day) => NaiveDate::from_ymd_opt(year, month, day)
            .map(DateValue::Day)
            .ok_or_else(invalid),
        None if (1..=12).contains(&month) => Ok(DateValue::Month { year, month }),
        None => Err(invalid()),
    }
}

fn number(caps: &Captures<'_>, name: &str) -> Result<u32, ValueError> {
    caps.name(name)
        .and_then(|m| m.as_str().parse().ok())
        .ok_or_else(|| ValueError::Unrecognized(caps[0].to_string()))
}

fn month(caps: &Captures<'_>, name: &str) -> Result<u32, ValueError> {
    caps.name(name)
        .and_then(|m| month_number(m.as_str()))
        .ok_or_else(|| ValueError::InvalidDate(caps[0].to_string()))
}

fn month_number(name: &str) -> Option<u32> {
    let prefix: String = name.to_lowercase().chars().take(3).collect();
    let month = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> DateValue {
        DateValue::Day(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_formats_normalize_to_same_day() {
        for raw in [
            "2024-01-15",
            "1/15/2024",
            "Jan 15, 2024",
            "January 15th, 2024",
            "15 January 2024",
            "jan. 15 2024",
        ] {
            assert_eq!(parse_date(raw).unwrap(), day(2024, 1, 15), "{}", raw);
        }
    }

    #[test]
    fn test_month_only() {
        assert_eq!(
            parse_date("March 2025").unwrap(),
            DateValue::Month {
                year: 2025,
                month: 3
            }
        );
    }

    #[test]
    fn test_impossible_date_is_error() {
        assert_eq!(
            parse_date("Feb 30, 2024"),
            Err(ValueError::InvalidDate("Feb 30, 2024".to_string()))
        );
        assert!(parse_date("13/01/2024").is_err());
    }

    #[test]
    fn test_month_agrees_with_days_inside_it() {
        let march = DateValue::Month {
            year: 2025,
            month: 3,
        };
        assert!(!march.conflicts_with(&day(2025, 3, 31)));
        assert!(march.conflicts_with(&day(2025, 4, 1)));
        assert!(day(2024, 1, 1).conflicts_with(&day(2024, 2, 1)));
    }

    #[test]
    fn test_token_not_found_in_prose() {
        assert!(DATE_TOKEN.find("may be adjusted later").is_none());
        assert!(DATE_TOKEN.find("within 30 days").is_none());
    }
}
