// Money and duration extraction
use super::ValueError;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// "$10,000", "USD 2.5 million", "10000.00", "750k", "$1.5M"
    ///
    /// Trailing letters are consumed with the number so a suffix is never
    /// cut off and "$1.5M" cannot shrink to "$1".
    pub static ref MONEY_TOKEN: Regex = Regex::new(
        r"(?i)(?:\$\s*|\busd\s*)?\b(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?(?:[a-z]+|\s*(?:million|thousand|billion)\b)?(?:\s*(?:usd|dollars)\b)?"
    )
    .unwrap();

    static ref MONEY_PARTS: Regex = Regex::new(
        r"(?i)(?P<whole>\d{1,3}(?:,\d{3})+|\d+)(?:\.(?P<frac>\d+))?(?:(?P<suffix>[a-z]+)|\s*(?P<word>million|thousand|billion)\b)?"
    )
    .unwrap();

    /// "6 months", "twelve weeks", "90-day"
    pub static ref DURATION_TOKEN: Regex = Regex::new(
        r"(?i)\b(?:\d+(?:\.\d+)?|one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve)\s*-?\s*(?:days?|weeks?|months?|years?)\b"
    )
    .unwrap();

    static ref DURATION_PARTS: Regex = Regex::new(
        r"(?i)(?P<n>\d+(?:\.\d+)?|[a-z]+)\s*-?\s*(?P<unit>day|week|month|year)"
    )
    .unwrap();
}

/// Multiplier for a scale word or a suffix glued to the number
fn multiplier(suffix: &str) -> Option<u64> {
    match suffix.to_lowercase().as_str() {
        "usd" | "dollar" | "dollars" => Some(1),
        "k" | "thousand" => Some(1_000),
        "m" | "mm" | "mn" | "million" => Some(1_000_000),
        "b" | "bn" | "billion" => Some(1_000_000_000),
        _ => None,
    }
}

fn glued_suffix(token: &str) -> Option<String> {
    MONEY_PARTS
        .captures(token)
        .and_then(|caps| caps.name("suffix").map(|m| m.as_str().to_string()))
}

/// Whether a money token carries a currency marker, separator or multiplier,
/// as opposed to a bare number that may be a quantity or a year
pub fn is_marked_amount(token: &str) -> bool {
    let lower = token.to_lowercase();
    lower.contains(['$', ',', '.'])
        || glued_suffix(&lower).is_some_and(|s| multiplier(&s).is_some())
        || ["usd", "dollar", "million", "thousand", "billion"]
            .iter()
            .any(|w| lower.contains(w))
}

/// Whether a token can stand for an amount at all. Bare numbers with an
/// unknown suffix ("3rd", "40kg") are not money.
pub fn is_money_candidate(token: &str) -> bool {
    token.contains('$')
        || token.to_lowercase().contains("usd")
        || glued_suffix(token).map_or(true, |s| multiplier(&s).is_some())
}

/// Parse a money token into integer cents
pub fn parse_money(raw: &str) -> Result<u64, ValueError> {
    let unrecognized = || ValueError::Unrecognized(raw.to_string());
    let out_of_range = || ValueError::OutOfRange(raw.to_string());
    let caps = MONEY_PARTS.captures(raw).ok_or_else(unrecognized)?;

    let whole: u64 = caps["whole"]
        .replace(',', "")
        .parse()
        .map_err(|_| out_of_range())?;
    let multiplier = match caps.name("suffix").or_else(|| caps.name("word")) {
        Some(m) => multiplier(m.as_str()).ok_or_else(unrecognized)?,
        None => 1,
    };

    // "5.5" means fifty cents, "1.5M" one and a half million
    let (frac, scale) = match caps.name("frac").map(|m| m.as_str()) {
        Some(f) if f.len() > 9 => return Err(unrecognized()),
        Some(f) => (
            f.parse::<u64>().map_err(|_| out_of_range())?,
            10u64.pow(f.len() as u32),
        ),
        None => (0, 1),
    };

    let scaled = whole
        .checked_mul(scale)
        .and_then(|n| n.checked_add(frac))
        .and_then(|n| n.checked_mul(100))
        .and_then(|n| n.checked_mul(multiplier))
        .ok_or_else(out_of_range)?;
    // Sub-cent precision is not an amount anyone writes in a contract
    if scaled % scale != 0 {
        return Err(unrecognized());
    }
    Ok(scaled / scale)
}

/// Parse a duration token into whole days (month = 30, year = 360)
pub fn parse_duration(raw: &str) -> Result<u64, ValueError> {
    let caps = DURATION_PARTS
        .captures(raw)
        .ok_or_else(|| ValueError::Unrecognized(raw.to_string()))?;

    let n = &caps["n"];
    let count: f64 = match word_number(n) {
        Some(w) => f64::from(w),
        None => n
            .parse()
            .map_err(|_| ValueError::Unrecognized(raw.to_string()))?,
    };
    let unit_days = match caps["unit"].to_lowercase().as_str() {
        "day" => 1.0,
        "week" => 7.0,
        "month" => 30.0,
        _ => 360.0,
    };

    let days = (count * unit_days).round();
    if !days.is_finite() || days < 0.0 || days > u32::MAX as f64 {
        return Err(ValueError::OutOfRange(raw.to_string()));
    }
    Ok(days as u64)
}

fn word_number(word: &str) -> Option<u32> {
    const WORDS: [&str; 12] = [
        "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
        "twelve",
    ];
    let lower = word.to_lowercase();
    WORDS
        .iter()
        .position(|w| *w == lower)
        .map(|idx| idx as u32 + 1)
}
