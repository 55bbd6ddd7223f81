use crate::domain::model::{Frequency, Period};
use regex::Regex;
use std::sync::LazyLock;

static COUNT_PER_PERIOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\s*/\s*(year|month|week|day)").expect("static regex")
});

fn literal_frequency(text: &str) -> Option<Frequency> {
    let times = match text {
        "daily" | "everyday" | "every day" | "every-day" => 365,
        "weekly" | "every week" | "every-week" => 52,
        "monthly" | "every month" | "every-month" => 12,
        "yearly" | "annually" | "every year" | "every-year" => 1,
        _ => return None,
    };
    Some(Frequency::per_year(times))
}

fn counted_frequency(text: &str) -> Option<Frequency> {
    let caps = COUNT_PER_PERIOD.captures(text)?;
    let count: u32 = caps[1].parse().ok()?;
    if count == 0 {
        return None;
    }
    let period = match &caps[2] {
        "year" => Period::Year,
        "month" => Period::Month,
        "week" => Period::Week,
        _ => Period::Day,
    };
    count.checked_mul(period.per_year()).map(Frequency::per_year)
}

/// Parses "weekly", "every day", "3/month", "52 / year" and friends into an
/// annual count. Anything else falls back to once a year.
pub fn parse_frequency(text: &str) -> Frequency {
    let normalized = text.trim().to_lowercase();

    if let Some(frequency) = literal_frequency(&normalized) {
        return frequency;
    }
    if let Some(frequency) = counted_frequency(&normalized) {
        return frequency;
    }

    tracing::warn!(
        "Could not parse frequency '{}', defaulting to 1/year",
        text.trim()
    );
    Frequency::default()
}
