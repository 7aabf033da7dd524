//! Relative date expression resolver.
//!
//! # Responsibility
//! - Turn natural-language relative-date phrases ("3 days later",
//!   "next week monday", "next month the 5th") into absolute dates.
//! - Supply the production "today" anchor through an injectable clock.
//!
//! # Invariants
//! - Rules are evaluated in one fixed, documented order; the first match
//!   wins. Several patterns overlap textually, so the order is part of the
//!   contract, not an implementation detail.
//! - An unrecognized expression resolves to the anchor date unchanged and is
//!   logged; it is never an error.
//! - Resolution is pure given `(expression, anchor)`.

use chrono::{Datelike, Duration, FixedOffset, Months, NaiveDate, Utc, Weekday};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

const MAX_LOGGED_EXPRESSION_CHARS: usize = 80;

/// UTC offset of the deployment's home timezone (UTC+9).
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 9;

static DAYS_LATER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*days?\s*(?:later|after)").expect("valid days-later regex"));
static WEEK_OFFSET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<afternext>the week after next)|(?P<next>next week)|(?P<count>\d+)\s*weeks?")
        .expect("valid week-offset regex")
});
static WEEKDAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b")
        .expect("valid weekday regex")
});
static DAY_OF_MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)(?:st|nd|rd|th)?\b").expect("valid day-of-month regex"));

/// One entry of the ordered resolution table.
///
/// `apply` returns `None` when the rule does not recognize the expression,
/// handing evaluation to the next rule.
struct Rule {
    name: &'static str,
    apply: fn(&str, NaiveDate) -> Option<NaiveDate>,
}

/// Resolution rules in precedence order. First match wins.
const RULES: &[Rule] = &[
    Rule {
        name: "days_later",
        apply: resolve_days_later,
    },
    Rule {
        name: "week_offset",
        apply: resolve_week_offset,
    },
    Rule {
        name: "next_month",
        apply: resolve_next_month,
    },
    Rule {
        name: "tomorrow",
        apply: resolve_tomorrow,
    },
    Rule {
        name: "day_after_tomorrow",
        apply: resolve_day_after_tomorrow,
    },
    Rule {
        name: "bare_weekday",
        apply: resolve_bare_weekday,
    },
];

/// Resolves a relative-date expression against the anchor date.
///
/// Matching is case-insensitive and ignores surrounding whitespace. When no
/// rule recognizes the expression, the anchor itself is returned and a
/// `date_resolve_fallback` event is logged (degraded but defined behavior).
pub fn resolve(expression: &str, anchor: NaiveDate) -> NaiveDate {
    let normalized = expression.trim().to_ascii_lowercase();

    for rule in RULES {
        if let Some(resolved) = (rule.apply)(&normalized, anchor) {
            debug!(
                "event=date_resolve module=resolve status=ok rule={} anchor={} resolved={}",
                rule.name, anchor, resolved
            );
            return resolved;
        }
    }

    warn!(
        "event=date_resolve_fallback module=resolve status=degraded anchor={} expression={}",
        anchor,
        sanitize_expression(&normalized)
    );
    anchor
}

/// Formats a resolved date using the zero-padded `YYYY-MM-DD` contract.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `"<n> days later"` / `"<n> days after"`: anchor + n days.
fn resolve_days_later(expr: &str, anchor: NaiveDate) -> Option<NaiveDate> {
    let caps = DAYS_LATER_RE.captures(expr)?;
    let days: i64 = caps[1].parse().ok()?;
    Some(anchor + Duration::days(days))
}

/// `"next week"` / `"the week after next"` / `"<n> weeks"`, optionally
/// combined with a weekday name.
///
/// With a weekday the anchor first snaps to the nearest future Monday, then
/// shifts whole weeks, then walks forward to the requested weekday inside
/// that week. Without a weekday the offset is a plain `weeks * 7` day shift.
fn resolve_week_offset(expr: &str, anchor: NaiveDate) -> Option<NaiveDate> {
    let caps = WEEK_OFFSET_RE.captures(expr)?;
    let weeks: i64 = if caps.name("afternext").is_some() {
        2
    } else if caps.name("next").is_some() {
        1
    } else {
        caps.name("count")?.as_str().parse().ok()?
    };

    match find_weekday(expr) {
        Some(target) => {
            let days_until_next_monday =
                8 - i64::from(anchor.weekday().number_from_monday());
            let week_start =
                anchor + Duration::days(days_until_next_monday + (weeks - 1) * 7);
            Some(week_start + Duration::days(days_forward_to(week_start.weekday(), target)))
        }
        None => Some(anchor + Duration::days(weeks * 7)),
    }
}

/// `"next month"`, with an optional day-of-month number in the phrase.
///
/// Without a day the result is the first of the following month. A day that
/// does not exist in the target month clamps to that month's last day.
fn resolve_next_month(expr: &str, anchor: NaiveDate) -> Option<NaiveDate> {
    if !expr.contains("next month") {
        return None;
    }

    let shifted = anchor.checked_add_months(Months::new(1))?;
    let requested_day = DAY_OF_MONTH_RE
        .captures(expr)
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .filter(|day| *day >= 1);

    match requested_day {
        Some(day) => Some(
            shifted
                .with_day(day)
                .unwrap_or_else(|| last_day_of_month(shifted)),
        ),
        None => shifted.with_day(1),
    }
}

fn resolve_tomorrow(expr: &str, anchor: NaiveDate) -> Option<NaiveDate> {
    (expr == "tomorrow").then(|| anchor + Duration::days(1))
}

/// Both accepted spellings resolve to anchor + 2 days.
fn resolve_day_after_tomorrow(expr: &str, anchor: NaiveDate) -> Option<NaiveDate> {
    (expr == "day after tomorrow" || expr == "the day after tomorrow")
        .then(|| anchor + Duration::days(2))
}

/// A weekday name with no stronger qualifier: the nearest future-or-same-day
/// occurrence of that weekday (0 days when the anchor already is one).
fn resolve_bare_weekday(expr: &str, anchor: NaiveDate) -> Option<NaiveDate> {
    let target = find_weekday(expr)?;
    Some(anchor + Duration::days(days_forward_to(anchor.weekday(), target)))
}

fn find_weekday(expr: &str) -> Option<Weekday> {
    let name = WEEKDAY_RE.captures(expr)?.get(1)?.as_str();
    match name {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

fn days_forward_to(current: Weekday, target: Weekday) -> i64 {
    let current = i64::from(current.num_days_from_monday());
    let target = i64::from(target.num_days_from_monday());
    (target + 7 - current) % 7
}

fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let first = date.with_day(1).expect("day 1 exists in every month");
    let next_month = first
        .checked_add_months(Months::new(1))
        .unwrap_or(first);
    next_month - Duration::days(1)
}

fn sanitize_expression(value: &str) -> String {
    let normalized = value.replace(['\n', '\r'], " ");
    let mut capped = normalized
        .chars()
        .take(MAX_LOGGED_EXPRESSION_CHARS)
        .collect::<String>();
    if normalized.chars().count() > MAX_LOGGED_EXPRESSION_CHARS {
        capped.push_str("...");
    }
    capped
}

/// Source of the resolver's production anchor.
///
/// Injectable so tests can pin "today" while production derives it from the
/// configured timezone.
pub trait Clock {
    /// The current date in the clock's timezone.
    fn today(&self) -> NaiveDate;
}

/// Production clock: UTC now shifted by a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct FixedOffsetClock {
    offset: FixedOffset,
}

impl FixedOffsetClock {
    /// Builds a clock for the given whole-hour UTC offset.
    ///
    /// Returns `None` when the offset is outside the valid range.
    pub fn from_east_hours(hours: i32) -> Option<Self> {
        FixedOffset::east_opt(hours * 3600).map(|offset| Self { offset })
    }
}

impl Default for FixedOffsetClock {
    fn default() -> Self {
        Self::from_east_hours(DEFAULT_UTC_OFFSET_HOURS).expect("valid default utc offset")
    }
}

impl Clock for FixedOffsetClock {
    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.offset).date_naive()
    }
}
