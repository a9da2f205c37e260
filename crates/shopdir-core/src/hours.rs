//! Opening-hours schedules and the "open right now?" evaluation.
//!
//! Times are zero-padded `HH:MM` strings and are compared lexically, which
//! orders them the same way as minutes since midnight. Overnight spans
//! (close earlier than open) are not supported: such a day reads as
//! "Opens at" before the opening time and "Closed - Opens tomorrow" after it.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDateTime, Offset, Utc, Weekday};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;

/// Weekdays in display order with their short labels.
const WEEK: [(Weekday, &str); 7] = [
    (Weekday::Mon, "Mon"),
    (Weekday::Tue, "Tue"),
    (Weekday::Wed, "Wed"),
    (Weekday::Thu, "Thu"),
    (Weekday::Fri, "Fri"),
    (Weekday::Sat, "Sat"),
    (Weekday::Sun, "Sun"),
];

/// Hours for a single weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayHours {
    #[serde(default)]
    pub open: String,
    #[serde(default)]
    pub close: String,
    #[serde(default)]
    pub is_closed: bool,
}

impl DayHours {
    #[must_use]
    pub fn new(open: &str, close: &str) -> Self {
        Self {
            open: open.to_string(),
            close: close.to_string(),
            is_closed: false,
        }
    }

    #[must_use]
    pub fn closed() -> Self {
        Self {
            open: String::new(),
            close: String::new(),
            is_closed: true,
        }
    }
}

/// Weekday-keyed schedule, keyed by lowercase English day name.
///
/// A `null` schedule or a `null` day entry deserializes as absent, so that
/// day reads as "Hours not available" instead of failing the whole record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OpeningHours(BTreeMap<String, DayHours>);

impl<'de> Deserialize<'de> for OpeningHours {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let days = Option::<BTreeMap<String, Option<DayHours>>>::deserialize(deserializer)?;
        Ok(Self(
            days.unwrap_or_default()
                .into_iter()
                .filter_map(|(day, hours)| hours.map(|h| (day, h)))
                .collect(),
        ))
    }
}

impl OpeningHours {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, replacing any existing entry for `day`.
    #[must_use]
    pub fn with_day(mut self, day: Weekday, hours: DayHours) -> Self {
        self.0.insert(weekday_key(day).to_string(), hours);
        self
    }

    #[must_use]
    pub fn get(&self, day: Weekday) -> Option<&DayHours> {
        self.0.get(weekday_key(day))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Lowercase English weekday name used as the schedule key.
#[must_use]
pub fn weekday_key(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Which clock the evaluation instant is read on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeContext {
    /// The host's local time zone.
    #[default]
    Local,
    /// A fixed offset from UTC.
    Fixed(FixedOffset),
}

impl TimeContext {
    #[must_use]
    pub fn utc() -> Self {
        Self::Fixed(Utc.fix())
    }

    /// Wall-clock date and time of `now` in this context.
    #[must_use]
    pub fn wall_clock(self, now: DateTime<Utc>) -> NaiveDateTime {
        match self {
            Self::Local => now.with_timezone(&Local).naive_local(),
            Self::Fixed(offset) => now.with_timezone(&offset).naive_local(),
        }
    }
}

impl fmt::Display for TimeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

impl FromStr for TimeContext {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "local" => return Ok(Self::Local),
            "utc" | "z" => return Ok(Self::utc()),
            _ => {}
        }

        let invalid = || CoreError::InvalidTimeContext(s.to_string());
        let (sign, rest) = if let Some(rest) = trimmed.strip_prefix('+') {
            (1, rest)
        } else if let Some(rest) = trimmed.strip_prefix('-') {
            (-1, rest)
        } else {
            return Err(invalid());
        };
        let minutes = parse_hhmm(rest).ok_or_else(invalid)?;
        FixedOffset::east_opt(sign * i32::from(minutes) * 60)
            .map(Self::Fixed)
            .ok_or_else(invalid)
    }
}

/// Terminal state of a status evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusState {
    NoScheduleForToday,
    ExplicitlyClosed,
    BeforeOpen,
    Open,
    AfterClose,
}

/// Result of [`evaluate_status`]: an open flag plus the message shown to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopStatus {
    pub is_open: bool,
    pub message: String,
    #[serde(skip)]
    pub state: StatusState,
}

impl ShopStatus {
    fn new(state: StatusState, message: String) -> Self {
        Self {
            is_open: state == StatusState::Open,
            message,
            state,
        }
    }
}

/// Evaluate whether a shop is open at `now`, read on the `ctx` clock.
///
/// Never fails: malformed time strings are compared as-is. Use
/// [`evaluate_status_strict`] to reject them instead.
#[must_use]
pub fn evaluate_status(hours: &OpeningHours, now: DateTime<Utc>, ctx: TimeContext) -> ShopStatus {
    let wall = ctx.wall_clock(now);
    let current_time = wall.format("%H:%M").to_string();
    evaluate_at(hours, wall.weekday(), &current_time)
}

/// Like [`evaluate_status`], but today's entry must hold valid `HH:MM` times.
///
/// Entries for other days and days marked closed are not inspected.
///
/// # Errors
///
/// Returns [`CoreError::MalformedScheduleEntry`] if today's `open` or
/// `close` is not a zero-padded 24-hour `HH:MM` time.
pub fn evaluate_status_strict(
    hours: &OpeningHours,
    now: DateTime<Utc>,
    ctx: TimeContext,
) -> Result<ShopStatus, CoreError> {
    let wall = ctx.wall_clock(now);
    let day = wall.weekday();

    if let Some(today) = hours.get(day).filter(|h| !h.is_closed) {
        for (field, value) in [("open", &today.open), ("close", &today.close)] {
            if parse_hhmm(value).is_none() {
                return Err(CoreError::MalformedScheduleEntry {
                    day: weekday_key(day).to_string(),
                    field,
                    value: value.clone(),
                });
            }
        }
    }

    Ok(evaluate_at(hours, day, &wall.format("%H:%M").to_string()))
}

/// State machine over a single day; `current_time` is `HH:MM`.
#[must_use]
pub fn evaluate_at(hours: &OpeningHours, day: Weekday, current_time: &str) -> ShopStatus {
    let Some(today) = hours.get(day) else {
        return ShopStatus::new(
            StatusState::NoScheduleForToday,
            "Hours not available".to_string(),
        );
    };

    if today.is_closed {
        return ShopStatus::new(StatusState::ExplicitlyClosed, "Closed today".to_string());
    }

    let open = today.open.as_str();
    let close = today.close.as_str();

    if current_time < open {
        ShopStatus::new(StatusState::BeforeOpen, format!("Opens at {open}"))
    } else if current_time <= close {
        ShopStatus::new(StatusState::Open, format!("Open until {close}"))
    } else {
        ShopStatus::new(
            StatusState::AfterClose,
            "Closed - Opens tomorrow".to_string(),
        )
    }
}

/// One-line weekly summary, Monday first, e.g. `Mon: 09:00 - 17:00, Tue: Closed, ...`.
#[must_use]
pub fn format_working_hours(hours: &OpeningHours) -> String {
    WEEK.iter()
        .map(|(day, label)| match hours.get(*day) {
            Some(h) if !h.is_closed => format!("{label}: {} - {}", h.open, h.close),
            _ => format!("{label}: Closed"),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Minutes since midnight for a strict `HH:MM`, or `None`.
fn parse_hhmm(value: &str) -> Option<u16> {
    let bytes = value.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return None;
    }
    let digit = |b: u8| b.is_ascii_digit().then(|| u16::from(b - b'0'));
    let hour = digit(bytes[0])? * 10 + digit(bytes[1])?;
    let minute = digit(bytes[3])? * 10 + digit(bytes[4])?;
    (hour < 24 && minute < 60).then_some(hour * 60 + minute)
}

#[cfg(test)]
#[path = "hours_test.rs"]
mod tests;
