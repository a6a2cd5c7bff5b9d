//! Pure calendar helpers for day-keyed lists.
//!
//! A day is identified by a `YYYY-MM-DD` id, which sorts
//! chronologically as a plain string and round-trips through
//! persistence unchanged.

use alloc::format;
use alloc::string::String;

pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar date. No time zone, no time of day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Date {
    pub year: i32,
    /// 1-based.
    pub month: u32,
    /// 1-based.
    pub day: u32,
}

impl Date {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// The `YYYY-MM-DD` identity of this date.
    pub fn id(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    /// Parses a `YYYY-MM-DD` id. Checks shape and ranges, not calendar
    /// validity (a saved "February 31st" formats like any other day).
    pub fn parse_id(id: &str) -> Option<Self> {
        let mut parts = id.splitn(3, '-');
        let year: i32 = parts.next()?.parse().ok()?;
        let month: u32 = parts.next()?.parse().ok()?;
        let day: u32 = parts.next()?.parse().ok()?;
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return None;
        }
        Some(Self { year, month, day })
    }

    /// Day of the week, 0 = Sunday. Sakamoto's method; valid for any
    /// Gregorian year after 1582.
    pub fn weekday(&self) -> usize {
        const OFFSETS: [i32; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
        let y = if self.month < 3 {
            self.year - 1
        } else {
            self.year
        };
        let w = y + y / 4 - y / 100 + y / 400
            + OFFSETS[(self.month - 1) as usize]
            + self.day as i32;
        w.rem_euclid(7) as usize
    }

    pub fn weekday_name(&self) -> &'static str {
        DAY_NAMES[self.weekday()]
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    /// Long human form, e.g. `Saturday, August 29th`.
    pub fn format_long(&self) -> String {
        format!(
            "{}, {} {}{}",
            self.weekday_name(),
            self.month_name(),
            self.day,
            ordinal_suffix(self.day),
        )
    }
}

/// English ordinal suffix: 1st, 2nd, 3rd, 4th... including the 11th/12th/13th
/// exceptions.
pub fn ordinal_suffix(day: u32) -> &'static str {
    if (11..=13).contains(&(day % 100)) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}
