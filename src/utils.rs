//! Calendar arithmetic and value parsing helpers.
use crate::pattern::PatternValueType;
use chrono::{Datelike, Months, NaiveDate};

/// Parses a plain unsigned decimal number.
///
/// Returns `None` if the input has anything but ASCII digits; numbers too large for `u32` saturate,
/// so the caller reports them as out of range rather than malformed.
pub(crate) fn parse_digital_value(input: &str) -> Option<u32> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some(input.parse::<u32>().unwrap_or(u32::MAX))
}

/// Looks up a case-insensitive name, returning its index in `names`.
pub(crate) fn parse_name(input: &str, names: &[&str]) -> Option<PatternValueType> {
    names
        .iter()
        .position(|name| !input.is_empty() && name.eq_ignore_ascii_case(input))
        .and_then(|index| PatternValueType::try_from(index).ok())
}

/// Shape of a single month: its length and the weekday it starts on.
///
/// Weekdays are numbered from 0 (Sunday) to 6 (Saturday), days from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CalendarMonth {
    len: PatternValueType,
    first_weekday: PatternValueType,
}

impl CalendarMonth {
    /// Returns `None` for a month chrono can't represent.
    pub(crate) fn new(year: PatternValueType, month: PatternValueType) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year.into(), month.into(), 1)?;
        let next = first.checked_add_months(Months::new(1))?;

        Some(Self {
            len: PatternValueType::try_from(next.signed_duration_since(first).num_days()).ok()?,
            first_weekday: PatternValueType::try_from(first.weekday().num_days_from_sunday()).ok()?,
        })
    }

    /// Number of days.
    pub(crate) fn len(&self) -> PatternValueType {
        self.len
    }

    pub(crate) fn weekday(&self, day: PatternValueType) -> PatternValueType {
        (self.first_weekday + day - 1) % 7
    }

    /// First day falling on `dow`.
    pub(crate) fn first(&self, dow: PatternValueType) -> PatternValueType {
        1 + (dow + 7 - self.first_weekday) % 7
    }

    /// The `n`-th day falling on `dow`, if the month is long enough to have it.
    pub(crate) fn nth(&self, dow: PatternValueType, n: PatternValueType) -> Option<PatternValueType> {
        let day = self.first(dow) + 7 * n.checked_sub(1)?;
        (day <= self.len).then_some(day)
    }

    /// Last day falling on `dow`.
    pub(crate) fn last(&self, dow: PatternValueType) -> PatternValueType {
        self.len - (self.weekday(self.len) + 7 - dow) % 7
    }

    /// Moves a weekend `day` to the closest Monday..Friday without leaving the month.
    pub(crate) fn nearest_weekday(&self, day: PatternValueType) -> PatternValueType {
        match self.weekday(day) {
            0 if day == self.len => day - 2,
            0 => day + 1,
            6 if day == 1 => day + 2,
            6 => day - 1,
            _ => day,
        }
    }
}
