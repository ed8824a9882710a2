//! Next-occurrence search over civil (local, zone-less) date and time.
//!
//! The search walks year → month → day → hour → minute → second. At each level it looks up the
//! first allowed value at or after the current one; when a level has to move forward, all finer
//! levels are reset to their first allowed values, and an exhausted level carries into the
//! coarser one. Days are resolved per month into a local list, so [`Fields`] is never mutated.

use crate::{days::DaySpec, pattern::PatternValueType, set::ValueSet};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

/// Normalized value sets of all fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct Fields {
    pub(crate) seconds: ValueSet,
    pub(crate) minutes: ValueSet,
    pub(crate) hours: ValueSet,
    pub(crate) days: DaySpec,
    pub(crate) months: ValueSet,
    pub(crate) years: ValueSet,
}

impl Fields {
    /// Returns `true` if the civil time satisfies every field.
    pub(crate) fn matches(&self, civil: &NaiveDateTime) -> bool {
        let Ok(year) = PatternValueType::try_from(civil.year()) else {
            return false;
        };
        let month = civil.month() as PatternValueType;

        self.years.contains(year)
            && self.months.contains(month)
            && self.hours.contains(civil.hour() as PatternValueType)
            && self.minutes.contains(civil.minute() as PatternValueType)
            && self.seconds.contains(civil.second() as PatternValueType)
            && self.days.contains(year, month, civil.day() as PatternValueType)
    }

    /// Returns the first matching civil time after `from`, or at `from` too if `inclusive`.
    ///
    /// Sub-second part of `from` is ignored. `None` means the year range is exhausted.
    pub(crate) fn next_civil(&self, from: NaiveDateTime, inclusive: bool) -> Option<NaiveDateTime> {
        let mut cursor = Cursor::new(self, &from)?;
        cursor.align(inclusive)?;
        cursor.to_naive()
    }
}

/// Search state: current candidate and the resolved days of its month.
struct Cursor<'a> {
    fields: &'a Fields,
    year: PatternValueType,
    month: PatternValueType,
    day: PatternValueType,
    hour: PatternValueType,
    minute: PatternValueType,
    second: PatternValueType,
    days: ValueSet,
}

impl<'a> Cursor<'a> {
    fn new(fields: &'a Fields, from: &NaiveDateTime) -> Option<Self> {
        // Years before the supported range start the search from its beginning.
        let year = PatternValueType::try_from(from.year().max(0)).ok()?;

        Some(Self {
            fields,
            year,
            month: from.month() as PatternValueType,
            day: from.day() as PatternValueType,
            hour: from.hour() as PatternValueType,
            minute: from.minute() as PatternValueType,
            second: from.second() as PatternValueType,
            days: ValueSet::default(),
        })
    }

    fn align(&mut self, inclusive: bool) -> Option<()> {
        let fields = self.fields;

        if fields.years.first_at_or_after(self.year)? != self.year {
            return self.advance_year();
        }

        match fields.months.first_at_or_after(self.month) {
            None => return self.advance_year(),
            Some(month) if month != self.month => return self.advance_month(),
            _ => {}
        }

        self.days = fields.days.resolve(self.year, self.month);
        match self.days.first_at_or_after(self.day) {
            None => return self.advance_month(),
            Some(day) if day != self.day => return self.advance_day(),
            _ => {}
        }

        match fields.hours.first_at_or_after(self.hour) {
            None => return self.advance_day(),
            Some(hour) if hour != self.hour => return self.advance_hour(),
            _ => {}
        }

        match fields.minutes.first_at_or_after(self.minute) {
            None => return self.advance_hour(),
            Some(minute) if minute != self.minute => return self.advance_minute(),
            _ => {}
        }

        match fields.seconds.first_at_or_after(self.second) {
            None => self.advance_minute(),
            Some(second) if second == self.second && inclusive => Some(()),
            Some(_) => self.advance_second(),
        }
    }

    fn advance_year(&mut self) -> Option<()> {
        self.year = self.fields.years.next_after(self.year)?;
        self.month = self.fields.months.first()?;
        self.settle_month()
    }

    fn advance_month(&mut self) -> Option<()> {
        match self.fields.months.next_after(self.month) {
            Some(month) => {
                self.month = month;
                self.settle_month()
            }
            None => self.advance_year(),
        }
    }

    /// Resolves days of the current month, moving on while a month has none.
    fn settle_month(&mut self) -> Option<()> {
        loop {
            self.days = self.fields.days.resolve(self.year, self.month);
            if let Some(day) = self.days.first() {
                self.day = day;
                return self.reset_hour();
            }

            match self.fields.months.next_after(self.month) {
                Some(month) => self.month = month,
                None => {
                    self.year = self.fields.years.next_after(self.year)?;
                    self.month = self.fields.months.first()?;
                }
            }
        }
    }

    fn advance_day(&mut self) -> Option<()> {
        match self.days.next_after(self.day) {
            Some(day) => {
                self.day = day;
                self.reset_hour()
            }
            None => self.advance_month(),
        }
    }

    fn advance_hour(&mut self) -> Option<()> {
        match self.fields.hours.next_after(self.hour) {
            Some(hour) => {
                self.hour = hour;
                self.reset_minute()
            }
            None => self.advance_day(),
        }
    }

    fn advance_minute(&mut self) -> Option<()> {
        match self.fields.minutes.next_after(self.minute) {
            Some(minute) => {
                self.minute = minute;
                self.reset_second()
            }
            None => self.advance_hour(),
        }
    }

    fn advance_second(&mut self) -> Option<()> {
        match self.fields.seconds.next_after(self.second) {
            Some(second) => {
                self.second = second;
                Some(())
            }
            None => self.advance_minute(),
        }
    }

    fn reset_hour(&mut self) -> Option<()> {
        self.hour = self.fields.hours.first()?;
        self.reset_minute()
    }

    fn reset_minute(&mut self) -> Option<()> {
        self.minute = self.fields.minutes.first()?;
        self.reset_second()
    }

    fn reset_second(&mut self) -> Option<()> {
        self.second = self.fields.seconds.first()?;
        Some(())
    }

    fn to_naive(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year as i32, self.month as u32, self.day as u32)?.and_hms_opt(
            self.hour as u32,
            self.minute as u32,
            self.second as u32,
        )
    }
}
