//! Day-of-month and day-of-week constraints, and their resolution into concrete days of a month.

use crate::{
    pattern::{Pattern, PatternItem, PatternValueType},
    set::ValueSet,
    utils::CalendarMonth,
};

/// Day constraints of an expression.
///
/// When both fields are restricted, a day matches if it satisfies either of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub(crate) struct DaySpec {
    days_of_month: ValueSet,
    /// Target days for the nearest-weekday (`NW`) qualifier.
    workdays_of_month: ValueSet,
    last_day_of_month: bool,
    last_workday_of_month: bool,
    dom_restricted: bool,
    days_of_week: ValueSet,
    /// `N#K` encoded as `7 * (K - 1) + N`.
    specific_weekdays: ValueSet,
    last_weekdays: ValueSet,
    dow_restricted: bool,
}

impl DaySpec {
    pub(crate) fn new(dom: &Pattern, dow: &Pattern) -> Self {
        let mut last_day_of_month = false;
        let mut last_workday_of_month = false;
        let mut workdays_of_month = Vec::new();
        for item in dom.items() {
            match item {
                PatternItem::LastDom => last_day_of_month = true,
                PatternItem::LastWorkday => last_workday_of_month = true,
                PatternItem::Weekday(day) => workdays_of_month.push(*day),
                _ => {}
            }
        }

        let mut specific_weekdays = Vec::new();
        let mut last_weekdays = Vec::new();
        for item in dow.items() {
            match item {
                PatternItem::Sharp(dow, nth) => specific_weekdays.push(7 * (nth - 1) + dow % 7),
                PatternItem::LastDow(dow) => last_weekdays.push(dow % 7),
                _ => {}
            }
        }

        Self {
            days_of_month: dom.values(),
            workdays_of_month: workdays_of_month.into_iter().collect(),
            last_day_of_month,
            last_workday_of_month,
            dom_restricted: !dom.is_wildcard(),
            days_of_week: dow.values(),
            specific_weekdays: specific_weekdays.into_iter().collect(),
            last_weekdays: last_weekdays.into_iter().collect(),
            dow_restricted: !dow.is_wildcard(),
        }
    }

    /// Returns sorted days of `month` in `year` which satisfy the constraints.
    ///
    /// The result may be empty, e.g. `31W` in a 30-day month.
    pub(crate) fn resolve(&self, year: PatternValueType, month: PatternValueType) -> ValueSet {
        let Some(calendar) = CalendarMonth::new(year, month) else {
            return ValueSet::default();
        };
        let last_day = calendar.len();
        if !self.dom_restricted && !self.dow_restricted {
            return (1..=last_day).collect();
        }

        // bit N is set for day N
        let mut days: u64 = 0;

        if self.dom_restricted {
            for day in self.days_of_month.iter() {
                days |= 1u64 << day;
            }
            if self.last_day_of_month {
                days |= 1u64 << last_day;
            }
            if self.last_workday_of_month {
                days |= 1u64 << calendar.nearest_weekday(last_day);
            }
            for day in self.workdays_of_month.iter().filter(|day| *day <= last_day) {
                days |= 1u64 << calendar.nearest_weekday(day);
            }
        }

        if self.dow_restricted {
            for dow in self.days_of_week.iter() {
                for day in (calendar.first(dow % 7)..=last_day).step_by(7) {
                    days |= 1u64 << day;
                }
            }
            for encoded in self.specific_weekdays.iter() {
                if let Some(day) = calendar.nth(encoded % 7, encoded / 7 + 1) {
                    days |= 1u64 << day;
                }
            }
            for dow in self.last_weekdays.iter() {
                days |= 1u64 << calendar.last(dow);
            }
        }

        (1..=last_day).filter(|day| days & (1u64 << day) != 0).collect()
    }

    /// Returns `true` if the day is one of the resolved days of its month.
    pub(crate) fn contains(&self, year: PatternValueType, month: PatternValueType, day: PatternValueType) -> bool {
        self.resolve(year, month).contains(day)
    }
}
