use crate::{set::ValueSet, utils, CronError, Result};
use std::fmt::Display;

/// Minimum year an expression can match.
pub const MIN_YEAR: PatternValueType = 1970;
/// Maximum year an expression can match.
pub const MAX_YEAR: PatternValueType = 2099;

pub(crate) type PatternValueType = u16;

/// Parsed content of a single cron field: comma separated list of items.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct Pattern {
    field: Field,
    items: Vec<PatternItem>,
}

impl Pattern {
    pub(crate) fn parse(field: Field, input: &str) -> Result<Self> {
        if input.is_empty() {
            return Err(CronError::syntax(field, input));
        }

        let mut error_indicator = Ok(());
        let items = input
            .split(',')
            .map(|item| PatternItem::parse(field, item))
            .scan(&mut error_indicator, |err, res| match res {
                Ok(o) => Some(o),
                Err(e) => {
                    **err = Err(e);
                    None
                }
            })
            .collect::<Vec<_>>();

        error_indicator?;

        if items.len() > 1 && items.iter().any(|item| matches!(item, PatternItem::All | PatternItem::Any)) {
            return Err(CronError::syntax(field, input));
        }

        Ok(Self { field, items })
    }

    #[inline]
    pub(crate) fn items(&self) -> &[PatternItem] {
        &self.items
    }

    /// Returns `true` if the whole field is `*` or `?`.
    #[inline]
    pub(crate) fn is_wildcard(&self) -> bool {
        matches!(self.items.as_slice(), [PatternItem::All | PatternItem::Any])
    }

    /// Expands plain values (wildcards, values, ranges and steps) into a sorted set.
    ///
    /// Day qualifiers (`L`, `W`, `#`) aren't plain values and are skipped here.
    pub(crate) fn values(&self) -> ValueSet {
        let (min, max) = self.field.series_bounds();
        self.items
            .iter()
            .flat_map(|item| -> Box<dyn Iterator<Item = PatternValueType>> {
                match item {
                    PatternItem::All | PatternItem::Any => Box::new(min..=max),
                    PatternItem::Particular(value) => Box::new(std::iter::once(*value)),
                    PatternItem::Range(start, end) => Box::new(*start..=*end),
                    PatternItem::RepeatingValue(start, step) => Box::new((*start..=max).step_by(*step as usize)),
                    PatternItem::RepeatingRange(start, end, step) => Box::new((*start..=*end).step_by(*step as usize)),
                    PatternItem::LastDom
                    | PatternItem::LastWorkday
                    | PatternItem::Weekday(_)
                    | PatternItem::LastDow(_)
                    | PatternItem::Sharp(_, _) => Box::new(std::iter::empty()),
                }
            })
            .map(|value| self.field.normalize(value))
            .collect()
    }
}

impl Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let items = self.items.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(",");
        write!(f, "{items}")
    }
}

/// Field of a cron expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// Seconds, 0-59.
    Seconds,
    /// Minutes, 0-59.
    Minutes,
    /// Hours, 0-23.
    Hours,
    /// Day of month, 1-31.
    DayOfMonth,
    /// Month, 1-12 or names.
    Months,
    /// Day of week, 0-7 (both 0 and 7 are Sunday) or names.
    DayOfWeek,
    /// Year, 1970-2099.
    Years,
}

impl Field {
    const DAYS_OF_WEEK: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];
    const DAYS_OF_WEEK_FULL: [&str; 7] = [
        "SUNDAY",
        "MONDAY",
        "TUESDAY",
        "WEDNESDAY",
        "THURSDAY",
        "FRIDAY",
        "SATURDAY",
    ];
    const MONTHS: [&str; 12] = [
        "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
    ];
    const MONTHS_FULL: [&str; 12] = [
        "JANUARY",
        "FEBRUARY",
        "MARCH",
        "APRIL",
        "MAY",
        "JUNE",
        "JULY",
        "AUGUST",
        "SEPTEMBER",
        "OCTOBER",
        "NOVEMBER",
        "DECEMBER",
    ];

    /// Bounds of values accepted in the field text.
    fn min_max(self) -> (PatternValueType, PatternValueType) {
        match self {
            Self::Seconds => (0, 59),
            Self::Minutes => (0, 59),
            Self::Hours => (0, 23),
            Self::DayOfMonth => (1, 31),
            Self::Months => (1, 12),
            Self::DayOfWeek => (0, 7),
            Self::Years => (MIN_YEAR, MAX_YEAR),
        }
    }

    /// Bounds used to expand `*` and open-ended steps; Sunday is counted once.
    fn series_bounds(self) -> (PatternValueType, PatternValueType) {
        match self {
            Self::DayOfWeek => (0, 6),
            _ => self.min_max(),
        }
    }

    /// Number of distinct values of the field.
    fn cardinality(self) -> u32 {
        let (min, max) = self.series_bounds();
        (max - min) as u32 + 1
    }

    #[inline]
    fn normalize(self, value: PatternValueType) -> PatternValueType {
        if self == Self::DayOfWeek && value == 7 {
            0
        } else {
            value
        }
    }

    fn is_day(self) -> bool {
        matches!(self, Self::DayOfMonth | Self::DayOfWeek)
    }

    /// Parses a single value: number within the field bounds or a name.
    fn parse(self, input: &str) -> Result<PatternValueType> {
        if let Some(value) = utils::parse_digital_value(input) {
            let (min, max) = self.min_max();
            return PatternValueType::try_from(value)
                .ok()
                .filter(|value| (min..=max).contains(value))
                .ok_or_else(|| CronError::range(self, input));
        }

        let named = match self {
            Self::Months => utils::parse_name(input, &Self::MONTHS)
                .or_else(|| utils::parse_name(input, &Self::MONTHS_FULL))
                .map(|value| value + 1),
            Self::DayOfWeek => utils::parse_name(input, &Self::DAYS_OF_WEEK)
                .or_else(|| utils::parse_name(input, &Self::DAYS_OF_WEEK_FULL)),
            _ => None,
        };

        named.ok_or_else(|| CronError::syntax(self, input))
    }

    fn parse_range(self, start: &str, end: &str, item: &str) -> Result<(PatternValueType, PatternValueType)> {
        let start = self.parse(start)?;
        let end = self.parse(end)?;
        if start > end {
            return Err(CronError::range(self, item));
        }

        Ok((start, end))
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Seconds => "second",
            Self::Minutes => "minute",
            Self::Hours => "hour",
            Self::DayOfMonth => "day-of-month",
            Self::Months => "month",
            Self::DayOfWeek => "day-of-week",
            Self::Years => "year",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum PatternItem {
    All,
    Any,
    Particular(PatternValueType),
    // start-finish
    Range(PatternValueType, PatternValueType),
    // start/step
    RepeatingValue(PatternValueType, PatternValueType),
    // start-finish/step
    RepeatingRange(PatternValueType, PatternValueType, PatternValueType),
    // L
    LastDom,
    // LW
    LastWorkday,
    // day W
    Weekday(PatternValueType),
    // weekday L
    LastDow(PatternValueType),
    // weekday#nth
    Sharp(PatternValueType, PatternValueType),
}

impl PatternItem {
    fn parse(field: Field, item: &str) -> Result<Self> {
        if item.is_empty() {
            return Err(CronError::syntax(field, item));
        }
        if item == "*" {
            return Ok(Self::All);
        }
        if item == "?" && field.is_day() {
            return Ok(Self::Any);
        }

        let upper = item.to_ascii_uppercase();
        // item without its trailing qualifier letter
        let head = item.get(..item.len() - 1).unwrap_or_default();
        match field {
            Field::DayOfMonth if upper == "L" => return Ok(Self::LastDom),
            Field::DayOfMonth if upper == "LW" => return Ok(Self::LastWorkday),
            Field::DayOfMonth if upper.ends_with('W') => return Ok(Self::Weekday(field.parse(head)?)),
            Field::DayOfWeek => {
                if let Some((dow, nth)) = item.split_once('#') {
                    let dow = field.parse(dow)?;
                    let nth = utils::parse_digital_value(nth).ok_or_else(|| CronError::syntax(field, item))?;
                    if !(1..=5).contains(&nth) {
                        return Err(CronError::range(field, item));
                    }
                    return Ok(Self::Sharp(dow, nth as PatternValueType));
                }
                if item.len() > 1 && upper.ends_with('L') {
                    return Ok(Self::LastDow(field.parse(head)?));
                }
            }
            _ => {}
        }

        if let Some((base, step)) = item.split_once('/') {
            let step = utils::parse_digital_value(step).ok_or_else(|| CronError::syntax(field, item))?;
            if step == 0 || step >= field.cardinality() {
                return Err(CronError::interval(field, item));
            }
            let step = step as PatternValueType;

            return if base == "*" {
                Ok(Self::RepeatingValue(field.series_bounds().0, step))
            } else if let Some((start, end)) = base.split_once('-') {
                let (start, end) = field.parse_range(start, end, item)?;
                Ok(Self::RepeatingRange(start, end, step))
            } else {
                Ok(Self::RepeatingValue(field.parse(base)?, step))
            };
        }

        if let Some((start, end)) = item.split_once('-') {
            let (start, end) = field.parse_range(start, end, item)?;
            return Ok(Self::Range(start, end));
        }

        Ok(Self::Particular(field.parse(item)?))
    }
}

impl Display for PatternItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternItem::All => write!(f, "*"),
            PatternItem::Any => write!(f, "?"),
            PatternItem::LastDow(dow) => write!(f, "{}L", dow),
            PatternItem::LastDom => write!(f, "L"),
            PatternItem::LastWorkday => write!(f, "LW"),
            PatternItem::Weekday(dom) => write!(f, "{}W", dom),
            PatternItem::RepeatingValue(value, repeater) => write!(f, "{}/{}", value, repeater),
            PatternItem::RepeatingRange(start, end, repeater) => {
                write!(f, "{}-{}/{}", start, end, repeater)
            }
            PatternItem::Range(start, end) => write!(f, "{}-{}", start, end),
            PatternItem::Particular(value) => write!(f, "{}", value),
            PatternItem::Sharp(dow, number) => write!(f, "{}#{}", dow, number),
        }
    }
}
