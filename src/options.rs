//! Parsing and time resolution options.

/// What to do with a matching local time which doesn't exist because clocks jump forward (DST gap).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LeapPolicy {
    /// Drop the nonexistent time.
    #[default]
    Skip,
    /// Fire anyway, with the wall clock moved forward by the gap length: 02:15 becomes 03:15.
    Unskip,
}

/// Which occurrence of a matching local time to use when clocks fall back and the time repeats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FallPolicy {
    /// The first occurrence, before the transition.
    #[default]
    FireEarly,
    /// The second occurrence, after the transition.
    FireLate,
    /// Both occurrences, in chronological order.
    FireBoth,
}

impl FallPolicy {
    #[inline]
    pub(crate) fn fires_early(self) -> bool {
        matches!(self, Self::FireEarly | Self::FireBoth)
    }

    #[inline]
    pub(crate) fn fires_late(self) -> bool {
        matches!(self, Self::FireLate | Self::FireBoth)
    }
}

/// How a six-field expression is laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SixFieldLayout {
    /// `second minute hour day-of-month month day-of-week`.
    #[default]
    SecondsFirst,
    /// `minute hour day-of-month month day-of-week year`.
    YearLast,
}

/// Options of the [`Expression`](crate::Expression).
///
/// ```rust
/// use cron_next::{Expression, FallPolicy, LeapPolicy, Options};
///
/// let options = Options::default()
///     .with_leap(LeapPolicy::Unskip)
///     .with_fall(FallPolicy::FireBoth);
/// let expression = Expression::with_options("0 30 2 * * *", options).unwrap();
/// assert_eq!(expression.options().leap, LeapPolicy::Unskip);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Options {
    /// DST gap handling, [`LeapPolicy::Skip`] by default.
    pub leap: LeapPolicy,
    /// DST overlap handling, [`FallPolicy::FireEarly`] by default.
    pub fall: FallPolicy,
    /// Layout of six-field expressions, [`SixFieldLayout::SecondsFirst`] by default.
    pub six_fields: SixFieldLayout,
}

impl Options {
    /// Sets DST gap handling.
    pub fn with_leap(mut self, leap: LeapPolicy) -> Self {
        self.leap = leap;
        self
    }

    /// Sets DST overlap handling.
    pub fn with_fall(mut self, fall: FallPolicy) -> Self {
        self.fall = fall;
        self
    }

    /// Sets layout of six-field expressions.
    pub fn with_six_fields(mut self, six_fields: SixFieldLayout) -> Self {
        self.six_fields = six_fields;
        self
    }
}
