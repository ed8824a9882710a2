use crate::{
    days::DaySpec,
    dst,
    options::{Options, SixFieldLayout},
    pattern::{Field, Pattern},
    search::Fields,
    CronError, Result,
};
use chrono::{DateTime, TimeZone};
#[cfg(feature = "tz")]
use chrono_tz::Tz;
use std::{fmt::Display, str::FromStr};
use tracing::debug;

/// Parsed cron expression with its methods.
///
/// For the expression syntax and usage examples, please refer to the [crate documentation](crate).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String"))]
#[cfg_attr(feature = "serde", serde(into = "String"))]
pub struct Expression {
    second: Pattern,
    minute: Pattern,
    hour: Pattern,
    dom: Pattern,
    month: Pattern,
    dow: Pattern,
    year: Pattern,
    fields: Fields,
    options: Options,
    #[cfg(feature = "tz")]
    tz: Option<Tz>,
}

impl Expression {
    /// Parses and validates provided `expression` with default [`Options`].
    ///
    /// Alternative way to construct [`Expression`] is to use one of `try_from` or `from_str` methods.
    ///
    /// Returns [`CronError`] in a case provided expression is unparsable or has format errors.
    pub fn new(expression: impl Into<String>) -> Result<Self> {
        Self::with_options(expression, Options::default())
    }

    /// Parses and validates provided `expression` with custom [`Options`].
    pub fn with_options(expression: impl Into<String>, options: Options) -> Result<Self> {
        let text = expression.into();
        let mut tokens: Vec<&str> = text.split_whitespace().collect();

        #[cfg(feature = "tz")]
        let tz = take_time_zone(&mut tokens)?;

        if let Some(expanded) = tokens.first().and_then(|token| alias(token)) {
            tokens = expanded.split_whitespace().chain(tokens.iter().skip(1).copied()).collect();
        }

        let [second, minute, hour, dom, month, dow, year] = match (tokens.as_slice(), options.six_fields) {
            ([minute, hour, dom, month, dow], _) => ["0", *minute, *hour, *dom, *month, *dow, "*"],
            ([second, minute, hour, dom, month, dow], SixFieldLayout::SecondsFirst) => {
                [*second, *minute, *hour, *dom, *month, *dow, "*"]
            }
            ([minute, hour, dom, month, dow, year], SixFieldLayout::YearLast) => {
                ["0", *minute, *hour, *dom, *month, *dow, *year]
            }
            // anything after the year is ignored
            ([second, minute, hour, dom, month, dow, year, ..], _) => [*second, *minute, *hour, *dom, *month, *dow, *year],
            (tokens, _) => {
                return Err(CronError::FieldCount {
                    count: tokens.len(),
                    expression: text.clone(),
                })
            }
        };

        let second = Pattern::parse(Field::Seconds, second)?;
        let minute = Pattern::parse(Field::Minutes, minute)?;
        let hour = Pattern::parse(Field::Hours, hour)?;
        let dom = Pattern::parse(Field::DayOfMonth, dom)?;
        let month = Pattern::parse(Field::Months, month)?;
        let dow = Pattern::parse(Field::DayOfWeek, dow)?;
        let year = Pattern::parse(Field::Years, year)?;

        let fields = Fields {
            seconds: second.values(),
            minutes: minute.values(),
            hours: hour.values(),
            days: DaySpec::new(&dom, &dow),
            months: month.values(),
            years: year.values(),
        };

        let expression = Self {
            second,
            minute,
            hour,
            dom,
            month,
            dow,
            year,
            fields,
            options,
            #[cfg(feature = "tz")]
            tz,
        };
        debug!(input = %text, expression = %expression, options = ?options, "cron expression parsed");

        Ok(expression)
    }

    /// Parses provided `expression` with default [`Options`] and panics if it's invalid.
    ///
    /// Intended for literal expressions known to be valid, like constants or static configuration.
    ///
    /// # Panics
    ///
    /// Panics with the parsing error message if the expression can't be parsed.
    pub fn must_parse(expression: impl Into<String>) -> Self {
        let expression = expression.into();
        match Self::new(expression.as_str()) {
            Ok(parsed) => parsed,
            Err(err) => panic!("invalid cron expression `{expression}`: {err}"),
        }
    }

    /// Returns options the expression was parsed with.
    #[inline]
    pub fn options(&self) -> Options {
        self.options
    }

    /// Returns time of the next cron event strictly after the provided `from` instant.
    ///
    /// The result is in the same time zone as `from`. Fractional part of a second in `from` is taken
    /// into account, so the result is always later than `from`.
    ///
    /// If `tz` feature is enabled and the expression has a `TZ=` prefix, the event time is calculated
    /// in the expression's time zone:
    /// - converts `from` into the expression's time zone;
    /// - calculates the next event time;
    /// - converts obtained value back to the time zone of `from`.
    ///
    /// Returns `None` if there are no more events within the supported range of years.
    #[allow(clippy::should_implement_trait)]
    pub fn next<T: TimeZone>(&self, from: &DateTime<T>) -> Option<DateTime<T>> {
        #[cfg(feature = "tz")]
        if let Some(tz) = &self.tz {
            let next = dst::next_instant(&self.fields, self.options, &from.with_timezone(tz))?;
            return Some(next.with_timezone(&from.timezone()));
        }

        dst::next_instant(&self.fields, self.options, from)
    }

    /// Returns up to `n` next event times after `from` in ascending order.
    ///
    /// Fewer than `n` values are returned if the range of years is exhausted.
    pub fn next_n<T: TimeZone>(&self, from: &DateTime<T>, n: usize) -> Vec<DateTime<T>> {
        self.iter(from).take(n).collect()
    }

    /// Returns `true` if the local time of `at` (in the expression's time zone, if it has one)
    /// satisfies every field of the expression.
    pub fn matches<T: TimeZone>(&self, at: &DateTime<T>) -> bool {
        #[cfg(feature = "tz")]
        if let Some(tz) = &self.tz {
            return self.fields.matches(&at.with_timezone(tz).naive_local());
        }

        self.fields.matches(&at.naive_local())
    }

    /// Returns iterator of event times after `from`.
    #[inline]
    pub fn iter<T: TimeZone>(&self, from: &DateTime<T>) -> impl Iterator<Item = DateTime<T>> {
        ExpressionIterator {
            expression: self.clone(),
            next: self.next(from),
        }
    }

    /// Consumes [`Expression`] and returns iterator of event times after `from`.
    #[inline]
    pub fn into_iter<T: TimeZone>(self, from: &DateTime<T>) -> impl Iterator<Item = DateTime<T>> {
        let next = self.next(from);
        ExpressionIterator { expression: self, next }
    }

    #[cfg(test)]
    pub(crate) fn fields(&self) -> &Fields {
        &self.fields
    }
}

/// Expansion of the `@` shortcuts into seven fields.
fn alias(token: &str) -> Option<&'static str> {
    match token {
        "@yearly" | "@annually" => Some("0 0 0 1 1 * *"),
        "@monthly" => Some("0 0 0 1 * * *"),
        "@weekly" => Some("0 0 0 * * 0 *"),
        "@daily" | "@midnight" => Some("0 0 0 * * * *"),
        "@hourly" => Some("0 0 * * * * *"),
        _ => None,
    }
}

/// Removes leading `TZ=<zone>` token, if present, and returns its time zone.
#[cfg(feature = "tz")]
fn take_time_zone(tokens: &mut Vec<&str>) -> Result<Option<Tz>> {
    let Some(first) = tokens.first().copied() else {
        return Ok(None);
    };
    let Some((key, zone)) = first.split_once('=') else {
        return Ok(None);
    };
    if tokens.len() < 2 || !key.eq_ignore_ascii_case("TZ") {
        return Ok(None);
    }

    let tz = Tz::from_str(zone).map_err(|_| CronError::InvalidTimeZone(zone.to_string()))?;
    tokens.remove(0);

    Ok(Some(tz))
}

/// Contains iterator state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ExpressionIterator<T: TimeZone> {
    expression: Expression,
    next: Option<DateTime<T>>,
}

impl<T: TimeZone> Iterator for ExpressionIterator<T> {
    type Item = DateTime<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = self.expression.next(&current);
        Some(current)
    }
}

impl From<Expression> for String {
    fn from(value: Expression) -> Self {
        value.to_string()
    }
}

impl From<&Expression> for String {
    fn from(value: &Expression) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Expression {
    type Error = CronError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&String> for Expression {
    type Error = CronError;

    fn try_from(value: &String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Expression {
    type Error = CronError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl FromStr for Expression {
    type Err = CronError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        #[cfg(feature = "tz")]
        if let Some(tz) = self.tz {
            write!(f, "TZ={tz} ")?;
        }

        write!(
            f,
            "{} {} {} {} {} {} {}",
            self.second, self.minute, self.hour, self.dom, self.month, self.dow, self.year
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FallPolicy, LeapPolicy};
    use chrono::{DateTime, Utc};
    use rstest::rstest;
    use rstest_reuse::{apply, template};
    use std::time::Duration;

    #[rstest]
    #[case("0 0 0 1 */3 * 1999", "1999-02-01T00:00:00Z", "1999-04-01T00:00:00+00:00")]
    #[case("0 0 0 1 */3 *", "2024-01-01T00:00:00Z", "2024-04-01T00:00:00+00:00")]
    #[case("0 0 0 1 1 * *", "2023-12-31T23:59:59Z", "2024-01-01T00:00:00+00:00")]
    #[case("0 0 0 1 1 * *", "2024-01-01T00:00:00Z", "2025-01-01T00:00:00+00:00")]
    #[case("0 0 0 1 1 * 1970", "2024-01-01T00:00:00Z", "None")]
    #[case("0 0 0 1 1 * 1999", "1998-12-31T23:59:59Z", "1999-01-01T00:00:00+00:00")]
    #[case("0 0 0 1 1 * 1999", "1999-01-01T00:00:00Z", "None")]
    #[case("0 0 0 1 1 * 2024-2025", "2024-01-01T00:00:00Z", "2025-01-01T00:00:00+00:00")]
    #[case("0 0 0 1 1 * 2024-2025", "2025-01-01T00:00:00Z", "None")]
    #[case("0 0 0 1 1,6,12 *", "2024-02-01T00:00:00Z", "2024-06-01T00:00:00+00:00")]
    #[case("0 0 0 1,15 * ?", "2024-01-01T00:00:00Z", "2024-01-15T00:00:00+00:00")]
    #[case("0 0 0 1,15 * ?", "2024-01-15T00:00:01Z", "2024-02-01T00:00:00+00:00")]
    #[case("0 0 0 1,15,L * ?", "2024-01-15T00:00:01Z", "2024-01-31T00:00:00+00:00")]
    #[case("0 0 0 1,15,L * ?", "2024-01-31T00:00:00Z", "2024-02-01T00:00:00+00:00")]
    #[case("0 0 0 1W * *", "2024-05-31T00:00:00Z", "2024-06-03T00:00:00+00:00")]
    #[case("0 0 0 28-31 2 *", "2024-02-28T00:00:00Z", "2024-02-29T00:00:00+00:00")]
    #[case("0 0 0 28-31 2 *", "2025-02-28T00:00:00Z", "2026-02-28T00:00:00+00:00")]
    #[case("0 0 0 29 2 * 1999", "1999-01-01T00:00:00Z", "None")]
    #[case("0 0 0 29 2 * 1999/3", "1999-01-01T00:00:00Z", "2008-02-29T00:00:00+00:00")]
    #[case("0 0 0 29 2 *", "2024-03-01T00:00:00Z", "2028-02-29T00:00:00+00:00")]
    #[case("0 0 0 31 */2 *", "2024-02-01T00:00:00Z", "2024-03-31T00:00:00+00:00")]
    #[case("0 0 0 L * *", "2024-02-15T00:00:00Z", "2024-02-29T00:00:00+00:00")]
    #[case("0 0 0 L * *", "2024-04-15T00:00:00Z", "2024-04-30T00:00:00+00:00")]
    #[case("0 0 12 ? * 2-6", "2024-01-06T12:00:00Z", "2024-01-09T12:00:00+00:00")]
    #[case("0 0 12 * * MON-FRI", "2024-01-06T00:00:00Z", "2024-01-08T12:00:00+00:00")]
    #[case("0 0 12 1-7 * *", "2024-01-07T12:00:00Z", "2024-02-01T12:00:00+00:00")]
    #[case("0 0 9 * * 1#1", "2024-04-12T00:00:00Z", "2024-05-06T09:00:00+00:00")]
    #[case("0 0 9 * * 6#4", "2024-11-30T09:00:00Z", "2024-12-28T09:00:00+00:00")]
    #[case("0 0 9-17 * * 1-5", "2024-01-01T17:00:00Z", "2024-01-02T09:00:00+00:00")]
    #[case("0 15,45 9-17 * * 1-5", "2024-01-01T09:15:00Z", "2024-01-01T09:45:00+00:00")]
    #[case("30 0 0 1 * *", "2024-01-01T00:00:29.999Z", "2024-01-01T00:00:30+00:00")]
    #[case("30 0 0 1 * *", "2024-01-01T00:00:30.001Z", "2024-02-01T00:00:30+00:00")]
    #[case("25 * * * *", "2024-01-01T00:21:21Z", "2024-01-01T00:25:00+00:00")]
    #[case("1 2 29-31 * *", "2025-02-01T00:00:21Z", "2025-03-29T02:01:00+00:00")]
    #[case("0 0 1,15 * 3", "2024-01-02T00:00:00Z", "2024-01-03T00:00:00+00:00")]
    #[case("0 0 1,15 * 3", "2024-01-10T00:00:00Z", "2024-01-15T00:00:00+00:00")]
    #[case("@yearly", "2025-03-31T00:00:21Z", "2026-01-01T00:00:00+00:00")]
    #[case("@annually", "2025-03-31T00:00:21Z", "2026-01-01T00:00:00+00:00")]
    #[case("@monthly", "2025-03-31T00:00:21Z", "2025-04-01T00:00:00+00:00")]
    #[case("@weekly", "2025-03-31T00:00:21Z", "2025-04-06T00:00:00+00:00")]
    #[case("@daily", "2025-03-31T00:00:21Z", "2025-04-01T00:00:00+00:00")]
    #[case("@midnight", "2025-03-31T00:00:21Z", "2025-04-01T00:00:00+00:00")]
    #[case("@hourly", "2025-03-31T00:00:21Z", "2025-03-31T01:00:00+00:00")]
    #[case("0 30 9 * * * 2030", "2025-03-31T00:00:00+03:00", "2030-01-01T09:30:00+03:00")]
    #[timeout(Duration::from_secs(1))]
    fn test_expression_next(#[case] pattern: &str, #[case] from: &str, #[case] expected: &str) {
        let expression = Expression::new(pattern).unwrap();
        let from = DateTime::parse_from_rfc3339(from).unwrap();
        let next = expression.next(&from);

        if expected == "None" {
            assert!(
                next.is_none(),
                "pattern = {pattern}, expression = {expression}, from = {from}, next = {next:?}"
            );
        } else {
            assert!(
                next.is_some(),
                "pattern = {pattern}, expression = {expression}, from = {from}, next = {next:?}"
            );

            assert_eq!(
                next.unwrap().to_rfc3339(),
                expected,
                "pattern = {pattern}, expression = {expression}, from = {from}, next = {next:?}"
            );
        }
    }

    #[rstest]
    #[case(SixFieldLayout::SecondsFirst, "30 0 12 * * *", "30 0 12 * * * *")]
    #[case(SixFieldLayout::SecondsFirst, "0 0 12 * * MON", "0 0 12 * * 1 *")]
    #[case(SixFieldLayout::YearLast, "0 12 * * * 2030", "0 0 12 * * * 2030")]
    #[case(SixFieldLayout::YearLast, "*/5 * * * * 2024-2026", "0 0/5 * * * * 2024-2026")]
    #[case(SixFieldLayout::YearLast, "0 0 0 1 1 * 2030", "0 0 0 1 1 * 2030")]
    #[case(SixFieldLayout::YearLast, "* * * * *", "0 * * * * * *")]
    fn test_six_field_layout(#[case] layout: SixFieldLayout, #[case] input: &str, #[case] expected: &str) {
        let expression = Expression::with_options(input, Options::default().with_six_fields(layout)).unwrap();
        assert_eq!(expression.to_string(), expected);
    }

    #[test]
    fn test_year_last_exhausted() {
        let options = Options::default().with_six_fields(SixFieldLayout::YearLast);
        let expression = Expression::with_options("* * * * * 1980", options).unwrap();
        let from = DateTime::parse_from_rfc3339("2013-01-01T00:00:00Z").unwrap();

        assert_eq!(expression.next(&from), None);
        assert!(expression.next_n(&from, 5).is_empty());
    }

    #[template]
    #[rstest]
    #[case("* * * * * * *", "* * * * * * *")]
    #[case("* * * * * *", "* * * * * * *")]
    #[case("* * * * *", "0 * * * * * *")]
    #[case("*/5 * * * *", "0 0/5 * * * * *")]
    #[case("0 */15 */6 * * *", "0 0/15 0/6 * * * *")]
    #[case("0 0 ? 1 0", "0 0 0 ? 1 0 *")]
    #[case("0 0 * * SUN", "0 0 0 * * 0 *")]
    #[case("0 0 * * sunday", "0 0 0 * * 0 *")]
    #[case("0 0 * 1 7", "0 0 0 * 1 7 *")]
    #[case("0 0 1 1 ?", "0 0 0 1 1 ? *")]
    #[case("0 0 1 1 *", "0 0 0 1 1 * *")]
    #[case("0 0 12 * * MON", "0 0 12 * * 1 *")]
    #[case("0 0 22 * * 1-5", "0 0 22 * * 1-5 *")]
    #[case("0 0/5 14,18 * * *", "0 0/5 14,18 * * * *")]
    #[case("0 15 10 ? * MON-FRI", "0 15 10 ? * 1-5 *")]
    #[case("0 15 10 ? JAN-mar MON-FRI", "0 15 10 ? 1-3 1-5 *")]
    #[case("1,22,45 5/2 0-15 1-6/2 */6 * 2000", "1,22,45 5/2 0-15 1-6/2 1/6 * 2000")]
    #[case("23 0-20/2 * * *", "0 23 0-20/2 * * * *")]
    #[case("30 0 1 1 * *", "30 0 1 1 * * *")]
    #[case("5,10,15,20 * * * *", "0 5,10,15,20 * * * * *")]
    #[case("0 0 0 L,15W,LW * 5L,FRI#3", "0 0 0 L,15W,LW * 5L,5#3 *")]
    #[case("0 0 0 1 1 * 2024 extra tokens", "0 0 0 1 1 * 2024")]
    #[case("  0   0 0  1 1 *  ", "0 0 0 1 1 * *")]
    #[case("@yearly", "0 0 0 1 1 * *")]
    #[case("@annually", "0 0 0 1 1 * *")]
    #[case("@monthly", "0 0 0 1 * * *")]
    #[case("@weekly", "0 0 0 * * 0 *")]
    #[case("@daily", "0 0 0 * * * *")]
    #[case("@midnight", "0 0 0 * * * *")]
    #[case("@hourly", "0 0 * * * * *")]
    #[case("@hourly 2030", "0 0 * * * * *")]
    fn valid_expressions_to_test(#[case] input: &str) {}

    #[apply(valid_expressions_to_test)]
    fn test_expression_display_and_new(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(Expression::new(input).unwrap().to_string(), expected);
    }

    #[apply(valid_expressions_to_test)]
    fn test_canonical_form_parses_to_same_expression(#[case] input: &str, #[case] expected: &str) {
        let expression = Expression::new(input).unwrap();
        assert_eq!(Expression::new(expected).unwrap(), expression, "input = {input}");
    }

    #[apply(valid_expressions_to_test)]
    fn test_try_from_string(#[case] input: &str, #[case] _expected: &str) {
        // &str
        let expression1 = Expression::new(input).unwrap();
        let expression2 = Expression::try_from(input).unwrap();
        assert_eq!(expression1, expression2);

        // &String
        let tst_string = String::from(input);
        let expression2 = Expression::try_from(&tst_string).unwrap();
        assert_eq!(expression1, expression2);

        // String
        let expression2 = Expression::try_from(tst_string).unwrap();
        assert_eq!(expression1, expression2);

        // from_str
        let expression2 = Expression::from_str(input).unwrap();
        assert_eq!(expression1, expression2);
    }

    #[apply(valid_expressions_to_test)]
    fn test_expression_to_string(#[case] input: &str, #[case] expected: &str) {
        let expression = Expression::new(input).unwrap();

        let string: String = (&expression).into();
        assert_eq!(string, expected);

        let string: String = expression.into();
        assert_eq!(string, expected);
    }

    #[template]
    #[rstest]
    #[case("")]
    #[case("* * * *")]
    #[case("* * 10 * 1 MONDAY-FRY")]
    #[case("* * * * 2/7")]
    #[case("*,1 * * * *")]
    #[case("0 1 2 3 * * 1969")]
    #[case("0 0 0 ? * 6-1")]
    #[case("0 0 0 ? * 1#6")]
    #[case("0 ? * * *")]
    #[case("@minutely")]
    #[case("@HOURLY")]
    fn invalid_expressions_to_test(#[case] input: &str) {}

    #[apply(invalid_expressions_to_test)]
    fn test_invalid_expression_constructor(#[case] input: &str) {
        assert!(Expression::new(input).is_err(), "input = {input}");
    }

    #[apply(invalid_expressions_to_test)]
    fn test_try_from_invalid_string(#[case] input: &str) {
        assert!(Expression::try_from(input).is_err(), "input = {input}");
        assert!(Expression::from_str(input).is_err(), "input = {input}");
    }

    #[rstest]
    #[case("", 0)]
    #[case("* * * *", 4)]
    #[case("@minutely", 1)]
    #[case("@every 1h", 2)]
    fn test_field_count_error(#[case] input: &str, #[case] count: usize) {
        assert_eq!(
            Expression::new(input),
            Err(CronError::FieldCount {
                count,
                expression: input.to_string()
            })
        );
    }

    #[rstest]
    #[case("*/60 * * * * *", Field::Seconds)]
    #[case("* */61 * * * *", Field::Minutes)]
    #[case("2/60 * * * * *", Field::Seconds)]
    #[case("2-20/61 * * * * *", Field::Seconds)]
    #[case("0 0 */24 * * *", Field::Hours)]
    #[case("0 0 0 * * */7", Field::DayOfWeek)]
    #[case("0 0 0 */0 * *", Field::DayOfMonth)]
    fn test_interval_errors(#[case] input: &str, #[case] field: Field) {
        let err = Expression::new(input).unwrap_err();
        assert!(matches!(err, CronError::Interval { .. }), "input = {input}, err = {err:?}");
        assert_eq!(err.field(), Some(field));
    }

    #[test]
    fn test_must_parse() {
        assert_eq!(Expression::must_parse("0 0 * * MON"), Expression::new("0 0 * * MON").unwrap());
    }

    #[test]
    #[should_panic(expected = "invalid cron expression `0 0 * * FUNDAY`")]
    fn test_must_parse_panics() {
        Expression::must_parse("0 0 * * FUNDAY");
    }

    #[test]
    fn test_options_are_kept() {
        let options = Options::default()
            .with_leap(LeapPolicy::Unskip)
            .with_fall(FallPolicy::FireLate);
        let expression = Expression::with_options("0 30 2 * * *", options).unwrap();
        assert_eq!(expression.options(), options);
        assert_ne!(expression, Expression::new("0 30 2 * * *").unwrap());
    }

    #[rstest]
    #[case("0 0 12 * * MON", "2024-01-01T12:00:00Z", true)]
    #[case("0 0 12 * * MON", "2024-01-01T12:00:00.5Z", true)]
    #[case("0 0 12 * * MON", "2024-01-01T12:00:00+01:00", true)]
    #[case("0 0 12 * * MON", "2024-01-01T11:00:00Z", false)]
    #[case("0 0 0 L 2 *", "2024-02-29T00:00:00Z", true)]
    #[case("0 0 0 L 2 *", "2023-02-28T00:00:00Z", true)]
    #[case("0 0 0 L 2 *", "2024-02-28T00:00:00Z", false)]
    fn test_matches(#[case] pattern: &str, #[case] at: &str, #[case] expected: bool) {
        let expression = Expression::new(pattern).unwrap();
        let at = DateTime::parse_from_rfc3339(at).unwrap();
        assert_eq!(expression.matches(&at), expected, "pattern = {pattern}, at = {at}");
    }

    #[rstest]
    #[timeout(Duration::from_secs(1))]
    fn test_expression_iter() {
        let expression = Expression::new("0 0 12 * 1 MON 2024").unwrap();
        let mut iter = expression.iter(&DateTime::parse_from_rfc3339("2023-12-31T23:59:59+00:00").unwrap());

        assert_eq!(iter.next().unwrap().to_rfc3339(), "2024-01-01T12:00:00+00:00");
        assert_eq!(iter.next().unwrap().to_rfc3339(), "2024-01-08T12:00:00+00:00");
        assert_eq!(iter.next().unwrap().to_rfc3339(), "2024-01-15T12:00:00+00:00");
        assert_eq!(iter.next().unwrap().to_rfc3339(), "2024-01-22T12:00:00+00:00");
        assert_eq!(iter.next().unwrap().to_rfc3339(), "2024-01-29T12:00:00+00:00");
        assert_eq!(iter.next(), None);
    }

    #[rstest]
    #[timeout(Duration::from_secs(1))]
    fn test_expression_iter_every_second() {
        let expression = Expression::new("* * * * * *").unwrap();
        let mut iter = expression.iter(&DateTime::parse_from_rfc3339("2024-01-01T00:00:00.5+00:00").unwrap());

        assert_eq!(iter.next().unwrap().to_rfc3339(), "2024-01-01T00:00:01+00:00");
        assert_eq!(iter.next().unwrap().to_rfc3339(), "2024-01-01T00:00:02+00:00");
        assert_eq!(iter.next().unwrap().to_rfc3339(), "2024-01-01T00:00:03+00:00");
    }

    #[rstest]
    #[timeout(Duration::from_secs(1))]
    fn test_expression_iter_every_month() {
        let expression = Expression::new("13 13 12 * *").unwrap();
        let mut iter = expression.iter(&DateTime::parse_from_rfc3339("2024-01-12T13:13:00+00:00").unwrap());

        assert_eq!(iter.next().unwrap().to_rfc3339(), "2024-02-12T13:13:00+00:00");
        assert_eq!(iter.next().unwrap().to_rfc3339(), "2024-03-12T13:13:00+00:00");
        assert_eq!(iter.next().unwrap().to_rfc3339(), "2024-04-12T13:13:00+00:00");
    }

    #[rstest]
    #[timeout(Duration::from_secs(1))]
    fn test_expression_into_iter() {
        let expression = Expression::new("30 12 22 6 ?").unwrap();
        let from = Utc.with_ymd_and_hms(2021, 1, 12, 13, 13, 1).unwrap();
        let years = expression
            .into_iter(&from)
            .take(3)
            .map(|next| next.to_rfc3339())
            .collect::<Vec<_>>();

        assert_eq!(
            years,
            [
                "2021-06-22T12:30:00+00:00",
                "2022-06-22T12:30:00+00:00",
                "2023-06-22T12:30:00+00:00"
            ]
        );
    }

    #[rstest]
    #[case("0 0 0 1 1 * 2098-2099", 5, 2)]
    #[case("0 0 0 29 2 * 2090-2099", 5, 2)]
    #[case("0 0 * * * * *", 0, 0)]
    #[case("0 0 * * * * *", 24, 24)]
    fn test_next_n_len(#[case] pattern: &str, #[case] n: usize, #[case] expected: usize) {
        let expression = Expression::new(pattern).unwrap();
        let from = Utc.with_ymd_and_hms(2090, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(expression.next_n(&from, n).len(), expected);
    }

    #[cfg(feature = "tz")]
    mod tz {
        use super::super::*;
        use chrono::{DateTime, Utc};
        use rstest::rstest;
        use rstest_reuse::{apply, template};
        use std::time::Duration;

        #[template]
        #[rstest]
        #[case("TZ=Europe/Kyiv * * * * * * *", "TZ=Europe/Kyiv * * * * * * *")]
        #[case("TZ=Europe/London * * * * * *", "TZ=Europe/London * * * * * * *")]
        #[case("TZ=UTC * * * * *", "TZ=UTC 0 * * * * * *")]
        #[case("TZ=US/Pacific */5 * * * *", "TZ=US/Pacific 0 0/5 * * * * *")]
        #[case("TZ=EET 0 */15 */6 * * *", "TZ=EET 0 0/15 0/6 * * * *")]
        #[case("TZ=Asia/Tokyo @yearly", "TZ=Asia/Tokyo 0 0 0 1 1 * *")]
        #[case("Tz=Asia/Tokyo @yearly", "TZ=Asia/Tokyo 0 0 0 1 1 * *")]
        #[case("tz=Europe/Paris @yearly", "TZ=Europe/Paris 0 0 0 1 1 * *")]
        fn valid_expressions_to_test(#[case] input: &str, #[case] expected: &str) {}

        #[apply(valid_expressions_to_test)]
        fn test_expression_display_and_new(#[case] input: &str, #[case] expected: &str) {
            assert_eq!(Expression::new(input).unwrap().to_string(), expected);
        }

        #[apply(valid_expressions_to_test)]
        fn test_try_from_string(#[case] input: &str, #[case] _expected: &str) {
            let expression1 = Expression::new(input).unwrap();
            assert_eq!(expression1, Expression::try_from(input).unwrap());
            assert_eq!(expression1, Expression::try_from(&String::from(input)).unwrap());
            assert_eq!(expression1, Expression::try_from(String::from(input)).unwrap());
            assert_eq!(expression1, Expression::from_str(input).unwrap());
        }

        #[template]
        #[rstest]
        #[case("TZ * * * *")]
        #[case("TZ= * * ? * ?")]
        #[case("tz=UTC * * 10 * 8")]
        #[case("TZ=Aaa/Bbb * * * * 2/2")]
        #[case("TZ=Aaa/Bbb * * * * *")]
        #[case("TZ =UTC * * * * *")]
        #[case("TZ= UTC * * * * *")]
        #[case("TZ = UTC * * * * *")]
        #[case("TZ= 0 0 0 ? * 1-6")]
        #[case("tz= @hourly")]
        fn invalid_expressions_to_test(#[case] input: &str) {}

        #[apply(invalid_expressions_to_test)]
        fn test_invalid_expression_constructor(#[case] input: &str) {
            assert!(Expression::new(input).is_err(), "input = {input}");
        }

        #[apply(invalid_expressions_to_test)]
        fn test_try_from_invalid_string(#[case] input: &str) {
            assert!(Expression::try_from(input).is_err(), "input = {input}");
            assert!(Expression::from_str(input).is_err(), "input = {input}");
        }

        #[test]
        fn test_invalid_time_zone_error() {
            assert_eq!(
                Expression::new("TZ=Mars/Olympus_Mons * * * * *"),
                Err(CronError::InvalidTimeZone("Mars/Olympus_Mons".to_string()))
            );
        }

        #[rstest]
        #[case("TZ=Europe/Kyiv @monthly", "2025-03-31T00:00:21Z", "2025-03-31T21:00:00+00:00")]
        #[case("TZ=Europe/Kyiv @monthly", "2025-03-31T00:00:21+02:00", "2025-03-31T23:00:00+02:00")]
        #[case("TZ=Europe/Kyiv @monthly", "2025-11-30T00:00:21Z", "2025-11-30T22:00:00+00:00")]
        #[case("TZ=America/Los_Angeles 0 30 2 * * *", "2014-03-09T08:00:00Z", "2014-03-10T09:30:00+00:00")]
        #[timeout(Duration::from_secs(1))]
        fn test_expression_next(#[case] pattern: &str, #[case] from: &str, #[case] expected: &str) {
            let expression = Expression::new(pattern).unwrap();
            let from = DateTime::parse_from_rfc3339(from).unwrap();
            let next = expression.next(&from);

            assert_eq!(
                next.map(|next| next.to_rfc3339()).as_deref(),
                Some(expected),
                "pattern = {pattern}, expression = {expression}, from = {from}"
            );
        }

        #[rstest]
        #[case("TZ=Asia/Tokyo 0 0 9 * * *", "2024-01-01T00:00:00Z", true)]
        #[case("TZ=Asia/Tokyo 0 0 9 * * *", "2024-01-01T09:00:00Z", false)]
        fn test_matches_in_expression_time_zone(#[case] pattern: &str, #[case] at: &str, #[case] expected: bool) {
            let expression = Expression::new(pattern).unwrap();
            let at = DateTime::parse_from_rfc3339(at).unwrap().with_timezone(&Utc);
            assert_eq!(expression.matches(&at), expected);
        }
    }
}
