//! Cron expression parser with next-occurrence search and DST-aware time resolution.
#![deny(unsafe_code, missing_docs)]

//! This crate is intended to:
//! - parse cron expressions with POSIX semantics and popular extensions (seconds, years, `L`, `W`, `#`);
//! - find the next instant(s) an expression fires at, starting from any reference time;
//! - resolve nonexistent and repeated local times around daylight saving time transitions
//!   according to configurable policies.
//!
//! _This is not a cron jobs scheduler or runner._
//!
//! ## Cron expression format
//!
//! Traditional cron expression has 5 fields: minutes, hours, days of month, months and days of week.
//! Two optional fields may be added, seconds and years:
//! - 5 fields: _seconds_ is `0` and _years_ is `*`;
//! - 6 fields: _seconds_ comes first and _years_ is `*`, unless [`SixFieldLayout::YearLast`] is set in [`Options`];
//! - 7 fields: seconds, minutes, hours, days of month, months, days of week and years;
//! - fields after the 7th are ignored.
//!
//! The table below describes valid values and patterns of each field:
//!
//! | Field        | Required | Allowed values  | Allowed special characters |
//! |--------------|----------|-----------------|----------------------------|
//! | Seconds      | No       | 0-59            | * , - /                    |
//! | Minutes      | Yes      | 0-59            | * , - /                    |
//! | Hours        | Yes      | 0-23            | * , - /                    |
//! | Day of Month | Yes      | 1-31            | * , - / ? L W              |
//! | Month        | Yes      | 1-12 or JAN-DEC | * , - /                    |
//! | Day of Week  | Yes      | 0-7 or SUN-SAT  | * , - / ? L #              |
//! | Year         | No       | 1970-2099       | * , - /                    |
//!
//! Patterns meanings:
//! - `*` - each possible value, i.e. `0,1,2,...,59` for minutes;
//! - `?` - same as `*`, allowed in days of month and days of week only;
//! - `,` - list of values or patterns, i.e. `1,7,12`, `SUN,FRI`; `*` and `?` can't be list items;
//! - `-` - range of values, i.e. `0-15`, `JAN-MAR`;
//! - `/` - repeating values, i.e. `*/12`, `10/5`, `30-59/2`; the step should be less than the number of field values;
//! - `L` - last day of the month (for month field), or last particular day of the week (for weekday field), i.e. `L` or `5L`;
//! - `W` - the weekday (not Sunday or Saturday), nearest to the specified day of month in the same month, i.e. `22W` or `LW`;
//! - `#` - specific day of the week, i.e. `fri#1`, `1#4`, `6#5`.
//!
//! Both `0` and `7` mean Sunday. Names of months and weekdays may be short (`JAN`, `MON`) or full (`January`, `Monday`), case doesn't matter.
//!
//! If both days of month and days of week are restricted, a day matches if it satisfies **either** of them:
//! `0 0 1,15 * MON` fires on the 1st, on the 15th and on every Monday.
//!
//! Also, short aliases for well-known expressions are allowed:
//!
//! | Alias                      | Expression    |
//! |----------------------------|---------------|
//! | `@yearly` (or `@annually`) | 0 0 0 1 1 * * |
//! | `@monthly`                 | 0 0 0 1 * * * |
//! | `@weekly`                  | 0 0 0 * * 0 * |
//! | `@daily` (or `@midnight`)  | 0 0 0 * * * * |
//! | `@hourly`                  | 0 0 * * * * * |
//!
//! ### Expression with timezone
//! If `tz` feature is enabled, it's possible to prefix an expression with timezone, for example:
//! - `TZ=Europe/Paris @monthly`
//! - `TZ=EET 0 12 * * *`
//!
//! Such expression is evaluated in its own timezone, and results are converted back to the timezone of the reference time.
//!
//! ## Daylight saving time
//!
//! Expression fields describe local (wall clock) time, which may not exist or may happen twice
//! around DST transitions. [`Options`] control what happens then:
//! - [`LeapPolicy`]: nonexistent time (clocks jump forward) is skipped by default,
//!   or is shifted forward by the length of the gap with [`LeapPolicy::Unskip`];
//! - [`FallPolicy`]: repeated time (clocks fall back) fires at its first occurrence by default,
//!   at the second one with [`FallPolicy::FireLate`], or at both with [`FallPolicy::FireBoth`].
//!
//! ## How to use
//!
//! The main entity of the crate is an [`Expression`] structure, which has these basic methods:
//! - [new()](Expression::new) and [with_options()](Expression::with_options): constructors to parse and validate an expression;
//! - [next()](Expression::next): returns time of the next event strictly after the provided timestamp;
//! - [next_n()](Expression::next_n): returns up to `n` next events;
//! - [iter()](Expression::iter): returns an `Iterator` which produces a series of timestamps;
//! - [matches()](Expression::matches): checks if the timestamp satisfies the expression.
//!
//! ### Example with `next`
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use cron_next::{Expression, Result};
//!
//! fn next() -> Result<()> {
//!     let expression = Expression::new("0 0 * * 6#5")?;
//!     let from = Utc.with_ymd_and_hms(2013, 9, 2, 0, 0, 0).unwrap();
//!
//!     // The fifth Saturday of a month
//!     let next = expression.next(&from);
//!     assert_eq!(next, Some(Utc.with_ymd_and_hms(2013, 11, 30, 0, 0, 0).unwrap()));
//!
//!     Ok(())
//! }
//! # next().unwrap();
//! ```
//!
//! ### Example with `iter`
//! ```rust
//! use chrono::Utc;
//! use cron_next::{Expression, Result};
//!
//! fn iterator() -> Result<()> {
//!     let expression = Expression::new("0 0 0 * * *")?;
//!     let now = Utc::now();
//!
//!     // Get the next 10 timestamps starting from now
//!     expression.iter(&now).take(10).for_each(|t| println!("next: {t}"));
//!
//!     Ok(())
//! }
//! # iterator().unwrap();
//! ```
//!
//! # Feature flags
//! * `serde`: adds [`Serialize`](https://docs.rs/serde/latest/serde/trait.Serialize.html) and [`Deserialize`](https://docs.rs/serde/latest/serde/trait.Deserialize.html) trait implementation for [`Expression`] and [`Options`].
//! * `tz`: enables support of [expressions with timezone](#expression-with-timezone).

mod days;
mod dst;
/// Crate specific Error implementation.
pub mod error;
/// Cron expression parser and next event finder.
pub mod expression;
pub mod options;
mod pattern;
mod search;
mod set;
mod utils;

// Re-export of public entities.
pub use error::CronError;
pub use expression::Expression;
pub use options::{FallPolicy, LeapPolicy, Options, SixFieldLayout};
pub use pattern::{Field, MAX_YEAR, MIN_YEAR};

/// Convenient alias for `Result`.
pub type Result<T, E = CronError> = std::result::Result<T, E>;
