use crate::pattern::Field;
use thiserror::Error;

/// Errors reported while parsing a cron expression.
///
/// Parsing is atomic: any of these means no [`Expression`](crate::Expression) was built.
#[derive(Debug, Error, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CronError {
    /// Field text doesn't match the field grammar.
    #[error("invalid {field} field syntax: `{text}`")]
    Syntax {
        /// Field where the error was found.
        field: Field,
        /// Raw text of the offending item.
        text: String,
    },
    /// Numeric value or range is outside of the field's bounds.
    #[error("{field} value out of range: `{token}`")]
    Range {
        /// Field where the error was found.
        field: Field,
        /// Offending token.
        token: String,
    },
    /// Step divisor is zero or not smaller than the number of field values.
    #[error("invalid {field} interval: `{token}`")]
    Interval {
        /// Field where the error was found.
        field: Field,
        /// Offending token.
        token: String,
    },
    /// Expression has fewer than five fields.
    #[error("expected at least 5 fields, found {count}: `{expression}`")]
    FieldCount {
        /// Number of fields found.
        count: usize,
        /// Whole expression text.
        expression: String,
    },
    /// Unknown time zone in the `TZ=` prefix.
    #[cfg(feature = "tz")]
    #[error("invalid time zone: {0}")]
    InvalidTimeZone(String),
}

impl CronError {
    pub(crate) fn syntax(field: Field, text: &str) -> Self {
        Self::Syntax {
            field,
            text: text.to_owned(),
        }
    }

    pub(crate) fn range(field: Field, token: &str) -> Self {
        Self::Range {
            field,
            token: token.to_owned(),
        }
    }

    pub(crate) fn interval(field: Field, token: &str) -> Self {
        Self::Interval {
            field,
            token: token.to_owned(),
        }
    }

    /// Returns the field the error refers to, if any.
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::Syntax { field, .. } | Self::Range { field, .. } | Self::Interval { field, .. } => Some(*field),
            _ => None,
        }
    }
}
