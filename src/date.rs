//! Lenient parsing of the provider's `Date` field
//!
//! The date is usually RFC 2822 (`Wed, 6 Sep 2017 19:11:00 +0200`) but may
//! carry trailing comments such as `(CEST)` or even truncated garbage like
//! `(West-Europe (stand`. Only the five tokens that matter are kept.

use chrono::format::{DelayedFormat, StrftimeItems};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Three-letter weekday names removed before parsing
pub const DAY_ABBREVIATIONS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Day, month, year, time, offset
const KEPT_TOKENS: usize = 5;

/// A point in time together with the UTC offset it was expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    datetime: DateTime<FixedOffset>,
    fallback: bool,
}

impl Timestamp {
    /// Parse a provider date string, never failing.
    ///
    /// Unparsable input yields [`Timestamp::fallback`].
    #[must_use]
    pub fn parse(date: &str) -> Self {
        let normalized = Self::normalize(date);

        match DateTime::parse_from_rfc2822(&normalized) {
            Ok(datetime) => Self {
                datetime,
                fallback: false,
            },
            Err(e) => {
                debug!("Unparsable date {date:?} (normalized {normalized:?}): {e}");
                Self::fallback()
            }
        }
    }

    /// Drop weekday tokens, collapse repeated spaces, and discard everything
    /// after the fifth remaining token.
    #[must_use]
    pub fn normalize(date: &str) -> String {
        date.split(' ')
            .filter(|token| !token.is_empty() && !is_day_abbreviation(token))
            .take(KEPT_TOKENS)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The Unix epoch at `+00:00`, used whenever a date cannot be read
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            datetime: DateTime::<Utc>::default().fixed_offset(),
            fallback: true,
        }
    }

    /// Whether this value came from [`Timestamp::fallback`]
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        self.fallback
    }

    #[must_use]
    pub const fn datetime(&self) -> DateTime<FixedOffset> {
        self.datetime
    }

    /// The UTC offset label, e.g. `+02:00`
    #[must_use]
    pub fn timezone_name(&self) -> String {
        self.datetime.offset().to_string()
    }

    #[must_use]
    pub fn is_utc(&self) -> bool {
        self.datetime.offset().local_minus_utc() == 0
    }

    /// The same instant expressed in UTC
    #[must_use]
    pub fn in_utc_timezone(&self) -> DateTime<Utc> {
        self.datetime.with_timezone(&Utc)
    }

    /// Format with strftime-style specifiers, in the original offset
    #[must_use]
    pub fn format<'a>(&self, fmt: &'a str) -> DelayedFormat<StrftimeItems<'a>> {
        self.datetime.format(fmt)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.datetime.to_rfc2822())
    }
}

fn is_day_abbreviation(token: &str) -> bool {
    let token = token.trim_matches(',');
    DAY_ABBREVIATIONS
        .iter()
        .any(|day| day.eq_ignore_ascii_case(token))
}
