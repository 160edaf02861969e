//! Date-only value with a compact `MM-YYYY` display form.
//!
//! [`DateValue`] has three surfaces:
//! - display text (JSON): written as `MM-YYYY`, `null` when absent
//! - input text: `MM-YYYY`, RFC 3339 timestamps and `YYYY-MM-DD` are accepted
//! - storage: `YYYY-MM-DD` text, SQL `NULL` when absent
//!
//! Only the display form is lossy. A date read from storage keeps its day.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DateError;

/// Layout of the display form.
pub const DISPLAY_FORMAT: &str = "%m-%Y";

/// Layout used for storage and for plain ISO dates.
pub const STORAGE_FORMAT: &str = "%Y-%m-%d";

/// A calendar date that may be absent.
///
/// The absent value stands in for "no date" everywhere: it parses from `""`
/// and `"null"`, formats to JSON `null` and is stored as SQL `NULL`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateValue(Option<NaiveDate>);

impl DateValue {
    /// The absent date.
    pub const ABSENT: Self = Self(None);

    /// Wraps a calendar date.
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(Some(date))
    }

    /// Builds a date from its parts, returning `None` if they are out of range.
    #[must_use]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::new)
    }

    /// Returns true for the absent date.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        self.0.is_none()
    }

    /// Parses date text.
    ///
    /// Layouts are tried in order: `MM-YYYY` (first of the month), RFC 3339
    /// (calendar date in the timestamp's own offset), then `YYYY-MM-DD`.
    /// `""` and `"null"` give the absent date.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidFormat`] if no layout matches.
    pub fn parse(text: &str) -> Result<Self, DateError> {
        if text.is_empty() || text == "null" {
            return Ok(Self::ABSENT);
        }

        parse_month_year(text)
            .or_else(|| {
                DateTime::parse_from_rfc3339(text)
                    .ok()
                    .map(|ts| ts.date_naive())
            })
            .or_else(|| parse_iso_date(text))
            .map(Self::new)
            .ok_or_else(|| DateError::InvalidFormat {
                input: text.to_string(),
            })
    }

    /// Formats to the display form, `None` when absent.
    #[must_use]
    pub fn format(&self) -> Option<String> {
        self.0.map(|d| d.format(DISPLAY_FORMAT).to_string())
    }

    /// Converts to the value bound into SQL.
    #[must_use]
    pub fn to_storage(&self) -> Option<String> {
        self.0.map(|d| d.format(STORAGE_FORMAT).to_string())
    }

    /// Converts a stored column value back into a date.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidFormat`] if the stored text is not `YYYY-MM-DD`.
    pub fn from_storage(value: Option<&str>) -> Result<Self, DateError> {
        value.map_or(Ok(Self::ABSENT), |text| {
            parse_iso_date(text)
                .map(Self::new)
                .ok_or_else(|| DateError::InvalidFormat {
                    input: text.to_string(),
                })
        })
    }
}

/// Storage mapping for nullable date columns.
///
/// `None` and the absent date both become SQL `NULL`.
#[must_use]
pub fn optional_to_storage(value: Option<DateValue>) -> Option<String> {
    value.and_then(|d| d.to_storage())
}

/// Parses strict `MM-YYYY`.
fn parse_month_year(text: &str) -> Option<NaiveDate> {
    let (month, year) = text.split_once('-')?;
    let all_digits = month
        .bytes()
        .chain(year.bytes())
        .all(|b| b.is_ascii_digit());
    if month.len() != 2 || year.len() != 4 || !all_digits {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

/// Parses strict `YYYY-MM-DD`.
///
/// `%Y` alone would also take signed or expanded years, whose text does not
/// sort chronologically in storage.
fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    let bytes = text.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shape_ok {
        return None;
    }
    NaiveDate::parse_from_str(text, STORAGE_FORMAT).ok()
}

impl From<NaiveDate> for DateValue {
    fn from(date: NaiveDate) -> Self {
        Self::new(date)
    }
}

impl FromStr for DateValue {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format() {
            Some(text) => f.write_str(&text),
            None => f.write_str("null"),
        }
    }
}

impl Serialize for DateValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.format() {
            Some(text) => serializer.serialize_str(&text),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for DateValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = Option::<String>::deserialize(deserializer)?;
        text.map_or(Ok(Self::ABSENT), |t| {
            Self::parse(&t).map_err(serde::de::Error::custom)
        })
    }
}
