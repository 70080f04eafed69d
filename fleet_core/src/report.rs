//! Correlative report numbering.
//!
//! Every stored event carries a report number like "MGPS-0001". The number
//! is kept as an integer next to its prefix so deriving the next one never
//! re-parses the formatted string; parsing only happens at text boundaries
//! (user input, serialized data) where it is guarded.

use crate::{store::EventStore, Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default prefix for correlative report numbers
pub const DEFAULT_PREFIX: &str = "MGPS";

/// A correlative report identifier: a prefix plus a sequence number.
///
/// Displays and serializes as "PREFIX-NNNN" with the number zero-padded to
/// at least four digits.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ReportNumber {
    prefix: String,
    number: u32,
}

impl ReportNumber {
    pub fn new(prefix: impl Into<String>, number: u32) -> Self {
        Self {
            prefix: prefix.into(),
            number,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The numeric suffix, e.g. 1 for "MGPS-0001"
    pub fn number(&self) -> u32 {
        self.number
    }

    /// The report number that follows this one, same prefix
    pub fn successor(&self) -> ReportNumber {
        ReportNumber {
            prefix: self.prefix.clone(),
            number: self.number + 1,
        }
    }
}

impl fmt::Display for ReportNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:04}", self.prefix, self.number)
    }
}

impl FromStr for ReportNumber {
    type Err = Error;

    /// Parse "PREFIX-NNNN". The prefix may itself contain dashes; the
    /// numeric part is everything after the last one.
    fn from_str(s: &str) -> Result<Self> {
        let (prefix, digits) = s
            .rsplit_once('-')
            .ok_or_else(|| Error::InvalidReportNumber(s.to_string()))?;

        if prefix.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidReportNumber(s.to_string()));
        }

        let number: u32 = digits
            .parse()
            .map_err(|_| Error::InvalidReportNumber(s.to_string()))?;

        Ok(ReportNumber {
            prefix: prefix.to_string(),
            number,
        })
    }
}

impl From<ReportNumber> for String {
    fn from(value: ReportNumber) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for ReportNumber {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Derives the next correlative report number for a store.
#[derive(Clone, Debug)]
pub struct ReportNumberer {
    prefix: String,
}

impl ReportNumberer {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The next report number for `store`: PREFIX-0001 when the store is
    /// empty, otherwise one past the last stored event's number.
    pub fn next(&self, store: &EventStore) -> ReportNumber {
        match store.last() {
            Some(event) => event.report_number.successor(),
            None => ReportNumber::new(self.prefix.clone(), 1),
        }
    }
}

impl Default for ReportNumberer {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}
