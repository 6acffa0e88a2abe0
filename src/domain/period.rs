//! Lookback periods and their persisted tags.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::DomainError;

/// Unit of a lookback period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodUnit {
    Hours,
    Days,
    Weeks,
}

impl PeriodUnit {
    const fn suffix(self) -> char {
        match self {
            Self::Hours => 'h',
            Self::Days => 'd',
            Self::Weeks => 'w',
        }
    }
}

/// A lookback window such as `30d`.
///
/// The canonical text form doubles as the period tag that scopes persisted
/// recommendations, so `"30d"` and `"030d"` address the same rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    amount: u32,
    unit: PeriodUnit,
}

impl Period {
    /// Create a period of `amount` units. `amount` must be at least 1.
    pub fn new(amount: u32, unit: PeriodUnit) -> Result<Self, DomainError> {
        if amount == 0 {
            return Err(DomainError::InvalidPeriod {
                input: format!("0{}", unit.suffix()),
            });
        }
        Ok(Self { amount, unit })
    }

    /// Create a period of whole days.
    pub fn days(amount: u32) -> Result<Self, DomainError> {
        Self::new(amount, PeriodUnit::Days)
    }

    /// Length of the window.
    #[must_use]
    pub fn duration(&self) -> Duration {
        let amount = i64::from(self.amount);
        match self.unit {
            PeriodUnit::Hours => Duration::hours(amount),
            PeriodUnit::Days => Duration::days(amount),
            PeriodUnit::Weeks => Duration::weeks(amount),
        }
    }

    /// Start of the window ending at `now`.
    #[must_use]
    pub fn since(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_signed(self.duration())
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Canonical tag used to scope persisted rows.
    #[must_use]
    pub fn tag(&self) -> String {
        self.to_string()
    }
}

impl Default for Period {
    fn default() -> Self {
        Self {
            amount: 30,
            unit: PeriodUnit::Days,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit.suffix())
    }
}

impl FromStr for Period {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidPeriod {
            input: s.to_string(),
        };

        let trimmed = s.trim().to_ascii_lowercase();
        let mut chars = trimmed.chars();
        let unit = match chars.next_back() {
            Some('h') => PeriodUnit::Hours,
            Some('d') => PeriodUnit::Days,
            Some('w') => PeriodUnit::Weeks,
            _ => return Err(invalid()),
        };
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let amount: u32 = digits.parse().map_err(|_| invalid())?;
        Self::new(amount, unit).map_err(|_| invalid())
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
