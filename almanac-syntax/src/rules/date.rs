use std::fmt::Display;
use std::str::FromStr;

// Reexport Weekday from chrono as part of the public type.
pub use chrono::Weekday;

use crate::display::{month_str, wday_str, write_days_offset};
use crate::error::{Error, Result};

/// Number of days of each solar month on a leap year.
const MAX_SOLAR_DAYS: [u8; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Lunar months have either 29 or 30 days, depending on the year.
pub const MAX_LUNAR_DAY: u8 = 30;

/// Check that `month`/`day` can designate a solar date, on at least leap
/// years.
pub fn check_solar(month: u8, day: u8) -> Result<()> {
    let max_day = usize::from(month)
        .checked_sub(1)
        .and_then(|idx| MAX_SOLAR_DAYS.get(idx))
        .ok_or(Error::InvalidMonth { month, lunar: false })?;

    if !(1..=*max_day).contains(&day) {
        return Err(Error::InvalidDay { month, day, lunar: false });
    }

    Ok(())
}

/// Check that `month`/`day` is in the range of lunar dates. Note that it is
/// not enough to ensure that such a date exists on any given year.
pub fn check_lunar(month: u8, day: u8) -> Result<()> {
    if !(1..=12).contains(&month) {
        return Err(Error::InvalidMonth { month, lunar: true });
    }

    if !(1..=MAX_LUNAR_DAY).contains(&day) {
        return Err(Error::InvalidDay { month, day, lunar: true });
    }

    Ok(())
}

// DateRule

/// How the date of a rule is computed each year.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum DateRule {
    /// Same solar month and day every year.
    Fixed { month: u8, day: u8 },
    /// The `nth` (starting at 1) given weekday of a solar month.
    NthWeekday {
        month: u8,
        weekday: Weekday,
        nth: u8,
    },
    /// The last given weekday of a solar month.
    LastWeekday { month: u8, weekday: Weekday },
    /// A solar date only occurring on years `anchor + k * step`.
    Cycle {
        month: u8,
        day: u8,
        anchor: i32,
        step: u16,
    },
    /// Gregorian easter sunday, shifted by a number of days.
    Easter { offset: i64 },
    /// A day of the chinese lunisolar calendar, shifted by a number of days.
    Lunar { month: u8, day: u8, offset: i64 },
}

impl DateRule {
    /// Build a fixed solar rule, checking that the input date is valid.
    ///
    /// ```
    /// use almanac_syntax::rules::DateRule;
    ///
    /// assert!(DateRule::fixed(2, 29).is_ok());
    /// assert!(DateRule::fixed(4, 31).is_err());
    /// ```
    pub fn fixed(month: u8, day: u8) -> Result<Self> {
        check_solar(month, day)?;
        Ok(Self::Fixed { month, day })
    }

    /// Build a lunar rule with no offset, checking that the input is in the
    /// range of lunar dates.
    ///
    /// ```
    /// use almanac_syntax::rules::DateRule;
    ///
    /// assert!(DateRule::lunar(5, 30).is_ok());
    /// assert!(DateRule::lunar(5, 31).is_err());
    /// ```
    pub fn lunar(month: u8, day: u8) -> Result<Self> {
        check_lunar(month, day)?;
        Ok(Self::Lunar { month, day, offset: 0 })
    }

    /// Build the rule described by the `(month, day, is_lunar)` triple that
    /// custom rules are stored as.
    pub fn from_triple(month: u8, day: u8, is_lunar: bool) -> Result<Self> {
        if is_lunar {
            Self::lunar(month, day)
        } else {
            Self::fixed(month, day)
        }
    }

    /// Month this rule is anchored to, if it is anchored to a single month.
    pub fn month(&self) -> Option<u8> {
        match *self {
            Self::Fixed { month, .. }
            | Self::NthWeekday { month, .. }
            | Self::LastWeekday { month, .. }
            | Self::Cycle { month, .. }
            | Self::Lunar { month, .. } => Some(month),
            Self::Easter { .. } => None,
        }
    }

    /// Day of the month this rule is anchored to, if there is one.
    pub fn day(&self) -> Option<u8> {
        match *self {
            Self::Fixed { day, .. } | Self::Cycle { day, .. } | Self::Lunar { day, .. } => {
                Some(day)
            }
            Self::NthWeekday { .. } | Self::LastWeekday { .. } | Self::Easter { .. } => None,
        }
    }

    /// Return `true` if this rule falls on the same solar date every year.
    #[inline]
    pub fn is_fixed(&self) -> bool {
        matches!(self, Self::Fixed { .. })
    }

    #[inline]
    pub fn is_lunar(&self) -> bool {
        matches!(self, Self::Lunar { .. })
    }
}

impl Display for DateRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Fixed { month, day } => write!(f, "{} {day:02}", month_str(month)),
            Self::NthWeekday { month, weekday, nth } => {
                write!(f, "{}[{nth}] {}", wday_str(weekday), month_str(month))
            }
            Self::LastWeekday { month, weekday } => {
                write!(f, "{}[-1] {}", wday_str(weekday), month_str(month))
            }
            Self::Cycle { month, day, anchor, step } => {
                write!(f, "{anchor}/{step} {} {day:02}", month_str(month))
            }
            Self::Easter { offset } => {
                write!(f, "easter")?;
                write_days_offset(f, offset)
            }
            Self::Lunar { month, day, offset } => {
                write!(f, "lunar {month:02}-{day:02}")?;
                write_days_offset(f, offset)
            }
        }
    }
}

impl FromStr for DateRule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        crate::parse(s)
    }
}
