#![doc = include_str!("../README.md")]

pub mod fmt;

use std::fmt::Display;
use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};
use icu_calendar::cal::Chinese;
use icu_calendar::Date;

/// Range of gregorian years that conversions accept, outer years are rejected
/// before reaching the astronomical computations.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1..=9998;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The year is outside of [`SUPPORTED_YEARS`].
    OutOfRange { year: i32 },
    /// There is no such month in the lunar year.
    InvalidMonth { year: i32, month: u8, leap: bool },
    /// There is no such day in the lunar month, most likely because it has
    /// only 29 days this year.
    InvalidDay { year: i32, month: u8, day: u8 },
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange { year } => write!(
                f,
                "year {year} is out of the supported range {}-{}",
                SUPPORTED_YEARS.start(),
                SUPPORTED_YEARS.end(),
            ),
            Self::InvalidMonth { year, month, leap } => {
                let leap = if *leap { "leap " } else { "" };
                write!(f, "there is no {leap}month {month} in lunar year {year}")
            }
            Self::InvalidDay { year, month, day } => {
                write!(f, "there is no day {day} in month {month} of lunar year {year}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// A day of the chinese lunisolar calendar.
///
/// The year is the gregorian year in which the lunar year starts, which is
/// how lunar years are usually numbered in calendars.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct LunarDate {
    pub year: i32,
    pub month: u8,
    pub is_leap_month: bool,
    pub day: u8,
}

impl LunarDate {
    /// Find the lunar date of a gregorian date.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use lunar_calendar::LunarDate;
    ///
    /// // Chinese new year's eve of 2016's lunar year
    /// let date = NaiveDate::from_ymd_opt(2017, 1, 27).unwrap();
    /// let lunar = LunarDate::from_solar(date).unwrap();
    /// assert_eq!((lunar.year, lunar.month, lunar.day), (2016, 12, 30));
    /// ```
    pub fn from_solar(date: NaiveDate) -> Result<Self> {
        let year = date.year();

        if !SUPPORTED_YEARS.contains(&year) {
            return Err(Error::OutOfRange { year });
        }

        let iso = Date::try_new_iso(
            year,
            date.month().try_into().expect("month always fits a byte"),
            date.day().try_into().expect("day always fits a byte"),
        )
        .map_err(|_| Error::OutOfRange { year })?;

        let lunar = iso.to_calendar(Chinese::new());
        let month_info = lunar.month();

        let (month, is_leap_month) = parse_month_code(month_info.standard_code.0.as_str())
            .ok_or(Error::InvalidMonth { year, month: month_info.ordinal, leap: false })?;

        Ok(Self {
            year: lunar.cyclic_year().related_iso,
            month,
            is_leap_month,
            day: lunar.day_of_month().0,
        })
    }

    /// Find the gregorian date for this lunar date.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use lunar_calendar::LunarDate;
    ///
    /// let leap = LunarDate { year: 2017, month: 6, is_leap_month: true, day: 1 };
    /// assert_eq!(leap.to_solar(), Ok(NaiveDate::from_ymd_opt(2017, 7, 23).unwrap()));
    ///
    /// let leap = LunarDate { year: 2017, month: 5, is_leap_month: true, day: 1 };
    /// assert!(leap.to_solar().is_err());
    /// ```
    pub fn to_solar(&self) -> Result<NaiveDate> {
        let Self { year, month, is_leap_month, day } = *self;

        if !SUPPORTED_YEARS.contains(&year) {
            return Err(Error::OutOfRange { year });
        }

        if !(1..=12).contains(&month) {
            return Err(Error::InvalidMonth { year, month, leap: is_leap_month });
        }

        if !(1..=30).contains(&day) {
            return Err(Error::InvalidDay { year, month, day });
        }

        let ordinal = ordinal_month(year, month, is_leap_month)?;

        let lunar = Date::try_new_chinese_with_calendar(year, ordinal, day, Chinese::new())
            .map_err(|_| Error::InvalidDay { year, month, day })?;

        let iso = lunar.to_iso();

        NaiveDate::from_ymd_opt(
            iso.extended_year(),
            iso.month().ordinal.into(),
            iso.day_of_month().0.into(),
        )
        .ok_or(Error::OutOfRange { year: iso.extended_year() })
    }

    /// Name of the month, such as `"正月"` or `"闰四月"`.
    pub fn month_label(&self) -> String {
        fmt::month(self.month, self.is_leap_month)
    }

    /// Name of the day, such as `"初一"` or `"廿九"`.
    pub fn day_label(&self) -> String {
        fmt::day(self.day)
    }

    /// Sexagenary name of the lunar year, such as `"甲辰"`.
    pub fn gan_zhi_year(&self) -> String {
        fmt::sexagenary(sexagenary_for_year(self.year))
    }

    /// Zodiac animal of the lunar year, such as `"龙"`.
    pub fn zodiac(&self) -> &'static str {
        fmt::zodiac(sexagenary_for_year(self.year))
    }
}

impl Display for LunarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}年{}{}",
            self.gan_zhi_year(),
            self.month_label(),
            self.day_label()
        )
    }
}

/// Find the gregorian date of a day in a common (non-leap) month of a lunar
/// year.
///
/// ```
/// use chrono::NaiveDate;
///
/// assert_eq!(
///     lunar_calendar::to_solar(2024, 1, 1),
///     Ok(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap()),
/// );
///
/// // The 7th month of 2000 only has 29 days
/// assert!(lunar_calendar::to_solar(2000, 7, 30).is_err());
/// ```
pub fn to_solar(year: i32, month: u8, day: u8) -> Result<NaiveDate> {
    LunarDate { year, month, is_leap_month: false, day }.to_solar()
}

/// Get the position of the sexagenary cycle for a year, in `1..=60`.
///
/// ```
/// assert_eq!(lunar_calendar::sexagenary_for_year(1984), 1);
/// assert_eq!(lunar_calendar::sexagenary_for_year(2000), 17);
/// ```
pub fn sexagenary_for_year(year: i32) -> u32 {
    (year.rem_euclid(60).unsigned_abs() + 2696) % 60 + 1
}

/// Parse a month code such as `M05` or `M05L`.
fn parse_month_code(code: &str) -> Option<(u8, bool)> {
    let num = code.strip_prefix('M')?;

    let (num, leap) = match num.strip_suffix('L') {
        Some(num) => (num, true),
        None => (num, false),
    };

    Some((num.parse().ok()?, leap))
}

/// Ordinal position of a month in its year: every month following a leap
/// month is shifted by one.
fn ordinal_month(year: i32, month: u8, leap: bool) -> Result<u8> {
    let candidates = if leap { month + 1..=month + 1 } else { month..=month + 1 };

    for ordinal in candidates {
        let Ok(first_day) = Date::try_new_chinese_with_calendar(year, ordinal, 1, Chinese::new())
        else {
            break;
        };

        if parse_month_code(first_day.month().standard_code.0.as_str()) == Some((month, leap)) {
            return Ok(ordinal);
        }
    }

    Err(Error::InvalidMonth { year, month, leap })
}
