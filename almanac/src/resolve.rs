//! Compute the solar date a rule falls on for a given year.
//!
//! [`resolve_opt`] returns `None` when a rule has no occurrence for a year.
//! [`resolve`] never fails and returns a sentinel date instead, which can't be
//! told apart from a real occurrence on 1970-01-01.

use chrono::{Datelike, NaiveDate};

use almanac_syntax::rules::{DateRule, Weekday};

use crate::utils::dates::{easter, last_day_of_month, shift_days};

/// Returned when a rule does not occur on the requested year, for example
/// for a leap day on a common year.
pub const NOT_THIS_YEAR: NaiveDate = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();

/// Returned when a lunar date could not be converted to the solar calendar.
pub const CONVERSION_FAILED: NaiveDate = NaiveDate::from_ymd_opt(9999, 12, 31).unwrap();

/// Check if a date returned by [`resolve`] may be one of the sentinel values.
///
/// This also holds for real dates up to 1970-01-01, use [`resolve_opt`] to
/// know if a rule actually occurs.
///
/// ```
/// use almanac::resolve::{is_sentinel, CONVERSION_FAILED, NOT_THIS_YEAR};
/// use chrono::NaiveDate;
///
/// assert!(is_sentinel(NOT_THIS_YEAR));
/// assert!(is_sentinel(CONVERSION_FAILED));
/// assert!(!is_sentinel(NaiveDate::from_ymd_opt(2024, 9, 17).unwrap()));
/// ```
pub fn is_sentinel(date: NaiveDate) -> bool {
    date <= NOT_THIS_YEAR || date.year() >= CONVERSION_FAILED.year()
}

/// Get the date a rule falls on for a given year.
///
/// ```
/// use almanac::resolve::{resolve, NOT_THIS_YEAR};
/// use almanac_syntax::DateRule;
/// use chrono::NaiveDate;
///
/// let labor_day: DateRule = "Mo[1] Sep".parse().unwrap();
/// assert_eq!(resolve(&labor_day, 2024), NaiveDate::from_ymd_opt(2024, 9, 2).unwrap());
///
/// let leap_day: DateRule = "Feb 29".parse().unwrap();
/// assert_eq!(resolve(&leap_day, 2023), NOT_THIS_YEAR);
/// ```
pub fn resolve(rule: &DateRule, year: i32) -> NaiveDate {
    resolve_opt(rule, year).unwrap_or(match rule {
        DateRule::Lunar { .. } => CONVERSION_FAILED,
        _ => NOT_THIS_YEAR,
    })
}

/// Get the date a rule falls on for a given year, if it occurs this year.
///
/// ```
/// use almanac::resolve::resolve_opt;
/// use almanac_syntax::DateRule;
///
/// let inauguration: DateRule = "2021/4 Jan 20".parse().unwrap();
/// assert!(resolve_opt(&inauguration, 2025).is_some());
/// assert!(resolve_opt(&inauguration, 2026).is_none());
/// ```
pub fn resolve_opt(rule: &DateRule, year: i32) -> Option<NaiveDate> {
    let date = match *rule {
        DateRule::Fixed { month, day } => resolve_fixed(year, month, day),
        DateRule::NthWeekday { month, weekday, nth } => {
            resolve_nth_weekday(year, month, weekday, nth)
        }
        DateRule::LastWeekday { month, weekday } => resolve_last_weekday(year, month, weekday),
        DateRule::Cycle { month, day, anchor, step } => {
            // A zero step can only come from a hand-built rule
            (step != 0 && (year - anchor).rem_euclid(step.into()) == 0)
                .then(|| resolve_fixed(year, month, day))
                .flatten()
        }
        DateRule::Easter { offset } => easter(year).and_then(|date| shift_days(date, offset)),
        DateRule::Lunar { month, day, offset } => resolve_lunar(year, month, day, offset),
    };

    if date.is_none() {
        #[cfg(feature = "log")]
        log::debug!("Rule `{rule}` has no occurrence in {year}");
    }

    date
}

/// Check that a lunar date exists and converts into a supported solar year.
///
/// ```
/// use almanac::resolve::is_valid_lunar_date;
///
/// assert!(is_valid_lunar_date(2017, 5, 29));
/// assert!(!is_valid_lunar_date(2017, 5, 30)); // this month only has 29 days
/// ```
pub fn is_valid_lunar_date(year: i32, month: u8, day: u8) -> bool {
    lunar_calendar::to_solar(year, month, day)
        .is_ok_and(|date| date.year() > 0 && date.year() < CONVERSION_FAILED.year())
}

/// Find a lunar date that exists close to the input one, trying the input
/// day first, then the day before and the day after.
///
/// This is a best effort: if none of these exist, the input is returned
/// unchanged.
///
/// ```
/// use almanac::resolve::next_valid_lunar_date;
///
/// assert_eq!(next_valid_lunar_date(2017, 5, 30), (2017, 5, 29));
/// assert_eq!(next_valid_lunar_date(2017, 13, 1), (2017, 13, 1));
/// ```
pub fn next_valid_lunar_date(year: i32, month: u8, day: u8) -> (i32, u8, u8) {
    [Some(day), day.checked_sub(1), day.checked_add(1)]
        .into_iter()
        .flatten()
        .find(|&candidate| is_valid_lunar_date(year, month, candidate))
        .map(|candidate| (year, month, candidate))
        .unwrap_or((year, month, day))
}

fn resolve_fixed(year: i32, month: u8, day: u8) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month.into(), day.into())
}

fn resolve_nth_weekday(year: i32, month: u8, weekday: Weekday, nth: u8) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month.into(), 1)?;

    let to_first_match =
        (7 + weekday.num_days_from_monday() - first.weekday().num_days_from_monday()) % 7;

    let date = shift_days(
        first,
        i64::from(to_first_match) + 7 * (i64::from(nth) - 1),
    )?;

    // The 5th occurrence of a weekday may fall into next month
    (date.month() == u32::from(month)).then_some(date)
}

fn resolve_last_weekday(year: i32, month: u8, weekday: Weekday) -> Option<NaiveDate> {
    let mut date = last_day_of_month(year, month)?;

    while date.weekday() != weekday {
        date = date.pred_opt()?;
    }

    Some(date)
}

fn resolve_lunar(year: i32, month: u8, day: u8, offset: i64) -> Option<NaiveDate> {
    let (year, month, day) = next_valid_lunar_date(year, month, day);

    match lunar_calendar::to_solar(year, month, day) {
        Ok(date) => shift_days(date, offset)
            .filter(|date| date.year() > 0 && date.year() < CONVERSION_FAILED.year()),
        Err(_err) => {
            #[cfg(feature = "log")]
            log::debug!("Could not convert lunar date {year}/{month}/{day}: {_err}");
            None
        }
    }
}
