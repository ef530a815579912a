use chrono::{Months, NaiveDate, TimeDelta};

/// Last day of a month, if this month exists.
pub(crate) fn last_day_of_month(year: i32, month: u8) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month.into(), 1)?
        .checked_add_months(Months::new(1))?
        .pred_opt()
}

pub(crate) fn count_days_in_month(year: i32, month: u8) -> Option<u8> {
    let first = NaiveDate::from_ymd_opt(year, month.into(), 1)?;
    let last = last_day_of_month(year, month)?;
    ((last - first).num_days() + 1).try_into().ok()
}

/// Move a date by a signed number of days.
pub(crate) fn shift_days(date: NaiveDate, offset: i64) -> Option<NaiveDate> {
    if offset == 0 {
        return Some(date);
    }

    date.checked_add_signed(TimeDelta::try_days(offset)?)
}

/// Find Easter date for given year using.
///
/// See https://en.wikipedia.org/wiki/Date_of_Easter#Anonymous_Gregorian_algorithm
pub(crate) fn easter(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let n = (h + l - 7 * m + 114) / 31;
    let o = (h + l - 7 * m + 114) % 31;

    NaiveDate::from_ymd_opt(year, n.try_into().ok()?, (o + 1).try_into().ok()?)
}
