//! Find occurrences of the rules of a catalog.
//!
//! Lunar rules (and rules with a day offset) may fall in the solar year
//! before or after the year they are resolved for, for example the 8th day of
//! the 12th lunar month lands in January of the next solar year. For this
//! reason rules are always resolved for the neighboring years too and
//! occurrences are compared as full dates.

use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone};

use almanac_syntax::rules::{DateRule, Rule};

use crate::catalog::HolidayCatalog;
use crate::context::Context;
use crate::resolve::resolve_opt;
use crate::store::KeyValueStore;
use crate::utils::dates::count_days_in_month;

/// The date a rule falls on, relative to some reference day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Occurrence<'r> {
    pub rule: &'r Rule,
    pub date: NaiveDate,
    /// Number of days from the reference day, `0` if it is today.
    pub days_until: i64,
}

fn years_around(year: i32) -> RangeInclusive<i32> {
    year.saturating_sub(1)..=year.saturating_add(1)
}

/// Iterate over the occurrences of a rule that can fall in a solar year.
pub fn occurrences_around(rule: &DateRule, year: i32) -> impl Iterator<Item = NaiveDate> + '_ {
    years_around(year).filter_map(move |year| resolve_opt(rule, year))
}

/// Check if a rule has an occurrence on a given date.
///
/// ```
/// use almanac::search::occurs_on;
/// use almanac_syntax::DateRule;
/// use chrono::NaiveDate;
///
/// let laba: DateRule = "lunar 12-08".parse().unwrap();
/// assert!(occurs_on(&laba, NaiveDate::from_ymd_opt(2025, 1, 7).unwrap()));
/// ```
pub fn occurs_on(rule: &DateRule, date: NaiveDate) -> bool {
    occurrences_around(rule, date.year()).any(|occurrence| occurrence == date)
}

/// List enabled rules of the catalog that occur on a given date.
///
/// ```
/// use almanac::HolidayCatalog;
/// use almanac::search::matches_on;
/// use chrono::NaiveDate;
///
/// let catalog = HolidayCatalog::new();
/// let mid_autumn = NaiveDate::from_ymd_opt(2024, 9, 17).unwrap();
/// let matches = matches_on(&catalog, mid_autumn);
///
/// assert_eq!(matches.len(), 1);
/// assert_eq!(matches[0].name, "Mid-Autumn Festival");
/// ```
pub fn matches_on<S: KeyValueStore>(catalog: &HolidayCatalog<S>, date: NaiveDate) -> Vec<&Rule> {
    catalog
        .enabled_rules()
        .filter(|rule| occurs_on(&rule.kind, date))
        .collect()
}

/// Find the closest occurrence that is today or in the future, among
/// enabled rules of the catalog.
///
/// ```
/// use almanac::{Context, HolidayCatalog};
/// use almanac::search::next_occurrence;
/// use chrono::{TimeZone, Utc};
///
/// let catalog = HolidayCatalog::new();
/// let from = Utc.with_ymd_and_hms(2024, 12, 26, 12, 0, 0).unwrap();
/// let next = next_occurrence(&catalog, &from, &Context::default()).unwrap();
///
/// assert_eq!(next.rule.name, "New Year's Eve");
/// assert_eq!(next.days_until, 5);
/// ```
pub fn next_occurrence<'c, S: KeyValueStore, T: TimeZone>(
    catalog: &'c HolidayCatalog<S>,
    from: &DateTime<T>,
    ctx: &Context,
) -> Option<Occurrence<'c>> {
    next_occurrence_after(catalog.enabled_rules(), ctx.today(from))
}

/// Find the closest occurrence that is on `today` or after, among a set of
/// rules. On ties, the first rule of the input wins.
pub fn next_occurrence_after<'r>(
    rules: impl IntoIterator<Item = &'r Rule>,
    today: NaiveDate,
) -> Option<Occurrence<'r>> {
    let mut best: Option<Occurrence> = None;

    for rule in rules {
        for date in occurrences_around(&rule.kind, today.year()) {
            let days_until = (date - today).num_days();

            if days_until < 0 {
                continue;
            }

            if best.map_or(true, |best| days_until < best.days_until) {
                best = Some(Occurrence { rule, date, days_until });
            }
        }
    }

    best
}

/// List the rules occurring on each day of a month, for calendar rendering.
///
/// An empty list is returned if the month doesn't exist.
///
/// ```
/// use almanac::HolidayCatalog;
/// use almanac::search::month_grid;
///
/// let catalog = HolidayCatalog::new();
/// let grid = month_grid(&catalog, 2024, 5);
/// assert_eq!(grid.len(), 31);
///
/// let (date, rules) = &grid[26];
/// assert_eq!(date.to_string(), "2024-05-27");
/// assert_eq!(rules[0].name, "Memorial Day");
/// ```
pub fn month_grid<S: KeyValueStore>(
    catalog: &HolidayCatalog<S>,
    year: i32,
    month: u8,
) -> Vec<(NaiveDate, Vec<&Rule>)> {
    let (Some(first), Some(len)) = (
        NaiveDate::from_ymd_opt(year, month.into(), 1),
        count_days_in_month(year, month),
    ) else {
        return Vec::new();
    };

    let occurrences: Vec<(NaiveDate, &Rule)> = catalog
        .enabled_rules()
        .flat_map(|rule| occurrences_around(&rule.kind, year).map(move |date| (date, rule)))
        .filter(|(date, _)| date.year() == year && date.month() == u32::from(month))
        .collect();

    first
        .iter_days()
        .take(len.into())
        .map(|day| {
            let rules = occurrences
                .iter()
                .filter(|(date, _)| *date == day)
                .map(|(_, rule)| *rule)
                .collect();

            (day, rules)
        })
        .collect()
}
