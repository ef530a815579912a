use chrono::{DateTime, Datelike, NaiveDate, TimeZone};

use almanac_syntax::rules::special::{SpecialDate, SpecialDateKind};

use crate::context::Context;
use crate::error::{Error, Result};
use crate::store::{keys, load_records, save_json, KeyValueStore, MemoryStore};

/// Number of days ahead the clock widget looks for special dates.
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

/// A special date that is close, as displayed by the clock widget.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct UpcomingSpecialDate {
    pub name: String,
    pub kind: SpecialDateKind,
    pub date: NaiveDate,
    pub days_until: i64,
}

/// Date a special date is celebrated on for a given year. Leap days are
/// celebrated on February 28 of common years.
///
/// ```
/// use almanac::special_dates::occurrence_in_year;
/// use almanac_syntax::{SpecialDate, SpecialDateKind};
/// use chrono::NaiveDate;
///
/// let leap = SpecialDate::new("Leap", 2, 29, SpecialDateKind::Birthday).unwrap();
/// assert_eq!(occurrence_in_year(&leap, 2023), NaiveDate::from_ymd_opt(2023, 2, 28));
/// assert_eq!(occurrence_in_year(&leap, 2024), NaiveDate::from_ymd_opt(2024, 2, 29));
/// ```
pub fn occurrence_in_year(special: &SpecialDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, special.month.into(), special.day.into()).or_else(|| {
        if (special.month, special.day) == (2, 29) {
            NaiveDate::from_ymd_opt(year, 2, 28)
        } else {
            None
        }
    })
}

/// List special dates that occur within `window_days` days from `today`
/// (both inclusive), sorted by the number of days left. Dates with the same
/// number of days left keep their input order.
///
/// ```
/// use almanac::special_dates::upcoming_within;
/// use almanac_syntax::{SpecialDate, SpecialDateKind};
/// use chrono::NaiveDate;
///
/// let dates = [
///     SpecialDate::new("Alex", 1, 3, SpecialDateKind::Birthday).unwrap(),
///     SpecialDate::new("Wedding", 12, 30, SpecialDateKind::Anniversary).unwrap(),
///     SpecialDate::new("Sam", 6, 1, SpecialDateKind::Birthday).unwrap(),
/// ];
///
/// let today = NaiveDate::from_ymd_opt(2024, 12, 29).unwrap();
/// let upcoming = upcoming_within(&dates, today, 7);
///
/// assert_eq!(upcoming.len(), 2);
/// assert_eq!((upcoming[0].name.as_str(), upcoming[0].days_until), ("Wedding", 1));
/// assert_eq!((upcoming[1].name.as_str(), upcoming[1].days_until), ("Alex", 5));
/// ```
pub fn upcoming_within<'a>(
    dates: impl IntoIterator<Item = &'a SpecialDate>,
    today: NaiveDate,
    window_days: i64,
) -> Vec<UpcomingSpecialDate> {
    let mut upcoming: Vec<_> = dates
        .into_iter()
        .filter_map(|special| {
            let (date, days_until) = [today.year(), today.year() + 1]
                .into_iter()
                .filter_map(|year| occurrence_in_year(special, year))
                .map(|date| (date, (date - today).num_days()))
                .find(|(_, days_until)| *days_until >= 0)?;

            (days_until <= window_days).then(|| UpcomingSpecialDate {
                name: special.name.clone(),
                kind: special.kind,
                date,
                days_until,
            })
        })
        .collect();

    upcoming.sort_by_key(|item| item.days_until);
    upcoming
}

/// The list of special dates of the user, persisted in insertion order.
#[derive(Clone, Debug, Default)]
pub struct SpecialDateTracker<S = MemoryStore> {
    store: S,
    dates: Vec<SpecialDate>,
}

impl SpecialDateTracker<MemoryStore> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: KeyValueStore> SpecialDateTracker<S> {
    /// Load special dates from a store, dropping invalid records.
    pub fn load(store: S) -> Self {
        let dates = load_records(&store, keys::SPECIAL_DATES, |special: SpecialDate| -> Result<_> {
            special.validate()?;
            Ok(special)
        });

        Self { store, dates }
    }

    pub fn dates(&self) -> &[SpecialDate] {
        &self.dates
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Append a new special date, there is no check for duplicates.
    pub fn add(&mut self, special: SpecialDate) -> Result<()> {
        special.validate()?;
        self.dates.push(special);
        self.persist();
        Ok(())
    }

    /// Remove the special date at given position.
    pub fn remove(&mut self, index: usize) -> Result<SpecialDate> {
        if index >= self.dates.len() {
            return Err(Error::NoSuchIndex { index, len: self.dates.len() });
        }

        let special = self.dates.remove(index);
        self.persist();
        Ok(special)
    }

    /// List special dates happening soon, relative to the day an instant
    /// falls in.
    pub fn upcoming<T: TimeZone>(
        &self,
        from: &DateTime<T>,
        ctx: &Context,
        window_days: i64,
    ) -> Vec<UpcomingSpecialDate> {
        upcoming_within(&self.dates, ctx.today(from), window_days)
    }

    fn persist(&mut self) {
        save_json(&mut self.store, keys::SPECIAL_DATES, &self.dates);
    }
}
