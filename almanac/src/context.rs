use chrono::{DateTime, NaiveDate, TimeZone};
use chrono_tz::Tz;

/// Timezone used when no other is specified.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Shanghai;

/// All the context that can alter how instants are turned into calendar days.
///
/// Every "days until" computation of this crate goes through
/// [`Context::today`], so that all of them agree on when a day starts.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Context {
    pub timezone: Tz,
}

impl Context {
    /// Attach a new timezone to this context.
    ///
    /// ```
    /// use almanac::Context;
    ///
    /// let ctx = Context::default().with_timezone(chrono_tz::America::New_York);
    /// assert_eq!(ctx.timezone, chrono_tz::America::New_York);
    /// ```
    pub fn with_timezone(self, timezone: Tz) -> Self {
        Self { timezone }
    }

    /// Express an instant in the timezone of this context.
    pub fn localize<T: TimeZone>(&self, instant: &DateTime<T>) -> DateTime<Tz> {
        instant.with_timezone(&self.timezone)
    }

    /// Calendar day an instant falls in, for the timezone of this context.
    ///
    /// ```
    /// use almanac::Context;
    /// use chrono::{NaiveDate, TimeZone, Utc};
    ///
    /// // Already the next day in Shanghai
    /// let instant = Utc.with_ymd_and_hms(2024, 9, 16, 18, 30, 0).unwrap();
    ///
    /// assert_eq!(
    ///     Context::default().today(&instant),
    ///     NaiveDate::from_ymd_opt(2024, 9, 17).unwrap(),
    /// );
    /// ```
    pub fn today<T: TimeZone>(&self, instant: &DateTime<T>) -> NaiveDate {
        self.localize(instant).date_naive()
    }

    /// Number of calendar days from the day `from` falls in up to `date`,
    /// negative if `date` is already in the past.
    pub fn days_until<T: TimeZone>(&self, from: &DateTime<T>, date: NaiveDate) -> i64 {
        (date - self.today(from)).num_days()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self { timezone: DEFAULT_TIMEZONE }
    }
}
