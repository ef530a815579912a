//! Scheduled work owned by widgets.
//!
//! Timers don't run by themselves: their owner polls them with the current
//! instant and they report whether they are due. A cancelled timer never
//! fires again, which is also the case of a dropped timer.

use chrono::{DateTime, TimeDelta, Utc};

/// Shortest period a recurring task can have.
const MIN_PERIOD: TimeDelta = TimeDelta::milliseconds(1);

/// Work that is due periodically.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct RecurringTask {
    period: TimeDelta,
    next: Option<DateTime<Utc>>,
}

impl RecurringTask {
    /// Create a task that is first due one period after `start`.
    pub fn new(start: DateTime<Utc>, period: TimeDelta) -> Self {
        let period = period.max(MIN_PERIOD);
        Self { period, next: start.checked_add_signed(period) }
    }

    /// Create a task that is already due at `start`.
    pub fn immediate(start: DateTime<Utc>, period: TimeDelta) -> Self {
        Self { period: period.max(MIN_PERIOD), next: Some(start) }
    }

    pub fn period(&self) -> TimeDelta {
        self.period
    }

    /// Next instant this task will be due, if it is still active.
    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        self.next
    }

    pub fn is_active(&self) -> bool {
        self.next.is_some()
    }

    /// Check if the task is due, in which case it is scheduled for the next
    /// period. Periods that were entirely missed are skipped, so that a task
    /// fires at most once per call.
    ///
    /// ```
    /// use almanac::timer::RecurringTask;
    /// use chrono::{TimeDelta, TimeZone, Utc};
    ///
    /// let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    /// let mut task = RecurringTask::new(start, TimeDelta::seconds(1));
    ///
    /// assert!(!task.poll(start));
    /// assert!(task.poll(start + TimeDelta::seconds(10)));
    /// assert!(!task.poll(start + TimeDelta::milliseconds(10_500)));
    /// assert!(task.poll(start + TimeDelta::seconds(11)));
    /// ```
    pub fn poll(&mut self, now: DateTime<Utc>) -> bool {
        let Some(next) = self.next else {
            return false;
        };

        if now < next {
            return false;
        }

        let period_ms = self.period.num_milliseconds().max(1);
        let skipped = (now - next).num_milliseconds() / period_ms + 1;

        self.next = TimeDelta::try_milliseconds(skipped.saturating_mul(period_ms))
            .and_then(|delay| next.checked_add_signed(delay));

        true
    }

    /// Make the task due again one period after `start`.
    pub fn reschedule(&mut self, start: DateTime<Utc>) {
        self.next = start.checked_add_signed(self.period);
    }

    pub fn cancel(&mut self) {
        self.next = None;
    }
}

/// Work that is due once, at a given instant.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq)]
pub struct Deadline {
    at: Option<DateTime<Utc>>,
}

impl Deadline {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self { at: Some(at) }
    }

    /// Create a deadline `delay` after `start`.
    pub fn after(start: DateTime<Utc>, delay: TimeDelta) -> Self {
        Self { at: start.checked_add_signed(delay) }
    }

    pub fn at(&self) -> Option<DateTime<Utc>> {
        self.at
    }

    pub fn is_active(&self) -> bool {
        self.at.is_some()
    }

    /// Time left before the deadline, if it is still active.
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        self.at.map(|at| (at - now).max(TimeDelta::zero()))
    }

    /// Check if the deadline is reached, it is then cancelled.
    ///
    /// ```
    /// use almanac::timer::Deadline;
    /// use chrono::{TimeDelta, TimeZone, Utc};
    ///
    /// let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    /// let mut deadline = Deadline::after(start, TimeDelta::minutes(25));
    ///
    /// assert!(!deadline.poll(start + TimeDelta::minutes(24)));
    /// assert!(deadline.poll(start + TimeDelta::minutes(26)));
    /// assert!(!deadline.poll(start + TimeDelta::minutes(27)));
    /// ```
    pub fn poll(&mut self, now: DateTime<Utc>) -> bool {
        match self.at {
            Some(at) if now >= at => {
                self.at = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.at = None;
    }
}
