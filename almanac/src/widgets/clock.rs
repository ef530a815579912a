use chrono::{DateTime, TimeDelta, Utc};
use chrono_tz::Tz;

use lunar_calendar::LunarDate;

use crate::context::Context;
use crate::special_dates::{SpecialDateTracker, UpcomingSpecialDate, DEFAULT_WINDOW_DAYS};
use crate::store::{KeyValueStore, MemoryStore};
use crate::timer::RecurringTask;

use super::{Widget, WidgetEvent};

/// A clock displaying local time, the lunar date and the special dates that
/// are coming soon.
#[derive(Clone, Debug)]
pub struct ClockWidget<S = MemoryStore> {
    ctx: Context,
    tracker: SpecialDateTracker<S>,
    window_days: i64,
    tick: RecurringTask,
    refresh: RecurringTask,
    local_time: DateTime<Tz>,
    lunar: Option<LunarDate>,
    upcoming: Vec<UpcomingSpecialDate>,
}

impl<S: KeyValueStore> ClockWidget<S> {
    pub const TICK_PERIOD: TimeDelta = TimeDelta::seconds(1);
    pub const REFRESH_PERIOD: TimeDelta = TimeDelta::hours(1);

    pub fn new(ctx: Context, tracker: SpecialDateTracker<S>, now: DateTime<Utc>) -> Self {
        let mut res = Self {
            ctx,
            tracker,
            window_days: DEFAULT_WINDOW_DAYS,
            tick: RecurringTask::new(now, Self::TICK_PERIOD),
            refresh: RecurringTask::new(now, Self::REFRESH_PERIOD),
            local_time: ctx.localize(&now),
            lunar: None,
            upcoming: Vec::new(),
        };

        res.refresh(now);
        res
    }

    /// Change how many days ahead special dates are displayed.
    pub fn with_window(mut self, window_days: i64, now: DateTime<Utc>) -> Self {
        self.window_days = window_days;
        self.refresh(now);
        self
    }

    pub fn local_time(&self) -> DateTime<Tz> {
        self.local_time
    }

    pub fn lunar_date(&self) -> Option<LunarDate> {
        self.lunar
    }

    /// Full lunar date of today, such as `"甲辰年八月十五"`.
    pub fn lunar_label(&self) -> Option<String> {
        self.lunar.map(|lunar| lunar.to_string())
    }

    pub fn upcoming(&self) -> &[UpcomingSpecialDate] {
        &self.upcoming
    }

    pub fn tracker(&self) -> &SpecialDateTracker<S> {
        &self.tracker
    }

    /// Access the list of special dates, [`ClockWidget::refresh`] should be
    /// called after it is edited.
    pub fn tracker_mut(&mut self) -> &mut SpecialDateTracker<S> {
        &mut self.tracker
    }

    /// Compute the lunar date and the upcoming special dates again.
    pub fn refresh(&mut self, now: DateTime<Utc>) {
        let today = self.ctx.today(&now);
        self.local_time = self.ctx.localize(&now);

        self.lunar = LunarDate::from_solar(today)
            .map_err(|_err| {
                #[cfg(feature = "log")]
                log::warn!("No lunar date for {today}: {_err}");
            })
            .ok();

        self.upcoming = self.tracker.upcoming(&now, &self.ctx, self.window_days);
    }
}

impl<S: KeyValueStore> Widget for ClockWidget<S> {
    fn poll(&mut self, now: DateTime<Utc>) -> Vec<WidgetEvent> {
        let mut events = Vec::new();
        let prev_day = self.local_time.date_naive();

        if self.tick.poll(now) {
            self.local_time = self.ctx.localize(&now);
            events.push(WidgetEvent::Tick(self.local_time));
        }

        // A new day starts between two refreshes
        let day_changed = self.tick.is_active() && self.local_time.date_naive() != prev_day;

        if self.refresh.poll(now) || day_changed {
            self.refresh(now);

            events.push(WidgetEvent::SpecialDatesRefreshed {
                upcoming: self.upcoming.len(),
            });
        }

        events
    }

    fn dispose(&mut self) {
        self.tick.cancel();
        self.refresh.cancel();
    }
}
