use chrono::{DateTime, NaiveDate, TimeDelta, Utc};

use almanac_syntax::rules::Category;

use crate::catalog::HolidayCatalog;
use crate::context::Context;
use crate::search::next_occurrence;
use crate::store::{KeyValueStore, MemoryStore};
use crate::timer::RecurringTask;

use super::{Widget, WidgetEvent};

/// The next holiday, as displayed by the countdown widget.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Countdown {
    pub name: String,
    pub category: Category,
    pub date: NaiveDate,
    pub days_until: i64,
}

/// Count the days left before the next enabled holiday.
#[derive(Clone, Debug)]
pub struct CountdownWidget<S = MemoryStore> {
    ctx: Context,
    catalog: HolidayCatalog<S>,
    refresh: RecurringTask,
    current: Option<Countdown>,
    /// Local day of the last refresh.
    day: NaiveDate,
}

impl<S: KeyValueStore> CountdownWidget<S> {
    pub const REFRESH_PERIOD: TimeDelta = TimeDelta::hours(1);

    pub fn new(ctx: Context, catalog: HolidayCatalog<S>, now: DateTime<Utc>) -> Self {
        let mut res = Self {
            day: ctx.today(&now),
            ctx,
            catalog,
            refresh: RecurringTask::new(now, Self::REFRESH_PERIOD),
            current: None,
        };

        res.refresh(now);
        res
    }

    pub fn current(&self) -> Option<&Countdown> {
        self.current.as_ref()
    }

    pub fn catalog(&self) -> &HolidayCatalog<S> {
        &self.catalog
    }

    /// Access the catalog, [`CountdownWidget::refresh`] should be called
    /// after it is edited.
    pub fn catalog_mut(&mut self) -> &mut HolidayCatalog<S> {
        &mut self.catalog
    }

    /// Search for the next holiday again.
    pub fn refresh(&mut self, now: DateTime<Utc>) -> Option<&Countdown> {
        self.day = self.ctx.today(&now);

        self.current =
            next_occurrence(&self.catalog, &now, &self.ctx).map(|occurrence| Countdown {
                name: occurrence.rule.name.clone(),
                category: occurrence.rule.category,
                date: occurrence.date,
                days_until: occurrence.days_until,
            });

        self.current.as_ref()
    }
}

impl<S: KeyValueStore> Widget for CountdownWidget<S> {
    fn poll(&mut self, now: DateTime<Utc>) -> Vec<WidgetEvent> {
        // A new day starts between two refreshes
        let day_changed = self.refresh.is_active() && self.ctx.today(&now) != self.day;

        if !self.refresh.poll(now) && !day_changed {
            return Vec::new();
        }

        let current = self.refresh(now).cloned();
        vec![WidgetEvent::CountdownRefreshed(current)]
    }

    fn dispose(&mut self) {
        self.refresh.cancel();
    }
}
