use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::context::Context;
use crate::timer::RecurringTask;

use super::{Widget, WidgetEvent};

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HydrationConfig {
    /// Delay between two reminders.
    pub reminder_minutes: u32,
    /// Number of cups to drink each day.
    pub daily_goal: u8,
}

impl Default for HydrationConfig {
    fn default() -> Self {
        Self { reminder_minutes: 60, daily_goal: 8 }
    }
}

/// Count cups of water drunk today and remind to drink regularly until the
/// daily goal is reached.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Hydration {
    config: HydrationConfig,
    ctx: Context,
    day: NaiveDate,
    cups: u8,
    reminder: RecurringTask,
}

impl Hydration {
    pub fn new(config: HydrationConfig, ctx: Context, now: DateTime<Utc>) -> Self {
        Self {
            config,
            ctx,
            day: ctx.today(&now),
            cups: 0,
            reminder: RecurringTask::new(now, Self::reminder_period(&config)),
        }
    }

    fn reminder_period(config: &HydrationConfig) -> TimeDelta {
        TimeDelta::minutes(config.reminder_minutes.into())
    }

    pub fn config(&self) -> &HydrationConfig {
        &self.config
    }

    /// Cups drunk during the day `now` falls in.
    pub fn cups(&self, now: DateTime<Utc>) -> u8 {
        if self.ctx.today(&now) == self.day {
            self.cups
        } else {
            0
        }
    }

    pub fn is_goal_reached(&self, now: DateTime<Utc>) -> bool {
        self.cups(now) >= self.config.daily_goal
    }

    /// Record a cup of water, the next reminder is postponed by a full
    /// period.
    pub fn drink(&mut self, now: DateTime<Utc>) -> u8 {
        self.roll_day(now);
        self.cups = self.cups.saturating_add(1);
        self.reminder.reschedule(now);
        self.cups
    }

    /// Cancel the last recorded cup of today.
    pub fn undo(&mut self, now: DateTime<Utc>) -> u8 {
        self.roll_day(now);
        self.cups = self.cups.saturating_sub(1);
        self.cups
    }

    fn roll_day(&mut self, now: DateTime<Utc>) {
        let today = self.ctx.today(&now);

        if today != self.day {
            self.day = today;
            self.cups = 0;
        }
    }
}

impl Widget for Hydration {
    fn poll(&mut self, now: DateTime<Utc>) -> Vec<WidgetEvent> {
        self.roll_day(now);

        if !self.reminder.poll(now) || self.cups >= self.config.daily_goal {
            return Vec::new();
        }

        vec![WidgetEvent::HydrationReminder {
            cups: self.cups,
            goal: self.config.daily_goal,
        }]
    }

    fn dispose(&mut self) {
        self.reminder.cancel();
    }
}
