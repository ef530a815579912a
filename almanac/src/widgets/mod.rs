//! State of the dashboard widgets, independent of how they are rendered.
//!
//! Widgets that own timers implement [`Widget`]: the host polls them with the
//! current instant and reacts to the [`WidgetEvent`]s they report, for
//! example by playing a sound or by re-rendering.

pub mod clock;
pub mod countdown;
pub mod hydration;
pub mod notes;
pub mod pomodoro;
pub mod tasks;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

pub use clock::ClockWidget;
pub use countdown::{Countdown, CountdownWidget};
pub use hydration::{Hydration, HydrationConfig};
pub use notes::Notes;
pub use pomodoro::{Phase, Pomodoro, PomodoroConfig};
pub use tasks::{Task, TaskList};

/// Something happened that the host may want to react to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WidgetEvent {
    /// The clock moved forward, with the new local time.
    Tick(DateTime<Tz>),
    /// The lunar date and the list of upcoming special dates were computed
    /// again.
    SpecialDatesRefreshed { upcoming: usize },
    /// The next holiday was searched again.
    CountdownRefreshed(Option<Countdown>),
    /// A pomodoro phase reached its end.
    PomodoroPhaseFinished { finished: Phase, next: Phase },
    /// It is time to drink some water.
    HydrationReminder { cups: u8, goal: u8 },
}

/// A widget that owns scheduled work.
pub trait Widget {
    /// Run the work that is due at `now`, reporting what happened.
    fn poll(&mut self, now: DateTime<Utc>) -> Vec<WidgetEvent>;

    /// Cancel all scheduled work: the widget won't report any event anymore.
    fn dispose(&mut self);
}
