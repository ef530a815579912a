use std::fmt::Display;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Deadline;

use super::{Widget, WidgetEvent};

/// Durations of the phases of a pomodoro cycle.
///
/// ```
/// use almanac::widgets::PomodoroConfig;
///
/// let config: PomodoroConfig = serde_json::from_str(r#"{"work_minutes": 50}"#).unwrap();
/// assert_eq!(config.work_minutes, 50);
/// assert_eq!(config.short_break_minutes, 5);
/// ```
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PomodoroConfig {
    pub work_minutes: u32,
    pub short_break_minutes: u32,
    pub long_break_minutes: u32,
    /// Number of work sessions before a long break.
    pub sessions_before_long_break: u32,
}

impl PomodoroConfig {
    pub fn duration(&self, phase: Phase) -> TimeDelta {
        let minutes = match phase {
            Phase::Work => self.work_minutes,
            Phase::ShortBreak => self.short_break_minutes,
            Phase::LongBreak => self.long_break_minutes,
        };

        TimeDelta::minutes(minutes.into())
    }
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            sessions_before_long_break: 4,
        }
    }
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Work,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub fn is_break(self) -> bool {
        self != Self::Work
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Work => "work",
            Self::ShortBreak => "short break",
            Self::LongBreak => "long break",
        };

        write!(f, "{name}")
    }
}

/// A pomodoro timer, alternating work sessions and breaks.
///
/// When a phase ends, the next one is selected but doesn't start until
/// [`Pomodoro::start`] is called.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Pomodoro {
    config: PomodoroConfig,
    phase: Phase,
    completed_sessions: u32,
    deadline: Deadline,
    paused_remaining: Option<TimeDelta>,
}

impl Pomodoro {
    pub fn new(config: PomodoroConfig) -> Self {
        Self {
            config,
            phase: Phase::Work,
            completed_sessions: 0,
            deadline: Deadline::default(),
            paused_remaining: None,
        }
    }

    pub fn config(&self) -> &PomodoroConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of work sessions that reached their end.
    pub fn completed_sessions(&self) -> u32 {
        self.completed_sessions
    }

    pub fn is_running(&self) -> bool {
        self.deadline.is_active()
    }

    pub fn is_paused(&self) -> bool {
        self.paused_remaining.is_some()
    }

    /// Time left in current phase.
    pub fn remaining(&self, now: DateTime<Utc>) -> TimeDelta {
        self.deadline
            .remaining(now)
            .or(self.paused_remaining)
            .unwrap_or_else(|| self.config.duration(self.phase))
    }

    /// Start or resume current phase, nothing happens if it is already
    /// running.
    pub fn start(&mut self, now: DateTime<Utc>) {
        if self.is_running() {
            return;
        }

        let delay = self
            .paused_remaining
            .take()
            .unwrap_or_else(|| self.config.duration(self.phase));

        self.deadline = Deadline::after(now, delay);
    }

    pub fn pause(&mut self, now: DateTime<Utc>) {
        if let Some(remaining) = self.deadline.remaining(now) {
            self.paused_remaining = Some(remaining);
            self.deadline.cancel();
        }
    }

    /// Stop the timer and go back to the first work session.
    pub fn reset(&mut self) {
        self.deadline.cancel();
        self.paused_remaining = None;
        self.phase = Phase::Work;
        self.completed_sessions = 0;
    }

    /// Stop current phase and select the next one. Skipping a work session
    /// doesn't count it as completed.
    pub fn skip(&mut self) -> Phase {
        self.deadline.cancel();
        self.paused_remaining = None;

        self.phase = match self.phase {
            Phase::Work => Phase::ShortBreak,
            Phase::ShortBreak | Phase::LongBreak => Phase::Work,
        };

        self.phase
    }

    fn finish_phase(&mut self) -> Phase {
        self.paused_remaining = None;

        self.phase = match self.phase {
            Phase::Work => {
                self.completed_sessions += 1;

                if self.completed_sessions % self.config.sessions_before_long_break.max(1) == 0 {
                    Phase::LongBreak
                } else {
                    Phase::ShortBreak
                }
            }
            Phase::ShortBreak | Phase::LongBreak => Phase::Work,
        };

        self.phase
    }
}

impl Default for Pomodoro {
    fn default() -> Self {
        Self::new(PomodoroConfig::default())
    }
}

impl Widget for Pomodoro {
    fn poll(&mut self, now: DateTime<Utc>) -> Vec<WidgetEvent> {
        if !self.deadline.poll(now) {
            return Vec::new();
        }

        let finished = self.phase;
        let next = self.finish_phase();

        #[cfg(feature = "log")]
        log::debug!("Pomodoro {finished} finished, next is {next}");

        vec![WidgetEvent::PomodoroPhaseFinished { finished, next }]
    }

    fn dispose(&mut self) {
        self.deadline.cancel();
    }
}
