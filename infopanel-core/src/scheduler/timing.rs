//! Redraw decisions
//!
//! Pure bookkeeping: which content is due at a given wall-clock time. No
//! display access happens here, which keeps the rules testable on their own.

use jiff::civil::{Date, DateTime};
use jiff::SignedDuration;
use log::debug;

use crate::state::{Content, Mode};

/// Auto-switch period used when none is configured
pub const DEFAULT_SWITCH_PERIOD: SignedDuration = SignedDuration::from_secs(30);

/// The calendar minute a clock redraw showed
///
/// Includes the date so that the same minute on another day, or after the
/// wall clock was stepped by exactly an hour, still counts as new.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinuteStamp {
    pub date: Date,
    pub hour: i8,
    pub minute: i8,
}

impl From<DateTime> for MinuteStamp {
    fn from(dt: DateTime) -> Self {
        Self {
            date: dt.date(),
            hour: dt.hour(),
            minute: dt.minute(),
        }
    }
}

/// Scheduler bookkeeping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerState {
    mode: Mode,
    /// Forces a redraw on the next tick
    dirty: bool,
    /// Content currently on screen (alternates in auto-switch)
    active: Content,
    /// Start of the current auto-switch period
    last_switch_at: Option<DateTime>,
    switch_period: SignedDuration,
    last_rendered_minute: Option<MinuteStamp>,
    /// Weather on screen is a placeholder; keep asking the provider
    weather_missing: bool,
}

impl SchedulerState {
    /// Fresh state: clock mode, redraw pending
    pub fn new(switch_period: SignedDuration) -> Self {
        Self {
            mode: Mode::Clock,
            dirty: true,
            active: Content::Clock,
            last_switch_at: None,
            switch_period,
            last_rendered_minute: None,
            weather_missing: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn active(&self) -> Content {
        self.active
    }

    pub fn last_switch_at(&self) -> Option<DateTime> {
        self.last_switch_at
    }

    pub fn switch_period(&self) -> SignedDuration {
        self.switch_period
    }

    pub fn last_rendered_minute(&self) -> Option<MinuteStamp> {
        self.last_rendered_minute
    }

    pub fn is_weather_missing(&self) -> bool {
        self.weather_missing
    }

    /// The weather redraw fell back to the placeholder
    ///
    /// Weather stays due on every tick until it is shown or the content
    /// changes. Ignored while the clock is active.
    pub fn weather_missing(&mut self) {
        self.weather_missing = self.active == Content::Weather;
    }

    /// Enter a mode; the next tick redraws
    pub fn set_mode(&mut self, mode: Mode, now: DateTime) {
        self.mode = mode;
        self.dirty = true;
        self.weather_missing = false;
        match mode {
            Mode::Clock => {
                self.active = Content::Clock;
                self.last_switch_at = None;
            }
            Mode::Weather => {
                self.active = Content::Weather;
                self.last_switch_at = None;
            }
            Mode::AutoSwitch => {
                self.active = Content::Weather;
                self.last_switch_at = Some(now);
            }
        }
    }

    /// Decide what to redraw at `now`, if anything
    ///
    /// Clears the dirty flag and records the minute of a clock redraw.
    pub fn decide(&mut self, now: DateTime) -> Option<Content> {
        let stamp = MinuteStamp::from(now);

        let redraw = match self.mode {
            Mode::Clock | Mode::Weather => self.due(stamp),
            Mode::AutoSwitch => {
                let since = *self.last_switch_at.get_or_insert(now);
                let elapsed = now.duration_since(since);
                if elapsed.is_negative() {
                    debug!("Wall clock went backwards, restarting switch period");
                    self.last_switch_at = Some(now);
                    self.due(stamp)
                } else if elapsed >= self.switch_period {
                    self.active = self.active.toggled();
                    self.last_switch_at = Some(now);
                    self.weather_missing = false;
                    debug!("Auto-switch to {:?}", self.active);
                    true
                } else {
                    self.due(stamp)
                }
            }
        };

        if redraw {
            match self.active {
                Content::Clock => self.last_rendered_minute = Some(stamp),
                Content::Weather => self.weather_missing = false,
            }
        }
        self.dirty = false;

        redraw.then_some(self.active)
    }

    fn due(&self, stamp: MinuteStamp) -> bool {
        match self.active {
            Content::Clock => self.dirty || self.last_rendered_minute != Some(stamp),
            Content::Weather => self.dirty || self.weather_missing,
        }
    }
}

impl Default for SchedulerState {
    fn default() -> Self {
        Self::new(DEFAULT_SWITCH_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;
    use proptest::prelude::*;

    fn at(h: i8, m: i8, s: i8) -> DateTime {
        date(2026, 10, 17).at(h, m, s, 0)
    }

    fn secs(n: i64) -> SignedDuration {
        SignedDuration::from_secs(n)
    }

    #[test]
    fn test_clock_redraws_once_per_minute() {
        let mut state = SchedulerState::default();

        assert_eq!(state.decide(at(9, 0, 0)), Some(Content::Clock));
        assert!(!state.is_dirty());
        assert_eq!(state.decide(at(9, 0, 30)), None);
        assert_eq!(state.decide(at(9, 0, 59)), None);
        assert_eq!(state.decide(at(9, 1, 0)), Some(Content::Clock));
    }

    #[test]
    fn test_same_minute_next_day_redraws() {
        let mut state = SchedulerState::default();
        state.decide(at(9, 0, 0));

        let tomorrow = date(2026, 10, 18).at(9, 0, 0, 0);
        assert_eq!(state.decide(tomorrow), Some(Content::Clock));
    }

    #[test]
    fn test_weather_draws_once() {
        let mut state = SchedulerState::default();
        state.set_mode(Mode::Weather, at(9, 0, 0));

        assert_eq!(state.decide(at(9, 0, 0)), Some(Content::Weather));
        assert_eq!(state.decide(at(9, 1, 0)), None);
        assert_eq!(state.decide(at(10, 0, 0)), None);
    }

    #[test]
    fn test_missing_weather_stays_due() {
        let mut state = SchedulerState::default();
        state.set_mode(Mode::Weather, at(9, 0, 0));
        assert_eq!(state.decide(at(9, 0, 0)), Some(Content::Weather));

        state.weather_missing();
        assert!(!state.is_dirty());
        assert_eq!(state.decide(at(9, 0, 1)), Some(Content::Weather));
        assert!(!state.is_weather_missing());
        assert_eq!(state.decide(at(9, 0, 2)), None);
    }

    #[test]
    fn test_missing_weather_dropped_on_switch() {
        let mut state = SchedulerState::new(secs(30));
        let t0 = at(12, 0, 0);
        state.set_mode(Mode::AutoSwitch, t0);
        state.decide(t0);
        state.weather_missing();

        assert_eq!(state.decide(t0 + secs(30)), Some(Content::Clock));
        assert!(!state.is_weather_missing());
        state.weather_missing();
        assert!(!state.is_weather_missing());
        assert_eq!(state.decide(t0 + secs(31)), None);
    }

    #[test]
    fn test_set_mode_forces_redraw() {
        let mut state = SchedulerState::default();
        state.decide(at(9, 0, 0));

        state.set_mode(Mode::Clock, at(9, 0, 10));
        assert!(state.is_dirty());
        assert_eq!(state.decide(at(9, 0, 10)), Some(Content::Clock));
    }

    #[test]
    fn test_auto_switch_alternates() {
        let mut state = SchedulerState::new(secs(30));
        let t0 = at(12, 0, 0);
        state.set_mode(Mode::AutoSwitch, t0);

        assert_eq!(state.decide(t0), Some(Content::Weather));
        assert_eq!(state.decide(t0 + secs(10)), None);
        assert_eq!(state.decide(t0 + secs(30)), Some(Content::Clock));
        assert_eq!(state.decide(t0 + secs(45)), None);
        assert_eq!(state.decide(t0 + secs(60)), Some(Content::Weather));
        assert_eq!(state.decide(t0 + secs(75)), None);
        assert_eq!(state.decide(t0 + secs(90)), Some(Content::Clock));
    }

    #[test]
    fn test_auto_switch_clock_follows_minutes() {
        let mut state = SchedulerState::new(secs(120));
        let t0 = at(12, 0, 30);
        state.set_mode(Mode::AutoSwitch, t0);
        state.decide(t0);
        assert_eq!(state.decide(t0 + secs(120)), Some(Content::Clock));

        // Still within the period, but the minute changed
        assert_eq!(state.decide(at(12, 3, 0)), Some(Content::Clock));
        assert_eq!(state.decide(at(12, 3, 20)), None);
    }

    #[test]
    fn test_backwards_clock_restarts_period() {
        let mut state = SchedulerState::new(secs(30));
        let t0 = at(12, 0, 0);
        state.set_mode(Mode::AutoSwitch, t0);
        state.decide(t0);

        let earlier = t0 - secs(3600);
        assert_eq!(state.decide(earlier), None);
        assert_eq!(state.last_switch_at(), Some(earlier));
        assert_eq!(state.decide(earlier + secs(29)), None);
        assert_eq!(state.decide(earlier + secs(30)), Some(Content::Clock));
    }

    proptest! {
        #[test]
        fn test_auto_switch_flips_once_per_period(period in 1i64..120, ticks in 1i64..600) {
            let mut state = SchedulerState::new(secs(period));
            let t0 = at(8, 0, 0);
            state.set_mode(Mode::AutoSwitch, t0);
            prop_assert_eq!(state.decide(t0), Some(Content::Weather));

            let mut flips = 0;
            let mut expected = Content::Weather;
            for s in 1..=ticks {
                let before = state.active();
                state.decide(t0 + secs(s));
                if state.active() != before {
                    flips += 1;
                    expected = expected.toggled();
                }
                prop_assert_eq!(state.active(), expected);
            }
            prop_assert_eq!(flips, ticks / period);
        }
    }
}
