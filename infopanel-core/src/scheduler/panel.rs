//! Content panel
//!
//! Owns the display and the weather source, and turns scheduler decisions
//! into screen updates.

use infopanel_display::{DisplayError, TextDisplay};
use jiff::civil::DateTime;
use jiff::SignedDuration;
use log::{debug, info, trace};

use super::render::{render_clock, render_snapshot, render_weather};
use super::timing::SchedulerState;
use crate::state::{Content, InvalidCommand, Mode};
use crate::traits::WeatherProvider;

/// Clock/weather panel on top of a text display
pub struct ContentPanel<D, W> {
    display: D,
    weather: W,
    state: SchedulerState,
}

impl<D: TextDisplay, W: WeatherProvider> ContentPanel<D, W> {
    /// Create a panel in clock mode with a redraw pending
    pub fn new(display: D, weather: W, switch_period: SignedDuration) -> Self {
        Self {
            display,
            weather,
            state: SchedulerState::new(switch_period),
        }
    }

    /// Current mode
    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    /// Scheduler bookkeeping
    pub fn state(&self) -> &SchedulerState {
        &self.state
    }

    /// Switch mode; the next tick redraws
    pub fn set_mode(&mut self, mode: Mode, now: DateTime) {
        if mode != self.state.mode() {
            info!("Mode {} -> {}", self.state.mode(), mode);
        }
        self.state.set_mode(mode, now);
    }

    /// Switch mode by command name
    ///
    /// Unknown names leave the panel untouched.
    pub fn set_mode_named(&mut self, name: &str, now: DateTime) -> Result<(), InvalidCommand> {
        let mode = name.parse()?;
        self.set_mode(mode, now);
        Ok(())
    }

    /// Run one scheduling step
    ///
    /// Returns the content that was redrawn, if any. Only transport errors
    /// are returned; everything else is shown as a placeholder.
    ///
    /// While weather is on the placeholder the provider is asked again on
    /// every tick, and the screen is only touched once it answers.
    pub fn tick(&mut self, now: DateTime) -> Result<Option<Content>, DisplayError> {
        let retrying = self.state.is_weather_missing() && !self.state.is_dirty();
        let Some(content) = self.state.decide(now) else {
            return Ok(None);
        };

        match content {
            Content::Clock => {
                debug!("Redraw {:?} at {}", content, now);
                render_clock(&mut self.display, now)?;
            }
            Content::Weather if retrying => match self.weather.get_weather() {
                Ok(snapshot) => {
                    debug!("Weather available again at {}", now);
                    render_snapshot(&mut self.display, &snapshot)?;
                }
                Err(e) => {
                    trace!("Weather still unavailable: {}", e);
                    self.state.weather_missing();
                    return Ok(None);
                }
            },
            Content::Weather => {
                debug!("Redraw {:?} at {}", content, now);
                if !render_weather(&mut self.display, &self.weather)? {
                    self.state.weather_missing();
                }
            }
        }
        Ok(Some(content))
    }

    /// The display being drawn on
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Give the display back, ending the panel
    pub fn into_display(self) -> D {
        self.display
    }
}
