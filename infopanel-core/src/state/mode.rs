//! Display mode definition

use core::fmt;
use core::str::FromStr;

use alloc::string::ToString;

use super::command::InvalidCommand;

/// What the panel is asked to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Date and time, redrawn every minute
    #[default]
    Clock,
    /// Current weather, drawn once on entry
    Weather,
    /// Weather and clock alternating on a timer
    AutoSwitch,
}

/// What is actually drawn on the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Content {
    Clock,
    Weather,
}

impl Mode {
    /// All modes
    pub const ALL: [Mode; 3] = [Mode::Clock, Mode::Weather, Mode::AutoSwitch];

    /// Command name of the mode
    pub const fn name(self) -> &'static str {
        match self {
            Mode::Clock => "clock",
            Mode::Weather => "weather",
            Mode::AutoSwitch => "auto_switch_mode",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = InvalidCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "clock" => Ok(Mode::Clock),
            "weather" => Ok(Mode::Weather),
            "auto_switch_mode" | "auto" => Ok(Mode::AutoSwitch),
            other => Err(InvalidCommand(other.to_string())),
        }
    }
}

impl Content {
    /// The other content, for alternation
    pub const fn toggled(self) -> Self {
        match self {
            Content::Clock => Content::Weather,
            Content::Weather => Content::Clock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_names_parse_back() {
        for mode in Mode::ALL {
            assert_eq!(mode.name().parse::<Mode>(), Ok(mode));
        }
    }

    #[test]
    fn test_auto_alias() {
        assert_eq!("auto".parse::<Mode>(), Ok(Mode::AutoSwitch));
        assert_eq!(" weather\n".parse::<Mode>(), Ok(Mode::Weather));
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let err = "bogus".parse::<Mode>().unwrap_err();
        assert_eq!(err, InvalidCommand("bogus".into()));
        assert!("Clock".parse::<Mode>().is_err());
        assert!("".parse::<Mode>().is_err());
    }

    #[test]
    fn test_toggle_alternates() {
        assert_eq!(Content::Weather.toggled(), Content::Clock);
        assert_eq!(Content::Clock.toggled().toggled(), Content::Clock);
    }
}
