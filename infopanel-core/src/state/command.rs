//! Commands accepted from the command source

use core::str::FromStr;

use alloc::string::String;

use super::mode::Mode;

/// A command for the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Switch the display mode
    SetMode(Mode),
    /// Stop the application
    Exit,
}

/// Text that names no known command
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid command {0:?}")]
pub struct InvalidCommand(pub String);

impl FromStr for Command {
    type Err = InvalidCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "exit" => Ok(Command::Exit),
            other => other.parse().map(Command::SetMode),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!("clock".parse::<Command>(), Ok(Command::SetMode(Mode::Clock)));
        assert_eq!("weather".parse::<Command>(), Ok(Command::SetMode(Mode::Weather)));
        assert_eq!(
            "auto_switch_mode".parse::<Command>(),
            Ok(Command::SetMode(Mode::AutoSwitch))
        );
        assert_eq!("exit\r\n".parse::<Command>(), Ok(Command::Exit));
    }

    #[test]
    fn test_invalid_command_keeps_text() {
        let err = "reboot".parse::<Command>().unwrap_err();
        assert_eq!(err.0, "reboot");
        assert_eq!(err.to_string(), "invalid command \"reboot\"");
    }
}
