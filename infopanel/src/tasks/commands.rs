//! Command source
//!
//! Reads one command per line from standard input on its own thread and
//! forwards the parsed commands to the listener. Unknown commands are
//! logged and dropped here, so the channel only ever carries valid ones.
//!
//! Forwarding never blocks: once the listener has stopped, a full channel
//! would otherwise hold this thread forever. Waiting for the next line does
//! block, so shutdown is only noticed after input arrives.

use std::io::{self, BufRead};
use std::thread::{self, JoinHandle};

use embassy_sync::channel::TrySendError;
use log::{debug, warn};

use infopanel_core::state::Command;

use crate::channels::{CommandChannel, Shutdown};

/// Start reading commands from stdin
pub fn spawn_command_source(
    commands: &'static CommandChannel,
    shutdown: &'static Shutdown,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("commands".into())
        .spawn(move || read_commands(io::stdin().lock(), commands, shutdown))
}

/// Forward commands from `input` until `exit`, end of input or shutdown
///
/// End of input counts as a shutdown request.
pub fn read_commands<R: BufRead>(input: R, commands: &CommandChannel, shutdown: &Shutdown) {
    for line in input.lines() {
        if shutdown.is_requested() {
            return;
        }

        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("Cannot read commands: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Command>() {
            Ok(command) => {
                debug!("Command {:?}", command);
                if let Err(TrySendError::Full(command)) = commands.try_send(command) {
                    warn!("Command queue full, dropping {:?}", command);
                    if command == Command::Exit {
                        shutdown.request("exit command");
                    }
                }
                if command == Command::Exit {
                    return;
                }
            }
            Err(e) => warn!("Ignoring {}", e),
        }
    }

    shutdown.request("end of command input");
}
