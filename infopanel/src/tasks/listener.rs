//! Command listener
//!
//! Applies commands from the channel to the panel. Waits are bounded so a
//! shutdown requested elsewhere is noticed within one timeout.

use embassy_time::{with_timeout, Duration};
use log::{debug, info};

use infopanel_core::state::Command;
use infopanel_core::traits::WeatherProvider;
use infopanel_display::TextDisplay;

use super::SharedPanel;
use crate::channels::{CommandChannel, Shutdown};
use crate::clock;

/// Run the listener until `exit` or shutdown
pub async fn listener_loop<D, W>(
    commands: &CommandChannel,
    panel: &SharedPanel<D, W>,
    shutdown: &Shutdown,
    timeout: Duration,
) where
    D: TextDisplay,
    W: WeatherProvider,
{
    info!("Command listener started");

    while !shutdown.is_requested() {
        let Ok(command) = with_timeout(timeout, commands.receive()).await else {
            continue;
        };

        debug!("Received {:?}", command);
        match command {
            Command::SetMode(mode) => {
                panel.lock().await.set_mode(mode, clock::now());
            }
            Command::Exit => {
                shutdown.request("exit command");
                break;
            }
        }
    }

    info!("Command listener stopped");
}
