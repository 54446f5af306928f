//! Scheduler loop
//!
//! Ticks the panel at a fixed interval until shutdown. A transport error
//! ends the loop and marks the run as failed.

use embassy_time::{Duration, Timer};
use log::{debug, error, info};

use infopanel_core::traits::WeatherProvider;
use infopanel_display::TextDisplay;

use super::SharedPanel;
use crate::channels::Shutdown;
use crate::clock;

/// Run the scheduler until shutdown
///
/// `on_redraw` sees the display after every redraw.
pub async fn scheduler_loop<D, W, F>(
    panel: &SharedPanel<D, W>,
    shutdown: &Shutdown,
    tick_interval: Duration,
    mut on_redraw: F,
) where
    D: TextDisplay,
    W: WeatherProvider,
    F: FnMut(&D),
{
    info!("Scheduler started");

    while !shutdown.is_requested() {
        {
            let mut panel = panel.lock().await;
            match panel.tick(clock::now()) {
                Ok(Some(content)) => {
                    debug!("Drew {:?}", content);
                    on_redraw(panel.display());
                }
                Ok(None) => {}
                Err(e) => {
                    error!("Display lost: {}", e);
                    shutdown.fail("display transport failed");
                    break;
                }
            }
        }

        Timer::after(tick_interval).await;
    }

    info!("Scheduler stopped");
}
