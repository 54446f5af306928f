//! Infopanel - clock and weather on a serial customer display
//!
//! Drives a two-line VFD/LCD "customer display" over a serial port. The
//! panel shows the date and time, the current weather, or alternates
//! between the two. Commands are read from standard input, one per line:
//! `clock`, `weather`, `auto_switch_mode` (or `auto`) and `exit`.

use std::path::PathBuf;
use std::time::Duration as StdDuration;

use clap::Parser;
use embassy_executor::Spawner;
use embassy_futures::join::join;
use embassy_time::Duration;
use log::{error, info, warn};
use static_cell::StaticCell;

use infopanel_core::config::{PanelConfig, WeatherSettings};
use infopanel_core::scheduler::ContentPanel;
use infopanel_core::state::Mode;
use infopanel_display::{Driver, EmulatedDisplay};
use infopanel_hal::UartConfig;

use crate::channels::{CommandChannel, Shutdown};
use crate::config::Overrides;
use crate::display::{PanelSink, SerialSink};
use crate::error::AppError;
use crate::tasks::SharedPanel;
use crate::weather::{OpenWeatherClient, WeatherCache};

mod channels;
mod clock;
mod config;
mod display;
mod error;
mod tasks;
mod weather;

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "infopanel", version, about = "Clock and weather on a serial customer display")]
struct Args {
    /// Settings file (created with defaults if missing)
    #[arg(short, long, default_value = "infopanel.toml")]
    config: PathBuf,

    /// Log what the display would show instead of opening the serial port
    #[arg(long)]
    dry_run: bool,

    /// Serial port, e.g. COM3 or /dev/ttyUSB0
    #[arg(long)]
    port: Option<String>,

    /// Weather city
    #[arg(long)]
    city: Option<String>,

    /// OpenWeatherMap API key
    #[arg(long)]
    api_key: Option<String>,

    /// Write the settings, including overrides, back to the file
    #[arg(long)]
    save: bool,

    /// Mode to start in
    #[arg(long, default_value_t = Mode::Clock)]
    mode: Mode,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            port: self.port.clone(),
            city: self.city.clone(),
            api_key: self.api_key.clone(),
        }
    }
}

// Shared with the worker threads, so they must live forever
static COMMANDS: StaticCell<CommandChannel> = StaticCell::new();
static SHUTDOWN: StaticCell<Shutdown> = StaticCell::new();
static WEATHER: StaticCell<WeatherCache> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let code = match run(args).await {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            1
        }
    };

    std::process::exit(code);
}

async fn run(args: Args) -> Result<i32, AppError> {
    info!("Infopanel starting...");

    let config = load_config(&args)?;

    let shutdown: &'static Shutdown = SHUTDOWN.init(Shutdown::new());
    let commands: &'static CommandChannel = COMMANDS.init(CommandChannel::new());
    let weather: &'static WeatherCache = WEATHER.init(WeatherCache::new());

    start_weather(&config.weather, weather, shutdown)?;

    let sink = open_sink(&args, &config)?;
    let driver = Driver::new(sink, config.display.to_display_config())?;
    info!(
        "Display ready: {}x{}, {}",
        config.display.rows, config.display.cols, config.display.encoding
    );

    let mut panel = ContentPanel::new(driver, weather, config.scheduler.switch_period());
    panel.set_mode(args.mode, clock::now());
    let panel: SharedPanel<_, _> = SharedPanel::new(panel);

    tasks::spawn_command_source(commands, shutdown)?;
    info!("Commands: clock, weather, auto_switch_mode, exit");

    let tick_interval = Duration::from_millis(u64::from(config.scheduler.tick_interval_ms));
    let listener_timeout = Duration::from_millis(u64::from(config.scheduler.listener_timeout_ms));
    join(
        tasks::scheduler_loop(&panel, shutdown, tick_interval, display::log_screen),
        tasks::listener_loop(commands, &panel, shutdown, listener_timeout),
    )
    .await;

    // Both loops are done; nothing else can reach the display
    if let Err(e) = panel.into_inner().into_display().close() {
        warn!("Display did not close cleanly: {}", e);
    }

    info!("Infopanel stopped");
    Ok(shutdown.exit_code())
}

/// Load settings, apply overrides and validate
///
/// A missing file is written with defaults (plus overrides). If that is not
/// enough to run, the user is asked to fill it in.
fn load_config(args: &Args) -> Result<PanelConfig, AppError> {
    let loaded = config::load(&args.config)?;
    let created = loaded.is_none();
    let mut settings = loaded.unwrap_or_default();

    let overrides = args.overrides();
    if !overrides.is_empty() {
        info!("Applying command-line overrides");
        overrides.apply(&mut settings);
    }
    if created || args.save {
        config::save(&args.config, &settings)?;
    }

    let checked = if args.dry_run {
        settings.validate_offline()
    } else {
        settings.validate()
    };
    match checked {
        Ok(()) => Ok(settings),
        Err(_) if created => Err(AppError::ConfigCreated(args.config.clone())),
        Err(e) => Err(e.into()),
    }
}

/// Fetch the weather once, then keep it fresh in the background
fn start_weather(
    settings: &WeatherSettings,
    cache: &'static WeatherCache,
    shutdown: &'static Shutdown,
) -> Result<(), AppError> {
    if !settings.is_configured() {
        warn!("Weather city or API key not set; weather will show a placeholder");
        return Ok(());
    }

    let client = OpenWeatherClient::new(settings)?;
    weather::refresh(&client, cache);

    let interval = StdDuration::from_secs(settings.refresh_interval_s);
    tasks::spawn_weather_poller(client, cache, interval, shutdown)?;
    Ok(())
}

/// Open the serial port, or the emulator for a dry run
fn open_sink(args: &Args, config: &PanelConfig) -> Result<PanelSink, AppError> {
    if args.dry_run {
        info!("Dry run: using the emulated display");
        let rows = config.display.rows as usize;
        let cols = config.display.cols as usize;
        return Ok(PanelSink::Emulated(EmulatedDisplay::new(rows, cols)));
    }

    let port = config.serial.port.as_str();
    let uart = UartConfig::with_baudrate(config.serial.baudrate);
    let sink = SerialSink::open(port, &uart).map_err(|source| AppError::SerialOpen {
        port: port.to_string(),
        source,
    })?;
    info!("Serial port {} open", sink.name());
    Ok(PanelSink::Serial(sink))
}
