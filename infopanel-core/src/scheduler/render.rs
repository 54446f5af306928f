//! Screen layouts
//!
//! Lines are truncated to the display width and written top to bottom with
//! write-and-advance. Content that still cannot be shown (for example a city
//! name outside the active encoding) is replaced by [`PLACEHOLDER`].

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use infopanel_display::{DisplayError, TextDisplay};
use jiff::civil::DateTime;
use log::warn;

use crate::traits::{WeatherProvider, WeatherSnapshot};

/// Shown when weather content cannot be displayed
pub const PLACEHOLDER: &str = "No data";

/// Draw date and time
///
/// Single-row displays only get the time.
pub fn render_clock<D: TextDisplay>(display: &mut D, now: DateTime) -> Result<(), DisplayError> {
    let (rows, _) = display.dimensions();
    let time = now.strftime("%H:%M").to_string();
    let lines = if rows >= 2 {
        let date = now.strftime("%d.%m.%Y").to_string();
        vec![date, time]
    } else {
        vec![time]
    };

    display.clear()?;
    write_or_placeholder(display, &lines)
}

/// Draw the current weather
///
/// Returns `false` when the provider had nothing and the placeholder is
/// shown instead, so the caller can ask again later.
pub fn render_weather<D, W>(display: &mut D, weather: &W) -> Result<bool, DisplayError>
where
    D: TextDisplay,
    W: WeatherProvider + ?Sized,
{
    match weather.get_weather() {
        Ok(snapshot) => {
            render_snapshot(display, &snapshot)?;
            Ok(true)
        }
        Err(e) => {
            warn!("No weather to show: {}", e);
            display.clear()?;
            write_placeholder(display)?;
            Ok(false)
        }
    }
}

/// Draw an already fetched weather snapshot
pub fn render_snapshot<D: TextDisplay>(
    display: &mut D,
    snapshot: &WeatherSnapshot,
) -> Result<(), DisplayError> {
    display.clear()?;
    let (rows, _) = display.dimensions();
    let lines = weather_lines(snapshot, rows);
    write_or_placeholder(display, &lines)
}

/// Weather text for a display with `rows` rows
pub fn weather_lines(snapshot: &WeatherSnapshot, rows: u32) -> Vec<String> {
    let temperature = format!("{:.1}C", snapshot.temperature_c);
    if rows < 2 {
        return vec![format!("{} {}", snapshot.city, temperature)];
    }

    let mut lines = vec![snapshot.city.clone(), temperature];
    if rows >= 3 {
        lines.push(snapshot.description.clone());
    }
    if rows >= 4 {
        lines.push(format!(
            "{}% {:.1}m/s",
            snapshot.humidity_pct, snapshot.wind_speed_ms
        ));
    }
    lines
}

/// Cut `text` to at most `cols` characters
pub fn fit(text: &str, cols: u32) -> &str {
    match text.char_indices().nth(cols as usize) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

fn write_lines<D: TextDisplay>(display: &mut D, lines: &[String]) -> Result<(), DisplayError> {
    let (rows, cols) = display.dimensions();
    for line in lines.iter().take(rows as usize) {
        display.write_line_and_advance(fit(line, cols))?;
    }
    Ok(())
}

fn write_or_placeholder<D: TextDisplay>(
    display: &mut D,
    lines: &[String],
) -> Result<(), DisplayError> {
    match write_lines(display, lines) {
        Err(e) if !e.is_fatal() => {
            warn!("Cannot show content: {}", e);
            display.clear()?;
            write_placeholder(display)
        }
        result => result,
    }
}

fn write_placeholder<D: TextDisplay>(display: &mut D) -> Result<(), DisplayError> {
    let (_, cols) = display.dimensions();
    display.write_line(fit(PLACEHOLDER, cols))
}
