//! Human-friendly rendering of observations, forecasts and derived
//! metrics for the terminal.

use chrono::{DateTime, Utc};

use skycast_core::derive::{TimeOfDay, dew_point_approx, time_of_day};
use skycast_core::{DerivedMetrics, ForecastSeries, Observation, Units};

/// Forecast entries arrive every 3 hours; one entry per day is enough for
/// the compact strip.
const ENTRIES_PER_DAY: usize = 8;

pub fn render_report(
    observation: &Observation,
    forecast: &ForecastSeries,
    metrics: &DerivedMetrics,
    units: Units,
) -> String {
    let mut out = String::new();

    let location = &observation.location;
    let title = if location.country_code.is_empty() {
        location.name.clone()
    } else {
        format!("{}, {}", location.name, location.country_code)
    };
    out.push_str(&format!("{title} · {}\n", observation.condition_description));

    let deg = temp_suffix(units);
    out.push_str(&format!(
        "  {:.1}{deg} (feels like {:.1}{deg}, min {:.1}{deg}, max {:.1}{deg})\n",
        observation.temperature,
        observation.feels_like,
        observation.temperature_min,
        observation.temperature_max,
    ));

    let wind = match metrics.wind_direction_label {
        Some(label) => format!("{} {label}", format_wind_speed(observation.wind.speed, units)),
        None => format_wind_speed(observation.wind.speed, units),
    };
    out.push_str(&format!(
        "  Humidity {}%  ·  Pressure {:.0} hPa  ·  Wind {wind}\n",
        observation.humidity_percent, observation.pressure_hpa,
    ));

    let comfort = &metrics.comfort;
    out.push_str(&format!(
        "  {} {} (dew point ≈ {:.1}{deg})\n",
        comfort.icon,
        comfort.label,
        dew_point_approx(observation.temperature, f64::from(observation.humidity_percent)),
    ));

    let daylight = match time_of_day(
        Utc::now().timestamp(),
        observation.sunrise_epoch,
        observation.sunset_epoch,
    ) {
        TimeOfDay::Day => "daytime",
        TimeOfDay::Night => "night",
    };
    out.push_str(&format!(
        "  Sunrise {}  ·  Sunset {}  ·  {daylight}  ·  {}\n",
        format_clock(observation.sunrise_epoch),
        format_clock(observation.sunset_epoch),
        metrics.moon_phase_icon,
    ));

    if let Some(uv) = &metrics.uv {
        out.push_str(&format!("  UV {}\n", uv.label));
    }
    if let Some(air) = &metrics.air_quality {
        out.push_str(&format!("  Air quality {}\n", air.label));
    }

    if !metrics.advisories.is_empty() {
        out.push('\n');
        for advisory in &metrics.advisories {
            out.push_str(&format!("  {advisory}\n"));
        }
    }

    if !forecast.entries.is_empty() {
        out.push('\n');
        for entry in forecast.entries.iter().step_by(ENTRIES_PER_DAY) {
            out.push_str(&format!(
                "  {}  {:>6.1}{deg}  {}\n",
                format_date(entry.forecast_epoch),
                entry.temperature,
                entry.condition_description,
            ));
        }
    }

    out
}

/// "Thu, Nov 23" style date for a forecast timestamp.
pub fn format_date(epoch: i64) -> String {
    match DateTime::<Utc>::from_timestamp(epoch, 0) {
        Some(dt) => dt.format("%a, %b %-d").to_string(),
        None => epoch.to_string(),
    }
}

fn format_clock(epoch: i64) -> String {
    match DateTime::<Utc>::from_timestamp(epoch, 0) {
        Some(dt) => dt.format("%H:%M UTC").to_string(),
        None => epoch.to_string(),
    }
}

/// Wind speed in the unit system's native unit, with km/h alongside m/s
/// for metric readers.
pub fn format_wind_speed(speed: f64, units: Units) -> String {
    match units {
        Units::Imperial => format!("{speed} mph"),
        Units::Metric => {
            let kmh = speed * 3.6;
            format!("{speed} m/s ({kmh:.1} km/h)")
        }
    }
}

fn temp_suffix(units: Units) -> &'static str {
    match units {
        Units::Metric => "°C",
        Units::Imperial => "°F",
    }
}
