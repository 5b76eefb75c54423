//! Derived-metric calculators: pure functions turning a raw observation
//! into the display-ready values the dashboard shows next to it.

use chrono::{DateTime, Utc};

use crate::classify::{Level, air_quality_level, uv_level, wind_direction_label};
use crate::model::Observation;

/// Comfort classification with the icon the UI puts next to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comfort {
    pub label: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    Day,
    Night,
}

/// Everything computed locally from one observation.
#[derive(Debug, Clone)]
pub struct DerivedMetrics {
    pub wind_direction_label: Option<&'static str>,
    pub uv: Option<Level>,
    pub air_quality: Option<Level>,
    pub comfort: Comfort,
    pub advisories: Vec<String>,
    pub moon_phase_icon: &'static str,
}

/// Simplified temperature/humidity comfort proxy.
///
/// `heat_index = temperature + 0.5 * (humidity - 10)` is intentionally not
/// the meteorological heat-index formula; the banding below depends on it.
pub fn comfort_level(temperature: f64, humidity_percent: f64) -> Comfort {
    let heat_index = temperature + 0.5 * (humidity_percent - 10.0);

    if heat_index < 15.0 {
        Comfort { label: "Cold", color: "#3b82f6", icon: "🥶" }
    } else if heat_index < 25.0 {
        Comfort { label: "Cool", color: "#06b6d4", icon: "😊" }
    } else if heat_index < 30.0 {
        Comfort { label: "Comfortable", color: "#10b981", icon: "😌" }
    } else if heat_index < 35.0 {
        Comfort { label: "Warm", color: "#f59e0b", icon: "😅" }
    } else {
        Comfort { label: "Hot", color: "#ef4444", icon: "🥵" }
    }
}

/// Rule-based advisory list.
///
/// At most one temperature advisory is emitted (coldest band first), then
/// each remaining rule appends independently. Emission order is fixed:
/// temperature, rain, snow, storm, wind, humidity-high, humidity-low, UV,
/// air quality.
pub fn weather_advisories(
    observation: &Observation,
    uv: Option<f64>,
    air_quality_index: Option<u8>,
) -> Vec<String> {
    let mut advisories = Vec::new();

    let temp = observation.temperature;
    if temp < 0.0 {
        advisories.push("🥶 Freezing conditions, limit time outdoors".to_string());
    } else if temp < 10.0 {
        advisories.push("🧥 Wear warm clothing".to_string());
    } else if temp > 35.0 {
        advisories.push("🔥 Very hot, avoid the midday sun".to_string());
    } else if temp > 25.0 {
        advisories.push("🩳 Light clothing recommended".to_string());
    }

    let condition = observation.condition_main.to_lowercase();
    if condition.contains("rain") {
        advisories.push("☂️ Don't forget your umbrella".to_string());
    }
    if condition.contains("snow") {
        advisories.push("❄️ Drive carefully, icy conditions".to_string());
    }
    if condition.contains("storm") {
        advisories.push("⛈️ Storm nearby, stay indoors if possible".to_string());
    }

    if observation.wind.speed > 15.0 {
        advisories.push("💨 Windy conditions, secure loose items".to_string());
    }
    if observation.humidity_percent > 80 {
        advisories.push("💧 High humidity, stay hydrated".to_string());
    }
    if observation.humidity_percent < 30 {
        advisories.push("🌵 Dry air, moisturize and drink water".to_string());
    }
    if let Some(uv) = uv {
        if uv > 7.0 {
            advisories.push("🧴 High UV, wear sunscreen".to_string());
        }
    }
    if let Some(aqi) = air_quality_index {
        if aqi > 3 {
            advisories.push("😷 Poor air quality, limit outdoor activity".to_string());
        }
    }

    advisories
}

/// Dew point approximation. Not meteorologically exact.
pub fn dew_point_approx(temperature: f64, humidity_percent: f64) -> f64 {
    temperature - (100.0 - humidity_percent) / 5.0
}

const MOON_PHASES: [&str; 8] = ["🌑", "🌒", "🌓", "🌔", "🌕", "🌖", "🌗", "🌘"];

/// 2000-01-06T00:00:00Z, a known new moon.
const REFERENCE_NEW_MOON_EPOCH: i64 = 947_116_800;

const SYNODIC_DAYS: f64 = 29.53;

/// Moon phase glyph for a date: days since a reference new moon, modulo
/// one synodic cycle, split into 8 equal bins.
pub fn moon_phase_icon(date: DateTime<Utc>) -> &'static str {
    let days = (date.timestamp() - REFERENCE_NEW_MOON_EPOCH) as f64 / 86_400.0;
    let phase = days.rem_euclid(SYNODIC_DAYS) / SYNODIC_DAYS * 8.0;
    MOON_PHASES[(phase as usize).min(7)]
}

/// Day/night split for a timestamp relative to the observation's sun times.
pub fn time_of_day(epoch: i64, sunrise_epoch: i64, sunset_epoch: i64) -> TimeOfDay {
    if epoch < sunrise_epoch || epoch >= sunset_epoch {
        TimeOfDay::Night
    } else {
        TimeOfDay::Day
    }
}

/// Bundle every derived value for one observation.
///
/// `uv` and `air_quality_index` are optional because they come from
/// separate provider endpoints the caller may not have queried.
pub fn derived_metrics(
    observation: &Observation,
    uv: Option<f64>,
    air_quality_index: Option<u8>,
    now: DateTime<Utc>,
) -> DerivedMetrics {
    DerivedMetrics {
        wind_direction_label: observation.wind.direction_degrees.map(wind_direction_label),
        uv: uv.map(uv_level),
        air_quality: air_quality_index.map(air_quality_level),
        comfort: comfort_level(observation.temperature, f64::from(observation.humidity_percent)),
        advisories: weather_advisories(observation, uv, air_quality_index),
        moon_phase_icon: moon_phase_icon(now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Location, Wind};
    use chrono::TimeZone;

    fn observation(temp: f64, humidity: u8, condition: &str, wind_speed: f64) -> Observation {
        Observation {
            location: Location {
                name: "Kumasi".to_string(),
                country_code: "GH".to_string(),
                latitude: 6.69,
                longitude: -1.62,
            },
            temperature: temp,
            feels_like: temp,
            temperature_min: temp - 2.0,
            temperature_max: temp + 2.0,
            humidity_percent: humidity,
            pressure_hpa: 1013.0,
            visibility_meters: 10_000.0,
            wind: Wind { speed: wind_speed, direction_degrees: Some(200.0) },
            condition_main: condition.to_string(),
            condition_description: condition.to_lowercase(),
            condition_icon: "10d".to_string(),
            sunrise_epoch: 1_700_000_000,
            sunset_epoch: 1_700_043_200,
        }
    }

    #[test]
    fn comfort_bands() {
        assert_eq!(comfort_level(20.0, 50.0).label, "Hot"); // heat index 40
        assert_eq!(comfort_level(10.0, 10.0).label, "Cold"); // heat index 10
        assert_eq!(comfort_level(18.0, 20.0).label, "Cool"); // heat index 23
        assert_eq!(comfort_level(22.0, 20.0).label, "Comfortable"); // 27
        assert_eq!(comfort_level(25.0, 25.0).label, "Warm"); // 32.5
    }

    #[test]
    fn at_most_one_temperature_advisory() {
        // -5 is both < 0 and < 10; only the freezing advisory fires.
        let advisories = weather_advisories(&observation(-5.0, 50, "Clear", 1.0), None, None);
        assert_eq!(advisories.len(), 1);
        assert!(advisories[0].contains("Freezing"));
    }

    #[test]
    fn freezing_advisory_precedes_rain_advisory() {
        let advisories = weather_advisories(&observation(-5.0, 50, "light Rain", 1.0), None, None);
        assert!(advisories[0].contains("Freezing"));
        assert!(advisories[1].contains("umbrella"));
        assert_eq!(advisories.len(), 2);
    }

    #[test]
    fn condition_rules_are_independent() {
        // A thundery sleet day can trip rain, snow and storm at once.
        let advisories =
            weather_advisories(&observation(5.0, 50, "Rainstorm with snow", 1.0), None, None);
        let joined = advisories.join("\n");
        assert!(joined.contains("umbrella"));
        assert!(joined.contains("icy"));
        assert!(joined.contains("Storm"));
    }

    #[test]
    fn full_emission_order_is_stable() {
        let obs = observation(38.0, 90, "Thunderstorm with rain", 20.0);
        let advisories = weather_advisories(&obs, Some(9.0), Some(4));
        let labels: Vec<&str> = advisories.iter().map(String::as_str).collect();
        assert!(labels[0].contains("Very hot"));
        assert!(labels[1].contains("umbrella"));
        assert!(labels[2].contains("Storm"));
        assert!(labels[3].contains("Windy"));
        assert!(labels[4].contains("High humidity"));
        assert!(labels[5].contains("UV"));
        assert!(labels[6].contains("air quality"));
        assert_eq!(labels.len(), 7);

        // Same inputs, same sequence.
        assert_eq!(advisories, weather_advisories(&obs, Some(9.0), Some(4)));
    }

    #[test]
    fn low_humidity_advisory() {
        let advisories = weather_advisories(&observation(20.0, 20, "Clear", 1.0), None, None);
        assert_eq!(advisories.len(), 1);
        assert!(advisories[0].contains("Dry air"));
    }

    #[test]
    fn dew_point_formula() {
        assert_eq!(dew_point_approx(20.0, 100.0), 20.0);
        assert_eq!(dew_point_approx(20.0, 50.0), 10.0);
    }

    #[test]
    fn moon_phase_new_moon_at_reference() {
        let date = Utc.with_ymd_and_hms(2000, 1, 6, 0, 0, 0).unwrap();
        assert_eq!(moon_phase_icon(date), "🌑");
    }

    #[test]
    fn moon_phase_full_near_mid_cycle() {
        let date = Utc.with_ymd_and_hms(2000, 1, 21, 0, 0, 0).unwrap();
        assert_eq!(moon_phase_icon(date), "🌕");
    }

    #[test]
    fn moon_phase_stable_within_a_day_away_from_bin_edges() {
        // Half a day on from the reference new moon, well inside bin 0.
        let a = Utc.with_ymd_and_hms(2000, 1, 6, 12, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2000, 1, 7, 6, 0, 0).unwrap();
        assert_eq!(moon_phase_icon(a), moon_phase_icon(b));
    }

    #[test]
    fn moon_phase_cycles_through_all_glyphs() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let mut seen = Vec::new();
        for day in 0..30 {
            let icon = moon_phase_icon(start + chrono::Duration::days(day));
            if !seen.contains(&icon) {
                seen.push(icon);
            }
        }
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn moon_phase_handles_dates_before_reference() {
        let date = Utc.with_ymd_and_hms(1999, 12, 1, 0, 0, 0).unwrap();
        assert!(MOON_PHASES.contains(&moon_phase_icon(date)));
    }

    #[test]
    fn time_of_day_follows_sun_times() {
        assert_eq!(time_of_day(50, 100, 200), TimeOfDay::Night);
        assert_eq!(time_of_day(150, 100, 200), TimeOfDay::Day);
        assert_eq!(time_of_day(250, 100, 200), TimeOfDay::Night);
        assert_eq!(time_of_day(200, 100, 200), TimeOfDay::Night);
    }

    #[test]
    fn derived_metrics_bundles_everything() {
        let obs = observation(20.0, 50, "Clear", 3.0);
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let metrics = derived_metrics(&obs, Some(3.0), Some(2), now);

        assert_eq!(metrics.wind_direction_label, Some("SSW"));
        assert_eq!(metrics.uv.unwrap().label, "Moderate");
        assert_eq!(metrics.air_quality.unwrap().label, "Fair");
        assert_eq!(metrics.comfort.label, "Hot");
        assert!(metrics.advisories.is_empty());
        assert!(MOON_PHASES.contains(&metrics.moon_phase_icon));
    }

    #[test]
    fn derived_metrics_without_optional_inputs() {
        let mut obs = observation(20.0, 50, "Clear", 3.0);
        obs.wind.direction_degrees = None;
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let metrics = derived_metrics(&obs, None, None, now);

        assert_eq!(metrics.wind_direction_label, None);
        assert!(metrics.uv.is_none());
        assert!(metrics.air_quality.is_none());
    }
}
