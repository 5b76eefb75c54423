use serde::{Deserialize, Serialize};

/// Unit system sent to the provider and reflected in every numeric field
/// of the records below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Metric, Units::Imperial]
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported unit systems: metric, imperial."
            )),
        }
    }
}

/// Where a reading was taken.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub country_code: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wind {
    /// Speed in the requested unit system (m/s metric, mph imperial).
    pub speed: f64,
    /// Bearing in degrees; the provider omits it for calm readings.
    pub direction_degrees: Option<f64>,
}

/// A single point-in-time weather reading for a location.
///
/// Values are passed through as received; in particular
/// `temperature_min <= temperature <= temperature_max` is not guaranteed
/// by the provider and is not asserted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub location: Location,
    pub temperature: f64,
    pub feels_like: f64,
    pub temperature_min: f64,
    pub temperature_max: f64,
    pub humidity_percent: u8,
    pub pressure_hpa: f64,
    pub visibility_meters: f64,
    pub wind: Wind,
    /// Coarse category, e.g. "Rain".
    pub condition_main: String,
    /// Free-text description, e.g. "light rain".
    pub condition_description: String,
    /// Provider icon code, e.g. "10d".
    pub condition_icon: String,
    pub sunrise_epoch: i64,
    pub sunset_epoch: i64,
}

/// One future reading in a forecast, stamped with its target time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub forecast_epoch: i64,
    pub temperature: f64,
    pub feels_like: f64,
    pub temperature_min: f64,
    pub temperature_max: f64,
    pub humidity_percent: u8,
    pub pressure_hpa: f64,
    pub wind: Wind,
    pub condition_main: String,
    pub condition_description: String,
    pub condition_icon: String,
}

/// Ordered forecast for one location. Entries keep the provider's order;
/// ordering by `forecast_epoch` is the only guarantee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastSeries {
    pub location: Location,
    pub entries: Vec<ForecastEntry>,
}

/// Best-effort location guess from the IP-lookup fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationHint {
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
}
