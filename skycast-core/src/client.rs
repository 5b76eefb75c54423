//! Weather data client for the OpenWeather HTTP API.
//!
//! One client instance serves the whole dashboard: current conditions and
//! forecast for a city (fetched concurrently, succeed or fail together),
//! current conditions for raw coordinates, and a best-effort IP-based
//! location hint. The client holds no state between calls and performs no
//! retries; a failed attempt surfaces immediately and the caller decides
//! what to do next.

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{
    ForecastEntry, ForecastSeries, Location, LocationHint, Observation, Units, Wind,
};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const IP_LOOKUP_URL: &str = "https://ipapi.co/json/";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    http: Client,
    base_url: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different endpoint root. Tests use this to
    /// talk to a local mock server.
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Build a client from config, failing fast when no credential is
    /// available rather than on the first request.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.resolved_api_key().ok_or_else(|| {
            Error::Configuration(
                "No OpenWeather API key configured.\n\
                 Hint: run `skycast configure`, or set SKYCAST_API_KEY."
                    .to_string(),
            )
        })?;

        Ok(Self::new(api_key))
    }

    /// Fetch current conditions and the forecast for a city name.
    ///
    /// The two requests run concurrently and are awaited jointly: either
    /// both records come back or the whole call fails. A conditions-only
    /// or forecast-only result is never surfaced.
    pub async fn fetch_by_city(
        &self,
        city: &str,
        units: Units,
    ) -> Result<(Observation, ForecastSeries)> {
        let city = city.trim();
        if city.is_empty() {
            return Err(Error::EmptyQuery);
        }

        let current_params = [("q", city)];
        let (observation, forecast) = tokio::try_join!(
            self.request_current(&current_params, units),
            self.request_forecast(city, units),
        )?;

        Ok((observation, forecast))
    }

    /// Fetch current conditions for coordinates.
    ///
    /// The coordinate endpoint carries no forecast; callers wanting the
    /// full pair re-invoke [`fetch_by_city`](Self::fetch_by_city) with the
    /// `location.name` this returns.
    pub async fn fetch_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
        units: Units,
    ) -> Result<Observation> {
        let lat = latitude.to_string();
        let lon = longitude.to_string();
        self.request_current(&[("lat", lat.as_str()), ("lon", lon.as_str())], units).await
    }

    async fn request_current(&self, place: &[(&str, &str)], units: Units) -> Result<Observation> {
        let url = format!("{}/weather", self.base_url);
        let body = self.get_checked(&url, place, units).await?;

        let raw: OwCurrentResponse = serde_json::from_str(&body).map_err(shape_error)?;
        normalize_current(raw)
    }

    async fn request_forecast(&self, city: &str, units: Units) -> Result<ForecastSeries> {
        let url = format!("{}/forecast", self.base_url);
        let body = self.get_checked(&url, &[("q", city)], units).await?;

        let raw: OwForecastResponse = serde_json::from_str(&body).map_err(shape_error)?;
        normalize_forecast(raw)
    }

    async fn get_checked(
        &self,
        url: &str,
        place: &[(&str, &str)],
        units: Units,
    ) -> Result<String> {
        let res = self
            .http
            .get(url)
            .query(place)
            .query(&[("appid", self.api_key.as_str()), ("units", units.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            debug!(%status, %url, "provider request failed");
            return Err(Error::Provider {
                status: status.as_u16(),
                message: provider_message(&body),
            });
        }

        Ok(body)
    }
}

/// Best-effort location from the requester's IP address.
///
/// This is a fallback hint, not a capability: any failure (transport,
/// status, shape) degrades to `None` instead of an error.
pub async fn fetch_location_by_ip() -> Option<LocationHint> {
    fetch_location_by_ip_from(IP_LOOKUP_URL).await
}

pub(crate) async fn fetch_location_by_ip_from(url: &str) -> Option<LocationHint> {
    #[derive(Debug, Deserialize)]
    struct IpLookupResponse {
        city: String,
        latitude: f64,
        longitude: f64,
    }

    let response = match reqwest::get(url).await {
        Ok(r) => r,
        Err(e) => {
            debug!("IP lookup request failed: {e}");
            return None;
        }
    };

    if !response.status().is_success() {
        debug!("IP lookup returned status {}", response.status());
        return None;
    }

    match response.json::<IpLookupResponse>().await {
        Ok(body) => Some(LocationHint {
            city: body.city,
            latitude: body.latitude,
            longitude: body.longitude,
        }),
        Err(e) => {
            debug!("IP lookup parse error: {e}");
            None
        }
    }
}

/// Extract the provider's human-readable `message`, falling back to the
/// raw (truncated) body when the error payload isn't the documented JSON.
fn provider_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ProviderErrorBody {
        message: String,
    }

    serde_json::from_str::<ProviderErrorBody>(body)
        .map(|parsed| parsed.message)
        .unwrap_or_else(|_| truncate_body(body))
}

/// A 2xx body that doesn't parse is still the provider's fault.
fn shape_error(err: serde_json::Error) -> Error {
    Error::Provider {
        status: 200,
        message: format!("unexpected provider response shape: {err}"),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        let head: String = body.chars().take(MAX).collect();
        format!("{head}...")
    } else {
        body.to_string()
    }
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    #[serde(default)]
    deg: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    coord: OwCoord,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    #[serde(default)]
    visibility: f64,
    sys: OwSys,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
    country: Option<String>,
    coord: OwCoord,
}

#[derive(Debug, Deserialize)]
struct OwForecastItem {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    list: Vec<OwForecastItem>,
}

fn normalize_current(raw: OwCurrentResponse) -> Result<Observation> {
    let condition = first_condition(raw.weather)?;

    Ok(Observation {
        location: Location {
            name: raw.name,
            country_code: raw.sys.country.unwrap_or_default(),
            latitude: raw.coord.lat,
            longitude: raw.coord.lon,
        },
        temperature: raw.main.temp,
        feels_like: raw.main.feels_like,
        temperature_min: raw.main.temp_min,
        temperature_max: raw.main.temp_max,
        humidity_percent: raw.main.humidity,
        pressure_hpa: raw.main.pressure,
        visibility_meters: raw.visibility,
        wind: Wind {
            speed: raw.wind.speed,
            direction_degrees: raw.wind.deg,
        },
        condition_main: condition.main,
        condition_description: condition.description,
        condition_icon: condition.icon,
        sunrise_epoch: raw.sys.sunrise,
        sunset_epoch: raw.sys.sunset,
    })
}

/// Provider order is preserved; entries are already spaced at the
/// provider's fixed interval and sorted by timestamp.
fn normalize_forecast(raw: OwForecastResponse) -> Result<ForecastSeries> {
    let location = Location {
        name: raw.city.name,
        country_code: raw.city.country.unwrap_or_default(),
        latitude: raw.city.coord.lat,
        longitude: raw.city.coord.lon,
    };

    let entries = raw
        .list
        .into_iter()
        .map(|item| {
            let condition = first_condition(item.weather)?;
            Ok(ForecastEntry {
                forecast_epoch: item.dt,
                temperature: item.main.temp,
                feels_like: item.main.feels_like,
                temperature_min: item.main.temp_min,
                temperature_max: item.main.temp_max,
                humidity_percent: item.main.humidity,
                pressure_hpa: item.main.pressure,
                wind: Wind {
                    speed: item.wind.speed,
                    direction_degrees: item.wind.deg,
                },
                condition_main: condition.main,
                condition_description: condition.description,
                condition_icon: condition.icon,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ForecastSeries { location, entries })
}

fn first_condition(weather: Vec<OwWeather>) -> Result<OwWeather> {
    weather.into_iter().next().ok_or_else(|| Error::Provider {
        status: 200,
        message: "provider response contained no weather condition".to_string(),
    })
}
