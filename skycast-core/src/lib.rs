//! Core library for the `skycast` weather dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather data client (current conditions + forecast, IP fallback)
//! - Classification tables and derived-metric calculators
//! - Shared domain models (observations, forecasts, derived values)
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod classify;
pub mod client;
pub mod config;
pub mod debounce;
pub mod derive;
pub mod error;
pub mod location;
pub mod model;

pub use classify::{Level, air_quality_level, uv_level, wind_direction_label};
pub use client::{OpenWeatherClient, fetch_location_by_ip};
pub use config::Config;
pub use debounce::Debouncer;
pub use derive::{Comfort, DerivedMetrics, derived_metrics};
pub use error::{Error, Result};
pub use location::{DEFAULT_SOURCE_TIMEOUT, IpLookupSource, LocationSource, resolve_location};
pub use model::{
    ForecastEntry, ForecastSeries, Location, LocationHint, Observation, Units, Wind,
};
