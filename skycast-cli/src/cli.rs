use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};

use skycast_core::{
    Config, DEFAULT_SOURCE_TIMEOUT, IpLookupSource, LocationSource, OpenWeatherClient, Units,
    derive::derived_metrics, resolve_location,
};

use crate::format;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather dashboard CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the OpenWeather API credential and default units.
    Configure,

    /// Show current conditions and forecast for a city.
    Show {
        /// City name, e.g. "Kumasi" or "London,UK".
        city: String,

        /// Unit system override: "metric" or "imperial".
        #[arg(long)]
        units: Option<String>,
    },

    /// Detect the current location (IP-based fallback) and show its weather.
    Here {
        /// Unit system override: "metric" or "imperial".
        #[arg(long)]
        units: Option<String>,
    },

    /// Manage favorite cities.
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },

    /// List recent searches.
    Recent,
}

#[derive(Debug, Subcommand)]
pub enum FavoritesAction {
    /// Add a city to the favorites list.
    Add { city: String },
    /// Remove a city from the favorites list.
    Remove { city: String },
    /// List favorite cities.
    List,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, units } => show(&city, units.as_deref()).await,
            Command::Here { units } => here(units.as_deref()).await,
            Command::Favorites { action } => favorites(action),
            Command::Recent => recent(),
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.api_key = Some(api_key);

    let units = inquire::Select::new("Default unit system:", vec!["metric", "imperial"])
        .prompt()
        .context("Failed to read unit selection")?;
    config.units = Some(units.to_string());

    config.save()?;
    println!("Configuration saved to {}", Config::config_file_path()?.display());

    Ok(())
}

async fn show(city: &str, units_flag: Option<&str>) -> Result<()> {
    let mut config = Config::load()?;
    let units = resolve_units(&config, units_flag)?;
    let client = OpenWeatherClient::from_config(&config)?;

    let (observation, forecast) = client.fetch_by_city(city, units).await?;

    config.push_recent(&observation.location.name);
    config.save()?;

    let metrics = derived_metrics(&observation, None, None, Utc::now());
    print!("{}", format::render_report(&observation, &forecast, &metrics, units));

    Ok(())
}

async fn here(units_flag: Option<&str>) -> Result<()> {
    let mut config = Config::load()?;
    let units = resolve_units(&config, units_flag)?;
    let client = OpenWeatherClient::from_config(&config)?;

    let sources: Vec<Box<dyn LocationSource>> = vec![Box::new(IpLookupSource)];
    let Some(hint) = resolve_location(&sources, DEFAULT_SOURCE_TIMEOUT).await else {
        bail!("Could not detect a location. Try `skycast show <city>` instead.");
    };

    // The coordinate endpoint has no forecast, so recover the canonical
    // city name first and then run the full city fetch.
    let probe = client.fetch_by_coordinates(hint.latitude, hint.longitude, units).await?;
    let city = if probe.location.name.is_empty() { hint.city } else { probe.location.name };

    let (observation, forecast) = client.fetch_by_city(&city, units).await?;

    config.push_recent(&observation.location.name);
    config.save()?;

    let metrics = derived_metrics(&observation, None, None, Utc::now());
    print!("{}", format::render_report(&observation, &forecast, &metrics, units));

    Ok(())
}

fn favorites(action: FavoritesAction) -> Result<()> {
    let mut config = Config::load()?;

    match action {
        FavoritesAction::Add { city } => {
            if config.add_favorite(&city) {
                config.save()?;
                println!("Added '{city}' to favorites.");
            } else {
                println!("'{city}' is already a favorite.");
            }
        }
        FavoritesAction::Remove { city } => {
            if config.remove_favorite(&city) {
                config.save()?;
                println!("Removed '{city}' from favorites.");
            } else {
                println!("'{city}' is not in favorites.");
            }
        }
        FavoritesAction::List => {
            if config.favorites.is_empty() {
                println!("No favorites yet. Add one with `skycast favorites add <city>`.");
            } else {
                for city in &config.favorites {
                    println!("{city}");
                }
            }
        }
    }

    Ok(())
}

fn recent() -> Result<()> {
    let config = Config::load()?;

    if config.recent_searches.is_empty() {
        println!("No recent searches.");
    } else {
        for city in &config.recent_searches {
            println!("{city}");
        }
    }

    Ok(())
}

fn resolve_units(config: &Config, flag: Option<&str>) -> Result<Units> {
    match flag {
        Some(s) => Units::try_from(s),
        None => config.resolved_units(),
    }
}
