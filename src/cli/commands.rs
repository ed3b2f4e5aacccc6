use super::{print_result, render_json};
use crate::config::{DataSource, Settings};
use crate::engine::AqiEngine;
use crate::error::{AppError, Result};
use crate::models::LocationQuery;
use clap::{Args, Parser, Subcommand};
use dialoguer::{theme::ColorfulTheme, Input};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::info;

/// Look up the Air Quality Index for a city or a coordinate pair
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Data source backing the lookup
    #[arg(short, long, value_enum, default_value_t = DataSource::Owm, global = true)]
    pub source: DataSource,

    /// Print the result as JSON instead of a table
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up the AQI for a city by name
    City(CityArgs),

    /// Look up the AQI for a latitude/longitude pair
    Locate(LocateArgs),

    /// Start the interactive menu (default when no command is given)
    Interactive,
}

#[derive(Args, Debug)]
pub struct CityArgs {
    /// City name, e.g. "Kochi" or "New Delhi"
    #[arg(required = true, num_args = 1..)]
    pub name: Vec<String>,
}

impl CityArgs {
    pub fn query(&self) -> LocationQuery {
        LocationQuery::by_name(self.name.join(" "))
    }
}

#[derive(Args, Debug)]
pub struct LocateArgs {
    /// Latitude in decimal degrees (-90 to 90)
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude in decimal degrees (-180 to 180)
    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,
}

impl LocateArgs {
    pub fn query(&self) -> LocationQuery {
        LocationQuery::by_coords(self.lat, self.lon)
    }
}

/// CLI application
pub struct App {
    engine: AqiEngine,
    json: bool,
}

impl App {
    /// Create a new CLI application backed by `source`.
    pub fn new(settings: &Settings, source: DataSource, json: bool) -> Result<Self> {
        let engine = AqiEngine::from_settings(settings, source)?;
        Ok(Self { engine, json })
    }

    /// Run a one-shot command.
    pub async fn run_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::City(args) => self.lookup(args.query()).await,
            Commands::Locate(args) => self.lookup(args.query()).await,
            Commands::Interactive => Err(AppError::Cli(
                "interactive mode is handled by the main loop".to_string(),
            )),
        }
    }

    /// Compute and print the AQI for a query.
    pub async fn lookup(&self, query: LocationQuery) -> Result<()> {
        info!("Looking up {:?}", query);

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::with_template("{spinner:.cyan} {msg}")?);
        spinner.set_message(format!("Fetching air quality for {}...", describe(&query)));
        spinner.enable_steady_tick(Duration::from_millis(100));

        let result = self.engine.compute_aqi(query).await;
        spinner.finish_and_clear();
        let result = result?;

        if self.json {
            println!("{}", render_json(&result)?);
        } else {
            print_result(&result);
        }
        Ok(())
    }
}

fn describe(query: &LocationQuery) -> String {
    match query {
        LocationQuery::ByName(name) => name.trim().to_string(),
        LocationQuery::ByCoords(c) => format!("{:.4}, {:.4}", c.latitude, c.longitude),
    }
}

/// Prompt for a city name.
pub fn prompt_city() -> Result<String> {
    let city: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("City name")
        .interact_text()?;
    Ok(city)
}

/// Prompt for a latitude/longitude pair.
pub fn prompt_coordinates() -> Result<(f64, f64)> {
    let theme = ColorfulTheme::default();
    let lat: f64 = Input::with_theme(&theme)
        .with_prompt("Latitude")
        .validate_with(|v: &f64| -> std::result::Result<(), &str> {
            if (-90.0..=90.0).contains(v) {
                Ok(())
            } else {
                Err("Latitude must be between -90 and 90")
            }
        })
        .interact_text()?;
    let lon: f64 = Input::with_theme(&theme)
        .with_prompt("Longitude")
        .validate_with(|v: &f64| -> std::result::Result<(), &str> {
            if (-180.0..=180.0).contains(v) {
                Ok(())
            } else {
                Err("Longitude must be between -180 and 180")
            }
        })
        .interact_text()?;
    Ok((lat, lon))
}
