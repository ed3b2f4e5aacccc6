use aqi_engine::cli::{self, App, Cli, Commands};
use aqi_engine::error::Result;
use aqi_engine::models::LocationQuery;
use aqi_engine::config::log_dir_from_env;
use aqi_engine::{logging, Settings};
use clap::Parser;
use colored::*;
use dialoguer::{theme::ColorfulTheme, Select};
use std::process::ExitCode;
use tracing::{error, info};

fn report(e: &aqi_engine::AppError) {
    error!("Command execution failed: {:?}", e);
    println!("{} {}", "Error:".red(), e.user_message().red());
}

async fn interactive(app: &App) -> Result<()> {
    println!("{}", "Welcome to the Air Quality Index CLI!".cyan().bold());

    let options = &["Look up a city", "Look up coordinates", "Exit"];
    loop {
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("What would you like to do?")
            .items(options)
            .default(0)
            .interact_opt()?
            .unwrap_or(options.len() - 1);

        println!("\n---\n");

        let query = match selection {
            0 => match cli::prompt_city() {
                Ok(city) => LocationQuery::by_name(city),
                Err(e) => {
                    println!("{} {}", "Failed to get input:".red(), e);
                    continue;
                },
            },
            1 => match cli::prompt_coordinates() {
                Ok((lat, lon)) => LocationQuery::by_coords(lat, lon),
                Err(e) => {
                    println!("{} {}", "Failed to get input:".red(), e);
                    continue;
                },
            },
            _ => {
                println!("{}", "Goodbye!".green());
                return Ok(());
            },
        };

        if let Err(e) = app.lookup(query).await {
            report(&e);
        }

        println!("\n---\n");
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logging first, so configuration errors are logged too.
    dotenv::dotenv().ok();
    let _guard = logging::init(log_dir_from_env().as_deref());

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{} {}", "Invalid configuration:".red(), e);
            return ExitCode::FAILURE;
        },
    };

    info!("Starting AQI engine with {:?} data source", cli.source);

    let app = match App::new(&settings, cli.source, cli.json) {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize application: {:?}", e);
            println!("{} {}", "Error: Failed to initialize application:".red(), e);
            return ExitCode::FAILURE;
        },
    };

    let outcome = match cli.command {
        None | Some(Commands::Interactive) => interactive(&app).await,
        Some(command) => app.run_command(command).await,
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        },
    }
}
