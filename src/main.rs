//! Carbon Calculator CLI
//!
//! Command-line front end for the trip emission calculator.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use carbon_calculator::format::{TripReport, format_number};
use carbon_calculator::{
    CalcError, CalculationInput, CalculatorConfig, EmissionCalculator, RouteTable, TransportMode,
    resolve_distance,
};

#[derive(Parser)]
#[command(name = "carbon-calculator")]
#[command(about = "Trip CO2 emission and carbon-credit calculator")]
struct Cli {
    /// JSON file with emission factors, mode labels and credit pricing
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON file with extra routes to append to the built-in table
    #[arg(short, long)]
    routes: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate emissions for a trip
    Calc {
        origin: String,

        destination: String,

        /// Transport mode (bicicleta, carro, onibus, caminhao)
        #[arg(short, long)]
        mode: String,

        /// Distance in km; looked up in the route table when omitted
        #[arg(short, long)]
        distance: Option<f64>,

        /// Also accept the reverse route when looking up the distance
        #[arg(long)]
        symmetric: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all known cities
    Cities,

    /// Look up the distance of a directed route
    Distance { origin: String, destination: String },

    /// List transport modes and their emission factors
    Modes,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => CalculatorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => CalculatorConfig::default(),
    };

    let mut routes = RouteTable::with_default_routes();
    if let Some(path) = &cli.routes {
        routes
            .extend_from_json(path)
            .with_context(|| format!("Failed to load routes {}", path.display()))?;
    }

    let calculator = EmissionCalculator::new(config);

    match cli.command {
        Commands::Calc {
            origin,
            destination,
            mode,
            distance,
            symmetric,
            json,
        } => {
            let distance = match (distance, symmetric) {
                (None, true) => routes
                    .find_distance_either_way(&origin, &destination)
                    .ok_or_else(|| CalcError::RouteNotFound {
                        origin: origin.trim().to_string(),
                        destination: destination.trim().to_string(),
                    })?,
                (manual, _) => resolve_distance(&routes, &origin, &destination, manual)?,
            };

            let result = calculator.calculate(&CalculationInput {
                origin,
                destination,
                transport: mode,
                distance: Some(distance),
            })?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                let report = TripReport {
                    result: &result,
                    comparison: calculator.comparison(&result),
                    equivalents: calculator.equivalents(result.selected_emission),
                    config: calculator.config(),
                };
                println!("{}", report);
            }
        }

        Commands::Cities => {
            let cities = routes.all_cities();
            if cities.is_empty() {
                println!("No routes loaded.");
            } else {
                println!("Cities ({}):", cities.len());
                for city in cities {
                    println!("  {}", city);
                }
            }
        }

        Commands::Distance {
            origin,
            destination,
        } => match routes.find_distance(&origin, &destination) {
            Some(km) => println!("{} → {}: {} km", origin.trim(), destination.trim(), format_number(km, 0)),
            None => println!(
                "No route from '{}' to '{}'. Pass --distance to calc instead.",
                origin.trim(),
                destination.trim()
            ),
        },

        Commands::Modes => {
            let config = calculator.config();
            println!("{:<10} {:<12} {:>14}", "Mode", "Label", "kg CO2/km");
            println!("{}", "-".repeat(38));
            for mode in TransportMode::ALL {
                let factor = match config.factor(mode) {
                    Some(f) => format!("{:.3}", f),
                    None => "n/a".to_string(),
                };
                println!("{:<10} {:<12} {:>14}", mode.id(), config.label(mode), factor);
            }
            println!();
            println!(
                "1 credit = {} kg CO2, R$ {} per credit",
                format_number(config.carbon_credit.kg_per_credit, 0),
                format_number(config.carbon_credit.price_per_credit, 2)
            );
        }
    }

    Ok(())
}
