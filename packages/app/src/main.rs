#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! CLI driver for the Kampala accident map core.
//!
//! Stands in for the browser page: loads the two `GeoJSON` inputs,
//! applies filter and layer settings, and either prints the resulting
//! render frame or drives the full report-intake flow with a scripted
//! location provider.

use std::path::PathBuf;

use accident_map_accident_models::{AccidentSeverity, AccidentType};
use accident_map_app::AppContext;
use accident_map_intake::{FixedLocationProvider, ReportForm};
use accident_map_map::{LayerId, Selection};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "accident_map_app", about = "Kampala road accident map")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the data files and print the rendered accident layer
    Render {
        /// Boundary polygon GeoJSON file
        #[arg(long, default_value = "data/kampala_boundary.geojson")]
        boundary: PathBuf,
        /// Accident point-collection GeoJSON file
        #[arg(long, default_value = "data/kampala_accidents.geojson")]
        accidents: PathBuf,
        /// Accident type filter ("All" or one of the canonical types)
        #[arg(long, default_value = "All")]
        accident_type: Selection<AccidentType>,
        /// Severity filter ("All" or one of the canonical severities)
        #[arg(long, default_value = "All")]
        severity: Selection<AccidentSeverity>,
        /// Hide a layer (repeatable): osm, satellite, boundary, accidents
        #[arg(long)]
        hide: Vec<LayerId>,
    },
    /// Drive the report-intake flow with a scripted device location
    Report {
        /// Boundary polygon GeoJSON file
        #[arg(long, default_value = "data/kampala_boundary.geojson")]
        boundary: PathBuf,
        /// Accident point-collection GeoJSON file
        #[arg(long, default_value = "data/kampala_accidents.geojson")]
        accidents: PathBuf,
        /// Device longitude, in degrees
        #[arg(long)]
        lon: f64,
        /// Device latitude, in degrees
        #[arg(long)]
        lat: f64,
        /// Accident type form field
        #[arg(long)]
        accident_type: String,
        /// Severity form field
        #[arg(long)]
        severity: String,
        /// Vehicles-involved form field (free text, unvalidated)
        #[arg(long, default_value = "")]
        num_vehicles: String,
        /// Casualties form field (free text, unvalidated)
        #[arg(long, default_value = "")]
        num_casualties: String,
        /// Optional description
        #[arg(long)]
        description: Option<String>,
        /// Optional occurrence time
        #[arg(long)]
        timestamp: Option<String>,
    },
    /// Summarize the loaded layers and records
    Info {
        /// Boundary polygon GeoJSON file
        #[arg(long, default_value = "data/kampala_boundary.geojson")]
        boundary: PathBuf,
        /// Accident point-collection GeoJSON file
        #[arg(long, default_value = "data/kampala_accidents.geojson")]
        accidents: PathBuf,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            boundary,
            accidents,
            accident_type,
            severity,
            hide,
        } => {
            let mut context = AppContext::startup(&boundary, &accidents)?;
            context.set_type_filter(accident_type);
            context.set_severity_filter(severity);
            for layer in hide {
                context.set_layer_visible(layer, false);
            }

            for point in &context.frame().points {
                println!("{}", serde_json::to_string(point)?);
            }
            log::info!(
                "Rendered {} of {} record(s)",
                context.frame().len(),
                context.store().len()
            );
        }
        Commands::Report {
            boundary,
            accidents,
            lon,
            lat,
            accident_type,
            severity,
            num_vehicles,
            num_casualties,
            description,
            timestamp,
        } => {
            let mut context = AppContext::startup(&boundary, &accidents)?;
            let provider = FixedLocationProvider::new(lon, lat);

            let fix = context.add_report(&provider).await?;
            println!("{}", fix.confirmation_message());

            let record = context.submit_report(ReportForm {
                accident_type,
                severity,
                num_vehicles,
                num_casualties,
                description,
                timestamp,
            })?;
            println!("Accident Report Submitted!");
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Commands::Info {
            boundary,
            accidents,
        } => {
            let context = AppContext::startup(&boundary, &accidents)?;

            println!("Records loaded: {}", context.store().len());
            println!("Boundary polygons: {}", context.boundary().0.len());
            println!(
                "View center: ({:.1}, {:.1}) at zoom {}",
                context.view().center()[0],
                context.view().center()[1],
                context.view().zoom()
            );
            for layer in LayerId::all() {
                println!(
                    "Layer {layer}: {}",
                    if context.view().is_visible(*layer) {
                        "visible"
                    } else {
                        "hidden"
                    }
                );
            }
        }
    }

    Ok(())
}
