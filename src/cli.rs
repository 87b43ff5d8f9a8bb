use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "healthadvice",
    version,
    about = "Weather, air quality and health advice TUI"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Sign in to the health tracker when the TUI starts
    #[arg(short, long)]
    pub email: Option<String>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Re-run interactive setup
    Init,
    /// Validate config and test connections
    Check,
    /// Show current weather for a place name or "lat,lon"
    Weather { location: String },
    /// Show current air quality for a place name or "lat,lon"
    AirQuality { location: String },
    /// Show health advice for the current conditions at a location
    Advice { location: String },
    /// Create a health tracker account
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
    },
    /// Personal health tracker
    Tracker {
        #[command(subcommand)]
        command: TrackerCommand,
    },
}

#[derive(Subcommand)]
pub enum TrackerCommand {
    /// List your health log, newest first
    List {
        #[arg(long)]
        email: String,
    },
    /// Log a symptom
    Add {
        #[arg(long)]
        email: String,
        /// Symptom, e.g. "Hay Fever"
        #[arg(long)]
        symptom: String,
        /// Severity from 1 (mild) to 5 (severe)
        #[arg(long, default_value_t = 3)]
        severity: u8,
        /// Date of the entry (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<chrono::NaiveDate>,
        #[arg(long)]
        notes: Option<String>,
    },
}
