//! Command line interface.

use std::net::SocketAddr;
use std::path::PathBuf;

use chrono::Utc;
use clap::{Args as ClapArgs, Parser, Subcommand};
use thiserror::Error;

use crate::config;
use crate::seed::{run_seed, SeedError, SeedOptions, SeedOutcome, SeedPlan, SlotPolicy};

#[derive(Clone, Debug, Parser)]
#[command(version, about, verbatim_doc_comment)]
///
/// Telesana
///
/// Seeds a demo healthcare dataset and serves the HTTP API.
///
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Populate the database with demo data unless it is already there.
    Seed(SeedArgs),
    /// Run the HTTP server until Ctrl-C.
    Serve(ServeArgs),
}

#[derive(Clone, Debug, ClapArgs)]
pub struct SeedArgs {
    /// SQLite database file. Created if missing.
    #[arg(short, long, env = "TELESANA_DATABASE_PATH")]
    pub database_path: Option<PathBuf>,

    /// Number of demo patients.
    #[arg(short, long, default_value_t = config::DEFAULT_PATIENT_COUNT)]
    pub patients: usize,

    /// Commit each patient chain and each appointment with its reminder as one transaction.
    #[arg(long)]
    pub atomic_patients: bool,

    /// How dose slot times are chosen.
    #[arg(long, value_enum, default_value_t = SlotPolicy::default())]
    pub slot_policy: SlotPolicy,

    /// JSON seed plan replacing the built-in hospitals, doctors and names.
    #[arg(long)]
    pub plan: Option<PathBuf>,
}

#[derive(Clone, Debug, ClapArgs)]
pub struct ServeArgs {
    /// Listening port.
    #[arg(short, long, env = "PORT", default_value_t = config::DEFAULT_PORT)]
    pub port: u16,
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Seed(#[from] SeedError),

    #[error("Seed task aborted: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl SeedArgs {
    fn options(&self) -> SeedOptions {
        SeedOptions {
            patient_count: self.patients,
            atomic_patients: self.atomic_patients,
            slot_policy: self.slot_policy,
            ..SeedOptions::new(Utc::now())
        }
    }

    fn load_plan(&self) -> Result<SeedPlan, SeedError> {
        match &self.plan {
            Some(path) => SeedPlan::from_json_file(path),
            None => Ok(SeedPlan::demo()),
        }
    }
}

/// Runs the command specified on the command line.
pub async fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Commands::Seed(seed) => {
            let outcome = tokio::task::spawn_blocking(move || seed_database(&seed)).await??;
            match outcome {
                SeedOutcome::Skipped => tracing::info!("Nothing to do"),
                SeedOutcome::Populated(report) => {
                    tracing::info!(patients = report.patients, reminders = report.reminders, "Seed complete")
                }
            }
            Ok(())
        }
        Commands::Serve(serve) => {
            crate::api::serve(SocketAddr::from(([0, 0, 0, 0], serve.port))).await;
            Ok(())
        }
    }
}

fn seed_database(args: &SeedArgs) -> Result<SeedOutcome, SeedError> {
    let path = args
        .database_path
        .clone()
        .unwrap_or_else(config::default_database_path);
    let plan = args.load_plan()?;
    run_seed(&path, &plan, args.options())
}
