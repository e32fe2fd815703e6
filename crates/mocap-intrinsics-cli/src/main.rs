//! Command-line utilities around stored camera-intrinsics profiles.
//!
//! Calibration itself needs live video collaborators and runs through the
//! `mocap-intrinsics` library; this binary covers the file-side workflow:
//! inspecting deployed profiles and session records, and fanning an existing
//! profile out to deployment slots.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;

use mocap_intrinsics::{RecordError, SessionPaths, TrialRecord};
use mocap_intrinsics_core::{deploy_parameters, init_with_level, load_parameters, StoreError};

#[derive(Parser)]
#[command(
    name = "mocap-intrinsics",
    about = "Inspect and deploy camera-intrinsics profiles",
    version
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a stored camera profile.
    ShowProfile {
        /// Path to a camera_intrinsics.json file.
        path: PathBuf,
    },
    /// Print the cached trial record of a capture session.
    ShowRecord {
        /// Capture session directory.
        session_dir: PathBuf,
    },
    /// Copy a profile into one or more deployment slots.
    ///
    /// Slots are resolved as <root>/<camera model>/<variant>/ using the
    /// camera model stored in the profile itself. Existing profiles in those
    /// slots are overwritten.
    Deploy {
        /// Source profile file.
        profile: PathBuf,
        /// Root directory of the deployed profile tree.
        #[arg(long)]
        root: PathBuf,
        /// Deployment slot names, e.g. Deployed_720_60fps.
        #[arg(long, required = true, num_args = 1..)]
        variants: Vec<String>,
    },
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::ShowProfile { path } => {
            let params = load_parameters(&path)?;
            println!("{}", serde_json::to_string_pretty(&params)?);
        }
        Command::ShowRecord { session_dir } => {
            let record = TrialRecord::load_json(SessionPaths::new(session_dir).trial_record())?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Command::Deploy {
            profile,
            root,
            variants,
        } => {
            let params = load_parameters(&profile)?;
            let written = deploy_parameters(&root, &variants, &params)?;
            for path in written {
                println!("{}", path.display());
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let _ = init_with_level(level);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
