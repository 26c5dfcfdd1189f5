//! Shared command-line front end of the injector binaries

use crate::config::{InjectConfig, Scope};
use crate::descriptor::DEFAULT_HEIGHT_MM;
use crate::inject::{InjectReport, inject_global, inject_per_object};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Command-line arguments shared by both injectors
#[derive(Parser, Debug)]
#[command(version)]
pub struct Args {
    /// Path to the OrcaSlicer 3MF project
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Where to write the patched project (default: INPUT_modified.3mf)
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Height of the filament change in millimetres
    #[arg(long, value_name = "MM", default_value_t = DEFAULT_HEIGHT_MM)]
    pub height: f64,
}

impl Args {
    /// Injection configuration described by the arguments
    pub fn config(&self) -> InjectConfig {
        InjectConfig::new().with_height(self.height)
    }
}

/// Run one injector with parsed arguments, returning the process exit code
pub fn run(scope: Scope, args: &Args) -> ExitCode {
    let config = args.config();
    let result = match scope {
        Scope::PerObject => inject_per_object(&args.input, args.output.as_deref(), &config),
        Scope::Global => inject_global(&args.input, args.output.as_deref(), &config),
    };

    match result {
        Ok(report) => {
            print_summary(&report);
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

/// Initialise logging; `RUST_LOG` overrides the default `info` filter
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn print_summary(report: &InjectReport) {
    println!();
    match report.scope {
        Scope::PerObject => println!("Modified {} object(s)", report.entries),
        Scope::Global if report.replaced => println!("Replaced global height_range_modifier"),
        Scope::Global => println!("Added global height_range_modifier"),
    }
    println!("  Blue layer: 0mm to {}mm", report.height_mm);
    println!("  White layer: {}mm to top (with M600)", report.height_mm);
    println!();
    println!(
        "Success! Modified 3MF saved to: {} ({} entries)",
        report.output.display(),
        report.archive_entries
    );
    println!();
    println!("Next steps:");
    println!("1. Open the modified file in Orca Slicer");
    println!("2. Verify the height range modifier is present");
    println!("3. Slice and check for M600 commands in the G-code");
    if report.scope == Scope::Global {
        println!();
        println!("Note: the global height modifier applies to all objects on the build plate.");
    }
}
