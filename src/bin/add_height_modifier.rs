//! Add a global M600 filament change to an OrcaSlicer 3MF file.
//!
//! A single root-level `height_range_modifier` entry applies to every
//! object on the plate; an existing one is replaced.
//!
//! Usage: `add-height-modifier INPUT [OUTPUT] [--height MM]`

#![forbid(unsafe_code)]

use clap::Parser;
use orca_m600::Scope;
use orca_m600::cli::{self, Args};
use std::process::ExitCode;

fn main() -> ExitCode {
    cli::init_logging();
    let args = Args::parse();
    cli::run(Scope::Global, &args)
}
