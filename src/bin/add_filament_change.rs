//! Add an M600 filament change to every object of an OrcaSlicer 3MF file.
//!
//! Each build item gets its own `height_range_modifier` metadata entry.
//! Running it twice on the same file adds a second entry per item.
//!
//! Usage: `add-filament-change INPUT [OUTPUT] [--height MM]`

#![forbid(unsafe_code)]

use clap::Parser;
use orca_m600::Scope;
use orca_m600::cli::{self, Args};
use std::process::ExitCode;

fn main() -> ExitCode {
    cli::init_logging();
    let args = Args::parse();
    cli::run(Scope::PerObject, &args)
}
