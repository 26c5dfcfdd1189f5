//! # orca_m600
//!
//! Patch OrcaSlicer 3MF projects so the printer pauses for a filament change
//! (`M600`) at a given height.
//!
//! A 3MF file is a ZIP archive whose model document (`3D/3dmodel.model`)
//! holds the build plate. OrcaSlicer reads height range modifiers from
//! `<metadata name="height_range_modifier">` entries carrying a small JSON
//! descriptor. This crate writes that entry in one of two ways:
//!
//! - [`inject_per_object`]: one entry in the metadata group of every build
//!   item. Not idempotent, a second run adds a second entry per item.
//! - [`inject_global`]: a single root-level entry placed before
//!   `<resources>`, replacing any existing one.
//!
//! Both extract the archive into a scratch directory, edit the model
//! document with a streaming XML pass and zip the directory back up. Every
//! other archive entry is copied unchanged.
//!
//! ## Example
//!
//! ```no_run
//! use orca_m600::{InjectConfig, inject_global};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = InjectConfig::new().with_height(1.5);
//! let report = inject_global(Path::new("plate.3mf"), None, &config)?;
//! println!("Wrote {}", report.output.display());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod descriptor;
pub mod editor;
pub mod error;
pub mod inject;
pub mod opc;

pub use config::{InjectConfig, Scope};
pub use descriptor::{HEIGHT_RANGE_MODIFIER, HeightRange};
pub use editor::{add_per_object_modifier, set_global_modifier};
pub use error::{Error, Result};
pub use inject::{InjectReport, default_output_path, inject_global, inject_per_object};
pub use opc::{MODEL_PATH, ScratchPackage};
