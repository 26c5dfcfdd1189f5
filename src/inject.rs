//! End-to-end injection: unpack, edit the model document, repack

use crate::config::{InjectConfig, Scope};
use crate::editor::{add_per_object_modifier, set_global_modifier};
use crate::error::{Error, Result};
use crate::opc::ScratchPackage;
use log::info;
use std::path::{Path, PathBuf};

/// Suffix appended to the input's file stem for the default output
const MODIFIED_SUFFIX: &str = "_modified";

/// Extension used when the input has none
const DEFAULT_EXTENSION: &str = "3mf";

/// Outcome of a successful injection
#[derive(Debug, Clone, PartialEq)]
pub struct InjectReport {
    /// Where the modifier was attached
    pub scope: Scope,
    /// The patched file
    pub output: PathBuf,
    /// Change height in millimetres
    pub height_mm: f64,
    /// Number of entries written to the model document
    pub entries: usize,
    /// An existing global entry was replaced
    pub replaced: bool,
    /// Number of entries in the output archive
    pub archive_entries: usize,
}

/// Default output path: `<stem>_modified.<ext>` next to the input
///
/// # Example
///
/// ```
/// use orca_m600::default_output_path;
/// use std::path::Path;
///
/// assert_eq!(
///     default_output_path(Path::new("plates/plate.3mf")),
///     Path::new("plates/plate_modified.3mf")
/// );
/// ```
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = input
        .extension()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
    input.with_file_name(format!("{}{}.{}", stem, MODIFIED_SUFFIX, extension))
}

/// Add a height range modifier to every build item of a 3MF file
///
/// The input is never modified. When `output` is `None` the result goes to
/// [`default_output_path`].
///
/// # Errors
///
/// - [`Error::InputNotFound`] if `input` does not exist
/// - [`Error::MissingModel`] if the archive has no model document
/// - [`Error::NoBuildItems`] if the model has no items to modify
///
/// No output file is written in any of these cases.
pub fn inject_per_object(
    input: &Path,
    output: Option<&Path>,
    config: &InjectConfig,
) -> Result<InjectReport> {
    run(Scope::PerObject, input, output, config)
}

/// Set the global height range modifier of a 3MF file
///
/// Replaces an existing global entry, so repeated runs keep exactly one.
/// Fails like [`inject_per_object`] on a missing input or model document.
pub fn inject_global(
    input: &Path,
    output: Option<&Path>,
    config: &InjectConfig,
) -> Result<InjectReport> {
    run(Scope::Global, input, output, config)
}

fn run(
    scope: Scope,
    input: &Path,
    output: Option<&Path>,
    config: &InjectConfig,
) -> Result<InjectReport> {
    if !input.exists() {
        return Err(Error::InputNotFound(input.to_path_buf()));
    }
    let descriptor = config.descriptor()?;
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input));

    info!("Processing: {}", input.display());
    info!("Output: {}", output.display());
    info!("Filament change at: {}mm ({})", config.height(), scope.name());

    info!("Extracting 3MF...");
    let package = ScratchPackage::open(input)?;

    info!("Modifying model file...");
    let xml = package.read_model()?;
    let (patched, entries, replaced) = match scope {
        Scope::PerObject => {
            let (patched, count) = add_per_object_modifier(&xml, &descriptor)?;
            (patched, count, false)
        }
        Scope::Global => {
            let (patched, replaced) = set_global_modifier(&xml, &descriptor)?;
            (patched, 1, replaced)
        }
    };
    package.write_model(&patched)?;

    info!("Creating modified 3MF...");
    let archive_entries = package.repack(&output)?;

    Ok(InjectReport {
        scope,
        output,
        height_mm: config.height(),
        entries,
        replaced,
        archive_entries,
    })
}
