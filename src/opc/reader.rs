//! Package extraction

use super::MODEL_PATH;
use crate::error::{Error, Result};
use log::debug;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// Extract every entry of the 3MF archive at `input` into `scratch`
///
/// Returns the path of the extracted model document.
pub fn unpack(input: &Path, scratch: &Path) -> Result<PathBuf> {
    let file = File::open(input)?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;
    debug!(
        "Extracting {} entries from {} into {}",
        archive.len(),
        input.display(),
        scratch.display()
    );
    archive.extract(scratch)?;

    let model_path = scratch.join(MODEL_PATH);
    if !model_path.is_file() {
        return Err(Error::MissingModel(MODEL_PATH.to_string()));
    }

    Ok(model_path)
}
