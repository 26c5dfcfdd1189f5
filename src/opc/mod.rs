//! Package handling for 3MF files
//!
//! 3MF files are ZIP archives holding the main 3D model document plus
//! thumbnails, relationships and slicer configuration. Patching works on an
//! extracted copy of the archive in a scratch directory which is removed when
//! the [`ScratchPackage`] is dropped, whether the run succeeded or not.

mod reader;
mod writer;

pub use reader::unpack;
pub use writer::repack;

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Main 3D model file path within the 3MF archive
pub const MODEL_PATH: &str = "3D/3dmodel.model";

/// Prefix of scratch directories created for extraction
const SCRATCH_PREFIX: &str = "orca-m600-";

/// An extracted 3MF package living in a scoped scratch directory
#[derive(Debug)]
pub struct ScratchPackage {
    dir: TempDir,
    model_path: PathBuf,
}

impl ScratchPackage {
    /// Extract a 3MF file into a fresh scratch directory
    ///
    /// Fails with [`crate::Error::MissingModel`] when the archive has no
    /// model document; the scratch directory is already gone at that point.
    pub fn open<P: AsRef<Path>>(input: P) -> Result<Self> {
        let dir = tempfile::Builder::new().prefix(SCRATCH_PREFIX).tempdir()?;
        let model_path = unpack(input.as_ref(), dir.path())?;
        Ok(Self { dir, model_path })
    }

    /// Root of the extracted package
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Location of the extracted model document
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    /// Read the model document as UTF-8 text
    pub fn read_model(&self) -> Result<String> {
        Ok(fs::read_to_string(&self.model_path)?)
    }

    /// Replace the model document
    pub fn write_model(&self, xml: &str) -> Result<()> {
        fs::write(&self.model_path, xml)?;
        Ok(())
    }

    /// Zip the package up into `output`, returning the number of entries
    pub fn repack<P: AsRef<Path>>(&self, output: P) -> Result<usize> {
        repack(self.root(), output.as_ref())
    }
}
