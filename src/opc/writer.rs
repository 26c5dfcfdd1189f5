//! Package writing for patched 3MF files

use crate::error::{Error, Result};
use log::debug;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Component, Path};
use walkdir::WalkDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;

/// Create a 3MF package (ZIP archive) from an extracted directory tree
///
/// Every regular file below `root` becomes a deflated entry named by its
/// path relative to `root`, using `/` as separator. Entries appear in the
/// order the directory walk yields them. An existing `output` is truncated.
///
/// # Returns
///
/// The number of entries written
pub fn repack(root: &Path, output: &Path) -> Result<usize> {
    let file = File::create(output)?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut count = 0;
    for entry in WalkDir::new(root) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry_name(root, entry.path())?;
        debug!("Adding {}", name);
        zip.start_file(name.as_str(), options)?;
        let mut source = File::open(entry.path())?;
        io::copy(&mut source, &mut zip)?;
        count += 1;
    }

    let mut writer = zip.finish()?;
    writer.flush()?;

    Ok(count)
}

/// Archive entry name of `path` relative to `root`
fn entry_name(root: &Path, path: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(root)
        .map_err(|e| Error::Io(io::Error::other(e)))?;

    let mut parts = Vec::new();
    for component in relative.components() {
        if let Component::Normal(part) = component {
            let part = part.to_str().ok_or_else(|| {
                Error::Io(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Non UTF-8 file name: {}", path.display()),
                ))
            })?;
            parts.push(part);
        }
    }

    Ok(parts.join("/"))
}
