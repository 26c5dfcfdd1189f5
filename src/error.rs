//! Error types for 3MF patching
//!
//! Every error message carries a code so failures can be told apart in logs
//! and scripts.
//!
//! # Error Codes
//!
//! Error codes follow the pattern: `E<category><number>`
//!
//! Categories:
//! - **E1xxx**: I/O and archive errors
//! - **E2xxx**: XML parsing and writing errors
//! - **E3xxx**: Injection errors
//!
//! ## Common Error Codes
//!
//! - `E1001`: I/O error
//! - `E1002`: ZIP archive format error
//! - `E1003`: Model document missing from the archive
//! - `E1004`: Input file not found
//! - `E2001`: XML parsing error
//! - `E3001`: No build items to modify

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for 3MF patching operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while patching a 3MF file
#[derive(Error, Debug)]
pub enum Error {
    /// IO error occurred while reading or writing a file
    ///
    /// **Error Code**: E1001
    #[error("[E1001] I/O error: {0}")]
    Io(#[from] io::Error),

    /// ZIP archive error
    ///
    /// **Error Code**: E1002
    ///
    /// **Common Causes**:
    /// - Corrupted ZIP file
    /// - Input is not a 3MF (ZIP) archive at all
    /// - Truncated archive
    #[error("[E1002] ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The model document is not present in the archive
    ///
    /// **Error Code**: E1003
    ///
    /// **Suggestions**:
    /// - Re-export the project from OrcaSlicer
    /// - Check that the archive contains `3D/3dmodel.model`
    #[error("[E1003] Could not find {0} in 3MF file")]
    MissingModel(String),

    /// The input path does not exist
    ///
    /// **Error Code**: E1004
    #[error("[E1004] Input file '{}' not found", .0.display())]
    InputNotFound(PathBuf),

    /// Failure while walking the extracted package
    ///
    /// **Error Code**: E1005
    #[error("[E1005] Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// XML parsing error
    ///
    /// **Error Code**: E2001
    ///
    /// **Common Causes**:
    /// - Malformed XML syntax
    /// - Mismatched or unclosed tags
    #[error("[E2001] XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// XML attribute error
    ///
    /// **Error Code**: E2002
    #[error("[E2002] XML attribute error: {0}")]
    XmlAttr(String),

    /// Invalid XML structure
    ///
    /// **Error Code**: E2004
    ///
    /// **Common Causes**:
    /// - Element or attribute names that are not valid UTF-8
    /// - Document without a root element
    #[error("[E2004] Invalid XML structure: {0}")]
    InvalidXml(String),

    /// XML writing error
    ///
    /// **Error Code**: E2005
    #[error("[E2005] XML writing error: {0}")]
    XmlWrite(String),

    /// No build items were found in per-object mode
    ///
    /// **Error Code**: E3001
    ///
    /// **Suggestions**:
    /// - Place at least one object on the plate before saving the project
    #[error("[E3001] No items found in 3MF file")]
    NoBuildItems,

    /// The requested change height cannot be expressed as a height range
    ///
    /// **Error Code**: E3002
    #[error("[E3002] Invalid change height {height}mm: must be greater than 0 and below {ceiling}mm")]
    InvalidHeight {
        /// Requested height in millimetres
        height: f64,
        /// Upper bound of the last range
        ceiling: u32,
    },

    /// Height-range descriptor could not be serialized
    ///
    /// **Error Code**: E3003
    #[error("[E3003] Descriptor serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlAttr(format!("Attribute parsing failed: {}", err))
    }
}

impl Error {
    /// Create an XmlWrite error
    ///
    /// # Arguments
    /// * `message` - Description of the writing error
    pub fn xml_write(message: String) -> Self {
        Error::XmlWrite(message)
    }

    /// Create an InvalidXml error with element context
    pub fn invalid_xml_element(element: &str, message: &str) -> Self {
        Error::InvalidXml(format!("Element '<{}>': {}", element, message))
    }
}
