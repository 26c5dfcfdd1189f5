//! Height-range modifier descriptor
//!
//! OrcaSlicer stores a height range modifier as JSON text inside a
//! `<metadata name="height_range_modifier">` element. The descriptor used here
//! always has two bands: the base band from 0 up to the change height, and
//! the upper band from the change height to the ceiling, which carries the
//! G-code that triggers the filament change.

use crate::error::Result;
use serde::Serialize;

/// Metadata `name` attribute identifying a height range modifier
pub const HEIGHT_RANGE_MODIFIER: &str = "height_range_modifier";

/// Default height of the filament change, in millimetres
pub const DEFAULT_HEIGHT_MM: f64 = 1.5;

/// Default upper bound of the last band, in millimetres
pub const DEFAULT_CEILING_MM: u32 = 999;

/// Default colour of the base band
pub const DEFAULT_BASE_COLOR: &str = "RoyalBlue";

/// Default colour of the upper band
pub const DEFAULT_CHANGE_COLOR: &str = "white";

/// Default G-code emitted at the change height (manual filament change)
pub const DEFAULT_GCODE: &str = "M600";

/// A band boundary
///
/// Fixed boundaries (floor and ceiling) are integers, the change height is a
/// float, which keeps `0` and `999` free of a trailing `.0` in the JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Bound {
    /// Whole-millimetre boundary
    Whole(u32),
    /// Fractional-millimetre boundary
    Mm(f64),
}

/// One band of a height range modifier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Band {
    /// Lower boundary
    pub min: Bound,
    /// Upper boundary
    pub max: Bound,
    /// Display colour in the slicer
    pub color: String,
    /// G-code inserted when the band starts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gcode: Option<String>,
}

/// Height range modifier descriptor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeightRange {
    /// Bands in ascending height order
    pub ranges: Vec<Band>,
}

impl HeightRange {
    /// Two-band descriptor with the default colours, ceiling and `M600`
    pub fn filament_change(height_mm: f64) -> Self {
        Self::with_bands(
            height_mm,
            DEFAULT_CEILING_MM,
            DEFAULT_BASE_COLOR,
            DEFAULT_CHANGE_COLOR,
            DEFAULT_GCODE,
        )
    }

    /// Two-band descriptor with explicit colours, ceiling and G-code
    pub fn with_bands(
        height_mm: f64,
        ceiling_mm: u32,
        base_color: &str,
        change_color: &str,
        gcode: &str,
    ) -> Self {
        Self {
            ranges: vec![
                Band {
                    min: Bound::Whole(0),
                    max: Bound::Mm(height_mm),
                    color: base_color.to_string(),
                    gcode: None,
                },
                Band {
                    min: Bound::Mm(height_mm),
                    max: Bound::Whole(ceiling_mm),
                    color: change_color.to_string(),
                    gcode: Some(gcode.to_string()),
                },
            ],
        }
    }

    /// Compact JSON text as stored in the model document
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
