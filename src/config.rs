//! Injection configuration

use crate::descriptor::{
    DEFAULT_BASE_COLOR, DEFAULT_CEILING_MM, DEFAULT_CHANGE_COLOR, DEFAULT_GCODE,
    DEFAULT_HEIGHT_MM, HeightRange,
};
use crate::error::{Error, Result};

/// Where the height range modifier is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// One entry in the metadata group of every build item
    PerObject,
    /// A single entry on the model root, ahead of `<resources>`
    Global,
}

impl Scope {
    /// Human-readable name used in log output
    pub fn name(&self) -> &'static str {
        match self {
            Scope::PerObject => "per-object",
            Scope::Global => "global",
        }
    }
}

/// Configuration for a filament-change injection
///
/// Defaults to a change at 1.5mm from `RoyalBlue` to `white` with `M600`.
///
/// # Example
///
/// ```
/// use orca_m600::InjectConfig;
///
/// let config = InjectConfig::new().with_height(2.4).with_gcode("M601");
/// assert_eq!(config.height(), 2.4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InjectConfig {
    height_mm: f64,
    ceiling_mm: u32,
    base_color: String,
    change_color: String,
    gcode: String,
}

impl InjectConfig {
    /// Create a configuration with the default filament change
    pub fn new() -> Self {
        Self {
            height_mm: DEFAULT_HEIGHT_MM,
            ceiling_mm: DEFAULT_CEILING_MM,
            base_color: DEFAULT_BASE_COLOR.to_string(),
            change_color: DEFAULT_CHANGE_COLOR.to_string(),
            gcode: DEFAULT_GCODE.to_string(),
        }
    }

    /// Set the change height in millimetres
    pub fn with_height(mut self, height_mm: f64) -> Self {
        self.height_mm = height_mm;
        self
    }

    /// Set the upper bound of the last band
    pub fn with_ceiling(mut self, ceiling_mm: u32) -> Self {
        self.ceiling_mm = ceiling_mm;
        self
    }

    /// Set the colour of the band below the change
    pub fn with_base_color(mut self, color: impl Into<String>) -> Self {
        self.base_color = color.into();
        self
    }

    /// Set the colour of the band above the change
    pub fn with_change_color(mut self, color: impl Into<String>) -> Self {
        self.change_color = color.into();
        self
    }

    /// Set the G-code inserted at the change height
    pub fn with_gcode(mut self, gcode: impl Into<String>) -> Self {
        self.gcode = gcode.into();
        self
    }

    /// Change height in millimetres
    pub fn height(&self) -> f64 {
        self.height_mm
    }

    /// G-code inserted at the change height
    pub fn gcode(&self) -> &str {
        &self.gcode
    }

    /// Check that the change height falls strictly inside `(0, ceiling)`
    pub fn validate(&self) -> Result<()> {
        let h = self.height_mm;
        if !h.is_finite() || h <= 0.0 || h >= f64::from(self.ceiling_mm) {
            return Err(Error::InvalidHeight {
                height: h,
                ceiling: self.ceiling_mm,
            });
        }
        Ok(())
    }

    /// Build the descriptor, validating first
    pub fn descriptor(&self) -> Result<HeightRange> {
        self.validate()?;
        Ok(HeightRange::with_bands(
            self.height_mm,
            self.ceiling_mm,
            &self.base_color,
            &self.change_color,
            &self.gcode,
        ))
    }
}

impl Default for InjectConfig {
    fn default() -> Self {
        Self::new()
    }
}
