use std::f64::consts::PI;
use crate::frame::FitMode;

#[cfg(feature="serde")]
use serde::{Serialize, Deserialize};

/// Knobs of the conversion pipeline.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature="serde", derive(Serialize, Deserialize))]
pub struct ConvertOptions {
    pub fit: FitMode,
    /// largest sweep (radians) one cubic may cover when splitting an arc
    pub arc_max_angle: f64,
    /// points closer than this coincide
    pub tolerance: f64,
}
impl Default for ConvertOptions {
    fn default() -> ConvertOptions {
        ConvertOptions {
            fit: FitMode::Stretch,
            arc_max_angle: PI / 2.0,
            tolerance: 1e-9,
        }
    }
}
impl ConvertOptions {
    pub fn with_fit(self, fit: FitMode) -> ConvertOptions {
        ConvertOptions { fit, .. self }
    }
    pub fn with_arc_max_angle(self, arc_max_angle: f64) -> ConvertOptions {
        ConvertOptions { arc_max_angle, .. self }
    }
    pub fn with_tolerance(self, tolerance: f64) -> ConvertOptions {
        ConvertOptions { tolerance, .. self }
    }
}
