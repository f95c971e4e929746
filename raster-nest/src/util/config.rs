use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

/// Configuration of a nesting pass
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct NestConfig {
    /// Distance between two neighbouring dots of every raster
    pub dot_pitch: f64,
    /// Required clearance between two nested parts.
    /// Every part is inflated by half this value on each side to obtain its nesting bounds.
    pub part_to_part_gap: f64,
    /// Required clearance between a nested part and the edge of the sheet
    pub part_to_sheet_gap: f64,
    /// Angle in degrees between two consecutive candidate rotations, starting at 0°
    pub rotation_step: f64,
    /// Backend used to evaluate the dot-pair grid of the no-fit raster engine
    #[serde(default)]
    pub grid_backend: GridBackend,
    /// Modifications applied to the loops of parts on import
    #[serde(default)]
    pub shape_modify: ShapeModifyConfig,
}

impl NestConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.dot_pitch > 0.0 && self.dot_pitch.is_finite(),
            "dot pitch must be strictly positive, got {}",
            self.dot_pitch
        );
        ensure!(
            self.part_to_part_gap >= 0.0,
            "part to part gap must not be negative, got {}",
            self.part_to_part_gap
        );
        ensure!(
            self.part_to_sheet_gap >= 0.0,
            "part to sheet gap must not be negative, got {}",
            self.part_to_sheet_gap
        );
        ensure!(
            self.rotation_step > 0.0 && self.rotation_step <= 360.0,
            "rotation step must be in (0, 360], got {}",
            self.rotation_step
        );
        Ok(())
    }

    /// Candidate rotations in degrees: `0, step, 2*step, ...` strictly below 360°.
    pub fn rotations(&self) -> Vec<f64> {
        let n_steps = (360.0 / self.rotation_step - 1e-9).ceil().max(1.0) as usize;
        (0..n_steps).map(|i| i as f64 * self.rotation_step).collect()
    }
}

impl Default for NestConfig {
    fn default() -> Self {
        Self {
            dot_pitch: 1.0,
            part_to_part_gap: 2.0,
            part_to_sheet_gap: 2.0,
            rotation_step: 90.0,
            grid_backend: GridBackend::default(),
            shape_modify: ShapeModifyConfig::default(),
        }
    }
}

/// Substrate on which the per-cell predicate of the no-fit raster is evaluated
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GridBackend {
    /// Plain nested loop on the calling thread
    Sequential,
    /// Rows distributed over the rayon thread pool
    #[default]
    Parallel,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct ShapeModifyConfig {
    /// Vertices closer than this distance are merged and near collinear vertices are removed.
    /// If undefined, loops are not cleaned.
    pub clean_tolerance: Option<f64>,
    /// Outside loops are inflated and inside loops deflated by this distance.
    /// If undefined, no offset is applied.
    pub offset: Option<f64>,
}
