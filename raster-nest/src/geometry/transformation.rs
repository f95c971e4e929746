//See https://pages.mtu.edu/~shene/COURSES/cs3621/NOTES/geometry/geo-tran.html

/// Proper rigid transformation in matrix form.
/// Only the top two rows of the homogeneous matrix are stored, the last one is always `[0, 0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Transformation {
    matrix: [[f64; 3]; 2],
}

impl Transformation {
    pub fn from_translation((tx, ty): (f64, f64)) -> Self {
        debug_assert!(tx.is_finite() && ty.is_finite());
        Self {
            matrix: [[1.0, 0.0, tx], [0.0, 1.0, ty]],
        }
    }

    /// Rotation about the origin, `angle` in radians
    pub fn from_rotation(angle: f64) -> Self {
        let (sin, cos) = snapped_sin_cos(angle);
        Self {
            matrix: [[cos, -sin, 0.0], [sin, cos, 0.0]],
        }
    }

    /// Rotation component in radians
    pub fn rotation(&self) -> f64 {
        self.matrix[1][0].atan2(self.matrix[0][0])
    }

    pub fn apply(&self, (x, y): (f64, f64)) -> (f64, f64) {
        let [r0, r1] = &self.matrix;
        (
            r0[0] * x + r0[1] * y + r0[2],
            r1[0] * x + r1[1] * y + r1[2],
        )
    }
}

//quarter turns are exact, otherwise a 90° rotation leaves ~1e-16 residue on every coordinate
fn snapped_sin_cos(angle: f64) -> (f64, f64) {
    let quarter_turns = angle / std::f64::consts::FRAC_PI_2;
    if (quarter_turns - quarter_turns.round()).abs() < 1e-12 {
        match (quarter_turns.round() as i64).rem_euclid(4) {
            0 => (0.0, 1.0),
            1 => (1.0, 0.0),
            2 => (0.0, -1.0),
            _ => (-1.0, 0.0),
        }
    } else {
        angle.sin_cos()
    }
}
