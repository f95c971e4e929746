pub mod geo_traits;
pub mod primitives;
pub mod shape_modification;
mod transformation;

#[doc(inline)]
pub use transformation::Transformation;

/// Normalizes an angle in degrees to the range [0, 360).
pub fn normalize_angle(degrees: f64) -> f64 {
    let normalized = degrees % 360.0;
    if normalized < 0.0 {
        normalized + 360.0
    } else {
        normalized
    }
}

/// Signed area of a closed loop, see <https://en.wikipedia.org/wiki/Shoelace_formula>.
/// Counterclockwise loops have a positive area, clockwise loops a negative one.
pub fn calculate_area(points: &[primitives::Point]) -> f64 {
    let mut sigma = 0.0;
    for i in 0..points.len() {
        let j = (i + 1) % points.len();
        let primitives::Point(x_i, y_i) = points[i];
        let primitives::Point(x_j, y_j) = points[j];
        sigma += (y_i + y_j) * (x_i - x_j);
    }
    0.5 * sigma
}
