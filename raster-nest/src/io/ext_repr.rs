use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// External representation of a nesting problem: a sheet and the design parts to nest on it.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtInstance {
    /// Name of the instance
    pub name: String,
    /// The sheet
    pub nesting: ExtNesting,
    /// Design parts to nest on the sheet
    pub parts: Vec<ExtPart>,
}

/// External representation of a [`Nesting`](crate::entities::Nesting).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtNesting {
    /// Unique identifier of the sheet
    pub id: u64,
    pub width: f64,
    pub height: f64,
    /// Parts nested on the sheet in earlier passes, at their final position
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub already_nested_parts: Vec<ExtPart>,
    /// Already cut parts, at their final position
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub boundary_parts: Vec<ExtPart>,
}

/// External representation of a [`Part`](crate::entities::Part).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtPart {
    /// Unique identifier of the part
    pub id: u64,
    /// Placement key, free form
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub layer: String,
    /// Rotation (in degrees) the part already has, if tracked
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rotation: Option<f64>,
    /// Outer silhouette of the part
    pub outside_loop: ExtLoop,
    /// Holes of the part
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub inside_loops: Vec<ExtLoop>,
}

/// Various ways to represent a closed loop
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(tag = "type", content = "data")]
#[serde(rename_all = "snake_case")]
pub enum ExtLoop {
    /// Axis-aligned rectangle. With its left bottom corner at (x_min, y_min), a width and height
    Rectangle {
        x_min: f64,
        y_min: f64,
        width: f64,
        height: f64,
    },
    /// Circle, sampled into a polygon on import
    Circle { center: (f64, f64), diameter: f64 },
    /// Closed polygon, the closing vertex may be repeated
    Polygon(Vec<(f64, f64)>),
}

/// External representation of a [`NestingOutcome`](crate::nest::NestingOutcome).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtSolution {
    /// Identifier of the sheet
    pub nesting_id: u64,
    /// All parts on the sheet, except the cut boundary parts
    pub nested_parts: Vec<ExtNestedPart>,
    /// Identifiers of the design parts which could not be nested
    pub not_nested: Vec<u64>,
    /// Identifiers of the parts embedded in each part, keyed by the identifier of the embedding part
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub embedded_parts: BTreeMap<u64, Vec<u64>>,
    /// Material area of the nested parts divided by the area of the sheet
    pub utilization: f64,
    /// Time at which the solution was created, relative to the start of the run
    pub run_time_ms: u64,
}

/// A part on the sheet, with its loops at their final position
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtNestedPart {
    pub id: u64,
    /// True if the part was nested during this pass
    pub newly_nested: bool,
    /// Rotation (in degrees) applied during this pass
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rotation: Option<f64>,
    /// Minimum corner of the nesting bounds
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub location: Option<(f64, f64)>,
    /// Identifier of the part in whose hole this part was nested
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub embedded_in: Option<u64>,
    pub outside_loop: Vec<(f64, f64)>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub inside_loops: Vec<Vec<(f64, f64)>>,
}
