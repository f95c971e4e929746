use crate::entities::Part;
use crate::geometry::primitives::{Point, Rect, Vector};

/// A sheet and the parts that already occupy it.
#[derive(Clone, Debug)]
pub struct Nesting {
    /// Identity of the sheet
    pub id: u64,
    pub width: f64,
    pub height: f64,
    /// Parts nested on the sheet in earlier passes
    pub already_nested_parts: Vec<Part>,
    /// Already cut parts, fixed obstacles which are never moved nor reported as nested
    pub boundary_parts: Vec<Part>,
}

impl Nesting {
    pub fn new(id: u64, width: f64, height: f64) -> Self {
        Nesting {
            id,
            width,
            height,
            already_nested_parts: vec![],
            boundary_parts: vec![],
        }
    }

    /// The sheet spanning from the origin to `(width, height)`
    pub fn sheet_rect(&self) -> Option<Rect> {
        Rect::from_minimum_point_and_size(Point::ORIGIN, Vector(self.width, self.height))
    }

    /// Region available to nesting bounds: the sheet deflated by `part_to_sheet_gap`.
    /// None if the gap consumes the whole sheet.
    pub fn sheet_bounds(&self, part_to_sheet_gap: f64) -> Option<Rect> {
        self.sheet_rect()?.offset(-part_to_sheet_gap)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// A part which is a candidate for the sheet identified by `nesting_id`.
#[derive(Clone, Debug)]
pub struct DesignDocumentPart {
    pub nesting_id: u64,
    pub part: Part,
}

impl DesignDocumentPart {
    pub fn new(nesting_id: u64, part: Part) -> Self {
        DesignDocumentPart { nesting_id, part }
    }

    /// Identity of the part itself
    pub fn part_id(&self) -> u64 {
        self.part.nesting_id()
    }
}
