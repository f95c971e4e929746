use crate::entities::Entity;
use crate::geometry::Transformation;
use crate::geometry::geo_traits::{Bounded, CollidesWith, Transformable};
use crate::geometry::primitives::{Point, Rect, Vector};
use crate::util::assertions;

/// A cut part: an outside loop and zero or more holes.
/// All loops move together, the identity of the part is the [`Entity::nesting_id`] of its outside loop.
#[derive(Clone, Debug, PartialEq)]
pub struct Part {
    outside_loop: Entity,
    inside_loops: Vec<Entity>,
}

impl Part {
    pub fn new(outside_loop: Entity, inside_loops: Vec<Entity>) -> Self {
        let part = Part {
            outside_loop,
            inside_loops,
        };
        debug_assert!(assertions::inside_loops_within_outside_loop(&part));
        part
    }

    pub fn with_nesting_meta_data(
        self,
        nesting_id: u64,
        nesting_key: impl Into<String>,
        rotation: Option<f64>,
    ) -> Self {
        Part {
            outside_loop: self
                .outside_loop
                .with_nesting_meta_data(nesting_id, nesting_key, rotation),
            ..self
        }
    }

    pub fn nesting_id(&self) -> u64 {
        self.outside_loop.nesting_id
    }

    pub fn outside_loop(&self) -> &Entity {
        &self.outside_loop
    }

    pub fn inside_loops(&self) -> &[Entity] {
        &self.inside_loops
    }

    /// Accumulated rotation of the part in degrees, if tracked
    pub fn rotation(&self) -> Option<f64> {
        self.outside_loop.rotation()
    }

    /// Outside loop bounds inflated by half of `part_to_part_gap` on every side.
    /// Two parts whose nesting bounds do not overlap are at least `part_to_part_gap` apart.
    pub fn nesting_bounds(&self, part_to_part_gap: f64) -> Option<Rect> {
        self.outside_loop.bounds()?.offset(part_to_part_gap / 2.0)
    }

    /// Area of material: the outside loop minus its holes
    pub fn area(&self) -> f64 {
        self.outside_loop.area() - self.inside_loops.iter().map(Entity::area).sum::<f64>()
    }

    pub fn translate(&mut self, v: Vector) -> &mut Self {
        self.transform(&Transformation::from_translation((v.0, v.1)))
    }

    /// Rotates every loop about the origin, not about the part itself.
    pub fn rotate(&mut self, degrees: f64) -> &mut Self {
        self.transform(&Transformation::from_rotation(degrees.to_radians()))
    }

    /// Translates the part so that the minimum corner of its nesting bounds lands on `target`.
    /// Parts without bounds are left untouched.
    pub fn move_to(&mut self, target: Point, part_to_part_gap: f64) -> &mut Self {
        match self.nesting_bounds(part_to_part_gap) {
            Some(nb) => self.translate(nb.min().vector_to(target)),
            None => self,
        }
    }
}

impl Bounded for Part {
    fn bounds(&self) -> Option<Rect> {
        self.outside_loop.bounds()
    }
}

impl Transformable for Part {
    fn transform(&mut self, t: &Transformation) -> &mut Self {
        let Part {
            outside_loop,
            inside_loops,
        } = self;

        outside_loop.transform(t);
        inside_loops.iter_mut().for_each(|l| {
            l.transform(t);
        });

        self
    }
}

/// A point collides with a part when it lies on its material, so within the outside loop and outside every hole.
impl CollidesWith<Point> for Part {
    fn collides_with(&self, p: &Point) -> bool {
        self.outside_loop.collides_with(p) && !self.inside_loops.iter().any(|h| h.collides_with(p))
    }
}
