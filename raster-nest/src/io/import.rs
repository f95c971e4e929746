use anyhow::{Context, Result, bail, ensure};
use float_cmp::approx_eq;
use itertools::Itertools;
use log::warn;

use crate::entities::{DesignDocumentPart, Entity, Nesting, Part};
use crate::geometry::primitives::{Point, Rect};
use crate::geometry::shape_modification::{clean_loop, offset_loop, simplify};
use crate::io::ext_repr::{ExtInstance, ExtLoop, ExtNesting, ExtPart};
use crate::util::{FPA, ShapeModifyConfig};

/// Number of vertices of the polygon a circle is sampled into
pub const DEFAULT_CIRCLE_SEGMENTS: usize = 64;

/// Whether a loop is the outer silhouette of a part or one of its holes.
/// Offsets inflate the former and deflate the latter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LoopRole {
    Outside,
    Inside,
}

/// Converts external representations of sheets and parts into internal ones.
#[derive(Clone, Debug, Copy)]
pub struct Importer {
    pub shape_modify_config: ShapeModifyConfig,
    pub circle_segments: usize,
}

impl Importer {
    pub fn new(shape_modify_config: ShapeModifyConfig) -> Importer {
        Importer {
            shape_modify_config,
            circle_segments: DEFAULT_CIRCLE_SEGMENTS,
        }
    }

    /// Imports the sheet and all design parts, which are all assigned to that sheet.
    /// Part ids must be unique over the design parts and the parts already on the sheet.
    pub fn import_instance(
        &self,
        ext_instance: &ExtInstance,
    ) -> Result<(Nesting, Vec<DesignDocumentPart>)> {
        let nesting = self.import_nesting(&ext_instance.nesting)?;
        let ext_nesting = &ext_instance.nesting;
        ensure!(
            ext_instance
                .parts
                .iter()
                .chain(&ext_nesting.already_nested_parts)
                .chain(&ext_nesting.boundary_parts)
                .map(|p| p.id)
                .all_unique(),
            "instance {} contains duplicate part ids",
            ext_instance.name
        );
        let design_parts = ext_instance
            .parts
            .iter()
            .map(|ep| {
                self.import_part(ep)
                    .map(|part| DesignDocumentPart::new(nesting.id, part))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok((nesting, design_parts))
    }

    /// Parts already on the sheet are imported as they are, shape modifications are not applied to them.
    pub fn import_nesting(&self, ext_nesting: &ExtNesting) -> Result<Nesting> {
        ensure!(
            ext_nesting.width > 0.0 && ext_nesting.height > 0.0,
            "sheet {} has invalid dimensions {}x{}",
            ext_nesting.id,
            ext_nesting.width,
            ext_nesting.height
        );
        let as_is = Importer {
            shape_modify_config: ShapeModifyConfig::default(),
            ..*self
        };
        let import_all = |parts: &[ExtPart]| {
            parts
                .iter()
                .map(|ep| as_is.import_part(ep))
                .collect::<Result<Vec<Part>>>()
        };
        Ok(Nesting {
            already_nested_parts: import_all(&ext_nesting.already_nested_parts)?,
            boundary_parts: import_all(&ext_nesting.boundary_parts)?,
            ..Nesting::new(ext_nesting.id, ext_nesting.width, ext_nesting.height)
        })
    }

    pub fn import_part(&self, ext_part: &ExtPart) -> Result<Part> {
        let outside_loop = self
            .import_loop(&ext_part.outside_loop, LoopRole::Outside)
            .with_context(|| format!("outside loop of part {}", ext_part.id))?
            .with_context(|| format!("outside loop of part {} vanished", ext_part.id))?;

        let mut inside_loops = vec![];
        for (i, ext_loop) in ext_part.inside_loops.iter().enumerate() {
            match self
                .import_loop(ext_loop, LoopRole::Inside)
                .with_context(|| format!("inside loop {i} of part {}", ext_part.id))?
            {
                Some(l) => inside_loops.push(l.with_layer(ext_part.layer.clone())),
                None => warn!(
                    "[IMPORT] inside loop {i} of part {} vanished after modification, ignoring it",
                    ext_part.id
                ),
            }
        }

        let outside_loop = outside_loop
            .with_layer(ext_part.layer.clone())
            .with_nesting_meta_data(ext_part.id, ext_part.key.clone(), ext_part.rotation);

        Ok(Part::new(outside_loop, inside_loops))
    }

    /// Returns None when the loop disappears entirely through the configured modifications.
    fn import_loop(&self, ext_loop: &ExtLoop, role: LoopRole) -> Result<Option<Entity>> {
        let entity = match ext_loop {
            ExtLoop::Rectangle {
                x_min,
                y_min,
                width,
                height,
            } => {
                let rect = Rect::try_new(*x_min, *y_min, x_min + width, y_min + height)?;
                Entity::new(rect.extents_points().to_vec())
            }
            ExtLoop::Circle { center, diameter } => {
                ensure!(*diameter > 0.0, "circle with invalid diameter {diameter}");
                Entity::circle(Point::from(*center), *diameter, self.circle_segments)
            }
            ExtLoop::Polygon(points) => Entity::new(import_polygon_points(points)?),
        };
        self.modify_loop(entity, role)
    }

    fn modify_loop(&self, entity: Entity, role: LoopRole) -> Result<Option<Entity>> {
        let ShapeModifyConfig {
            clean_tolerance,
            offset,
        } = self.shape_modify_config;
        if clean_tolerance.is_none() && offset.is_none() {
            return Ok(Some(entity));
        }

        let mut points = entity.extents_points().to_vec();
        if let Some(offset) = offset.filter(|o| FPA(*o) != FPA(0.0)) {
            let delta = match role {
                LoopRole::Outside => offset,
                LoopRole::Inside => -offset,
            };
            match simplify(offset_loop(&points, delta)?) {
                Some(offset_points) => points = offset_points,
                None => return Ok(None),
            }
        }
        if let Some(tolerance) = clean_tolerance {
            points = clean_loop(&points, tolerance)?;
        }

        //modified circles are no longer circles
        let modified = Entity::new(points).with_layer(entity.layer.clone());
        Ok(Some(modified))
    }
}

/// Strips a repeated closing vertex and consecutive duplicates.
pub fn import_polygon_points(points: &[(f64, f64)]) -> Result<Vec<Point>> {
    let mut points = points.iter().map(|p| Point::from(*p)).collect_vec();
    //Strip the last vertex if it is the same as the first one
    if points.len() > 1 && points[0] == points[points.len() - 1] {
        points.pop();
    }
    //Remove duplicates that are consecutive (e.g. [1, 2, 2, 3] -> [1, 2, 3])
    let n_before = points.len();
    points.dedup_by(|a, b| approx_eq!(f64, a.0, b.0) && approx_eq!(f64, a.1, b.1));
    if points.len() != n_before {
        warn!(
            "[IMPORT] {} degenerate point(s) of input polygon eliminated",
            n_before - points.len()
        );
    }
    if points.len() < 3 {
        bail!("polygon has only {} distinct vertices", points.len());
    }
    Ok(points)
}
