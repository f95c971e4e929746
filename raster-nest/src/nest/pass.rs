use std::collections::BTreeMap;
use std::time::Instant;

use anyhow::{Result, bail};
use itertools::Itertools;
use log::{debug, info, warn};

use crate::entities::{DesignDocumentPart, Nesting, NestedPartOrigin, NestingState, Part, PartKey};
use crate::geometry::primitives::{Point, Rect};
use crate::nest::search::nest_by_bounding_boxes;
use crate::raster::{GridEvaluator, NoFitRasterEngine};
use crate::util::NestConfig;

/// Outcome of [`nest_one`]
#[derive(Clone, Debug, Default)]
pub struct NestOneResult {
    /// Minimum corner of the nesting bounds of the placed part
    pub location: Option<Point>,
    /// The part, rotated and moved to `location`
    pub part: Option<Part>,
    pub embedded_in: Option<PartKey>,
}

impl NestOneResult {
    pub fn nested(&self) -> bool {
        self.location.is_some()
    }
}

/// A design part nested during a pass
#[derive(Clone, Debug)]
pub struct NestedRecord {
    /// Key of the part in the final [`NestingState`]
    pub key: PartKey,
    pub design_part: DesignDocumentPart,
    /// The design part, rotated and moved to its location on the sheet
    pub nested_part: Part,
    /// Rotation in degrees applied to the design part
    pub rotation: f64,
    pub location: Point,
    /// Identity of the part in whose hole it was nested
    pub embedded_in: Option<u64>,
}

/// Result of a nesting pass on one sheet
#[derive(Clone, Debug)]
pub struct NestingOutcome {
    /// Design parts nested during this pass, in the order they were committed
    pub newly_nested: Vec<NestedRecord>,
    /// Design parts which did not fit anywhere
    pub not_nested: Vec<DesignDocumentPart>,
    /// State of the sheet at the end of the pass
    pub state: NestingState,
}

impl NestingOutcome {
    /// All parts nested on the sheet (from earlier passes and this one), without the cut boundary parts
    pub fn all_nested_parts(&self) -> Vec<&Part> {
        self.state.all_nested_parts()
    }

    pub fn utilization(&self) -> f64 {
        self.state.utilization()
    }

    /// Identities of the parts embedded in each part, keyed by the identity of the embedding part.
    /// Cut boundary parts appear on neither side.
    pub fn embedded_parts(&self) -> BTreeMap<u64, Vec<u64>> {
        self.state
            .embedding()
            .iter()
            .filter_map(|(container, embedded)| {
                let container = self
                    .state
                    .nested_part(container)
                    .filter(|np| np.origin != NestedPartOrigin::CutBoundary)?;
                let embedded = embedded
                    .iter()
                    .filter_map(|pk| self.state.nested_part(*pk))
                    .filter(|np| np.origin != NestedPartOrigin::CutBoundary)
                    .map(|np| np.part.nesting_id())
                    .collect_vec();
                (!embedded.is_empty()).then(|| (container.part.nesting_id(), embedded))
            })
            .collect()
    }
}

/// Tries to nest a single part at a given rotation.
/// The part is moved to the origin, rotated about it, moved back to the origin and handed to the placement search.
pub fn nest_one<E: GridEvaluator>(
    part: &Part,
    rotation: f64,
    state: &NestingState,
    sheet_bounds: Rect,
    engine: &NoFitRasterEngine<E>,
) -> NestOneResult {
    let gap = state.part_to_part_gap();
    let mut candidate = part.clone();
    candidate
        .move_to(Point::ORIGIN, gap)
        .rotate(rotation)
        .move_to(Point::ORIGIN, gap);

    match nest_by_bounding_boxes(&candidate, state, sheet_bounds, engine) {
        Some(placement) => {
            candidate.move_to(placement.location, gap);
            NestOneResult {
                location: Some(placement.location),
                part: Some(candidate),
                embedded_in: placement.embedded_in,
            }
        }
        None => NestOneResult::default(),
    }
}

/// Runs a nesting pass with the grid backend of the configuration.
pub fn nest(
    nesting: &Nesting,
    design_parts: &[DesignDocumentPart],
    config: &NestConfig,
) -> Result<NestingOutcome> {
    let engine = NoFitRasterEngine::new(config.dot_pitch, config.grid_backend);
    nest_with_engine(nesting, design_parts, config, &engine)
}

/// One greedy pass over all rotations and all design parts of the sheet.
///
/// For every rotation, every design part not yet nested is offered to [`nest_one`].
/// Placements are committed immediately, so that later parts see the updated sheet.
/// Fails only when the placement search reports a location without a part,
/// which aborts the pass.
pub fn nest_with_engine<E: GridEvaluator>(
    nesting: &Nesting,
    design_parts: &[DesignDocumentPart],
    config: &NestConfig,
    engine: &NoFitRasterEngine<E>,
) -> Result<NestingOutcome> {
    config.validate()?;
    let start = Instant::now();
    let gap = config.part_to_part_gap;
    let mut state = NestingState::new(nesting, gap);

    let (candidates, foreign): (Vec<&DesignDocumentPart>, Vec<&DesignDocumentPart>) = design_parts
        .iter()
        .partition(|dp| dp.nesting_id == nesting.id);
    if !foreign.is_empty() {
        warn!(
            "[NEST] ignoring {} design parts meant for other sheets than {}",
            foreign.len(),
            nesting.id
        );
    }

    let mut nested = vec![false; candidates.len()];
    let mut newly_nested = vec![];

    match nesting.sheet_bounds(config.part_to_sheet_gap) {
        None => warn!(
            "[NEST] sheet {} ({}x{}) has no room left after a sheet gap of {}",
            nesting.id, nesting.width, nesting.height, config.part_to_sheet_gap
        ),
        Some(sheet_bounds) => {
            for rotation in config.rotations() {
                for (i, dp) in candidates.iter().enumerate() {
                    if nested[i] {
                        continue;
                    }
                    let NestOneResult {
                        location,
                        part,
                        embedded_in,
                    } = nest_one(&dp.part, rotation, &state, sheet_bounds, engine);
                    let (location, part) = match (location, part) {
                        (Some(location), Some(part)) => (location, part),
                        (Some(location), None) => bail!(
                            "placement search returned location {location:?} for part {} without a placed part",
                            dp.part_id()
                        ),
                        (None, _) => {
                            debug!("[NEST] part {} does not fit at {rotation}°", dp.part_id());
                            continue;
                        }
                    };

                    let key = state.commit(part.clone(), embedded_in)?;
                    nested[i] = true;

                    let embedded_in =
                        embedded_in.and_then(|pk| state.nested_part(pk)).map(|np| np.part.nesting_id());
                    info!(
                        "[NEST] placed part {} at ({:.3}, {:.3}) with rotation {rotation}°{}",
                        dp.part_id(),
                        location.0,
                        location.1,
                        embedded_in.map_or(String::new(), |id| format!(" inside part {id}"))
                    );
                    newly_nested.push(NestedRecord {
                        key,
                        design_part: (*dp).clone(),
                        nested_part: part,
                        rotation,
                        location,
                        embedded_in,
                    });
                }
            }
        }
    }

    let not_nested = candidates
        .iter()
        .zip(nested.iter())
        .filter(|(_, n)| !**n)
        .map(|(dp, _)| (*dp).clone())
        .collect_vec();

    let outcome = NestingOutcome {
        newly_nested,
        not_nested,
        state,
    };

    info!(
        "[NEST] pass on sheet {} finished in {:.3}ms, {} nested, {} not nested, utilization {:.3}%",
        nesting.id,
        start.elapsed().as_secs_f64() * 1000.0,
        outcome.newly_nested.len(),
        outcome.not_nested.len(),
        outcome.utilization() * 100.0
    );

    Ok(outcome)
}
