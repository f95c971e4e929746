use std::time::Duration;

use itertools::Itertools;

use crate::entities::{Entity, NestedPartOrigin};
use crate::io::ext_repr::{ExtNestedPart, ExtSolution};
use crate::nest::NestingOutcome;

/// Exports the outcome of a nesting pass to an external representation.
pub fn export_outcome(outcome: &NestingOutcome, run_time: Duration) -> ExtSolution {
    let nested_parts = outcome
        .state
        .nested_parts()
        .filter(|(_, np)| np.origin != NestedPartOrigin::CutBoundary)
        .map(|(pk, np)| {
            let record = outcome.newly_nested.iter().find(|r| r.key == pk);
            ExtNestedPart {
                id: np.part.nesting_id(),
                newly_nested: np.origin == NestedPartOrigin::Newly,
                rotation: record.map(|r| r.rotation),
                location: record.map(|r| r.location.into()),
                embedded_in: record.and_then(|r| r.embedded_in),
                outside_loop: loop_points(np.part.outside_loop()),
                inside_loops: np.part.inside_loops().iter().map(loop_points).collect(),
            }
        })
        .collect_vec();

    ExtSolution {
        nesting_id: outcome.state.sheet().id,
        nested_parts,
        not_nested: outcome.not_nested.iter().map(|dp| dp.part_id()).collect(),
        embedded_parts: outcome.embedded_parts(),
        utilization: outcome.utilization(),
        run_time_ms: run_time.as_millis() as u64,
    }
}

fn loop_points(entity: &Entity) -> Vec<(f64, f64)> {
    entity.extents_points().iter().map(|p| (*p).into()).collect()
}
