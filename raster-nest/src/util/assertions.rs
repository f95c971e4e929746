use crate::entities::{Entity, NestingState, Part};
use crate::geometry::geo_traits::Bounded;
use crate::geometry::primitives::Rect;
//Various checks to verify correctness of the state of the system
//Used in debug_assertion!() blocks

pub fn bounds_match_points(entity: &Entity) -> bool {
    let fresh = match entity.n_points() {
        0 | 1 => None,
        _ => Rect::from_points(entity.extents_points()),
    };
    fresh == entity.bounds()
}

pub fn inside_loops_within_outside_loop(part: &Part) -> bool {
    let Some(outer) = part.outside_loop().bounds() else {
        return part.inside_loops().iter().all(|l| l.bounds().is_none());
    };
    part.inside_loops()
        .iter()
        .filter_map(|l| l.bounds())
        .all(|inner| outer.contains_rect(&inner))
}

/// No part may be (transitively) embedded in itself
pub fn embedding_graph_is_acyclic(state: &NestingState) -> bool {
    let embedding = state.embedding();
    state
        .nested_parts()
        .all(|(pk, _)| !embedding.ancestors_of(pk).contains(&pk))
}

/// Every part embedded during the pass must lie within the nesting bounds of its container
pub fn embedded_parts_within_containers(state: &NestingState) -> bool {
    state.nested_parts().all(|(_, np)| match np.embedded_in {
        Some(container) => state
            .nested_part(container)
            .is_some_and(|c| c.nesting_bounds.contains_rect(&np.nesting_bounds)),
        None => true,
    })
}
