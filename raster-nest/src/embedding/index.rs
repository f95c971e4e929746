use std::collections::HashSet;

use itertools::Itertools;
use rstar::{AABB, RTree, RTreeObject};
use slotmap::SecondaryMap;

use crate::entities::PartKey;
use crate::geometry::primitives::Rect;

/// Nesting bounds of a part, as stored in the R*-tree
#[derive(Clone, Debug)]
struct IndexedBounds {
    key: PartKey,
    bounds: Rect,
}

impl RTreeObject for IndexedBounds {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.bounds.x_min, self.bounds.y_min],
            [self.bounds.x_max, self.bounds.y_max],
        )
    }
}

/// Records, per nested part, which other parts are embedded in it (nested within its bounds).
/// Stored in both directions so that the containers of a part can be looked up as well.
#[derive(Clone, Debug, Default)]
pub struct EmbeddingIndex {
    embedded: SecondaryMap<PartKey, Vec<PartKey>>,
    containers: SecondaryMap<PartKey, Vec<PartKey>>,
}

impl EmbeddingIndex {
    /// Builds the index from scratch by bulk loading all nesting bounds into an R*-tree.
    /// A part is embedded in another when its bounds lie within the other's bounds.
    /// Parts with (nearly) identical bounds are not embedded in each other.
    pub fn build(parts: impl IntoIterator<Item = (PartKey, Rect)>) -> Self {
        let entries = parts
            .into_iter()
            .map(|(key, bounds)| IndexedBounds { key, bounds })
            .collect_vec();
        let tree = RTree::bulk_load(entries.clone());

        let mut index = EmbeddingIndex::default();
        for container in &entries {
            let embedded = tree
                .locate_in_envelope_intersecting(&container.envelope())
                .filter(|e| e.key != container.key)
                .filter(|e| container.bounds.contains_rect(&e.bounds))
                .filter(|e| !e.bounds.contains_rect(&container.bounds))
                .map(|e| e.key)
                .sorted()
                .collect_vec();
            for &pk in &embedded {
                index.register(container.key, pk);
            }
        }
        index
    }

    /// Records `part` as embedded in `container`
    pub fn append(&mut self, container: PartKey, part: PartKey) {
        self.register(container, part);
    }

    /// Parts embedded in `container`
    pub fn embedded_in(&self, container: PartKey) -> &[PartKey] {
        self.embedded.get(container).map(Vec::as_slice).unwrap_or_default()
    }

    /// Parts in which `part` is embedded
    pub fn containers_of(&self, part: PartKey) -> &[PartKey] {
        self.containers.get(part).map(Vec::as_slice).unwrap_or_default()
    }

    /// All parts `part` is transitively embedded in
    pub fn ancestors_of(&self, part: PartKey) -> Vec<PartKey> {
        let mut visited = HashSet::new();
        let mut stack = self.containers_of(part).to_vec();
        let mut ancestors = vec![];
        while let Some(pk) = stack.pop() {
            if visited.insert(pk) {
                ancestors.push(pk);
                stack.extend_from_slice(self.containers_of(pk));
            }
        }
        ancestors
    }

    /// Iterates over all containers and the parts embedded in them
    pub fn iter(&self) -> impl Iterator<Item = (PartKey, &[PartKey])> {
        self.embedded.iter().map(|(pk, v)| (pk, v.as_slice()))
    }

    fn register(&mut self, container: PartKey, part: PartKey) {
        push_unique(&mut self.embedded, container, part);
        push_unique(&mut self.containers, part, container);
    }
}

fn push_unique(map: &mut SecondaryMap<PartKey, Vec<PartKey>>, key: PartKey, value: PartKey) {
    match map.get_mut(key) {
        Some(values) => {
            if !values.contains(&value) {
                values.push(value);
            }
        }
        None => {
            map.insert(key, vec![value]);
        }
    }
}
