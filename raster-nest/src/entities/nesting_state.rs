use anyhow::{Context, Result};
use itertools::Itertools;
use log::warn;
use slotmap::{SlotMap, new_key_type};

use crate::embedding::EmbeddingIndex;
use crate::entities::{Nesting, Part};
use crate::geometry::primitives::Rect;
use crate::util::assertions;

new_key_type! {
    /// Unique key for each [`NestedPart`] in a [`NestingState`]
    pub struct PartKey;
}

/// How a part ended up on the sheet
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NestedPartOrigin {
    /// Nested in an earlier pass
    AlreadyNested,
    /// Already cut, only present as an obstacle
    CutBoundary,
    /// Nested during the current pass
    Newly,
}

#[derive(Clone, Debug)]
pub struct NestedPart {
    pub part: Part,
    pub origin: NestedPartOrigin,
    /// Nesting bounds, cached at the moment the part was nested
    pub nesting_bounds: Rect,
    /// Part in whose hole this part was nested during the current pass
    pub embedded_in: Option<PartKey>,
}

/// State of a sheet during a nesting pass.
/// Only [`NestingState::commit`] mutates it, once a placement has been decided.
#[derive(Clone, Debug)]
pub struct NestingState {
    sheet: Nesting,
    part_to_part_gap: f64,
    /// Parts occupying the sheet, in the order they were added
    nested_parts: SlotMap<PartKey, NestedPart>,
    /// Smallest rectangle containing the nesting bounds of all occupying parts
    envelope: Option<Rect>,
    embedding: EmbeddingIndex,
}

impl NestingState {
    /// Loads the already nested and boundary parts of `sheet`.
    /// Parts without geometry cannot occupy anything and are skipped.
    pub fn new(sheet: &Nesting, part_to_part_gap: f64) -> Self {
        let mut nested_parts = SlotMap::with_key();
        let carried_over = sheet
            .already_nested_parts
            .iter()
            .map(|p| (p, NestedPartOrigin::AlreadyNested))
            .chain(
                sheet
                    .boundary_parts
                    .iter()
                    .map(|p| (p, NestedPartOrigin::CutBoundary)),
            );
        for (part, origin) in carried_over {
            match part.nesting_bounds(part_to_part_gap) {
                Some(nesting_bounds) => {
                    nested_parts.insert(NestedPart {
                        part: part.clone(),
                        origin,
                        nesting_bounds,
                        embedded_in: None,
                    });
                }
                None => warn!(
                    "[NS] part {} on sheet {} has no bounds, ignoring it",
                    part.nesting_id(),
                    sheet.id
                ),
            }
        }

        let envelope = nested_parts
            .values()
            .map(|np| np.nesting_bounds)
            .reduce(Rect::bounding_rect);

        let embedding =
            EmbeddingIndex::build(nested_parts.iter().map(|(pk, np)| (pk, np.nesting_bounds)));

        let state = NestingState {
            sheet: Nesting {
                already_nested_parts: vec![],
                boundary_parts: vec![],
                ..sheet.clone()
            },
            part_to_part_gap,
            nested_parts,
            envelope,
            embedding,
        };
        debug_assert!(assertions::embedding_graph_is_acyclic(&state));
        state
    }

    /// Adds a newly nested part to the state, grows the envelope and registers the embedding.
    pub fn commit(&mut self, part: Part, embedded_in: Option<PartKey>) -> Result<PartKey> {
        let nesting_bounds = part
            .nesting_bounds(self.part_to_part_gap)
            .with_context(|| format!("committed part {} has no bounds", part.nesting_id()))?;
        if let Some(container) = embedded_in {
            self.nested_parts
                .get(container)
                .with_context(|| format!("embedding part {container:?} is not nested"))?;
        }

        let pk = self.nested_parts.insert(NestedPart {
            part,
            origin: NestedPartOrigin::Newly,
            nesting_bounds,
            embedded_in,
        });

        self.envelope = Some(match self.envelope {
            Some(env) => Rect::bounding_rect(env, nesting_bounds),
            None => nesting_bounds,
        });

        if let Some(container) = embedded_in {
            self.embedding.append(container, pk);
        }

        debug_assert!(assertions::embedding_graph_is_acyclic(self));
        debug_assert!(assertions::embedded_parts_within_containers(self));

        Ok(pk)
    }

    pub fn sheet(&self) -> &Nesting {
        &self.sheet
    }

    pub fn part_to_part_gap(&self) -> f64 {
        self.part_to_part_gap
    }

    pub fn envelope(&self) -> Option<Rect> {
        self.envelope
    }

    pub fn embedding(&self) -> &EmbeddingIndex {
        &self.embedding
    }

    pub fn nested_part(&self, pk: PartKey) -> Option<&NestedPart> {
        self.nested_parts.get(pk)
    }

    /// All parts occupying the sheet, boundary parts included
    pub fn nested_parts(&self) -> impl Iterator<Item = (PartKey, &NestedPart)> {
        self.nested_parts.iter()
    }

    pub fn key_of(&self, part_id: u64) -> Option<PartKey> {
        self.nested_parts
            .iter()
            .find(|(_, np)| np.part.nesting_id() == part_id)
            .map(|(pk, _)| pk)
    }

    /// Parts to report as nested on the sheet: everything except the cut boundary parts
    pub fn all_nested_parts(&self) -> Vec<&Part> {
        self.nested_parts
            .values()
            .filter(|np| np.origin != NestedPartOrigin::CutBoundary)
            .map(|np| &np.part)
            .collect_vec()
    }

    /// Ratio of the material area of all reported parts to the area of the sheet
    pub fn utilization(&self) -> f64 {
        let sheet_area = self.sheet.area();
        if sheet_area <= 0.0 {
            return 0.0;
        }
        self.all_nested_parts()
            .iter()
            .map(|p| p.area())
            .sum::<f64>()
            / sheet_area
    }
}
