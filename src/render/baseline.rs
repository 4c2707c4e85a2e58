//! Baseline registry: the zero-thickness arcs curved text flows along.
//!
//! One baseline per `(person, run)` per render pass. Asking for an existing
//! key returns the existing id; asking for it with different geometry is a
//! [`LayoutError::BaselineCollision`].

use std::collections::HashMap;

use crate::errors::LayoutError;
use crate::hierarchy::{HierarchyNode, PersonId};
use crate::log::trace;
use crate::types::{Angle, Px};

use super::arc::ArcPath;
use super::geometry::Geometry;
use super::label::RunKind;

/// Radial offsets (percent of ring thickness) of each run's baseline,
/// indexed by [`RunKind::index`]. Tuned by eye; the marriage run sits
/// outside the ring, towards the children.
pub const TEXT_OFFSETS: [f64; 5] = [73.0, 54.0, 35.0, 12.0, 120.0];

/// Same as [`TEXT_OFFSETS`] for slices whose text flow is reversed.
pub const FLIPPED_TEXT_OFFSETS: [f64; 5] = [23.0, 42.0, 61.0, 84.0, -20.0];

/// Radial offset of a run's baseline within the node's ring.
pub fn text_offset(geometry: &Geometry<'_>, node: &HierarchyNode, run: RunKind) -> f64 {
    if geometry.is_orientation_flipped(node.depth, node.x0, node.x1) {
        FLIPPED_TEXT_OFFSETS[run.index()]
    } else {
        TEXT_OFFSETS[run.index()]
    }
}

/// Identity of a baseline within one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BaselineKey {
    pub person: PersonId,
    pub run: RunKind,
}

impl BaselineKey {
    pub fn new(person: PersonId, run: RunKind) -> Self {
        Self { person, run }
    }

    /// Document id, unique per key
    pub fn element_id(&self) -> String {
        format!("path-person-{}-{}", self.person, self.run.index())
    }
}

/// A registered text guide.
#[derive(Debug, Clone, PartialEq)]
pub struct Baseline {
    pub id: String,
    pub key: BaselineKey,
    /// SVG path data
    pub d: String,
    /// Where the text starts; after the end when the flow is flipped
    pub start: Angle,
    pub end: Angle,
    pub radius: Px,
}

impl Baseline {
    pub fn is_reversed(&self) -> bool {
        self.start > self.end
    }
}

/// Definition pool for baselines, in creation order.
#[derive(Debug, Clone, Default)]
pub struct BaselineRegistry {
    baselines: Vec<Baseline>,
    index: HashMap<BaselineKey, usize>,
}

impl BaselineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the baseline for `key` without registering it.
    pub fn build(key: BaselineKey, node: &HierarchyNode, geometry: &Geometry<'_>) -> Baseline {
        let config = geometry.config();
        let mut start = geometry.start_angle(node.depth, node.x0);
        let mut end = geometry.end_angle(node.depth, node.x1);
        if geometry.is_orientation_flipped(node.depth, node.x0, node.x1) {
            std::mem::swap(&mut start, &mut end);
        }
        let radius = geometry.relative_radius(node.depth, text_offset(geometry, node, key.run));
        let d = ArcPath::baseline(start, end, radius)
            .with_padding(config.pad_angle, config.pad_radius)
            .with_corner_radius(config.corner_radius)
            .to_path_data();
        Baseline {
            id: key.element_id(),
            key,
            d,
            start,
            end,
            radius,
        }
    }

    /// Return the id of the baseline for `key`, creating it on first use.
    pub fn ensure_baseline(
        &mut self,
        key: BaselineKey,
        node: &HierarchyNode,
        geometry: &Geometry<'_>,
    ) -> Result<String, LayoutError> {
        let baseline = Self::build(key, node, geometry);
        if let Some(&slot) = self.index.get(&key) {
            let existing = &self.baselines[slot];
            if existing.d != baseline.d {
                return Err(LayoutError::BaselineCollision {
                    id: existing.id.clone(),
                    existing: existing.d.clone(),
                    requested: baseline.d,
                });
            }
            trace!(id = %existing.id, "reusing baseline");
            return Ok(existing.id.clone());
        }

        trace!(id = %baseline.id, radius = baseline.radius.raw(), "registering baseline");
        let id = baseline.id.clone();
        self.index.insert(key, self.baselines.len());
        self.baselines.push(baseline);
        Ok(id)
    }

    pub fn get(&self, key: &BaselineKey) -> Option<&Baseline> {
        self.index.get(key).map(|&slot| &self.baselines[slot])
    }

    pub fn contains(&self, key: &BaselineKey) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.baselines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.baselines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Baseline> {
        self.baselines.iter()
    }

    /// Drop every baseline, e.g. before laying out a new hierarchy.
    pub fn clear(&mut self) {
        self.baselines.clear();
        self.index.clear();
    }
}
