//! Chart driver: lays out every person of a hierarchy, then the color arcs.

use glam::DVec2;

use crate::config::Configuration;
use crate::errors::LayoutError;
use crate::hierarchy::{HierarchyNode, PersonId};
use crate::log::debug;
use crate::measure::{ProportionalMeasure, TextMeasure};
use crate::types::{Angle, Color, Px};

use super::arc::ArcPath;
use super::baseline::BaselineRegistry;
use super::geometry::Geometry;
use super::label::{Label, LabelComposer};

/// Extra reach of a color arc beyond the person's ring
const COLOR_ARC_OVERHANG: Px = Px(1.0);

/// Laid-out person: its slice, arc path and fitted labels.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonLayout {
    pub id: PersonId,
    /// Document id of the person's group
    pub element_id: String,
    pub depth: u32,
    pub start: Angle,
    pub end: Angle,
    pub inner_radius: Px,
    pub outer_radius: Px,
    /// SVG path data of the person's arc
    pub path: String,
    pub labels: Vec<Label>,
    pub color: Color,
}

impl PersonLayout {
    /// Whether a polar coordinate falls within this person's slice.
    pub fn contains(&self, angle: Angle, radius: Px) -> bool {
        if radius < self.inner_radius || radius > self.outer_radius {
            return false;
        }
        self.depth == 0 || (angle >= self.start && angle <= self.end)
    }
}

/// Generation-colored overlay arc, drawn after all persons exist.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorArc {
    pub person: PersonId,
    pub path: String,
    pub color: Color,
}

/// Result of one layout pass.
#[derive(Debug, Clone)]
pub struct ChartLayout {
    pub config: Configuration,
    pub persons: Vec<PersonLayout>,
    pub color_arcs: Vec<ColorArc>,
    pub baselines: BaselineRegistry,
}

impl ChartLayout {
    pub fn person(&self, id: PersonId) -> Option<&PersonLayout> {
        self.persons.iter().find(|p| p.id == id)
    }

    pub fn persons(&self) -> &[PersonLayout] {
        &self.persons
    }

    pub fn color_arcs(&self) -> &[ColorArc] {
        &self.color_arcs
    }

    pub fn baselines(&self) -> &BaselineRegistry {
        &self.baselines
    }

    /// Person whose slice contains `point` (chart coordinates, origin at
    /// the center, y down).
    pub fn hit_test(&self, point: DVec2) -> Option<&PersonLayout> {
        let (angle, radius) = Geometry::locate(point);
        self.persons.iter().find(|p| p.contains(angle, radius))
    }

    /// Radius enclosing everything drawn
    pub fn extent(&self) -> Px {
        let overhang = if self.color_arcs.is_empty() {
            Px::ZERO
        } else {
            COLOR_ARC_OVERHANG
        };
        self.persons
            .iter()
            .map(|p| p.outer_radius)
            .fold(Px::ZERO, Px::max)
            + overhang
    }
}

/// Lays out hierarchies with one configuration and text measure.
pub struct FanChart<M = ProportionalMeasure> {
    config: Configuration,
    measure: M,
}

impl FanChart<ProportionalMeasure> {
    /// Chart measuring text with the proportional width table.
    pub fn with_config(config: Configuration) -> Self {
        let measure = ProportionalMeasure::from_config(&config);
        Self::new(config, measure)
    }
}

impl<M: TextMeasure> FanChart<M> {
    pub fn new(config: Configuration, measure: M) -> Self {
        Self { config, measure }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    fn person_arc(geometry: &Geometry<'_>, node: &HierarchyNode) -> String {
        let config = geometry.config();
        let arc = ArcPath::new(
            geometry.start_angle(node.depth, node.x0),
            geometry.end_angle(node.depth, node.x1),
            geometry.inner_radius(node.depth),
            geometry.outer_radius(node.depth),
        );
        if node.depth == 0 {
            return arc.to_path_data();
        }
        arc.with_padding(config.pad_angle, config.pad_radius)
            .with_corner_radius(config.corner_radius)
            .to_path_data()
    }

    fn color_arc(geometry: &Geometry<'_>, node: &HierarchyNode) -> ColorArc {
        let config = geometry.config();
        let outer = geometry.outer_radius(node.depth);
        let path = ArcPath::new(
            geometry.start_angle(node.depth, node.x0),
            geometry.end_angle(node.depth, node.x1),
            outer - config.color_arc_width,
            outer + COLOR_ARC_OVERHANG,
        )
        .with_padding(config.pad_angle, config.pad_radius)
        .with_corner_radius(config.corner_radius)
        .to_path_data();
        ColorArc {
            person: node.id(),
            path,
            color: node.data.color.clone(),
        }
    }

    /// Lay out `root` and all its descendants.
    ///
    /// Every call starts from an empty baseline pool, so laying out a new
    /// hierarchy discards everything from the previous one.
    pub fn layout(&self, root: &HierarchyNode) -> Result<ChartLayout, LayoutError> {
        self.config.validate()?;
        root.validate()?;

        let geometry = Geometry::new(&self.config);
        let composer = LabelComposer::new(geometry, &self.measure);
        let mut baselines = BaselineRegistry::new();
        let mut persons = Vec::new();

        for node in root.descendants() {
            let labels = composer.compose(node, &mut baselines)?;
            debug!(person = %node.id(), depth = node.depth, "laid out person");
            persons.push(PersonLayout {
                id: node.id(),
                element_id: format!("person-{}", node.id()),
                depth: node.depth,
                start: geometry.start_angle(node.depth, node.x0),
                end: geometry.end_angle(node.depth, node.x1),
                inner_radius: geometry.inner_radius(node.depth),
                outer_radius: geometry.outer_radius(node.depth),
                path: Self::person_arc(&geometry, node),
                labels,
                color: node.data.color.clone(),
            });
        }

        // Second pass: only once every person exists
        let color_arcs = if self.config.show_color_gradients {
            root.descendants()
                .into_iter()
                .filter(|node| node.depth > 0)
                .map(|node| Self::color_arc(&geometry, node))
                .collect()
        } else {
            Vec::new()
        };

        debug!(
            persons = persons.len(),
            baselines = baselines.len(),
            color_arcs = color_arcs.len(),
            "chart layout complete"
        );
        Ok(ChartLayout {
            config: self.config.clone(),
            persons,
            color_arcs,
            baselines,
        })
    }
}
