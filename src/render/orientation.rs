//! Keeping flat labels upright.
//!
//! Curved labels are handled by reversing their baseline (see
//! [`Geometry::is_orientation_flipped`]). Flat labels of the center and the
//! outer rings are instead rotated onto the ring, fanned out per run so
//! stacked lines do not overlap.

use glam::{DVec2, dvec2};

use crate::hierarchy::HierarchyNode;
use crate::types::Px;

use super::arc::fmt_num;
use super::geometry::Geometry;

/// Fan-out of stacked runs per depth, indexed by depth. Tuned by eye.
pub const DEPTH_OFFSETS: [f64; 7] = [1.5, 6.5, 3.5, 2.2, 1.9, 1.5, 0.5];

/// Fan-out for depths beyond [`DEPTH_OFFSETS`]
pub const DEFAULT_DEPTH_OFFSET: f64 = 1.0;

pub fn depth_offset(depth: u32) -> f64 {
    DEPTH_OFFSETS
        .get(depth as usize)
        .copied()
        .unwrap_or(DEFAULT_DEPTH_OFFSET)
}

/// Map run `index` of `count` linearly onto `[-depth_offset, depth_offset]`.
/// A single run sits in the middle.
pub fn map_index_to_offset(depth: u32, index: usize, count: usize) -> f64 {
    let offset = depth_offset(depth);
    if count < 2 {
        return 0.0;
    }
    -offset + 2.0 * offset * index as f64 / (count - 1) as f64
}

/// Placement of one flat text run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextTransform {
    /// Vertical shift only (center label)
    Offset { dy: Px },
    /// Rotate by `rotate` degrees, then move `translate` along the rotated x axis
    Rotate { rotate: f64, translate: Px },
}

impl TextTransform {
    /// Value of the SVG `transform` attribute.
    pub fn to_svg_attr(&self) -> String {
        match self {
            TextTransform::Offset { dy } => format!("translate(0,{})", fmt_num(dy.raw())),
            TextTransform::Rotate { rotate, translate } => format!(
                "rotate({}) translate({})",
                fmt_num(*rotate),
                fmt_num(translate.raw())
            ),
        }
    }

    /// Where the text origin ends up in chart coordinates.
    pub fn anchor(&self) -> DVec2 {
        match self {
            TextTransform::Offset { dy } => dvec2(0.0, dy.raw()),
            TextTransform::Rotate { rotate, translate } => {
                DVec2::from_angle(rotate.to_radians()).rotate(dvec2(translate.raw(), 0.0))
            }
        }
    }
}

/// Transforms for `count` stacked flat runs of `node`, in run order.
pub fn transform_outer_text(
    node: &HierarchyNode,
    count: usize,
    geometry: &Geometry<'_>,
) -> Vec<TextTransform> {
    let config = geometry.config();
    let scale = config.font_scale / 100.0;

    (0..count)
        .map(|index| {
            let offset = map_index_to_offset(node.depth, index, count) * scale;
            if node.depth == 0 {
                return TextTransform::Offset {
                    dy: config.line_height * offset + config.line_height / 2.0,
                };
            }

            let angle = geometry.scale(node.mid()).degrees();
            let distance = geometry.center_radius(node.depth) - config.color_arc_width / 2.0;
            if angle > 0.0 {
                TextTransform::Rotate {
                    rotate: angle + offset - 90.0,
                    translate: distance,
                }
            } else {
                TextTransform::Rotate {
                    rotate: angle - offset + 90.0,
                    translate: -distance,
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Configuration;
    use crate::hierarchy::PersonRecord;

    fn node(depth: u32, x0: f64, x1: f64) -> HierarchyNode {
        HierarchyNode::new(depth, x0, x1, PersonRecord::new(1, "I1"))
    }

    #[test]
    fn depth_offsets_fall_back_beyond_the_table() {
        assert_eq!(depth_offset(0), 1.5);
        assert_eq!(depth_offset(1), 6.5);
        assert_eq!(depth_offset(6), 0.5);
        assert_eq!(depth_offset(7), 1.0);
        assert_eq!(depth_offset(40), 1.0);
    }

    #[test]
    fn index_maps_onto_symmetric_range() {
        assert_eq!(map_index_to_offset(2, 0, 3), -3.5);
        assert_eq!(map_index_to_offset(2, 1, 3), 0.0);
        assert_eq!(map_index_to_offset(2, 2, 3), 3.5);
        assert_eq!(map_index_to_offset(0, 1, 2), 1.5);
        assert_eq!(map_index_to_offset(5, 0, 1), 0.0);
    }

    #[test]
    fn center_runs_stack_vertically() {
        let config = Configuration::default();
        let g = Geometry::new(&config);
        let transforms = transform_outer_text(&node(0, 0.0, 1.0), 3, &g);
        assert_eq!(
            transforms,
            vec![
                TextTransform::Offset { dy: Px(-14.0) },
                TextTransform::Offset { dy: Px(7.0) },
                TextTransform::Offset { dy: Px(28.0) },
            ]
        );
    }

    #[test]
    fn font_scale_widens_the_fan_out() {
        let config = Configuration::default().with_font_scale(200.0);
        let g = Geometry::new(&config);
        let transforms = transform_outer_text(&node(0, 0.0, 1.0), 2, &g);
        // -1.5 * 2 * 14 + 7
        assert_eq!(transforms[0], TextTransform::Offset { dy: Px(-35.0) });
    }

    #[test]
    fn right_half_rotates_outwards() {
        let config = Configuration::default().with_fan_degree(360.0);
        let g = Geometry::new(&config);
        // mid = 0.75 -> 90°
        let transforms = transform_outer_text(&node(7, 0.5, 1.0), 1, &g);
        let distance = g.center_radius(7) - Px(2.5);
        match transforms[0] {
            TextTransform::Rotate { rotate, translate } => {
                assert!(rotate.abs() < 1e-9);
                assert_eq!(translate, distance);
            }
            other => panic!("unexpected transform {:?}", other),
        }
        assert_eq!(
            transforms[0].to_svg_attr(),
            format!("rotate(0) translate({})", fmt_num(distance.raw()))
        );
    }

    #[test]
    fn left_half_translates_inwards() {
        let config = Configuration::default().with_fan_degree(360.0);
        let g = Geometry::new(&config);
        // mid = 0.25 -> -90°
        let transforms = transform_outer_text(&node(7, 0.2, 0.3), 1, &g);
        match transforms[0] {
            TextTransform::Rotate { rotate, translate } => {
                assert!(rotate.abs() < 1e-9);
                assert_eq!(translate, -(g.center_radius(7) - Px(2.5)));
            }
            other => panic!("unexpected transform {:?}", other),
        }
    }

    #[test]
    fn rotated_text_lands_on_the_ring() {
        let config = Configuration::default().with_fan_degree(360.0);
        let g = Geometry::new(&config);
        for (x0, x1) in [(0.05, 0.1), (0.3, 0.35), (0.55, 0.6), (0.9, 0.95)] {
            let n = node(8, x0, x1);
            let anchor = transform_outer_text(&n, 1, &g)[0].anchor();
            let (angle, radius) = Geometry::locate(anchor);
            assert!((radius.raw() - (g.center_radius(8).raw() - 2.5)).abs() < 1e-9);
            assert!((angle.radians() - g.scale(n.mid()).radians()).abs() < 1e-9);
        }
    }

    #[test]
    fn stacked_outer_runs_fan_around_the_middle() {
        let config = Configuration::default().with_fan_degree(360.0);
        let g = Geometry::new(&config);
        let transforms = transform_outer_text(&node(6, 0.6, 0.62), 3, &g);
        let rotations: Vec<f64> = transforms
            .iter()
            .map(|t| match t {
                TextTransform::Rotate { rotate, .. } => *rotate,
                TextTransform::Offset { .. } => f64::NAN,
            })
            .collect();
        assert!((rotations[1] - rotations[0] - 0.5).abs() < 1e-9);
        assert!((rotations[2] - rotations[1] - 0.5).abs() < 1e-9);
    }
}
