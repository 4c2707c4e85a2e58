//! Polar geometry of the fan: partition coordinate -> angle, depth -> radius.
//!
//! Angles follow the SVG arc convention used throughout the chart: 0 points
//! to 12 o'clock and angles grow clockwise, so a point at `(angle, radius)`
//! sits at `x = r * sin(a)`, `y = -r * cos(a)` (SVG y points down).
//!
//! Everything here is a pure function of its arguments and the configuration.

use glam::{DVec2, dvec2};

use crate::config::Configuration;
use crate::hierarchy::HierarchyNode;
use crate::types::{Angle, Px};

/// Geometry helpers bound to one configuration.
#[derive(Debug, Clone, Copy)]
pub struct Geometry<'a> {
    config: &'a Configuration,
}

impl<'a> Geometry<'a> {
    pub fn new(config: &'a Configuration) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &'a Configuration {
        self.config
    }

    /// Map a partition coordinate onto the fan's angular range.
    pub fn scale(&self, x: f64) -> Angle {
        let start = self.config.start_pi();
        let end = self.config.end_pi();
        Angle(start.radians() + x * (end.radians() - start.radians()))
    }

    /// Start angle of a slice. The center node is always a full circle.
    pub fn start_angle(&self, depth: u32, x0: f64) -> Angle {
        if depth == 0 {
            return Angle::ZERO;
        }
        self.scale(x0)
            .clamp(self.config.start_pi(), self.config.end_pi())
    }

    /// End angle of a slice. The center node is always a full circle.
    pub fn end_angle(&self, depth: u32, x1: f64) -> Angle {
        if depth == 0 {
            return Angle::FULL;
        }
        self.scale(x1)
            .clamp(self.config.start_pi(), self.config.end_pi())
    }

    /// Inner edge of the ring at `depth`.
    pub fn inner_radius(&self, depth: u32) -> Px {
        let c = self.config;
        if depth == 0 {
            return Px::ZERO;
        }
        let n = c.number_of_inner_circles;
        let inner_step = c.inner_arc_height + c.circle_padding;
        if depth <= n {
            inner_step * (depth - 1) as f64 + c.center_circle_radius
        } else {
            let outer_step = c.outer_arc_height + c.circle_padding;
            inner_step * n as f64 + outer_step * (depth - n - 1) as f64 + c.center_circle_radius
        }
    }

    /// Outer edge of the ring at `depth`.
    pub fn outer_radius(&self, depth: u32) -> Px {
        let c = self.config;
        if depth == 0 {
            c.center_circle_radius
        } else if depth <= c.number_of_inner_circles {
            self.inner_radius(depth) + c.inner_arc_height
        } else {
            self.inner_radius(depth) + c.outer_arc_height
        }
    }

    /// Midpoint radius of the ring at `depth` (the center node sits at 0).
    pub fn center_radius(&self, depth: u32) -> Px {
        if depth == 0 {
            return Px::ZERO;
        }
        (self.inner_radius(depth) + self.outer_radius(depth)) / 2.0
    }

    /// Radius at `percent` between the ring's inner (0) and outer (100) edge.
    /// Values outside `[0, 100]` extrapolate beyond the ring.
    pub fn relative_radius(&self, depth: u32, percent: f64) -> Px {
        let outer = self.outer_radius(depth);
        let thickness = outer - self.inner_radius(depth);
        outer - thickness * ((100.0 - percent) / 100.0)
    }

    /// Length of the node's arc at a radial offset, before any padding.
    pub fn arc_length(&self, node: &HierarchyNode, percent: f64) -> Px {
        let span = self.end_angle(node.depth, node.x1) - self.start_angle(node.depth, node.x0);
        span * self.relative_radius(node.depth, percent)
    }

    /// Whether curved labels of this slice run reversed for readability.
    ///
    /// Only full-circle charts flip, and only beyond the first ring: a slice
    /// lying entirely within [90°, 180°] or [-180°, -90°] would otherwise
    /// read upside down.
    pub fn is_orientation_flipped(&self, depth: u32, x0: f64, x1: f64) -> bool {
        if !self.config.is_full_circle() || depth <= 1 {
            return false;
        }
        let start = self.start_angle(depth, x0).degrees();
        let end = self.end_angle(depth, x1).degrees();
        (start >= 90.0 && end <= 180.0) || (start >= -180.0 && end <= -90.0)
    }

    /// Cartesian point for a polar coordinate.
    pub fn point_at(angle: Angle, radius: Px) -> DVec2 {
        let (sin, cos) = angle.radians().sin_cos();
        dvec2(radius.raw() * sin, -radius.raw() * cos)
    }

    /// Polar coordinate of a cartesian point, angle in `(-PI, PI]`.
    pub fn locate(point: DVec2) -> (Angle, Px) {
        (Angle(point.x.atan2(-point.y)), Px(point.length()))
    }
}
