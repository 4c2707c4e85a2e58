//! Annular sector path generation.
//!
//! Produces SVG path data for a ring slice between two radii and two angles,
//! with optional pad angle and corner radius. Angles are clockwise from
//! 12 o'clock; a start angle greater than the end angle draws the slice
//! counter-clockwise, which reverses text flowing along it.
//!
//! The output matches the path data a d3 `arc()` generator emits, so the
//! zero-thickness text baselines behave the same in a browser: the path runs
//! out along the outer radius and back along the inner one.

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt::Write;

use glam::{DVec2, dvec2};

use crate::types::{Angle, Px};

const EPSILON: f64 = 1e-12;

/// Format a path coordinate: at most 3 decimals, trailing zeros trimmed.
pub(crate) fn fmt_num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 || !rounded.is_finite() {
        return "0".to_string();
    }
    format!("{}", rounded)
}

/// Incremental SVG path data writer.
#[derive(Debug, Default)]
pub struct PathData {
    d: String,
    /// Current point, `None` until the first move
    cursor: Option<DVec2>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_point(&mut self, p: DVec2) {
        let _ = write!(self.d, "{},{}", fmt_num(p.x), fmt_num(p.y));
    }

    pub fn move_to(&mut self, p: DVec2) {
        self.d.push('M');
        self.push_point(p);
        self.cursor = Some(p);
    }

    pub fn line_to(&mut self, p: DVec2) {
        self.d.push('L');
        self.push_point(p);
        self.cursor = Some(p);
    }

    /// Circular arc around `center` from math angle `a0` to `a1`
    /// (0 = 3 o'clock, y down), counter-clockwise when `ccw` is set.
    pub fn arc(&mut self, center: DVec2, r: f64, a0: f64, a1: f64, ccw: bool) {
        let delta = r * dvec2(a0.cos(), a0.sin());
        let start = center + delta;
        let sweep = if ccw { 0 } else { 1 };
        let mut da = if ccw { a0 - a1 } else { a1 - a0 };

        match self.cursor {
            None => self.move_to(start),
            Some(p) if (p - start).abs().max_element() > 1e-6 => self.line_to(start),
            Some(_) => {}
        }

        if r == 0.0 {
            return;
        }
        if da < 0.0 {
            da = da % TAU + TAU;
        }

        let r_s = fmt_num(r);
        if da > TAU - 1e-6 {
            // Full circle: two half arcs through the antipode
            let mid = center - delta;
            let _ = write!(self.d, "A{r_s},{r_s},0,1,{sweep},");
            self.push_point(mid);
            let _ = write!(self.d, "A{r_s},{r_s},0,1,{sweep},");
            self.push_point(start);
            self.cursor = Some(start);
        } else if da > 1e-6 {
            let end = center + r * dvec2(a1.cos(), a1.sin());
            let large = if da >= PI { 1 } else { 0 };
            let _ = write!(self.d, "A{r_s},{r_s},0,{large},{sweep},");
            self.push_point(end);
            self.cursor = Some(end);
        }
    }

    pub fn close(&mut self) {
        self.d.push('Z');
    }

    pub fn finish(self) -> String {
        self.d
    }
}

fn intersect(p0: DVec2, p1: DVec2, p2: DVec2, p3: DVec2) -> Option<DVec2> {
    let d10 = p1 - p0;
    let d32 = p3 - p2;
    let t = d32.y * d10.x - d32.x * d10.y;
    if t * t < EPSILON {
        return None;
    }
    let t = (d32.x * (p0.y - p2.y) - d32.y * (p0.x - p2.x)) / t;
    Some(p0 + t * d10)
}

/// Corner circle tangent to a ring edge and a radial edge.
struct CornerTangent {
    center: DVec2,
    /// Tangent point on the radial edge, relative to `center`
    radial: DVec2,
    /// Tangent point on the ring, relative to `center`
    ring: DVec2,
}

fn corner_tangents(p0: DVec2, p1: DVec2, r1: f64, rc: f64, cw: bool) -> CornerTangent {
    let d01 = p0 - p1;
    let lo = (if cw { rc } else { -rc }) / d01.length();
    let o = dvec2(lo * d01.y, -lo * d01.x);
    let p11 = p0 + o;
    let p10 = p1 + o;
    let mid = (p11 + p10) / 2.0;
    let d = p10 - p11;
    let d2 = d.length_squared();
    let r = r1 - rc;
    let cross = p11.x * p10.y - p10.x * p11.y;
    let sign = if d.y < 0.0 { -1.0 } else { 1.0 };
    let disc = sign * (r * r * d2 - cross * cross).max(0.0).sqrt();
    let mut c0 = dvec2(cross * d.y - d.x * disc, -cross * d.x - d.y * disc) / d2;
    let c1 = dvec2(cross * d.y + d.x * disc, -cross * d.x + d.y * disc) / d2;
    if (c0 - mid).length_squared() > (c1 - mid).length_squared() {
        c0 = c1;
    }
    CornerTangent {
        center: c0,
        radial: -o,
        ring: c0 * (r1 / r - 1.0),
    }
}

fn angle_of(v: DVec2) -> f64 {
    v.y.atan2(v.x)
}

/// Ring slice description; call [`ArcPath::to_path_data`] to render it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPath {
    pub start: Angle,
    pub end: Angle,
    pub inner_radius: Px,
    pub outer_radius: Px,
    /// Total padding angle between neighbouring slices
    pub pad_angle: f64,
    /// Radius at which the pad angle is measured; `None` uses
    /// `sqrt(inner² + outer²)`
    pub pad_radius: Option<Px>,
    pub corner_radius: Px,
}

impl ArcPath {
    pub fn new(start: Angle, end: Angle, inner_radius: Px, outer_radius: Px) -> Self {
        Self {
            start,
            end,
            inner_radius,
            outer_radius,
            pad_angle: 0.0,
            pad_radius: None,
            corner_radius: Px::ZERO,
        }
    }

    /// Zero-thickness arc, used as a text baseline.
    pub fn baseline(start: Angle, end: Angle, radius: Px) -> Self {
        Self::new(start, end, radius, radius)
    }

    pub fn with_padding(mut self, pad_angle: f64, pad_radius: Px) -> Self {
        self.pad_angle = pad_angle;
        self.pad_radius = Some(pad_radius);
        self
    }

    pub fn with_corner_radius(mut self, corner_radius: Px) -> Self {
        self.corner_radius = corner_radius;
        self
    }

    /// Corner radius actually applied: never more than half the thickness.
    pub fn effective_corner_radius(&self) -> Px {
        ((self.outer_radius - self.inner_radius).abs() / 2.0).min(self.corner_radius)
    }

    pub fn to_path_data(&self) -> String {
        let mut path = PathData::new();
        let (mut r0, mut r1) = (self.inner_radius.raw(), self.outer_radius.raw());
        if r1 < r0 {
            std::mem::swap(&mut r0, &mut r1);
        }
        let a0 = self.start.radians() - FRAC_PI_2;
        let a1 = self.end.radians() - FRAC_PI_2;
        let da = (a1 - a0).abs();
        let cw = a1 > a0;
        let origin = DVec2::ZERO;
        let polar = |r: f64, a: f64| dvec2(r * a.cos(), r * a.sin());

        if r1 <= EPSILON {
            path.move_to(origin);
        } else if da > TAU - EPSILON {
            path.move_to(polar(r1, a0));
            path.arc(origin, r1, a0, a1, !cw);
            if r0 > EPSILON {
                path.move_to(polar(r0, a1));
                path.arc(origin, r0, a1, a0, cw);
            }
        } else {
            let (mut a01, mut a11, mut a00, mut a10) = (a0, a1, a0, a1);
            let (mut da0, mut da1) = (da, da);
            let ap = self.pad_angle / 2.0;
            let rp = if ap > EPSILON {
                self.pad_radius
                    .map(Px::raw)
                    .unwrap_or_else(|| (r0 * r0 + r1 * r1).sqrt())
            } else {
                0.0
            };
            let rc = self.effective_corner_radius().raw();
            let (mut rc0, mut rc1) = (rc, rc);

            if rp > EPSILON {
                let dir = if cw { 1.0 } else { -1.0 };
                let p0 = if r0 > EPSILON {
                    (rp / r0 * ap.sin()).clamp(-1.0, 1.0).asin()
                } else {
                    0.0
                };
                let p1 = (rp / r1 * ap.sin()).clamp(-1.0, 1.0).asin();
                da0 -= p0 * 2.0;
                if da0 > EPSILON {
                    a00 += p0 * dir;
                    a10 -= p0 * dir;
                } else {
                    da0 = 0.0;
                    a00 = (a0 + a1) / 2.0;
                    a10 = a00;
                }
                da1 -= p1 * 2.0;
                if da1 > EPSILON {
                    a01 += p1 * dir;
                    a11 -= p1 * dir;
                } else {
                    da1 = 0.0;
                    a01 = (a0 + a1) / 2.0;
                    a11 = a01;
                }
            }

            let p01 = polar(r1, a01);
            let p10 = polar(r0, a10);
            let p11 = polar(r1, a11);
            let p00 = polar(r0, a00);

            if rc > EPSILON && da < PI {
                match intersect(p01, p00, p11, p10) {
                    Some(oc) => {
                        let a = p01 - oc;
                        let b = p11 - oc;
                        let cos = (a.dot(b) / (a.length() * b.length())).clamp(-1.0, 1.0);
                        let kc = 1.0 / (cos.acos() / 2.0).sin();
                        let lc = oc.length();
                        rc0 = rc.min((r0 - lc) / (kc - 1.0));
                        rc1 = rc.min((r1 - lc) / (kc + 1.0));
                    }
                    None => {
                        rc0 = 0.0;
                        rc1 = 0.0;
                    }
                }
            }

            // Outer ring
            if da1 <= EPSILON {
                path.move_to(p01);
            } else if rc1 > EPSILON {
                let t0 = corner_tangents(p00, p01, r1, rc1, cw);
                let t1 = corner_tangents(p11, p10, r1, rc1, cw);
                path.move_to(t0.center + t0.radial);
                if rc1 < rc {
                    path.arc(t0.center, rc1, angle_of(t0.radial), angle_of(t1.radial), !cw);
                } else {
                    path.arc(t0.center, rc1, angle_of(t0.radial), angle_of(t0.ring), !cw);
                    path.arc(
                        origin,
                        r1,
                        angle_of(t0.center + t0.ring),
                        angle_of(t1.center + t1.ring),
                        !cw,
                    );
                    path.arc(t1.center, rc1, angle_of(t1.ring), angle_of(t1.radial), !cw);
                }
            } else {
                path.move_to(p01);
                path.arc(origin, r1, a01, a11, !cw);
            }

            // Inner ring, drawn back towards the start
            if r0 <= EPSILON || da0 <= EPSILON {
                path.line_to(p10);
            } else if rc0 > EPSILON {
                let t0 = corner_tangents(p10, p11, r0, -rc0, cw);
                let t1 = corner_tangents(p01, p00, r0, -rc0, cw);
                path.line_to(t0.center + t0.radial);
                if rc0 < rc {
                    path.arc(t0.center, rc0, angle_of(t0.radial), angle_of(t1.radial), !cw);
                } else {
                    path.arc(t0.center, rc0, angle_of(t0.radial), angle_of(t0.ring), !cw);
                    path.arc(
                        origin,
                        r0,
                        angle_of(t0.center + t0.ring),
                        angle_of(t1.center + t1.ring),
                        cw,
                    );
                    path.arc(t1.center, rc0, angle_of(t1.ring), angle_of(t1.radial), !cw);
                }
            } else {
                path.arc(origin, r0, a10, a00, cw);
            }
        }

        path.close();
        path.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_num_trims_and_normalizes() {
        assert_eq!(fmt_num(3.0), "3");
        assert_eq!(fmt_num(12.3456), "12.346");
        assert_eq!(fmt_num(-0.0001), "0");
        assert_eq!(fmt_num(-2.5), "-2.5");
    }

    #[test]
    fn quarter_ring_without_padding() {
        let d = ArcPath::new(Angle::ZERO, Angle::from_degrees(90.0), Px(10.0), Px(20.0))
            .to_path_data();
        insta::assert_snapshot!(d, @"M0,-20A20,20,0,0,1,20,0L10,0A10,10,0,0,0,0,-10Z");
    }

    #[test]
    fn baseline_goes_out_and_back_on_one_radius() {
        let d = ArcPath::baseline(Angle::ZERO, Angle::from_degrees(90.0), Px(50.0))
            .to_path_data();
        insta::assert_snapshot!(d, @"M0,-50A50,50,0,0,1,50,0A50,50,0,0,0,0,-50Z");
    }

    #[test]
    fn reversed_angles_sweep_counter_clockwise() {
        let d = ArcPath::baseline(Angle::from_degrees(90.0), Angle::ZERO, Px(50.0))
            .to_path_data();
        insta::assert_snapshot!(d, @"M50,0A50,50,0,0,0,0,-50A50,50,0,0,1,50,0Z");
    }

    #[test]
    fn full_circle_uses_two_half_arcs() {
        let d = ArcPath::new(Angle::ZERO, Angle::FULL, Px(0.0), Px(10.0)).to_path_data();
        insta::assert_snapshot!(d, @"M0,-10A10,10,0,1,1,0,10A10,10,0,1,1,0,-10Z");
    }

    #[test]
    fn large_arc_flag_for_wide_slices() {
        let d = ArcPath::baseline(Angle::from_degrees(-135.0), Angle::from_degrees(135.0), Px(10.0))
            .to_path_data();
        assert!(d.contains("A10,10,0,1,1,"), "{}", d);
    }

    #[test]
    fn padding_shrinks_the_span() {
        let plain = ArcPath::baseline(Angle::ZERO, Angle::from_degrees(90.0), Px(100.0));
        let padded = plain.with_padding(0.2, Px(100.0));
        let d = padded.to_path_data();
        // p = asin(sin(0.1)) = 0.1 rad on each side
        let start = clockwise_point(0.1, 100.0);
        assert!(d.starts_with(&format!("M{},{}", fmt_num(start.x), fmt_num(start.y))), "{}", d);
        assert_ne!(d, plain.to_path_data());
    }

    #[test]
    fn padding_larger_than_span_collapses_to_midpoint() {
        let d = ArcPath::baseline(Angle::ZERO, Angle::from_degrees(1.0), Px(100.0))
            .with_padding(0.5, Px(100.0))
            .to_path_data();
        // no arc commands, just a degenerate move/line pair
        assert!(!d.contains('A'), "{}", d);
    }

    #[test]
    fn corner_radius_is_clamped_to_half_thickness() {
        let baseline = ArcPath::baseline(Angle::ZERO, Angle::from_degrees(45.0), Px(80.0))
            .with_corner_radius(Px(5.0));
        assert_eq!(baseline.effective_corner_radius(), Px(0.0));

        let ring = ArcPath::new(Angle::ZERO, Angle::from_degrees(45.0), Px(80.0), Px(84.0))
            .with_corner_radius(Px(5.0));
        assert_eq!(ring.effective_corner_radius(), Px(2.0));
    }

    #[test]
    fn rounded_corners_add_corner_arcs() {
        let sharp = ArcPath::new(Angle::ZERO, Angle::from_degrees(60.0), Px(50.0), Px(100.0));
        let rounded = sharp.with_corner_radius(Px(5.0)).to_path_data();
        let arcs = rounded.matches('A').count();
        // four corners plus the two ring arcs
        assert_eq!(arcs, 6, "{}", rounded);
        assert!(rounded.ends_with('Z'));
    }

    #[test]
    fn zero_radius_is_a_point() {
        let d = ArcPath::new(Angle::ZERO, Angle::from_degrees(10.0), Px(0.0), Px(0.0))
            .to_path_data();
        assert_eq!(d, "M0,0Z");
    }

    fn clockwise_point(angle: f64, r: f64) -> DVec2 {
        dvec2(r * angle.sin(), -r * angle.cos())
    }
}
