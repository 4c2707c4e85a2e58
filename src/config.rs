//! Chart configuration, read-only for the duration of a layout pass.

use std::f64::consts::PI;

use crate::errors::ConfigError;
use crate::render::defaults;
use crate::types::{Angle, Px};

/// Numeric and geometric parameters for one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    /// Rings `1..=number_of_inner_circles` carry curved labels
    pub number_of_inner_circles: u32,
    /// Total fan opening in degrees (e.g. 180, 210, 360)
    pub fan_degree: f64,
    /// Padding angle between neighbouring arcs (radians)
    pub pad_angle: f64,
    pub pad_radius: Px,
    /// Horizontal gap the padding angle produces, subtracted from inner label widths
    pub pad_distance: Px,
    pub corner_radius: Px,
    pub center_circle_radius: Px,
    pub inner_arc_height: Px,
    pub outer_arc_height: Px,
    /// Gap between consecutive rings
    pub circle_padding: Px,
    pub text_padding: Px,
    pub color_arc_width: Px,
    /// Font scale in percent
    pub font_scale: f64,
    pub line_height: Px,
    /// Emit the generation-colored overlay in the second pass
    pub show_color_gradients: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            number_of_inner_circles: defaults::NUMBER_OF_INNER_CIRCLES,
            fan_degree: defaults::FAN_DEGREE,
            pad_angle: defaults::PAD_ANGLE,
            pad_radius: defaults::PAD_RADIUS,
            pad_distance: defaults::PAD_DISTANCE,
            corner_radius: defaults::CORNER_RADIUS,
            center_circle_radius: defaults::CENTER_CIRCLE_RADIUS,
            inner_arc_height: defaults::INNER_ARC_HEIGHT,
            outer_arc_height: defaults::OUTER_ARC_HEIGHT,
            circle_padding: defaults::CIRCLE_PADDING,
            text_padding: defaults::TEXT_PADDING,
            color_arc_width: defaults::COLOR_ARC_WIDTH,
            font_scale: defaults::FONT_SCALE,
            line_height: defaults::LINE_HEIGHT,
            show_color_gradients: false,
        }
    }
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fan_degree(mut self, fan_degree: f64) -> Self {
        self.fan_degree = fan_degree;
        self
    }

    pub fn with_inner_circles(mut self, count: u32) -> Self {
        self.number_of_inner_circles = count;
        self
    }

    pub fn with_font_scale(mut self, percent: f64) -> Self {
        self.font_scale = percent;
        self
    }

    /// Set padding angle and radius, keeping `pad_distance` in sync.
    pub fn with_padding(mut self, pad_angle: f64, pad_radius: Px) -> Self {
        self.pad_angle = pad_angle;
        self.pad_radius = pad_radius;
        self.pad_distance = pad_radius * pad_angle;
        self
    }

    pub fn with_color_gradients(mut self, enabled: bool) -> Self {
        self.show_color_gradients = enabled;
        self
    }

    /// Angle at which the fan starts (left edge)
    pub fn start_pi(&self) -> Angle {
        Angle(-self.fan_degree / 360.0 * PI)
    }

    /// Angle at which the fan ends (right edge)
    pub fn end_pi(&self) -> Angle {
        Angle(self.fan_degree / 360.0 * PI)
    }

    pub fn is_full_circle(&self) -> bool {
        self.fan_degree == 360.0
    }

    /// Check every parameter the geometry depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fan_degree > 0.0 && self.fan_degree <= 360.0) {
            return Err(ConfigError::InvalidFanDegree {
                value: self.fan_degree,
            });
        }
        if !(self.font_scale.is_finite() && self.font_scale > 0.0) {
            return Err(ConfigError::InvalidFontScale {
                value: self.font_scale,
            });
        }

        let check = |field: &'static str, value: Px, positive: bool| {
            let checked = if positive {
                Px::try_positive(value.raw())
            } else {
                Px::try_non_negative(value.raw())
            };
            checked
                .map(|_| ())
                .map_err(|source| ConfigError::InvalidLength { field, source })
        };

        check("pad_angle", Px(self.pad_angle), false)?;
        check("pad_radius", self.pad_radius, false)?;
        check("pad_distance", self.pad_distance, false)?;
        check("corner_radius", self.corner_radius, false)?;
        check("center_circle_radius", self.center_circle_radius, true)?;
        check("inner_arc_height", self.inner_arc_height, true)?;
        check("outer_arc_height", self.outer_arc_height, true)?;
        check("circle_padding", self.circle_padding, false)?;
        check("text_padding", self.text_padding, false)?;
        check("color_arc_width", self.color_arc_width, false)?;
        check("line_height", self.line_height, true)?;
        Ok(())
    }
}
