//! Default chart dimensions (all in chart units / pixels)

use crate::types::Px;

pub const NUMBER_OF_INNER_CIRCLES: u32 = 5;
pub const FAN_DEGREE: f64 = 210.0;
pub const PAD_ANGLE: f64 = 0.03;
pub const CIRCLE_PADDING: Px = Px(1.0);
pub const PAD_RADIUS: Px = Px(CIRCLE_PADDING.0 * 95.0);
pub const PAD_DISTANCE: Px = Px(PAD_ANGLE * PAD_RADIUS.0);
pub const CORNER_RADIUS: Px = Px(0.0);
pub const CENTER_CIRCLE_RADIUS: Px = Px(85.0);
pub const INNER_ARC_HEIGHT: Px = Px(85.0);
pub const OUTER_ARC_HEIGHT: Px = Px(110.0);
pub const COLOR_ARC_WIDTH: Px = Px(5.0);
pub const TEXT_PADDING: Px = Px(8.0);
/// Percent
pub const FONT_SCALE: f64 = 100.0;
pub const LINE_HEIGHT: Px = Px(14.0);
pub const FONT_SIZE: Px = Px(14.0);
