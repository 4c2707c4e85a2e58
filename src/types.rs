//! Strongly-typed numeric primitives for fanchart (zero-cost newtypes).
//!
//! - Radii, widths and offsets are `Px` (chart units, the same units the
//!   text measure reports)
//! - Angles are `Angle` in radians; degrees only appear at the SVG boundary

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Length in chart units (pixels before any viewport scaling)
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Px(pub f64);

impl Px {
    pub const ZERO: Px = Px(0.0);

    /// Create a length with validation (rejects NaN/infinite)
    #[inline]
    pub fn try_new(val: f64) -> Result<Px, NumericError> {
        if val.is_nan() {
            Err(NumericError::NaN)
        } else if val.is_infinite() {
            Err(NumericError::Infinite)
        } else {
            Ok(Px(val))
        }
    }

    /// Create a non-negative length with validation
    #[inline]
    pub fn try_non_negative(val: f64) -> Result<Px, NumericError> {
        let px = Self::try_new(val)?;
        if val < 0.0 {
            Err(NumericError::Negative)
        } else {
            Ok(px)
        }
    }

    /// Create a strictly positive length with validation
    #[inline]
    pub fn try_positive(val: f64) -> Result<Px, NumericError> {
        let px = Self::try_non_negative(val)?;
        if val == 0.0 { Err(NumericError::Zero) } else { Ok(px) }
    }

    /// Get the raw value (use sparingly, prefer typed operations)
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn abs(self) -> Px {
        Px(self.0.abs())
    }

    #[inline]
    pub fn min(self, other: Px) -> Px {
        Px(self.0.min(other.0))
    }

    #[inline]
    pub fn max(self, other: Px) -> Px {
        Px(self.0.max(other.0))
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl Add for Px {
    type Output = Px;
    fn add(self, rhs: Px) -> Px { Px(self.0 + rhs.0) }
}
impl Sub for Px {
    type Output = Px;
    fn sub(self, rhs: Px) -> Px { Px(self.0 - rhs.0) }
}
impl Mul<f64> for Px {
    type Output = Px;
    fn mul(self, rhs: f64) -> Px { Px(self.0 * rhs) }
}
impl Div<f64> for Px {
    type Output = Px;
    fn div(self, rhs: f64) -> Px { Px(self.0 / rhs) }
}
impl Neg for Px {
    type Output = Px;
    fn neg(self) -> Px { Px(-self.0) }
}
impl AddAssign for Px {
    fn add_assign(&mut self, rhs: Px) {
        self.0 += rhs.0;
    }
}
impl SubAssign for Px {
    fn sub_assign(&mut self, rhs: Px) {
        self.0 -= rhs.0;
    }
}

impl std::iter::Sum for Px {
    fn sum<I: Iterator<Item = Px>>(iter: I) -> Px {
        Px(iter.map(|p| p.0).sum())
    }
}

impl fmt::Display for Px {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.0)
    }
}

/// Angle in radians, measured clockwise from 12 o'clock
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Angle(pub f64);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);
    pub const FULL: Angle = Angle(std::f64::consts::TAU);

    #[inline]
    pub fn from_degrees(deg: f64) -> Angle {
        Angle(deg.to_radians())
    }

    #[inline]
    pub fn radians(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn degrees(self) -> f64 {
        self.0.to_degrees()
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Clamp into `[lo, hi]`
    #[inline]
    pub fn clamp(self, lo: Angle, hi: Angle) -> Angle {
        Angle(self.0.min(hi.0).max(lo.0))
    }
}

impl Add for Angle {
    type Output = Angle;
    fn add(self, rhs: Angle) -> Angle { Angle(self.0 + rhs.0) }
}
impl Sub for Angle {
    type Output = Angle;
    fn sub(self, rhs: Angle) -> Angle { Angle(self.0 - rhs.0) }
}

/// Arc length: angle * radius
impl Mul<Px> for Angle {
    type Output = Px;
    fn mul(self, rhs: Px) -> Px { Px(self.0 * rhs.0) }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}rad", self.0)
    }
}

/// Person color as delivered by the record store.
#[derive(Clone, Debug, PartialEq)]
pub enum Color {
    Rgb(u8, u8, u8),
    Rgba(u8, u8, u8, u8),
    Raw(String),
}

impl Default for Color {
    fn default() -> Self {
        Color::Raw("none".to_string())
    }
}

impl FromStr for Color {
    type Err = NumericError;

    /// Accepts `#rgb`, `#rrggbb`, `rgb(r,g,b)`, `rgba(r,g,b,a)`; anything
    /// else is kept verbatim (named CSS colors, `var(..)`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            let expand = |c: u8| c * 16 + c;
            let digits: Vec<u8> = hex
                .chars()
                .map(|c| c.to_digit(16).map(|d| d as u8))
                .collect::<Option<_>>()
                .ok_or(NumericError::NaN)?;
            return match digits.as_slice() {
                [r, g, b] => Ok(Color::Rgb(expand(*r), expand(*g), expand(*b))),
                [r1, r2, g1, g2, b1, b2] => {
                    Ok(Color::Rgb(r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2))
                }
                _ => Err(NumericError::NaN),
            };
        }
        let channels = |inner: &str| -> Result<Vec<u8>, NumericError> {
            inner
                .split(',')
                .map(|part| {
                    let v: f64 = part.trim().parse().map_err(|_| NumericError::NaN)?;
                    if v < 0.0 {
                        Err(NumericError::Negative)
                    } else {
                        Ok(v.min(255.0).round() as u8)
                    }
                })
                .collect()
        };
        if let Some(inner) = s.strip_prefix("rgba(").and_then(|r| r.strip_suffix(')')) {
            return match channels(inner)?.as_slice() {
                [r, g, b, a] => Ok(Color::Rgba(*r, *g, *b, *a)),
                _ => Err(NumericError::NaN),
            };
        }
        if let Some(inner) = s.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
            return match channels(inner)?.as_slice() {
                [r, g, b] => Ok(Color::Rgb(*r, *g, *b)),
                _ => Err(NumericError::NaN),
            };
        }
        Ok(Color::Raw(s.to_string()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Raw(s) => write!(f, "{}", s),
            Color::Rgb(r, g, b) => write!(f, "rgb({},{},{})", r, g, b),
            Color::Rgba(r, g, b, a) => write!(f, "rgba({},{},{},{})", r, g, b, a),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn px_try_new_rejects_nan() {
        assert_eq!(Px::try_new(f64::NAN), Err(NumericError::NaN));
    }

    #[test]
    fn px_try_new_rejects_infinity() {
        assert_eq!(Px::try_new(f64::INFINITY), Err(NumericError::Infinite));
    }

    #[test]
    fn px_try_non_negative_rejects_negative() {
        assert_eq!(Px::try_non_negative(-1.0), Err(NumericError::Negative));
        assert_eq!(Px::try_non_negative(0.0), Ok(Px(0.0)));
    }

    #[test]
    fn px_try_positive_rejects_zero() {
        assert_eq!(Px::try_positive(0.0), Err(NumericError::Zero));
        assert_eq!(Px::try_positive(3.0), Ok(Px(3.0)));
    }

    #[test]
    fn px_arithmetic() {
        let a = Px(3.0);
        let b = Px(2.0);
        assert_eq!(a + b, Px(5.0));
        assert_eq!(a - b, Px(1.0));
        assert_eq!(a * 2.0, Px(6.0));
        assert_eq!(a / 2.0, Px(1.5));
        assert_eq!(-a, Px(-3.0));
        assert_eq!([a, b].into_iter().sum::<Px>(), Px(5.0));
    }

    #[test]
    fn angle_degree_round_trip() {
        let a = Angle::from_degrees(90.0);
        assert!((a.radians() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((a.degrees() - 90.0).abs() < 1e-12);
    }

    #[test]
    fn angle_times_radius_is_arc_length() {
        let len = Angle(std::f64::consts::PI) * Px(10.0);
        assert!((len.raw() - 10.0 * std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn color_parses_hex_and_rgb() {
        assert_eq!("#ff8000".parse::<Color>(), Ok(Color::Rgb(255, 128, 0)));
        assert_eq!("#fff".parse::<Color>(), Ok(Color::Rgb(255, 255, 255)));
        assert_eq!("rgb(1, 2, 3)".parse::<Color>(), Ok(Color::Rgb(1, 2, 3)));
        assert_eq!(
            "rgba(1,2,3,4)".parse::<Color>(),
            Ok(Color::Rgba(1, 2, 3, 4))
        );
        assert_eq!(
            "steelblue".parse::<Color>(),
            Ok(Color::Raw("steelblue".to_string()))
        );
        assert!("#12".parse::<Color>().is_err());
    }

    #[test]
    fn color_display() {
        assert_eq!(Color::Rgb(1, 2, 3).to_string(), "rgb(1,2,3)");
        assert_eq!(Color::Raw("red".into()).to_string(), "red");
    }
}
