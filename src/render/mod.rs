//! Chart layout and SVG rendering
//!
//! This module is organized into submodules:
//! - `defaults`: Default sizes and settings
//! - `geometry`: Angles and radii of the rings
//! - `arc`: Ring slice path data
//! - `baseline`: Curved text guides, one per person and run
//! - `label`: Composition of text runs per person
//! - `truncate`: Fitting runs into the available width
//! - `orientation`: Keeping flat labels upright
//! - `chart`: Layout driver and the laid-out chart
//! - `svg`: SVG generation

pub mod arc;
pub mod baseline;
pub mod chart;
pub mod defaults;
pub mod geometry;
pub mod label;
pub mod orientation;
pub mod svg;
pub mod truncate;

// Re-export commonly used items
pub use arc::ArcPath;
pub use baseline::{Baseline, BaselineKey, BaselineRegistry};
pub use chart::{ChartLayout, ColorArc, FanChart, PersonLayout};
pub use geometry::Geometry;
pub use label::{CurvedLabel, FlatLabel, Label, LabelComposer, LabelRuns, RunKind, Segment, TextRun};
pub use orientation::{TextTransform, transform_outer_text};
pub use svg::generate_svg;
pub use truncate::{FitOutcome, fit_run};
