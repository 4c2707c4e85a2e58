//! Geometric layout, arc-path generation and text fitting for radial
//! genealogical fan charts.
//!
//! Input is a positioned person hierarchy ([`HierarchyNode`]): every person
//! has a generation depth and an angular slice of its parent. [`FanChart`]
//! turns it into arc paths, curved text baselines and fitted labels, and
//! [`ChartLayout::to_svg`] writes the result out.
//!
//! ```
//! use fanchart::{Configuration, FanChart, PersonRecord, PersonTree, partition};
//!
//! let root = partition(PersonTree::leaf(
//!     PersonRecord::new(1, "I1").with_first_names("Ada").with_last_names("Lovelace"),
//! ));
//! let layout = FanChart::with_config(Configuration::default()).layout(&root)?;
//! assert!(layout.to_svg().contains("Lovelace"));
//! # Ok::<(), fanchart::LayoutError>(())
//! ```

pub mod config;
pub mod errors;
pub mod hierarchy;
pub mod log;
pub mod measure;
pub mod render;
pub mod types;

pub use config::Configuration;
pub use errors::{ConfigError, LayoutError};
pub use hierarchy::{HierarchyNode, Lifespan, PersonId, PersonRecord, PersonTree, Sex, is_rtl, partition};
pub use measure::{FixedWidthMeasure, ProportionalMeasure, TextMeasure};
pub use render::{ChartLayout, FanChart, FitOutcome, Geometry, Label, LabelRuns, RunKind};
pub use types::{Angle, Color, Px};

/// Lay out `root` with the proportional text measure and render it to SVG.
pub fn render_svg(root: &HierarchyNode, config: Configuration) -> Result<String, miette::Report> {
    let layout = FanChart::with_config(config).layout(root)?;
    Ok(layout.to_svg())
}
