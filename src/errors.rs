//! Error types with diagnostics using miette
//!
//! Layout errors are local precondition violations: they are surfaced to the
//! caller immediately and never retried.

use miette::Diagnostic;
use thiserror::Error;

use crate::hierarchy::PersonId;
use crate::types::NumericError;

// ============================================================================
// Configuration Errors
// ============================================================================

/// Errors raised by [`crate::Configuration::validate`]
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid fan degree: {value}")]
    #[diagnostic(
        code(fanchart::config::invalid_fan_degree),
        help("the fan must span more than 0 and at most 360 degrees")
    )]
    InvalidFanDegree { value: f64 },

    #[error("invalid length for `{field}`: {source}")]
    #[diagnostic(code(fanchart::config::invalid_length))]
    InvalidLength {
        field: &'static str,
        #[source]
        source: NumericError,
    },

    #[error("invalid font scale: {value}")]
    #[diagnostic(
        code(fanchart::config::invalid_font_scale),
        help("font scale is a percentage and must be positive")
    )]
    InvalidFontScale { value: f64 },
}

// ============================================================================
// Layout Errors
// ============================================================================

/// Errors that occur while laying out a hierarchy
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("person {person} is missing geometry input: {field} is {source}")]
    #[diagnostic(
        code(fanchart::layout::missing_geometry_input),
        help("every node needs a depth and finite partition coordinates before layout")
    )]
    MissingGeometryInput {
        person: PersonId,
        field: &'static str,
        #[source]
        source: NumericError,
    },

    #[error("person {person} has an empty angular interval [{x0}, {x1}]")]
    #[diagnostic(code(fanchart::layout::invalid_angular_interval))]
    InvalidAngularInterval { person: PersonId, x0: f64, x1: f64 },

    #[error("children of person {person} do not partition its interval: {reason}")]
    #[diagnostic(
        code(fanchart::layout::partition_gap),
        help("children must sit one generation deeper and tile the parent's slice without gaps or overlap")
    )]
    PartitionGap { person: PersonId, reason: String },

    #[error("baseline `{id}` already exists with different geometry")]
    #[diagnostic(
        code(fanchart::layout::baseline_collision),
        help("baseline ids are derived from person and run; two nodes share a person id")
    )]
    BaselineCollision {
        id: String,
        existing: String,
        requested: String,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}
