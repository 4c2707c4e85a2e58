//! Label composition: which text runs a person gets, and how they are laid out.
//!
//! Persons on the inner rings get curved labels, one baseline per run.
//! The center and the outer rings get flat labels that are rotated onto the
//! ring as a block. Parents close to the center additionally get their
//! marriage date on a curved baseline just outside their ring.

use enum_dispatch::enum_dispatch;

use crate::errors::LayoutError;
use crate::hierarchy::{HierarchyNode, PersonRecord};
use crate::log::debug;
use crate::measure::TextMeasure;
use crate::types::Px;

use super::baseline::{BaselineKey, BaselineRegistry, text_offset};
use super::geometry::Geometry;
use super::orientation::{TextTransform, transform_outer_text};
use super::truncate::{FitOutcome, fit_run};

/// Spacing between consecutive segments of a run
pub const SEGMENT_SPACING_EM: f64 = 0.25;

/// Vertical nudge of every flat run
pub const FLAT_RUN_DY: Px = Px(2.0);

/// Outer rings from this depth on show one combined name line
pub const COMBINED_NAME_DEPTH: u32 = 7;

/// Outer rings below this depth also show the timespan
pub const TIMESPAN_MAX_DEPTH: u32 = 6;

/// Persons with children below this depth show their marriage date
pub const MARRIAGE_MAX_DEPTH: u32 = 5;

/// Prefix of the marriage date text
pub const MARRIAGE_SYMBOL: &str = "\u{26AD}";

/// Kind of text run; the discriminant is the run index used for baselines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RunKind {
    FirstNames = 0,
    LastNames = 1,
    AlternativeNames = 2,
    Timespan = 3,
    MarriageDate = 4,
}

impl RunKind {
    pub fn index(self) -> usize {
        self as usize
    }

    /// CSS class of the run's text element
    pub fn class(self) -> &'static str {
        match self {
            RunKind::FirstNames | RunKind::LastNames => "name",
            RunKind::AlternativeNames => "alternativeName",
            RunKind::Timespan => "date",
            RunKind::MarriageDate => "marriage-date",
        }
    }

    /// Dates disappear instead of being abbreviated
    pub fn hides_on_overflow(self) -> bool {
        matches!(self, RunKind::Timespan | RunKind::MarriageDate)
    }
}

/// One piece of a run, e.g. a single given name.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub text: String,
    pub preferred: bool,
    /// Horizontal spacing before this segment, in em
    pub dx_em: f64,
}

impl Segment {
    pub fn new(text: impl Into<String>, preferred: bool) -> Self {
        Self {
            text: text.into(),
            preferred,
            dx_em: 0.0,
        }
    }

    pub fn with_dx(mut self, dx_em: f64) -> Self {
        self.dx_em = dx_em;
        self
    }
}

/// A line of text made of segments.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub kind: RunKind,
    pub segments: Vec<Segment>,
    pub hide_if_overflow: bool,
    pub rtl: bool,
    /// Baseline id for curved runs
    pub baseline: Option<String>,
    /// Vertical nudge for flat runs
    pub dy: Option<Px>,
    pub available_width: Px,
    pub fit: FitOutcome,
}

impl TextRun {
    pub fn new(kind: RunKind, segments: Vec<Segment>) -> Self {
        Self {
            kind,
            segments,
            hide_if_overflow: false,
            rtl: false,
            baseline: None,
            dy: None,
            available_width: Px::ZERO,
            fit: FitOutcome::Fits,
        }
    }

    pub fn hide_if_overflow(mut self) -> Self {
        self.hide_if_overflow = true;
        self
    }

    /// Concatenated segment texts, separated by single spaces
    pub fn text(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(|s| s.text.is_empty())
    }
}

/// Common access to the runs of a label.
#[enum_dispatch]
pub trait LabelRuns {
    fn runs(&self) -> &[TextRun];

    fn is_curved(&self) -> bool;

    fn text(&self) -> Vec<String> {
        self.runs().iter().map(TextRun::text).collect()
    }
}

/// Runs following their own baselines.
#[derive(Debug, Clone, PartialEq)]
pub struct CurvedLabel {
    pub runs: Vec<TextRun>,
}

impl LabelRuns for CurvedLabel {
    fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    fn is_curved(&self) -> bool {
        true
    }
}

/// Straight runs, each placed by its own transform.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatLabel {
    pub runs: Vec<TextRun>,
    /// One per run
    pub transforms: Vec<TextTransform>,
}

impl LabelRuns for FlatLabel {
    fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    fn is_curved(&self) -> bool {
        false
    }
}

#[enum_dispatch(LabelRuns)]
#[derive(Debug, Clone, PartialEq)]
pub enum Label {
    CurvedLabel,
    FlatLabel,
}

fn new_run(kind: RunKind, segments: Vec<Segment>) -> TextRun {
    let mut run = TextRun::new(kind, segments);
    run.hide_if_overflow = kind.hides_on_overflow();
    run
}

/// One segment per name, spaced apart, preferred name tagged.
fn names_run(kind: RunKind, names: &[String], record: &PersonRecord) -> TextRun {
    let segments = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let dx = if i == 0 { 0.0 } else { SEGMENT_SPACING_EM };
            Segment::new(name.as_str(), record.is_preferred(name)).with_dx(dx)
        })
        .collect();
    new_run(kind, segments)
}

fn single_segment(text: &str) -> Vec<Segment> {
    if text.is_empty() {
        Vec::new()
    } else {
        vec![Segment::new(text, false)]
    }
}

/// Builds and fits the labels of one person.
pub struct LabelComposer<'a> {
    geometry: Geometry<'a>,
    measure: &'a dyn TextMeasure,
}

impl<'a> LabelComposer<'a> {
    pub fn new(geometry: Geometry<'a>, measure: &'a dyn TextMeasure) -> Self {
        Self { geometry, measure }
    }

    /// Inner rings carry curved labels; the center and outer rings do not.
    pub fn is_inner_label(&self, node: &HierarchyNode) -> bool {
        node.depth > 0 && node.depth <= self.geometry.config().number_of_inner_circles
    }

    /// Room for a run of `node`, padding already subtracted.
    pub fn available_width(&self, node: &HierarchyNode, run: RunKind) -> Px {
        let config = self.geometry.config();
        if node.depth > config.number_of_inner_circles {
            config.outer_arc_height - config.text_padding * 2.0 - config.circle_padding
        } else if node.depth == 0 {
            config.center_circle_radius * 2.0 - config.center_circle_radius * 0.15
        } else {
            let offset = text_offset(&self.geometry, node, run);
            self.geometry.arc_length(node, offset)
                - config.text_padding * 2.0
                - config.pad_distance / 2.0
        }
    }

    fn fit(&self, node: &HierarchyNode, run: &mut TextRun) {
        let available = self.available_width(node, run.kind);
        run.available_width = available;
        run.fit = fit_run(run, available, self.measure);
    }

    fn curved(
        &self,
        node: &HierarchyNode,
        mut runs: Vec<TextRun>,
        registry: &mut BaselineRegistry,
    ) -> Result<CurvedLabel, LayoutError> {
        for run in &mut runs {
            let key = BaselineKey::new(node.id(), run.kind);
            run.baseline = Some(registry.ensure_baseline(key, node, &self.geometry)?);
            self.fit(node, run);
        }
        Ok(CurvedLabel { runs })
    }

    fn inner_runs(&self, node: &HierarchyNode) -> Vec<TextRun> {
        let record = &node.data;
        let mut runs = vec![
            names_run(RunKind::FirstNames, &record.first_names, record),
            names_run(RunKind::LastNames, &record.last_names, record),
        ];
        if !record.alternative_names.is_empty() {
            let mut alternative =
                names_run(RunKind::AlternativeNames, &record.alternative_names, record);
            if record.is_alt_rtl {
                alternative.rtl = true;
                for segment in alternative.segments.iter_mut().skip(1) {
                    segment.dx_em = -SEGMENT_SPACING_EM;
                }
            }
            runs.push(alternative);
        }
        runs.push(new_run(RunKind::Timespan, single_segment(&record.timespan)));
        runs
    }

    fn outer_runs(&self, node: &HierarchyNode) -> Vec<TextRun> {
        let record = &node.data;
        let mut runs = if node.depth >= COMBINED_NAME_DEPTH {
            let mut combined = names_run(RunKind::FirstNames, &record.first_names, record);
            combined.segments.extend(
                record
                    .last_names
                    .iter()
                    .map(|name| Segment::new(name.as_str(), false).with_dx(SEGMENT_SPACING_EM)),
            );
            if let Some(first) = combined.segments.first_mut() {
                first.dx_em = 0.0;
            }
            vec![combined]
        } else {
            let mut runs = vec![
                names_run(RunKind::FirstNames, &record.first_names, record),
                names_run(RunKind::LastNames, &record.last_names, record),
            ];
            if node.depth < TIMESPAN_MAX_DEPTH {
                runs.push(new_run(RunKind::Timespan, single_segment(&record.timespan)));
            }
            runs
        };
        for run in &mut runs {
            run.dy = Some(FLAT_RUN_DY);
            self.fit(node, run);
        }
        runs
    }

    fn marriage_run(&self, node: &HierarchyNode) -> TextRun {
        let segments = match &node.data.marriage {
            Some(date) => vec![Segment::new(format!("{} {}", MARRIAGE_SYMBOL, date), false)],
            None => Vec::new(),
        };
        new_run(RunKind::MarriageDate, segments)
    }

    /// Labels of `node`, fitted to their available width. Curved runs
    /// register their baselines in `registry`.
    pub fn compose(
        &self,
        node: &HierarchyNode,
        registry: &mut BaselineRegistry,
    ) -> Result<Vec<Label>, LayoutError> {
        let mut labels: Vec<Label> = Vec::new();

        if self.is_inner_label(node) {
            let runs = self.inner_runs(node);
            labels.push(self.curved(node, runs, registry)?.into());
        } else {
            let runs = self.outer_runs(node);
            let transforms = transform_outer_text(node, runs.len(), &self.geometry);
            labels.push(FlatLabel { runs, transforms }.into());
        }

        if node.has_children() && node.depth < MARRIAGE_MAX_DEPTH {
            let runs = vec![self.marriage_run(node)];
            labels.push(self.curved(node, runs, registry)?.into());
        }

        debug!(
            person = %node.id(),
            depth = node.depth,
            labels = labels.len(),
            "composed labels"
        );
        Ok(labels)
    }
}
