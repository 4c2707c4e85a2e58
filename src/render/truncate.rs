//! Fitting text runs into the space their arc offers.
//!
//! Non-preferred segments shrink first, in order, then preferred ones. A
//! segment shrinks to its first character plus a period, or disappears when
//! the run hides on overflow (dates). Shrinking stops as soon as the run
//! fits.

use crate::log::warn;
use crate::measure::TextMeasure;
use crate::types::Px;

use super::label::TextRun;

/// What fitting did to a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitOutcome {
    /// Fit without changes
    #[default]
    Fits,
    /// Fit after shrinking some segments
    Truncated,
    /// Still too wide with every segment shrunk; rendered as is
    Overflow,
}

/// Total measured width of a run's segment texts.
pub fn run_width(run: &TextRun, measure: &dyn TextMeasure) -> Px {
    run.segments
        .iter()
        .map(|segment| measure.text_width(&segment.text))
        .sum()
}

/// Shortened form of a segment, `None` if it cannot get any shorter.
fn shrink(text: &str, hide: bool) -> Option<String> {
    let mut chars = text.chars();
    let first = chars.next()?;
    chars.next()?;
    Some(if hide {
        String::new()
    } else {
        format!("{}.", first)
    })
}

/// Shrink segments of `run` until it fits `available`.
pub fn fit_run(run: &mut TextRun, available: Px, measure: &dyn TextMeasure) -> FitOutcome {
    let mut width = run_width(run, measure);
    if width <= available {
        return FitOutcome::Fits;
    }

    let hide = run.hide_if_overflow;
    for preferred in [false, true] {
        for slot in 0..run.segments.len() {
            if width <= available {
                break;
            }
            let segment = &mut run.segments[slot];
            if segment.preferred != preferred {
                continue;
            }
            if let Some(short) = shrink(&segment.text, hide) {
                if short != segment.text {
                    segment.text = short;
                    width = run_width(run, measure);
                }
            }
        }
    }

    if width <= available {
        FitOutcome::Truncated
    } else {
        warn!(
            run = ?run.kind,
            width = width.raw(),
            available = available.raw(),
            "text run still overflows after truncation"
        );
        FitOutcome::Overflow
    }
}
