//! Person records and the positioned hierarchy handed to the layout engine.
//!
//! The hierarchy is read-only to the engine. [`partition`] is a convenience
//! for callers that do not run their own partition layout.

use std::collections::VecDeque;
use std::fmt;

use crate::errors::LayoutError;
use crate::types::{Color, NumericError};

/// Tolerance when checking that children tile their parent's interval
const PARTITION_EPSILON: f64 = 1e-9;

/// Stable identity of a displayed person within one chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PersonId(pub u32);

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sex {
    Male,
    Female,
    #[default]
    Unknown,
}

/// Birth and death years of a person, as far as they are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lifespan {
    pub birth: Option<i32>,
    pub death: Option<i32>,
    /// Known to be dead even without a death year
    pub deceased: bool,
}

impl Lifespan {
    /// Short lifetime description shown in the date run.
    pub fn timespan(&self) -> String {
        match (self.birth, self.death) {
            (Some(b), Some(d)) => format!("{}-{}", b, d),
            (Some(b), None) => format!("Born: {}", b),
            (None, Some(d)) => format!("Died: {}", d),
            (None, None) if self.deceased => "Deceased".to_string(),
            (None, None) => String::new(),
        }
    }
}

/// Returns true if any of the names is written in a right-to-left script.
pub fn is_rtl<S: AsRef<str>>(names: &[S]) -> bool {
    names.iter().any(|name| {
        name.as_ref().chars().any(|c| {
            matches!(c as u32,
                0x0590..=0x05FF   // Hebrew
                | 0x0600..=0x06FF // Arabic
                | 0x0700..=0x074F // Syriac
                | 0x0750..=0x077F // Arabic supplement
                | 0x07C0..=0x07FF // NKo
                | 0x08A0..=0x08FF // Arabic extended-A
                | 0xFB1D..=0xFDFF // Hebrew/Arabic presentation forms
                | 0xFE70..=0xFEFF)
        })
    })
}

/// Already-normalized person data as delivered by the record store.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PersonRecord {
    pub id: PersonId,
    pub xref: String,
    pub sex: Sex,
    pub first_names: Vec<String>,
    pub last_names: Vec<String>,
    /// Also present among `first_names` when non-empty
    pub preferred_name: String,
    pub alternative_names: Vec<String>,
    pub is_alt_rtl: bool,
    pub timespan: String,
    pub marriage: Option<String>,
    pub color: Color,
    /// Gradient stops (ancestor side, descendant side)
    pub colors: (Vec<Color>, Vec<Color>),
}

fn words(names: &str) -> Vec<String> {
    names.split_whitespace().map(str::to_string).collect()
}

impl PersonRecord {
    pub fn new(id: u32, xref: impl Into<String>) -> Self {
        Self {
            id: PersonId(id),
            xref: xref.into(),
            ..Self::default()
        }
    }

    /// Given names, split on whitespace
    pub fn with_first_names(mut self, names: &str) -> Self {
        self.first_names = words(names);
        self
    }

    /// Surnames, split on whitespace
    pub fn with_last_names(mut self, names: &str) -> Self {
        self.last_names = words(names);
        self
    }

    pub fn with_preferred_name(mut self, name: impl Into<String>) -> Self {
        self.preferred_name = name.into();
        self
    }

    /// Alternative names; the RTL flag follows the script of the names.
    pub fn with_alternative_names(mut self, names: &str) -> Self {
        self.alternative_names = words(names);
        self.is_alt_rtl = is_rtl(&self.alternative_names);
        self
    }

    pub fn with_lifespan(mut self, lifespan: Lifespan) -> Self {
        self.timespan = lifespan.timespan();
        self
    }

    pub fn with_timespan(mut self, timespan: impl Into<String>) -> Self {
        self.timespan = timespan.into();
        self
    }

    pub fn with_marriage(mut self, marriage: impl Into<String>) -> Self {
        let marriage = marriage.into();
        self.marriage = (!marriage.is_empty()).then_some(marriage);
        self
    }

    pub fn with_sex(mut self, sex: Sex) -> Self {
        self.sex = sex;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn is_preferred(&self, first_name: &str) -> bool {
        !self.preferred_name.is_empty() && self.preferred_name == first_name
    }
}

/// One displayed person, positioned by generation and angular slice.
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyNode {
    /// Generation distance from the focal person (0 = center)
    pub depth: u32,
    /// Partition coordinate where the slice starts
    pub x0: f64,
    /// Partition coordinate where the slice ends
    pub x1: f64,
    pub data: PersonRecord,
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    pub fn new(depth: u32, x0: f64, x1: f64, data: PersonRecord) -> Self {
        Self {
            depth,
            x0,
            x1,
            data,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<HierarchyNode>) -> Self {
        self.children = children;
        self
    }

    pub fn id(&self) -> PersonId {
        self.data.id
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Midpoint of the partition interval
    pub fn mid(&self) -> f64 {
        self.x0 + (self.x1 - self.x0) / 2.0
    }

    /// All nodes in breadth-first order, starting with `self`.
    pub fn descendants(&self) -> Vec<&HierarchyNode> {
        let mut out = Vec::new();
        let mut queue = VecDeque::from([self]);
        while let Some(node) = queue.pop_front() {
            out.push(node);
            queue.extend(node.children.iter());
        }
        out
    }

    /// Check the geometry inputs of a single node.
    pub fn validate_geometry(&self) -> Result<(), LayoutError> {
        let finite = |field: &'static str, value: f64| {
            let checked = if value.is_nan() {
                Err(NumericError::NaN)
            } else if value.is_infinite() {
                Err(NumericError::Infinite)
            } else {
                Ok(())
            };
            checked.map_err(|source| LayoutError::MissingGeometryInput {
                person: self.id(),
                field,
                source,
            })
        };
        finite("x0", self.x0)?;
        finite("x1", self.x1)?;
        if self.x0 >= self.x1 {
            return Err(LayoutError::InvalidAngularInterval {
                person: self.id(),
                x0: self.x0,
                x1: self.x1,
            });
        }
        Ok(())
    }

    /// Check the whole tree: node geometry plus the partition invariant.
    pub fn validate(&self) -> Result<(), LayoutError> {
        self.validate_geometry()?;
        if self.children.is_empty() {
            return Ok(());
        }

        let gap = |reason: String| LayoutError::PartitionGap {
            person: self.id(),
            reason,
        };
        let mut cursor = self.x0;
        for child in &self.children {
            child.validate_geometry()?;
            if child.depth != self.depth + 1 {
                return Err(gap(format!(
                    "child {} has depth {}, expected {}",
                    child.id(),
                    child.depth,
                    self.depth + 1
                )));
            }
            if (child.x0 - cursor).abs() > PARTITION_EPSILON {
                return Err(gap(format!(
                    "child {} starts at {} but the previous slice ends at {}",
                    child.id(),
                    child.x0,
                    cursor
                )));
            }
            cursor = child.x1;
        }
        if (cursor - self.x1).abs() > PARTITION_EPSILON {
            return Err(gap(format!(
                "children end at {} but the slice ends at {}",
                cursor, self.x1
            )));
        }
        for child in &self.children {
            child.validate()?;
        }
        Ok(())
    }
}

/// Unpositioned person tree, input to [`partition`].
#[derive(Debug, Clone, PartialEq)]
pub struct PersonTree {
    pub record: PersonRecord,
    pub children: Vec<PersonTree>,
}

impl PersonTree {
    pub fn leaf(record: PersonRecord) -> Self {
        Self {
            record,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<PersonTree>) -> Self {
        self.children = children;
        self
    }
}

/// Assign depths and split every slice equally between its children.
/// The root spans `[0, 1]`.
pub fn partition(tree: PersonTree) -> HierarchyNode {
    fn place(tree: PersonTree, depth: u32, x0: f64, x1: f64) -> HierarchyNode {
        let count = tree.children.len();
        let step = (x1 - x0) / count.max(1) as f64;
        let children = tree
            .children
            .into_iter()
            .enumerate()
            .map(|(i, child)| {
                let start = x0 + step * i as f64;
                // Pin the last child to the parent's edge to avoid float drift
                let end = if i + 1 == count { x1 } else { start + step };
                place(child, depth + 1, start, end)
            })
            .collect();
        HierarchyNode::new(depth, x0, x1, tree.record).with_children(children)
    }
    place(tree, 0, 0.0, 1.0)
}
