//! Append-only milestone trace of a Strassen run.
//!
//! Each [`Step`] renders to the human-readable line a visualization frontend
//! shows, and parses back from it. A [`Trace`] only ever grows: entries are
//! appended in depth-first evaluation order and never removed or reordered, so
//! replaying it reconstructs the recursion shape.

use crate::error::ParseStepError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// One milestone of the algorithm.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    /// Top-level call accepted `n × n` inputs.
    Start {
        /// Input dimension.
        n: usize,
    },
    /// An `n × n` level splits into `half × half` quadrants.
    Divide {
        /// Dimension at this level.
        n: usize,
        /// Quadrant dimension (`n / 2`).
        half: usize,
    },
    /// The seven products M1..M7 are about to be evaluated.
    Products,
    /// 1×1 scalar product.
    BaseCase {
        /// Left scalar.
        a: i64,
        /// Right scalar.
        b: i64,
        /// `a * b`.
        product: i64,
    },
    /// C11, C12, C21, C22 are combined from the seven products.
    Combine,
    /// Top-level call finished with an `n × n` result.
    Complete {
        /// Result dimension.
        n: usize,
    },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start { n } => write!(f, "Starting Strassen multiplication for {n}x{n} matrices"),
            Self::Divide { n, half } => write!(
                f,
                "Dividing {n}x{n} matrices into {half}x{half} submatrices"
            ),
            Self::Products => f.write_str("Computing Strassen's seven multiplications (M1-M7)"),
            Self::BaseCase { a, b, product } => write!(f, "Base case: {a} * {b} = {product}"),
            Self::Combine => f.write_str("Computing result submatrices (C11, C12, C21, C22)"),
            Self::Complete { n } => write!(
                f,
                "Strassen multiplication completed. Result is {n}x{n} matrix"
            ),
        }
    }
}

/// Parse `"{n}x{n}"`, rejecting non-square shapes.
fn parse_square(s: &str) -> Option<usize> {
    let (rows, cols) = s.split_once('x')?;
    let rows: usize = rows.parse().ok()?;
    (cols.parse::<usize>().ok()? == rows).then_some(rows)
}

fn parse_base_case(s: &str) -> Option<Step> {
    let (lhs, product) = s.split_once(" = ")?;
    let (a, b) = lhs.split_once(" * ")?;
    Some(Step::BaseCase {
        a: a.parse().ok()?,
        b: b.parse().ok()?,
        product: product.parse().ok()?,
    })
}

impl FromStr for Step {
    type Err = ParseStepError;

    fn from_str(line: &str) -> Result<Self, ParseStepError> {
        let step = if let Some(rest) = line.strip_prefix("Starting Strassen multiplication for ") {
            rest.strip_suffix(" matrices")
                .and_then(parse_square)
                .map(|n| Self::Start { n })
        } else if let Some(rest) = line.strip_prefix("Dividing ") {
            rest.strip_suffix(" submatrices")
                .and_then(|r| r.split_once(" matrices into "))
                .and_then(|(n, half)| {
                    Some(Self::Divide {
                        n: parse_square(n)?,
                        half: parse_square(half)?,
                    })
                })
        } else if let Some(rest) = line.strip_prefix("Base case: ") {
            parse_base_case(rest)
        } else if let Some(rest) =
            line.strip_prefix("Strassen multiplication completed. Result is ")
        {
            rest.strip_suffix(" matrix")
                .and_then(parse_square)
                .map(|n| Self::Complete { n })
        } else if line == Self::Products.to_string() {
            Some(Self::Products)
        } else if line == Self::Combine.to_string() {
            Some(Self::Combine)
        } else {
            None
        };
        step.ok_or_else(|| ParseStepError(line.to_owned()))
    }
}

/// Ordered, append-only accumulator of [`Step`]s.
///
/// One instance belongs to one top-level multiplication and is threaded
/// through every recursive call by `&mut`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trace {
    steps: Vec<Step>,
}

impl Trace {
    /// Empty trace.
    #[must_use]
    pub const fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a milestone.
    pub fn push(&mut self, step: Step) {
        trace!(target: "strassen_core::trace", index = self.steps.len(), "{step}");
        self.steps.push(step);
    }

    /// Recorded steps, oldest first.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Iterate steps in append order.
    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    /// Render every step as its display line.
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        self.steps.iter().map(ToString::to_string).collect()
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl FromIterator<Step> for Trace {
    fn from_iter<I: IntoIterator<Item = Step>>(iter: I) -> Self {
        let mut t = Self::new();
        for step in iter {
            t.push(step);
        }
        t
    }
}

impl Extend<Step> for Trace {
    fn extend<I: IntoIterator<Item = Step>>(&mut self, iter: I) {
        for step in iter {
            self.push(step);
        }
    }
}
