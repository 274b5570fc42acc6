//! Method façade: pick a multiplication strategy by name.
//!
//! Names match case-insensitively (surrounding whitespace ignored). Only
//! Strassen is offered today; the [`Multiplier`] trait is the seam new
//! strategies plug into.

use crate::error::MatrixError;
use crate::matrix::Matrix;
use crate::strassen;
use crate::trace::Trace;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A multiplication strategy that records its own trace.
pub trait Multiplier {
    /// Canonical lowercase name.
    fn name(&self) -> &'static str;

    /// Asymptotic cost, as listed by hosts.
    fn complexity(&self) -> &'static str;

    /// Multiply `a · b`, returning the product and the recorded trace.
    fn multiply(&self, a: &Matrix, b: &Matrix) -> Result<(Matrix, Trace), MatrixError>;
}

/// Strassen's seven-product recursion.
#[derive(Clone, Copy, Debug, Default)]
pub struct Strassen;

impl Multiplier for Strassen {
    fn name(&self) -> &'static str {
        "strassen"
    }

    fn complexity(&self) -> &'static str {
        "O(n^2.807)"
    }

    fn multiply(&self, a: &Matrix, b: &Matrix) -> Result<(Matrix, Trace), MatrixError> {
        strassen::multiply(a, b)
    }
}

/// Supported multiplication methods.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// See [`Strassen`].
    #[default]
    Strassen,
}

impl Method {
    /// Every supported method, in display order.
    pub const ALL: &'static [Self] = &[Self::Strassen];

    /// The strategy behind this method.
    #[must_use]
    pub fn multiplier(self) -> &'static dyn Multiplier {
        match self {
            Self::Strassen => &Strassen,
        }
    }

    /// Canonical lowercase name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.multiplier().name()
    }

    /// Comma-separated list of supported names.
    #[must_use]
    pub fn available() -> String {
        Self::ALL
            .iter()
            .copied()
            .map(Self::name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self, MatrixError> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| MatrixError::UnsupportedMethod {
                method: s.to_owned(),
                available: Self::available(),
            })
    }
}

/// Multiply with the strategy named by `method`.
///
/// The method name is resolved before the operands are inspected, so an
/// unknown name fails with [`MatrixError::UnsupportedMethod`] even for
/// malformed matrices.
pub fn multiply_with_method(
    a: &Matrix,
    b: &Matrix,
    method: &str,
) -> Result<(Matrix, Trace), MatrixError> {
    let method: Method = method.parse()?;
    method.multiplier().multiply(a, b)
}
