//! strassen-core: square matrices, Strassen's algorithm, and its step trace.
//!
//! This crate defines the boundary used by the rest of the workspace:
//! - the [`Matrix`] type with its quadrant helpers ([`split`], [`join`],
//!   [`add_or_subtract`]) and the triple-loop reference [`multiply_naive`],
//! - the recursive Strassen engine ([`multiply`]) which records an ordered,
//!   append-only [`Trace`] of milestones for visualization,
//! - the method-selecting façade ([`multiply_with_method`]) and timed
//!   [`run`] reports,
//! - JSON/CBOR I/O for request pairs and reports.
//!
//! ```
//! use strassen_core::{multiply, Matrix};
//!
//! let a = Matrix::from_rows(&[[1, 2], [3, 4]])?;
//! let b = Matrix::from_rows(&[[5, 6], [7, 8]])?;
//! let (c, trace) = multiply(&a, &b)?;
//! assert_eq!(c.to_rows(), vec![vec![19, 22], vec![43, 50]]);
//! assert_eq!(trace.len(), 12);
//! # Ok::<(), strassen_core::MatrixError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
// Small, explicit allowlist to keep docs readable and APIs ergonomic.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::doc_markdown
)]

/// Dimension and method errors.
pub mod error;
/// JSON/CBOR helpers with extension-based auto-detection.
pub mod io;
/// Square matrix storage, strided views, and quadrant helpers.
pub mod matrix;
/// Method selection façade and the `Multiplier` seam.
pub mod method;
/// Timed run reports for serving layers.
pub mod report;
/// Recursive Strassen engine.
pub mod strassen;
/// Append-only milestone trace.
pub mod trace;

// ---- Re-exports for workspace compatibility ----
pub use error::*;
pub use matrix::{add_or_subtract, join, multiply_naive, split, Matrix, Sign};
pub use method::{multiply_with_method, Method, Multiplier, Strassen};
pub use report::{run, MultiplyReport, ALGORITHM};
pub use strassen::{multiply, multiply_rows, validate};
pub use trace::{Step, Trace};

/// Commonly-used items for quick imports.
///
/// ```rust
/// use strassen_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        error::{DimensionError, MatrixError},
        matrix::{Matrix, Sign},
        method::{multiply_with_method, Method, Multiplier},
        strassen::multiply,
        trace::{Step, Trace},
    };
}
