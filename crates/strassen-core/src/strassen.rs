//! Strassen's recursive matrix multiplication with a milestone trace.
//!
//! Seven half-size products replace the eight of the textbook block product,
//! giving `O(n^log2(7)) ≈ O(n^2.807)` scalar multiplications. Sums and
//! products wrap in two's complement, so intermediates such as `A11 + A22`
//! never panic. The result equals [`multiply_naive`](crate::multiply_naive)
//! element for element and is exact whenever the true product fits in `i64`.
//!
//! Per level (`h = n / 2`):
//!
//! | product | formula |
//! |---|---|
//! | M1 | (A11 + A22)(B11 + B22) |
//! | M2 | (A21 + A22) B11 |
//! | M3 | A11 (B12 − B22) |
//! | M4 | A22 (B21 − B11) |
//! | M5 | (A11 + A12) B22 |
//! | M6 | (A21 − A11)(B11 + B12) |
//! | M7 | (A12 − A22)(B21 + B22) |
//!
//! and `C11 = M1 + M4 − M5 + M7`, `C12 = M3 + M5`, `C21 = M2 + M4`,
//! `C22 = M1 − M2 + M3 + M6`.
//!
//! Trace order is depth first: `Divide`, `Products`, the subtrees of M1..M7,
//! then `Combine`. The top level adds `Start` and `Complete` around it.

use crate::error::{DimensionError, MatrixError};
use crate::matrix::{combine, join, Matrix, Sign, View};
use crate::trace::{Step, Trace};
use tracing::debug;

/// Check that `a` and `b` are equal-size with a power-of-two dimension.
///
/// Returns the shared dimension.
pub fn validate(a: &Matrix, b: &Matrix) -> Result<usize, DimensionError> {
    let n = a.dim();
    if n != b.dim() {
        return Err(DimensionError::Mismatch {
            left: n,
            right: b.dim(),
        });
    }
    if !n.is_power_of_two() {
        return Err(DimensionError::NotPowerOfTwo { n });
    }
    Ok(n)
}

/// Multiply two `n × n` matrices (`n` a power of two) and record the trace.
///
/// Validation runs once, before any trace entry is produced; a failing call
/// returns no partial result.
pub fn multiply(a: &Matrix, b: &Matrix) -> Result<(Matrix, Trace), MatrixError> {
    let n = validate(a, b)?;
    debug!(n, "strassen: start");

    let mut trace = Trace::new();
    trace.push(Step::Start { n });
    let c = recurse(a.view(), b.view(), &mut trace);
    trace.push(Step::Complete { n });

    debug!(n, steps = trace.len(), "strassen: done");
    Ok((c, trace))
}

/// Same as [`multiply`] but from nested rows, which are checked for
/// emptiness and squareness first.
pub fn multiply_rows<R: AsRef<[i64]>>(a: &[R], b: &[R]) -> Result<(Matrix, Trace), MatrixError> {
    let a = Matrix::from_rows(a)?;
    let b = Matrix::from_rows(b)?;
    multiply(&a, &b)
}

/// One recursion level. Operands are views of equal power-of-two dimension.
fn recurse(a: View<'_>, b: View<'_>, trace: &mut Trace) -> Matrix {
    let n = a.dim();
    if n == 1 {
        let (x, y) = (a.at(0, 0), b.at(0, 0));
        let product = x.wrapping_mul(y);
        trace.push(Step::BaseCase { a: x, b: y, product });
        return Matrix::scalar(product);
    }

    let half = n / 2;
    trace.push(Step::Divide { n, half });
    let [a11, a12, a21, a22] = a.quadrants();
    let [b11, b12, b21, b22] = b.quadrants();

    trace.push(Step::Products);
    let m1 = {
        let l = combine(a11, a22, Sign::Plus);
        let r = combine(b11, b22, Sign::Plus);
        recurse(l.view(), r.view(), trace)
    };
    let m2 = {
        let l = combine(a21, a22, Sign::Plus);
        recurse(l.view(), b11, trace)
    };
    let m3 = {
        let r = combine(b12, b22, Sign::Minus);
        recurse(a11, r.view(), trace)
    };
    let m4 = {
        let r = combine(b21, b11, Sign::Minus);
        recurse(a22, r.view(), trace)
    };
    let m5 = {
        let l = combine(a11, a12, Sign::Plus);
        recurse(l.view(), b22, trace)
    };
    let m6 = {
        let l = combine(a21, a11, Sign::Minus);
        let r = combine(b11, b12, Sign::Plus);
        recurse(l.view(), r.view(), trace)
    };
    let m7 = {
        let l = combine(a12, a22, Sign::Minus);
        let r = combine(b21, b22, Sign::Plus);
        recurse(l.view(), r.view(), trace)
    };

    trace.push(Step::Combine);
    let c11 = combine(
        combine(m1.view(), m4.view(), Sign::Plus).view(),
        combine(m7.view(), m5.view(), Sign::Minus).view(),
        Sign::Plus,
    );
    let c12 = combine(m3.view(), m5.view(), Sign::Plus);
    let c21 = combine(m2.view(), m4.view(), Sign::Plus);
    let c22 = combine(
        combine(m1.view(), m3.view(), Sign::Plus).view(),
        combine(m6.view(), m2.view(), Sign::Minus).view(),
        Sign::Plus,
    );

    join(&c11, &c12, &c21, &c22)
}
