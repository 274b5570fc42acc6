//! Square matrices over `i64` and the quadrant helpers Strassen is built from.
//!
//! Storage is a flat row-major buffer. The recursion reads operand quadrants
//! through borrowed strided [`View`]s instead of copying them; only the public
//! helpers ([`split`], [`join`], [`add_or_subtract`]) hand out owned matrices.
//!
//! ## Invariants
//! - `data.len() == n * n` for every [`Matrix`].
//! - A [`View`] never reads outside its parent buffer: `offset + (n-1)*stride + n`
//!   stays within `data.len()`.

use crate::error::DimensionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// Sign applied to the right operand of [`add_or_subtract`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    /// `+1`: elementwise sum.
    Plus,
    /// `-1`: elementwise difference.
    Minus,
}

impl Sign {
    /// Numeric factor (`+1` or `-1`).
    #[inline]
    #[must_use]
    pub const fn factor(self) -> i64 {
        match self {
            Self::Plus => 1,
            Self::Minus => -1,
        }
    }

    /// Two's-complement wrapping, so intermediates may leave `i64` range.
    #[inline]
    const fn apply(self, x: i64, y: i64) -> i64 {
        match self {
            Self::Plus => x.wrapping_add(y),
            Self::Minus => x.wrapping_sub(y),
        }
    }
}

impl TryFrom<i64> for Sign {
    type Error = i64;

    /// Accepts exactly `1` or `-1`; any other value is handed back.
    fn try_from(v: i64) -> Result<Self, i64> {
        match v {
            1 => Ok(Self::Plus),
            -1 => Ok(Self::Minus),
            other => Err(other),
        }
    }
}

/// Square `n × n` matrix of `i64`, stored row-major.
///
/// Serializes as nested rows; deserialization rejects empty and ragged input.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<i64>>", into = "Vec<Vec<i64>>")]
pub struct Matrix {
    n: usize,
    data: Vec<i64>,
}

impl Matrix {
    /// All-zero `n × n` matrix.
    #[must_use]
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            data: vec![0; n * n],
        }
    }

    /// 1×1 matrix holding `v`.
    pub(crate) fn scalar(v: i64) -> Self {
        Self { n: 1, data: vec![v] }
    }

    /// `n × n` identity.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n);
        for i in 0..n {
            m.data[i * n + i] = 1;
        }
        m
    }

    /// Build from nested rows, checking that the grid is non-empty and square.
    pub fn from_rows<R: AsRef<[i64]>>(rows: &[R]) -> Result<Self, DimensionError> {
        let n = rows.len();
        if rows.first().map_or(true, |r| r.as_ref().is_empty()) {
            return Err(DimensionError::Empty);
        }
        let mut data = Vec::with_capacity(n * n);
        for (row, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != n {
                return Err(DimensionError::NotSquare {
                    row,
                    len: r.len(),
                    expected: n,
                });
            }
            data.extend_from_slice(r);
        }
        Ok(Self { n, data })
    }

    /// Build from a flat row-major buffer of exactly `n * n` elements.
    pub fn from_flat(n: usize, data: Vec<i64>) -> Result<Self, DimensionError> {
        if n == 0 {
            return Err(DimensionError::Empty);
        }
        if n.checked_mul(n) != Some(data.len()) {
            return Err(DimensionError::BadBuffer {
                n,
                len: data.len(),
            });
        }
        Ok(Self { n, data })
    }

    /// Dimension `n`.
    #[inline]
    #[must_use]
    pub const fn dim(&self) -> usize {
        self.n
    }

    /// Row-major backing buffer.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[i64] {
        &self.data
    }

    /// Element at `(row, col)`, or `None` when out of range.
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<i64> {
        (row < self.n && col < self.n).then(|| self.data[row * self.n + col])
    }

    /// Iterate rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[i64]> + '_ {
        self.data.chunks(self.n.max(1))
    }

    /// Copy out as nested rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<i64>> {
        self.rows().map(<[i64]>::to_vec).collect()
    }

    /// Borrowed view over the whole matrix.
    #[inline]
    pub(crate) fn view(&self) -> View<'_> {
        View {
            data: &self.data,
            offset: 0,
            stride: self.n,
            n: self.n,
        }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = i64;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &i64 {
        &self.data[row * self.n + col]
    }
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rows()).finish()
    }
}

impl TryFrom<Vec<Vec<i64>>> for Matrix {
    type Error = DimensionError;

    fn try_from(rows: Vec<Vec<i64>>) -> Result<Self, DimensionError> {
        Self::from_rows(&rows)
    }
}

impl From<Matrix> for Vec<Vec<i64>> {
    fn from(m: Matrix) -> Self {
        m.to_rows()
    }
}

/// Strided, borrowed `n × n` window into a row-major buffer.
#[derive(Clone, Copy, Debug)]
pub(crate) struct View<'a> {
    data: &'a [i64],
    offset: usize,
    stride: usize,
    n: usize,
}

impl<'a> View<'a> {
    #[inline]
    pub(crate) const fn dim(&self) -> usize {
        self.n
    }

    #[inline]
    pub(crate) fn at(&self, row: usize, col: usize) -> i64 {
        self.data[self.offset + row * self.stride + col]
    }

    #[inline]
    pub(crate) fn row(&self, row: usize) -> &'a [i64] {
        let start = self.offset + row * self.stride;
        &self.data[start..start + self.n]
    }

    /// Quadrants in order top-left, top-right, bottom-left, bottom-right.
    pub(crate) fn quadrants(&self) -> [View<'a>; 4] {
        let h = self.n / 2;
        let quad = |r: usize, c: usize| View {
            data: self.data,
            offset: self.offset + r * h * self.stride + c * h,
            stride: self.stride,
            n: h,
        };
        [quad(0, 0), quad(0, 1), quad(1, 0), quad(1, 1)]
    }

    pub(crate) fn to_matrix(self) -> Matrix {
        let mut data = Vec::with_capacity(self.n * self.n);
        for i in 0..self.n {
            data.extend_from_slice(self.row(i));
        }
        Matrix { n: self.n, data }
    }
}

/// Elementwise `a ± b` over two views of equal dimension.
pub(crate) fn combine(a: View<'_>, b: View<'_>, sign: Sign) -> Matrix {
    debug_assert_eq!(a.dim(), b.dim(), "combine needs equal dimensions");
    let n = a.dim();
    let mut data = Vec::with_capacity(n * n);
    for i in 0..n {
        data.extend(
            a.row(i)
                .iter()
                .zip(b.row(i))
                .map(|(&x, &y)| sign.apply(x, y)),
        );
    }
    Matrix { n, data }
}

/// `result[i][j] = a[i][j] + sign · b[i][j]`.
///
/// Both operands must share a dimension; this helper does not validate it.
#[must_use]
pub fn add_or_subtract(a: &Matrix, b: &Matrix, sign: Sign) -> Matrix {
    combine(a.view(), b.view(), sign)
}

/// Deep-copied quadrants of an even-dimension matrix, in order
/// top-left, top-right, bottom-left, bottom-right.
#[must_use]
pub fn split(m: &Matrix) -> [Matrix; 4] {
    debug_assert!(m.dim() % 2 == 0, "split needs an even dimension");
    m.view().quadrants().map(View::to_matrix)
}

/// Inverse of [`split`]: compose four equal-size quadrants into one matrix.
#[must_use]
pub fn join(c11: &Matrix, c12: &Matrix, c21: &Matrix, c22: &Matrix) -> Matrix {
    let n = 2 * c11.dim();
    let mut data = Vec::with_capacity(n * n);
    for (left, right) in [(c11, c12), (c21, c22)] {
        for (l, r) in left.rows().zip(right.rows()) {
            data.extend_from_slice(l);
            data.extend_from_slice(r);
        }
    }
    Matrix { n, data }
}

/// Triple-loop product: the textbook definition and the oracle for Strassen.
///
/// Arithmetic wraps like [`multiply`](crate::multiply) does, so both agree on
/// every input and are exact whenever the true product fits in `i64`.
pub fn multiply_naive(a: &Matrix, b: &Matrix) -> Result<Matrix, DimensionError> {
    if a.dim() != b.dim() {
        return Err(DimensionError::Mismatch {
            left: a.dim(),
            right: b.dim(),
        });
    }
    let n = a.dim();
    let mut c = Matrix::zeros(n);
    for i in 0..n {
        for j in 0..n {
            let mut acc = 0;
            for k in 0..n {
                acc = a[(i, k)].wrapping_mul(b[(k, j)]).wrapping_add(acc);
            }
            c.data[i * n + j] = acc;
        }
    }
    Ok(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: &[&[i64]]) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn from_rows_rejects_empty_and_ragged() {
        let empty: [[i64; 0]; 0] = [];
        assert_eq!(Matrix::from_rows(&empty), Err(DimensionError::Empty));
        assert_eq!(
            Matrix::from_rows(&[vec![1, 2], vec![3]]),
            Err(DimensionError::NotSquare {
                row: 1,
                len: 1,
                expected: 2
            })
        );
        assert!(matches!(
            Matrix::from_rows(&[[1, 2, 3], [4, 5, 6]]),
            Err(DimensionError::NotSquare { row: 0, .. })
        ));
    }

    #[test]
    fn from_flat_checks_length() {
        assert!(Matrix::from_flat(2, vec![1, 2, 3, 4]).is_ok());
        assert_eq!(
            Matrix::from_flat(2, vec![1, 2, 3]),
            Err(DimensionError::BadBuffer { n: 2, len: 3 })
        );
        assert_eq!(Matrix::from_flat(0, vec![]), Err(DimensionError::Empty));
    }

    #[test]
    fn split_returns_quadrants_in_order() {
        let a = m(&[
            &[1, 2, 3, 4],
            &[5, 6, 7, 8],
            &[9, 10, 11, 12],
            &[13, 14, 15, 16],
        ]);
        let [tl, tr, bl, br] = split(&a);
        assert_eq!(tl, m(&[&[1, 2], &[5, 6]]));
        assert_eq!(tr, m(&[&[3, 4], &[7, 8]]));
        assert_eq!(bl, m(&[&[9, 10], &[13, 14]]));
        assert_eq!(br, m(&[&[11, 12], &[15, 16]]));
        assert_eq!(join(&tl, &tr, &bl, &br), a);
    }

    #[test]
    fn nested_views_track_offsets() {
        let a = Matrix::from_flat(4, (0..16).collect()).unwrap();
        let [_, tr, _, _] = a.view().quadrants();
        let [_, _, bl, _] = tr.quadrants();
        // top-right quadrant rows 0..2, cols 2..4; its bottom-left is (1, 2)
        assert_eq!(bl.dim(), 1);
        assert_eq!(bl.at(0, 0), 6);
    }

    #[test]
    fn add_and_subtract() {
        let a = m(&[&[1, 2], &[3, 4]]);
        let b = m(&[&[10, 20], &[30, 40]]);
        assert_eq!(add_or_subtract(&a, &b, Sign::Plus), m(&[&[11, 22], &[33, 44]]));
        assert_eq!(
            add_or_subtract(&a, &b, Sign::Minus),
            m(&[&[-9, -18], &[-27, -36]])
        );
    }

    #[test]
    fn sign_from_integer() {
        assert_eq!(Sign::try_from(1), Ok(Sign::Plus));
        assert_eq!(Sign::try_from(-1), Ok(Sign::Minus));
        assert_eq!(Sign::try_from(0), Err(0));
        assert_eq!(Sign::Minus.factor(), -1);
    }

    #[test]
    fn naive_product_known_values() {
        let a = m(&[&[2, 3, 9, 2], &[1, 4, 3, 9], &[2, 1, 4, 8], &[1, 2, 3, 1]]);
        let b = m(&[&[3, 1, 2, 3], &[3, 0, 9, 2], &[4, 1, 4, 1], &[3, 0, 0, 2]]);
        let expected = m(&[
            &[57, 11, 67, 25],
            &[54, 4, 50, 32],
            &[49, 6, 29, 28],
            &[24, 4, 32, 12],
        ]);
        assert_eq!(multiply_naive(&a, &b).unwrap(), expected);
        assert!(multiply_naive(&a, &Matrix::identity(2)).is_err());
    }

    #[test]
    fn add_wraps_instead_of_panicking() {
        let a = m(&[&[i64::MAX]]);
        let b = m(&[&[1]]);
        let sum = add_or_subtract(&a, &b, Sign::Plus);
        let back = add_or_subtract(&sum, &b, Sign::Minus);
        assert_eq!(sum.get(0, 0), Some(i64::MIN));
        assert_eq!(back, a);
    }

    #[test]
    fn serde_uses_nested_rows() {
        let a = m(&[&[1, 2], &[3, 4]]);
        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(json, "[[1,2],[3,4]]");
        let back: Matrix = serde_json::from_str(&json).unwrap();
        assert_eq!(back, a);
        assert!(serde_json::from_str::<Matrix>("[[1,2],[3]]").is_err());
    }
}
