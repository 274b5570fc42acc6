// crates/strassen-scheduler/src/lib.rs

//! Shape of the Strassen recursion tree, and trace replay against it.
//!
//! - Every internal node of dimension `n` has exactly seven children of
//!   dimension `n / 2`; leaves are the 1×1 scalar products.
//! - [`StrassenSchedule`] walks that tree pointerlessly (one frame per level,
//!   O(log n) live) and yields the milestone events in the exact order the
//!   engine appends them to its trace.
//! - [`replay`] checks a recorded trace against the schedule and returns the
//!   recursion shape it describes.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used
)]

/// Trace replay and recursion-shape reconstruction.
pub mod replay;
/// Pointerless DFS over the seven-way recursion tree.
pub mod schedule;

pub use replay::{replay, replay_lines, RecursionShape};
pub use schedule::{Event, StrassenSchedule};

/// Number of recursive products per internal node.
pub const PRODUCTS: u8 = 7;

/// Recursion depth for dimension `n`: `log2 n` for powers of two, else `0`.
#[inline]
#[must_use]
pub const fn depth_bound(n: usize) -> u32 {
    if n.is_power_of_two() {
        n.trailing_zeros()
    } else {
        0
    }
}

/// Scalar (1×1) products performed for dimension `n`: `7^log2 n`.
///
/// `None` once the count leaves `u64` (from `n = 2^23` on).
#[inline]
#[must_use]
pub const fn base_case_count(n: usize) -> Option<u64> {
    7u64.checked_pow(depth_bound(n))
}

/// Internal nodes (each emits one divide and one combine): `(7^d - 1) / 6`.
#[inline]
#[must_use]
pub const fn division_count(n: usize) -> Option<u64> {
    match base_case_count(n) {
        Some(leaves) => Some((leaves - 1) / 6),
        None => None,
    }
}

/// Total trace length of a top-level call on `n × n` inputs.
///
/// Start + complete, three milestones per internal node, one per leaf.
/// `None` when the length does not fit in `u64`.
#[inline]
#[must_use]
pub const fn trace_len(n: usize) -> Option<u64> {
    let (Some(leaves), Some(inner)) = (base_case_count(n), division_count(n)) else {
        return None;
    };
    match inner.checked_mul(3) {
        Some(milestones) => match milestones.checked_add(leaves) {
            Some(body) => body.checked_add(2),
            None => None,
        },
        None => None,
    }
}
