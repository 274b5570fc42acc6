// crates/strassen-scheduler/src/replay.rs

//! Replay a recorded trace against the expected DFS schedule.
//!
//! The trace is authoritative for *what happened*; the schedule is
//! authoritative for *what must happen*. Replay walks both in lockstep and
//! fails on the first divergence, so a trace that replays cleanly describes a
//! well-formed recursion:
//! 1) it opens with `Start(n)` for a power-of-two `n`,
//! 2) every divide halves its level and is followed by the products marker,
//!    seven subtrees, and a combine,
//! 3) every base case is the scalar product of its operands (wrapping in
//!    `i64`, as the engine computes it),
//! 4) it closes with `Complete(n)` and nothing follows.

use crate::{depth_bound, Event, StrassenSchedule};
use anyhow::{anyhow, bail, Context, Result};
use strassen_core::{Step, Trace};

/// Recursion shape reconstructed from a trace.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecursionShape {
    /// Top-level dimension.
    pub n: usize,
    /// Recursion depth (`log2 n`).
    pub depth: u32,
    /// Internal nodes (divide events).
    pub divisions: u64,
    /// Leaves (scalar products).
    pub base_cases: u64,
    /// Combine events.
    pub combines: u64,
    /// Largest number of simultaneously open levels seen.
    pub max_live_frames: usize,
}

/// Check `trace` against the schedule and return the shape it describes.
pub fn replay(trace: &Trace) -> Result<RecursionShape> {
    let n = match trace.steps().first() {
        Some(Step::Start { n }) => *n,
        Some(other) => bail!("trace must open with a start step, found `{other}`"),
        None => bail!("trace is empty"),
    };
    if !n.is_power_of_two() {
        bail!("trace starts a {n}x{n} run; dimension must be a power of 2");
    }

    let mut schedule = StrassenSchedule::new(n);
    let mut shape = RecursionShape {
        n,
        depth: depth_bound(n),
        ..RecursionShape::default()
    };

    for (i, step) in trace.iter().enumerate() {
        let ev = schedule
            .next()
            .ok_or_else(|| anyhow!("step {i}: unexpected `{step}` after completion"))?;
        shape.max_live_frames = shape.max_live_frames.max(schedule.live_frames());

        if !step_matches(step, ev) {
            bail!("step {i}: expected {ev:?}, found `{step}`");
        }
        match ev {
            Event::Divide(_) => shape.divisions += 1,
            Event::BaseCase => shape.base_cases += 1,
            Event::Combine(_) => shape.combines += 1,
            Event::Start(_) | Event::Products(_) | Event::Complete(_) => {}
        }
    }

    if let Some(ev) = schedule.next() {
        bail!(
            "trace ended after {} steps; next expected {ev:?}",
            trace.len()
        );
    }
    Ok(shape)
}

/// Parse rendered trace lines, then [`replay`] them.
pub fn replay_lines<I, S>(lines: I) -> Result<RecursionShape>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let trace = lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            line.as_ref()
                .parse::<Step>()
                .with_context(|| format!("parsing trace line {i}"))
        })
        .collect::<Result<Trace>>()?;
    replay(&trace)
}

fn step_matches(step: &Step, ev: Event) -> bool {
    match (step, ev) {
        (Step::Start { n }, Event::Start(m)) | (Step::Complete { n }, Event::Complete(m)) => {
            *n == m
        }
        (Step::Divide { n, half }, Event::Divide(m)) => *n == m && *half == m / 2,
        (Step::Products, Event::Products(_)) | (Step::Combine, Event::Combine(_)) => true,
        (Step::BaseCase { a, b, product }, Event::BaseCase) => a.wrapping_mul(*b) == *product,
        _ => false,
    }
}
