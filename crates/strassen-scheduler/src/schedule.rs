// crates/strassen-scheduler/src/schedule.rs

//! Pointerless DFS schedule over the Strassen recursion tree.

use crate::PRODUCTS;

/// Milestone events of a Strassen run, in trace order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Top-level call on `n × n` inputs.
    Start(usize),
    /// Level `n` splits into quadrants.
    Divide(usize),
    /// Level `n` starts its seven products.
    Products(usize),
    /// A 1×1 scalar product.
    BaseCase,
    /// Level `n` combines its products.
    Combine(usize),
    /// Top-level call finished.
    Complete(usize),
}

#[derive(Clone, Copy, Debug)]
enum Phase {
    Divide,
    Products,
    /// Number of children already pushed.
    Child(u8),
}

#[derive(Clone, Copy, Debug)]
struct Frame {
    n: usize,
    phase: Phase,
}

impl Frame {
    const fn new(n: usize) -> Self {
        Self {
            n,
            phase: Phase::Divide,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Pending,
    Running,
    Done,
}

/// Iterator over the expected events for an `n × n` multiplication.
///
/// Holds at most `log2 n + 1` frames. A dimension that is not a power of two
/// has no valid run and yields nothing.
#[derive(Clone, Debug)]
pub struct StrassenSchedule {
    root: usize,
    stack: Vec<Frame>,
    state: State,
}

impl StrassenSchedule {
    /// Schedule for `n × n` inputs.
    #[must_use]
    pub fn new(n: usize) -> Self {
        let state = if n.is_power_of_two() {
            State::Pending
        } else {
            State::Done
        };
        Self {
            root: n,
            stack: Vec::with_capacity(crate::depth_bound(n) as usize + 1),
            state,
        }
    }

    /// Live frames right now (recursion depth of the next event).
    #[must_use]
    pub fn live_frames(&self) -> usize {
        self.stack.len()
    }
}

impl Iterator for StrassenSchedule {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        loop {
            let Some(top) = self.stack.last_mut() else {
                return match self.state {
                    State::Pending => {
                        self.state = State::Running;
                        self.stack.push(Frame::new(self.root));
                        Some(Event::Start(self.root))
                    }
                    State::Running => {
                        self.state = State::Done;
                        Some(Event::Complete(self.root))
                    }
                    State::Done => None,
                };
            };

            if top.n == 1 {
                self.stack.pop();
                return Some(Event::BaseCase);
            }

            match top.phase {
                Phase::Divide => {
                    top.phase = Phase::Products;
                    return Some(Event::Divide(top.n));
                }
                Phase::Products => {
                    top.phase = Phase::Child(0);
                    return Some(Event::Products(top.n));
                }
                Phase::Child(k) if k < PRODUCTS => {
                    top.phase = Phase::Child(k + 1);
                    let half = top.n / 2;
                    self.stack.push(Frame::new(half));
                    // descend into the next product
                }
                Phase::Child(_) => {
                    let n = top.n;
                    self.stack.pop();
                    return Some(Event::Combine(n));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_by_two_sequence() {
        let got: Vec<_> = StrassenSchedule::new(2).collect();
        let mut want = vec![Event::Start(2), Event::Divide(2), Event::Products(2)];
        want.extend([Event::BaseCase; 7]);
        want.extend([Event::Combine(2), Event::Complete(2)]);
        assert_eq!(got, want);
    }

    #[test]
    fn scalar_and_invalid_sizes() {
        let got: Vec<_> = StrassenSchedule::new(1).collect();
        assert_eq!(
            got,
            vec![Event::Start(1), Event::BaseCase, Event::Complete(1)]
        );
        assert_eq!(StrassenSchedule::new(0).count(), 0);
        assert_eq!(StrassenSchedule::new(6).count(), 0);
    }

    #[test]
    fn live_frames_is_logarithmic() {
        for k in 0..=5u32 {
            let n = 1usize << k;
            let mut s = StrassenSchedule::new(n);
            let mut max_live = 0;
            while s.next().is_some() {
                max_live = max_live.max(s.live_frames());
            }
            assert!(
                max_live <= k as usize + 1,
                "live frames {max_live} exceeded log2 bound for n={n}"
            );
        }
    }

    #[test]
    fn exhausted_iterator_stays_empty() {
        let mut s = StrassenSchedule::new(4);
        assert_eq!(s.by_ref().count() as u64, crate::trace_len(4).unwrap());
        assert!(s.next().is_none());
    }
}
