//! Rising-edge detection for sampled digital inputs.
//!
//! Controller buttons are sampled once per control cycle. A button that is
//! held for many cycles should fire its action once, on the cycle where it
//! goes from released to pressed. [`EdgeDetector`] keeps the previous sample
//! for one input and reports exactly that transition.
//!
//! # Example
//!
//! ```
//! use atlas::opcontrol::edge::{Edge, EdgeDetector};
//!
//! let mut r1 = EdgeDetector::new();
//! assert_eq!(r1.observe(true), Some(Edge::Rising));
//! assert_eq!(r1.observe(true), None); // still held
//! assert_eq!(r1.observe(false), None);
//! assert_eq!(r1.observe(true), Some(Edge::Rising));
//! ```

/// A transition reported by [`EdgeDetector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// The input went from `false` to `true`.
    Rising,
}

/// Remembers the last sample of one digital input.
///
/// Each monitored input needs its own detector. The detector must see every
/// cycle's sample, including cycles where the event it gates is ignored,
/// otherwise a press held through such a cycle would fire late.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeDetector {
    last: bool,
}

impl EdgeDetector {
    /// Creates a detector that treats the input as initially released.
    pub const fn new() -> Self { Self { last: false } }

    /// Feeds one sample and returns [`Edge::Rising`] if the input was
    /// released on the previous sample and is pressed now.
    pub fn observe(&mut self, raw: bool) -> Option<Edge> {
        let rose = raw && !self.last;
        self.last = raw;
        rose.then_some(Edge::Rising)
    }

    /// Shorthand for `observe(raw).is_some()`.
    pub fn rose(&mut self, raw: bool) -> bool { self.observe(raw).is_some() }

    /// The previous sample.
    pub fn last(&self) -> bool { self.last }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_edges_in_sequence() {
        let samples = [false, false, true, true, true, false, true];
        let mut detector = EdgeDetector::new();
        let edges: Vec<usize> = samples
            .iter()
            .enumerate()
            .filter_map(|(i, &s)| detector.observe(s).map(|_| i))
            .collect();
        assert_eq!(edges, vec![2, 6]);
    }

    #[test]
    fn held_input_fires_once() {
        let mut detector = EdgeDetector::new();
        assert!(detector.rose(true));
        for _ in 0..100 {
            assert!(!detector.rose(true));
        }
        assert!(detector.last());
    }

    #[test]
    fn released_input_never_fires() {
        let mut detector = EdgeDetector::default();
        for _ in 0..10 {
            assert_eq!(detector.observe(false), None);
        }
    }
}
