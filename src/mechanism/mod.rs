//! Scoring mechanisms.

/// One-shot lever sequencing.
///
/// Provides [`LeverSequencer`](lever::LeverSequencer), the boost/cruise/snap
/// extend-and-return state machine.
pub mod lever;

/// Hold-to-run intake.
pub mod intake;
