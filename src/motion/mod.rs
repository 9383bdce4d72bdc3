//! Motion sensing.
//!
//! Provides the odometry front end: diagonal tracking pods and the virtual
//! forward/lateral tracking wheels derived from them. Pose integration is
//! done by whatever consumes [`AxisDistances`](odom::diagonal::AxisDistances).

/// Diagonal pod odometry.
///
/// Provides [`VirtualWheels`](odom::diagonal::VirtualWheels) and the
/// [`DiagonalPods`](odom::devices::DiagonalPods) they read from.
pub mod odom;
