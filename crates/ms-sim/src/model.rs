//! Dynamics trait for pluggable equations of motion.

use nalgebra::DVector;

use crate::error::SimResult;

/// Trait for the continuous-time equations of motion of a mechanical system.
///
/// A Dynamics implementation describes a system
///
/// ```text
/// x_dot = f(x, u)
/// y     = h(x)
/// ```
///
/// where `x` is the state vector, `u` the held-constant control input, and
/// `y` the measured output. Implementations carry only immutable physical
/// parameters; the state itself lives in a [`Plant`](crate::plant::Plant).
///
/// `derivative` must be pure: it never mutates `x` (integrator
/// sub-evaluations perturb copies) and returns a vector with the same
/// length as `x`. If the equations produce NaN or infinity, return the
/// values as-is; the integrator propagates them unmasked.
pub trait Dynamics {
    /// Number of state variables.
    fn state_dim(&self) -> usize;

    /// Number of control inputs expected by `derivative`.
    fn input_dim(&self) -> usize;

    /// Number of measured output channels.
    fn output_dim(&self) -> usize;

    /// Compute the state derivative x_dot = f(x, u).
    ///
    /// Errors only on structural failure (e.g., a singular mass matrix
    /// from degenerate parameters), never on a merely extreme state.
    fn derivative(&self, x: &DVector<f64>, u: &[f64]) -> SimResult<DVector<f64>>;

    /// Compute the measured output y = h(x), a fixed linear projection
    /// of the state.
    fn output(&self, x: &DVector<f64>) -> DVector<f64>;
}
