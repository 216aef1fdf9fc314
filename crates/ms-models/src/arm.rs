//! Single-link rotating arm.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use ms_sim::{Dynamics, SimError, SimResult};

/// A rigid arm rotating in a vertical plane, driven by a joint torque.
///
/// State is (θ, θ̇) with θ measured from horizontal. The equation of
/// motion, with the arm's inertia about the joint J = m·ℓ²/3:
///
/// ```text
/// θ̈ = (3 / (m·ℓ²)) · (τ − b·θ̇ − m·g·(ℓ/2)·cos θ)
/// ```
///
/// Gravity acts on the center of mass at ℓ/2, so θ = 0 (horizontal) is not
/// an equilibrium: the gravity torque is largest there.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SingleLinkArm {
    /// Mass of the arm (kg)
    pub m: f64,
    /// Length of the arm (m)
    pub ell: f64,
    /// Viscous joint damping (N·m·s/rad)
    pub b: f64,
    /// Gravitational acceleration (m/s²)
    pub g: f64,
}

impl SingleLinkArm {
    /// Create a new arm model.
    ///
    /// # Errors
    /// Returns an error if the parameters are non-physical.
    pub fn new(m: f64, ell: f64, b: f64, g: f64) -> SimResult<Self> {
        if !(m > 0.0) {
            return Err(SimError::InvalidArg {
                what: "arm mass must be positive",
            });
        }
        if !(ell > 0.0) {
            return Err(SimError::InvalidArg {
                what: "arm length must be positive",
            });
        }
        if !(b >= 0.0) {
            return Err(SimError::InvalidArg {
                what: "damping coefficient cannot be negative",
            });
        }
        if !(g >= 0.0) {
            return Err(SimError::InvalidArg {
                what: "gravitational acceleration cannot be negative",
            });
        }
        Ok(Self { m, ell, b, g })
    }

    /// Torque exerted by gravity about the joint at angle `theta` (N·m).
    pub fn gravity_torque(&self, theta: f64) -> f64 {
        self.m * self.g * (self.ell / 2.0) * theta.cos()
    }
}

impl Dynamics for SingleLinkArm {
    fn state_dim(&self) -> usize {
        2
    }

    fn input_dim(&self) -> usize {
        1
    }

    fn output_dim(&self) -> usize {
        1
    }

    fn derivative(&self, x: &DVector<f64>, u: &[f64]) -> SimResult<DVector<f64>> {
        let theta = x[0];
        let thetadot = x[1];
        let tau = u[0];

        let thetaddot = (3.0 / (self.m * self.ell * self.ell))
            * (tau - self.b * thetadot - self.gravity_torque(theta));

        Ok(DVector::from_vec(vec![thetadot, thetaddot]))
    }

    fn output(&self, x: &DVector<f64>) -> DVector<f64> {
        DVector::from_vec(vec![x[0]])
    }
}
