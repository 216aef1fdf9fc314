//! Two-body satellite with a flexible solar panel.

use nalgebra::{DVector, Matrix2, Vector2};
use serde::{Deserialize, Serialize};

use ms_sim::{Dynamics, SimError, SimResult};

/// A rigid satellite base connected to a solar panel through a torsional
/// spring-damper.
///
/// State is (θ, φ, θ̇, φ̇): base angle, panel angle, and their rates. The
/// input is the reaction-wheel torque τ on the base. The inertias are
/// decoupled, so the mass matrix is constant and diagonal:
///
/// ```text
/// Js·θ̈ = τ − b·(θ̇ − φ̇) − k·(θ − φ)
/// Jp·φ̈ =   − b·(φ̇ − θ̇) − k·(φ − θ)
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Satellite {
    /// Inertia of the base (kg·m²)
    pub js: f64,
    /// Inertia of the panel (kg·m²)
    pub jp: f64,
    /// Torsional spring constant (N·m/rad)
    pub k: f64,
    /// Torsional damping coefficient (N·m·s/rad)
    pub b: f64,
}

impl Satellite {
    /// Create a new satellite model.
    ///
    /// # Errors
    /// Returns an error if the parameters are non-physical.
    pub fn new(js: f64, jp: f64, k: f64, b: f64) -> SimResult<Self> {
        if !(js > 0.0) {
            return Err(SimError::InvalidArg {
                what: "base inertia must be positive",
            });
        }
        if !(jp > 0.0) {
            return Err(SimError::InvalidArg {
                what: "panel inertia must be positive",
            });
        }
        if !(k >= 0.0) {
            return Err(SimError::InvalidArg {
                what: "spring constant cannot be negative",
            });
        }
        if !(b >= 0.0) {
            return Err(SimError::InvalidArg {
                what: "damping coefficient cannot be negative",
            });
        }
        Ok(Self { js, jp, k, b })
    }

    /// Total mechanical energy at state `x` (J): rotational kinetic energy
    /// of both bodies plus the potential energy stored in the coupling
    /// spring. With b > 0 and zero input this is non-increasing along
    /// trajectories.
    pub fn mechanical_energy(&self, x: &DVector<f64>) -> f64 {
        let twist = x[0] - x[1];
        0.5 * self.js * x[2] * x[2] + 0.5 * self.jp * x[3] * x[3] + 0.5 * self.k * twist * twist
    }
}

impl Dynamics for Satellite {
    fn state_dim(&self) -> usize {
        4
    }

    fn input_dim(&self) -> usize {
        1
    }

    fn output_dim(&self) -> usize {
        2
    }

    fn derivative(&self, x: &DVector<f64>, u: &[f64]) -> SimResult<DVector<f64>> {
        let theta = x[0];
        let phi = x[1];
        let thetadot = x[2];
        let phidot = x[3];
        let tau = u[0];

        let mass = Matrix2::new(self.js, 0.0, 0.0, self.jp);
        let c = Vector2::new(
            tau - self.b * (thetadot - phidot) - self.k * (theta - phi),
            -self.b * (phidot - thetadot) - self.k * (phi - theta),
        );

        let accel = mass
            .lu()
            .solve(&c)
            .ok_or(SimError::SingularMassMatrix {
                what: "satellite inertia matrix",
            })?;

        Ok(DVector::from_vec(vec![
            thetadot, phidot, accel[0], accel[1],
        ]))
    }

    fn output(&self, x: &DVector<f64>) -> DVector<f64> {
        DVector::from_vec(vec![x[0], x[1]])
    }
}
