//! Inverted pendulum on a cart.

use nalgebra::{DVector, Matrix2, Vector2};
use serde::{Deserialize, Serialize};

use ms_sim::{Dynamics, SimError, SimResult};

/// A rod pivoting on a laterally driven cart.
///
/// State is (z, θ, ż, θ̇): cart position, rod angle from vertical, and
/// their rates. The input is the horizontal force F on the cart. θ = 0 is
/// the upright (inverted) configuration, which is an unstable equilibrium.
///
/// The generalized accelerations couple through a state-dependent mass
/// matrix:
///
/// ```text
/// | m1+m2            m1·(ℓ/2)·cos θ |   | z̈ |   | m1·(ℓ/2)·θ̇²·sin θ + F − b·ż |
/// | m1·(ℓ/2)·cos θ   m1·ℓ²/3        | · | θ̈ | = | m1·g·(ℓ/2)·sin θ             |
/// ```
///
/// solved directly by LU factorization each evaluation rather than by
/// forming the inverse of M(θ).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CartPendulum {
    /// Mass of the pendulum rod (kg)
    pub m1: f64,
    /// Mass of the cart (kg)
    pub m2: f64,
    /// Length of the rod (m)
    pub ell: f64,
    /// Viscous cart damping (N·s/m)
    pub b: f64,
    /// Gravitational acceleration (m/s²)
    pub g: f64,
}

impl CartPendulum {
    /// Create a new cart-pendulum model.
    ///
    /// # Errors
    /// Returns an error if the parameters are non-physical.
    pub fn new(m1: f64, m2: f64, ell: f64, b: f64, g: f64) -> SimResult<Self> {
        if !(m1 > 0.0) {
            return Err(SimError::InvalidArg {
                what: "pendulum mass must be positive",
            });
        }
        if !(m2 > 0.0) {
            return Err(SimError::InvalidArg {
                what: "cart mass must be positive",
            });
        }
        if !(ell > 0.0) {
            return Err(SimError::InvalidArg {
                what: "rod length must be positive",
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
        Ok(Self { m1, m2, ell, b, g })
    }

    /// The configuration-dependent mass matrix M(θ).
    fn mass_matrix(&self, theta: f64) -> Matrix2<f64> {
        let cross = self.m1 * (self.ell / 2.0) * theta.cos();
        Matrix2::new(
            self.m1 + self.m2,
            cross,
            cross,
            self.m1 * self.ell * self.ell / 3.0,
        )
    }
}

impl Dynamics for CartPendulum {
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
        let theta = x[1];
        let zdot = x[2];
        let thetadot = x[3];
        let force = u[0];

        // Generalized forces: centripetal + input − cart damping on the
        // cart axis, gravity on the rod axis.
        let c = Vector2::new(
            self.m1 * (self.ell / 2.0) * thetadot * thetadot * theta.sin() + force - self.b * zdot,
            self.m1 * self.g * (self.ell / 2.0) * theta.sin(),
        );

        let accel = self
            .mass_matrix(theta)
            .lu()
            .solve(&c)
            .ok_or(SimError::SingularMassMatrix {
                what: "cart-pendulum mass matrix",
            })?;

        Ok(DVector::from_vec(vec![zdot, thetadot, accel[0], accel[1]]))
    }

    fn output(&self, x: &DVector<f64>) -> DVector<f64> {
        DVector::from_vec(vec![x[0], x[1]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nominal() -> CartPendulum {
        CartPendulum::new(0.25, 1.0, 0.5, 0.05, 9.81).unwrap()
    }

    #[test]
    fn pendulum_creation() {
        assert!(nominal().m1 > 0.0);
        assert!(CartPendulum::new(0.25, 0.0, 0.5, 0.05, 9.81).is_err());
        assert!(CartPendulum::new(-0.25, 1.0, 0.5, 0.05, 9.81).is_err());
    }

    #[test]
    fn upright_at_rest_is_an_equilibrium() {
        let sys = nominal();
        let x = DVector::from_vec(vec![0.0, 0.0, 0.0, 0.0]);
        let xdot = sys.derivative(&x, &[0.0]).unwrap();
        for i in 0..4 {
            assert!(xdot[i].abs() < 1e-12, "component {i} nonzero");
        }
    }

    #[test]
    fn gravity_tips_a_leaning_rod_further() {
        let sys = nominal();
        // Small lean, at rest, no force: θ̈ must have the sign of θ.
        let x = DVector::from_vec(vec![0.0, 0.05, 0.0, 0.0]);
        let xdot = sys.derivative(&x, &[0.0]).unwrap();
        assert!(xdot[3] > 0.0);

        let x = DVector::from_vec(vec![0.0, -0.05, 0.0, 0.0]);
        let xdot = sys.derivative(&x, &[0.0]).unwrap();
        assert!(xdot[3] < 0.0);
    }

    #[test]
    fn force_accelerates_cart() {
        let sys = nominal();
        let x = DVector::from_vec(vec![0.0, 0.0, 0.0, 0.0]);
        let xdot = sys.derivative(&x, &[2.0]).unwrap();
        assert!(xdot[2] > 0.0);
    }

    #[test]
    fn degenerate_mass_is_singular() {
        // Constructors reject this, but fields are public; a zeroed rod
        // mass and length collapses the mass matrix rank.
        let mut sys = nominal();
        sys.m1 = 0.0;
        sys.m2 = 0.0;

        let x = DVector::from_vec(vec![0.0, 0.0, 0.0, 0.0]);
        let err = sys.derivative(&x, &[0.0]).unwrap_err();
        assert!(matches!(err, SimError::SingularMassMatrix { .. }));
    }

    #[test]
    fn output_is_position_and_angle() {
        let sys = nominal();
        let x = DVector::from_vec(vec![0.3, -0.1, 5.0, 7.0]);
        let y = sys.output(&x);
        assert_eq!(y.len(), 2);
        assert_eq!(y[0], 0.3);
        assert_eq!(y[1], -0.1);
    }
}
