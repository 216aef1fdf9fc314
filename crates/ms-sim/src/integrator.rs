//! Fixed-step explicit Runge-Kutta integrators.

use nalgebra::DVector;

use crate::error::SimResult;
use crate::model::Dynamics;

/// Trait for fixed-step time integrators.
///
/// The input `u` is held constant across all derivative evaluations within
/// a single step (zero-order hold).
pub trait Integrator {
    /// Advance state by one time step using the system's equations of motion.
    fn step<D: Dynamics>(
        &self,
        dynamics: &D,
        x: &DVector<f64>,
        u: &[f64],
        dt: f64,
    ) -> SimResult<DVector<f64>>;
}

/// Forward Euler (explicit, 1st order, one derivative call per step).
#[derive(Clone, Debug)]
pub struct Rk1;

impl Integrator for Rk1 {
    fn step<D: Dynamics>(
        &self,
        dynamics: &D,
        x: &DVector<f64>,
        u: &[f64],
        dt: f64,
    ) -> SimResult<DVector<f64>> {
        let k1 = dynamics.derivative(x, u)?;
        Ok(x + dt * k1)
    }
}

/// Heun's method (explicit, 2nd order, two derivative calls per step).
///
/// Predicts with a full Euler step, then averages the slopes at both ends.
#[derive(Clone, Debug)]
pub struct Rk2;

impl Integrator for Rk2 {
    fn step<D: Dynamics>(
        &self,
        dynamics: &D,
        x: &DVector<f64>,
        u: &[f64],
        dt: f64,
    ) -> SimResult<DVector<f64>> {
        let k1 = dynamics.derivative(x, u)?;
        let k2 = dynamics.derivative(&(x + dt * &k1), u)?;
        Ok(x + (dt / 2.0) * (k1 + k2))
    }
}

/// Classical RK4 (Runge-Kutta 4th order) integrator.
#[derive(Clone, Debug)]
pub struct Rk4;

impl Integrator for Rk4 {
    fn step<D: Dynamics>(
        &self,
        dynamics: &D,
        x: &DVector<f64>,
        u: &[f64],
        dt: f64,
    ) -> SimResult<DVector<f64>> {
        let k1 = dynamics.derivative(x, u)?;
        let k2 = dynamics.derivative(&(x + (0.5 * dt) * &k1), u)?;
        let k3 = dynamics.derivative(&(x + (0.5 * dt) * &k2), u)?;
        let k4 = dynamics.derivative(&(x + dt * &k3), u)?;

        // Combine: x_new = x + (dt/6) * (k1 + 2*k2 + 2*k3 + k4)
        Ok(x + (dt / 6.0) * (k1 + 2.0 * k2 + 2.0 * k3 + k4))
    }
}

/// Integration scheme selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scheme {
    /// Forward Euler (1st order, fastest, least accurate).
    Rk1,
    /// Heun's method (2nd order).
    Rk2,
    /// Classical Runge-Kutta (4th order, default, 4 derivative calls per step).
    #[default]
    Rk4,
}

impl Scheme {
    /// Advance state by one step using the selected scheme.
    pub fn step<D: Dynamics>(
        self,
        dynamics: &D,
        x: &DVector<f64>,
        u: &[f64],
        dt: f64,
    ) -> SimResult<DVector<f64>> {
        match self {
            Scheme::Rk1 => Rk1.step(dynamics, x, u, dt),
            Scheme::Rk2 => Rk2.step(dynamics, x, u, dt),
            Scheme::Rk4 => Rk4.step(dynamics, x, u, dt),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// dx/dt = c, independent of state and input.
    struct ConstantRate {
        c: DVector<f64>,
    }

    impl Dynamics for ConstantRate {
        fn state_dim(&self) -> usize {
            self.c.len()
        }

        fn input_dim(&self) -> usize {
            0
        }

        fn output_dim(&self) -> usize {
            self.c.len()
        }

        fn derivative(&self, _x: &DVector<f64>, _u: &[f64]) -> SimResult<DVector<f64>> {
            Ok(self.c.clone())
        }

        fn output(&self, x: &DVector<f64>) -> DVector<f64> {
            x.clone()
        }
    }

    /// dx/dt = a*x, scalar, with exact solution x0 * exp(a*t).
    struct ScalarLinear {
        a: f64,
    }

    impl Dynamics for ScalarLinear {
        fn state_dim(&self) -> usize {
            1
        }

        fn input_dim(&self) -> usize {
            0
        }

        fn output_dim(&self) -> usize {
            1
        }

        fn derivative(&self, x: &DVector<f64>, _u: &[f64]) -> SimResult<DVector<f64>> {
            Ok(self.a * x)
        }

        fn output(&self, x: &DVector<f64>) -> DVector<f64> {
            x.clone()
        }
    }

    #[test]
    fn all_schemes_agree_on_constant_derivative() {
        let sys = ConstantRate {
            c: DVector::from_vec(vec![1.0, -2.0, 0.5]),
        };
        let x0 = DVector::from_vec(vec![0.0, 1.0, 2.0]);
        let dt = 0.01;

        let expected = &x0 + dt * &sys.c;
        for scheme in [Scheme::Rk1, Scheme::Rk2, Scheme::Rk4] {
            let x1 = scheme.step(&sys, &x0, &[], dt).unwrap();
            // Constant slope collapses every scheme to x + dt*c, so the
            // comparison is tight up to rounding in the stage combination.
            for i in 0..3 {
                assert!(
                    (x1[i] - expected[i]).abs() < 1e-15,
                    "{scheme:?} differs at {i}"
                );
            }
        }
    }

    #[test]
    fn accuracy_ordering_on_exponential() {
        let sys = ScalarLinear { a: -1.0 };
        let x0 = DVector::from_vec(vec![1.0]);
        let dt: f64 = 0.1;
        let exact = (-dt).exp();

        let e1 = (Scheme::Rk1.step(&sys, &x0, &[], dt).unwrap()[0] - exact).abs();
        let e2 = (Scheme::Rk2.step(&sys, &x0, &[], dt).unwrap()[0] - exact).abs();
        let e4 = (Scheme::Rk4.step(&sys, &x0, &[], dt).unwrap()[0] - exact).abs();

        assert!(e2 < e1);
        assert!(e4 < e2);
        assert!(e4 < 1e-7);
    }

    #[test]
    fn rk4_matches_taylor_series_on_exponential() {
        // One RK4 step on dx/dt = a*x reproduces the 4th-order Taylor
        // polynomial of exp(a*dt) exactly.
        let a = 2.0;
        let dt = 0.05;
        let sys = ScalarLinear { a };
        let x0 = DVector::from_vec(vec![1.0]);

        let z = a * dt;
        let taylor = 1.0 + z + z * z / 2.0 + z * z * z / 6.0 + z * z * z * z / 24.0;

        let x1 = Scheme::Rk4.step(&sys, &x0, &[], dt).unwrap();
        assert!((x1[0] - taylor).abs() < 1e-14);
    }

    #[test]
    fn non_finite_derivative_propagates() {
        struct NanRate;
        impl Dynamics for NanRate {
            fn state_dim(&self) -> usize {
                1
            }
            fn input_dim(&self) -> usize {
                0
            }
            fn output_dim(&self) -> usize {
                1
            }
            fn derivative(&self, _x: &DVector<f64>, _u: &[f64]) -> SimResult<DVector<f64>> {
                Ok(DVector::from_vec(vec![f64::NAN]))
            }
            fn output(&self, x: &DVector<f64>) -> DVector<f64> {
                x.clone()
            }
        }

        let x0 = DVector::from_vec(vec![0.0]);
        let x1 = Scheme::Rk4.step(&NanRate, &x0, &[], 0.01).unwrap();
        assert!(x1[0].is_nan());
    }
}
