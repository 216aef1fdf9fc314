//! Plant: a dynamics model bound to a state, sample period, and scheme.

use ms_core::all_finite;
use nalgebra::DVector;

use crate::error::{SimError, SimResult};
use crate::integrator::Scheme;
use crate::model::Dynamics;
use crate::noise::MeasurementNoise;

/// A stateful simulation plant.
///
/// Owns the current state vector of a [`Dynamics`] system and advances it
/// one sample period at a time. The state is replaced wholesale at the end
/// of each step; a failed or rejected update leaves it untouched.
///
/// Not reentrant: callers must not invoke [`update`](Plant::update)
/// concurrently on the same instance.
#[derive(Clone, Debug)]
pub struct Plant<D: Dynamics> {
    dynamics: D,
    state: DVector<f64>,
    ts: f64,
    scheme: Scheme,
    noise: Option<MeasurementNoise>,
}

impl<D: Dynamics> Plant<D> {
    /// Create a plant from a dynamics model, initial conditions, and a
    /// sample period in seconds.
    ///
    /// # Errors
    /// Returns an error if the initial state length does not match the
    /// model, the initial state carries non-finite values, or `ts` is not
    /// positive. Finiteness is only checked here: once stepping, degenerate
    /// values flow through unmasked.
    pub fn new(dynamics: D, initial_state: &[f64], ts: f64) -> SimResult<Self> {
        if initial_state.len() != dynamics.state_dim() {
            return Err(SimError::DimensionMismatch {
                what: "initial state",
                expected: dynamics.state_dim(),
                got: initial_state.len(),
            });
        }
        if !all_finite(initial_state) {
            return Err(SimError::InvalidArg {
                what: "initial state must be finite",
            });
        }
        if !(ts > 0.0) {
            return Err(SimError::InvalidArg {
                what: "ts must be positive",
            });
        }
        Ok(Self {
            dynamics,
            state: DVector::from_column_slice(initial_state),
            ts,
            scheme: Scheme::default(),
            noise: None,
        })
    }

    /// Select the integration scheme (default: RK4).
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Attach measurement noise to the output channels.
    ///
    /// # Errors
    /// Returns an error if the noise channel count does not match the
    /// model's output dimension.
    pub fn with_noise(mut self, noise: MeasurementNoise) -> SimResult<Self> {
        if noise.channel_count() != self.dynamics.output_dim() {
            return Err(SimError::DimensionMismatch {
                what: "noise channels",
                expected: self.dynamics.output_dim(),
                got: noise.channel_count(),
            });
        }
        self.noise = Some(noise);
        Ok(self)
    }

    /// Advance the state by one sample period under the input `u`, then
    /// return the measured output at the new state.
    ///
    /// The input is held constant for the whole step (zero-order hold).
    /// Non-finite values arising from the dynamics propagate to the output
    /// unmasked.
    ///
    /// # Errors
    /// Rejects `u` of the wrong arity before any state mutation, and
    /// surfaces structural failures (singular mass matrix) from the
    /// dynamics.
    pub fn update(&mut self, u: &[f64]) -> SimResult<DVector<f64>> {
        if u.len() != self.dynamics.input_dim() {
            return Err(SimError::DimensionMismatch {
                what: "control input",
                expected: self.dynamics.input_dim(),
                got: u.len(),
            });
        }

        let next = self.scheme.step(&self.dynamics, &self.state, u, self.ts)?;
        self.state = next;

        let mut y = self.dynamics.output(&self.state);
        if let Some(noise) = &mut self.noise {
            noise.perturb(&mut y);
        }
        Ok(y)
    }

    /// Current state vector.
    pub fn state(&self) -> &DVector<f64> {
        &self.state
    }

    /// Sample period in seconds.
    pub fn ts(&self) -> f64 {
        self.ts
    }

    /// The dynamics model this plant wraps.
    pub fn dynamics(&self) -> &D {
        &self.dynamics
    }
}
