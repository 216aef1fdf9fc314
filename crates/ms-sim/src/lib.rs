//! Fixed-step simulation core for mechanical systems.
//!
//! Provides:
//! - [`Dynamics`] trait for pluggable equations of motion
//! - Explicit Runge-Kutta integrators (RK1/RK2/RK4) behind one [`Integrator`] trait
//! - [`Plant`] wrapper binding a model to a state vector and sample period
//! - Opt-in Gaussian measurement noise
//! - [`run_sim`] transient runner with decimated recording

pub mod error;
pub mod integrator;
pub mod model;
pub mod noise;
pub mod plant;
pub mod sim;

// Re-exports for public API
pub use error::{SimError, SimResult};
pub use integrator::{Integrator, Rk1, Rk2, Rk4, Scheme};
pub use model::Dynamics;
pub use noise::MeasurementNoise;
pub use plant::Plant;
pub use sim::{run_sim, SimOptions, SimRecord};
