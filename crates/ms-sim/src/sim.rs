//! Simulation runner and result recording.

use nalgebra::DVector;
use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::model::Dynamics;
use crate::plant::Plant;

/// Options for simulation runs.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Final simulation time (seconds)
    pub t_end: f64,
    /// Maximum number of steps (safety limit)
    pub max_steps: usize,
    /// Record every N-th step (decimation)
    pub record_every: usize,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            t_end: 1.0,
            max_steps: 1_000_000,
            record_every: 1,
        }
    }
}

/// Record of simulation results.
#[derive(Clone, Debug)]
pub struct SimRecord {
    /// Time points (seconds)
    pub t: Vec<f64>,
    /// State snapshots
    pub x: Vec<DVector<f64>>,
    /// Measured outputs (absent at t = 0; outputs are produced by steps)
    pub y: Vec<DVector<f64>>,
}

/// Run a transient simulation at the plant's sample period.
///
/// `input` supplies the control vector for the step starting at time `t`;
/// it realizes the external controller/driver that the core does not own.
/// The trajectory of returned outputs is the simulation result.
pub fn run_sim<D, F>(plant: &mut Plant<D>, opts: &SimOptions, mut input: F) -> SimResult<SimRecord>
where
    D: Dynamics,
    F: FnMut(f64) -> Vec<f64>,
{
    if opts.t_end < 0.0 {
        return Err(SimError::InvalidArg {
            what: "t_end must be non-negative",
        });
    }
    if opts.max_steps == 0 {
        return Err(SimError::InvalidArg {
            what: "max_steps must be positive",
        });
    }
    if opts.record_every == 0 {
        return Err(SimError::InvalidArg {
            what: "record_every must be positive",
        });
    }

    let dt = plant.ts();
    debug!(t_end = opts.t_end, dt, "starting transient run");

    let mut t = 0.0;

    let mut t_record = vec![t];
    let mut x_record = vec![plant.state().clone()];
    let mut y_record = Vec::new();

    let mut step = 0;
    let mut last_y: Option<DVector<f64>> = None;

    while t < opts.t_end && step < opts.max_steps {
        let u = input(t);
        let y = plant.update(&u)?;
        t += dt;
        step += 1;

        // Record if decimation matches
        if step % opts.record_every == 0 {
            t_record.push(t);
            x_record.push(plant.state().clone());
            y_record.push(y.clone());
        }
        last_y = Some(y);
    }

    // Always record final state
    if step % opts.record_every != 0 {
        t_record.push(t);
        x_record.push(plant.state().clone());
        if let Some(y) = last_y {
            y_record.push(y);
        }
    }

    Ok(SimRecord {
        t: t_record,
        x: x_record,
        y: y_record,
    })
}
