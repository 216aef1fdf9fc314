//! Additive Gaussian measurement noise (opt-in).

use nalgebra::DVector;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use crate::error::{SimError, SimResult};

/// Per-channel additive Gaussian perturbation of the measured output.
///
/// Disabled by default on every [`Plant`](crate::plant::Plant); attach one
/// with [`Plant::with_noise`](crate::plant::Plant::with_noise) to model
/// sensor noise. The generator is seeded explicitly so noisy runs are
/// reproducible.
#[derive(Clone, Debug)]
pub struct MeasurementNoise {
    channels: Vec<Normal<f64>>,
    rng: StdRng,
}

impl MeasurementNoise {
    /// Create noise with one standard deviation per output channel.
    ///
    /// # Errors
    /// Returns an error if any sigma is negative or non-finite.
    pub fn new(sigmas: &[f64], seed: u64) -> SimResult<Self> {
        let mut channels = Vec::with_capacity(sigmas.len());
        for &sigma in sigmas {
            if !sigma.is_finite() || sigma < 0.0 {
                return Err(SimError::InvalidArg {
                    what: "noise sigma must be finite and non-negative",
                });
            }
            let normal = Normal::new(0.0, sigma).map_err(|_| SimError::InvalidArg {
                what: "noise sigma rejected by distribution",
            })?;
            channels.push(normal);
        }
        Ok(Self {
            channels,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Number of channels this noise source was configured for.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Add one sample per channel to the output vector in place.
    pub(crate) fn perturb(&mut self, y: &mut DVector<f64>) {
        for (yi, normal) in y.iter_mut().zip(&self.channels) {
            *yi += normal.sample(&mut self.rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_sigma() {
        assert!(MeasurementNoise::new(&[0.01, -1.0], 0).is_err());
    }

    #[test]
    fn zero_sigma_is_identity() {
        let mut noise = MeasurementNoise::new(&[0.0, 0.0], 7).unwrap();
        let mut y = DVector::from_vec(vec![1.5, -2.5]);
        noise.perturb(&mut y);
        assert_eq!(y[0], 1.5);
        assert_eq!(y[1], -2.5);
    }

    #[test]
    fn same_seed_same_samples() {
        let mut a = MeasurementNoise::new(&[0.1], 42).unwrap();
        let mut b = MeasurementNoise::new(&[0.1], 42).unwrap();
        for _ in 0..10 {
            let mut ya = DVector::from_vec(vec![0.0]);
            let mut yb = DVector::from_vec(vec![0.0]);
            a.perturb(&mut ya);
            b.perturb(&mut yb);
            assert_eq!(ya[0], yb[0]);
        }
    }
}
