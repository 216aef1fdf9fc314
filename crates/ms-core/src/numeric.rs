use crate::CoreError;

/// Floating point type used throughout the system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// True if every element of the slice is finite.
pub fn all_finite(values: &[Real]) -> bool {
    values.iter().all(|v| v.is_finite())
}

/// Element-wise [`nearly_equal`] over two vectors of the same length.
pub fn vec_nearly_equal(a: &[Real], b: &[Real], tol: Tolerances) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| nearly_equal(x, y, tol))
}
