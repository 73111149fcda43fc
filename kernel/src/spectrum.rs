//! Spectral

#![allow(dead_code)]
use crate::common::*;
use std::ops::{Add, AddAssign, Div, Index, Mul, MulAssign, Sub};

/// Number of spectral bands.
pub const SPECTRAL_BANDS: usize = 3;

/// Radiometric quantity sampled in a small number of wavelength bands,
/// ordered from long to short wavelengths.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Spectral {
    /// Band coefficients.
    pub c: [Float; SPECTRAL_BANDS],
}

impl Spectral {
    /// Black.
    pub const ZERO: Self = Self { c: [0.0; SPECTRAL_BANDS] };

    /// Unit response in every band.
    pub const ONE: Self = Self { c: [1.0; SPECTRAL_BANDS] };

    /// Create a flat spectrum.
    ///
    /// * `v` - Value for every band.
    pub fn new(v: Float) -> Self {
        Self { c: [v; SPECTRAL_BANDS] }
    }

    /// Create a spectrum from red, green and blue band values.
    ///
    /// * `r` - Red band.
    /// * `g` - Green band.
    /// * `b` - Blue band.
    pub fn from_rgb(r: Float, g: Float, b: Float) -> Self {
        Self { c: [r, g, b] }
    }

    /// Returns true if every band is zero.
    pub fn is_black(&self) -> bool {
        self.c.iter().all(|&v| v == 0.0)
    }

    /// Returns true if any band is NaN or infinite.
    pub fn has_nans(&self) -> bool {
        self.c.iter().any(|v| !v.is_finite())
    }

    /// Returns the mean over all bands.
    pub fn average(&self) -> Float {
        self.c.iter().sum::<Float>() / SPECTRAL_BANDS as Float
    }

    /// Returns the largest band value.
    pub fn max_component(&self) -> Float {
        self.c.iter().fold(-INFINITY, |a, &b| a.max(b))
    }

    /// Returns `e^(-self * distance)` per band. Zero extinction stays fully
    /// transparent over infinite distances.
    ///
    /// * `distance` - Distance travelled.
    pub fn attenuation(&self, distance: Float) -> Self {
        let mut out = Self::ONE;
        for (o, &sigma) in out.c.iter_mut().zip(self.c.iter()) {
            if sigma > 0.0 {
                *o = (-sigma * distance).exp();
            }
        }
        out
    }

    /// Clamp every band to `[low, high]`.
    ///
    /// * `low`  - Lower bound.
    /// * `high` - Upper bound.
    pub fn clamp(&self, low: Float, high: Float) -> Self {
        let mut out = *self;
        for v in out.c.iter_mut() {
            *v = clamp(*v, low, high);
        }
        out
    }
}

impl Add for Spectral {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        let mut out = self;
        out += other;
        out
    }
}

impl AddAssign for Spectral {
    fn add_assign(&mut self, other: Self) {
        for (a, b) in self.c.iter_mut().zip(other.c.iter()) {
            *a += b;
        }
    }
}

impl Sub for Spectral {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        let mut out = self;
        for (a, b) in out.c.iter_mut().zip(other.c.iter()) {
            *a -= b;
        }
        out
    }
}

impl Mul for Spectral {
    type Output = Self;

    fn mul(self, other: Self) -> Self::Output {
        let mut out = self;
        out *= other;
        out
    }
}

impl MulAssign for Spectral {
    fn mul_assign(&mut self, other: Self) {
        for (a, b) in self.c.iter_mut().zip(other.c.iter()) {
            *a *= b;
        }
    }
}

impl Mul<Float> for Spectral {
    type Output = Self;

    fn mul(self, f: Float) -> Self::Output {
        let mut out = self;
        out *= f;
        out
    }
}

impl MulAssign<Float> for Spectral {
    fn mul_assign(&mut self, f: Float) {
        for a in self.c.iter_mut() {
            *a *= f;
        }
    }
}

impl Mul<Spectral> for Float {
    type Output = Spectral;

    fn mul(self, s: Spectral) -> Self::Output {
        s * self
    }
}

impl Div<Float> for Spectral {
    type Output = Self;

    fn div(self, f: Float) -> Self::Output {
        debug_assert!(f != 0.0);
        self * (1.0 / f)
    }
}

impl Index<usize> for Spectral {
    type Output = Float;

    fn index(&self, band: usize) -> &Self::Output {
        &self.c[band]
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    #[test]
    fn black_and_average() {
        assert!(Spectral::ZERO.is_black());
        assert!(!Spectral::from_rgb(0.0, 0.0, 1e-6).is_black());
        assert!(approx_eq!(Float, Spectral::from_rgb(1.0, 2.0, 3.0).average(), 2.0, ulps = 2));
        assert_eq!(Spectral::from_rgb(1.0, 5.0, 3.0).max_component(), 5.0);
    }

    #[test]
    fn attenuation_handles_infinite_distance() {
        let sigma = Spectral::from_rgb(0.0, 0.5, 1.0);
        let t = sigma.attenuation(INFINITY);
        assert_eq!(t.c, [1.0, 0.0, 0.0]);
        let t = sigma.attenuation(2.0);
        assert!(approx_eq!(Float, t[1], (-1.0_f32).exp(), epsilon = 1e-6));
    }

    #[test]
    fn detects_non_finite_values() {
        assert!(Spectral::from_rgb(Float::NAN, 0.0, 0.0).has_nans());
        assert!(Spectral::from_rgb(0.0, INFINITY, 0.0).has_nans());
        assert!(!Spectral::ONE.has_nans());
    }
}
