//! Common sampling functions.

use crate::common::*;
use crate::geometry::*;
use crate::rng::*;

/// Generate jittered 1D samples, one per stratum.
///
/// * `rng`       - Random number generator.
/// * `n_samples` - Number of samples.
pub fn stratified_sample_1d(rng: &mut RNG, n_samples: usize) -> Vec<Float> {
    let inv_n_samples = 1.0 / n_samples as Float;
    (0..n_samples)
        .map(|i| min((i as Float + rng.uniform_float()) * inv_n_samples, ONE_MINUS_EPSILON))
        .collect()
}

/// Generate jittered 2D samples on an `nx` by `ny` grid of strata.
///
/// * `rng` - Random number generator.
/// * `nx`  - Number of strata in x-direction.
/// * `ny`  - Number of strata in y-direction.
pub fn stratified_sample_2d(rng: &mut RNG, nx: usize, ny: usize) -> Vec<Point2f> {
    let dx = 1.0 / nx as Float;
    let dy = 1.0 / ny as Float;
    let mut samples = Vec::with_capacity(nx * ny);
    for y in 0..ny {
        for x in 0..nx {
            let jx = rng.uniform_float();
            let jy = rng.uniform_float();
            samples.push(Point2f::new(
                min((x as Float + jx) * dx, ONE_MINUS_EPSILON),
                min((y as Float + jy) * dy, ONE_MINUS_EPSILON),
            ));
        }
    }
    samples
}

/// Uniformly sample a direction from a sphere.
///
/// * `u` - The random sample point.
pub fn uniform_sample_sphere(u: &Point2f) -> Vector3f {
    let z = 1.0 - 2.0 * u[0];
    let r = max(0.0, 1.0 - z * z).sqrt();
    let phi = TWO_PI * u[1];
    Vector3f::new(r * phi.cos(), r * phi.sin(), z)
}

/// Returns the PDF for uniformly sampling a direction from a sphere.
#[inline]
pub fn uniform_sphere_pdf() -> Float {
    INV_FOUR_PI
}

/// Sample a point on a unit disk by mapping from a unit square to the unit
/// circle. The concentric mapping takes points in [-1, 1]^2 to unit disk by
/// uniformly mapping concentric squares to concentric circles.
///
/// * `u` - The random sample point.
pub fn concentric_sample_disk(u: &Point2f) -> Point2f {
    // Map uniform random numbers to [-1,1]^2.
    let ox = 2.0 * u.x - 1.0;
    let oy = 2.0 * u.y - 1.0;

    // Handle degeneracy at the origin.
    if ox == 0.0 && oy == 0.0 {
        return Point2f::zero();
    }

    let (r, theta) = if ox.abs() > oy.abs() {
        (ox, PI_OVER_FOUR * (oy / ox))
    } else {
        (oy, PI_OVER_TWO - PI_OVER_FOUR * (ox / oy))
    };
    Point2f::new(r * theta.cos(), r * theta.sin())
}

/// Sample a direction on a hemisphere using cosine-weighted sampling.
///
/// * `u` - The random sample point.
#[inline]
pub fn cosine_sample_hemisphere(u: &Point2f) -> Vector3f {
    let d = concentric_sample_disk(u);
    let z = max(0.0, 1.0 - d.x * d.x - d.y * d.y).sqrt();
    Vector3f::new(d.x, d.y, z)
}

/// Returns the PDF for cosine-weighted sampling a direction from a hemisphere.
///
/// * `cos_theta` - Cosine term of incident radiance.
#[inline]
pub fn cosine_hemisphere_pdf(cos_theta: Float) -> Float {
    cos_theta * INV_PI
}

/// Weight samples using the power heuristic with exponent 2. Both arguments
/// are densities already scaled by their sample counts.
///
/// * `f` - Scaled density of the technique being weighted.
/// * `g` - Scaled density of the other technique.
#[inline]
pub fn power_heuristic(f: Float, g: Float) -> Float {
    let f2 = f * f;
    let g2 = g * g;
    if f2 + g2 > 0.0 {
        f2 / (f2 + g2)
    } else {
        0.0
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    #[test]
    fn power_heuristic_is_complementary() {
        let w1 = power_heuristic(0.3, 0.7);
        let w2 = power_heuristic(0.7, 0.3);
        assert!(approx_eq!(Float, w1 + w2, 1.0, epsilon = 1e-6));
        assert_eq!(power_heuristic(0.0, 0.0), 0.0);
    }

    #[test]
    fn stratified_1d_has_one_sample_per_stratum() {
        let mut rng = RNG::new(3);
        let samples = stratified_sample_1d(&mut rng, 8);
        for (i, s) in samples.iter().enumerate() {
            assert_eq!((s * 8.0) as usize, i);
        }
    }

    proptest! {
        #[test]
        fn sphere_samples_are_unit(u in 0.0..1.0f32, v in 0.0..1.0f32) {
            let d = uniform_sample_sphere(&Point2f::new(u, v));
            prop_assert!(approx_eq!(Float, d.length(), 1.0, epsilon = 1e-4));
        }

        #[test]
        fn cosine_samples_are_upper_hemisphere(u in 0.0..1.0f32, v in 0.0..1.0f32) {
            let d = cosine_sample_hemisphere(&Point2f::new(u, v));
            prop_assert!(d.z >= 0.0);
            prop_assert!(approx_eq!(Float, d.length(), 1.0, epsilon = 1e-4));
        }
    }
}
