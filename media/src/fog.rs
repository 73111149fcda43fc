//! Fog

use kernel::common::*;
use kernel::geometry::*;
use kernel::medium::*;
use kernel::sample::*;
use kernel::spectrum::*;

/// Implements a homogeneous absorbing medium. Light is attenuated
/// exponentially with the distance travelled; nothing is scattered in.
#[derive(Clone, Debug)]
pub struct Fog {
    /// Extinction coefficient per unit distance.
    sigma: Spectral,

    /// Priority where media overlap.
    priority: i32,
}

impl Fog {
    /// Create a new `Fog`.
    ///
    /// * `sigma`    - Extinction coefficient per unit distance.
    /// * `priority` - Priority where media overlap.
    pub fn new(sigma: Spectral, priority: i32) -> Self {
        let sigma = if sigma.has_nans() || sigma.max_component() < 0.0 {
            warn!("Invalid fog extinction {:?}, using a clear medium", sigma);
            Spectral::ZERO
        } else {
            sigma.clamp(0.0, INFINITY)
        };
        Self { sigma, priority }
    }

    /// Returns the extinction coefficient.
    pub fn sigma(&self) -> Spectral {
        self.sigma
    }
}

impl Medium for Fog {
    fn priority(&self) -> i32 {
        self.priority
    }

    fn transmittance(&self, _sample: &Sample, ray: &Ray) -> Spectral {
        self.sigma.attenuation(max(ray.length(), 0.0))
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
    fn attenuates_exponentially_with_distance() {
        let fog = Fog::new(Spectral::new(0.5), 1);
        let ray = Ray::bounded(Point3f::zero(), Vector3f::new(0.0, 0.0, 2.0), 0.0, 1.0);
        let t = fog.transmittance(&Sample::new(), &ray);
        assert!(approx_eq!(Float, t[0], (-1.0 as Float).exp(), epsilon = 1e-6));
        assert_eq!(fog.priority(), 1);
    }

    #[test]
    fn infinite_rays_are_absorbed_unless_clear() {
        let ray = Ray::new(Point3f::zero(), Vector3f::new(1.0, 0.0, 0.0));
        let sample = Sample::new();
        assert_eq!(
            Fog::new(Spectral::new(0.1), 0).transmittance(&sample, &ray),
            Spectral::ZERO
        );
        assert_eq!(
            Fog::new(Spectral::ZERO, 0).transmittance(&sample, &ray),
            Spectral::ONE
        );
    }
}
