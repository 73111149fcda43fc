//! Lambertian Material

use kernel::common::*;
use kernel::geometry::*;
use kernel::reflection::*;
use kernel::sample::*;
use kernel::sampling::*;
use kernel::scene::*;
use kernel::shader::*;
use kernel::spectrum::*;

/// Implements a perfectly diffuse surface, optionally emitting light.
#[derive(Clone, Debug)]
pub struct Lambertian {
    /// Fraction of light reflected.
    pub albedo: Spectral,

    /// Radiance emitted by the surface.
    pub emission: Spectral,
}

impl Lambertian {
    /// Create a new `Lambertian` material.
    ///
    /// * `albedo` - Fraction of light reflected.
    pub fn new(albedo: Spectral) -> Self {
        if albedo.max_component() > 1.0 {
            warn!("Lambertian albedo {:?} reflects more light than it receives", albedo);
        }
        Self {
            albedo,
            emission: Spectral::ZERO,
        }
    }

    /// Make the surface emit light.
    ///
    /// * `emission` - Emitted radiance.
    pub fn with_emission(mut self, emission: Spectral) -> Self {
        self.emission = emission;
        self
    }
}

impl Shader for Lambertian {
    fn bsdf(&self, _sample: &Sample, context: &IntersectionContext) -> Option<Box<dyn Bsdf>> {
        if self.albedo.is_black() {
            return None;
        }
        Some(Box::new(LambertianBsdf::new(
            Frame::from_normal(&context.normal),
            self.albedo,
        )))
    }

    fn emission(
        &self,
        _sample: &Sample,
        context: &IntersectionContext,
        omega_out: &Vector3f,
    ) -> Spectral {
        if omega_out.dot(&context.geometric_normal) > 0.0 {
            self.emission
        } else {
            Spectral::ZERO
        }
    }
}

/// BSDF of a Lambertian surface.
#[derive(Copy, Clone, Debug)]
pub struct LambertianBsdf {
    frame: Frame,
    albedo: Spectral,
}

impl LambertianBsdf {
    /// Create a new `LambertianBsdf`.
    ///
    /// * `frame`  - Shading frame.
    /// * `albedo` - Fraction of light reflected.
    pub fn new(frame: Frame, albedo: Spectral) -> Self {
        Self { frame, albedo }
    }
}

const CAPS: BsdfCaps = BsdfCaps::REFLECTION.union(BsdfCaps::DIFFUSE);

impl Bsdf for LambertianBsdf {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn caps(&self) -> BsdfCaps {
        CAPS
    }

    fn evaluate(
        &self,
        omega_in: &Vector3f,
        omega_out: &Vector3f,
        allowed_caps: BsdfCaps,
    ) -> BsdfOut {
        if !allowed_caps.allows(CAPS) || omega_in.z <= 0.0 || omega_out.z <= 0.0 {
            return BsdfOut::default();
        }
        BsdfOut::new(self.albedo * INV_PI, cosine_hemisphere_pdf(omega_out.z))
    }

    fn sample(
        &self,
        omega_in: &Vector3f,
        sample: &Point2f,
        _component_sample: Float,
        allowed_caps: BsdfCaps,
    ) -> SampleBsdfOut {
        if !allowed_caps.allows(CAPS) || omega_in.z <= 0.0 {
            return SampleBsdfOut::default();
        }
        let omega_out = cosine_sample_hemisphere(sample);
        SampleBsdfOut {
            omega_out,
            value: self.albedo * INV_PI,
            pdf: cosine_hemisphere_pdf(omega_out.z),
            used_caps: CAPS,
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    fn bsdf() -> LambertianBsdf {
        LambertianBsdf::new(Frame::from_normal(&Vector3f::new(0.0, 0.0, 1.0)), Spectral::new(0.5))
    }

    #[test]
    fn sampled_directions_match_evaluation() {
        let bsdf = bsdf();
        let omega_in = Vector3f::new(0.0, 0.0, 1.0);
        let out = bsdf.sample(&omega_in, &Point2f::new(0.3, 0.7), 0.5, BsdfCaps::ALL);
        assert!(!out.is_empty());
        assert!(out.omega_out.z > 0.0);
        let eval = bsdf.evaluate(&omega_in, &out.omega_out, BsdfCaps::ALL);
        assert!(approx_eq!(Float, eval.pdf, out.pdf, epsilon = 1e-6));
        assert!(approx_eq!(Float, eval.value[0], 0.5 * INV_PI, epsilon = 1e-6));
    }

    #[test]
    fn respects_allowed_caps_and_hemisphere() {
        let bsdf = bsdf();
        let up = Vector3f::new(0.0, 0.0, 1.0);
        let down = Vector3f::new(0.0, 0.0, -1.0);
        assert!(bsdf.evaluate(&up, &up, BsdfCaps::ALL_SPECULAR).is_empty());
        assert!(bsdf.evaluate(&up, &down, BsdfCaps::ALL).is_empty());
        assert!(bsdf
            .sample(&up, &Point2f::new(0.5, 0.5), 0.5, BsdfCaps::ALL_SPECULAR)
            .is_empty());
    }
}
