//! Mirror Material

use kernel::common::*;
use kernel::geometry::*;
use kernel::reflection::*;
use kernel::sample::*;
use kernel::scene::*;
use kernel::shader::*;
use kernel::spectrum::*;

/// Implements a simple mirror, modeled with perfect specular reflection.
#[derive(Clone, Debug)]
pub struct Mirror {
    /// Reflectivity of the mirror.
    pub reflectance: Spectral,
}

impl Mirror {
    /// Create a new `Mirror`.
    ///
    /// * `reflectance` - Reflectivity of the mirror.
    pub fn new(reflectance: Spectral) -> Self {
        Self { reflectance }
    }
}

impl Shader for Mirror {
    fn bsdf(&self, _sample: &Sample, context: &IntersectionContext) -> Option<Box<dyn Bsdf>> {
        if self.reflectance.is_black() {
            return None;
        }
        Some(Box::new(MirrorBsdf {
            frame: Frame::from_normal(&context.normal),
            reflectance: self.reflectance,
        }))
    }
}

/// BSDF of a perfect mirror. It is a delta distribution so it can only be
/// sampled, never evaluated.
#[derive(Copy, Clone, Debug)]
pub struct MirrorBsdf {
    frame: Frame,
    reflectance: Spectral,
}

const CAPS: BsdfCaps = BsdfCaps::REFLECTION.union(BsdfCaps::SPECULAR);

impl Bsdf for MirrorBsdf {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn caps(&self) -> BsdfCaps {
        CAPS
    }

    fn evaluate(
        &self,
        _omega_in: &Vector3f,
        _omega_out: &Vector3f,
        _allowed_caps: BsdfCaps,
    ) -> BsdfOut {
        BsdfOut::default()
    }

    fn sample(
        &self,
        omega_in: &Vector3f,
        _sample: &Point2f,
        _component_sample: Float,
        allowed_caps: BsdfCaps,
    ) -> SampleBsdfOut {
        if !allowed_caps.allows(CAPS) || omega_in.z <= 0.0 {
            return SampleBsdfOut::default();
        }
        let omega_out = Vector3f::new(-omega_in.x, -omega_in.y, omega_in.z);
        SampleBsdfOut {
            omega_out,
            value: self.reflectance / omega_out.z,
            pdf: 1.0,
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

    #[test]
    fn reflects_about_the_normal() {
        let bsdf = MirrorBsdf {
            frame: Frame::from_normal(&Vector3f::new(0.0, 0.0, 1.0)),
            reflectance: Spectral::new(0.8),
        };
        let omega_in = Vector3f::new(0.6, 0.0, 0.8);
        let out = bsdf.sample(&omega_in, &Point2f::zero(), 0.0, BsdfCaps::ALL);
        assert_eq!(out.omega_out, Vector3f::new(-0.6, 0.0, 0.8));
        assert!(out.used_caps.contains(BsdfCaps::SPECULAR));
        assert!(approx_eq!(Float, out.value[0] * out.omega_out.z, 0.8, epsilon = 1e-6));
        assert!(bsdf
            .sample(&omega_in, &Point2f::zero(), 0.0, BsdfCaps::ALL_DIFFUSE)
            .is_empty());
        assert!(bsdf.evaluate(&omega_in, &out.omega_out, BsdfCaps::ALL).is_empty());
    }
}
