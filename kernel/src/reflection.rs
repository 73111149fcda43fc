//! Reflection

use crate::common::*;
use crate::geometry::*;
use crate::spectrum::*;
use bitflags::bitflags;

bitflags! {
    /// Capabilities of BSDF components. A component is allowed by a set of
    /// capabilities when all of its flags are contained in the set.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct BsdfCaps: u32 {
        const EMISSION = 0x01;
        const REFLECTION = 0x02;
        const TRANSMISSION = 0x04;
        const DIFFUSE = 0x10;
        const SPECULAR = 0x20;
        const GLOSSY = 0x40;
        const ALL_DIFFUSE = Self::REFLECTION.bits()
            | Self::TRANSMISSION.bits()
            | Self::DIFFUSE.bits();
        const ALL_SPECULAR = Self::REFLECTION.bits()
            | Self::TRANSMISSION.bits()
            | Self::SPECULAR.bits();
        const ALL_GLOSSY = Self::REFLECTION.bits()
            | Self::TRANSMISSION.bits()
            | Self::GLOSSY.bits();
        const ALL = Self::ALL_DIFFUSE.bits() | Self::ALL_SPECULAR.bits() | Self::ALL_GLOSSY.bits();
    }
}

impl BsdfCaps {
    /// Returns true if a component with capabilities `component` may be used.
    ///
    /// * `component` - Capabilities of the component.
    pub fn allows(&self, component: BsdfCaps) -> bool {
        self.contains(component)
    }
}

/// Result of evaluating a BSDF for a pair of directions.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BsdfOut {
    /// BSDF value.
    pub value: Spectral,

    /// Probability density of sampling the outgoing direction.
    pub pdf: Float,
}

impl BsdfOut {
    /// Create a new `BsdfOut`.
    ///
    /// * `value` - BSDF value.
    /// * `pdf`   - Probability density.
    pub fn new(value: Spectral, pdf: Float) -> Self {
        Self { value, pdf }
    }

    /// Returns true if the pair carries no energy or cannot be sampled.
    pub fn is_empty(&self) -> bool {
        self.pdf <= 0.0 || self.value.is_black()
    }
}

/// Result of sampling an outgoing direction from a BSDF.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SampleBsdfOut {
    /// Outgoing direction in the BSDF's local frame.
    pub omega_out: Vector3f,

    /// BSDF value.
    pub value: Spectral,

    /// Probability density of the direction.
    pub pdf: Float,

    /// Capabilities of the sampled component.
    pub used_caps: BsdfCaps,
}

impl SampleBsdfOut {
    /// Returns true if the sample carries no energy or has no density.
    pub fn is_empty(&self) -> bool {
        self.pdf <= 0.0 || self.value.is_black()
    }
}

impl Default for BsdfCaps {
    fn default() -> Self {
        Self::empty()
    }
}

/// Bidirectional scattering distribution function at a surface point. All
/// directions are expressed in the local `frame()`, pointing away from the
/// surface.
pub trait Bsdf {
    /// Returns the local shading frame.
    fn frame(&self) -> &Frame;

    /// Returns the capabilities of all components.
    fn caps(&self) -> BsdfCaps;

    /// Evaluate the BSDF for a pair of directions, restricted to components
    /// allowed by `allowed_caps`.
    ///
    /// * `omega_in`     - Direction towards the viewer.
    /// * `omega_out`    - Direction towards the light.
    /// * `allowed_caps` - Allowed components.
    fn evaluate(
        &self,
        omega_in: &Vector3f,
        omega_out: &Vector3f,
        allowed_caps: BsdfCaps,
    ) -> BsdfOut;

    /// Sample an outgoing direction, restricted to components allowed by
    /// `allowed_caps`.
    ///
    /// * `omega_in`         - Direction towards the viewer.
    /// * `sample`           - Sample for the direction.
    /// * `component_sample` - Sample to select a component.
    /// * `allowed_caps`     - Allowed components.
    fn sample(
        &self,
        omega_in: &Vector3f,
        sample: &Point2f,
        component_sample: Float,
        allowed_caps: BsdfCaps,
    ) -> SampleBsdfOut;
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
