//! Light Nodes

use kernel::geometry::*;
use kernel::light::*;
use kernel::sample::*;
use kernel::scene::*;

/// Places a light in the scene graph. The node itself has no geometry; the
/// light is positioned by the transformations above it.
#[derive(Clone)]
pub struct LightNode {
    light: ArcSceneLight,
}

impl LightNode {
    /// Create a new `LightNode`.
    ///
    /// * `light` - The light.
    pub fn new(light: ArcSceneLight) -> Self {
        Self { light }
    }
}

impl SceneObject for LightNode {
    fn intersect(&self, _sample: &Sample, _ray: &Ray) -> Option<Intersection> {
        None
    }

    fn is_intersecting(&self, _sample: &Sample, _ray: &Ray) -> bool {
        false
    }

    fn bounding_box(&self) -> Bounds3f {
        Bounds3f::empty()
    }

    fn light(&self) -> Option<ArcSceneLight> {
        Some(self.light.clone())
    }
}
