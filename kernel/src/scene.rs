//! Scene

use crate::common::*;
use crate::geometry::*;
use crate::light::*;
use crate::medium::*;
use crate::sample::*;
use crate::shader::*;
use std::sync::Arc;

/// Whether a ray enters or leaves a solid at an intersection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SolidEvent {
    /// The ray hits the outside of the surface.
    Entering,

    /// The ray hits the inside of the surface.
    Leaving,
}

impl SolidEvent {
    /// Classify a hit from the ray direction and the outward normal.
    ///
    /// * `direction` - Ray direction.
    /// * `normal`    - Outward surface normal.
    pub fn from_direction(direction: &Vector3f, normal: &Vector3f) -> Self {
        if direction.dot(normal) < 0.0 {
            Self::Entering
        } else {
            Self::Leaving
        }
    }
}

/// The nearest surface hit along a ray, in world space.
#[derive(Clone)]
pub struct Intersection {
    /// Ray parameter of the hit.
    pub t: Float,

    /// Hit point.
    pub point: Point3f,

    /// Outward unit surface normal.
    pub normal: Vector3f,

    /// Material of the surface.
    pub shader: Option<ArcShader>,

    /// Medium filling the solid the surface bounds.
    pub interior: Option<ArcMedium>,

    /// Whether the ray enters or leaves the solid.
    pub solid_event: SolidEvent,
}

/// Local geometry at a surface point used for shading.
#[derive(Clone)]
pub struct IntersectionContext {
    /// Ray parameter of the hit.
    pub t: Float,

    /// Hit point.
    pub point: Point3f,

    /// Unit geometric normal, outward.
    pub geometric_normal: Vector3f,

    /// Unit shading normal, facing the incoming ray.
    pub normal: Vector3f,

    /// Material of the surface.
    pub shader: Option<ArcShader>,

    /// Medium filling the solid the surface bounds.
    pub interior: Option<ArcMedium>,

    /// Whether the ray enters or leaves the solid.
    pub solid_event: SolidEvent,
}

/// A node of the scene graph.
pub trait SceneObject: Send + Sync {
    /// Returns the nearest intersection within the bounded extent of the ray.
    ///
    /// * `sample` - The sample; provides the time of the ray.
    /// * `ray`    - The ray.
    fn intersect(&self, sample: &Sample, ray: &Ray) -> Option<Intersection>;

    /// Returns true if anything blocks the bounded extent of the ray.
    ///
    /// * `sample` - The sample; provides the time of the ray.
    /// * `ray`    - The ray.
    fn is_intersecting(&self, sample: &Sample, ray: &Ray) -> bool {
        self.intersect(sample, ray).is_some()
    }

    /// Build the shading context for an intersection found by `intersect()`.
    ///
    /// * `_sample`      - The sample.
    /// * `ray`          - The ray.
    /// * `intersection` - The intersection.
    fn local_context(
        &self,
        _sample: &Sample,
        ray: &Ray,
        intersection: &Intersection,
    ) -> IntersectionContext {
        IntersectionContext {
            t: intersection.t,
            point: intersection.point,
            geometric_normal: intersection.normal,
            normal: intersection.normal.face_forward(&-ray.direction),
            shader: intersection.shader.clone(),
            interior: intersection.interior.clone(),
            solid_event: intersection.solid_event,
        }
    }

    /// Returns the world space bounding box over all time.
    fn bounding_box(&self) -> Bounds3f;

    /// Returns the world space bounding sphere over all time.
    fn bounding_sphere(&self) -> BoundingSphere {
        self.bounding_box().bounding_sphere()
    }

    /// Returns the medium filling the object.
    fn interior(&self) -> Option<ArcMedium> {
        None
    }

    /// Returns the material of the object.
    fn shader(&self) -> Option<ArcShader> {
        None
    }

    /// Returns the direct children in the scene graph.
    fn children(&self) -> &[ArcSceneObject] {
        &[]
    }

    /// Returns the light source held by this node.
    fn light(&self) -> Option<ArcSceneLight> {
        None
    }

    /// Returns true if the node's own transformation varies over time.
    fn has_motion(&self) -> bool {
        false
    }

    /// Returns the transformation from this node's children to world space
    /// at a given time.
    ///
    /// * `_time`  - The time.
    /// * `parent` - Transformation of the parent node to world space.
    fn local_space(&self, _time: Float, parent: &Transform) -> Transform {
        *parent
    }
}

/// Atomic reference counted `SceneObject`.
pub type ArcSceneObject = Arc<dyn SceneObject>;
