//! Perspective Camera

use kernel::camera::*;
use kernel::common::*;
use kernel::geometry::*;
use kernel::sample::*;
use kernel::time_period::*;

/// Pinhole perspective camera. Screen coordinates span `[0, 1]^2` with `y`
/// pointing down.
#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    /// Position of the pinhole.
    position: Point3f,

    /// Unit viewing direction.
    forward: Vector3f,

    /// Unit vector towards the right edge of the screen.
    right: Vector3f,

    /// Unit vector towards the top edge of the screen.
    up: Vector3f,

    /// Half the width of the image plane at unit distance.
    half_width: Float,

    /// Half the height of the image plane at unit distance.
    half_height: Float,

    /// Period the shutter is open, relative to the frame time.
    shutter: TimePeriod,
}

impl PerspectiveCamera {
    /// Create a new perspective camera.
    ///
    /// * `position` - Position of the pinhole.
    /// * `look_at`  - Point the camera looks at.
    /// * `sky`      - Approximate up direction.
    /// * `fov`      - Horizontal field-of-view angle in degrees.
    /// * `aspect`   - Width over height of the image.
    pub fn new(
        position: Point3f,
        look_at: Point3f,
        sky: Vector3f,
        fov: Float,
        aspect: Float,
    ) -> Self {
        let mut forward = (look_at - position).normalize();
        if forward.has_nans() || forward.length_squared() == 0.0 {
            warn!("Camera looks at its own position, looking down -z");
            forward = Vector3f::new(0.0, 0.0, -1.0);
        }

        let mut right = forward.cross(&sky);
        if right.length_squared() == 0.0 {
            warn!("Camera sky vector is parallel to the view direction");
            right = forward.cross(&Vector3f::new(1.0, 0.0, 0.0));
            if right.length_squared() == 0.0 {
                right = forward.cross(&Vector3f::new(0.0, 1.0, 0.0));
            }
        }
        let right = right.normalize();
        let up = right.cross(&forward);

        let fov = clamp(fov, 1e-3, 179.0);
        let aspect = if aspect > 0.0 { aspect } else { 1.0 };
        let half_width = (fov.to_radians() * 0.5).tan();

        Self {
            position,
            forward,
            right,
            up,
            half_width,
            half_height: half_width / aspect,
            shutter: TimePeriod::default(),
        }
    }

    /// Set the period the shutter is open, relative to the frame time.
    ///
    /// * `shutter` - The shutter period.
    pub fn with_shutter(mut self, shutter: TimePeriod) -> Self {
        self.shutter = shutter;
        self
    }

    /// Returns the direction through a screen coordinate; not normalized.
    ///
    /// * `screen` - Screen coordinate.
    fn direction(&self, screen: &Point2f) -> Vector3f {
        let x = (2.0 * screen.x - 1.0) * self.half_width;
        let y = (1.0 - 2.0 * screen.y) * self.half_height;
        self.forward + self.right * x + self.up * y
    }
}

impl Camera for PerspectiveCamera {
    fn primary_ray(&self, sample: &Sample, screen_space_delta: &Point2f) -> DifferentialRay {
        let s = sample.screen_sample;
        let ray = Ray::new(self.position, self.direction(&s).normalize());
        let differentials = RayDifferential {
            rx_origin: self.position,
            rx_direction: self
                .direction(&Point2f::new(s.x + screen_space_delta.x, s.y))
                .normalize(),
            ry_origin: self.position,
            ry_direction: self
                .direction(&Point2f::new(s.x, s.y + screen_space_delta.y))
                .normalize(),
        };
        DifferentialRay::with_differentials(ray, differentials)
    }

    fn as_depth(&self, ray: &DifferentialRay, t: Float) -> Float {
        t * ray.ray.direction.dot(&self.forward)
    }

    fn shutter_delta(&self) -> TimePeriod {
        self.shutter
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
