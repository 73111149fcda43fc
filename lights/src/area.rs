//! Area Light Source

use kernel::common::*;
use kernel::geometry::*;
use kernel::light::*;
use kernel::sample::*;
use kernel::spectrum::*;

/// Implements a parallelogram emitting a uniform radiance. The light spans
/// `origin + s * edge_u + t * edge_v` for `s, t` in `[0, 1]` and emits to the
/// side of `edge_u x edge_v`, or to both sides if it is double sided.
#[derive(Clone, Debug)]
pub struct AreaLight {
    /// Corner of the parallelogram in light space.
    pub origin: Point3f,

    /// First edge.
    pub edge_u: Vector3f,

    /// Second edge.
    pub edge_v: Vector3f,

    /// Emitted radiance.
    pub radiance: Spectral,

    /// Emit from both sides.
    pub double_sided: bool,

    /// Number of emission samples per evaluation.
    pub number_of_samples: usize,

    /// Unnormalized normal `edge_u x edge_v`.
    cross: Vector3f,

    /// Unit normal.
    normal: Vector3f,

    /// Surface area.
    area: Float,
}

impl AreaLight {
    /// Returns a new single sided `AreaLight`.
    ///
    /// * `origin`            - Corner of the parallelogram.
    /// * `edge_u`            - First edge.
    /// * `edge_v`            - Second edge.
    /// * `radiance`          - Emitted radiance.
    /// * `number_of_samples` - Number of emission samples per evaluation.
    pub fn new(
        origin: Point3f,
        edge_u: Vector3f,
        edge_v: Vector3f,
        radiance: Spectral,
        number_of_samples: usize,
    ) -> Self {
        let cross = edge_u.cross(&edge_v);
        let area = cross.length();
        if area <= 0.0 {
            warn!("Degenerate area light with edges {:?} and {:?}", edge_u, edge_v);
        }
        let normal = if area > 0.0 { cross / area } else { Vector3f::zero() };
        Self {
            origin,
            edge_u,
            edge_v,
            radiance,
            double_sided: false,
            number_of_samples: number_of_samples.max(1),
            cross,
            normal,
            area,
        }
    }

    /// Emit from both sides.
    pub fn with_double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }

    /// Returns the surface area.
    pub fn area(&self) -> Float {
        self.area
    }

    /// Returns the radiance leaving the light towards `target` along `direction`
    /// with the solid angle density of sampling that point by area.
    ///
    /// * `target`    - Receiving point.
    /// * `direction` - Unit direction from the receiving point to the light.
    /// * `distance`  - Distance to the light.
    fn arriving(
        &self,
        target: &Point3f,
        direction: Vector3f,
        distance: Float,
    ) -> Option<LightSample> {
        let mut cos_light = -direction.dot(&self.normal);
        if self.double_sided {
            cos_light = abs(cos_light);
        }
        if cos_light <= 0.0 || self.area <= 0.0 {
            return None;
        }
        let pdf = distance * distance / (self.area * cos_light);
        let shadow_ray = Ray::bounded(
            *target,
            direction,
            TOLERANCE,
            distance * (1.0 - TOLERANCE),
        );
        Some(LightSample::new(self.radiance, pdf, shadow_ray))
    }
}

impl SceneLight for AreaLight {
    /// Sample a point uniformly over the surface and return the radiance it
    /// sends towards a target point.
    ///
    /// * `_sample`        - The sample.
    /// * `light_sample`   - Sample to pick the point.
    /// * `target`         - Receiving point.
    /// * `_target_normal` - Surface normal at the receiving point.
    fn sample_emission(
        &self,
        _sample: &Sample,
        light_sample: &Point2f,
        target: &Point3f,
        _target_normal: &Vector3f,
    ) -> Option<LightSample> {
        let p = self.origin + self.edge_u * light_sample.x + self.edge_v * light_sample.y;
        let to_light = p - *target;
        let distance = to_light.length();
        if distance <= 0.0 {
            return None;
        }
        self.arriving(target, to_light / distance, distance)
    }

    /// Intersect a ray with the parallelogram.
    ///
    /// * `_sample` - The sample.
    /// * `ray`     - The ray.
    fn emission(&self, _sample: &Sample, ray: &Ray) -> Option<LightSample> {
        let denominator = ray.direction.dot(&self.cross);
        if denominator == 0.0 {
            return None;
        }
        let t = (self.origin - ray.origin).dot(&self.cross) / denominator;
        if t <= ray.t_min || t >= ray.t_max {
            return None;
        }

        let w = ray.at(t) - self.origin;
        let norm = self.cross.length_squared();
        let s = w.cross(&self.edge_v).dot(&self.cross) / norm;
        let r = self.edge_u.cross(&w).dot(&self.cross) / norm;
        if !(0.0..=1.0).contains(&s) || !(0.0..=1.0).contains(&r) {
            return None;
        }

        let length = ray.direction.length();
        self.arriving(&ray.origin, ray.direction / length, t * length)
    }

    /// Returns the power radiated into the hemisphere of each emitting side.
    fn total_power(&self, _scene_bound: &BoundingSphere) -> Spectral {
        let sides = if self.double_sided { 2.0 } else { 1.0 };
        self.radiance * (sides * PI * self.area)
    }

    fn is_singular(&self) -> bool {
        false
    }

    fn number_of_emission_samples(&self) -> usize {
        self.number_of_samples
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    /// Unit square at `z = 1` facing down.
    fn ceiling_panel() -> AreaLight {
        AreaLight::new(
            Point3f::new(-0.5, -0.5, 1.0),
            Vector3f::new(0.0, 1.0, 0.0),
            Vector3f::new(1.0, 0.0, 0.0),
            Spectral::new(2.0),
            4,
        )
    }

    #[test]
    fn sampled_point_is_hit_with_the_same_density() {
        let light = ceiling_panel();
        let target = Point3f::new(0.2, -0.1, 0.0);
        let up = Vector3f::new(0.0, 0.0, 1.0);
        let ls = light
            .sample_emission(&Sample::new(), &Point2f::new(0.3, 0.8), &target, &up)
            .expect("light sample");

        let hit = light
            .emission(&Sample::new(), &Ray::new(target, ls.shadow_ray.direction * 3.0))
            .expect("light hit");
        assert!(approx_eq!(Float, ls.pdf, hit.pdf, epsilon = 1e-4));
        assert!(approx_eq!(Float, ls.shadow_ray.t_max, hit.shadow_ray.t_max, epsilon = 1e-4));
        assert_eq!(hit.radiance, Spectral::new(2.0));
    }

    #[test]
    fn density_straight_below_the_centre() {
        let light = ceiling_panel();
        let ray = Ray::new(Point3f::zero(), Vector3f::new(0.0, 0.0, 1.0));
        let hit = light.emission(&Sample::new(), &ray).expect("light hit");
        // distance 1, area 1, cosine 1
        assert!(approx_eq!(Float, hit.pdf, 1.0, epsilon = 1e-5));
        assert!(hit.shadow_ray.t_max < 1.0);
    }

    #[test]
    fn rays_missing_the_panel_see_nothing() {
        let light = ceiling_panel();
        let sample = Sample::new();
        let beside = Ray::new(Point3f::new(0.8, 0.0, 0.0), Vector3f::new(0.0, 0.0, 1.0));
        assert!(light.emission(&sample, &beside).is_none());
        let away = Ray::new(Point3f::zero(), Vector3f::new(0.0, 0.0, -1.0));
        assert!(light.emission(&sample, &away).is_none());
        let short = Ray::bounded(Point3f::zero(), Vector3f::new(0.0, 0.0, 1.0), 0.0, 0.5);
        assert!(light.emission(&sample, &short).is_none());
    }

    #[test]
    fn back_side_emits_only_when_double_sided() {
        let target = Point3f::new(0.0, 0.0, 2.0);
        let down = Vector3f::new(0.0, 0.0, -1.0);
        let u = Point2f::new(0.5, 0.5);
        assert!(ceiling_panel()
            .sample_emission(&Sample::new(), &u, &target, &down)
            .is_none());

        let light = ceiling_panel().with_double_sided();
        assert!(light
            .sample_emission(&Sample::new(), &u, &target, &down)
            .is_some());
        let scene_bound = BoundingSphere::default();
        assert!(approx_eq!(Float, light.total_power(&scene_bound)[0], 4.0 * PI, epsilon = 1e-4));
        assert!(!light.is_singular());
    }
}
