//! Built-in demo scene

use cameras::*;
use kernel::camera::*;
use kernel::common::*;
use kernel::geometry::*;
use kernel::scene::*;
use kernel::spectrum::*;
use kernel::time_period::*;
use lights::*;
use materials::*;
use media::*;
use shapes::*;
use std::sync::Arc;

/// Returns the camera of the demo scene.
///
/// * `resolution` - Output resolution in pixels.
pub fn camera(resolution: &Point2i) -> ArcCamera {
    let aspect = resolution.x as Float / resolution.y.max(1) as Float;
    Arc::new(
        PerspectiveCamera::new(
            Point3f::new(0.0, -6.0, 2.0),
            Point3f::new(0.0, 0.0, 0.8),
            Vector3f::new(0.0, 0.0, 1.0),
            50.0,
            aspect,
        )
        .with_shutter(TimePeriod::new(0.0, 0.5)),
    )
}

/// Returns a diffuse floor with a mirror ball, two diffuse balls of which
/// one is moving, a lamp and a sky, all in a faint haze.
pub fn scene() -> ArcSceneObject {
    let floor = Plane::new(Point3f::zero(), Vector3f::new(0.0, 0.0, 1.0), 50.0)
        .with_shader(Arc::new(Lambertian::new(Spectral::new(0.6))));

    let mirror_ball = Sphere::new(Point3f::new(0.0, 0.0, 1.0), 1.0)
        .with_shader(Arc::new(Mirror::new(Spectral::new(0.9))));

    let red_ball = Sphere::new(Point3f::zero(), 0.6)
        .with_shader(Arc::new(Lambertian::new(Spectral::from_rgb(0.7, 0.1, 0.1))));
    let red_ball = Transformation::new(
        Arc::new(red_ball),
        Transform::translate(&Vector3f::new(-2.0, 0.5, 0.6)),
    );

    let blue_ball = Sphere::new(Point3f::new(2.0, 0.5, 0.5), 0.5)
        .with_shader(Arc::new(Lambertian::new(Spectral::from_rgb(0.1, 0.2, 0.7))));
    let blue_ball = MotionTranslation::new(
        Arc::new(blue_ball),
        Vector3f::zero(),
        Vector3f::new(0.0, 0.0, 0.5),
        TimePeriod::new(0.0, 0.5),
    );

    let lamp = Transformation::new(
        Arc::new(LightNode::new(Arc::new(PointLight::new(
            Point3f::zero(),
            Spectral::from_rgb(20.0, 18.0, 14.0),
        )))),
        Transform::translate(&Vector3f::new(2.0, -3.0, 4.0)),
    );

    let panel = LightNode::new(Arc::new(AreaLight::new(
        Point3f::new(-1.0, -1.0, 3.0),
        Vector3f::new(0.0, 2.0, 0.0),
        Vector3f::new(2.0, 0.0, 0.0),
        Spectral::from_rgb(1.5, 1.5, 1.4),
        4,
    )));

    let sun = LightNode::new(Arc::new(DirectionalLight::new(
        Vector3f::new(-1.0, 1.0, -2.0),
        Spectral::from_rgb(0.8, 0.8, 0.7),
    )));
    let sky = LightNode::new(Arc::new(SkyLight::new(Spectral::from_rgb(0.2, 0.3, 0.5), 4)));

    Arc::new(
        List::new(vec![
            Arc::new(floor),
            Arc::new(mirror_ball),
            Arc::new(red_ball),
            Arc::new(blue_ball),
            Arc::new(lamp),
            Arc::new(panel),
            Arc::new(sun),
            Arc::new(sky),
        ])
        .with_interior(Arc::new(Fog::new(Spectral::new(0.01), 0))),
    )
}
