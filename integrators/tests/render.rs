//! End to end renders through the engine.

use cameras::*;
use float_cmp::*;
use integrators::*;
use itertools::Itertools;
use kernel::camera::*;
use kernel::common::*;
use kernel::error::*;
use kernel::geometry::*;
use kernel::output_sample::*;
use kernel::reflection::*;
use kernel::render_engine::*;
use kernel::render_target::*;
use kernel::sample::*;
use kernel::sampler::*;
use kernel::scene::*;
use kernel::shader::*;
use kernel::spectrum::*;
use lights::*;
use materials::*;
use media::*;
use output::*;
use samplers::*;
use shapes::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Render target keeping every output sample.
struct Recorder {
    resolution: Point2i,
    samples: Mutex<Vec<OutputSample>>,
}

impl Recorder {
    fn new(resolution: Point2i) -> Self {
        Self {
            resolution,
            samples: Mutex::new(vec![]),
        }
    }

    fn sorted(&self) -> Vec<OutputSample> {
        self.samples
            .lock()
            .unwrap()
            .iter()
            .copied()
            .sorted_by(|a, b| {
                let ka = (a.screen_coordinate.x, a.screen_coordinate.y, a.radiance[0]);
                let kb = (b.screen_coordinate.x, b.screen_coordinate.y, b.radiance[0]);
                ka.partial_cmp(&kb).unwrap()
            })
            .collect()
    }
}

impl RenderTarget for Recorder {
    fn resolution(&self) -> Point2i {
        self.resolution
    }

    fn write_render(&self, samples: &[OutputSample]) {
        self.samples.lock().unwrap().extend_from_slice(samples);
    }
}

/// Camera at `z = 1` looking down the z axis.
fn camera_looking_down(fov: Float) -> ArcCamera {
    Arc::new(PerspectiveCamera::new(
        Point3f::new(0.0, 0.0, 1.0),
        Point3f::zero(),
        Vector3f::new(0.0, 1.0, 0.0),
        fov,
        1.0,
    ))
}

/// Diffuse floor lit by a uniform sky and a point light.
fn lit_floor() -> ArcSceneObject {
    Arc::new(List::new(vec![
        Arc::new(
            Plane::new(Point3f::zero(), Vector3f::new(0.0, 0.0, 1.0), 100.0)
                .with_shader(Arc::new(Lambertian::new(Spectral::new(0.5)))),
        ),
        Arc::new(LightNode::new(Arc::new(SkyLight::new(Spectral::ONE, 1)))),
        Arc::new(LightNode::new(Arc::new(PointLight::new(
            Point3f::new(0.3, 0.2, 2.0),
            Spectral::new(2.0),
        )))),
    ]))
}

fn engine(
    camera: ArcCamera,
    scene: ArcSceneObject,
    tracer: DirectLighting,
    sampler: Box<dyn Sampler>,
    target: ArcRenderTarget,
    threads: usize,
) -> RenderEngine {
    let mut engine = RenderEngine::new();
    engine.set_show_progress(false);
    engine.set_number_of_threads(threads);
    engine.set_camera(camera);
    engine.set_scene(scene);
    engine.set_tracer(Box::new(tracer));
    engine.set_sampler(sampler);
    engine.set_target(target);
    engine
}

fn average(image: &Image) -> Float {
    let resolution = image.resolution();
    let mut sum = 0.0;
    for y in 0..resolution.y {
        for x in 0..resolution.x {
            sum += image.pixel(x, y)[0];
        }
    }
    sum / (resolution.x * resolution.y) as Float
}

#[test]
fn same_seed_gives_same_output() {
    let render = |seed: u64| {
        let resolution = Point2i::new(24, 20);
        let target = Arc::new(Recorder::new(resolution));
        let mut engine = engine(
            camera_looking_down(40.0),
            lit_floor(),
            DirectLighting::new(LightStrategy::One, 4),
            Box::new(Stratifier::new(4, resolution, 0)),
            target.clone(),
            4,
        );
        engine.seed(seed);
        engine.render(0.0, &Bounds2f::unit()).unwrap();
        target.sorted()
    };

    let a = render(11);
    let b = render(11);
    assert_eq!(a.len(), 24 * 20 * 4);
    assert_eq!(a, b);
}

#[test]
fn canceled_render_stops_after_the_first_batch() {
    let resolution = Point2i::new(64, 64);
    let image = Arc::new(Image::new(resolution));
    let target = Arc::new(CancelAfter::new(image.clone(), 1));
    let mut engine = engine(
        camera_looking_down(40.0),
        lit_floor(),
        DirectLighting::new(LightStrategy::All, 2),
        Box::new(Stratifier::new(4, resolution, 0)),
        target.clone(),
        1,
    );
    engine.render(0.0, &Bounds2f::unit()).unwrap();
    assert_eq!(target.writes(), 1);
    assert_eq!(image.number_of_samples(), 1024);
}

#[test]
fn missing_collaborators_are_reported_in_order() {
    let resolution = Point2i::new(4, 4);
    let mut engine = RenderEngine::new();
    engine.set_show_progress(false);
    let bucket = Bounds2f::unit();

    assert_eq!(engine.render(0.0, &bucket), Err(RenderError::NoCamera));
    engine.set_camera(camera_looking_down(40.0));
    assert_eq!(engine.render(0.0, &bucket), Err(RenderError::NoTracer));
    engine.set_tracer(Box::new(DirectLighting::new(LightStrategy::All, 1)));
    assert_eq!(engine.render(0.0, &bucket), Err(RenderError::NoScene));
    engine.set_scene(lit_floor());
    assert_eq!(engine.render(0.0, &bucket), Err(RenderError::NoSampler));
    engine.set_sampler(Box::new(LatinHypercube::new(1, resolution, 0)));
    assert_eq!(engine.render(0.0, &bucket), Err(RenderError::NoTarget));
    engine.set_target(Arc::new(Image::new(resolution)));

    let outside = Bounds2f::new(Point2f::new(0.5, 0.5), Point2f::new(1.5, 1.0));
    assert_eq!(
        engine.render(0.0, &outside),
        Err(RenderError::InvalidBucket { bucket: outside })
    );
    assert_eq!(engine.render(0.0, &bucket), Ok(()));
}

#[test]
fn bucket_restricts_the_output() {
    let resolution = Point2i::new(16, 16);
    let target = Arc::new(Recorder::new(resolution));
    let mut engine = engine(
        camera_looking_down(40.0),
        lit_floor(),
        DirectLighting::new(LightStrategy::All, 1),
        Box::new(LatinHypercube::new(2, resolution, 0)),
        target.clone(),
        2,
    );
    let bucket = Bounds2f::new(Point2f::new(0.0, 0.5), Point2f::new(0.5, 1.0));
    engine.render(0.0, &bucket).unwrap();

    let samples = target.sorted();
    assert_eq!(samples.len(), 8 * 8 * 2);
    assert!(samples.iter().all(|s| s.screen_coordinate.x <= 0.5 && s.screen_coordinate.y >= 0.5));
}

#[test]
fn diffuse_floor_under_uniform_sky_reflects_its_albedo() {
    let albedo = 0.5;
    let scene: ArcSceneObject = Arc::new(List::new(vec![
        Arc::new(
            Plane::new(Point3f::zero(), Vector3f::new(0.0, 0.0, 1.0), 100.0)
                .with_shader(Arc::new(Lambertian::new(Spectral::new(albedo)))),
        ),
        Arc::new(LightNode::new(Arc::new(SkyLight::new(Spectral::ONE, 1)))),
    ]));

    let resolution = Point2i::new(32, 32);
    let image = Arc::new(Image::new(resolution));
    let mut engine = engine(
        camera_looking_down(30.0),
        scene,
        DirectLighting::new(LightStrategy::All, 1),
        Box::new(Stratifier::new(16, resolution, 0)),
        image.clone(),
        2,
    );
    engine.seed(3);
    engine.render(0.0, &Bounds2f::unit()).unwrap();

    let expected = albedo * 1.0;
    let measured = average(&image);
    assert!(
        abs(measured - expected) < 0.03 * expected,
        "measured {measured}, expected {expected}"
    );
}

/// Diffuse floor lit by two point lights.
fn two_point_lights() -> ArcSceneObject {
    Arc::new(List::new(vec![
        Arc::new(
            Plane::new(Point3f::zero(), Vector3f::new(0.0, 0.0, 1.0), 100.0)
                .with_shader(Arc::new(Lambertian::new(Spectral::new(0.8)))),
        ),
        Arc::new(LightNode::new(Arc::new(PointLight::new(
            Point3f::new(0.3, 0.2, 2.0),
            Spectral::new(2.0),
        )))),
        Arc::new(LightNode::new(Arc::new(PointLight::new(
            Point3f::new(-0.5, 0.0, 1.5),
            Spectral::new(1.0),
        )))),
    ]))
}

#[test]
fn selecting_one_light_matches_sampling_all() {
    let resolution = Point2i::new(32, 32);
    let render = |strategy: LightStrategy| {
        let image = Arc::new(Image::new(resolution));
        let mut engine = engine(
            camera_looking_down(40.0),
            two_point_lights(),
            DirectLighting::new(strategy, 1),
            Box::new(Stratifier::new(16, resolution, 0)),
            image.clone(),
            2,
        );
        engine.render(0.0, &Bounds2f::unit()).unwrap();
        average(&image)
    };

    let all = render(LightStrategy::All);
    let one = render(LightStrategy::One);
    assert!(abs(all - one) < 0.05 * all, "all {all}, one {one}");
}

/// Diffuse floor under a square panel of half width `half_width` at height
/// `height`. The panel is no geometry, so the camera above sees through it.
fn panel_over_floor(albedo: Float, half_width: Float, height: Float) -> ArcSceneObject {
    Arc::new(List::new(vec![
        Arc::new(
            Plane::new(Point3f::zero(), Vector3f::new(0.0, 0.0, 1.0), 100.0)
                .with_shader(Arc::new(Lambertian::new(Spectral::new(albedo)))),
        ),
        Arc::new(LightNode::new(Arc::new(AreaLight::new(
            Point3f::new(-half_width, -half_width, height),
            Vector3f::new(0.0, 2.0 * half_width, 0.0),
            Vector3f::new(2.0 * half_width, 0.0, 0.0),
            Spectral::ONE,
            4,
        )))),
    ]))
}

/// Form factor from a point to a parallel `a` by `b` rectangle with one
/// corner straight above it at unit height.
fn corner_form_factor(a: Float, b: Float) -> Float {
    let sa = (1.0 + a * a).sqrt();
    let sb = (1.0 + b * b).sqrt();
    (a / sa * (b / sa).atan() + b / sb * (a / sb).atan()) / TWO_PI
}

#[test]
fn diffuse_floor_under_area_light_matches_the_form_factor() {
    let (albedo, half_width, height) = (0.5, 0.5, 0.5);
    let resolution = Point2i::new(16, 16);
    let image = Arc::new(Image::new(resolution));
    let mut engine = engine(
        camera_looking_down(1.0),
        panel_over_floor(albedo, half_width, height),
        DirectLighting::new(LightStrategy::All, 1),
        Box::new(Stratifier::new(16, resolution, 0)),
        image.clone(),
        2,
    );
    engine.seed(5);
    engine.render(0.0, &Bounds2f::unit()).unwrap();

    // Four corners meet below the centre of the panel.
    let x = half_width / height;
    let expected = albedo * 4.0 * corner_form_factor(x, x);
    let measured = average(&image);
    assert!(
        abs(measured - expected) < 0.03 * expected,
        "measured {measured}, expected {expected}"
    );
}

#[test]
fn area_light_is_seen_by_escaping_primary_rays() {
    let scene: ArcSceneObject = Arc::new(List::new(vec![Arc::new(LightNode::new(Arc::new(
        AreaLight::new(
            Point3f::new(-10.0, -10.0, -1.0),
            Vector3f::new(20.0, 0.0, 0.0),
            Vector3f::new(0.0, 20.0, 0.0),
            Spectral::new(3.0),
            1,
        ),
    )))]));

    let resolution = Point2i::new(4, 4);
    let image = Arc::new(Image::new(resolution));
    let mut engine = engine(
        camera_looking_down(10.0),
        scene,
        DirectLighting::new(LightStrategy::All, 1),
        Box::new(LatinHypercube::new(1, resolution, 0)),
        image.clone(),
        1,
    );
    engine.render(0.0, &Bounds2f::unit()).unwrap();
    assert!(approx_eq!(Float, average(&image), 3.0, epsilon = 1e-4));
}

/// Mirror floor under an emitting ceiling; the ceiling is only visible in
/// the mirror.
fn mirror_room(reflectance: Float, emission: Float) -> ArcSceneObject {
    Arc::new(List::new(vec![
        Arc::new(
            Plane::new(Point3f::zero(), Vector3f::new(0.0, 0.0, 1.0), 100.0)
                .with_shader(Arc::new(Mirror::new(Spectral::new(reflectance)))),
        ),
        Arc::new(
            Plane::new(Point3f::new(0.0, 0.0, 2.0), Vector3f::new(0.0, 0.0, -1.0), 100.0)
                .with_shader(Arc::new(
                    Lambertian::new(Spectral::ZERO).with_emission(Spectral::new(emission)),
                )),
        ),
    ]))
}

#[test]
fn generation_limit_cuts_off_reflections() {
    let resolution = Point2i::new(8, 8);
    let render = |max_ray_generation: usize| {
        let image = Arc::new(Image::new(resolution));
        let mut engine = engine(
            camera_looking_down(30.0),
            mirror_room(0.8, 2.0),
            DirectLighting::new(LightStrategy::All, max_ray_generation),
            Box::new(LatinHypercube::new(1, resolution, 0)),
            image.clone(),
            1,
        );
        engine.render(0.0, &Bounds2f::unit()).unwrap();
        image
    };

    let direct_only = render(0);
    let reflected = render(1);
    for y in 0..resolution.y {
        for x in 0..resolution.x {
            assert_eq!(direct_only.pixel(x, y), Spectral::ZERO);
            assert!(approx_eq!(Float, reflected.pixel(x, y)[0], 1.6, epsilon = 1e-4));
            assert!(approx_eq!(Float, reflected.alpha(x, y), 1.0, epsilon = 1e-6));
        }
    }
}

#[test]
fn fog_attenuates_primary_rays() {
    let sigma = 0.5;
    let scene: ArcSceneObject = Arc::new(
        List::new(vec![Arc::new(
            Plane::new(Point3f::zero(), Vector3f::new(0.0, 0.0, 1.0), 100.0).with_shader(Arc::new(
                Lambertian::new(Spectral::ZERO).with_emission(Spectral::ONE),
            )),
        )])
        .with_interior(Arc::new(Fog::new(Spectral::new(sigma), 0))),
    );

    let resolution = Point2i::new(4, 4);
    let image = Arc::new(Image::new(resolution));
    let mut engine = engine(
        camera_looking_down(1.0),
        scene,
        DirectLighting::new(LightStrategy::All, 0),
        Box::new(LatinHypercube::new(1, resolution, 0)),
        image.clone(),
        1,
    );
    engine.render(0.0, &Bounds2f::unit()).unwrap();

    let expected = (-sigma as Float).exp();
    assert!(approx_eq!(Float, average(&image), expected, epsilon = 1e-3));
}

/// Lambertian shader counting how often it registers samples.
struct CountingShader {
    inner: Lambertian,
    requests: AtomicUsize,
}

impl Shader for CountingShader {
    fn bsdf(&self, sample: &Sample, context: &IntersectionContext) -> Option<Box<dyn Bsdf>> {
        self.inner.bsdf(sample, context)
    }

    fn request_samples(&self, _sampler: &mut dyn Sampler) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn shared_shaders_register_samples_once() {
    let shader = Arc::new(CountingShader {
        inner: Lambertian::new(Spectral::new(0.5)),
        requests: AtomicUsize::new(0),
    });
    let scene: ArcSceneObject = Arc::new(List::new(vec![
        Arc::new(Sphere::new(Point3f::new(-1.0, 0.0, 0.0), 0.5).with_shader(shader.clone())),
        Arc::new(Sphere::new(Point3f::new(1.0, 0.0, 0.0), 0.5).with_shader(shader.clone())),
        Arc::new(LightNode::new(Arc::new(DirectionalLight::new(
            Vector3f::new(0.0, 0.0, -1.0),
            Spectral::ONE,
        )))),
    ]));

    let resolution = Point2i::new(4, 4);
    let mut engine = engine(
        camera_looking_down(60.0),
        scene,
        DirectLighting::new(LightStrategy::All, 1),
        Box::new(LatinHypercube::new(1, resolution, 0)),
        Arc::new(Image::new(resolution)),
        1,
    );
    engine.render(0.0, &Bounds2f::unit()).unwrap();
    assert_eq!(shader.requests.load(Ordering::SeqCst), 1);

    engine.render(0.0, &Bounds2f::unit()).unwrap();
    assert_eq!(shader.requests.load(Ordering::SeqCst), 1);
}
