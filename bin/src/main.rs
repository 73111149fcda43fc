#[macro_use]
extern crate log;

mod demo;
mod options;

use clap::Parser;
use integrators::*;
use kernel::render_engine::*;
use options::*;
use output::*;
use std::sync::Arc;

fn main() {
    // Initialize `env_logger`.
    env_logger::init();

    let options = Options::parse();

    // In case of error report it and exit with failure.
    if let Err(e) = render(&options) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn render(options: &Options) -> Result<(), String> {
    let defaults = options.render_defaults();
    let image = Arc::new(Image::new(defaults.resolution));

    let mut engine = RenderEngine::from(&defaults);
    engine.set_show_progress(!options.quiet);
    engine.set_camera(demo::camera(&defaults.resolution));
    engine.set_scene(demo::scene());
    engine.set_sampler(options.sampler(&defaults));
    engine.set_tracer(Box::new(DirectLighting::new(
        LightStrategy::from(options.strategy.as_str()),
        defaults.max_ray_generation,
    )));
    engine.set_target(image.clone());

    engine
        .render(options.time, &options.bucket())
        .map_err(|e| e.to_string())?;

    image.write(&options.image_file)
}
