use anyhow::{Context, Result};
use cardray_renderer::{render, save_ppm, RenderConfig, Scene};

/// Output file, written to the working directory.
const OUTPUT_PATH: &str = "cardray.ppm";

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting cardray");

    let scene = Scene::logo();
    log::info!("Scene has {} spheres", scene.grid().len());

    // A failed write is logged, not fatal: the process still exits 0 and
    // may leave a partial file behind.
    if let Err(e) = run(&scene, &RenderConfig::default()) {
        log::error!("{:?}", e);
    }
}

fn run(scene: &Scene, config: &RenderConfig) -> Result<()> {
    let image = render(scene, config);
    save_ppm(&image, OUTPUT_PATH).with_context(|| format!("Failed to write {}", OUTPUT_PATH))?;
    Ok(())
}
