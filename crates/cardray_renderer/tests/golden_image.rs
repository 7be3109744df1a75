//! Full-frame regression: a seeded, single-sample render must be
//! byte-for-byte reproducible.

use cardray_renderer::{
    render, render_sequential, save_ppm, write_ppm, Camera, RenderConfig, Scene, Shader,
    PPM_HEADER,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const PAYLOAD_LEN: usize = 512 * 512 * 3;

fn single_sample_config(parallel: bool) -> RenderConfig {
    RenderConfig {
        samples_per_pixel: 1,
        seed: Some(0xCA2D),
        parallel,
        ..RenderConfig::default()
    }
}

fn render_sequential_bytes(seed: u64) -> Vec<u8> {
    let scene = Scene::logo();
    let camera = Camera::new();
    let shader = Shader::new(&scene);
    let config = single_sample_config(false);

    let mut rng = StdRng::seed_from_u64(seed);
    let image = render_sequential(&camera, &shader, &config, &mut rng);

    let mut bytes = Vec::new();
    write_ppm(&image, &mut bytes).unwrap();
    bytes
}

#[test]
fn test_sequential_render_is_byte_identical() {
    let first = render_sequential_bytes(1234);
    let second = render_sequential_bytes(1234);

    assert_eq!(first.len(), PPM_HEADER.len() + PAYLOAD_LEN);
    assert_eq!(&first[..15], PPM_HEADER);
    assert!(first == second, "renders with the same seed differ");
}

#[test]
fn test_different_seeds_differ() {
    assert!(render_sequential_bytes(1) != render_sequential_bytes(2));
}

#[test]
fn test_saved_files_are_identical() {
    let _ = env_logger::builder().is_test(true).try_init();

    let dir = std::env::temp_dir();
    let paths = [
        dir.join(format!("cardray-golden-{}-a.ppm", std::process::id())),
        dir.join(format!("cardray-golden-{}-b.ppm", std::process::id())),
    ];

    for path in &paths {
        let image = render(&Scene::logo(), &single_sample_config(true));
        save_ppm(&image, path).unwrap();
    }

    let a = std::fs::read(&paths[0]).unwrap();
    let b = std::fs::read(&paths[1]).unwrap();
    for path in &paths {
        let _ = std::fs::remove_file(path);
    }

    assert_eq!(a.len(), 15 + PAYLOAD_LEN);
    assert_eq!(&a[..15], b"P6 512 512 255 ");
    assert!(a == b, "saved renders with the same seed differ");
}
