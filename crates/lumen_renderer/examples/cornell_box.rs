//! Cornell box comparison.
//!
//! Renders the built-in Cornell box once per light-transport integrator and
//! saves one PNG for each, so their noise and bias can be compared side by
//! side.

use lumen_renderer::{render, save_png, IntegratorConfig, RenderConfig, SceneKind};

fn main() {
    println!("Lumen - Cornell Box Integrator Comparison");
    println!("==========================================");

    let (width, height) = (360, 256);
    let start = std::time::Instant::now();
    let built = SceneKind::CornellBox.build(width, height);
    println!("Scene built in {:?}", start.elapsed());

    let runs: [(&str, u32); 5] = [
        ("whitted", 4),
        ("hemispherical_direct", 1),
        ("area_direct", 1),
        ("path_tracing", 64),
        ("next_event", 16),
    ];

    for (name, samples_per_pixel) in runs {
        let integrator = match name.parse::<IntegratorConfig>() {
            Ok(config) => config.build(),
            Err(e) => {
                eprintln!("Skipping {}: {}", name, e);
                continue;
            }
        };
        let config = RenderConfig {
            samples_per_pixel,
            ..RenderConfig::default()
        };

        println!("Rendering {} @ {} spp...", name, samples_per_pixel);
        let start = std::time::Instant::now();
        let image = render(&built.camera, &built.scene, integrator.as_ref(), &config);
        println!("Rendered in {:?}", start.elapsed());

        let filename = format!("cornell_{}.png", name);
        match save_png(&image, &filename) {
            Ok(()) => println!("Saved to {}", filename),
            Err(e) => eprintln!("Failed to save {}: {}", filename, e),
        }
    }
}
