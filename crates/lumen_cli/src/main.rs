use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use lumen_renderer::{render, save_image, RenderSettings};

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let mut settings = match &args.config {
        Some(path) => RenderSettings::from_json_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => RenderSettings::default(),
    };
    args.apply(&mut settings)
        .context("Invalid command line arguments")?;
    settings.validate().context("Invalid render settings")?;

    info!(
        "Scene {} with the {} integrator",
        settings.scene,
        settings.integrator.name()
    );

    let built = settings.scene.build(settings.width, settings.height);
    let integrator = settings.integrator.build();
    let image = render(
        &built.camera,
        &built.scene,
        integrator.as_ref(),
        &settings.render_config(),
    );

    save_image(&image, &args.output)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;

    Ok(())
}
