mod cli;
mod logger;

use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use lensing::*;

use crate::cli::Args;
use crate::logger::init_logger;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logger(args.debug_level.into());

    let config = args.config();
    config.validate().context("invalid scene constants")?;

    let (nx, ny) = args.dimensions();
    let camera = Camera::at(args.origin);
    let sky = SkyKind::from(args.sky);
    let scene = Scene::new(config, sky.build());
    info!(
        "rendering {}x{} from {:?}, {:?} sky, {} steps of {}",
        nx, ny, camera.origin, sky, config.max_steps, config.dt
    );

    let progress = ProgressBar::new(ny as u64);
    progress.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40} {pos}/{len} scanlines")
            .context("bad progress template")?,
    );

    let image = if args.serial {
        render(nx, ny, &camera, &scene, &progress)
    } else {
        par_render(nx, ny, &camera, &scene, &progress)
    }
    .context("render failed")?;
    progress.finish_and_clear();

    let out: Box<dyn Write> = if args.output.as_os_str() == "-" {
        Box::new(io::stdout().lock())
    } else {
        let file = File::create(&args.output)
            .with_context(|| format!("creating {}", args.output.display()))?;
        Box::new(file)
    };
    write_ppm(&image, BufWriter::new(out)).context("writing image")?;

    if args.output.as_os_str() != "-" {
        info!("saved to {}", args.output.display());
    }
    Ok(())
}
