use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use lensing::vec3::Vec3;
use lensing::{Config, SkyKind};
use log::LevelFilter;

/// Log levels accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Frame sizes matching the live preview and the saved still.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Preset {
    /// 200x150, what the interactive window draws every frame.
    Preview,
    /// 1280x720 screenshot.
    Still,
}

impl Preset {
    pub fn dimensions(self) -> (usize, usize) {
        match self {
            Preset::Preview => (200, 150),
            Preset::Still => (1280, 720),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SkyArg {
    Starfield,
    Gradient,
}

impl From<SkyArg> for SkyKind {
    fn from(s: SkyArg) -> Self {
        match s {
            SkyArg::Starfield => SkyKind::Starfield,
            SkyArg::Gradient => SkyKind::Gradient,
        }
    }
}

/// Parses `x,y,z`.
fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f64>().map_err(|e| format!("{:?}: {}", p, e)))
        .collect::<Result<Vec<_>, _>>()?;
    match parts[..] {
        [x, y, z] => Ok(Vec3(x, y, z)),
        _ => Err(format!("expected three comma-separated numbers, got {:?}", s)),
    }
}

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "lensing")]
#[command(about = "Renders a point-mass black hole with an accretion disk to a PPM image")]
pub struct Args {
    /// Frame size preset; --width and --height override it
    #[arg(long, value_enum, default_value = "still")]
    pub preset: Preset,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<usize>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<usize>,

    /// Background for escaping rays
    #[arg(long, value_enum, default_value = "starfield")]
    pub sky: SkyArg,

    /// Camera position as x,y,z
    #[arg(long, value_parser = parse_vec3, default_value = "0,0,0", allow_hyphen_values = true)]
    pub origin: Vec3,

    /// Gravitational parameter of the hole
    #[arg(long)]
    pub gm: Option<f64>,

    /// Integration step budget per ray
    #[arg(long)]
    pub steps: Option<usize>,

    /// Distance at which rays stop marching and see the sky
    #[arg(long)]
    pub escape_radius: Option<f64>,

    /// Render on a single thread
    #[arg(long)]
    pub serial: bool,

    /// Output file, or "-" for stdout
    #[arg(short, long, default_value = "blackhole.ppm")]
    pub output: PathBuf,

    /// Set the logging level (RUST_LOG still applies per module)
    #[arg(long, value_enum, default_value = "info")]
    pub debug_level: LogLevel,
}

impl Args {
    pub fn dimensions(&self) -> (usize, usize) {
        let (w, h) = self.preset.dimensions();
        (self.width.unwrap_or(w), self.height.unwrap_or(h))
    }

    /// Default constants with any command-line overrides applied.
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        if let Some(gm) = self.gm {
            config = config.with_gm(gm);
        }
        if let Some(steps) = self.steps {
            config = config.with_max_steps(steps);
        }
        if let Some(r) = self.escape_radius {
            config = config.with_escape_radius(r);
        }
        config
    }
}
