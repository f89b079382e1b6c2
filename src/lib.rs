#![deny(unsafe_code)]

pub mod camera;
pub mod config;
pub mod error;
pub mod field;
pub mod integrator;
pub mod ray;
pub mod sky;
pub mod vec3;

use std::io::{self, Write};
use std::time::Instant;

use indicatif::ProgressBar;
use log::debug;
use rayon::prelude::*;

pub use crate::camera::{Camera, Move};
pub use crate::config::Config;
pub use crate::error::{ConfigError, TraceError, TraceResult};
use crate::field::Field;
use crate::integrator::{rk4_step, State};
pub use crate::ray::Ray;
pub use crate::sky::{Gradient, Sky, SkyKind, Starfield};
use crate::vec3::{Axis::*, Channel::*, Vec3};

/// Color of rays swallowed by the hole.
pub const HORIZON: Vec3 = Vec3(0., 0., 0.);
/// Disk color on even checkerboard cells.
pub const DISK_EVEN: Vec3 = Vec3(1., 0.7, 0.1);
/// Disk color on odd checkerboard cells, a darker amber.
pub const DISK_ODD: Vec3 = Vec3(0.9, 0.4, 0.);

/// Which checkerboard cell of the accretion disk a ray landed on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Parity {
    Even,
    Odd,
}

/// How the march along a ray ended.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Outcome {
    /// Came within the horizon guard of the mass.
    Absorbed { step: usize },
    /// Crossed the y = 0 plane inside the disk annulus at `point`.
    Disk {
        point: Vec3,
        parity: Parity,
        step: usize,
    },
    /// Left the escape radius heading along `direction`.
    Escaped { direction: Vec3, step: usize },
    /// Ran out of steps. Shaded as if it escaped along `direction`.
    Exhausted { direction: Vec3 },
}

/// The black hole, its disk, and a background to fall back on.
///
/// A `Scene` is immutable while rendering; every ray is traced independently,
/// so it can be shared freely between threads.
pub struct Scene<S> {
    config: Config,
    field: Field,
    sky: S,
}

impl<S: Sky> Scene<S> {
    pub fn new(config: Config, sky: S) -> Self {
        Scene {
            field: Field::new(&config),
            config,
            sky,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sky(&self) -> &S {
        &self.sky
    }

    /// Marches `ray` through the field until it is absorbed, hits the disk,
    /// escapes, or runs out of steps.
    ///
    /// A disk crossing is detected by the y coordinate changing sign over one
    /// step. A ray that only grazes y = 0 (product exactly zero) does not
    /// count, and with a large `dt` a crossing near strong curvature can be
    /// stepped over entirely.
    pub fn trace(&self, ray: &Ray) -> TraceResult<Outcome> {
        let c = &self.config;
        let mut state = State {
            position: ray.origin,
            velocity: ray.unit_direction()?,
        };

        for step in 0..c.max_steps {
            if (c.center - state.position).length() < c.horizon_radius {
                return Ok(Outcome::Absorbed { step });
            }

            let next = rk4_step(&self.field, state, c.dt);

            if state.position[Y] * next.position[Y] < 0. {
                if let Some(parity) = self.disk_parity(next.position) {
                    return Ok(Outcome::Disk {
                        point: next.position,
                        parity,
                        step,
                    });
                }
            }

            state = next;

            if (c.center - state.position).length() > c.escape_radius {
                return Ok(Outcome::Escaped {
                    direction: state.velocity,
                    step,
                });
            }
        }

        Ok(Outcome::Exhausted {
            direction: state.velocity,
        })
    }

    /// Checkerboard cell at `p` if `p` lies strictly inside the annulus,
    /// measuring radius from the mass's projection onto the disk plane.
    fn disk_parity(&self, p: Vec3) -> Option<Parity> {
        let c = &self.config;
        let dx = p[X] - c.center[X];
        let dz = p[Z] - c.center[Z];
        let r = (dx * dx + dz * dz).sqrt();
        if r <= c.disk_inner || r >= c.disk_outer {
            return None;
        }

        let cell = (p[X] * c.checker_scale).floor() + (p[Z] * c.checker_scale).floor();
        if cell.rem_euclid(2.) == 0. {
            Some(Parity::Even)
        } else {
            Some(Parity::Odd)
        }
    }

    /// Computes the pixel color along `ray`.
    pub fn color(&self, ray: &Ray) -> TraceResult<Vec3> {
        Ok(match self.trace(ray)? {
            Outcome::Absorbed { .. } => HORIZON,
            Outcome::Disk {
                parity: Parity::Even,
                ..
            } => DISK_EVEN,
            Outcome::Disk {
                parity: Parity::Odd,
                ..
            } => DISK_ODD,
            Outcome::Escaped { direction, .. } | Outcome::Exhausted { direction } => {
                self.sky.shade(direction)
            }
        })
    }
}

/// A rendered frame, stored as rows from top to bottom.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    width: usize,
    height: usize,
    rows: Vec<Vec<Vec3>>,
}

impl Image {
    /// Evaluates `f(x, y)` for every pixel in parallel, one row per task.
    /// `y` counts up from the bottom row, as in viewport coordinates.
    pub fn par_compute(
        nx: usize,
        ny: usize,
        progress: &ProgressBar,
        f: impl Fn(usize, usize) -> TraceResult<Vec3> + Sync,
    ) -> TraceResult<Image> {
        let rows = (0..ny)
            .into_par_iter()
            .rev()
            .map(|y| {
                let row: TraceResult<Vec<Vec3>> = (0..nx).map(|x| f(x, y)).collect();
                progress.inc(1);
                row
            })
            .collect::<TraceResult<Vec<Vec<Vec3>>>>()?;
        Ok(Image {
            width: nx,
            height: ny,
            rows,
        })
    }

    /// Serial version of `par_compute`.
    pub fn compute(
        nx: usize,
        ny: usize,
        progress: &ProgressBar,
        mut f: impl FnMut(usize, usize) -> TraceResult<Vec3>,
    ) -> TraceResult<Image> {
        let rows = (0..ny)
            .rev()
            .map(|y| {
                let row: TraceResult<Vec<Vec3>> = (0..nx).map(|x| f(x, y)).collect();
                progress.inc(1);
                row
            })
            .collect::<TraceResult<Vec<Vec<Vec3>>>>()?;
        Ok(Image {
            width: nx,
            height: ny,
            rows,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel at column `x` of row `row`, counting rows from the top.
    pub fn pixel(&self, x: usize, row: usize) -> Vec3 {
        self.rows[row][x]
    }

    /// Packs the image as 8-bit RGB triples, top row first, the layout a
    /// streaming framebuffer texture expects.
    pub fn to_rgb24(&self) -> Vec<u8> {
        self.rows
            .iter()
            .flatten()
            .flat_map(|&c| [to_u8(c[R]), to_u8(c[G]), to_u8(c[B])])
            .collect()
    }
}

/// Quantizes one color channel. Values outside [0, 1] are clamped here and
/// nowhere else.
pub fn to_u8(x: f64) -> u8 {
    (255.999 * x).floor().clamp(0., 255.) as u8
}

/// Writes `image` as a plain-text (P3) PPM.
pub fn write_ppm(image: &Image, mut out: impl Write) -> io::Result<()> {
    writeln!(out, "P3\n{} {}\n255", image.width, image.height)?;
    for scanline in &image.rows {
        for &col in scanline {
            writeln!(out, "{} {} {}", to_u8(col[R]), to_u8(col[G]), to_u8(col[B]))?;
        }
    }
    out.flush()
}

/// Maps pixel index `i` of `n` onto `[0, 1]`.
fn viewport_coord(i: usize, n: usize) -> f64 {
    if n > 1 {
        i as f64 / (n - 1) as f64
    } else {
        0.5
    }
}

/// Renders an `nx` by `ny` frame of `scene` from `camera` on the rayon pool.
pub fn par_render(
    nx: usize,
    ny: usize,
    camera: &Camera,
    scene: &Scene<impl Sky>,
    progress: &ProgressBar,
) -> TraceResult<Image> {
    debug!(
        "rendering {}x{} from {:?} on {} threads",
        nx,
        ny,
        camera.origin,
        rayon::current_num_threads()
    );
    let start = Instant::now();
    let image = Image::par_compute(nx, ny, progress, |x, y| {
        let r = camera.get_ray(viewport_coord(x, nx), viewport_coord(y, ny));
        scene.color(&r)
    })?;
    debug!("rendered {} pixels in {:.2?}", nx * ny, start.elapsed());
    Ok(image)
}

/// Single-threaded `par_render`.
pub fn render(
    nx: usize,
    ny: usize,
    camera: &Camera,
    scene: &Scene<impl Sky>,
    progress: &ProgressBar,
) -> TraceResult<Image> {
    debug!("rendering {}x{} from {:?} serially", nx, ny, camera.origin);
    let start = Instant::now();
    let image = Image::compute(nx, ny, progress, |x, y| {
        let r = camera.get_ray(viewport_coord(x, nx), viewport_coord(y, ny));
        scene.color(&r)
    })?;
    debug!("rendered {} pixels in {:.2?}", nx * ny, start.elapsed());
    Ok(image)
}
