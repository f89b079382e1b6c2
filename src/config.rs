use crate::error::ConfigError;
use crate::vec3::Vec3;

/// Physical and scene constants for a render.
///
/// There is exactly one mass, fixed at `center`, for the lifetime of a render.
/// `Config::default()` is the canonical setup; the `with_*` methods build
/// variations, mostly for tests (e.g. `gm = 0` gives straight-line rays).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Config {
    /// Position of the attracting mass.
    pub center: Vec3,
    /// Gravitational parameter, the product of G and the mass.
    pub gm: f64,
    /// Below this distance from `center` the field is switched off and rays
    /// are absorbed.
    pub horizon_radius: f64,
    /// Accretion disk inner radius, measured in the y = 0 plane.
    pub disk_inner: f64,
    /// Accretion disk outer radius.
    pub disk_outer: f64,
    /// Checkerboard cells per unit length on the disk.
    pub checker_scale: f64,
    /// Fixed integration step.
    pub dt: f64,
    /// Maximum number of integration steps per ray.
    pub max_steps: usize,
    /// Rays farther than this from `center` stop marching and hit the sky.
    pub escape_radius: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            center: Vec3(0., 0., -1.),
            gm: 0.5,
            horizon_radius: 0.2,
            disk_inner: 0.5,
            disk_outer: 2.5,
            checker_scale: 5.,
            dt: 0.1,
            max_steps: 400,
            escape_radius: 6.,
        }
    }
}

impl Config {
    pub fn with_gm(self, gm: f64) -> Self {
        Config { gm, ..self }
    }

    pub fn with_max_steps(self, max_steps: usize) -> Self {
        Config { max_steps, ..self }
    }

    pub fn with_escape_radius(self, escape_radius: f64) -> Self {
        Config {
            escape_radius,
            ..self
        }
    }

    pub fn with_dt(self, dt: f64) -> Self {
        Config { dt, ..self }
    }

    /// Checks that the constants describe a scene the tracer can march.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Vec3(cx, cy, cz) = self.center;
        if let Some(value) = [cx, cy, cz].into_iter().find(|v| !v.is_finite()) {
            return Err(ConfigError::NotFinite {
                name: "center",
                value,
            });
        }

        let scalars = [
            ("gm", self.gm),
            ("horizon_radius", self.horizon_radius),
            ("disk_inner", self.disk_inner),
            ("disk_outer", self.disk_outer),
            ("checker_scale", self.checker_scale),
            ("escape_radius", self.escape_radius),
        ];
        for &(name, value) in &scalars {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { name, value });
            }
            if value < 0. {
                return Err(ConfigError::Negative { name, value });
            }
        }

        if !(self.dt > 0.) || !self.dt.is_finite() {
            return Err(ConfigError::NonPositiveStep(self.dt));
        }
        if self.disk_inner >= self.disk_outer {
            return Err(ConfigError::EmptyDisk {
                inner: self.disk_inner,
                outer: self.disk_outer,
            });
        }
        if self.max_steps == 0 {
            return Err(ConfigError::NoSteps);
        }
        Ok(())
    }
}
