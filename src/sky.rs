//! Background shading for rays that leave the scene.
//!
//! A `Sky` only ever sees the direction a ray was heading when it escaped, so
//! every policy is a pure function of that direction.

use std::f64::consts::PI;

use crate::vec3::{Axis::*, Vec3};

pub trait Sky: Send + Sync {
    /// Color seen looking along `direction`. `direction` need not be unit
    /// length.
    fn shade(&self, direction: Vec3) -> Vec3;
}

impl<'r, T: Sky + ?Sized> Sky for &'r T {
    fn shade(&self, direction: Vec3) -> Vec3 {
        (*self).shade(direction)
    }
}

impl<T: Sky + ?Sized> Sky for Box<T> {
    fn shade(&self, direction: Vec3) -> Vec3 {
        (**self).shade(direction)
    }
}

/// Vertical blend between two colors.
#[derive(Copy, Clone, Debug)]
pub struct Gradient {
    /// Color looking straight down.
    pub bottom: Vec3,
    /// Color looking straight up.
    pub top: Vec3,
}

impl Default for Gradient {
    fn default() -> Self {
        Gradient {
            bottom: Vec3::from(1.),
            top: Vec3(0.5, 0.7, 1.),
        }
    }
}

impl Sky for Gradient {
    fn shade(&self, direction: Vec3) -> Vec3 {
        let unit = direction.into_unit();
        if !unit.is_finite() {
            return self.bottom;
        }
        let t = 0.5 * (unit[Y] + 1.);
        (1. - t) * self.bottom + t * self.top
    }
}

/// Dark sky with a faint angular grid and direction-hashed stars.
///
/// Stars come from a product of sines rather than an RNG, so the same
/// direction always gets the same answer and the sky holds still while the
/// camera moves.
#[derive(Copy, Clone, Debug)]
pub struct Starfield {
    /// Angular distance between grid lines, in radians.
    pub grid_spacing: f64,
    /// Angular width of a grid line, in radians.
    pub grid_thickness: f64,
    /// Frequency of the star hash.
    pub star_frequency: f64,
    /// Hash values above this become stars.
    pub star_threshold: f64,
    pub grid: Vec3,
    pub star: Vec3,
    pub base: Vec3,
}

impl Default for Starfield {
    fn default() -> Self {
        Starfield {
            grid_spacing: 0.4,
            grid_thickness: 0.02,
            star_frequency: 100.,
            star_threshold: 0.98,
            grid: Vec3(0., 0.3, 0.),
            star: Vec3::from(1.),
            base: Vec3(0., 0., 0.05),
        }
    }
}

impl Starfield {
    /// Polar and azimuthal angles of a unit vector. The polar angle is in
    /// `[0, π]`, the azimuth in `(0, 2π]`.
    fn angles(u: Vec3) -> (f64, f64) {
        let theta = (-u[Y]).acos();
        let phi = f64::atan2(-u[Z], u[X]) + PI;
        (theta, phi)
    }

    fn on_grid(&self, angle: f64) -> bool {
        angle % self.grid_spacing < self.grid_thickness
    }
}

impl Sky for Starfield {
    fn shade(&self, direction: Vec3) -> Vec3 {
        let u = direction.into_unit();
        if !u.is_finite() {
            return self.base;
        }

        let (theta, phi) = Self::angles(u);
        if self.on_grid(theta) || self.on_grid(phi) {
            return self.grid;
        }

        let hash = (self.star_frequency * u)
            .map(f64::sin)
            .reduce(std::ops::Mul::mul);
        if hash > self.star_threshold {
            return self.star;
        }

        self.base
    }
}

/// Run-time choice of background policy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum SkyKind {
    #[default]
    Starfield,
    Gradient,
}

impl SkyKind {
    /// Builds the policy with its default parameters.
    pub fn build(self) -> Box<dyn Sky> {
        match self {
            SkyKind::Starfield => Box::new(Starfield::default()),
            SkyKind::Gradient => Box::new(Gradient::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_ends() {
        let g = Gradient::default();
        assert_eq!(g.shade(Vec3(0., 1., 0.)), g.top);
        assert_eq!(g.shade(Vec3(0., -5., 0.)), g.bottom);
        let mid = g.shade(Vec3(1., 0., 0.));
        assert_eq!(mid, 0.5 * g.bottom + 0.5 * g.top);
    }

    #[test]
    fn gradient_ignores_length() {
        let g = Gradient::default();
        assert_eq!(g.shade(Vec3(3., 4., 0.)), g.shade(Vec3(6., 8., 0.)));
    }

    #[test]
    fn starfield_base_along_z() {
        // theta = phi = pi/2, off every grid line; sin(0) kills the star hash.
        let s = Starfield::default();
        assert_eq!(s.shade(Vec3(0., 0., 1.)), s.base);
        assert_eq!(s.shade(Vec3(0., 0., 7.)), s.base);
    }

    #[test]
    fn starfield_grid_at_pole() {
        // Looking straight down gives theta = 0, which is on a grid line.
        let s = Starfield::default();
        assert_eq!(s.shade(Vec3(0., -1., 0.)), s.grid);
    }

    #[test]
    fn starfield_has_some_stars() {
        let s = Starfield::default();
        let n = 200;
        let mut stars = 0;
        for i in 0..n {
            for j in 0..n {
                let theta = 0.1 + 2.9 * i as f64 / n as f64;
                let phi = 6.2 * j as f64 / n as f64;
                let d = Vec3(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin());
                let c = s.shade(d);
                assert!(c == s.base || c == s.grid || c == s.star);
                if c == s.star {
                    stars += 1;
                }
            }
        }
        assert!(stars > 0);
        assert!(stars < n * n / 10);
    }

    #[test]
    fn zero_direction_is_not_nan() {
        assert_eq!(Starfield::default().shade(Vec3::default()), Starfield::default().base);
        assert_eq!(Gradient::default().shade(Vec3::default()), Gradient::default().bottom);
    }

    #[test]
    fn kinds_build_their_policy() {
        let d = Vec3(0., 1., 0.);
        assert_eq!(SkyKind::Gradient.build().shade(d), Gradient::default().shade(d));
        assert_eq!(SkyKind::Starfield.build().shade(d), Starfield::default().shade(d));
    }
}
