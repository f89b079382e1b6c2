use crate::ray::Ray;
use crate::vec3::Vec3;

/// Distance the camera moves per `Camera::nudge`.
pub const NUDGE: f64 = 0.1;

/// A pinhole camera looking down -z with a fixed viewport.
///
/// The camera is plain data: drivers that move it around (keyboard, scripted
/// flythrough) keep their own copy and hand it to the renderer each frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    pub origin: Vec3,
    pub viewport_height: f64,
    /// Width over height.
    pub aspect: f64,
    pub focal_length: f64,
}

/// Directions a camera can be nudged in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Move {
    Forward,
    Back,
    Left,
    Right,
    Up,
    Down,
}

impl Move {
    fn offset(self) -> Vec3 {
        match self {
            Move::Forward => Vec3(0., 0., -NUDGE),
            Move::Back => Vec3(0., 0., NUDGE),
            Move::Left => Vec3(-NUDGE, 0., 0.),
            Move::Right => Vec3(NUDGE, 0., 0.),
            Move::Up => Vec3(0., NUDGE, 0.),
            Move::Down => Vec3(0., -NUDGE, 0.),
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Camera::at(Vec3::default())
    }
}

impl Camera {
    /// A 16:9 camera at `origin` with a 2-unit tall viewport one unit ahead.
    pub fn at(origin: Vec3) -> Self {
        Camera {
            origin,
            viewport_height: 2.,
            aspect: 16. / 9.,
            focal_length: 1.,
        }
    }

    /// Returns the camera shifted one nudge in direction `m`.
    pub fn nudge(self, m: Move) -> Self {
        Camera {
            origin: self.origin + m.offset(),
            ..self
        }
    }

    /// Ray through viewport coordinates `(s, t)`, where `(0, 0)` is the
    /// lower-left corner and `(1, 1)` the upper-right.
    pub fn get_ray(&self, s: f64, t: f64) -> Ray {
        let horizontal = Vec3(self.aspect * self.viewport_height, 0., 0.);
        let vertical = Vec3(0., self.viewport_height, 0.);
        let lower_left_corner =
            self.origin - horizontal / 2. - vertical / 2. - Vec3(0., 0., self.focal_length);
        Ray {
            origin: self.origin,
            direction: lower_left_corner + s * horizontal + t * vertical - self.origin,
        }
    }
}
