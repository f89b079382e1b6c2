use crate::field::Field;
use crate::vec3::Vec3;

/// Position and velocity of a photon mid-flight. Lives only as long as the
/// trace of a single ray.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct State {
    pub position: Vec3,
    pub velocity: Vec3,
}

/// Advances `state` by one classical fourth-order Runge-Kutta step of size
/// `dt`, treating the system as
///
/// ```text
/// d(position)/dt = velocity
/// d(velocity)/dt = field.acceleration(position)
/// ```
///
/// The step size is fixed by the caller. There is deliberately no error
/// control here; renders must be reproducible for a given `dt`.
#[inline]
pub fn rk4_step(field: &Field, state: State, dt: f64) -> State {
    let State { position, velocity } = state;
    let half = 0.5 * dt;

    let a1 = field.acceleration(position);
    let v1 = velocity;

    let a2 = field.acceleration(position + half * v1);
    let v2 = velocity + half * a1;

    let a3 = field.acceleration(position + half * v2);
    let v3 = velocity + half * a2;

    let a4 = field.acceleration(position + dt * v3);
    let v4 = velocity + dt * a3;

    let sixth = dt / 6.;
    State {
        position: position + sixth * (v1 + 2. * v2 + 2. * v3 + v4),
        velocity: velocity + sixth * (a1 + 2. * a2 + 2. * a3 + a4),
    }
}
