use crate::config::Config;
use crate::vec3::Vec3;

/// Inverse-square attraction toward a single stationary mass.
///
/// This is a heuristic pull, not a metric; it only has to bend rays
/// convincingly.
#[derive(Copy, Clone, Debug)]
pub struct Field {
    pub center: Vec3,
    pub gm: f64,
    pub horizon_radius: f64,
}

impl Field {
    pub fn new(config: &Config) -> Self {
        Field {
            center: config.center,
            gm: config.gm,
            horizon_radius: config.horizon_radius,
        }
    }

    /// Acceleration felt at `position`.
    ///
    /// Inside `horizon_radius` the result is exactly zero, so the last few
    /// steps before a ray is absorbed never divide by a vanishing distance.
    #[inline]
    pub fn acceleration(&self, position: Vec3) -> Vec3 {
        let to_center = self.center - position;
        let d2 = to_center.length_squared();
        let d = d2.sqrt();
        if d < self.horizon_radius {
            return Vec3::default();
        }
        to_center * (self.gm / (d2 * d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn field() -> Field {
        Field::new(&Config::default())
    }

    #[test]
    fn zero_inside_horizon_guard() {
        let f = field();
        assert_eq!(f.acceleration(f.center), Vec3::default());
        assert_eq!(f.acceleration(f.center + Vec3(0.19, 0., 0.)), Vec3::default());
        assert_eq!(f.acceleration(f.center + Vec3(0.1, 0.1, -0.1)), Vec3::default());
    }

    #[test]
    fn inverse_square_on_axis() {
        let f = field();
        // One unit in front of the mass: magnitude GM, pointing along -z.
        let a = f.acceleration(Vec3::default());
        assert_eq!(a, Vec3(0., 0., -0.5));
        // Twice as far: a quarter the pull.
        let a = f.acceleration(Vec3(0., 0., 1.));
        assert!((a.length() - 0.125).abs() < 1e-12);
    }

    #[test]
    fn no_mass_no_pull() {
        let f = Field::new(&Config::default().with_gm(0.));
        assert_eq!(f.acceleration(Vec3(1., 2., 3.)), Vec3::default());
    }

    fn coordinate() -> impl Strategy<Value = f64> {
        prop_oneof![Just(0.0), Just(1.0), Just(-1.0), -20.0..20.0f64]
    }

    fn position() -> impl Strategy<Value = Vec3> {
        (coordinate(), coordinate(), coordinate()).prop_map(|(x, y, z)| Vec3(x, y, z))
    }

    proptest! {
        #[test]
        fn points_at_center_with_inverse_square_magnitude(p in position()) {
            let f = field();
            let to_center = f.center - p;
            let d = to_center.length();
            prop_assume!(d >= f.horizon_radius);

            let a = f.acceleration(p);
            let expected = f.gm / (d * d);
            prop_assert!((a.length() - expected).abs() <= 1e-9 * expected.max(1.));
            // Parallel and same sense as the vector to the mass.
            let cos = a.dot(to_center) / (a.length() * d);
            prop_assert!((cos - 1.).abs() < 1e-9);
        }

        #[test]
        fn zero_for_any_point_inside_guard(
            x in -0.11..0.11f64,
            y in -0.11..0.11f64,
            z in -0.11..0.11f64,
        ) {
            let f = field();
            prop_assert_eq!(f.acceleration(f.center + Vec3(x, y, z)), Vec3::default());
        }
    }
}
