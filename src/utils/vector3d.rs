use std::f64::consts::TAU;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

use crate::errors::SimulationError;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vector3D { x, y, z }
    }

    pub fn zeros() -> Self {
        Vector3D::new(0.0, 0.0, 0.0)
    }

    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn dot(&self, other: &Vector3D) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Vector3D) -> Vector3D {
        Vector3D::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn normalize(&self) -> Result<Vector3D, SimulationError> {
        let mag = self.norm();
        if mag == 0.0 || !mag.is_finite() {
            return Err(SimulationError::DomainError(format!(
                "cannot normalize vector with norm {}",
                mag
            )));
        }
        Ok(*self / mag)
    }

    pub fn angle_between(&self, other: &Vector3D) -> Result<f64, SimulationError> {
        let denominator = self.norm() * other.norm();
        if denominator == 0.0 {
            return Err(SimulationError::DomainError(
                "angle between vectors is undefined for a zero vector".to_string(),
            ));
        }
        Ok((self.dot(other) / denominator).clamp(-1.0, 1.0).acos())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f64,
    pub colatitude: f64, // rad from +z, [0, π]
    pub longitude: f64,  // rad from +x towards +y, [0, 2π)
}

impl Spherical {
    pub fn new(radius: f64, colatitude: f64, longitude: f64) -> Self {
        Spherical {
            radius,
            colatitude,
            longitude,
        }
    }
}

impl Vector3D {
    pub fn from_spherical(spherical: &Spherical) -> Self {
        let (sin_colat, cos_colat) = spherical.colatitude.sin_cos();
        let (sin_lon, cos_lon) = spherical.longitude.sin_cos();
        Vector3D::new(
            spherical.radius * sin_colat * cos_lon,
            spherical.radius * sin_colat * sin_lon,
            spherical.radius * cos_colat,
        )
    }

    pub fn to_spherical(&self) -> Spherical {
        let radius = self.norm();
        if radius == 0.0 {
            return Spherical::new(0.0, 0.0, 0.0);
        }
        let colatitude = (self.z / radius).clamp(-1.0, 1.0).acos();
        let longitude = self.y.atan2(self.x).rem_euclid(TAU);
        Spherical::new(radius, colatitude, longitude)
    }

    /// Builds a vector from its components along the local up, north and east
    /// directions at `position`.
    pub fn from_local(
        position: &Vector3D,
        up: f64,
        north: f64,
        east: f64,
    ) -> Result<Vector3D, SimulationError> {
        if position.norm() == 0.0 {
            return Err(SimulationError::DomainError(
                "local horizon is undefined at the origin".to_string(),
            ));
        }
        let spherical = position.to_spherical();
        let (sin_colat, cos_colat) = spherical.colatitude.sin_cos();
        let (sin_lon, cos_lon) = spherical.longitude.sin_cos();

        let up_axis = Vector3D::new(sin_colat * cos_lon, sin_colat * sin_lon, cos_colat);
        let north_axis = Vector3D::new(-cos_colat * cos_lon, -cos_colat * sin_lon, sin_colat);
        let east_axis = Vector3D::new(-sin_lon, cos_lon, 0.0);

        Ok(up * up_axis + north * north_axis + east * east_axis)
    }
}

pub fn cross(a: &Vector3D, b: &Vector3D) -> Vector3D {
    a.cross(b)
}

pub fn dot(a: &Vector3D, b: &Vector3D) -> f64 {
    a.dot(b)
}

pub fn norm(a: &Vector3D) -> f64 {
    a.norm()
}

impl Sum for Vector3D {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Vector3D::zeros(), |a, b| a + b)
    }
}

impl Add for Vector3D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Vector3D::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl AddAssign for Vector3D {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Vector3D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Vector3D::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f64> for Vector3D {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Vector3D::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl Mul<Vector3D> for f64 {
    type Output = Vector3D;

    fn mul(self, vector: Vector3D) -> Vector3D {
        Vector3D::new(self * vector.x, self * vector.y, self * vector.z)
    }
}

impl Div<f64> for Vector3D {
    type Output = Self;

    fn div(self, scalar: f64) -> Self {
        Vector3D::new(self.x / scalar, self.y / scalar, self.z / scalar)
    }
}

impl Neg for Vector3D {
    type Output = Self;

    fn neg(self) -> Self {
        Vector3D::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_vector(rng: &mut StdRng) -> Vector3D {
        Vector3D::new(
            rng.gen_range(-1e7..1e7),
            rng.gen_range(-1e7..1e7),
            rng.gen_range(-1e7..1e7),
        )
    }

    #[test]
    fn test_cross_of_basis_vectors() {
        let x = Vector3D::new(1.0, 0.0, 0.0);
        let y = Vector3D::new(0.0, 1.0, 0.0);
        assert_eq!(cross(&x, &y), Vector3D::new(0.0, 0.0, 1.0));
        assert_eq!(cross(&y, &x), Vector3D::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_self_cross_is_zero_and_dot_matches_norm() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let v = random_vector(&mut rng);
            assert_eq!(norm(&cross(&v, &v)), 0.0);
            assert_relative_eq!(dot(&v, &v), norm(&v).powi(2), max_relative = 1e-12);
        }
    }

    #[test]
    fn test_cross_is_orthogonal_to_operands() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let a = random_vector(&mut rng);
            let b = random_vector(&mut rng);
            let c = a.cross(&b);
            let scale = a.norm() * b.norm() * c.norm();
            assert_abs_diff_eq!(c.dot(&a) / scale, 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(c.dot(&b) / scale, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_norm_of_zero_vector() {
        assert_eq!(Vector3D::zeros().norm(), 0.0);
    }

    #[test]
    fn test_normalize_zero_vector_fails() {
        let result = Vector3D::zeros().normalize();
        assert!(matches!(result, Err(SimulationError::DomainError(_))));
    }

    #[test]
    fn test_normalize_produces_unit_vector() {
        let v = Vector3D::new(3.0, 4.0, 12.0);
        let unit = v.normalize().unwrap();
        assert_relative_eq!(unit.norm(), 1.0, epsilon = 1e-15);
        assert_relative_eq!(unit.z, 12.0 / 13.0, epsilon = 1e-15);
    }

    #[test]
    fn test_angle_between() {
        let a = Vector3D::new(1.0, 0.0, 0.0);
        let b = Vector3D::new(1.0, 1.0, 0.0);
        assert_relative_eq!(
            a.angle_between(&b).unwrap(),
            std::f64::consts::FRAC_PI_4,
            epsilon = 1e-12
        );
        assert!(a.angle_between(&Vector3D::zeros()).is_err());
    }

    #[test]
    fn test_spherical_round_trip() {
        let mut rng = StdRng::seed_from_u64(23);
        for _ in 0..200 {
            let v = random_vector(&mut rng);
            let spherical = v.to_spherical();
            assert!((0.0..=std::f64::consts::PI).contains(&spherical.colatitude));
            assert!(spherical.longitude >= 0.0 && spherical.longitude <= TAU);

            let back = Vector3D::from_spherical(&spherical);
            assert_abs_diff_eq!(back.x, v.x, epsilon = 1e-6);
            assert_abs_diff_eq!(back.y, v.y, epsilon = 1e-6);
            assert_abs_diff_eq!(back.z, v.z, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_spherical_axes() {
        let on_y = Vector3D::new(0.0, 5.0, 0.0).to_spherical();
        assert_relative_eq!(on_y.radius, 5.0);
        assert_relative_eq!(on_y.colatitude, std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(on_y.longitude, std::f64::consts::FRAC_PI_2);

        let below = Vector3D::new(0.0, 0.0, -2.0).to_spherical();
        assert_relative_eq!(below.colatitude, std::f64::consts::PI);
        assert_eq!(Vector3D::zeros().to_spherical().radius, 0.0);
    }

    #[test]
    fn test_local_axes_on_equator() {
        let position = Vector3D::new(6.4e6, 0.0, 0.0);
        let up = Vector3D::from_local(&position, 1.0, 0.0, 0.0).unwrap();
        let north = Vector3D::from_local(&position, 0.0, 1.0, 0.0).unwrap();
        let east = Vector3D::from_local(&position, 0.0, 0.0, 1.0).unwrap();

        assert_abs_diff_eq!(up.x, 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(north.z, 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(east.y, 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(north.x, 0.0, epsilon = 1e-15);
        assert!(Vector3D::from_local(&Vector3D::zeros(), 1.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn test_local_axes_are_orthonormal() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let position = random_vector(&mut rng);
            let up = Vector3D::from_local(&position, 1.0, 0.0, 0.0).unwrap();
            let north = Vector3D::from_local(&position, 0.0, 1.0, 0.0).unwrap();
            let east = Vector3D::from_local(&position, 0.0, 0.0, 1.0).unwrap();

            assert_relative_eq!(up.dot(&position.normalize().unwrap()), 1.0, epsilon = 1e-12);
            assert_abs_diff_eq!(up.dot(&north), 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(up.dot(&east), 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(north.dot(&east), 0.0, epsilon = 1e-12);
            // east = north x up
            let handed = north.cross(&up) - east;
            assert_abs_diff_eq!(handed.norm(), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_operators() {
        let a = Vector3D::new(1.0, 2.0, 3.0);
        let b = Vector3D::new(-1.0, 0.5, 2.0);
        assert_eq!(a + b, Vector3D::new(0.0, 2.5, 5.0));
        assert_eq!(a - b, Vector3D::new(2.0, 1.5, 1.0));
        assert_eq!(2.0 * a, a * 2.0);
        assert_eq!(-a / 2.0, Vector3D::new(-0.5, -1.0, -1.5));
        assert_eq!(vec![a, b].into_iter().sum::<Vector3D>(), a + b);
    }
}
