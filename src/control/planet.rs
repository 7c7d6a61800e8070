use crate::constants::{
    EARTH_MASS, EARTH_RADIUS, GRAVITATIONAL_CONSTANT, MEAN_YEAR_DAYS, SECONDS_PER_DAY,
};
use crate::utils::vector3d::Vector3D;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationalFrame {
    pub omega: Vector3D, // rad/s
}

impl RotationalFrame {
    pub fn new(omega: Vector3D) -> Self {
        RotationalFrame { omega }
    }

    pub fn from_period(period: f64) -> Self {
        RotationalFrame::new(Vector3D::new(0.0, 0.0, 2.0 * std::f64::consts::PI / period))
    }

    pub fn earth() -> Self {
        RotationalFrame::from_period(sidereal_day())
    }

    pub fn non_rotating() -> Self {
        RotationalFrame::new(Vector3D::zeros())
    }

    pub fn angular_speed(&self) -> f64 {
        self.omega.norm()
    }

    pub fn relative_wind(&self, position: &Vector3D) -> Vector3D {
        self.omega.cross(position)
    }
}

/// Length of the sidereal day in seconds: one extra turn per year.
pub fn sidereal_day() -> f64 {
    MEAN_YEAR_DAYS / (MEAN_YEAR_DAYS + 1.0) * SECONDS_PER_DAY
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceHeading {
    pub colatitude: f64, // rad
    pub longitude: f64,  // rad
    pub azimuth: f64,    // rad
}

impl SurfaceHeading {
    pub fn new(colatitude: f64, longitude: f64, azimuth: f64) -> Self {
        SurfaceHeading {
            colatitude,
            longitude,
            azimuth,
        }
    }

    pub fn from_latitude(latitude: f64, longitude: f64, azimuth: f64) -> Self {
        SurfaceHeading::new(std::f64::consts::FRAC_PI_2 - latitude, longitude, azimuth)
    }

    pub fn latitude(&self) -> f64 {
        std::f64::consts::FRAC_PI_2 - self.colatitude
    }
}

#[derive(Clone, Debug)]
pub struct CelestialBody {
    pub name: String,
    pub radius: f64,
    pub mass: f64,
    pub rotation: RotationalFrame,
}

impl CelestialBody {
    pub fn new(name: String, radius: f64, mass: f64, rotation: RotationalFrame) -> Self {
        CelestialBody {
            name,
            radius,
            mass,
            rotation,
        }
    }

    pub fn earth() -> Self {
        CelestialBody::new(
            "Earth".to_string(),
            EARTH_RADIUS,
            EARTH_MASS,
            RotationalFrame::earth(),
        )
    }

    pub fn mu(&self) -> f64 {
        GRAVITATIONAL_CONSTANT * self.mass
    }

    pub fn altitude(&self, position: &Vector3D) -> f64 {
        position.norm() - self.radius
    }

    pub fn surface_gravity(&self) -> f64 {
        self.gravity_at_altitude(0.0)
    }

    pub fn gravity_at_altitude(&self, altitude: f64) -> f64 {
        let distance = self.radius + altitude;
        self.mu() / distance.powi(2)
    }

    pub fn orbital_velocity(&self, altitude: f64) -> f64 {
        (self.mu() / (self.radius + altitude)).sqrt()
    }

    pub fn escape_velocity(&self, altitude: f64) -> f64 {
        (2.0 * self.mu() / (self.radius + altitude)).sqrt()
    }

    pub fn relative_wind(&self, position: &Vector3D) -> Vector3D {
        self.rotation.relative_wind(position)
    }

    /// Follows the great circle leaving `origin` for `distance` metres of
    /// surface arc. The returned azimuth is the heading on arrival.
    pub fn travel(&self, origin: &SurfaceHeading, distance: f64) -> SurfaceHeading {
        let (sin_colat, cos_colat) = origin.colatitude.sin_cos();
        let (sin_az, cos_az) = origin.azimuth.sin_cos();
        let (sin_arc, cos_arc) = (distance / self.radius).sin_cos();
        let cross_track = sin_colat * sin_az;
        let along_track = sin_colat * cos_arc * cos_az - cos_colat * sin_arc;

        let latitude = (cos_colat * cos_arc + sin_colat * sin_arc * cos_az)
            .atan2((cross_track.powi(2) + along_track.powi(2)).sqrt());
        let longitude_change =
            (sin_az * sin_arc).atan2(sin_colat * cos_arc - cos_colat * sin_arc * cos_az);

        SurfaceHeading::from_latitude(
            latitude,
            origin.longitude + longitude_change,
            cross_track.atan2(along_track),
        )
    }
}
