use std::f64::consts::PI;

use crate::constants::EXHAUST_DIAMETER_RATIO;
use crate::errors::SimulationError;

#[derive(Clone, Debug, PartialEq)]
pub struct VehicleGeometry {
    pub diameter: f64,       // m
    pub length: f64,         // m, nose tip to base
    pub cone_length: f64,    // m
    pub fin_thickness: f64,  // m
    pub fin_mean_chord: f64, // m
    pub fin_root_chord: f64, // m
    pub fin_area: f64,       // m², planform of one fin
    pub fin_count: u32,
}

impl Default for VehicleGeometry {
    fn default() -> Self {
        VehicleGeometry {
            diameter: 0.5,
            length: 3.0,
            cone_length: 0.9,
            fin_thickness: 0.0065,
            fin_mean_chord: 0.18,
            fin_root_chord: 0.24,
            fin_area: 0.07875,
            fin_count: 4,
        }
    }
}

impl VehicleGeometry {
    pub fn validate(&self) -> Result<(), SimulationError> {
        let dimensions = [
            ("diameter", self.diameter),
            ("length", self.length),
            ("cone_length", self.cone_length),
            ("fin_thickness", self.fin_thickness),
            ("fin_mean_chord", self.fin_mean_chord),
            ("fin_root_chord", self.fin_root_chord),
            ("fin_area", self.fin_area),
        ];
        for (name, value) in dimensions {
            if !(value > 0.0 && value.is_finite()) {
                return Err(SimulationError::ConfigurationError(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        if self.cone_length >= self.length {
            return Err(SimulationError::ConfigurationError(format!(
                "cone_length ({}) must be shorter than length ({})",
                self.cone_length, self.length
            )));
        }
        Ok(())
    }

    pub fn body_length(&self) -> f64 {
        self.length - self.cone_length
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AerodynamicGeometry {
    pub vehicle: VehicleGeometry,
    pub cylinder_surface: f64,    // m², wetted area of the cylindrical body
    pub cone_surface: f64,        // m², lateral area of the nose cone
    pub reference_area: f64,      // m², body cross-section
    pub fin_thickness_ratio: f64, // thickness / mean chord
    pub total_fin_area: f64,      // m²
    pub base_area_ratio: f64,     // share of the base not covered by the exhaust
    pub cone_half_angle: f64,     // degrees
    pub cone_fineness: f64,       // cone length / diameter
}

impl AerodynamicGeometry {
    pub fn new(vehicle: VehicleGeometry) -> Result<Self, SimulationError> {
        vehicle.validate()?;

        let d = vehicle.diameter;
        let cylinder_surface = PI * d * vehicle.body_length();
        let cone_surface =
            PI / 2.0 * d * (vehicle.cone_length.powi(2) + (d / 2.0).powi(2)).sqrt();
        let reference_area = PI / 4.0 * d.powi(2);
        let exhaust_area = PI * (d * EXHAUST_DIAMETER_RATIO).powi(2);

        Ok(AerodynamicGeometry {
            cylinder_surface,
            cone_surface,
            reference_area,
            fin_thickness_ratio: vehicle.fin_thickness / vehicle.fin_mean_chord,
            total_fin_area: vehicle.fin_area * vehicle.fin_count as f64,
            base_area_ratio: 1.0 - exhaust_area / reference_area,
            cone_half_angle: (0.5 * d / vehicle.cone_length).atan().to_degrees(),
            cone_fineness: vehicle.cone_length / d,
            vehicle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_geometry_derivations() {
        let geometry = AerodynamicGeometry::new(VehicleGeometry::default()).unwrap();

        assert_relative_eq!(geometry.reference_area, 0.19634954084936207, epsilon = 1e-12);
        assert_relative_eq!(geometry.cylinder_surface, PI * 0.5 * 2.1, epsilon = 1e-12);
        assert_relative_eq!(
            geometry.cone_surface,
            PI / 2.0 * 0.5 * (0.81f64 + 0.0625).sqrt(),
            epsilon = 1e-12
        );
        assert_relative_eq!(geometry.total_fin_area, 0.315, epsilon = 1e-12);
        assert_relative_eq!(geometry.fin_thickness_ratio, 0.0065 / 0.18, epsilon = 1e-12);
        assert_relative_eq!(geometry.base_area_ratio, 0.19, epsilon = 1e-12);
        assert_relative_eq!(geometry.cone_half_angle, 15.524110996754256, epsilon = 1e-9);
        assert_relative_eq!(geometry.cone_fineness, 1.8, epsilon = 1e-12);
    }

    #[test]
    fn test_non_positive_dimension_rejected() {
        let vehicle = VehicleGeometry {
            diameter: 0.0,
            ..VehicleGeometry::default()
        };
        let result = AerodynamicGeometry::new(vehicle);
        assert!(matches!(result, Err(SimulationError::ConfigurationError(_))));

        let vehicle = VehicleGeometry {
            fin_thickness: -0.001,
            ..VehicleGeometry::default()
        };
        assert!(AerodynamicGeometry::new(vehicle).is_err());
    }

    #[test]
    fn test_cone_longer_than_body_rejected() {
        let vehicle = VehicleGeometry {
            cone_length: 3.5,
            ..VehicleGeometry::default()
        };
        assert!(matches!(
            vehicle.validate(),
            Err(SimulationError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_finless_body_has_no_fin_area() {
        let vehicle = VehicleGeometry {
            fin_count: 0,
            ..VehicleGeometry::default()
        };
        let geometry = AerodynamicGeometry::new(vehicle).unwrap();
        assert_eq!(geometry.total_fin_area, 0.0);
    }
}
