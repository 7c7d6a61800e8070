use crate::constants::GAMMA;
use crate::control::environment::{Atmosphere, Msise00};
use crate::control::planet::CelestialBody;
use crate::control::propulsion::Engine;
use crate::control::structure::{AerodynamicGeometry, VehicleGeometry};
use crate::errors::SimulationError;
use crate::utils::vector3d::Vector3D;

use super::aerodynamics::Aerodynamics;

#[derive(Debug)]
pub struct ForceModel {
    pub body: CelestialBody,
    pub aerodynamics: Aerodynamics,
    pub atmosphere: Box<dyn Atmosphere>,
}

impl ForceModel {
    pub fn new(
        body: CelestialBody,
        aerodynamics: Aerodynamics,
        atmosphere: Box<dyn Atmosphere>,
    ) -> Self {
        ForceModel {
            body,
            aerodynamics,
            atmosphere,
        }
    }

    pub fn earth(vehicle: VehicleGeometry) -> Result<Self, SimulationError> {
        let geometry = AerodynamicGeometry::new(vehicle)?;
        Ok(ForceModel::new(
            CelestialBody::earth(),
            Aerodynamics::new(geometry),
            Box::new(Msise00::new()),
        ))
    }

    pub fn altitude(&self, position: &Vector3D) -> f64 {
        self.body.altitude(position)
    }

    pub fn thrust(&self, engine: &Engine, velocity: &Vector3D) -> Result<Vector3D, SimulationError> {
        let magnitude = engine.get_thrust();
        if magnitude == 0.0 {
            return Ok(Vector3D::zeros());
        }
        Ok(velocity.normalize()? * magnitude)
    }

    pub fn airspeed_vector(&self, position: &Vector3D, velocity: &Vector3D) -> Vector3D {
        *velocity - self.body.relative_wind(position)
    }

    pub fn mach_number(
        &self,
        position: &Vector3D,
        velocity: &Vector3D,
    ) -> Result<f64, SimulationError> {
        let altitude = self.altitude(position);
        let speed_of_sound = self.atmosphere.speed_of_sound(altitude)?;
        let mach = self.airspeed_vector(position, velocity).norm() / speed_of_sound;
        SimulationError::ensure_finite(mach, "Mach number")
    }

    /// Aerodynamic drag, opposing the airspeed vector.
    pub fn drag(&self, position: &Vector3D, velocity: &Vector3D) -> Result<Vector3D, SimulationError> {
        let altitude = self.altitude(position);
        let pressure = self.atmosphere.pressure(altitude)?;
        let airspeed = self.airspeed_vector(position, velocity);
        if airspeed.norm() == 0.0 {
            return Ok(Vector3D::zeros());
        }

        let mach = self.mach_number(position, velocity)?;
        let drag_coefficient =
            self.aerodynamics
                .total_drag_coefficient(mach, altitude, self.atmosphere.as_ref())?;
        let magnitude = 0.5
            * GAMMA
            * pressure
            * mach.powi(2)
            * self.aerodynamics.geometry.reference_area
            * drag_coefficient;

        Ok(-(airspeed.normalize()? * magnitude))
    }

    pub fn weight(&self, position: &Vector3D, mass: f64) -> Result<Vector3D, SimulationError> {
        let altitude = self.altitude(position);
        let magnitude = mass * self.body.gravity_at_altitude(altitude);
        Ok(-(position.normalize()? * magnitude))
    }

    pub fn acceleration(
        &self,
        position: &Vector3D,
        velocity: &Vector3D,
        mass: f64,
        engine: &Engine,
    ) -> Result<Vector3D, SimulationError> {
        if !(mass > 0.0) {
            return Err(SimulationError::DomainError(format!(
                "acceleration requires a positive mass, got {}",
                mass
            )));
        }
        let thrust = self.thrust(engine, velocity)?;
        let drag = self.drag(position, velocity)?;
        let weight = self.weight(position, mass)?;

        Ok((thrust + drag + weight) / mass)
    }

    pub fn mechanical_energy(
        &self,
        mass: f64,
        position: &Vector3D,
        velocity: &Vector3D,
    ) -> Result<f64, SimulationError> {
        let radius = position.norm();
        if radius == 0.0 {
            return Err(SimulationError::DomainError(
                "potential energy is undefined at the planet's centre".to_string(),
            ));
        }
        let kinetic = 0.5 * mass * velocity.norm().powi(2);
        let potential = -self.body.mu() * mass / radius;
        Ok(kinetic + potential)
    }
}
