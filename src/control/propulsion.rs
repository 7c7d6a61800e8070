use crate::constants::G0;
use crate::errors::SimulationError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Engine {
    pub flow_rate: f64,        // kg/s
    pub specific_impulse: f64, // s
}

impl Engine {
    pub fn new(flow_rate: f64, specific_impulse: f64) -> Self {
        Engine {
            flow_rate,
            specific_impulse,
        }
    }

    pub fn exhaust_velocity(&self) -> f64 {
        G0 * self.specific_impulse
    }

    pub fn get_thrust(&self) -> f64 {
        self.flow_rate * self.exhaust_velocity()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PropulsionState {
    pub fuel_mass: f64,  // kg remaining
    pub total_mass: f64, // kg, vehicle including remaining fuel
    pub engine: Engine,
}

impl PropulsionState {
    pub fn new(fuel_mass: f64, total_mass: f64, engine: Engine) -> Result<Self, SimulationError> {
        if !(fuel_mass >= 0.0) {
            return Err(SimulationError::ConfigurationError(format!(
                "fuel mass must be non-negative, got {}",
                fuel_mass
            )));
        }
        if !(total_mass > 0.0) || total_mass < fuel_mass {
            return Err(SimulationError::ConfigurationError(format!(
                "total mass {} must be positive and hold the fuel mass {}",
                total_mass, fuel_mass
            )));
        }
        if !(engine.flow_rate >= 0.0) || !(engine.specific_impulse >= 0.0) {
            return Err(SimulationError::ConfigurationError(format!(
                "flow rate {} and specific impulse {} must be non-negative",
                engine.flow_rate, engine.specific_impulse
            )));
        }
        Ok(PropulsionState {
            fuel_mass,
            total_mass,
            engine,
        })
    }

    pub fn dry_mass(&self) -> f64 {
        self.total_mass - self.fuel_mass
    }

    pub fn is_out_of_fuel(&self) -> bool {
        self.fuel_mass <= 0.0
    }

    pub fn burn_time(&self) -> f64 {
        if self.engine.flow_rate > 0.0 {
            self.fuel_mass / self.engine.flow_rate
        } else {
            f64::INFINITY
        }
    }

    pub fn delta_v(&self) -> f64 {
        self.engine.exhaust_velocity() * (self.total_mass / self.dry_mass()).ln()
    }

    pub fn with_total_mass(&self, total_mass: f64) -> Self {
        let dry_mass = self.dry_mass();
        PropulsionState {
            fuel_mass: (total_mass - dry_mass).max(0.0),
            total_mass: total_mass.max(dry_mass),
            engine: self.engine,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_propulsion_state() {
        let ps = PropulsionState::new(100.0, 120.0, Engine::new(20.0, 300.0)).unwrap();
        assert_eq!(ps.fuel_mass, 100.0);
        assert_eq!(ps.total_mass, 120.0);
        assert_eq!(ps.dry_mass(), 20.0);
        assert_eq!(ps.burn_time(), 5.0);
        assert!(!ps.is_out_of_fuel());
    }

    #[test]
    fn test_thrust_from_specific_impulse() {
        let engine = Engine::new(20.0, 300.0);
        assert_relative_eq!(engine.get_thrust(), 20.0 * 9.81 * 300.0, epsilon = 1e-9);
    }

    #[test]
    fn test_invalid_masses_rejected() {
        let engine = Engine::new(20.0, 300.0);
        assert!(PropulsionState::new(-1.0, 120.0, engine).is_err());
        assert!(PropulsionState::new(130.0, 120.0, engine).is_err());
        assert!(PropulsionState::new(10.0, 0.0, engine).is_err());
        assert!(PropulsionState::new(10.0, 20.0, Engine::new(-1.0, 300.0)).is_err());
    }

    #[test]
    fn test_with_total_mass_keeps_dry_mass() {
        let ps = PropulsionState::new(100.0, 120.0, Engine::new(20.0, 300.0)).unwrap();
        let burnt = ps.with_total_mass(118.0);
        assert_eq!(burnt.fuel_mass, 98.0);
        assert_eq!(burnt.dry_mass(), 20.0);

        let empty = ps.with_total_mass(10.0);
        assert_eq!(empty.fuel_mass, 0.0);
        assert_eq!(empty.total_mass, 20.0);
        assert!(empty.is_out_of_fuel());
    }

    #[test]
    fn test_delta_v() {
        let ps = PropulsionState::new(100.0, 120.0, Engine::new(20.0, 300.0)).unwrap();
        assert_relative_eq!(ps.delta_v(), 2943.0 * 6f64.ln(), epsilon = 1e-9);
    }
}
