use std::ops::AddAssign;
use std::path::PathBuf;

use crate::constants::DEFAULT_TIME_STEP;
use crate::control::planet::{CelestialBody, SurfaceHeading};
use crate::control::propulsion::{Engine, PropulsionState};
use crate::errors::SimulationError;
use crate::telemetry_system::telemetry::{FlightLog, TelemetryRecord, TelemetrySink};
use crate::utils::vector3d::{Spherical, Vector3D};

use super::forces::ForceModel;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaunchSite {
    pub latitude: f64,
    pub longitude: f64,
    pub azimuth: f64,           // clockwise from north
    pub downrange: f64,         // m of surface arc flown before release
    pub altitude: f64,          // m
    pub speed: f64,             // m/s relative to the surface
    pub flight_path_angle: f64, // above the local horizontal
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KinematicState {
    pub position: Vector3D, // m
    pub velocity: Vector3D, // m/s
}

impl KinematicState {
    pub fn new(position: Vector3D, velocity: Vector3D) -> Self {
        KinematicState { position, velocity }
    }

    /// Inertial state of a vehicle released at `site`, carried along by the
    /// body's rotation.
    pub fn from_launch(body: &CelestialBody, site: &LaunchSite) -> Result<Self, SimulationError> {
        let values = [
            site.latitude,
            site.longitude,
            site.azimuth,
            site.downrange,
            site.altitude,
            site.speed,
            site.flight_path_angle,
        ];
        if values.iter().any(|value| !value.is_finite()) {
            return Err(SimulationError::ConfigurationError(format!(
                "launch site values must be finite: {:?}",
                site
            )));
        }
        if site.speed < 0.0 || body.radius + site.altitude <= 0.0 {
            return Err(SimulationError::ConfigurationError(format!(
                "launch speed {} and radius {} must be positive",
                site.speed,
                body.radius + site.altitude
            )));
        }

        let origin = SurfaceHeading::from_latitude(site.latitude, site.longitude, site.azimuth);
        let release = body.travel(&origin, site.downrange);
        let position = Vector3D::from_spherical(&Spherical::new(
            body.radius + site.altitude,
            release.colatitude,
            release.longitude,
        ));

        let (sin_gamma, cos_gamma) = site.flight_path_angle.sin_cos();
        let (sin_az, cos_az) = release.azimuth.sin_cos();
        let horizontal = site.speed * cos_gamma;
        let surface_velocity = Vector3D::from_local(
            &position,
            site.speed * sin_gamma,
            horizontal * cos_az,
            horizontal * sin_az,
        )?;

        Ok(KinematicState::new(
            position,
            surface_velocity + body.relative_wind(&position),
        ))
    }

    pub fn get_speed(&self) -> f64 {
        self.velocity.norm()
    }

    pub fn is_ascending(&self) -> bool {
        self.position.dot(&self.velocity) >= 0.0
    }

    pub fn flight_path_angle(&self) -> Result<f64, SimulationError> {
        Ok(90.0 - self.position.angle_between(&self.velocity)?.to_degrees())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlightState {
    pub kinematics: KinematicState,
    pub mass: f64, // kg
    pub time: f64, // s
}

impl FlightState {
    pub fn new(kinematics: KinematicState, mass: f64, time: f64) -> Self {
        FlightState {
            kinematics,
            mass,
            time,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VelocityLoss {
    pub aerodynamic: f64,
    pub gravity: f64,
}

impl VelocityLoss {
    pub fn total(&self) -> f64 {
        self.aerodynamic + self.gravity
    }
}

impl AddAssign for VelocityLoss {
    fn add_assign(&mut self, other: Self) {
        self.aerodynamic += other.aerodynamic;
        self.gravity += other.gravity;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepRequest {
    pub dt: f64,
    pub engine: Engine,
    pub min_mass: f64,
    pub track_losses: bool,
}

impl StepRequest {
    pub fn new(dt: f64, engine: Engine) -> Self {
        StepRequest {
            dt,
            engine,
            min_mass: 0.0,
            track_losses: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepOutcome {
    pub state: FlightState,
    pub dt: f64,
    pub truncated: bool,
    pub acceleration: Vector3D,
    pub velocity_loss: VelocityLoss,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseTermination {
    CeilingReached,
    Descending,
    FuelExhausted,
    StepLimit,
}

#[derive(Clone, Debug)]
pub struct PhaseConfig {
    pub step_size: f64,
    pub max_altitude: f64,
    pub track_losses: bool,
    pub initial_velocity_loss: VelocityLoss,
    pub max_steps: Option<u64>,
    pub telemetry: Option<PathBuf>,
    pub record_history: bool,
}

impl Default for PhaseConfig {
    fn default() -> Self {
        PhaseConfig {
            step_size: DEFAULT_TIME_STEP,
            max_altitude: f64::INFINITY,
            track_losses: false,
            initial_velocity_loss: VelocityLoss::default(),
            max_steps: None,
            telemetry: None,
            record_history: false,
        }
    }
}

#[derive(Debug)]
pub struct PhaseOutcome {
    pub state: FlightState,
    pub propulsion: PropulsionState,
    pub velocity_loss: VelocityLoss,
    pub steps: u64,
    pub termination: PhaseTermination,
    pub history: Option<FlightLog>,
    pub telemetry_error: Option<SimulationError>,
}

#[derive(Debug)]
pub struct Integrator {
    pub forces: ForceModel,
}

impl Integrator {
    pub fn new(forces: ForceModel) -> Self {
        Integrator { forces }
    }

    pub fn advance(
        &self,
        state: &FlightState,
        request: &StepRequest,
    ) -> Result<StepOutcome, SimulationError> {
        let engine = &request.engine;
        if !(request.dt > 0.0 && request.dt.is_finite()) {
            return Err(SimulationError::ConfigurationError(format!(
                "step size must be positive, got {}",
                request.dt
            )));
        }
        if !(engine.flow_rate >= 0.0) {
            return Err(SimulationError::ConfigurationError(format!(
                "flow rate must be non-negative, got {}",
                engine.flow_rate
            )));
        }
        if !(state.mass > 0.0) {
            return Err(SimulationError::DomainError(format!(
                "vehicle mass must be positive, got {}",
                state.mass
            )));
        }
        if request.min_mass > state.mass {
            return Err(SimulationError::ConfigurationError(format!(
                "minimum mass {} exceeds current mass {}",
                request.min_mass, state.mass
            )));
        }

        let mut dt = request.dt;
        let mut mass = state.mass - engine.flow_rate * dt;
        let truncated = mass < request.min_mass;
        if truncated {
            dt = (state.mass - request.min_mass) / engine.flow_rate;
            mass = request.min_mass;
            log::debug!("burn ends mid-step after {:.6} s", dt);
        }
        let time = state.time + dt;

        let average_mass = (state.mass + mass) / 2.0;
        let position = state.kinematics.position;
        let velocity = state.kinematics.velocity;
        let acceleration = self
            .forces
            .acceleration(&position, &velocity, average_mass, engine)?;

        let new_position = position + velocity * dt + 0.5 * acceleration * dt.powi(2);
        let new_velocity = velocity + acceleration * dt;

        let velocity_loss = if request.track_losses {
            self.velocity_loss(&new_position, &new_velocity, &acceleration, average_mass, dt)?
        } else {
            VelocityLoss::default()
        };

        Ok(StepOutcome {
            state: FlightState::new(KinematicState::new(new_position, new_velocity), mass, time),
            dt,
            truncated,
            acceleration,
            velocity_loss,
        })
    }

    /// Drag and gravity losses evaluated half a step back from the end state.
    fn velocity_loss(
        &self,
        position: &Vector3D,
        velocity: &Vector3D,
        acceleration: &Vector3D,
        average_mass: f64,
        dt: f64,
    ) -> Result<VelocityLoss, SimulationError> {
        let average_position = *position - 0.5 * *velocity * dt - 0.25 * *acceleration * dt.powi(2);
        let average_velocity = *velocity - 0.5 * *acceleration * dt;
        let average_speed = average_velocity.norm();
        if average_speed == 0.0 {
            return Err(SimulationError::DomainError(
                "gravity loss is undefined at zero mid-step speed".to_string(),
            ));
        }

        let drag = self.forces.drag(&average_position, &average_velocity)?;
        let weight = self.forces.weight(&average_position, average_mass)?;

        Ok(VelocityLoss {
            aerodynamic: dt * drag.norm() / average_mass,
            gravity: -dt * weight.dot(&average_velocity) / (average_speed * average_mass),
        })
    }

    pub fn run_phase(
        &self,
        kinematics: KinematicState,
        time: f64,
        propulsion: PropulsionState,
        config: &PhaseConfig,
    ) -> Result<PhaseOutcome, SimulationError> {
        let mut sink = match TelemetrySink::open(config.telemetry.as_deref()) {
            Ok(sink) => sink,
            Err(error) => {
                log::warn!("telemetry unavailable, continuing without it: {}", error);
                TelemetrySink::failed(error)
            }
        };

        let mut outcome = self.run_phase_with_sink(kinematics, time, propulsion, config, &mut sink)?;
        if let Err(error) = sink.finish() {
            outcome.telemetry_error.get_or_insert(error);
        }
        Ok(outcome)
    }

    pub fn run_phase_with_sink(
        &self,
        kinematics: KinematicState,
        time: f64,
        propulsion: PropulsionState,
        config: &PhaseConfig,
        sink: &mut TelemetrySink,
    ) -> Result<PhaseOutcome, SimulationError> {
        let engine = propulsion.engine;
        let dry_mass = propulsion.dry_mass();
        if !propulsion.is_out_of_fuel() && !(engine.flow_rate > 0.0) {
            return Err(SimulationError::ConfigurationError(format!(
                "a powered phase with {} kg of fuel needs a positive flow rate",
                propulsion.fuel_mass
            )));
        }

        let mut state = FlightState::new(kinematics, propulsion.total_mass, time);
        let mut fuel_mass = propulsion.fuel_mass;
        let mut velocity_loss = config.initial_velocity_loss;
        let mut history = config.record_history.then(FlightLog::new);
        let mut steps: u64 = 0;

        let request = StepRequest {
            dt: config.step_size,
            engine,
            min_mass: dry_mass,
            track_losses: config.track_losses,
        };

        log::info!(
            "powered phase start: t = {:.3} s, altitude = {:.0} m, mass = {:.1} kg",
            state.time,
            self.forces.altitude(&state.kinematics.position),
            state.mass
        );

        let termination = loop {
            let altitude = self.forces.altitude(&state.kinematics.position);
            if !(altitude < config.max_altitude) {
                break PhaseTermination::CeilingReached;
            }
            if !state.kinematics.is_ascending() {
                break PhaseTermination::Descending;
            }
            if fuel_mass <= 0.0 {
                break PhaseTermination::FuelExhausted;
            }
            if config.max_steps.is_some_and(|limit| steps >= limit) {
                break PhaseTermination::StepLimit;
            }

            let step = self.advance(&state, &request)?;
            state = step.state;
            velocity_loss += step.velocity_loss;
            fuel_mass = state.mass - dry_mass;
            steps += 1;

            let record = TelemetryRecord::new(
                state.time,
                self.forces.altitude(&state.kinematics.position),
                state.kinematics.get_speed(),
                state.mass,
            );
            log::debug!(
                "t = {:.3} s, altitude = {:.0} m, speed = {:.0} m/s, mass = {:.1} kg",
                record.time,
                record.altitude,
                record.speed,
                record.mass
            );
            sink.record(&record);
            if let Some(flight_log) = history.as_mut() {
                flight_log.collect(record);
            }
        };

        log::info!(
            "powered phase end after {} steps: {:?} at t = {:.3} s",
            steps,
            termination,
            state.time
        );

        Ok(PhaseOutcome {
            state,
            propulsion: propulsion.with_total_mass(state.mass),
            velocity_loss,
            steps,
            termination,
            history,
            telemetry_error: sink.take_error(),
        })
    }
}
