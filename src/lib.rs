pub mod constants;
pub mod control;
pub mod errors;
pub mod telemetry_system;
pub mod trajectory_system;
pub mod utils;

pub use constants::*;
pub use control::environment::{Atmosphere, AtmosphereSample, Msise00, StandardAtmosphere};
pub use control::planet::{CelestialBody, RotationalFrame, SurfaceHeading};
pub use control::propulsion::{Engine, PropulsionState};
pub use control::structure::{AerodynamicGeometry, VehicleGeometry};
pub use errors::SimulationError;

// Re-export commonly used items from trajectory_system
pub use trajectory_system::aerodynamics::{Aerodynamics, DragBreakdown};
pub use trajectory_system::forces::ForceModel;
pub use trajectory_system::kinematics::{
    FlightState, Integrator, KinematicState, LaunchSite, PhaseConfig, PhaseOutcome,
    PhaseTermination, StepOutcome, StepRequest, VelocityLoss,
};

// Re-export commonly used items from telemetry_system
pub use telemetry_system::telemetry::{FlightLog, TelemetryRecord, TelemetrySink};

// Re-export commonly used utilities
pub use utils::vector3d::{Spherical, Vector3D};
