// Physical Constants
pub const GRAVITATIONAL_CONSTANT: f64 = 6.673e-11; // N⋅m²/kg²
pub const EARTH_MASS: f64 = 5.972e24; // kg
pub const EARTH_RADIUS: f64 = 6_378_136.3; // meters
pub const EARTH_MU: f64 = GRAVITATIONAL_CONSTANT * EARTH_MASS; // m³/s²

// Mean calendar year (days) used to derive the sidereal day
pub const MEAN_YEAR_DAYS: f64 = (365.0 * 400.0 + 100.0 - 1.0) / 400.0;
pub const SECONDS_PER_DAY: f64 = 24.0 * 60.0 * 60.0;

// Propulsion Constants
pub const G0: f64 = 9.81; // m/s², specific impulse normalisation

// Atmospheric Constants
pub const GAMMA: f64 = 1.4; // ratio of specific heats
pub const R_AIR: f64 = 287.0; // J/(kg⋅K)
pub const SEA_LEVEL_TEMPERATURE: f64 = 288.15; // K
pub const SEA_LEVEL_PRESSURE: f64 = 101_325.0; // Pa
pub const SUTHERLAND_BETA: f64 = 1.458e-6; // Pa⋅s/K^0.5
pub const SUTHERLAND_TEMPERATURE: f64 = 110.4; // K
pub const MSISE00_CEILING: f64 = 8e5; // m

// Aerodynamic Constants
pub const TURBULENT_REYNOLDS: f64 = 1e6;
pub const BASE_DRAG_HYPERSONIC: f64 = 0.15;
pub const EXHAUST_DIAMETER_RATIO: f64 = 0.45; // exhaust diameter / body diameter

// Simulation Parameters
pub const DEFAULT_TIME_STEP: f64 = 0.05; // s
