use std::fmt::Debug;

use crate::constants::{
    EARTH_MU, EARTH_RADIUS, GAMMA, MSISE00_CEILING, R_AIR, SEA_LEVEL_PRESSURE,
    SEA_LEVEL_TEMPERATURE, SUTHERLAND_BETA, SUTHERLAND_TEMPERATURE,
};
use crate::errors::SimulationError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AtmosphereSample {
    pub temperature: f64, // K
    pub density: f64,     // kg/m³
    pub pressure: f64,    // Pa
    pub viscosity: f64,   // Pa⋅s
}

impl AtmosphereSample {
    pub fn speed_of_sound(&self) -> f64 {
        speed_of_sound(self.temperature)
    }
}

pub fn speed_of_sound(temperature: f64) -> f64 {
    (GAMMA * R_AIR * temperature).sqrt()
}

pub fn sutherland_viscosity(temperature: f64) -> f64 {
    SUTHERLAND_BETA * temperature.powf(1.5) / (temperature + SUTHERLAND_TEMPERATURE)
}

pub trait Atmosphere: Debug {
    fn temperature(&self, altitude: f64) -> Result<f64, SimulationError>;

    fn density(&self, altitude: f64) -> Result<f64, SimulationError>;

    fn pressure(&self, altitude: f64) -> Result<f64, SimulationError> {
        Ok(self.density(altitude)? * R_AIR * self.temperature(altitude)?)
    }

    fn viscosity(&self, altitude: f64) -> Result<f64, SimulationError> {
        Ok(sutherland_viscosity(self.temperature(altitude)?))
    }

    fn speed_of_sound(&self, altitude: f64) -> Result<f64, SimulationError> {
        Ok(speed_of_sound(self.temperature(altitude)?))
    }

    fn sample(&self, altitude: f64) -> Result<AtmosphereSample, SimulationError> {
        let temperature = self.temperature(altitude)?;
        let density = self.density(altitude)?;
        Ok(AtmosphereSample {
            temperature,
            density,
            pressure: density * R_AIR * temperature,
            viscosity: sutherland_viscosity(temperature),
        })
    }
}

const MSISE00_BANDS: [f64; 14] = [
    0.0, 11e3, 20e3, 32e3, 47e3, 51e3, 71e3, 85e3, 105e3, 125e3, 180e3, 300e3, 440e3, 800e3,
];

const MSISE00_TEMPERATURE: [&[f64]; 13] = [
    &[288.4, -0.002696, -1.209e-6, 1.105e-10, -2.703e-15],
    &[334.6, -0.01953, 1.0485e-6, -2.145e-11, 1.303e-16],
    &[225.4, -0.002232, 8.624e-8, -3.209e-13],
    &[474.95, -0.00753, -6.382e-7, 3.0175e-11, -3.2195e-16],
    &[-2828.0, 0.1816, -3.495e-6, 2.203e-11],
    &[712.9, -0.016, 1.783e-7, -7.289e-13],
    &[1857.0, -0.05847, 6.9745e-7, -2.8105e-12],
    &[-4371.0, 0.1357, -1.114e-6, -2.772e-13, 2.41e-17],
    &[17010.0, -0.4213, 3.43e-6, -8.97e-12],
    &[-5498.54, 0.0950362, -4.90839e-7, 8.72167e-13],
    &[-2638.0, 0.0488, -2.58e-7, 6.156e-13, -5.569e-19],
    &[8.9638, 0.010298, -4.8383e-8, 1.1428e-13, -1.3543e-19, 6.4307e-26],
    &[892.6],
];

const MSISE00_DENSITY: [&[f64]; 13] = [
    &[1.2113, -1.0767e-4, 2.8143e-9],
    &[1.144, -9.3249e-5, 2.0283e-9],
    &[0.98121, -8.5625e-5, 2.59e-9, -2.6866e-14],
    &[
        0.53696369783,
        -4.3597202128e-5,
        1.3582294965e-9,
        -1.9138461925e-14,
        1.0253010619e-19,
    ],
    &[0.030063, -1.0345e-6, 9.0937e-12],
    &[0.028566, -1.1743e-6, 1.6299e-11, -7.6239e-17],
    &[
        0.021858322344,
        -9.8512966001e-7,
        1.6779533018e-11,
        -1.279121248e-16,
        3.6795165237e-22,
    ],
    &[
        0.018477335855,
        -9.0294288939e-7,
        1.7720644879e-11,
        -1.7447869942e-16,
        8.6142822069e-22,
        -1.7052994766e-27,
    ],
    &[
        2.1772683977e-3,
        -8.9767045236e-8,
        1.4829610326e-12,
        -1.2267775208e-17,
        5.0809300164e-23,
        -8.427136289e-29,
    ],
    &[
        6.21790234479e-5,
        -2.35674472104e-9,
        3.72303267358e-14,
        -3.13620341158e-19,
        1.48529238085e-24,
        -3.74874972816e-30,
        3.938525302088e-36,
    ],
    &[
        1.6244922565e-7,
        -3.6911722938e-12,
        3.530199049e-17,
        -1.8124348491e-22,
        5.2555686765e-28,
        -8.1472260337e-34,
        5.2685895499e-40,
    ],
    &[
        3.2983479421e-9,
        -3.9057260867e-14,
        1.8766393702e-19,
        -4.5571029771e-25,
        5.5779327744e-31,
        -2.7476359591e-37,
    ],
    &[
        3.17056098e-10,
        -2.79591705e-15,
        1.03325853e-20,
        -2.04426659e-26,
        2.28016783e-32,
        -1.35785279e-38,
        3.36960028e-45,
    ],
];

#[derive(Clone, Copy, Debug, Default)]
pub struct Msise00;

impl Msise00 {
    pub fn new() -> Self {
        Msise00
    }

    /// Index of the fitted band containing `altitude`. Band edges belong to
    /// the lower band.
    fn band(altitude: f64) -> Result<usize, SimulationError> {
        if !(0.0..=MSISE00_CEILING).contains(&altitude) {
            return Err(SimulationError::InadmissibleValue {
                name: "altitude",
                value: altitude,
                expected: "a value between 0 and 800000 m",
            });
        }
        MSISE00_BANDS
            .windows(2)
            .position(|edges| edges[0] <= altitude && altitude <= edges[1])
            .ok_or(SimulationError::InadmissibleValue {
                name: "altitude",
                value: altitude,
                expected: "a value between 0 and 800000 m",
            })
    }

    fn evaluate(coefficients: &[f64], altitude: f64) -> f64 {
        coefficients
            .iter()
            .enumerate()
            .map(|(power, k)| k * altitude.powi(power as i32))
            .sum()
    }
}

impl Atmosphere for Msise00 {
    fn temperature(&self, altitude: f64) -> Result<f64, SimulationError> {
        let band = Self::band(altitude)?;
        Ok(Self::evaluate(MSISE00_TEMPERATURE[band], altitude))
    }

    fn density(&self, altitude: f64) -> Result<f64, SimulationError> {
        let band = Self::band(altitude)?;
        Ok(Self::evaluate(MSISE00_DENSITY[band], altitude))
    }
}

#[derive(Clone, Copy, Debug)]
struct IsaLayer {
    base_altitude: f64,
    base_temperature: f64,
    lapse_rate: f64,
    base_density: f64,
}

#[derive(Clone, Debug)]
pub struct StandardAtmosphere {
    layers: Vec<IsaLayer>,
    gravity: f64,
}

impl Default for StandardAtmosphere {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardAtmosphere {
    pub fn new() -> Self {
        let gravity = EARTH_MU / EARTH_RADIUS.powi(2);
        let profile = [
            (0.0, SEA_LEVEL_TEMPERATURE, -0.0065),
            (11_000.0, 216.65, 0.0),
            (20_000.0, 216.65, 0.001),
            (32_000.0, 228.65, 0.0028),
            (47_000.0, 270.65, 0.0),
            (51_000.0, 270.65, -0.0028),
            (71_000.0, 214.65, -0.002),
            (84_852.0, 214.65 - 0.002 * (84_852.0 - 71_000.0), 0.0),
        ];

        let mut layers: Vec<IsaLayer> = Vec::with_capacity(profile.len());
        let mut base_density = SEA_LEVEL_PRESSURE / (R_AIR * SEA_LEVEL_TEMPERATURE);
        for (base_altitude, base_temperature, lapse_rate) in profile {
            if let Some(previous) = layers.last() {
                base_density = previous.density_at(base_altitude, gravity);
            }
            layers.push(IsaLayer {
                base_altitude,
                base_temperature,
                lapse_rate,
                base_density,
            });
        }

        StandardAtmosphere { layers, gravity }
    }

    fn layer(&self, altitude: f64) -> Result<&IsaLayer, SimulationError> {
        if altitude < 0.0 || altitude.is_nan() {
            return Err(SimulationError::InadmissibleValue {
                name: "altitude",
                value: altitude,
                expected: "a non-negative value",
            });
        }
        self.layers
            .iter()
            .rev()
            .find(|layer| altitude >= layer.base_altitude)
            .ok_or(SimulationError::InadmissibleValue {
                name: "altitude",
                value: altitude,
                expected: "a non-negative value",
            })
    }
}

impl IsaLayer {
    fn temperature_at(&self, altitude: f64) -> f64 {
        self.base_temperature + self.lapse_rate * (altitude - self.base_altitude)
    }

    fn density_at(&self, altitude: f64, gravity: f64) -> f64 {
        let temperature = self.temperature_at(altitude);
        if self.lapse_rate == 0.0 {
            self.base_density
                * (-gravity * (altitude - self.base_altitude) / (R_AIR * temperature)).exp()
        } else {
            self.base_density
                * (temperature / self.base_temperature)
                    .powf(-gravity / (R_AIR * self.lapse_rate) - 1.0)
        }
    }
}

impl Atmosphere for StandardAtmosphere {
    fn temperature(&self, altitude: f64) -> Result<f64, SimulationError> {
        Ok(self.layer(altitude)?.temperature_at(altitude))
    }

    fn density(&self, altitude: f64) -> Result<f64, SimulationError> {
        Ok(self.layer(altitude)?.density_at(altitude, self.gravity))
    }
}
