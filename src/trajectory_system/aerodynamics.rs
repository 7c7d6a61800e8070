use crate::constants::{BASE_DRAG_HYPERSONIC, GAMMA, TURBULENT_REYNOLDS};
use crate::control::environment::Atmosphere;
use crate::control::structure::AerodynamicGeometry;
use crate::errors::SimulationError;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragBreakdown {
    pub base: f64,
    pub cone_friction: f64,
    pub cylinder_friction: f64,
    pub body_wave: f64,
    pub fin_wave: f64,
    pub fin_friction: f64,
}

impl DragBreakdown {
    pub fn total(&self) -> f64 {
        let body_friction = self.cone_friction + self.cylinder_friction;
        self.base + body_friction + self.body_wave + self.fin_wave + self.fin_friction
    }
}

#[derive(Clone, Debug)]
pub struct Aerodynamics {
    pub geometry: AerodynamicGeometry,
}

impl Aerodynamics {
    pub fn new(geometry: AerodynamicGeometry) -> Self {
        Aerodynamics { geometry }
    }

    pub fn total_drag_coefficient(
        &self,
        mach: f64,
        altitude: f64,
        atmosphere: &dyn Atmosphere,
    ) -> Result<f64, SimulationError> {
        let breakdown = self.calculate_drag_breakdown(mach, altitude, atmosphere)?;
        SimulationError::ensure_finite(breakdown.total(), "drag coefficient")
    }

    pub fn calculate_drag_breakdown(
        &self,
        mach: f64,
        altitude: f64,
        atmosphere: &dyn Atmosphere,
    ) -> Result<DragBreakdown, SimulationError> {
        if !(mach >= 0.0 && mach.is_finite()) {
            return Err(SimulationError::DomainError(format!(
                "Mach number must be finite and non-negative, got {}",
                mach
            )));
        }

        let geometry = &self.geometry;
        let vehicle = &geometry.vehicle;
        let air = atmosphere.sample(altitude)?;
        let speed = mach * air.speed_of_sound();
        let reynolds = |length: f64| air.density * speed * length / air.viscosity;

        let cone_friction = skin_friction_coefficient(reynolds(vehicle.cone_length), mach)?
            * geometry.cone_surface
            / geometry.reference_area;
        let cylinder_friction = skin_friction_coefficient(reynolds(vehicle.body_length()), mach)?
            * geometry.cylinder_surface
            / geometry.reference_area;
        let fin_friction = skin_friction_coefficient(reynolds(vehicle.fin_root_chord), mach)?
            * geometry.total_fin_area
            / geometry.reference_area;

        let body_wave = body_wave_drag_coefficient(
            mach,
            geometry.cone_half_angle,
            geometry.cone_fineness,
            cone_friction + cylinder_friction,
        );
        let fin_wave = fin_wave_drag_coefficient(mach, geometry.fin_thickness_ratio)?
            * geometry.total_fin_area
            / geometry.reference_area;

        Ok(DragBreakdown {
            base: base_drag_coefficient(mach) * geometry.base_area_ratio,
            cone_friction,
            cylinder_friction,
            body_wave,
            fin_wave,
            fin_friction,
        })
    }
}

pub fn base_drag_coefficient(mach: f64) -> f64 {
    // [c0, c1, c2, c3, c4] in ascending powers of Mach
    let coefficients: [f64; 5] = if mach < 0.8 {
        return 0.0;
    } else if mach < 1.0 {
        [-1.548523, 6.05972764, -7.30548391, 2.96129532, 0.0]
    } else if mach < 1.1 {
        [
            5.79090984e3,
            -2.19843314e4,
            3.12774812e4,
            -1.97644892e4,
            4.68059822e3,
        ]
    } else if mach < 1.5 {
        [-4.11856506, 1.42267421e1, -1.69678524e1, 8.771665, -1.67398037]
    } else if mach < 2.2 {
        [3.0748e-1, -1.3258e-1, 2.8812e-2, 0.0, 0.0]
    } else if mach <= 3.5 {
        [1.8481e-1, -2.2895e-2, 5.1876e-3, -4.0742e-4, 0.0]
    } else {
        [BASE_DRAG_HYPERSONIC, 0.0, 0.0, 0.0, 0.0]
    };

    coefficients[4] * mach.powi(4)
        + coefficients[3] * mach.powi(3)
        + coefficients[2] * mach.powi(2)
        + coefficients[1] * mach
        + coefficients[0]
}

/// Compressible flat-plate skin friction coefficient for a surface whose
/// characteristic length gives `reynolds`. A surface with no flow over it
/// (zero Reynolds number) has no friction.
pub fn skin_friction_coefficient(reynolds: f64, mach: f64) -> Result<f64, SimulationError> {
    if !(reynolds >= 0.0) || !reynolds.is_finite() {
        return Err(SimulationError::DomainError(format!(
            "Reynolds number must be finite and non-negative, got {}",
            reynolds
        )));
    }
    if reynolds == 0.0 {
        return Ok(0.0);
    }

    let coefficient = if reynolds < TURBULENT_REYNOLDS {
        let incompressible = 0.664 / reynolds.sqrt();
        2.0 * incompressible * (1.0 + 0.17 * mach.powi(2)).powf(-0.1295)
    } else {
        let log_reynolds = reynolds.log10();
        let incompressible = 0.288 * log_reynolds.powf(-2.45);
        incompressible
            * 1.597
            * log_reynolds.powf(-0.15)
            * (1.0 + (GAMMA - 1.0) / 2.0 * mach.powi(2)).powf(-0.467)
    };
    Ok(coefficient)
}

pub fn body_wave_drag_coefficient(
    mach: f64,
    cone_half_angle: f64,
    cone_fineness: f64,
    body_friction: f64,
) -> f64 {
    if mach >= 1.0 {
        return (0.083 + 0.096 * mach.powi(-2)) * (cone_half_angle / 10.0).powf(1.69);
    }
    (60.0 / cone_fineness.powi(3) + 0.0025 * cone_fineness) * body_friction
}

/// Supersonic thin-airfoil wave drag of the fins per unit fin area. Zero
/// below Mach 1; undefined exactly at Mach 1.
pub fn fin_wave_drag_coefficient(mach: f64, thickness_ratio: f64) -> Result<f64, SimulationError> {
    if mach < 1.0 {
        return Ok(0.0);
    }
    let prandtl_glauert = (mach.powi(2) - 1.0).sqrt();
    if prandtl_glauert == 0.0 {
        return Err(SimulationError::DomainError(
            "fin wave drag is singular at Mach 1".to_string(),
        ));
    }
    Ok(4.0 * thickness_ratio.powi(2) / prandtl_glauert)
}
