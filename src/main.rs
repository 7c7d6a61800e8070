use std::path::Path;

use missile_trajectory::*;

const TELEMETRY_FILE: &str = "trajectory.txt";
const RELEASE_ANGLES_DEG: [f64; 4] = [20.0, 30.0, 40.0, 50.0];

fn print_state(label: &str, forces: &ForceModel, state: &FlightState) {
    println!(
        "{}: t = {:.3} s | pos = ({:.3}, {:.3}, {:.3}) | vel = ({:.3}, {:.3}, {:.3}) | alt = {:.1} m | mass = {:.1} kg",
        label,
        state.time,
        state.kinematics.position.x,
        state.kinematics.position.y,
        state.kinematics.position.z,
        state.kinematics.velocity.x,
        state.kinematics.velocity.y,
        state.kinematics.velocity.z,
        forces.altitude(&state.kinematics.position),
        state.mass
    );
}

// Carrier aircraft releasing eastwards over the equator
fn release_site(flight_path_angle_deg: f64) -> LaunchSite {
    LaunchSite {
        latitude: 0.0,
        longitude: 0.0,
        azimuth: 90f64.to_radians(),
        downrange: 0.0,
        altitude: 12_000.0,
        speed: 250.0,
        flight_path_angle: flight_path_angle_deg.to_radians(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let integrator = Integrator::new(ForceModel::earth(VehicleGeometry::default())?);
    let engine = Engine::new(20.0, 300.0);
    let propulsion = PropulsionState::new(100.0, 120.0, engine)?;

    // Reference step
    let kinematics = KinematicState::new(
        Vector3D::new(6_390_136.30, 20.5359212, 0.0),
        Vector3D::new(409.49159427, 433.72234943, 0.0),
    );
    let initial = FlightState::new(kinematics, propulsion.total_mass, 0.05);

    print_state("Before", &integrator.forces, &initial);
    let request = StepRequest {
        min_mass: propulsion.dry_mass(),
        track_losses: true,
        ..StepRequest::new(0.1, engine)
    };
    let step = integrator.advance(&initial, &request)?;
    print_state("After ", &integrator.forces, &step.state);
    println!(
        "Step losses: aerodynamic = {:.6} m/s, gravity = {:.6} m/s",
        step.velocity_loss.aerodynamic, step.velocity_loss.gravity
    );

    // Rank release angles by mechanical energy at burnout
    let body = &integrator.forces.body;
    let ranking = PhaseConfig {
        step_size: 0.1,
        max_altitude: 7.9e5,
        ..PhaseConfig::default()
    };
    let mut best: Option<(f64, f64)> = None;
    for angle in RELEASE_ANGLES_DEG {
        let start = KinematicState::from_launch(body, &release_site(angle))?;
        let outcome = integrator.run_phase(start, 0.0, propulsion, &ranking)?;
        let end = outcome.state;
        let energy = integrator.forces.mechanical_energy(
            end.mass,
            &end.kinematics.position,
            &end.kinematics.velocity,
        )?;
        println!("Release at {:>4.1} deg: burnout energy {:.4e} J", angle, energy);
        if best.map_or(true, |(_, best_energy)| energy > best_energy) {
            best = Some((angle, energy));
        }
    }
    let best_angle = best.map_or(RELEASE_ANGLES_DEG[0], |(angle, _)| angle);
    println!("Best release angle: {:.1} deg", best_angle);

    let start = KinematicState::from_launch(body, &release_site(best_angle))?;
    let config = PhaseConfig {
        step_size: 0.02,
        max_altitude: 7.999e5,
        track_losses: true,
        record_history: true,
        ..PhaseConfig::default()
    };
    let mut sink = TelemetrySink::open(Some(Path::new(TELEMETRY_FILE)))?;
    sink.write_header(&TelemetryRecord::new(
        0.0,
        integrator.forces.altitude(&start.position),
        start.get_speed(),
        propulsion.total_mass,
    ));
    let outcome = integrator.run_phase_with_sink(start, 0.0, propulsion, &config, &mut sink)?;

    match outcome.telemetry_error.map_or_else(|| sink.finish(), Err) {
        Ok(()) => println!("Telemetry written to {}", TELEMETRY_FILE),
        Err(error) => println!("Telemetry error: {}", error),
    }
    if let Some(history) = &outcome.history {
        history.display_data();
    }

    let end = outcome.state;
    let altitude = integrator.forces.altitude(&end.kinematics.position);
    let speed = end.kinematics.get_speed();
    println!("Phase ended ({:?}) after {} steps", outcome.termination, outcome.steps);
    print_state("Burnout", &integrator.forces, &end);
    println!(
        "Velocity losses: aerodynamic = {:.2} m/s, gravity = {:.2} m/s, total = {:.2} m/s",
        outcome.velocity_loss.aerodynamic,
        outcome.velocity_loss.gravity,
        outcome.velocity_loss.total()
    );
    println!(
        "Mechanical energy: {:.3e} J",
        integrator
            .forces
            .mechanical_energy(end.mass, &end.kinematics.position, &end.kinematics.velocity)?
    );
    println!(
        "Flight path angle: {:.2} deg",
        end.kinematics.flight_path_angle()?
    );
    println!(
        "Speed: {:.3}% of orbital velocity, {:.3}% of escape velocity",
        100.0 * speed / body.orbital_velocity(altitude),
        100.0 * speed / body.escape_velocity(altitude)
    );

    Ok(())
}
