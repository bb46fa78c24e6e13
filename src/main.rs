use anyhow::Result;
use rs_delta_kinematics::controller::ProportionalController;
use rs_delta_kinematics::jacobian::Jacobian;
use rs_delta_kinematics::kinematics_impl::DeltaKinematics;
use rs_delta_kinematics::parameters::delta_robot::RobotGeometry;
use rs_delta_kinematics::simulator::{DeltaRobotSimulator, RecoveryPolicy};
use rs_delta_kinematics::trajectory::TrajectoryGenerator;
use rs_delta_kinematics::utils::dump_joints;

/// Usage example.
fn main() -> Result<()> {
    let geometry = RobotGeometry::new(0.3, 0.1, 0.3, 0.8).with_mass(0.5);
    let robot = DeltaKinematics::new(geometry);

    let home = robot.home_position()?;
    println!("Home position: {:?}", home.position);
    println!("Lowest reachable z: {:.4}", robot.lowest_z()?);
    let pick_z = robot.middle_taskspace_z()?;
    println!("Mid workspace z: {:.4}", pick_z);

    println!("Joint angles at the pick height (degrees):");
    let joints = robot.inverse_kinematics(0.05, 0.05, pick_z)?;
    dump_joints(&joints);

    let position = robot.forward_kinematics(&joints)?;
    println!("Forward kinematics cross-check: {:?}", position);

    // Placeholder gravity load: holding torques for the payload weight.
    // The reduced Jacobian does not couple z, so these stay zero; shown
    // here to make that limitation visible.
    let jacobian = Jacobian::new(robot.geometry(), &joints);
    let holding = jacobian.torques(&[0.0, 0.0, -geometry.mass * 9.81]);
    println!("Holding torques (z force, reduced model): {:?}", holding);

    // Pick an object moving on the conveyor at 0.2 m/s
    let generator = TrajectoryGenerator::new(robot.clone(), 1.0, 10.0, 0.2, 1.5, 0.05);
    let trajectory = generator.generate_trapezoidal()?;
    println!(
        "Pick trajectory: {} samples over {:.2} s, intercept at {:?}",
        trajectory.len(),
        trajectory.duration(),
        generator.end_position()?.position
    );

    let simulator = DeltaRobotSimulator::new(
        robot,
        generator,
        ProportionalController::new(1.0, 0.5),
        RecoveryPolicy::SkipAndZero,
    );
    let result = simulator.simulate_pick()?;
    println!(
        "Simulated {} steps, {} failed, max Cartesian speed {:.3} m/s",
        result.time.len(),
        result.failed_steps.len(),
        result.max_speed
    );
    if let Some(final_angles) = result.joint_angles.last() {
        println!("Final joint angles (degrees):");
        dump_joints(final_angles);
    }

    Ok(())
}
