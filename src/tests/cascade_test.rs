//! Cross-module tests of the kinematics -> trajectory -> simulation chain.

use crate::controller::ProportionalController;
use crate::kinematics_error::KinematicsError;
use crate::kinematics_impl::DeltaKinematics;
use crate::parameters::delta_robot::RobotGeometry;
use crate::simulator::{DeltaRobotSimulator, RecoveryPolicy};
use crate::trajectory::TrajectoryGenerator;

const EPSILON: f64 = 1e-9;

fn robot() -> DeltaKinematics {
    DeltaKinematics::new(RobotGeometry::new(0.3, 0.1, 0.3, 0.8))
}

fn simulator(policy: RecoveryPolicy) -> DeltaRobotSimulator<ProportionalController> {
    let generator = TrajectoryGenerator::new(robot(), 1.0, 10.0, 0.2, 1.5, 0.05);
    DeltaRobotSimulator::new(robot(), generator, ProportionalController::new(1.0, 0.5), policy)
}

#[test]
fn test_pick_simulation_covers_full_grid() {
    let result = simulator(RecoveryPolicy::SkipAndZero)
        .simulate_pick()
        .expect("pick move is reachable");
    assert_eq!(result.time.len(), 26);
    assert_eq!(result.joint_angles.len(), 26);
    assert_eq!(result.joint_velocities.len(), 26);
    assert_eq!(result.torques.len(), 26);
    assert!(result.failed_steps.is_empty());
    assert!((result.time[25] - 0.25).abs() < EPSILON);
}

#[test]
fn test_pick_simulation_starts_at_home_angles() {
    let result = simulator(RecoveryPolicy::Abort)
        .simulate_pick()
        .expect("pick move is reachable");
    // First sample sits on the home pose; all three arms share its angle.
    for arm in 0..3 {
        assert!((result.joint_angles[0][arm] + 6.277013303418288).abs() < EPSILON);
        assert_eq!(result.joint_velocities[0][arm], 0.0);
    }
}

#[test]
fn test_pick_simulation_max_speed() {
    let result = simulator(RecoveryPolicy::Abort)
        .simulate_pick()
        .expect("pick move is reachable");
    assert!((result.max_speed - 1.2622243517548788).abs() < EPSILON);
}

#[test]
fn test_controller_produces_torque_commands() {
    let result = simulator(RecoveryPolicy::Abort)
        .simulate_pick()
        .expect("pick move is reachable");
    // The profile walks away from the plant state, so the cascade must
    // command corrective torque at some point of the run.
    assert!(result.torques.iter().any(|t| t.iter().any(|v| v.abs() > 0.0)));
}

#[test]
fn test_abort_policy_surfaces_unreachable_step() {
    let home = robot().home_position().expect("valid geometry").position;
    let result = simulator(RecoveryPolicy::Abort).simulate(home, [1.5, 0.0, -0.2], 0.25);
    assert!(matches!(
        result,
        Err(KinematicsError::UnreachableTarget { .. })
    ));
}

#[test]
fn test_skip_policy_zeroes_failed_steps_and_finishes() {
    let home = robot().home_position().expect("valid geometry").position;
    let result = simulator(RecoveryPolicy::SkipAndZero)
        .simulate(home, [1.5, 0.0, -0.2], 0.25)
        .expect("skip policy completes the grid");

    assert_eq!(result.time.len(), 26);
    assert_eq!(result.failed_steps.len(), 13);
    assert_eq!(result.failed_steps[0], 13);
    for &step in &result.failed_steps {
        assert_eq!(result.joint_angles[step], [0.0, 0.0, 0.0]);
        assert_eq!(result.joint_velocities[step], [0.0, 0.0, 0.0]);
    }
    // Speed tracking only counts the steps that solved.
    assert!(result.max_speed > 0.0);
}
