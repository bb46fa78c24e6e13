//! Cascade control simulation over a generated trajectory.

use crate::controller::Controller;
use crate::kinematic_traits::{JointVelocities, Joints};
use crate::kinematics_error::KinematicsError;
use crate::kinematics_impl::DeltaKinematics;
use crate::trajectory::{Trajectory, TrajectoryGenerator, TrajectorySpec};
use crate::utils::is_valid;
use tracing::warn;

/// What the simulation loop does when the kinematics fail at a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryPolicy {
    /// Record the step as failed, leave its outputs zeroed and continue to
    /// the end of the time grid.
    SkipAndZero,

    /// Abort the run, surfacing the step's error to the caller.
    Abort,
}

/// Per-step output series of one simulation run. All series share the time
/// grid; entries of failed steps are zero under
/// [RecoveryPolicy::SkipAndZero].
#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub joint_angles: Vec<Joints>,
    pub joint_velocities: Vec<JointVelocities>,
    pub torques: Vec<[f64; 3]>,
    pub time: Vec<f64>,

    /// Largest Cartesian speed over the steps that solved successfully.
    pub max_speed: f64,

    /// Indices of steps the kinematics rejected.
    pub failed_steps: Vec<usize>,
}

/// Drives the cascade: trajectory sample -> finite-difference Cartesian
/// velocity -> joint angles and velocities via the kinematics engine, with
/// the pluggable controller producing the torque commands.
pub struct DeltaRobotSimulator<C: Controller> {
    kinematics: DeltaKinematics,
    generator: TrajectoryGenerator,
    controller: C,
    policy: RecoveryPolicy,
}

impl<C: Controller> DeltaRobotSimulator<C> {
    pub fn new(
        kinematics: DeltaKinematics,
        generator: TrajectoryGenerator,
        controller: C,
        policy: RecoveryPolicy,
    ) -> Self {
        DeltaRobotSimulator {
            kinematics,
            generator,
            controller,
            policy,
        }
    }

    /// Simulates a move between two arbitrary Cartesian positions.
    pub fn simulate(
        &self,
        start_position: [f64; 3],
        target_position: [f64; 3],
        duration: f64,
    ) -> Result<SimulationResult, KinematicsError> {
        let spec = TrajectorySpec {
            start_position,
            end_position: target_position,
            duration,
            time_step: self.generator.time_step,
        };
        self.run(&self.generator.generate(&spec))
    }

    /// Simulates the standard pick move, from the home pose to the conveyor
    /// intercept point.
    pub fn simulate_pick(&self) -> Result<SimulationResult, KinematicsError> {
        self.run(&self.generator.generate_trapezoidal()?)
    }

    fn run(&self, trajectory: &Trajectory) -> Result<SimulationResult, KinematicsError> {
        let samples = trajectory.samples();
        let steps = samples.len();
        let dt = trajectory.time_step();

        let mut joint_angles = vec![[0.0; 3]; steps];
        let mut joint_velocities = vec![[0.0; 3]; steps];
        let mut torques = vec![[0.0; 3]; steps];
        let mut time = vec![0.0; steps];
        let mut failed_steps = Vec::new();
        let mut max_speed: f64 = 0.0;

        // Plant state of the placeholder dynamics (unit inertia)
        let mut current_position = samples.first().map(|s| s.position).unwrap_or([0.0; 3]);
        let mut current_velocity = [0.0; 3];

        for i in 0..steps {
            time[i] = samples[i].t;

            // Finite-difference Cartesian velocity, zero at the first sample
            let cartesian_velocity: [f64; 3] = if i == 0 {
                [0.0; 3]
            } else {
                std::array::from_fn(|axis| {
                    (samples[i].position[axis] - samples[i - 1].position[axis]) / dt
                })
            };

            let position = samples[i].position;
            let step = self
                .kinematics
                .inverse_kinematics(position[0], position[1], position[2])
                .and_then(|angles| {
                    self.kinematics
                        .inverse_kinematics_with_velocity(angles, cartesian_velocity)
                })
                .and_then(|(angles, velocities)| {
                    if is_valid(&velocities) {
                        Ok((angles, velocities))
                    } else {
                        Err(KinematicsError::NumericalInstability(
                            "non-finite joint velocities".to_string(),
                        ))
                    }
                });

            match step {
                Ok((angles, velocities)) => {
                    joint_angles[i] = angles;
                    joint_velocities[i] = velocities;
                    let speed = cartesian_velocity
                        .iter()
                        .map(|v| v * v)
                        .sum::<f64>()
                        .sqrt();
                    max_speed = max_speed.max(speed);
                }
                Err(error) => match self.policy {
                    RecoveryPolicy::Abort => return Err(error),
                    RecoveryPolicy::SkipAndZero => {
                        warn!(step = i, %error, "kinematics failed, step zeroed");
                        failed_steps.push(i);
                    }
                },
            }

            // Cascade correction toward the profile sample
            let desired_velocity = self
                .controller
                .position_control(&current_position, &samples[i].position);
            torques[i] = self
                .controller
                .velocity_control(&desired_velocity, &current_velocity);

            if i > 0 {
                for axis in 0..3 {
                    current_velocity[axis] += torques[i][axis] * dt;
                    current_position[axis] += current_velocity[axis] * dt;
                }
            }
        }

        Ok(SimulationResult {
            joint_angles,
            joint_velocities,
            torques,
            time,
            max_speed,
            failed_steps,
        })
    }
}
