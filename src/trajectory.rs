//! Trapezoidal trajectory generation for the conveyor pick move.

use crate::kinematic_traits::CartesianState;
use crate::kinematics_error::KinematicsError;
use crate::kinematics_impl::DeltaKinematics;

/// Default length of the approach window in seconds.
pub const DEFAULT_DURATION: f64 = 0.25;

/// Default sampling step in seconds.
pub const DEFAULT_TIME_STEP: f64 = 0.01;

/// Immutable inputs of one trapezoidal profile generation call.
#[derive(Debug, Clone, Copy)]
pub struct TrajectorySpec {
    pub start_position: [f64; 3],
    pub end_position: [f64; 3],
    pub duration: f64,
    pub time_step: f64,
}

/// One instant of the generated motion profile: position, velocity and
/// acceleration for all three Cartesian axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSample {
    pub t: f64,
    pub position: [f64; 3],
    pub velocity: [f64; 3],
    pub acceleration: [f64; 3],
}

/// A fully materialized motion profile on a fixed time grid, ordered by
/// time and addressable by timestamp. Consumers (plotting, the cascade
/// loop) read it without recomputing anything.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    samples: Vec<MotionSample>,
    time_step: f64,
}

impl Trajectory {
    pub fn samples(&self) -> &[MotionSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Timestamp of the last sample.
    pub fn duration(&self) -> f64 {
        self.samples.last().map(|s| s.t).unwrap_or(0.0)
    }

    /// Random access by timestamp. Timestamps live on the fixed grid, so
    /// the lookup rounds to the nearest grid index and verifies the match.
    pub fn at(&self, t: f64) -> Option<&MotionSample> {
        if t < 0.0 || !t.is_finite() {
            return None;
        }
        let index = (t / self.time_step).round() as usize;
        let sample = self.samples.get(index)?;
        if (sample.t - t).abs() <= self.time_step / 2.0 {
            Some(sample)
        } else {
            None
        }
    }

    /// Position series for external consumers, one `(t, [x, y, z])` pair
    /// per sample.
    pub fn positions(&self) -> Vec<(f64, [f64; 3])> {
        self.samples.iter().map(|s| (s.t, s.position)).collect()
    }

    pub fn velocities(&self) -> Vec<(f64, [f64; 3])> {
        self.samples.iter().map(|s| (s.t, s.velocity)).collect()
    }

    pub fn accelerations(&self) -> Vec<(f64, [f64; 3])> {
        self.samples.iter().map(|s| (s.t, s.acceleration)).collect()
    }
}

/// Generates trapezoidal motion profiles between the robot home pose and a
/// pick point above a moving conveyor.
///
/// The profile splits the duration into three equal thirds (ramp up,
/// cruise, ramp down) regardless of per-axis displacement; axes with small
/// displacement simply get small accelerations. `v_max` and `a_max` are
/// informational configuration only: the phase boundaries derive from the
/// duration, not from the limits, so peak velocities can exceed `v_max`
/// for large displacements.
#[derive(Debug, Clone)]
pub struct TrajectoryGenerator {
    /// Nominal velocity limit, informational (see above).
    pub v_max: f64,

    /// Nominal acceleration limit, informational (see above).
    pub a_max: f64,

    /// Belt speed of the conveyor, along x.
    pub conveyor_velocity: f64,

    /// Usable belt length; the pick point must fall inside it.
    pub conveyor_length: f64,

    /// Lane of the object on the belt (y coordinate, fixed).
    pub object_start_y: f64,

    pub duration: f64,
    pub time_step: f64,

    kinematics: DeltaKinematics,
}

impl TrajectoryGenerator {
    pub fn new(
        kinematics: DeltaKinematics,
        v_max: f64,
        a_max: f64,
        conveyor_velocity: f64,
        conveyor_length: f64,
        object_start_y: f64,
    ) -> Self {
        TrajectoryGenerator {
            v_max,
            a_max,
            conveyor_velocity,
            conveyor_length,
            object_start_y,
            duration: DEFAULT_DURATION,
            time_step: DEFAULT_TIME_STEP,
            kinematics,
        }
    }

    /// Overrides the default approach window and sampling step.
    pub fn with_timing(mut self, duration: f64, time_step: f64) -> Self {
        self.duration = duration;
        self.time_step = time_step;
        self
    }

    pub fn kinematics(&self) -> &DeltaKinematics {
        &self.kinematics
    }

    /// The pick target above the conveyor: x is the belt travel during the
    /// approach window, y the object lane, z the mid-workspace height.
    pub fn end_position(&self) -> Result<CartesianState, KinematicsError> {
        Ok(CartesianState::at([
            self.conveyor_velocity * self.duration,
            self.object_start_y,
            self.kinematics.middle_taskspace_z()?,
        ]))
    }

    /// Spec of the standard pick move, from the home pose to the conveyor
    /// intercept point.
    pub fn pick_spec(&self) -> Result<TrajectorySpec, KinematicsError> {
        Ok(TrajectorySpec {
            start_position: self.kinematics.home_position()?.position,
            end_position: self.end_position()?.position,
            duration: self.duration,
            time_step: self.time_step,
        })
    }

    /// Generates the trapezoidal profile of the standard pick move.
    pub fn generate_trapezoidal(&self) -> Result<Trajectory, KinematicsError> {
        Ok(self.generate(&self.pick_spec()?))
    }

    /// Generates a trapezoidal profile for an arbitrary spec.
    ///
    /// The time grid runs from 0 to `duration` inclusive. Velocity is
    /// closed-form per phase; position integrates forward with an Euler
    /// step, so the end position carries the integration residue of the
    /// grid (it is close to, not exactly, `end_position`). The three axes
    /// share the phase boundaries. Every call recomputes the full sequence;
    /// the result is not restartable.
    pub fn generate(&self, spec: &TrajectorySpec) -> Trajectory {
        let distance = [
            spec.end_position[0] - spec.start_position[0],
            spec.end_position[1] - spec.start_position[1],
            spec.end_position[2] - spec.start_position[2],
        ];
        let ramp = spec.duration / 3.0;

        let mut position = spec.start_position;
        let mut velocity = [0.0; 3];
        let mut acceleration = [0.0; 3];

        let steps = (spec.duration / spec.time_step).round() as usize;
        let mut samples = Vec::with_capacity(steps + 1);

        for i in 0..=steps {
            let t = i as f64 * spec.time_step;
            if t <= ramp {
                // Ramp up: constant acceleration sized to reach the cruise
                // velocity exactly at the phase boundary
                for axis in 0..3 {
                    acceleration[axis] = distance[axis] / (2.0 * ramp * ramp);
                    velocity[axis] = acceleration[axis] * t;
                }
            } else if t <= 2.0 * ramp {
                // Cruise: velocity holds at its value from the end of the ramp
                acceleration = [0.0; 3];
            } else {
                // Ramp down, mirrored so velocity hits zero at t = duration
                for axis in 0..3 {
                    acceleration[axis] = -distance[axis] / (2.0 * ramp * ramp);
                    velocity[axis] = acceleration[axis] * (t - spec.duration);
                }
            }
            for axis in 0..3 {
                position[axis] += velocity[axis] * spec.time_step;
            }
            samples.push(MotionSample {
                t,
                position,
                velocity,
                acceleration,
            });
        }

        Trajectory {
            samples,
            time_step: spec.time_step,
        }
    }
}
