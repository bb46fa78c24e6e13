//! Rust implementation of inverse and forward kinematic solutions, trapezoidal
//! trajectory generation and cascade control simulation for a three-arm rotary
//! delta (parallel) robot.
//!
//! The solver follows the classic analytic treatment of the rotary delta: each
//! actuated arm is solved independently in its own frame (rotated 0°, 120° and
//! 240° around the vertical axis) as a 2D circle intersection, and the
//! end-effector position is recovered from joint angles by intersecting the
//! three lower-arm spheres.
//!
//! # Features
//!
//! - Inverse kinematics with typed rejection of unreachable targets (negative
//!   discriminant) and of targets on the base plane, instead of NaN
//!   propagation.
//! - Forward kinematics (sphere trilateration), allowing round-trip
//!   verification of every inverse solution.
//! - Velocity Jacobian with Moore-Penrose pseudo-inverse mapping of Cartesian
//!   velocities to joint velocities. The model is deliberately reduced (the z
//!   row is zero, see [jacobian::Jacobian]).
//! - Workspace queries: home pose, lowest reachable point, mid-workspace
//!   height.
//! - Trapezoidal motion profiles (ramp up, cruise, ramp down in equal thirds)
//!   on a fixed time grid, fully materialized and timestamp-addressable.
//! - A cascade (position then velocity) simulation loop with an explicit
//!   per-step recovery policy and a pluggable controller capability.
//!
//! All public operations take and return plain `f64` scalars and `[f64; 3]`
//! arrays, so consumers do not depend on the internal linear algebra crate.
//!
//! # Parameters
//!
//! The robot is described by four lengths in [parameters::delta_robot::RobotGeometry]:
//! the base triangle side `f`, the end-effector triangle side `e`, the upper
//! arm length `rf` and the lower arm length `re`. Joint angles are degrees;
//! z is negative below the base plane.

pub mod parameters;

pub mod kinematic_traits;
pub mod kinematics_error;
pub mod kinematics_impl;

pub mod jacobian;

pub mod trajectory;

pub mod controller;
pub mod simulator;

pub mod utils;

#[cfg(test)]
mod tests;
