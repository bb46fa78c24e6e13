//! Shared types of the kinematics, trajectory and simulation layers.
//!
//! All public values are plain scalars and fixed-size arrays so that
//! downstream consumers (plotting, logging, further control) do not depend
//! on the internal linear algebra library.

/// Angles of the three actuated arms, in degrees, one per arm counted from
/// the arm's own reference axis (arms are rotated 0°, 120° and 240° around
/// the base).
pub type Joints = [f64; 3];

/// Angular velocities of the three actuated arms, in radians per second.
/// The Jacobian is built in radians, so velocity mapping stays in radians
/// even though joint angles are reported in degrees.
pub type JointVelocities = [f64; 3];

/// All joints at the zero (horizontal upper arm) position.
pub const JOINTS_AT_ZERO: Joints = [0.0; 3];

/// Cartesian state of the end-effector platform in the robot base frame.
/// z is conventionally negative below the base plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartesianState {
    pub position: [f64; 3],

    /// Velocity in the base frame, if known at this state.
    pub velocity: Option<[f64; 3]>,
}

impl CartesianState {
    /// A state with known position and no velocity information.
    pub fn at(position: [f64; 3]) -> Self {
        CartesianState {
            position,
            velocity: None,
        }
    }

    pub fn moving(position: [f64; 3], velocity: [f64; 3]) -> Self {
        CartesianState {
            position,
            velocity: Some(velocity),
        }
    }
}
