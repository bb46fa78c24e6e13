//! Error handling for the kinematics and trajectory engine

/// Unified error to report failures of the solver, the workspace queries
/// and the simulation loop.
#[derive(Debug, Clone, PartialEq)]
pub enum KinematicsError {
    /// The inverse kinematics discriminant is negative for at least one arm,
    /// or the target lies on the base plane (z = 0) where the solver's
    /// intermediate terms divide by z. The target cannot be reached.
    UnreachableTarget { x: f64, y: f64, z: f64 },

    /// The configured lengths are inconsistent: a workspace formula produced
    /// an imaginary result. `required` is the span the lower arms would have
    /// to cover, `available` what the geometry provides. This is a
    /// configuration error and is never recovered silently.
    UnreachableGeometry { required: f64, available: f64 },

    /// The Jacobian pseudo-inverse failed to converge for a degenerate or
    /// near-singular configuration.
    NumericalInstability(String),

    /// The three joint angles do not admit a common end-effector point
    /// (forward kinematics sphere intersection is empty).
    InvalidJointConfiguration { theta1: f64, theta2: f64, theta3: f64 },
}

impl std::fmt::Display for KinematicsError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            KinematicsError::UnreachableTarget { x, y, z } =>
                write!(f, "Target position ({}, {}, {}) is not reachable", x, y, z),
            KinematicsError::UnreachableGeometry { required, available } =>
                write!(f, "Inconsistent geometry: lower arms of {} cannot span {}", available, required),
            KinematicsError::NumericalInstability(ref msg) =>
                write!(f, "Numerical instability: {}", msg),
            KinematicsError::InvalidJointConfiguration { theta1, theta2, theta3 } =>
                write!(f, "Joint angles ({}, {}, {}) deg do not intersect in a common point", theta1, theta2, theta3),
        }
    }
}

impl std::error::Error for KinematicsError {}
