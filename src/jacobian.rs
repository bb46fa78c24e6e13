extern crate nalgebra as na;
use crate::kinematic_traits::{JointVelocities, Joints};
use crate::kinematics_error::KinematicsError;
use crate::parameters::delta_robot::RobotGeometry;
use na::linalg::SVD;
use na::{Matrix3, Vector3};

/// Default singular value cutoff for the pseudo-inverse.
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Struct representing the velocity Jacobian of the delta robot
///
/// The Jacobian maps the joint angular velocities (radians per second) to
/// the Cartesian velocity of the end-effector. Each column corresponds to
/// one actuated arm.
///
/// The matrix is a reduced model: its third row is all zero, so the z
/// component of the Cartesian velocity is not coupled to the joints. This
/// rank deficiency is deliberate (the source model leaves the z coupling
/// unresolved); the velocity mapping therefore always goes through the
/// Moore-Penrose pseudo-inverse rather than a direct inverse.
pub struct Jacobian {
    matrix: Matrix3<f64>,

    /// Singular values below this are treated as zero when inverting.
    epsilon: f64,
}

impl Jacobian {
    /// Constructs the Jacobian for the given geometry and joint configuration.
    ///
    /// Angles change every sample, so the matrix is recomputed fresh on each
    /// call; nothing is cached.
    pub fn new(geometry: &RobotGeometry, joints: &Joints) -> Self {
        Self::with_epsilon(geometry, joints, DEFAULT_EPSILON)
    }

    /// Same as [Jacobian::new] but with an explicit singular value cutoff.
    pub fn with_epsilon(geometry: &RobotGeometry, joints: &Joints, epsilon: f64) -> Self {
        Self {
            matrix: compute_jacobian(geometry, joints),
            epsilon,
        }
    }

    /// Returns the matrix rows as plain arrays, row major.
    pub fn as_array(&self) -> [[f64; 3]; 3] {
        let m = &self.matrix;
        [
            [m[(0, 0)], m[(0, 1)], m[(0, 2)]],
            [m[(1, 0)], m[(1, 1)], m[(1, 2)]],
            [m[(2, 0)], m[(2, 1)], m[(2, 2)]],
        ]
    }

    /// Computes the joint velocities required to achieve a desired
    /// end-effector velocity
    ///
    /// # Arguments
    ///
    /// * `cartesian_velocity` - desired `[vx, vy, vz]` of the end-effector
    ///
    /// # Returns
    ///
    /// Joint angular velocities in radians per second, or
    /// [KinematicsError::NumericalInstability] if the pseudo-inverse cannot
    /// be computed.
    ///
    /// This method tries the direct inverse first and falls back to the
    /// pseudo-inverse. With the all-zero third row the direct inverse never
    /// exists, so the pseudo-inverse path is the one normally taken; it
    /// yields the minimum-norm least-squares solution, ignoring the
    /// unachievable z component.
    pub fn velocities(
        &self,
        cartesian_velocity: &[f64; 3],
    ) -> Result<JointVelocities, KinematicsError> {
        let desired = Vector3::new(
            cartesian_velocity[0],
            cartesian_velocity[1],
            cartesian_velocity[2],
        );

        let joint_velocities: Vector3<f64>;
        if let Some(jacobian_inverse) = self.matrix.try_inverse() {
            joint_velocities = jacobian_inverse * desired;
        } else {
            let svd = SVD::new(self.matrix, true, true);
            match svd.pseudo_inverse(self.epsilon) {
                Ok(jacobian_pseudoinverse) => {
                    joint_velocities = jacobian_pseudoinverse * desired;
                }
                Err(msg) => {
                    return Err(KinematicsError::NumericalInstability(msg.to_string()));
                }
            }
        }
        Ok([joint_velocities.x, joint_velocities.y, joint_velocities.z])
    }

    /// Computes the joint torques balancing a desired end-effector force
    ///
    /// # Arguments
    ///
    /// * `force` - `[fx, fy, fz]` acting on the end-effector
    ///
    /// # Returns
    ///
    /// Joint torques, via the transpose mapping. The zero third row means a
    /// pure z force maps to zero joint torque; this is the same unresolved
    /// coupling as in the velocity mapping.
    pub fn torques(&self, force: &[f64; 3]) -> [f64; 3] {
        let desired = Vector3::new(force[0], force[1], force[2]);
        let joint_torques = self.matrix.transpose() * desired;
        [joint_torques.x, joint_torques.y, joint_torques.z]
    }
}

/// Builds the reduced 3x3 Jacobian for the given joint angles (degrees).
///
/// Row 0 is `-rf * sin(theta_i)`, row 1 is `rf * cos(theta_i)`, row 2 is
/// zero.
pub fn compute_jacobian(geometry: &RobotGeometry, joints: &Joints) -> Matrix3<f64> {
    let rf = geometry.rf;
    let [t1, t2, t3] = joints.map(f64::to_radians);
    Matrix3::new(
        -rf * t1.sin(), -rf * t2.sin(), -rf * t3.sin(),
        rf * t1.cos(), rf * t2.cos(), rf * t3.cos(),
        0.0, 0.0, 0.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematic_traits::JOINTS_AT_ZERO;

    const EPSILON: f64 = 1e-9;

    fn geometry() -> RobotGeometry {
        RobotGeometry::new(0.3, 0.1, 0.5, 0.5)
    }

    #[test]
    fn test_jacobian_at_zero_joints() {
        let jacobian = Jacobian::new(&geometry(), &JOINTS_AT_ZERO);
        let rf = geometry().rf;
        let rows = jacobian.as_array();
        for column in 0..3 {
            assert!(rows[0][column].abs() < EPSILON);
            assert!((rows[1][column] - rf).abs() < EPSILON);
            assert_eq!(rows[2][column], 0.0);
        }
    }

    #[test]
    fn test_velocities_distribute_y_component() {
        // At zero joints only the y row is nonzero; the minimum-norm
        // solution splits vy equally over the three arms and ignores vx, vz.
        let jacobian = Jacobian::new(&geometry(), &JOINTS_AT_ZERO);
        let velocities = jacobian.velocities(&[0.1, 0.3, 0.2]).expect("pinv failed");
        for arm in 0..3 {
            assert!((velocities[arm] - 0.2).abs() < EPSILON, "arm {}: {}", arm, velocities[arm]);
        }
    }

    #[test]
    fn test_velocities_roundtrip_through_matrix() {
        let joints = [30.0, 45.0, 60.0];
        let jacobian = Jacobian::new(&geometry(), &joints);
        let velocities = jacobian.velocities(&[0.05, -0.02, 0.0]).expect("pinv failed");
        let matrix = compute_jacobian(&geometry(), &joints);
        let back = matrix * Vector3::new(velocities[0], velocities[1], velocities[2]);
        // x and y are achievable for this configuration and must round-trip.
        assert!((back.x - 0.05).abs() < EPSILON);
        assert!((back.y + 0.02).abs() < EPSILON);
        assert_eq!(back.z, 0.0);
    }

    #[test]
    fn test_torques_ignore_z_force() {
        let jacobian = Jacobian::new(&geometry(), &JOINTS_AT_ZERO);
        let torques = jacobian.torques(&[0.0, 0.0, -9.81]);
        assert_eq!(torques, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_torques_from_y_force() {
        let jacobian = Jacobian::new(&geometry(), &JOINTS_AT_ZERO);
        let torques = jacobian.torques(&[0.0, 2.0, 0.0]);
        for arm in 0..3 {
            assert!((torques[arm] - 2.0 * geometry().rf).abs() < EPSILON);
        }
    }
}
