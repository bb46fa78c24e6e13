//! The delta robot kinematics engine: inverse and forward kinematics plus
//! the workspace queries the trajectory generator builds on.

use crate::jacobian::Jacobian;
use crate::kinematic_traits::{CartesianState, JointVelocities, Joints};
use crate::kinematics_error::KinematicsError;
use crate::parameters::delta_robot::RobotGeometry;
use std::f64::consts::PI;

/// Analytic kinematics of a rotary delta robot over an immutable
/// [RobotGeometry]. Pure functions of the four lengths; no state is kept
/// between calls.
#[derive(Debug, Clone)]
pub struct DeltaKinematics {
    geometry: RobotGeometry,
}

impl DeltaKinematics {
    /// Creates a new `DeltaKinematics` instance with the given geometry.
    pub fn new(geometry: RobotGeometry) -> Self {
        DeltaKinematics { geometry }
    }

    pub fn geometry(&self) -> &RobotGeometry {
        &self.geometry
    }

    /// Solves the inverse kinematics for a Cartesian target.
    ///
    /// Each arm is solved in its own frame: the target is rotated by 0°,
    /// 120° and 240° in the xy plane (z is shared, the mechanism is
    /// rotationally symmetric about the vertical axis) and the arm angle
    /// follows from a 2D circle intersection.
    ///
    /// # Returns
    ///
    /// The three joint angles in degrees, or
    /// [KinematicsError::UnreachableTarget] when the target lies outside
    /// some arm's reachable circle or on the base plane (z = 0).
    pub fn inverse_kinematics(&self, x: f64, y: f64, z: f64) -> Result<Joints, KinematicsError> {
        let theta1 = self.arm_angle(x, y, z)?;

        // Second arm, frame rotated by 120°
        let cos120 = (2.0 * PI / 3.0).cos();
        let sin120 = (2.0 * PI / 3.0).sin();
        let theta2 = self.arm_angle(x * cos120 + y * sin120, y * cos120 - x * sin120, z)?;

        // Third arm, frame rotated by 240°
        let cos240 = (4.0 * PI / 3.0).cos();
        let sin240 = (4.0 * PI / 3.0).sin();
        let theta3 = self.arm_angle(x * cos240 + y * sin240, y * cos240 - x * sin240, z)?;

        Ok([theta1, theta2, theta3])
    }

    /// Single-arm solve in the arm's local yz plane.
    fn arm_angle(&self, x0: f64, y0: f64, z0: f64) -> Result<f64, KinematicsError> {
        if z0 == 0.0 {
            // The intermediate terms below divide by z; a target on the base
            // plane is outside every arm's solution circle anyway.
            return Err(KinematicsError::UnreachableTarget { x: x0, y: y0, z: z0 });
        }
        let g = &self.geometry;
        let tan30 = 1.0 / 3.0_f64.sqrt();
        let y1 = -0.5 * g.f * tan30;
        let y0 = y0 - 0.5 * g.e * tan30;

        let a = (x0 * x0 + y0 * y0 + z0 * z0 + g.rf * g.rf - g.re * g.re - y1 * y1) / (2.0 * z0);
        let b = (y1 - y0) / z0;

        // Discriminant of the elbow circle intersection
        let d = -(a + b * y1).powi(2) + g.rf * (b * b * g.rf + g.rf);
        if d < 0.0 {
            return Err(KinematicsError::UnreachableTarget { x: x0, y: y0, z: z0 });
        }

        let yj = (y1 - a * b - d.sqrt()) / (b * b + 1.0);
        let zj = a + b * yj;
        Ok((-zj).atan2(y1 - yj).to_degrees())
    }

    /// Computes the end-effector position from the three joint angles
    /// (degrees) by intersecting the three lower-arm spheres.
    ///
    /// Fails with [KinematicsError::InvalidJointConfiguration] when the
    /// spheres have no common point. Of the two intersection roots the lower
    /// one (z more negative) is returned, matching the working pose of the
    /// robot below its base plane.
    pub fn forward_kinematics(&self, joints: &Joints) -> Result<[f64; 3], KinematicsError> {
        let g = &self.geometry;
        let tan30 = 1.0 / 3.0_f64.sqrt();
        let sin30 = 0.5;
        let tan60 = 3.0_f64.sqrt();
        let t = (g.f - g.e) * tan30 / 2.0;
        let [t1, t2, t3] = joints.map(f64::to_radians);

        // Elbow positions, shifted towards the effector center by t
        let y1 = -(t + g.rf * t1.cos());
        let z1 = -g.rf * t1.sin();

        let y2 = (t + g.rf * t2.cos()) * sin30;
        let x2 = y2 * tan60;
        let z2 = -g.rf * t2.sin();

        let y3 = (t + g.rf * t3.cos()) * sin30;
        let x3 = -y3 * tan60;
        let z3 = -g.rf * t3.sin();

        let dnm = (y2 - y1) * x3 - (y3 - y1) * x2;

        let w1 = y1 * y1 + z1 * z1;
        let w2 = x2 * x2 + y2 * y2 + z2 * z2;
        let w3 = x3 * x3 + y3 * y3 + z3 * z3;

        // x = (a1*z + b1)/dnm
        let a1 = (z2 - z1) * (y3 - y1) - (z3 - z1) * (y2 - y1);
        let b1 = -((w2 - w1) * (y3 - y1) - (w3 - w1) * (y2 - y1)) / 2.0;

        // y = (a2*z + b2)/dnm
        let a2 = -(z2 - z1) * x3 + (z3 - z1) * x2;
        let b2 = ((w2 - w1) * x3 - (w3 - w1) * x2) / 2.0;

        // a*z^2 + b*z + c = 0
        let a = a1 * a1 + a2 * a2 + dnm * dnm;
        let b = 2.0 * (a1 * b1 + a2 * (b2 - y1 * dnm) - z1 * dnm * dnm);
        let c = (b2 - y1 * dnm).powi(2) + b1 * b1 + dnm * dnm * (z1 * z1 - g.re * g.re);

        let d = b * b - 4.0 * a * c;
        if d < 0.0 {
            return Err(KinematicsError::InvalidJointConfiguration {
                theta1: joints[0],
                theta2: joints[1],
                theta3: joints[2],
            });
        }

        let z = -0.5 * (b + d.sqrt()) / a;
        Ok([(a1 * z + b1) / dnm, (a2 * z + b2) / dnm, z])
    }

    /// Maps a Cartesian velocity to joint velocities at the given joint
    /// configuration, via the pseudo-inverse of the reduced Jacobian.
    ///
    /// # Returns
    ///
    /// The joint angles passed through unchanged, paired with the joint
    /// angular velocities.
    pub fn inverse_kinematics_with_velocity(
        &self,
        joints: Joints,
        cartesian_velocity: [f64; 3],
    ) -> Result<(Joints, JointVelocities), KinematicsError> {
        let jacobian = Jacobian::new(&self.geometry, &joints);
        let joint_velocities = jacobian.velocities(&cartesian_velocity)?;
        Ok((joints, joint_velocities))
    }

    /// Analytic home pose directly above the workspace center, with the
    /// end-effector aligned along the z axis.
    ///
    /// Fails with [KinematicsError::UnreachableGeometry] when the configured
    /// lengths cannot reach a vertical home pose (imaginary z).
    pub fn home_position(&self) -> Result<CartesianState, KinematicsError> {
        let g = &self.geometry;
        let tan30 = 1.0 / 3.0_f64.sqrt();

        // Radial distance from the axis to the effector center at home
        let xy_distance = g.rf + (g.f - g.e) * tan30;
        if g.re * g.re < xy_distance * xy_distance {
            return Err(KinematicsError::UnreachableGeometry {
                required: xy_distance,
                available: g.re,
            });
        }
        let z = -(g.re * g.re - xy_distance * xy_distance).sqrt();
        Ok(CartesianState::at([0.0, 0.0, z]))
    }

    /// Lowest reachable z, with the arm pair fully extended vertically.
    pub fn lowest_z(&self) -> Result<f64, KinematicsError> {
        let g = &self.geometry;
        let offset = 0.5 * (g.f / 3.0_f64.sqrt() - g.e / 3.0_f64.sqrt());
        let total_length = g.rf + g.re;
        if total_length * total_length < offset * offset {
            return Err(KinematicsError::UnreachableGeometry {
                required: offset,
                available: total_length,
            });
        }
        Ok(-(total_length * total_length - offset * offset).sqrt())
    }

    /// Midpoint along z between the home pose and the lowest reachable
    /// point. The trajectory generator picks objects at this height.
    pub fn middle_taskspace_z(&self) -> Result<f64, KinematicsError> {
        let home = self.home_position()?;
        let lowest = self.lowest_z()?;
        Ok((home.position[2] + lowest) / 2.0)
    }
}
