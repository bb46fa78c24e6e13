//! Defines the delta robot geometry data structure

pub mod delta_robot {

    /// Geometric constants of a rotary delta robot.
    ///
    /// The robot consists of a fixed base triangle carrying three actuators
    /// (rotated 0°, 120° and 240° around the vertical axis), each driving an
    /// upper arm that connects through a pair of lower arms to the moving
    /// end-effector triangle. The structure is immutable for the lifetime of
    /// a controller instance; all workspace queries and solver calls derive
    /// from these four lengths.
    #[derive(Debug, Clone, Copy)]
    pub struct RobotGeometry {
        /// Side length of the fixed base equilateral triangle.
        pub f: f64,

        /// Side length of the end-effector equilateral triangle.
        pub e: f64,

        /// Length of the actuated upper arms.
        pub rf: f64,

        /// Length of the passive lower arms.
        pub re: f64,

        /// Mass of the end-effector platform plus payload. Only the
        /// gravity/torque placeholder uses this; the kinematics do not.
        pub mass: f64,
    }

    impl RobotGeometry {
        /// Creates a geometry from the four lengths, with zero payload mass.
        pub fn new(f: f64, e: f64, rf: f64, re: f64) -> Self {
            RobotGeometry {
                f,
                e,
                rf,
                re,
                mass: 0.0,
            }
        }

        pub fn with_mass(mut self, mass: f64) -> Self {
            self.mass = mass;
            self
        }
    }
}
