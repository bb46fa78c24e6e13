//! Pluggable cascade controller capability.

/// Two-operation cascade contract: an outer position loop turns a position
/// error into a velocity setpoint, an inner velocity loop turns the
/// velocity error into a torque command. Any implementation of these two
/// operations can be plugged into the simulator; no stability guarantee is
/// implied by the contract itself.
pub trait Controller {
    /// Velocity setpoint from the position error, per axis.
    fn position_control(&self, current: &[f64; 3], target: &[f64; 3]) -> [f64; 3];

    /// Torque command from the velocity error, per axis.
    fn velocity_control(&self, desired: &[f64; 3], current: &[f64; 3]) -> [f64; 3];
}

/// Plain proportional law on both loops. A placeholder feedback gain for
/// simulation, not a tuned controller.
#[derive(Debug, Clone, Copy)]
pub struct ProportionalController {
    pub kp_pos: f64,
    pub kp_vel: f64,
}

impl ProportionalController {
    pub fn new(kp_pos: f64, kp_vel: f64) -> Self {
        ProportionalController { kp_pos, kp_vel }
    }
}

impl Controller for ProportionalController {
    fn position_control(&self, current: &[f64; 3], target: &[f64; 3]) -> [f64; 3] {
        std::array::from_fn(|axis| self.kp_pos * (target[axis] - current[axis]))
    }

    fn velocity_control(&self, desired: &[f64; 3], current: &[f64; 3]) -> [f64; 3] {
        std::array::from_fn(|axis| self.kp_vel * (desired[axis] - current[axis]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_control_is_proportional() {
        let controller = ProportionalController::new(2.0, 0.5);
        let setpoint = controller.position_control(&[0.0, 1.0, -1.0], &[1.0, 1.0, 0.0]);
        assert_eq!(setpoint, [2.0, 0.0, 2.0]);
    }

    #[test]
    fn test_velocity_control_is_proportional() {
        let controller = ProportionalController::new(2.0, 0.5);
        let torque = controller.velocity_control(&[1.0, 0.0, -2.0], &[0.0, 0.0, 0.0]);
        assert_eq!(torque, [0.5, 0.0, -1.0]);
    }

    #[test]
    fn test_zero_error_commands_nothing() {
        let controller = ProportionalController::new(2.0, 0.5);
        let state = [0.3, -0.2, 0.1];
        assert_eq!(controller.position_control(&state, &state), [0.0, 0.0, 0.0]);
        assert_eq!(controller.velocity_control(&state, &state), [0.0, 0.0, 0.0]);
    }
}
