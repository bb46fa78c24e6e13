//! Helper functions

use crate::kinematic_traits::Joints;

/// Checks if all joint values are finite
pub fn is_valid(qs: &Joints) -> bool {
    qs.iter().all(|&q| q.is_finite())
}

/// Print joint values (already in degrees).
#[allow(dead_code)]
pub fn dump_joints(joints: &Joints) {
    let mut row_str = String::new();
    for joint_idx in 0..3 {
        row_str.push_str(&format!("{:8.3} ", joints[joint_idx]));
    }
    println!("[{}]", row_str.trim_end());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_with_all_finite() {
        assert!(is_valid(&[0.0, 1.0, -1.0]));
    }

    #[test]
    fn test_is_valid_with_nan() {
        assert!(!is_valid(&[0.0, f64::NAN, 1.0]));
    }

    #[test]
    fn test_is_valid_with_infinity() {
        assert!(!is_valid(&[0.0, f64::INFINITY, 1.0]));
    }
}
