//! Per-frame animation of the animated group.

use std::f32::consts::TAU;

use super::node::Group;

/// Rotation advance per loop iteration, in radians. The step is applied per
/// frame, not scaled by elapsed time, so the spin speed follows the display's
/// refresh rate.
pub const ROTATION_STEP: f32 = 0.01;

/// Vertical bob applied to the animated group: bounded to [-0.1, 0.1].
pub fn vertical_offset(elapsed_seconds: f32) -> f32 {
    elapsed_seconds.sin() / 10.0
}

/// Drives the animated group's transform once per frame.
///
/// Rotation is derived from the frame count so it stays an exact multiple of
/// [`ROTATION_STEP`] (mod 2π) regardless of how many frames have passed.
#[derive(Debug, Default)]
pub struct Animator {
    frames: u64,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn advance(&mut self, group: &mut Group, elapsed_seconds: f32) {
        self.frames += 1;
        group.transform.rotation.y = (self.frames as f32 * ROTATION_STEP).rem_euclid(TAU);
        group.transform.position.y = vertical_offset(elapsed_seconds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_is_step_times_frame_count_mod_tau() {
        let mut animator = Animator::new();
        let mut group = Group::new("animated");

        for n in 1..=2000u64 {
            animator.advance(&mut group, 0.0);
            let expected = (n as f32 * ROTATION_STEP).rem_euclid(TAU);
            assert_eq!(group.transform.rotation.y, expected, "frame {}", n);
        }
    }

    #[test]
    fn test_rotation_stays_in_range() {
        let mut animator = Animator::new();
        let mut group = Group::new("animated");
        for _ in 0..1000 {
            animator.advance(&mut group, 0.0);
            assert!(group.transform.rotation.y >= 0.0);
            assert!(group.transform.rotation.y < TAU);
        }
    }

    #[test]
    fn test_vertical_offset_matches_sine() {
        for i in 0..100 {
            let t = i as f32 * 0.37;
            let offset = vertical_offset(t);
            assert!((offset - t.sin() / 10.0).abs() < 1e-9);
            assert!(offset.abs() <= 0.1);
        }
    }

    #[test]
    fn test_advance_applies_offset_to_group() {
        let mut animator = Animator::new();
        let mut group = Group::new("animated");
        animator.advance(&mut group, 1.5f32);
        assert_eq!(group.transform.position.y, 1.5f32.sin() / 10.0);
    }
}
