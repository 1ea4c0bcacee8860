//! Speed ramp
//!
//! Scroll speed grows by a fixed amount every completed tick. Because the
//! spawn gate is distance based, faster scrolling also means more traffic.

use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyRamp {
    /// Speed at run start
    pub base_speed: f32,
    /// Added per completed tick, always positive
    pub increment: f32,
}

impl DifficultyRamp {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            base_speed: tuning.base_speed,
            increment: tuning.speed_increment,
        }
    }

    /// Speed for the next tick
    #[inline]
    pub fn step(&self, speed: f32) -> f32 {
        speed + self.increment
    }
}
