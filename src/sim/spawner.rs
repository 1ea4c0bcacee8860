//! Obstacle spawning
//!
//! A new obstacle may only appear once the previous one has scrolled far
//! enough down the road. The gate is distance based, so the spawn rate rises
//! with scroll speed instead of being a fixed probability per tick.

use glam::Vec2;
use rand::Rng;

use super::entity::Obstacle;
use super::lane::LaneGrid;
use crate::tuning::Tuning;

/// Spawn policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spawner {
    /// The newest obstacle must have y >= this before another spawns
    pub min_gap: f32,
    /// Footprint of spawned obstacles
    pub size: Vec2,
}

impl Spawner {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            min_gap: tuning.min_spawn_gap(),
            size: tuning.car_size(),
        }
    }

    /// Whether the spacing gate is open. Obstacles are kept in spawn order,
    /// so the newest one is last.
    pub fn gate_open(&self, obstacles: &[Obstacle]) -> bool {
        obstacles.last().is_none_or(|last| last.pos.y >= self.min_gap)
    }

    /// Spawn an obstacle in a uniformly random lane if the gate is open.
    ///
    /// The player's lane is not excluded; head-on spawns are the main way a
    /// run ends.
    pub fn try_spawn<R: Rng>(
        &self,
        obstacles: &[Obstacle],
        grid: &LaneGrid,
        rng: &mut R,
        id: u32,
    ) -> Option<Obstacle> {
        if !self.gate_open(obstacles) {
            return None;
        }
        let lane = rng.random_range(0..grid.lane_count);
        Some(Obstacle::new(id, lane, grid, self.size))
    }
}
