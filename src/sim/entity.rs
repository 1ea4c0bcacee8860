//! Player and obstacle entities

use glam::Vec2;

use super::lane::{LaneGrid, LaneIndex};
use crate::tuning::Tuning;

/// Axis-aligned rectangle, `pos` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }
}

/// The player's car
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub lane: LaneIndex,
    pub pos: Vec2,
    pub size: Vec2,
}

impl Player {
    /// Place a fresh car in the center lane
    pub fn new(grid: &LaneGrid, tuning: &Tuning) -> Self {
        let lane = grid.center_lane();
        Self {
            lane,
            pos: Vec2::new(grid.lane_to_x(lane), tuning.player_y()),
            size: tuning.car_size(),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Jump to a lane (clamped to the grid), keeping x in sync
    pub fn set_lane(&mut self, lane: LaneIndex, grid: &LaneGrid) {
        self.lane = lane.min(grid.last_lane());
        self.pos.x = grid.lane_to_x(self.lane);
    }

    /// Returns true if the car actually moved
    pub fn move_left(&mut self, grid: &LaneGrid) -> bool {
        let target = grid.left_of(self.lane);
        let moved = target != self.lane;
        self.set_lane(target, grid);
        moved
    }

    /// Returns true if the car actually moved
    pub fn move_right(&mut self, grid: &LaneGrid) -> bool {
        let target = grid.right_of(self.lane);
        let moved = target != self.lane;
        self.set_lane(target, grid);
        moved
    }
}

/// Oncoming car
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    /// Lane at spawn time
    pub lane: LaneIndex,
    pub pos: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    /// Create an obstacle just above the visible area
    pub fn new(id: u32, lane: LaneIndex, grid: &LaneGrid, size: Vec2) -> Self {
        Self {
            id,
            lane,
            pos: Vec2::new(grid.lane_to_x(lane), -size.y),
            size,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}
