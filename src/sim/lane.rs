//! Lane geometry
//!
//! The road is centered on the canvas and split into equal-width lanes.
//! A car in lane `n` sits at the lane's left edge.

use crate::tuning::Tuning;

/// Lane number, `0..lane_count`
pub type LaneIndex = u32;

/// Static mapping from lane index to x-coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneGrid {
    /// Left edge of the road
    pub road_x: f32,
    pub road_width: f32,
    pub lane_count: u32,
}

impl LaneGrid {
    pub fn new(canvas_width: f32, road_width: f32, lane_count: u32) -> Self {
        Self {
            road_x: (canvas_width - road_width) / 2.0,
            road_width,
            lane_count: lane_count.max(1),
        }
    }

    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(tuning.canvas_width, tuning.road_width, tuning.lane_count)
    }

    #[inline]
    pub fn lane_width(&self) -> f32 {
        self.road_width / self.lane_count as f32
    }

    /// X-coordinate of a lane's left edge
    #[inline]
    pub fn lane_to_x(&self, lane: LaneIndex) -> f32 {
        self.road_x + lane as f32 * self.lane_width()
    }

    #[inline]
    pub fn last_lane(&self) -> LaneIndex {
        self.lane_count - 1
    }

    #[inline]
    pub fn contains(&self, lane: LaneIndex) -> bool {
        lane < self.lane_count
    }

    /// Lane a run starts in
    #[inline]
    pub fn center_lane(&self) -> LaneIndex {
        self.lane_count / 2
    }

    /// One lane to the left, stopping at lane 0
    #[inline]
    pub fn left_of(&self, lane: LaneIndex) -> LaneIndex {
        lane.saturating_sub(1)
    }

    /// One lane to the right, stopping at the last lane
    #[inline]
    pub fn right_of(&self, lane: LaneIndex) -> LaneIndex {
        (lane + 1).min(self.last_lane())
    }

    /// X positions of the lines between adjacent lanes
    pub fn divider_xs(&self) -> impl Iterator<Item = f32> + '_ {
        (1..self.lane_count).map(|lane| self.lane_to_x(lane))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn default_grid() -> LaneGrid {
        LaneGrid::from_tuning(&Tuning::default())
    }

    #[test]
    fn test_lane_to_x() {
        let grid = default_grid();
        assert_eq!(grid.road_x, 60.0);
        assert_eq!(grid.lane_to_x(0), 60.0);
        assert!((grid.lane_to_x(1) - (60.0 + 280.0 / 3.0)).abs() < 0.001);
        assert!((grid.lane_to_x(2) - (60.0 + 2.0 * 280.0 / 3.0)).abs() < 0.001);
    }

    #[test]
    fn test_center_lane() {
        assert_eq!(default_grid().center_lane(), 1);
        assert_eq!(LaneGrid::new(400.0, 300.0, 5).center_lane(), 2);
    }

    #[test]
    fn test_boundaries_clamp() {
        let grid = default_grid();
        assert_eq!(grid.left_of(0), 0);
        assert_eq!(grid.right_of(2), 2);
        assert_eq!(grid.left_of(2), 1);
        assert_eq!(grid.right_of(0), 1);
    }

    #[test]
    fn test_dividers() {
        let grid = default_grid();
        let xs: Vec<f32> = grid.divider_xs().collect();
        assert_eq!(xs.len(), 2);
        assert_eq!(xs[0], grid.lane_to_x(1));
        assert_eq!(xs[1], grid.lane_to_x(2));
    }

    proptest! {
        #[test]
        fn prop_steps_stay_in_bounds(lane_count in 1u32..8, start in 0u32..8, steps in proptest::collection::vec(any::<bool>(), 0..40)) {
            let grid = LaneGrid::new(800.0, 700.0, lane_count);
            let mut lane = start.min(grid.last_lane());
            for right in steps {
                lane = if right { grid.right_of(lane) } else { grid.left_of(lane) };
                prop_assert!(grid.contains(lane));
            }
        }
    }
}
