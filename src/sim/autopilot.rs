//! Idle/demo mode driver
//!
//! Looks a short distance up the road and steers toward the nearest lane
//! with no approaching traffic. Moves are one lane at a time, like the
//! player's own input.

use super::entity::Obstacle;
use super::lane::LaneIndex;
use super::state::GameState;

/// How far above the player to watch, in car lengths
const LOOKAHEAD_CARS: f32 = 2.0;

/// A single lateral move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steer {
    Left,
    Right,
}

/// Pick the next lateral move, if any
pub fn suggest(state: &GameState) -> Option<Steer> {
    if !state.run.running() {
        return None;
    }

    let player = &state.player;
    let row_top = player.pos.y;
    let row_bottom = player.pos.y + player.size.y;
    let watch_top = row_top - player.size.y * LOOKAHEAD_CARS;

    let spans = |o: &Obstacle, top: f32, bottom: f32| o.pos.y + o.size.y > top && o.pos.y < bottom;
    let threatened = |lane: LaneIndex| {
        state
            .obstacles
            .iter()
            .any(|o| o.lane == lane && spans(o, watch_top, row_bottom))
    };
    let occupied_now = |lane: LaneIndex| {
        state
            .obstacles
            .iter()
            .any(|o| o.lane == lane && spans(o, row_top, row_bottom))
    };

    if !threatened(player.lane) {
        return None;
    }

    let mut lanes: Vec<LaneIndex> = (0..state.grid.lane_count).collect();
    lanes.sort_by_key(|&lane| lane.abs_diff(player.lane));
    let target = lanes.into_iter().find(|&lane| !threatened(lane))?;

    let (step, steer) = if target < player.lane {
        (state.grid.left_of(player.lane), Steer::Left)
    } else {
        (state.grid.right_of(player.lane), Steer::Right)
    };

    // Sliding into a car alongside is worse than waiting a tick
    if occupied_now(step) {
        return None;
    }
    Some(steer)
}
