//! Game state and core simulation types
//!
//! Everything a run mutates lives here and is owned by the loop controller.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::difficulty::DifficultyRamp;
use super::entity::{Obstacle, Player};
use super::lane::LaneGrid;
use super::spawner::Spawner;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunPhase {
    /// Waiting for a start command (initial, and after a crash)
    #[default]
    Idle,
    /// Ticks are being scheduled
    Running,
}

/// Score, speed and phase of the current run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunState {
    /// Completed ticks this run
    pub score: u64,
    /// Scroll speed (pixels per tick), never decreases within a run
    pub speed: f32,
    pub phase: RunPhase,
}

impl RunState {
    pub fn new(base_speed: f32) -> Self {
        Self {
            score: 0,
            speed: base_speed,
            phase: RunPhase::Idle,
        }
    }

    #[inline]
    pub fn running(&self) -> bool {
        self.phase == RunPhase::Running
    }
}

/// Complete game state (deterministic for a given seed and command sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub tuning: Tuning,
    pub grid: LaneGrid,
    pub spawner: Spawner,
    pub ramp: DifficultyRamp,
    pub run: RunState,
    pub player: Player,
    /// Oncoming traffic in spawn order
    pub obstacles: Vec<Obstacle>,
    rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create an idle game with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let grid = LaneGrid::from_tuning(&tuning);
        let ramp = DifficultyRamp::from_tuning(&tuning);
        Self {
            seed,
            tuning,
            grid,
            spawner: Spawner::from_tuning(&tuning),
            ramp,
            run: RunState::new(ramp.base_speed),
            player: Player::new(&grid, &tuning),
            obstacles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Reset the player, road, score and speed and enter `Running`.
    ///
    /// The RNG stream carries over so consecutive runs differ.
    pub fn begin_run(&mut self) {
        self.player = Player::new(&self.grid, &self.tuning);
        self.obstacles.clear();
        self.run = RunState {
            score: 0,
            speed: self.ramp.base_speed,
            phase: RunPhase::Running,
        };
    }

    /// Enter `Idle`, keeping the final score and road visible
    pub fn end_run(&mut self) {
        self.run.phase = RunPhase::Idle;
    }

    /// Shift one lane left. Ignored unless running; returns true if the car moved.
    pub fn move_left(&mut self) -> bool {
        self.run.running() && self.player.move_left(&self.grid)
    }

    /// Shift one lane right. Ignored unless running; returns true if the car moved.
    pub fn move_right(&mut self) -> bool {
        self.run.running() && self.player.move_right(&self.grid)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn an obstacle if the spacing gate allows it
    pub fn try_spawn(&mut self) -> Option<&Obstacle> {
        let id = self.next_id;
        let obstacle = self
            .spawner
            .try_spawn(&self.obstacles, &self.grid, &mut self.rng, id)?;
        self.next_id += 1;
        log::trace!("Spawned obstacle {} in lane {}", obstacle.id, obstacle.lane);
        self.obstacles.push(obstacle);
        self.obstacles.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(1, Tuning::default());
        assert_eq!(state.run.phase, RunPhase::Idle);
        assert!(!state.run.running());
        assert_eq!(state.run.score, 0);
        assert_eq!(state.run.speed, 4.0);
        assert_eq!(state.player.lane, 1);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_moves_ignored_while_idle() {
        let mut state = GameState::new(1, Tuning::default());
        assert!(!state.move_left());
        assert!(!state.move_right());
        assert_eq!(state.player.lane, 1);
    }

    #[test]
    fn test_begin_run_resets() {
        let mut state = GameState::new(1, Tuning::default());
        state.begin_run();
        state.move_left();
        state.try_spawn();
        state.run.score = 77;
        state.run.speed = 9.0;
        state.end_run();

        state.begin_run();
        assert!(state.run.running());
        assert_eq!(state.player.lane, 1);
        assert_eq!(state.player.pos.x, state.grid.lane_to_x(1));
        assert!(state.obstacles.is_empty());
        assert_eq!(state.run.score, 0);
        assert_eq!(state.run.speed, 4.0);
    }

    #[test]
    fn test_spawn_assigns_increasing_ids() {
        let mut state = GameState::new(5, Tuning::default());
        let first = state.try_spawn().map(|o| o.id).unwrap();
        // Gate is closed until the first obstacle scrolls down
        assert!(state.try_spawn().is_none());
        state.obstacles[0].pos.y = 300.0;
        let second = state.try_spawn().map(|o| o.id).unwrap();
        assert!(second > first);
        assert!(state.next_entity_id() > second);
    }

    #[test]
    fn test_same_seed_same_lanes() {
        let mut a = GameState::new(99, Tuning::default());
        let mut b = GameState::new(99, Tuning::default());
        for _ in 0..20 {
            let la = a.try_spawn().map(|o| o.lane);
            let lb = b.try_spawn().map(|o| o.lane);
            assert_eq!(la, lb);
            a.obstacles.clear();
            b.obstacles.clear();
        }
    }
}
