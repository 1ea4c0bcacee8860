//! Simulation tick
//!
//! One step of a run: spawn, scroll, crash check, then score and speed.

use super::collision::first_collision;
use super::motion::advance;
use super::state::GameState;

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// The run is not active; nothing changed
    Idle,
    /// Tick completed, score and speed advanced
    Advanced { score: u64, speed: f32 },
    /// The player hit an obstacle; the run is over
    Crashed { final_score: u64, obstacle_id: u32 },
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState) -> TickOutcome {
    if !state.run.running() {
        return TickOutcome::Idle;
    }

    state.try_spawn();

    let pruned = advance(
        &mut state.obstacles,
        state.run.speed,
        state.tuning.canvas_height,
    );
    if pruned > 0 {
        log::trace!("Pruned {} obstacles", pruned);
    }

    if let Some(hit) = first_collision(&state.player, &state.obstacles) {
        let obstacle_id = hit.id;
        state.end_run();
        return TickOutcome::Crashed {
            final_score: state.run.score,
            obstacle_id,
        };
    }

    state.run.score += 1;
    state.run.speed = state.ramp.step(state.run.speed);

    TickOutcome::Advanced {
        score: state.run.score,
        speed: state.run.speed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Obstacle;
    use crate::sim::state::RunPhase;
    use crate::tuning::Tuning;

    fn running_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Tuning::default());
        state.begin_run();
        state
    }

    #[test]
    fn test_tick_idle_does_nothing() {
        let mut state = GameState::new(1, Tuning::default());
        assert_eq!(tick(&mut state), TickOutcome::Idle);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.run.score, 0);
    }

    #[test]
    fn test_first_tick_spawns_and_scores() {
        let mut state = running_state(1);
        let outcome = tick(&mut state);
        assert!(matches!(outcome, TickOutcome::Advanced { score: 1, .. }));
        assert_eq!(state.obstacles.len(), 1);
        // Spawned at -90 then scrolled by the base speed
        assert_eq!(state.obstacles[0].pos.y, -86.0);
        assert!(state.run.speed > 4.0);
    }

    #[test]
    fn test_ten_quiet_ticks() {
        let mut state = running_state(3);
        for _ in 0..10 {
            tick(&mut state);
        }
        assert_eq!(state.run.score, 10);
        assert!(state.run.running());
        assert_eq!(state.player.lane, 1);
    }

    #[test]
    fn test_crash_keeps_previous_score() {
        let mut state = running_state(4);
        for _ in 0..5 {
            tick(&mut state);
        }
        assert_eq!(state.run.score, 5);

        let id = state.next_entity_id();
        let mut wreck = Obstacle::new(id, state.player.lane, &state.grid, state.player.size);
        wreck.pos = state.player.pos;
        state.obstacles.push(wreck);

        let outcome = tick(&mut state);
        assert_eq!(
            outcome,
            TickOutcome::Crashed {
                final_score: 5,
                obstacle_id: id
            }
        );
        assert_eq!(state.run.phase, RunPhase::Idle);
        assert_eq!(state.run.score, 5);

        // Further ticks are inert
        assert_eq!(tick(&mut state), TickOutcome::Idle);
    }

    #[test]
    fn test_speed_never_decreases() {
        let mut state = running_state(8);
        let mut last = state.run.speed;
        while let TickOutcome::Advanced { speed, .. } = tick(&mut state) {
            assert!(speed > last);
            last = speed;
            if state.run.score > 2000 {
                break;
            }
        }
    }

    #[test]
    fn test_smallest_accepted_increment_still_ramps() {
        let tuning = Tuning::from_json(r#"{ "speed_increment": 3e-7 }"#).unwrap();
        let mut state = GameState::new(8, tuning);
        state.begin_run();
        let before = state.run.speed;
        for _ in 0..10 {
            tick(&mut state);
        }
        assert_eq!(state.run.score, 10);
        assert!(state.run.speed > before);
    }

    #[test]
    fn test_road_pruned_every_tick() {
        let mut state = running_state(11);
        for _ in 0..500 {
            if !matches!(tick(&mut state), TickOutcome::Advanced { .. }) {
                break;
            }
            let height = state.tuning.canvas_height;
            assert!(state.obstacles.iter().all(|o| o.pos.y < height));
        }
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = running_state(99999);
        let mut state2 = running_state(99999);

        for i in 0..300 {
            if i % 40 == 0 {
                state1.move_left();
                state2.move_left();
            }
            if i % 70 == 0 {
                state1.move_right();
                state2.move_right();
            }
            assert_eq!(tick(&mut state1), tick(&mut state2));
        }

        assert_eq!(state1.obstacles, state2.obstacles);
        assert_eq!(state1.run, state2.run);
    }
}
