//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, no wall-clock time
//! - Seeded RNG only
//! - Obstacles kept in spawn order
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod entity;
pub mod lane;
pub mod motion;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::{Steer, suggest};
pub use collision::{collides, first_collision, rects_overlap};
pub use difficulty::DifficultyRamp;
pub use entity::{Obstacle, Player, Rect};
pub use lane::{LaneGrid, LaneIndex};
pub use motion::advance;
pub use spawner::Spawner;
pub use state::{GameState, RunPhase, RunState};
pub use tick::{TickOutcome, tick};
