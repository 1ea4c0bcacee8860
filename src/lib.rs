//! Lane Racer - A three-lane arcade driving game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lanes, spawning, motion, collisions)
//! - `controller`: Run state machine and cooperative tick scheduling
//! - `render`: Presentation-agnostic scene description
//! - `tuning`: Data-driven game balance

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod controller;
pub mod highscores;
pub mod render;
pub mod sim;
pub mod tuning;

pub use controller::{
    Command, Frame, LoopController, ManualScheduler, Presenter, RunSummary, TickScheduler,
    TickToken,
};
pub use highscores::HighScores;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Canvas dimensions
    pub const CANVAS_WIDTH: f32 = 400.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Road geometry
    pub const ROAD_WIDTH: f32 = 280.0;
    pub const LANE_COUNT: u32 = 3;

    /// Player and obstacles share the same car footprint
    pub const CAR_WIDTH: f32 = 50.0;
    pub const CAR_HEIGHT: f32 = 90.0;
    /// Gap between the player's rear bumper and the bottom of the canvas
    pub const PLAYER_BOTTOM_MARGIN: f32 = 20.0;

    /// Scroll speed at run start (pixels per tick)
    pub const BASE_SPEED: f32 = 4.0;
    /// Speed added after every completed tick
    pub const SPEED_INCREMENT: f32 = 0.002;
    /// Minimum spawn spacing as a multiple of car height
    pub const SPAWN_GAP_FACTOR: f32 = 2.2;
}
