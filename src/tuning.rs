//! Data-driven game balance
//!
//! Road geometry, car footprint and speed ramp. Loaded once at startup and
//! never changed while the process runs.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("Tuning parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Tuning IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("lane_count must be at least 1")]
    NoLanes,

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("speed_increment {increment} is lost in rounding at base speed {base}")]
    IncrementTooSmall { increment: f32, base: f32 },

    #[error("road width {road} does not fit canvas width {canvas}")]
    RoadTooWide { road: f32, canvas: f32 },

    #[error("car width {car} exceeds lane width {lane}")]
    CarTooWide { car: f32, lane: f32 },

    #[error("canvas height {canvas} cannot fit a {car} tall car with a {margin} margin")]
    CarTooTall { canvas: f32, car: f32, margin: f32 },
}

/// Game balance and geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Visible area width
    pub canvas_width: f32,
    /// Visible area height (obstacles are pruned once they pass it)
    pub canvas_height: f32,
    /// Road width, centered on the canvas
    pub road_width: f32,
    /// Number of lanes the road is split into
    pub lane_count: u32,
    pub car_width: f32,
    pub car_height: f32,
    /// Distance between the player's bottom edge and the canvas bottom
    pub player_bottom_margin: f32,
    /// Scroll speed at run start
    pub base_speed: f32,
    /// Speed added per completed tick
    pub speed_increment: f32,
    /// Spawn spacing as a multiple of car height
    pub spawn_gap_factor: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            road_width: ROAD_WIDTH,
            lane_count: LANE_COUNT,
            car_width: CAR_WIDTH,
            car_height: CAR_HEIGHT,
            player_bottom_margin: PLAYER_BOTTOM_MARGIN,
            base_speed: BASE_SPEED,
            speed_increment: SPEED_INCREMENT,
            spawn_gap_factor: SPAWN_GAP_FACTOR,
        }
    }
}

impl Tuning {
    /// DOM element holding optional tuning JSON (used only in wasm32)
    #[allow(dead_code)]
    const ELEMENT_ID: &'static str = "tuning";

    /// Parse and validate tuning from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read tuning JSON from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check that the geometry is playable
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.lane_count == 0 {
            return Err(TuningError::NoLanes);
        }

        let positive = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("road_width", self.road_width),
            ("car_width", self.car_width),
            ("car_height", self.car_height),
            ("base_speed", self.base_speed),
            ("speed_increment", self.speed_increment),
            ("spawn_gap_factor", self.spawn_gap_factor),
        ];
        for (field, value) in positive {
            // Also rejects NaN
            if !(value > 0.0) {
                return Err(TuningError::NotPositive { field, value });
            }
        }

        // Below half an f32 ULP the ramp would leave speed unchanged
        if self.base_speed + self.speed_increment <= self.base_speed {
            return Err(TuningError::IncrementTooSmall {
                increment: self.speed_increment,
                base: self.base_speed,
            });
        }

        if self.road_width > self.canvas_width {
            return Err(TuningError::RoadTooWide {
                road: self.road_width,
                canvas: self.canvas_width,
            });
        }

        let lane = self.lane_width();
        if self.car_width > lane {
            return Err(TuningError::CarTooWide {
                car: self.car_width,
                lane,
            });
        }

        if self.player_bottom_margin < 0.0
            || self.car_height + self.player_bottom_margin > self.canvas_height
        {
            return Err(TuningError::CarTooTall {
                canvas: self.canvas_height,
                car: self.car_height,
                margin: self.player_bottom_margin,
            });
        }

        Ok(())
    }

    #[inline]
    pub fn lane_width(&self) -> f32 {
        self.road_width / self.lane_count as f32
    }

    /// Car footprint shared by the player and obstacles
    #[inline]
    pub fn car_size(&self) -> Vec2 {
        Vec2::new(self.car_width, self.car_height)
    }

    /// Fixed top edge of the player car
    #[inline]
    pub fn player_y(&self) -> f32 {
        self.canvas_height - self.car_height - self.player_bottom_margin
    }

    /// Minimum y the newest obstacle must reach before another may spawn
    #[inline]
    pub fn min_spawn_gap(&self) -> f32 {
        self.car_height * self.spawn_gap_factor
    }

    /// Load tuning from the page's `<script id="tuning">` block (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        let Some(json) = json else {
            log::info!("Using default tuning");
            return Self::default();
        };

        match Self::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from page");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring page tuning: {}", e);
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
