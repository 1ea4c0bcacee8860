//! Scene description for presenters
//!
//! Turns a [`Frame`] into a flat list of shapes in paint order. Backends
//! (Canvas 2D in the browser) only have to draw rectangles and lines.

use glam::Vec2;

use crate::controller::Frame;
use crate::sim::{LaneGrid, Rect};
use crate::tuning::Tuning;

pub const ROAD_COLOR: &str = "#444";
pub const ROAD_EDGE_COLOR: &str = "#fff";
pub const LANE_LINE_COLOR: &str = "#fff";
pub const PLAYER_COLOR: &str = "#ff512f";
pub const WINDOW_COLOR: &str = "#fff";
pub const OBSTACLE_COLOR: &str = "#2a5298";

const ROAD_EDGE_WIDTH: f32 = 4.0;
const LANE_LINE_WIDTH: f32 = 2.0;
const LANE_DASH: [f32; 2] = [20.0, 20.0];
const PLAYER_GLOW_BLUR: f32 = 16.0;

/// Soft shadow drawn around a filled shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color: &'static str,
    pub blur: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Fill {
        rect: Rect,
        color: &'static str,
        glow: Option<Glow>,
    },
    Stroke {
        rect: Rect,
        color: &'static str,
        width: f32,
    },
    DashedLine {
        from: Vec2,
        to: Vec2,
        color: &'static str,
        width: f32,
        dash: [f32; 2],
    },
}

/// Everything to draw for one frame, back to front
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub size: Vec2,
    pub shapes: Vec<Shape>,
    pub score: u64,
}

/// Build the scene: road, lane lines, player, then traffic
pub fn build_scene(grid: &LaneGrid, tuning: &Tuning, frame: &Frame<'_>) -> Scene {
    let size = Vec2::new(tuning.canvas_width, tuning.canvas_height);
    let road = Rect::new(
        Vec2::new(grid.road_x, 0.0),
        Vec2::new(grid.road_width, size.y),
    );

    let mut shapes = Vec::with_capacity(4 + grid.lane_count as usize + frame.obstacles.len());

    shapes.push(Shape::Fill {
        rect: road,
        color: ROAD_COLOR,
        glow: None,
    });
    shapes.push(Shape::Stroke {
        rect: road,
        color: ROAD_EDGE_COLOR,
        width: ROAD_EDGE_WIDTH,
    });

    for x in grid.divider_xs() {
        shapes.push(Shape::DashedLine {
            from: Vec2::new(x, 0.0),
            to: Vec2::new(x, size.y),
            color: LANE_LINE_COLOR,
            width: LANE_LINE_WIDTH,
            dash: LANE_DASH,
        });
    }

    shapes.push(Shape::Fill {
        rect: frame.player,
        color: PLAYER_COLOR,
        glow: Some(Glow {
            color: PLAYER_COLOR,
            blur: PLAYER_GLOW_BLUR,
        }),
    });
    shapes.push(Shape::Fill {
        rect: windshield(&frame.player),
        color: WINDOW_COLOR,
        glow: None,
    });

    shapes.extend(frame.obstacles.iter().map(|o| Shape::Fill {
        rect: o.bounds(),
        color: OBSTACLE_COLOR,
        glow: None,
    }));

    Scene {
        size,
        shapes,
        score: frame.score,
    }
}

/// Window strip across the upper part of the player's car
fn windshield(car: &Rect) -> Rect {
    Rect::new(
        car.pos + Vec2::new(10.0, 20.0),
        Vec2::new((car.size.x - 20.0).max(0.0), 30.0),
    )
}
