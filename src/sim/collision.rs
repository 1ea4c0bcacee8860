//! Collision detection between the player and oncoming traffic
//!
//! Cars are axis-aligned boxes, so a crash is a plain AABB overlap test.
//! Overlap must be strict on both axes: boxes that only share an edge
//! do not collide.

use super::entity::{Obstacle, Player, Rect};

/// Strict axis-aligned overlap test
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    let (a_min, a_max) = (a.min(), a.max());
    let (b_min, b_max) = (b.min(), b.max());
    a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
}

/// First obstacle (in spawn order) overlapping the player
pub fn first_collision<'a>(player: &Player, obstacles: &'a [Obstacle]) -> Option<&'a Obstacle> {
    let bounds = player.bounds();
    obstacles.iter().find(|o| rects_overlap(&bounds, &o.bounds()))
}

/// Whether the player overlaps any obstacle
#[inline]
pub fn collides(player: &Player, obstacles: &[Obstacle]) -> bool {
    first_collision(player, obstacles).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::lane::LaneGrid;
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    fn setup() -> (Player, LaneGrid, Vec2) {
        let tuning = Tuning::default();
        let grid = LaneGrid::from_tuning(&tuning);
        (Player::new(&grid, &tuning), grid, tuning.car_size())
    }

    #[test]
    fn test_identical_rects_overlap() {
        let a = rect(10.0, 10.0, 50.0, 90.0);
        assert!(rects_overlap(&a, &a));
    }

    #[test]
    fn test_edge_contact_is_not_a_collision() {
        let a = rect(0.0, 0.0, 50.0, 90.0);
        // Touching on the right edge
        assert!(!rects_overlap(&a, &rect(50.0, 0.0, 50.0, 90.0)));
        // Touching on the bottom edge
        assert!(!rects_overlap(&a, &rect(0.0, 90.0, 50.0, 90.0)));
        // Touching corner
        assert!(!rects_overlap(&a, &rect(50.0, 90.0, 50.0, 90.0)));
    }

    #[test]
    fn test_one_axis_overlap_is_a_miss() {
        let a = rect(0.0, 0.0, 50.0, 90.0);
        // Same lane, far above
        assert!(!rects_overlap(&a, &rect(0.0, -200.0, 50.0, 90.0)));
        // Same height, next lane over
        assert!(!rects_overlap(&a, &rect(93.0, 0.0, 50.0, 90.0)));
    }

    #[test]
    fn test_player_hit_by_obstacle_in_lane() {
        let (player, grid, size) = setup();
        let mut obstacle = Obstacle::new(1, player.lane, &grid, size);
        obstacle.pos.y = player.pos.y - 45.0;
        assert!(collides(&player, &[obstacle]));
    }

    #[test]
    fn test_adjacent_lane_never_hits() {
        let (player, grid, size) = setup();
        let mut obstacle = Obstacle::new(1, 0, &grid, size);
        obstacle.pos.y = player.pos.y;
        assert!(!collides(&player, &[obstacle]));
    }

    #[test]
    fn test_obstacle_just_above_player() {
        let (player, grid, size) = setup();
        let mut obstacle = Obstacle::new(1, player.lane, &grid, size);
        // Bottom edge exactly at the player's top edge
        obstacle.pos.y = player.pos.y - size.y;
        assert!(!collides(&player, &[obstacle.clone()]));
        obstacle.pos.y += 0.5;
        assert!(collides(&player, &[obstacle]));
    }

    #[test]
    fn test_first_collision_in_spawn_order() {
        let (player, grid, size) = setup();
        let mut far = Obstacle::new(1, player.lane, &grid, size);
        far.pos.y = 0.0;
        let mut a = Obstacle::new(2, player.lane, &grid, size);
        a.pos.y = player.pos.y;
        let mut b = Obstacle::new(3, player.lane, &grid, size);
        b.pos.y = player.pos.y + 10.0;

        let road = [far, a, b];
        assert_eq!(first_collision(&player, &road).map(|o| o.id), Some(2));
    }

    #[test]
    fn test_empty_road() {
        let (player, _, _) = setup();
        assert!(!collides(&player, &[]));
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            ax in -100.0f32..100.0, ay in -100.0f32..100.0,
            bx in -100.0f32..100.0, by in -100.0f32..100.0,
            w in 1.0f32..60.0, h in 1.0f32..60.0,
        ) {
            let a = rect(ax, ay, w, h);
            let b = rect(bx, by, h, w);
            prop_assert_eq!(rects_overlap(&a, &b), rects_overlap(&b, &a));
        }

        #[test]
        fn prop_touching_edges_never_overlap(
            x in -100.0f32..100.0, y in -100.0f32..100.0,
            w in 1.0f32..60.0, h in 1.0f32..60.0,
            slide in -50.0f32..50.0,
        ) {
            let a = rect(x, y, w, h);
            let right = rect(a.max().x, y + slide, w, h);
            let below = rect(x + slide, a.max().y, w, h);
            prop_assert!(!rects_overlap(&a, &right));
            prop_assert!(!rects_overlap(&a, &below));
        }
    }
}
