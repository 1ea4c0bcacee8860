//! Obstacle motion

use super::entity::Obstacle;

/// Scroll every obstacle down by `speed`, then drop those that have left
/// the visible area. Returns how many were removed.
///
/// Order of the survivors is preserved, so the newest obstacle stays last.
pub fn advance(obstacles: &mut Vec<Obstacle>, speed: f32, visible_height: f32) -> usize {
    for obstacle in obstacles.iter_mut() {
        obstacle.pos.y += speed;
    }
    let before = obstacles.len();
    obstacles.retain(|o| o.pos.y < visible_height);
    before - obstacles.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::lane::LaneGrid;
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    fn obstacles_at(ys: &[f32]) -> Vec<Obstacle> {
        let grid = LaneGrid::from_tuning(&Tuning::default());
        ys.iter()
            .enumerate()
            .map(|(i, &y)| {
                let mut o = Obstacle::new(i as u32, 0, &grid, Vec2::new(50.0, 90.0));
                o.pos.y = y;
                o
            })
            .collect()
    }

    #[test]
    fn test_advance_moves_down() {
        let mut road = obstacles_at(&[-90.0, 100.0]);
        let pruned = advance(&mut road, 4.0, 600.0);
        assert_eq!(pruned, 0);
        assert_eq!(road[0].pos.y, -86.0);
        assert_eq!(road[1].pos.y, 104.0);
    }

    #[test]
    fn test_advance_prunes_at_visible_height() {
        let mut road = obstacles_at(&[596.0, 590.0, 10.0]);
        let pruned = advance(&mut road, 4.0, 600.0);
        // 596 + 4 = 600 is no longer visible
        assert_eq!(pruned, 1);
        assert_eq!(road.len(), 2);
        assert_eq!(road[0].id, 1);
        assert_eq!(road[1].id, 2);
    }

    #[test]
    fn test_advance_empty() {
        let mut road = Vec::new();
        assert_eq!(advance(&mut road, 4.0, 600.0), 0);
        assert!(road.is_empty());
    }

    proptest! {
        #[test]
        fn prop_nothing_visible_past_height(
            ys in proptest::collection::vec(-200.0f32..800.0, 0..20),
            speed in 0.0f32..50.0,
        ) {
            let mut road = obstacles_at(&ys);
            advance(&mut road, speed, 600.0);
            prop_assert!(road.iter().all(|o| o.pos.y < 600.0));
        }

        #[test]
        fn prop_spawn_order_preserved(
            ys in proptest::collection::vec(-200.0f32..800.0, 0..20),
            speed in 0.0f32..50.0,
        ) {
            let mut road = obstacles_at(&ys);
            advance(&mut road, speed, 600.0);
            prop_assert!(road.windows(2).all(|w| w[0].id < w[1].id));
        }
    }
}
