//! Obstacle generation

use rand::Rng;

use super::state::Obstacle;

/// Build a fresh obstacle at `x`
///
/// The top segment height is uniform in `[0, world_height / 2)`; the bottom
/// segment starts `gap` below it. Starts unpassed and fully transparent.
pub fn create_obstacle<R: Rng + ?Sized>(
    x: f32,
    gap: f32,
    world_height: f32,
    rng: &mut R,
) -> Obstacle {
    let max_top = world_height / 2.0;
    let top_height = if max_top > 0.0 {
        // Float rounding can land on the upper bound
        rng.random_range(0.0..max_top)
            .min(max_top * (1.0 - f32::EPSILON))
    } else {
        0.0
    };

    Obstacle {
        x,
        top_height,
        bottom_y: top_height + gap,
        passed: false,
        opacity: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_fresh_obstacle_defaults() {
        let mut rng = Pcg32::seed_from_u64(1);
        let obstacle = create_obstacle(480.0, 150.0, 640.0, &mut rng);
        assert_eq!(obstacle.x, 480.0);
        assert!(!obstacle.passed);
        assert_eq!(obstacle.opacity, 0.0);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let mut a = Pcg32::seed_from_u64(42);
        let mut b = Pcg32::seed_from_u64(42);
        for _ in 0..10 {
            assert_eq!(
                create_obstacle(480.0, 150.0, 640.0, &mut a),
                create_obstacle(480.0, 150.0, 640.0, &mut b)
            );
        }
    }

    #[test]
    fn test_degenerate_world_height() {
        let mut rng = Pcg32::seed_from_u64(3);
        let obstacle = create_obstacle(100.0, 150.0, 0.0, &mut rng);
        assert_eq!(obstacle.top_height, 0.0);
        assert_eq!(obstacle.bottom_y, 150.0);
    }

    proptest! {
        #[test]
        fn prop_top_in_upper_half_and_gap_exact(
            seed in any::<u64>(),
            gap in 50.0f32..300.0,
            height in 100.0f32..2000.0,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let obstacle = create_obstacle(480.0, gap, height, &mut rng);
            prop_assert!(obstacle.top_height >= 0.0);
            prop_assert!(obstacle.top_height < height / 2.0);
            prop_assert_eq!(obstacle.bottom_y, obstacle.top_height + gap);
        }
    }
}
