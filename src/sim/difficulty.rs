//! Difficulty escalation
//!
//! Every `milestone` points the pipes speed up and the gap narrows, down to a
//! floor. Obstacles already on screen keep the gap they were built with.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Mutable difficulty parameters for a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Pixels per tick the obstacles move left
    pub pipe_speed: f32,
    /// Gap given to newly spawned obstacles
    pub gap: f32,
}

impl Difficulty {
    /// Starting values for a fresh run
    pub fn base(tuning: &Tuning) -> Self {
        Self {
            pipe_speed: tuning.base_pipe_speed,
            gap: tuning.base_gap,
        }
    }
}

/// Next difficulty after reaching `score`, or `None` if `score` is not a
/// positive multiple of the milestone
pub fn escalate(score: u64, current: Difficulty, tuning: &Tuning) -> Option<Difficulty> {
    if score == 0 || !score.is_multiple_of(tuning.milestone.max(1)) {
        return None;
    }

    Some(Difficulty {
        pipe_speed: current.pipe_speed + tuning.speed_step,
        gap: (current.gap - tuning.gap_step).max(tuning.min_gap),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_escalates_at_milestones_only() {
        let tuning = Tuning::default();
        let base = Difficulty::base(&tuning);

        assert!(escalate(0, base, &tuning).is_none());
        for score in [1, 2, 3, 4, 6, 9, 11, 14] {
            assert!(escalate(score, base, &tuning).is_none(), "score {score}");
        }

        let next = escalate(5, base, &tuning).unwrap();
        assert!((next.pipe_speed - 3.2).abs() < 1e-6);
        assert_eq!(next.gap, 145.0);
    }

    #[test]
    fn test_gap_floor() {
        let tuning = Tuning::default();
        let mut difficulty = Difficulty::base(&tuning);
        for milestone in 1..=20 {
            difficulty = escalate(milestone * 5, difficulty, &tuning).unwrap();
        }
        // 150 - 20 * 5 = 50, floored
        assert_eq!(difficulty.gap, 100.0);
        assert!((difficulty.pipe_speed - 7.0).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_escalation_iff_positive_multiple(score in 0u64..10_000) {
            let tuning = Tuning::default();
            let base = Difficulty::base(&tuning);
            let escalated = escalate(score, base, &tuning).is_some();
            prop_assert_eq!(escalated, score > 0 && score % 5 == 0);
        }

        #[test]
        fn prop_gap_never_below_floor(gap in 0.0f32..400.0, score in 1u64..100) {
            let tuning = Tuning::default();
            let current = Difficulty { pipe_speed: 3.0, gap };
            if let Some(next) = escalate(score * 5, current, &tuning) {
                prop_assert!(next.gap >= tuning.min_gap);
                prop_assert!(next.pipe_speed > current.pipe_speed);
            }
        }
    }
}
