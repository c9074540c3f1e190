use crate::errors::ProgressError;
use crate::models::{ChallengeCycle, ChallengeProgress, MotivationTier};

const ON_FIRE_STREAK: u32 = 20;
const MOMENTUM_STREAK: u32 = 10;

/// Maps an overall streak onto the challenge progress bar.
///
/// A positive exact multiple of the challenge length shows a full bar, and
/// that cycle is not also counted as completed.
pub fn map_challenge_cycle(
    overall_streak: u32,
    challenge_length: u32,
) -> Result<ChallengeCycle, ProgressError> {
    if challenge_length < 1 {
        return Err(ProgressError::InvalidConfig(challenge_length.to_string()));
    }

    let remainder = overall_streak % challenge_length;
    let cycles = overall_streak / challenge_length;
    let cycle = if overall_streak > 0 && remainder == 0 {
        ChallengeCycle {
            visual_bars: challenge_length,
            completed_cycles: cycles - 1,
        }
    } else {
        ChallengeCycle {
            visual_bars: remainder,
            completed_cycles: cycles,
        }
    };
    Ok(cycle)
}

pub fn motivation_tier(overall_streak: u32, completed_today: bool) -> MotivationTier {
    if completed_today {
        MotivationTier::Completed
    } else if overall_streak >= ON_FIRE_STREAK {
        MotivationTier::OnFire
    } else if overall_streak >= MOMENTUM_STREAK {
        MotivationTier::Momentum
    } else {
        MotivationTier::Growing
    }
}

pub fn challenge_progress(
    overall_streak: u32,
    challenge_length: u32,
    completed_today: bool,
) -> Result<ChallengeProgress, ProgressError> {
    let cycle = map_challenge_cycle(overall_streak, challenge_length)?;
    Ok(ChallengeProgress {
        visual_bars: cycle.visual_bars,
        completed_cycles: cycle.completed_cycles,
        challenge_length,
        completed: overall_streak >= challenge_length,
        milestone_reached: overall_streak > 0 && overall_streak % challenge_length == 0,
        motivation: motivation_tier(overall_streak, completed_today),
    })
}
