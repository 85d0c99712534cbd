//! Block reward calculation
//!
//! Halving schedule: the base reward is halved every `subsidy_halving_interval`
//! blocks until it shifts out to zero.

use super::ConsensusParameters;
use crate::constants::BASE_REWARD;

/// Number of halvings applied to the block after `prev_height`
pub fn halvings(params: &ConsensusParameters, prev_height: u64) -> u64 {
    prev_height.saturating_add(1) / params.subsidy_halving_interval
}

/// Reward for the block built on top of `prev_height` (in base units)
///
/// This is a pure, deterministic function. Shifting by the full width of
/// the reward or more yields zero.
pub fn block_reward(params: &ConsensusParameters, prev_height: u64) -> u64 {
    u32::try_from(halvings(params, prev_height))
        .ok()
        .and_then(|shift| BASE_REWARD.checked_shr(shift))
        .unwrap_or(0)
}

/// Total issued by blocks `1..=height`, walking halving eras rather than
/// individual blocks
pub fn total_issued(params: &ConsensusParameters, height: u64) -> u64 {
    let interval = params.subsidy_halving_interval;
    let mut total: u64 = 0;
    let mut era_start: u64 = 1;

    while era_start <= height {
        let reward = block_reward(params, era_start - 1);
        if reward == 0 {
            break;
        }
        // Blocks sharing this reward end just before the next multiple of interval
        let era_end = ((era_start / interval) + 1) * interval - 1;
        let blocks = era_end.min(height) - era_start + 1;
        total = total.saturating_add(reward.saturating_mul(blocks));
        era_start = era_end + 1;
    }

    total
}
