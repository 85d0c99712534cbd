//! Difficulty targets
//!
//! Compact ("nBits") encoding of 256-bit targets and the retarget rule.

use thiserror::Error;

use crate::crypto::U256;
use crate::network::NetworkId;

use super::ConsensusParameters;

/// Maximum adjustment factor (4x in either direction per period)
const MAX_ADJUSTMENT_FACTOR: u64 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompactTargetError {
    #[error("compact target {0:#010x} has the sign bit set")]
    Negative(u32),
    #[error("compact target {0:#010x} overflows 256 bits")]
    Overflow(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DifficultyError {
    #[error("unexpected difficulty at height {height}: expected {expected:#010x}, got {actual:#010x}")]
    UnexpectedTarget { height: u64, expected: u32, actual: u32 },
    #[error("invalid compact target: {0}")]
    Compact(#[from] CompactTargetError),
}

/// Decode a compact target into a 256-bit value
pub fn compact_to_target(compact: u32) -> Result<U256, CompactTargetError> {
    let size = (compact >> 24) as usize;
    let mantissa = compact & 0x007f_ffff;

    if compact & 0x0080_0000 != 0 && mantissa != 0 {
        return Err(CompactTargetError::Negative(compact));
    }

    if size <= 3 {
        return Ok(U256::from(mantissa >> (8 * (3 - size))));
    }

    let target = U256::from(mantissa);
    let shift = 8 * (size - 3);
    if mantissa != 0 && target.bits() + shift > 256 {
        return Err(CompactTargetError::Overflow(compact));
    }
    Ok(target << shift)
}

/// Encode a 256-bit target in compact form
pub fn target_to_compact(target: U256) -> u32 {
    let mut size = (target.bits() + 7) / 8;
    let mut mantissa = if size <= 3 {
        target.low_u32() << (8 * (3 - size))
    } else {
        (target >> (8 * (size - 3))).low_u32()
    };

    // The sign bit must stay clear
    if mantissa & 0x0080_0000 != 0 {
        mantissa >>= 8;
        size += 1;
    }

    mantissa | ((size as u32) << 24)
}

/// Number of blocks to walk back from the previous block to find the start
/// of the retarget window.
///
/// The full interval is used except on the first retarget after genesis,
/// which closes a window an attacker could otherwise shift by one block.
pub fn blocks_to_go_back(params: &ConsensusParameters, next_height: u64) -> u64 {
    if next_height == params.interval {
        params.interval - 1
    } else {
        params.interval
    }
}

/// Check if difficulty should be adjusted at this height
pub fn is_retarget_height(params: &ConsensusParameters, height: u64) -> bool {
    height > 0 && height % params.interval == 0
}

/// Calculate the new compact target at a retarget height
///
/// This is a pure function with no side effects.
pub fn calculate_next_target(
    params: &ConsensusParameters,
    last_bits: u32,
    window_start_time: u64,
    last_block_time: u64,
) -> Result<u32, CompactTargetError> {
    let expected = params.target_timespan;
    let actual = last_block_time
        .saturating_sub(window_start_time)
        .clamp(expected / MAX_ADJUSTMENT_FACTOR, expected * MAX_ADJUSTMENT_FACTOR);

    let mut target = compact_to_target(last_bits)?;
    let limit = params.max_target;

    // Drop a bit before scaling so the product stays inside 256 bits
    let shifted = target.bits() + 1 > limit.bits();
    if shifted {
        target = target >> 1;
    }
    let mut next = match target.checked_mul(U256::from(actual)) {
        Some(product) => product / U256::from(expected),
        None => limit,
    };
    if shifted {
        next = next.checked_mul(U256::from(2u64)).unwrap_or(limit);
    }

    Ok(target_to_compact(next.min(limit)))
}

/// Everything needed to judge the target carried by a new block
#[derive(Debug, Clone, Copy)]
pub struct DifficultyContext {
    pub network: NetworkId,
    /// Height of the block being checked
    pub next_height: u64,
    pub next_time: u64,
    pub next_bits: u32,
    pub prev_time: u64,
    pub prev_bits: u32,
    /// Target of the most recent block that was not a test-network
    /// min-difficulty block
    pub last_regular_bits: u32,
    /// Time of the block `blocks_to_go_back` before the previous block
    pub window_start_time: u64,
}

/// Litecoin difficulty transition rule
pub fn check_difficulty_transition(
    params: &ConsensusParameters,
    ctx: &DifficultyContext,
) -> Result<(), DifficultyError> {
    let expected = if is_retarget_height(params, ctx.next_height) {
        calculate_next_target(params, ctx.prev_bits, ctx.window_start_time, ctx.prev_time)?
    } else if ctx.network == NetworkId::Test && ctx.next_time > crate::constants::TESTNET_DIFF_DATE {
        if ctx.next_time > ctx.prev_time.saturating_add(params.target_spacing.saturating_mul(2)) {
            target_to_compact(params.max_target)
        } else {
            ctx.last_regular_bits
        }
    } else {
        ctx.prev_bits
    };

    // Compare at compact precision; encoders may differ in mantissa
    // normalisation but never in the decoded value.
    if compact_to_target(expected)? != compact_to_target(ctx.next_bits)? {
        return Err(DifficultyError::UnexpectedTarget {
            height: ctx.next_height,
            expected,
            actual: ctx.next_bits,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coin::litecoin;

    fn main_params() -> ConsensusParameters {
        litecoin::resolve(NetworkId::Main).unwrap()
    }

    #[test]
    fn test_compact_roundtrip_known_values() {
        for bits in [0x1e0f_fff0u32, 0x1e0f_ffff, 0x1d00_ffff, 0x1b04_64fa, 0x2001_0000] {
            let target = compact_to_target(bits).unwrap();
            assert_eq!(target_to_compact(target), bits, "bits {bits:#x}");
        }
    }

    #[test]
    fn test_max_target_value() {
        let target = compact_to_target(0x1e0f_ffff).unwrap();
        assert_eq!(target, U256::from(0x0f_ffffu64) << (8 * 27));
    }

    #[test]
    fn test_small_exponent() {
        assert_eq!(compact_to_target(0x0112_3456).unwrap(), U256::from(0x12u64));
        assert_eq!(compact_to_target(0x0200_8000).unwrap(), U256::from(0x80u64));
    }

    #[test]
    fn test_negative_rejected() {
        assert_eq!(
            compact_to_target(0x0480_0001),
            Err(CompactTargetError::Negative(0x0480_0001))
        );
    }

    #[test]
    fn test_overflow_rejected() {
        assert!(matches!(compact_to_target(0xff12_3456), Err(CompactTargetError::Overflow(_))));
    }

    #[test]
    fn test_retarget_heights() {
        let params = main_params();
        assert!(!is_retarget_height(&params, 0));
        assert!(!is_retarget_height(&params, 1));
        assert!(is_retarget_height(&params, 2016));
        assert!(is_retarget_height(&params, 4032));
        assert_eq!(blocks_to_go_back(&params, 2016), 2015);
        assert_eq!(blocks_to_go_back(&params, 4032), 2016);
    }

    #[test]
    fn test_on_schedule_keeps_target() {
        let params = main_params();
        let bits = 0x1c0a_b4f2;
        let next = calculate_next_target(&params, bits, 0, params.target_timespan).unwrap();
        assert_eq!(next, bits);
    }

    #[test]
    fn test_fast_blocks_clamped_to_quarter() {
        let params = main_params();
        let bits = 0x1c0a_b4f2;
        let next = calculate_next_target(&params, bits, 0, 0).unwrap();
        let expected = compact_to_target(bits).unwrap() / U256::from(4u64);
        assert_eq!(compact_to_target(next).unwrap(), compact_to_target(target_to_compact(expected)).unwrap());
    }

    #[test]
    fn test_slow_blocks_capped_at_limit() {
        let params = main_params();
        let next = calculate_next_target(
            &params,
            crate::constants::MAX_TARGET_BITS,
            0,
            params.target_timespan * 10,
        )
        .unwrap();
        assert_eq!(next, crate::constants::MAX_TARGET_BITS);
    }

    #[test]
    fn test_transition_between_retargets_must_repeat() {
        let params = main_params();
        let ctx = DifficultyContext {
            network: NetworkId::Main,
            next_height: 100,
            next_time: 1_400_000_000,
            next_bits: 0x1c0a_b4f2,
            prev_time: 1_399_999_850,
            prev_bits: 0x1c0a_b4f2,
            last_regular_bits: 0x1c0a_b4f2,
            window_start_time: 0,
        };
        assert!(check_difficulty_transition(&params, &ctx).is_ok());

        let bad = DifficultyContext { next_bits: 0x1d00_ffff, ..ctx };
        assert!(matches!(
            check_difficulty_transition(&params, &bad),
            Err(DifficultyError::UnexpectedTarget { height: 100, .. })
        ));
    }

    #[test]
    fn test_testnet_min_difficulty_after_gap() {
        let params = litecoin::resolve(NetworkId::Test).unwrap();
        let ctx = DifficultyContext {
            network: NetworkId::Test,
            next_height: 100,
            next_time: 1_400_001_000,
            next_bits: target_to_compact(params.max_target),
            prev_time: 1_400_000_000,
            prev_bits: 0x1c0a_b4f2,
            last_regular_bits: 0x1c0a_b4f2,
            window_start_time: 0,
        };
        assert!(check_difficulty_transition(&params, &ctx).is_ok());

        // Within 2x spacing the last regular target applies
        let quick = DifficultyContext { next_time: 1_400_000_100, ..ctx };
        assert!(check_difficulty_transition(&params, &quick).is_err());
        let regular = DifficultyContext { next_bits: 0x1c0a_b4f2, ..quick };
        assert!(check_difficulty_transition(&params, &regular).is_ok());
    }

    #[test]
    fn test_extreme_parent_time_does_not_overflow() {
        let params = litecoin::resolve(NetworkId::Test).unwrap();
        let ctx = DifficultyContext {
            network: NetworkId::Test,
            next_height: 100,
            next_time: 1_400_000_000,
            next_bits: 0x1c0a_b4f2,
            prev_time: u64::MAX,
            prev_bits: 0x1c0a_b4f2,
            last_regular_bits: 0x1c0a_b4f2,
            window_start_time: 0,
        };
        assert!(check_difficulty_transition(&params, &ctx).is_ok());
    }
}
