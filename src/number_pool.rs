//! Random numbers for a round.
//!
//! Generation is two-staged: one of the active pools is picked uniformly,
//! then one value is picked uniformly from that pool. Every pool therefore
//! carries the same weight regardless of its size, so combining
//! `range_10_19` (ten values) with `round_10_90` (nine values) does not give
//! every number the same probability.

use rand::Rng;
use std::ops::RangeInclusive;

use crate::error::ConfigError;
use crate::settings::{NumberRanges, MAX_DIGITS, MIN_DIGITS};

/// Upper bound on how many values the standard pool materializes.
pub const STANDARD_SAMPLE_SIZE: usize = 100;

const TEENS: [u32; 10] = [10, 11, 12, 13, 14, 15, 16, 17, 18, 19];
const ROUND_TENS: [u32; 9] = [10, 20, 30, 40, 50, 60, 70, 80, 90];
const ROUND_HUNDREDS: [u32; 9] = [100, 200, 300, 400, 500, 600, 700, 800, 900];

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Pool {
    /// Every number with exactly `digits` digits (0 included for one digit)
    #[strum(to_string = "standard")]
    Standard { digits: u8 },
    #[strum(to_string = "10-19")]
    Teens,
    #[strum(to_string = "10-90")]
    RoundTens,
    #[strum(to_string = "100-900")]
    RoundHundreds,
}

impl Pool {
    /// Candidate values for one draw. Standard pools larger than
    /// [`STANDARD_SAMPLE_SIZE`] are approximated by a random sample.
    pub fn candidates<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<u32> {
        match self {
            Pool::Standard { digits } => {
                let bounds = standard_bounds(*digits);
                let size = (bounds.end() - bounds.start() + 1) as usize;
                if size <= STANDARD_SAMPLE_SIZE {
                    bounds.collect()
                } else {
                    (0..STANDARD_SAMPLE_SIZE)
                        .map(|_| rng.gen_range(bounds.clone()))
                        .collect()
                }
            }
            Pool::Teens => TEENS.to_vec(),
            Pool::RoundTens => ROUND_TENS.to_vec(),
            Pool::RoundHundreds => ROUND_HUNDREDS.to_vec(),
        }
    }
}

/// Inclusive bounds of the numbers with exactly `digits` digits.
pub fn digit_bounds(digits: u8) -> Result<RangeInclusive<u32>, ConfigError> {
    if !(MIN_DIGITS..=MAX_DIGITS).contains(&digits) {
        return Err(ConfigError::DigitCount(digits));
    }
    Ok(standard_bounds(digits))
}

fn standard_bounds(digits: u8) -> RangeInclusive<u32> {
    if digits <= 1 {
        return 0..=9;
    }
    let min = 10u32.pow(u32::from(digits) - 1);
    min..=min * 10 - 1
}

/// Pools eligible for the given configuration.
pub fn active_pools(digit_count: u8, ranges: &NumberRanges) -> Result<Vec<Pool>, ConfigError> {
    digit_bounds(digit_count)?;

    if !ranges.any() {
        return Ok(vec![Pool::Standard {
            digits: digit_count,
        }]);
    }

    let mut pools = Vec::with_capacity(3);
    if ranges.range_10_19 {
        pools.push(Pool::Teens);
    }
    if ranges.round_10_90 {
        pools.push(Pool::RoundTens);
    }
    if ranges.round_100_900 {
        pools.push(Pool::RoundHundreds);
    }
    Ok(pools)
}

pub fn generate_number<R: Rng + ?Sized>(
    digit_count: u8,
    ranges: &NumberRanges,
    rng: &mut R,
) -> Result<u32, ConfigError> {
    let pools = active_pools(digit_count, ranges)?;
    // never empty: the standard pool stands in when no range is active
    let pool = pools[rng.gen_range(0..pools.len())];
    let candidates = pool.candidates(rng);
    let value = candidates[rng.gen_range(0..candidates.len())];

    tracing::debug!("generated {value} from the {pool} pool");
    Ok(value)
}

/// `count` independent draws; values may repeat.
pub fn generate_series<R: Rng + ?Sized>(
    digit_count: u8,
    count: usize,
    ranges: &NumberRanges,
    rng: &mut R,
) -> Result<Vec<u32>, ConfigError> {
    let series = (0..count)
        .map(|_| generate_number(digit_count, ranges, rng))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!("generated series of {count} numbers with {digit_count} digits");
    Ok(series)
}
