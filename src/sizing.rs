//! Power-of-four sizing for quadtrees.
//!
//! A quadtree of depth `d` has `4^(d-1)` leaf cells. These helpers answer how
//! many cells, or how many levels, a requested count maps onto. Everything is
//! integer arithmetic so exact powers of four never round the wrong way.

use crate::QuadtreeError;

fn check(n: u64) -> Result<(), QuadtreeError> {
    if n == 0 {
        return Err(QuadtreeError::InvalidSize(n));
    }
    Ok(())
}

// floor(log4(n)) for n >= 1.
#[inline]
fn floor_log4(n: u64) -> u32 {
    n.ilog2() >> 1
}

/// Smallest power of four that is `>= n`.
///
/// ```
/// assert_eq!(quadtree_partition::at_least(900), Ok(1024));
/// ```
pub fn at_least(n: u64) -> Result<u64, QuadtreeError> {
    let level = level(n)?;
    1u64.checked_shl(level << 1).ok_or(QuadtreeError::SizeOverflow(n))
}

/// Largest power of four that is `<= n`.
///
/// ```
/// assert_eq!(quadtree_partition::at_most(900), Ok(256));
/// ```
pub fn at_most(n: u64) -> Result<u64, QuadtreeError> {
    check(n)?;
    Ok(1u64 << (floor_log4(n) << 1))
}

/// Smallest `level` with `4^level >= n`.
pub fn level(n: u64) -> Result<u32, QuadtreeError> {
    check(n)?;
    let floor = floor_log4(n);
    if 1u64 << (floor << 1) == n {
        Ok(floor)
    } else {
        Ok(floor + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn documented_values() {
        assert_eq!(at_least(900), Ok(1024));
        assert_eq!(at_most(900), Ok(256));
        assert_eq!(level(1), Ok(0));
        assert_eq!(level(5), Ok(2));
        assert_eq!(level(900), Ok(5));
    }

    #[test]
    fn exact_powers_of_four() {
        assert_eq!(level(16), Ok(2));
        assert_eq!(level(17), Ok(3));
        assert_eq!(at_least(16), Ok(16));
        assert_eq!(at_most(16), Ok(16));

        for p in 0..32u32 {
            let n = 1u64 << (2 * p);
            assert_eq!(level(n), Ok(p), "level(4^{p})");
            assert_eq!(at_least(n), Ok(n), "at_least(4^{p})");
            assert_eq!(at_most(n), Ok(n), "at_most(4^{p})");
        }
    }

    #[test]
    fn small_values() {
        assert_eq!(at_least(1), Ok(1));
        assert_eq!(at_most(1), Ok(1));
        assert_eq!(level(2), Ok(1));
        assert_eq!(at_least(2), Ok(4));
        assert_eq!(at_most(3), Ok(1));
        assert_eq!(at_most(4), Ok(4));
        assert_eq!(level(8), Ok(2));
    }

    #[test]
    fn zero_is_rejected() {
        assert_eq!(at_least(0), Err(QuadtreeError::InvalidSize(0)));
        assert_eq!(at_most(0), Err(QuadtreeError::InvalidSize(0)));
        assert_eq!(level(0), Err(QuadtreeError::InvalidSize(0)));
    }

    #[test]
    fn upper_end_of_u64() {
        let top = 1u64 << 62;
        assert_eq!(at_least(top), Ok(top));
        assert_eq!(at_least(top + 1), Err(QuadtreeError::SizeOverflow(top + 1)));
        assert_eq!(at_least(u64::MAX), Err(QuadtreeError::SizeOverflow(u64::MAX)));
        assert_eq!(at_most(u64::MAX), Ok(top));
        assert_eq!(level(u64::MAX), Ok(32));
    }

    #[test]
    fn random_sizes_bracket_n() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..10_000 {
            let n: u64 = rng.random_range(1..=(1u64 << 62));
            let hi = at_least(n).unwrap();
            let lo = at_most(n).unwrap();
            let lvl = level(n).unwrap();

            assert!(hi.is_power_of_two() && hi.trailing_zeros() % 2 == 0);
            assert!(lo.is_power_of_two() && lo.trailing_zeros() % 2 == 0);
            assert!(lo <= n && n <= hi, "{lo} <= {n} <= {hi}");
            // No tighter power of four on either side.
            assert!(hi == 1 || hi / 4 < n);
            assert!((lo as u128) * 4 > n as u128);

            assert_eq!(hi, 1u64 << (2 * lvl));
            if n > 1 {
                assert!(4u128.pow(lvl - 1) < n as u128);
            }
        }
    }
}
