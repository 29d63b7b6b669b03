//! Branch-free modular reduction primitives for the prime Q = 8380417.

use crate::params::{Q, QINV};

/// Montgomery reduction.
///
/// For `|a| < Q·2^31`, returns `r` with `r·2^32 ≡ a (mod Q)` and `|r| < Q`.
pub fn montgomery_reduce(a: i64) -> i32 {
    let t = (a as i32).wrapping_mul(QINV);
    ((a - i64::from(t) * i64::from(Q)) >> 32) as i32
}

/// Central reduction.
///
/// For `|a| ≤ 2^31 - 2^22 - 1`, returns `r ≡ a (mod Q)` with
/// `-6283008 ≤ r ≤ 6283008`.
pub fn reduce32(a: i32) -> i32 {
    let t = (a + (1 << 22)) >> 23;
    a - t * Q
}

/// Adds Q to negative inputs, mapping `(-Q, Q)` onto `[0, Q)` without a
/// branch.
pub fn caddq(a: i32) -> i32 {
    a + ((a >> 31) & Q)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn montgomery_inverts_the_radix() {
        let samples: [i64; 8] = [
            0,
            1,
            -1,
            i64::from(Q) - 1,
            -(i64::from(Q) - 1),
            i64::from(Q) * (1 << 20),
            i64::from(Q) * (1i64 << 31) - 1,
            -(i64::from(Q) * (1i64 << 31) - 1),
        ];
        for a in samples {
            let r = i64::from(montgomery_reduce(a));
            assert!(r.abs() < i64::from(Q), "|r| out of range for a = {a}");
            // r·2^32 ≡ a (mod Q)
            assert_eq!((r * (1i64 << 32) - a).rem_euclid(i64::from(Q)), 0);
        }
    }

    #[test]
    fn reduce32_stays_central() {
        for a in [0, 1, -1, Q, -Q, Q / 2, 2 * Q + 17, i32::MAX - (1 << 22) - 1] {
            let r = reduce32(a);
            assert!(r.abs() <= 6_283_008, "reduce32({a}) = {r}");
            assert_eq!(
                i64::from(r).rem_euclid(i64::from(Q)),
                i64::from(a).rem_euclid(i64::from(Q))
            );
        }
    }

    #[test]
    fn caddq_folds_sign() {
        assert_eq!(caddq(0), 0);
        assert_eq!(caddq(-1), Q - 1);
        assert_eq!(caddq(Q - 1), Q - 1);
        assert_eq!(caddq(-(Q - 1)), 1);
    }
}
