//! High/low-bits decomposition and the hint mechanism.
//!
//! All functions take coefficients as standard representatives in \[0, Q)
//! and split them against either 2^D (key compression) or α = 2·GAMMA2
//! (commitment rounding). Hints let a verifier recover the high bits of
//! `w - c·s2` without ever seeing s2.

use crate::params::{D, GAMMA2, Q};

/// Splits `a` into `(a1, a0)` with `a = a1·2^D + a0` and
/// `a0 ∈ (-2^{D-1}, 2^{D-1}]`.
pub fn power2round(a: i32) -> (i32, i32) {
    let a1 = (a + (1 << (D - 1)) - 1) >> D;
    (a1, a - (a1 << D))
}

/// Splits `a` into `(a1, a0)` with `a = a1·α + a0 mod Q` and
/// `a0 ∈ (-α/2, α/2]`. The wrap-around bucket `a1 = (Q-1)/α` is folded to
/// zero and its low part centered by subtracting Q.
pub fn decompose(a: i32) -> (i32, i32) {
    let mut a1 = (a + 127) >> 7;
    if GAMMA2 == (Q - 1) / 32 {
        a1 = (a1 * 1025 + (1 << 21)) >> 22;
        a1 &= 15;
    } else {
        a1 = (a1 * 11275 + (1 << 23)) >> 24;
        a1 ^= ((43 - a1) >> 31) & a1;
    }

    let mut a0 = a - a1 * 2 * GAMMA2;
    a0 -= (((Q - 1) / 2 - a0) >> 31) & Q;
    (a1, a0)
}

/// Whether the low bits `a0` spill into the neighbouring high-bits bucket,
/// i.e. whether a carry hint is needed to recover `a1` after adding a small
/// perturbation.
pub fn make_hint(a0: i32, a1: i32) -> bool {
    a0 > GAMMA2 || a0 < -GAMMA2 || (a0 == -GAMMA2 && a1 != 0)
}

/// Recovers the high bits of `a` given the hint bit, correcting by ±1 bucket
/// according to the sign of the low bits.
pub fn use_hint(a: i32, hint: bool) -> i32 {
    let (a1, a0) = decompose(a);
    if !hint {
        return a1;
    }

    if GAMMA2 == (Q - 1) / 32 {
        if a0 > 0 {
            (a1 + 1) & 15
        } else {
            (a1 - 1) & 15
        }
    } else if a0 > 0 {
        if a1 == 43 {
            0
        } else {
            a1 + 1
        }
    } else if a1 == 0 {
        43
    } else {
        a1 - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALPHA: i32 = 2 * GAMMA2;

    #[test]
    fn power2round_reconstructs() {
        for a in (0..Q).step_by(997) {
            let (a1, a0) = power2round(a);
            assert_eq!(a1 * (1 << D) + a0, a);
            assert!(a0 > -(1 << (D - 1)) && a0 <= 1 << (D - 1), "a = {a}");
        }
    }

    #[test]
    fn decompose_reconstructs_mod_q() {
        let buckets = if GAMMA2 == (Q - 1) / 32 { 16 } else { 44 };
        for a in (0..Q).step_by(991).chain([0, 1, Q - 1, Q - 2, ALPHA, ALPHA / 2]) {
            let (a1, a0) = decompose(a);
            assert!((0..buckets).contains(&a1), "a = {a}, a1 = {a1}");
            assert_eq!(
                (i64::from(a1) * i64::from(ALPHA) + i64::from(a0)).rem_euclid(i64::from(Q)),
                i64::from(a),
                "a = {a}"
            );
            assert!(a0 > -GAMMA2 - 1 && a0 <= GAMMA2, "a = {a}, a0 = {a0}");
        }
        // wrap-around bucket folds to zero
        let (a1, _) = decompose(Q - 1);
        assert_eq!(a1, 0);
    }

    #[test]
    fn hint_recovers_high_bits_of_perturbed_value() {
        // the verifier's identity: v = a1·α + (a0 + e) mod Q for any
        // |e| ≤ GAMMA2, and the hint computed from the perturbed low part
        // points use_hint back at the original bucket
        for r in (0..Q).step_by(797) {
            let (r1, r0) = decompose(r);
            for e in [-GAMMA2, -GAMMA2 + 1, -1, 0, 1, GAMMA2 / 3, GAMMA2 - 1, GAMMA2] {
                let v = (r + e).rem_euclid(Q);
                let hint = make_hint(r0 + e, r1);
                assert_eq!(use_hint(v, hint), r1, "r = {r}, e = {e}");
            }
        }
    }

    #[test]
    fn hint_thresholds() {
        assert!(!make_hint(0, 0));
        assert!(!make_hint(GAMMA2, 5));
        assert!(make_hint(GAMMA2 + 1, 0));
        assert!(make_hint(-GAMMA2 - 1, 0));
        assert!(make_hint(-GAMMA2, 1));
        assert!(!make_hint(-GAMMA2, 0));
    }

    #[test]
    fn use_hint_wraps_buckets() {
        let m = if GAMMA2 == (Q - 1) / 32 { 16 } else { 44 };
        for a in (0..Q).step_by(1009) {
            let shifted = use_hint(a, true);
            assert!((0..m).contains(&shifted), "a = {a}");
        }
    }
}
