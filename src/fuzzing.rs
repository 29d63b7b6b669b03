#![cfg(all(test, feature = "std"))]

use proptest::collection::vec;
use proptest::prelude::*;

use crate::params::{
    CRHBYTES, ETA, GAMMA1, GAMMA2, K, N, OMEGA, POLYVECH_PACKEDBYTES, Q, SEEDBYTES,
};
use crate::poly::Poly;
use crate::polyvec::PolyVecK;
use crate::sponge::{shake256, Shake256};

#[derive(Clone, Debug, PartialEq)]
enum XofOp {
    Absorb(Vec<u8>),
    Squeeze(usize),
}

#[derive(Clone, Debug, PartialEq)]
struct XofTranscript {
    input: Vec<XofOp>,
}

fn apply_xof_transcript(transcript: &XofTranscript) -> Vec<u8> {
    let mut xof = Shake256::init();
    for op in &transcript.input {
        if let XofOp::Absorb(data) = op {
            xof.absorb(data);
        }
    }
    xof.finalize();

    let mut squeezed = Vec::new();
    for op in &transcript.input {
        if let XofOp::Squeeze(n) = op {
            let mut out = vec![0u8; *n];
            xof.squeeze(&mut out);
            squeezed.extend_from_slice(&out);
        }
    }
    let mut tail = [0u8; 16];
    xof.squeeze(&mut tail);
    squeezed.extend_from_slice(&tail);
    squeezed
}

fn arb_op() -> impl Strategy<Value = XofOp> {
    prop_oneof![
        vec(any::<u8>(), 0..300).prop_map(XofOp::Absorb),
        (1usize..200).prop_map(XofOp::Squeeze),
    ]
}

prop_compose! {
    fn arb_transcript()(input in vec(arb_op(), 0..24)) -> XofTranscript {
        XofTranscript { input }
    }
}

const W1_BUCKETS: i32 = if GAMMA2 == (Q - 1) / 32 { 16 } else { 44 };

fn arb_poly(range: core::ops::Range<i32>) -> impl Strategy<Value = Poly> {
    vec(range, N).prop_map(|coeffs| {
        let mut p = Poly::zero();
        p.coeffs.copy_from_slice(&coeffs);
        p
    })
}

proptest! {
    // a sponge transcript is determined by the absorbed bytes alone,
    // independent of chunking
    #[test]
    fn xof_transcript_consistency(t in arb_transcript()) {
        let flat: Vec<u8> = t
            .input
            .iter()
            .filter_map(|op| match op {
                XofOp::Absorb(data) => Some(data.as_slice()),
                XofOp::Squeeze(_) => None,
            })
            .flatten()
            .copied()
            .collect();
        let total: usize = t
            .input
            .iter()
            .filter_map(|op| match op {
                XofOp::Squeeze(n) => Some(*n),
                XofOp::Absorb(_) => None,
            })
            .sum();

        let out = apply_xof_transcript(&t);
        let mut expect = vec![0u8; total + 16];
        shake256(&mut expect, &flat);
        prop_assert_eq!(out, expect);
    }

    #[test]
    fn eta_pack_round_trip(a in arb_poly(-ETA..ETA + 1)) {
        prop_assert_eq!(Poly::unpack_eta(&a.pack_eta()), a);
    }

    #[test]
    fn t1_pack_round_trip(a in arb_poly(0..1024)) {
        prop_assert_eq!(Poly::unpack_t1(&a.pack_t1()), a);
    }

    #[test]
    fn t0_pack_round_trip(a in arb_poly(-(1 << 12) + 1..(1 << 12) + 1)) {
        prop_assert_eq!(Poly::unpack_t0(&a.pack_t0()), a);
    }

    #[test]
    fn z_pack_round_trip(a in arb_poly(-GAMMA1 + 1..GAMMA1 + 1)) {
        prop_assert_eq!(Poly::unpack_z(&a.pack_z()), a);
    }

    #[test]
    fn w1_pack_round_trip(a in arb_poly(0..W1_BUCKETS)) {
        prop_assert_eq!(Poly::unpack_w1(&a.pack_w1()), a);
    }

    // unpack ∘ pack is the identity on valid hint encodings, and every
    // decoded vector re-encodes to the same bytes
    #[test]
    fn hint_codec_round_trip(positions in vec((0..K, 0..N), 0..OMEGA)) {
        let mut h = PolyVecK::default();
        let mut weight = 0;
        for (poly, pos) in positions {
            let coeff = &mut h.vec[poly].coeffs[pos];
            if *coeff == 0 && weight < OMEGA {
                *coeff = 1;
                weight += 1;
            }
        }

        let packed = h.pack_hint();
        let unpacked = PolyVecK::unpack_hint(&packed).unwrap();
        prop_assert_eq!(&unpacked, &h);
        prop_assert_eq!(unpacked.pack_hint(), packed);
    }

    // flipping any byte of a hint encoding either round-trips to different
    // hints or is rejected; it never silently aliases the original
    #[test]
    fn hint_codec_rejects_or_distinguishes(
        flip in 0..POLYVECH_PACKEDBYTES,
        delta in 1..255u8,
        pos in 0..N,
    ) {
        let mut h = PolyVecK::default();
        h.vec[0].coeffs[pos] = 1;
        let mut packed = h.pack_hint();
        packed[flip] = packed[flip].wrapping_add(delta);

        if let Ok(other) = PolyVecK::unpack_hint(&packed) {
            prop_assert_ne!(other, h);
        }
    }

    #[test]
    fn chknorm_equals_naive(a in arb_poly(-(Q / 2)..Q / 2), b in 1..(Q - 1) / 8) {
        let naive = a.coeffs.iter().any(|&c| c.abs() >= b);
        prop_assert_eq!(a.chknorm(b), naive);
    }

    #[test]
    fn sampler_nonce_separation(seed in any::<[u8; SEEDBYTES]>(), n0 in any::<u16>(), n1 in any::<u16>()) {
        let a = Poly::uniform(&seed, n0);
        let b = Poly::uniform(&seed, n1);
        if n0 == n1 {
            prop_assert_eq!(a, b);
        } else {
            prop_assert_ne!(a, b);
        }
    }

    #[test]
    fn gamma1_sampler_matches_its_own_packing(seed in any::<[u8; 32]>(), nonce in any::<u16>()) {
        let mut full = [0u8; CRHBYTES];
        full[..32].copy_from_slice(&seed);
        let a = Poly::uniform_gamma1(&full, nonce);
        prop_assert!(a.coeffs.iter().all(|&c| -GAMMA1 < c && c <= GAMMA1));
        prop_assert_eq!(Poly::unpack_z(&a.pack_z()), a);
    }
}
