//! Arithmetic, sampling, and packing core of the CRYSTALS-Dilithium (ML-DSA)
//! lattice signature scheme.
//!
//! This crate implements the four layers every signing/verification driver
//! composes: the polynomial ring Z_Q\[x\]/(x^256 + 1) with its
//! number-theoretic transform, the Keccak-f\[1600\] sponge behind SHAKE and
//! SHA3, the seed-driven rejection samplers, and the deterministic bit-packed
//! encodings used by keys and signatures. Key generation, signing, and
//! verification themselves are the caller's straightforward composition of
//! these pieces; randomness is consumed as externally supplied seed bytes.
//!
//! One of the `mldsa44`, `mldsa65`, or `mldsa87` features selects the
//! security level (2, 3, or 5) at compile time, fixing every constant in
//! [`params`] and the length of every packed encoding.
//!
//! Arithmetic, the NTT, norm checking, and packing never branch on or index
//! by secret values. The rejection samplers branch freely on sponge output:
//! they only ever expand public seeds.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

pub mod keccak;
pub mod ntt;
pub mod params;
pub mod poly;
pub mod polyvec;
pub mod reduce;
pub mod rounding;
pub mod sponge;

mod fuzzing;

pub use poly::Poly;
pub use polyvec::{
    matrix_expand, matrix_pointwise_montgomery, HintError, PolyVecK, PolyVecL,
};
pub use sponge::{sha3_256, sha3_512, shake128, shake256, Shake128, Shake256};
