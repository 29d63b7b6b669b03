//! Ring constants and the three ML-DSA parameter sets.
//!
//! One of the `mldsa44`, `mldsa65`, or `mldsa87` cargo features selects the
//! security level at compile time; every buffer size in the crate is derived
//! from these constants, so packed encodings are fixed-length arrays.

#[cfg(not(any(feature = "mldsa44", feature = "mldsa65", feature = "mldsa87")))]
compile_error!("enable exactly one of the `mldsa44`, `mldsa65`, or `mldsa87` features");

#[cfg(any(
    all(feature = "mldsa44", feature = "mldsa65"),
    all(feature = "mldsa44", feature = "mldsa87"),
    all(feature = "mldsa65", feature = "mldsa87"),
))]
compile_error!("the `mldsa44`, `mldsa65`, and `mldsa87` features are mutually exclusive");

/// Degree of the polynomial ring Z_Q\[x\]/(x^N + 1).
pub const N: usize = 256;

/// The 23-bit prime modulus.
pub const Q: i32 = 8_380_417;

/// Bits dropped from t by power-of-two rounding.
pub const D: usize = 13;

/// A 512th root of unity mod Q.
pub const ROOT_OF_UNITY: i32 = 1753;

/// 2^32 mod Q, as a signed representative.
pub const MONT: i32 = -4_186_625;

/// Q^(-1) mod 2^32.
pub const QINV: i32 = 58_728_449;

pub const SEEDBYTES: usize = 32;
pub const CRHBYTES: usize = 64;
pub const TRBYTES: usize = 64;
pub const RNDBYTES: usize = 32;

#[cfg(feature = "mldsa44")]
mod set {
    use super::Q;

    /// Rows of the public matrix A.
    pub const K: usize = 4;
    /// Columns of the public matrix A.
    pub const L: usize = 4;
    /// Secret key coefficient range \[-ETA, ETA\].
    pub const ETA: i32 = 2;
    /// Number of ±1 coefficients in the challenge polynomial.
    pub const TAU: usize = 39;
    /// TAU · ETA, the low-order rejection bound.
    pub const BETA: i32 = 78;
    /// Mask coefficient range (-GAMMA1, GAMMA1\].
    pub const GAMMA1: i32 = 1 << 17;
    /// Low-order rounding range; α = 2·GAMMA2.
    pub const GAMMA2: i32 = (Q - 1) / 88;
    /// Maximum total weight of the hint vector.
    pub const OMEGA: usize = 80;
    /// Length of the challenge seed c~.
    pub const CTILDEBYTES: usize = 32;
}

#[cfg(feature = "mldsa65")]
mod set {
    use super::Q;

    pub const K: usize = 6;
    pub const L: usize = 5;
    pub const ETA: i32 = 4;
    pub const TAU: usize = 49;
    pub const BETA: i32 = 196;
    pub const GAMMA1: i32 = 1 << 19;
    pub const GAMMA2: i32 = (Q - 1) / 32;
    pub const OMEGA: usize = 55;
    pub const CTILDEBYTES: usize = 48;
}

#[cfg(feature = "mldsa87")]
mod set {
    use super::Q;

    pub const K: usize = 8;
    pub const L: usize = 7;
    pub const ETA: i32 = 2;
    pub const TAU: usize = 60;
    pub const BETA: i32 = 120;
    pub const GAMMA1: i32 = 1 << 19;
    pub const GAMMA2: i32 = (Q - 1) / 32;
    pub const OMEGA: usize = 75;
    pub const CTILDEBYTES: usize = 64;
}

pub use set::{BETA, CTILDEBYTES, ETA, GAMMA1, GAMMA2, K, L, OMEGA, TAU};

/// Bytes of a packed eta polynomial (3 or 4 bits per coefficient).
pub const POLYETA_PACKEDBYTES: usize = if ETA == 2 { 96 } else { 128 };

/// Bytes of a packed t1 polynomial (10 bits per coefficient).
pub const POLYT1_PACKEDBYTES: usize = 320;

/// Bytes of a packed t0 polynomial (13 bits per coefficient).
pub const POLYT0_PACKEDBYTES: usize = 416;

/// Bytes of a packed z polynomial (18 or 20 bits per coefficient).
pub const POLYZ_PACKEDBYTES: usize = if GAMMA1 == 1 << 17 { 576 } else { 640 };

/// Bytes of a packed w1 polynomial (6 or 4 bits per coefficient).
pub const POLYW1_PACKEDBYTES: usize = if GAMMA2 == (Q - 1) / 88 { 192 } else { 128 };

/// Bytes of a packed hint vector: OMEGA index slots plus K running counts.
pub const POLYVECH_PACKEDBYTES: usize = OMEGA + K;
