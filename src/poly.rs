//! Polynomials in Z_Q\[x\]/(x^256 + 1): arithmetic, seed expansion, and the
//! bit-packed encodings used by keys and signatures.
//!
//! A [`Poly`] is a plain value; whether it currently holds normal-domain or
//! NTT-domain coefficients is a logical tag the caller tracks. Arithmetic
//! never branches on coefficient values; the rejection samplers do, but they
//! only ever see expansions of public seeds.

use core::ops::{AddAssign, SubAssign};

use zeroize::Zeroize;

use crate::params::{
    CRHBYTES, CTILDEBYTES, D, ETA, GAMMA1, GAMMA2, N, POLYETA_PACKEDBYTES, POLYT0_PACKEDBYTES,
    POLYT1_PACKEDBYTES, POLYW1_PACKEDBYTES, POLYZ_PACKEDBYTES, Q, SEEDBYTES, TAU,
};
use crate::rounding;
use crate::sponge::{Shake128, Shake256, SHAKE128_RATE, SHAKE256_RATE};
use crate::{ntt, reduce};

/// Blocks of SHAKE128 output holding at least 768 candidate bytes, enough
/// for 256 three-byte draws at the ~3·10^-6 rejection rate.
const UNIFORM_NBLOCKS: usize = (768 + SHAKE128_RATE - 1) / SHAKE128_RATE;

/// Blocks of SHAKE256 output covering the expected number of nibble draws.
const UNIFORM_ETA_NBLOCKS: usize = if ETA == 2 {
    (136 + SHAKE256_RATE - 1) / SHAKE256_RATE
} else {
    (227 + SHAKE256_RATE - 1) / SHAKE256_RATE
};

const UNIFORM_GAMMA1_NBLOCKS: usize =
    (POLYZ_PACKEDBYTES + SHAKE256_RATE - 1) / SHAKE256_RATE;

/// An element of the ring, 256 signed 32-bit coefficients.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Zeroize)]
pub struct Poly {
    pub coeffs: [i32; N],
}

impl Default for Poly {
    fn default() -> Self {
        Poly::zero()
    }
}

/// Coefficient-wise addition, no modular reduction.
impl AddAssign<&Poly> for Poly {
    fn add_assign(&mut self, rhs: &Poly) {
        for (c, r) in self.coeffs.iter_mut().zip(&rhs.coeffs) {
            *c += r;
        }
    }
}

/// Coefficient-wise subtraction, no modular reduction.
impl SubAssign<&Poly> for Poly {
    fn sub_assign(&mut self, rhs: &Poly) {
        for (c, r) in self.coeffs.iter_mut().zip(&rhs.coeffs) {
            *c -= r;
        }
    }
}

impl Poly {
    /// The all-zero polynomial.
    pub const fn zero() -> Self {
        Poly { coeffs: [0; N] }
    }

    /// Centrally reduces every coefficient to `|c| ≤ 6283008`.
    pub fn reduce(&mut self) {
        for c in self.coeffs.iter_mut() {
            *c = reduce::reduce32(*c);
        }
    }

    /// Adds Q to every negative coefficient.
    pub fn caddq(&mut self) {
        for c in self.coeffs.iter_mut() {
            *c = reduce::caddq(*c);
        }
    }

    /// Multiplies every coefficient by 2^D. Inputs must be below 2^{31-D} in
    /// absolute value.
    pub fn shiftl(&mut self) {
        for c in self.coeffs.iter_mut() {
            *c <<= D;
        }
    }

    /// In-place forward NTT. Coefficients grow up to 9Q in absolute value.
    pub fn ntt(&mut self) {
        ntt::ntt(&mut self.coeffs);
    }

    /// In-place inverse NTT; output is in Montgomery form. Input
    /// coefficients must be below Q in absolute value.
    pub fn invntt_tomont(&mut self) {
        ntt::invntt_tomont(&mut self.coeffs);
    }

    /// Coefficient-wise Montgomery product of two NTT-domain polynomials.
    pub fn pointwise_montgomery(a: &Poly, b: &Poly) -> Poly {
        let mut c = Poly::zero();
        for i in 0..N {
            c.coeffs[i] =
                reduce::montgomery_reduce(i64::from(a.coeffs[i]) * i64::from(b.coeffs[i]));
        }
        c
    }

    /// Splits into `(a1, a0)` with `self = a1·2^D + a0`. Coefficients must
    /// be standard representatives.
    pub fn power2round(&self) -> (Poly, Poly) {
        let mut a1 = Poly::zero();
        let mut a0 = Poly::zero();
        for i in 0..N {
            (a1.coeffs[i], a0.coeffs[i]) = rounding::power2round(self.coeffs[i]);
        }
        (a1, a0)
    }

    /// Splits into high and low bits relative to α = 2·GAMMA2. Coefficients
    /// must be standard representatives.
    pub fn decompose(&self) -> (Poly, Poly) {
        let mut a1 = Poly::zero();
        let mut a0 = Poly::zero();
        for i in 0..N {
            (a1.coeffs[i], a0.coeffs[i]) = rounding::decompose(self.coeffs[i]);
        }
        (a1, a0)
    }

    /// Computes the carry-hint polynomial for low bits `a0` against high
    /// bits `a1`, returning it together with its weight.
    pub fn make_hint(a0: &Poly, a1: &Poly) -> (Poly, u32) {
        let mut h = Poly::zero();
        let mut weight = 0;
        for i in 0..N {
            let bit = rounding::make_hint(a0.coeffs[i], a1.coeffs[i]);
            h.coeffs[i] = i32::from(bit);
            weight += u32::from(bit);
        }
        (h, weight)
    }

    /// Recovers the high bits of `self` using a hint polynomial.
    pub fn use_hint(&self, h: &Poly) -> Poly {
        let mut a1 = Poly::zero();
        for i in 0..N {
            a1.coeffs[i] = rounding::use_hint(self.coeffs[i], h.coeffs[i] != 0);
        }
        a1
    }

    /// Whether any centered coefficient reaches the bound `b`.
    ///
    /// Coefficients must have been centrally reduced. Runs in time
    /// independent of coefficient values: the per-coefficient comparison is
    /// folded into one accumulated sign mask, with no early exit. Only the
    /// public bound `b` is branched on.
    pub fn chknorm(&self, b: i32) -> bool {
        if b > (Q - 1) / 8 {
            return true;
        }

        let mut acc = 0i32;
        for &c in self.coeffs.iter() {
            // |c| without a branch
            let t = c - ((c >> 31) & (2 * c));
            acc |= b - 1 - t;
        }
        acc < 0
    }

    /// Uniform polynomial mod Q from SHAKE128(rho ∥ nonce), by 23-bit
    /// rejection on three-byte draws.
    pub fn uniform(rho: &[u8; SEEDBYTES], nonce: u16) -> Poly {
        let mut state = Shake128::init();
        state.absorb(rho);
        state.absorb(&nonce.to_le_bytes());
        state.finalize();

        let mut buf = [0u8; UNIFORM_NBLOCKS * SHAKE128_RATE + 2];
        let mut buflen = UNIFORM_NBLOCKS * SHAKE128_RATE;
        state.squeeze_blocks(&mut buf[..buflen]);

        let mut a = Poly::zero();
        let mut ctr = rej_uniform(&mut a.coeffs, &buf[..buflen]);
        while ctr < N {
            // keep the tail bytes that did not fill a full 3-byte draw
            let off = buflen % 3;
            for i in 0..off {
                buf[i] = buf[buflen - off + i];
            }
            state.squeeze_blocks(&mut buf[off..off + SHAKE128_RATE]);
            buflen = SHAKE128_RATE + off;
            ctr += rej_uniform(&mut a.coeffs[ctr..], &buf[..buflen]);
        }
        a
    }

    /// Small polynomial with coefficients in \[-ETA, ETA\] from
    /// SHAKE256(seed ∥ nonce), by nibble rejection.
    pub fn uniform_eta(seed: &[u8; CRHBYTES], nonce: u16) -> Poly {
        let mut state = Shake256::init();
        state.absorb(seed);
        state.absorb(&nonce.to_le_bytes());
        state.finalize();

        let mut buf = [0u8; UNIFORM_ETA_NBLOCKS * SHAKE256_RATE];
        state.squeeze_blocks(&mut buf);

        let mut a = Poly::zero();
        let mut ctr = rej_eta(&mut a.coeffs, &buf);
        while ctr < N {
            state.squeeze_blocks(&mut buf[..SHAKE256_RATE]);
            ctr += rej_eta(&mut a.coeffs[ctr..], &buf[..SHAKE256_RATE]);
        }
        a
    }

    /// Masking polynomial with coefficients in (-GAMMA1, GAMMA1\] from
    /// SHAKE256(seed ∥ nonce): squeeze a packed-z image and unpack it.
    pub fn uniform_gamma1(seed: &[u8; CRHBYTES], nonce: u16) -> Poly {
        let mut state = Shake256::init();
        state.absorb(seed);
        state.absorb(&nonce.to_le_bytes());
        state.finalize();

        let mut buf = [0u8; UNIFORM_GAMMA1_NBLOCKS * SHAKE256_RATE];
        state.squeeze_blocks(&mut buf);
        Poly::unpack_z(buf[..POLYZ_PACKEDBYTES].try_into().unwrap())
    }

    /// The sparse ternary challenge polynomial: exactly TAU coefficients are
    /// ±1, placed by an in-place shuffle driven by SHAKE256(seed).
    pub fn challenge(seed: &[u8; CTILDEBYTES]) -> Poly {
        let mut state = Shake256::absorb_once(seed);
        let mut buf = [0u8; SHAKE256_RATE];
        state.squeeze_blocks(&mut buf);

        let mut signs = u64::from_le_bytes(buf[..8].try_into().unwrap());
        let mut pos = 8;

        let mut c = Poly::zero();
        for i in N - TAU..N {
            let j = loop {
                if pos >= SHAKE256_RATE {
                    state.squeeze_blocks(&mut buf);
                    pos = 0;
                }
                let b = usize::from(buf[pos]);
                pos += 1;
                if b <= i {
                    break b;
                }
            };
            c.coeffs[i] = c.coeffs[j];
            c.coeffs[j] = 1 - 2 * (signs & 1) as i32;
            signs >>= 1;
        }
        c
    }

    /// Packs coefficients in \[-ETA, ETA\] at 3 bits each (ETA = 2) or
    /// 4 bits each (ETA = 4), mapped through `ETA - c`.
    pub fn pack_eta(&self) -> [u8; POLYETA_PACKEDBYTES] {
        let mut r = [0u8; POLYETA_PACKEDBYTES];
        if ETA == 2 {
            for i in 0..N / 8 {
                let mut t = [0u8; 8];
                for (k, v) in t.iter_mut().enumerate() {
                    *v = (ETA - self.coeffs[8 * i + k]) as u8;
                }
                r[3 * i] = t[0] | (t[1] << 3) | (t[2] << 6);
                r[3 * i + 1] = (t[2] >> 2) | (t[3] << 1) | (t[4] << 4) | (t[5] << 7);
                r[3 * i + 2] = (t[5] >> 1) | (t[6] << 2) | (t[7] << 5);
            }
        } else {
            for i in 0..N / 2 {
                let t0 = (ETA - self.coeffs[2 * i]) as u8;
                let t1 = (ETA - self.coeffs[2 * i + 1]) as u8;
                r[i] = t0 | (t1 << 4);
            }
        }
        r
    }

    /// Inverse of [`Poly::pack_eta`].
    pub fn unpack_eta(bytes: &[u8; POLYETA_PACKEDBYTES]) -> Poly {
        let mut a = Poly::zero();
        if ETA == 2 {
            for i in 0..N / 8 {
                let b = &bytes[3 * i..3 * i + 3];
                a.coeffs[8 * i] = i32::from(b[0] & 7);
                a.coeffs[8 * i + 1] = i32::from((b[0] >> 3) & 7);
                a.coeffs[8 * i + 2] = i32::from(((b[0] >> 6) | (b[1] << 2)) & 7);
                a.coeffs[8 * i + 3] = i32::from((b[1] >> 1) & 7);
                a.coeffs[8 * i + 4] = i32::from((b[1] >> 4) & 7);
                a.coeffs[8 * i + 5] = i32::from(((b[1] >> 7) | (b[2] << 1)) & 7);
                a.coeffs[8 * i + 6] = i32::from((b[2] >> 2) & 7);
                a.coeffs[8 * i + 7] = i32::from((b[2] >> 5) & 7);
            }
        } else {
            for i in 0..N / 2 {
                a.coeffs[2 * i] = i32::from(bytes[i] & 0x0f);
                a.coeffs[2 * i + 1] = i32::from(bytes[i] >> 4);
            }
        }
        for c in a.coeffs.iter_mut() {
            *c = ETA - *c;
        }
        a
    }

    /// Packs coefficients in \[0, 1024) at 10 bits each.
    pub fn pack_t1(&self) -> [u8; POLYT1_PACKEDBYTES] {
        let mut r = [0u8; POLYT1_PACKEDBYTES];
        for i in 0..N / 4 {
            let t = &self.coeffs[4 * i..4 * i + 4];
            r[5 * i] = t[0] as u8;
            r[5 * i + 1] = ((t[0] >> 8) | (t[1] << 2)) as u8;
            r[5 * i + 2] = ((t[1] >> 6) | (t[2] << 4)) as u8;
            r[5 * i + 3] = ((t[2] >> 4) | (t[3] << 6)) as u8;
            r[5 * i + 4] = (t[3] >> 2) as u8;
        }
        r
    }

    /// Inverse of [`Poly::pack_t1`].
    pub fn unpack_t1(bytes: &[u8; POLYT1_PACKEDBYTES]) -> Poly {
        let mut a = Poly::zero();
        for i in 0..N / 4 {
            let b = &bytes[5 * i..5 * i + 5];
            a.coeffs[4 * i] = (i32::from(b[0]) | (i32::from(b[1]) << 8)) & 0x3ff;
            a.coeffs[4 * i + 1] = ((i32::from(b[1]) >> 2) | (i32::from(b[2]) << 6)) & 0x3ff;
            a.coeffs[4 * i + 2] = ((i32::from(b[2]) >> 4) | (i32::from(b[3]) << 4)) & 0x3ff;
            a.coeffs[4 * i + 3] = ((i32::from(b[3]) >> 6) | (i32::from(b[4]) << 2)) & 0x3ff;
        }
        a
    }

    /// Packs coefficients in (-2^{D-1}, 2^{D-1}\] at 13 bits each, mapped
    /// through `2^{D-1} - c`.
    pub fn pack_t0(&self) -> [u8; POLYT0_PACKEDBYTES] {
        const HALF: i32 = 1 << (D - 1);

        let mut r = [0u8; POLYT0_PACKEDBYTES];
        for i in 0..N / 8 {
            let mut t = [0i32; 8];
            for (k, v) in t.iter_mut().enumerate() {
                *v = HALF - self.coeffs[8 * i + k];
            }
            r[13 * i] = t[0] as u8;
            r[13 * i + 1] = ((t[0] >> 8) | (t[1] << 5)) as u8;
            r[13 * i + 2] = (t[1] >> 3) as u8;
            r[13 * i + 3] = ((t[1] >> 11) | (t[2] << 2)) as u8;
            r[13 * i + 4] = ((t[2] >> 6) | (t[3] << 7)) as u8;
            r[13 * i + 5] = (t[3] >> 1) as u8;
            r[13 * i + 6] = ((t[3] >> 9) | (t[4] << 4)) as u8;
            r[13 * i + 7] = (t[4] >> 4) as u8;
            r[13 * i + 8] = ((t[4] >> 12) | (t[5] << 1)) as u8;
            r[13 * i + 9] = ((t[5] >> 7) | (t[6] << 6)) as u8;
            r[13 * i + 10] = (t[6] >> 2) as u8;
            r[13 * i + 11] = ((t[6] >> 10) | (t[7] << 3)) as u8;
            r[13 * i + 12] = (t[7] >> 5) as u8;
        }
        r
    }

    /// Inverse of [`Poly::pack_t0`].
    pub fn unpack_t0(bytes: &[u8; POLYT0_PACKEDBYTES]) -> Poly {
        const HALF: i32 = 1 << (D - 1);

        let mut a = Poly::zero();
        for i in 0..N / 8 {
            let b: [i32; 13] = core::array::from_fn(|k| i32::from(bytes[13 * i + k]));
            a.coeffs[8 * i] = (b[0] | (b[1] << 8)) & 0x1fff;
            a.coeffs[8 * i + 1] = ((b[1] >> 5) | (b[2] << 3) | (b[3] << 11)) & 0x1fff;
            a.coeffs[8 * i + 2] = ((b[3] >> 2) | (b[4] << 6)) & 0x1fff;
            a.coeffs[8 * i + 3] = ((b[4] >> 7) | (b[5] << 1) | (b[6] << 9)) & 0x1fff;
            a.coeffs[8 * i + 4] = ((b[6] >> 4) | (b[7] << 4) | (b[8] << 12)) & 0x1fff;
            a.coeffs[8 * i + 5] = ((b[8] >> 1) | (b[9] << 7)) & 0x1fff;
            a.coeffs[8 * i + 6] = ((b[9] >> 6) | (b[10] << 2) | (b[11] << 10)) & 0x1fff;
            a.coeffs[8 * i + 7] = ((b[11] >> 3) | (b[12] << 5)) & 0x1fff;
        }
        for c in a.coeffs.iter_mut() {
            *c = HALF - *c;
        }
        a
    }

    /// Packs coefficients in (-GAMMA1, GAMMA1\] at 18 bits (γ1 = 2^17) or
    /// 20 bits (γ1 = 2^19) each, mapped through `GAMMA1 - c`.
    pub fn pack_z(&self) -> [u8; POLYZ_PACKEDBYTES] {
        let mut r = [0u8; POLYZ_PACKEDBYTES];
        if GAMMA1 == 1 << 17 {
            for i in 0..N / 4 {
                let mut t = [0i32; 4];
                for (k, v) in t.iter_mut().enumerate() {
                    *v = GAMMA1 - self.coeffs[4 * i + k];
                }
                r[9 * i] = t[0] as u8;
                r[9 * i + 1] = (t[0] >> 8) as u8;
                r[9 * i + 2] = ((t[0] >> 16) | (t[1] << 2)) as u8;
                r[9 * i + 3] = (t[1] >> 6) as u8;
                r[9 * i + 4] = ((t[1] >> 14) | (t[2] << 4)) as u8;
                r[9 * i + 5] = (t[2] >> 4) as u8;
                r[9 * i + 6] = ((t[2] >> 12) | (t[3] << 6)) as u8;
                r[9 * i + 7] = (t[3] >> 2) as u8;
                r[9 * i + 8] = (t[3] >> 10) as u8;
            }
        } else {
            for i in 0..N / 2 {
                let t0 = GAMMA1 - self.coeffs[2 * i];
                let t1 = GAMMA1 - self.coeffs[2 * i + 1];
                r[5 * i] = t0 as u8;
                r[5 * i + 1] = (t0 >> 8) as u8;
                r[5 * i + 2] = ((t0 >> 16) | (t1 << 4)) as u8;
                r[5 * i + 3] = (t1 >> 4) as u8;
                r[5 * i + 4] = (t1 >> 12) as u8;
            }
        }
        r
    }

    /// Inverse of [`Poly::pack_z`].
    pub fn unpack_z(bytes: &[u8; POLYZ_PACKEDBYTES]) -> Poly {
        let mut a = Poly::zero();
        if GAMMA1 == 1 << 17 {
            for i in 0..N / 4 {
                let b: [i32; 9] = core::array::from_fn(|k| i32::from(bytes[9 * i + k]));
                a.coeffs[4 * i] = (b[0] | (b[1] << 8) | (b[2] << 16)) & 0x3ffff;
                a.coeffs[4 * i + 1] = ((b[2] >> 2) | (b[3] << 6) | (b[4] << 14)) & 0x3ffff;
                a.coeffs[4 * i + 2] = ((b[4] >> 4) | (b[5] << 4) | (b[6] << 12)) & 0x3ffff;
                a.coeffs[4 * i + 3] = ((b[6] >> 6) | (b[7] << 2) | (b[8] << 10)) & 0x3ffff;
            }
        } else {
            for i in 0..N / 2 {
                let b: [i32; 5] = core::array::from_fn(|k| i32::from(bytes[5 * i + k]));
                a.coeffs[2 * i] = (b[0] | (b[1] << 8) | (b[2] << 16)) & 0xfffff;
                a.coeffs[2 * i + 1] = ((b[2] >> 4) | (b[3] << 4) | (b[4] << 12)) & 0xfffff;
            }
        }
        for c in a.coeffs.iter_mut() {
            *c = GAMMA1 - *c;
        }
        a
    }

    /// Packs high-bits coefficients at 6 bits (44 buckets) or 4 bits
    /// (16 buckets) each.
    pub fn pack_w1(&self) -> [u8; POLYW1_PACKEDBYTES] {
        let mut r = [0u8; POLYW1_PACKEDBYTES];
        if GAMMA2 == (Q - 1) / 88 {
            for i in 0..N / 4 {
                let t = &self.coeffs[4 * i..4 * i + 4];
                r[3 * i] = (t[0] | (t[1] << 6)) as u8;
                r[3 * i + 1] = ((t[1] >> 2) | (t[2] << 4)) as u8;
                r[3 * i + 2] = ((t[2] >> 4) | (t[3] << 2)) as u8;
            }
        } else {
            for i in 0..N / 2 {
                r[i] = (self.coeffs[2 * i] | (self.coeffs[2 * i + 1] << 4)) as u8;
            }
        }
        r
    }

    /// Inverse of [`Poly::pack_w1`].
    pub fn unpack_w1(bytes: &[u8; POLYW1_PACKEDBYTES]) -> Poly {
        let mut a = Poly::zero();
        if GAMMA2 == (Q - 1) / 88 {
            for i in 0..N / 4 {
                let b = &bytes[3 * i..3 * i + 3];
                a.coeffs[4 * i] = i32::from(b[0] & 0x3f);
                a.coeffs[4 * i + 1] = i32::from(((b[0] >> 6) | (b[1] << 2)) & 0x3f);
                a.coeffs[4 * i + 2] = i32::from(((b[1] >> 4) | (b[2] << 4)) & 0x3f);
                a.coeffs[4 * i + 3] = i32::from(b[2] >> 2);
            }
        } else {
            for i in 0..N / 2 {
                a.coeffs[2 * i] = i32::from(bytes[i] & 0x0f);
                a.coeffs[2 * i + 1] = i32::from(bytes[i] >> 4);
            }
        }
        a
    }
}

/// Fills `coeffs` from 3-byte little-endian draws masked to 23 bits,
/// keeping values below Q. Returns how many were accepted.
fn rej_uniform(coeffs: &mut [i32], buf: &[u8]) -> usize {
    let mut ctr = 0;
    for b in buf.chunks_exact(3) {
        if ctr == coeffs.len() {
            break;
        }
        let t = u32::from(b[0]) | u32::from(b[1]) << 8 | u32::from(b[2] & 0x7f) << 16;
        if t < Q as u32 {
            coeffs[ctr] = t as i32;
            ctr += 1;
        }
    }
    ctr
}

/// Fills `coeffs` from nibble draws: for ETA = 2 accept nibbles below 15
/// and map through 2 - (nibble mod 5), for ETA = 4 accept below 9 and map
/// through 4 - nibble. Returns how many were accepted.
fn rej_eta(coeffs: &mut [i32], buf: &[u8]) -> usize {
    let mut ctr = 0;
    for &byte in buf {
        if ctr == coeffs.len() {
            break;
        }
        let t0 = u32::from(byte & 0x0f);
        let t1 = u32::from(byte >> 4);
        if ETA == 2 {
            if t0 < 15 {
                coeffs[ctr] = 2 - (t0 - (205 * t0 >> 10) * 5) as i32;
                ctr += 1;
            }
            if t1 < 15 && ctr < coeffs.len() {
                coeffs[ctr] = 2 - (t1 - (205 * t1 >> 10) * 5) as i32;
                ctr += 1;
            }
        } else {
            if t0 < 9 {
                coeffs[ctr] = 4 - t0 as i32;
                ctr += 1;
            }
            if t1 < 9 && ctr < coeffs.len() {
                coeffs[ctr] = 4 - t1 as i32;
                ctr += 1;
            }
        }
    }
    ctr
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(tag: u8) -> Poly {
        let mut seed = [0u8; SEEDBYTES];
        seed[0] = tag;
        Poly::uniform(&seed, 0)
    }

    #[test]
    fn samplers_are_deterministic() {
        let seed = [7u8; SEEDBYTES];
        assert_eq!(Poly::uniform(&seed, 3), Poly::uniform(&seed, 3));
        assert_ne!(Poly::uniform(&seed, 3), Poly::uniform(&seed, 4));

        let seed = [9u8; CRHBYTES];
        assert_eq!(Poly::uniform_eta(&seed, 1), Poly::uniform_eta(&seed, 1));
        assert_ne!(Poly::uniform_eta(&seed, 1), Poly::uniform_eta(&seed, 2));
        assert_eq!(Poly::uniform_gamma1(&seed, 5), Poly::uniform_gamma1(&seed, 5));
        assert_ne!(Poly::uniform_gamma1(&seed, 5), Poly::uniform_gamma1(&seed, 6));
    }

    #[test]
    fn uniform_stays_below_q() {
        let a = Poly::uniform(&[0u8; SEEDBYTES], 0);
        assert!(a.coeffs.iter().all(|&c| (0..Q).contains(&c)));
    }

    #[test]
    fn uniform_eta_range() {
        for nonce in 0..8 {
            let a = Poly::uniform_eta(&[0u8; CRHBYTES], nonce);
            assert!(a.coeffs.iter().all(|&c| (-ETA..=ETA).contains(&c)));
        }
    }

    #[test]
    fn uniform_gamma1_range() {
        for nonce in 0..4 {
            let a = Poly::uniform_gamma1(&[3u8; CRHBYTES], nonce);
            assert!(a.coeffs.iter().all(|&c| -GAMMA1 < c && c <= GAMMA1));
        }
    }

    #[test]
    fn challenge_shape() {
        for fill in [0u8, 1, 0xa5] {
            let c = Poly::challenge(&[fill; CTILDEBYTES]);
            let nonzero = c.coeffs.iter().filter(|&&x| x != 0).count();
            assert_eq!(nonzero, TAU);
            assert!(c.coeffs.iter().all(|&x| x == 0 || x == 1 || x == -1));
        }
    }

    #[test]
    fn chknorm_matches_naive() {
        let mut a = sample(1);
        a.reduce();
        for b in [1, 17, 1 << 13, GAMMA1, (Q - 1) / 8] {
            let naive = a.coeffs.iter().any(|&c| c.abs() >= b);
            assert_eq!(a.chknorm(b), naive, "bound {b}");
        }
        // bounds beyond (Q-1)/8 are unconditionally rejected
        assert!(Poly::zero().chknorm((Q - 1) / 8 + 1));
    }

    #[test]
    fn eta_pack_round_trip() {
        let a = Poly::uniform_eta(&[11u8; CRHBYTES], 0);
        assert_eq!(Poly::unpack_eta(&a.pack_eta()), a);
    }

    #[test]
    fn t1_pack_round_trip() {
        let mut a = sample(2);
        for c in a.coeffs.iter_mut() {
            *c &= 0x3ff;
        }
        assert_eq!(Poly::unpack_t1(&a.pack_t1()), a);
    }

    #[test]
    fn t0_pack_round_trip() {
        let mut a = sample(3);
        a.caddq();
        let (_, t0) = a.power2round();
        assert_eq!(Poly::unpack_t0(&t0.pack_t0()), t0);
    }

    #[test]
    fn z_pack_round_trip() {
        let a = Poly::uniform_gamma1(&[13u8; CRHBYTES], 2);
        assert_eq!(Poly::unpack_z(&a.pack_z()), a);
    }

    #[test]
    fn w1_pack_is_dense() {
        let mut a = sample(4);
        a.caddq();
        let (w1, _) = a.decompose();
        let packed = a_w1_bits(&w1);
        let repacked = w1.pack_w1();
        assert_eq!(packed, repacked);
        assert_eq!(Poly::unpack_w1(&repacked), w1);
    }

    // independent bit-level reference for the w1 encoding
    fn a_w1_bits(w1: &Poly) -> [u8; POLYW1_PACKEDBYTES] {
        let bits = if GAMMA2 == (Q - 1) / 88 { 6 } else { 4 };
        let mut out = [0u8; POLYW1_PACKEDBYTES];
        for (i, &c) in w1.coeffs.iter().enumerate() {
            for k in 0..bits {
                let bitpos = i * bits + k;
                out[bitpos / 8] |= (((c >> k) & 1) as u8) << (bitpos % 8);
            }
        }
        out
    }
}
