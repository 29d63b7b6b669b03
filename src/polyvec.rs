//! Length-K and length-L polynomial vectors, the public matrix A, and the
//! hint-vector codec.
//!
//! Everything here lifts [`Poly`] operations element-wise; the only genuinely
//! new behavior is the packed hint encoding, which is also the one place in
//! the crate where byte input can be malformed.

use core::ops::{AddAssign, SubAssign};

use thiserror::Error;
use zeroize::Zeroize;

use crate::params::{CRHBYTES, K, L, OMEGA, POLYVECH_PACKEDBYTES, POLYW1_PACKEDBYTES, SEEDBYTES};
use crate::poly::Poly;

/// A vector of L polynomials (the s1 / y / z shape).
#[derive(Clone, Debug, Default, PartialEq, Eq, Zeroize)]
pub struct PolyVecL {
    pub vec: [Poly; L],
}

/// A vector of K polynomials (the s2 / t / w / h shape).
#[derive(Clone, Debug, Default, PartialEq, Eq, Zeroize)]
pub struct PolyVecK {
    pub vec: [Poly; K],
}

/// Rejected hint-vector encodings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum HintError {
    /// A per-polynomial running count decreased or exceeded OMEGA.
    #[error("hint running count out of range")]
    CountOutOfRange,
    /// Hint positions within one polynomial were not strictly increasing.
    #[error("hint indices not strictly increasing")]
    IndicesNotIncreasing,
    /// Index slots past the final running count were not zero.
    #[error("nonzero padding after last hint index")]
    NonzeroPadding,
}

/// Expands rho into the K×L public matrix, row by row, element (i, j)
/// sampled with nonce `(i << 8) | j`. The result is in NTT domain by
/// construction.
pub fn matrix_expand(rho: &[u8; SEEDBYTES]) -> [PolyVecL; K] {
    core::array::from_fn(|i| PolyVecL {
        vec: core::array::from_fn(|j| Poly::uniform(rho, ((i << 8) | j) as u16)),
    })
}

/// Matrix-vector product in NTT domain: K Montgomery dot products.
pub fn matrix_pointwise_montgomery(mat: &[PolyVecL; K], v: &PolyVecL) -> PolyVecK {
    PolyVecK { vec: core::array::from_fn(|i| PolyVecL::pointwise_acc_montgomery(&mat[i], v)) }
}

impl AddAssign<&PolyVecL> for PolyVecL {
    fn add_assign(&mut self, rhs: &PolyVecL) {
        for (a, b) in self.vec.iter_mut().zip(&rhs.vec) {
            *a += b;
        }
    }
}

impl PolyVecL {
    /// Samples all L elements with consecutive nonces starting at `nonce`.
    pub fn uniform_eta(seed: &[u8; CRHBYTES], nonce: u16) -> Self {
        PolyVecL {
            vec: core::array::from_fn(|i| Poly::uniform_eta(seed, nonce.wrapping_add(i as u16))),
        }
    }

    /// Samples all L mask elements; element i uses nonce `L·nonce + i`,
    /// wrapping at 16 bits.
    pub fn uniform_gamma1(seed: &[u8; CRHBYTES], nonce: u16) -> Self {
        PolyVecL {
            vec: core::array::from_fn(|i| {
                Poly::uniform_gamma1(seed, (L as u16).wrapping_mul(nonce).wrapping_add(i as u16))
            }),
        }
    }

    pub fn reduce(&mut self) {
        for p in self.vec.iter_mut() {
            p.reduce();
        }
    }

    pub fn ntt(&mut self) {
        for p in self.vec.iter_mut() {
            p.ntt();
        }
    }

    pub fn invntt_tomont(&mut self) {
        for p in self.vec.iter_mut() {
            p.invntt_tomont();
        }
    }

    /// Multiplies every element by a single NTT-domain polynomial.
    pub fn pointwise_poly_montgomery(&mut self, a: &Poly) {
        for p in self.vec.iter_mut() {
            *p = Poly::pointwise_montgomery(a, p);
        }
    }

    /// Montgomery dot product of two L-vectors in NTT domain.
    pub fn pointwise_acc_montgomery(u: &PolyVecL, v: &PolyVecL) -> Poly {
        let mut w = Poly::pointwise_montgomery(&u.vec[0], &v.vec[0]);
        for (a, b) in u.vec[1..].iter().zip(&v.vec[1..]) {
            let t = Poly::pointwise_montgomery(a, b);
            w += &t;
        }
        w
    }

    /// Whether any centered coefficient in the vector reaches `b`.
    pub fn chknorm(&self, b: i32) -> bool {
        self.vec.iter().fold(false, |acc, p| acc | p.chknorm(b))
    }
}

impl AddAssign<&PolyVecK> for PolyVecK {
    fn add_assign(&mut self, rhs: &PolyVecK) {
        for (a, b) in self.vec.iter_mut().zip(&rhs.vec) {
            *a += b;
        }
    }
}

impl SubAssign<&PolyVecK> for PolyVecK {
    fn sub_assign(&mut self, rhs: &PolyVecK) {
        for (a, b) in self.vec.iter_mut().zip(&rhs.vec) {
            *a -= b;
        }
    }
}

impl PolyVecK {
    /// Samples all K elements with consecutive nonces starting at `nonce`.
    pub fn uniform_eta(seed: &[u8; CRHBYTES], nonce: u16) -> Self {
        PolyVecK {
            vec: core::array::from_fn(|i| Poly::uniform_eta(seed, nonce.wrapping_add(i as u16))),
        }
    }

    pub fn reduce(&mut self) {
        for p in self.vec.iter_mut() {
            p.reduce();
        }
    }

    pub fn caddq(&mut self) {
        for p in self.vec.iter_mut() {
            p.caddq();
        }
    }

    pub fn shiftl(&mut self) {
        for p in self.vec.iter_mut() {
            p.shiftl();
        }
    }

    pub fn ntt(&mut self) {
        for p in self.vec.iter_mut() {
            p.ntt();
        }
    }

    pub fn invntt_tomont(&mut self) {
        for p in self.vec.iter_mut() {
            p.invntt_tomont();
        }
    }

    /// Multiplies every element by a single NTT-domain polynomial.
    pub fn pointwise_poly_montgomery(&mut self, a: &Poly) {
        for p in self.vec.iter_mut() {
            *p = Poly::pointwise_montgomery(a, p);
        }
    }

    /// Whether any centered coefficient in the vector reaches `b`.
    pub fn chknorm(&self, b: i32) -> bool {
        self.vec.iter().fold(false, |acc, p| acc | p.chknorm(b))
    }

    /// Element-wise power-of-two rounding; coefficients must be standard
    /// representatives.
    pub fn power2round(&self) -> (PolyVecK, PolyVecK) {
        let mut a1 = PolyVecK::default();
        let mut a0 = PolyVecK::default();
        for i in 0..K {
            (a1.vec[i], a0.vec[i]) = self.vec[i].power2round();
        }
        (a1, a0)
    }

    /// Element-wise high/low decomposition; coefficients must be standard
    /// representatives.
    pub fn decompose(&self) -> (PolyVecK, PolyVecK) {
        let mut a1 = PolyVecK::default();
        let mut a0 = PolyVecK::default();
        for i in 0..K {
            (a1.vec[i], a0.vec[i]) = self.vec[i].decompose();
        }
        (a1, a0)
    }

    /// Hint vector for low bits `a0` against high bits `a1`, with its total
    /// weight. Signing rejects the attempt when the weight exceeds OMEGA.
    pub fn make_hint(a0: &PolyVecK, a1: &PolyVecK) -> (PolyVecK, u32) {
        let mut h = PolyVecK::default();
        let mut weight = 0;
        for i in 0..K {
            let (hp, w) = Poly::make_hint(&a0.vec[i], &a1.vec[i]);
            h.vec[i] = hp;
            weight += w;
        }
        (h, weight)
    }

    /// Recovers the high bits of every element using the hint vector.
    pub fn use_hint(&self, h: &PolyVecK) -> PolyVecK {
        PolyVecK { vec: core::array::from_fn(|i| self.vec[i].use_hint(&h.vec[i])) }
    }

    /// Concatenated w1 encodings of all K elements.
    pub fn pack_w1(&self) -> [u8; K * POLYW1_PACKEDBYTES] {
        let mut r = [0u8; K * POLYW1_PACKEDBYTES];
        for (chunk, p) in r.chunks_exact_mut(POLYW1_PACKEDBYTES).zip(&self.vec) {
            chunk.copy_from_slice(&p.pack_w1());
        }
        r
    }

    /// Inverse of [`Self::pack_w1`].
    pub fn unpack_w1(bytes: &[u8; K * POLYW1_PACKEDBYTES]) -> PolyVecK {
        let mut w1 = PolyVecK::default();
        for (chunk, p) in bytes.chunks_exact(POLYW1_PACKEDBYTES).zip(w1.vec.iter_mut()) {
            *p = Poly::unpack_w1(chunk.try_into().unwrap());
        }
        w1
    }

    /// Encodes a hint vector as OMEGA index bytes followed by K running
    /// counts. The vector must hold 0/1 coefficients with total weight at
    /// most OMEGA.
    pub fn pack_hint(&self) -> [u8; POLYVECH_PACKEDBYTES] {
        let mut r = [0u8; POLYVECH_PACKEDBYTES];
        let mut k = 0;
        for (i, p) in self.vec.iter().enumerate() {
            for (j, &c) in p.coeffs.iter().enumerate() {
                if c != 0 {
                    debug_assert!(k < OMEGA, "hint weight above OMEGA");
                    r[k] = j as u8;
                    k += 1;
                }
            }
            r[OMEGA + i] = k as u8;
        }
        r
    }

    /// Decodes a hint vector, rejecting every encoding [`Self::pack_hint`]
    /// cannot produce. Verification must fail on any error.
    pub fn unpack_hint(bytes: &[u8; POLYVECH_PACKEDBYTES]) -> Result<PolyVecK, HintError> {
        let mut h = PolyVecK::default();
        let mut k = 0usize;
        for i in 0..K {
            let count = usize::from(bytes[OMEGA + i]);
            if count < k || count > OMEGA {
                return Err(HintError::CountOutOfRange);
            }
            for j in k..count {
                // positions within one polynomial are strictly increasing
                if j > k && bytes[j] <= bytes[j - 1] {
                    return Err(HintError::IndicesNotIncreasing);
                }
                h.vec[i].coeffs[usize::from(bytes[j])] = 1;
            }
            k = count;
        }
        for &slot in &bytes[k..OMEGA] {
            if slot != 0 {
                return Err(HintError::NonzeroPadding);
            }
        }
        Ok(h)
    }
}
