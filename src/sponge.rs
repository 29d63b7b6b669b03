//! SHAKE128, SHAKE256, SHA3-256, and SHA3-512 over Keccak-f\[1600\].
//!
//! One incremental sponge type serves all four, parameterized by the rate in
//! bytes and the domain-separation byte: 0x1f for the XOFs, 0x06 for the
//! fixed-output hashes. The state is kept as bytes and converted to lanes
//! around each permutation, so absorb and squeeze are plain byte XOR/copy at
//! a cursor.
//!
//! The cursor stays below the rate while absorbing (the block is permuted
//! away the moment it fills), which means padding after a rate-multiple
//! absorb lands at offset 0 of a fresh block. [`Sponge::finalize`] parks the
//! cursor at the rate so that squeezing starts with a permutation.

use byteorder::{ByteOrder, LittleEndian};
use zeroize::ZeroizeOnDrop;

use crate::keccak;

/// SHAKE128 rate in bytes.
pub const SHAKE128_RATE: usize = 168;

/// SHAKE256 rate in bytes.
pub const SHAKE256_RATE: usize = 136;

/// SHA3-256 rate in bytes.
pub const SHA3_256_RATE: usize = 136;

/// SHA3-512 rate in bytes.
pub const SHA3_512_RATE: usize = 72;

const XOF_PAD: u8 = 0x1f;
const SHA3_PAD: u8 = 0x06;

/// The SHAKE128 extendable-output function.
pub type Shake128 = Sponge<SHAKE128_RATE, XOF_PAD>;

/// The SHAKE256 extendable-output function.
pub type Shake256 = Sponge<SHAKE256_RATE, XOF_PAD>;

/// An incremental Keccak sponge with a compile-time rate and padding byte.
///
/// Absorbing after [`Sponge::finalize`] is a caller error; it is caught by a
/// debug assertion.
#[derive(Clone, ZeroizeOnDrop)]
#[repr(align(8))]
pub struct Sponge<const RATE: usize, const PAD: u8> {
    state: [u8; 200],
    pos: usize,
}

impl<const RATE: usize, const PAD: u8> Sponge<RATE, PAD> {
    /// Returns a fresh all-zero sponge.
    pub fn init() -> Self {
        Sponge { state: [0u8; 200], pos: 0 }
    }

    /// XORs `input` into the rate portion of the state, permuting as blocks
    /// fill.
    pub fn absorb(&mut self, mut input: &[u8]) {
        debug_assert!(self.pos < RATE, "absorb after finalize");
        while self.pos + input.len() >= RATE {
            let take = RATE - self.pos;
            for (s, b) in self.state[self.pos..RATE].iter_mut().zip(input) {
                *s ^= b;
            }
            input = &input[take..];
            self.permute();
            self.pos = 0;
        }
        for (s, b) in self.state[self.pos..].iter_mut().zip(input) {
            *s ^= b;
        }
        self.pos += input.len();
    }

    /// Applies the domain-separation byte and final pad bit, switching the
    /// sponge from absorbing to squeezing.
    pub fn finalize(&mut self) {
        debug_assert!(self.pos < RATE, "finalize called twice");
        self.state[self.pos] ^= PAD;
        self.state[RATE - 1] ^= 0x80;
        self.pos = RATE;
    }

    /// Shorthand for init, absorb, finalize over a single input.
    pub fn absorb_once(input: &[u8]) -> Self {
        let mut sponge = Self::init();
        sponge.absorb(input);
        sponge.finalize();
        sponge
    }

    /// Fills `out` with squeezed bytes, resuming at the current cursor.
    pub fn squeeze(&mut self, mut out: &mut [u8]) {
        while !out.is_empty() {
            if self.pos == RATE {
                self.permute();
                self.pos = 0;
            }
            let take = (RATE - self.pos).min(out.len());
            let (head, tail) = out.split_at_mut(take);
            head.copy_from_slice(&self.state[self.pos..self.pos + take]);
            self.pos += take;
            out = tail;
        }
    }

    /// Fills `out`, whose length must be a multiple of the rate, one full
    /// block per permutation. Only valid on a block-aligned sponge (directly
    /// after [`Sponge::finalize`] or a previous block squeeze).
    pub fn squeeze_blocks(&mut self, out: &mut [u8]) {
        debug_assert_eq!(out.len() % RATE, 0);
        debug_assert_eq!(self.pos, RATE, "block squeeze on unaligned sponge");
        for block in out.chunks_exact_mut(RATE) {
            self.permute();
            block.copy_from_slice(&self.state[..RATE]);
        }
    }

    fn permute(&mut self) {
        let mut lanes = [0u64; 25];
        LittleEndian::read_u64_into(&self.state, &mut lanes);
        keccak::permute(&mut lanes);
        LittleEndian::write_u64_into(&lanes, &mut self.state);
    }
}

/// One-shot SHAKE128: fill `out` from `input`.
pub fn shake128(out: &mut [u8], input: &[u8]) {
    Shake128::absorb_once(input).squeeze(out);
}

/// One-shot SHAKE256: fill `out` from `input`.
pub fn shake256(out: &mut [u8], input: &[u8]) {
    Shake256::absorb_once(input).squeeze(out);
}

/// One-shot SHA3-256.
pub fn sha3_256(input: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    Sponge::<SHA3_256_RATE, SHA3_PAD>::absorb_once(input).squeeze(&mut out);
    out
}

/// One-shot SHA3-512.
pub fn sha3_512(input: &[u8]) -> [u8; 64] {
    let mut out = [0u8; 64];
    Sponge::<SHA3_512_RATE, SHA3_PAD>::absorb_once(input).squeeze(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use sha3::digest::{ExtendableOutput, Update, XofReader};

    use super::*;

    #[test]
    fn empty_string_kats() {
        assert_eq!(
            hex::encode(sha3_256(b"")),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
        assert_eq!(
            hex::encode(sha3_512(b"")),
            "a69f73cca23a9ac5c8b567dc185a756e97c982164fe25859e0d1dcc1475c80a6\
             15b2123af1f5f94c11e3e9402c3ac558f500199d95b6d3e301758586281dcd26"
        );

        let mut out = [0u8; 32];
        shake128(&mut out, b"");
        assert_eq!(
            hex::encode(out),
            "7f9c2ba4e88f827d616045507605853ed73b8093f6efbc88eb1a6eacfa66ef26"
        );

        shake256(&mut out, b"");
        assert_eq!(
            hex::encode(out),
            "46b9dd2b0ba88d13233b3feb743eeb243fcd52ea62b81b82b50c27646ed5762f"
        );
    }

    #[test]
    fn single_zero_byte_shake128() {
        let mut out = [0u8; 32];
        shake128(&mut out, b"\x00");
        assert_eq!(
            hex::encode(out),
            "0b784469a0628e03861cd8a196dfafa0e9e8056d04cddcc49f0746b9ad43ccb2"
        );
    }

    #[test]
    fn absorb_is_chunking_independent() {
        let msg: Vec<u8> = (0..997u32).map(|i| (i * 31 + 7) as u8).collect();
        let mut expect = [0u8; 64];
        shake256(&mut expect, &msg);

        for split in [
            vec![0, 997],
            vec![1, 996],
            vec![136, 861],
            vec![135, 1, 861],
            vec![100, 36, 400, 461],
            vec![272, 272, 453],
        ] {
            let mut sponge = Shake256::init();
            let mut off = 0;
            for len in split {
                sponge.absorb(&msg[off..off + len]);
                off += len;
            }
            assert_eq!(off, msg.len());
            sponge.finalize();
            let mut out = [0u8; 64];
            sponge.squeeze(&mut out);
            assert_eq!(expect, out);
        }
    }

    #[test]
    fn squeeze_is_chunking_independent() {
        let mut expect = [0u8; 300];
        shake128(&mut expect, b"chunks");

        let mut sponge = Shake128::absorb_once(b"chunks");
        let mut out = [0u8; 300];
        let mut off = 0;
        for len in [1, 7, 160, 31, 101] {
            sponge.squeeze(&mut out[off..off + len]);
            off += len;
        }
        assert_eq!(off, out.len());
        assert_eq!(expect.as_slice(), out.as_slice());
    }

    #[test]
    fn squeeze_blocks_matches_squeeze() {
        let mut sponge = Shake128::absorb_once(b"blocks");
        let mut blocks = [0u8; 2 * SHAKE128_RATE];
        sponge.squeeze_blocks(&mut blocks);

        let mut sponge = Shake128::absorb_once(b"blocks");
        let mut stream = [0u8; 2 * SHAKE128_RATE];
        sponge.squeeze(&mut stream);

        assert_eq!(blocks, stream);
    }

    #[test]
    fn matches_rustcrypto_shake_streams() {
        for len in 0..300 {
            let input: Vec<u8> = (0..len).map(|i| i as u8).collect();

            let mut ours = vec![0u8; 173];
            shake128(&mut ours, &input);
            let mut theirs = vec![0u8; 173];
            let mut xof = sha3::Shake128::default();
            xof.update(&input);
            xof.finalize_xof().read(&mut theirs);
            assert_eq!(ours, theirs, "shake128 diverges at input length {len}");

            let mut ours = vec![0u8; 141];
            shake256(&mut ours, &input);
            let mut theirs = vec![0u8; 141];
            let mut xof = sha3::Shake256::default();
            xof.update(&input);
            xof.finalize_xof().read(&mut theirs);
            assert_eq!(ours, theirs, "shake256 diverges at input length {len}");
        }
    }

    #[test]
    fn matches_rustcrypto_sha3() {
        use sha3::Digest;

        for len in [0, 1, 71, 72, 73, 135, 136, 137, 200] {
            let input: Vec<u8> = (0..len).map(|i| (i ^ 0x5a) as u8).collect();
            let theirs = sha3::Sha3_256::digest(&input);
            assert_eq!(sha3_256(&input).as_slice(), theirs.as_slice());
            let theirs = sha3::Sha3_512::digest(&input);
            assert_eq!(sha3_512(&input).as_slice(), theirs.as_slice());
        }
    }
}
