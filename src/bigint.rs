// Fixed-capacity sign-magnitude big integer: the one data structure that
// crosses every component boundary in this crate (see the data flow note in
// the crate-level docs). Everything here is a plain value type; there is no
// heap allocation in the steady state.

use std::fmt;

use crate::error::{invalid_input, overflow, Result};
use crate::rng::{self, RngLike};

/// Bits of payload held in the low bits of each chunk.
pub const CHUNK_BITS: u32 = 32;

/// Chunks of payload needed to hold a 256-bit value.
pub const PAYLOAD_CHUNKS: usize = 8;

/// Total chunk slots: 8 payload chunks for a 256-bit value, plus headroom for
/// intermediate products up to 512 bits (8 more chunks) and one chunk of
/// slack for division normalization.
pub const CAPACITY: usize = 2 * PAYLOAD_CHUNKS + 1;

pub(crate) type Chunk = u32;
pub(crate) type DoubleChunk = u64;

pub(crate) const CHUNK_MASK: DoubleChunk = (1u64 << CHUNK_BITS) - 1;

/// A fixed-capacity sign-magnitude integer.
///
/// `chunks[0..size)` is little-endian payload; chunks at or beyond `size`
/// are indeterminate and must not be read. See the crate-level invariants
/// (I1-I4) for the exact contract maintained after every public operation.
#[derive(Clone, Copy)]
pub struct BigInt {
    pub(crate) chunks: [Chunk; CAPACITY],
    pub(crate) size: usize,
    pub(crate) sign: u8,
    pub(crate) overflow: bool,
}

impl BigInt {
    /// The value zero, with minimal size.
    pub fn zero() -> BigInt {
        BigInt { chunks: [0; CAPACITY], size: 1, sign: 0, overflow: false }
    }

    pub fn one() -> BigInt {
        BigInt::from_chunk(1, 0)
    }

    pub fn is_zero(&self) -> bool {
        self.size == 1 && self.chunks[0] == 0
    }

    pub fn is_odd(&self) -> bool {
        self.chunks[0] & 1 != 0
    }

    pub fn sign(&self) -> u8 {
        if self.is_zero() {
            0
        } else {
            self.sign
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Read-only view of the meaningful chunks (`chunks[0..size)`).
    pub(crate) fn used_chunks(&self) -> &[Chunk] {
        &self.chunks[..self.size]
    }

    pub(crate) fn chunk(&self, i: usize) -> Chunk {
        if i < self.size {
            self.chunks[i]
        } else {
            0
        }
    }

    /// True if a previous shift overflowed `CAPACITY`. Diagnostic only; no
    /// algorithmic decision in this crate depends on it (see [`crate::debug`]).
    pub fn has_overflowed(&self) -> bool {
        self.overflow
    }

    pub fn from_chunk(c: Chunk, sign: u8) -> BigInt {
        let mut chunks = [0; CAPACITY];
        chunks[0] = c;
        BigInt { chunks, size: 1, sign: sign & 1, overflow: false }
    }

    pub fn from_double_chunk(w: DoubleChunk, sign: u8) -> BigInt {
        let mut chunks = [0; CAPACITY];
        chunks[0] = (w & CHUNK_MASK) as Chunk;
        let hi = (w >> CHUNK_BITS) as Chunk;
        let size = if hi != 0 {
            chunks[1] = hi;
            2
        } else {
            1
        };
        BigInt { chunks, size, sign: sign & 1, overflow: false }
    }

    /// Parses `[-]{hexdigit}+`, big-endian, into a value of at most
    /// `CAPACITY` payload chunks.
    pub fn from_hex(s: &str) -> Result<BigInt> {
        let (sign, digits) = match s.strip_prefix('-') {
            Some(rest) => (1u8, rest),
            None => (0u8, s),
        };
        if digits.is_empty() || !digits.bytes().all(|b| (b as char).is_ascii_hexdigit()) {
            return Err(invalid_input(format!("not a valid hex literal: {s:?}")));
        }
        let nchunks = digits.len().div_ceil(8);
        if nchunks > CAPACITY {
            return Err(invalid_input(format!(
                "hex literal needs {nchunks} chunks, capacity is {CAPACITY}"
            )));
        }

        let bytes = digits.as_bytes();
        let mut chunks = [0; CAPACITY];
        let mut idx = 0;
        let mut end = bytes.len();
        while end > 0 {
            let start = end.saturating_sub(8);
            let group = std::str::from_utf8(&bytes[start..end]).unwrap();
            chunks[idx] = Chunk::from_str_radix(group, 16)
                .map_err(|_| invalid_input(format!("not a valid hex literal: {s:?}")))?;
            idx += 1;
            end = start;
        }

        let mut out = BigInt { chunks, size: nchunks.max(1), sign, overflow: false };
        out.prune_leading_zeros();
        Ok(out)
    }

    /// A uniformly random value of `nchunks` payload chunks, using the
    /// crate's lazily-seeded, non-thread-safe global generator. See
    /// [`BigInt::random_with`] for a version that takes an explicit RNG.
    pub fn random(nchunks: usize) -> BigInt {
        rng::with_global(|r| BigInt::random_with(r, nchunks))
    }

    /// A uniformly random value of `nchunks` payload chunks, each uniform
    /// over its payload range, with a uniformly random sign.
    pub fn random_with(rng: &mut impl RngLike, nchunks: usize) -> BigInt {
        let nchunks = nchunks.clamp(1, CAPACITY);
        let mut chunks = [0; CAPACITY];
        for c in chunks.iter_mut().take(nchunks) {
            *c = rng.next_chunk();
        }
        let sign = (rng.next_chunk() & 1) as u8;
        let mut out = BigInt { chunks, size: nchunks, sign, overflow: false };
        out.prune_leading_zeros();
        out
    }

    pub fn copy(src: &BigInt) -> BigInt {
        *src
    }

    pub(crate) fn raise_overflow(&mut self) {
        self.overflow = true;
    }

    /// Scans from the top down, shrinking `size` while the top chunk is
    /// zero. Must run before returning from any operation whose result
    /// size isn't known exactly in advance.
    pub(crate) fn prune_leading_zeros(&mut self) {
        while self.size > 1 && self.chunks[self.size - 1] == 0 {
            self.size -= 1;
        }
    }

    pub(crate) fn from_parts(chunks: [Chunk; CAPACITY], size: usize, sign: u8) -> BigInt {
        let mut out = BigInt { chunks, size: size.max(1), sign: sign & 1, overflow: false };
        out.prune_leading_zeros();
        out
    }

    pub(crate) fn checked_overflow_shift(new_size: usize) -> Result<()> {
        if new_size > CAPACITY {
            return Err(overflow(format!(
                "shift result needs {new_size} chunks, capacity is {CAPACITY}"
            )));
        }
        Ok(())
    }
}

impl Default for BigInt {
    fn default() -> Self {
        BigInt::zero()
    }
}

impl fmt::Debug for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigInt({})", crate::debug::print(self))
    }
}

impl PartialEq for BigInt {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == 0
    }
}
impl Eq for BigInt {}
