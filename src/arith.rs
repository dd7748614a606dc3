// Component B: comparisons, sign manipulation, addition/subtraction, and
// shifts. Everything here works on magnitudes first and fixes up the sign
// afterward; `fast_add`/`fast_sub` assume their two operands already agree
// on sign and exist mainly so `add`/`sub` can reroute a mismatched-sign
// operand into the other without writing the magnitude loop twice.

use crate::bigint::{BigInt, Chunk, CHUNK_BITS, CHUNK_MASK};
use crate::error::overflow;
use crate::error::Result;

impl BigInt {
    /// Three-way compare: negative/zero/positive, matching the sign of
    /// `self - other`. Zero compares equal regardless of its stored sign
    /// bit, per [`BigInt::sign`].
    pub fn compare(&self, other: &BigInt) -> i32 {
        if self.is_zero() && other.is_zero() {
            return 0;
        }
        let (a_sign, b_sign) = (self.sign(), other.sign());
        if a_sign != b_sign {
            return if a_sign == 1 { -1 } else { 1 };
        }
        let mag = Self::compare_magnitude(self.used_chunks(), other.used_chunks());
        if a_sign == 1 {
            -mag
        } else {
            mag
        }
    }

    fn compare_magnitude(a: &[Chunk], b: &[Chunk]) -> i32 {
        if a.len() != b.len() {
            return if a.len() < b.len() { -1 } else { 1 };
        }
        for i in (0..a.len()).rev() {
            if a[i] != b[i] {
                return if a[i] < b[i] { -1 } else { 1 };
            }
        }
        0
    }

    /// Flips the sign bit. `neg(0)` is still `0` (see [`BigInt::sign`]).
    pub fn neg(&self) -> BigInt {
        let mut out = *self;
        out.sign ^= 1;
        out
    }

    /// Clears the sign bit.
    pub fn abs(&self) -> BigInt {
        let mut out = *self;
        out.sign = 0;
        out
    }

    /// `self + other`, rerouting through [`BigInt::fast_sub`] when the
    /// operands disagree in sign.
    pub fn add(&self, other: &BigInt) -> BigInt {
        if self.sign() == other.sign() {
            Self::fast_add_magnitudes(self, other, self.sign())
        } else {
            Self::fast_sub_magnitudes(self, &other.neg())
        }
    }

    /// `self - other`, rerouting through [`BigInt::fast_add`] when the
    /// operands disagree in sign.
    pub fn sub(&self, other: &BigInt) -> BigInt {
        if self.sign() == other.sign() {
            Self::fast_sub_magnitudes(self, other)
        } else {
            Self::fast_add_magnitudes(self, &other.neg(), self.sign())
        }
    }

    /// Magnitude addition assuming `self.sign() == other.sign()`; the
    /// caller is responsible for the precondition, this just adds chunk by
    /// chunk and stamps the given sign on the result.
    pub(crate) fn fast_add_magnitudes(a: &BigInt, b: &BigInt, sign: u8) -> BigInt {
        let mut chunks = [0 as Chunk; crate::bigint::CAPACITY];
        let max_size = a.size().max(b.size());
        let mut carry: u64 = 0;
        for (i, slot) in chunks.iter_mut().take(max_size).enumerate() {
            let sum = a.chunk(i) as u64 + b.chunk(i) as u64 + carry;
            *slot = (sum & CHUNK_MASK) as Chunk;
            carry = sum >> CHUNK_BITS;
        }
        let mut size = max_size;
        if carry != 0 {
            chunks[size] = carry as Chunk;
            size += 1;
        }
        BigInt::from_parts(chunks, size, sign)
    }

    /// Magnitude subtraction assuming `self.sign() == other.sign()`; the
    /// actual subtrahend/minuend are picked by comparing magnitudes, and the
    /// sign-flip that implies is folded into the shared input sign.
    pub(crate) fn fast_sub_magnitudes(a: &BigInt, b: &BigInt) -> BigInt {
        let shared_sign = a.sign();
        let cmp = Self::compare_magnitude(a.used_chunks(), b.used_chunks());
        let (big, small, flip) = if cmp >= 0 { (a, b, false) } else { (b, a, true) };

        let mut chunks = [0 as Chunk; crate::bigint::CAPACITY];
        let mut borrow: i64 = 0;
        for i in 0..big.size() {
            let diff = big.chunk(i) as i64 - small.chunk(i) as i64 - borrow;
            if diff < 0 {
                chunks[i] = (diff + (1i64 << CHUNK_BITS)) as Chunk;
                borrow = 1;
            } else {
                chunks[i] = diff as Chunk;
                borrow = 0;
            }
        }
        debug_assert_eq!(borrow, 0, "fast_sub_magnitudes called with |a| < |b| unflipped");

        let sign = shared_sign ^ (flip as u8);
        BigInt::from_parts(chunks, big.size(), sign)
    }

    pub(crate) fn bit_length(&self) -> usize {
        if self.is_zero() {
            return 0;
        }
        let top = self.chunk(self.size() - 1);
        (self.size() - 1) * CHUNK_BITS as usize + (CHUNK_BITS - top.leading_zeros()) as usize
    }

    /// Shifts left by `n` bits, truncating and setting [`BigInt::has_overflowed`]
    /// if the result would need more than `CAPACITY` chunks.
    pub fn shl(&self, n: u32) -> BigInt {
        if n == 0 || self.is_zero() {
            return *self;
        }
        let word_shift = (n / CHUNK_BITS) as usize;
        let bit_shift = n % CHUNK_BITS;
        let mut chunks = [0 as Chunk; crate::bigint::CAPACITY];
        let mut overflowed = false;
        let mut carry: u64 = 0;
        for i in 0..self.size() {
            let shifted = ((self.chunk(i) as u64) << bit_shift) | carry;
            carry = shifted >> CHUNK_BITS;
            let idx = i + word_shift;
            if idx < crate::bigint::CAPACITY {
                chunks[idx] = (shifted & CHUNK_MASK) as Chunk;
            } else {
                overflowed = true;
            }
        }
        let mut idx = self.size() + word_shift;
        while carry != 0 {
            if idx < crate::bigint::CAPACITY {
                chunks[idx] = (carry & CHUNK_MASK) as Chunk;
                carry >>= CHUNK_BITS;
            } else {
                overflowed = true;
                break;
            }
            idx += 1;
        }
        let size = idx.min(crate::bigint::CAPACITY);
        let mut out = BigInt::from_parts(chunks, size, self.sign());
        if overflowed {
            out.raise_overflow();
        }
        out
    }

    /// Same as [`BigInt::shl`] but reports overflow as an error instead of
    /// silently truncating.
    pub fn checked_shl(&self, n: u32) -> Result<BigInt> {
        let out = self.shl(n);
        if out.has_overflowed() {
            return Err(overflow(format!("shift left by {n} exceeds capacity")));
        }
        Ok(out)
    }

    /// Shifts right by `n` bits, floor-rounding toward negative infinity
    /// when `self` is negative and bits are shifted out.
    pub fn shr(&self, n: u32) -> BigInt {
        if self.is_zero() {
            return BigInt::zero();
        }
        let bits = self.bit_length();
        if n as usize >= bits {
            return if self.sign() == 1 { BigInt::from_chunk(1, 1) } else { BigInt::zero() };
        }

        let word_shift = (n / CHUNK_BITS) as usize;
        let bit_shift = n % CHUNK_BITS;
        let new_size = self.size() - word_shift;
        let mut chunks = [0 as Chunk; crate::bigint::CAPACITY];
        for (i, slot) in chunks.iter_mut().take(new_size).enumerate() {
            let lo = self.chunk(i + word_shift) as u64;
            let hi = self.chunk(i + word_shift + 1) as u64;
            let combined = (hi << CHUNK_BITS) | lo;
            *slot = ((combined >> bit_shift) & CHUNK_MASK) as Chunk;
        }
        let magnitude = BigInt::from_parts(chunks, new_size, 0);

        if self.sign() == 0 {
            return magnitude;
        }

        let mut truncated_nonzero = false;
        for i in 0..word_shift {
            if self.chunk(i) != 0 {
                truncated_nonzero = true;
                break;
            }
        }
        if !truncated_nonzero && bit_shift > 0 {
            let low_mask = (1u64 << bit_shift) - 1;
            if (self.chunk(word_shift) as u64) & low_mask != 0 {
                truncated_nonzero = true;
            }
        }

        if truncated_nonzero {
            magnitude.add(&BigInt::one()).neg()
        } else {
            magnitude.neg()
        }
    }
}
