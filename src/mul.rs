// Component C: multiplication and squaring. Both always build a fresh
// result (see the note on the in-place-vs-fresh convention in DESIGN.md),
// which sidesteps the no-aliasing contract the reference implementation
// has to document separately for its destination-writing variants.

use crate::bigint::{BigInt, Chunk, CAPACITY, CHUNK_BITS, CHUNK_MASK, PAYLOAD_CHUNKS};

impl BigInt {
    /// Schoolbook multiply. Dispatches to [`BigInt::mul256`] for the common
    /// case of two full-width (8-chunk) operands; falls back to the general
    /// loop otherwise. Sign is the XOR of the operand signs.
    pub fn mul(&self, other: &BigInt) -> BigInt {
        if self.is_zero() || other.is_zero() {
            return BigInt::zero();
        }
        let magnitude = if self.size() == PAYLOAD_CHUNKS && other.size() == PAYLOAD_CHUNKS {
            Self::mul256(self, other)
        } else {
            Self::mul_schoolbook(self, other)
        };
        let sign = self.sign() ^ other.sign();
        let mut out = magnitude;
        out.sign = sign;
        out
    }

    fn mul_schoolbook(a: &BigInt, b: &BigInt) -> BigInt {
        let mut chunks = [0 as Chunk; CAPACITY];
        for i in 0..a.size() {
            let ai = a.chunk(i) as u64;
            if ai == 0 {
                continue;
            }
            let mut carry: u64 = 0;
            for j in 0..b.size() {
                let idx = i + j;
                if idx >= CAPACITY {
                    break;
                }
                let prod = ai * b.chunk(j) as u64 + chunks[idx] as u64 + carry;
                chunks[idx] = (prod & CHUNK_MASK) as Chunk;
                carry = prod >> CHUNK_BITS;
            }
            let mut idx = i + b.size();
            while carry != 0 && idx < CAPACITY {
                let sum = chunks[idx] as u64 + carry;
                chunks[idx] = (sum & CHUNK_MASK) as Chunk;
                carry = sum >> CHUNK_BITS;
                idx += 1;
            }
        }
        BigInt::from_parts(chunks, (a.size() + b.size()).min(CAPACITY), 0)
    }

    /// Same algorithm as [`BigInt::mul_schoolbook`] with the loop bounds
    /// fixed at `PAYLOAD_CHUNKS` so the optimizer can unroll the 64
    /// pairwise products; this is the scalar reference for the 256-bit
    /// fast path, there is no hand-unrolled or SIMD variant here.
    fn mul256(a: &BigInt, b: &BigInt) -> BigInt {
        let mut chunks = [0 as Chunk; CAPACITY];
        for i in 0..PAYLOAD_CHUNKS {
            let ai = a.chunk(i) as u64;
            let mut carry: u64 = 0;
            for j in 0..PAYLOAD_CHUNKS {
                let idx = i + j;
                let prod = ai * b.chunk(j) as u64 + chunks[idx] as u64 + carry;
                chunks[idx] = (prod & CHUNK_MASK) as Chunk;
                carry = prod >> CHUNK_BITS;
            }
            chunks[i + PAYLOAD_CHUNKS] = carry as Chunk;
        }
        BigInt::from_parts(chunks, 2 * PAYLOAD_CHUNKS, 0)
    }

    /// `self * self`, computed as twice the off-diagonal products plus the
    /// diagonal terms, for roughly half the multiplications of a generic
    /// `mul(self, self)`.
    pub fn square(&self) -> BigInt {
        if self.is_zero() {
            return BigInt::zero();
        }
        let n = self.size();
        let mut off = [0 as Chunk; CAPACITY];
        for i in 0..n {
            let ai = self.chunk(i) as u64;
            if ai == 0 {
                continue;
            }
            let mut carry: u64 = 0;
            for j in (i + 1)..n {
                let idx = i + j;
                if idx >= CAPACITY {
                    break;
                }
                let prod = ai * self.chunk(j) as u64 + off[idx] as u64 + carry;
                off[idx] = (prod & CHUNK_MASK) as Chunk;
                carry = prod >> CHUNK_BITS;
            }
            let mut idx = i + n;
            while carry != 0 && idx < CAPACITY {
                let sum = off[idx] as u64 + carry;
                off[idx] = (sum & CHUNK_MASK) as Chunk;
                carry = sum >> CHUNK_BITS;
                idx += 1;
            }
        }
        let off_total = BigInt::from_parts(off, (2 * n).min(CAPACITY), 0);
        let doubled = off_total.shl(1);

        let mut diag = [0 as Chunk; CAPACITY];
        for i in 0..n {
            let idx = 2 * i;
            if idx >= CAPACITY {
                break;
            }
            let sq = self.chunk(i) as u64 * self.chunk(i) as u64;
            Self::accumulate(&mut diag, idx, sq);
        }
        let diag_total = BigInt::from_parts(diag, (2 * n).min(CAPACITY), 0);

        doubled.add(&diag_total)
    }

    /// Adds a two-chunk value into `chunks` starting at `idx`, propagating
    /// carry as far as needed.
    fn accumulate(chunks: &mut [Chunk; CAPACITY], idx: usize, value: u64) {
        let mut carry = value;
        let mut k = idx;
        while carry != 0 && k < CAPACITY {
            let sum = chunks[k] as u64 + (carry & CHUNK_MASK);
            chunks[k] = (sum & CHUNK_MASK) as Chunk;
            carry = (carry >> CHUNK_BITS) + (sum >> CHUNK_BITS);
            k += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn mul_matches_schoolbook_for_small_values() {
        let a = BigInt::from_chunk(1234, 0);
        let b = BigInt::from_chunk(5678, 0);
        assert_eq!(a.mul(&b), BigInt::from_double_chunk(1234 * 5678, 0));
    }

    #[test]
    fn mul_xors_signs() {
        let a = BigInt::from_chunk(3, 1);
        let b = BigInt::from_chunk(4, 0);
        assert_eq!(a.mul(&b), BigInt::from_chunk(12, 1));
        assert_eq!(a.mul(&a.neg()), BigInt::from_chunk(9, 0));
    }

    #[test]
    fn mul_by_zero_is_zero() {
        let a = BigInt::from_hex("ffffffffffffffff").unwrap();
        assert_eq!(a.mul(&BigInt::zero()), BigInt::zero());
    }

    #[test]
    fn square_matches_self_times_self() {
        let a = BigInt::from_hex("123456789abcdef0123456789abcdef").unwrap();
        assert_eq!(a.square(), a.mul(&a));
    }

    #[test]
    fn square_of_full_width_value_matches_mul() {
        let a = BigInt::from_hex("ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff")
            .unwrap();
        assert_eq!(a.square(), a.mul(&a));
    }

    #[test]
    fn mul256_path_matches_generic_schoolbook() {
        let a = BigInt::from_hex("ffffffff00000000ffffffff00000000ffffffff00000000ffffffff00000000")
            .unwrap();
        let b = BigInt::from_hex("0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef")
            .unwrap();
        assert_eq!(BigInt::mul(&a, &b), BigInt::mul_schoolbook(&a, &b));
    }
}
