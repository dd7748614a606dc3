// Component D: division and remainder. Magnitudes are divided with Knuth's
// Algorithm D (TAOCP vol. 2, 4.3.1); the sign-aware wrapper on top turns
// that truncating division into the floor division this crate promises,
// with the remainder carrying the divisor's sign.

use crate::bigint::{BigInt, Chunk, CAPACITY, CHUNK_BITS};
use crate::error::{division_by_zero, Result};

/// Working room for the normalized dividend, which can grow by one chunk
/// beyond `CAPACITY` during normalization.
const SCRATCH: usize = CAPACITY + 2;

impl BigInt {
    /// Floor division: `self = q * other + r` with `0 <= |r| < |other|` and
    /// `r`'s sign equal to `other`'s sign (or zero if `r` is zero).
    pub fn div_rem(&self, other: &BigInt) -> Result<(BigInt, BigInt)> {
        if other.is_zero() {
            return Err(division_by_zero());
        }
        if self.is_zero() {
            return Ok((BigInt::zero(), BigInt::zero()));
        }

        let (mut q_mag, mut r_mag) = if self.abs().compare(&other.abs()) < 0 {
            (BigInt::zero(), self.abs())
        } else if self.size() <= 2 {
            Self::divmod_host(self, other)
        } else {
            Self::divmod_knuth(self, other)
        };

        let diff_sign = self.sign() != other.sign();
        if diff_sign && !r_mag.is_zero() {
            q_mag = q_mag.add(&BigInt::one());
            r_mag = other.abs().sub(&r_mag);
        }

        let mut q = q_mag;
        q.sign = self.sign() ^ other.sign();
        let mut r = r_mag;
        r.sign = if r.is_zero() { 0 } else { other.sign() };

        Ok((q, r))
    }

    fn divmod_host(a: &BigInt, b: &BigInt) -> (BigInt, BigInt) {
        let au = Self::as_u64(a);
        let bu = Self::as_u64(b);
        (BigInt::from_double_chunk(au / bu, 0), BigInt::from_double_chunk(au % bu, 0))
    }

    fn as_u64(v: &BigInt) -> u64 {
        ((v.chunk(1) as u64) << CHUNK_BITS) | v.chunk(0) as u64
    }

    fn divmod_single_chunk(a: &BigInt, d: Chunk) -> (BigInt, BigInt) {
        let n = a.size();
        let mut q = [0 as Chunk; CAPACITY];
        let mut rem: u64 = 0;
        for i in (0..n).rev() {
            let cur = (rem << CHUNK_BITS) | a.chunk(i) as u64;
            q[i] = (cur / d as u64) as Chunk;
            rem = cur % d as u64;
        }
        (BigInt::from_parts(q, n, 0), BigInt::from_double_chunk(rem, 0))
    }

    /// Magnitude division for `|a| >= |b|` and `a.size() > 2`. Knuth's
    /// Algorithm D: normalize so the divisor's top chunk has its high bit
    /// set, estimate each quotient chunk from the top two-and-a-bit chunks
    /// of the remaining dividend, correct the estimate with one more
    /// divisor chunk, multiply-and-subtract, and add the divisor back if
    /// that subtraction underflowed (D6).
    fn divmod_knuth(a: &BigInt, b: &BigInt) -> (BigInt, BigInt) {
        let n = b.size();
        if n == 1 {
            return Self::divmod_single_chunk(a, b.chunk(0));
        }
        let m = a.size() - n;
        let shift = b.chunk(n - 1).leading_zeros();

        let v = Self::shl_chunks(b, shift);
        let mut u = Self::shl_chunks(a, shift);

        let base: u64 = 1u64 << CHUNK_BITS;
        let mask: u64 = base - 1;
        let mut q = [0 as Chunk; CAPACITY];

        for j in (0..=m).rev() {
            let top = ((u[j + n] as u64) << CHUNK_BITS) | u[j + n - 1] as u64;
            let mut qhat = top / v[n - 1] as u64;
            let mut rhat = top % v[n - 1] as u64;

            loop {
                let too_big = qhat >= base
                    || qhat * v[n - 2] as u64 > base * rhat + u[j + n - 2] as u64;
                if !too_big {
                    break;
                }
                qhat -= 1;
                rhat += v[n - 1] as u64;
                if rhat >= base {
                    break;
                }
            }

            let mut borrow: i64 = 0;
            let mut carry: u64 = 0;
            for i in 0..n {
                let p = qhat * v[i] as u64 + carry;
                carry = p >> CHUNK_BITS;
                let sub = u[j + i] as i64 - (p & mask) as i64 - borrow;
                if sub < 0 {
                    u[j + i] = (sub + base as i64) as Chunk;
                    borrow = 1;
                } else {
                    u[j + i] = sub as Chunk;
                    borrow = 0;
                }
            }
            let sub_top = u[j + n] as i64 - carry as i64 - borrow;
            if sub_top < 0 {
                // D6: estimate was one too high; add the divisor back.
                qhat -= 1;
                let mut carry2: u64 = 0;
                for i in 0..n {
                    let s = u[j + i] as u64 + v[i] as u64 + carry2;
                    u[j + i] = (s & mask) as Chunk;
                    carry2 = s >> CHUNK_BITS;
                }
                u[j + n] = (sub_top + base as i64 + carry2 as i64) as Chunk;
            } else {
                u[j + n] = sub_top as Chunk;
            }

            q[j] = qhat as Chunk;
        }

        let q_big = BigInt::from_parts(q, (m + 1).min(CAPACITY), 0);
        let r_normalized = BigInt::from_parts(Self::array_to_chunks(&u[..n]), n, 0);
        let r = r_normalized.shr(shift);
        (q_big, r)
    }

    /// Magnitude of `v` shifted left by `shift < CHUNK_BITS` bits, with any
    /// carry out of the top chunk written one slot past `v.size()`.
    fn shl_chunks(v: &BigInt, shift: u32) -> [u32; SCRATCH] {
        let mut out = [0u32; SCRATCH];
        if shift == 0 {
            for i in 0..v.size() {
                out[i] = v.chunk(i);
            }
            return out;
        }
        let mut carry: u32 = 0;
        for i in 0..v.size() {
            let cur = v.chunk(i);
            out[i] = (cur << shift) | carry;
            carry = cur >> (CHUNK_BITS - shift);
        }
        out[v.size()] = carry;
        out
    }

    fn array_to_chunks(s: &[u32]) -> [Chunk; CAPACITY] {
        let mut out = [0 as Chunk; CAPACITY];
        out[..s.len()].copy_from_slice(s);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn div_by_zero_is_an_error() {
        let a = BigInt::from_chunk(5, 0);
        assert!(a.div_rem(&BigInt::zero()).is_err());
    }

    #[test]
    fn dividing_zero_gives_zero_and_zero() {
        let (q, r) = BigInt::zero().div_rem(&BigInt::from_chunk(7, 0)).unwrap();
        assert_eq!(q, BigInt::zero());
        assert_eq!(r, BigInt::zero());
    }

    #[test]
    fn small_divisor_larger_than_dividend() {
        let a = BigInt::from_chunk(3, 0);
        let b = BigInt::from_chunk(10, 0);
        let (q, r) = a.div_rem(&b).unwrap();
        assert_eq!(q, BigInt::zero());
        assert_eq!(r, BigInt::from_chunk(3, 0));
    }

    #[test]
    fn host_path_matches_plain_division() {
        let a = BigInt::from_chunk(100, 0);
        let b = BigInt::from_chunk(7, 0);
        let (q, r) = a.div_rem(&b).unwrap();
        assert_eq!(q, BigInt::from_chunk(14, 0));
        assert_eq!(r, BigInt::from_chunk(2, 0));
    }

    #[test]
    fn floor_division_with_mismatched_signs_rounds_down() {
        // -100 / 7 floors to -15, remainder carries the divisor's (positive) sign: 5.
        // -15 * 7 + 5 == -100.
        let a = BigInt::from_chunk(100, 1);
        let b = BigInt::from_chunk(7, 0);
        let (q, r) = a.div_rem(&b).unwrap();
        assert_eq!(q, BigInt::from_chunk(15, 1));
        assert_eq!(r, BigInt::from_chunk(5, 0));
    }

    #[test]
    fn remainder_carries_sign_of_divisor_when_negative() {
        // 100 / -7 floors to -15, remainder carries the divisor's (negative) sign: -5.
        let a = BigInt::from_chunk(100, 0);
        let b = BigInt::from_chunk(7, 1);
        let (q, r) = a.div_rem(&b).unwrap();
        assert_eq!(q, BigInt::from_chunk(15, 1));
        assert_eq!(r, BigInt::from_chunk(5, 1));
    }

    #[test]
    fn knuth_path_matches_identity_for_wide_values() {
        let a = BigInt::from_hex("123456789abcdef0123456789abcdef0123456789abcdef0").unwrap();
        let b = BigInt::from_hex("fedcba9876543210fedcba98").unwrap();
        let (q, r) = a.div_rem(&b).unwrap();
        assert!(r.abs().compare(&b.abs()) < 0);
        assert_eq!(q.mul(&b).add(&r), a);
    }

    #[test]
    fn knuth_path_exercises_add_back_correction() {
        // Chosen so the initial qhat estimate overshoots and D6 add-back fires.
        let a = BigInt::from_hex("ffffffff00000000000000000000001").unwrap();
        let b = BigInt::from_hex("ffffffff00000002").unwrap();
        let (q, r) = a.div_rem(&b).unwrap();
        assert!(r.abs().compare(&b.abs()) < 0);
        assert_eq!(q.mul(&b).add(&r), a);
    }

    #[test]
    fn single_chunk_divisor_uses_simple_long_division() {
        let a = BigInt::from_hex("123456789abcdef0123456789abcdef").unwrap();
        let b = BigInt::from_chunk(65521, 0);
        let (q, r) = a.div_rem(&b).unwrap();
        assert_eq!(q.mul(&b).add(&r), a);
        assert!(r.compare(&b) < 0);
    }
}
