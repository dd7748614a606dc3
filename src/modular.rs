// Component E: a modulus-agnostic arithmetic layer built directly on top
// of the full-precision add/sub/mul and div_rem. Nothing here assumes
// anything about the modulus beyond "not zero"; the Curve1174-specialized
// fast paths live in `curve1174.rs`.

use crate::bigint::{BigInt, CHUNK_BITS};
use crate::error::{not_invertible, Result};

/// Output of the extended Euclidean algorithm: `g = a*x + b*y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EgcdResult {
    pub g: BigInt,
    pub x: BigInt,
    pub y: BigInt,
}

impl BigInt {
    /// `self` reduced into `[0, |m|)` (or `(-|m|, 0]` if `m` is negative;
    /// callers in this crate always pass a positive modulus). This is
    /// exactly `div_rem`'s remainder, which already carries the divisor's
    /// sign.
    pub fn modulo(&self, m: &BigInt) -> Result<BigInt> {
        let (_, r) = self.div_rem(m)?;
        Ok(r)
    }

    pub fn add_mod(&self, other: &BigInt, m: &BigInt) -> Result<BigInt> {
        self.add(other).modulo(m)
    }

    pub fn sub_mod(&self, other: &BigInt, m: &BigInt) -> Result<BigInt> {
        self.sub(other).modulo(m)
    }

    pub fn mul_mod(&self, other: &BigInt, m: &BigInt) -> Result<BigInt> {
        self.mul(other).modulo(m)
    }

    /// `self^(-1) mod m` via the extended Euclidean algorithm.
    pub fn inv(&self, m: &BigInt) -> Result<BigInt> {
        let r = self.modulo(m)?.egcd(m)?;
        if r.g.abs() != BigInt::one() {
            return Err(not_invertible());
        }
        r.x.modulo(m)
    }

    /// Extended Euclidean algorithm: finds `g = gcd(self, other)` along
    /// with Bezout coefficients `x, y` such that `self*x + other*y == g`.
    pub fn egcd(&self, other: &BigInt) -> Result<EgcdResult> {
        let (mut old_r, mut r) = (*self, *other);
        let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
        let (mut old_t, mut t) = (BigInt::zero(), BigInt::one());

        while !r.is_zero() {
            let (q, rem) = old_r.div_rem(&r)?;
            old_r = r;
            r = rem;
            let new_s = old_s.sub(&q.mul(&s));
            old_s = s;
            s = new_s;
            let new_t = old_t.sub(&q.mul(&t));
            old_t = t;
            t = new_t;
        }

        Ok(EgcdResult { g: old_r, x: old_s, y: old_t })
    }

    /// `self^e mod m` by left-to-right square-and-multiply. `e` is taken
    /// as a magnitude; `pow(_, 0, _) == 1`.
    pub fn pow(&self, e: &BigInt, m: &BigInt) -> Result<BigInt> {
        if e.is_zero() {
            return BigInt::one().modulo(m);
        }
        let mut base = self.modulo(m)?;
        let mut result = BigInt::one();
        let bits = e.bit_length();
        for i in 0..bits {
            let chunk_idx = i / CHUNK_BITS as usize;
            let bit_idx = i % CHUNK_BITS as usize;
            if (e.chunk(chunk_idx) >> bit_idx) & 1 != 0 {
                result = result.mul_mod(&base, m)?;
            }
            base = base.mul_mod(&base, m)?;
        }
        Ok(result)
    }

    /// The Legendre/quadratic-character symbol of `self` mod `m`, returned
    /// in the conventional `{+1, 0, -1}` encoding: `0` if `m | self`, else
    /// `self^((m-1)/2) mod m` normalized to `+1` or `-1`.
    pub fn chi(&self, m: &BigInt) -> Result<i32> {
        if self.modulo(m)?.is_zero() {
            return Ok(0);
        }
        let two = BigInt::from_chunk(2, 0);
        let (exp, _) = m.sub(&BigInt::one()).div_rem(&two)?;
        let r = self.pow(&exp, m)?;
        Ok(if r == BigInt::one() { 1 } else { -1 })
    }
}
