//! Fixed-precision modular arithmetic for the 251-bit prime field behind
//! Curve1174, and the Elligator 1 bijection between field elements and
//! points on that curve built on top of it.
//!
//! The layers, bottom to top:
//!
//! - [`bigint`]: a fixed-capacity, sign-magnitude integer (component A).
//! - [`arith`]: comparisons, add/sub, shifts (component B).
//! - [`mul`]: multiplication and squaring (component C).
//! - [`div`]: Knuth Algorithm D division/remainder (component D).
//! - [`modular`]: a generic modular layer — `add_mod`, `mul_mod`, `inv`,
//!   `egcd`, `pow`, `chi` — that works for any nonzero modulus
//!   (component E).
//! - [`curve1174`]: the same operations specialized to `q = 2^251 - 9`,
//!   with a reduction that avoids full division (component F).
//! - [`elligator`]: the Elligator 1 map between field elements and curve
//!   points (component G).
//!
//! This crate intentionally does not aim for constant-time execution; it
//! branches on the values it operates on, and is meant for throughput
//! rather than resistance to timing side channels.

mod arith;
mod bigint;
mod curve1174;
mod debug;
mod div;
mod elligator;
mod modular;
mod mul;
mod rng;

pub use bigint::{BigInt, CAPACITY, CHUNK_BITS, PAYLOAD_CHUNKS};
pub use curve1174::{
    curve1174, curve1174_add_mod, curve1174_chi, curve1174_compare_to_q, curve1174_inv_fermat,
    curve1174_mod, curve1174_mul_mod, curve1174_square_mod, curve1174_sub_mod,
    pow as curve1174_pow, pow_q_m1_d2, pow_q_m2, pow_q_p1_d4, pow_small as curve1174_pow_small,
    Curve,
};
pub use elligator::{point_to_str, str_to_point, CurvePoint};
pub use error::{Error, ErrorKind, Result};
pub use modular::EgcdResult;
pub use rng::RngLike;

mod error;

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn public_api_is_reachable_from_the_crate_root() {
        let a = BigInt::from_chunk(3, 0);
        let b = BigInt::from_chunk(4, 0);
        assert_eq!(a.add(&b), BigInt::from_chunk(7, 0));

        let p = str_to_point(&BigInt::from_chunk(2, 0)).unwrap();
        assert_eq!(point_to_str(&p).unwrap(), BigInt::from_chunk(2, 0));
    }
}
