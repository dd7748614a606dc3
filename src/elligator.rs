// Component G: the Elligator 1 bijection between field elements in
// `[0, (q-1)/2]` and points on Curve1174. Built entirely from the
// Curve1174-specialized layer in `curve1174.rs`; nothing here reasons
// about chunk widths or reduction directly.

use crate::bigint::BigInt;
use crate::curve1174::{
    curve1174, curve1174_add_mod, curve1174_chi, curve1174_inv_fermat, curve1174_mul_mod,
    curve1174_sub_mod, pow, pow_q_p1_d4, pow_small,
};
use crate::error::{invalid_input, Result};

/// A point `(x, y)` on Curve1174.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurvePoint {
    pub x: BigInt,
    pub y: BigInt,
}

/// `num / den mod q`, via the Fermat-inverse fast path rather than
/// extended Euclid, so every division in this module costs one
/// exponentiation's worth of fold-and-table reductions instead of a
/// Knuth division.
fn div_mod(num: &BigInt, den: &BigInt) -> Result<BigInt> {
    Ok(curve1174_mul_mod(num, &curve1174_inv_fermat(den)?))
}

fn chi_to_field(sym: i32, q: &BigInt) -> BigInt {
    match sym {
        1 => BigInt::one(),
        -1 => q.sub(&BigInt::one()),
        _ => BigInt::zero(),
    }
}

/// Maps `t` in `[0, (q-1)/2]` to a point on Curve1174.
pub fn str_to_point(t: &BigInt) -> Result<CurvePoint> {
    let curve = curve1174();
    let q = &curve.q;
    let two = BigInt::from_chunk(2, 0);
    let (q_half, _) = q.sub(&BigInt::one()).div_rem(&two)?;

    if t.sign() == 1 || t.compare(&q_half) > 0 {
        return Err(invalid_input("t must be in [0, (q-1)/2]"));
    }

    let one = BigInt::one();
    if *t == one {
        return Ok(CurvePoint { x: BigInt::zero(), y: one });
    }

    let u = div_mod(&one.sub(t), &one.add(t))?; // u = (1-t)/(1+t)

    let u5 = pow_small(&u, 5)?;
    let u3 = pow_small(&u, 3)?;
    let v = curve1174_add_mod(
        &u5,
        &curve1174_add_mod(&curve1174_mul_mod(&curve.r_squared_minus_2, &u3), &u),
    ); // v = u^5 + (r^2-2)u^3 + u

    let chiv = chi_to_field(curve1174_chi(&v)?, q);
    let big_x = curve1174_mul_mod(&chiv, &u); // X = chi(v) u

    let y0 = curve1174_mul_mod(&pow_q_p1_d4(&curve1174_mul_mod(&chiv, &v))?, &chiv);
    let u_sq_plus_inv_c_sq = curve1174_add_mod(&curve1174_mul_mod(&u, &u), &curve.inv_c_squared);
    let chi_term = chi_to_field(curve1174_chi(&u_sq_plus_inv_c_sq)?, q);
    let cap_y = curve1174_mul_mod(&y0, &chi_term); // Y = (chi(v)v)^((q+1)/4) chi(v) chi(u^2 + 1/c^2)

    let x_plus_1 = curve1174_add_mod(&one, &big_x);
    let x_plus_1_sq = curve1174_mul_mod(&x_plus_1, &x_plus_1);

    let x_numer = curve1174_mul_mod(
        &curve1174_mul_mod(&curve.c_minus_1_times_s, &big_x),
        &x_plus_1,
    );
    let x = div_mod(&x_numer, &cap_y)?; // x = (c-1)sX(1+X)/Y

    let r_x = curve1174_mul_mod(&curve.r, &big_x);
    let y_numer = curve1174_sub_mod(&r_x, &x_plus_1_sq);
    let y_denom = curve1174_add_mod(&r_x, &x_plus_1_sq);
    let y = div_mod(&y_numer, &y_denom)?; // y = (rX - (1+X)^2) / (rX + (1+X)^2)

    Ok(CurvePoint { x, y })
}

/// Maps a point on Curve1174 back to its preimage in `[0, (q-1)/2]`.
///
/// Assumes `p` lies on the curve; behavior is unspecified otherwise.
pub fn point_to_str(p: &CurvePoint) -> Result<BigInt> {
    let curve = curve1174();
    let q = &curve.q;
    let one = BigInt::one();
    let two = BigInt::from_chunk(2, 0);
    let four = BigInt::from_chunk(4, 0);

    let eta_num = curve1174_sub_mod(&p.y, &one);
    let eta_den = curve1174_mul_mod(&two, &curve1174_add_mod(&p.y, &one));
    let eta = div_mod(&eta_num, &eta_den)?; // eta = (y-1)/(2(y+1))

    let e = curve1174_add_mod(&one, &curve1174_mul_mod(&eta, &curve.r)); // E = 1 + eta*r
    let (exp, _) = q.add(&one).div_rem(&four)?;
    let e_sq_minus_1 = curve1174_sub_mod(&curve1174_mul_mod(&e, &e), &one);
    let root = pow(&e_sq_minus_1, &exp)?;
    let big_x = curve1174_sub_mod(&root, &e); // X = -E + (E^2-1)^((q+1)/4)

    let x_plus_1 = curve1174_add_mod(&one, &big_x);
    let x_sq_plus_inv_c_sq =
        curve1174_add_mod(&curve1174_mul_mod(&big_x, &big_x), &curve.inv_c_squared);
    let inner = curve1174_mul_mod(
        &curve1174_mul_mod(
            &curve1174_mul_mod(&curve.c_minus_1_times_s, &big_x),
            &x_plus_1,
        ),
        &curve1174_mul_mod(&p.x, &x_sq_plus_inv_c_sq),
    );
    let z = chi_to_field(curve1174_chi(&inner)?, q); // z = chi((c-1)sX(1+X)x(X^2+1/c^2))

    let u = curve1174_mul_mod(&z, &big_x);
    let t = div_mod(&curve1174_sub_mod(&one, &u), &curve1174_add_mod(&one, &u))?; // t = (1-u)/(1+u)

    let (q_half, _) = q.sub(&one).div_rem(&two)?;
    let t = if t.compare(&q_half) > 0 { curve1174_sub_mod(&BigInt::zero(), &t) } else { t };

    Ok(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn t_equal_one_maps_to_identity() {
        let p = str_to_point(&BigInt::one()).unwrap();
        assert_eq!(p, CurvePoint { x: BigInt::zero(), y: BigInt::one() });
        assert_eq!(point_to_str(&p).unwrap(), BigInt::one());
    }

    #[test]
    fn rejects_t_outside_valid_range() {
        assert!(str_to_point(&BigInt::from_chunk(1, 1)).is_err());
        let q = &curve1174().q;
        assert!(str_to_point(q).is_err());
    }

    #[test]
    fn s1_round_trips_through_point_to_str() {
        let t = BigInt::from_chunk(7, 0);
        let p = str_to_point(&t).unwrap();
        let expected_x = BigInt::from_hex(
            "00AB65983CF55A18C0E2C8BB8A156E030566D23767D6C1473ACFCF4D17439AC7",
        )
        .unwrap();
        let expected_y = BigInt::from_hex(
            "049C01F8D8C86ECB362B3952FA93ABD8CF512B09225BCEE9E76BC5E0C9A6E17E",
        )
        .unwrap();
        assert_eq!(p.x, expected_x);
        assert_eq!(p.y, expected_y);
        assert_eq!(point_to_str(&p).unwrap(), t);
    }

    #[test]
    fn s3_str_to_point_vector() {
        let t = BigInt::from_chunk(2, 0);
        let p = str_to_point(&t).unwrap();
        let expected_x = BigInt::from_hex(
            "06F5374156B145FF8BB3288E0418F513B5D7BBBAB6E252EA1BC2DB6428E1454E",
        )
        .unwrap();
        let expected_y = BigInt::from_hex(
            "00ED7F6014F111318ED7F6014F111318ED7F6014F111318ED7F6014F111318EC",
        )
        .unwrap();
        assert_eq!(p.x, expected_x);
        assert_eq!(p.y, expected_y);
    }

    #[test]
    fn every_small_t_round_trips() {
        for i in 2u32..30 {
            let t = BigInt::from_chunk(i, 0);
            let p = str_to_point(&t).unwrap();
            assert_eq!(point_to_str(&p).unwrap(), t, "round trip failed for t={i}");
        }
    }

    #[test]
    fn points_satisfy_the_curve_equation() {
        let curve = curve1174();
        let q = &curve.q;
        for i in 1u32..10 {
            let t = BigInt::from_chunk(i, 0);
            let p = str_to_point(&t).unwrap();
            let lhs = p
                .x
                .mul_mod(&p.x, q)
                .unwrap()
                .add_mod(&p.y.mul_mod(&p.y, q).unwrap(), q)
                .unwrap();
            let rhs = BigInt::one()
                .add_mod(
                    &curve
                        .d
                        .mul_mod(&p.x.mul_mod(&p.x, q).unwrap(), q)
                        .unwrap()
                        .mul_mod(&p.y.mul_mod(&p.y, q).unwrap(), q)
                        .unwrap(),
                    q,
                )
                .unwrap();
            assert_eq!(lhs, rhs, "point for t={i} is not on the curve");
        }
    }
}
