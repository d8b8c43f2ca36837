use crate::bn254::{
    BN254Fq, BN254Fq12, BN254Fq2, BN254Gt, BN254Scalar, BN254G1, BN254G2, FQ2_NONRESIDUE,
    TWIST_MUL_BY_Q_X, TWIST_MUL_BY_Q_Y,
};
use crate::prelude::*;
use crate::short_weierstrass::SWCurveConfig;

/// `6z + 2`, the loop count of the optimal ate Miller loop.
pub const ATE_LOOP_COUNT: u128 = 29793968203157093288;

/// The BN parameter `z`, used by the hard part of the final exponentiation.
pub const FINAL_EXPONENT_Z: u64 = 4965661367192848881;

const TWO_INV: BN254Fq = BN254Fq::from_decimal(
    "10944121435919637611123202872628637544348155578648911831344518947322613104292",
);

/// A G1 point prepared for the Miller loop, in affine coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BN254G1Prepared {
    /// The affine x-coordinate.
    pub x: BN254Fq,
    /// The affine y-coordinate.
    pub y: BN254Fq,
    infinity: bool,
}

/// The coefficients of one line function of the Miller loop.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EllCoeffs {
    /// The constant term.
    pub ell_0: BN254Fq2,
    /// The coefficient to be scaled by the y-coordinate of the G1 point.
    pub ell_vw: BN254Fq2,
    /// The coefficient to be scaled by the x-coordinate of the G1 point.
    pub ell_vv: BN254Fq2,
}

/// A G2 point with all the line coefficients of its Miller loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BN254G2Prepared {
    /// The affine x-coordinate.
    pub x: BN254Fq2,
    /// The affine y-coordinate.
    pub y: BN254Fq2,
    /// Line coefficients in the order the Miller loop consumes them.
    pub coeffs: Vec<EllCoeffs>,
    infinity: bool,
}

impl BN254G1Prepared {
    /// Whether the prepared point is the identity.
    pub fn is_zero(&self) -> bool {
        self.infinity
    }
}

impl BN254G2Prepared {
    /// Whether the prepared point is the identity.
    pub fn is_zero(&self) -> bool {
        self.infinity
    }
}

/// The bits of the loop count below the most significant one, high to low.
fn ate_loop_bits() -> impl Iterator<Item = bool> {
    let len = 128 - ATE_LOOP_COUNT.leading_zeros();
    (0..len - 1).rev().map(|i| (ATE_LOOP_COUNT >> i) & 1 == 1)
}

/// Prepare a G1 point: normalize it to affine coordinates.
pub fn precompute_g1(p: &BN254G1) -> BN254G1Prepared {
    match p.to_affine_coordinates() {
        Some((x, y)) => BN254G1Prepared {
            x,
            y,
            infinity: false,
        },
        None => BN254G1Prepared {
            x: BN254Fq::zero(),
            y: BN254Fq::zero(),
            infinity: true,
        },
    }
}

struct ProjectivePoint {
    x: BN254Fq2,
    y: BN254Fq2,
    z: BN254Fq2,
}

fn doubling_step(current: &mut ProjectivePoint) -> EllCoeffs {
    let (x, y, z) = (current.x, current.y, current.z);
    let a = (x * y).mul_by_fp(&TWO_INV);
    let b = y.square();
    let c = z.square();
    let d = c.double() + c;
    let e = crate::bn254::BN254G2Config::COEFF_B * d;
    let f = e.double() + e;
    let g = (b + f).mul_by_fp(&TWO_INV);
    let h = (y + z).square() - (b + c);
    let i = e - b;
    let j = x.square();
    let e_squared = e.square();

    current.x = a * (b - f);
    current.y = g.square() - (e_squared.double() + e_squared);
    current.z = b * h;

    EllCoeffs {
        ell_0: FQ2_NONRESIDUE * i,
        ell_vw: -h,
        ell_vv: j.double() + j,
    }
}

fn mixed_addition_step(
    base_x: &BN254Fq2,
    base_y: &BN254Fq2,
    current: &mut ProjectivePoint,
) -> EllCoeffs {
    let (x1, y1, z1) = (current.x, current.y, current.z);
    let d = x1 - *base_x * z1;
    let e = y1 - *base_y * z1;
    let f = d.square();
    let g = e.square();
    let h = d * f;
    let i = x1 * f;
    let j = h + z1 * g - i.double();

    current.x = d * j;
    current.y = e * (i - j) - h * y1;
    current.z = z1 * h;

    EllCoeffs {
        ell_0: FQ2_NONRESIDUE * (e * base_x - d * base_y),
        ell_vw: d,
        ell_vv: -e,
    }
}

/// Prepare a G2 point: compute the line coefficients of the optimal ate loop,
/// followed by the two Frobenius-twisted addition steps.
pub fn precompute_g2(q: &BN254G2) -> BN254G2Prepared {
    let (qx, qy) = match q.to_affine_coordinates() {
        Some(coordinates) => coordinates,
        None => {
            return BN254G2Prepared {
                x: BN254Fq2::zero(),
                y: BN254Fq2::zero(),
                coeffs: vec![],
                infinity: true,
            }
        }
    };

    let mut coeffs = Vec::with_capacity(90);
    let mut r = ProjectivePoint {
        x: qx,
        y: qy,
        z: BN254Fq2::one(),
    };

    for bit in ate_loop_bits() {
        coeffs.push(doubling_step(&mut r));
        if bit {
            coeffs.push(mixed_addition_step(&qx, &qy, &mut r));
        }
    }

    let q1_x = TWIST_MUL_BY_Q_X * qx.frobenius_map(1);
    let q1_y = TWIST_MUL_BY_Q_Y * qy.frobenius_map(1);
    let q2_x = TWIST_MUL_BY_Q_X * q1_x.frobenius_map(1);
    let q2_y = -(TWIST_MUL_BY_Q_Y * q1_y.frobenius_map(1));

    coeffs.push(mixed_addition_step(&q1_x, &q1_y, &mut r));
    coeffs.push(mixed_addition_step(&q2_x, &q2_y, &mut r));

    BN254G2Prepared {
        x: qx,
        y: qy,
        coeffs,
        infinity: false,
    }
}

#[inline]
fn ell(f: &mut BN254Fq12, coeffs: &EllCoeffs, p: &BN254G1Prepared) {
    *f = f.mul_by_024(
        &coeffs.ell_0,
        &coeffs.ell_vw.mul_by_fp(&p.y),
        &coeffs.ell_vv.mul_by_fp(&p.x),
    );
}

/// The product of the Miller loops of several pairs, sharing the squarings.
/// Pairs where either point is the identity contribute one and are skipped.
pub fn multi_miller_loop(pairs: &[(&BN254G1Prepared, &BN254G2Prepared)]) -> BN254Fq12 {
    let pairs: Vec<_> = pairs
        .iter()
        .filter(|(p, q)| !p.is_zero() && !q.is_zero())
        .collect();
    let mut lines: Vec<_> = pairs.iter().map(|(_, q)| q.coeffs.iter()).collect();

    let mut apply_lines = |f: &mut BN254Fq12| {
        for ((p, _), line) in pairs.iter().zip(lines.iter_mut()) {
            if let Some(coeffs) = line.next() {
                ell(f, coeffs, p);
            }
        }
    };

    let mut f = BN254Fq12::one();
    for bit in ate_loop_bits() {
        f = f.square();
        apply_lines(&mut f);
        if bit {
            apply_lines(&mut f);
        }
    }
    apply_lines(&mut f);
    apply_lines(&mut f);
    f
}

/// The Miller loop of a single pair.
pub fn miller_loop(p: &BN254G1Prepared, q: &BN254G2Prepared) -> BN254Fq12 {
    multi_miller_loop(&[(p, q)])
}

/// The product of two Miller loops computed in one pass.
pub fn double_miller_loop(
    p1: &BN254G1Prepared,
    q1: &BN254G2Prepared,
    p2: &BN254G1Prepared,
    q2: &BN254G2Prepared,
) -> BN254Fq12 {
    multi_miller_loop(&[(p1, q1), (p2, q2)])
}

/// `exp_by_neg_z(f) = f^(-z)` for `f` in the cyclotomic subgroup.
fn exp_by_neg_z(f: &BN254Fq12) -> BN254Fq12 {
    f.cyclotomic_exp(FINAL_EXPONENT_Z).unitary_inverse()
}

/// Raise a Miller loop output to `(q^12 - 1) / r` times a fixed cofactor.
/// The zero element maps to zero.
pub fn final_exponentiation(f: &BN254Fq12) -> BN254Fq12 {
    // Easy part: f^((q^6 - 1)(q^2 + 1)).
    let f_inv = match f.inverse() {
        Ok(f_inv) => f_inv,
        Err(_) => return BN254Fq12::zero(),
    };
    let c = f.unitary_inverse() * f_inv;
    let elt = c.frobenius_map(2) * c;

    // Hard part, as the addition chain in powers of -z.
    let a = exp_by_neg_z(&elt);
    let b = a.cyclotomic_square();
    let c = b.cyclotomic_square();
    let d = c * b;
    let e = exp_by_neg_z(&d);
    let f = e.cyclotomic_square();
    let g = exp_by_neg_z(&f);
    let h = d.unitary_inverse();
    let i = g.unitary_inverse();
    let j = i * e;
    let k = j * h;
    let l = k * b;
    let m = k * e;
    let n = m * elt;
    let o = l.frobenius_map(1);
    let p = o * n;
    let q = k.frobenius_map(2);
    let r = q * p;
    let s = elt.unitary_inverse();
    let t = s * l;
    let u = t.frobenius_map(3);
    u * r
}

/// The reduced optimal ate pairing.
pub fn reduced_pairing(p: &BN254G1, q: &BN254G2) -> BN254Gt {
    let f = miller_loop(&precompute_g1(p), &precompute_g2(q));
    BN254Gt(final_exponentiation(&f))
}

/// The pairing engine for BN254.
pub struct BN254PairingEngine;

impl Pairing for BN254PairingEngine {
    type ScalarField = BN254Scalar;
    type G1 = BN254G1;
    type G2 = BN254G2;
    type Gt = BN254Gt;

    #[inline]
    fn pairing(a: &Self::G1, b: &Self::G2) -> Self::Gt {
        reduced_pairing(a, b)
    }

    fn product_of_pairings(a: &[Self::G1], b: &[Self::G2]) -> Self::Gt {
        let g1: Vec<_> = a.iter().map(precompute_g1).collect();
        let g2: Vec<_> = b.iter().map(precompute_g2).collect();
        let pairs: Vec<_> = g1.iter().zip(g2.iter()).collect();
        BN254Gt(final_exponentiation(&multi_miller_loop(&pairs)))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn base_of_gt_is_the_pairing_of_the_bases() {
        let e = BN254PairingEngine::pairing(&BN254G1::get_base(), &BN254G2::get_base());
        assert_eq!(e, BN254Gt::get_base());
    }

    #[test]
    fn bilinearity() {
        let mut prng = test_rng();
        let s1 = BN254Scalar::random(&mut prng);
        let s2 = BN254Scalar::random(&mut prng);
        let g1 = BN254G1::get_base();
        let g2 = BN254G2::get_base();
        let base = BN254Gt::get_base();

        let e = BN254PairingEngine::pairing(&g1.mul(&s1), &g2.mul(&s2));
        assert_eq!(e, base.mul(&(s1 * s2)));
        assert_eq!(e, BN254PairingEngine::pairing(&g1.mul(&(s1 * s2)), &g2));
        assert_eq!(e, BN254PairingEngine::pairing(&g1, &g2.mul(&(s1 * s2))));
        assert!(!e.is_identity());
    }

    #[test]
    fn identity_pairs() {
        let mut prng = test_rng();
        let p = BN254G1::random(&mut prng);
        let q = BN254G2::random(&mut prng);
        let one = BN254Gt::get_identity();
        assert_eq!(
            BN254PairingEngine::pairing(&BN254G1::get_identity(), &q),
            one
        );
        assert_eq!(
            BN254PairingEngine::pairing(&p, &BN254G2::get_identity()),
            one
        );
        assert!(precompute_g2(&BN254G2::get_identity()).is_zero());
        assert!(precompute_g1(&BN254G1::get_identity()).is_zero());
    }

    #[test]
    fn multi_miller_loops() {
        let mut prng = test_rng();
        let p1 = precompute_g1(&BN254G1::random(&mut prng));
        let q1 = precompute_g2(&BN254G2::random(&mut prng));
        let p2 = precompute_g1(&BN254G1::random(&mut prng));
        let q2 = precompute_g2(&BN254G2::random(&mut prng));
        assert_eq!(
            double_miller_loop(&p1, &q1, &p2, &q2),
            miller_loop(&p1, &q1) * miller_loop(&p2, &q2)
        );
        // One doubling line per bit, one addition line per set bit, and
        // the two Frobenius lines.
        let set_bits = ate_loop_bits().filter(|b| *b).count();
        assert_eq!(q1.coeffs.len(), ate_loop_bits().count() + set_bits + 2);
    }

    #[test]
    fn product_of_pairings_cancels() {
        let mut prng = test_rng();
        let p = BN254G1::random(&mut prng);
        let q = BN254G2::random(&mut prng);
        let s = BN254Scalar::random(&mut prng);
        // e(sP, Q) * e(-P, sQ) = 1
        let res = BN254PairingEngine::product_of_pairings(
            &[p.mul(&s), p.neg()],
            &[q, q.mul(&s)],
        );
        assert!(res.is_identity());
    }

    #[test]
    fn final_exponentiation_of_zero() {
        assert!(final_exponentiation(&BN254Fq12::zero()).is_zero());
        assert!(final_exponentiation(&BN254Fq12::one()).is_one());
    }

    #[test]
    fn loop_count() {
        assert_eq!(ATE_LOOP_COUNT, 6 * FINAL_EXPONENT_Z as u128 + 2);
    }
}
