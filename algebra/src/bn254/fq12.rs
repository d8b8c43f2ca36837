use crate::bn254::{BN254Fq2, BN254Fq6};
use crate::prelude::*;
use ark_std::fmt;

/// The quadratic extension `Fq6[w] / (w^2 - v)`, home of the pairing values.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct BN254Fq12 {
    /// The constant coefficient.
    pub c0: BN254Fq6,
    /// The coefficient of `w`.
    pub c1: BN254Fq6,
}

/// `xi^((q^i - 1) / 6)` for `i = 0..12`.
pub(crate) const FROBENIUS_COEFF_FQ12_C1: [BN254Fq2; 12] = [
    fq2!("1", "0"),
    fq2!(
        "8376118865763821496583973867626364092589906065868298776909617916018768340080",
        "16469823323077808223889137241176536799009286646108169935659301613961712198316"
    ),
    fq2!(
        "21888242871839275220042445260109153167277707414472061641714758635765020556617",
        "0"
    ),
    fq2!(
        "11697423496358154304825782922584725312912383441159505038794027105778954184319",
        "303847389135065887422783454877609941456349188919719272345083954437860409601"
    ),
    fq2!(
        "21888242871839275220042445260109153167277707414472061641714758635765020556616",
        "0"
    ),
    fq2!(
        "3321304630594332808241809054958361220322477375291206261884409189760185844239",
        "5722266937896532885780051958958348231143373700109372999374820235121374419868"
    ),
    fq2!(
        "21888242871839275222246405745257275088696311157297823662689037894645226208582",
        "0"
    ),
    fq2!(
        "13512124006075453725662431877630910996106405091429524885779419978626457868503",
        "5418419548761466998357268504080738289687024511189653727029736280683514010267"
    ),
    fq2!("2203960485148121921418603742825762020974279258880205651966", "0"),
    fq2!(
        "10190819375481120917420622822672549775783927716138318623895010788866272024264",
        "21584395482704209334823622290379665147239961968378104390343953940207365798982"
    ),
    fq2!("2203960485148121921418603742825762020974279258880205651967", "0"),
    fq2!(
        "18566938241244942414004596690298913868373833782006617400804628704885040364344",
        "16165975933942742336466353786298926857552937457188450663314217659523851788715"
    ),
];

impl BN254Fq12 {
    /// Build an element from its two coefficients.
    #[inline]
    pub const fn new(c0: BN254Fq6, c1: BN254Fq6) -> Self {
        Self { c0, c1 }
    }

    /// Return `c0 - c1 w`, which is the inverse on the cyclotomic subgroup.
    #[inline]
    pub fn unitary_inverse(&self) -> Self {
        Self::new(self.c0, -self.c1)
    }

    /// Multiply by a sparse element `(ell_0, 0, ell_vv) + (0, ell_vw, 0) w`,
    /// the shape of a line function evaluated at a G1 point.
    pub fn mul_by_024(&self, ell_0: &BN254Fq2, ell_vw: &BN254Fq2, ell_vv: &BN254Fq2) -> Self {
        let (z0, z1, z2) = (self.c0.c0, self.c0.c1, self.c0.c2);
        let (z3, z4, z5) = (self.c1.c0, self.c1.c1, self.c1.c2);
        let (x0, x2, x4) = (*ell_0, *ell_vv, *ell_vw);

        let c00 = z0 * x0 + (z1 * x2 + z4 * x4).mul_by_nonresidue();
        let c01 = z1 * x0 + (z2 * x2 + z5 * x4).mul_by_nonresidue();
        let c02 = z0 * x2 + z2 * x0 + z3 * x4;
        let c10 = z3 * x0 + (z2 * x4 + z4 * x2).mul_by_nonresidue();
        let c11 = z0 * x4 + z4 * x0 + (z5 * x2).mul_by_nonresidue();
        let c12 = z1 * x4 + z3 * x2 + z5 * x0;

        Self::new(
            BN254Fq6::new(c00, c01, c02),
            BN254Fq6::new(c10, c11, c12),
        )
    }

    /// Squaring for elements of the cyclotomic subgroup (Granger-Scott).
    pub fn cyclotomic_square(&self) -> Self {
        let z0 = self.c0.c0;
        let z4 = self.c0.c1;
        let z3 = self.c0.c2;
        let z2 = self.c1.c0;
        let z1 = self.c1.c1;
        let z5 = self.c1.c2;

        // (x + y s)^2 in Fq4 = Fq2[s] / (s^2 - xi)
        let fq4_square = |x: BN254Fq2, y: BN254Fq2| {
            let tmp = x * y;
            let re = (x + y) * (x + y.mul_by_nonresidue()) - tmp - tmp.mul_by_nonresidue();
            (re, tmp.double())
        };
        let three_minus_two = |t: BN254Fq2, z: BN254Fq2| t.double() + t - z.double();
        let three_plus_two = |t: BN254Fq2, z: BN254Fq2| t.double() + t + z.double();

        let (t0, t1) = fq4_square(z0, z1);
        let (t2, t3) = fq4_square(z2, z3);
        let (t4, t5) = fq4_square(z4, z5);

        let z0 = three_minus_two(t0, z0);
        let z1 = three_plus_two(t1, z1);
        let z2 = three_plus_two(t5.mul_by_nonresidue(), z2);
        let z3 = three_minus_two(t4, z3);
        let z4 = three_minus_two(t2, z4);
        let z5 = three_plus_two(t3, z5);

        Self::new(BN254Fq6::new(z0, z4, z3), BN254Fq6::new(z2, z1, z5))
    }

    /// Exponentiation for elements of the cyclotomic subgroup, using the
    /// non-adjacent form of the exponent so that negative digits cost a conjugation.
    pub fn cyclotomic_exp(&self, exponent: u64) -> Self {
        let naf = non_adjacent_form(exponent);
        let self_inverse = self.unitary_inverse();
        let mut res = Self::one();
        let mut found_nonzero = false;
        for digit in naf.iter().rev() {
            if found_nonzero {
                res = res.cyclotomic_square();
            }
            if *digit != 0 {
                found_nonzero = true;
                if *digit > 0 {
                    res *= self;
                } else {
                    res *= &self_inverse;
                }
            }
        }
        res
    }

    pub(crate) fn is_zero_inner(&self) -> bool {
        self.c0.is_zero() && self.c1.is_zero()
    }

    pub(crate) fn add_inner(&self, other: &Self) -> Self {
        Self::new(self.c0 + other.c0, self.c1 + other.c1)
    }

    pub(crate) fn sub_inner(&self, other: &Self) -> Self {
        Self::new(self.c0 - other.c0, self.c1 - other.c1)
    }

    pub(crate) fn neg_inner(&self) -> Self {
        Self::new(-self.c0, -self.c1)
    }

    pub(crate) fn mul_inner(&self, other: &Self) -> Self {
        let aa = self.c0 * other.c0;
        let bb = self.c1 * other.c1;
        let c0 = aa + bb.mul_by_v();
        let c1 = (self.c0 + self.c1) * (other.c0 + other.c1) - aa - bb;
        Self::new(c0, c1)
    }
}

/// Digits in `{-1, 0, 1}`, least significant first.
fn non_adjacent_form(mut e: u64) -> Vec<i8> {
    let mut res = Vec::with_capacity(65);
    let mut carry = false;
    // Work on e + carry without overflowing u64.
    while e > 0 || carry {
        let bit = (e & 1 == 1) ^ carry;
        let next = e >> 1;
        if bit {
            // z = 2 - ((e + carry) mod 4)
            let second = (next & 1 == 1) ^ (carry && e & 1 == 1);
            if second {
                res.push(-1);
                carry = true;
            } else {
                res.push(1);
                carry = false;
            }
        } else {
            res.push(0);
            carry = carry && e & 1 == 1;
        }
        e = next;
    }
    res
}

impl fmt::Debug for BN254Fq12 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fq12({:?}, {:?})", self.c0, self.c1)
    }
}

impl_extension_field_ops!(BN254Fq12, BN254Fq12::new(BN254Fq6::one(), BN254Fq6::zero()));

impl UniformRand for BN254Fq12 {
    fn rand<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(BN254Fq6::rand(rng), BN254Fq6::rand(rng))
    }
}

impl Field for BN254Fq12 {
    #[inline]
    fn double(&self) -> Self {
        Self::new(self.c0.double(), self.c1.double())
    }

    fn square(&self) -> Self {
        let ab = self.c0 * self.c1;
        let c0 = (self.c0 + self.c1) * (self.c0 + self.c1.mul_by_v()) - ab - ab.mul_by_v();
        Self::new(c0, ab.double())
    }

    fn inverse(&self) -> Result<Self> {
        let t = (self.c0.square() - self.c1.square().mul_by_v()).inverse()?;
        Ok(Self::new(self.c0 * t, -(self.c1 * t)))
    }

    fn frobenius_map(&self, power: usize) -> Self {
        let c1 = self.c1.frobenius_map(power);
        Self::new(
            self.c0.frobenius_map(power),
            c1.mul_by_fq2(&FROBENIUS_COEFF_FQ12_C1[power % 12]),
        )
    }
}

#[cfg(test)]
mod test {
    use super::{non_adjacent_form, BN254Fq12};
    use crate::bn254::{BN254Fq, BN254Fq2, BN254Fq6};
    use crate::prelude::*;

    fn random_cyclotomic<R: RngCore>(prng: &mut R) -> BN254Fq12 {
        let a = BN254Fq12::rand(prng);
        // a^((q^6 - 1)(q^2 + 1)) lies in the cyclotomic subgroup.
        let t = a.unitary_inverse() * a.inverse().unwrap();
        t.frobenius_map(2) * t
    }

    #[test]
    fn field_axioms() {
        let mut prng = test_rng();
        for _ in 0..5 {
            let a = BN254Fq12::rand(&mut prng);
            let b = BN254Fq12::rand(&mut prng);
            let c = BN254Fq12::rand(&mut prng);
            assert_eq!(a * (b + c), a * b + a * c);
            assert_eq!((a * b) * c, a * (b * c));
            assert_eq!(a.square(), a * a);
            assert!((a * a.inverse().unwrap()).is_one());
        }
        assert_eq!(BN254Fq12::zero().inverse(), Err(AlgebraError::ZeroInversion));
    }

    #[test]
    fn frobenius_is_qth_power() {
        let mut prng = test_rng();
        let a = BN254Fq12::rand(&mut prng);
        let q = BN254Fq::MODULUS;
        let mut expected = a;
        for power in 1..4 {
            expected = expected.pow(&q.0);
            assert_eq!(a.frobenius_map(power), expected);
        }
        assert_eq!(a.frobenius_map(12), a);
    }

    #[test]
    fn sparse_multiplication() {
        let mut prng = test_rng();
        let a = BN254Fq12::rand(&mut prng);
        let ell_0 = BN254Fq2::rand(&mut prng);
        let ell_vw = BN254Fq2::rand(&mut prng);
        let ell_vv = BN254Fq2::rand(&mut prng);
        let sparse = BN254Fq12::new(
            BN254Fq6::new(ell_0, BN254Fq2::zero(), ell_vv),
            BN254Fq6::new(BN254Fq2::zero(), ell_vw, BN254Fq2::zero()),
        );
        assert_eq!(a.mul_by_024(&ell_0, &ell_vw, &ell_vv), a * sparse);
    }

    #[test]
    fn cyclotomic_operations() {
        let mut prng = test_rng();
        let a = random_cyclotomic(&mut prng);
        assert_eq!(a.cyclotomic_square(), a.square());
        assert!((a * a.unitary_inverse()).is_one());
        for e in [0u64, 1, 2, 3, 7, 12345, 4965661367192848881, u64::MAX] {
            assert_eq!(a.cyclotomic_exp(e), a.pow(&[e]));
        }
    }

    #[test]
    fn naf_digits() {
        for e in [0u64, 1, 3, 7, 12345, 4965661367192848881, u64::MAX] {
            let naf = non_adjacent_form(e);
            let mut acc: i128 = 0;
            for d in naf.iter().rev() {
                acc = 2 * acc + *d as i128;
            }
            assert_eq!(acc, e as i128);
            assert!(naf.windows(2).all(|w| w[0] == 0 || w[1] == 0));
        }
    }
}
