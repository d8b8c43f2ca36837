use crate::bn254::{BN254Fq2, FQ2_NONRESIDUE};
use crate::prelude::*;
use ark_std::fmt;

/// The cubic extension `Fq2[v] / (v^3 - xi)`.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct BN254Fq6 {
    /// The constant coefficient.
    pub c0: BN254Fq2,
    /// The coefficient of `v`.
    pub c1: BN254Fq2,
    /// The coefficient of `v^2`.
    pub c2: BN254Fq2,
}

/// `xi^((q^i - 1) / 3)` for `i = 0..6`.
pub(crate) const FROBENIUS_COEFF_FQ6_C1: [BN254Fq2; 6] = [
    fq2!("1", "0"),
    fq2!(
        "21575463638280843010398324269430826099269044274347216827212613867836435027261",
        "10307601595873709700152284273816112264069230130616436755625194854815875713954"
    ),
    fq2!(
        "21888242871839275220042445260109153167277707414472061641714758635765020556616",
        "0"
    ),
    fq2!(
        "3772000881919853776433695186713858239009073593817195771773381919316419345261",
        "2236595495967245188281701248203181795121068902605861227855261137820944008926"
    ),
    fq2!("2203960485148121921418603742825762020974279258880205651966", "0"),
    fq2!(
        "18429021223477853657660792034369865839114504446431234726392080002137598044644",
        "9344045779998320333812420223237981029506012124075525679208581902008406485703"
    ),
];

/// `xi^((2q^i - 2) / 3)` for `i = 0..6`.
pub(crate) const FROBENIUS_COEFF_FQ6_C2: [BN254Fq2; 6] = [
    fq2!("1", "0"),
    fq2!(
        "2581911344467009335267311115468803099551665605076196740867805258568234346338",
        "19937756971775647987995932169929341994314640652964949448313374472400716661030"
    ),
    fq2!("2203960485148121921418603742825762020974279258880205651966", "0"),
    fq2!(
        "5324479202449903542726783395506214481928257762400643279780343368557297135718",
        "16208900380737693084919495127334387981393726419856888799917914180988844123039"
    ),
    fq2!(
        "21888242871839275220042445260109153167277707414472061641714758635765020556616",
        "0"
    ),
    fq2!(
        "13981852324922362344252311234282257507216387789820983642040889267519694726527",
        "7629828391165209371577384193250820201684255241773809077146787135900891633097"
    ),
];

impl BN254Fq6 {
    /// Build an element from its three coefficients.
    #[inline]
    pub const fn new(c0: BN254Fq2, c1: BN254Fq2, c2: BN254Fq2) -> Self {
        Self { c0, c1, c2 }
    }

    /// Multiply by `v`, i.e. `(c0, c1, c2) -> (xi c2, c0, c1)`.
    #[inline]
    pub fn mul_by_v(&self) -> Self {
        Self::new(self.c2.mul_by_nonresidue(), self.c0, self.c1)
    }

    /// Multiply every coefficient by an element of `Fq2`.
    #[inline]
    pub fn mul_by_fq2(&self, other: &BN254Fq2) -> Self {
        Self::new(self.c0 * other, self.c1 * other, self.c2 * other)
    }

    pub(crate) fn is_zero_inner(&self) -> bool {
        self.c0.is_zero() && self.c1.is_zero() && self.c2.is_zero()
    }

    pub(crate) fn add_inner(&self, other: &Self) -> Self {
        Self::new(self.c0 + other.c0, self.c1 + other.c1, self.c2 + other.c2)
    }

    pub(crate) fn sub_inner(&self, other: &Self) -> Self {
        Self::new(self.c0 - other.c0, self.c1 - other.c1, self.c2 - other.c2)
    }

    pub(crate) fn neg_inner(&self) -> Self {
        Self::new(-self.c0, -self.c1, -self.c2)
    }

    pub(crate) fn mul_inner(&self, other: &Self) -> Self {
        let (a0, a1, a2) = (self.c0, self.c1, self.c2);
        let (b0, b1, b2) = (other.c0, other.c1, other.c2);
        let v0 = a0 * b0;
        let v1 = a1 * b1;
        let v2 = a2 * b2;

        let c0 = v0 + ((a1 + a2) * (b1 + b2) - v1 - v2).mul_by_nonresidue();
        let c1 = (a0 + a1) * (b0 + b1) - v0 - v1 + v2.mul_by_nonresidue();
        let c2 = (a0 + a2) * (b0 + b2) - v0 - v2 + v1;
        Self::new(c0, c1, c2)
    }
}

impl fmt::Debug for BN254Fq6 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fq6({:?}, {:?}, {:?})", self.c0, self.c1, self.c2)
    }
}

impl_extension_field_ops!(
    BN254Fq6,
    BN254Fq6::new(BN254Fq2::one(), BN254Fq2::zero(), BN254Fq2::zero())
);

impl UniformRand for BN254Fq6 {
    fn rand<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(
            BN254Fq2::rand(rng),
            BN254Fq2::rand(rng),
            BN254Fq2::rand(rng),
        )
    }
}

impl Field for BN254Fq6 {
    #[inline]
    fn double(&self) -> Self {
        Self::new(self.c0.double(), self.c1.double(), self.c2.double())
    }

    fn square(&self) -> Self {
        // Chung-Hasan SQR2
        let (a0, a1, a2) = (self.c0, self.c1, self.c2);
        let s0 = a0.square();
        let s1 = (a0 * a1).double();
        let s2 = (a0 - a1 + a2).square();
        let s3 = (a1 * a2).double();
        let s4 = a2.square();

        let c0 = s0 + s3.mul_by_nonresidue();
        let c1 = s1 + s4.mul_by_nonresidue();
        let c2 = s1 + s2 + s3 - s0 - s4;
        Self::new(c0, c1, c2)
    }

    fn inverse(&self) -> Result<Self> {
        let (a0, a1, a2) = (self.c0, self.c1, self.c2);
        let t0 = a0.square();
        let t1 = a1.square();
        let t2 = a2.square();
        let t3 = a0 * a1;
        let t4 = a0 * a2;
        let t5 = a1 * a2;

        let c0 = t0 - t5.mul_by_nonresidue();
        let c1 = t2.mul_by_nonresidue() - t3;
        let c2 = t1 - t4;
        let t6 = (a0 * c0 + (a2 * c1 + a1 * c2).mul_by_nonresidue()).inverse()?;
        Ok(Self::new(c0 * t6, c1 * t6, c2 * t6))
    }

    fn frobenius_map(&self, power: usize) -> Self {
        Self::new(
            self.c0.frobenius_map(power),
            self.c1.frobenius_map(power) * FROBENIUS_COEFF_FQ6_C1[power % 6],
            self.c2.frobenius_map(power) * FROBENIUS_COEFF_FQ6_C2[power % 6],
        )
    }
}
