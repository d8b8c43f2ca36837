use crate::bigint::{adc, mac, sbb, Bigint};
use crate::prelude::*;
use crate::traits::LegendreSymbol;
use ark_std::{
    cmp::Ordering,
    fmt::{self, Debug, Display},
    hash::{Hash, Hasher},
    str::FromStr,
};
use num_bigint::BigUint;

/// The number of limbs of every prime field in this crate.
pub const FP_LIMBS: usize = 4;

/// Parameters of a prime field `Z/pZ` with a 4-limb modulus.
///
/// Only `MODULUS`, `GENERATOR` and `NQR` have to be provided. The Montgomery
/// constants and the 2-adic decomposition `p - 1 = 2^S * T` are derived at
/// compile time.
pub trait FpParameters: 'static + Send + Sync + Sized {
    /// The prime modulus `p`.
    const MODULUS: Bigint<FP_LIMBS>;
    /// A multiplicative generator of the field, canonical form.
    const GENERATOR: Bigint<FP_LIMBS>;
    /// A quadratic non-residue, canonical form.
    const NQR: Bigint<FP_LIMBS>;

    /// The number of significant bits of `p`.
    const NUM_BITS: u32 = Self::MODULUS.num_bits();
    /// `-p^{-1} mod 2^64`.
    const INV: u64 = compute_inv(&Self::MODULUS);
    /// `2^256 mod p`, the Montgomery form of one.
    const R: Bigint<FP_LIMBS> = compute_r(&Self::MODULUS);
    /// `2^512 mod p`.
    const R2: Bigint<FP_LIMBS> = compute_r2(&Self::MODULUS);
    /// `(p - 1) / 2`.
    const EULER: Bigint<FP_LIMBS> = Self::MODULUS.const_sub(&Bigint::from_u64(1)).const_shr1();
    /// The 2-adicity of `p - 1`.
    const S: u32 = two_adicity(&Self::MODULUS);
    /// The odd part of `p - 1`.
    const T: Bigint<FP_LIMBS> = odd_part(&Self::MODULUS);
    /// `(T - 1) / 2`.
    const T_MINUS_ONE_OVER_TWO: Bigint<FP_LIMBS> = Self::T.const_shr1();
}

const fn compute_inv(modulus: &Bigint<FP_LIMBS>) -> u64 {
    let mut inv = 1u64;
    let mut i = 0;
    while i < 63 {
        inv = inv.wrapping_mul(inv);
        inv = inv.wrapping_mul(modulus.0[0]);
        i += 1;
    }
    inv.wrapping_neg()
}

const fn double_mod(a: &[u64; FP_LIMBS], p: &[u64; FP_LIMBS]) -> [u64; FP_LIMBS] {
    let mut res = [0u64; FP_LIMBS];
    let mut carry = 0u64;
    let mut i = 0;
    while i < FP_LIMBS {
        res[i] = (a[i] << 1) | carry;
        carry = a[i] >> 63;
        i += 1;
    }
    if carry != 0 || !lt(&res, p) {
        res = sub_wrapping(&res, p);
    }
    res
}

const fn compute_r(modulus: &Bigint<FP_LIMBS>) -> Bigint<FP_LIMBS> {
    let mut r = [0u64; FP_LIMBS];
    r[0] = 1;
    let mut i = 0;
    while i < 64 * FP_LIMBS {
        r = double_mod(&r, &modulus.0);
        i += 1;
    }
    Bigint(r)
}

const fn compute_r2(modulus: &Bigint<FP_LIMBS>) -> Bigint<FP_LIMBS> {
    let mut r = compute_r(modulus).0;
    let mut i = 0;
    while i < 64 * FP_LIMBS {
        r = double_mod(&r, &modulus.0);
        i += 1;
    }
    Bigint(r)
}

const fn two_adicity(modulus: &Bigint<FP_LIMBS>) -> u32 {
    let mut t = modulus.const_sub(&Bigint::from_u64(1));
    let mut s = 0;
    while t.0[0] & 1 == 0 {
        t = t.const_shr1();
        s += 1;
    }
    s
}

const fn odd_part(modulus: &Bigint<FP_LIMBS>) -> Bigint<FP_LIMBS> {
    let mut t = modulus.const_sub(&Bigint::from_u64(1));
    while t.0[0] & 1 == 0 {
        t = t.const_shr1();
    }
    t
}

const fn lt(a: &[u64; FP_LIMBS], b: &[u64; FP_LIMBS]) -> bool {
    let mut i = FP_LIMBS;
    while i > 0 {
        i -= 1;
        if a[i] != b[i] {
            return a[i] < b[i];
        }
    }
    false
}

const fn sub_wrapping(a: &[u64; FP_LIMBS], b: &[u64; FP_LIMBS]) -> [u64; FP_LIMBS] {
    let mut res = [0u64; FP_LIMBS];
    let mut borrow = 0u64;
    let mut i = 0;
    while i < FP_LIMBS {
        let (d, br) = sbb(a[i], b[i], borrow);
        res[i] = d;
        borrow = br;
        i += 1;
    }
    res
}

/// Schoolbook product of two 4-limb values.
pub const fn mul_wide(a: &[u64; FP_LIMBS], b: &[u64; FP_LIMBS]) -> [u64; 2 * FP_LIMBS] {
    let mut t = [0u64; 2 * FP_LIMBS];
    let mut i = 0;
    while i < FP_LIMBS {
        let mut carry = 0u64;
        let mut j = 0;
        while j < FP_LIMBS {
            let (lo, hi) = mac(t[i + j], a[i], b[j], carry);
            t[i + j] = lo;
            carry = hi;
            j += 1;
        }
        t[i + FP_LIMBS] = carry;
        i += 1;
    }
    t
}

/// Montgomery reduction: returns `t * R^{-1} mod p`, in `[0, 2p)` whenever `t < p * R`
/// and below `2^256` for every input.
pub const fn montgomery_reduce(
    t: &[u64; 2 * FP_LIMBS],
    p: &[u64; FP_LIMBS],
    inv: u64,
) -> [u64; FP_LIMBS] {
    let mut r = *t;
    let mut carry2 = 0u64;
    let mut i = 0;
    while i < FP_LIMBS {
        let k = r[i].wrapping_mul(inv);
        let mut carry = 0u64;
        let mut j = 0;
        while j < FP_LIMBS {
            let (lo, hi) = mac(r[i + j], k, p[j], carry);
            r[i + j] = lo;
            carry = hi;
            j += 1;
        }
        let (sum, c) = adc(r[i + FP_LIMBS], carry, carry2);
        r[i + FP_LIMBS] = sum;
        carry2 = c;
        i += 1;
    }
    let res = [r[4], r[5], r[6], r[7]];
    if carry2 != 0 {
        sub_wrapping(&res, p)
    } else {
        res
    }
}

/// Subtract `p` once if `a >= p`.
#[inline]
pub const fn csubq(a: &[u64; FP_LIMBS], p: &[u64; FP_LIMBS]) -> [u64; FP_LIMBS] {
    if lt(a, p) {
        *a
    } else {
        sub_wrapping(a, p)
    }
}

/// Bring any 4-limb value into `[0, p)`. For BN254 moduli `2^256 < 6p`, so the
/// loop runs at most five times.
pub const fn freeze(a: &[u64; FP_LIMBS], p: &[u64; FP_LIMBS]) -> [u64; FP_LIMBS] {
    let mut res = *a;
    while !lt(&res, p) {
        res = sub_wrapping(&res, p);
    }
    res
}

/// Reduce an arbitrary double-width value to the canonical representative of
/// `t * R^{-1} mod p`.
pub const fn reduce(
    t: &[u64; 2 * FP_LIMBS],
    p: &[u64; FP_LIMBS],
    inv: u64,
) -> [u64; FP_LIMBS] {
    freeze(&montgomery_reduce(t, p, inv), p)
}

/// Montgomery multiplication of two canonical values.
#[inline]
pub const fn mont_mul(
    a: &[u64; FP_LIMBS],
    b: &[u64; FP_LIMBS],
    p: &[u64; FP_LIMBS],
    inv: u64,
) -> [u64; FP_LIMBS] {
    csubq(&montgomery_reduce(&mul_wide(a, b), p, inv), p)
}

/// An element of the prime field described by `P`, kept in Montgomery form.
pub struct Fp<P: FpParameters>(pub(crate) Bigint<FP_LIMBS>, PhantomData<P>);

impl<P: FpParameters> Fp<P> {
    /// The modulus as a big integer.
    pub const MODULUS: Bigint<FP_LIMBS> = P::MODULUS;

    /// The additive identity.
    #[inline]
    pub const fn zero() -> Self {
        Self(Bigint([0u64; FP_LIMBS]), PhantomData)
    }

    /// The multiplicative identity.
    #[inline]
    pub const fn one() -> Self {
        Self(P::R, PhantomData)
    }

    /// Convert a value already known to be below the modulus.
    const fn from_canonical(value: Bigint<FP_LIMBS>) -> Self {
        Self(
            Bigint(mont_mul(&value.0, &P::R2.0, &P::MODULUS.0, P::INV)),
            PhantomData,
        )
    }

    /// Build a constant from its decimal representation. Panics during const
    /// evaluation if the value is not below the modulus.
    pub const fn from_decimal(s: &str) -> Self {
        let value = Bigint::<FP_LIMBS>::from_decimal(s);
        assert!(
            lt(&value.0, &P::MODULUS.0),
            "field constant is not below the modulus"
        );
        Self::from_canonical(value)
    }

    /// Build an element from its canonical representative.
    pub fn from_bigint(value: Bigint<FP_LIMBS>) -> Result<Self> {
        let value = value.limit(&P::MODULUS)?;
        Ok(Self::from_canonical(value))
    }

    /// Build an element from a value of any size reduced modulo `p`.
    pub fn from_bigint_mod_order(value: Bigint<FP_LIMBS>) -> Self {
        Self::from_canonical(Bigint(freeze(&value.0, &P::MODULUS.0)))
    }

    /// Build an element from 64 little-endian bytes reduced modulo `p`.
    pub fn from_wide_bytes_le(bytes: &[u8; 64]) -> Self {
        let mut wide = [0u64; 2 * FP_LIMBS];
        for (limb, chunk) in wide.iter_mut().zip(bytes.chunks(8)) {
            *limb = u8_le_slice_to_u64(chunk);
        }
        // t * R^{-1} * R2 * R^{-1} = t, then into Montgomery form.
        let t = reduce(&wide, &P::MODULUS.0, P::INV);
        let t = mont_mul(&t, &P::R2.0, &P::MODULUS.0, P::INV);
        Self::from_canonical(Bigint(t))
    }

    /// Return the canonical representative in `[0, p)`.
    #[inline]
    pub fn into_bigint(&self) -> Bigint<FP_LIMBS> {
        let mut wide = [0u64; 2 * FP_LIMBS];
        wide[..FP_LIMBS].copy_from_slice(&self.0 .0);
        Bigint(reduce(&wide, &P::MODULUS.0, P::INV))
    }

    /// Return the internal Montgomery representation.
    #[inline]
    pub fn as_montgomery(&self) -> &Bigint<FP_LIMBS> {
        &self.0
    }

    /// Return `g^T`, a primitive `2^S`-th root of unity.
    pub fn two_adic_root_of_unity() -> Self {
        Self::from_canonical(P::GENERATOR).pow(&P::T.0)
    }

    /// The 2-adicity of the multiplicative group.
    pub const fn two_adicity() -> u32 {
        P::S
    }

    /// Return true if the canonical representative is odd.
    pub fn is_odd(&self) -> bool {
        !self.into_bigint().is_even()
    }

    fn add_inner(&self, other: &Self) -> Self {
        let mut res = self.0;
        let carry = res.add_nocarry_assign(&other.0);
        if carry || res >= P::MODULUS {
            res.sub_noborrow_assign(&P::MODULUS);
        }
        Self(res, PhantomData)
    }

    fn sub_inner(&self, other: &Self) -> Self {
        let mut res = self.0;
        if res.sub_noborrow_assign(&other.0) {
            res.add_nocarry_assign(&P::MODULUS);
        }
        Self(res, PhantomData)
    }

    fn mul_inner(&self, other: &Self) -> Self {
        Self(
            Bigint(mont_mul(&self.0 .0, &other.0 .0, &P::MODULUS.0, P::INV)),
            PhantomData,
        )
    }

    fn neg_inner(&self) -> Self {
        if self.0.is_zero() {
            *self
        } else {
            let mut res = P::MODULUS;
            res.sub_noborrow_assign(&self.0);
            Self(res, PhantomData)
        }
    }

    /// Compute the inverse by the binary extended Euclidean algorithm directly
    /// on the Montgomery representation.
    fn inverse_inner(&self) -> Result<Self> {
        if self.0.is_zero() {
            return Err(AlgebraError::ZeroInversion);
        }
        let one = Bigint::<FP_LIMBS>::from_u64(1);
        let modulus = P::MODULUS;
        let mut u = self.0;
        let mut v = modulus;
        let mut b = P::R2;
        let mut c = Bigint::<FP_LIMBS>::zero();

        while u != one && v != one {
            while u.is_even() {
                u.shr1_assign();
                if b.is_even() {
                    b.shr1_assign();
                } else {
                    let carry = b.add_nocarry_assign(&modulus);
                    b.shr1_assign();
                    if carry {
                        b.0[FP_LIMBS - 1] |= 1 << 63;
                    }
                }
            }
            while v.is_even() {
                v.shr1_assign();
                if c.is_even() {
                    c.shr1_assign();
                } else {
                    let carry = c.add_nocarry_assign(&modulus);
                    c.shr1_assign();
                    if carry {
                        c.0[FP_LIMBS - 1] |= 1 << 63;
                    }
                }
            }
            if v < u {
                u.sub_noborrow_assign(&v);
                b = Self(b, PhantomData).sub_inner(&Self(c, PhantomData)).0;
            } else {
                v.sub_noborrow_assign(&u);
                c = Self(c, PhantomData).sub_inner(&Self(b, PhantomData)).0;
            }
        }
        if u == one {
            Ok(Self(b, PhantomData))
        } else {
            Ok(Self(c, PhantomData))
        }
    }

    /// Tonelli–Shanks over the decomposition `p - 1 = 2^S * T`.
    fn sqrt_inner(&self) -> Result<Self> {
        if self.is_zero() {
            return Ok(Self::zero());
        }
        let one = Self::one();
        let mut v = P::S;
        let mut z = Self::from_canonical(P::NQR).pow(&P::T.0);
        let w = self.pow(&P::T_MINUS_ONE_OVER_TWO.0);
        let mut x = *self * w;
        let mut b = x * w;

        while b != one {
            let mut m = 0;
            let mut b2m = b;
            while b2m != one {
                b2m = b2m.square();
                m += 1;
                if m == v {
                    return Err(AlgebraError::NotASquare);
                }
            }
            let mut w = z;
            for _ in 0..(v - m - 1) {
                w = w.square();
            }
            z = w.square();
            b *= &z;
            x *= &w;
            v = m;
        }
        Ok(x)
    }
}

impl<P: FpParameters> Copy for Fp<P> {}

impl<P: FpParameters> Clone for Fp<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: FpParameters> PartialEq for Fp<P> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<P: FpParameters> Eq for Fp<P> {}

impl<P: FpParameters> Hash for Fp<P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state)
    }
}

impl<P: FpParameters> Ord for Fp<P> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.into_bigint().cmp(&other.into_bigint())
    }
}

impl<P: FpParameters> PartialOrd for Fp<P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<P: FpParameters> Default for Fp<P> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<P: FpParameters> Debug for Fp<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        <Bigint<FP_LIMBS> as Display>::fmt(&self.into_bigint(), f)
    }
}

impl<P: FpParameters> Display for Fp<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        <Bigint<FP_LIMBS> as Display>::fmt(&self.into_bigint(), f)
    }
}

impl<P: FpParameters> FromStr for Fp<P> {
    type Err = AlgebraError;

    fn from_str(s: &str) -> core::result::Result<Self, AlgebraError> {
        Self::from_bigint(Bigint::from_str(s)?)
            .map_err(|_| AlgebraError::DeserializationError)
    }
}

impl<P: FpParameters> Zero for Fp<P> {
    #[inline]
    fn zero() -> Self {
        Fp::zero()
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl<P: FpParameters> One for Fp<P> {
    #[inline]
    fn one() -> Self {
        Fp::one()
    }
}

impl<P: FpParameters> UniformRand for Fp<P> {
    fn rand<R: Rng + ?Sized>(rng: &mut R) -> Self {
        // Rejection sampling on the top limb masked to the modulus size.
        let mask = if P::NUM_BITS % 64 == 0 {
            u64::MAX
        } else {
            (1u64 << (P::NUM_BITS % 64)) - 1
        };
        loop {
            let mut limbs = [0u64; FP_LIMBS];
            for limb in limbs.iter_mut() {
                *limb = rng.next_u64();
            }
            limbs[FP_LIMBS - 1] &= mask;
            if let Ok(value) = Self::from_bigint(Bigint(limbs)) {
                return value;
            }
        }
    }
}

impl<P: FpParameters> Add for Fp<P> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.add_inner(&rhs)
    }
}

impl<'a, P: FpParameters> Add<&'a Fp<P>> for Fp<P> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: &Self) -> Self {
        self.add_inner(rhs)
    }
}

impl<'a, P: FpParameters> AddAssign<&'a Fp<P>> for Fp<P> {
    #[inline]
    fn add_assign(&mut self, rhs: &Self) {
        *self = self.add_inner(rhs);
    }
}

impl<P: FpParameters> Sub for Fp<P> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.sub_inner(&rhs)
    }
}

impl<'a, P: FpParameters> Sub<&'a Fp<P>> for Fp<P> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: &Self) -> Self {
        self.sub_inner(rhs)
    }
}

impl<'a, P: FpParameters> SubAssign<&'a Fp<P>> for Fp<P> {
    #[inline]
    fn sub_assign(&mut self, rhs: &Self) {
        *self = self.sub_inner(rhs);
    }
}

impl<P: FpParameters> Mul for Fp<P> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_inner(&rhs)
    }
}

impl<'a, P: FpParameters> Mul<&'a Fp<P>> for Fp<P> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: &Self) -> Self {
        self.mul_inner(rhs)
    }
}

impl<'a, P: FpParameters> MulAssign<&'a Fp<P>> for Fp<P> {
    #[inline]
    fn mul_assign(&mut self, rhs: &Self) {
        *self = self.mul_inner(rhs);
    }
}

impl<P: FpParameters> Neg for Fp<P> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        self.neg_inner()
    }
}

impl<P: FpParameters> Sum<Fp<P>> for Fp<P> {
    #[inline]
    fn sum<I: Iterator<Item = Fp<P>>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl<'a, P: FpParameters> Sum<&'a Fp<P>> for Fp<P> {
    #[inline]
    fn sum<I: Iterator<Item = &'a Fp<P>>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl<P: FpParameters> From<u32> for Fp<P> {
    #[inline]
    fn from(value: u32) -> Self {
        Self::from(value as u64)
    }
}

impl<P: FpParameters> From<u64> for Fp<P> {
    #[inline]
    fn from(value: u64) -> Self {
        Self::from_bigint_mod_order(Bigint::from_u64(value))
    }
}

impl<P: FpParameters> From<Fp<P>> for BigUint {
    #[inline]
    fn from(value: Fp<P>) -> BigUint {
        value.into_bigint().into()
    }
}

impl<'a, P: FpParameters> From<&'a BigUint> for Fp<P> {
    #[inline]
    fn from(src: &BigUint) -> Self {
        let modulus = BigUint::from(P::MODULUS);
        let reduced = src % &modulus;
        // The reduced value has at most four limbs.
        let mut limbs = [0u64; FP_LIMBS];
        for (limb, digit) in limbs.iter_mut().zip(reduced.to_u64_digits()) {
            *limb = digit;
        }
        Self::from_canonical(Bigint(limbs))
    }
}

impl<P: FpParameters> Field for Fp<P> {
    #[inline]
    fn double(&self) -> Self {
        self.add_inner(self)
    }

    #[inline]
    fn square(&self) -> Self {
        self.mul_inner(self)
    }

    #[inline]
    fn inverse(&self) -> Result<Self> {
        self.inverse_inner()
    }

    #[inline]
    fn frobenius_map(&self, _power: usize) -> Self {
        *self
    }
}

impl<P: FpParameters> Scalar for Fp<P> {
    #[inline]
    fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        Self::rand(rng)
    }

    #[inline]
    fn multiplicative_generator() -> Self {
        Self::from_canonical(P::GENERATOR)
    }

    #[inline]
    fn capacity() -> usize {
        (P::NUM_BITS - 1) as usize
    }

    #[inline]
    fn get_field_size_le_bytes() -> Vec<u8> {
        u64_lsf_to_bytes(&P::MODULUS.0)
    }

    #[inline]
    fn get_field_size_biguint() -> BigUint {
        P::MODULUS.into()
    }

    #[inline]
    fn get_little_endian_u64(&self) -> Vec<u64> {
        self.into_bigint().0.to_vec()
    }

    #[inline]
    fn bytes_len() -> usize {
        Bigint::<FP_LIMBS>::NUM_BYTES
    }

    #[inline]
    fn to_bytes(&self) -> Vec<u8> {
        self.into_bigint().to_bytes_be()
    }

    #[inline]
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let value = Bigint::<FP_LIMBS>::from_bytes_be(bytes)?;
        Self::from_bigint(value).map_err(|_| AlgebraError::DeserializationError)
    }

    #[inline]
    fn sqrt(&self) -> Result<Self> {
        self.sqrt_inner()
    }

    #[inline]
    fn legendre(&self) -> LegendreSymbol {
        if self.is_zero() {
            return LegendreSymbol::Zero;
        }
        let s = self.pow(&P::EULER.0);
        if s.is_one() {
            LegendreSymbol::QuadraticResidue
        } else {
            LegendreSymbol::QuadraticNonResidue
        }
    }
}

impl<P: FpParameters> PghrFromToBytes for Fp<P> {
    fn pghr_to_bytes(&self) -> Vec<u8> {
        self.to_bytes()
    }

    fn pghr_from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl<P: FpParameters> serde::Serialize for Fp<P> {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        pghr_obj_serde::serialize(self, serializer)
    }
}

impl<'de, P: FpParameters> serde::Deserialize<'de> for Fp<P> {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        pghr_obj_serde::deserialize(deserializer)
    }
}

/// Invert every element of a slice with a single field inversion.
/// Fails without touching the slice if any element is zero.
pub fn batch_inversion<F: Field>(values: &mut [F]) -> Result<()> {
    if values.iter().any(|v| v.is_zero()) {
        return Err(AlgebraError::ZeroInversion);
    }
    let mut prefix = Vec::with_capacity(values.len());
    let mut acc = F::one();
    for v in values.iter() {
        prefix.push(acc);
        acc *= v;
    }
    let mut acc_inv = acc.inverse()?;
    for (v, p) in values.iter_mut().zip(prefix.into_iter()).rev() {
        let inv = acc_inv * p;
        acc_inv *= &*v;
        *v = inv;
    }
    Ok(())
}
