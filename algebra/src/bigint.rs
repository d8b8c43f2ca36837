use crate::prelude::*;
use ark_std::{cmp::Ordering, fmt, str::FromStr};
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use num_bigint::BigUint;

/// A fixed-width unsigned integer made of `N` 64-bit limbs, least significant limb first.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Bigint<const N: usize>(pub [u64; N]);

/// Compute `a + b + carry`, returning the sum and the new carry.
#[inline(always)]
pub const fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let tmp = (a as u128) + (b as u128) + (carry as u128);
    (tmp as u64, (tmp >> 64) as u64)
}

/// Compute `a - b - borrow`, returning the difference and the new borrow (0 or 1).
#[inline(always)]
pub const fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let tmp = (1u128 << 64) + (a as u128) - (b as u128) - (borrow as u128);
    (tmp as u64, if tmp >> 64 == 0 { 1 } else { 0 })
}

/// Compute `a + b * c + carry`, returning the low limb and the carry.
#[inline(always)]
pub const fn mac(a: u64, b: u64, c: u64, carry: u64) -> (u64, u64) {
    let tmp = (a as u128) + (b as u128) * (c as u128) + (carry as u128);
    (tmp as u64, (tmp >> 64) as u64)
}

impl<const N: usize> Bigint<N> {
    /// The number of bytes in the fixed-width encoding.
    pub const NUM_BYTES: usize = 8 * N;

    /// The value zero.
    pub const fn zero() -> Self {
        Self([0u64; N])
    }

    /// Construct from a small integer.
    pub const fn from_u64(value: u64) -> Self {
        let mut limbs = [0u64; N];
        limbs[0] = value;
        Self(limbs)
    }

    /// Parse a decimal string at compile time. Panics (during const evaluation)
    /// on a non-digit or on overflow, so it is only meant for constants.
    pub const fn from_decimal(s: &str) -> Self {
        let bytes = s.as_bytes();
        assert!(!bytes.is_empty(), "empty decimal constant");
        let mut limbs = [0u64; N];
        let mut i = 0;
        while i < bytes.len() {
            let d = bytes[i];
            assert!(d >= b'0' && d <= b'9', "invalid decimal digit");
            let mut carry = (d - b'0') as u64;
            let mut j = 0;
            while j < N {
                let (lo, hi) = mac(carry, limbs[j], 10, 0);
                limbs[j] = lo;
                carry = hi;
                j += 1;
            }
            assert!(carry == 0, "decimal constant does not fit");
            i += 1;
        }
        Self(limbs)
    }

    /// Return true if the value is zero.
    pub const fn is_zero(&self) -> bool {
        let mut i = 0;
        while i < N {
            if self.0[i] != 0 {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Return true if the value is even.
    #[inline]
    pub const fn is_even(&self) -> bool {
        self.0[0] & 1 == 0
    }

    /// Return the number of significant bits; zero has zero bits.
    pub const fn num_bits(&self) -> u32 {
        let mut i = N;
        while i > 0 {
            i -= 1;
            if self.0[i] != 0 {
                return (i as u32) * 64 + (64 - self.0[i].leading_zeros());
            }
        }
        0
    }

    /// Return bit `i`, counting from the least significant bit. Bits past the
    /// width read as zero.
    #[inline]
    pub const fn test_bit(&self, i: usize) -> bool {
        if i >= 64 * N {
            return false;
        }
        (self.0[i / 64] >> (i % 64)) & 1 == 1
    }

    /// Return the value as a `u64`, failing if it does not fit.
    pub fn as_u64(&self) -> Result<u64> {
        if self.0[1..].iter().any(|limb| *limb != 0) {
            return Err(AlgebraError::BigintOverflow);
        }
        Ok(self.0[0])
    }

    /// Add another integer, writing the result into `L` limbs.
    pub fn add<const M: usize, const L: usize>(&self, other: &Bigint<M>) -> Result<Bigint<L>> {
        let width = N.max(M);
        let mut res = [0u64; L];
        let mut carry = 0u64;
        for i in 0..width {
            let a = if i < N { self.0[i] } else { 0 };
            let b = if i < M { other.0[i] } else { 0 };
            let (sum, c) = adc(a, b, carry);
            carry = c;
            if i < L {
                res[i] = sum;
            } else if sum != 0 {
                return Err(AlgebraError::BigintOverflow);
            }
        }
        if carry != 0 {
            if width < L {
                res[width] = carry;
            } else {
                return Err(AlgebraError::BigintOverflow);
            }
        }
        Ok(Bigint(res))
    }

    /// Multiply by another integer, writing the product into `L` limbs.
    /// `L = N + M` always fits.
    pub fn mul<const M: usize, const L: usize>(&self, other: &Bigint<M>) -> Result<Bigint<L>> {
        let mut wide = vec![0u64; N + M];
        for i in 0..N {
            let mut carry = 0u64;
            for j in 0..M {
                let (lo, hi) = mac(wide[i + j], self.0[i], other.0[j], carry);
                wide[i + j] = lo;
                carry = hi;
            }
            wide[i + M] = carry;
        }
        if wide.iter().skip(L).any(|limb| *limb != 0) {
            return Err(AlgebraError::BigintOverflow);
        }
        let mut res = [0u64; L];
        for (r, w) in res.iter_mut().zip(wide.iter()) {
            *r = *w;
        }
        Ok(Bigint(res))
    }

    /// Truncating division with remainder: returns `(self / d, self % d)`
    /// with the quotient in `Q` limbs and the remainder in the divisor's width.
    pub fn div_qr<const M: usize, const Q: usize>(
        &self,
        d: &Bigint<M>,
    ) -> Result<(Bigint<Q>, Bigint<M>)> {
        if d.is_zero() {
            return Err(AlgebraError::DivisionByZero);
        }
        let mut quotient = [0u64; Q];
        let mut rem = Bigint::<M>::zero();
        for i in (0..self.num_bits() as usize).rev() {
            let overflow = rem.shl1_assign();
            if self.test_bit(i) {
                rem.0[0] |= 1;
            }
            if overflow || rem >= *d {
                rem.sub_noborrow_assign(d);
                if i >= 64 * Q {
                    return Err(AlgebraError::BigintOverflow);
                }
                quotient[i / 64] |= 1u64 << (i % 64);
            }
        }
        Ok((Bigint(quotient), rem))
    }

    /// Narrow to `M` limbs, failing if the dropped limbs are nonzero or the
    /// narrowed value is not below `bound`.
    pub fn shorten<const M: usize>(&self, bound: &Bigint<M>) -> Result<Bigint<M>> {
        if self.0.iter().skip(M).any(|limb| *limb != 0) {
            return Err(AlgebraError::BigintOverflow);
        }
        let mut res = [0u64; M];
        for (r, s) in res.iter_mut().zip(self.0.iter()) {
            *r = *s;
        }
        Bigint(res).limit(bound)
    }

    /// Check that the value is strictly below `bound`.
    pub fn limit(self, bound: &Self) -> Result<Self> {
        if self >= *bound {
            return Err(AlgebraError::BigintOverflow);
        }
        Ok(self)
    }

    /// Fill every limb with random bits.
    pub fn randomize<R: RngCore>(&mut self, rng: &mut R) {
        for limb in self.0.iter_mut() {
            *limb = rng.next_u64();
        }
    }

    /// Shift left by one bit in place, returning the bit shifted out.
    pub fn shl1_assign(&mut self) -> bool {
        let mut carry = 0u64;
        for limb in self.0.iter_mut() {
            let next = *limb >> 63;
            *limb = (*limb << 1) | carry;
            carry = next;
        }
        carry == 1
    }

    /// Shift right by one bit in place.
    pub fn shr1_assign(&mut self) {
        let mut carry = 0u64;
        for limb in self.0.iter_mut().rev() {
            let next = *limb << 63;
            *limb = (*limb >> 1) | carry;
            carry = next;
        }
    }

    /// In-place addition that wraps modulo `2^(64N)`, returning the carry.
    pub fn add_nocarry_assign(&mut self, other: &Self) -> bool {
        let mut carry = 0u64;
        for (a, b) in self.0.iter_mut().zip(other.0.iter()) {
            let (sum, c) = adc(*a, *b, carry);
            *a = sum;
            carry = c;
        }
        carry != 0
    }

    /// In-place subtraction that wraps modulo `2^(64N)`, returning the borrow.
    pub fn sub_noborrow_assign(&mut self, other: &Self) -> bool {
        let mut borrow = 0u64;
        for (a, b) in self.0.iter_mut().zip(other.0.iter()) {
            let (diff, br) = sbb(*a, *b, borrow);
            *a = diff;
            borrow = br;
        }
        borrow != 0
    }

    /// Encode as exactly `8N` big-endian bytes.
    pub fn to_bytes_be(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; Self::NUM_BYTES];
        for (chunk, limb) in bytes.chunks_mut(8).zip(self.0.iter().rev()) {
            BigEndian::write_u64(chunk, *limb);
        }
        bytes
    }

    /// Decode from exactly `8N` big-endian bytes.
    pub fn from_bytes_be(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::NUM_BYTES {
            return Err(AlgebraError::DeserializationError);
        }
        let mut limbs = [0u64; N];
        for (limb, chunk) in limbs.iter_mut().rev().zip(bytes.chunks(8)) {
            *limb = BigEndian::read_u64(chunk);
        }
        Ok(Self(limbs))
    }

    /// Encode as exactly `8N` little-endian bytes.
    pub fn to_bytes_le(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; Self::NUM_BYTES];
        for (chunk, limb) in bytes.chunks_mut(8).zip(self.0.iter()) {
            LittleEndian::write_u64(chunk, *limb);
        }
        bytes
    }

    /// Decode from exactly `8N` little-endian bytes.
    pub fn from_bytes_le(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::NUM_BYTES {
            return Err(AlgebraError::DeserializationError);
        }
        let mut limbs = [0u64; N];
        for (limb, chunk) in limbs.iter_mut().zip(bytes.chunks(8)) {
            *limb = LittleEndian::read_u64(chunk);
        }
        Ok(Self(limbs))
    }

    /// Compare two integers as a const fn.
    pub const fn const_cmp(&self, other: &Self) -> Ordering {
        let mut i = N;
        while i > 0 {
            i -= 1;
            if self.0[i] > other.0[i] {
                return Ordering::Greater;
            }
            if self.0[i] < other.0[i] {
                return Ordering::Less;
            }
        }
        Ordering::Equal
    }

    /// `self - other` as a const fn, wrapping on underflow.
    pub const fn const_sub(&self, other: &Self) -> Self {
        let mut res = [0u64; N];
        let mut borrow = 0u64;
        let mut i = 0;
        while i < N {
            let (d, b) = sbb(self.0[i], other.0[i], borrow);
            res[i] = d;
            borrow = b;
            i += 1;
        }
        Self(res)
    }

    /// `self >> 1` as a const fn.
    pub const fn const_shr1(&self) -> Self {
        let mut res = [0u64; N];
        let mut carry = 0u64;
        let mut i = N;
        while i > 0 {
            i -= 1;
            res[i] = (self.0[i] >> 1) | carry;
            carry = self.0[i] << 63;
        }
        Self(res)
    }
}

impl<const N: usize> Default for Bigint<N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const N: usize> Ord for Bigint<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.const_cmp(other)
    }
}

impl<const N: usize> PartialOrd for Bigint<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const N: usize> From<u64> for Bigint<N> {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl<const N: usize> FromStr for Bigint<N> {
    type Err = AlgebraError;

    fn from_str(s: &str) -> core::result::Result<Self, AlgebraError> {
        if s.is_empty() {
            return Err(AlgebraError::DeserializationError);
        }
        let mut limbs = [0u64; N];
        for ch in s.bytes() {
            if !ch.is_ascii_digit() {
                return Err(AlgebraError::DeserializationError);
            }
            let mut carry = (ch - b'0') as u64;
            for limb in limbs.iter_mut() {
                let (lo, hi) = mac(carry, *limb, 10, 0);
                *limb = lo;
                carry = hi;
            }
            if carry != 0 {
                return Err(AlgebraError::BigintOverflow);
            }
        }
        Ok(Self(limbs))
    }
}

impl<const N: usize> From<Bigint<N>> for BigUint {
    fn from(value: Bigint<N>) -> BigUint {
        BigUint::from_bytes_le(&value.to_bytes_le())
    }
}

impl<const N: usize> TryFrom<&BigUint> for Bigint<N> {
    type Error = AlgebraError;

    fn try_from(value: &BigUint) -> core::result::Result<Self, AlgebraError> {
        let digits = value.to_u64_digits();
        if digits.len() > N {
            return Err(AlgebraError::BigintOverflow);
        }
        let mut limbs = [0u64; N];
        limbs[..digits.len()].copy_from_slice(&digits);
        Ok(Self(limbs))
    }
}

impl<const N: usize> fmt::Display for Bigint<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&BigUint::from(*self), f)
    }
}

impl<const N: usize> fmt::Debug for Bigint<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&BigUint::from(*self), f)
    }
}

#[cfg(test)]
mod test {
    use super::Bigint;
    use crate::errors::AlgebraError;
    use crate::prelude::*;
    use num_bigint::BigUint;
    use num_integer::Integer;
    use std::str::FromStr;

    const B1_DECIMAL: &str = "76749407";
    const B2_DECIMAL: &str = "435020359732196472065729437602";
    const B3_DECIMAL: &str = "33387554642372758038536799358397002014";

    #[test]
    fn parse_and_inspect() {
        let b1 = Bigint::<1>::from_u64(76749407);
        let b2 = Bigint::<2>::from_decimal(B2_DECIMAL);

        assert_eq!(b1.as_u64().unwrap(), 76749407);
        assert_eq!(b2.as_u64(), Err(AlgebraError::BigintOverflow));
        assert_eq!(b2.0[0], 15747124762497195938);
        assert_eq!(b2.num_bits(), 99);
        assert_eq!(Bigint::<4>::zero().num_bits(), 0);
        assert_eq!(Bigint::<2>::from_str(B2_DECIMAL).unwrap(), b2);
        assert_eq!(format!("{}", b2), B2_DECIMAL);

        assert!(Bigint::<1>::from_str("12a").is_err());
        assert_eq!(
            Bigint::<1>::from_str(B2_DECIMAL),
            Err(AlgebraError::BigintOverflow)
        );
    }

    #[test]
    fn multiplication_and_division() {
        let b1 = Bigint::<1>::from_decimal(B1_DECIMAL);
        let b2 = Bigint::<2>::from_decimal(B2_DECIMAL);

        let b3: Bigint<3> = b2.mul(&b1).unwrap();
        assert_eq!(b3, Bigint::<3>::from_decimal(B3_DECIMAL));
        assert_eq!(format!("{}", b3), B3_DECIMAL);
        assert!(b2.mul::<1, 2>(&b1).is_err());

        let (quotient, remainder): (Bigint<2>, Bigint<2>) = b3.div_qr(&b2).unwrap();
        assert_eq!(quotient.shorten::<1>(&Bigint::from_u64(u64::MAX)).unwrap(), b1);
        assert!(remainder.is_zero());

        let b3a: Bigint<3> = b3.add(&Bigint::<1>::from_u64(42)).unwrap();
        let (quotient, remainder): (Bigint<1>, Bigint<2>) = b3a.div_qr(&b2).unwrap();
        assert_eq!(quotient, b1);
        assert_eq!(remainder.as_u64().unwrap(), 42);

        assert_eq!(
            b3.div_qr::<2, 1>(&Bigint::<2>::zero()),
            Err(AlgebraError::DivisionByZero)
        );
        assert_eq!(
            b3.div_qr::<1, 1>(&Bigint::<1>::from_u64(3)),
            Err(AlgebraError::BigintOverflow)
        );
    }

    #[test]
    fn narrowing_is_checked() {
        let b2 = Bigint::<2>::from_decimal(B2_DECIMAL);
        let bound = Bigint::<1>::from_u64(u64::MAX);
        assert_eq!(b2.shorten(&bound), Err(AlgebraError::BigintOverflow));

        let small = Bigint::<2>::from_u64(5);
        assert_eq!(small.shorten(&bound).unwrap(), Bigint::<1>::from_u64(5));
        assert!(small.limit(&Bigint::from_u64(6)).is_ok());
        assert_eq!(
            small.limit(&Bigint::from_u64(5)),
            Err(AlgebraError::BigintOverflow)
        );

        let mut x = b2;
        x.sub_noborrow_assign(&b2);
        assert!(x.is_zero());
    }

    #[test]
    fn addition_carries_into_wider_result() {
        let max = Bigint::<1>::from_u64(u64::MAX);
        let one = Bigint::<1>::from_u64(1);
        let sum: Bigint<2> = max.add(&one).unwrap();
        assert_eq!(sum.0, [0, 1]);
        assert_eq!(max.add::<1, 1>(&one), Err(AlgebraError::BigintOverflow));
    }

    #[test]
    fn random_values_agree_with_biguint() {
        let mut prng = test_rng();
        for _ in 0..100 {
            let mut a = Bigint::<4>::zero();
            let mut b = Bigint::<3>::zero();
            a.randomize(&mut prng);
            b.randomize(&mut prng);
            let a_big = BigUint::from(a);
            let b_big = BigUint::from(b);

            let prod: Bigint<7> = a.mul(&b).unwrap();
            assert_eq!(BigUint::from(prod), &a_big * &b_big);

            let sum: Bigint<5> = a.add(&b).unwrap();
            assert_eq!(BigUint::from(sum), &a_big + &b_big);

            let (q, r): (Bigint<4>, Bigint<3>) = a.div_qr(&b).unwrap();
            let (q_big, r_big) = a_big.div_rem(&b_big);
            assert_eq!(BigUint::from(q), q_big);
            assert_eq!(BigUint::from(r), r_big);

            assert_eq!(a.cmp(&a), core::cmp::Ordering::Equal);
            assert_eq!(Bigint::<4>::from_bytes_be(&a.to_bytes_be()).unwrap(), a);
            assert_eq!(Bigint::<4>::try_from(&a_big).unwrap(), a);
            assert_eq!(a.num_bits() as u64, a_big.bits());
        }
    }
}
