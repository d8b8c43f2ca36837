use crate::prelude::*;
use ark_std::fmt;

/// Constants of a short Weierstrass curve `y^2 = x^3 + b` with `a = 0`.
pub trait SWCurveConfig: 'static + Send + Sync + Sized {
    /// The field the coordinates live in.
    type BaseField: Field;
    /// The coefficient `b`.
    const COEFF_B: Self::BaseField;
    /// The affine x-coordinate of the fixed generator.
    const GENERATOR_X: Self::BaseField;
    /// The affine y-coordinate of the fixed generator.
    const GENERATOR_Y: Self::BaseField;
}

/// A point in Jacobian coordinates, `(X, Y, Z)` standing for `(X/Z^2, Y/Z^3)`.
/// The point at infinity is any triple with `Z = 0`, canonically `(0, 1, 0)`.
pub struct Jacobian<C: SWCurveConfig> {
    /// The X coordinate.
    pub x: C::BaseField,
    /// The Y coordinate.
    pub y: C::BaseField,
    /// The Z coordinate.
    pub z: C::BaseField,
    _config: PhantomData<C>,
}

impl<C: SWCurveConfig> Jacobian<C> {
    /// Build a point from raw Jacobian coordinates, without any check.
    #[inline]
    pub const fn new_unchecked(x: C::BaseField, y: C::BaseField, z: C::BaseField) -> Self {
        Self {
            x,
            y,
            z,
            _config: PhantomData,
        }
    }

    /// Build a point from affine coordinates, without any check.
    #[inline]
    pub fn from_affine_unchecked(x: C::BaseField, y: C::BaseField) -> Self {
        Self::new_unchecked(x, y, C::BaseField::one())
    }

    /// Build a point from affine coordinates, checking the curve equation.
    pub fn from_affine(x: C::BaseField, y: C::BaseField) -> Result<Self> {
        let p = Self::from_affine_unchecked(x, y);
        if p.is_well_formed() {
            Ok(p)
        } else {
            Err(AlgebraError::NotOnCurve)
        }
    }

    /// The point at infinity.
    #[inline]
    pub fn zero() -> Self {
        Self::new_unchecked(
            C::BaseField::zero(),
            C::BaseField::one(),
            C::BaseField::zero(),
        )
    }

    /// The fixed generator of the curve.
    #[inline]
    pub fn generator() -> Self {
        Self::from_affine_unchecked(C::GENERATOR_X, C::GENERATOR_Y)
    }

    /// Whether this is the point at infinity.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.z.is_zero()
    }

    /// Whether the point is the identity or has `Z = 1`.
    #[inline]
    pub fn is_special(&self) -> bool {
        self.is_zero() || self.z.is_one()
    }

    /// Return the affine coordinates, or `None` for the point at infinity.
    pub fn to_affine_coordinates(&self) -> Option<(C::BaseField, C::BaseField)> {
        if self.is_zero() {
            return None;
        }
        let z_inv = self.z.inverse().ok()?;
        let z_inv2 = z_inv.square();
        let z_inv3 = z_inv2 * z_inv;
        Some((self.x * z_inv2, self.y * z_inv3))
    }

    /// Return the same point with `Z = 1`, or the canonical identity.
    pub fn to_special(&self) -> Self {
        match self.to_affine_coordinates() {
            Some((x, y)) => Self::from_affine_unchecked(x, y),
            None => Self::zero(),
        }
    }

    /// Check `Y^2 = X^3 + b Z^6`. The point at infinity is well formed.
    pub fn is_well_formed(&self) -> bool {
        if self.is_zero() {
            return true;
        }
        let z2 = self.z.square();
        let z6 = z2.square() * z2;
        self.y.square() == self.x.square() * self.x + C::COEFF_B * z6
    }

    /// Normalize a slice of points to `Z = 1` with one field inversion.
    /// Fails without touching the slice if any point is the identity.
    pub fn batch_to_special_all_non_zeros(points: &mut [Self]) -> Result<()> {
        if points.iter().any(|p| p.is_zero()) {
            return Err(AlgebraError::PointAtInfinity);
        }
        let mut z_inverses: Vec<C::BaseField> = points.iter().map(|p| p.z).collect();
        crate::fp::batch_inversion(&mut z_inverses)?;
        for (p, z_inv) in points.iter_mut().zip(z_inverses.iter()) {
            let z_inv2 = z_inv.square();
            let z_inv3 = z_inv2 * z_inv;
            *p = Self::from_affine_unchecked(p.x * z_inv2, p.y * z_inv3);
        }
        Ok(())
    }

    /// Doubling, dbl-2009-l.
    pub fn double(&self) -> Self {
        if self.is_zero() {
            return *self;
        }
        let a = self.x.square();
        let b = self.y.square();
        let c = b.square();
        let d = ((self.x + b).square() - a - c).double();
        let e = a.double() + a;
        let f = e.square();

        let x3 = f - d.double();
        let c8 = c.double().double().double();
        let y3 = e * (d - x3) - c8;
        let z3 = (self.y * self.z).double();
        Self::new_unchecked(x3, y3, z3)
    }

    /// Addition, add-2007-bl. Falls back to doubling on equal inputs.
    pub fn add_points(&self, other: &Self) -> Self {
        if self.is_zero() {
            return *other;
        }
        if other.is_zero() {
            return *self;
        }
        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        let u1 = self.x * z2z2;
        let u2 = other.x * z1z1;
        let s1 = self.y * other.z * z2z2;
        let s2 = other.y * self.z * z1z1;

        if u1 == u2 {
            return if s1 == s2 { self.double() } else { Self::zero() };
        }

        let h = u2 - u1;
        let i = h.double().square();
        let j = h * i;
        let r = (s2 - s1).double();
        let v = u1 * i;
        let x3 = r.square() - j - v.double();
        let y3 = r * (v - x3) - (s1 * j).double();
        let z3 = ((self.z + other.z).square() - z1z1 - z2z2) * h;
        Self::new_unchecked(x3, y3, z3)
    }

    /// Mixed addition, madd-2007-bl. `other` must be special (`Z = 1` or identity).
    pub fn mixed_add(&self, other: &Self) -> Self {
        debug_assert!(other.is_special());
        if other.is_zero() {
            return *self;
        }
        if self.is_zero() {
            return *other;
        }
        let z1z1 = self.z.square();
        let u2 = other.x * z1z1;
        let s2 = other.y * self.z * z1z1;

        if self.x == u2 {
            return if self.y == s2 {
                self.double()
            } else {
                Self::zero()
            };
        }

        let h = u2 - self.x;
        let hh = h.square();
        let i = hh.double().double();
        let j = h * i;
        let r = (s2 - self.y).double();
        let v = self.x * i;
        let x3 = r.square() - j - v.double();
        let y3 = r * (v - x3) - (self.y * j).double();
        let z3 = (self.z + h).square() - z1z1 - hh;
        Self::new_unchecked(x3, y3, z3)
    }

    /// Multiply by an integer given as little-endian u64 limbs.
    pub fn mul_limbs(&self, limbs: &[u64]) -> Self {
        let mut res = Self::zero();
        let mut found_one = false;
        for limb in limbs.iter().rev() {
            for i in (0..64).rev() {
                if found_one {
                    res = res.double();
                }
                if (limb >> i) & 1 == 1 {
                    found_one = true;
                    res = res.add_points(self);
                }
            }
        }
        res
    }
}

impl<C: SWCurveConfig> Copy for Jacobian<C> {}

impl<C: SWCurveConfig> Clone for Jacobian<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: SWCurveConfig> Default for Jacobian<C> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<C: SWCurveConfig> fmt::Debug for Jacobian<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_affine_coordinates() {
            Some((x, y)) => write!(f, "({:?}, {:?})", x, y),
            None => f.write_str("infinity"),
        }
    }
}

impl<C: SWCurveConfig> PartialEq for Jacobian<C> {
    fn eq(&self, other: &Self) -> bool {
        if self.is_zero() {
            return other.is_zero();
        }
        if other.is_zero() {
            return false;
        }
        // X1 Z2^2 = X2 Z1^2 and Y1 Z2^3 = Y2 Z1^3
        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        self.x * z2z2 == other.x * z1z1 && self.y * other.z * z2z2 == other.y * self.z * z1z1
    }
}

impl<C: SWCurveConfig> Eq for Jacobian<C> {}

impl<'a, C: SWCurveConfig> Add<&'a Jacobian<C>> for Jacobian<C> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: &Self) -> Self {
        self.add_points(rhs)
    }
}

impl<'a, C: SWCurveConfig> AddAssign<&'a Jacobian<C>> for Jacobian<C> {
    #[inline]
    fn add_assign(&mut self, rhs: &Self) {
        *self = self.add_points(rhs);
    }
}

impl<'a, C: SWCurveConfig> Sub<&'a Jacobian<C>> for Jacobian<C> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: &Self) -> Self {
        self.add_points(&rhs.neg())
    }
}

impl<'a, C: SWCurveConfig> SubAssign<&'a Jacobian<C>> for Jacobian<C> {
    #[inline]
    fn sub_assign(&mut self, rhs: &Self) {
        *self = self.add_points(&rhs.neg());
    }
}

impl<C: SWCurveConfig> Neg for Jacobian<C> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new_unchecked(self.x, -self.y, self.z)
    }
}

impl<'a, C: SWCurveConfig, P: crate::fp::FpParameters> Mul<&'a crate::fp::Fp<P>>
    for Jacobian<C>
{
    type Output = Self;

    #[inline]
    fn mul(self, rhs: &crate::fp::Fp<P>) -> Self {
        self.mul_limbs(&rhs.into_bigint().0)
    }
}

impl<C: SWCurveConfig> Sum<Jacobian<C>> for Jacobian<C> {
    fn sum<I: Iterator<Item = Jacobian<C>>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, p| acc.add_points(&p))
    }
}

impl<'a, C: SWCurveConfig> Sum<&'a Jacobian<C>> for Jacobian<C> {
    fn sum<I: Iterator<Item = &'a Jacobian<C>>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, p| acc.add_points(p))
    }
}
