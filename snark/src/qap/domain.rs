use crate::errors::{Result, SnarkError};
use ark_std::{cfg_chunks_mut, cfg_iter_mut};
use num_bigint::BigUint;
use pghr_algebra::{fp::batch_inversion, prelude::*};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A multiplicative subgroup `{1, w, ..., w^(m-1)}` of the scalar field of
/// power-of-two order `m`, together with the coset `g * <w>` where `g` is
/// the multiplicative generator of the field.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EvaluationDomain<F> {
    /// The order of the subgroup.
    pub size: usize,
    /// `log2(size)`.
    pub log_size: u32,
    /// A primitive `size`-th root of unity.
    pub group_gen: F,
    /// The inverse of `group_gen`.
    pub group_gen_inv: F,
    /// The inverse of `size` in the field.
    pub size_inv: F,
    /// The generator of the coset.
    pub coset_gen: F,
    /// The inverse of `coset_gen`.
    pub coset_gen_inv: F,
}

impl<F: Scalar> EvaluationDomain<F> {
    /// Create the smallest radix-2 domain with at least `min_size` elements.
    /// Fails if the field has no root of unity of that order.
    pub fn new(min_size: usize) -> Result<Self> {
        let size = min_size
            .max(1)
            .checked_next_power_of_two()
            .ok_or(SnarkError::DomainTooLarge)?;
        let group_gen =
            primitive_nth_root_of_unity::<F>(size).ok_or(SnarkError::DomainTooLarge)?;
        let coset_gen = F::multiplicative_generator();
        Ok(Self {
            size,
            log_size: size.trailing_zeros(),
            group_gen,
            group_gen_inv: group_gen.inverse()?,
            size_inv: F::from(size as u64).inverse()?,
            coset_gen,
            coset_gen_inv: coset_gen.inverse()?,
        })
    }

    /// Return `w^i`.
    pub fn element(&self, i: usize) -> F {
        self.group_gen.pow(&[i as u64])
    }

    /// Return all the elements of the subgroup, in order.
    pub fn elements(&self) -> Vec<F> {
        let mut res = Vec::with_capacity(self.size);
        let mut omega = F::one();
        for _ in 0..self.size {
            res.push(omega);
            omega.mul_assign(&self.group_gen);
        }
        res
    }

    /// Evaluate a polynomial of degree below `size` on the subgroup, in place.
    /// The coefficient vector is zero-padded to `size`.
    pub fn fft(&self, coeffs: &mut Vec<F>) -> Result<()> {
        self.resize(coeffs)?;
        serial_radix2_fft(coeffs, &self.group_gen, self.log_size);
        Ok(())
    }

    /// Interpolate the values on the subgroup into coefficients, in place.
    pub fn ifft(&self, evals: &mut Vec<F>) -> Result<()> {
        self.resize(evals)?;
        serial_radix2_fft(evals, &self.group_gen_inv, self.log_size);
        let size_inv = self.size_inv;
        cfg_iter_mut!(evals).for_each(|v| v.mul_assign(&size_inv));
        Ok(())
    }

    /// Evaluate a polynomial on the coset `g * <w>`, in place.
    pub fn coset_fft(&self, coeffs: &mut Vec<F>) -> Result<()> {
        distribute_powers(coeffs, &self.coset_gen);
        self.fft(coeffs)
    }

    /// Interpolate values on the coset `g * <w>` into coefficients, in place.
    pub fn coset_ifft(&self, evals: &mut Vec<F>) -> Result<()> {
        self.ifft(evals)?;
        distribute_powers(evals, &self.coset_gen_inv);
        Ok(())
    }

    /// Evaluate the `size` Lagrange basis polynomials of the subgroup at `t`.
    pub fn lagrange_coeffs(&self, t: &F) -> Vec<F> {
        let mut u = vec![F::zero(); self.size];
        let z_t = self.compute_z(t);

        // t is in the subgroup: the basis is the indicator of its position.
        if z_t.is_zero() {
            let mut omega = F::one();
            for ui in u.iter_mut() {
                if omega == *t {
                    *ui = F::one();
                    break;
                }
                omega.mul_assign(&self.group_gen);
            }
            return u;
        }

        // L_i(t) = w^i * Z(t) / (size * (t - w^i))
        let mut denominators = Vec::with_capacity(self.size);
        let mut omega = F::one();
        for _ in 0..self.size {
            denominators.push(t.sub(&omega));
            omega.mul_assign(&self.group_gen);
        }
        // No denominator is zero because t is not in the subgroup.
        if batch_inversion(&mut denominators).is_err() {
            return u;
        }
        let mut l = z_t.mul(&self.size_inv);
        for (ui, d) in u.iter_mut().zip(denominators.iter()) {
            *ui = l.mul(d);
            l.mul_assign(&self.group_gen);
        }
        u
    }

    /// Evaluate the vanishing polynomial `Z(x) = x^size - 1` at `t`.
    #[inline]
    pub fn compute_z(&self, t: &F) -> F {
        t.pow(&[self.size as u64]).sub(&F::one())
    }

    /// Add `coeff * Z(x)` to a polynomial of degree at most `size`.
    pub fn add_poly_z(&self, coeff: &F, h: &mut [F]) -> Result<()> {
        if h.len() != self.size + 1 {
            return Err(SnarkError::Algebra(AlgebraError::ParameterError));
        }
        h[self.size].add_assign(coeff);
        h[0].sub_assign(coeff);
        Ok(())
    }

    /// Divide evaluations on the coset `g * <w>` by `Z`, which is the
    /// constant `g^size - 1` there.
    pub fn divide_by_z_on_coset(&self, evals: &mut [F]) -> Result<()> {
        let z_inv = self.compute_z(&self.coset_gen).inverse()?;
        cfg_iter_mut!(evals).for_each(|v| v.mul_assign(&z_inv));
        Ok(())
    }

    fn resize(&self, v: &mut Vec<F>) -> Result<()> {
        if v.len() > self.size {
            return Err(SnarkError::Algebra(AlgebraError::ParameterError));
        }
        v.resize(self.size, F::zero());
        Ok(())
    }
}

/// Multiply the i-th coefficient by `g^i`, giving the coefficients of `p(g * x)`.
fn distribute_powers<F: Scalar>(coeffs: &mut [F], g: &F) {
    let mut pow = F::one();
    for c in coeffs.iter_mut() {
        c.mul_assign(&pow);
        pow.mul_assign(g);
    }
}

fn bit_reverse(n: usize, log_size: u32) -> usize {
    if log_size == 0 {
        0
    } else {
        n.reverse_bits() >> (usize::BITS - log_size)
    }
}

/// Iterative Cooley-Tukey FFT of length `2^log_size` with root `omega`.
fn serial_radix2_fft<F: Scalar>(a: &mut [F], omega: &F, log_size: u32) {
    let n = a.len();
    for k in 0..n {
        let rk = bit_reverse(k, log_size);
        if k < rk {
            a.swap(k, rk);
        }
    }

    let mut m = 1;
    for _ in 0..log_size {
        // w_m is a primitive (2m)-th root of unity
        let w_m = omega.pow(&[(n / (2 * m)) as u64]);
        cfg_chunks_mut!(a, 2 * m).for_each(|chunk| {
            let (lo, hi) = chunk.split_at_mut(m);
            let mut w = F::one();
            for (x, y) in lo.iter_mut().zip(hi.iter_mut()) {
                let t = w.mul(&*y);
                *y = x.sub(&t);
                x.add_assign(&t);
                w.mul_assign(&w_m);
            }
        });
        m *= 2;
    }
}

/// Compute a primitive `num_points`-th root of unity as `g^((q - 1) / num_points)`
/// for the multiplicative generator `g`, if `num_points` divides `q - 1`.
pub fn primitive_nth_root_of_unity<F: Scalar>(num_points: usize) -> Option<F> {
    if num_points == 0 {
        return None;
    }
    let q_minus_one = F::get_field_size_biguint() - 1u64;
    let n = BigUint::from(num_points as u64);
    if &q_minus_one % &n != BigUint::from(0u64) {
        return None;
    }
    let exp = q_minus_one / n;
    Some(F::multiplicative_generator().pow(&exp.to_u64_digits()))
}

#[cfg(test)]
mod test {
    use super::{primitive_nth_root_of_unity, EvaluationDomain};
    use crate::errors::SnarkError;
    use pghr_algebra::{bn254::BN254Scalar, prelude::*};

    type F = BN254Scalar;

    fn eval(coeffs: &[F], x: &F) -> F {
        coeffs.iter().rev().fold(F::zero(), |acc, c| acc * x + c)
    }

    #[test]
    fn roots_of_unity() {
        for log in [0, 1, 5, 28] {
            let n = 1usize << log;
            let root: F = primitive_nth_root_of_unity(n).unwrap();
            assert!(root.pow(&[n as u64]).is_one());
            if n > 1 {
                assert!(!root.pow(&[(n / 2) as u64]).is_one());
            }
        }
        assert!(primitive_nth_root_of_unity::<F>(1 << 29).is_none());
        assert!(primitive_nth_root_of_unity::<F>(0).is_none());
        assert_eq!(
            EvaluationDomain::<F>::new((1 << 28) + 1),
            Err(SnarkError::DomainTooLarge)
        );

        let domain = EvaluationDomain::<F>::new(1 << 28).unwrap();
        assert_eq!(domain.group_gen, F::two_adic_root_of_unity());
    }

    #[test]
    fn fft_matches_evaluation() {
        let mut prng = test_rng();
        for size in [1, 2, 3, 16, 100] {
            let domain = EvaluationDomain::<F>::new(size).unwrap();
            assert_eq!(domain.size, size.next_power_of_two());

            let coeffs: Vec<F> = (0..size).map(|_| F::random(&mut prng)).collect();
            let mut evals = coeffs.clone();
            domain.fft(&mut evals).unwrap();
            for (i, e) in evals.iter().enumerate() {
                assert_eq!(*e, eval(&coeffs, &domain.element(i)));
            }
            assert_eq!(domain.elements()[domain.size - 1], domain.element(domain.size - 1));

            let mut back = evals.clone();
            domain.ifft(&mut back).unwrap();
            let mut padded = coeffs.clone();
            padded.resize(domain.size, F::zero());
            assert_eq!(back, padded);

            let mut coset_evals = coeffs.clone();
            domain.coset_fft(&mut coset_evals).unwrap();
            for (i, e) in coset_evals.iter().enumerate() {
                assert_eq!(*e, eval(&coeffs, &(domain.coset_gen * domain.element(i))));
            }
            domain.coset_ifft(&mut coset_evals).unwrap();
            assert_eq!(coset_evals, padded);
        }

        let domain = EvaluationDomain::<F>::new(4).unwrap();
        let mut too_long = vec![F::one(); 5];
        assert!(domain.fft(&mut too_long).is_err());
    }

    #[test]
    fn lagrange_and_vanishing() {
        let mut prng = test_rng();
        let domain = EvaluationDomain::<F>::new(8).unwrap();
        let values: Vec<F> = (0..8).map(|_| F::random(&mut prng)).collect();
        let mut coeffs = values.clone();
        domain.ifft(&mut coeffs).unwrap();

        let t = F::random(&mut prng);
        let u = domain.lagrange_coeffs(&t);
        let interpolated = u
            .iter()
            .zip(values.iter())
            .fold(F::zero(), |acc, (l, v)| acc + *l * v);
        assert_eq!(interpolated, eval(&coeffs, &t));

        // at a domain point the basis is an indicator vector
        let u = domain.lagrange_coeffs(&domain.element(3));
        for (i, l) in u.iter().enumerate() {
            assert_eq!(l.is_one(), i == 3);
            assert_eq!(l.is_zero(), i != 3);
        }

        for x in domain.elements() {
            assert!(domain.compute_z(&x).is_zero());
        }
        assert_eq!(domain.compute_z(&t), t.pow(&[8]) - F::one());

        // h + c * Z vanishes exactly where h does on the domain
        let c = F::random(&mut prng);
        let mut h = vec![F::zero(); 9];
        domain.add_poly_z(&c, &mut h).unwrap();
        assert_eq!(eval(&h, &t), c * domain.compute_z(&t));
        assert!(domain.add_poly_z(&c, &mut [F::zero(); 8]).is_err());
    }

    #[test]
    fn division_on_coset() {
        let mut prng = test_rng();
        let domain = EvaluationDomain::<F>::new(8).unwrap();
        // p = q * Z with deg q < 8
        let q: Vec<F> = (0..8).map(|_| F::random(&mut prng)).collect();
        let mut p = vec![F::zero(); 16];
        for (i, qi) in q.iter().enumerate() {
            p[i] -= qi;
            p[i + 8] += qi;
        }
        // Z is constant on g * <w>, so dividing the evaluations of the small
        // coset and interpolating recovers q.
        let mut small_evals: Vec<F> = (0..8)
            .map(|i| eval(&p, &(domain.coset_gen * domain.element(i))))
            .collect();
        domain.divide_by_z_on_coset(&mut small_evals).unwrap();
        domain.coset_ifft(&mut small_evals).unwrap();
        assert_eq!(small_evals, q);
    }
}
