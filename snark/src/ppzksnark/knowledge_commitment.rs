use super::sparse_vector::SparseVector;
use crate::errors::Result;
use crate::utils::{read_group, write_group};
use ark_std::cfg_into_iter;
use pghr_algebra::{
    multi_exp::FixedBaseTable,
    prelude::*,
    short_weierstrass::{Jacobian, SWCurveConfig},
};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A pair `(g, h)` where `h` encodes the same linear combination as `g`
/// scaled by a secret factor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct KnowledgeCommitment<T, H> {
    /// The commitment.
    pub g: T,
    /// The commitment scaled by the secret factor.
    pub h: H,
}

/// A sparse vector of knowledge commitments.
pub type KnowledgeCommitmentVector<T, H> = SparseVector<KnowledgeCommitment<T, H>>;

impl<T: Group, H: Group<ScalarType = T::ScalarType>> KnowledgeCommitment<T, H> {
    /// Create a knowledge commitment.
    #[inline]
    pub fn new(g: T, h: H) -> Self {
        Self { g, h }
    }

    /// The pair of identities.
    #[inline]
    pub fn zero() -> Self {
        Self::new(T::get_identity(), H::get_identity())
    }

    /// The pair of generators.
    #[inline]
    pub fn one() -> Self {
        Self::new(T::get_base(), H::get_base())
    }

    /// Return true if both components are the identity.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.g.is_identity() && self.h.is_identity()
    }

    /// Add componentwise.
    #[inline]
    pub fn add(&self, other: &Self) -> Self {
        Self::new(self.g.add(&other.g), self.h.add(&other.h))
    }

    /// Multiply both components by a scalar.
    #[inline]
    pub fn mul(&self, scalar: &T::ScalarType) -> Self {
        Self::new(self.g.mul(scalar), self.h.mul(scalar))
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        write_group(out, &self.g);
        write_group(out, &self.h);
    }

    pub(crate) fn read(bytes: &mut &[u8]) -> Result<Self> {
        let g = read_group(bytes)?;
        let h = read_group(bytes)?;
        Ok(Self::new(g, h))
    }

    /// The length of the encoding.
    pub const ENCODED_LEN: usize = T::COMPRESSED_LEN + H::COMPRESSED_LEN;
}

impl<C1: SWCurveConfig, C2: SWCurveConfig> KnowledgeCommitment<Jacobian<C1>, Jacobian<C2>> {
    /// Return true if both components satisfy their curve equations.
    pub fn is_well_formed(&self) -> bool {
        self.g.is_well_formed() && self.h.is_well_formed()
    }

    /// Return true if both components are in affine form.
    pub fn is_special(&self) -> bool {
        self.g.is_special() && self.h.is_special()
    }

    /// Add a commitment, using mixed addition on the components that are special.
    pub fn mixed_add(&self, other: &Self) -> Self {
        let g = if other.g.is_special() {
            self.g.mixed_add(&other.g)
        } else {
            self.g.add_points(&other.g)
        };
        let h = if other.h.is_special() {
            self.h.mixed_add(&other.h)
        } else {
            self.h.add_points(&other.h)
        };
        Self { g, h }
    }

    /// Normalize the non-zero components of every commitment to affine form.
    pub fn batch_to_special(values: &mut [Self]) {
        let mut gs: Vec<Jacobian<C1>> = values.iter().map(|v| v.g).collect();
        let mut hs: Vec<Jacobian<C2>> = values.iter().map(|v| v.h).collect();
        batch_to_special(&mut gs);
        batch_to_special(&mut hs);
        for (v, (g, h)) in values.iter_mut().zip(gs.into_iter().zip(hs.into_iter())) {
            v.g = g;
            v.h = h;
        }
    }
}

/// Normalize every non-zero point to affine form with a single inversion.
pub fn batch_to_special<C: SWCurveConfig>(points: &mut [Jacobian<C>]) {
    let positions: Vec<usize> = points
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.is_zero())
        .map(|(i, _)| i)
        .collect();
    let mut non_zero: Vec<Jacobian<C>> = positions.iter().map(|i| points[*i]).collect();
    // every point in `non_zero` is finite
    if Jacobian::batch_to_special_all_non_zeros(&mut non_zero).is_ok() {
        for (i, p) in positions.into_iter().zip(non_zero.into_iter()) {
            points[i] = p;
        }
    }
}

/// Compute `(g_factor * s_i * T, h_factor * s_i * H)` for every non-zero
/// `s_i`, as a sparse vector over `scalars`.
pub fn kc_batch_exp<T, H>(
    g_table: &FixedBaseTable<T>,
    h_table: &FixedBaseTable<H>,
    g_factor: &T::ScalarType,
    h_factor: &T::ScalarType,
    scalars: &[T::ScalarType],
) -> KnowledgeCommitmentVector<T, H>
where
    T: Group,
    H: Group<ScalarType = T::ScalarType>,
{
    let indices: Vec<usize> = scalars
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.is_zero())
        .map(|(i, _)| i)
        .collect();
    let values: Vec<KnowledgeCommitment<T, H>> = cfg_into_iter!(indices.clone())
        .map(|i| {
            let s = &scalars[i];
            KnowledgeCommitment::new(
                g_table.mul(&g_factor.mul(s)),
                h_table.mul(&h_factor.mul(s)),
            )
        })
        .collect();
    SparseVector {
        domain_size: scalars.len(),
        indices,
        values,
    }
}

/// Compute `sum_j scalars[j] * vec[min_idx + j]` over the stored entries with
/// `min_idx <= index < max_idx`. Coefficients equal to one are added directly,
/// the others go through a multi-exponentiation.
pub fn kc_multi_exp_with_mixed_addition<C1, C2>(
    vec: &KnowledgeCommitmentVector<Jacobian<C1>, Jacobian<C2>>,
    min_idx: usize,
    max_idx: usize,
    scalars: &[<Jacobian<C1> as Group>::ScalarType],
) -> KnowledgeCommitment<Jacobian<C1>, Jacobian<C2>>
where
    C1: SWCurveConfig,
    C2: SWCurveConfig,
    Jacobian<C1>: Group,
    Jacobian<C2>: Group<ScalarType = <Jacobian<C1> as Group>::ScalarType>,
{
    let mut acc = KnowledgeCommitment::zero();
    let mut exp_scalars = vec![];
    let mut exp_g = vec![];
    let mut exp_h = vec![];
    let max_idx = max_idx.min(min_idx.saturating_add(scalars.len()));

    for (i, kc) in vec.range(min_idx, max_idx) {
        let s = &scalars[i - min_idx];
        if s.is_zero() {
            continue;
        }
        if s.is_one() {
            acc = acc.mixed_add(kc);
        } else {
            exp_scalars.push(s);
            exp_g.push(&kc.g);
            exp_h.push(&kc.h);
        }
    }

    let g = Jacobian::<C1>::multi_exp(&exp_scalars, &exp_g);
    let h = Jacobian::<C2>::multi_exp(&exp_scalars, &exp_h);
    acc.add(&KnowledgeCommitment::new(g, h))
}
