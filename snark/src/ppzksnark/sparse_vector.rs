use crate::errors::{Result, SnarkError};
use crate::utils::{read_len, read_vec, write_len};
use pghr_algebra::prelude::*;

/// A vector of length `domain_size` of which only the entries at `indices`
/// (strictly increasing) are stored; the others are zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SparseVector<T> {
    /// The length of the dense vector.
    pub domain_size: usize,
    /// The positions of the stored entries.
    pub indices: Vec<usize>,
    /// The stored entries.
    pub values: Vec<T>,
}

impl<T> Default for SparseVector<T> {
    fn default() -> Self {
        Self {
            domain_size: 0,
            indices: vec![],
            values: vec![],
        }
    }
}

impl<T> SparseVector<T> {
    /// Store every entry of a dense vector.
    pub fn from_dense(values: Vec<T>) -> Self {
        Self {
            domain_size: values.len(),
            indices: (0..values.len()).collect(),
            values,
        }
    }

    /// Return the number of stored entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Return true if no entry is stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Return the stored entry at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.indices
            .binary_search(&index)
            .ok()
            .map(|pos| &self.values[pos])
    }

    /// Iterate over `(index, value)` for the stored entries with `min_idx <= index < max_idx`.
    pub fn range(&self, min_idx: usize, max_idx: usize) -> impl Iterator<Item = (usize, &T)> {
        let start = self.indices.partition_point(|i| *i < min_idx);
        let end = self.indices.partition_point(|i| *i < max_idx);
        self.indices[start..end.max(start)]
            .iter()
            .copied()
            .zip(self.values[start..end.max(start)].iter())
    }

    /// Check that the indices are strictly increasing and below the domain size.
    pub fn is_valid(&self) -> bool {
        self.indices.len() == self.values.len()
            && self.indices.windows(2).all(|w| w[0] < w[1])
            && self.indices.last().map_or(true, |i| *i < self.domain_size)
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>, mut write_value: impl FnMut(&mut Vec<u8>, &T)) {
        write_len(out, self.domain_size);
        write_len(out, self.indices.len());
        for (i, v) in self.indices.iter().zip(self.values.iter()) {
            write_len(out, *i);
            write_value(out, v);
        }
    }

    pub(crate) fn read(
        bytes: &mut &[u8],
        value_len: usize,
        mut read_value: impl FnMut(&mut &[u8]) -> Result<T>,
    ) -> Result<Self> {
        let domain_size = read_len(bytes)?;
        let entries = read_vec(bytes, 8 + value_len, |b| {
            let index = read_len(b)?;
            let value = read_value(b)?;
            Ok((index, value))
        })?;
        let (indices, values) = entries.into_iter().unzip();
        let res = Self {
            domain_size,
            indices,
            values,
        };
        if !res.is_valid() {
            return Err(SnarkError::Algebra(AlgebraError::DeserializationError));
        }
        Ok(res)
    }
}

impl<G: Group> SparseVector<G> {
    /// Compute `sum_j scalars[j] * self[offset + j]` over the stored entries in
    /// that window, returning it with the vector of the remaining entries.
    pub fn accumulate(&self, scalars: &[G::ScalarType], offset: usize) -> (G, SparseVector<G>) {
        let end = offset.saturating_add(scalars.len());
        let mut acc_scalars = vec![];
        let mut acc_points = vec![];
        let mut rest = SparseVector {
            domain_size: self.domain_size,
            indices: vec![],
            values: vec![],
        };
        for (i, v) in self.indices.iter().zip(self.values.iter()) {
            if *i >= offset && *i < end {
                acc_scalars.push(&scalars[*i - offset]);
                acc_points.push(v);
            } else {
                rest.indices.push(*i);
                rest.values.push(*v);
            }
        }
        (G::multi_exp(&acc_scalars, &acc_points), rest)
    }
}

/// A vector of group elements `(first, rest)` where `rest` is consumed by
/// folding primary inputs into `first`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccumulationVector<G> {
    /// The accumulated value.
    pub first: G,
    /// The entries not accumulated yet.
    pub rest: SparseVector<G>,
}

impl<G: Group> AccumulationVector<G> {
    /// Create an accumulation vector from its base and a dense vector.
    pub fn new(first: G, rest: Vec<G>) -> Self {
        Self {
            first,
            rest: SparseVector::from_dense(rest),
        }
    }

    /// Return the number of inputs the vector was built for.
    #[inline]
    pub fn domain_size(&self) -> usize {
        self.rest.domain_size
    }

    /// Return the number of group elements held.
    #[inline]
    pub fn size(&self) -> usize {
        1 + self.rest.len()
    }

    /// Return true if every entry has been accumulated.
    #[inline]
    pub fn is_fully_accumulated(&self) -> bool {
        self.rest.is_empty()
    }

    /// Fold `scalars` into `first` using the entries at `offset..offset + scalars.len()`.
    pub fn accumulate_chunk(&self, scalars: &[G::ScalarType], offset: usize) -> Self {
        let (acc, rest) = self.rest.accumulate(scalars, offset);
        Self {
            first: self.first.add(&acc),
            rest,
        }
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        crate::utils::write_group(out, &self.first);
        self.rest.write(out, |o, p| crate::utils::write_group(o, p));
    }

    pub(crate) fn read(bytes: &mut &[u8]) -> Result<Self> {
        let first = crate::utils::read_group(bytes)?;
        let rest = SparseVector::read(bytes, G::COMPRESSED_LEN, crate::utils::read_group::<G>)?;
        Ok(Self { first, rest })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pghr_algebra::bn254::{BN254Scalar, BN254G1};

    #[test]
    fn accumulation() {
        let mut prng = test_rng();
        let base = BN254G1::random(&mut prng);
        let points: Vec<BN254G1> = (0..6).map(|_| BN254G1::random(&mut prng)).collect();
        let scalars: Vec<BN254Scalar> = (0..6).map(|_| BN254Scalar::random(&mut prng)).collect();
        let av = AccumulationVector::new(base, points.clone());
        assert_eq!(av.domain_size(), 6);
        assert_eq!(av.size(), 7);

        let full = av.accumulate_chunk(&scalars, 0);
        assert!(full.is_fully_accumulated());
        let expected = points
            .iter()
            .zip(scalars.iter())
            .fold(base, |acc, (p, s)| acc.add(&p.mul(s)));
        assert_eq!(full.first, expected);

        // two chunks give the same result as one
        let half = av.accumulate_chunk(&scalars[..2], 0);
        assert_eq!(half.rest.len(), 4);
        assert_eq!(half.rest.indices, vec![2, 3, 4, 5]);
        let both = half.accumulate_chunk(&scalars[2..], 2);
        assert_eq!(both.first, full.first);
        assert!(both.is_fully_accumulated());

        let mut out = vec![];
        half.write(&mut out);
        let mut bytes = out.as_slice();
        assert_eq!(AccumulationVector::<BN254G1>::read(&mut bytes).unwrap(), half);
        assert!(bytes.is_empty());
    }

    #[test]
    fn sparse_lookup_and_validation() {
        let v = SparseVector {
            domain_size: 10,
            indices: vec![1, 4, 7],
            values: vec!['a', 'b', 'c'],
        };
        assert!(v.is_valid());
        assert_eq!(v.get(4), Some(&'b'));
        assert_eq!(v.get(5), None);
        assert_eq!(v.range(2, 8).collect::<Vec<_>>(), vec![(4, &'b'), (7, &'c')]);
        assert_eq!(v.range(8, 2).count(), 0);

        let unsorted = SparseVector {
            domain_size: 10,
            indices: vec![4, 1],
            values: vec!['a', 'b'],
        };
        assert!(!unsorted.is_valid());
        let outside = SparseVector {
            domain_size: 4,
            indices: vec![4],
            values: vec!['a'],
        };
        assert!(!outside.is_valid());
    }
}
