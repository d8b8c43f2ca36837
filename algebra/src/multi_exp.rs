use crate::prelude::*;
use crate::utils::ceil_log2;
use ark_std::{cfg_into_iter, cfg_iter};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Read `width` bits of a little-endian limb vector starting at bit `start`.
fn window_digit(limbs: &[u64], start: usize, width: usize) -> usize {
    let limb = start / 64;
    let offset = start % 64;
    if limb >= limbs.len() {
        return 0;
    }
    let mut bits = limbs[limb] >> offset;
    if offset + width > 64 && limb + 1 < limbs.len() {
        bits |= limbs[limb + 1] << (64 - offset);
    }
    (bits & ((1u64 << width) - 1)) as usize
}

fn scalar_bits<S: Scalar>() -> usize {
    S::capacity() + 1
}

/// Compute `sum_i scalars[i] * points[i]` with the bucket method.
///
/// Extra entries in the longer of the two slices are ignored, and an
/// empty input returns the identity.
pub fn pippenger<G: Group>(scalars: &[&G::ScalarType], points: &[&G]) -> G {
    let size = ark_std::cmp::min(scalars.len(), points.len());
    if size == 0 {
        return G::get_identity();
    }

    let c = if size < 32 {
        3
    } else {
        (ceil_log2(size) as usize * 69) / 100 + 2
    };

    let limbs: Vec<Vec<u64>> = scalars[..size]
        .iter()
        .map(|s| s.get_little_endian_u64())
        .collect();
    let num_bits = scalar_bits::<G::ScalarType>();
    let window_starts: Vec<usize> = (0..num_bits).step_by(c).collect();

    let window_sums: Vec<G> = cfg_into_iter!(window_starts)
        .map(|start| {
            let mut buckets = vec![G::get_identity(); (1 << c) - 1];
            for (scalar, point) in limbs.iter().zip(points.iter()) {
                let digit = window_digit(scalar, start, c);
                if digit != 0 {
                    buckets[digit - 1].add_assign(*point);
                }
            }
            // sum_j j * buckets[j - 1]
            let mut running_sum = G::get_identity();
            let mut res = G::get_identity();
            for b in buckets.iter().rev() {
                running_sum.add_assign(b);
                res.add_assign(&running_sum);
            }
            res
        })
        .collect();

    let mut iter = window_sums.into_iter().rev();
    let mut total = match iter.next() {
        Some(highest) => highest,
        None => return G::get_identity(),
    };
    for window in iter {
        for _ in 0..c {
            total = total.double();
        }
        total.add_assign(&window);
    }
    total
}

/// A window table of multiples of a fixed base, for multiplying one point by many scalars.
pub struct FixedBaseTable<G: Group> {
    window: usize,
    table: Vec<Vec<G>>,
}

impl<G: Group> FixedBaseTable<G> {
    /// Pick a window size suited to `num_scalars` multiplications.
    pub fn window_size(num_scalars: usize) -> usize {
        if num_scalars < 32 {
            return 3;
        }
        let log = ceil_log2(num_scalars) as usize;
        log.saturating_sub(ceil_log2(log) as usize).clamp(3, 12)
    }

    /// Build the table `table[i][j] = j * 2^(window * i) * base`.
    pub fn new(base: &G, window: usize) -> Self {
        let num_bits = scalar_bits::<G::ScalarType>();
        let outerc = (num_bits + window - 1) / window;
        let in_window = 1usize << window;

        let mut table = Vec::with_capacity(outerc);
        let mut g_outer = *base;
        for _ in 0..outerc {
            let mut row = Vec::with_capacity(in_window);
            let mut g_inner = G::get_identity();
            for _ in 0..in_window {
                row.push(g_inner);
                g_inner.add_assign(&g_outer);
            }
            table.push(row);
            for _ in 0..window {
                g_outer = g_outer.double();
            }
        }
        Self { window, table }
    }

    /// Multiply the base by `scalar`.
    pub fn mul(&self, scalar: &G::ScalarType) -> G {
        let limbs = scalar.get_little_endian_u64();
        let mut res = G::get_identity();
        for (i, row) in self.table.iter().enumerate() {
            let digit = window_digit(&limbs, i * self.window, self.window);
            if digit != 0 {
                res.add_assign(&row[digit]);
            }
        }
        res
    }

    /// Multiply the base by each scalar.
    pub fn batch_mul(&self, scalars: &[G::ScalarType]) -> Vec<G> {
        cfg_iter!(scalars).map(|s| self.mul(s)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::FixedBaseTable;
    use crate::bn254::{BN254Scalar, BN254G1, BN254G2};
    use crate::prelude::*;

    #[test]
    fn test_multiexp_bn254_g1() {
        run_multiexp_test::<BN254G1>();
    }

    #[test]
    fn test_multiexp_bn254_g2() {
        run_multiexp_test::<BN254G2>();
    }

    fn run_multiexp_test<G: Group>() {
        let g = G::multi_exp(&[], &[]);
        assert_eq!(g, G::get_identity());

        let g1 = G::get_base();
        let zero = G::ScalarType::from(0u32);
        let g = G::multi_exp(&[&zero], &[&g1]);
        assert_eq!(g, G::get_identity());

        let one = G::ScalarType::from(1u32);
        let g = G::multi_exp(&[&one, &zero], &[&g1, &g1]);
        assert_eq!(g, G::get_base());

        let g2 = g1.add(&g1);
        let g3 = g1.mul(&G::ScalarType::from(500u32));
        let thousand = G::ScalarType::from(1000u32);
        let two = G::ScalarType::from(2u32);
        let three = G::ScalarType::from(3u32);
        let g = G::multi_exp(&[&thousand, &two, &three], &[&g1, &g2, &g3]);
        let expected = G::get_base().mul(&G::ScalarType::from(1000u32 + 4 + 1500));
        assert_eq!(g, expected);

        let mut prng = test_rng();
        let scalars: Vec<_> = (0..40).map(|_| G::ScalarType::random(&mut prng)).collect();
        let points: Vec<_> = (0..40).map(|_| G::random(&mut prng)).collect();
        let mut expected = G::get_identity();
        for (s, p) in scalars.iter().zip(points.iter()) {
            expected.add_assign(&p.mul(s));
        }
        let g = G::multi_exp(
            &scalars.iter().collect::<Vec<_>>(),
            &points.iter().collect::<Vec<_>>(),
        );
        assert_eq!(g, expected);
    }

    #[test]
    fn fixed_base_table_matches_scalar_mul() {
        let mut prng = test_rng();
        let base = BN254G1::random(&mut prng);
        let mut scalars: Vec<_> = (0..10).map(|_| BN254Scalar::random(&mut prng)).collect();
        scalars.push(BN254Scalar::zero());
        scalars.push(-BN254Scalar::one());

        for window in [3, FixedBaseTable::<BN254G1>::window_size(5000)] {
            let table = FixedBaseTable::new(&base, window);
            let res = table.batch_mul(&scalars);
            for (s, p) in scalars.iter().zip(res.iter()) {
                assert_eq!(*p, base.mul(s));
            }
        }

        let base = BN254G2::get_base();
        let table = FixedBaseTable::new(&base, 4);
        assert_eq!(table.mul(&scalars[0]), base.mul(&scalars[0]));
    }
}
