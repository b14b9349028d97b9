// This software is licensed under a dual license model:
//
// GNU Affero General Public License v3 (AGPLv3): You may use, modify, and
// distribute this software under the terms of the AGPLv3.
//
// Elastic License v2 (ELv2): You may also use, modify, and distribute this
// software under the Elastic License v2, which has specific restrictions.
//
// We welcome any commercial collaboration or support. For inquiries
// regarding the licenses, please contact us at:
// vectorchord-inquiry@tensorchord.ai
//
// Copyright (c) 2025 TensorChord Inc.

//! Streaming per-dimension mean and standard deviation.
//!
//! A group starts as [`Accumulator::Fresh`] holding its first row. The next
//! row expands it into [`Moments`]. Between calls the state travels as a flat
//! `f32` buffer of length `3n + 1`: `sum`, `sum_of_x2` and `count` sections
//! followed by a checksum cell holding `-n`.

mod packed;

pub use packed::checksum;

use simd::Floating;

#[derive(Debug, Clone, PartialEq)]
pub enum Accumulator {
    /// A raw row that has not been expanded yet.
    Fresh(Vec<f32>),
    Expanded(Moments),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Moments {
    dims: u32,
    sum: Vec<f32>,
    sum_of_x2: Vec<f32>,
    count: Vec<f32>,
}

impl Moments {
    /// Folds `row` in as the first observation.
    pub fn new(row: &[f32]) -> Self {
        let mut sum_of_x2 = row.to_vec();
        f32::vector_square_inplace(&mut sum_of_x2);
        Self {
            dims: row.len() as u32,
            sum: row.to_vec(),
            sum_of_x2,
            count: vec![1.0; row.len()],
        }
    }

    #[inline(always)]
    pub fn dims(&self) -> u32 {
        self.dims
    }

    #[inline(always)]
    pub fn sum(&self) -> &[f32] {
        &self.sum
    }

    #[inline(always)]
    pub fn sum_of_x2(&self) -> &[f32] {
        &self.sum_of_x2
    }

    #[inline(always)]
    pub fn count(&self) -> &[f32] {
        &self.count
    }

    pub fn push(&mut self, row: &[f32]) {
        assert_eq!(self.dims as usize, row.len());
        f32::vector_add_inplace(&mut self.sum, row);
        f32::vector_add_square_inplace(&mut self.sum_of_x2, row);
        f32::vector_add_scalar_inplace(&mut self.count, 1.0);
    }

    /// Combines two partial states of the same group. Equivalent to having
    /// pushed every row of `other` into `self`.
    pub fn merge(&mut self, other: &Self) {
        assert_eq!(self.dims, other.dims);
        f32::vector_add_inplace(&mut self.sum, &other.sum);
        f32::vector_add_inplace(&mut self.sum_of_x2, &other.sum_of_x2);
        f32::vector_add_inplace(&mut self.count, &other.count);
    }

    pub fn mean(&self) -> Vec<f32> {
        let mut result = self.sum.clone();
        f32::vector_div_inplace(&mut result, &self.count);
        result
    }

    /// Population standard deviation. A non-positive variance, including
    /// one produced by cancellation, yields `0`.
    pub fn std_dev(&self) -> Vec<f32> {
        let n = self.dims as usize;
        let mut result = vec![0.0f32; n];
        for i in 0..n {
            let mean = self.sum[i] / self.count[i];
            let variance = self.sum_of_x2[i] / self.count[i] - mean * mean;
            if variance > 0.0 {
                result[i] = variance.sqrt();
            }
        }
        result
    }
}

impl Accumulator {
    #[inline(always)]
    pub fn new(first: Vec<f32>) -> Self {
        Self::Fresh(first)
    }

    /// Folds `row` into the state.
    ///
    /// A fresh state of the same length is expanded with itself as the first
    /// observation and then receives `row`. A state whose layout fits neither
    /// case is returned unchanged.
    pub fn accumulate(self, row: &[f32]) -> Self {
        match self {
            Self::Fresh(first) if first.len() == row.len() => {
                if row.is_empty() {
                    return Self::Fresh(first);
                }
                let mut moments = Moments::new(&first);
                moments.push(row);
                Self::Expanded(moments)
            }
            Self::Expanded(mut moments) if moments.dims as usize == row.len() => {
                moments.push(row);
                Self::Expanded(moments)
            }
            this => {
                log::warn!(
                    "accumulator layout mismatch: state length {} does not fit a row of {} elements",
                    this.packed_len(),
                    row.len()
                );
                this
            }
        }
    }

    /// Per-dimension mean. A fresh state passes through unchanged.
    pub fn finalize_mean(self) -> Vec<f32> {
        match self {
            Self::Expanded(moments) => moments.mean(),
            Self::Fresh(first) => {
                log::warn!(
                    "mean of an unexpanded accumulator of length {}",
                    first.len()
                );
                first
            }
        }
    }

    /// Per-dimension standard deviation. A fresh state yields zeros of its
    /// own length.
    pub fn finalize_std_dev(self) -> Vec<f32> {
        match self {
            Self::Expanded(moments) => moments.std_dev(),
            Self::Fresh(first) => {
                log::warn!(
                    "standard deviation of an unexpanded accumulator of length {}",
                    first.len()
                );
                vec![0.0; first.len()]
            }
        }
    }

    fn packed_len(&self) -> usize {
        match self {
            Self::Fresh(first) => first.len(),
            Self::Expanded(moments) => 3 * moments.dims as usize + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn two_rows() {
        let state = Accumulator::new(vec![4.0, 6.0]).accumulate(&[8.0, 10.0]);
        assert_eq!(state.clone().finalize_mean(), vec![6.0, 8.0]);
        assert_eq!(state.finalize_std_dev(), vec![2.0, 2.0]);
    }

    #[test]
    fn single_row_fallbacks_differ() {
        let state = Accumulator::new(vec![4.0, 6.0]);
        // mean passes the row through, std-dev drops it
        assert_eq!(state.clone().finalize_mean(), vec![4.0, 6.0]);
        assert_eq!(state.finalize_std_dev(), vec![0.0, 0.0]);
    }

    #[test]
    fn mismatch_passes_through() {
        let state = Accumulator::new(vec![1.0, 2.0]).accumulate(&[3.0, 4.0]);
        let before = state.clone();
        assert_eq!(state.accumulate(&[1.0, 2.0, 3.0]), before);
        let fresh = Accumulator::new(vec![1.0]);
        assert_eq!(fresh.clone().accumulate(&[1.0, 2.0]), fresh);
    }

    #[test]
    fn constant_rows_have_zero_std_dev() {
        let mut state = Accumulator::new(vec![0.5, -8.0, 1024.0]);
        for _ in 0..100 {
            state = state.accumulate(&[0.5, -8.0, 1024.0]);
        }
        assert_eq!(state.finalize_std_dev(), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn merge_of_partitions() {
        const EPSILON: f32 = 1e-3;
        let mut rng = rand::rng();
        for _ in 0..16 {
            let n = rng.random_range(1..32);
            let rows = (0..rng.random_range(4..64))
                .map(|_| {
                    (0..n)
                        .map(|_| rng.random_range(-10.0..10.0f32))
                        .collect::<Vec<_>>()
                })
                .collect::<Vec<_>>();
            let split = rng.random_range(1..rows.len());
            let mut whole = Moments::new(&rows[0]);
            for row in &rows[1..] {
                whole.push(row);
            }
            let mut left = Moments::new(&rows[0]);
            for row in &rows[1..split] {
                left.push(row);
            }
            let mut right = Moments::new(&rows[split]);
            for row in &rows[split + 1..] {
                right.push(row);
            }
            left.merge(&right);
            assert_eq!(left.count(), whole.count());
            for (a, b) in left.mean().iter().zip(whole.mean().iter()) {
                assert!((a - b).abs() < EPSILON, "merged = {a}, whole = {b}.");
            }
            for (a, b) in left.std_dev().iter().zip(whole.std_dev().iter()) {
                assert!((a - b).abs() < EPSILON, "merged = {a}, whole = {b}.");
            }
        }
    }
}
