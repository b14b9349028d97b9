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

use crate::{VectorBorrowed, VectorOwned};
use simd::Floating;

/// A document or term vector in postings form: ascending, unique `indices`
/// paired with `weights`.
///
/// Ordering of `indices` is a caller contract and is not checked.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseOwned {
    indices: Vec<i32>,
    weights: Vec<f32>,
}

impl SparseOwned {
    #[inline(always)]
    pub fn new(indices: Vec<i32>, weights: Vec<f32>) -> Self {
        Self::new_checked(indices, weights).expect("invalid data")
    }

    /// Weights past the last index are dropped. Returns `None` if there are
    /// fewer weights than indices.
    #[inline(always)]
    pub fn new_checked(indices: Vec<i32>, mut weights: Vec<f32>) -> Option<Self> {
        if weights.len() < indices.len() {
            return None;
        }
        weights.truncate(indices.len());
        Some(Self { indices, weights })
    }

    #[inline(always)]
    pub fn indices(&self) -> &[i32] {
        &self.indices
    }

    #[inline(always)]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }
}

impl VectorOwned for SparseOwned {
    type Borrowed<'a> = SparseBorrowed<'a>;

    #[inline(always)]
    fn as_borrowed(&self) -> SparseBorrowed<'_> {
        SparseBorrowed {
            indices: &self.indices,
            weights: &self.weights,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparseBorrowed<'a> {
    indices: &'a [i32],
    weights: &'a [f32],
}

impl<'a> SparseBorrowed<'a> {
    #[inline(always)]
    pub fn new(indices: &'a [i32], weights: &'a [f32]) -> Self {
        Self::new_checked(indices, weights).expect("invalid data")
    }

    /// Returns `None` if there are fewer weights than indices.
    #[inline(always)]
    pub fn new_checked(indices: &'a [i32], weights: &'a [f32]) -> Option<Self> {
        if weights.len() < indices.len() {
            return None;
        }
        Some(Self {
            indices,
            weights: &weights[..indices.len()],
        })
    }

    #[inline(always)]
    pub fn indices(&self) -> &'a [i32] {
        self.indices
    }

    #[inline(always)]
    pub fn weights(&self) -> &'a [f32] {
        self.weights
    }

    #[inline(always)]
    pub fn norm(&self) -> f32 {
        f32::reduce_sum_of_x2(self.weights).sqrt()
    }

    /// Number of shared indices.
    #[inline(always)]
    pub fn operator_boolean(self, rhs: Self) -> u32 {
        simd::sparse::reduce_count_of_intersection(self.indices, rhs.indices)
    }

    #[inline(always)]
    pub fn operator_dot(self, rhs: Self) -> f32 {
        simd::sparse::reduce_sum_of_xy(self.indices, self.weights, rhs.indices, rhs.weights)
    }

    /// Cosine similarity with both norms computed during the merge.
    pub fn operator_cos(self, rhs: Self) -> f32 {
        let (xy, x2, y2) = simd::sparse::reduce_sum_of_xy_x2_y2(
            self.indices,
            self.weights,
            rhs.indices,
            rhs.weights,
        );
        if xy == 0.0 || x2 == 0.0 || y2 == 0.0 {
            return 0.0;
        }
        xy / (x2.sqrt() * y2.sqrt())
    }

    /// Cosine similarity against precomputed L2 norms.
    pub fn operator_cos_with_norms(self, norm: f32, rhs: Self, rhs_norm: f32) -> f32 {
        let xy = self.operator_dot(rhs);
        if xy == 0.0 || norm == 0.0 || rhs_norm == 0.0 {
            return 0.0;
        }
        xy / (norm * rhs_norm)
    }
}

impl VectorBorrowed for SparseBorrowed<'_> {
    type Owned = SparseOwned;

    #[inline(always)]
    fn own(&self) -> SparseOwned {
        SparseOwned {
            indices: self.indices.to_vec(),
            weights: self.weights.to_vec(),
        }
    }

    #[inline(always)]
    fn len(&self) -> u32 {
        self.indices.len() as u32
    }
}
