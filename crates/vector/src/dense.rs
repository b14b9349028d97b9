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
use simd::{Floating, Scalar};

/// A dense vector: position is dimension.
#[derive(Debug, Clone, PartialEq)]
#[repr(transparent)]
pub struct DenseOwned<S>(Vec<S>);

impl<S: Scalar> DenseOwned<S> {
    #[inline(always)]
    pub fn new(slice: Vec<S>) -> Self {
        Self(slice)
    }

    #[inline(always)]
    pub fn slice(&self) -> &[S] {
        self.0.as_slice()
    }

    #[inline(always)]
    pub fn into_vec(self) -> Vec<S> {
        self.0
    }
}

impl<S: Scalar> VectorOwned for DenseOwned<S> {
    type Borrowed<'a> = DenseBorrowed<'a, S>;

    #[inline(always)]
    fn as_borrowed(&self) -> DenseBorrowed<'_, S> {
        DenseBorrowed(self.0.as_slice())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(transparent)]
pub struct DenseBorrowed<'a, S>(&'a [S]);

impl<'a, S: Scalar> DenseBorrowed<'a, S> {
    #[inline(always)]
    pub fn new(slice: &'a [S]) -> Self {
        Self(slice)
    }

    #[inline(always)]
    pub fn slice(&self) -> &'a [S] {
        self.0
    }

    /// Squared Euclidean distance.
    #[inline(always)]
    pub fn operator_l2s(self, rhs: Self) -> S::Wide {
        S::reduce_sum_of_d2(self.0, rhs.0)
    }

    /// Manhattan distance.
    #[inline(always)]
    pub fn operator_l1(self, rhs: Self) -> S::Wide {
        S::reduce_sum_of_abs_d(self.0, rhs.0)
    }

    /// Chebyshev (chessboard) distance.
    #[inline(always)]
    pub fn operator_linf(self, rhs: Self) -> S::Wide {
        S::reduce_max_of_abs_d(self.0, rhs.0)
    }

    /// Mahalanobis distance with a diagonal covariance, without the final
    /// square root: `Σ (x_i - y_i)² / σ_i²`. A zero `σ_i` yields infinity or
    /// NaN.
    #[inline(always)]
    pub fn operator_mahalanobis(self, rhs: Self, std_dev: DenseBorrowed<'_, f32>) -> f32 {
        S::reduce_sum_of_d2_over_s2(self.0, rhs.0, std_dev.0)
    }

    /// Like [`Self::operator_mahalanobis`], but the numerator of the `i`-th
    /// term is the running sum of squared differences of dimensions `0..=i`.
    /// Reproduces scores computed by older deployments.
    #[inline(always)]
    pub fn operator_mahalanobis_cumulative(
        self,
        rhs: Self,
        std_dev: DenseBorrowed<'_, f32>,
    ) -> f32 {
        S::reduce_sum_of_cumulative_d2_over_s2(self.0, rhs.0, std_dev.0)
    }
}

impl DenseBorrowed<'_, f32> {
    #[inline(always)]
    pub fn norm(&self) -> f32 {
        f32::reduce_sum_of_x2(self.0).sqrt()
    }
}

impl<S: Scalar> VectorBorrowed for DenseBorrowed<'_, S> {
    type Owned = DenseOwned<S>;

    #[inline(always)]
    fn own(&self) -> DenseOwned<S> {
        DenseOwned(self.0.to_vec())
    }

    #[inline(always)]
    fn len(&self) -> u32 {
        self.0.len() as u32
    }
}

// Binary operators consume the result operand and overwrite it in place. The
// result keeps only the positions both operands have.
impl DenseOwned<f32> {
    #[inline(always)]
    fn zip_with(mut self, rhs: DenseBorrowed<'_, f32>, f: fn(&mut [f32], &[f32])) -> Self {
        let n = std::cmp::min(self.0.len(), rhs.0.len());
        self.0.truncate(n);
        f(&mut self.0, &rhs.0[..n]);
        self
    }

    pub fn operator_add(self, rhs: DenseBorrowed<'_, f32>) -> Self {
        self.zip_with(rhs, f32::vector_add_inplace)
    }

    pub fn operator_sub(self, rhs: DenseBorrowed<'_, f32>) -> Self {
        self.zip_with(rhs, f32::vector_sub_inplace)
    }

    pub fn operator_mul(self, rhs: DenseBorrowed<'_, f32>) -> Self {
        self.zip_with(rhs, f32::vector_mul_inplace)
    }

    /// Division by zero is not special-cased.
    pub fn operator_div(self, rhs: DenseBorrowed<'_, f32>) -> Self {
        self.zip_with(rhs, f32::vector_div_inplace)
    }

    pub fn operator_least(self, rhs: DenseBorrowed<'_, f32>) -> Self {
        self.zip_with(rhs, f32::vector_min_inplace)
    }

    pub fn operator_greatest(self, rhs: DenseBorrowed<'_, f32>) -> Self {
        self.zip_with(rhs, f32::vector_max_inplace)
    }

    pub fn function_square(mut self) -> Self {
        f32::vector_square_inplace(&mut self.0);
        self
    }

    /// Negative elements become NaN.
    pub fn function_sqrt(mut self) -> Self {
        f32::vector_sqrt_inplace(&mut self.0);
        self
    }
}
