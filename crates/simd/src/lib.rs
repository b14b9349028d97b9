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

#![allow(unsafe_code)]

mod floating_f32;
mod integer_i32;

pub mod sparse;

/// Element types a dense feature vector can hold.
///
/// Distances between integer vectors are computed on differences widened to
/// `i64`, so `Wide` is `i64` for `i32` and `f32` for `f32`.
pub trait Scalar:
    Copy + Send + Sync + std::fmt::Debug + Default + 'static + PartialEq + PartialOrd
{
    type Wide: Copy + std::fmt::Debug + Default + PartialEq + PartialOrd;

    fn reduce_sum_of_d2(lhs: &[Self], rhs: &[Self]) -> Self::Wide;
    fn reduce_sum_of_abs_d(lhs: &[Self], rhs: &[Self]) -> Self::Wide;
    fn reduce_max_of_abs_d(lhs: &[Self], rhs: &[Self]) -> Self::Wide;
    fn reduce_sum_of_d2_over_s2(lhs: &[Self], rhs: &[Self], s: &[f32]) -> f32;
    fn reduce_sum_of_cumulative_d2_over_s2(lhs: &[Self], rhs: &[Self], s: &[f32]) -> f32;
}

/// Element-wise algebra on `f32` slices. Binary kernels require equal
/// lengths; callers truncate to the shorter operand first.
pub trait Floating: Scalar {
    fn reduce_sum_of_x2(this: &[Self]) -> f32;

    fn vector_add_inplace(lhs: &mut [Self], rhs: &[Self]);
    fn vector_sub_inplace(lhs: &mut [Self], rhs: &[Self]);
    fn vector_mul_inplace(lhs: &mut [Self], rhs: &[Self]);
    fn vector_div_inplace(lhs: &mut [Self], rhs: &[Self]);
    fn vector_min_inplace(lhs: &mut [Self], rhs: &[Self]);
    fn vector_max_inplace(lhs: &mut [Self], rhs: &[Self]);
    fn vector_square_inplace(this: &mut [Self]);
    fn vector_sqrt_inplace(this: &mut [Self]);
    fn vector_add_square_inplace(lhs: &mut [Self], rhs: &[Self]);
    fn vector_add_scalar_inplace(lhs: &mut [Self], rhs: f32);
}

mod internal {
    #[cfg(target_arch = "x86_64")]
    simd_macros::define_is_cpu_detected!("x86_64");

    #[cfg(target_arch = "aarch64")]
    simd_macros::define_is_cpu_detected!("aarch64");

    #[cfg(target_arch = "x86_64")]
    #[allow(unused_imports)]
    pub use is_x86_64_cpu_detected;

    #[cfg(target_arch = "aarch64")]
    #[allow(unused_imports)]
    pub use is_aarch64_cpu_detected;

    #[cfg(target_arch = "x86_64")]
    pub fn is_v4_detected() -> bool {
        std::arch::is_x86_feature_detected!("avx512bw")
            && std::arch::is_x86_feature_detected!("avx512cd")
            && std::arch::is_x86_feature_detected!("avx512dq")
            && std::arch::is_x86_feature_detected!("avx512vl")
            && std::arch::is_x86_feature_detected!("bmi1")
            && std::arch::is_x86_feature_detected!("bmi2")
            && std::arch::is_x86_feature_detected!("lzcnt")
            && std::arch::is_x86_feature_detected!("movbe")
            && std::arch::is_x86_feature_detected!("popcnt")
    }

    #[cfg(target_arch = "x86_64")]
    pub fn is_v3_detected() -> bool {
        std::arch::is_x86_feature_detected!("avx2")
            && std::arch::is_x86_feature_detected!("fma")
            && std::arch::is_x86_feature_detected!("bmi1")
            && std::arch::is_x86_feature_detected!("bmi2")
            && std::arch::is_x86_feature_detected!("lzcnt")
            && std::arch::is_x86_feature_detected!("movbe")
            && std::arch::is_x86_feature_detected!("popcnt")
    }

    #[cfg(target_arch = "x86_64")]
    pub fn is_v2_detected() -> bool {
        std::arch::is_x86_feature_detected!("sse4.2")
            && std::arch::is_x86_feature_detected!("popcnt")
    }

    #[cfg(target_arch = "aarch64")]
    pub fn is_a2_detected() -> bool {
        std::arch::is_aarch64_feature_detected!("neon")
    }
}

pub use simd_macros::{multiversion, target_cpu};

#[cfg(target_arch = "x86_64")]
#[allow(unused_imports)]
pub use internal::is_x86_64_cpu_detected as is_cpu_detected;

#[cfg(target_arch = "aarch64")]
#[allow(unused_imports)]
pub use internal::is_aarch64_cpu_detected as is_cpu_detected;
