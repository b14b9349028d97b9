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

//! Integer kernels subtract in `i64`, so a single difference never
//! overflows. Sums wrap on overflow instead of panicking.

use crate::Scalar;

impl Scalar for i32 {
    type Wide = i64;

    #[inline(always)]
    fn reduce_sum_of_d2(lhs: &[i32], rhs: &[i32]) -> i64 {
        reduce_sum_of_d2::reduce_sum_of_d2(lhs, rhs)
    }

    #[inline(always)]
    fn reduce_sum_of_abs_d(lhs: &[i32], rhs: &[i32]) -> i64 {
        reduce_sum_of_abs_d::reduce_sum_of_abs_d(lhs, rhs)
    }

    #[inline(always)]
    fn reduce_max_of_abs_d(lhs: &[i32], rhs: &[i32]) -> i64 {
        reduce_max_of_abs_d::reduce_max_of_abs_d(lhs, rhs)
    }

    #[inline(always)]
    fn reduce_sum_of_d2_over_s2(lhs: &[i32], rhs: &[i32], s: &[f32]) -> f32 {
        reduce_sum_of_d2_over_s2::reduce_sum_of_d2_over_s2(lhs, rhs, s)
    }

    #[inline(always)]
    fn reduce_sum_of_cumulative_d2_over_s2(lhs: &[i32], rhs: &[i32], s: &[f32]) -> f32 {
        reduce_sum_of_cumulative_d2_over_s2::reduce_sum_of_cumulative_d2_over_s2(lhs, rhs, s)
    }
}

mod reduce_sum_of_d2 {
    #[crate::multiversion("v4", "v3", "v2", "a2")]
    pub fn reduce_sum_of_d2(lhs: &[i32], rhs: &[i32]) -> i64 {
        assert_eq!(lhs.len(), rhs.len());
        let n = lhs.len();
        let mut d2 = 0i64;
        for i in 0..n {
            let d = lhs[i] as i64 - rhs[i] as i64;
            d2 = d2.wrapping_add(d.wrapping_mul(d));
        }
        d2
    }

    #[test]
    fn reduce_sum_of_d2_extreme_test() {
        let d2 = reduce_sum_of_d2(&[i32::MAX, 3], &[0, -4]);
        assert_eq!(d2, (i32::MAX as i64) * (i32::MAX as i64) + 49);
    }
}

mod reduce_sum_of_abs_d {
    #[crate::multiversion("v4", "v3", "v2", "a2")]
    pub fn reduce_sum_of_abs_d(lhs: &[i32], rhs: &[i32]) -> i64 {
        assert_eq!(lhs.len(), rhs.len());
        let n = lhs.len();
        let mut sum = 0i64;
        for i in 0..n {
            let d = lhs[i] as i64 - rhs[i] as i64;
            sum = sum.wrapping_add(d.abs());
        }
        sum
    }
}

mod reduce_max_of_abs_d {
    #[crate::multiversion("v4", "v3", "v2", "a2")]
    pub fn reduce_max_of_abs_d(lhs: &[i32], rhs: &[i32]) -> i64 {
        assert_eq!(lhs.len(), rhs.len());
        let n = lhs.len();
        let mut max = 0i64;
        for i in 0..n {
            let d = (lhs[i] as i64 - rhs[i] as i64).abs();
            if d > max {
                max = d;
            }
        }
        max
    }

    #[test]
    fn reduce_max_of_abs_d_extreme_test() {
        assert_eq!(
            reduce_max_of_abs_d(&[i32::MIN, 0], &[i32::MAX, 0]),
            u32::MAX as i64
        );
        assert_eq!(reduce_max_of_abs_d(&[], &[]), 0);
    }
}

mod reduce_sum_of_d2_over_s2 {
    #[crate::multiversion("v4", "v3", "v2", "a2")]
    pub fn reduce_sum_of_d2_over_s2(lhs: &[i32], rhs: &[i32], s: &[f32]) -> f32 {
        assert_eq!(lhs.len(), rhs.len());
        assert!(s.len() >= lhs.len());
        let n = lhs.len();
        let mut sum = 0.0f32;
        for i in 0..n {
            let d = lhs[i] as i64 - rhs[i] as i64;
            sum += d.wrapping_mul(d) as f32 / (s[i] * s[i]);
        }
        sum
    }
}

mod reduce_sum_of_cumulative_d2_over_s2 {
    #[crate::multiversion("v4", "v3", "v2", "a2")]
    pub fn reduce_sum_of_cumulative_d2_over_s2(lhs: &[i32], rhs: &[i32], s: &[f32]) -> f32 {
        assert_eq!(lhs.len(), rhs.len());
        assert!(s.len() >= lhs.len());
        let n = lhs.len();
        let mut d2 = 0.0f32;
        let mut sum = 0.0f32;
        for i in 0..n {
            let d = lhs[i] as i64 - rhs[i] as i64;
            d2 += d.wrapping_mul(d) as f32;
            sum += d2 / (s[i] * s[i]);
        }
        sum
    }
}

#[test]
fn reduce_metrics_test() {
    use rand::Rng;
    let mut rng = rand::rng();
    for _ in 0..if cfg!(not(miri)) { 256 } else { 1 } {
        let n = rng.random_range(0..1000);
        let lhs = (0..n)
            .map(|_| rng.random_range(-1000..=1000))
            .collect::<Vec<i32>>();
        let rhs = (0..n)
            .map(|_| rng.random_range(-1000..=1000))
            .collect::<Vec<i32>>();
        let diffs = lhs
            .iter()
            .zip(rhs.iter())
            .map(|(&x, &y)| (x - y) as i64)
            .collect::<Vec<_>>();
        assert_eq!(
            i32::reduce_sum_of_d2(&lhs, &rhs),
            diffs.iter().map(|d| d * d).sum::<i64>()
        );
        assert_eq!(
            i32::reduce_sum_of_abs_d(&lhs, &rhs),
            diffs.iter().map(|d| d.abs()).sum::<i64>()
        );
        assert_eq!(
            i32::reduce_max_of_abs_d(&lhs, &rhs),
            diffs.iter().map(|d| d.abs()).max().unwrap_or(0)
        );
    }
}

#[test]
fn reduce_sum_of_d2_over_zero_s2_test() {
    let result = i32::reduce_sum_of_d2_over_s2(&[1, 2], &[0, 2], &[0.0, 0.0]);
    // 1 / 0 + 0 / 0
    assert!(result.is_nan());
    let result = i32::reduce_sum_of_d2_over_s2(&[1, 2], &[0, 2], &[0.0, 1.0]);
    assert_eq!(result, f32::INFINITY);
}
