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

use crate::{Floating, Scalar};

impl Scalar for f32 {
    type Wide = f32;

    #[inline(always)]
    fn reduce_sum_of_d2(lhs: &[f32], rhs: &[f32]) -> f32 {
        reduce_sum_of_d2::reduce_sum_of_d2(lhs, rhs)
    }

    #[inline(always)]
    fn reduce_sum_of_abs_d(lhs: &[f32], rhs: &[f32]) -> f32 {
        reduce_sum_of_abs_d::reduce_sum_of_abs_d(lhs, rhs)
    }

    #[inline(always)]
    fn reduce_max_of_abs_d(lhs: &[f32], rhs: &[f32]) -> f32 {
        reduce_max_of_abs_d::reduce_max_of_abs_d(lhs, rhs)
    }

    #[inline(always)]
    fn reduce_sum_of_d2_over_s2(lhs: &[f32], rhs: &[f32], s: &[f32]) -> f32 {
        reduce_sum_of_d2_over_s2::reduce_sum_of_d2_over_s2(lhs, rhs, s)
    }

    #[inline(always)]
    fn reduce_sum_of_cumulative_d2_over_s2(lhs: &[f32], rhs: &[f32], s: &[f32]) -> f32 {
        reduce_sum_of_cumulative_d2_over_s2::reduce_sum_of_cumulative_d2_over_s2(lhs, rhs, s)
    }
}

impl Floating for f32 {
    #[inline(always)]
    fn reduce_sum_of_x2(this: &[f32]) -> f32 {
        reduce_sum_of_x2::reduce_sum_of_x2(this)
    }

    #[inline(always)]
    fn vector_add_inplace(lhs: &mut [f32], rhs: &[f32]) {
        vector_add_inplace::vector_add_inplace(lhs, rhs);
    }

    #[inline(always)]
    fn vector_sub_inplace(lhs: &mut [f32], rhs: &[f32]) {
        vector_sub_inplace::vector_sub_inplace(lhs, rhs);
    }

    #[inline(always)]
    fn vector_mul_inplace(lhs: &mut [f32], rhs: &[f32]) {
        vector_mul_inplace::vector_mul_inplace(lhs, rhs);
    }

    #[inline(always)]
    fn vector_div_inplace(lhs: &mut [f32], rhs: &[f32]) {
        vector_div_inplace::vector_div_inplace(lhs, rhs);
    }

    #[inline(always)]
    fn vector_min_inplace(lhs: &mut [f32], rhs: &[f32]) {
        vector_min_inplace::vector_min_inplace(lhs, rhs);
    }

    #[inline(always)]
    fn vector_max_inplace(lhs: &mut [f32], rhs: &[f32]) {
        vector_max_inplace::vector_max_inplace(lhs, rhs);
    }

    #[inline(always)]
    fn vector_square_inplace(this: &mut [f32]) {
        vector_square_inplace::vector_square_inplace(this);
    }

    #[inline(always)]
    fn vector_sqrt_inplace(this: &mut [f32]) {
        vector_sqrt_inplace::vector_sqrt_inplace(this);
    }

    #[inline(always)]
    fn vector_add_square_inplace(lhs: &mut [f32], rhs: &[f32]) {
        vector_add_square_inplace::vector_add_square_inplace(lhs, rhs);
    }

    #[inline(always)]
    fn vector_add_scalar_inplace(lhs: &mut [f32], rhs: f32) {
        vector_add_scalar_inplace::vector_add_scalar_inplace(lhs, rhs);
    }
}

mod reduce_sum_of_x2 {
    #[crate::multiversion("v4", "v3", "v2", "a2")]
    pub fn reduce_sum_of_x2(this: &[f32]) -> f32 {
        let n = this.len();
        let mut x2 = 0.0f32;
        for i in 0..n {
            x2 += this[i] * this[i];
        }
        x2
    }
}

mod reduce_sum_of_d2 {
    #[crate::multiversion("v4", "v3", "v2", "a2")]
    pub fn reduce_sum_of_d2(lhs: &[f32], rhs: &[f32]) -> f32 {
        assert_eq!(lhs.len(), rhs.len());
        let n = lhs.len();
        let mut d2 = 0.0f32;
        for i in 0..n {
            let d = lhs[i] - rhs[i];
            d2 += d * d;
        }
        d2
    }
}

mod reduce_sum_of_abs_d {
    #[crate::multiversion("v4", "v3", "v2", "a2")]
    pub fn reduce_sum_of_abs_d(lhs: &[f32], rhs: &[f32]) -> f32 {
        assert_eq!(lhs.len(), rhs.len());
        let n = lhs.len();
        let mut sum = 0.0f32;
        for i in 0..n {
            sum += (lhs[i] - rhs[i]).abs();
        }
        sum
    }
}

mod reduce_max_of_abs_d {
    #[crate::multiversion("v4", "v3", "v2", "a2")]
    pub fn reduce_max_of_abs_d(lhs: &[f32], rhs: &[f32]) -> f32 {
        assert_eq!(lhs.len(), rhs.len());
        let n = lhs.len();
        let mut max = 0.0f32;
        for i in 0..n {
            let d = (lhs[i] - rhs[i]).abs();
            if d > max {
                max = d;
            }
        }
        max
    }
}

mod reduce_sum_of_d2_over_s2 {
    #[crate::multiversion("v4", "v3", "v2", "a2")]
    pub fn reduce_sum_of_d2_over_s2(lhs: &[f32], rhs: &[f32], s: &[f32]) -> f32 {
        assert_eq!(lhs.len(), rhs.len());
        assert!(s.len() >= lhs.len());
        let n = lhs.len();
        let mut sum = 0.0f32;
        for i in 0..n {
            let d = lhs[i] - rhs[i];
            sum += (d * d) / (s[i] * s[i]);
        }
        sum
    }
}

mod reduce_sum_of_cumulative_d2_over_s2 {
    // every term divides the running sum of squared differences, not the
    // squared difference of its own dimension
    #[crate::multiversion("v4", "v3", "v2", "a2")]
    pub fn reduce_sum_of_cumulative_d2_over_s2(lhs: &[f32], rhs: &[f32], s: &[f32]) -> f32 {
        assert_eq!(lhs.len(), rhs.len());
        assert!(s.len() >= lhs.len());
        let n = lhs.len();
        let mut d2 = 0.0f32;
        let mut sum = 0.0f32;
        for i in 0..n {
            let d = lhs[i] - rhs[i];
            d2 += d * d;
            sum += d2 / (s[i] * s[i]);
        }
        sum
    }
}

mod vector_add_inplace {
    #[crate::multiversion("v4", "v3", "v2", "a2")]
    pub fn vector_add_inplace(lhs: &mut [f32], rhs: &[f32]) {
        assert_eq!(lhs.len(), rhs.len());
        let n = lhs.len();
        for i in 0..n {
            lhs[i] += rhs[i];
        }
    }
}

mod vector_sub_inplace {
    #[crate::multiversion("v4", "v3", "v2", "a2")]
    pub fn vector_sub_inplace(lhs: &mut [f32], rhs: &[f32]) {
        assert_eq!(lhs.len(), rhs.len());
        let n = lhs.len();
        for i in 0..n {
            lhs[i] -= rhs[i];
        }
    }
}

mod vector_mul_inplace {
    #[crate::multiversion("v4", "v3", "v2", "a2")]
    pub fn vector_mul_inplace(lhs: &mut [f32], rhs: &[f32]) {
        assert_eq!(lhs.len(), rhs.len());
        let n = lhs.len();
        for i in 0..n {
            lhs[i] *= rhs[i];
        }
    }
}

mod vector_div_inplace {
    #[crate::multiversion("v4", "v3", "v2", "a2")]
    pub fn vector_div_inplace(lhs: &mut [f32], rhs: &[f32]) {
        assert_eq!(lhs.len(), rhs.len());
        let n = lhs.len();
        for i in 0..n {
            lhs[i] /= rhs[i];
        }
    }

    #[test]
    fn vector_div_inplace_by_zero_test() {
        let mut lhs = vec![1.0f32, -1.0, 0.0, 6.0];
        vector_div_inplace(&mut lhs, &[0.0, 0.0, 0.0, 3.0]);
        assert_eq!(lhs[0], f32::INFINITY);
        assert_eq!(lhs[1], f32::NEG_INFINITY);
        assert!(lhs[2].is_nan());
        assert_eq!(lhs[3], 2.0);
    }
}

mod vector_min_inplace {
    // `lhs` survives only when it compares strictly smaller; any NaN yields `rhs`
    #[crate::multiversion("v4", "v3", "v2", "a2")]
    pub fn vector_min_inplace(lhs: &mut [f32], rhs: &[f32]) {
        assert_eq!(lhs.len(), rhs.len());
        let n = lhs.len();
        for i in 0..n {
            if !(lhs[i] < rhs[i]) {
                lhs[i] = rhs[i];
            }
        }
    }
}

mod vector_max_inplace {
    #[crate::multiversion("v4", "v3", "v2", "a2")]
    pub fn vector_max_inplace(lhs: &mut [f32], rhs: &[f32]) {
        assert_eq!(lhs.len(), rhs.len());
        let n = lhs.len();
        for i in 0..n {
            if !(lhs[i] > rhs[i]) {
                lhs[i] = rhs[i];
            }
        }
    }

    #[test]
    fn vector_max_inplace_test() {
        let mut lhs = vec![1.0f32, 5.0, -3.0];
        vector_max_inplace(&mut lhs, &[2.0, 4.0, -3.0]);
        assert_eq!(lhs, vec![2.0, 5.0, -3.0]);
    }
}

mod vector_square_inplace {
    #[crate::multiversion("v4", "v3", "v2", "a2")]
    pub fn vector_square_inplace(this: &mut [f32]) {
        let n = this.len();
        for i in 0..n {
            this[i] *= this[i];
        }
    }
}

mod vector_sqrt_inplace {
    #[crate::multiversion("v4", "v3", "v2", "a2")]
    pub fn vector_sqrt_inplace(this: &mut [f32]) {
        let n = this.len();
        for i in 0..n {
            this[i] = this[i].sqrt();
        }
    }

    #[test]
    fn vector_sqrt_inplace_negative_test() {
        let mut this = vec![4.0f32, -4.0, 0.0];
        vector_sqrt_inplace(&mut this);
        assert_eq!(this[0], 2.0);
        assert!(this[1].is_nan());
        assert_eq!(this[2], 0.0);
    }
}

mod vector_add_square_inplace {
    #[crate::multiversion("v4", "v3", "v2", "a2")]
    pub fn vector_add_square_inplace(lhs: &mut [f32], rhs: &[f32]) {
        assert_eq!(lhs.len(), rhs.len());
        let n = lhs.len();
        for i in 0..n {
            lhs[i] += rhs[i] * rhs[i];
        }
    }
}

mod vector_add_scalar_inplace {
    #[crate::multiversion("v4", "v3", "v2", "a2")]
    pub fn vector_add_scalar_inplace(lhs: &mut [f32], rhs: f32) {
        let n = lhs.len();
        for i in 0..n {
            lhs[i] += rhs;
        }
    }
}

#[test]
fn reduce_sum_of_d2_test() {
    use rand::Rng;
    const EPSILON: f32 = 0.008;
    let mut rng = rand::rng();
    for _ in 0..if cfg!(not(miri)) { 256 } else { 1 } {
        let n = rng.random_range(0..4000);
        let lhs = (0..n)
            .map(|_| rng.random_range(-1.0..=1.0f32))
            .collect::<Vec<_>>();
        let rhs = (0..n)
            .map(|_| rng.random_range(-1.0..=1.0f32))
            .collect::<Vec<_>>();
        let expected = lhs
            .iter()
            .zip(rhs.iter())
            .map(|(x, y)| ((x - y) * (x - y)) as f64)
            .sum::<f64>() as f32;
        let result = f32::reduce_sum_of_d2(&lhs, &rhs);
        assert!(
            (result - expected).abs() < EPSILON,
            "result = {result}, expected = {expected}."
        );
    }
}

#[test]
fn reduce_sum_of_cumulative_d2_over_s2_test() {
    let lhs = [1.0f32, 2.0, 3.0];
    let rhs = [0.0f32, 0.0, 0.0];
    let s = [1.0f32, 1.0, 2.0];
    // running d2: 1, 5, 14 divided by 1, 1, 4
    assert_eq!(f32::reduce_sum_of_cumulative_d2_over_s2(&lhs, &rhs, &s), 9.5);
    // per dimension: 1 / 1 + 4 / 1 + 9 / 4
    assert_eq!(f32::reduce_sum_of_d2_over_s2(&lhs, &rhs, &s), 7.25);
}
