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

//! Merge-scan kernels over postings: two ascending, unique `i32` index lists
//! walked in lockstep. Unsorted input gives an unspecified result, never a
//! panic.

pub fn reduce_count_of_intersection(lidx: &[i32], ridx: &[i32]) -> u32 {
    reduce_count_of_intersection::reduce_count_of_intersection(lidx, ridx)
}

/// Dot product over the shared indices.
pub fn reduce_sum_of_xy(lidx: &[i32], lval: &[f32], ridx: &[i32], rval: &[f32]) -> f32 {
    reduce_sum_of_xy::reduce_sum_of_xy(lidx, lval, ridx, rval)
}

/// Dot product over the shared indices together with the squared norms of
/// both full weight lists, in one pass. Returns `(xy, x2, y2)`.
pub fn reduce_sum_of_xy_x2_y2(
    lidx: &[i32],
    lval: &[f32],
    ridx: &[i32],
    rval: &[f32],
) -> (f32, f32, f32) {
    reduce_sum_of_xy_x2_y2::reduce_sum_of_xy_x2_y2(lidx, lval, ridx, rval)
}

mod reduce_count_of_intersection {
    #[crate::multiversion("v4", "v3", "v2", "a2")]
    pub fn reduce_count_of_intersection(lidx: &[i32], ridx: &[i32]) -> u32 {
        use std::cmp::Ordering;
        let (mut lp, ln) = (0, lidx.len());
        let (mut rp, rn) = (0, ridx.len());
        let mut count = 0u32;
        while lp < ln && rp < rn {
            match Ord::cmp(&lidx[lp], &ridx[rp]) {
                Ordering::Equal => {
                    count += 1;
                    lp += 1;
                    rp += 1;
                }
                Ordering::Less => {
                    lp += 1;
                }
                Ordering::Greater => {
                    rp += 1;
                }
            }
        }
        count
    }

    #[test]
    fn reduce_count_of_intersection_test() {
        assert_eq!(reduce_count_of_intersection(&[1, 3, 5], &[2, 3, 4]), 1);
        assert_eq!(reduce_count_of_intersection(&[], &[2, 3, 4]), 0);
        assert_eq!(reduce_count_of_intersection(&[-7, 0, 9], &[-7, 0, 9]), 3);
        // unsorted input terminates
        assert!(reduce_count_of_intersection(&[5, 1, 3], &[3, 1, 5]) <= 3);
    }
}

mod reduce_sum_of_xy {
    #[crate::multiversion("v4", "v3", "v2", "a2")]
    pub fn reduce_sum_of_xy(lidx: &[i32], lval: &[f32], ridx: &[i32], rval: &[f32]) -> f32 {
        use std::cmp::Ordering;
        assert!(lidx.len() <= lval.len());
        assert!(ridx.len() <= rval.len());
        let (mut lp, ln) = (0, lidx.len());
        let (mut rp, rn) = (0, ridx.len());
        let mut xy = 0.0f32;
        while lp < ln && rp < rn {
            match Ord::cmp(&lidx[lp], &ridx[rp]) {
                Ordering::Equal => {
                    xy += lval[lp] * rval[rp];
                    lp += 1;
                    rp += 1;
                }
                Ordering::Less => {
                    lp += 1;
                }
                Ordering::Greater => {
                    rp += 1;
                }
            }
        }
        xy
    }
}

mod reduce_sum_of_xy_x2_y2 {
    #[crate::multiversion("v4", "v3", "v2", "a2")]
    pub fn reduce_sum_of_xy_x2_y2(
        lidx: &[i32],
        lval: &[f32],
        ridx: &[i32],
        rval: &[f32],
    ) -> (f32, f32, f32) {
        use std::cmp::Ordering;
        assert!(lidx.len() <= lval.len());
        assert!(ridx.len() <= rval.len());
        let (mut lp, ln) = (0, lidx.len());
        let (mut rp, rn) = (0, ridx.len());
        let (mut xy, mut x2, mut y2) = (0.0f32, 0.0f32, 0.0f32);
        while lp < ln && rp < rn {
            match Ord::cmp(&lidx[lp], &ridx[rp]) {
                Ordering::Equal => {
                    xy += lval[lp] * rval[rp];
                    x2 += lval[lp] * lval[lp];
                    y2 += rval[rp] * rval[rp];
                    lp += 1;
                    rp += 1;
                }
                Ordering::Less => {
                    x2 += lval[lp] * lval[lp];
                    lp += 1;
                }
                Ordering::Greater => {
                    y2 += rval[rp] * rval[rp];
                    rp += 1;
                }
            }
        }
        for i in lp..ln {
            x2 += lval[i] * lval[i];
        }
        for i in rp..rn {
            y2 += rval[i] * rval[i];
        }
        (xy, x2, y2)
    }
}

#[cfg(test)]
fn sample_i32_sorted(rng: &mut impl rand::Rng, length: u32, amount: u32) -> Vec<i32> {
    let mut x = rand::seq::index::sample(rng, length as usize, amount as usize)
        .into_iter()
        .map(|i| i as i32)
        .collect::<Vec<_>>();
    x.sort();
    x
}

#[test]
fn reduce_sum_of_xy_x2_y2_test() {
    use rand::Rng;
    const EPSILON: f32 = 0.0001;
    let mut rng = rand::rng();
    for _ in 0..if cfg!(not(miri)) { 256 } else { 1 } {
        let lm = rng.random_range(0..300);
        let lidx = sample_i32_sorted(&mut rng, 1000, lm);
        let lval = (0..lm)
            .map(|_| rng.random_range(-1.0..=1.0f32))
            .collect::<Vec<_>>();
        let rm = rng.random_range(0..350);
        let ridx = sample_i32_sorted(&mut rng, 1000, rm);
        let rval = (0..rm)
            .map(|_| rng.random_range(-1.0..=1.0f32))
            .collect::<Vec<_>>();
        let mut l = vec![0.0f32; 1000];
        let mut r = vec![0.0f32; 1000];
        for (&i, &v) in lidx.iter().zip(lval.iter()) {
            l[i as usize] = v;
        }
        for (&i, &v) in ridx.iter().zip(rval.iter()) {
            r[i as usize] = v;
        }
        let xy = l.iter().zip(r.iter()).map(|(x, y)| x * y).sum::<f32>();
        let x2 = l.iter().map(|x| x * x).sum::<f32>();
        let y2 = r.iter().map(|y| y * y).sum::<f32>();
        let (rxy, rx2, ry2) = reduce_sum_of_xy_x2_y2(&lidx, &lval, &ridx, &rval);
        assert!((rxy - xy).abs() < EPSILON, "xy = {rxy}, expected = {xy}.");
        assert!((rx2 - x2).abs() < EPSILON, "x2 = {rx2}, expected = {x2}.");
        assert!((ry2 - y2).abs() < EPSILON, "y2 = {ry2}, expected = {y2}.");
        assert_eq!(rxy, reduce_sum_of_xy(&lidx, &lval, &ridx, &rval));
    }
}
