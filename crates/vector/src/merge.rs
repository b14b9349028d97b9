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

use std::cmp::Ordering;

/// Number of equal elements between two ascending `i32` lists.
#[inline(always)]
pub fn count_of_intersection(lhs: &[i32], rhs: &[i32]) -> u32 {
    simd::sparse::reduce_count_of_intersection(lhs, rhs)
}

/// Number of equal elements between two lists that are ascending under `cmp`.
///
/// Duplicates pair up one-to-one: `[1, 1]` against `[1]` counts once.
pub fn count_of_equal_by<T>(
    lhs: &[T],
    rhs: &[T],
    mut cmp: impl FnMut(&T, &T) -> Ordering,
) -> u32 {
    let (mut lp, ln) = (0, lhs.len());
    let (mut rp, rn) = (0, rhs.len());
    let mut count = 0u32;
    while lp < ln && rp < rn {
        match cmp(&lhs[lp], &rhs[rp]) {
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

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn count_of_equal_by_strings() {
        let lhs = ["apple", "kiwi", "pear"];
        let rhs = ["banana", "kiwi", "pear", "plum"];
        assert_eq!(count_of_equal_by(&lhs, &rhs, |a, b| a.cmp(b)), 2);
        assert_eq!(count_of_equal_by(&lhs, &[], |a, b| a.cmp(b)), 0);
        assert_eq!(count_of_equal_by(&[1, 1], &[1], Ord::cmp), 1);
    }

    #[test]
    fn count_of_equal_by_agrees_with_kernel() {
        let mut rng = rand::rng();
        for _ in 0..64 {
            let (lm, rm) = (rng.random_range(0..200), rng.random_range(0..200));
            let mut lhs = rand::seq::index::sample(&mut rng, 500, lm)
                .into_iter()
                .map(|i| i as i32)
                .collect::<Vec<_>>();
            let mut rhs = rand::seq::index::sample(&mut rng, 500, rm)
                .into_iter()
                .map(|i| i as i32)
                .collect::<Vec<_>>();
            lhs.sort();
            rhs.sort();
            let expected = lhs.iter().filter(|x| rhs.contains(x)).count() as u32;
            assert_eq!(count_of_intersection(&lhs, &rhs), expected);
            assert_eq!(count_of_equal_by(&lhs, &rhs, Ord::cmp), expected);
            assert!(expected <= std::cmp::min(lhs.len(), rhs.len()) as u32);
        }
    }
}
