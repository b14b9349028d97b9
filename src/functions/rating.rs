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

use crate::datatype::any_array::{AnyArray, Comparator};
use crate::error::{Error, Result};
use vector::dense::DenseBorrowed;
use vector::merge::{count_of_equal_by, count_of_intersection};
use vector::sparse::SparseBorrowed;

fn postings<'a>(indices: &'a [i32], weights: &'a [f32]) -> Result<SparseBorrowed<'a>> {
    SparseBorrowed::new_checked(indices, weights)
        .ok_or_else(|| Error::cardinality("weight arrays must be of the same size as key arrays"))
}

/// L2 norm, as expected by [`rating_cosine_norm`].
pub fn rating_normalize(vector: DenseBorrowed<'_, f32>) -> f32 {
    vector.norm()
}

/// Cosine similarity of two postings lists against precomputed norms.
pub fn rating_cosine_norm(
    indices1: &[i32],
    weights1: &[f32],
    norm1: f32,
    indices2: &[i32],
    weights2: &[f32],
    norm2: f32,
) -> Result<f32> {
    let lhs = postings(indices1, weights1)?;
    let rhs = postings(indices2, weights2)?;
    log::debug!(
        "rating_cosine_norm: {} and {} postings",
        indices1.len(),
        indices2.len()
    );
    Ok(lhs.operator_cos_with_norms(norm1, rhs, norm2))
}

/// Cosine similarity of two postings lists.
pub fn rating_cosine(
    indices1: &[i32],
    weights1: &[f32],
    indices2: &[i32],
    weights2: &[f32],
) -> Result<f32> {
    let lhs = postings(indices1, weights1)?;
    let rhs = postings(indices2, weights2)?;
    log::debug!(
        "rating_cosine: {} and {} postings",
        indices1.len(),
        indices2.len()
    );
    Ok(lhs.operator_cos(rhs))
}

/// Number of indices two ascending lists share.
pub fn rating_boolean_int(indices1: &[i32], indices2: &[i32]) -> i32 {
    log::debug!(
        "rating_boolean_int: {} and {} indices",
        indices1.len(),
        indices2.len()
    );
    count_of_intersection(indices1, indices2) as i32
}

/// Number of elements two ascending arrays share, compared by `comparator`.
///
/// `comparator` is what the host resolved for the element type; `None` means
/// it has none. Both arrays must be sorted by the same order.
pub fn rating_boolean_any(
    array1: AnyArray<'_>,
    array2: AnyArray<'_>,
    comparator: Option<&dyn Comparator>,
) -> Result<i32> {
    log::debug!(
        "rating_boolean_any: {} and {} elements",
        array1.len(),
        array2.len()
    );
    if array1.is_empty() || array2.is_empty() {
        return Ok(0);
    }
    if array1.element_type() != array2.element_type() || array1.width() != array2.width() {
        return Err(Error::TypeMismatch {
            message: format!(
                "cannot compare arrays of different element types {} and {}",
                array1.element_type(),
                array2.element_type()
            ),
        });
    }
    let Some(comparator) = comparator else {
        return Err(Error::UndefinedComparator {
            element_type: array1.element_type().to_string(),
        });
    };
    let count = count_of_equal_by(&array1.elements(), &array2.elements(), |lhs, rhs| {
        comparator.compare(lhs, rhs)
    });
    Ok(count as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatype::any_array::{ElementType, native_ord};
    use crate::error::ErrorKind;
    use zerocopy::IntoBytes;

    const INT4: ElementType = ElementType(23);
    const FLOAT4: ElementType = ElementType(700);

    fn random_postings(rng: &mut impl rand::Rng, universe: usize) -> (Vec<i32>, Vec<f32>) {
        let nnz = rng.random_range(0..=universe / 4);
        let mut indices = rand::seq::index::sample(rng, universe, nnz)
            .into_iter()
            .map(|i| i as i32)
            .collect::<Vec<_>>();
        indices.sort();
        let weights = (0..nnz).map(|_| rng.random_range(0.0..1.0f32)).collect();
        (indices, weights)
    }

    #[test]
    fn cosine_zero_guard() {
        assert_eq!(rating_cosine(&[], &[], &[], &[]).unwrap(), 0.0);
        // disjoint postings
        let r = rating_cosine(&[1, 3], &[1.0, 1.0], &[2, 4], &[1.0, 1.0]).unwrap();
        assert_eq!(r, 0.0);
        let r = rating_cosine_norm(&[1, 3], &[1.0, 1.0], 1.4, &[2, 4], &[1.0, 1.0], 1.4);
        assert_eq!(r.unwrap(), 0.0);
    }

    #[test]
    fn cosine_dense_expansion() {
        const EPSILON: f32 = 1e-4;
        const UNIVERSE: usize = 400;
        let mut rng = rand::rng();
        for _ in 0..128 {
            let (i1, w1) = random_postings(&mut rng, UNIVERSE);
            let (i2, w2) = random_postings(&mut rng, UNIVERSE);
            let mut d1 = vec![0.0f32; UNIVERSE];
            let mut d2 = vec![0.0f32; UNIVERSE];
            for (&i, &w) in i1.iter().zip(w1.iter()) {
                d1[i as usize] = w;
            }
            for (&i, &w) in i2.iter().zip(w2.iter()) {
                d2[i as usize] = w;
            }
            let dot = d1.iter().zip(d2.iter()).map(|(x, y)| x * y).sum::<f32>();
            let n1 = rating_normalize(DenseBorrowed::new(&d1));
            let n2 = rating_normalize(DenseBorrowed::new(&d2));
            let expected = if dot == 0.0 || n1 == 0.0 || n2 == 0.0 {
                0.0
            } else {
                dot / (n1 * n2)
            };
            let r = rating_cosine(&i1, &w1, &i2, &w2).unwrap();
            assert!((r - expected).abs() < EPSILON, "r = {r}, expected = {expected}.");
            let r = rating_cosine_norm(&i1, &w1, n1, &i2, &w2, n2).unwrap();
            assert!((r - expected).abs() < EPSILON, "r = {r}, expected = {expected}.");
        }
    }

    #[test]
    fn boolean_int() {
        assert_eq!(rating_boolean_int(&[1, 3, 5], &[2, 3, 4]), 1);
        assert_eq!(rating_boolean_int(&[], &[]), 0);
        assert_eq!(rating_boolean_int(&[1, 2, 3], &[]), 0);
    }

    #[test]
    fn cardinality() {
        let e = rating_cosine(&[1, 2], &[1.0], &[1], &[1.0]).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::CardinalityMismatch);
        let e = rating_cosine_norm(&[1], &[1.0], 1.0, &[1, 2], &[1.0], 1.0).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::CardinalityMismatch);
        // extra weights are ignored
        assert_eq!(rating_cosine(&[1], &[1.0, 9.0], &[1], &[2.0]).unwrap(), 1.0);
    }

    #[test]
    fn cosine_norm_uses_weights() {
        let (i1, w1) = ([3, 7], [3.0f32, 4.0]);
        let (i2, w2) = ([7], [2.0f32]);
        let n1 = rating_normalize(DenseBorrowed::new(&w1));
        let n2 = rating_normalize(DenseBorrowed::new(&w2));
        assert_eq!(n1, 5.0);
        // 4 * 2 / (5 * 2)
        let r = rating_cosine_norm(&i1, &w1, n1, &i2, &w2, n2).unwrap();
        assert!((r - 0.8).abs() < 1e-6);
        assert_eq!(r, rating_cosine(&i1, &w1, &i2, &w2).unwrap());
        assert_eq!(rating_cosine_norm(&i1, &w1, 0.0, &i2, &w2, n2).unwrap(), 0.0);
    }

    #[test]
    fn boolean_any() {
        let lhs = [1i32, 3, 5];
        let rhs = [2i32, 3, 4, 5];
        let array1 = AnyArray::new_checked(INT4, 4, lhs.as_bytes()).unwrap();
        let array2 = AnyArray::new_checked(INT4, 4, rhs.as_bytes()).unwrap();
        let r = rating_boolean_any(array1, array2, Some(&native_ord::<i32>)).unwrap();
        assert_eq!(r, 2);
        assert_eq!(r, rating_boolean_int(&lhs, &rhs));
    }

    #[test]
    fn boolean_any_errors() {
        let ints = [1i32, 2];
        let floats = [1.0f32, 2.0];
        let array1 = AnyArray::new_checked(INT4, 4, ints.as_bytes()).unwrap();
        let array2 = AnyArray::new_checked(FLOAT4, 4, floats.as_bytes()).unwrap();
        let e = rating_boolean_any(array1, array2, Some(&native_ord::<i32>)).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::TypeMismatch);
        let e = rating_boolean_any(array1, array1, None).unwrap_err();
        assert!(matches!(e, Error::UndefinedComparator { .. }));
        assert_eq!(e.kind(), ErrorKind::TypeMismatch);
        // empty input is answered before any type check
        let empty = AnyArray::new_checked(FLOAT4, 4, &[]).unwrap();
        assert_eq!(rating_boolean_any(array1, empty, None).unwrap(), 0);
    }
}
