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

use crate::error::{Error, Result};
use crate::options::MahalanobisVariant;
use simd::Scalar;
use vector::VectorBorrowed;
use vector::dense::DenseBorrowed;

fn same_len<S: Scalar>(lhs: DenseBorrowed<'_, S>, rhs: DenseBorrowed<'_, S>) -> Result<()> {
    if lhs.len() != rhs.len() {
        return Err(Error::cardinality(format!(
            "both arrays must be of the same size, got {} and {}",
            lhs.len(),
            rhs.len()
        )));
    }
    Ok(())
}

pub fn distance_square_int(
    lhs: DenseBorrowed<'_, i32>,
    rhs: DenseBorrowed<'_, i32>,
) -> Result<i64> {
    same_len(lhs, rhs)?;
    Ok(lhs.operator_l2s(rhs))
}

/// Accumulated in `f32`.
pub fn distance_square_real(
    lhs: DenseBorrowed<'_, f32>,
    rhs: DenseBorrowed<'_, f32>,
) -> Result<f64> {
    same_len(lhs, rhs)?;
    Ok(lhs.operator_l2s(rhs) as f64)
}

pub fn distance_manhattan_int(
    lhs: DenseBorrowed<'_, i32>,
    rhs: DenseBorrowed<'_, i32>,
) -> Result<i64> {
    same_len(lhs, rhs)?;
    Ok(lhs.operator_l1(rhs))
}

pub fn distance_manhattan_real(
    lhs: DenseBorrowed<'_, f32>,
    rhs: DenseBorrowed<'_, f32>,
) -> Result<f64> {
    same_len(lhs, rhs)?;
    Ok(lhs.operator_l1(rhs) as f64)
}

pub fn distance_chessboard_int(
    lhs: DenseBorrowed<'_, i32>,
    rhs: DenseBorrowed<'_, i32>,
) -> Result<i64> {
    same_len(lhs, rhs)?;
    Ok(lhs.operator_linf(rhs))
}

pub fn distance_chessboard_real(
    lhs: DenseBorrowed<'_, f32>,
    rhs: DenseBorrowed<'_, f32>,
) -> Result<f64> {
    same_len(lhs, rhs)?;
    Ok(lhs.operator_linf(rhs) as f64)
}

/// Mahalanobis distance with a diagonal covariance, without the square root.
///
/// `std_dev` may be longer than the operands. A zero deviation yields
/// infinity or NaN.
pub fn distance_mahalanobis_int(
    lhs: DenseBorrowed<'_, i32>,
    rhs: DenseBorrowed<'_, i32>,
    std_dev: DenseBorrowed<'_, f32>,
    variant: MahalanobisVariant,
) -> Result<f64> {
    same_len(lhs, rhs)?;
    if std_dev.len() < lhs.len() {
        return Err(Error::cardinality(format!(
            "standard deviation has {} dimensions, arrays have {}",
            std_dev.len(),
            lhs.len()
        )));
    }
    let d = match variant {
        MahalanobisVariant::PerDimension => lhs.operator_mahalanobis(rhs, std_dev),
        MahalanobisVariant::Cumulative => lhs.operator_mahalanobis_cumulative(rhs, std_dev),
    };
    Ok(d as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use rand::Rng;

    #[test]
    fn recomputation() {
        let mut rng = rand::rng();
        for _ in 0..64 {
            let n = rng.random_range(0..128);
            let x = (0..n)
                .map(|_| rng.random_range(-10000..10000))
                .collect::<Vec<i32>>();
            let y = (0..n)
                .map(|_| rng.random_range(-10000..10000))
                .collect::<Vec<i32>>();
            let (bx, by) = (DenseBorrowed::new(&x), DenseBorrowed::new(&y));
            let diffs = x
                .iter()
                .zip(y.iter())
                .map(|(&a, &b)| (a as i64 - b as i64).abs())
                .collect::<Vec<_>>();
            assert_eq!(
                distance_chessboard_int(bx, by).unwrap(),
                diffs.iter().copied().max().unwrap_or(0)
            );
            assert_eq!(
                distance_square_int(bx, by).unwrap(),
                diffs.iter().map(|d| d * d).sum::<i64>()
            );
            assert_eq!(
                distance_manhattan_int(bx, by).unwrap(),
                diffs.iter().sum::<i64>()
            );
        }
    }

    #[test]
    fn cardinality() {
        let (x, y) = ([1, 2, 3], [1, 2]);
        let (x, y) = (DenseBorrowed::new(&x), DenseBorrowed::new(&y));
        for e in [
            distance_square_int(x, y).unwrap_err(),
            distance_manhattan_int(x, y).unwrap_err(),
            distance_chessboard_int(x, y).unwrap_err(),
        ] {
            assert_eq!(e.kind(), ErrorKind::CardinalityMismatch);
        }
        let s = DenseBorrowed::new(&[1.0f32, 1.0]);
        let e = distance_mahalanobis_int(x, x, s, MahalanobisVariant::PerDimension).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::CardinalityMismatch);
        let (a, b) = ([1.0f32], [1.0f32, 2.0]);
        let e = distance_square_real(DenseBorrowed::new(&a), DenseBorrowed::new(&b)).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::CardinalityMismatch);
    }

    #[test]
    fn empty() {
        let x = DenseBorrowed::<i32>::new(&[]);
        assert_eq!(distance_square_int(x, x).unwrap(), 0);
        assert_eq!(distance_chessboard_int(x, x).unwrap(), 0);
        let s = DenseBorrowed::<f32>::new(&[]);
        assert_eq!(
            distance_mahalanobis_int(x, x, s, MahalanobisVariant::Cumulative).unwrap(),
            0.0
        );
    }

    #[test]
    fn real() {
        let x = [0.5f32, -1.0, 2.0];
        let y = [1.5f32, 1.0, 2.0];
        let (x, y) = (DenseBorrowed::new(&x), DenseBorrowed::new(&y));
        assert_eq!(distance_square_real(x, y).unwrap(), 5.0);
        assert_eq!(distance_manhattan_real(x, y).unwrap(), 3.0);
        assert_eq!(distance_chessboard_real(x, y).unwrap(), 2.0);
    }

    #[test]
    fn mahalanobis_variants() {
        let x = [2, 4, 1];
        let y = [0, 1, 1];
        let s = [2.0f32, 3.0, 0.5, 9.0];
        let (x, y, s) = (
            DenseBorrowed::new(&x),
            DenseBorrowed::new(&y),
            DenseBorrowed::new(&s),
        );
        // 4/4 + 9/9 + 0/0.25
        let d = distance_mahalanobis_int(x, y, s, MahalanobisVariant::PerDimension).unwrap();
        assert_eq!(d, 2.0);
        // 4/4 + 13/9 + 13/0.25
        let d = distance_mahalanobis_int(x, y, s, MahalanobisVariant::Cumulative).unwrap();
        assert!((d - (1.0 + 13.0 / 9.0 + 52.0)).abs() < 1e-4);
        let zero = DenseBorrowed::new(&[0.0f32, 1.0, 1.0]);
        let d = distance_mahalanobis_int(x, y, zero, MahalanobisVariant::PerDimension).unwrap();
        assert_eq!(d, f64::INFINITY);
    }
}
