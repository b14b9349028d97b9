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

//! Element-wise algebra. The first operand is consumed and returned; the
//! result has the length of the shorter operand.

use vector::dense::{DenseBorrowed, DenseOwned};

pub fn array_add(result: DenseOwned<f32>, operand: DenseBorrowed<'_, f32>) -> DenseOwned<f32> {
    result.operator_add(operand)
}

pub fn array_sub(result: DenseOwned<f32>, operand: DenseBorrowed<'_, f32>) -> DenseOwned<f32> {
    result.operator_sub(operand)
}

pub fn array_mul(result: DenseOwned<f32>, operand: DenseBorrowed<'_, f32>) -> DenseOwned<f32> {
    result.operator_mul(operand)
}

/// Division by zero yields infinity or NaN.
pub fn array_div(result: DenseOwned<f32>, operand: DenseBorrowed<'_, f32>) -> DenseOwned<f32> {
    result.operator_div(operand)
}

/// Element-wise minimum. A NaN on either side selects the operand.
pub fn array_least(result: DenseOwned<f32>, operand: DenseBorrowed<'_, f32>) -> DenseOwned<f32> {
    result.operator_least(operand)
}

/// Element-wise maximum. A NaN on either side selects the operand.
pub fn array_greatest(
    result: DenseOwned<f32>,
    operand: DenseBorrowed<'_, f32>,
) -> DenseOwned<f32> {
    result.operator_greatest(operand)
}

pub fn array_square(result: DenseOwned<f32>) -> DenseOwned<f32> {
    result.function_square()
}

/// Negative elements yield NaN.
pub fn array_sqrt(result: DenseOwned<f32>) -> DenseOwned<f32> {
    result.function_sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use vector::VectorOwned;

    #[test]
    fn commutativity() {
        let mut rng = rand::rng();
        for _ in 0..32 {
            let n = rng.random_range(0..64);
            let a = DenseOwned::new((0..n).map(|_| rng.random_range(-100.0..100.0f32)).collect());
            let b = DenseOwned::new((0..n).map(|_| rng.random_range(-100.0..100.0f32)).collect());
            let ops: [fn(DenseOwned<f32>, DenseBorrowed<'_, f32>) -> DenseOwned<f32>; 4] =
                [array_add, array_mul, array_least, array_greatest];
            for op in ops {
                assert_eq!(op(a.clone(), b.as_borrowed()), op(b.clone(), a.as_borrowed()));
            }
            let ab = array_sub(a.clone(), b.as_borrowed());
            let ba = array_sub(b, a.as_borrowed());
            let negated = ba.slice().iter().map(|x| -x).collect::<Vec<_>>();
            assert_eq!(ab.slice(), &negated[..]);
        }
    }

    #[test]
    fn truncation() {
        let result = array_add(
            DenseOwned::new(vec![1.0, 2.0, 3.0]),
            DenseBorrowed::new(&[10.0, 20.0]),
        );
        assert_eq!(result.slice(), &[11.0, 22.0]);
        let result = array_mul(DenseOwned::new(vec![2.0]), DenseBorrowed::new(&[3.0, 4.0]));
        assert_eq!(result.slice(), &[6.0]);
    }

    #[test]
    fn hazards() {
        let x = DenseOwned::new(vec![1.0f32, 0.0, -4.0]);
        let zero = DenseOwned::new(vec![0.0f32; 3]);
        let q = array_div(x.clone(), zero.as_borrowed());
        assert_eq!(q.slice()[0], f32::INFINITY);
        assert!(q.slice()[1].is_nan());
        assert_eq!(q.slice()[2], f32::NEG_INFINITY);
        let r = array_sqrt(x.clone());
        assert_eq!(&r.slice()[..2], &[1.0, 0.0]);
        assert!(r.slice()[2].is_nan());
        assert_eq!(array_square(x).slice(), &[1.0, 0.0, 16.0]);
    }

    #[test]
    fn nan_selects_operand() {
        let x = DenseOwned::new(vec![f32::NAN, 1.0]);
        let y = DenseOwned::new(vec![2.0f32, f32::NAN]);
        let least = array_least(x.clone(), y.as_borrowed());
        assert_eq!(least.slice()[0], 2.0);
        assert!(least.slice()[1].is_nan());
        let greatest = array_greatest(x, y.as_borrowed());
        assert_eq!(greatest.slice()[0], 2.0);
        assert!(greatest.slice()[1].is_nan());
    }
}
