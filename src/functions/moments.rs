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

//! Grouped mean and standard deviation. The host seeds a group's state with
//! its first row, folds every further row with [`array_accumulate`] and
//! calls one finalizer once. States travel in the packed `3n + 1` layout.

use ::moments::Accumulator;
use vector::dense::{DenseBorrowed, DenseOwned};

/// A state that fits neither the row nor its expanded layout is returned
/// unchanged.
pub fn array_accumulate(state: DenseOwned<f32>, row: DenseBorrowed<'_, f32>) -> DenseOwned<f32> {
    let state = Accumulator::resume(state.into_vec(), row.slice().len());
    DenseOwned::new(state.accumulate(row.slice()).into_packed())
}

/// A state that was never expanded is returned as is.
pub fn array_mean_final(state: DenseBorrowed<'_, f32>) -> DenseOwned<f32> {
    let state = Accumulator::from_packed(state.slice().to_vec());
    DenseOwned::new(state.finalize_mean())
}

/// A state that was never expanded yields zeros of its own length.
pub fn array_std_dev_final(state: DenseBorrowed<'_, f32>) -> DenseOwned<f32> {
    let state = Accumulator::from_packed(state.slice().to_vec());
    DenseOwned::new(state.finalize_std_dev())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use vector::VectorOwned;

    #[test]
    fn round_trip() {
        let single = DenseOwned::new(vec![4.0f32, 6.0]);
        assert_eq!(array_mean_final(single.as_borrowed()).slice(), &[4.0, 6.0]);
        assert_eq!(array_std_dev_final(single.as_borrowed()).slice(), &[0.0, 0.0]);
        let state = array_accumulate(single, DenseBorrowed::new(&[8.0, 10.0]));
        assert_eq!(array_mean_final(state.as_borrowed()).slice(), &[6.0, 8.0]);
        assert_eq!(array_std_dev_final(state.as_borrowed()).slice(), &[2.0, 2.0]);
    }

    #[test]
    fn first_row_ending_in_minus_one() {
        let state = DenseOwned::new(vec![0.0f32, 0.0, 0.0, -1.0]);
        let state = array_accumulate(state, DenseBorrowed::new(&[1.0, 1.0, 1.0, 1.0]));
        assert_eq!(state.slice().len(), 13);
        assert_eq!(
            array_mean_final(state.as_borrowed()).slice(),
            &[0.5, 0.5, 0.5, 0.0]
        );
        assert_eq!(
            array_std_dev_final(state.as_borrowed()).slice(),
            &[0.5, 0.5, 0.5, 1.0]
        );
    }

    #[test]
    fn checksum_after_every_step() {
        let mut rng = rand::rng();
        for _ in 0..64 {
            let n = rng.random_range(1..50);
            let mut random_row = || {
                (0..n)
                    .map(|_| rng.random_range(-4.0..4.0f32))
                    .collect::<Vec<_>>()
            };
            let mut state = DenseOwned::new(random_row());
            for _ in 0..16 {
                let row = random_row();
                state = array_accumulate(state, DenseBorrowed::new(&row));
                let packed = state.slice();
                assert_eq!(packed.len(), 3 * n + 1);
                assert_eq!(-packed[3 * n].round() as usize, n);
                assert_eq!(::moments::checksum(packed), Some(n as u32));
            }
        }
    }

    #[test]
    fn fold() {
        let rows = [[1.0f32, 10.0], [2.0, 10.0], [3.0, 10.0], [6.0, 10.0]];
        let mut state = DenseOwned::new(rows[0].to_vec());
        for row in &rows[1..] {
            state = array_accumulate(state, DenseBorrowed::new(row));
        }
        assert_eq!(state.slice().len(), 7);
        assert_eq!(array_mean_final(state.as_borrowed()).slice(), &[3.0, 10.0]);
        // variance of [1, 2, 3, 6] is 3.5
        let std_dev = array_std_dev_final(state.as_borrowed());
        assert!((std_dev.slice()[0] - 3.5f32.sqrt()).abs() < 1e-6);
        assert_eq!(std_dev.slice()[1], 0.0);
    }

    #[test]
    fn mismatched_row() {
        let state = DenseOwned::new(vec![1.0f32, 2.0]);
        let state = array_accumulate(state, DenseBorrowed::new(&[3.0, 4.0]));
        let before = state.clone();
        let state = array_accumulate(state, DenseBorrowed::new(&[5.0]));
        assert_eq!(state, before);
    }
}
