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

use crate::{Accumulator, Moments};

/// Recovers `n` from a packed buffer, if its trailing cell is a valid
/// checksum for its length.
pub fn checksum(packed: &[f32]) -> Option<u32> {
    let (&last, _) = packed.split_last()?;
    let n = -(last.round() as i64);
    if n > 0 && (packed.len() as i64 - 1) / 3 == n && packed.len() as i64 == 3 * n + 1 {
        Some(n as u32)
    } else {
        None
    }
}

impl Moments {
    pub fn to_packed(&self) -> Vec<f32> {
        let n = self.dims as usize;
        let mut packed = Vec::with_capacity(3 * n + 1);
        packed.extend_from_slice(&self.sum);
        packed.extend_from_slice(&self.sum_of_x2);
        packed.extend_from_slice(&self.count);
        packed.push(-(self.dims as f32));
        packed
    }
}

impl Accumulator {
    /// A buffer carrying a valid checksum is read as expanded; anything else
    /// is a fresh row.
    pub fn from_packed(packed: Vec<f32>) -> Self {
        let Some(dims) = checksum(&packed) else {
            return Self::Fresh(packed);
        };
        let n = dims as usize;
        Self::Expanded(Moments {
            dims,
            sum: packed[..n].to_vec(),
            sum_of_x2: packed[n..2 * n].to_vec(),
            count: packed[2 * n..3 * n].to_vec(),
        })
    }

    /// Reads the state an accumulate step receives alongside a row of
    /// `row_len` elements. A state of the row's own length is the group's
    /// first row whatever its trailing cell holds; only other lengths are
    /// checked for an expanded layout.
    pub fn resume(packed: Vec<f32>, row_len: usize) -> Self {
        if packed.len() == row_len {
            Self::Fresh(packed)
        } else {
            Self::from_packed(packed)
        }
    }

    pub fn to_packed(&self) -> Vec<f32> {
        match self {
            Self::Fresh(first) => first.clone(),
            Self::Expanded(moments) => moments.to_packed(),
        }
    }

    pub fn into_packed(self) -> Vec<f32> {
        match self {
            Self::Fresh(first) => first,
            Self::Expanded(moments) => moments.to_packed(),
        }
    }
}

#[test]
fn checksum_invariant() {
    use rand::Rng;
    let mut rng = rand::rng();
    for _ in 0..64 {
        let n = rng.random_range(1..100usize);
        let mut state = Accumulator::new((0..n).map(|_| rng.random_range(-1.0..1.0)).collect());
        for _ in 0..rng.random_range(1..10) {
            let row = (0..n)
                .map(|_| rng.random_range(-1.0..1.0))
                .collect::<Vec<f32>>();
            state = Accumulator::resume(state.into_packed(), n).accumulate(&row);
            let packed = state.to_packed();
            assert_eq!(packed.len(), 3 * n + 1);
            assert_eq!(-packed[3 * n].round() as usize, n);
            assert_eq!(checksum(&packed), Some(n as u32));
        }
    }
}

#[test]
fn first_row_resembling_a_checksum() {
    // [0, 0, 0, -1] also parses as an expanded state of one dimension
    let first = vec![0.0f32, 0.0, 0.0, -1.0];
    assert_eq!(checksum(&first), Some(1));
    let state = Accumulator::resume(first, 4).accumulate(&[1.0, 1.0, 1.0, 1.0]);
    let packed = state.into_packed();
    assert_eq!(packed.len(), 13);
    assert_eq!(checksum(&packed), Some(4));
    let state = Accumulator::resume(packed, 4).accumulate(&[2.0, 2.0, 2.0, 2.0]);
    assert_eq!(state.clone().finalize_mean(), vec![1.0, 1.0, 1.0, 2.0 / 3.0]);
    let packed = state.into_packed();
    assert_eq!(packed.len(), 13);
    assert_eq!(-packed[12].round() as usize, 4);
}

#[test]
fn packed_layout() {
    let state = Accumulator::new(vec![4.0, 6.0]).accumulate(&[8.0, 10.0]);
    let packed = state.to_packed();
    assert_eq!(
        packed,
        vec![12.0, 16.0, 80.0, 136.0, 2.0, 2.0, -2.0]
    );
    assert_eq!(Accumulator::from_packed(packed), state);
}

#[test]
fn checksum_rejects() {
    assert_eq!(checksum(&[]), None);
    // a fresh row of length 1
    assert_eq!(checksum(&[5.0]), None);
    // zero dimensions
    assert_eq!(checksum(&[0.0]), None);
    // right checksum, wrong length
    assert_eq!(checksum(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, -2.0]), None);
    assert_eq!(checksum(&[1.0, 1.0, 1.0, f32::NAN]), None);
    assert_eq!(checksum(&[1.0, 1.0, 1.0, -1.0]), Some(1));
}
