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

use super::memory_dense::ALIGN;
use crate::error::{Error, Result};
use vector::VectorBorrowed;
use vector::sparse::{SparseBorrowed, SparseOwned};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

#[repr(C, align(8))]
#[derive(Debug, Clone, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout)]
struct SparseHeader {
    nnz: u32,
    _padding: u32,
}

fn size_of_sparse(nnz: usize) -> usize {
    (size_of::<SparseHeader>() + 8 * nnz).next_multiple_of(ALIGN)
}

pub fn decode(bytes: &[u8], max_dims: u32) -> Result<SparseOwned> {
    let (header, _) = SparseHeader::read_from_prefix(bytes)
        .map_err(|_| Error::buffer("buffer is shorter than its header"))?;
    if header._padding != 0 {
        return Err(Error::buffer("nonzero header padding"));
    }
    if header.nnz > max_dims {
        return Err(Error::buffer(format!(
            "{} postings exceed the limit of {}",
            header.nnz, max_dims
        )));
    }
    let nnz = header.nnz as usize;
    if bytes.len() != size_of_sparse(nnz) {
        return Err(Error::buffer(format!(
            "{} bytes for {} postings",
            bytes.len(),
            nnz
        )));
    }
    let indices_s = size_of::<SparseHeader>();
    let weights_s = indices_s + 4 * nnz;
    let weights_e = weights_s + 4 * nnz;
    if bytes[weights_e..].iter().any(|&x| x != 0) {
        return Err(Error::buffer("nonzero trailing padding"));
    }
    let mut indices = vec![0i32; nnz];
    indices
        .as_mut_bytes()
        .copy_from_slice(&bytes[indices_s..weights_s]);
    let mut weights = vec![0.0f32; nnz];
    weights
        .as_mut_bytes()
        .copy_from_slice(&bytes[weights_s..weights_e]);
    SparseOwned::new_checked(indices, weights)
        .ok_or_else(|| Error::cardinality("weight arrays must be of the same size as key arrays"))
}

pub fn encode(vector: SparseBorrowed<'_>) -> Vec<u8> {
    let nnz = vector.len();
    let mut buffer = Vec::with_capacity(size_of_sparse(nnz as usize));
    buffer.extend_from_slice(SparseHeader { nnz, _padding: 0 }.as_bytes());
    buffer.extend_from_slice(vector.indices().as_bytes());
    buffer.extend_from_slice(vector.weights().as_bytes());
    while buffer.len() % ALIGN != 0 {
        buffer.push(0u8);
    }
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use rand::Rng;
    use vector::VectorOwned;

    #[test]
    fn bit_exact() {
        let mut rng = rand::rng();
        for _ in 0..64 {
            let nnz = rng.random_range(0..100usize);
            let mut indices = rand::seq::index::sample(&mut rng, 10000, nnz)
                .into_iter()
                .map(|i| i as i32)
                .collect::<Vec<_>>();
            indices.sort();
            let weights = (0..nnz)
                .map(|_| f32::from_bits(rng.random::<u32>()))
                .collect::<Vec<_>>();
            let x = SparseBorrowed::new(&indices, &weights);
            let bytes = encode(x);
            assert_eq!(bytes.len(), 8 + 8 * nnz);
            let decoded = decode(&bytes, u32::MAX).unwrap();
            assert_eq!(decoded.indices(), &indices[..]);
            assert_eq!(encode(decoded.as_borrowed()), bytes);
        }
    }

    #[test]
    fn rejects() {
        let bytes = encode(SparseBorrowed::new(&[1, 5], &[0.5, 0.25]));
        assert!(decode(&bytes, 2).is_ok());
        for (b, max_dims) in [
            (bytes[..6].to_vec(), 16),
            (bytes[..bytes.len() - 4].to_vec(), 16),
            (bytes.clone(), 1),
            (
                {
                    let mut b = bytes.clone();
                    b[4] = 1;
                    b
                },
                16,
            ),
        ] {
            let e = decode(&b, max_dims).unwrap_err();
            assert_eq!(e.kind(), ErrorKind::InvalidBuffer);
        }
    }
}
