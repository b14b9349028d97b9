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
use simd::Scalar;
use vector::VectorBorrowed;
use vector::dense::{DenseBorrowed, DenseOwned};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

pub const ALIGN: usize = 8;

#[repr(C, align(8))]
#[derive(Debug, Clone, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout)]
struct DenseHeader {
    dims: u32,
    kind: u8,
    _padding: [u8; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DenseKind {
    F32 = 0,
    I32 = 1,
}

impl DenseKind {
    fn from_u8(kind: u8) -> Option<Self> {
        match kind {
            0 => Some(Self::F32),
            1 => Some(Self::I32),
            _ => None,
        }
    }
}

/// Element types with a dense wire encoding.
pub trait DenseElement: Scalar + FromBytes + IntoBytes + Immutable {
    const KIND: DenseKind;
}

impl DenseElement for f32 {
    const KIND: DenseKind = DenseKind::F32;
}

impl DenseElement for i32 {
    const KIND: DenseKind = DenseKind::I32;
}

fn size_of_dense(dims: usize) -> usize {
    (size_of::<DenseHeader>() + 4 * dims).next_multiple_of(ALIGN)
}

/// Reads the element kind of an encoded dense vector without decoding it.
pub fn kind_of(bytes: &[u8]) -> Result<DenseKind> {
    let header = read_header(bytes)?;
    DenseKind::from_u8(header.kind)
        .ok_or_else(|| Error::buffer(format!("unknown element kind {}", header.kind)))
}

fn read_header(bytes: &[u8]) -> Result<DenseHeader> {
    let (header, _) = DenseHeader::read_from_prefix(bytes)
        .map_err(|_| Error::buffer("buffer is shorter than its header"))?;
    Ok(header)
}

pub fn decode<S: DenseElement>(bytes: &[u8], max_dims: u32) -> Result<DenseOwned<S>> {
    let header = read_header(bytes)?;
    if header.kind != S::KIND as u8 {
        return Err(Error::buffer(format!(
            "element kind {} where {} is expected",
            header.kind,
            S::KIND as u8
        )));
    }
    if header._padding != [0; 3] {
        return Err(Error::buffer("nonzero header padding"));
    }
    if header.dims > max_dims {
        return Err(Error::buffer(format!(
            "{} dimensions exceed the limit of {}",
            header.dims, max_dims
        )));
    }
    let dims = header.dims as usize;
    if bytes.len() != size_of_dense(dims) {
        return Err(Error::buffer(format!(
            "{} bytes for {} dimensions",
            bytes.len(),
            dims
        )));
    }
    let start = size_of::<DenseHeader>();
    let end = start + 4 * dims;
    if bytes[end..].iter().any(|&x| x != 0) {
        return Err(Error::buffer("nonzero trailing padding"));
    }
    let mut elements = vec![S::default(); dims];
    elements.as_mut_bytes().copy_from_slice(&bytes[start..end]);
    Ok(DenseOwned::new(elements))
}

pub fn encode<S: DenseElement>(vector: DenseBorrowed<'_, S>) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(size_of_dense(vector.len() as usize));
    buffer.extend_from_slice(
        DenseHeader {
            dims: vector.len(),
            kind: S::KIND as u8,
            _padding: [0; 3],
        }
        .as_bytes(),
    );
    buffer.extend_from_slice(vector.slice().as_bytes());
    while buffer.len() % ALIGN != 0 {
        buffer.push(0u8);
    }
    buffer
}
