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
use std::fmt::Display;
use zerocopy::FromBytes;

/// A host type identifier, such as a catalog oid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementType(pub u32);

impl Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A borrowed array of fixed-width elements of a single host type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnyArray<'a> {
    element_type: ElementType,
    width: usize,
    data: &'a [u8],
}

impl<'a> AnyArray<'a> {
    /// Returns `None` if `width` is zero or does not divide `data`.
    pub fn new_checked(element_type: ElementType, width: usize, data: &'a [u8]) -> Option<Self> {
        if width == 0 || data.len() % width != 0 {
            return None;
        }
        Some(Self {
            element_type,
            width,
            data,
        })
    }

    #[inline(always)]
    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.data.len() / self.width
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn elements(&self) -> Vec<&'a [u8]> {
        self.data.chunks_exact(self.width).collect()
    }
}

/// A three-way comparison over the raw bytes of two elements of one type.
pub trait Comparator {
    fn compare(&self, lhs: &[u8], rhs: &[u8]) -> Ordering;
}

impl<F: Fn(&[u8], &[u8]) -> Ordering> Comparator for F {
    fn compare(&self, lhs: &[u8], rhs: &[u8]) -> Ordering {
        self(lhs, rhs)
    }
}

/// Compares elements as native-endian `T`. Elements that are not exactly
/// `size_of::<T>()` bytes fall back to byte order.
pub fn native_ord<T: FromBytes + Ord>(lhs: &[u8], rhs: &[u8]) -> Ordering {
    match (T::read_from_bytes(lhs), T::read_from_bytes(rhs)) {
        (Ok(lhs), Ok(rhs)) => lhs.cmp(&rhs),
        _ => lhs.cmp(rhs),
    }
}
