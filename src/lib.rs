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

//! Scoring primitives for information retrieval over dense and sparse
//! feature vectors: element-wise algebra, merge-scan similarities, distance
//! metrics and a streaming mean and standard deviation accumulator.

pub mod datatype;
pub mod error;
pub mod functions;
pub mod options;

mod engine;

pub use engine::Engine;
pub use error::{Error, ErrorKind, ErrorSink, Result};
pub use vector::dense::{DenseBorrowed, DenseOwned};
pub use vector::sparse::{SparseBorrowed, SparseOwned};
pub use vector::{VectorBorrowed, VectorOwned};

#[cfg(not(target_endian = "little"))]
compile_error!("Target architecture is not supported.");
