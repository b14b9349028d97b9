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

use crate::datatype::{memory_dense, memory_sparse};
use crate::error::Result;
use crate::options::EngineOptions;
use vector::VectorOwned;
use vector::dense::{DenseBorrowed, DenseOwned};
use vector::sparse::SparseOwned;

/// Entry points whose behavior depends on [`EngineOptions`].
#[derive(Debug, Clone, Default)]
pub struct Engine {
    options: EngineOptions,
}

impl Engine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    /// Parses options written as TOML.
    pub fn from_options(s: &str) -> Result<Self> {
        Ok(Self::new(EngineOptions::parse(s)?))
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn decode_dense<S: memory_dense::DenseElement>(
        &self,
        bytes: &[u8],
    ) -> Result<DenseOwned<S>> {
        memory_dense::decode(bytes, self.options.max_dims)
    }

    pub fn decode_sparse(&self, bytes: &[u8]) -> Result<SparseOwned> {
        memory_sparse::decode(bytes, self.options.max_dims)
    }

    pub fn distance_mahalanobis_int(
        &self,
        lhs: DenseBorrowed<'_, i32>,
        rhs: DenseBorrowed<'_, i32>,
        std_dev: DenseBorrowed<'_, f32>,
    ) -> Result<f64> {
        crate::functions::distance::distance_mahalanobis_int(
            lhs,
            rhs,
            std_dev,
            self.options.mahalanobis,
        )
    }

    /// Decodes an accumulator state and a row, folds the row in and encodes
    /// the new state. The state may hold up to `3 * max_dims + 1` elements.
    pub fn accumulate_bytes(&self, state: &[u8], row: &[u8]) -> Result<Vec<u8>> {
        let max_state = self.options.max_dims.saturating_mul(3).saturating_add(1);
        let state = memory_dense::decode::<f32>(state, max_state)?;
        let row = self.decode_dense::<f32>(row)?;
        let state = crate::functions::moments::array_accumulate(state, row.as_borrowed());
        Ok(memory_dense::encode(state.as_borrowed()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::MahalanobisVariant;

    #[test]
    fn options_flow_through() {
        let x = [3, 0];
        let y = [1, 0];
        let s = [2.0f32, 1.0];
        let (x, y, s) = (
            DenseBorrowed::new(&x),
            DenseBorrowed::new(&y),
            DenseBorrowed::new(&s),
        );
        let engine = Engine::default();
        assert_eq!(engine.options().mahalanobis, MahalanobisVariant::PerDimension);
        assert_eq!(engine.distance_mahalanobis_int(x, y, s).unwrap(), 1.0);
        let engine = Engine::from_options("mahalanobis = \"cumulative\"\nmax_dims = 2").unwrap();
        assert_eq!(engine.distance_mahalanobis_int(x, y, s).unwrap(), 5.0);
        let bytes = memory_dense::encode(DenseBorrowed::new(&[1.0f32, 2.0, 3.0]));
        assert!(engine.decode_dense::<f32>(&bytes).is_err());
    }

    #[test]
    fn accumulate_bytes() {
        let engine = Engine::default();
        let first = memory_dense::encode(DenseBorrowed::new(&[4.0f32, 6.0]));
        let row = memory_dense::encode(DenseBorrowed::new(&[8.0f32, 10.0]));
        let state = engine.accumulate_bytes(&first, &row).unwrap();
        let state = engine.decode_dense::<f32>(&state).unwrap();
        assert_eq!(state.slice(), &[12.0, 16.0, 80.0, 136.0, 2.0, 2.0, -2.0]);
    }
}
