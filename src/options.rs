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
use serde::{Deserialize, Serialize};
use validator::Validate;

/// How the Mahalanobis distance forms the numerator of each term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MahalanobisVariant {
    /// `(x_i - y_i)² / σ_i²`
    PerDimension,
    /// `Σ_{j <= i} (x_j - y_j)² / σ_i²`, as computed by older deployments.
    Cumulative,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct EngineOptions {
    #[serde(default = "EngineOptions::default_mahalanobis")]
    pub mahalanobis: MahalanobisVariant,
    #[serde(default = "EngineOptions::default_max_dims")]
    #[validate(range(min = 1, max = 1_000_000_000))]
    pub max_dims: u32,
}

impl EngineOptions {
    fn default_mahalanobis() -> MahalanobisVariant {
        MahalanobisVariant::PerDimension
    }
    fn default_max_dims() -> u32 {
        1 << 24
    }

    pub fn parse(s: &str) -> Result<Self> {
        let options = toml::from_str::<EngineOptions>(s).map_err(|e| Error::InvalidOptions {
            message: e.to_string(),
        })?;
        options.validate().map_err(|e| Error::InvalidOptions {
            message: e.to_string(),
        })?;
        Ok(options)
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            mahalanobis: Self::default_mahalanobis(),
            max_dims: Self::default_max_dims(),
        }
    }
}
