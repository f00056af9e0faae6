// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate service settings.

use std::time::Duration;

use crate::error::TransformError;

/// Most decimal places an `f64` can round to meaningfully.
const MAX_DECIMAL_PLACES: u8 = 15;

/// Settings for [`CoordinateService`](crate::CoordinateService).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TransformConfig {
    /// How long a cached absolute position stays valid. Zero disables caching.
    pub ttl: Duration,
    /// Decimal places coordinates are rounded to.
    pub decimal_places: u8,
    /// Longest owner chain resolved before giving up. Also bounds ownership cycles.
    pub max_nesting_depth: usize,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_millis(1000),
            decimal_places: 2,
            max_nesting_depth: 16,
        }
    }
}

impl TransformConfig {
    /// Reject settings the service cannot honor.
    pub fn validate(&self) -> Result<(), TransformError> {
        if self.decimal_places > MAX_DECIMAL_PLACES {
            return Err(TransformError::InvalidConfig(
                "decimal_places must be at most 15",
            ));
        }
        if self.max_nesting_depth == 0 {
            return Err(TransformError::InvalidConfig(
                "max_nesting_depth must be at least 1",
            ));
        }
        Ok(())
    }
}
