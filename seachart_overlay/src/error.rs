// Copyright 2025 the Seachart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Errors building an [`OverlayModel`](crate::OverlayModel).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OverlayError {
    /// No feature was supplied.
    EmptyFeatureSet,
    /// None of the supplied features has any coordinates to bound.
    NoGeometricRegion,
}

impl fmt::Display for OverlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFeatureSet => f.write_str("overlay requires at least one feature"),
            Self::NoGeometricRegion => {
                f.write_str("no feature of the overlay has a geometric region")
            }
        }
    }
}

impl core::error::Error for OverlayError {}
