// Copyright 2025 the Seachart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The overlay: a set of features drawn as one unit.

use std::sync::Arc;

use seachart_feature::Feature;
use seachart_region::{Coordinate, GeoRegion, MapRect};

use crate::OverlayError;

/// An immutable, non-empty set of chart features with a bounding region.
#[derive(Clone, Debug)]
pub struct OverlayModel {
    features: Vec<Arc<Feature>>,
    bounding_region: GeoRegion,
}

impl OverlayModel {
    /// Builds an overlay from `features`, in drawing order.
    ///
    /// The bounding region is the union of every feature's region; features
    /// without one are kept (they may still carry slaves) but do not widen
    /// the bounds.
    ///
    /// # Errors
    ///
    /// - [`OverlayError::EmptyFeatureSet`] if `features` is empty.
    /// - [`OverlayError::NoGeometricRegion`] if no feature has a region.
    pub fn new<I>(features: I) -> Result<Self, OverlayError>
    where
        I: IntoIterator,
        I::Item: Into<Arc<Feature>>,
    {
        let features: Vec<Arc<Feature>> = features.into_iter().map(Into::into).collect();
        if features.is_empty() {
            return Err(OverlayError::EmptyFeatureSet);
        }

        let bounding_region = features
            .iter()
            .filter_map(|f| f.region())
            .reduce(|acc, r| acc.union(&r))
            .ok_or(OverlayError::NoGeometricRegion)?;

        tracing::debug!(
            "OverlayModel::new: {} features, center=({:.5}, {:.5})",
            features.len(),
            bounding_region.center().latitude,
            bounding_region.center().longitude,
        );

        Ok(Self {
            features,
            bounding_region,
        })
    }

    /// Features in drawing order.
    pub fn features(&self) -> &[Arc<Feature>] {
        &self.features
    }

    /// Union of all feature regions.
    pub fn bounding_region(&self) -> GeoRegion {
        self.bounding_region
    }

    /// Bounding region in map points.
    pub fn bounding_rect(&self) -> MapRect {
        self.bounding_region.bounding_rect()
    }

    /// Representative coordinate of the overlay (center of its bounds).
    pub fn center(&self) -> Coordinate {
        self.bounding_region.center()
    }

    /// Whether the overlay fully covers the map beneath it. Always `false`.
    pub fn can_replace_map_content(&self) -> bool {
        false
    }
}
