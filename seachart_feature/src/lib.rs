// Copyright 2025 the Seachart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seachart Feature: decoded S-57 chart features as consumed by the overlay.
//!
//! A chart parser (outside this workspace) turns ENC cells into [`Feature`]
//! records: an object class code, a geometry primitive, a sparse attribute
//! table, a minimum display scale, coordinate rings and links to related
//! features. This crate holds that input contract and the geometry adapter
//! that projects a feature's rings into map points for drawing:
//! [`Feature::point`], [`Feature::points`], [`Feature::interior_rings`] and
//! [`Feature::centroid`].
//!
//! Features are immutable once built. Use [`FeatureBuilder`] to assemble
//! one:
//!
//! ```rust
//! use seachart_feature::{attr, class, FeatureBuilder, Primitive};
//! use seachart_region::Coordinate;
//!
//! let depth_area = FeatureBuilder::new(7, class::DEPARE, Primitive::Area)
//!     .attribute(attr::DRVAL1, "35")
//!     .exterior([
//!         Coordinate::new(41.0, 2.0),
//!         Coordinate::new(41.0, 2.1),
//!         Coordinate::new(41.1, 2.1),
//!         Coordinate::new(41.0, 2.0),
//!     ])
//!     .build();
//!
//! assert_eq!(depth_area.attributes().get(attr::DRVAL1), Some("35"));
//! assert!(depth_area.region().is_some());
//! ```
//!
//! Object class and attribute codes used by the symbology tables are named
//! in [`class`] and [`attr`].

pub mod attr;
pub mod class;
mod geometry;

use std::sync::Arc;

use hashbrown::HashMap;
use seachart_region::{Coordinate, GeoRegion};

pub use geometry::polygon_centroid;

/// Chart record identifier (S-57 RCID) of a feature.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeatureId(pub u64);

/// Geometric primitive of a feature (S-57 PRIM).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// A single position.
    Point,
    /// An open polyline.
    Line,
    /// A closed polygon, optionally with holes.
    Area,
    /// No geometry (meta or collection objects).
    #[default]
    None,
}

/// Sparse attribute table: attribute code to its textual value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes(HashMap<u16, String>);

impl Attributes {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of `code`, if present.
    #[must_use]
    pub fn get(&self, code: u16) -> Option<&str> {
        self.0.get(&code).map(String::as_str)
    }

    /// Returns the value of `code`, or `default` when it is missing.
    #[must_use]
    pub fn get_or<'a>(&'a self, code: u16, default: &'a str) -> &'a str {
        self.get(code).unwrap_or(default)
    }

    /// Parses the value of `code` as a number.
    #[must_use]
    pub fn number(&self, code: u16) -> Option<f64> {
        self.get(code)?.trim().parse().ok()
    }

    /// Sets `code` to `value`, returning the previous value.
    pub fn insert(&mut self, code: u16, value: impl Into<String>) -> Option<String> {
        self.0.insert(code, value.into())
    }

    /// Number of attributes present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no attribute is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(code, value)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &str)> + '_ {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl<V: Into<String>> FromIterator<(u16, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (u16, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

/// Ordered coordinate rings of a feature.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Geometry {
    /// Exterior ring (or polyline, or single point).
    pub exterior: Vec<Coordinate>,
    /// Interior rings (holes) of an area.
    pub interior: Vec<Vec<Coordinate>>,
}

/// A position from a spatial record, with its sounding depth if any.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SpatialPoint {
    /// Horizontal position.
    pub coordinate: Coordinate,
    /// Depth in metres for 3-D sounding positions.
    pub depth: Option<f64>,
}

impl SpatialPoint {
    /// Creates a sounding position.
    #[must_use]
    pub const fn sounding(coordinate: Coordinate, depth: f64) -> Self {
        Self {
            coordinate,
            depth: Some(depth),
        }
    }
}

/// Spatial (vector) record linked to a feature.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpatialRecord {
    /// Positions of the record, in order.
    pub points: Vec<SpatialPoint>,
}

/// Relationship indicator of a feature-to-feature link (S-57 RIND).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Relationship {
    /// The linked feature is the master of this one.
    Master,
    /// The linked feature is a slave drawn together with this one.
    Slave,
    /// The features are peers.
    Peer,
}

/// Link from a feature to a related feature.
#[derive(Clone, Debug)]
pub struct FeatureLink {
    /// How the linked feature relates to the owner.
    pub relationship: Relationship,
    /// The linked feature.
    pub feature: Arc<Feature>,
}

/// A decoded chart object.
#[derive(Clone, Debug)]
pub struct Feature {
    id: FeatureId,
    class: u16,
    primitive: Primitive,
    attributes: Attributes,
    min_scale: f64,
    geometry: Geometry,
    spatial: Vec<SpatialRecord>,
    links: Vec<FeatureLink>,
}

impl Feature {
    /// Record identifier.
    #[must_use]
    pub fn id(&self) -> FeatureId {
        self.id
    }

    /// Object class code (S-57 OBJL).
    #[must_use]
    pub fn class(&self) -> u16 {
        self.class
    }

    /// Geometric primitive.
    #[must_use]
    pub fn primitive(&self) -> Primitive {
        self.primitive
    }

    /// Attribute table.
    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Minimum display scale denominator; `0` means always displayed.
    #[must_use]
    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    /// Coordinate rings.
    #[must_use]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Linked spatial records.
    #[must_use]
    pub fn spatial(&self) -> &[SpatialRecord] {
        &self.spatial
    }

    /// Links to related features.
    #[must_use]
    pub fn links(&self) -> &[FeatureLink] {
        &self.links
    }

    /// Linked features whose relationship is [`Relationship::Slave`].
    pub fn slaves(&self) -> impl Iterator<Item = &Feature> + '_ {
        self.links
            .iter()
            .filter(|l| l.relationship == Relationship::Slave)
            .map(|l| &*l.feature)
    }

    /// Bounding region of the feature.
    ///
    /// Covers the exterior ring, or the spatial-record positions when the
    /// exterior is empty (soundings). `None` when the feature has neither.
    #[must_use]
    pub fn region(&self) -> Option<GeoRegion> {
        if self.geometry.exterior.is_empty() {
            GeoRegion::from_coordinates(
                self.spatial
                    .iter()
                    .flat_map(|r| r.points.iter().map(|p| p.coordinate)),
            )
        } else {
            GeoRegion::from_coordinates(self.geometry.exterior.iter().copied())
        }
    }
}

/// Builder for [`Feature`] records.
#[derive(Clone, Debug)]
pub struct FeatureBuilder {
    feature: Feature,
}

impl FeatureBuilder {
    /// Starts a feature with the given record id, class code and primitive.
    #[must_use]
    pub fn new(id: u64, class: u16, primitive: Primitive) -> Self {
        Self {
            feature: Feature {
                id: FeatureId(id),
                class,
                primitive,
                attributes: Attributes::new(),
                min_scale: 0.0,
                geometry: Geometry::default(),
                spatial: Vec::new(),
                links: Vec::new(),
            },
        }
    }

    /// Sets one attribute.
    #[must_use]
    pub fn attribute(mut self, code: u16, value: impl Into<String>) -> Self {
        self.feature.attributes.insert(code, value);
        self
    }

    /// Replaces the attribute table.
    #[must_use]
    pub fn attributes(mut self, attributes: Attributes) -> Self {
        self.feature.attributes = attributes;
        self
    }

    /// Sets the minimum display scale denominator.
    #[must_use]
    pub fn min_scale(mut self, min_scale: f64) -> Self {
        self.feature.min_scale = min_scale;
        self
    }

    /// Sets the exterior ring.
    #[must_use]
    pub fn exterior(mut self, ring: impl IntoIterator<Item = Coordinate>) -> Self {
        self.feature.geometry.exterior = ring.into_iter().collect();
        self
    }

    /// Appends an interior ring (hole).
    #[must_use]
    pub fn interior(mut self, ring: impl IntoIterator<Item = Coordinate>) -> Self {
        self.feature.geometry.interior.push(ring.into_iter().collect());
        self
    }

    /// Appends a spatial record.
    #[must_use]
    pub fn spatial(mut self, points: impl IntoIterator<Item = SpatialPoint>) -> Self {
        self.feature.spatial.push(SpatialRecord {
            points: points.into_iter().collect(),
        });
        self
    }

    /// Appends a link to a related feature.
    #[must_use]
    pub fn link(mut self, relationship: Relationship, feature: impl Into<Arc<Feature>>) -> Self {
        self.feature.links.push(FeatureLink {
            relationship,
            feature: feature.into(),
        });
        self
    }

    /// Finishes the feature.
    #[must_use]
    pub fn build(self) -> Feature {
        self.feature
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon)
    }

    #[test]
    fn attributes_default_when_missing() {
        let attrs: Attributes = [(attr::CATCAM, "2")].into_iter().collect();
        assert_eq!(attrs.get(attr::CATCAM), Some("2"));
        assert_eq!(attrs.get(attr::DRVAL1), None);
        assert_eq!(attrs.get_or(attr::DRVAL1, "0"), "0");
        assert_eq!(attrs.number(attr::CATCAM), Some(2.0));
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn non_numeric_values_do_not_parse() {
        let attrs: Attributes = [(attr::VALSOU, "shoal")].into_iter().collect();
        assert_eq!(attrs.number(attr::VALSOU), None);
    }

    #[test]
    fn region_covers_exterior() {
        let f = FeatureBuilder::new(1, class::LNDARE, Primitive::Area)
            .exterior([c(41.0, 2.0), c(41.2, 2.0), c(41.2, 2.3), c(41.0, 2.0)])
            .build();
        let r = f.region().expect("exterior present");
        assert!(r.contains(c(41.1, 2.1)));
        assert!(!r.contains(c(40.9, 2.1)));
    }

    #[test]
    fn soundings_fall_back_to_spatial_positions() {
        let f = FeatureBuilder::new(2, class::SOUNDG, Primitive::Point)
            .spatial([
                SpatialPoint::sounding(c(41.0, 2.0), 12.5),
                SpatialPoint::sounding(c(41.1, 2.2), 7.0),
            ])
            .build();
        let r = f.region().expect("spatial positions present");
        assert!(r.contains(c(41.05, 2.1)));
    }

    #[test]
    fn feature_without_geometry_has_no_region() {
        let f = FeatureBuilder::new(3, class::M_COVR, Primitive::None).build();
        assert!(f.region().is_none());
    }

    #[test]
    fn slaves_filter_by_relationship() {
        let light = FeatureBuilder::new(10, class::LIGHTS, Primitive::Point)
            .exterior([c(41.0, 2.0)])
            .build();
        let topmark = FeatureBuilder::new(11, class::TOPMAR, Primitive::Point)
            .exterior([c(41.0, 2.0)])
            .build();
        let beacon = FeatureBuilder::new(12, class::BCNLAT, Primitive::Point)
            .exterior([c(41.0, 2.0)])
            .link(Relationship::Slave, light)
            .link(Relationship::Peer, topmark)
            .build();

        let slaves: Vec<_> = beacon.slaves().map(Feature::id).collect();
        assert_eq!(slaves, [FeatureId(10)]);
        assert_eq!(beacon.links().len(), 2);
    }
}
