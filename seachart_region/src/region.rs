// Copyright 2025 the Seachart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;

use crate::projection::{self, MapPoint, MapRect};

/// Tolerance in degrees used when comparing region edges.
const EDGE_EPSILON: f64 = 1e-9;

/// Slack in map points absorbing rounding in corners rebuilt from center and span.
const CONTAINS_EPSILON: f64 = 1e-6;

/// A geographic position in degrees.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Coordinate {
    /// Latitude in degrees, positive north.
    pub latitude: f64,
    /// Longitude in degrees, positive east.
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate from latitude and longitude in degrees.
    #[inline]
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Projects this coordinate into map-point space.
    #[inline]
    #[must_use]
    pub fn to_map_point(self) -> MapPoint {
        projection::map_point(self)
    }
}

/// Angular extent of a [`GeoRegion`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Span {
    /// North-south extent in degrees.
    pub latitude_delta: f64,
    /// East-west extent in degrees.
    pub longitude_delta: f64,
}

impl Span {
    /// Creates a span; negative components are folded to their magnitude.
    #[inline]
    #[must_use]
    pub fn new(latitude_delta: f64, longitude_delta: f64) -> Self {
        Self {
            latitude_delta: latitude_delta.abs(),
            longitude_delta: longitude_delta.abs(),
        }
    }
}

/// Axis-aligned latitude/longitude rectangle.
///
/// The canonical form is a center and a [`Span`]. Corner accessors are
/// derived, and [`GeoRegion::bounding_rect`] converts the region into map
/// points for planar arithmetic. Operations never mutate; they return new
/// regions.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct GeoRegion {
    center: Coordinate,
    span: Span,
}

impl GeoRegion {
    /// Creates a region from its center and span.
    #[must_use]
    pub fn new(center: Coordinate, span: Span) -> Self {
        Self {
            center,
            span: Span::new(span.latitude_delta, span.longitude_delta),
        }
    }

    /// Creates a region from its four edges, in degrees.
    ///
    /// Edges given in the wrong order are swapped, so the result always has a
    /// non-negative span.
    #[must_use]
    pub fn from_edges(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        let center = Coordinate::new((top + bottom) / 2.0, (left + right) / 2.0);
        Self::new(center, Span::new(top - bottom, right - left))
    }

    /// Returns the smallest region covering every coordinate, or `None` for
    /// an empty input.
    pub fn from_coordinates(coordinates: impl IntoIterator<Item = Coordinate>) -> Option<Self> {
        let mut iter = coordinates.into_iter();
        let first = iter.next()?;
        let (mut top, mut bottom) = (first.latitude, first.latitude);
        let (mut left, mut right) = (first.longitude, first.longitude);
        for c in iter {
            top = top.max(c.latitude);
            bottom = bottom.min(c.latitude);
            left = left.min(c.longitude);
            right = right.max(c.longitude);
        }
        Some(Self::from_edges(top, left, bottom, right))
    }

    /// Converts a map-point rectangle back into an angular region.
    #[must_use]
    pub fn from_map_rect(rect: MapRect) -> Self {
        let top_left = projection::coordinate(MapPoint::new(rect.x0, rect.y0));
        let bottom_right = projection::coordinate(MapPoint::new(rect.x1, rect.y1));
        Self::from_edges(
            top_left.latitude,
            top_left.longitude,
            bottom_right.latitude,
            bottom_right.longitude,
        )
    }

    /// Returns the center coordinate.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Coordinate {
        self.center
    }

    /// Returns the angular span.
    #[inline]
    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    /// North-west corner.
    #[must_use]
    pub fn top_left(&self) -> Coordinate {
        Coordinate::new(
            self.center.latitude + self.span.latitude_delta / 2.0,
            self.center.longitude - self.span.longitude_delta / 2.0,
        )
    }

    /// South-east corner.
    #[must_use]
    pub fn bottom_right(&self) -> Coordinate {
        Coordinate::new(
            self.center.latitude - self.span.latitude_delta / 2.0,
            self.center.longitude + self.span.longitude_delta / 2.0,
        )
    }

    /// Corner ring of the region: south-west, north-west, north-east,
    /// south-east.
    #[must_use]
    pub fn boundary(&self) -> [Coordinate; 4] {
        let tl = self.top_left();
        let br = self.bottom_right();
        [
            Coordinate::new(br.latitude, tl.longitude),
            tl,
            Coordinate::new(tl.latitude, br.longitude),
            br,
        ]
    }

    /// Returns `true` if either span component is zero.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.span.latitude_delta == 0.0 || self.span.longitude_delta == 0.0
    }

    /// Projects the region into a map-point rectangle.
    #[must_use]
    pub fn bounding_rect(&self) -> MapRect {
        let a = projection::map_point(self.top_left());
        let b = projection::map_point(self.bottom_right());
        Rect::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }

    /// Returns `true` if the projected rectangles overlap, edges included.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        projection::rects_intersect(self.bounding_rect(), other.bounding_rect())
    }

    /// Planar intersection of the two regions, projected back to degrees.
    ///
    /// The result is degenerate when the regions do not intersect; check
    /// [`GeoRegion::intersects`] first.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        Self::from_map_rect(self.bounding_rect().intersect(other.bounding_rect()))
    }

    /// Smallest region covering both regions, computed from corner extrema.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let (a_tl, a_br) = (self.top_left(), self.bottom_right());
        let (b_tl, b_br) = (other.top_left(), other.bottom_right());
        Self::from_edges(
            a_tl.latitude.max(b_tl.latitude),
            a_tl.longitude.min(b_tl.longitude),
            a_br.latitude.min(b_br.latitude),
            a_br.longitude.max(b_br.longitude),
        )
    }

    /// Scales both span components by `factor`, keeping the center.
    ///
    /// Non-positive or non-finite factors return the region unchanged.
    #[must_use]
    pub fn resized_by_factor(&self, factor: f64) -> Self {
        if !(factor > 0.0 && factor.is_finite()) {
            return *self;
        }
        Self::new(
            self.center,
            Span::new(
                self.span.latitude_delta * factor,
                self.span.longitude_delta * factor,
            ),
        )
    }

    /// Returns `true` if the coordinate lies in the projected rectangle.
    #[must_use]
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        let rect = self.bounding_rect().inflate(CONTAINS_EPSILON, CONTAINS_EPSILON);
        projection::rect_contains(rect, projection::map_point(coordinate))
    }

    /// Returns `true` if `other` lies entirely within this region.
    #[must_use]
    pub fn contains_region(&self, other: &Self) -> bool {
        let (a_tl, a_br) = (self.top_left(), self.bottom_right());
        let (b_tl, b_br) = (other.top_left(), other.bottom_right());
        b_tl.latitude <= a_tl.latitude + EDGE_EPSILON
            && b_br.latitude >= a_br.latitude - EDGE_EPSILON
            && b_tl.longitude >= a_tl.longitude - EDGE_EPSILON
            && b_br.longitude <= a_br.longitude + EDGE_EPSILON
    }

    /// Area of the projected rectangle, in square map points.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.bounding_rect().area()
    }

    /// Coverage radius in metres: the larger of the north-south and
    /// east-west ground extents through the center, halved.
    #[must_use]
    pub fn radius(&self) -> f64 {
        let c = self.center;
        let half_lat = self.span.latitude_delta / 2.0;
        let half_lon = self.span.longitude_delta / 2.0;

        let north_south = projection::distance_meters(
            Coordinate::new(c.latitude - half_lat, c.longitude),
            Coordinate::new(c.latitude + half_lat, c.longitude),
        );
        let east_west = projection::distance_meters(
            Coordinate::new(c.latitude, c.longitude - half_lon),
            Coordinate::new(c.latitude, c.longitude + half_lon),
        );
        north_south.max(east_west) / 2.0
    }

    /// Compares two regions edge by edge within `tolerance` degrees.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        (self.center.latitude - other.center.latitude).abs() <= tolerance
            && (self.center.longitude - other.center.longitude).abs() <= tolerance
            && (self.span.latitude_delta - other.span.latitude_delta).abs() <= tolerance
            && (self.span.longitude_delta - other.span.longitude_delta).abs() <= tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn barcelona() -> GeoRegion {
        GeoRegion::from_edges(41.40, 2.10, 41.30, 2.25)
    }

    fn sitges() -> GeoRegion {
        GeoRegion::from_edges(41.25, 1.78, 41.20, 1.84)
    }

    #[test]
    fn corners_follow_center_and_span() {
        let r = GeoRegion::new(Coordinate::new(10.0, 20.0), Span::new(2.0, 4.0));
        assert_eq!(r.top_left(), Coordinate::new(11.0, 18.0));
        assert_eq!(r.bottom_right(), Coordinate::new(9.0, 22.0));
    }

    #[test]
    fn from_edges_keeps_latitude_and_longitude_apart() {
        let r = GeoRegion::from_edges(42.0, 2.0, 41.0, 5.0);
        assert_eq!(r.span().latitude_delta, 1.0);
        assert_eq!(r.span().longitude_delta, 3.0);
    }

    #[test]
    fn negative_spans_are_folded() {
        let r = GeoRegion::new(Coordinate::new(0.0, 0.0), Span::new(-2.0, -1.0));
        assert_eq!(r.span(), Span::new(2.0, 1.0));
    }

    #[test]
    fn from_coordinates_covers_every_point() {
        let pts = [
            Coordinate::new(41.3, 2.1),
            Coordinate::new(41.4, 2.2),
            Coordinate::new(41.35, 2.0),
        ];
        let r = GeoRegion::from_coordinates(pts).expect("non-empty input");
        for p in pts {
            assert!(r.contains(p), "{p:?} outside {r:?}");
        }
        assert!(GeoRegion::from_coordinates([]).is_none());
    }

    #[test]
    fn single_coordinate_region_is_degenerate_but_usable() {
        let c = Coordinate::new(41.35, 2.15);
        let r = GeoRegion::from_coordinates([c]).expect("one point");
        assert!(r.is_degenerate());
        assert!(r.contains(c));
        assert!(r.intersects(&barcelona()));
    }

    #[test]
    fn union_is_commutative() {
        let (a, b) = (barcelona(), sitges());
        assert_eq!(a.union(&b), b.union(&a));
    }

    #[test]
    fn union_is_associative() {
        let a = barcelona();
        let b = sitges();
        let c = GeoRegion::from_edges(40.0, 0.5, 39.5, 1.0);
        let left = a.union(&b).union(&c);
        let right = a.union(&b.union(&c));
        assert!(left.approx_eq(&right, TOL), "{left:?} != {right:?}");
    }

    #[test]
    fn union_with_self_is_identity() {
        let a = barcelona();
        assert!(a.union(&a).approx_eq(&a, TOL));
    }

    #[test]
    fn union_contains_both_inputs() {
        let (a, b) = (barcelona(), sitges());
        let u = a.union(&b);
        assert!(u.contains_region(&a));
        assert!(u.contains_region(&b));
        assert!(u.union(&a).approx_eq(&u, TOL));
    }

    #[test]
    fn contains_region_is_reflexive_and_transitive() {
        let inner = GeoRegion::from_edges(41.36, 2.15, 41.34, 2.17);
        let middle = barcelona();
        let outer = middle.union(&sitges());
        assert!(middle.contains_region(&middle));
        assert!(middle.contains_region(&inner));
        assert!(outer.contains_region(&middle));
        assert!(outer.contains_region(&inner));
        assert!(!inner.contains_region(&middle));
    }

    #[test]
    fn intersects_is_symmetric() {
        let a = barcelona();
        let b = GeoRegion::from_edges(41.35, 2.20, 41.0, 3.0);
        let c = sitges();
        assert_eq!(a.intersects(&b), b.intersects(&a));
        assert_eq!(a.intersects(&c), c.intersects(&a));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn touching_regions_intersect() {
        let a = GeoRegion::from_edges(41.0, 2.0, 40.0, 3.0);
        let b = GeoRegion::from_edges(41.0, 3.0, 40.0, 4.0);
        assert!(a.intersects(&b));
    }

    #[test]
    fn intersection_with_self_is_identity() {
        let a = barcelona();
        assert!(a.intersection(&a).approx_eq(&a, TOL));
    }

    #[test]
    fn intersection_of_overlapping_regions() {
        let a = GeoRegion::from_edges(42.0, 2.0, 40.0, 4.0);
        let b = GeoRegion::from_edges(41.0, 3.0, 39.0, 5.0);
        let i = a.intersection(&b);
        let expected = GeoRegion::from_edges(41.0, 3.0, 40.0, 4.0);
        assert!(i.approx_eq(&expected, TOL), "{i:?}");
    }

    #[test]
    fn resize_by_one_is_identity() {
        let a = barcelona();
        assert!(a.resized_by_factor(1.0).approx_eq(&a, TOL));
    }

    #[test]
    fn resize_round_trips() {
        let a = barcelona();
        for f in [0.5, 2.0, 3.7] {
            let back = a.resized_by_factor(f).resized_by_factor(1.0 / f);
            assert!(back.approx_eq(&a, TOL), "factor {f}");
            assert_eq!(a.resized_by_factor(f).center(), a.center());
        }
    }

    #[test]
    fn resize_ignores_non_positive_factors() {
        let a = barcelona();
        assert_eq!(a.resized_by_factor(0.0), a);
        assert_eq!(a.resized_by_factor(-2.0), a);
    }

    #[test]
    fn bounding_rect_is_ordered() {
        let r = barcelona().bounding_rect();
        assert!(r.x0 < r.x1);
        assert!(r.y0 < r.y1);
        assert!(barcelona().area() > 0.0);
    }

    #[test]
    fn from_map_rect_inverts_bounding_rect() {
        let a = sitges();
        assert!(GeoRegion::from_map_rect(a.bounding_rect()).approx_eq(&a, TOL));
    }

    #[test]
    fn radius_uses_the_larger_extent() {
        // One degree north-south at the equator is ~111 km, so the radius of a
        // 1 x 0.5 degree region is ~55.6 km.
        let r = GeoRegion::new(Coordinate::new(0.0, 0.0), Span::new(1.0, 0.5));
        assert!((r.radius() - 55_597.5).abs() < 10.0, "got {}", r.radius());
    }

    #[test]
    fn boundary_lists_the_four_corners() {
        let r = GeoRegion::from_edges(2.0, 0.0, 1.0, 3.0);
        let [sw, nw, ne, se] = r.boundary();
        assert_eq!(sw, Coordinate::new(1.0, 0.0));
        assert_eq!(nw, Coordinate::new(2.0, 0.0));
        assert_eq!(ne, Coordinate::new(2.0, 3.0));
        assert_eq!(se, Coordinate::new(1.0, 3.0));
    }
}
