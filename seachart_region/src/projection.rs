// Copyright 2025 the Seachart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spherical Web Mercator projection into map points.
//!
//! Map points cover the whole world with a square of [`MAP_WORLD_SIZE`]
//! units per side. `x` grows eastward from the antimeridian and `y` grows
//! southward from the northern projection limit, so the top-left corner of a
//! region maps to the minimum corner of its [`MapRect`].

use core::f64::consts::{FRAC_PI_4, PI};

use kurbo::{Point, Rect};

use crate::Coordinate;

/// A point in map-point space.
pub type MapPoint = Point;

/// An axis-aligned rectangle in map-point space.
pub type MapRect = Rect;

/// Width and height of the projected world, in map points.
pub const MAP_WORLD_SIZE: f64 = 268_435_456.0;

/// Largest latitude representable by the projection, in degrees.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Radius used by the projection (WGS 84 semi-major axis), in metres.
pub const EARTH_RADIUS_METERS: f64 = 6_378_137.0;

/// Mean Earth radius used for great-circle distances, in metres.
pub const MEAN_EARTH_RADIUS_METERS: f64 = 6_371_008.8;

/// Projects a coordinate into map-point space.
#[must_use]
pub fn map_point(coordinate: Coordinate) -> MapPoint {
    let latitude = coordinate
        .latitude
        .clamp(-MAX_LATITUDE, MAX_LATITUDE)
        .to_radians();
    let x = (coordinate.longitude + 180.0) / 360.0 * MAP_WORLD_SIZE;
    let y = (1.0 - (FRAC_PI_4 + latitude / 2.0).tan().ln() / PI) / 2.0 * MAP_WORLD_SIZE;
    Point::new(x, y)
}

/// Converts a map point back into a coordinate.
#[must_use]
pub fn coordinate(point: MapPoint) -> Coordinate {
    let longitude = point.x / MAP_WORLD_SIZE * 360.0 - 180.0;
    let n = PI * (1.0 - 2.0 * point.y / MAP_WORLD_SIZE);
    let latitude = n.sinh().atan().to_degrees();
    Coordinate::new(latitude, longitude)
}

/// Number of map points covering one metre of ground at `latitude`.
#[must_use]
pub fn map_points_per_meter_at_latitude(latitude: f64) -> f64 {
    let latitude = latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let circumference = 2.0 * PI * EARTH_RADIUS_METERS * latitude.cos();
    MAP_WORLD_SIZE / circumference
}

/// Returns `true` if the two rectangles overlap, counting shared edges.
///
/// Unlike [`Rect::intersect`], this treats touching rectangles (and
/// zero-sized rectangles lying on an edge) as intersecting.
#[must_use]
pub fn rects_intersect(a: MapRect, b: MapRect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

/// Returns `true` if `point` lies inside `rect` or on its boundary.
#[must_use]
pub fn rect_contains(rect: MapRect, point: MapPoint) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Great-circle distance between two coordinates, in metres (haversine).
#[must_use]
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = lat_b - lat_a;
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * MEAN_EARTH_RADIUS_METERS * h.sqrt().min(1.0).asin()
}
