// Copyright 2025 the Seachart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Projected geometry accessors.

use seachart_region::{MapPoint, MapRect};
use seachart_region::projection::map_point;

use crate::Feature;

/// Twice the signed area, relative to the ring's bounding box, below which a
/// ring is treated as degenerate.
const MIN_AREA_RATIO: f64 = 1e-9;

impl Feature {
    /// First exterior position in map points, or `None` without geometry.
    #[must_use]
    pub fn point(&self) -> Option<MapPoint> {
        self.geometry.exterior.first().map(|c| map_point(*c))
    }

    /// Exterior ring in map points, or `None` when it is empty.
    #[must_use]
    pub fn points(&self) -> Option<Vec<MapPoint>> {
        if self.geometry.exterior.is_empty() {
            return None;
        }
        Some(self.geometry.exterior.iter().map(|c| map_point(*c)).collect())
    }

    /// Non-empty interior rings in map points.
    pub fn interior_rings(&self) -> impl Iterator<Item = Vec<MapPoint>> + '_ {
        self.geometry
            .interior
            .iter()
            .filter(|ring| !ring.is_empty())
            .map(|ring| ring.iter().map(|c| map_point(*c)).collect())
    }

    /// Area centroid of the exterior ring in map points.
    ///
    /// `None` when the ring is missing or degenerate; see
    /// [`polygon_centroid`].
    #[must_use]
    pub fn centroid(&self) -> Option<MapPoint> {
        polygon_centroid(&self.points()?)
    }
}

/// Area centroid of a polygon ring (shoelace formula).
///
/// The ring may be given open or closed (first point repeated last). Sums are
/// taken relative to the first point, so small rings far from the map origin
/// keep their precision. Returns `None` for rings with fewer than three
/// points, a signed area that is negligible next to the ring's bounding box,
/// or a non-finite result.
#[must_use]
pub fn polygon_centroid(ring: &[MapPoint]) -> Option<MapPoint> {
    let &origin = ring.first()?;
    if ring.len() < 3 {
        return None;
    }

    let mut bounds = MapRect::from_points(origin, origin);
    let mut a = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for (i, p) in ring.iter().enumerate() {
        bounds = bounds.union_pt(*p);
        let p = *p - origin;
        let q = ring[(i + 1) % ring.len()] - origin;
        let cross = p.x * q.y - q.x * p.y;
        a += cross;
        cx += (p.x + q.x) * cross;
        cy += (p.y + q.y) * cross;
    }

    if a.is_nan() || a.abs() <= MIN_AREA_RATIO * bounds.area() {
        return None;
    }
    // `a` holds twice the signed area, so 6A == 3a.
    let centroid = MapPoint::new(origin.x + cx / (3.0 * a), origin.y + cy / (3.0 * a));
    (centroid.x.is_finite() && centroid.y.is_finite()).then_some(centroid)
}
