// Copyright 2025 the Seachart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping from map points onto the drawing surface.

use kurbo::{Affine, Point};
use seachart_region::MapPoint;

/// Maps map-point geometry into the local coordinates of an imaging backend.
///
/// Implementations must be similarity transforms (translation, uniform scale,
/// rotation) so that lengths scale the same way in every direction.
pub trait SurfaceProjection {
    /// Maps a map point to a surface point.
    fn to_surface_point(&self, point: MapPoint) -> Point;

    /// Maps a length in map points to a length in surface units.
    fn to_surface_size(&self, length: f64) -> f64;
}

impl SurfaceProjection for Affine {
    fn to_surface_point(&self, point: MapPoint) -> Point {
        *self * point
    }

    fn to_surface_size(&self, length: f64) -> f64 {
        length * self.determinant().abs().sqrt()
    }
}

/// Translates map points so that `origin` lands on the surface origin.
///
/// This is the usual projection for a tile renderer whose surface is in map
/// points and starts at the tile's top-left corner.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OriginProjection {
    /// Map point drawn at the surface origin.
    pub origin: MapPoint,
}

impl OriginProjection {
    /// Creates a projection placing `origin` at `(0, 0)`.
    pub fn new(origin: MapPoint) -> Self {
        Self { origin }
    }
}

impl SurfaceProjection for OriginProjection {
    fn to_surface_point(&self, point: MapPoint) -> Point {
        (point - self.origin).to_point()
    }

    fn to_surface_size(&self, length: f64) -> f64 {
        length
    }
}

impl<P: SurfaceProjection + ?Sized> SurfaceProjection for &P {
    fn to_surface_point(&self, point: MapPoint) -> Point {
        (**self).to_surface_point(point)
    }

    fn to_surface_size(&self, length: f64) -> f64 {
        (**self).to_surface_size(length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_projection_translates_only() {
        let p = OriginProjection::new(MapPoint::new(100.0, 200.0));
        assert_eq!(p.to_surface_point(MapPoint::new(110.0, 205.0)), Point::new(10.0, 5.0));
        assert_eq!(p.to_surface_size(3.5), 3.5);
    }

    #[test]
    fn affine_scales_lengths_uniformly() {
        let a = Affine::translate((-50.0, -50.0)).then_scale(4.0);
        assert_eq!(a.to_surface_point(MapPoint::new(51.0, 52.0)), Point::new(4.0, 8.0));
        assert!((a.to_surface_size(2.0) - 8.0).abs() < 1e-12);

        let rotated = Affine::rotate(1.0).then_scale(2.0);
        assert!((rotated.to_surface_size(1.0) - 2.0).abs() < 1e-12);
    }
}
