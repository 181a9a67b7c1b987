// Copyright 2025 the Seachart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seachart Region: angular bounding regions and the shared map-point space.
//!
//! Chart features are positioned in latitude/longitude, but culling, bounds
//! and drawing all work on a flat plane. This crate provides both sides and
//! keeps the conversions between them explicit:
//! - [`Coordinate`] and [`GeoRegion`]: a center + span rectangle in degrees,
//!   with union, intersection, containment, resize and radius queries.
//! - [`projection`]: a spherical Web Mercator projection into *map points*
//!   ([`MapPoint`], [`MapRect`]), the geometry space shared by the renderer
//!   and its host.
//!
//! ## Example
//!
//! ```rust
//! use seachart_region::{Coordinate, GeoRegion};
//!
//! let harbour = GeoRegion::from_edges(41.40, 2.15, 41.35, 2.22);
//! let approach = GeoRegion::from_edges(41.38, 2.20, 41.30, 2.30);
//!
//! assert!(harbour.intersects(&approach));
//! let both = harbour.union(&approach);
//! assert!(both.contains(Coordinate::new(41.31, 2.29)));
//! ```
//!
//! ## Limitations
//!
//! - Regions never wrap the antimeridian; a region spanning it must be split
//!   by the caller.
//! - The projection clamps latitudes to the Web Mercator limit
//!   ([`projection::MAX_LATITUDE`]).
//! - [`GeoRegion::area`] is measured in map points, not on the sphere.

pub mod projection;
mod region;

pub use projection::{MapPoint, MapRect};
pub use region::{Coordinate, GeoRegion, Span};
