// Copyright 2025 the Seachart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seachart Overlay: S-57 chart features drawn as a map overlay.
//!
//! This crate ties the workspace together:
//!
//! - [`OverlayModel`]: an immutable set of features and their bounding region.
//! - [`OverlayRenderer`]: draws the model for one draw rect and zoom scale
//!   through any [`seachart_imaging::ImagingBackend`], using the symbology
//!   resolved by `seachart_symbology`.
//! - [`ImageCache`]: icon lookup by name over an [`AssetStore`], shared
//!   between renderers and threads.
//!
//! The embedder owns the tiling: for each tile it picks a draw rect in map
//! points, a [`SurfaceProjection`] onto its surface and a zoom scale (device
//! pixels per map point), then calls [`OverlayRenderer::paint`].
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use seachart_feature::{attr, class, FeatureBuilder, Primitive};
//! use seachart_imaging_ref::RefBackend;
//! use seachart_overlay::{
//!     ImageCache, MemoryAssetStore, OriginProjection, OverlayModel, OverlayRenderer,
//! };
//! use seachart_region::{Coordinate, MapRect};
//!
//! let wreck = FeatureBuilder::new(1, class::WRECKS, Primitive::Point)
//!     .attribute(attr::OBJNAM, "Cala Morisca")
//!     .exterior([Coordinate::new(41.21, 1.73)])
//!     .build();
//! let model = OverlayModel::new([wreck]).unwrap();
//! let renderer = OverlayRenderer::new(model, Arc::new(ImageCache::new(MemoryAssetStore::new())));
//!
//! let center = Coordinate::new(41.21, 1.73).to_map_point();
//! let tile = MapRect::from_center_size(center, (256.0, 256.0));
//! let mut backend = RefBackend::default();
//! let stats = renderer.paint(&mut backend, &OriginProjection::new(tile.origin()), tile, 1.0);
//!
//! assert_eq!(stats.drawn, 1);
//! assert_eq!(backend.live_resources(), 0);
//! ```
//!
//! Icons are looked up by name; the `png` feature adds
//! `PngDirectoryStore`, which reads `<dir>/<name>.png` files.

mod config;
mod error;
mod image_cache;
mod model;
mod renderer;
mod surface;

pub use config::RenderConfig;
pub use error::OverlayError;
#[cfg(feature = "png")]
pub use image_cache::PngDirectoryStore;
pub use image_cache::{AssetStore, IconImage, ImageCache, MemoryAssetStore};
pub use model::OverlayModel;
pub use renderer::{OverlayRenderer, PaintStats};
pub use surface::{OriginProjection, SurfaceProjection};
