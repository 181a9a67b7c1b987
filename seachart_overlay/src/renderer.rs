// Copyright 2025 the Seachart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing an [`OverlayModel`] onto an imaging backend.
//!
//! A paint pass walks the model's features in order. Each feature is culled
//! against the draw rect and filtered by its minimum display scale, then
//! drawn according to its primitive:
//!
//! - points draw their icon and label; soundings draw their depths as text;
//! - lines stroke their polyline;
//! - areas stroke their border, fill, erase their holes and draw their icon
//!   and label at the centroid.
//!
//! Slaves of a drawn feature are drawn right after it, without culling.
//!
//! Symbol sizes are given in device pixels and divided by the zoom scale, so
//! icons and text keep the same on-screen size at every zoom level. All
//! resources created by a pass are destroyed before [`OverlayRenderer::paint`]
//! returns.

use std::sync::Arc;

use hashbrown::{HashMap, HashSet};
use kurbo::{Circle, Point, Shape, Stroke};
use peniko::{Brush, Color};
use seachart_feature::{Feature, FeatureId, Primitive, class, polygon_centroid};
use seachart_imaging::{
    DrawOp, ImageAlphaType, ImageDesc, ImageFormat, ImageId, ImageSampler, ImagingBackend,
    ImagingBackendExt, LayerOp, PaintDesc, PaintId, PathBuilder, PathDesc, PathId, RectF,
    StateOp, TextRunDesc, TextRunId,
};
use seachart_region::projection::{
    coordinate, map_point, map_points_per_meter_at_latitude, rect_contains, rects_intersect,
};
use seachart_region::{MapPoint, MapRect};
use seachart_symbology::{BorderStyle, Icon, Symbology};

use crate::{ImageCache, OverlayModel, RenderConfig, SurfaceProjection};

const MILLIMETERS_PER_INCH: f64 = 25.4;

/// Fill of the marker drawn for missing icons.
const PLACEHOLDER_COLOR: Color = Color::new([1.0, 0.0, 1.0, 0.5]);
const OUTLINE_COLOR: Color = Color::BLACK;
const TEXT_COLOR: Color = Color::BLACK;
/// Any opaque color works; only coverage matters inside an erase layer.
const ERASE_COLOR: Color = Color::BLACK;

/// Flattening tolerance of the placeholder circle, relative to its radius.
const CIRCLE_TOLERANCE: f64 = 0.01;

/// Counters describing one paint pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PaintStats {
    /// Top-level features examined.
    pub considered: usize,
    /// Features outside the draw rect, or without geometry to place them.
    pub culled: usize,
    /// Features hidden at the current display scale.
    pub scale_filtered: usize,
    /// Features drawn, slaves included.
    pub drawn: usize,
    /// Slave links skipped because they revisit a feature or nest too deep.
    pub slave_cycles_skipped: usize,
}

/// Renders an [`OverlayModel`] through any [`ImagingBackend`].
#[derive(Debug)]
pub struct OverlayRenderer {
    model: OverlayModel,
    images: Arc<ImageCache>,
    config: RenderConfig,
}

impl OverlayRenderer {
    /// Creates a renderer with the default [`RenderConfig`].
    pub fn new(model: OverlayModel, images: Arc<ImageCache>) -> Self {
        Self {
            model,
            images,
            config: RenderConfig::default(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    /// The rendered overlay.
    pub fn model(&self) -> &OverlayModel {
        &self.model
    }

    /// The shared icon cache.
    pub fn images(&self) -> &Arc<ImageCache> {
        &self.images
    }

    /// Current configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Display scale denominator (the `N` of `1:N`) for a pass over
    /// `draw_rect` at `zoom_scale` device pixels per map point.
    ///
    /// Uses the latitude of the draw rect's center and
    /// [`RenderConfig::screen_ppi`].
    pub fn display_scale(&self, draw_rect: MapRect, zoom_scale: f64) -> f64 {
        let latitude = coordinate(draw_rect.center()).latitude;
        self.config.screen_ppi * 1000.0
            / (MILLIMETERS_PER_INCH * zoom_scale * map_points_per_meter_at_latitude(latitude))
    }

    /// Draws every visible feature intersecting `draw_rect`.
    ///
    /// `projection` maps map points into the backend's local coordinates and
    /// `zoom_scale` is the number of device pixels per map point. A zoom
    /// scale that is not a positive finite number draws nothing.
    pub fn paint<B, P>(
        &self,
        backend: &mut B,
        projection: &P,
        draw_rect: MapRect,
        zoom_scale: f64,
    ) -> PaintStats
    where
        B: ImagingBackend + ?Sized,
        P: SurfaceProjection + ?Sized,
    {
        if !(zoom_scale.is_finite() && zoom_scale > 0.0) {
            tracing::warn!("OverlayRenderer::paint: invalid zoom scale {zoom_scale}");
            return PaintStats::default();
        }

        let scale = self.display_scale(draw_rect, zoom_scale);
        let mut pass = Pass {
            backend,
            projection,
            images: &self.images,
            config: &self.config,
            draw_rect,
            zoom: zoom_scale,
            scale,
            paints: HashMap::new(),
            icons: HashMap::new(),
            paths: Vec::new(),
            text_runs: Vec::new(),
            on_path: HashSet::new(),
            stats: PaintStats::default(),
        };
        for feature in self.model.features() {
            pass.top_level(feature);
        }
        let stats = pass.finish();

        tracing::trace!(
            "OverlayRenderer::paint: scale=1:{:.0}, considered={}, culled={}, scale_filtered={}, drawn={}",
            scale,
            stats.considered,
            stats.culled,
            stats.scale_filtered,
            stats.drawn,
        );
        stats
    }
}

/// An icon uploaded during the current pass.
#[derive(Copy, Clone, Debug)]
struct PassImage {
    id: ImageId,
    width: u32,
    height: u32,
}

/// State of a single paint pass.
struct Pass<'a, B: ?Sized, P: ?Sized> {
    backend: &'a mut B,
    projection: &'a P,
    images: &'a ImageCache,
    config: &'a RenderConfig,
    draw_rect: MapRect,
    zoom: f64,
    scale: f64,
    /// One paint per color, keyed by the bits of its components.
    paints: HashMap<[u32; 4], PaintId>,
    /// Uploaded icons by name; `None` for names the cache could not resolve.
    icons: HashMap<String, Option<PassImage>>,
    paths: Vec<PathId>,
    text_runs: Vec<TextRunId>,
    /// Features on the current master-to-slave chain.
    on_path: HashSet<FeatureId>,
    stats: PaintStats,
}

impl<B, P> Pass<'_, B, P>
where
    B: ImagingBackend + ?Sized,
    P: SurfaceProjection + ?Sized,
{
    fn top_level(&mut self, feature: &Feature) {
        self.stats.considered += 1;

        let Some(bounds) = self.cull_rect(feature) else {
            self.stats.culled += 1;
            return;
        };
        if !rects_intersect(bounds, self.draw_rect) {
            self.stats.culled += 1;
            return;
        }
        let min_scale = feature.min_scale();
        if min_scale != 0.0 && min_scale > self.scale {
            self.stats.scale_filtered += 1;
            return;
        }

        self.on_path.insert(feature.id());
        self.draw_tree(feature, 0);
        self.on_path.remove(&feature.id());
    }

    /// Map-space box used to decide whether a feature touches the draw rect.
    fn cull_rect(&self, feature: &Feature) -> Option<MapRect> {
        if feature.primitive() == Primitive::Point && feature.class() != class::SOUNDG {
            let side = self.config.icon_size_px / self.zoom;
            Some(MapRect::from_center_size(feature.point()?, (side, side)))
        } else {
            feature.region().map(|region| region.bounding_rect())
        }
    }

    fn draw_tree(&mut self, feature: &Feature, depth: usize) {
        self.draw_feature(feature);
        self.stats.drawn += 1;

        for slave in feature.slaves() {
            if depth + 1 > self.config.max_slave_depth {
                tracing::warn!(
                    "OverlayRenderer::paint: slaves of feature {} nest deeper than {}",
                    feature.id().0,
                    self.config.max_slave_depth,
                );
                self.stats.slave_cycles_skipped += 1;
                continue;
            }
            if !self.on_path.insert(slave.id()) {
                tracing::warn!(
                    "OverlayRenderer::paint: feature {} is already on the slave chain, skipping link from {}",
                    slave.id().0,
                    feature.id().0,
                );
                self.stats.slave_cycles_skipped += 1;
                continue;
            }
            self.draw_tree(slave, depth + 1);
            self.on_path.remove(&slave.id());
        }
    }

    fn draw_feature(&mut self, feature: &Feature) {
        let symbology = seachart_symbology::resolve(feature);
        match feature.primitive() {
            Primitive::Point if feature.class() == class::SOUNDG => self.soundings(feature),
            Primitive::Point => {
                if let Some(anchor) = feature.point() {
                    self.symbols(&symbology, anchor);
                }
            }
            Primitive::Line => self.line(feature, &symbology),
            Primitive::Area => self.area(feature, &symbology),
            Primitive::None => {}
        }
    }

    fn soundings(&mut self, feature: &Feature) {
        for point in feature.spatial().iter().flat_map(|record| &record.points) {
            let Some(depth) = point.depth else {
                continue;
            };
            let at = map_point(point.coordinate);
            if rect_contains(self.draw_rect, at) {
                self.text(&format_depth(depth), at, self.config.sounding_font_px);
            }
        }
    }

    fn line(&mut self, feature: &Feature, symbology: &Symbology) {
        let Some(path) = feature.points().and_then(|points| self.polyline(&points, false)) else {
            return;
        };
        let paint = self.paint_for(symbology.color);
        let stroke = Stroke::new(self.device_size(self.config.line_width_px));
        self.backend.state(StateOp::SetPaint(paint));
        self.backend.state(StateOp::SetStroke(stroke));
        self.backend.draw(DrawOp::StrokePath(path));
    }

    fn area(&mut self, feature: &Feature, symbology: &Symbology) {
        let Some(exterior) = feature.points() else {
            return;
        };
        let Some(outline) = self.polyline(&exterior, true) else {
            return;
        };
        let holes: Vec<PathId> = feature
            .interior_rings()
            .filter_map(|ring| self.polyline(&ring, true))
            .collect();

        let border = symbology
            .border
            .map(|border| (self.paint_for(border.color), self.border_stroke(&border)));
        let fill = symbology.fill.then(|| self.paint_for(symbology.color));
        let shape = |b: &mut B| {
            if let Some((paint, stroke)) = border {
                b.state(StateOp::SetPaint(paint));
                b.state(StateOp::SetStroke(stroke));
                b.draw(DrawOp::StrokePath(outline));
            }
            if let Some(paint) = fill {
                b.state(StateOp::SetPaint(paint));
                b.draw(DrawOp::FillPath(outline));
            }
        };

        if holes.is_empty() {
            shape(&mut *self.backend);
        } else {
            let erase = self.paint_for(ERASE_COLOR);
            self.backend.with_layer(LayerOp::isolated(), |b| {
                shape(b);
                b.with_erase_layer(|b| {
                    b.state(StateOp::SetPaint(erase));
                    for hole in &holes {
                        b.draw(DrawOp::FillPath(*hole));
                    }
                });
            });
        }

        if let Some(center) = polygon_centroid(&exterior) {
            self.symbols(symbology, center);
        }
    }

    /// Draws the icon and then the label of a feature at `anchor`.
    fn symbols(&mut self, symbology: &Symbology, anchor: MapPoint) {
        if let Some(icon) = &symbology.icon {
            self.icon(icon, anchor);
        }
        if let Some(label) = &symbology.label {
            self.text(label, anchor, self.config.label_font_px);
        }
    }

    fn icon(&mut self, icon: &Icon, anchor: MapPoint) {
        let center = self.projection.to_surface_point(anchor);
        if let Icon::Asset(name) = icon
            && let Some(image) = self.image(name)
        {
            let width = self.device_size(f64::from(image.width));
            let height = self.device_size(f64::from(image.height));
            let (cx, cy) = narrow_point(center);
            self.backend.draw(DrawOp::DrawImageRect {
                image: image.id,
                src: None,
                dst: RectF::from_center_size(cx, cy, narrow(width), narrow(height)),
                sampler: ImageSampler::default(),
            });
            return;
        }
        self.placeholder(center);
    }

    /// Magenta disc with a black outline, drawn where an icon is missing.
    fn placeholder(&mut self, center: Point) {
        let radius = self.device_size(self.config.placeholder_radius_px);
        if !(radius > 0.0 && radius.is_finite()) {
            return;
        }
        let circle = Circle::new(center, radius).to_path(radius * CIRCLE_TOLERANCE);
        let path = self.create_path(PathDesc::from_bez_path(&circle));
        let fill = self.paint_for(PLACEHOLDER_COLOR);
        let outline = self.paint_for(OUTLINE_COLOR);
        let stroke = Stroke::new(self.device_size(self.config.line_width_px));

        self.backend.state(StateOp::SetPaint(fill));
        self.backend.draw(DrawOp::FillPath(path));
        self.backend.state(StateOp::SetPaint(outline));
        self.backend.state(StateOp::SetStroke(stroke));
        self.backend.draw(DrawOp::StrokePath(path));
    }

    /// Draws `text` with its ink bounds centered on `anchor`.
    fn text(&mut self, text: &str, anchor: MapPoint, font_px: f64) {
        let run = self.backend.create_text_run(TextRunDesc {
            text: Arc::from(text),
            font_family: Arc::clone(&self.config.font_family),
            font_size: narrow(self.device_size(font_px)),
        });
        self.text_runs.push(run);

        let (x, y) = narrow_point(self.projection.to_surface_point(anchor));
        let (dx, dy) = self
            .backend
            .text_run_bounds(run)
            .map_or((0.0, 0.0), RectF::center);
        let paint = self.paint_for(TEXT_COLOR);
        self.backend.state(StateOp::SetPaint(paint));
        self.backend.draw(DrawOp::DrawTextRun {
            run,
            x: x - dx,
            y: y - dy,
        });
    }

    fn image(&mut self, name: &str) -> Option<PassImage> {
        if let Some(entry) = self.icons.get(name) {
            return *entry;
        }
        let entry = self.images.resolve(name).map(|icon| PassImage {
            id: self.backend.create_image(
                ImageDesc {
                    width: icon.width(),
                    height: icon.height(),
                    format: ImageFormat::Rgba8,
                    alpha_type: ImageAlphaType::Alpha,
                },
                icon.pixels(),
            ),
            width: icon.width(),
            height: icon.height(),
        });
        self.icons.insert(name.to_owned(), entry);
        entry
    }

    fn paint_for(&mut self, color: Color) -> PaintId {
        let key = color.components.map(f32::to_bits);
        *self.paints.entry(key).or_insert_with(|| {
            self.backend.create_paint(PaintDesc {
                brush: Brush::Solid(color),
            })
        })
    }

    /// Builds a path through `points`; `None` for fewer than two points.
    fn polyline(&mut self, points: &[MapPoint], closed: bool) -> Option<PathId> {
        if points.len() < 2 {
            return None;
        }
        let mut builder = PathBuilder::new();
        builder.polyline(
            points
                .iter()
                .map(|p| narrow_point(self.projection.to_surface_point(*p))),
            closed,
        );
        Some(self.create_path(builder.build()))
    }

    fn create_path(&mut self, desc: PathDesc) -> PathId {
        let id = self.backend.create_path(desc);
        self.paths.push(id);
        id
    }

    fn border_stroke(&self, border: &BorderStyle) -> Stroke {
        Stroke::new(self.device_size(border.width)).with_dashes(
            0.0,
            border.dashes.iter().map(|dash| self.device_size(*dash)),
        )
    }

    /// Converts a device-pixel length into surface units.
    fn device_size(&self, px: f64) -> f64 {
        self.projection.to_surface_size(px / self.zoom)
    }

    /// Destroys every resource created by the pass.
    fn finish(self) -> PaintStats {
        let Self {
            backend,
            paints,
            icons,
            paths,
            text_runs,
            stats,
            ..
        } = self;
        for id in paths {
            backend.destroy_path(id);
        }
        for id in text_runs {
            backend.destroy_text_run(id);
        }
        for image in icons.into_values().flatten() {
            backend.destroy_image(image.id);
        }
        for id in paints.into_values() {
            backend.destroy_paint(id);
        }
        stats
    }
}

/// Formats a sounding depth with at most one decimal.
fn format_depth(depth: f64) -> String {
    let text = format!("{depth:.1}");
    match text.strip_suffix(".0") {
        Some("-0") => "0".to_owned(),
        Some(whole) => whole.to_owned(),
        None => text,
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "surface coordinates are tile-local and fit in f32"
)]
fn narrow(value: f64) -> f32 {
    value as f32
}

fn narrow_point(point: Point) -> (f32, f32) {
    (narrow(point.x), narrow(point.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryAssetStore, OriginProjection};
    use seachart_feature::{FeatureBuilder, SpatialPoint};
    use seachart_imaging_ref::RefBackend;
    use seachart_region::Coordinate;

    fn renderer(features: Vec<Feature>) -> OverlayRenderer {
        let model = OverlayModel::new(features).expect("valid overlay");
        OverlayRenderer::new(model, Arc::new(ImageCache::new(MemoryAssetStore::new())))
    }

    fn tile_around(center: Coordinate, half: f64) -> MapRect {
        MapRect::from_center_size(center.to_map_point(), (2.0 * half, 2.0 * half))
    }

    #[test]
    fn depths_keep_one_decimal() {
        assert_eq!(format_depth(12.34), "12.3");
        assert_eq!(format_depth(5.0), "5");
        assert_eq!(format_depth(0.96), "1");
        assert_eq!(format_depth(-0.01), "0");
        assert_eq!(format_depth(-2.5), "-2.5");
    }

    #[test]
    fn display_scale_halves_when_zoom_doubles() {
        let at = Coordinate::new(41.38, 2.18);
        let r = renderer(vec![
            FeatureBuilder::new(1, class::LIGHTS, Primitive::Point)
                .exterior([at])
                .build(),
        ]);
        let rect = tile_around(at, 128.0);
        let near = r.display_scale(rect, 2.0);
        let far = r.display_scale(rect, 1.0);
        assert!((far / near - 2.0).abs() < 1e-9);

        let denser = OverlayRenderer::new(r.model().clone(), Arc::clone(r.images()))
            .with_config(RenderConfig::default().with_screen_ppi(144.0));
        assert!((denser.display_scale(rect, 1.0) / far - 2.0).abs() < 1e-9);
    }

    #[test]
    fn invalid_zoom_draws_nothing() {
        let at = Coordinate::new(41.38, 2.18);
        let r = renderer(vec![
            FeatureBuilder::new(1, class::LIGHTS, Primitive::Point)
                .exterior([at])
                .build(),
        ]);
        let rect = tile_around(at, 128.0);
        let mut backend = RefBackend::default();
        let projection = OriginProjection::new(rect.origin());
        for zoom in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert_eq!(r.paint(&mut backend, &projection, rect, zoom), PaintStats::default());
        }
        assert!(backend.events().is_empty());
    }

    #[test]
    fn point_culling_uses_icon_box() {
        let at = Coordinate::new(41.38, 2.18);
        let r = renderer(vec![
            FeatureBuilder::new(1, class::LIGHTS, Primitive::Point)
                .exterior([at])
                .build(),
        ]);
        let p = at.to_map_point();
        let projection = OriginProjection::new(p);

        // The draw rect ends 5 map points left of the light; a 20 px box at
        // zoom 1 reaches 10 map points out.
        let near = MapRect::new(p.x - 100.0, p.y - 50.0, p.x - 5.0, p.y + 50.0);
        let mut backend = RefBackend::default();
        let stats = r.paint(&mut backend, &projection, near, 1.0);
        assert_eq!(stats.drawn, 1);

        // At zoom 4 the box shrinks to 2.5 map points around the light.
        let stats = r.paint(&mut backend, &projection, near, 4.0);
        assert_eq!(stats.culled, 1);
        assert_eq!(stats.drawn, 0);
    }

    #[test]
    fn soundings_outside_the_draw_rect_are_not_drawn() {
        let inside = Coordinate::new(41.380, 2.180);
        let outside = Coordinate::new(41.500, 2.300);
        let r = renderer(vec![
            FeatureBuilder::new(1, class::SOUNDG, Primitive::Point)
                .spatial([
                    SpatialPoint::sounding(inside, 12.0),
                    SpatialPoint::sounding(outside, 7.5),
                    SpatialPoint {
                        coordinate: inside,
                        depth: None,
                    },
                ])
                .build(),
        ]);
        let rect = tile_around(inside, 64.0);
        let mut backend = RefBackend::default();
        let stats = r.paint(&mut backend, &OriginProjection::new(rect.origin()), rect, 1.0);
        assert_eq!(stats.drawn, 1);

        let texts: Vec<_> = backend
            .draws()
            .filter_map(|op| match op {
                DrawOp::DrawTextRun { .. } => Some(op),
                _ => None,
            })
            .collect();
        assert_eq!(texts.len(), 1);
        assert_eq!(backend.live_resources(), 0);
    }
}
