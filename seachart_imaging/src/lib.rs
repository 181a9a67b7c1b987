// Copyright 2025 the Seachart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seachart Imaging: backend-agnostic draw contract and backend traits.
//!
//! This crate defines the small, plain-old-data (POD) friendly set of
//! operations the overlay renderer emits, and the traits a host graphics
//! context implements to consume them. It sits between the chart renderer
//! and whatever actually rasterizes (a platform canvas, a GPU renderer, a
//! recording test double).
//!
//! # Core concepts
//!
//! - **Resources**: small, opaque handles ([`PathId`], [`ImageId`],
//!   [`PaintId`], [`TextRunId`]) whose lifetimes are managed via
//!   [`ResourceBackend`]. Text runs are shaped and measured by the backend;
//!   [`ResourceBackend::text_run_bounds`] reports the measured box so callers
//!   can place labels.
//! - **Imaging operations**: [`StateOp`] (mutate state) and [`DrawOp`]
//!   (produce pixels), combined into [`ImagingOp`] for logs and replays.
//! - **Layers**: compositing is scoped through [`StateOp::PushLayer`] /
//!   [`StateOp::PopLayer`]. Erasing previously drawn content (e.g. the holes
//!   of an area) is expressed as a layer composited with [`Compose::DestOut`].
//! - **Paths**: [`PathBuilder`] assembles polylines and polygons in `f32`
//!   surface coordinates; [`PathDesc::from_bez_path`] converts kurbo shapes.
//!
//! # Example
//!
//! ```ignore
//! # use seachart_imaging::*;
//! # use peniko::{Brush, Color};
//! # struct MyBackend { /* implements ResourceBackend + ImagingBackend */ }
//! let mut backend = MyBackend { /* ... */ };
//!
//! let paint = backend.create_paint(PaintDesc {
//!     brush: Brush::Solid(Color::WHITE),
//! });
//! let mut path = PathBuilder::new();
//! path.move_to(0.0, 0.0).line_to(10.0, 0.0).line_to(10.0, 10.0).close();
//! let path = backend.create_path(path.build());
//!
//! backend.state(StateOp::SetPaint(paint));
//! backend.draw(DrawOp::FillPath(path));
//! ```

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;

use peniko::Brush;
pub use peniko::{BlendMode, Compose, ImageAlphaType, ImageFormat, ImageSampler, Mix};

/// Identifier for a path resource.
///
/// This is a small, opaque handle that is stable for the lifetime of the
/// resource.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathId(pub u32);

/// Identifier for an image resource.
///
/// Images are typically created once per pass from decoded icon pixels and
/// reused for every feature drawing the same icon.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageId(pub u32);

/// Identifier for a paint resource.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PaintId(pub u32);

/// Identifier for a text run resource (a shaped, single-line string).
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextRunId(pub u32);

/// A simple axis-aligned rectangle in f32 coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RectF {
    /// Minimum X coordinate.
    pub x0: f32,
    /// Minimum Y coordinate.
    pub y0: f32,
    /// Maximum X coordinate.
    pub x1: f32,
    /// Maximum Y coordinate.
    pub y1: f32,
}

impl RectF {
    /// Create a new rectangle from min/max corners.
    #[inline]
    pub const fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Create a rectangle of the given size centered on `(cx, cy)`.
    #[inline]
    pub fn from_center_size(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        let (hw, hh) = (width * 0.5, height * 0.5);
        Self::new(cx - hw, cy - hh, cx + hw, cy + hh)
    }

    /// Width of the rectangle.
    #[inline]
    pub fn width(self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the rectangle.
    #[inline]
    pub fn height(self) -> f32 {
        self.y1 - self.y0
    }

    /// Center point of the rectangle.
    #[inline]
    pub fn center(self) -> (f32, f32) {
        ((self.x0 + self.x1) * 0.5, (self.y0 + self.y1) * 0.5)
    }
}

/// Parameters for a pushed compositing layer.
///
/// Layers are the only scoping mechanism for compositing: the layer's
/// contents are drawn with normal (`SrcOver`) compositing, then the layer is
/// composited into its parent with `blend`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayerOp {
    /// Blend mode used when compositing this layer into its parent.
    pub blend: BlendMode,
}

impl LayerOp {
    /// A layer that erases whatever its contents cover in the parent.
    #[inline]
    pub fn erase() -> Self {
        Self {
            blend: BlendMode::new(Mix::Normal, Compose::DestOut),
        }
    }

    /// An isolated group composited normally into its parent.
    ///
    /// Backends must not elide it, so erase layers nested inside only affect
    /// the group's own contents.
    #[inline]
    pub fn isolated() -> Self {
        Self {
            blend: BlendMode::default(),
        }
    }
}

/// Stroke style used by `StateOp::SetStroke`.
///
/// This is a re-export of [`kurbo::Stroke`], which captures width, joins,
/// caps, dashes, and related stroke parameters.
pub type StrokeStyle = kurbo::Stroke;

/// State operations that mutate the current imaging state.
#[derive(Clone, Debug, PartialEq)]
pub enum StateOp {
    /// Push a new layer onto the layer stack.
    ///
    /// Layers must be well-nested: every `PushLayer` must eventually be
    /// matched by a [`StateOp::PopLayer`].
    PushLayer(LayerOp),
    /// Pop the most recently pushed layer.
    PopLayer,
    /// Set the current paint resource.
    SetPaint(PaintId),
    /// Set the current stroke style.
    SetStroke(StrokeStyle),
}

/// Draw operations that produce pixels given the current state.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Fill the given path with the current paint, using the non-zero rule.
    FillPath(PathId),
    /// Stroke the given path with the current stroke and paint.
    StrokePath(PathId),
    /// Draw an image mapped to a destination rect, optionally sampling from a source rect.
    ///
    /// - `dst` is in surface coordinates.
    /// - `src` is in image pixel coordinates; `None` uses the full image.
    DrawImageRect {
        /// Image resource to draw.
        image: ImageId,
        /// Optional source rectangle in image pixel coordinates.
        src: Option<RectF>,
        /// Destination rectangle in local coordinates.
        dst: RectF,
        /// Parameters that specify how to sample the image.
        sampler: ImageSampler,
    },
    /// Draw a text run with the current paint, its baseline origin at `(x, y)`.
    DrawTextRun {
        /// Text run resource to draw.
        run: TextRunId,
        /// X coordinate of the run origin.
        x: f32,
        /// Y coordinate of the run baseline.
        y: f32,
    },
}

/// Description of a path resource.
#[derive(Clone, Debug, PartialEq)]
pub struct PathDesc {
    /// Command buffer describing the path geometry.
    pub commands: Box<[PathCmd]>,
}

impl PathDesc {
    /// Convert a kurbo path, narrowing coordinates to `f32`.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "surface coordinates are f32 in the IR"
    )]
    pub fn from_bez_path(path: &kurbo::BezPath) -> Self {
        use kurbo::PathEl;

        let p = |pt: kurbo::Point| (pt.x as f32, pt.y as f32);
        let commands = path
            .elements()
            .iter()
            .map(|el| match *el {
                PathEl::MoveTo(a) => {
                    let (x, y) = p(a);
                    PathCmd::MoveTo { x, y }
                }
                PathEl::LineTo(a) => {
                    let (x, y) = p(a);
                    PathCmd::LineTo { x, y }
                }
                PathEl::QuadTo(c, a) => {
                    let ((x1, y1), (x, y)) = (p(c), p(a));
                    PathCmd::QuadTo { x1, y1, x, y }
                }
                PathEl::CurveTo(c1, c2, a) => {
                    let ((x1, y1), (x2, y2), (x, y)) = (p(c1), p(c2), p(a));
                    PathCmd::CurveTo {
                        x1,
                        y1,
                        x2,
                        y2,
                        x,
                        y,
                    }
                }
                PathEl::ClosePath => PathCmd::Close,
            })
            .collect();
        Self { commands }
    }

    /// Returns `true` if the path has no commands.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Simple path command enumeration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PathCmd {
    /// Move the current point without drawing.
    MoveTo {
        /// X coordinate of the new point.
        x: f32,
        /// Y coordinate of the new point.
        y: f32,
    },
    /// Draw a line from the current point to the given point.
    LineTo {
        /// X coordinate of the line end.
        x: f32,
        /// Y coordinate of the line end.
        y: f32,
    },
    /// Draw a quadratic Bézier curve from the current point to the given
    /// point, using a single control point.
    QuadTo {
        /// X coordinate of the control point.
        x1: f32,
        /// Y coordinate of the control point.
        y1: f32,
        /// X coordinate of the curve end.
        x: f32,
        /// Y coordinate of the curve end.
        y: f32,
    },
    /// Draw a cubic Bézier curve from the current point to the given point,
    /// using two control points.
    CurveTo {
        /// X coordinate of the first control point.
        x1: f32,
        /// Y coordinate of the first control point.
        y1: f32,
        /// X coordinate of the second control point.
        x2: f32,
        /// Y coordinate of the second control point.
        y2: f32,
        /// X coordinate of the curve end.
        x: f32,
        /// Y coordinate of the curve end.
        y: f32,
    },
    /// Close the current subpath.
    Close,
}

/// Incremental builder for [`PathDesc`] made of straight segments.
#[derive(Clone, Debug, Default)]
pub struct PathBuilder {
    commands: Vec<PathCmd>,
}

impl PathBuilder {
    /// Create an empty builder.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new subpath at `(x, y)`.
    #[inline]
    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.commands.push(PathCmd::MoveTo { x, y });
        self
    }

    /// Add a line segment to `(x, y)`.
    #[inline]
    pub fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.commands.push(PathCmd::LineTo { x, y });
        self
    }

    /// Close the current subpath.
    #[inline]
    pub fn close(&mut self) -> &mut Self {
        self.commands.push(PathCmd::Close);
        self
    }

    /// Add a subpath through `points`, closing it when `closed` is set.
    ///
    /// Does nothing when `points` is empty.
    pub fn polyline(
        &mut self,
        points: impl IntoIterator<Item = (f32, f32)>,
        closed: bool,
    ) -> &mut Self {
        let mut points = points.into_iter();
        let Some((x, y)) = points.next() else {
            return self;
        };
        self.move_to(x, y);
        for (x, y) in points {
            self.line_to(x, y);
        }
        if closed {
            self.close();
        }
        self
    }

    /// Returns `true` if no command has been added.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Finish the path.
    #[inline]
    pub fn build(self) -> PathDesc {
        PathDesc {
            commands: self.commands.into_boxed_slice(),
        }
    }
}

/// Description of an image resource.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageDesc {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Pixel format of the image buffer.
    pub format: ImageFormat,
    /// Alpha encoding of the pixels (straight vs premultiplied).
    pub alpha_type: ImageAlphaType,
}

/// Description of a paint resource.
#[derive(Clone, Debug, PartialEq)]
pub struct PaintDesc {
    /// Brush used when rendering.
    ///
    /// This is a [`peniko::Brush`], so backends can directly map it onto their
    /// native paint representation.
    pub brush: Brush,
}

/// Description of a text run resource.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRunDesc {
    /// Text to shape, on a single line.
    pub text: Arc<str>,
    /// Font family name; backends fall back to a default face when missing.
    pub font_family: Arc<str>,
    /// Font size in local units.
    pub font_size: f32,
}

/// Resource lifetime interface.
///
/// Backends implement this to manage their own resource storage. IDs must
/// remain valid and refer to the same logical resource until the
/// corresponding `destroy_*` function is called.
pub trait ResourceBackend {
    /// Create a path resource.
    fn create_path(&mut self, desc: PathDesc) -> PathId;
    /// Destroy a previously created path.
    fn destroy_path(&mut self, id: PathId);

    /// Create an image resource from raw pixels.
    ///
    /// The `pixels` slice contains tightly packed, row-major image data in
    /// the format described by `desc`.
    fn create_image(&mut self, desc: ImageDesc, pixels: &[u8]) -> ImageId;
    /// Destroy a previously created image.
    fn destroy_image(&mut self, id: ImageId);

    /// Create a paint resource.
    fn create_paint(&mut self, desc: PaintDesc) -> PaintId;
    /// Destroy a previously created paint.
    fn destroy_paint(&mut self, id: PaintId);

    /// Create (shape) a text run resource.
    fn create_text_run(&mut self, desc: TextRunDesc) -> TextRunId;
    /// Destroy a previously created text run.
    fn destroy_text_run(&mut self, id: TextRunId);

    /// Ink bounds of a text run relative to its baseline origin, with `y`
    /// growing downward (ascenders have negative `y`).
    ///
    /// Returns `None` for unknown or destroyed runs.
    fn text_run_bounds(&self, id: TextRunId) -> Option<RectF>;
}

/// Unified imaging operation used by operation logs.
#[derive(Clone, Debug, PartialEq)]
pub enum ImagingOp {
    /// State-changing operation.
    State(StateOp),
    /// Drawing operation.
    Draw(DrawOp),
}

/// Minimal imaging backend trait.
pub trait ImagingBackend: ResourceBackend {
    /// Apply a state operation.
    fn state(&mut self, op: StateOp);

    /// Apply a draw operation.
    fn draw(&mut self, op: DrawOp);

    /// Push a new layer onto the layer stack.
    ///
    /// This is equivalent to `self.state(StateOp::PushLayer(op))`.
    #[inline]
    fn layer_push(&mut self, op: LayerOp) {
        self.state(StateOp::PushLayer(op));
    }

    /// Pop the most recently pushed layer.
    ///
    /// This is equivalent to `self.state(StateOp::PopLayer)`.
    #[inline]
    fn layer_pop(&mut self) {
        self.state(StateOp::PopLayer);
    }
}

/// Convenience helpers for `ImagingBackend` implementations and callers.
///
/// This is separate from [`ImagingBackend`] so that methods can accept closures and return values
/// without complicating trait object usage (`&mut dyn ImagingBackend`).
pub trait ImagingBackendExt: ImagingBackend {
    /// Run `f` inside a pushed layer, popping it afterwards.
    ///
    /// Note: if `f` panics, the layer will not be popped.
    #[inline]
    fn with_layer<R>(&mut self, op: LayerOp, f: impl FnOnce(&mut Self) -> R) -> R {
        self.layer_push(op);
        let out = f(self);
        self.layer_pop();
        out
    }

    /// Run `f` inside a layer that erases what it draws from the parent.
    ///
    /// Note: if `f` panics, the layer will not be popped.
    #[inline]
    fn with_erase_layer<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.with_layer(LayerOp::erase(), f)
    }
}

impl<B: ImagingBackend + ?Sized> ImagingBackendExt for B {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use peniko::Color;

    /// Trivial in-memory backend that records operations for testing.
    #[derive(Default)]
    struct RecordingBackend {
        next_path: u32,
        next_image: u32,
        next_paint: u32,
        next_run: u32,
        ops: Vec<ImagingOp>,
    }

    impl ResourceBackend for RecordingBackend {
        fn create_path(&mut self, _desc: PathDesc) -> PathId {
            let id = self.next_path;
            self.next_path += 1;
            PathId(id)
        }

        fn destroy_path(&mut self, _id: PathId) {}

        fn create_image(&mut self, _desc: ImageDesc, _pixels: &[u8]) -> ImageId {
            let id = self.next_image;
            self.next_image += 1;
            ImageId(id)
        }

        fn destroy_image(&mut self, _id: ImageId) {}

        fn create_paint(&mut self, _desc: PaintDesc) -> PaintId {
            let id = self.next_paint;
            self.next_paint += 1;
            PaintId(id)
        }

        fn destroy_paint(&mut self, _id: PaintId) {}

        fn create_text_run(&mut self, _desc: TextRunDesc) -> TextRunId {
            let id = self.next_run;
            self.next_run += 1;
            TextRunId(id)
        }

        fn destroy_text_run(&mut self, _id: TextRunId) {}

        fn text_run_bounds(&self, _id: TextRunId) -> Option<RectF> {
            None
        }
    }

    impl ImagingBackend for RecordingBackend {
        fn state(&mut self, op: StateOp) {
            self.ops.push(ImagingOp::State(op));
        }

        fn draw(&mut self, op: DrawOp) {
            self.ops.push(ImagingOp::Draw(op));
        }
    }

    #[test]
    fn record_basic_ops() {
        let mut backend = RecordingBackend::default();

        let paint = backend.create_paint(PaintDesc {
            brush: Brush::Solid(Color::WHITE),
        });
        let path = backend.create_path(PathDesc {
            commands: vec![PathCmd::MoveTo { x: 0.0, y: 0.0 }].into_boxed_slice(),
        });

        backend.state(StateOp::SetPaint(paint));
        backend.draw(DrawOp::FillPath(path));

        assert_eq!(backend.ops.len(), 2);
    }

    #[test]
    fn erase_layer_wraps_draws() {
        let mut backend = RecordingBackend::default();
        let path = backend.create_path(PathDesc {
            commands: vec![PathCmd::MoveTo { x: 0.0, y: 0.0 }].into_boxed_slice(),
        });

        backend.with_erase_layer(|b| b.draw(DrawOp::FillPath(path)));

        assert_eq!(backend.ops.len(), 3);
        match &backend.ops[0] {
            ImagingOp::State(StateOp::PushLayer(layer)) => {
                assert_eq!(layer.blend.compose, Compose::DestOut);
            }
            other => panic!("expected erase layer, got {other:?}"),
        }
        assert_eq!(backend.ops[2], ImagingOp::State(StateOp::PopLayer));
    }

    #[test]
    fn isolated_group_nests_an_erase_layer() {
        let mut backend = RecordingBackend::default();
        let path = backend.create_path(PathDesc {
            commands: vec![PathCmd::MoveTo { x: 0.0, y: 0.0 }].into_boxed_slice(),
        });

        let out = backend.with_layer(LayerOp::isolated(), |b| {
            b.draw(DrawOp::FillPath(path));
            b.with_erase_layer(|b| b.draw(DrawOp::FillPath(path)));
            7
        });

        assert_eq!(out, 7);
        assert_eq!(LayerOp::isolated().blend.compose, Compose::SrcOver);
        assert_eq!(
            backend.ops,
            vec![
                ImagingOp::State(StateOp::PushLayer(LayerOp::isolated())),
                ImagingOp::Draw(DrawOp::FillPath(path)),
                ImagingOp::State(StateOp::PushLayer(LayerOp::erase())),
                ImagingOp::Draw(DrawOp::FillPath(path)),
                ImagingOp::State(StateOp::PopLayer),
                ImagingOp::State(StateOp::PopLayer),
            ]
        );
    }

    #[test]
    fn path_builder_polylines() {
        let mut builder = PathBuilder::new();
        builder.polyline([(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)], true);
        builder.polyline([], true);
        builder.polyline([(5.0, 5.0), (6.0, 6.0)], false);
        let path = builder.build();
        assert_eq!(
            &*path.commands,
            &[
                PathCmd::MoveTo { x: 0.0, y: 0.0 },
                PathCmd::LineTo { x: 1.0, y: 0.0 },
                PathCmd::LineTo { x: 1.0, y: 1.0 },
                PathCmd::Close,
                PathCmd::MoveTo { x: 5.0, y: 5.0 },
                PathCmd::LineTo { x: 6.0, y: 6.0 },
            ]
        );
    }

    #[test]
    fn from_bez_path_keeps_curves() {
        use kurbo::{BezPath, Point};

        let mut bez = BezPath::new();
        bez.move_to(Point::new(0.0, 0.0));
        bez.quad_to(Point::new(1.0, 1.0), Point::new(2.0, 0.0));
        bez.curve_to(Point::new(3.0, 1.0), Point::new(4.0, 1.0), Point::new(5.0, 0.0));
        bez.close_path();

        let desc = PathDesc::from_bez_path(&bez);
        assert_eq!(desc.commands.len(), 4);
        assert!(matches!(desc.commands[1], PathCmd::QuadTo { x: 2.0, .. }));
        assert!(matches!(desc.commands[2], PathCmd::CurveTo { x: 5.0, .. }));
        assert_eq!(desc.commands[3], PathCmd::Close);
    }

    #[test]
    fn rect_helpers() {
        let r = RectF::from_center_size(10.0, 20.0, 4.0, 6.0);
        assert_eq!(r, RectF::new(8.0, 17.0, 12.0, 23.0));
        assert_eq!(r.width(), 4.0);
        assert_eq!(r.height(), 6.0);
        assert_eq!(r.center(), (10.0, 20.0));
    }
}
