// Copyright 2025 the Seachart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seachart Imaging Reference Backend.
//!
//! This crate provides a small, stateful implementation of
//! [`ImagingBackend`] and [`ResourceBackend`] for **IR recording and state
//! tracing**.
//!
//! It is intentionally *not* a renderer:
//! - It does **not** rasterize to pixels.
//! - It measures text with a fixed-advance approximation (see
//!   [`RefBackend::text_run_bounds`]) instead of real font metrics.
//! - It is intended for tests and debugging that want to assert on emitted
//!   ops, the imaging state at the time each op is applied, and resource
//!   lifetimes.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use seachart_imaging::{
    DrawOp, ImageDesc, ImageId, ImagingBackend, ImagingOp, LayerOp, PaintDesc, PaintId, PathDesc,
    PathId, RectF, ResourceBackend, StateOp, StrokeStyle, TextRunDesc, TextRunId,
};

/// Horizontal advance of every glyph, as a fraction of the font size.
pub const GLYPH_ADVANCE: f32 = 0.6;
/// Ascent above the baseline, as a fraction of the font size.
pub const ASCENT: f32 = 0.7;
/// Descent below the baseline, as a fraction of the font size.
pub const DESCENT: f32 = 0.2;

/// Snapshot of the current imaging state inside the backend.
#[derive(Clone, Debug, Default)]
pub struct StateSnapshot {
    /// Number of active layers on the layer stack.
    pub layer_stack_depth: u32,
    /// The most recently pushed layer op, if any.
    pub layer_top: Option<LayerOp>,
    /// Current paint, if set.
    pub paint: Option<PaintId>,
    /// Current stroke style, if set.
    pub stroke: Option<StrokeStyle>,
}

/// Event recorded by the reference backend.
#[derive(Clone, Debug)]
pub enum Event {
    /// State operation and the resulting state snapshot.
    State {
        /// State operation that was applied.
        op: StateOp,
        /// Snapshot after applying the state operation.
        state: StateSnapshot,
    },
    /// Draw operation and the state snapshot used for drawing.
    Draw {
        /// Draw operation that was applied.
        op: DrawOp,
        /// Snapshot at the time of drawing.
        state: StateSnapshot,
    },
}

/// Simple reference implementation of the imaging backend.
///
/// This backend:
/// - Stores resource descriptors in vectors keyed by their IDs,
/// - Tracks current imaging state,
/// - Records high-level [`Event`]s as state and draw operations are applied.
#[derive(Default, Debug)]
pub struct RefBackend {
    paths: Vec<Option<PathDesc>>,
    images: Vec<Option<(ImageDesc, Vec<u8>)>>,
    paints: Vec<Option<PaintDesc>>,
    text_runs: Vec<Option<TextRunDesc>>,

    /// Log of events in the order they were applied.
    events: Vec<Event>,
    /// Underlying imaging ops.
    ops: Vec<ImagingOp>,
    /// Current imaging state.
    state: StateSnapshot,
    layer_stack: Vec<LayerOp>,
}

fn slot<T>(slots: &[Option<T>], id: u32) -> Option<&T> {
    slots.get(id as usize).and_then(Option::as_ref)
}

fn free<T>(slots: &mut [Option<T>], id: u32) {
    if let Some(slot) = slots.get_mut(id as usize) {
        *slot = None;
    }
}

fn live<T>(slots: &[Option<T>]) -> usize {
    slots.iter().filter(|s| s.is_some()).count()
}

impl RefBackend {
    /// Returns a slice of recorded events.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Returns a slice of raw imaging operations.
    pub fn ops(&self) -> &[ImagingOp] {
        &self.ops
    }

    /// Returns the draw operations, in order.
    pub fn draws(&self) -> impl Iterator<Item = &DrawOp> + '_ {
        self.ops.iter().filter_map(|op| match op {
            ImagingOp::Draw(d) => Some(d),
            ImagingOp::State(_) => None,
        })
    }

    /// Clears all recorded events and ops but keeps resources.
    pub fn clear_events(&mut self) {
        self.events.clear();
        self.ops.clear();
    }

    /// Current imaging state.
    pub fn current_state(&self) -> &StateSnapshot {
        &self.state
    }

    /// Descriptor of a live path.
    pub fn path(&self, id: PathId) -> Option<&PathDesc> {
        slot(&self.paths, id.0)
    }

    /// Descriptor and pixels of a live image.
    pub fn image(&self, id: ImageId) -> Option<(&ImageDesc, &[u8])> {
        slot(&self.images, id.0).map(|(desc, pixels)| (desc, pixels.as_slice()))
    }

    /// Descriptor of a live paint.
    pub fn paint(&self, id: PaintId) -> Option<&PaintDesc> {
        slot(&self.paints, id.0)
    }

    /// Descriptor of a live text run.
    pub fn text_run(&self, id: TextRunId) -> Option<&TextRunDesc> {
        slot(&self.text_runs, id.0)
    }

    /// Number of resources of any kind that are created and not yet destroyed.
    pub fn live_resources(&self) -> usize {
        live(&self.paths) + live(&self.images) + live(&self.paints) + live(&self.text_runs)
    }

    /// Total number of resources ever created.
    pub fn created_resources(&self) -> usize {
        self.paths.len() + self.images.len() + self.paints.len() + self.text_runs.len()
    }
}

impl ResourceBackend for RefBackend {
    fn create_path(&mut self, desc: PathDesc) -> PathId {
        let id =
            u32::try_from(self.paths.len()).expect("RefBackend: too many paths for u32 PathId");
        self.paths.push(Some(desc));
        PathId(id)
    }

    fn destroy_path(&mut self, id: PathId) {
        free(&mut self.paths, id.0);
    }

    fn create_image(&mut self, desc: ImageDesc, pixels: &[u8]) -> ImageId {
        let id =
            u32::try_from(self.images.len()).expect("RefBackend: too many images for u32 ImageId");
        self.images.push(Some((desc, pixels.to_vec())));
        ImageId(id)
    }

    fn destroy_image(&mut self, id: ImageId) {
        free(&mut self.images, id.0);
    }

    fn create_paint(&mut self, desc: PaintDesc) -> PaintId {
        let id =
            u32::try_from(self.paints.len()).expect("RefBackend: too many paints for u32 PaintId");
        self.paints.push(Some(desc));
        PaintId(id)
    }

    fn destroy_paint(&mut self, id: PaintId) {
        free(&mut self.paints, id.0);
    }

    fn create_text_run(&mut self, desc: TextRunDesc) -> TextRunId {
        let id = u32::try_from(self.text_runs.len())
            .expect("RefBackend: too many text runs for u32 TextRunId");
        self.text_runs.push(Some(desc));
        TextRunId(id)
    }

    fn destroy_text_run(&mut self, id: TextRunId) {
        free(&mut self.text_runs, id.0);
    }

    /// Approximates every glyph as [`GLYPH_ADVANCE`] × size wide, with
    /// [`ASCENT`] and [`DESCENT`] fractions of the size above and below the
    /// baseline.
    fn text_run_bounds(&self, id: TextRunId) -> Option<RectF> {
        let run = slot(&self.text_runs, id.0)?;
        let width = run.text.chars().count() as f32 * GLYPH_ADVANCE * run.font_size;
        Some(RectF::new(
            0.0,
            -ASCENT * run.font_size,
            width,
            DESCENT * run.font_size,
        ))
    }
}

impl ImagingBackend for RefBackend {
    fn state(&mut self, op: StateOp) {
        match &op {
            StateOp::PushLayer(layer) => {
                self.layer_stack.push(*layer);
                self.state.layer_stack_depth = u32::try_from(self.layer_stack.len())
                    .expect("RefBackend: too many layer stack entries for u32");
                self.state.layer_top = self.layer_stack.last().copied();
            }
            StateOp::PopLayer => {
                self.layer_stack.pop();
                self.state.layer_stack_depth = u32::try_from(self.layer_stack.len())
                    .expect("RefBackend: too many layer stack entries for u32");
                self.state.layer_top = self.layer_stack.last().copied();
            }
            StateOp::SetPaint(id) => self.state.paint = Some(*id),
            StateOp::SetStroke(style) => self.state.stroke = Some(style.clone()),
        }

        self.ops.push(ImagingOp::State(op.clone()));
        self.events.push(Event::State {
            op,
            state: self.state.clone(),
        });
    }

    fn draw(&mut self, op: DrawOp) {
        self.ops.push(ImagingOp::Draw(op.clone()));
        self.events.push(Event::Draw {
            op,
            state: self.state.clone(),
        });
    }
}
