// Copyright 2025 the Seachart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renderer configuration.

use std::sync::Arc;

/// Sizes and metrics used by [`OverlayRenderer`](crate::OverlayRenderer).
///
/// Pixel sizes are device pixels at zoom `1.0`; the renderer divides them by
/// the zoom scale of each pass so symbols keep a constant on-screen size.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Side of the square used to cull point symbols.
    pub icon_size_px: f64,
    /// Radius of the placeholder drawn for missing icons.
    pub placeholder_radius_px: f64,
    /// Stroke width of line features and placeholder outlines.
    pub line_width_px: f64,
    /// Font size of feature labels.
    pub label_font_px: f64,
    /// Font size of sounding depths.
    pub sounding_font_px: f64,
    /// Font family requested for text runs.
    pub font_family: Arc<str>,
    /// Screen density used to derive the display scale.
    pub screen_ppi: f64,
    /// Maximum nesting of slave features drawn under a feature.
    pub max_slave_depth: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            icon_size_px: 20.0,
            placeholder_radius_px: 5.0,
            line_width_px: 1.0,
            label_font_px: 8.0,
            sounding_font_px: 6.0,
            font_family: Arc::from("Futura-Medium"),
            screen_ppi: 72.0,
            max_slave_depth: 16,
        }
    }
}

impl RenderConfig {
    /// Sets the point-symbol culling size.
    #[must_use]
    pub fn with_icon_size_px(mut self, px: f64) -> Self {
        self.icon_size_px = px;
        self
    }

    /// Sets the placeholder radius.
    #[must_use]
    pub fn with_placeholder_radius_px(mut self, px: f64) -> Self {
        self.placeholder_radius_px = px;
        self
    }

    /// Sets the line width.
    #[must_use]
    pub fn with_line_width_px(mut self, px: f64) -> Self {
        self.line_width_px = px;
        self
    }

    /// Sets the label and sounding font sizes.
    #[must_use]
    pub fn with_font_sizes_px(mut self, label: f64, sounding: f64) -> Self {
        self.label_font_px = label;
        self.sounding_font_px = sounding;
        self
    }

    /// Sets the font family.
    #[must_use]
    pub fn with_font_family(mut self, family: impl Into<Arc<str>>) -> Self {
        self.font_family = family.into();
        self
    }

    /// Sets the screen density in pixels per inch.
    #[must_use]
    pub fn with_screen_ppi(mut self, ppi: f64) -> Self {
        self.screen_ppi = ppi;
        self
    }

    /// Sets the slave recursion limit.
    #[must_use]
    pub fn with_max_slave_depth(mut self, depth: usize) -> Self {
        self.max_slave_depth = depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = RenderConfig::default()
            .with_screen_ppi(163.0)
            .with_font_family("Helvetica")
            .with_max_slave_depth(2);
        assert_eq!(config.screen_ppi, 163.0);
        assert_eq!(&*config.font_family, "Helvetica");
        assert_eq!(config.max_slave_depth, 2);
        assert_eq!(config.icon_size_px, 20.0);
    }
}
