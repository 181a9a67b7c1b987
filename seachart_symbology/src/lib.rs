// Copyright 2025 the Seachart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seachart Symbology: how a chart feature looks.
//!
//! Every function here is pure and total: given a [`Feature`], it returns a
//! value for any class code and attribute set, never an error. The decisions
//! are kept as static rule tables evaluated first-match-wins. A rule names
//! the classes it applies to and a condition on the feature's attributes;
//! within a class, earlier rules take precedence, and a missing attribute
//! compares as its default (empty text, or `0` for numeric thresholds).
//!
//! - [`icon_for_feature`]: the point symbol, [`Icon::Unrecognized`] for
//!   unknown classes.
//! - [`label_for_feature`]: soundings, names and seabed abbreviations.
//! - [`color_for_feature`], [`border_for_area`], [`should_fill_area`]: area
//!   and line styling.
//! - [`resolve`]: all of the above at once.
//!
//! ```rust
//! use seachart_feature::{attr, class, FeatureBuilder, Primitive};
//! use seachart_symbology::{resolve, DEEP_WATER_COLOR};
//!
//! let buoy = FeatureBuilder::new(1, class::BOYCAR, Primitive::Point)
//!     .attribute(attr::CATCAM, "3")
//!     .build();
//! let symbology = resolve(&buoy);
//! assert_eq!(symbology.icon.as_ref().map(|i| i.name()), Some("BOYCAR03"));
//!
//! let depth = FeatureBuilder::new(2, class::DEPARE, Primitive::Area)
//!     .attribute(attr::DRVAL1, "35")
//!     .build();
//! assert_eq!(resolve(&depth).color, DEEP_WATER_COLOR);
//! ```

#![no_std]

extern crate alloc;

mod icon;
mod label;
mod rules;
mod style;

use alloc::string::String;

use peniko::Color;
use seachart_feature::Feature;

pub use icon::{Icon, icon_for_feature};
pub use label::label_for_feature;
pub use style::{
    BorderStyle, DEEP_WATER_COLOR, DEEP_WATER_DEPTH, DEFAULT_COLOR, LINE_COLOR,
    SHALLOW_WATER_COLOR, border_for_area, color_for_feature, should_fill_area,
};

/// Everything the renderer needs to know about a feature's appearance.
#[derive(Clone, Debug, PartialEq)]
pub struct Symbology {
    /// Point symbol, if the class has one.
    pub icon: Option<Icon>,
    /// Label text, if any.
    pub label: Option<String>,
    /// Stroke or fill colour.
    pub color: Color,
    /// Whether an area is filled.
    pub fill: bool,
    /// Outline of an area, if any.
    pub border: Option<BorderStyle>,
}

/// Resolves the complete symbology of a feature.
#[must_use]
pub fn resolve(feature: &Feature) -> Symbology {
    Symbology {
        icon: icon_for_feature(feature),
        label: label_for_feature(feature),
        color: color_for_feature(feature),
        fill: should_fill_area(feature),
        border: border_for_area(feature),
    }
}
