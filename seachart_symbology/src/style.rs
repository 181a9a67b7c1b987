// Copyright 2025 the Seachart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Colours, borders and fill flags.

use peniko::Color;
use seachart_feature::{Feature, Primitive, attr, class};

use crate::rules::{Condition, Rule, first_match};

/// Colour of line features (depth contours, coastlines).
pub const LINE_COLOR: Color = Color::from_rgb8(107, 118, 107);
/// Fill for depth areas at least [`DEEP_WATER_DEPTH`] metres deep.
pub const DEEP_WATER_COLOR: Color = Color::from_rgb8(220, 228, 200);
/// Fill for shallower depth areas.
pub const SHALLOW_WATER_COLOR: Color = Color::from_rgb8(197, 210, 191);
/// Colour of classes without a table entry.
pub const DEFAULT_COLOR: Color = Color::new([1.0, 0.0, 1.0, 0.5]);

/// Minimum depth (`DRVAL1`, metres) of a depth area drawn as deep water.
pub const DEEP_WATER_DEPTH: f64 = 30.0;

use Condition::{Always, AtLeast, Is};

static COLORS: &[Rule<Color>] = &[
    Rule::new(&[class::BUAARE], Always, Color::from_rgb8(181, 147, 59)),
    Rule::new(&[class::DEPARE], AtLeast(attr::DRVAL1, DEEP_WATER_DEPTH), DEEP_WATER_COLOR),
    Rule::new(&[class::DEPARE], Always, SHALLOW_WATER_COLOR),
    Rule::new(&[class::LNDARE], Always, Color::from_rgb8(203, 183, 112)),
    Rule::new(&[class::OBSTRN], Always, Color::from_rgb8(129, 194, 225)),
    Rule::new(&[class::SEAARE], Always, Color::new([1.0, 0.0, 1.0, 0.3])),
    // Intertidal seabed only.
    Rule::new(&[class::SBDARE], Is(attr::WATLEV, "4"), Color::from_rgb8(147, 180, 133)),
    Rule::new(&[class::SBDARE], Always, Color::TRANSPARENT),
];

/// Stroke style of an area outline.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BorderStyle {
    /// Stroke colour.
    pub color: Color,
    /// Stroke width in device pixels.
    pub width: f64,
    /// Dash pattern in device pixels (on, off, ...).
    pub dashes: &'static [f64],
}

#[derive(Copy, Clone, Debug)]
enum BorderOutcome {
    /// Stroke with the feature's own colour.
    FeatureColor(f64, &'static [f64]),
    /// Stroke with a fixed colour.
    Fixed(Color, f64, &'static [f64]),
}

static BORDERS: &[Rule<BorderOutcome>] = &[
    Rule::new(
        &[class::M_COVR, class::M_NSYS, class::M_QUAL, class::MAGVAR],
        Always,
        BorderOutcome::FeatureColor(2.0, &[1.0]),
    ),
    Rule::new(&[class::RESARE], Always, BorderOutcome::FeatureColor(2.0, &[8.0, 2.0])),
    Rule::new(
        &[class::OBSTRN],
        Always,
        BorderOutcome::Fixed(Color::BLACK, 1.0, &[1.0, 1.0]),
    ),
];

/// Classes whose areas are outlined but never filled.
const UNFILLED: &[u16] = &[
    class::LNDRGN,
    class::M_COVR,
    class::M_NSYS,
    class::M_QUAL,
    class::MAGVAR,
    class::RESARE,
];

/// Selects the stroke or fill colour for a feature.
///
/// Line features always use [`LINE_COLOR`]; everything else is looked up by
/// class, falling back to [`DEFAULT_COLOR`].
#[must_use]
pub fn color_for_feature(feature: &Feature) -> Color {
    if feature.primitive() == Primitive::Line {
        return LINE_COLOR;
    }
    first_match(COLORS, feature).copied().unwrap_or(DEFAULT_COLOR)
}

/// Selects the outline style of an area feature, if it has one.
#[must_use]
pub fn border_for_area(feature: &Feature) -> Option<BorderStyle> {
    Some(match *first_match(BORDERS, feature)? {
        BorderOutcome::FeatureColor(width, dashes) => BorderStyle {
            color: color_for_feature(feature),
            width,
            dashes,
        },
        BorderOutcome::Fixed(color, width, dashes) => BorderStyle {
            color,
            width,
            dashes,
        },
    })
}

/// Returns `false` for classes whose areas are only outlined.
#[must_use]
pub fn should_fill_area(feature: &Feature) -> bool {
    !UNFILLED.contains(&feature.class())
}
