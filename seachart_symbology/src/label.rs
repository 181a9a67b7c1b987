// Copyright 2025 the Seachart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label selection.

use alloc::string::{String, ToString};

use seachart_feature::{Feature, attr, class};

use crate::rules::{Condition, Rule, first_match};

#[derive(Copy, Clone, Debug)]
enum Outcome {
    /// The raw value of an attribute, when present.
    Attribute(u16),
    /// A fixed text.
    Text(&'static str),
    /// No label.
    Hidden,
}

use Condition::{Always, Is, OneOf};
use Outcome::{Attribute, Hidden, Text};

const OBSTRUCTIONS: &[u16] = &[class::OBSTRN, class::UWTROC, class::WRECKS];

static LABELS: &[Rule<Outcome>] = &[
    // Dry and awash obstructions carry their symbol only.
    Rule::new(OBSTRUCTIONS, OneOf(attr::WATLEV, &["2", "4"]), Hidden),
    Rule::new(OBSTRUCTIONS, Always, Attribute(attr::VALSOU)),
    Rule::new(&[class::LNDRGN, class::SEAARE], Always, Attribute(attr::OBJNAM)),
    // Seabed material abbreviations.
    Rule::new(&[class::SBDARE], Is(attr::NATSUR, "1"), Text("M")),
    Rule::new(&[class::SBDARE], Is(attr::NATSUR, "2"), Text("Cy")),
    Rule::new(&[class::SBDARE], Is(attr::NATSUR, "3"), Text("Si")),
    Rule::new(&[class::SBDARE], Is(attr::NATSUR, "4"), Text("S")),
    Rule::new(&[class::SBDARE], Is(attr::NATSUR, "5"), Text("St")),
    Rule::new(&[class::SBDARE], Is(attr::NATSUR, "6"), Text("G")),
    Rule::new(&[class::SBDARE], Is(attr::NATSUR, "7"), Text("P")),
    Rule::new(&[class::SBDARE], Is(attr::NATSUR, "8"), Text("Cb")),
    Rule::new(&[class::SBDARE], Is(attr::NATSUR, "17"), Text("Sh")),
    Rule::new(&[class::SBDARE], Is(attr::NATSUR, "18"), Text("Bo")),
];

/// Selects the label text for a feature, if any.
#[must_use]
pub fn label_for_feature(feature: &Feature) -> Option<String> {
    match *first_match(LABELS, feature)? {
        Attribute(code) => feature.attributes().get(code).map(ToString::to_string),
        Text(text) => Some(text.to_string()),
        Hidden => None,
    }
}
