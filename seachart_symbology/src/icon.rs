// Copyright 2025 the Seachart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Icon selection.

use alloc::borrow::Cow;
use alloc::format;

use seachart_feature::{Feature, attr, class};

use crate::rules::{Condition, Rule, covers_class, first_match};

/// Icon resolved for a feature.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Icon {
    /// A named asset from the icon store.
    Asset(Cow<'static, str>),
    /// The class has no entry in the icon table; drawn as a placeholder.
    Unrecognized,
}

impl Icon {
    /// Asset name of the fallback marker.
    pub const UNRECOGNIZED_NAME: &'static str = "X";

    /// Asset name, or [`Icon::UNRECOGNIZED_NAME`] for unrecognized classes.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Asset(name) => name,
            Self::Unrecognized => Self::UNRECOGNIZED_NAME,
        }
    }
}

#[derive(Copy, Clone, Debug)]
enum Outcome {
    /// A fixed asset name.
    Asset(&'static str),
    /// `prefix` followed by the raw value of an attribute (empty if missing).
    Suffixed(&'static str, u16),
    /// The class is drawn without an icon.
    Hidden,
}

use Condition::{All, Always, Is, OneOf};
use Outcome::{Asset, Hidden, Suffixed};

const OBSTRUCTIONS: &[u16] = &[class::OBSTRN, class::UWTROC, class::WRECKS];

static ICONS: &[Rule<Outcome>] = &[
    Rule::new(&[class::AIRARE], Always, Asset("AIRARE02")),
    Rule::new(&[class::ACHARE], Always, Asset("ACHARE02")),
    Rule::new(&[class::BCNCAR], Always, Suffixed("BCNCAR0", attr::CATCAM)),
    Rule::new(&[class::BCNISD], Always, Asset("BCNISD21")),
    Rule::new(&[class::BCNLAT], Is(attr::CATLAM, "1"), Asset("BCNLAT15")),
    Rule::new(&[class::BCNLAT], Is(attr::CATLAM, "2"), Asset("BCNLAT16")),
    Rule::new(&[class::BCNLAT], Is(attr::CATLAM, "3"), Asset("BCNLAT15S")),
    Rule::new(&[class::BCNLAT], Is(attr::CATLAM, "4"), Asset("BCNLAT16B")),
    Rule::new(&[class::BCNLAT], Always, Asset("BCNLAT15")),
    Rule::new(&[class::BCNSAW], Always, Asset("BCNSAW13")),
    Rule::new(&[class::BCNSPP], Always, Asset("BCNSPP13")),
    Rule::new(&[class::BUISGL], Always, Asset("BUISGL01")),
    Rule::new(&[class::BOYCAR], Always, Suffixed("BOYCAR0", attr::CATCAM)),
    Rule::new(&[class::BOYINB], Is(attr::BOYSHP, "7"), Asset("BOYSUP02")),
    Rule::new(&[class::BOYINB], Always, Asset("BOYDEF03")),
    Rule::new(&[class::BOYISD], Always, Asset("BOYISD12")),
    Rule::new(&[class::BOYLAT], OneOf(attr::CATLAM, &["1", "4"]), Asset("BOYLAT13")),
    Rule::new(&[class::BOYLAT], OneOf(attr::CATLAM, &["2", "3"]), Asset("BOYLAT14")),
    // Lateral buoys of unknown category share the beacon symbol.
    Rule::new(&[class::BOYLAT], Always, Asset("BCNLAT15")),
    Rule::new(&[class::BOYSAW], Always, Asset("BOYSAW12")),
    Rule::new(&[class::BOYSPP], Is(attr::BOYSHP, "7"), Asset("BOYSUP02")),
    Rule::new(&[class::BOYSPP], Always, Asset("BOYSPP11")),
    Rule::new(&[class::DEPARE], Always, Hidden),
    Rule::new(&[class::FOGSIG], Always, Asset("FOGSIG01")),
    Rule::new(&[class::FORSTC], Always, Asset("FORSTC01")),
    Rule::new(&[class::HRBFAC], Is(attr::CATHAF, "4"), Asset("HRBFAC09")),
    Rule::new(&[class::HRBFAC], Always, Asset("SMCFAC02")),
    Rule::new(&[class::LNDARE], Always, Hidden),
    Rule::new(&[class::LNDELV], Always, Asset("POSGEN04")),
    Rule::new(&[class::LNDRGN], Always, Hidden),
    Rule::new(&[class::LNDMRK], All(&[Is(attr::CATLMK, "1"), Is(attr::CONVIS, "1")]), Asset("CAIRNS11")),
    Rule::new(&[class::LNDMRK], Is(attr::CATLMK, "1"), Asset("CAIRNS01")),
    Rule::new(&[class::LNDMRK], All(&[Is(attr::CATLMK, "3"), Is(attr::CONVIS, "1")]), Asset("CHIMNY11")),
    Rule::new(&[class::LNDMRK], Is(attr::CATLMK, "3"), Asset("CHIMNY01")),
    Rule::new(&[class::LNDMRK], All(&[Is(attr::CATLMK, "9"), Is(attr::CONVIS, "1")]), Asset("MONUMT12")),
    Rule::new(&[class::LNDMRK], Is(attr::CATLMK, "9"), Asset("MONUMT02")),
    Rule::new(&[class::LNDMRK], Is(attr::CONVIS, "1"), Asset("TOWERS03")),
    Rule::new(&[class::LNDMRK], Always, Asset("TOWERS01")),
    Rule::new(&[class::LIGHTS], Is(attr::COLOUR, "3"), Asset("LIGHTS11_1")),
    Rule::new(&[class::LIGHTS], Is(attr::COLOUR, "4"), Asset("LIGHTS12_1")),
    Rule::new(&[class::LIGHTS], Always, Asset("LIGHTS13_1")),
    Rule::new(&[class::MAGVAR], Always, Asset("MAGVAR01")),
    Rule::new(&[class::MARCUL], Always, Asset("MARCUL")),
    Rule::new(OBSTRUCTIONS, Is(attr::CATOBS, "5"), Asset("FSHHAV01")),
    Rule::new(OBSTRUCTIONS, Is(attr::CATOBS, "7"), Asset("FOULGND1")),
    Rule::new(OBSTRUCTIONS, Is(attr::WATLEV, "2"), Asset("OBSTRN11")),
    Rule::new(OBSTRUCTIONS, Is(attr::WATLEV, "4"), Asset("OBSTRN03")),
    Rule::new(OBSTRUCTIONS, Condition::Above(attr::VALSOU, 20.0), Asset("DANGER02")),
    Rule::new(OBSTRUCTIONS, Condition::Numeric(attr::VALSOU), Asset("DANGER01")),
    Rule::new(OBSTRUCTIONS, Always, Asset("OBSTRN01")),
    Rule::new(&[class::OFSPLF], Always, Asset("OFSPLF01")),
    Rule::new(&[class::PILBOP], Always, Asset("PILBOP02")),
    Rule::new(&[class::RTPBCN], Always, Asset("RTPBCN02")),
    Rule::new(&[class::RDOSTA], Always, Asset("DRFSTA01")),
    Rule::new(&[class::RESARE], Is(attr::RESTRN, "1"), Asset("ACHRES51")),
    Rule::new(&[class::RESARE], OneOf(attr::RESTRN, &["3", "4"]), Asset("FSHRES51")),
    Rule::new(&[class::RESARE], OneOf(attr::RESTRN, &["7", "8"]), Asset("ENTRES51")),
    Rule::new(&[class::RESARE], Always, Asset("INFARE51")),
    Rule::new(&[class::SEAARE], Always, Hidden),
    Rule::new(&[class::SBDARE], OneOf(attr::NATSUR, &["9", "11", "14"]), Asset("RCKLDG01")),
    Rule::new(&[class::SBDARE], Always, Hidden),
    Rule::new(&[class::SILTNK], Is(attr::CONVIS, "1"), Asset("SILBUI11")),
    Rule::new(&[class::SILTNK], Always, Asset("SILBUI01")),
    // Topmarks are already part of the beacon and buoy symbols.
    Rule::new(&[class::TOPMAR], Always, Hidden),
    Rule::new(&[class::WEDKLP], Always, Asset("WEDKLP03")),
    Rule::new(&[class::M_COVR], Always, Hidden),
];

/// Selects the icon for a feature.
///
/// Returns `None` for classes drawn without an icon (depth and land areas,
/// named regions, topmarks, coverage) and [`Icon::Unrecognized`] for classes
/// the table does not know.
#[must_use]
pub fn icon_for_feature(feature: &Feature) -> Option<Icon> {
    match first_match(ICONS, feature) {
        Some(&Asset(name)) => Some(Icon::Asset(Cow::Borrowed(name))),
        Some(&Suffixed(prefix, code)) => {
            let suffix = feature.attributes().get_or(code, "");
            Some(Icon::Asset(Cow::Owned(format!("{prefix}{suffix}"))))
        }
        Some(&Hidden) => None,
        None => {
            debug_assert!(
                !covers_class(ICONS, feature),
                "every listed class ends with an unconditional rule"
            );
            Some(Icon::Unrecognized)
        }
    }
}
