// Copyright 2025 the Seachart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! S-57 attribute codes (ATTL) referenced by the symbology tables.

/// Beacon shape.
pub const BCNSHP: u16 = 2;
/// Buoy shape.
pub const BOYSHP: u16 = 4;
/// Category of cardinal mark.
pub const CATCAM: u16 = 13;
/// Category of harbour facility.
pub const CATHAF: u16 = 30;
/// Category of landmark.
pub const CATLMK: u16 = 35;
/// Category of lateral mark.
pub const CATLAM: u16 = 36;
/// Category of obstruction.
pub const CATOBS: u16 = 42;
/// Colour.
pub const COLOUR: u16 = 75;
/// Visually conspicuous.
pub const CONVIS: u16 = 83;
/// Depth range value 1 (minimum depth).
pub const DRVAL1: u16 = 87;
/// Nature of surface.
pub const NATSUR: u16 = 113;
/// Object name.
pub const OBJNAM: u16 = 116;
/// Restriction.
pub const RESTRN: u16 = 131;
/// Value of sounding.
pub const VALSOU: u16 = 179;
/// Water level effect.
pub const WATLEV: u16 = 187;
