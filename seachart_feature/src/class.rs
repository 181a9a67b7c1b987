// Copyright 2025 the Seachart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! S-57 object class codes (OBJL) referenced by the symbology tables.

/// Airport / airfield.
pub const AIRARE: u16 = 2;
/// Anchorage area.
pub const ACHARE: u16 = 4;
/// Beacon, cardinal.
pub const BCNCAR: u16 = 5;
/// Beacon, isolated danger.
pub const BCNISD: u16 = 6;
/// Beacon, lateral.
pub const BCNLAT: u16 = 7;
/// Beacon, safe water.
pub const BCNSAW: u16 = 8;
/// Beacon, special purpose/general.
pub const BCNSPP: u16 = 9;
/// Building, single.
pub const BUISGL: u16 = 12;
/// Built-up area.
pub const BUAARE: u16 = 13;
/// Buoy, cardinal.
pub const BOYCAR: u16 = 14;
/// Buoy, installation.
pub const BOYINB: u16 = 15;
/// Buoy, isolated danger.
pub const BOYISD: u16 = 16;
/// Buoy, lateral.
pub const BOYLAT: u16 = 17;
/// Buoy, safe water.
pub const BOYSAW: u16 = 18;
/// Buoy, special purpose/general.
pub const BOYSPP: u16 = 19;
/// Depth area.
pub const DEPARE: u16 = 42;
/// Fog signal.
pub const FOGSIG: u16 = 58;
/// Fortified structure.
pub const FORSTC: u16 = 59;
/// Harbour facility.
pub const HRBFAC: u16 = 64;
/// Land area.
pub const LNDARE: u16 = 71;
/// Land elevation.
pub const LNDELV: u16 = 72;
/// Land region.
pub const LNDRGN: u16 = 73;
/// Landmark.
pub const LNDMRK: u16 = 74;
/// Light.
pub const LIGHTS: u16 = 75;
/// Magnetic variation.
pub const MAGVAR: u16 = 81;
/// Marine farm/culture.
pub const MARCUL: u16 = 82;
/// Obstruction.
pub const OBSTRN: u16 = 86;
/// Offshore platform.
pub const OFSPLF: u16 = 87;
/// Pilot boarding place.
pub const PILBOP: u16 = 91;
/// Radar transponder beacon.
pub const RTPBCN: u16 = 103;
/// Radio station.
pub const RDOSTA: u16 = 105;
/// Restricted area.
pub const RESARE: u16 = 112;
/// Sea area / named water area.
pub const SEAARE: u16 = 119;
/// Seabed area.
pub const SBDARE: u16 = 121;
/// Silo / tank.
pub const SILTNK: u16 = 125;
/// Sounding.
pub const SOUNDG: u16 = 129;
/// Topmark.
pub const TOPMAR: u16 = 144;
/// Underwater/awash rock.
pub const UWTROC: u16 = 153;
/// Weed/kelp.
pub const WEDKLP: u16 = 158;
/// Wreck.
pub const WRECKS: u16 = 159;
/// Coverage (meta object).
pub const M_COVR: u16 = 302;
/// Navigational system of marks (meta object).
pub const M_NSYS: u16 = 306;
/// Quality of data (meta object).
pub const M_QUAL: u16 = 308;
