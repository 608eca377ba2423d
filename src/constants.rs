// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All constants *must* be double precision. Physical constants are in SI units;
everything that carries another unit says so in its name or docs.
 */

pub use std::f64::consts::{FRAC_PI_2, PI, TAU};

// Things that should never change.

/// Boltzmann constant \[J/K\]
pub const K_B: f64 = 1.380649e-23;

/// Planck constant \[J s\]
pub const H: f64 = 6.62607015e-34;

/// Speed of light \[metres/second\]
pub const VEL_C: f64 = 299_792_458.0;

/// One jansky \[W m^-2 Hz^-1\]
pub const JANSKY: f64 = 1e-26;

/// The receiver temperature of a generic receiver is this many multiples of
/// the quantum limit (h nu / k_B), plus [`RECEIVER_TEMP_OFFSET_K`].
pub const RECEIVER_QUANTUM_LIMIT_FACTOR: f64 = 5.0;

/// \[K\]
pub const RECEIVER_TEMP_OFFSET_K: f64 = 4.0;

// User input defaults.

/// \[seconds\]
pub const DEFAULT_T_INT_S: f64 = 100.0;
/// \[mJy\]
pub const DEFAULT_SENSITIVITY_MJY: f64 = 3.0;
/// \[MHz\]
pub const DEFAULT_BANDWIDTH_MHZ: f64 = 100.0;
/// \[GHz\]
pub const DEFAULT_OBS_FREQ_GHZ: f64 = 100.0;
pub const DEFAULT_N_POL: f64 = 2.0;
/// Fraction between 0 (driest) and 1 (wettest).
pub const DEFAULT_WEATHER: f64 = 0.25;
/// \[degrees\]
pub const DEFAULT_ELEVATION_DEG: f64 = 45.0;

// Instrument setup defaults.

/// \[metres\]
pub const DEFAULT_DISH_RADIUS_M: f64 = 25.0;
/// \[micrometres\]
pub const DEFAULT_SURFACE_RMS_UM: f64 = 25.0;
/// Average ambient temperature at the site \[K\]
pub const DEFAULT_T_AMB_K: f64 = 270.0;
/// \[K\]
pub const T_CMB_K: f64 = 2.726;
/// Sideband ratio.
pub const DEFAULT_G: f64 = 1.0;
/// Forward efficiency.
pub const DEFAULT_ETA_EFF: f64 = 0.95;
/// Illumination efficiency.
pub const DEFAULT_ETA_ILL: f64 = 0.8;
/// Spillover efficiency.
pub const DEFAULT_ETA_SPILL: f64 = 0.95;
/// Lowered efficiency due to blocking.
pub const DEFAULT_ETA_BLOCK: f64 = 0.94;
/// Polarisation efficiency.
pub const DEFAULT_ETA_POL: f64 = 0.995;
