// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The line catalogue used to build the default atmosphere tables.
//!
//! Each absorption line is a peak-normalised Lorentz profile. Oxygen lines
//! and the dry continuum don't depend on the weather; water-vapour lines and
//! the wet continuum scale with the precipitable water vapour (PWV).

use vec1::Vec1;

/// The first frequency in the table \[GHz\].
const TABLE_FREQ_START_GHZ: f64 = 30.0;
/// The last frequency in the table \[GHz\].
const TABLE_FREQ_END_GHZ: f64 = 1000.0;
/// \[GHz\]
const TABLE_FREQ_STEP_GHZ: f64 = 1.0;

/// The weather conditions that the table has columns for.
pub(super) const WEATHER_NODES: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];
/// The PWV associated with each of [`WEATHER_NODES`] \[mm\].
pub(super) const PWV_NODES_MM: [f64; 5] = [0.3, 0.7, 1.1, 1.9, 4.0];

/// (centre \[GHz\], peak zenith opacity, half width at half maximum \[GHz\])
const OXYGEN_LINES: [(f64, f64, f64); 8] = [
    (60.0, 30.0, 1.5),
    (118.75, 3.0, 1.2),
    (368.5, 0.3, 1.5),
    (424.76, 2.0, 1.5),
    (487.25, 0.5, 1.5),
    (715.39, 0.5, 1.5),
    (773.84, 1.5, 1.5),
    (834.15, 1.5, 1.5),
];

/// (centre \[GHz\], peak zenith opacity per mm of PWV, half width at half
/// maximum \[GHz\])
const WATER_LINES: [(f64, f64, f64); 11] = [
    (22.235, 0.01, 3.0),
    (183.31, 15.0, 2.5),
    (325.15, 3.0, 2.5),
    (380.2, 8.0, 2.5),
    (448.0, 6.0, 2.5),
    (556.94, 300.0, 2.5),
    (620.7, 2.0, 2.5),
    (752.03, 300.0, 2.5),
    (916.17, 8.0, 2.5),
    (970.32, 10.0, 2.5),
    (987.93, 200.0, 2.5),
];

/// Dry continuum: a + b nu^2 (nu in GHz).
const DRY_CONTINUUM: (f64, f64) = (0.005, 4e-8);
/// Wet continuum per mm of PWV: b nu^2 (nu in GHz).
const WET_CONTINUUM: f64 = 1.2e-6;

/// \[K\]
const T_ATM_BASE_K: f64 = 255.0;
/// Optically thick emission comes from lower (warmer) layers \[K\].
const T_ATM_THICK_EXCESS_K: f64 = 15.0;

pub(super) fn table_frequencies() -> Vec1<f64> {
    let num_freqs =
        ((TABLE_FREQ_END_GHZ - TABLE_FREQ_START_GHZ) / TABLE_FREQ_STEP_GHZ).round() as usize + 1;
    let freqs = (0..num_freqs)
        .map(|i| TABLE_FREQ_START_GHZ + i as f64 * TABLE_FREQ_STEP_GHZ)
        .collect();
    Vec1::try_from_vec(freqs).expect("the table has at least one frequency")
}

#[inline]
fn lorentz(freq_ghz: f64, (centre, peak, hwhm): (f64, f64, f64)) -> f64 {
    let hwhm_sq = hwhm * hwhm;
    peak * hwhm_sq / ((freq_ghz - centre).powi(2) + hwhm_sq)
}

/// The zenith opacity at a frequency \[GHz\] for an amount of PWV \[mm\].
pub(super) fn zenith_opacity(freq_ghz: f64, pwv_mm: f64) -> f64 {
    let freq_sq = freq_ghz * freq_ghz;
    let dry = DRY_CONTINUUM.0
        + DRY_CONTINUUM.1 * freq_sq
        + OXYGEN_LINES
            .iter()
            .map(|&line| lorentz(freq_ghz, line))
            .sum::<f64>();
    let wet = WET_CONTINUUM * freq_sq
        + WATER_LINES
            .iter()
            .map(|&line| lorentz(freq_ghz, line))
            .sum::<f64>();
    dry + pwv_mm * wet
}

/// The effective temperature of the emitting atmosphere given its zenith
/// opacity \[K\].
pub(super) fn emission_temperature(tau_zenith: f64) -> f64 {
    T_ATM_BASE_K + T_ATM_THICK_EXCESS_K * (1.0 - (-tau_zenith).exp())
}
