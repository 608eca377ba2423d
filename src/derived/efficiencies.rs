// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Dish efficiencies.

use crate::{
    constants::{PI, VEL_C},
    params::InstrumentSetup,
    units::{Quantity, Unit, UnitError},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Efficiencies {
    /// Loss due to surface irregularities (Ruze).
    pub eta_ruze: f64,

    /// Aperture efficiency.
    pub eta_a: f64,

    /// Everything else that lowers the sensitivity: spillover, blocking and
    /// polarisation.
    pub eta_s: f64,
}

impl Efficiencies {
    pub fn new(obs_freq: Quantity, setup: &InstrumentSetup) -> Result<Efficiencies, UnitError> {
        let wavelength_m = VEL_C / obs_freq.value_in(Unit::Hz)?;
        let surface_rms_m = setup.surface_rms.value_in(Unit::Metre)?;
        let eta_ruze = ruze(surface_rms_m, wavelength_m);

        Ok(Efficiencies {
            eta_ruze,
            eta_a: setup.eta_ill.value_in(Unit::Dimensionless)? * eta_ruze,
            eta_s: setup.eta_spill.value_in(Unit::Dimensionless)?
                * setup.eta_block.value_in(Unit::Dimensionless)?
                * setup.eta_pol.value_in(Unit::Dimensionless)?,
        })
    }
}

/// The Ruze equation: exp(-(4 pi sigma / lambda)^2).
fn ruze(surface_rms_m: f64, wavelength_m: f64) -> f64 {
    (-(4.0 * PI * surface_rms_m / wavelength_m).powi(2)).exp()
}
