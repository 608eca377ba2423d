// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Noise temperatures. All values are in kelvin.

use crate::{
    constants::{H, K_B, RECEIVER_QUANTUM_LIMIT_FACTOR, RECEIVER_TEMP_OFFSET_K},
    params::InstrumentSetup,
    units::{Quantity, Unit, UnitError},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Temperatures {
    pub t_rx: f64,
    pub t_sky: f64,
    pub t_sys: f64,
}

impl Temperatures {
    /// `t_rx` overrides the generic receiver model when it's available.
    pub fn new(
        freq: Quantity,
        setup: &InstrumentSetup,
        t_atm: Quantity,
        tau_atm: f64,
        t_rx: Option<Quantity>,
    ) -> Result<Temperatures, UnitError> {
        let t_rx = match t_rx {
            Some(t) => t.value_in(Unit::Kelvin)?,
            None => receiver_temperature(freq.value_in(Unit::Hz)?),
        };
        let t_cmb = setup.t_cmb.value_in(Unit::Kelvin)?;
        let t_amb = setup.t_amb.value_in(Unit::Kelvin)?;
        let g = setup.g.value_in(Unit::Dimensionless)?;
        let eta_eff = setup.eta_eff.value_in(Unit::Dimensionless)?;
        let t_atm = t_atm.value_in(Unit::Kelvin)?;

        let transmission = (-tau_atm).exp();
        let t_sky = t_atm * (1.0 - transmission) + t_cmb * transmission;
        let t_sys = (1.0 + g) / (eta_eff * transmission)
            * (t_rx + eta_eff * t_sky + (1.0 - eta_eff) * t_amb);

        Ok(Temperatures { t_rx, t_sky, t_sys })
    }
}

/// A generic receiver: a multiple of the quantum limit plus a constant.
pub fn receiver_temperature(freq_hz: f64) -> f64 {
    RECEIVER_QUANTUM_LIMIT_FACTOR * H * freq_hz / K_B + RECEIVER_TEMP_OFFSET_K
}
