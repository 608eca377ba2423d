// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The typed records holding parameter values.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::ParamField;
use crate::units::Quantity;

/// Parameters keyed by their names, in the order they were given.
pub type InputMap = IndexMap<String, Quantity>;

/// Parameters describing what the user wants to observe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserInput {
    pub t_int: Quantity,
    pub sensitivity: Quantity,
    pub bandwidth: Quantity,
    pub obs_freq: Quantity,
    pub n_pol: Quantity,
    pub weather: Quantity,
    pub elevation: Quantity,
}

/// Parameters describing the telescope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InstrumentSetup {
    pub dish_radius: Quantity,
    pub surface_rms: Quantity,
    #[serde(rename = "T_amb")]
    pub t_amb: Quantity,
    #[serde(rename = "T_cmb")]
    pub t_cmb: Quantity,
    pub g: Quantity,
    pub eta_eff: Quantity,
    pub eta_ill: Quantity,
    pub eta_spill: Quantity,
    pub eta_block: Quantity,
    pub eta_pol: Quantity,
}

impl Default for UserInput {
    fn default() -> Self {
        let d = |f: ParamField| f.descriptor().default;
        Self {
            t_int: d(ParamField::TInt),
            sensitivity: d(ParamField::Sensitivity),
            bandwidth: d(ParamField::Bandwidth),
            obs_freq: d(ParamField::ObsFreq),
            n_pol: d(ParamField::NPol),
            weather: d(ParamField::Weather),
            elevation: d(ParamField::Elevation),
        }
    }
}

impl Default for InstrumentSetup {
    fn default() -> Self {
        let d = |f: ParamField| f.descriptor().default;
        Self {
            dish_radius: d(ParamField::DishRadius),
            surface_rms: d(ParamField::SurfaceRms),
            t_amb: d(ParamField::TAmb),
            t_cmb: d(ParamField::TCmb),
            g: d(ParamField::G),
            eta_eff: d(ParamField::EtaEff),
            eta_ill: d(ParamField::EtaIll),
            eta_spill: d(ParamField::EtaSpill),
            eta_block: d(ParamField::EtaBlock),
            eta_pol: d(ParamField::EtaPol),
        }
    }
}

/// Everything a calculation needs. Cloning this is how a configuration is
/// snapshotted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculationInput {
    pub user_input: UserInput,
    pub instrument_setup: InstrumentSetup,
}

impl CalculationInput {
    pub fn get(&self, field: ParamField) -> Quantity {
        *self.slot(field)
    }

    /// Overwrite a parameter without any checks. Callers are expected to have
    /// validated `value` already.
    pub(crate) fn put(&mut self, field: ParamField, value: Quantity) {
        *self.slot_mut(field) = value;
    }

    fn slot(&self, field: ParamField) -> &Quantity {
        let u = &self.user_input;
        let i = &self.instrument_setup;
        match field {
            ParamField::TInt => &u.t_int,
            ParamField::Sensitivity => &u.sensitivity,
            ParamField::Bandwidth => &u.bandwidth,
            ParamField::ObsFreq => &u.obs_freq,
            ParamField::NPol => &u.n_pol,
            ParamField::Weather => &u.weather,
            ParamField::Elevation => &u.elevation,
            ParamField::DishRadius => &i.dish_radius,
            ParamField::SurfaceRms => &i.surface_rms,
            ParamField::TAmb => &i.t_amb,
            ParamField::TCmb => &i.t_cmb,
            ParamField::G => &i.g,
            ParamField::EtaEff => &i.eta_eff,
            ParamField::EtaIll => &i.eta_ill,
            ParamField::EtaSpill => &i.eta_spill,
            ParamField::EtaBlock => &i.eta_block,
            ParamField::EtaPol => &i.eta_pol,
        }
    }

    fn slot_mut(&mut self, field: ParamField) -> &mut Quantity {
        let u = &mut self.user_input;
        let i = &mut self.instrument_setup;
        match field {
            ParamField::TInt => &mut u.t_int,
            ParamField::Sensitivity => &mut u.sensitivity,
            ParamField::Bandwidth => &mut u.bandwidth,
            ParamField::ObsFreq => &mut u.obs_freq,
            ParamField::NPol => &mut u.n_pol,
            ParamField::Weather => &mut u.weather,
            ParamField::Elevation => &mut u.elevation,
            ParamField::DishRadius => &mut i.dish_radius,
            ParamField::SurfaceRms => &mut i.surface_rms,
            ParamField::TAmb => &mut i.t_amb,
            ParamField::TCmb => &mut i.t_cmb,
            ParamField::G => &mut i.g,
            ParamField::EtaEff => &mut i.eta_eff,
            ParamField::EtaIll => &mut i.eta_ill,
            ParamField::EtaSpill => &mut i.eta_spill,
            ParamField::EtaBlock => &mut i.eta_block,
            ParamField::EtaPol => &mut i.eta_pol,
        }
    }
}
