// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The sensitivity calculator.
//!
//! A [`Calculator`] solves the radiometer equation
//!
//! sensitivity = SEFD / (eta_s sqrt(n_pol bandwidth t_int))
//!
//! for either the sensitivity or the integration time. The derived parameters
//! (SEFD and friends) are recomputed as soon as any parameter they depend on
//! changes, so they are never stale.

mod error;

pub use error::{CalculatedValueInvalid, CalculatorError};

use std::sync::Arc;

use log::{debug, warn};
use serde::Serialize;

use crate::{
    atmosphere::{default_atmosphere, AtmosphereModel},
    config::Config,
    derived::{compute_derived_params, DerivationOptions, DerivedParams},
    instruments::{CoverageTable, Instrument},
    params::{CalculationInput, InputMap, ParamField},
    units::{Quantity, Unit},
};

/// How a [`Calculator`] computes its derived parameters.
#[derive(Clone)]
pub struct CalculatorOptions {
    /// Integrate the SEFD over sub-channels of the band.
    pub finetune: bool,

    /// The instrument being used, if known. Its receiver temperatures are
    /// used where available.
    pub instrument: Option<Instrument>,

    pub atmosphere: Arc<dyn AtmosphereModel>,
}

impl Default for CalculatorOptions {
    fn default() -> Self {
        Self {
            finetune: false,
            instrument: None,
            atmosphere: default_atmosphere(),
        }
    }
}

impl std::fmt::Debug for CalculatorOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalculatorOptions")
            .field("finetune", &self.finetune)
            .field("instrument", &self.instrument)
            .finish_non_exhaustive()
    }
}

/// The result of a calculation. If the calculator was asked to store the
/// value but couldn't, `warning` says why.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatedValue {
    pub value: Quantity,

    #[serde(skip)]
    pub warning: Option<CalculatedValueInvalid>,
}

#[derive(Debug)]
pub struct Calculator {
    config: Config,
    derived: DerivedParams,
    options: CalculatorOptions,
}

macro_rules! getters {
    ($($(#[$meta:meta])* $name:ident => $field:ident,)+) => {
        $(
            $(#[$meta])*
            pub fn $name(&self) -> Quantity {
                self.config.get(ParamField::$field)
            }
        )+
    };
}

impl Calculator {
    /// Create a calculator with the default options. Parameters not in
    /// `user_input` or `instrument_setup` take their default values.
    pub fn new(
        user_input: &InputMap,
        instrument_setup: &InputMap,
    ) -> Result<Calculator, CalculatorError> {
        Calculator::with_options(user_input, instrument_setup, CalculatorOptions::default())
    }

    pub fn with_options(
        user_input: &InputMap,
        instrument_setup: &InputMap,
        options: CalculatorOptions,
    ) -> Result<Calculator, CalculatorError> {
        let config = Config::new(user_input, instrument_setup)?;
        let derived = compute_derived_params(
            config.inputs(),
            options.atmosphere.as_ref(),
            derivation_options(&options),
        )?;
        debug!("Created a calculator with {options:?}");
        Ok(Calculator {
            config,
            derived,
            options,
        })
    }

    /// Calculate the sensitivity reached after `t_int` (or the stored
    /// integration time if `t_int` is `None`).
    ///
    /// If `update_calculator` is true, a supplied `t_int` is stored, and so is
    /// the resulting sensitivity (if it's within range). Otherwise, a supplied
    /// `t_int` is only validated.
    pub fn calculate_sensitivity(
        &mut self,
        t_int: Option<Quantity>,
        update_calculator: bool,
    ) -> Result<CalculatedValue, CalculatorError> {
        let t_int = self.supplied_or_stored(ParamField::TInt, t_int, update_calculator)?;

        let sefd = self.derived.sefd.value_in(Unit::Jansky)?;
        let eta_s = self.derived.eta_s.value();
        let n_pol = self.n_pol().value();
        let bandwidth_hz = self.bandwidth().value_in(Unit::Hz)?;
        let t_int_s = t_int.value_in(Unit::Second)?;

        let sensitivity_jy = sefd / (eta_s * (n_pol * bandwidth_hz * t_int_s).sqrt());
        let value = flux_density_tier(Quantity::new(sensitivity_jy, Unit::Jansky))?;
        debug!("Calculated a sensitivity of {value} for an integration time of {t_int}");

        let warning = if update_calculator {
            self.commit_calculated(ParamField::Sensitivity, value)?
        } else {
            None
        };
        Ok(CalculatedValue { value, warning })
    }

    /// Calculate the integration time needed to reach `sensitivity` (or the
    /// stored sensitivity if `sensitivity` is `None`). The storing rules are
    /// the same as for [`Calculator::calculate_sensitivity`].
    pub fn calculate_t_integration(
        &mut self,
        sensitivity: Option<Quantity>,
        update_calculator: bool,
    ) -> Result<CalculatedValue, CalculatorError> {
        let sensitivity =
            self.supplied_or_stored(ParamField::Sensitivity, sensitivity, update_calculator)?;

        let sefd = self.derived.sefd.value_in(Unit::Jansky)?;
        let eta_s = self.derived.eta_s.value();
        let n_pol = self.n_pol().value();
        let bandwidth_hz = self.bandwidth().value_in(Unit::Hz)?;
        let sensitivity_jy = sensitivity.value_in(Unit::Jansky)?;

        let t_int_s = (sefd / (sensitivity_jy * eta_s)).powi(2) / (n_pol * bandwidth_hz);
        let value = time_tier(Quantity::new(t_int_s, Unit::Second))?;
        debug!("Calculated an integration time of {value} for a sensitivity of {sensitivity}");

        let warning = if update_calculator {
            self.commit_calculated(ParamField::TInt, value)?
        } else {
            None
        };
        Ok(CalculatedValue { value, warning })
    }

    /// Restore all parameters to their values after construction.
    pub fn reset(&mut self) -> Result<(), CalculatorError> {
        self.config.reset();
        self.recompute_derived()?;
        Ok(())
    }

    /// Validate and store a parameter. If the parameter affects the derived
    /// parameters, they are recomputed now; if that fails, the parameter keeps
    /// its old value.
    pub fn set(&mut self, field: ParamField, value: Quantity) -> Result<(), CalculatorError> {
        let previous = self.config.get(field);
        if self.config.set(field, value)? {
            if let Err(e) = self.recompute_derived() {
                self.config.restore(field, previous);
                return Err(e);
            }
        }
        Ok(())
    }

    pub fn get(&self, field: ParamField) -> Quantity {
        self.config.get(field)
    }

    getters! {
        t_int => TInt,
        sensitivity => Sensitivity,
        bandwidth => Bandwidth,
        obs_freq => ObsFreq,
        n_pol => NPol,
        weather => Weather,
        elevation => Elevation,
        dish_radius => DishRadius,
        surface_rms => SurfaceRms,
        t_amb => TAmb,
        t_cmb => TCmb,
        /// The sideband ratio.
        g => G,
        eta_eff => EtaEff,
        eta_ill => EtaIll,
        eta_spill => EtaSpill,
        eta_block => EtaBlock,
        eta_pol => EtaPol,
    }

    pub fn calculation_inputs(&self) -> &CalculationInput {
        self.config.inputs()
    }

    pub fn derived(&self) -> &DerivedParams {
        &self.derived
    }

    pub fn options(&self) -> &CalculatorOptions {
        &self.options
    }

    /// Instruments that cover the current observing frequency and bandwidth.
    pub fn find_applicable_instruments(&self) -> Result<Vec<Instrument>, CalculatorError> {
        self.find_applicable_instruments_in(CoverageTable::default_table())
    }

    pub fn find_applicable_instruments_in(
        &self,
        table: &CoverageTable,
    ) -> Result<Vec<Instrument>, CalculatorError> {
        Ok(table.applicable(self.obs_freq(), self.bandwidth())?)
    }

    fn recompute_derived(&mut self) -> Result<(), CalculatorError> {
        self.derived = compute_derived_params(
            self.config.inputs(),
            self.options.atmosphere.as_ref(),
            derivation_options(&self.options),
        )?;
        Ok(())
    }

    fn supplied_or_stored(
        &mut self,
        field: ParamField,
        supplied: Option<Quantity>,
        update_calculator: bool,
    ) -> Result<Quantity, CalculatorError> {
        match supplied {
            Some(value) if update_calculator => {
                self.set(field, value)?;
                Ok(value)
            }
            Some(value) => {
                self.config.validate(field, &value)?;
                Ok(value)
            }
            None => Ok(self.config.get(field)),
        }
    }

    /// Try to store a calculated value. A value that's out of range is not
    /// stored, and a warning is returned (and logged) instead.
    fn commit_calculated(
        &mut self,
        field: ParamField,
        value: Quantity,
    ) -> Result<Option<CalculatedValueInvalid>, CalculatorError> {
        match self.set(field, value) {
            Ok(()) => Ok(None),
            Err(CalculatorError::Param(reason)) if reason.is_value_invalid() => {
                let warning = CalculatedValueInvalid {
                    parameter: field,
                    value,
                    reason,
                };
                warn!("{warning}");
                Ok(Some(warning))
            }
            Err(e) => Err(e),
        }
    }
}

impl Default for Calculator {
    fn default() -> Self {
        let options = CalculatorOptions::default();
        let config = Config::default();
        // The defaults are known to produce valid derived parameters.
        let derived = compute_derived_params(
            config.inputs(),
            options.atmosphere.as_ref(),
            derivation_options(&options),
        )
        .expect("the default parameters can always be derived");
        Calculator {
            config,
            derived,
            options,
        }
    }
}

fn derivation_options(options: &CalculatorOptions) -> DerivationOptions {
    DerivationOptions {
        finetune: options.finetune,
        instrument: options.instrument,
    }
}

/// Express a flux density in µJy below 1 mJy, mJy below 1000 mJy, and Jy
/// otherwise.
pub fn flux_density_tier(value: Quantity) -> Result<Quantity, crate::units::UnitError> {
    let mjy = value.value_in(Unit::MilliJansky)?;
    let unit = if mjy < 1.0 {
        Unit::MicroJansky
    } else if mjy < 1000.0 {
        Unit::MilliJansky
    } else {
        Unit::Jansky
    };
    value.to(unit)
}

/// Express a time in seconds below a minute, minutes below an hour, and hours
/// otherwise.
pub fn time_tier(value: Quantity) -> Result<Quantity, crate::units::UnitError> {
    let s = value.value_in(Unit::Second)?;
    let unit = if s < 60.0 {
        Unit::Second
    } else if s < 3600.0 {
        Unit::Minute
    } else {
        Unit::Hour
    };
    value.to(unit)
}
