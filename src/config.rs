// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The validated parameter store.
//!
//! A [`Config`] owns the live [`CalculationInput`] and a copy of it taken
//! straight after construction. Every write is validated against the
//! parameter's descriptor before it lands; [`Config::reset`] copies the
//! snapshot back.

use log::debug;

use crate::{
    params::{self, CalculationInput, InputMap, ParamError, ParamField, ParamGroup},
    units::Quantity,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    inputs: CalculationInput,

    /// The inputs as they were after construction. Never modified.
    original_inputs: CalculationInput,
}

impl Config {
    /// Merge the supplied parameters over the defaults. All names are checked
    /// before any value is; unknown names (or names supplied in the wrong
    /// group) are an error.
    pub fn new(user_input: &InputMap, instrument_setup: &InputMap) -> Result<Config, ParamError> {
        let mut supplied = Vec::with_capacity(user_input.len() + instrument_setup.len());
        for (group, map) in [
            (ParamGroup::UserInput, user_input),
            (ParamGroup::InstrumentSetup, instrument_setup),
        ] {
            for (name, value) in map {
                supplied.push((ParamField::lookup(name, group)?, *value));
            }
        }

        let mut inputs = CalculationInput::default();
        for (field, value) in supplied {
            params::validate(field, &value)?;
            inputs.put(field, value);
        }
        debug!("Config created with inputs: {inputs:?}");

        Ok(Config {
            inputs,
            original_inputs: inputs,
        })
    }

    pub fn inputs(&self) -> &CalculationInput {
        &self.inputs
    }

    /// The inputs as they were after construction.
    pub fn original_inputs(&self) -> &CalculationInput {
        &self.original_inputs
    }

    pub fn get(&self, field: ParamField) -> Quantity {
        self.inputs.get(field)
    }

    /// Check a value against `field`'s unit and range without storing it.
    pub fn validate(&self, field: ParamField, value: &Quantity) -> Result<(), ParamError> {
        params::validate(field, value)
    }

    /// Validate and store a value. The value keeps the unit it was given in.
    /// The returned `bool` says whether the derived parameters are now stale.
    pub fn set(&mut self, field: ParamField, value: Quantity) -> Result<bool, ParamError> {
        self.validate(field, &value)?;
        debug!("Setting {field} to {value}");
        self.inputs.put(field, value);
        Ok(field.descriptor().affects_derivation)
    }

    /// Put back a value that was previously stored. Used to undo a write when
    /// something downstream of it fails.
    pub(crate) fn restore(&mut self, field: ParamField, previous: Quantity) {
        debug!("Restoring {field} to {previous}");
        self.inputs.put(field, previous);
    }

    /// Restore every parameter to its value after construction.
    pub fn reset(&mut self) {
        self.inputs = self.original_inputs;
    }
}

impl Default for Config {
    fn default() -> Self {
        let inputs = CalculationInput::default();
        Config {
            inputs,
            original_inputs: inputs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Unit;

    fn map(entries: &[(&str, Quantity)]) -> InputMap {
        entries
            .iter()
            .map(|(name, q)| (name.to_string(), *q))
            .collect()
    }

    #[test]
    fn test_empty_maps_give_defaults() {
        let config = Config::new(&InputMap::new(), &InputMap::new()).unwrap();
        assert_eq!(config.inputs(), &CalculationInput::default());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_supplied_values_are_merged_in_their_own_units() {
        let config = Config::new(
            &map(&[("obs_freq", Quantity::new(230_000.0, Unit::MHz))]),
            &map(&[("dish_radius", Quantity::new(2500.0, Unit::Centimetre))]),
        )
        .unwrap();
        let obs_freq = config.get(ParamField::ObsFreq);
        assert_eq!(obs_freq.unit(), Unit::MHz);
        assert_eq!(obs_freq.value(), 230_000.0);
        assert_eq!(
            config.get(ParamField::DishRadius),
            Quantity::new(2500.0, Unit::Centimetre)
        );
        assert_eq!(config.original_inputs(), config.inputs());
    }

    #[test]
    fn test_unknown_names_are_rejected_first() {
        // The bad value would also fail, but the name is checked first.
        let result = Config::new(
            &map(&[
                ("t_int", Quantity::new(-1.0, Unit::Second)),
                ("foo", Quantity::dimensionless(1.0)),
            ]),
            &InputMap::new(),
        );
        assert_eq!(
            result,
            Err(ParamError::UnknownParameter {
                name: "foo".to_string(),
                group: ParamGroup::UserInput
            })
        );

        // Right name, wrong group.
        let result = Config::new(
            &InputMap::new(),
            &map(&[("weather", Quantity::dimensionless(0.5))]),
        );
        assert!(matches!(result, Err(ParamError::UnknownParameter { .. })));
    }

    #[test]
    fn test_invalid_values_are_rejected_at_construction() {
        let result = Config::new(
            &map(&[("elevation", Quantity::new(10.0, Unit::Degree))]),
            &InputMap::new(),
        );
        assert!(matches!(result, Err(ParamError::OutOfRange { .. })));

        let result = Config::new(
            &InputMap::new(),
            &map(&[("T_amb", Quantity::new(270.0, Unit::Metre))]),
        );
        assert!(matches!(result, Err(ParamError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_set_reports_staleness() {
        let mut config = Config::default();
        assert_eq!(
            config.set(ParamField::TInt, Quantity::new(2.0, Unit::Hour)),
            Ok(false)
        );
        assert_eq!(
            config.set(ParamField::Weather, Quantity::dimensionless(0.5)),
            Ok(true)
        );
        assert_eq!(config.get(ParamField::TInt), Quantity::new(2.0, Unit::Hour));
    }

    #[test]
    fn test_failed_set_changes_nothing() {
        let mut config = Config::default();
        let before = *config.inputs();
        assert!(config
            .set(ParamField::NPol, Quantity::dimensionless(3.0))
            .is_err());
        assert!(config
            .set(ParamField::Bandwidth, Quantity::new(1.0, Unit::Kelvin))
            .is_err());
        assert_eq!(config.inputs(), &before);
    }

    #[test]
    fn test_validate_doesnt_store() {
        let config = Config::default();
        assert!(config
            .validate(ParamField::TInt, &Quantity::new(10.0, Unit::Minute))
            .is_ok());
        assert_eq!(config.get(ParamField::TInt), Quantity::new(100.0, Unit::Second));
    }

    #[test]
    fn test_reset_restores_construction_state() {
        let mut config = Config::new(
            &map(&[("n_pol", Quantity::dimensionless(1.0))]),
            &InputMap::new(),
        )
        .unwrap();
        let original = *config.inputs();

        config.set(ParamField::NPol, Quantity::dimensionless(2.0)).unwrap();
        config
            .set(ParamField::EtaBlock, Quantity::dimensionless(0.5))
            .unwrap();
        config.restore(ParamField::TInt, Quantity::new(1.0, Unit::Hour));
        assert_ne!(config.inputs(), &original);

        config.reset();
        assert_eq!(config.inputs(), &original);
        // Not the library defaults.
        assert_eq!(config.get(ParamField::NPol), Quantity::dimensionless(1.0));

        config.reset();
        assert_eq!(config.inputs(), &original);
        assert_eq!(config.original_inputs(), &original);
    }
}
