// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all atlast-sc-related errors. This should be the *only*
//! error enum that is publicly visible from the binary.

use thiserror::Error;

use crate::{
    atmosphere::AtmosphereError, calculator::CalculatorError, derived::DerivedError,
    params::ParamError, units::UnitError,
};

/// The *only* error the binary prints. Each category carries a hint on where
/// to look, unless it's "generic".
#[derive(Error, Debug)]
pub enum AtlastScError {
    /// A parameter was unknown, or its value unacceptable.
    #[error("{0}\n\nParameter names, units and ranges are listed in the help text of each subcommand (e.g. atlast-sc sensitivity --help).")]
    Parameter(String),

    /// A quantity couldn't be read or converted.
    #[error("{0}\n\nQuantities may be given with a unit, e.g. \"7.5 GHz\" or \"1h\"; a naked number uses the parameter's default unit.")]
    Unit(String),

    /// The derived parameters (atmosphere, temperatures, SEFD) couldn't be
    /// computed.
    #[error("{0}\n\nIf you don't know what this means, try turning up verbosity (-v or -vv) to see the derived parameters.")]
    Derivation(String),

    /// An unknown instrument name.
    #[error("{0}")]
    Instrument(String),

    /// An error related to argument files.
    #[error("{0}\n\nArgument files have [user_input] and [instrument_setup] tables, whose entries look like: obs_freq = {{ value = 100, unit = \"GHz\" }}")]
    ArgFile(String),

    /// An error writing the results file.
    #[error("{0}")]
    Output(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

impl From<CalculatorError> for AtlastScError {
    fn from(e: CalculatorError) -> Self {
        match e {
            CalculatorError::Param(e) => Self::from(e),
            CalculatorError::Derived(e) => Self::from(e),
            CalculatorError::Unit(e) => Self::from(e),
        }
    }
}

impl From<ParamError> for AtlastScError {
    fn from(e: ParamError) -> Self {
        Self::Parameter(e.to_string())
    }
}

impl From<DerivedError> for AtlastScError {
    fn from(e: DerivedError) -> Self {
        let s = e.to_string();
        match e {
            DerivedError::NotPositive { .. } => Self::Derivation(s),
            DerivedError::Atmosphere(e) => Self::from(e),
            DerivedError::Unit(e) => Self::from(e),
        }
    }
}

impl From<AtmosphereError> for AtlastScError {
    fn from(e: AtmosphereError) -> Self {
        let s = e.to_string();
        match e {
            AtmosphereError::BadElevation(_) | AtmosphereError::BadWeather(_) => {
                Self::Parameter(s)
            }
            AtmosphereError::Unit(e) => Self::from(e),
            AtmosphereError::TooFewFrequencies(_)
            | AtmosphereError::NotIncreasing { .. }
            | AtmosphereError::ShapeMismatch { .. } => Self::Derivation(s),
        }
    }
}

impl From<UnitError> for AtlastScError {
    fn from(e: UnitError) -> Self {
        Self::Unit(e.to_string())
    }
}

impl From<std::io::Error> for AtlastScError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
