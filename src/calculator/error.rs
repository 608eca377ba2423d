// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors (and warnings) from the calculator.

use thiserror::Error;

use crate::{
    derived::DerivedError,
    params::{ParamError, ParamField},
    units::{Quantity, UnitError},
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculatorError {
    #[error(transparent)]
    Param(#[from] ParamError),

    #[error(transparent)]
    Derived(#[from] DerivedError),

    #[error(transparent)]
    Unit(#[from] UnitError),
}

/// A calculated value that couldn't be stored because it's outside the
/// permitted range of its parameter. This isn't fatal; the value is still
/// returned, but the calculator keeps its previous value.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("The calculated value {value:.4} is outside of the permitted range for parameter '{parameter}'. {reason} The Calculator will not be updated with the new value. Please adjust the input parameters and recalculate.")]
pub struct CalculatedValueInvalid {
    pub parameter: ParamField,
    pub value: Quantity,
    pub reason: ParamError,
}
