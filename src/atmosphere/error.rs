// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with atmosphere models.

use thiserror::Error;

use crate::units::UnitError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AtmosphereError {
    #[error("An atmosphere table needs at least 2 frequencies, but got {0}")]
    TooFewFrequencies(usize),

    #[error("The atmosphere table's {what} nodes must be strictly increasing, but aren't at index {index}")]
    NotIncreasing { what: &'static str, index: usize },

    #[error("An atmosphere table has shape {got:?}, but ({}, {}) was expected", .expected.0, .expected.1)]
    ShapeMismatch {
        got: (usize, usize),
        expected: (usize, usize),
    },

    #[error("Elevation {0} deg is not above the horizon")]
    BadElevation(f64),

    #[error("Weather value {0} is not a number")]
    BadWeather(f64),

    #[error(transparent)]
    Unit(#[from] UnitError),
}
