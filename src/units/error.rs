// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use super::{Dimension, Unit};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    #[error("'{0}' is not a recognised unit")]
    UnknownUnit(String),

    #[error("Cannot convert '{from}' ({}) to '{to}' ({})", .from.dimension(), .to.dimension())]
    Incompatible { from: Unit, to: Unit },

    #[error(
        "Successfully parsed the unit '{unit}', but could not parse the numerical component of '{input}'"
    )]
    GotUnitButCantParse { input: String, unit: &'static str },

    #[error("'{input}' has a unit of {got}, but a {expected} was expected")]
    WrongDimension {
        input: String,
        expected: Dimension,
        got: Dimension,
    },

    #[error("Could not parse '{input}' as a {dimension}")]
    Unknown { input: String, dimension: Dimension },
}
