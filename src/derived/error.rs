// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::{atmosphere::AtmosphereError, units::UnitError};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DerivedError {
    #[error("The derived {name} is {value}, which isn't a positive, finite number; check the instrument setup")]
    NotPositive { name: &'static str, value: f64 },

    #[error(transparent)]
    Atmosphere(#[from] AtmosphereError),

    #[error(transparent)]
    Unit(#[from] UnitError),
}
