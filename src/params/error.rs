// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with parameters.

use thiserror::Error;

use super::{ParamField, ParamGroup};
use crate::units::{Dimension, Quantity, Unit};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamError {
    #[error("\"{name}\" is not a valid {group} parameter")]
    UnknownParameter { name: String, group: ParamGroup },

    #[error("Parameter '{parameter}' must be a {expected}, but got the unit '{got}'")]
    DimensionMismatch {
        parameter: ParamField,
        expected: Dimension,
        got: Unit,
    },

    #[error("Parameter '{parameter}' must be within {allowed}, but got {value}.")]
    OutOfRange {
        parameter: ParamField,
        value: Quantity,
        allowed: String,
    },

    #[error("Parameter '{parameter}' must be {allowed}, but got {value}.")]
    NotAllowed {
        parameter: ParamField,
        value: Quantity,
        allowed: String,
    },
}

impl ParamError {
    /// The parameter this error is about, if it is a known one.
    pub fn parameter(&self) -> Option<ParamField> {
        match self {
            ParamError::UnknownParameter { .. } => None,
            ParamError::DimensionMismatch { parameter, .. }
            | ParamError::OutOfRange { parameter, .. }
            | ParamError::NotAllowed { parameter, .. } => Some(*parameter),
        }
    }

    /// Is this a complaint about the value itself (rather than its name or
    /// unit)?
    pub fn is_value_invalid(&self) -> bool {
        matches!(
            self,
            ParamError::OutOfRange { .. } | ParamError::NotAllowed { .. }
        )
    }
}
