// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parameters that go into a sensitivity calculation.
//!
//! Every parameter is described statically by a [`ParamDescriptor`]: which
//! group it belongs to, its default value and unit, the values it may take,
//! and whether changing it invalidates the derived parameters (SEFD etc.).
//! All writes to parameters go through [`validate`].

mod error;
mod inputs;

pub use error::ParamError;
pub use inputs::{CalculationInput, InputMap, InstrumentSetup, UserInput};

use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::{
    constants::*,
    units::{Quantity, Unit},
};

/// Which part of the calculation input a parameter lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ParamGroup {
    #[strum(serialize = "user input")]
    UserInput,

    #[strum(serialize = "instrument setup")]
    InstrumentSetup,
}

/// Every parameter that can be supplied to the calculator. The strings are the
/// names used in input maps and arguments files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr)]
pub enum ParamField {
    #[strum(serialize = "t_int")]
    TInt,

    #[strum(serialize = "sensitivity")]
    Sensitivity,

    #[strum(serialize = "bandwidth")]
    Bandwidth,

    #[strum(serialize = "obs_freq")]
    ObsFreq,

    #[strum(serialize = "n_pol")]
    NPol,

    #[strum(serialize = "weather")]
    Weather,

    #[strum(serialize = "elevation")]
    Elevation,

    #[strum(serialize = "dish_radius")]
    DishRadius,

    #[strum(serialize = "surface_rms")]
    SurfaceRms,

    #[strum(serialize = "T_amb")]
    TAmb,

    #[strum(serialize = "T_cmb")]
    TCmb,

    #[strum(serialize = "g")]
    G,

    #[strum(serialize = "eta_eff")]
    EtaEff,

    #[strum(serialize = "eta_ill")]
    EtaIll,

    #[strum(serialize = "eta_spill")]
    EtaSpill,

    #[strum(serialize = "eta_block")]
    EtaBlock,

    #[strum(serialize = "eta_pol")]
    EtaPol,
}

/// One end of a permitted range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Inclusive(f64),
    Exclusive(f64),
    Unbounded,
}

/// The values a parameter may take, expressed in the unit of the parameter's
/// default value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Allowed {
    Range { lower: Bound, upper: Bound },
    Values(&'static [f64]),
}

impl Allowed {
    const fn closed(lower: f64, upper: f64) -> Allowed {
        Allowed::Range {
            lower: Bound::Inclusive(lower),
            upper: Bound::Inclusive(upper),
        }
    }

    /// An efficiency or similar: greater than 0 and at most 1.
    const UNIT_FRACTION: Allowed = Allowed::Range {
        lower: Bound::Exclusive(0.0),
        upper: Bound::Inclusive(1.0),
    };

    pub fn contains(&self, value: f64) -> bool {
        match self {
            Allowed::Range { lower, upper } => {
                let above = match *lower {
                    Bound::Inclusive(l) => value >= l,
                    Bound::Exclusive(l) => value > l,
                    Bound::Unbounded => true,
                };
                let below = match *upper {
                    Bound::Inclusive(u) => value <= u,
                    Bound::Exclusive(u) => value < u,
                    Bound::Unbounded => true,
                };
                !value.is_nan() && above && below
            }
            Allowed::Values(values) => values.iter().any(|&v| v == value),
        }
    }

    /// A human-readable description, e.g. "[1 s, 100000000 s]" or
    /// "(0 mJy, inf)".
    pub fn describe(&self, unit: Unit) -> String {
        let with_unit = |v: f64| Quantity::new(v, unit).to_string();
        match self {
            Allowed::Range { lower, upper } => {
                let lower = match *lower {
                    Bound::Inclusive(l) => format!("[{}", with_unit(l)),
                    Bound::Exclusive(l) => format!("({}", with_unit(l)),
                    Bound::Unbounded => "(-inf".to_string(),
                };
                let upper = match *upper {
                    Bound::Inclusive(u) => format!("{}]", with_unit(u)),
                    Bound::Exclusive(u) => format!("{})", with_unit(u)),
                    Bound::Unbounded => "inf)".to_string(),
                };
                format!("{lower}, {upper}")
            }
            Allowed::Values(values) => {
                let values: Vec<String> = values.iter().map(|&v| with_unit(v)).collect();
                format!("one of {{{}}}", values.join(", "))
            }
        }
    }
}

/// Static information on a parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    pub group: ParamGroup,

    /// The value used when the user doesn't supply one. Its unit defines the
    /// parameter's dimension and the unit of `allowed`.
    pub default: Quantity,

    pub allowed: Allowed,

    /// Does changing this parameter change the derived parameters?
    pub affects_derivation: bool,
}

impl ParamField {
    pub fn descriptor(self) -> ParamDescriptor {
        use ParamGroup::{InstrumentSetup as Is, UserInput as Ui};

        let (group, default, allowed, affects_derivation) = match self {
            ParamField::TInt => (
                Ui,
                Quantity::new(DEFAULT_T_INT_S, Unit::Second),
                Allowed::closed(1.0, 1e8),
                false,
            ),
            ParamField::Sensitivity => (
                Ui,
                Quantity::new(DEFAULT_SENSITIVITY_MJY, Unit::MilliJansky),
                Allowed::Range {
                    lower: Bound::Exclusive(0.0),
                    upper: Bound::Unbounded,
                },
                false,
            ),
            ParamField::Bandwidth => (
                Ui,
                Quantity::new(DEFAULT_BANDWIDTH_MHZ, Unit::MHz),
                Allowed::Range {
                    lower: Bound::Exclusive(0.0),
                    upper: Bound::Inclusive(1e5),
                },
                true,
            ),
            ParamField::ObsFreq => (
                Ui,
                Quantity::new(DEFAULT_OBS_FREQ_GHZ, Unit::GHz),
                Allowed::closed(35.0, 950.0),
                true,
            ),
            ParamField::NPol => (
                Ui,
                Quantity::dimensionless(DEFAULT_N_POL),
                Allowed::Values(&[1.0, 2.0]),
                false,
            ),
            ParamField::Weather => (
                Ui,
                Quantity::dimensionless(DEFAULT_WEATHER),
                Allowed::closed(0.0, 1.0),
                true,
            ),
            ParamField::Elevation => (
                Ui,
                Quantity::new(DEFAULT_ELEVATION_DEG, Unit::Degree),
                Allowed::closed(25.0, 85.0),
                true,
            ),
            ParamField::DishRadius => (
                Is,
                Quantity::new(DEFAULT_DISH_RADIUS_M, Unit::Metre),
                Allowed::closed(1.0, 100.0),
                true,
            ),
            ParamField::SurfaceRms => (
                Is,
                Quantity::new(DEFAULT_SURFACE_RMS_UM, Unit::Micrometre),
                Allowed::closed(0.0, 100.0),
                true,
            ),
            ParamField::TAmb => (
                Is,
                Quantity::new(DEFAULT_T_AMB_K, Unit::Kelvin),
                Allowed::closed(200.0, 330.0),
                true,
            ),
            ParamField::TCmb => (
                Is,
                Quantity::new(T_CMB_K, Unit::Kelvin),
                Allowed::closed(0.0, 10.0),
                true,
            ),
            // The sideband ratio feeds the system temperature.
            ParamField::G => (
                Is,
                Quantity::dimensionless(DEFAULT_G),
                Allowed::closed(0.0, 1.0),
                true,
            ),
            ParamField::EtaEff => (
                Is,
                Quantity::dimensionless(DEFAULT_ETA_EFF),
                Allowed::UNIT_FRACTION,
                true,
            ),
            ParamField::EtaIll => (
                Is,
                Quantity::dimensionless(DEFAULT_ETA_ILL),
                Allowed::UNIT_FRACTION,
                true,
            ),
            ParamField::EtaSpill => (
                Is,
                Quantity::dimensionless(DEFAULT_ETA_SPILL),
                Allowed::UNIT_FRACTION,
                true,
            ),
            ParamField::EtaBlock => (
                Is,
                Quantity::dimensionless(DEFAULT_ETA_BLOCK),
                Allowed::UNIT_FRACTION,
                true,
            ),
            ParamField::EtaPol => (
                Is,
                Quantity::dimensionless(DEFAULT_ETA_POL),
                Allowed::UNIT_FRACTION,
                true,
            ),
        };

        ParamDescriptor {
            group,
            default,
            allowed,
            affects_derivation,
        }
    }

    pub fn group(self) -> ParamGroup {
        self.descriptor().group
    }

    pub fn name(self) -> &'static str {
        self.into()
    }

    /// All parameters belonging to `group`.
    pub fn in_group(group: ParamGroup) -> impl Iterator<Item = ParamField> {
        ParamField::iter().filter(move |f| f.group() == group)
    }

    /// Find the parameter called `name` in `group`. This is the only way
    /// user-supplied names are turned into parameters.
    pub fn lookup(name: &str, group: ParamGroup) -> Result<ParamField, ParamError> {
        match name.parse::<ParamField>() {
            Ok(field) if field.group() == group => Ok(field),
            _ => Err(ParamError::UnknownParameter {
                name: name.to_string(),
                group,
            }),
        }
    }
}

/// Check that `value` is acceptable for `field`: it must have the right
/// dimension and be within the permitted values. Nothing is modified.
pub fn validate(field: ParamField, value: &Quantity) -> Result<(), ParamError> {
    let descriptor = field.descriptor();
    let unit = descriptor.default.unit();
    let v = value
        .value_in(unit)
        .map_err(|_| ParamError::DimensionMismatch {
            parameter: field,
            expected: unit.dimension(),
            got: value.unit(),
        })?;

    if descriptor.allowed.contains(v) {
        return Ok(());
    }
    let allowed = descriptor.allowed.describe(unit);
    match descriptor.allowed {
        Allowed::Range { .. } => Err(ParamError::OutOfRange {
            parameter: field,
            value: *value,
            allowed,
        }),
        Allowed::Values(_) => Err(ParamError::NotAllowed {
            parameter: field,
            value: *value,
            allowed,
        }),
    }
}
