// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Physical quantities (a value with a unit), and code to parse strings into
//! them.
//!
//! This is deliberately not a general unit-algebra library. Every [`Unit`]
//! belongs to exactly one [`Dimension`] and is a scaled version of that
//! dimension's base unit; conversions and arithmetic between quantities are
//! only allowed within a dimension. Anything fancier (e.g. flux density times
//! area) is done on plain SI `f64`s by the code that needs it.

mod error;

pub use error::UnitError;

use std::{cmp::Ordering, fmt, ops::Div, ops::Mul, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::{EnumMessage, IntoEnumIterator};
use strum_macros::{Display, EnumIter, EnumMessage, EnumString, IntoStaticStr};

use crate::constants::PI;

/// The physical dimension of a [`Unit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Dimension {
    #[strum(serialize = "frequency")]
    Frequency,

    #[strum(serialize = "time")]
    Time,

    #[strum(serialize = "flux density")]
    FluxDensity,

    #[strum(serialize = "temperature")]
    Temperature,

    #[strum(serialize = "length")]
    Length,

    #[strum(serialize = "angle")]
    Angle,

    #[strum(serialize = "dimensionless")]
    Dimensionless,
}

impl Dimension {
    /// The unit all other units of this dimension are scaled against.
    pub fn base_unit(self) -> Unit {
        match self {
            Dimension::Frequency => Unit::Hz,
            Dimension::Time => Unit::Second,
            Dimension::FluxDensity => Unit::Jansky,
            Dimension::Temperature => Unit::Kelvin,
            Dimension::Length => Unit::Metre,
            Dimension::Angle => Unit::Degree,
            Dimension::Dimensionless => Unit::Dimensionless,
        }
    }
}

/// All units understood by this crate. The strings are what users write in
/// input maps and arguments files; the `to_string` one is what gets displayed.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumIter,
    EnumMessage,
    EnumString,
    IntoStaticStr,
)]
pub enum Unit {
    #[strum(to_string = "Hz")]
    Hz,

    #[strum(to_string = "kHz")]
    KHz,

    #[strum(to_string = "MHz")]
    MHz,

    #[strum(to_string = "GHz")]
    GHz,

    #[strum(to_string = "s")]
    Second,

    #[strum(to_string = "min")]
    Minute,

    #[strum(to_string = "h")]
    Hour,

    #[strum(to_string = "uJy", serialize = "µJy")]
    MicroJansky,

    #[strum(to_string = "mJy")]
    MilliJansky,

    #[strum(to_string = "Jy")]
    Jansky,

    #[strum(to_string = "K")]
    Kelvin,

    #[strum(to_string = "um", serialize = "µm")]
    Micrometre,

    #[strum(to_string = "mm")]
    Millimetre,

    #[strum(to_string = "cm")]
    Centimetre,

    #[strum(to_string = "m")]
    Metre,

    #[strum(to_string = "deg")]
    Degree,

    #[strum(to_string = "rad")]
    Radian,

    #[default]
    #[strum(to_string = "", serialize = "dimensionless")]
    Dimensionless,
}

impl Unit {
    pub fn dimension(self) -> Dimension {
        match self {
            Unit::Hz | Unit::KHz | Unit::MHz | Unit::GHz => Dimension::Frequency,
            Unit::Second | Unit::Minute | Unit::Hour => Dimension::Time,
            Unit::MicroJansky | Unit::MilliJansky | Unit::Jansky => Dimension::FluxDensity,
            Unit::Kelvin => Dimension::Temperature,
            Unit::Micrometre | Unit::Millimetre | Unit::Centimetre | Unit::Metre => {
                Dimension::Length
            }
            Unit::Degree | Unit::Radian => Dimension::Angle,
            Unit::Dimensionless => Dimension::Dimensionless,
        }
    }

    /// Multiply a value in this unit by this factor to get the value in the
    /// dimension's base unit.
    pub fn scale(self) -> f64 {
        match self {
            Unit::Hz => 1.0,
            Unit::KHz => 1e3,
            Unit::MHz => 1e6,
            Unit::GHz => 1e9,
            Unit::Second => 1.0,
            Unit::Minute => 60.0,
            Unit::Hour => 3600.0,
            Unit::MicroJansky => 1e-6,
            Unit::MilliJansky => 1e-3,
            Unit::Jansky => 1.0,
            Unit::Kelvin => 1.0,
            Unit::Micrometre => 1e-6,
            Unit::Millimetre => 1e-3,
            Unit::Centimetre => 1e-2,
            Unit::Metre => 1.0,
            Unit::Degree => 1.0,
            Unit::Radian => 180.0 / PI,
            Unit::Dimensionless => 1.0,
        }
    }

    pub fn is_convertible_to(self, other: Unit) -> bool {
        self.dimension() == other.dimension()
    }
}

impl Serialize for Unit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let s: &'static str = self.into();
        serializer.serialize_str(s)
    }
}

impl<'de> Deserialize<'de> for Unit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Unit::from_str(s.trim())
            .map_err(|_| serde::de::Error::custom(UnitError::UnknownUnit(s.clone())))
    }
}

/// A physical value with a unit. In input maps and arguments files, this is
/// written as `{ value = 100, unit = "GHz" }`; a missing unit means
/// dimensionless.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    value: f64,

    #[serde(default)]
    unit: Unit,
}

impl Quantity {
    pub const fn new(value: f64, unit: Unit) -> Quantity {
        Quantity { value, unit }
    }

    pub const fn dimensionless(value: f64) -> Quantity {
        Quantity::new(value, Unit::Dimensionless)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn dimension(&self) -> Dimension {
        self.unit.dimension()
    }

    /// The value expressed in the base unit of this quantity's dimension.
    pub fn base_value(&self) -> f64 {
        self.value * self.unit.scale()
    }

    /// Convert to another unit of the same dimension.
    pub fn to(&self, unit: Unit) -> Result<Quantity, UnitError> {
        if !self.unit.is_convertible_to(unit) {
            return Err(UnitError::Incompatible {
                from: self.unit,
                to: unit,
            });
        }
        Ok(Quantity::new(self.base_value() / unit.scale(), unit))
    }

    /// Get the value of this quantity in another unit of the same dimension.
    pub fn value_in(&self, unit: Unit) -> Result<f64, UnitError> {
        self.to(unit).map(|q| q.value)
    }

    /// Add two quantities of the same dimension. The result has `self`'s unit.
    pub fn checked_add(&self, other: &Quantity) -> Result<Quantity, UnitError> {
        let other = other.to(self.unit)?;
        Ok(Quantity::new(self.value + other.value, self.unit))
    }

    /// Subtract two quantities of the same dimension. The result has `self`'s
    /// unit.
    pub fn checked_sub(&self, other: &Quantity) -> Result<Quantity, UnitError> {
        let other = other.to(self.unit)?;
        Ok(Quantity::new(self.value - other.value, self.unit))
    }

    /// Compare two quantities of the same dimension. `None` is returned in the
    /// `Ok` variant if either value is NaN.
    pub fn checked_cmp(&self, other: &Quantity) -> Result<Option<Ordering>, UnitError> {
        let other = other.to(self.unit)?;
        Ok(self.value.partial_cmp(&other.value))
    }

    /// Round the value to the given number of decimal places.
    pub fn round(&self, decimals: i32) -> Quantity {
        let factor = 10_f64.powi(decimals);
        Quantity::new((self.value * factor).round() / factor, self.unit)
    }
}

impl Mul<f64> for Quantity {
    type Output = Quantity;

    fn mul(self, rhs: f64) -> Quantity {
        Quantity::new(self.value * rhs, self.unit)
    }
}

impl Div<f64> for Quantity {
    type Output = Quantity;

    fn div(self, rhs: f64) -> Quantity {
        Quantity::new(self.value / rhs, self.unit)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.*}", p, self.value)?,
            None => write!(f, "{}", self.value)?,
        }
        if self.unit != Unit::Dimensionless {
            write!(f, " {}", self.unit)?;
        }
        Ok(())
    }
}

/// Parse a string that may have a unit attached to it, e.g. "7.5 GHz" or
/// "7.5GHz". A naked number is interpreted with `default_unit`. The parsed unit
/// must have the same dimension as `default_unit`.
pub fn parse_quantity(s: &str, default_unit: Unit) -> Result<Quantity, UnitError> {
    let dimension = default_unit.dimension();
    let trimmed = s.trim();

    // Try to parse a naked number.
    let maybe_number: Option<f64> = trimmed.parse().ok();
    if let Some(number) = maybe_number {
        return Ok(Quantity::new(number, default_unit));
    };

    // That didn't work; let's search over our supported units. A suffix
    // like "Hz" also matches "GHz", so only give up once every unit has been
    // tried.
    let mut matched_unit = None;
    let spellings = Unit::iter()
        .filter(|&u| u != Unit::Dimensionless)
        .flat_map(|u| u.get_serializations().iter().map(move |&s| (u, s)));
    for (unit, unit_str) in spellings {
        let Some(prefix) = trimmed.strip_suffix(unit_str) else {
            continue;
        };
        match prefix.trim().parse::<f64>() {
            Ok(number) => {
                if unit.dimension() != dimension {
                    return Err(UnitError::WrongDimension {
                        input: s.to_string(),
                        expected: dimension,
                        got: unit.dimension(),
                    });
                }
                return Ok(Quantity::new(number, unit));
            }
            Err(_) => matched_unit = Some(unit_str),
        }
    }

    // If we made it this far, we don't know how to parse the string.
    match matched_unit {
        Some(unit) => Err(UnitError::GotUnitButCantParse {
            input: s.to_string(),
            unit,
        }),
        None => Err(UnitError::Unknown {
            input: s.to_string(),
            dimension,
        }),
    }
}
