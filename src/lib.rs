// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Sensitivity and integration-time calculator for the Atacama Large Aperture
Submillimeter Telescope (AtLAST).

The [`Calculator`] is the entry point:

```
use atlast_sc::{Calculator, InputMap, Quantity, Unit};

let mut user_input = InputMap::new();
user_input.insert("bandwidth".to_string(), Quantity::new(7.5, Unit::GHz));
let mut calc = Calculator::new(&user_input, &InputMap::new()).unwrap();
let sensitivity = calc
    .calculate_sensitivity(Some(Quantity::new(1.0, Unit::Hour)), true)
    .unwrap();
assert_eq!(sensitivity.value.unit(), Unit::MicroJansky);
```
 */

pub mod atmosphere;
pub mod calculator;
mod cli;
pub mod config;
pub mod constants;
pub mod derived;
pub mod instruments;
pub mod params;
pub mod units;

// Re-exports.
pub use calculator::{
    CalculatedValue, CalculatedValueInvalid, Calculator, CalculatorError, CalculatorOptions,
};
pub use cli::{AtlastSc, AtlastScError};
pub use derived::DerivedParams;
pub use instruments::Instrument;
pub use params::{InputMap, ParamField};
pub use units::{Quantity, Unit};
