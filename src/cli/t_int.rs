// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::Parser;
use log::debug;

use super::{
    common::{
        derived_lines, display_warnings, field_help, input_lines, warn_if_not_applicable,
        warn_if_not_stored, write_output, CalculationArgs, CalculationReport, InfoPrinter,
    },
    AtlastScError,
};
use crate::{
    calculator::{Calculator, CalculatorOptions},
    params::ParamField,
};

lazy_static::lazy_static! {
    static ref SENSITIVITY_HELP: String = field_help("The target sensitivity", ParamField::Sensitivity);
}

#[derive(Parser, Debug, Clone, Default)]
pub(super) struct TIntArgs {
    #[clap(flatten)]
    calc_args: CalculationArgs,

    #[clap(long, help = SENSITIVITY_HELP.as_str(), help_heading = "USER INPUT")]
    sensitivity: Option<String>,
}

impl TIntArgs {
    pub(super) fn run(self, options: CalculatorOptions) -> Result<(), AtlastScError> {
        debug!("{:#?}", self);

        let TIntArgs {
            calc_args,
            sensitivity,
        } = self;
        let request = calc_args.parse(&[(ParamField::Sensitivity, sensitivity)])?;
        let mut calc =
            Calculator::with_options(&request.user_input, &request.instrument_setup, options)?;
        warn_if_not_applicable(&calc)?;

        let result = calc.calculate_t_integration(None, true)?;
        warn_if_not_stored(&result, &calc);
        display_warnings();

        let mut printer = InfoPrinter::new("Integration time".into());
        printer.push_line(
            format!(
                "{:.4} to reach a sensitivity of {}",
                result.value,
                calc.sensitivity()
            )
            .into(),
        );
        printer.push_block(input_lines(&calc));
        printer.push_block(derived_lines(&calc));
        printer.display();

        if let Some(output) = request.output {
            write_output(
                &output,
                &CalculationReport::new(ParamField::TInt, result.value, &calc),
            )?;
        }

        Ok(())
    }
}
