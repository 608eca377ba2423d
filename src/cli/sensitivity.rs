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
    static ref T_INT_HELP: String = field_help("The integration time", ParamField::TInt);
}

#[derive(Parser, Debug, Clone, Default)]
pub(super) struct SensitivityArgs {
    #[clap(flatten)]
    calc_args: CalculationArgs,

    #[clap(long, help = T_INT_HELP.as_str(), help_heading = "USER INPUT")]
    t_int: Option<String>,
}

impl SensitivityArgs {
    pub(super) fn run(self, options: CalculatorOptions) -> Result<(), AtlastScError> {
        debug!("{:#?}", self);

        let SensitivityArgs { calc_args, t_int } = self;
        let request = calc_args.parse(&[(ParamField::TInt, t_int)])?;
        let mut calc =
            Calculator::with_options(&request.user_input, &request.instrument_setup, options)?;
        warn_if_not_applicable(&calc)?;

        let result = calc.calculate_sensitivity(None, true)?;
        warn_if_not_stored(&result, &calc);
        display_warnings();

        let mut printer = InfoPrinter::new("Sensitivity".into());
        printer.push_line(
            format!(
                "{:.4} after {} of integration",
                result.value,
                calc.t_int()
            )
            .into(),
        );
        printer.push_block(input_lines(&calc));
        printer.push_block(derived_lines(&calc));
        printer.display();

        if let Some(output) = request.output {
            write_output(
                &output,
                &CalculationReport::new(ParamField::Sensitivity, result.value, &calc),
            )?;
        }

        Ok(())
    }
}
