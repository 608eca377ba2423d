// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::borrow::Cow;

use clap::Parser;
use itertools::Itertools;
use log::{debug, info};
use serde::Serialize;
use strum::IntoEnumIterator;

use super::{
    common::{write_output, CalculationArgs, InfoPrinter},
    AtlastScError,
};
use crate::{
    calculator::{Calculator, CalculatorOptions},
    instruments::{CoverageTable, Instrument, Range},
    units::Quantity,
};

#[derive(Parser, Debug, Clone, Default)]
pub(super) struct InstrumentsArgs {
    #[clap(flatten)]
    calc_args: CalculationArgs,

    /// Also print the frequency and bandwidth coverage of every instrument.
    #[clap(long)]
    all: bool,
}

#[derive(Debug, Serialize)]
struct ApplicableInstruments {
    obs_freq: Quantity,
    bandwidth: Quantity,
    instruments: Vec<Instrument>,
}

fn ranges(list: &[Range]) -> String {
    list.iter()
        .map(|(low, high)| format!("({low}, {high})"))
        .join(", ")
}

impl InstrumentsArgs {
    pub(super) fn run(self, options: CalculatorOptions) -> Result<(), AtlastScError> {
        debug!("{:#?}", self);

        let InstrumentsArgs { calc_args, all } = self;
        let request = calc_args.parse(&[])?;
        let calc =
            Calculator::with_options(&request.user_input, &request.instrument_setup, options)?;
        let applicable = calc.find_applicable_instruments()?;

        if all {
            let table = CoverageTable::default_table();
            let mut printer = InfoPrinter::new("Instrument coverage".into());
            for instrument in Instrument::iter() {
                let mut block: Vec<Cow<'static, str>> = vec![instrument.to_string().into()];
                match table.coverage(instrument) {
                    Some(coverage) => {
                        block.push(
                            format!("  frequencies: {} GHz", ranges(&coverage.frequency_ghz))
                                .into(),
                        );
                        block.push(
                            format!("  bandwidths: {} MHz", ranges(&coverage.bandwidth_mhz))
                                .into(),
                        );
                    }
                    None => block.push("  no coverage".into()),
                }
                printer.push_block(block);
            }
            printer.display();
        }

        if applicable.is_empty() {
            info!(
                "No instruments cover an observing frequency of {} with a bandwidth of {}",
                calc.obs_freq(),
                calc.bandwidth()
            );
        } else {
            let mut printer = InfoPrinter::new(
                format!(
                    "Instruments covering {} with a bandwidth of {}",
                    calc.obs_freq(),
                    calc.bandwidth()
                )
                .into(),
            );
            for instrument in &applicable {
                printer.push_line(instrument.to_string().into());
            }
            printer.display();
        }

        if let Some(output) = request.output {
            write_output(
                &output,
                &ApplicableInstruments {
                    obs_freq: calc.obs_freq(),
                    bandwidth: calc.bandwidth(),
                    instruments: applicable,
                },
            )?;
        }

        Ok(())
    }
}
