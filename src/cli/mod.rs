// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Command-line interface code. More specific options for `atlast-sc`
//! subcommands are contained in modules.
//!
//! Only 3 things should be public in this module: `AtlastSc`, `AtlastSc::run`,
//! and `AtlastScError`.

#[macro_use]
mod common;
mod error;
mod instruments;
mod sensitivity;
mod t_int;

pub use error::AtlastScError;

use std::str::FromStr;

use clap::{AppSettings, Args, Parser, Subcommand};
use log::info;

use crate::{
    calculator::CalculatorOptions,
    instruments::{Instrument, INSTRUMENTS_COMMA_SEPARATED},
};

// Add build-time information from the "built" crate.
include!(concat!(env!("OUT_DIR"), "/built.rs"));

lazy_static::lazy_static! {
    static ref INSTRUMENT_HELP: String =
        format!("The instrument being used. Its receiver temperatures are used where known. Supported instruments: {}", *INSTRUMENTS_COMMA_SEPARATED);
}

#[derive(Debug, Parser)]
#[clap(
    version,
    author,
    about = r#"Sensitivity and integration-time calculator for the Atacama Large Aperture Submillimeter Telescope (AtLAST)"#
)]
#[clap(global_setting(AppSettings::DeriveDisplayOrder))]
#[clap(disable_help_subcommand = true)]
#[clap(arg_required_else_help = true)]
#[clap(infer_subcommands = true)]
#[clap(propagate_version = true)]
#[clap(infer_long_args = true)]
pub struct AtlastSc {
    #[clap(flatten)]
    global_opts: GlobalArgs,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// The verbosity of the program. Increase by specifying multiple times
    /// (e.g. -vv). The default is to print only high-level information.
    #[clap(short, long, parse(from_occurrences))]
    #[clap(global = true)]
    verbosity: u8,

    /// Integrate the SEFD over sub-channels of the band, following the
    /// atmosphere's variation with frequency. Slower, but more accurate for
    /// wide bands.
    #[clap(long)]
    #[clap(global = true)]
    finetune: bool,

    #[clap(long, help = INSTRUMENT_HELP.as_str())]
    #[clap(global = true)]
    instrument: Option<String>,
}

impl GlobalArgs {
    fn calculator_options(&self) -> Result<CalculatorOptions, AtlastScError> {
        let instrument = match &self.instrument {
            Some(s) => Some(Instrument::from_str(s).map_err(|_| {
                AtlastScError::Instrument(format!(
                    "Unrecognised instrument '{s}'. Supported instruments: {}",
                    *INSTRUMENTS_COMMA_SEPARATED
                ))
            })?),
            None => None,
        };
        Ok(CalculatorOptions {
            finetune: self.finetune,
            instrument,
            ..Default::default()
        })
    }
}

#[derive(Debug, Subcommand)]
#[clap(arg_required_else_help = true)]
enum Command {
    #[clap(about = "Calculate the sensitivity reached after an integration time.")]
    Sensitivity(sensitivity::SensitivityArgs),

    #[clap(alias = "integration-time")]
    #[clap(about = "Calculate the integration time needed to reach a sensitivity.")]
    TInt(t_int::TIntArgs),

    #[clap(about = "List the instruments that can observe with a frequency and bandwidth.")]
    Instruments(instruments::InstrumentsArgs),
}

impl AtlastSc {
    pub fn run(self) -> Result<(), AtlastScError> {
        // Set up logging.
        let AtlastSc {
            global_opts,
            command,
        } = self;
        setup_logging(global_opts.verbosity).expect("Failed to initialise logging.");

        // Print the version of atlast-sc and its build-time information.
        let sub_command = match &command {
            Command::Sensitivity(_) => "sensitivity",
            Command::TInt(_) => "t-int",
            Command::Instruments(_) => "instruments",
        };
        info!("atlast-sc {} {}", sub_command, env!("CARGO_PKG_VERSION"));
        display_build_info();

        let options = global_opts.calculator_options()?;
        match command {
            Command::Sensitivity(args) => args.run(options)?,
            Command::TInt(args) => args.run(options)?,
            Command::Instruments(args) => args.run(options)?,
        }

        info!("atlast-sc {} complete.", sub_command);
        Ok(())
    }
}

/// Activate a logger. All log messages are put onto `stdout`. `env_logger`
/// automatically only uses colours and fancy symbols if we're on a tty (e.g. a
/// terminal); piped output will be formatted sensibly. Source code lines are
/// displayed in log messages when verbosity >= 3.
fn setup_logging(verbosity: u8) -> Result<(), log::SetLoggerError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Stdout);
    builder.format_target(false);
    match verbosity {
        0 => builder.filter_level(log::LevelFilter::Info),
        1 => builder.filter_level(log::LevelFilter::Debug),
        2 => builder.filter_level(log::LevelFilter::Trace),
        _ => {
            builder.filter_level(log::LevelFilter::Trace);
            builder.format(|buf, record| {
                use std::io::Write;

                let timestamp = buf.timestamp();
                let level = record.level();
                let file = record.file().unwrap_or("<unknown>");
                let line = record.line().unwrap_or(0);
                let message = record.args();

                writeln!(buf, "[{timestamp} {level} {file}:{line}] {message}")
            })
        }
    };
    builder.try_init()
}

/// Write many info-level log lines of how this executable was compiled.
fn display_build_info() {
    let dirty = match GIT_DIRTY {
        Some(true) => " (dirty)",
        _ => "",
    };
    match GIT_COMMIT_HASH_SHORT {
        Some(hash) => {
            info!("Compiled on git commit hash: {hash}{dirty}");
        }
        None => info!("Compiled on git commit hash: <no git info>"),
    }
    if let Some(hr) = GIT_HEAD_REF {
        info!("            git head ref: {}", hr);
    }
    info!("            {}", BUILT_TIME_UTC);
    info!("         with compiler {}", RUSTC_VERSION);
    info!("");
}
