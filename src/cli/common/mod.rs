// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Common arguments for command-line interfaces. All `atlast-sc` subcommands
//! take the same calculation inputs (from an arguments file and/or flags), so
//! they're shared here.

mod printers;

pub(super) use printers::{display_warnings, InfoPrinter};

use printers::Warn;

use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};

use clap::Parser;
use itertools::Itertools;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use super::AtlastScError;
use crate::{
    calculator::{CalculatedValue, CalculatedValueInvalid, Calculator},
    derived::DerivedParams,
    instruments::Instrument,
    params::{CalculationInput, InputMap, ParamField, ParamGroup},
    units::{parse_quantity, Quantity},
};

lazy_static::lazy_static! {
    pub(super) static ref ARG_FILE_TYPES_COMMA_SEPARATED: String = ArgFileTypes::iter().join(", ");

    pub(super) static ref ARG_FILE_HELP: String =
        format!("Calculation inputs may be specified in a file. Any CLI arguments override arguments set in the file. Supported formats: {}", *ARG_FILE_TYPES_COMMA_SEPARATED);

    pub(super) static ref OUTPUT_HELP: String =
        format!("Write the inputs, derived parameters and result to this file. Supported formats: {}", *ARG_FILE_TYPES_COMMA_SEPARATED);

    static ref OBS_FREQ_HELP: String = field_help("The observing frequency", ParamField::ObsFreq);

    static ref BANDWIDTH_HELP: String = field_help("The observing bandwidth", ParamField::Bandwidth);

    static ref N_POL_HELP: String = field_help("The number of polarisations", ParamField::NPol);

    static ref WEATHER_HELP: String = field_help("The weather quality; 0 is the best, 1 the worst", ParamField::Weather);

    static ref ELEVATION_HELP: String = field_help("The source elevation", ParamField::Elevation);

    static ref DISH_RADIUS_HELP: String = field_help("The dish radius", ParamField::DishRadius);

    static ref SURFACE_RMS_HELP: String = field_help("The RMS of the dish surface errors", ParamField::SurfaceRms);
}

/// Help text for a calculation input, including its default and its permitted
/// values.
pub(super) fn field_help(description: &str, field: ParamField) -> String {
    let descriptor = field.descriptor();
    let unit = descriptor.default.unit();
    format!(
        "{description}. Default: {}. Allowed: {}",
        descriptor.default,
        descriptor.allowed.describe(unit)
    )
}

#[derive(Debug, Display, EnumIter, EnumString)]
pub(super) enum ArgFileTypes {
    #[strum(serialize = "toml")]
    Toml,
    #[strum(serialize = "json")]
    Json,
    #[strum(serialize = "yaml")]
    Yaml,
}

impl ArgFileTypes {
    fn from_path(path: &Path) -> Option<ArgFileTypes> {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| match e.as_str() {
                "yml" => Some(ArgFileTypes::Yaml),
                e => e.parse().ok(),
            })
    }
}

macro_rules! unpack_arg_file {
    ($arg_file:expr) => ({
        use std::fs::read_to_string;

        use crate::cli::common::{ArgFileTypes, ARG_FILE_TYPES_COMMA_SEPARATED};

        debug!("Attempting to parse argument file {}", $arg_file.display());

        match ArgFileTypes::from_path(&$arg_file) {
            Some(ArgFileTypes::Toml) => {
                debug!("Parsing toml file...");
                let contents = read_to_string(&$arg_file)?;
                match toml::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(AtlastScError::ArgFile(format!(
                            "Couldn't decode toml structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }
            Some(ArgFileTypes::Json) => {
                debug!("Parsing json file...");
                let contents = read_to_string(&$arg_file)?;
                match serde_json::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(AtlastScError::ArgFile(format!(
                            "Couldn't decode json structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }
            Some(ArgFileTypes::Yaml) => {
                debug!("Parsing yaml file...");
                let contents = read_to_string(&$arg_file)?;
                match serde_yaml::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(AtlastScError::ArgFile(format!(
                            "Couldn't decode yaml structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }

            None => {
                return Err(AtlastScError::ArgFile(format!(
                    "Argument file '{:?}' doesn't have a recognised file extension! Valid extensions are: {}", $arg_file, *ARG_FILE_TYPES_COMMA_SEPARATED)
                ))
            }
        }
    });
}

/// The contents of an arguments file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct ArgsFile {
    #[serde(default)]
    pub(super) user_input: InputMap,

    #[serde(default)]
    pub(super) instrument_setup: InputMap,
}

/// Calculation inputs shared by all subcommands. Quantities may be given with
/// a unit (e.g. "7.5GHz"); a naked number uses the parameter's default unit.
#[derive(Parser, Debug, Clone, Default)]
pub(super) struct CalculationArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(long, help = OBS_FREQ_HELP.as_str(), help_heading = "USER INPUT")]
    pub(super) obs_freq: Option<String>,

    #[clap(long, help = BANDWIDTH_HELP.as_str(), help_heading = "USER INPUT")]
    pub(super) bandwidth: Option<String>,

    #[clap(long, help = N_POL_HELP.as_str(), help_heading = "USER INPUT")]
    pub(super) n_pol: Option<String>,

    #[clap(long, help = WEATHER_HELP.as_str(), help_heading = "USER INPUT")]
    pub(super) weather: Option<String>,

    #[clap(long, help = ELEVATION_HELP.as_str(), help_heading = "USER INPUT")]
    pub(super) elevation: Option<String>,

    #[clap(long, help = DISH_RADIUS_HELP.as_str(), help_heading = "INSTRUMENT SETUP")]
    pub(super) dish_radius: Option<String>,

    #[clap(long, help = SURFACE_RMS_HELP.as_str(), help_heading = "INSTRUMENT SETUP")]
    pub(super) surface_rms: Option<String>,

    #[clap(short, long, help = OUTPUT_HELP.as_str(), help_heading = "OUTPUT FILES", parse(from_os_str))]
    pub(super) output: Option<PathBuf>,
}

/// Calculation inputs after the arguments file and flags have been merged.
#[derive(Debug, Default)]
pub(super) struct CalculationRequest {
    pub(super) user_input: InputMap,
    pub(super) instrument_setup: InputMap,
    pub(super) output: Option<PathBuf>,
}

impl CalculationArgs {
    /// Read the arguments file (if any), then override its entries with any
    /// flags that were given. `extra` holds subcommand-specific flags.
    ///
    /// Names aren't checked here; that's left to the calculator.
    pub(super) fn parse(
        self,
        extra: &[(ParamField, Option<String>)],
    ) -> Result<CalculationRequest, AtlastScError> {
        let CalculationArgs {
            args_file,
            obs_freq,
            bandwidth,
            n_pol,
            weather,
            elevation,
            dish_radius,
            surface_rms,
            output,
        } = self;

        let ArgsFile {
            mut user_input,
            mut instrument_setup,
        } = match args_file {
            Some(arg_file) => unpack_arg_file!(arg_file),
            None => ArgsFile::default(),
        };

        let flags = [
            (ParamField::ObsFreq, obs_freq),
            (ParamField::Bandwidth, bandwidth),
            (ParamField::NPol, n_pol),
            (ParamField::Weather, weather),
            (ParamField::Elevation, elevation),
            (ParamField::DishRadius, dish_radius),
            (ParamField::SurfaceRms, surface_rms),
        ];
        for (field, value) in flags.into_iter().chain(extra.iter().cloned()) {
            let Some(value) = value else {
                continue;
            };
            let quantity = parse_quantity(&value, field.descriptor().default.unit())?;
            debug!("Command-line argument {field} = {quantity}");
            let map = match field.group() {
                ParamGroup::UserInput => &mut user_input,
                ParamGroup::InstrumentSetup => &mut instrument_setup,
            };
            map.insert(field.name().to_string(), quantity);
        }
        trace!("User input: {user_input:?}");
        trace!("Instrument setup: {instrument_setup:?}");

        Ok(CalculationRequest {
            user_input,
            instrument_setup,
            output,
        })
    }
}

/// What gets written to an output file.
#[derive(Debug, Serialize)]
pub(super) struct CalculationReport<'a> {
    pub(super) calculated: &'static str,
    pub(super) finetune: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) instrument: Option<Instrument>,
    pub(super) result: Quantity,
    pub(super) inputs: &'a CalculationInput,
    pub(super) derived: &'a DerivedParams,
}

impl<'a> CalculationReport<'a> {
    pub(super) fn new(
        calculated: ParamField,
        result: Quantity,
        calc: &'a Calculator,
    ) -> CalculationReport<'a> {
        CalculationReport {
            calculated: calculated.name(),
            finetune: calc.options().finetune,
            instrument: calc.options().instrument,
            result,
            inputs: calc.calculation_inputs(),
            derived: calc.derived(),
        }
    }
}

/// Serialise `contents` into `path`, choosing the format from the file
/// extension.
pub(super) fn write_output<T: Serialize>(path: &Path, contents: &T) -> Result<(), AtlastScError> {
    let serialised = match ArgFileTypes::from_path(path) {
        Some(ArgFileTypes::Toml) => {
            toml::to_string(contents).map_err(|e| AtlastScError::Output(e.to_string()))?
        }
        Some(ArgFileTypes::Json) => serde_json::to_string_pretty(contents)
            .map_err(|e| AtlastScError::Output(e.to_string()))?,
        Some(ArgFileTypes::Yaml) => {
            serde_yaml::to_string(contents).map_err(|e| AtlastScError::Output(e.to_string()))?
        }
        None => {
            return Err(AtlastScError::Output(format!(
                "Output file '{}' doesn't have a recognised file extension! Valid extensions are: {}",
                path.display(),
                *ARG_FILE_TYPES_COMMA_SEPARATED
            )))
        }
    };
    std::fs::write(path, serialised)?;
    debug!("Wrote {}", path.display());
    Ok(())
}

/// Lines describing the calculation inputs, for an [`InfoPrinter`].
pub(super) fn input_lines(calc: &Calculator) -> Vec<Cow<'static, str>> {
    let mut lines: Vec<Cow<'static, str>> = vec!["Inputs".into()];
    for field in ParamField::iter() {
        lines.push(format!("  {field}: {}", calc.get(field)).into());
    }
    lines
}

/// Lines describing the derived parameters, for an [`InfoPrinter`].
pub(super) fn derived_lines(calc: &Calculator) -> Vec<Cow<'static, str>> {
    let DerivedParams {
        tau_atm,
        t_atm,
        t_rx,
        eta_a,
        eta_s,
        t_sys,
        t_sky,
        sefd,
    } = calc.derived();
    vec![
        "Derived parameters".into(),
        format!("  tau_atm: {tau_atm:.4}").into(),
        format!("  T_atm: {t_atm:.2}").into(),
        format!("  T_rx: {t_rx:.2}").into(),
        format!("  T_sky: {t_sky:.2}").into(),
        format!("  T_sys: {t_sys:.2}").into(),
        format!("  eta_a: {eta_a:.4}").into(),
        format!("  eta_s: {eta_s:.4}").into(),
        format!("  SEFD: {sefd:.2}").into(),
    ]
}

/// Queue a warning if the chosen instrument can't observe with the current
/// frequency and bandwidth.
pub(super) fn warn_if_not_applicable(calc: &Calculator) -> Result<(), AtlastScError> {
    if let Some(instrument) = calc.options().instrument {
        let applicable = calc.find_applicable_instruments()?;
        if !applicable.contains(&instrument) {
            format!(
                "The instrument '{instrument}' doesn't cover an observing frequency of {} with a bandwidth of {}",
                calc.obs_freq(),
                calc.bandwidth()
            )
            .warn();
        }
    }
    Ok(())
}

/// The warning lines for a calculated value the calculator refused to store.
/// `stored` is the value it kept.
pub(super) fn rejected_value_lines(
    rejected: &CalculatedValueInvalid,
    stored: Quantity,
) -> Vec<Cow<'static, str>> {
    vec![
        format!(
            "The calculated {} of {:.4} was not stored",
            rejected.parameter, rejected.value
        )
        .into(),
        format!("  {}", rejected.reason).into(),
        format!("  The reported inputs keep {}: {stored}", rejected.parameter).into(),
    ]
}

/// Queue a warning block if `result` couldn't be stored in `calc`.
pub(super) fn warn_if_not_stored(result: &CalculatedValue, calc: &Calculator) {
    if let Some(rejected) = &result.warning {
        rejected_value_lines(rejected, calc.get(rejected.parameter)).warn();
    }
}
