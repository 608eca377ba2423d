// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parameters derived from the calculation inputs.
//!
//! The chain is: atmosphere (opacity and temperature) → noise temperatures →
//! efficiencies → system-equivalent flux density (SEFD). In "finetune" mode,
//! the band is split into sub-channels aligned with the atmosphere model's
//! frequency grid, the SEFD is evaluated in each, and the per-channel noise is
//! combined into an effective SEFD for the whole band:
//!
//! SEFD = sqrt(bw / sum_i(bw_i / SEFD_i^2))

mod efficiencies;
mod error;
mod temperatures;
#[cfg(test)]
mod tests;

pub use efficiencies::Efficiencies;
pub use error::DerivedError;
pub use temperatures::{receiver_temperature, Temperatures};

use log::{debug, trace};
use serde::Serialize;
use vec1::Vec1;

use crate::{
    atmosphere::AtmosphereModel,
    constants::{JANSKY, K_B, PI},
    instruments::Instrument,
    params::{CalculationInput, UserInput},
    units::{Quantity, Unit},
};

/// Everything derived from a [`CalculationInput`]. This is always replaced as
/// a whole.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedParams {
    pub tau_atm: Quantity,
    #[serde(rename = "T_atm")]
    pub t_atm: Quantity,
    #[serde(rename = "T_rx")]
    pub t_rx: Quantity,
    pub eta_a: Quantity,
    pub eta_s: Quantity,
    #[serde(rename = "T_sys")]
    pub t_sys: Quantity,
    #[serde(rename = "T_sky")]
    pub t_sky: Quantity,
    pub sefd: Quantity,
}

/// Knobs that change how the derived parameters are computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DerivationOptions {
    /// Integrate the SEFD over sub-channels of the band.
    pub finetune: bool,

    /// An instrument whose known receiver temperatures take precedence over
    /// the generic receiver model.
    pub instrument: Option<Instrument>,
}

/// A slice of the observing band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubChannel {
    pub centre: Quantity,
    pub width: Quantity,
}

pub fn compute_derived_params(
    inputs: &CalculationInput,
    atmosphere: &dyn AtmosphereModel,
    options: DerivationOptions,
) -> Result<DerivedParams, DerivedError> {
    let user = &inputs.user_input;
    let setup = &inputs.instrument_setup;
    let weather = user.weather.value_in(Unit::Dimensionless)?;

    let eta = Efficiencies::new(user.obs_freq, setup)?;
    let tau_atm = atmosphere.tau_atm(user.obs_freq, weather, user.elevation)?;
    let t_atm = atmosphere.atmospheric_temperature(user.obs_freq, weather)?;
    let temps = Temperatures::new(
        user.obs_freq,
        setup,
        t_atm,
        tau_atm,
        receiver_override(options, user.obs_freq)?,
    )?;
    check_positive("system temperature", temps.t_sys)?;

    let channels = if options.finetune {
        sub_channels(user, atmosphere)?
    } else {
        None
    };
    let sefd_jy = match channels {
        Some(channels) => {
            debug!(
                "Finetuning the SEFD over {} sub-channels of the band",
                channels.len()
            );
            let bandwidth_hz = user.bandwidth.value_in(Unit::Hz)?;
            let mut inverse_sum = 0.0;
            for channel in &channels {
                let sefd =
                    channel_sefd_jy(channel.centre, inputs, atmosphere, eta.eta_a, options)?;
                trace!("Sub-channel at {:.3}: SEFD {sefd} Jy", channel.centre);
                inverse_sum += channel.width.value_in(Unit::Hz)? / (sefd * sefd);
            }
            (bandwidth_hz / inverse_sum).sqrt()
        }
        None => sefd_jy(temps.t_sys, eta.eta_a, setup.dish_radius.value_in(Unit::Metre)?),
    };
    check_positive("SEFD", sefd_jy)?;

    let derived = DerivedParams {
        tau_atm: Quantity::dimensionless(tau_atm),
        t_atm,
        t_rx: Quantity::new(temps.t_rx, Unit::Kelvin),
        eta_a: Quantity::dimensionless(eta.eta_a),
        eta_s: Quantity::dimensionless(eta.eta_s),
        t_sys: Quantity::new(temps.t_sys, Unit::Kelvin),
        t_sky: Quantity::new(temps.t_sky, Unit::Kelvin),
        sefd: Quantity::new(sefd_jy, Unit::Jansky),
    };
    debug!("Derived parameters: {derived:?}");
    Ok(derived)
}

/// Split the band of `user` into sub-channels whose edges are the atmosphere
/// model's grid frequencies strictly inside the band, padded with the band
/// edges. If the band contains fewer than 2 grid frequencies, there's nothing
/// to gain from splitting it, and `None` is returned.
pub fn sub_channels(
    user: &UserInput,
    atmosphere: &dyn AtmosphereModel,
) -> Result<Option<Vec1<SubChannel>>, DerivedError> {
    let obs_freq_ghz = user.obs_freq.value_in(Unit::GHz)?;
    let half_bandwidth_ghz = 0.5 * user.bandwidth.value_in(Unit::GHz)?;
    let low = obs_freq_ghz - half_bandwidth_ghz;
    let high = obs_freq_ghz + half_bandwidth_ghz;

    let interior = atmosphere.grid_points_within(low, high);
    if interior.len() < 2 {
        return Ok(None);
    }

    let mut edges = Vec::with_capacity(interior.len() + 2);
    edges.push(low);
    edges.extend(interior);
    edges.push(high);
    let channels = edges
        .windows(2)
        .map(|w| SubChannel {
            centre: Quantity::new(0.5 * (w[0] + w[1]), Unit::GHz),
            width: Quantity::new(w[1] - w[0], Unit::GHz),
        })
        .collect();
    // There are at least 4 edges, so at least 3 channels.
    Ok(Vec1::try_from_vec(channels).ok())
}

/// The SEFD \[Jy\] at a single frequency. The aperture efficiency is not
/// re-evaluated; `eta_a` is the band-centre value.
fn channel_sefd_jy(
    freq: Quantity,
    inputs: &CalculationInput,
    atmosphere: &dyn AtmosphereModel,
    eta_a: f64,
    options: DerivationOptions,
) -> Result<f64, DerivedError> {
    let user = &inputs.user_input;
    let setup = &inputs.instrument_setup;
    let weather = user.weather.value_in(Unit::Dimensionless)?;

    let tau_atm = atmosphere.tau_atm(freq, weather, user.elevation)?;
    let t_atm = atmosphere.atmospheric_temperature(freq, weather)?;
    let temps = Temperatures::new(
        freq,
        setup,
        t_atm,
        tau_atm,
        receiver_override(options, freq)?,
    )?;
    let sefd = sefd_jy(temps.t_sys, eta_a, setup.dish_radius.value_in(Unit::Metre)?);
    check_positive("sub-channel SEFD", sefd)?;
    Ok(sefd)
}

/// SEFD = 2 k_B T_sys / (eta_a A) \[Jy\]
fn sefd_jy(t_sys: f64, eta_a: f64, dish_radius_m: f64) -> f64 {
    let dish_area = PI * dish_radius_m * dish_radius_m;
    2.0 * K_B * t_sys / (eta_a * dish_area) / JANSKY
}

fn receiver_override(
    options: DerivationOptions,
    freq: Quantity,
) -> Result<Option<Quantity>, DerivedError> {
    match options.instrument {
        Some(instrument) => Ok(instrument.receiver_temperature(freq)?),
        None => Ok(None),
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), DerivedError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DerivedError::NotPositive { name, value })
    }
}
