// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::{assert_abs_diff_eq, assert_relative_eq};

use super::*;
use crate::{
    atmosphere::{AtmosphereError, TabulatedAtmosphere},
    constants::{H, VEL_C},
    params::InstrumentSetup,
};

/// An atmosphere with the same opacity and temperature at every frequency.
struct FlatAtmosphere {
    tau_zenith: f64,
    t_atm: f64,
    grid: Vec<f64>,
}

impl FlatAtmosphere {
    fn new(tau_zenith: f64, t_atm: f64) -> FlatAtmosphere {
        FlatAtmosphere {
            tau_zenith,
            t_atm,
            grid: (30..=1000).map(f64::from).collect(),
        }
    }
}

impl AtmosphereModel for FlatAtmosphere {
    fn tau_atm(
        &self,
        _freq: Quantity,
        _weather: f64,
        elevation: Quantity,
    ) -> Result<f64, AtmosphereError> {
        let elevation = elevation.value_in(Unit::Degree)?.to_radians();
        Ok(self.tau_zenith / elevation.sin())
    }

    fn atmospheric_temperature(
        &self,
        _freq: Quantity,
        _weather: f64,
    ) -> Result<Quantity, AtmosphereError> {
        Ok(Quantity::new(self.t_atm, Unit::Kelvin))
    }

    fn frequency_grid(&self) -> &[f64] {
        &self.grid
    }
}

fn wide_band() -> CalculationInput {
    let mut inputs = CalculationInput::default();
    inputs.user_input.obs_freq = Quantity::new(100.0, Unit::GHz);
    inputs.user_input.bandwidth = Quantity::new(7.5, Unit::GHz);
    inputs
}

#[test]
fn test_efficiencies() {
    let setup = InstrumentSetup::default();
    let eta = Efficiencies::new(Quantity::new(100.0, Unit::GHz), &setup).unwrap();

    let wavelength = VEL_C / 100e9;
    let ruze = (-(4.0 * PI * 25e-6 / wavelength).powi(2)).exp();
    assert_relative_eq!(eta.eta_ruze, ruze);
    assert_relative_eq!(eta.eta_a, 0.8 * ruze);
    assert_relative_eq!(eta.eta_s, 0.95 * 0.94 * 0.995);

    // A perfect surface loses nothing.
    let mut setup = setup;
    setup.surface_rms = Quantity::new(0.0, Unit::Micrometre);
    let eta = Efficiencies::new(Quantity::new(900.0, Unit::GHz), &setup).unwrap();
    assert_abs_diff_eq!(eta.eta_ruze, 1.0);

    // The Ruze loss grows with frequency.
    let setup = InstrumentSetup::default();
    let low = Efficiencies::new(Quantity::new(100.0, Unit::GHz), &setup).unwrap();
    let high = Efficiencies::new(Quantity::new(900.0, Unit::GHz), &setup).unwrap();
    assert!(high.eta_a < low.eta_a);
}

#[test]
fn test_receiver_temperature() {
    let expected = 5.0 * H * 100e9 / K_B + 4.0;
    assert_relative_eq!(receiver_temperature(100e9), expected);
    assert_abs_diff_eq!(receiver_temperature(100e9), 27.996, epsilon = 1e-3);
}

#[test]
fn test_temperatures() {
    let setup = InstrumentSetup::default();
    let freq = Quantity::new(100.0, Unit::GHz);
    let t_atm = Quantity::new(260.0, Unit::Kelvin);
    let temps = Temperatures::new(freq, &setup, t_atm, 0.1, None).unwrap();

    let transmission = (-0.1_f64).exp();
    let t_sky = 260.0 * (1.0 - transmission) + 2.726 * transmission;
    let t_rx = receiver_temperature(100e9);
    let t_sys = 2.0 / (0.95 * transmission) * (t_rx + 0.95 * t_sky + 0.05 * 270.0);
    assert_relative_eq!(temps.t_rx, t_rx);
    assert_relative_eq!(temps.t_sky, t_sky);
    assert_relative_eq!(temps.t_sys, t_sys);

    // A transparent atmosphere leaves only the CMB.
    let temps = Temperatures::new(freq, &setup, t_atm, 0.0, None).unwrap();
    assert_relative_eq!(temps.t_sky, 2.726);

    let temps = Temperatures::new(
        freq,
        &setup,
        t_atm,
        0.1,
        Some(Quantity::new(45.0, Unit::Kelvin)),
    )
    .unwrap();
    assert_abs_diff_eq!(temps.t_rx, 45.0);
}

#[test]
fn test_sideband_ratio_scales_t_sys() {
    let mut setup = InstrumentSetup::default();
    let freq = Quantity::new(100.0, Unit::GHz);
    let t_atm = Quantity::new(260.0, Unit::Kelvin);
    let dsb = Temperatures::new(freq, &setup, t_atm, 0.1, None).unwrap();
    setup.g = Quantity::dimensionless(0.0);
    let ssb = Temperatures::new(freq, &setup, t_atm, 0.1, None).unwrap();
    assert_relative_eq!(dsb.t_sys, 2.0 * ssb.t_sys);
}

#[test]
fn test_defaults() {
    let atm = TabulatedAtmosphere::default();
    let inputs = CalculationInput::default();
    let d = compute_derived_params(&inputs, &atm, DerivationOptions::default()).unwrap();

    assert_eq!(d.sefd.unit(), Unit::Jansky);
    assert_eq!(d.t_sys.unit(), Unit::Kelvin);
    assert_eq!(d.eta_a.unit(), Unit::Dimensionless);

    let area = PI * 25.0 * 25.0;
    let expected = 2.0 * K_B * d.t_sys.value() / (d.eta_a.value() * area) / JANSKY;
    assert_relative_eq!(d.sefd.value(), expected, max_relative = 1e-12);
    // A 50 m dish at 100 GHz should be a few hundred Jy.
    assert!(d.sefd.value() > 100.0 && d.sefd.value() < 1000.0, "{d:?}");

    let tau = atm
        .tau_atm(inputs.user_input.obs_freq, 0.25, inputs.user_input.elevation)
        .unwrap();
    assert_relative_eq!(d.tau_atm.value(), tau);
}

#[test]
fn test_flat_atmosphere() {
    let atm = FlatAtmosphere::new(0.0, 250.0);
    let inputs = CalculationInput::default();
    let d = compute_derived_params(&inputs, &atm, DerivationOptions::default()).unwrap();
    assert_relative_eq!(d.t_sky.value(), 2.726);
    assert_abs_diff_eq!(d.tau_atm.value(), 0.0);

    // With a flat atmosphere, only the receiver temperature varies over the
    // band, so finetuning barely changes anything.
    let finetuned = compute_derived_params(
        &wide_band(),
        &atm,
        DerivationOptions {
            finetune: true,
            instrument: None,
        },
    )
    .unwrap();
    let simple = compute_derived_params(&wide_band(), &atm, DerivationOptions::default()).unwrap();
    assert_relative_eq!(finetuned.sefd.value(), simple.sefd.value(), max_relative = 1e-3);
}

#[test]
fn test_opaque_atmosphere_is_an_error() {
    let atm = FlatAtmosphere::new(1e6, 250.0);
    let result = compute_derived_params(
        &CalculationInput::default(),
        &atm,
        DerivationOptions::default(),
    );
    assert!(matches!(
        result,
        Err(DerivedError::NotPositive {
            name: "system temperature",
            ..
        })
    ));
}

#[test]
fn test_atmosphere_errors_are_propagated() {
    let mut inputs = CalculationInput::default();
    inputs.user_input.elevation = Quantity::new(0.0, Unit::Degree);
    let result = compute_derived_params(
        &inputs,
        &TabulatedAtmosphere::default(),
        DerivationOptions::default(),
    );
    assert!(matches!(
        result,
        Err(DerivedError::Atmosphere(AtmosphereError::BadElevation(_)))
    ));
}

#[test]
fn test_sub_channels() {
    let atm = TabulatedAtmosphere::default();
    let inputs = wide_band();
    let channels = sub_channels(&inputs.user_input, &atm).unwrap().unwrap();
    // 96.25 to 103.75 GHz contains 97, 98, ..., 103.
    assert_eq!(channels.len(), 8);
    assert_relative_eq!(channels.first().centre.value(), 96.625);
    assert_relative_eq!(channels.first().width.value(), 0.75);
    assert_relative_eq!(channels[1].centre.value(), 97.5);
    assert_relative_eq!(channels[1].width.value(), 1.0);
    assert_relative_eq!(channels.last().centre.value(), 103.375);

    let total: f64 = channels.iter().map(|c| c.width.value()).sum();
    assert_relative_eq!(total, 7.5);
}

#[test]
fn test_narrow_band_has_no_sub_channels() {
    let atm = TabulatedAtmosphere::default();
    let mut inputs = CalculationInput::default();
    // 100 MHz around 100.5 GHz contains no grid frequencies.
    inputs.user_input.obs_freq = Quantity::new(100.5, Unit::GHz);
    assert!(sub_channels(&inputs.user_input, &atm).unwrap().is_none());

    // Only one grid frequency (100 GHz).
    inputs.user_input.obs_freq = Quantity::new(100.0, Unit::GHz);
    inputs.user_input.bandwidth = Quantity::new(1500.0, Unit::MHz);
    assert!(sub_channels(&inputs.user_input, &atm).unwrap().is_none());

    // Two (100 and 101 GHz).
    inputs.user_input.obs_freq = Quantity::new(100.5, Unit::GHz);
    inputs.user_input.bandwidth = Quantity::new(2000.0, Unit::MHz);
    let channels = sub_channels(&inputs.user_input, &atm).unwrap().unwrap();
    assert_eq!(channels.len(), 3);
}

#[test]
fn test_finetune_falls_back_for_narrow_bands() {
    let atm = TabulatedAtmosphere::default();
    let mut inputs = CalculationInput::default();
    inputs.user_input.obs_freq = Quantity::new(100.5, Unit::GHz);
    let simple = compute_derived_params(&inputs, &atm, DerivationOptions::default()).unwrap();
    let finetuned = compute_derived_params(
        &inputs,
        &atm,
        DerivationOptions {
            finetune: true,
            instrument: None,
        },
    )
    .unwrap();
    assert_eq!(simple, finetuned);
}

#[test]
fn test_finetune_is_bounded_by_channel_sefds() {
    let atm = TabulatedAtmosphere::default();
    // A band running across the 118.75 GHz oxygen line varies a lot.
    let mut inputs = CalculationInput::default();
    inputs.user_input.obs_freq = Quantity::new(115.0, Unit::GHz);
    inputs.user_input.bandwidth = Quantity::new(10.0, Unit::GHz);
    let options = DerivationOptions {
        finetune: true,
        instrument: None,
    };
    let finetuned = compute_derived_params(&inputs, &atm, options).unwrap();
    let simple = compute_derived_params(&inputs, &atm, DerivationOptions::default()).unwrap();

    let channels = sub_channels(&inputs.user_input, &atm).unwrap().unwrap();
    let eta_a = finetuned.eta_a.value();
    let sefds: Vec<f64> = channels
        .iter()
        .map(|c| channel_sefd_jy(c.centre, &inputs, &atm, eta_a, options).unwrap())
        .collect();
    let min = sefds.iter().copied().fold(f64::INFINITY, f64::min);
    let max = sefds.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let sefd = finetuned.sefd.value();
    assert!(min <= sefd && sefd <= max, "{min} <= {sefd} <= {max}");
    assert!(max > 2.0 * min, "the band should cover the oxygen line");

    // Only the SEFD changes.
    assert_ne!(finetuned.sefd, simple.sefd);
    assert_eq!(finetuned.t_sys, simple.t_sys);
    assert_eq!(finetuned.tau_atm, simple.tau_atm);
}

#[test]
fn test_instrument_receiver_temperature() {
    let atm = TabulatedAtmosphere::default();
    let mut inputs = CalculationInput::default();
    inputs.user_input.obs_freq = Quantity::new(150.0, Unit::GHz);
    let options = DerivationOptions {
        finetune: false,
        instrument: Some(Instrument::Finer),
    };

    let finer = compute_derived_params(&inputs, &atm, options).unwrap();
    assert_abs_diff_eq!(finer.t_rx.value(), 45.0);
    let generic = compute_derived_params(&inputs, &atm, DerivationOptions::default()).unwrap();
    assert_relative_eq!(generic.t_rx.value(), receiver_temperature(150e9));
    assert!(finer.sefd.value() > generic.sefd.value());

    // FINER doesn't know about 100 GHz.
    inputs.user_input.obs_freq = Quantity::new(100.0, Unit::GHz);
    let d = compute_derived_params(&inputs, &atm, options).unwrap();
    assert_relative_eq!(d.t_rx.value(), receiver_temperature(100e9));
}
