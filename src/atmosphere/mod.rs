// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to abstract atmospheric calculations.
//!
//! [`AtmosphereModel`] is a trait detailing how to get the atmospheric opacity
//! and temperature for a frequency and weather condition. The default model,
//! [`TabulatedAtmosphere`], interpolates tables on a fixed frequency grid;
//! the grid is exposed so that wide bands can be split into sub-channels
//! aligned with it.
//!
//! Weather is a dimensionless fraction between 0 (the driest conditions the
//! table knows about) and 1 (the wettest).

mod error;
mod lines;

pub use error::AtmosphereError;

use std::sync::Arc;

use log::debug;
use ndarray::prelude::*;
use vec1::Vec1;

use crate::units::{Quantity, Unit};

lazy_static::lazy_static! {
    static ref DEFAULT_ATMOSPHERE: Arc<TabulatedAtmosphere> =
        Arc::new(TabulatedAtmosphere::from_line_catalogue());
}

/// A trait abstracting atmosphere-model functions.
pub trait AtmosphereModel: Sync + Send {
    /// Get the atmospheric opacity along the line of sight for an observation
    /// at `freq` and `elevation`. This is the zenith opacity multiplied by the
    /// plane-parallel air mass.
    fn tau_atm(
        &self,
        freq: Quantity,
        weather: f64,
        elevation: Quantity,
    ) -> Result<f64, AtmosphereError>;

    /// Get the (physical) temperature of the emitting atmosphere.
    fn atmospheric_temperature(
        &self,
        freq: Quantity,
        weather: f64,
    ) -> Result<Quantity, AtmosphereError>;

    /// The frequencies that this model is natively defined for \[GHz\]. These
    /// must be strictly increasing.
    fn frequency_grid(&self) -> &[f64];

    /// Get the native grid frequencies strictly between `low_ghz` and
    /// `high_ghz`.
    fn grid_points_within(&self, low_ghz: f64, high_ghz: f64) -> Vec<f64> {
        self.frequency_grid()
            .iter()
            .copied()
            .filter(|&f| f > low_ghz && f < high_ghz)
            .collect()
    }
}

/// Get the shared, default atmosphere model.
pub fn default_atmosphere() -> Arc<dyn AtmosphereModel> {
    DEFAULT_ATMOSPHERE.clone()
}

/// An atmosphere model defined by tables of zenith opacity and atmospheric
/// temperature. Rows of each table correspond to frequencies, columns to
/// weather conditions. Lookups are linearly interpolated in both; requests
/// outside the tables are clamped to the edges.
#[derive(Debug, Clone)]
pub struct TabulatedAtmosphere {
    /// \[GHz\]
    freqs_ghz: Vec1<f64>,

    /// Fractions between 0 and 1.
    weather_nodes: Vec1<f64>,

    tau_zenith: Array2<f64>,

    /// \[K\]
    t_atm: Array2<f64>,
}

impl TabulatedAtmosphere {
    pub fn new(
        freqs_ghz: Vec1<f64>,
        weather_nodes: Vec1<f64>,
        tau_zenith: Array2<f64>,
        t_atm: Array2<f64>,
    ) -> Result<TabulatedAtmosphere, AtmosphereError> {
        if freqs_ghz.len() < 2 {
            return Err(AtmosphereError::TooFewFrequencies(freqs_ghz.len()));
        }
        check_increasing("frequency", &freqs_ghz)?;
        check_increasing("weather", &weather_nodes)?;

        let expected = (freqs_ghz.len(), weather_nodes.len());
        for table in [&tau_zenith, &t_atm] {
            if table.dim() != expected {
                return Err(AtmosphereError::ShapeMismatch {
                    got: table.dim(),
                    expected,
                });
            }
        }

        Ok(TabulatedAtmosphere {
            freqs_ghz,
            weather_nodes,
            tau_zenith,
            t_atm,
        })
    }

    /// Build the tables from a catalogue of oxygen and water-vapour absorption
    /// lines on top of dry and wet continua. See the `lines` module.
    pub fn from_line_catalogue() -> TabulatedAtmosphere {
        let freqs_ghz = lines::table_frequencies();
        let weather_nodes = Vec1::try_from_vec(lines::WEATHER_NODES.to_vec())
            .expect("WEATHER_NODES is not empty");
        let pwv_mm = lines::PWV_NODES_MM;
        debug!(
            "Building the atmosphere table: {} frequencies from {} to {} GHz, {} weather nodes",
            freqs_ghz.len(),
            freqs_ghz.first(),
            freqs_ghz.last(),
            weather_nodes.len()
        );

        let mut tau_zenith = Array2::zeros((freqs_ghz.len(), weather_nodes.len()));
        let mut t_atm = Array2::zeros(tau_zenith.raw_dim());
        for ((&freq, mut tau_row), mut t_row) in freqs_ghz
            .iter()
            .zip(tau_zenith.outer_iter_mut())
            .zip(t_atm.outer_iter_mut())
        {
            for ((tau, t), &pwv) in tau_row.iter_mut().zip(t_row.iter_mut()).zip(pwv_mm.iter()) {
                *tau = lines::zenith_opacity(freq, pwv);
                *t = lines::emission_temperature(*tau);
            }
        }

        // The inputs above are all internally consistent, so this can't fail.
        TabulatedAtmosphere::new(freqs_ghz, weather_nodes, tau_zenith, t_atm)
            .expect("the line catalogue produces a valid table")
    }

    /// The zenith-opacity table. Rows correspond to
    /// [`AtmosphereModel::frequency_grid`], columns to
    /// [`TabulatedAtmosphere::weather_nodes`].
    pub fn tau_table(&self) -> ArrayView2<f64> {
        self.tau_zenith.view()
    }

    /// The atmospheric-temperature table \[K\].
    pub fn temperature_table(&self) -> ArrayView2<f64> {
        self.t_atm.view()
    }

    pub fn weather_nodes(&self) -> &[f64] {
        &self.weather_nodes
    }

    /// Get the zenith opacity at a frequency \[GHz\] and weather.
    pub fn zenith_tau(&self, freq_ghz: f64, weather: f64) -> f64 {
        self.interpolate(self.tau_zenith.view(), freq_ghz, weather)
    }

    fn interpolate(&self, table: ArrayView2<f64>, freq_ghz: f64, weather: f64) -> f64 {
        let (f0, f1, f_frac) = bracket(&self.freqs_ghz, freq_ghz);
        let (w0, w1, w_frac) = bracket(&self.weather_nodes, weather);
        let low = lerp(table[(f0, w0)], table[(f0, w1)], w_frac);
        let high = lerp(table[(f1, w0)], table[(f1, w1)], w_frac);
        lerp(low, high, f_frac)
    }
}

impl Default for TabulatedAtmosphere {
    fn default() -> Self {
        TabulatedAtmosphere::clone(&DEFAULT_ATMOSPHERE)
    }
}

impl AtmosphereModel for TabulatedAtmosphere {
    fn tau_atm(
        &self,
        freq: Quantity,
        weather: f64,
        elevation: Quantity,
    ) -> Result<f64, AtmosphereError> {
        let freq_ghz = freq.value_in(Unit::GHz)?;
        check_weather(weather)?;
        let elevation_deg = elevation.value_in(Unit::Degree)?;
        if !(elevation_deg > 0.0 && elevation_deg <= 90.0) {
            return Err(AtmosphereError::BadElevation(elevation_deg));
        }

        let air_mass = 1.0 / elevation_deg.to_radians().sin();
        Ok(self.zenith_tau(freq_ghz, weather) * air_mass)
    }

    fn atmospheric_temperature(
        &self,
        freq: Quantity,
        weather: f64,
    ) -> Result<Quantity, AtmosphereError> {
        let freq_ghz = freq.value_in(Unit::GHz)?;
        check_weather(weather)?;
        Ok(Quantity::new(
            self.interpolate(self.t_atm.view(), freq_ghz, weather),
            Unit::Kelvin,
        ))
    }

    fn frequency_grid(&self) -> &[f64] {
        &self.freqs_ghz
    }
}

fn check_increasing(what: &'static str, values: &[f64]) -> Result<(), AtmosphereError> {
    match values.windows(2).position(|w| !(w[1] > w[0])) {
        Some(i) => Err(AtmosphereError::NotIncreasing {
            what,
            index: i + 1,
        }),
        None => Ok(()),
    }
}

fn check_weather(weather: f64) -> Result<(), AtmosphereError> {
    if weather.is_finite() {
        Ok(())
    } else {
        Err(AtmosphereError::BadWeather(weather))
    }
}

/// Find the indices of the nodes either side of `x`, and how far along `x` is
/// between them. Values outside the nodes are clamped to the nearest node.
fn bracket(nodes: &[f64], x: f64) -> (usize, usize, f64) {
    let i = nodes.partition_point(|&n| n <= x);
    if i == 0 {
        (0, 0, 0.0)
    } else if i == nodes.len() {
        (i - 1, i - 1, 0.0)
    } else {
        let (lo, hi) = (nodes[i - 1], nodes[i]);
        (i - 1, i, (x - lo) / (hi - lo))
    }
}

#[inline]
fn lerp(a: f64, b: f64, frac: f64) -> f64 {
    a + (b - a) * frac
}
