// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Instruments that may be mounted on the telescope, and the frequencies and
//! bandwidths that each of them covers.
//!
//! The coverage ranges are provisional; a [`CoverageTable`] can be built by
//! hand (or deserialised) to replace the built-in one.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::units::{Quantity, Unit, UnitError};

lazy_static::lazy_static! {
    static ref DEFAULT_COVERAGE: CoverageTable = CoverageTable::builtin();

    /// All instrument names, e.g. for help texts.
    pub static ref INSTRUMENTS_COMMA_SEPARATED: String = Instrument::iter().join(", ");
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Instrument {
    Finer,
    Sepia,
    Chai,
    Tifuun,
    Gltcam,
    Muscat,
}

impl Instrument {
    /// The receiver temperature that this instrument is known to have at
    /// `freq`, if any. Frequencies on a range boundary aren't covered.
    pub fn receiver_temperature(self, freq: Quantity) -> Result<Option<Quantity>, UnitError> {
        let freq_ghz = freq.value_in(Unit::GHz)?;
        let t_rx = match self {
            Instrument::Finer if freq_ghz > 120.0 && freq_ghz < 210.0 => Some(45.0),
            Instrument::Finer if freq_ghz > 210.0 && freq_ghz < 360.0 => Some(75.0),
            _ => None,
        };
        Ok(t_rx.map(|t| Quantity::new(t, Unit::Kelvin)))
    }
}

/// An open interval; neither end is included.
pub type Range = (f64, f64);

/// The ranges an instrument works within. A frequency and a bandwidth are
/// each checked against their own list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coverage {
    /// \[GHz\]
    pub frequency_ghz: Vec<Range>,

    /// \[MHz\]
    pub bandwidth_mhz: Vec<Range>,
}

/// The frequency and bandwidth ranges covered by each instrument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageTable {
    instruments: IndexMap<Instrument, Coverage>,
}

impl CoverageTable {
    /// An empty table.
    pub fn new() -> CoverageTable {
        CoverageTable::default()
    }

    /// The table shipped with this crate.
    pub fn builtin() -> CoverageTable {
        let mut table = CoverageTable::new();
        table.insert(Instrument::Finer, &[(120.0, 360.0)], &[(10500.0, 3e6)]);
        table.insert(
            Instrument::Sepia,
            &[(163.0, 211.0), (272.0, 376.0), (600.0, 722.0)],
            &[(1e4, 5.6e6), (1e4, 3.2e7), (1e4, 1e7)],
        );
        table.insert(
            Instrument::Chai,
            &[(460.0, 500.0), (780.0, 820.0)],
            &[(1e4, 1e6), (1e4, 1e6)],
        );
        table.insert(Instrument::Tifuun, &[(90.0, 360.0)], &[(10.0, 1000.0)]);
        table.insert(
            Instrument::Gltcam,
            &[
                (130.0, 170.0),
                (190.0, 250.0),
                (250.0, 295.0),
                (330.0, 365.0),
                (385.0, 415.0),
                (630.0, 710.0),
            ],
            &[(1.0, 5.0); 6],
        );
        table.insert(Instrument::Muscat, &[(250.0, 300.0)], &[(1.0, 5.0)]);
        table
    }

    /// A reference to the shared, built-in table.
    pub fn default_table() -> &'static CoverageTable {
        &DEFAULT_COVERAGE
    }

    /// Set the ranges of an instrument, replacing any it already had.
    /// Frequency ranges are in GHz, bandwidth ranges in MHz. The lists are
    /// independent and needn't be the same length.
    pub fn insert(
        &mut self,
        instrument: Instrument,
        frequency_ghz: &[Range],
        bandwidth_mhz: &[Range],
    ) {
        self.instruments.insert(
            instrument,
            Coverage {
                frequency_ghz: frequency_ghz.to_vec(),
                bandwidth_mhz: bandwidth_mhz.to_vec(),
            },
        );
    }

    pub fn coverage(&self, instrument: Instrument) -> Option<&Coverage> {
        self.instruments.get(&instrument)
    }

    /// Instruments with any frequency range strictly containing `freq`.
    pub fn covering_frequency(&self, freq: Quantity) -> Result<BTreeSet<Instrument>, UnitError> {
        let freq_ghz = freq.value_in(Unit::GHz)?;
        Ok(self.matching(|c| c.frequency_ghz.as_slice(), freq_ghz))
    }

    /// Instruments with any bandwidth range strictly containing `bandwidth`.
    pub fn covering_bandwidth(
        &self,
        bandwidth: Quantity,
    ) -> Result<BTreeSet<Instrument>, UnitError> {
        let bandwidth_mhz = bandwidth.value_in(Unit::MHz)?;
        Ok(self.matching(|c| c.bandwidth_mhz.as_slice(), bandwidth_mhz))
    }

    /// Instruments covering both `freq` and `bandwidth`.
    pub fn applicable(
        &self,
        freq: Quantity,
        bandwidth: Quantity,
    ) -> Result<Vec<Instrument>, UnitError> {
        let by_freq = self.covering_frequency(freq)?;
        let by_bandwidth = self.covering_bandwidth(bandwidth)?;
        Ok(by_freq.intersection(&by_bandwidth).copied().collect())
    }

    fn matching<F>(&self, ranges: F, x: f64) -> BTreeSet<Instrument>
    where
        F: Fn(&Coverage) -> &[Range],
    {
        self.instruments
            .iter()
            .filter(|(_, coverage)| ranges(coverage).iter().any(|&r| inside(r, x)))
            .map(|(&instrument, _)| instrument)
            .collect()
    }
}

fn inside((low, high): Range, x: f64) -> bool {
    x > low && x < high
}
