use serde::{Deserialize, Serialize};

use crate::{
    tools::{
        vector::{diff, min_max},
        waves::{significant_wave_height, zero_spectral_moment},
    },
    units::direction::DirectionConvention,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpectralAxis {
    Frequency,
    Direction,
}

/// Directional wave energy density on a frequency x direction grid.
///
/// Energy is stored row major by frequency, so the value for frequency bin `ik`
/// and direction bin `ith` lives at `ik * nth + ith`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Spectra {
    /// Frequency bins in hz
    pub frequency: Vec<f64>,
    /// Direction bins in degrees
    direction: Vec<f64>,
    /// Energy values in m2/hz/rad
    pub energy: Vec<f64>,
    /// Direction Convention
    pub dir_convention: DirectionConvention,
}

impl Spectra {
    pub fn new(
        frequency: Vec<f64>,
        direction: Vec<f64>,
        values: Vec<f64>,
        dir_convention: DirectionConvention,
    ) -> Self {
        Spectra {
            frequency,
            direction,
            energy: values,
            dir_convention,
        }
    }

    /// Direction bins as stored, in degrees
    pub fn direction(&self) -> &[f64] {
        &self.direction
    }

    /// Number of frequency bins
    pub fn nk(&self) -> usize {
        self.frequency.len()
    }

    /// Vector of frequency bandwidths
    pub fn dk(&self) -> Vec<f64> {
        diff(&self.frequency)
    }

    /// Number of directional bins
    pub fn nth(&self) -> usize {
        self.direction.len()
    }

    /// Vector of directional bandwidths in radians
    pub fn dth(&self) -> Vec<f64> {
        let direction = self
            .direction
            .iter()
            .map(|d| d.to_radians())
            .collect::<Vec<f64>>();
        diff(&direction)
    }

    /// Get the energy for a given frequency and direction index
    pub fn energy_at(&self, ik: usize, ith: usize) -> f64 {
        self.energy[ik * self.nth() + ith]
    }

    /// All directional energy values for a single frequency bin
    pub fn frequency_row(&self, ik: usize) -> &[f64] {
        let nth = self.nth();
        &self.energy[ik * nth..(ik + 1) * nth]
    }

    /// One dimensional representation of the energy across the given axis
    /// Result is in m2/hz for SpectralAxis::Frequency or m2/rad for SpectralAxis::Direction
    pub fn oned(&self, axis: SpectralAxis) -> Vec<f64> {
        let nk = self.nk();
        let nth = self.nth();

        match axis {
            SpectralAxis::Frequency => {
                let dth = self.dth();

                let mut oned = vec![0.0; nk];
                for ik in 0..nk {
                    for ith in 0..nth {
                        oned[ik] += dth[ith] * self.energy_at(ik, ith);
                    }
                }
                oned
            }
            SpectralAxis::Direction => {
                let dk = self.dk();

                let mut oned = vec![0.0; nth];
                for ith in 0..nth {
                    for ik in 0..nk {
                        oned[ith] += dk[ik] * self.energy_at(ik, ith);
                    }
                }
                oned
            }
        }
    }

    /// The value range of the energy data in the form of (min, max)
    pub fn energy_range(&self) -> (f64, f64) {
        min_max(&self.energy)
    }

    /// Significant wave height in meters, integrated from the frequency spectrum
    pub fn significant_wave_height(&self) -> f64 {
        let m0 = self
            .oned(SpectralAxis::Frequency)
            .iter()
            .zip(self.dk())
            .map(|(e, df)| zero_spectral_moment(*e, df))
            .sum::<f64>();

        significant_wave_height(m0)
    }
}
