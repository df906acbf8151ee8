use std::f64::consts::PI;

use chrono::NaiveDateTime;
use itertools::izip;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    spectra::Spectra,
    tools::{linspace::linspace, vector::roll},
    units::direction::DirectionConvention,
};

use super::parseable_data_record::{Result, WaveDroidError};
use super::wavedroid_data_record::{SpectralMoments, WaveDroidDataRecord};

pub const DEFAULT_DIRECTION_COUNT: usize = 360;

/// Direction bin count must split evenly around the lattice midpoint
pub fn check_direction_count(direction_count: usize) -> Result<()> {
    if direction_count == 0 || direction_count % 2 != 0 {
        return Err(WaveDroidError::Precondition(format!(
            "Number of directional bins should be a positive even number, found {}",
            direction_count
        )));
    }
    Ok(())
}

/// Reported direction bins in degrees, [0, 360) ascending
pub fn direction_axis(direction_count: usize) -> Vec<f64> {
    let step = 360.0 / direction_count as f64;
    linspace(0.0, 360.0 - step, direction_count).collect()
}

/// Internal lattice in radians over [-pi, pi)
fn direction_lattice(direction_count: usize) -> Vec<f64> {
    let step = 2.0 * PI / direction_count as f64;
    linspace(-PI, PI - step, direction_count).collect()
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DirectionalSpectralWaveDataRecord {
    pub date: NaiveDateTime,
    pub spectra: Spectra,
}

impl DirectionalSpectralWaveDataRecord {
    /// Expands the per frequency moments into a full directional spectrum.
    ///
    /// `magdec` is added to the mean direction before evaluating the series, so the
    /// resulting directions are relative to true north. Values are not clipped; the
    /// truncated series can go negative for some moment combinations.
    fn build(
        date: &NaiveDateTime,
        frequency: &[f64],
        moments: &SpectralMoments,
        magdec: f64,
        lattice: &[f64],
        direction: &[f64],
    ) -> Self {
        let nth = lattice.len();
        let mut directional_spectra = Vec::with_capacity(frequency.len() * nth);

        for (p, th0, m1, m2, n2) in izip!(
            &moments.energy_spectra,
            &moments.mean_wave_direction,
            &moments.m1,
            &moments.m2,
            &moments.n2,
        ) {
            let mean_direction = (th0 + magdec).to_radians();

            let row = lattice
                .iter()
                .map(|r| {
                    let angle = r - mean_direction;
                    let first = m1 * angle.cos();
                    let second = m2 * (2.0 * angle).cos() + n2 * (2.0 * angle).sin();

                    (1.0 / PI) * (0.5 + first + second) * p
                })
                .collect::<Vec<f64>>();

            // Move the lattice midpoint (0 rad) to index 0 so bins line up with [0, 360)
            directional_spectra.extend(roll(&row, nth / 2));
        }

        let spectra = Spectra::new(
            frequency.to_vec(),
            direction.to_vec(),
            directional_spectra,
            DirectionConvention::From,
        );

        DirectionalSpectralWaveDataRecord {
            date: *date,
            spectra,
        }
    }

    pub fn from_record(
        record: &WaveDroidDataRecord,
        frequency: &[f64],
        magdec: f64,
        direction_count: usize,
    ) -> Result<Self> {
        check_direction_count(direction_count)?;
        let moments = record_moments(record, frequency.len())?;

        Ok(Self::build(
            &record.date,
            frequency,
            moments,
            magdec,
            &direction_lattice(direction_count),
            &direction_axis(direction_count),
        ))
    }
}

fn record_moments(record: &WaveDroidDataRecord, frequency_count: usize) -> Result<&SpectralMoments> {
    let moments = record.moments.as_ref().ok_or_else(|| {
        WaveDroidError::Precondition(format!("Record at {} has no spectral moments", record.date))
    })?;

    if moments.len() != frequency_count {
        return Err(WaveDroidError::Precondition(format!(
            "Record at {} has {} moment bins for {} frequencies",
            record.date,
            moments.len(),
            frequency_count
        )));
    }

    Ok(moments)
}

/// Reconstructs the directional spectrum of every record, in record order
pub fn reconstruct_all(
    records: &[WaveDroidDataRecord],
    frequency: &[f64],
    magdec: f64,
    direction_count: usize,
) -> Result<Vec<DirectionalSpectralWaveDataRecord>> {
    check_direction_count(direction_count)?;

    let lattice = direction_lattice(direction_count);
    let direction = direction_axis(direction_count);

    debug!(
        "Reconstructing {} spectra with {} frequencies x {} directions",
        records.len(),
        frequency.len(),
        direction_count
    );

    let build = |record: &WaveDroidDataRecord| -> Result<DirectionalSpectralWaveDataRecord> {
        let moments = record_moments(record, frequency.len())?;
        Ok(DirectionalSpectralWaveDataRecord::build(
            &record.date,
            frequency,
            moments,
            magdec,
            &lattice,
            &direction,
        ))
    };

    map_records(records, build)
}

#[cfg(feature = "parallel")]
fn map_records<F>(
    records: &[WaveDroidDataRecord],
    build: F,
) -> Result<Vec<DirectionalSpectralWaveDataRecord>>
where
    F: Fn(&WaveDroidDataRecord) -> Result<DirectionalSpectralWaveDataRecord> + Sync + Send,
{
    use rayon::prelude::*;
    records.par_iter().map(build).collect()
}

#[cfg(not(feature = "parallel"))]
fn map_records<F>(
    records: &[WaveDroidDataRecord],
    build: F,
) -> Result<Vec<DirectionalSpectralWaveDataRecord>>
where
    F: Fn(&WaveDroidDataRecord) -> Result<DirectionalSpectralWaveDataRecord>,
{
    records.iter().map(build).collect()
}
