use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ReaderConfig;
use crate::data::directional_spectral_wave_data_record::{
    direction_axis, reconstruct_all, DirectionalSpectralWaveDataRecord,
};
use crate::data::parseable_data_record::{Result, WaveDroidError};
use crate::data::wavedroid_data_record::{WaveDroidDataRecord, WaveDroidDataRecordCollection};
use crate::data::wavedroid_metadata::{HeaderParser, StationMetadata};
use crate::ocean_waves::OceanWavesData;
use crate::timezone::TimezoneProvider;

/// Which flavor of WaveDroid export was read
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderVariant {
    /// The header declared frequency bins, so records carry spectral moments
    pub has_frequency_axis: bool,
    /// The body holds a single observation and the header names no timezone to place it in time
    pub stationary: bool,
}

/// A fully parsed WaveDroid export: header metadata, the time series of records and,
/// for spectral stations, one reconstructed directional spectrum per record
#[derive(Clone, Debug)]
pub struct WaveDroidReader {
    config: ReaderConfig,
    metadata: StationMetadata,
    records: Vec<WaveDroidDataRecord>,
    spectra: Vec<DirectionalSpectralWaveDataRecord>,
}

impl WaveDroidReader {
    pub fn from_data(data: &str) -> Result<Self> {
        Self::from_data_with_config(data, ReaderConfig::default())
    }

    pub fn from_data_with_config(data: &str, config: ReaderConfig) -> Result<Self> {
        let lines = data.lines().collect::<Vec<&str>>();
        Self::from_lines_with_config(&lines, config)
    }

    pub fn from_lines(lines: &[&str]) -> Result<Self> {
        Self::from_lines_with_config(lines, ReaderConfig::default())
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_path_with_config(path, ReaderConfig::default())
    }

    pub fn from_path_with_config<P: AsRef<Path>>(path: P, config: ReaderConfig) -> Result<Self> {
        let data = fs::read_to_string(path.as_ref())?;
        debug!("Read WaveDroid file {}", path.as_ref().display());
        Self::from_data_with_config(&data, config)
    }

    pub fn from_lines_with_config(lines: &[&str], config: ReaderConfig) -> Result<Self> {
        let (metadata, body_start) = HeaderParser::new()?.parse(lines)?;
        debug!(
            "Header ends at line {}, {} frequency bins",
            body_start,
            metadata.frequency.len()
        );

        let body = lines[body_start..].join("\n");
        let records =
            WaveDroidDataRecordCollection::from_data(&body, body_start).records(&metadata)?;

        let spectra = if metadata.has_frequency_axis() {
            let magdec = metadata
                .magdec
                .ok_or(WaveDroidError::MissingField("magdec"))?;
            reconstruct_all(&records, &metadata.frequency, magdec, config.direction_count)?
        } else {
            Vec::new()
        };

        Ok(WaveDroidReader {
            config,
            metadata,
            records,
            spectra,
        })
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    pub fn metadata(&self) -> &StationMetadata {
        &self.metadata
    }

    pub fn records(&self) -> &[WaveDroidDataRecord] {
        &self.records
    }

    /// Reconstructed spectra aligned with records, empty for non spectral stations
    pub fn spectra(&self) -> &[DirectionalSpectralWaveDataRecord] {
        &self.spectra
    }

    pub fn variant(&self) -> ReaderVariant {
        ReaderVariant {
            has_frequency_axis: self.metadata.has_frequency_axis(),
            stationary: self.records.len() == 1 && self.metadata.timezone.is_none(),
        }
    }

    /// Observation times in file order, still in station local time
    pub fn time(&self) -> Vec<NaiveDateTime> {
        self.records.iter().map(|r| r.date).collect()
    }

    /// Direction bins in degrees for spectral stations
    pub fn direction(&self) -> Option<Vec<f64>> {
        if self.metadata.has_frequency_axis() {
            Some(direction_axis(self.config.direction_count))
        } else {
            None
        }
    }

    pub fn to_ocean_waves<P: TimezoneProvider>(&self, provider: &P) -> Result<OceanWavesData> {
        OceanWavesData::from_reader(self, provider)
    }
}
