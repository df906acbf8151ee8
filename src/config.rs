use std::collections::BTreeMap;

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::data::directional_spectral_wave_data_record::DEFAULT_DIRECTION_COUNT;
use crate::data::parseable_data_record::{Result, WaveDroidError};
use crate::timezone::FixedOffsetTable;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Number of direction bins in reconstructed spectra, must be even
    pub direction_count: usize,
    /// Extra timezone identifiers, in minutes east of UTC
    pub timezone_offsets: BTreeMap<String, i32>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        ReaderConfig {
            direction_count: DEFAULT_DIRECTION_COUNT,
            timezone_offsets: BTreeMap::new(),
        }
    }
}

impl ReaderConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| WaveDroidError::Config(e.to_string()))
    }

    pub fn with_direction_count(mut self, direction_count: usize) -> Self {
        self.direction_count = direction_count;
        self
    }

    /// Default UTC table extended with the configured offsets
    pub fn timezone_provider(&self) -> Result<FixedOffsetTable> {
        self.timezone_offsets
            .iter()
            .try_fold(FixedOffsetTable::default(), |table, (name, minutes)| {
                let offset = FixedOffset::east_opt(minutes * 60).ok_or_else(|| {
                    WaveDroidError::Config(format!(
                        "Offset of {} minutes for {} is out of range",
                        minutes, name
                    ))
                })?;
                Ok(table.with_offset(name.clone(), offset))
            })
    }
}
