use chrono::NaiveDateTime;
use csv::Reader;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::parseable_data_record::{ParseableDataRecord, Result, WaveDroidError};
use super::wavedroid_metadata::StationMetadata;

pub const WD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Field count of a record without spectral moments
pub const BULK_FIELD_COUNT: usize = 7;
/// Field count of a record carrying the five per frequency moment lists
pub const SPECTRAL_FIELD_COUNT: usize = 12;

/// Truncated Fourier description of the directional spread, one value per frequency bin
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpectralMoments {
    /// Spectral power density in m2/hz
    pub energy_spectra: Vec<f64>,
    /// Mean direction in degrees, relative to magnetic north
    pub mean_wave_direction: Vec<f64>,
    /// First order cosine coefficient
    pub m1: Vec<f64>,
    /// Second order cosine coefficient
    pub m2: Vec<f64>,
    /// Second order sine coefficient
    pub n2: Vec<f64>,
}

impl SpectralMoments {
    pub fn len(&self) -> usize {
        self.energy_spectra.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energy_spectra.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaveDroidDataRecord {
    /// Local station time, without timezone
    pub date: NaiveDateTime,
    /// Hm0 in meters
    pub wave_height: f64,
    /// Tp in seconds
    pub peak_period: f64,
    /// Dirp in degrees
    pub peak_direction: f64,
    /// Tavg in seconds
    pub average_period: f64,
    /// Hmax in meters
    pub max_wave_height: f64,
    /// Tmax in seconds
    pub max_wave_period: f64,
    pub moments: Option<SpectralMoments>,
}

fn parse_value(raw: &str, name: &str, line: usize) -> Result<f64> {
    raw.trim().parse::<f64>().map_err(|e| {
        WaveDroidError::format(line, format!("Failed to parse {} '{}': {}", name, raw, e))
    })
}

fn parse_list(raw: &str, name: &str, expected: usize, line: usize) -> Result<Vec<f64>> {
    let values = raw
        .split(',')
        .map(|v| parse_value(v, name, line))
        .collect::<Result<Vec<f64>>>()?;

    if values.len() != expected {
        return Err(WaveDroidError::format(
            line,
            format!(
                "Expected {} {} values, one per frequency bin, found {}",
                expected,
                name,
                values.len()
            ),
        ));
    }

    Ok(values)
}

impl ParseableDataRecord for WaveDroidDataRecord {
    type Metadata = StationMetadata;

    fn from_data_row(
        metadata: &Self::Metadata,
        line: usize,
        row: &[&str],
    ) -> Result<WaveDroidDataRecord> {
        let frequency_count = metadata.frequency.len();
        let expected_fields = if frequency_count > 0 {
            SPECTRAL_FIELD_COUNT
        } else {
            BULK_FIELD_COUNT
        };

        if row.len() != expected_fields {
            return Err(WaveDroidError::format(
                line,
                format!(
                    "Expected {} fields for {} frequency bins, found {}",
                    expected_fields,
                    frequency_count,
                    row.len()
                ),
            ));
        }

        let date = NaiveDateTime::parse_from_str(row[0].trim(), WD_TIME_FORMAT).map_err(|e| {
            WaveDroidError::format(line, format!("Failed to parse date '{}': {}", row[0], e))
        })?;

        let moments = if frequency_count > 0 {
            Some(SpectralMoments {
                energy_spectra: parse_list(row[7], "energy spectra", frequency_count, line)?,
                mean_wave_direction: parse_list(
                    row[8],
                    "mean wave direction",
                    frequency_count,
                    line,
                )?,
                m1: parse_list(row[9], "m1", frequency_count, line)?,
                m2: parse_list(row[10], "m2", frequency_count, line)?,
                n2: parse_list(row[11], "n2", frequency_count, line)?,
            })
        } else {
            None
        };

        Ok(WaveDroidDataRecord {
            date,
            wave_height: parse_value(row[1], "Hm0", line)?,
            peak_period: parse_value(row[2], "Tp", line)?,
            peak_direction: parse_value(row[3], "Dirp", line)?,
            average_period: parse_value(row[4], "Tavg", line)?,
            max_wave_height: parse_value(row[5], "Hmax", line)?,
            max_wave_period: parse_value(row[6], "Tmax", line)?,
            moments,
        })
    }
}

/// Semicolon delimited body of a WaveDroid export
pub struct WaveDroidDataRecordCollection<'a> {
    reader: Reader<&'a [u8]>,
    line_offset: usize,
}

impl<'a> WaveDroidDataRecordCollection<'a> {
    /// `line_offset` is the number of file lines preceding `data`, used for error reporting
    pub fn from_data(data: &'a str, line_offset: usize) -> Self {
        let reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .trim(csv::Trim::All)
            .quoting(false)
            .has_headers(false)
            .flexible(true)
            .from_reader(data.as_bytes());

        WaveDroidDataRecordCollection {
            reader,
            line_offset,
        }
    }

    /// Parses every record in file order, failing on the first malformed line
    pub fn records(&mut self, metadata: &StationMetadata) -> Result<Vec<WaveDroidDataRecord>> {
        let line_offset = self.line_offset;
        let mut records = Vec::new();

        for result in self.reader.records() {
            let record = result.map_err(|e| {
                let line = e
                    .position()
                    .map(|p| p.line() as usize + line_offset)
                    .unwrap_or(line_offset);
                WaveDroidError::format(line, e.to_string())
            })?;

            let line = record
                .position()
                .map(|p| p.line() as usize + line_offset)
                .unwrap_or(line_offset);

            let row: Vec<&str> = record.iter().collect();
            if row.len() == 1 && row[0].is_empty() {
                continue;
            }

            records.push(WaveDroidDataRecord::from_data_row(metadata, line, &row)?);
        }

        debug!("Parsed {} WaveDroid records", records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spectral_metadata() -> StationMetadata {
        StationMetadata {
            frequency: vec![0.1, 0.2, 0.3],
            ..Default::default()
        }
    }

    #[test]
    fn test_bulk_data_row_parse() {
        let raw_data = "2016-03-01 10:30:00;1.25;8.3;265.0;6.1;2.2;7.9";
        let row: Vec<&str> = raw_data.split(';').collect();

        let record =
            WaveDroidDataRecord::from_data_row(&StationMetadata::default(), 1, &row).unwrap();

        assert_eq!(record.date.to_string(), "2016-03-01 10:30:00");
        assert!((record.wave_height - 1.25).abs() < 0.0001);
        assert!((record.peak_period - 8.3).abs() < 0.0001);
        assert!((record.peak_direction - 265.0).abs() < 0.0001);
        assert!((record.average_period - 6.1).abs() < 0.0001);
        assert!((record.max_wave_height - 2.2).abs() < 0.0001);
        assert!((record.max_wave_period - 7.9).abs() < 0.0001);
        assert!(record.moments.is_none());
    }

    #[test]
    fn test_spectral_data_row_parse() {
        let raw_data = "2016-03-01 10:30:00;1.25;8.3;265.0;6.1;2.2;7.9;0.5,1.5,0.25;250,260,270;0.6,0.5,0.4;0.3,0.2,0.1;0.01,0.02,0.03";
        let row: Vec<&str> = raw_data.split(';').collect();

        let record = WaveDroidDataRecord::from_data_row(&spectral_metadata(), 1, &row).unwrap();
        let moments = record.moments.unwrap();

        assert_eq!(moments.len(), 3);
        assert!((moments.energy_spectra[1] - 1.5).abs() < 0.0001);
        assert!((moments.mean_wave_direction[2] - 270.0).abs() < 0.0001);
        assert!((moments.m1[0] - 0.6).abs() < 0.0001);
        assert!((moments.m2[1] - 0.2).abs() < 0.0001);
        assert!((moments.n2[2] - 0.03).abs() < 0.0001);
    }

    #[test]
    fn test_field_count_must_match_frequency_axis() {
        let spectral = "2016-03-01 10:30:00;1.25;8.3;265.0;6.1;2.2;7.9;1,1,1;0,0,0;0,0,0;0,0,0;0,0,0";
        let bulk = "2016-03-01 10:30:00;1.25;8.3;265.0;6.1;2.2;7.9";

        let spectral_row: Vec<&str> = spectral.split(';').collect();
        let bulk_row: Vec<&str> = bulk.split(';').collect();

        let result = WaveDroidDataRecord::from_data_row(&StationMetadata::default(), 4, &spectral_row);
        assert!(matches!(result, Err(WaveDroidError::Format { line: 4, .. })));

        let result = WaveDroidDataRecord::from_data_row(&spectral_metadata(), 4, &bulk_row);
        assert!(matches!(result, Err(WaveDroidError::Format { line: 4, .. })));
    }

    #[test]
    fn test_moment_list_length_mismatch() {
        let raw_data = "2016-03-01 10:30:00;1.25;8.3;265.0;6.1;2.2;7.9;1,1,1;0,0;0,0,0;0,0,0;0,0,0";
        let row: Vec<&str> = raw_data.split(';').collect();

        let result = WaveDroidDataRecord::from_data_row(&spectral_metadata(), 1, &row);
        assert!(matches!(result, Err(WaveDroidError::Format { .. })));
    }

    #[test]
    fn test_bad_date_and_values() {
        let bad_rows = vec![
            "2016/03/01 10:30:00;1.25;8.3;265.0;6.1;2.2;7.9",
            "2016-03-01;1.25;8.3;265.0;6.1;2.2;7.9",
            "2016-03-01 10:30:00;high;8.3;265.0;6.1;2.2;7.9",
        ];

        for raw_data in bad_rows {
            let row: Vec<&str> = raw_data.split(';').collect();
            let result = WaveDroidDataRecord::from_data_row(&StationMetadata::default(), 1, &row);
            assert!(result.is_err(), "expected failure for '{}'", raw_data);
        }
    }

    #[test]
    fn test_collection_preserves_order_and_skips_blank_lines() {
        let data = "2016-03-01 12:00:00;1.0;8.0;270.0;6.0;2.0;7.0\n\n2016-03-01 11:00:00;2.0;8.0;270.0;6.0;2.0;7.0\n2016-03-01 13:00:00;3.0;8.0;270.0;6.0;2.0;7.0\n";
        let mut collection = WaveDroidDataRecordCollection::from_data(data, 0);
        let records = collection.records(&StationMetadata::default()).unwrap();

        assert_eq!(records.len(), 3);
        let heights = records.iter().map(|r| r.wave_height).collect::<Vec<f64>>();
        assert_eq!(heights, vec![1.0, 2.0, 3.0]);
        assert_eq!(records[1].date.to_string(), "2016-03-01 11:00:00");
    }

    #[test]
    fn test_collection_reports_file_line() {
        let data = "2016-03-01 12:00:00;1.0;8.0;270.0;6.0;2.0;7.0\n2016-03-01 13:00:00;1.0;8.0\n";
        let mut collection = WaveDroidDataRecordCollection::from_data(data, 5);
        let result = collection.records(&StationMetadata::default());

        assert!(matches!(result, Err(WaveDroidError::Format { line: 7, .. })));
    }

    #[test]
    fn test_delimiter_only_line_is_rejected() {
        let data = "2016-03-01 12:00:00;1.0;8.0;270.0;6.0;2.0;7.0\n;;;;;;\n";
        let mut collection = WaveDroidDataRecordCollection::from_data(data, 2);
        let result = collection.records(&StationMetadata::default());

        assert!(matches!(result, Err(WaveDroidError::Format { line: 4, .. })));
    }

    #[test]
    fn test_empty_body() {
        let mut collection = WaveDroidDataRecordCollection::from_data("", 3);
        let records = collection.records(&spectral_metadata()).unwrap();
        assert!(records.is_empty());
    }
}
