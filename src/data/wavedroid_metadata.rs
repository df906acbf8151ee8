use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::location::Location;

use super::parseable_data_record::{Result, WaveDroidError};

/// Recognized header keywords, in the order they are tried against a line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderKeyword {
    Version,
    Id,
    Location,
    Latitude,
    Longitude,
    MagneticDeclination,
    Timezone,
    Frequencies,
}

pub const HEADER_KEYWORDS: [HeaderKeyword; 8] = [
    HeaderKeyword::Version,
    HeaderKeyword::Id,
    HeaderKeyword::Location,
    HeaderKeyword::Latitude,
    HeaderKeyword::Longitude,
    HeaderKeyword::MagneticDeclination,
    HeaderKeyword::Timezone,
    HeaderKeyword::Frequencies,
];

const DECIMAL_PATTERN: &str = r"[+-]?[0-9]*\.?[0-9]+";

impl HeaderKeyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderKeyword::Version => "version",
            HeaderKeyword::Id => "ID",
            HeaderKeyword::Location => "location",
            HeaderKeyword::Latitude => "latitude",
            HeaderKeyword::Longitude => "longitude",
            HeaderKeyword::MagneticDeclination => "magdec",
            HeaderKeyword::Timezone => "timezone",
            HeaderKeyword::Frequencies => "frequencies",
        }
    }

    /// The shape the value after the `=` must have
    fn value_pattern(&self) -> &'static str {
        match self {
            HeaderKeyword::Version => "[0-9]+",
            HeaderKeyword::Id => "WD[0-9]*",
            HeaderKeyword::Location => ".*",
            HeaderKeyword::Latitude
            | HeaderKeyword::Longitude
            | HeaderKeyword::MagneticDeclination => DECIMAL_PATTERN,
            HeaderKeyword::Timezone => "[A-Za-z0-9/_]+",
            HeaderKeyword::Frequencies => "[0-9., ]*",
        }
    }

    /// Whether the value pattern has to cover the rest of the line
    fn anchored(&self) -> bool {
        matches!(self, HeaderKeyword::Frequencies)
    }
}

/// Station level metadata read from the WaveDroid header block
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StationMetadata {
    pub version: Option<i64>,
    pub id: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Magnetic declination in degrees
    pub magdec: Option<f64>,
    pub timezone: Option<String>,
    /// Frequency bin centers in Hz, empty for stations without spectral output
    pub frequency: Vec<f64>,
}

impl StationMetadata {
    pub fn has_frequency_axis(&self) -> bool {
        !self.frequency.is_empty()
    }

    pub fn station_location(&self) -> Option<Location> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Location::new(
                lat,
                lon,
                self.location.clone().unwrap_or_default(),
            )),
            _ => None,
        }
    }

    /// Provenance comments built from the free text header fields
    pub fn comments(&self) -> Vec<String> {
        [
            (HeaderKeyword::Id, &self.id),
            (HeaderKeyword::Location, &self.location),
            (HeaderKeyword::Timezone, &self.timezone),
        ]
        .iter()
        .filter_map(|(keyword, value)| {
            value
                .as_ref()
                .map(|v| format!("{} = {}", keyword.as_str(), v))
        })
        .collect()
    }

    fn apply(&mut self, keyword: HeaderKeyword, value: &str, line: usize) -> Result<()> {
        match keyword {
            HeaderKeyword::Version => {
                self.version = Some(value.parse::<i64>().map_err(|e| {
                    WaveDroidError::format(line, format!("Failed to parse version: {}", e))
                })?);
            }
            HeaderKeyword::Id => self.id = Some(value.to_string()),
            HeaderKeyword::Location => self.location = Some(value.trim().to_string()),
            HeaderKeyword::Latitude => self.latitude = Some(parse_decimal(value, keyword, line)?),
            HeaderKeyword::Longitude => self.longitude = Some(parse_decimal(value, keyword, line)?),
            HeaderKeyword::MagneticDeclination => {
                self.magdec = Some(parse_decimal(value, keyword, line)?)
            }
            HeaderKeyword::Timezone => self.timezone = Some(value.to_string()),
            HeaderKeyword::Frequencies => self.frequency = parse_frequencies(value, line)?,
        }

        Ok(())
    }
}

fn parse_decimal(value: &str, keyword: HeaderKeyword, line: usize) -> Result<f64> {
    value.parse::<f64>().map_err(|e| {
        WaveDroidError::format(
            line,
            format!("Failed to parse {}: {}", keyword.as_str(), e),
        )
    })
}

fn parse_frequencies(value: &str, line: usize) -> Result<Vec<f64>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(Vec::new());
    }

    value
        .split(',')
        .map(str::trim)
        .map(|v| {
            let frequency = v.parse::<f64>().map_err(|e| {
                WaveDroidError::format(line, format!("Failed to parse frequency '{}': {}", v, e))
            })?;

            if frequency > 0.0 {
                Ok(frequency)
            } else {
                Err(WaveDroidError::format(
                    line,
                    format!("Frequency bins must be positive, found {}", frequency),
                ))
            }
        })
        .collect()
}

/// Whether the line ends the header block
pub fn is_data_line(line: &str) -> bool {
    line.chars().next().map_or(false, |c| c.is_ascii_digit())
}

/// Table of keyword to value extraction rule, compiled once per parse
pub struct HeaderParser {
    rules: Vec<(HeaderKeyword, Regex)>,
}

impl HeaderParser {
    pub fn new() -> Result<Self> {
        let rules = HEADER_KEYWORDS
            .iter()
            .map(|keyword| {
                let end = if keyword.anchored() { r"\s*$" } else { "" };
                let pattern = format!(
                    r"^{}\s*=\s*({}){}",
                    keyword.as_str(),
                    keyword.value_pattern(),
                    end
                );
                Regex::new(&pattern)
                    .map(|regex| (*keyword, regex))
                    .map_err(|e| {
                        WaveDroidError::Precondition(format!(
                            "Failed to create {} header regex: {}",
                            keyword.as_str(),
                            e
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(HeaderParser { rules })
    }

    /// Reads header lines until the first line that starts with a digit. Returns the
    /// metadata and the index of that line, which is where the data body starts.
    pub fn parse(&self, lines: &[&str]) -> Result<(StationMetadata, usize)> {
        let mut metadata = StationMetadata::default();

        let body_start = lines
            .iter()
            .position(|l| is_data_line(l))
            .unwrap_or(lines.len());

        for (index, raw_line) in lines[..body_start].iter().enumerate() {
            let line = raw_line.trim_end();
            let line_number = index + 1;

            let Some((keyword, regex)) = self
                .rules
                .iter()
                .find(|(keyword, _)| line.starts_with(keyword.as_str()))
            else {
                trace!("Skipping unrecognized header line {}: {}", line_number, line);
                continue;
            };

            let value = regex
                .captures(line)
                .and_then(|c| c.get(1))
                .ok_or_else(|| {
                    WaveDroidError::format(
                        line_number,
                        format!("Invalid value for header field {}", keyword.as_str()),
                    )
                })?
                .as_str();

            debug!("Header field {} = {}", keyword.as_str(), value);
            metadata.apply(*keyword, value, line_number)?;
        }

        Ok((metadata, body_start))
    }
}

/// Convenience wrapper building a [`HeaderParser`] for a single parse
pub fn parse_header(lines: &[&str]) -> Result<(StationMetadata, usize)> {
    HeaderParser::new()?.parse(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_header() {
        let lines = vec![
            "version = 2",
            "ID = WD1042",
            "location = Scheveningen pier",
            "latitude = 52.1147",
            "longitude = 4.2635",
            "magdec = -1.5",
            "timezone = Europe/Amsterdam",
            "frequencies = 0.1, 0.2,0.3",
            "2016-03-01 00:00:00;1.2;8.0;270.0;6.0;2.1;7.5;1,1,1;0,0,0;0,0,0;0,0,0;0,0,0",
        ];

        let (metadata, body_start) = parse_header(&lines).unwrap();

        assert_eq!(body_start, 8);
        assert_eq!(metadata.version, Some(2));
        assert_eq!(metadata.id.as_deref(), Some("WD1042"));
        assert_eq!(metadata.location.as_deref(), Some("Scheveningen pier"));
        assert!((metadata.latitude.unwrap() - 52.1147).abs() < 0.00001);
        assert!((metadata.longitude.unwrap() - 4.2635).abs() < 0.00001);
        assert!((metadata.magdec.unwrap() + 1.5).abs() < 0.00001);
        assert_eq!(metadata.timezone.as_deref(), Some("Europe/Amsterdam"));
        assert_eq!(metadata.frequency, vec![0.1, 0.2, 0.3]);
        assert!(metadata.has_frequency_axis());
    }

    #[test]
    fn test_whitespace_around_equals() {
        let lines = vec!["latitude=-33.9", "magdec   =  12.25"];
        let (metadata, body_start) = parse_header(&lines).unwrap();

        assert_eq!(body_start, 2);
        assert!((metadata.latitude.unwrap() + 33.9).abs() < 0.00001);
        assert!((metadata.magdec.unwrap() - 12.25).abs() < 0.00001);
    }

    #[test]
    fn test_unrecognized_lines_are_skipped() {
        let lines = vec!["# exported by WaveDroid", "", "owner = someone", "version = 1"];
        let (metadata, body_start) = parse_header(&lines).unwrap();

        assert_eq!(body_start, 4);
        assert_eq!(metadata.version, Some(1));
        assert!(metadata.id.is_none());
    }

    #[test]
    fn test_missing_frequencies_is_not_spectral() {
        let (metadata, _) = parse_header(&["ID = WD7"]).unwrap();
        assert!(metadata.frequency.is_empty());
        assert!(!metadata.has_frequency_axis());

        let (metadata, _) = parse_header(&["frequencies = "]).unwrap();
        assert!(metadata.frequency.is_empty());
    }

    #[test]
    fn test_invalid_values_are_format_errors() {
        let bad_headers = vec![
            "latitude = north",
            "version = two",
            "ID = 1042",
            "timezone = ",
            "frequencies = 0.1,,0.3",
            "frequencies = 0.0,0.1",
            "frequencies = abc",
            "frequencies = -0.1,0.2",
            "frequencies = 0.1;0.2",
        ];

        for line in bad_headers {
            let result = parse_header(&[line]);
            assert!(
                matches!(result, Err(WaveDroidError::Format { line: 1, .. })),
                "expected format error for '{}'",
                line
            );
        }
    }

    #[test]
    fn test_header_stops_at_first_digit_line() {
        let lines = vec!["version = 1", "1;2;3", "ID = WD1"];
        let (metadata, body_start) = parse_header(&lines).unwrap();

        assert_eq!(body_start, 1);
        assert!(metadata.id.is_none());
    }

    #[test]
    fn test_comments() {
        let metadata = StationMetadata {
            id: Some("WD12".into()),
            timezone: Some("UTC".into()),
            ..Default::default()
        };

        assert_eq!(metadata.comments(), vec!["ID = WD12", "timezone = UTC"]);
    }
}
