use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::data::parseable_data_record::{Result, WaveDroidError};
use crate::reader::WaveDroidReader;
use crate::timezone::TimezoneProvider;
use crate::units::{DirectionConvention, FrequencyConvention, Unit};

/// Flat energy values with their dimensions, outermost first
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnergyArray {
    pub shape: Vec<usize>,
    pub values: Vec<f64>,
    pub units: Unit,
}

impl EnergyArray {
    fn new(shape: Vec<usize>, values: Vec<f64>, units: Unit) -> Result<Self> {
        let expected = shape.iter().product::<usize>();
        if expected != values.len() {
            return Err(WaveDroidError::ContainerAdaptation(format!(
                "Energy shape {:?} needs {} values, found {}",
                shape,
                expected,
                values.len()
            )));
        }

        Ok(EnergyArray {
            shape,
            values,
            units,
        })
    }
}

/// Parsed WaveDroid data in the shape of a generic ocean waves container.
///
/// Energy dimensions are (time, location, frequency, direction) for directional stations
/// and (time, location) of Hm0 otherwise. The time dimension is dropped for stationary
/// files, a single observation without a timezone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OceanWavesData {
    /// (longitude, latitude) pairs
    pub location: Vec<(f64, f64)>,
    pub location_units: Unit,
    pub frequency: Vec<f64>,
    pub frequency_units: Unit,
    pub frequency_convention: FrequencyConvention,
    pub direction: Option<Vec<f64>>,
    pub direction_units: Option<Unit>,
    pub direction_convention: Option<DirectionConvention>,
    pub time: Option<Vec<DateTime<FixedOffset>>>,
    pub time_units: Option<Unit>,
    pub energy: EnergyArray,
    pub comments: Vec<String>,
}

impl OceanWavesData {
    pub fn from_reader<P: TimezoneProvider>(
        reader: &WaveDroidReader,
        provider: &P,
    ) -> Result<Self> {
        let metadata = reader.metadata();
        let variant = reader.variant();

        let location = metadata.station_location().ok_or_else(|| {
            WaveDroidError::ContainerAdaptation(
                "latitude and longitude are required for the station location".into(),
            )
        })?;

        let time = if variant.stationary {
            None
        } else {
            let timezone = metadata.timezone.as_deref().ok_or_else(|| {
                WaveDroidError::ContainerAdaptation("timezone is required for the time axis".into())
            })?;

            let time = reader
                .records()
                .iter()
                .map(|r| {
                    provider.localize(timezone, &r.date).ok_or_else(|| {
                        WaveDroidError::ContainerAdaptation(format!(
                            "Unable to resolve timezone {} for {}",
                            timezone, r.date
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Some(time)
        };

        let mut shape = Vec::with_capacity(4);
        if !variant.stationary {
            shape.push(reader.records().len());
        }
        shape.push(1);

        let direction = reader.direction();
        let energy = match &direction {
            Some(direction) => {
                if reader.spectra().len() != reader.records().len() {
                    return Err(WaveDroidError::ContainerAdaptation(format!(
                        "{} spectra for {} records",
                        reader.spectra().len(),
                        reader.records().len()
                    )));
                }

                shape.push(metadata.frequency.len());
                shape.push(direction.len());
                let values = reader
                    .spectra()
                    .iter()
                    .flat_map(|s| s.spectra.energy.iter().copied())
                    .collect();
                EnergyArray::new(shape, values, Unit::SquareMetersPerHertz)?
            }
            None => {
                let values = reader.records().iter().map(|r| r.wave_height).collect();
                EnergyArray::new(shape, values, Unit::Meters)?
            }
        };

        let directional = direction.is_some();

        Ok(OceanWavesData {
            location: vec![location.lon_lat()],
            location_units: Unit::Degrees,
            frequency: metadata.frequency.clone(),
            frequency_units: Unit::Hertz,
            frequency_convention: FrequencyConvention::Absolute,
            direction,
            direction_units: directional.then_some(Unit::Degrees),
            direction_convention: directional.then_some(DirectionConvention::From),
            time_units: time.as_ref().map(|_| Unit::Seconds),
            time,
            energy,
            comments: metadata.comments(),
        })
    }
}
