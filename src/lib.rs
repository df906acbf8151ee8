//! Reader for WaveDroid wave buoy exports.
//!
//! A WaveDroid file is a `key = value` header followed by one `;` delimited observation
//! per line. Stations that declare `frequencies` in the header also report per frequency
//! directional moments, which are expanded into full directional spectra.
//!
//! ```no_run
//! use wavedroid::{FixedOffsetTable, WaveDroidReader};
//!
//! let reader = WaveDroidReader::from_path("WDwebdownload.csv").unwrap();
//! let waves = reader.to_ocean_waves(&FixedOffsetTable::default()).unwrap();
//! println!("{:?}", waves.energy.shape);
//! ```

pub mod config;
pub mod data;
pub mod location;
pub mod ocean_waves;
pub mod reader;
pub mod spectra;
pub mod timezone;
pub mod tools;
pub mod units;

pub use config::ReaderConfig;
pub use data::parseable_data_record::{Result, WaveDroidError};
pub use ocean_waves::{EnergyArray, OceanWavesData};
pub use reader::{ReaderVariant, WaveDroidReader};
pub use timezone::{FixedOffsetTable, TimezoneProvider};
