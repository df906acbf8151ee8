pub mod direction;

pub use direction::DirectionConvention;

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    Meters,
    Seconds,
    Hertz,
    Degrees,
    SquareMetersPerHertz,
}

impl Unit {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Unit::Meters => "m",
            Unit::Seconds => "s",
            Unit::Hertz => "Hz",
            Unit::Degrees => "deg",
            Unit::SquareMetersPerHertz => "m^2/Hz",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

/// Frequencies are measured in a fixed frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrequencyConvention {
    Absolute,
}

impl FrequencyConvention {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrequencyConvention::Absolute => "absolute",
        }
    }
}
