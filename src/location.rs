use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    #[serde(default)]
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(lat: f64, lon: f64, name: String) -> Location {
        Location {
            name,
            latitude: lat,
            longitude: lon,
        }
    }

    pub fn relative_longitude(&self) -> f64 {
        if self.longitude > 180.0 {
            self.longitude - 360.0
        } else {
            self.longitude
        }
    }

    /// The location as an (x, y) pair, longitude first
    pub fn lon_lat(&self) -> (f64, f64) {
        (self.relative_longitude(), self.latitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lon_lat_wraps_eastern_longitudes() {
        let location = Location::new(52.1, 356.5, "Scheveningen".into());
        let (lon, lat) = location.lon_lat();

        assert!((lon + 3.5).abs() < 0.0001);
        assert!((lat - 52.1).abs() < 0.0001);
    }
}
