/// Calculates the zero moment of a wave spectra point given energy and bandwidth
pub fn zero_spectral_moment(energy: f64, bandwidth: f64) -> f64 {
    energy * bandwidth
}

/// Significant wave height from the zeroth moment of a one dimensional spectrum
pub fn significant_wave_height(zero_moment: f64) -> f64 {
    4.0 * zero_moment.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_significant_wave_height() {
        let m0 = zero_spectral_moment(2.0, 0.125);
        assert!((significant_wave_height(m0) - 2.0).abs() < 0.00001);
    }
}
