/// Returns the difference between the arrays n and n+1 items in a new vector. The first
/// difference is repeated for the first item so the result has the same length as the input.
/// Inputs shorter than two items have no defined spacing and yield zeros.
pub fn diff<T>(data: &[T]) -> Vec<T>
where
    T: std::ops::Sub<Output = T> + Copy + Default,
{
    if data.len() < 2 {
        return vec![T::default(); data.len()];
    }

    (0..data.len())
        .map(|i| match i {
            0 => data[1] - data[0],
            _ => data[i] - data[i - 1],
        })
        .collect()
}

/// Returns the (min, max) of the data, skipping NaN values
pub fn min_max(data: &[f64]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    data.iter().for_each(|v| {
        if v.is_nan() {
            return;
        }

        if *v > max {
            max = *v;
        }

        if *v < min {
            min = *v;
        }
    });

    (min, max)
}

/// Circularly shifts the data to the right by `shift` positions, numpy `roll` style
pub fn roll<T: Copy>(data: &[T], shift: usize) -> Vec<T> {
    let n = data.len();
    if n == 0 {
        return Vec::new();
    }

    let shift = shift % n;
    (0..n).map(|i| data[(i + n - shift) % n]).collect()
}
