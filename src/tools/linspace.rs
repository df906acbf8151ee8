/// Evenly spaced values over the closed interval [start, stop], numpy style
pub fn linspace(start: f64, stop: f64, count: usize) -> impl Iterator<Item = f64> {
    let step = if count > 1 {
        (stop - start) / (count - 1) as f64
    } else {
        0.0
    };

    (0..count).map(move |i| start + step * i as f64)
}
