/// `count` evenly spaced values from `start` to `end`, both included
///
/// No values for a zero count and only `start` for a count of one.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| {
                    if i == count - 1 {
                        end
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}

/// Finite values of `values`, strictly ascending
pub fn sorted_union(values: impl IntoIterator<Item = f64>) -> Vec<f64> {
    let mut merged: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    merged.sort_by(f64::total_cmp);
    merged.dedup();
    merged
}
