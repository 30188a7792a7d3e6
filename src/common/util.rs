/// Clamps `value` into `[min, max]`. Unlike [`f64::clamp`] this never panics
/// when the bounds are inverted; `min` wins.
pub fn clip<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Moves `value` to the next multiple of `step` in the direction of `step`.
///
/// `slide(0.5, 0.05)` is `0.55`, `slide(0.52, -0.05)` is `0.5`.
pub fn slide(value: f64, step: f64) -> f64 {
    if step == 0.0 {
        return value;
    }
    (value / step + 1.000001).floor() * step
}

/// Wraps a signed index into `0..len`.
pub fn wrap_index(index: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    index.rem_euclid(len as isize) as usize
}

/// Splits `items` into `sizes.len() + 1` consecutive chunks. The last chunk
/// holds whatever is left; chunks past the end of `items` are empty.
pub fn partition_by_sizes<'a, T>(mut items: &'a mut [T], sizes: &[usize]) -> Vec<&'a mut [T]> {
    let mut chunks = Vec::with_capacity(sizes.len() + 1);
    for &size in sizes {
        let (head, tail) = items.split_at_mut(size.min(items.len()));
        chunks.push(head);
        items = tail;
    }
    chunks.push(items);
    chunks
}
