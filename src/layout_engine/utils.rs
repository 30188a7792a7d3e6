//! Weighted splitting of lines and areas, and the inverse operation of turning
//! a dragged border back into weights.

use crate::common::util::clip;
use crate::sys::geometry::{Rect, RectDelta};

/// No segment is squeezed below this many pixels by [`adjust_weights`].
const MIN_SEGMENT_LENGTH: f64 = 1.0;

/// A 1-D segment: `(begin, length)`.
pub type Segment = (f64, f64);

/// Divides `line` into `weights.len()` segments proportional to the weights,
/// separated by `gap`. Every boundary is floored independently of the others,
/// so the result depends on the inputs alone.
pub fn split_weighted((begin, length): Segment, weights: &[f64], gap: f64) -> Vec<Segment> {
    let n = weights.len() as f64;
    let actual_length = length - (n - 1.0) * gap;
    let weight_sum: f64 = weights.iter().sum();

    let mut weight_acc = 0.0;
    weights
        .iter()
        .enumerate()
        .map(|(i, weight)| {
            let part_begin = actual_length * weight_acc / weight_sum + i as f64 * gap;
            let part_length = actual_length * weight / weight_sum;
            weight_acc += weight;
            (begin + part_begin.floor(), part_length.floor())
        })
        .collect()
}

pub fn split_area_weighted(area: Rect, weights: &[f64], gap: f64, horizontal: bool) -> Vec<Rect> {
    let line = if horizontal { (area.x, area.width) } else { (area.y, area.height) };
    split_weighted(line, weights, gap)
        .into_iter()
        .map(|(begin, length)| {
            if horizontal {
                Rect::new(begin, area.y, length, area.height)
            } else {
                Rect::new(area.x, begin, area.width, length)
            }
        })
        .collect()
}

/// Splits `area` in two; `weight` is the share of the left/upper half.
pub fn split_area_half_weighted(area: Rect, weight: f64, gap: f64, horizontal: bool) -> (Rect, Rect) {
    let parts = split_area_weighted(area, &[weight, 1.0 - weight], gap, horizontal);
    (parts[0], parts[1])
}

/// Re-derives weights after the borders of segment `target` moved.
///
/// `delta_fw` grows the segment towards the end of the line (borrowing from
/// the next segment), `delta_bw` towards the beginning (borrowing from the
/// previous one).
pub fn adjust_weights(
    line: Segment,
    weights: &[f64],
    gap: f64,
    target: usize,
    delta_fw: f64,
    delta_bw: f64,
) -> Vec<f64> {
    let mut parts = split_weighted(line, weights, gap);
    if target >= parts.len() {
        return weights.to_vec();
    }

    if target > 0 && delta_bw != 0.0 {
        let neighbor = target - 1;
        let (target_base, target_length) = parts[target];
        let (neighbor_base, neighbor_length) = parts[neighbor];
        let delta = clip(
            delta_bw,
            MIN_SEGMENT_LENGTH - target_length,
            neighbor_length - MIN_SEGMENT_LENGTH,
        );
        parts[target] = (target_base - delta, target_length + delta);
        parts[neighbor] = (neighbor_base, neighbor_length - delta);
    }

    if target + 1 < parts.len() && delta_fw != 0.0 {
        let neighbor = target + 1;
        let (target_base, target_length) = parts[target];
        let (neighbor_base, neighbor_length) = parts[neighbor];
        let delta = clip(
            delta_fw,
            MIN_SEGMENT_LENGTH - target_length,
            neighbor_length - MIN_SEGMENT_LENGTH,
        );
        parts[target] = (target_base, target_length + delta);
        parts[neighbor] = (neighbor_base + delta, neighbor_length - delta);
    }

    calculate_weights(&parts)
}

pub fn adjust_area_weights(
    area: Rect,
    weights: &[f64],
    gap: f64,
    target: usize,
    delta: RectDelta,
    horizontal: bool,
) -> Vec<f64> {
    let (line, delta_fw, delta_bw) = if horizontal {
        ((area.x, area.width), delta.east, delta.west)
    } else {
        ((area.y, area.height), delta.south, delta.north)
    };
    adjust_weights(line, weights, gap, target, delta_fw, delta_bw)
}

/// [`adjust_area_weights`] for a two-way split. Returns the new weight of the
/// first half.
pub fn adjust_area_half_weights(
    area: Rect,
    weight: f64,
    gap: f64,
    target: usize,
    delta: RectDelta,
    horizontal: bool,
) -> f64 {
    adjust_area_weights(area, &[weight, 1.0 - weight], gap, target, delta, horizontal)[0]
}

pub fn calculate_weights(parts: &[Segment]) -> Vec<f64> {
    let total: f64 = parts.iter().map(|(_, length)| length).sum();
    parts.iter().map(|(_, length)| length / total).collect()
}
