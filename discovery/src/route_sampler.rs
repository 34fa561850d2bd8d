use common::types::geo_point::GeoPoint;

/// Picks evenly spaced sample points along `path`.
///
/// Every `max(1, len / desired_count)`-th point is taken starting at index 0,
/// and the final point is appended when the stride misses it. Paths shorter
/// than twice `desired_count` stride by 1, so the output holds at most
/// `2 * desired_count` points. A `desired_count` of 0 is treated as 1.
pub fn sample(path: &[GeoPoint], desired_count: usize) -> Vec<GeoPoint> {
    sample_indices(path.len(), desired_count)
        .into_iter()
        .map(|index| path[index])
        .collect()
}

/// Indices into a path of `len` points selected by [`sample`].
pub fn sample_indices(len: usize, desired_count: usize) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    let interval = (len / desired_count.max(1)).max(1);
    let mut indices: Vec<usize> = (0..len).step_by(interval).collect();
    let last = len - 1;
    if indices.last() != Some(&last) {
        indices.push(last);
    }
    indices
}
