pub mod query;
pub mod sampling;

/// Number of whole steps of size `step` that fit into `span`.
///
/// A small tolerance absorbs rounding so that `span = k * step` yields `k`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn whole_steps(span: f64, step: f64) -> usize {
    let ratio = span / step;
    if ratio <= 0.0 {
        return 0;
    }
    (ratio + 1e-9).floor() as usize
}

/// Sample times `start + i * step` for `i` in `0..=steps`.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn time_grid(start: f64, step: f64, steps: usize) -> impl Iterator<Item = f64> {
    (0..=steps).map(move |i| start + i as f64 * step)
}
