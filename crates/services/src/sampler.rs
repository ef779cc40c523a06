use rand::Rng;

/// Picks which row to practise next.
///
/// `Random` draws uniformly from the thread-local generator on every call.
/// `Fixed` always returns the same index (clamped into range) so services
/// and views can be tested deterministically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Sampler {
    #[default]
    Random,
    Fixed(usize),
}

impl Sampler {
    /// Returns an index in `0..row_count`, or `None` for an empty table.
    #[must_use]
    pub fn draw(&self, row_count: usize) -> Option<usize> {
        if row_count == 0 {
            return None;
        }
        match self {
            Sampler::Random => Some(rand::rng().random_range(0..row_count)),
            Sampler::Fixed(index) => Some((*index).min(row_count - 1)),
        }
    }
}
