use rand::Rng;

/// The randomness a maze generator consumes.
///
/// Any `rand::Rng` qualifies; seed one (e.g. `XorShiftRng::from_seed`) for repeatable mazes.
pub trait RandomSource {
    /// A uniformly distributed index in `[0, upper)`.
    ///
    /// Panics if `upper` is zero.
    fn index_below(&mut self, upper: usize) -> usize;

    /// A uniformly chosen element, `None` if `items` is empty.
    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            let index = self.index_below(items.len());
            items.get(index)
        }
    }
}

impl<R: Rng> RandomSource for R {
    #[inline]
    fn index_below(&mut self, upper: usize) -> usize {
        self.gen_range(0, upper)
    }
}
