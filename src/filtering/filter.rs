//! Filtering traits.

/// immutable, pure filter (2 successive equal inputs -> 2 equal outputs).
///
/// `detect` returns `true` when the item is kept.
pub trait Filter<T>: Default {
    fn detect(&self, item: T) -> bool;
}
