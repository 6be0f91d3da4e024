use std::cmp::Ordering;

/// Three-way ordering rule used to place elements in a tree.
///
/// Implementations must be consistent and transitive. Anything else leaves the
/// tree memory safe but its ordering unspecified.
pub trait Comparator<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// Orders elements by their `Ord` implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Adapts a closure that answers with a signed value, such as `|a, b| a - b`.
///
/// Negative means less, zero means equal, positive means greater. A result
/// that cannot be compared against zero (NaN) counts as equal.
#[derive(Debug, Clone, Copy)]
pub struct Signed<F>(pub F);

impl<T: ?Sized, S, F> Comparator<T> for Signed<F>
where
    F: Fn(&T, &T) -> S,
    S: PartialOrd + Default,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.0)(a, b)
            .partial_cmp(&S::default())
            .unwrap_or(Ordering::Equal)
    }
}
