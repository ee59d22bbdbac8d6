use core::hash::Hash;

/// Identity of a host element (DOM node id, widget id, arena key...).
///
/// Handles are compared by value: two equal handles are the same physical element.
pub trait RowHandle: Clone + Eq + Hash {}

impl<T: Clone + Eq + Hash> RowHandle for T {}
