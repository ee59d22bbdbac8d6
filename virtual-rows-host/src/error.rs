/// Failure surfaced by the data request path.
///
/// Only produced when the loader is configured with `throw_error`; otherwise failures go to
/// the `fallback` hook and are swallowed.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum LoadError<E> {
    #[error("data request rejected")]
    Rejected(#[source] E),
}

impl<E> LoadError<E> {
    pub fn into_inner(self) -> E {
        match self {
            Self::Rejected(e) => e,
        }
    }
}
