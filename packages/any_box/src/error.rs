use std::any::TypeId;

use thiserror::Error;

/// Errors that can occur when extracting a typed value from an
/// [`AnyBox`][crate::AnyBox].
///
/// Attempting to store a non-cloneable type has no runtime representation
/// here; it is rejected at compile time by the `Clone` bound on
/// [`AnyBox::new()`][crate::AnyBox::new].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The requested extraction type does not exactly match the type of the
    /// contained value, or the container is empty.
    #[error("requested type {requested} does not match the contained type (identity {actual:?})")]
    TypeMismatch {
        /// Name of the type the caller requested.
        requested: &'static str,

        /// Identity token of the type actually contained. An empty container
        /// reports the unit type identity.
        actual: TypeId,
    },
}

/// A specialized `Result` type for extraction operations, returning the
/// crate's [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;
