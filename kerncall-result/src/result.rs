use crate::error::Error;

/// Result type alias used throughout kerncall.
///
/// Shorthand for `std::result::Result<T, Error>`. Every fallible public
/// operation in the workspace returns this type.
pub type Result<T> = std::result::Result<T, Error>;
