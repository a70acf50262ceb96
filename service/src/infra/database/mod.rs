//! [`Database`]-related implementations.

#[cfg(feature = "memory")]
pub mod memory;

use derive_more::{Display, Error as StdError, From};

#[cfg(feature = "memory")]
pub use self::memory::Memory;

/// Database operation.
pub use common::Handler as Database;

/// [`Database`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(feature = "memory")]
    /// [`Memory`] error.
    Memory(memory::Error),
}

impl Error {
    /// Checks if the error is a unique violation of the specified constraint.
    #[must_use]
    pub fn is_unique_violation(&self, constraint: Option<&str>) -> bool {
        match *self {
            #[cfg(feature = "memory")]
            Self::Memory(ref e) => e.is_unique_violation(constraint),
        }
    }
}
