//! In-memory [`Database`] implementation.

mod impls;

use std::{collections::HashMap, sync::Arc};

use derive_more::{Display, Error as StdError};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::domain::{booking, listing, page, user};
#[cfg(doc)]
use crate::{
    domain::{Booking, ItemPage, Listing, User},
    infra::Database,
};

/// In-memory [`Database`] living as long as the process does.
///
/// Cheap to clone, all the clones share the same [`Storage`].
#[derive(Clone, Debug, Default)]
pub struct Memory(Arc<RwLock<Storage>>);

impl Memory {
    /// Creates a new empty [`Memory`] database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires a shared access to the [`Storage`].
    async fn read(&self) -> RwLockReadGuard<'_, Storage> {
        self.0.read().await
    }

    /// Acquires an exclusive access to the [`Storage`].
    async fn write(&self) -> RwLockWriteGuard<'_, Storage> {
        self.0.write().await
    }
}

/// Collections stored in a [`Memory`] database.
#[derive(Debug, Default)]
struct Storage {
    /// Registered [`User`]s.
    users: HashMap<user::Id, user::User>,

    /// Listed [`Listing`]s.
    listings: HashMap<listing::Id, listing::Listing>,

    /// Opened [`ItemPage`]s.
    pages: HashMap<page::Id, page::ItemPage>,

    /// Requested [`Booking`]s, in the order of insertion.
    bookings: Vec<booking::Booking>,
}

/// [`Memory`] database [`Error`].
#[derive(Clone, Debug, Display, StdError)]
pub enum Error {
    /// Unique constraint is violated.
    #[display("Unique constraint `{constraint}` is violated")]
    UniqueViolation {
        /// Name of the violated constraint.
        #[error(not(source))]
        constraint: &'static str,
    },

    /// Entity to update does not exist.
    #[display("`{entity}(id: {id})` does not exist")]
    NotExists {
        /// Name of the missing entity.
        entity: &'static str,

        /// ID of the missing entity.
        #[error(not(source))]
        id: Uuid,
    },
}

impl Error {
    /// Checks if the error is a unique violation of the specified constraint.
    #[must_use]
    pub fn is_unique_violation(&self, constraint: Option<&str>) -> bool {
        match self {
            Self::UniqueViolation { constraint: c } => {
                constraint.map_or(true, |constraint| *c == constraint)
            }
            Self::NotExists { .. } => false,
        }
    }
}
