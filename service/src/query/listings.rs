//! [`Query`] collection related to multiple [`Listing`]s.

use common::operations::By;

use crate::domain::{user, Listing};
#[cfg(doc)]
use crate::domain::User;
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries all the [`Listing`]s, newest first.
pub type All = DatabaseQuery<By<Vec<Listing>, ()>>;

/// Queries [`Listing`]s lent by the [`User`] with the provided [`user::Id`],
/// newest first.
pub type ByOwner = DatabaseQuery<By<Vec<Listing>, user::Id>>;
