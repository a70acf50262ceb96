//! [`Query`] collection related to multiple [`Booking`]s.

use common::operations::By;

#[cfg(doc)]
use crate::domain::User;
use crate::domain::{user, Booking};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries [`Booking`]s requested by the [`User`] with the provided
/// [`user::Id`], newest first.
pub type ByRenter = DatabaseQuery<By<Vec<Booking>, user::Id>>;
