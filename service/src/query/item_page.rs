//! [`Query`] collection related to a single [`ItemPage`].

use common::operations::By;

use crate::domain::{page, ItemPage};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries an [`ItemPage`] by its [`page::Id`].
pub type ById = DatabaseQuery<By<Option<ItemPage>, page::Id>>;
