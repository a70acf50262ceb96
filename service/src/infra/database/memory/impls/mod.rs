//! [`Database`] implementations for [`Memory`].
//!
//! [`Database`]: crate::infra::Database
//! [`Memory`]: super::Memory

mod booking;
mod listing;
mod page;
mod user;
