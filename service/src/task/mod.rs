//! Background [`Task`]s definitions.

mod background;
pub mod expire_item_pages;

pub use common::Handler as Task;

pub use self::{background::Background, expire_item_pages::ExpireItemPages};
