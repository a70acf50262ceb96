//! Infrastructure layer.

pub mod database;
pub mod platform;

pub use self::{database::Database, platform::Platform};
#[cfg(feature = "memory")]
pub use self::database::{memory, Memory};
