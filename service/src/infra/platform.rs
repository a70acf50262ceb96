//! [`Platform`] capabilities definitions.

/// Capability provided by the platform a [`Service`] is used on, like
/// sharing a link natively.
///
/// [`Service`]: crate::Service
pub use common::Handler as Platform;
