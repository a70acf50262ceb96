//! Marker types distinguishing [`DateTimeOf`] kinds.
//!
//! [`DateTimeOf`]: crate::DateTimeOf

/// Marker type describing an entity creation.
#[derive(Clone, Copy, Debug)]
pub struct Creation;

/// Marker type describing an entity expiration.
#[derive(Clone, Copy, Debug)]
pub struct Expiration;

/// Marker type describing the beginning of a period.
#[derive(Clone, Copy, Debug)]
pub struct Start;

/// Marker type describing the end of a period.
#[derive(Clone, Copy, Debug)]
pub struct End;

/// Marker type describing the latest activity on an entity.
#[derive(Clone, Copy, Debug)]
pub struct Activity;
