//! [`Notification`] definitions.

use common::define_kind;

/// Short message shown to a user as a result of an action.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Notification {
    /// Title of this [`Notification`].
    pub title: &'static str,

    /// Description of this [`Notification`].
    pub description: &'static str,

    /// [`Severity`] of this [`Notification`].
    pub severity: Severity,
}

impl Notification {
    /// Creates a new [`Severity::Default`] [`Notification`].
    #[must_use]
    pub const fn new(title: &'static str, description: &'static str) -> Self {
        Self {
            title,
            description,
            severity: Severity::Default,
        }
    }

    /// Creates a new [`Severity::Destructive`] [`Notification`].
    #[must_use]
    pub const fn destructive(
        title: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            title,
            description,
            severity: Severity::Destructive,
        }
    }
}

define_kind! {
    #[doc = "Severity of a [`Notification`]."]
    enum Severity {
        #[doc = "Informational outcome."]
        Default = 1,

        #[doc = "Something the user wanted did not happen."]
        Destructive = 2,
    }
}
