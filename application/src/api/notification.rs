//! [`Notification`]-related definitions.

use juniper::{GraphQLEnum, GraphQLObject};
use service::domain;

/// Short message for the client to toast.
#[derive(Clone, Debug, GraphQLObject)]
pub struct Notification {
    /// Title of this `Notification`.
    pub title: String,

    /// Description of this `Notification`.
    pub description: String,

    /// Severity of this `Notification`.
    pub severity: Severity,
}

impl From<domain::Notification> for Notification {
    fn from(notification: domain::Notification) -> Self {
        let domain::Notification {
            title,
            description,
            severity,
        } = notification;
        Self {
            title: title.to_owned(),
            description: description.to_owned(),
            severity: severity.into(),
        }
    }
}

/// Severity of a `Notification`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "NotificationSeverity")]
pub enum Severity {
    /// Regular informational message.
    Default,

    /// Message about a failure.
    Destructive,
}

impl From<domain::notification::Severity> for Severity {
    fn from(severity: domain::notification::Severity) -> Self {
        use domain::notification::Severity as S;
        match severity {
            S::Default => Self::Default,
            S::Destructive => Self::Destructive,
        }
    }
}
