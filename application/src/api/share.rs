//! [`Share`]-related definitions.

use std::sync::OnceLock;

use common::operations::Perform;
use derive_more::{AsRef, Display, Error, From, Into};
use juniper::{GraphQLObject, GraphQLScalar};
use service::{domain::page, infra::Platform};

use crate::api::{self, scalar};

/// Payload the client hands to its native share sheet.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "ItemPageShare")]
pub struct Share {
    /// Title of the shared `Listing`.
    pub title: api::listing::Title,

    /// Text accompanying the link.
    pub text: String,

    /// URL of the shared `ItemPage`.
    pub url: Url,
}

impl From<page::Share> for Share {
    fn from(share: page::Share) -> Self {
        let page::Share { title, text, url } = share;
        Self {
            title: title.into(),
            text,
            url: url.into(),
        }
    }
}

/// URL an `ItemPage` is visited at.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "ItemPageUrl", with = scalar::Via::<page::Url>)]
pub struct Url(page::Url);

/// [`Platform`] relaying the [`Share`] back to the client having a native
/// share sheet.
///
/// Holds at most one [`page::Share`] per request.
#[derive(Debug, Default)]
pub struct Relay(OnceLock<page::Share>);

impl Relay {
    /// Takes the relayed [`Share`], if any.
    #[must_use]
    pub fn into_share(self) -> Option<Share> {
        self.0.into_inner().map(Into::into)
    }
}

impl Platform<Perform<page::Share>> for Relay {
    type Ok = ();
    type Err = RelayError;

    async fn execute(
        &self,
        Perform(share): Perform<page::Share>,
    ) -> Result<Self::Ok, Self::Err> {
        self.0.set(share).map_err(|_| RelayError::AlreadyRelayed)
    }
}

/// Error of relaying a [`Share`].
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum RelayError {
    /// [`Share`] was relayed already within the same request.
    #[display("`Share` is relayed already")]
    AlreadyRelayed,
}
