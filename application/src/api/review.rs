//! [`Review`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::domain::{self, review};
use uuid::Uuid;

use crate::{api, api::scalar, Context};

/// A [`Review`] left on a `Listing`.
#[derive(Clone, Debug, From, Into)]
pub struct Review(domain::Review);

/// A review left on a `Listing` by a `User`.
#[graphql_object(context = Context)]
impl Review {
    /// Unique identifier of this `Review`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// ID of the `User` who left this `Review`.
    #[must_use]
    pub fn user_id(&self) -> api::user::Id {
        self.0.user_id.into()
    }

    /// Name of the `User` who left this `Review`.
    #[must_use]
    pub fn user_name(&self) -> api::user::Name {
        self.0.user_name.clone().into()
    }

    /// Rating of this `Review`.
    #[must_use]
    pub fn rating(&self) -> Rating {
        self.0.rating.into()
    }

    /// Comment of this `Review`, as typed by its author.
    #[must_use]
    pub fn comment(&self) -> &str {
        let comment: &str = self.0.comment.as_ref();
        comment
    }

    /// `DateTime` when this `Review` was left.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Add-review form of an `ItemPage`.
#[derive(Clone, Debug, From, Into)]
pub struct Form(review::Form);

/// Add-review form of an `ItemPage`.
#[graphql_object(name = "ReviewForm", context = Context)]
impl Form {
    /// Indicator whether this `ReviewForm` is shown.
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.0, review::Form::Composing(_))
    }

    /// Selected rating, if any.
    #[must_use]
    pub fn rating(&self) -> Option<Rating> {
        match &self.0 {
            review::Form::Composing(draft) => draft.rating.map(Into::into),
            review::Form::Idle => None,
        }
    }

    /// Typed comment text, empty if nothing is typed yet.
    #[must_use]
    pub fn comment(&self) -> &str {
        match &self.0 {
            review::Form::Composing(draft) => &draft.comment,
            review::Form::Idle => "",
        }
    }
}

/// Unique identifier of a `Review`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(review::Id)]
#[into(review::Id)]
#[graphql(name = "ReviewId", transparent)]
pub struct Id(Uuid);

/// Rating of a `Review`, from 1 to 5 stars.
#[derive(AsRef, Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "ReviewRating", with = scalar::ViaInt::<review::Rating>)]
pub struct Rating(review::Rating);
