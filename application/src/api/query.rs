//! GraphQL [`Query`]s definitions.

use juniper::graphql_object;
use service::{query, Query as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns the currently authenticated `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "myUser",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn my_user(ctx: &Context) -> Result<api::User, Error> {
        let my_id = ctx.current_session().await?.user_id;
        ctx.service()
            .execute(query::user::ById::by(my_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| UserError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `User` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `USER_NOT_EXISTS` - the `User` with the specified ID does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "user",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn user(
        id: api::user::Id,
        ctx: &Context,
    ) -> Result<api::User, Error> {
        ctx.service()
            .execute(query::user::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| UserError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Listing` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LISTING_NOT_EXISTS` - the `Listing` with the specified ID does not
    ///                          exist, the `recovery` extension links to the
    ///                          listings browsing page.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "listing",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn listing(
        id: api::listing::Id,
        ctx: &Context,
    ) -> Result<api::Listing, Error> {
        ctx.service()
            .execute(query::listing::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| {
                Error::from(ListingError::NotExists)
                    .with_recovery(ctx.browse_url())
            })
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns all the `Listing`s, newest first.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "listings",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn listings(ctx: &Context) -> Result<Vec<api::Listing>, Error> {
        ctx.service()
            .execute(query::listings::All::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|listings| listings.into_iter().map(Into::into).collect())
    }

    /// Returns the opened `ItemPage` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `ITEM_PAGE_NOT_EXISTS` - the `ItemPage` with the specified ID does
    ///                            not exist or has expired.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "itemPage",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn item_page(
        id: api::page::Id,
        ctx: &Context,
    ) -> Result<api::ItemPage, Error> {
        ctx.service()
            .execute(query::item_page::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| ItemPageError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Booking`s requested by the currently authenticated
    /// `User`, newest first.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the current request is not authenticated.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "myBookings",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn my_bookings(
        ctx: &Context,
    ) -> Result<Vec<api::Booking>, Error> {
        let my_id = ctx.current_session().await?.user_id;
        ctx.service()
            .execute(query::bookings::ByRenter::by(my_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|bookings| bookings.into_iter().map(Into::into).collect())
    }
}

define_error! {
    enum ItemPageError {
        #[code = "ITEM_PAGE_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`ItemPage` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum ListingError {
        #[code = "LISTING_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Listing` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum UserError {
        #[code = "USER_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`User` with the specified ID does not exist"]
        NotExists,
    }
}
