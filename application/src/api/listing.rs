//! [`Listing`]-related definitions.

use std::future;

use common::{DateTime, Handler as _, Money};
use derive_more::{AsRef, Display, From, Into};
use futures::TryFutureExt as _;
use juniper::{graphql_object, GraphQLEnum, GraphQLScalar};
use rust_decimal::prelude::ToPrimitive as _;
use service::{domain, query};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{api, api::scalar, AsError, Context, Error};

/// An item listed for rent.
#[derive(Clone, Debug, From)]
pub struct Listing {
    /// ID of this [`Listing`].
    id: Id,

    /// Underlying [`domain::Listing`].
    listing: OnceCell<domain::Listing>,
}

impl From<domain::Listing> for Listing {
    fn from(listing: domain::Listing) -> Self {
        Self {
            id: listing.id.into(),
            listing: OnceCell::new_with(Some(listing)),
        }
    }
}

impl Listing {
    /// Creates a new [`Listing`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Listing`] with the provided ID exists,
    /// otherwise accessing this [`Listing`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            listing: OnceCell::new(),
        }
    }

    /// Returns the underlying [`domain::Listing`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::Listing`] doesn't exist.
    pub(crate) async fn listing(
        &self,
        ctx: &Context,
    ) -> Result<&domain::Listing, Error> {
        let id = self.id.into();
        self.listing
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::listing::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|l| {
                        future::ready(l.ok_or_else(|| {
                            Error::from(api::query::ListingError::NotExists)
                                .with_recovery(ctx.browse_url())
                        }))
                    })
            })
            .await
    }
}

/// An item listed for rent by its owner.
#[graphql_object(context = Context)]
impl Listing {
    /// Unique identifier of this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Title of this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.title",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn title(&self, ctx: &Context) -> Result<Title, Error> {
        Ok(self.listing(ctx).await?.title.clone().into())
    }

    /// Description of this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.description",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn description(
        &self,
        ctx: &Context,
    ) -> Result<Description, Error> {
        Ok(self.listing(ctx).await?.description.clone().into())
    }

    /// Images of this `Listing`, the first one being the cover.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.images",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn images(&self, ctx: &Context) -> Result<Vec<ImageUrl>, Error> {
        Ok(self
            .listing(ctx)
            .await?
            .images
            .iter()
            .cloned()
            .map(Into::into)
            .collect())
    }

    /// Cover image of this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.cover",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn cover(
        &self,
        ctx: &Context,
    ) -> Result<Option<ImageUrl>, Error> {
        Ok(self.listing(ctx).await?.cover().cloned().map(Into::into))
    }

    /// Price of renting the item for a single day.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.pricePerDay",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn price_per_day(&self, ctx: &Context) -> Result<Money, Error> {
        Ok(self.listing(ctx).await?.price_per_day)
    }

    /// Refundable deposit paid once per booking.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.depositFee",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn deposit_fee(&self, ctx: &Context) -> Result<Money, Error> {
        Ok(self.listing(ctx).await?.deposit_fee)
    }

    /// Condition of the item.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.condition",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn condition(&self, ctx: &Context) -> Result<Condition, Error> {
        Ok(self.listing(ctx).await?.condition.into())
    }

    /// Category of the item.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.category",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn category(&self, ctx: &Context) -> Result<Category, Error> {
        Ok(self.listing(ctx).await?.category.clone().into())
    }

    /// Location where the item is picked up.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.location",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn location(&self, ctx: &Context) -> Result<Location, Error> {
        Ok(self.listing(ctx).await?.location.clone().into())
    }

    /// Minimum number of days the item may be rented for.
    pub async fn min_rental_days(&self, ctx: &Context) -> Result<i32, Error> {
        Ok(self.listing(ctx).await?.rental_period.min_days().into())
    }

    /// Maximum number of days the item may be rented for.
    pub async fn max_rental_days(&self, ctx: &Context) -> Result<i32, Error> {
        Ok(self.listing(ctx).await?.rental_period.max_days().into())
    }

    /// Aggregate rating of this `Listing` in stars, if rated at all.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.rating",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn rating(&self, ctx: &Context) -> Result<Option<f64>, Error> {
        Ok(self
            .listing(ctx)
            .await?
            .rating
            .and_then(|r| r.stars().to_f64()))
    }

    /// Number of reviews the `rating` is built from.
    pub async fn review_count(&self, ctx: &Context) -> Result<i32, Error> {
        i32::try_from(self.listing(ctx).await?.review_count)
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// `User` lending the item.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.owner",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn owner(&self, ctx: &Context) -> Result<api::User, Error> {
        let owner_id = self.listing(ctx).await?.owner_id;
        #[expect(unsafe_code, reason = "owner is checked on creation")]
        let owner = unsafe { api::User::new_unchecked(owner_id) };
        Ok(owner)
    }

    /// `DateTime` when this `Listing` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.listing(ctx).await?.created_at.coerce())
    }
}

/// Unique identifier of a `Listing`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::listing::Id)]
#[into(domain::listing::Id)]
#[graphql(name = "ListingId", transparent)]
pub struct Id(Uuid);

/// Title of a `Listing`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ListingTitle",
    with = scalar::Via::<domain::listing::Title>,
)]
pub struct Title(domain::listing::Title);

/// Description of a `Listing`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ListingDescription",
    with = scalar::Via::<domain::listing::Description>,
)]
pub struct Description(domain::listing::Description);

/// URL of a `Listing` image.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ListingImageUrl",
    with = scalar::Via::<domain::listing::ImageUrl>,
)]
pub struct ImageUrl(domain::listing::ImageUrl);

/// Category of a `Listing`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ListingCategory",
    with = scalar::Via::<domain::listing::Category>,
)]
pub struct Category(domain::listing::Category);

/// Pick-up location of a `Listing`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ListingLocation",
    with = scalar::Via::<domain::listing::Location>,
)]
pub struct Location(domain::listing::Location);

/// Condition of a `Listing` item.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "ListingCondition")]
pub enum Condition {
    /// Brand new, never used.
    New,

    /// Used, but without visible wear.
    LikeNew,

    /// Used, with minor signs of wear.
    Good,

    /// Used, with noticeable wear, fully functional.
    Fair,

    /// Heavily used.
    Poor,
}

impl From<domain::listing::Condition> for Condition {
    fn from(condition: domain::listing::Condition) -> Self {
        use domain::listing::Condition as C;
        match condition {
            C::New => Self::New,
            C::LikeNew => Self::LikeNew,
            C::Good => Self::Good,
            C::Fair => Self::Fair,
            C::Poor => Self::Poor,
        }
    }
}

impl From<Condition> for domain::listing::Condition {
    fn from(condition: Condition) -> Self {
        match condition {
            Condition::New => Self::New,
            Condition::LikeNew => Self::LikeNew,
            Condition::Good => Self::Good,
            Condition::Fair => Self::Fair,
            Condition::Poor => Self::Poor,
        }
    }
}
