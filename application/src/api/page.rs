//! [`ItemPage`]-related definitions.

use common::DateTime;
use derive_more::{Display, From, Into};
use juniper::{graphql_object, GraphQLObject, GraphQLScalar};
use service::{command, domain};
use uuid::Uuid;

use crate::{api, Context, Error};

/// An opened [`ItemPage`] of a `Listing`.
#[derive(Clone, Debug)]
pub struct ItemPage {
    /// Underlying [`domain::ItemPage`].
    page: domain::ItemPage,

    /// [`api::Listing`] shown on this [`ItemPage`].
    listing: api::Listing,
}

impl From<domain::ItemPage> for ItemPage {
    fn from(page: domain::ItemPage) -> Self {
        #[expect(unsafe_code, reason = "page is opened for existing listing")]
        let listing = unsafe { api::Listing::new_unchecked(page.listing_id) };
        Self { page, listing }
    }
}

/// Details and booking page of a `Listing`, opened by a visitor.
#[graphql_object(context = Context)]
impl ItemPage {
    /// Unique identifier of this `ItemPage`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "ItemPage.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.page.id.into()
    }

    /// `Listing` shown on this `ItemPage`.
    #[must_use]
    pub fn listing(&self) -> &api::Listing {
        &self.listing
    }

    /// Picked rental start, if any.
    #[must_use]
    pub fn start_date(&self) -> Option<DateTime> {
        self.page.dates.start.map(|d| d.coerce())
    }

    /// Picked rental end, if any.
    #[must_use]
    pub fn end_date(&self) -> Option<DateTime> {
        self.page.dates.end.map(|d| d.coerce())
    }

    /// Price breakdown for the picked dates.
    ///
    /// Zero-priced until both dates are picked.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "ItemPage.quote",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn quote(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Quote>, Error> {
        let listing = self.listing.listing(ctx).await?;
        Ok(self.page.quote(listing).map(Into::into))
    }

    /// Indicator whether the `Listing` is wishlisted on this `ItemPage`.
    #[must_use]
    pub fn is_wishlisted(&self) -> bool {
        self.page.is_wishlisted
    }

    /// Add-review form of this `ItemPage`.
    #[must_use]
    pub fn review_form(&self) -> api::review::Form {
        self.page.review_form.clone().into()
    }

    /// `Review`s shown on this `ItemPage`, newest first.
    #[must_use]
    pub fn reviews(&self) -> Vec<api::Review> {
        self.page.reviews.iter().cloned().map(Into::into).collect()
    }

    /// `DateTime` when this `ItemPage` was opened.
    #[must_use]
    pub fn opened_at(&self) -> DateTime {
        self.page.opened_at.coerce()
    }
}

/// Unique identifier of an `ItemPage`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::page::Id)]
#[into(domain::page::Id)]
#[graphql(name = "ItemPageId", transparent)]
pub struct Id(Uuid);

/// Result of toggling the wishlist on an `ItemPage`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context, name = "WishlistToggleResult")]
pub struct WishlistToggleResult {
    /// `ItemPage` with the wishlist toggled.
    pub page: ItemPage,

    /// `Notification` about the new wishlist state.
    pub notification: api::Notification,
}

impl From<command::toggle_item_page_wishlist::Output> for WishlistToggleResult {
    fn from(output: command::toggle_item_page_wishlist::Output) -> Self {
        let command::toggle_item_page_wishlist::Output { page, notification } =
            output;
        Self {
            page: page.into(),
            notification: notification.into(),
        }
    }
}

/// Result of submitting a `Review` on an `ItemPage`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context, name = "ReviewSubmitResult")]
pub struct ReviewSubmitResult {
    /// `ItemPage` with the `Review` prepended and the form reset.
    pub page: ItemPage,

    /// Submitted `Review`.
    pub review: api::Review,

    /// `Notification` about the submission.
    pub notification: api::Notification,
}

impl From<command::submit_item_page_review::Output> for ReviewSubmitResult {
    fn from(output: command::submit_item_page_review::Output) -> Self {
        let command::submit_item_page_review::Output {
            page,
            review,
            notification,
        } = output;
        Self {
            page: page.into(),
            review: review.into(),
            notification: notification.into(),
        }
    }
}

/// Result of requesting a `Booking` on an `ItemPage`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context, name = "BookingRequestResult")]
pub struct BookingRequestResult {
    /// Requested `Booking`.
    pub booking: api::Booking,

    /// `Notification` about the request.
    pub notification: api::Notification,
}

impl From<command::request_item_page_booking::Output>
    for BookingRequestResult
{
    fn from(output: command::request_item_page_booking::Output) -> Self {
        let command::request_item_page_booking::Output {
            booking,
            notification,
        } = output;
        Self {
            booking: booking.into(),
            notification: notification.into(),
        }
    }
}

/// Result of sharing an `ItemPage`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "ShareResult")]
pub struct ShareResult {
    /// Payload to hand to the native share sheet, if it's available.
    pub share: Option<api::share::Share>,

    /// `Notification` about sharing being unavailable.
    pub notification: Option<api::Notification>,
}
