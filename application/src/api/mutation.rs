//! GraphQL [`Mutation`]s definitions.

use common::{DateTime, Money};
use juniper::graphql_object;
use service::{
    command::{self, edit_item_page_review::Edit},
    domain::{listing, DateRange},
    Command as _,
};

use crate::{api, define_error, AsError, Context, Error, Session};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";

    /// Applies the provided [`Edit`] to the review form of the `ItemPage`.
    async fn edit_review(
        page_id: api::page::Id,
        edit: Edit,
        ctx: &Context,
    ) -> Result<api::ItemPage, Error> {
        let user_id = ctx.current_user_id().await?;
        ctx.service()
            .execute(command::EditItemPageReview {
                page_id: page_id.into(),
                user_id: user_id.map(Into::into),
                edit,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Creates a new `User` with the provided credentials.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LOGIN_OCCUPIED` - provided `UserLogin` is occupied by another
    ///                      `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createUser",
            login = %login,
            name = %name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_user(
        name: api::user::Name,
        login: api::user::Login,
        password: api::user::Password,
        ctx: &Context,
    ) -> Result<api::user::session::CreateResult, Error> {
        let user = ctx
            .service()
            .execute(command::CreateUser {
                name: name.into(),
                login: login.into(),
                password: secrecy::SecretBox::init_with(move || {
                    password.into()
                }),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;
        let output = ctx
            .service()
            .execute(command::CreateUserSession::ByUserId(user.id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        ctx.set_current_session(Session {
            user_id: output.user.id.into(),
            token: output.token.clone(),
            expires_at: output.expires_at.coerce(),
        })
        .await;

        Ok(output.into())
    }

    /// Creates a new `UserSession` with the provided credentials.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `WRONG_CREDENTIALS` - provided credentials does not match any `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createUserSession",
            login = %login,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_user_session(
        login: api::user::Login,
        password: api::user::Password,
        ctx: &Context,
    ) -> Result<api::user::session::CreateResult, Error> {
        let output = ctx
            .service()
            .execute(command::CreateUserSession::ByCredentials {
                login: login.into(),
                password: secrecy::SecretBox::init_with(move || {
                    password.into()
                }),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        ctx.set_current_session(Session {
            user_id: output.user.id.into(),
            token: output.token.clone(),
            expires_at: output.expires_at.coerce(),
        })
        .await;

        Ok(output.into())
    }

    /// Lists a new item for rent on behalf of the authenticated `User`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the current request is not authenticated;
    /// - `NO_IMAGES` - no `ListingImageUrl` is provided;
    /// - `INVALID_PRICE` - price or deposit is negative or too large;
    /// - `CURRENCY_MISMATCH` - deposit currency differs from the price one;
    /// - `INVALID_RENTAL_PERIOD` - rental days bounds are not ordered or not
    ///                             positive.
    #[expect(clippy::too_many_arguments, reason = "GraphQL arguments")]
    #[tracing::instrument(
        skip_all,
        fields(
            category = %category,
            gql.name = "createListing",
            otel.name = Self::SPAN_NAME,
            price_per_day = %price_per_day,
            title = %title,
        ),
    )]
    pub async fn create_listing(
        title: api::listing::Title,
        description: api::listing::Description,
        images: Vec<api::listing::ImageUrl>,
        price_per_day: Money,
        deposit_fee: Money,
        condition: api::listing::Condition,
        category: api::listing::Category,
        location: api::listing::Location,
        min_rental_days: i32,
        max_rental_days: i32,
        ctx: &Context,
    ) -> Result<api::Listing, Error> {
        let my_id = ctx.current_session().await?.user_id;
        let rental_period = u16::try_from(min_rental_days)
            .ok()
            .zip(u16::try_from(max_rental_days).ok())
            .and_then(|(min, max)| listing::RentalPeriod::new(min, max))
            .ok_or_else(|| RentalPeriodError::Invalid.into())
            .map_err(ctx.error())?;

        ctx.service()
            .execute(command::CreateListing {
                owner_id: my_id.into(),
                title: title.into(),
                description: description.into(),
                images: images.into_iter().map(Into::into).collect(),
                price_per_day,
                deposit_fee,
                condition: condition.into(),
                category: category.into(),
                location: location.into(),
                rental_period,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Opens a new `ItemPage` of the `Listing` with the specified ID.
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
            gql.name = "openItemPage",
            listing_id = %listing_id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn open_item_page(
        listing_id: api::listing::Id,
        ctx: &Context,
    ) -> Result<api::ItemPage, Error> {
        ctx.service()
            .execute(command::OpenItemPage {
                listing_id: listing_id.into(),
            })
            .await
            .map_err(|e| {
                let missing = matches!(
                    e.as_ref(),
                    command::open_item_page::ExecutionError::ListingNotExists(
                        _
                    ),
                );
                let err = e.into_error();
                if missing {
                    err.with_recovery(ctx.browse_url())
                } else {
                    err
                }
            })
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Picks the rental dates on the `ItemPage`, clearing the omitted ones.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `ITEM_PAGE_NOT_EXISTS` - the `ItemPage` does not exist or expired.
    #[tracing::instrument(
        skip_all,
        fields(
            end_date = ?end_date,
            gql.name = "selectItemPageDates",
            otel.name = Self::SPAN_NAME,
            page_id = %page_id,
            start_date = ?start_date,
        ),
    )]
    pub async fn select_item_page_dates(
        page_id: api::page::Id,
        start_date: Option<DateTime>,
        end_date: Option<DateTime>,
        ctx: &Context,
    ) -> Result<api::ItemPage, Error> {
        ctx.service()
            .execute(command::SelectItemPageDates {
                page_id: page_id.into(),
                dates: DateRange::new(
                    start_date.map(DateTime::coerce),
                    end_date.map(DateTime::coerce),
                ),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Toggles the wishlist marker on the `ItemPage`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `ITEM_PAGE_NOT_EXISTS` - the `ItemPage` does not exist or expired.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "toggleItemPageWishlist",
            otel.name = Self::SPAN_NAME,
            page_id = %page_id,
        ),
    )]
    pub async fn toggle_item_page_wishlist(
        page_id: api::page::Id,
        ctx: &Context,
    ) -> Result<api::page::WishlistToggleResult, Error> {
        ctx.service()
            .execute(command::ToggleItemPageWishlist {
                page_id: page_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Shows the add-review form on the `ItemPage`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `ITEM_PAGE_NOT_EXISTS` - the `ItemPage` does not exist or expired;
    /// - `AUTHENTICATION_REQUIRED` - the current request is not
    ///                               authenticated.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "openItemPageReview",
            otel.name = Self::SPAN_NAME,
            page_id = %page_id,
        ),
    )]
    pub async fn open_item_page_review(
        page_id: api::page::Id,
        ctx: &Context,
    ) -> Result<api::ItemPage, Error> {
        Self::edit_review(page_id, Edit::Open, ctx).await
    }

    /// Selects the rating in the add-review form on the `ItemPage`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `ITEM_PAGE_NOT_EXISTS` - the `ItemPage` does not exist or expired;
    /// - `REVIEW_FORM_CLOSED` - the add-review form is not shown.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "rateItemPageReview",
            otel.name = Self::SPAN_NAME,
            page_id = %page_id,
            rating = %rating,
        ),
    )]
    pub async fn rate_item_page_review(
        page_id: api::page::Id,
        rating: api::review::Rating,
        ctx: &Context,
    ) -> Result<api::ItemPage, Error> {
        Self::edit_review(page_id, Edit::Rate(rating.into()), ctx).await
    }

    /// Replaces the comment in the add-review form on the `ItemPage`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `ITEM_PAGE_NOT_EXISTS` - the `ItemPage` does not exist or expired;
    /// - `REVIEW_FORM_CLOSED` - the add-review form is not shown.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "commentItemPageReview",
            otel.name = Self::SPAN_NAME,
            page_id = %page_id,
        ),
    )]
    pub async fn comment_item_page_review(
        page_id: api::page::Id,
        comment: String,
        ctx: &Context,
    ) -> Result<api::ItemPage, Error> {
        Self::edit_review(page_id, Edit::Comment(comment), ctx).await
    }

    /// Hides the add-review form on the `ItemPage`, discarding its draft.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `ITEM_PAGE_NOT_EXISTS` - the `ItemPage` does not exist or expired.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "cancelItemPageReview",
            otel.name = Self::SPAN_NAME,
            page_id = %page_id,
        ),
    )]
    pub async fn cancel_item_page_review(
        page_id: api::page::Id,
        ctx: &Context,
    ) -> Result<api::ItemPage, Error> {
        Self::edit_review(page_id, Edit::Cancel, ctx).await
    }

    /// Submits the add-review form on the `ItemPage`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHENTICATION_REQUIRED` - the current request is not
    ///                               authenticated;
    /// - `ITEM_PAGE_NOT_EXISTS` - the `ItemPage` does not exist or expired;
    /// - `RATING_REQUIRED` - no rating is selected;
    /// - `COMMENT_REQUIRED` - the comment is blank.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "submitItemPageReview",
            otel.name = Self::SPAN_NAME,
            page_id = %page_id,
        ),
    )]
    pub async fn submit_item_page_review(
        page_id: api::page::Id,
        ctx: &Context,
    ) -> Result<api::page::ReviewSubmitResult, Error> {
        let user_id = ctx.current_user_id().await?;
        ctx.service()
            .execute(command::SubmitItemPageReview {
                page_id: page_id.into(),
                user_id: user_id.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Requests a `Booking` of the `Listing` for the dates picked on the
    /// `ItemPage`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHENTICATION_REQUIRED` - the current request is not
    ///                               authenticated;
    /// - `ITEM_PAGE_NOT_EXISTS` - the `ItemPage` does not exist or expired;
    /// - `DATES_REQUIRED` - either rental date is not picked;
    /// - `LISTING_NOT_EXISTS` - the `Listing` was removed;
    /// - `OWN_LISTING` - the authenticated `User` owns the `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "requestItemPageBooking",
            otel.name = Self::SPAN_NAME,
            page_id = %page_id,
        ),
    )]
    pub async fn request_item_page_booking(
        page_id: api::page::Id,
        ctx: &Context,
    ) -> Result<api::page::BookingRequestResult, Error> {
        let renter_id = ctx.current_user_id().await?;
        ctx.service()
            .execute(command::RequestItemPageBooking {
                page_id: page_id.into(),
                renter_id: renter_id.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Shares the `ItemPage` visited at the provided URL.
    ///
    /// If the client has a native share sheet, the payload to hand to it is
    /// returned. Otherwise, a destructive `Notification` is returned.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `ITEM_PAGE_NOT_EXISTS` - the `ItemPage` does not exist or expired;
    /// - `LISTING_NOT_EXISTS` - the `Listing` was removed.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "shareItemPage",
            native_share = native_share,
            otel.name = Self::SPAN_NAME,
            page_id = %page_id,
            url = %url,
        ),
    )]
    pub async fn share_item_page(
        page_id: api::page::Id,
        url: api::share::Url,
        native_share: bool,
        ctx: &Context,
    ) -> Result<api::page::ShareResult, Error> {
        let relay = api::share::Relay::default();
        let notification = ctx
            .service()
            .execute(command::ShareItemPage {
                page_id: page_id.into(),
                url: url.into(),
                platform: native_share.then_some(&relay),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        Ok(api::page::ShareResult {
            share: relay.into_share(),
            notification: notification.map(Into::into),
        })
    }
}

impl AsError for command::create_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "LOGIN_OCCUPIED"]
                #[status = CONFLICT]
                #[message = "`UserLogin` is occupied by another `User`"]
                LoginOccupied,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::LoginOccupied(_) => Some(Error::LoginOccupied.into()),
        }
    }
}

impl AsError for command::create_user_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "WRONG_CREDENTIALS"]
                #[status = FORBIDDEN]
                #[message = "Provided credentials does not match any `User`"]
                WrongCredentials,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::JsonWebTokenEncodeError(_) => None,
            Self::UserNotExists(_) | Self::WrongCredentials => {
                Some(Error::WrongCredentials.into())
            }
        }
    }
}

impl AsError for command::create_listing::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "NO_IMAGES"]
                #[status = BAD_REQUEST]
                #[message = "`Listing` must have at least one image"]
                NoImages,

                #[code = "INVALID_PRICE"]
                #[status = BAD_REQUEST]
                #[message = "Price must be from 0 to 1000000"]
                InvalidPrice,

                #[code = "CURRENCY_MISMATCH"]
                #[status = BAD_REQUEST]
                #[message = "Deposit must be in the daily price currency"]
                CurrencyMismatch,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NoImages => Some(Error::NoImages.into()),
            Self::InvalidPrice(_) => Some(Error::InvalidPrice.into()),
            Self::CurrencyMismatch(_) => Some(Error::CurrencyMismatch.into()),
            Self::OwnerNotExists(_) => None,
        }
    }
}

impl AsError for command::open_item_page::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ListingNotExists(_) => {
                Some(api::query::ListingError::NotExists.into())
            }
        }
    }
}

impl AsError for command::select_item_page_dates::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PageNotExists(_) => {
                Some(api::query::ItemPageError::NotExists.into())
            }
        }
    }
}

impl AsError for command::toggle_item_page_wishlist::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PageNotExists(_) => {
                Some(api::query::ItemPageError::NotExists.into())
            }
        }
    }
}

impl AsError for command::edit_item_page_review::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PageNotExists(_) => {
                Some(api::query::ItemPageError::NotExists.into())
            }
            Self::Unauthenticated => {
                Some(ReviewError::AuthenticationRequired.into())
            }
            Self::FormClosed(_) => Some(ReviewError::FormClosed.into()),
        }
    }
}

impl AsError for command::submit_item_page_review::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use service::domain::review::SubmissionError as E;

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PageNotExists(_) => {
                Some(api::query::ItemPageError::NotExists.into())
            }
            Self::Unauthenticated => {
                Some(ReviewError::AuthenticationRequired.into())
            }
            Self::Incomplete(E::RatingRequired) => {
                Some(ReviewError::RatingRequired.into())
            }
            Self::Incomplete(E::CommentRequired) => {
                Some(ReviewError::CommentRequired.into())
            }
            Self::Incomplete(E::CommentTooLong) => {
                Some(ReviewError::CommentTooLong.into())
            }
            Self::UserNotExists(_) => None,
        }
    }
}

impl AsError for command::request_item_page_booking::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::Unauthenticated => {
                Some(BookingError::AuthenticationRequired.into())
            }
            Self::PageNotExists(_) => {
                Some(api::query::ItemPageError::NotExists.into())
            }
            Self::DatesRequired => Some(BookingError::DatesRequired.into()),
            Self::ListingNotExists(_) => {
                Some(api::query::ListingError::NotExists.into())
            }
            Self::OwnListing(_) => Some(BookingError::OwnListing.into()),
            Self::UserNotExists(_) | Self::QuoteOverflow(_) => None,
        }
    }
}

impl AsError for command::share_item_page::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PageNotExists(_) => {
                Some(api::query::ItemPageError::NotExists.into())
            }
            Self::ListingNotExists(_) => {
                Some(api::query::ListingError::NotExists.into())
            }
        }
    }
}

define_error! {
    enum BookingError {
        #[code = "AUTHENTICATION_REQUIRED"]
        #[status = UNAUTHORIZED]
        #[message = "Please login to book this item."]
        AuthenticationRequired,

        #[code = "DATES_REQUIRED"]
        #[status = BAD_REQUEST]
        #[message = "Please select start and end dates for your booking."]
        DatesRequired,

        #[code = "OWN_LISTING"]
        #[status = FORBIDDEN]
        #[message = "You cannot book an item that you've listed."]
        OwnListing,
    }
}

define_error! {
    enum ReviewError {
        #[code = "AUTHENTICATION_REQUIRED"]
        #[status = UNAUTHORIZED]
        #[message = "Please login to leave a review."]
        AuthenticationRequired,

        #[code = "REVIEW_FORM_CLOSED"]
        #[status = CONFLICT]
        #[message = "Open the review form first."]
        FormClosed,

        #[code = "RATING_REQUIRED"]
        #[status = BAD_REQUEST]
        #[message = "Please select a star rating."]
        RatingRequired,

        #[code = "COMMENT_REQUIRED"]
        #[status = BAD_REQUEST]
        #[message = "Please write a comment for your review."]
        CommentRequired,

        #[code = "COMMENT_TOO_LONG"]
        #[status = BAD_REQUEST]
        #[message = "Please shorten your comment to 4096 characters."]
        CommentTooLong,
    }
}

define_error! {
    enum RentalPeriodError {
        #[code = "INVALID_RENTAL_PERIOD"]
        #[status = BAD_REQUEST]
        #[message = "Rental days must satisfy \
                     `1 <= minRentalDays <= maxRentalDays`"]
        Invalid,
    }
}
