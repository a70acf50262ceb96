//! [`ItemPage`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    listing,
    quote::{DateRange, Quote},
    review, Listing, Review,
};

/// Single visit to the page of a [`Listing`].
///
/// Holds everything the visitor changes while on the page, and is gone once
/// it expires.
#[derive(Clone, Debug)]
pub struct ItemPage {
    /// ID of this [`ItemPage`].
    pub id: Id,

    /// ID of the [`Listing`] shown on this [`ItemPage`].
    pub listing_id: listing::Id,

    /// Rental [`DateRange`] picked on this [`ItemPage`].
    pub dates: DateRange,

    /// Indicator whether the [`Listing`] is wishlisted.
    pub is_wishlisted: bool,

    /// Add-review [`review::Form`] of this [`ItemPage`].
    pub review_form: review::Form,

    /// [`Review`]s shown on this [`ItemPage`], newest first.
    pub reviews: Vec<Review>,

    /// [`DateTime`] when this [`ItemPage`] was opened.
    pub opened_at: OpenedDateTime,

    /// [`DateTime`] of the latest change made on this [`ItemPage`].
    ///
    /// [`ItemPage`] expires once it stays idle for too long since this
    /// [`DateTime`].
    pub last_active_at: ActiveDateTime,
}

impl ItemPage {
    /// Opens a new [`ItemPage`] of the provided [`Listing`].
    #[must_use]
    pub fn open(listing: &Listing) -> Self {
        let now = OpenedDateTime::now();
        Self {
            id: Id::new(),
            listing_id: listing.id,
            dates: DateRange::default(),
            is_wishlisted: false,
            review_form: review::Form::Idle,
            reviews: Review::samples(listing.id),
            opened_at: now,
            last_active_at: now.coerce(),
        }
    }

    /// Flips the wishlist indicator, returning its new value.
    pub fn toggle_wishlist(&mut self) -> bool {
        self.is_wishlisted = !self.is_wishlisted;
        self.is_wishlisted
    }

    /// Shows the provided [`Review`] on top of the others.
    pub fn prepend_review(&mut self, review: Review) {
        self.reviews.insert(0, review);
    }

    /// Calculates the [`Quote`] of the picked [`DateRange`].
    #[must_use]
    pub fn quote(&self, listing: &Listing) -> Option<Quote> {
        Quote::new(listing, &self.dates)
    }
}

/// ID of an [`ItemPage`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Address an [`ItemPage`] is visited at.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str)]
pub struct Url(String);

impl Url {
    /// Creates a new [`Url`] if the given `url` is valid.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        Self::check(&url).then_some(Self(url))
    }

    /// Checks whether the given `url` is a valid [`Url`].
    fn check(url: impl AsRef<str>) -> bool {
        let url = url.as_ref();
        !url.is_empty()
            && url.len() <= 2048
            && !url.chars().any(char::is_whitespace)
    }
}

impl FromStr for Url {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Url`")
    }
}

/// Payload handed to a platform to share an [`ItemPage`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Share {
    /// Title of the shared [`Listing`].
    pub title: listing::Title,

    /// Text accompanying the link.
    pub text: String,

    /// [`Url`] of the shared [`ItemPage`].
    pub url: Url,
}

impl Share {
    /// Creates a new [`Share`] of the provided [`Listing`] visited at the
    /// provided [`Url`].
    #[must_use]
    pub fn new(listing: &Listing, url: Url) -> Self {
        Self {
            title: listing.title.clone(),
            text: format!("Check out this item: {}", listing.title),
            url,
        }
    }
}

/// [`DateTime`] when an [`ItemPage`] was opened.
pub type OpenedDateTime = DateTimeOf<(ItemPage, unit::Creation)>;

/// [`DateTime`] of the latest change made on an [`ItemPage`].
pub type ActiveDateTime = DateTimeOf<(ItemPage, unit::Activity)>;
