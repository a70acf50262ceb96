//! [`Listing`] definitions.

use std::sync::LazyLock;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user;
#[cfg(doc)]
use crate::domain::User;

/// Item listed for rent by its owner.
#[derive(Clone, Debug)]
pub struct Listing {
    /// ID of this [`Listing`].
    pub id: Id,

    /// ID of the [`User`] who lends the item.
    pub owner_id: user::Id,

    /// [`Title`] of this [`Listing`].
    pub title: Title,

    /// [`Description`] of this [`Listing`].
    pub description: Description,

    /// [`ImageUrl`]s of this [`Listing`], the first one being the cover.
    pub images: Vec<ImageUrl>,

    /// Price of renting the item for a single day.
    pub price_per_day: Money,

    /// Refundable deposit paid once per booking, in the same currency as
    /// the [`Listing::price_per_day`].
    pub deposit_fee: Money,

    /// [`Condition`] of the item.
    pub condition: Condition,

    /// [`Category`] of the item.
    pub category: Category,

    /// [`Location`] where the item is picked up.
    pub location: Location,

    /// [`RentalPeriod`] bounds accepted by the owner.
    pub rental_period: RentalPeriod,

    /// Aggregate [`Rating`] of this [`Listing`], if it was rated at all.
    pub rating: Option<Rating>,

    /// Number of reviews the aggregate [`Rating`] is built from.
    pub review_count: u32,

    /// [`DateTime`] when this [`Listing`] was created.
    pub created_at: CreationDateTime,
}

impl Listing {
    /// Maximum price (per day or deposit) of a [`Listing`] in its currency.
    pub const MAX_PRICE: Decimal =
        Decimal::from_parts(1_000_000, 0, 0, false, 0);

    /// Returns the cover [`ImageUrl`] of this [`Listing`], if any.
    #[must_use]
    pub fn cover(&self) -> Option<&ImageUrl> {
        self.images.first()
    }

    /// Checks whether the provided price fits into the allowed range.
    #[must_use]
    pub fn is_valid_price(price: &Money) -> bool {
        price.amount >= Decimal::ZERO && price.amount <= Self::MAX_PRICE
    }
}

/// ID of a [`Listing`].
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

/// Title of a [`Listing`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Title(String);

impl Title {
    /// Creates a new [`Title`] if the given `title` is valid.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Option<Self> {
        let title = title.into();
        Self::check(&title).then_some(Self(title))
    }

    /// Checks whether the given `title` is a valid [`Title`].
    fn check(title: impl AsRef<str>) -> bool {
        let title = title.as_ref();
        title.trim() == title && !title.is_empty() && title.len() <= 512
    }
}

impl FromStr for Title {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Title`")
    }
}

/// Description of a [`Listing`].
///
/// May span multiple lines.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Description(String);

impl Description {
    /// Creates a new [`Description`] if the given `text` is valid.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        Self::check(&text).then_some(Self(text))
    }

    /// Checks whether the given `text` is a valid [`Description`].
    fn check(text: impl AsRef<str>) -> bool {
        let text = text.as_ref();
        text.trim() == text && !text.is_empty() && text.len() <= 4096
    }
}

impl FromStr for Description {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Description`")
    }
}

/// Reference to an image of a [`Listing`].
///
/// Either an absolute `http(s)` URL or a path on the same origin.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct ImageUrl(String);

impl ImageUrl {
    /// Creates a new [`ImageUrl`] if the given `url` is valid.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        Self::check(&url).then_some(Self(url))
    }

    /// Checks whether the given `url` is a valid [`ImageUrl`].
    fn check(url: impl AsRef<str>) -> bool {
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^(https?://[^\s/]+)?/\S*$").expect("valid regex")
        });

        let url = url.as_ref();
        url.len() <= 2048 && REGEX.is_match(url)
    }
}

impl FromStr for ImageUrl {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `ImageUrl`")
    }
}

/// Category of a [`Listing`] (`Tools`, `Camping`, etc).
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
pub struct Category(String);

impl Category {
    /// Creates a new [`Category`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Category`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 128
    }
}

impl FromStr for Category {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Category`")
    }
}

/// Human-readable location of a [`Listing`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Location(String);

impl Location {
    /// Creates a new [`Location`] if the given `location` is valid.
    #[must_use]
    pub fn new(location: impl Into<String>) -> Option<Self> {
        let location = location.into();
        Self::check(&location).then_some(Self(location))
    }

    /// Checks whether the given `location` is a valid [`Location`].
    fn check(location: impl AsRef<str>) -> bool {
        let location = location.as_ref();
        location.trim() == location
            && !location.is_empty()
            && location.len() <= 512
    }
}

impl FromStr for Location {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Location`")
    }
}

define_kind! {
    #[doc = "Condition of a [`Listing`] item."]
    enum Condition {
        #[doc = "Brand new, never used."]
        New = 1,

        #[doc = "Used, but without visible wear."]
        LikeNew = 2,

        #[doc = "Used, with minor signs of wear."]
        Good = 3,

        #[doc = "Used, with noticeable wear, fully functional."]
        Fair = 4,

        #[doc = "Heavily used."]
        Poor = 5,
    }
}

/// Number of days a [`Listing`] may be rented for, as accepted by its owner.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RentalPeriod {
    /// Minimum number of days.
    min_days: u16,

    /// Maximum number of days.
    max_days: u16,
}

impl RentalPeriod {
    /// Creates a new [`RentalPeriod`] if `1 <= min_days <= max_days`.
    #[must_use]
    pub fn new(min_days: u16, max_days: u16) -> Option<Self> {
        (min_days >= 1 && min_days <= max_days)
            .then_some(Self { min_days, max_days })
    }

    /// Returns the minimum number of days.
    #[must_use]
    pub fn min_days(&self) -> u16 {
        self.min_days
    }

    /// Returns the maximum number of days.
    #[must_use]
    pub fn max_days(&self) -> u16 {
        self.max_days
    }
}

/// Aggregate rating of a [`Listing`], from `0` to `5` stars.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub struct Rating(Decimal);

impl Rating {
    /// Creates a new [`Rating`] if the given `stars` are within `0..=5`.
    #[must_use]
    pub fn new(stars: Decimal) -> Option<Self> {
        (stars >= Decimal::ZERO && stars <= Decimal::from(5))
            .then_some(Self(stars))
    }

    /// Returns the number of stars of this [`Rating`].
    #[must_use]
    pub fn stars(&self) -> Decimal {
        self.0
    }
}

/// [`DateTime`] when a [`Listing`] was created.
pub type CreationDateTime = DateTimeOf<(Listing, unit::Creation)>;

#[cfg(test)]
mod spec {
    use common::Money;
    use rust_decimal::Decimal;

    use super::{ImageUrl, Listing, Rating, RentalPeriod, Title};

    #[test]
    fn validates_title() {
        assert!(Title::new("Cordless drill").is_some());
        assert!(Title::new("Cordless drill ").is_none());
        assert!(Title::new("").is_none());
    }

    #[test]
    fn validates_image_url() {
        assert!(ImageUrl::new("https://cdn.example.com/drill.jpg").is_some());
        assert!(ImageUrl::new("/uploads/drill.jpg").is_some());
        assert!(ImageUrl::new("drill.jpg").is_none());
        assert!(ImageUrl::new("https://cdn.example.com/a b.jpg").is_none());
    }

    #[test]
    fn validates_rental_period() {
        let period = RentalPeriod::new(1, 14).unwrap();
        assert_eq!((period.min_days(), period.max_days()), (1, 14));

        assert!(RentalPeriod::new(3, 3).is_some());
        assert!(RentalPeriod::new(0, 3).is_none());
        assert!(RentalPeriod::new(5, 3).is_none());
    }

    #[test]
    fn validates_rating() {
        assert!(Rating::new(Decimal::new(45, 1)).is_some());
        assert!(Rating::new(Decimal::ZERO).is_some());
        assert!(Rating::new(Decimal::new(51, 1)).is_none());
        assert!(Rating::new(Decimal::NEGATIVE_ONE).is_none());
    }

    #[test]
    fn validates_price() {
        assert!(Listing::is_valid_price(&"0USD".parse::<Money>().unwrap()));
        assert!(Listing::is_valid_price(
            &"1000000USD".parse::<Money>().unwrap()
        ));
        assert!(!Listing::is_valid_price(
            &"1000000.01USD".parse::<Money>().unwrap()
        ));
        assert!(!Listing::is_valid_price(&"-1USD".parse::<Money>().unwrap()));
    }
}
