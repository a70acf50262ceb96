//! [`Booking`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf, Money};
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{listing, user};
#[cfg(doc)]
use crate::domain::{quote::Quote, Listing, User};

/// Request of a renter to rent a [`Listing`] for a period of time.
#[derive(Clone, Debug)]
pub struct Booking {
    /// ID of this [`Booking`].
    pub id: Id,

    /// ID of the booked [`Listing`].
    pub listing_id: listing::Id,

    /// Title of the booked [`Listing`] at the moment of booking.
    pub item_name: listing::Title,

    /// Cover image of the booked [`Listing`] at the moment of booking.
    pub item_image: Option<listing::ImageUrl>,

    /// ID of the [`User`] owning the booked [`Listing`].
    pub owner_id: user::Id,

    /// Name of the [`User`] owning the booked [`Listing`].
    pub owner_name: user::Name,

    /// ID of the [`User`] renting the [`Listing`].
    pub renter_id: user::Id,

    /// Name of the [`User`] renting the [`Listing`].
    pub renter_name: user::Name,

    /// [`DateTime`] the rental starts.
    pub start_date: StartDateTime,

    /// [`DateTime`] the rental ends.
    pub end_date: EndDateTime,

    /// Rental total of the [`Quote`], excluding the deposit.
    pub total_price: Money,

    /// [`Status`] of this [`Booking`].
    pub status: Status,

    /// [`DateTime`] when this [`Booking`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`Booking`].
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

define_kind! {
    #[doc = "Status of a [`Booking`]."]
    enum Status {
        #[doc = "Waiting for the owner's decision."]
        Pending = 1,

        #[doc = "Approved by the owner."]
        Approved = 2,

        #[doc = "Rejected by the owner."]
        Rejected = 3,

        #[doc = "Item was returned."]
        Completed = 4,

        #[doc = "Cancelled by the renter."]
        Cancelled = 5,
    }
}

/// [`DateTime`] a [`Booking`] rental starts.
pub type StartDateTime = DateTimeOf<(Booking, unit::Start)>;

/// [`DateTime`] a [`Booking`] rental ends.
pub type EndDateTime = DateTimeOf<(Booking, unit::End)>;

/// [`DateTime`] when a [`Booking`] was created.
pub type CreationDateTime = DateTimeOf<(Booking, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::{Id, Status};

    #[test]
    fn ids_are_unique() {
        assert_ne!(Id::new(), Id::new());
    }

    #[test]
    fn status_is_screaming_snake_case() {
        assert_eq!(Status::Pending.to_string(), "PENDING");
        assert_eq!(
            "CANCELLED".parse::<Status>().ok(),
            Some(Status::Cancelled),
        );
        assert_eq!(
            Status::from_u8(Status::Approved.u8()),
            Some(Status::Approved),
        );
    }
}
