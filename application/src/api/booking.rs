//! [`Booking`]-related definitions.

use common::{DateTime, Money};
use derive_more::{Display, From, Into};
use juniper::{graphql_object, GraphQLEnum, GraphQLScalar};
use service::domain::{self, booking};
use uuid::Uuid;

use crate::{api, Context};

/// A [`Booking`] request of a `Listing`.
#[derive(Clone, Debug, From, Into)]
pub struct Booking(domain::Booking);

/// A request to rent a `Listing` item for the picked dates.
#[graphql_object(context = Context)]
impl Booking {
    /// Unique identifier of this `Booking`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Booked `Listing`.
    #[must_use]
    pub fn listing(&self) -> api::Listing {
        #[expect(unsafe_code, reason = "listing is checked on booking")]
        let listing = unsafe { api::Listing::new_unchecked(self.0.listing_id) };
        listing
    }

    /// Title of the booked item at the moment of booking.
    #[must_use]
    pub fn item_name(&self) -> api::listing::Title {
        self.0.item_name.clone().into()
    }

    /// Cover image of the booked item at the moment of booking.
    #[must_use]
    pub fn item_image(&self) -> Option<api::listing::ImageUrl> {
        self.0.item_image.clone().map(Into::into)
    }

    /// ID of the `User` lending the item.
    #[must_use]
    pub fn owner_id(&self) -> api::user::Id {
        self.0.owner_id.into()
    }

    /// Name of the `User` lending the item.
    #[must_use]
    pub fn owner_name(&self) -> api::user::Name {
        self.0.owner_name.clone().into()
    }

    /// `User` renting the item.
    #[must_use]
    pub fn renter(&self) -> api::User {
        #[expect(unsafe_code, reason = "renter is checked on booking")]
        let renter = unsafe { api::User::new_unchecked(self.0.renter_id) };
        renter
    }

    /// Name of the `User` renting the item.
    #[must_use]
    pub fn renter_name(&self) -> api::user::Name {
        self.0.renter_name.clone().into()
    }

    /// `DateTime` when the rental starts.
    #[must_use]
    pub fn start_date(&self) -> DateTime {
        self.0.start_date.coerce()
    }

    /// `DateTime` when the rental ends.
    #[must_use]
    pub fn end_date(&self) -> DateTime {
        self.0.end_date.coerce()
    }

    /// Rental total of this `Booking`, excluding fees and deposit.
    #[must_use]
    pub fn total_price(&self) -> Money {
        self.0.total_price
    }

    /// Status of this `Booking`.
    #[must_use]
    pub fn status(&self) -> Status {
        self.0.status.into()
    }

    /// `DateTime` when this `Booking` was requested.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of a `Booking`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(booking::Id)]
#[into(booking::Id)]
#[graphql(name = "BookingId", transparent)]
pub struct Id(Uuid);

/// Status of a `Booking`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "BookingStatus")]
pub enum Status {
    /// Awaiting the owner's decision.
    Pending,

    /// Approved by the owner.
    Approved,

    /// Rejected by the owner.
    Rejected,

    /// Rental is over.
    Completed,

    /// Cancelled by the renter.
    Cancelled,
}

impl From<booking::Status> for Status {
    fn from(status: booking::Status) -> Self {
        use booking::Status as S;
        match status {
            S::Pending => Self::Pending,
            S::Approved => Self::Approved,
            S::Rejected => Self::Rejected,
            S::Completed => Self::Completed,
            S::Cancelled => Self::Cancelled,
        }
    }
}
