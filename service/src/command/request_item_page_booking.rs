//! [`Command`] for requesting a [`Booking`] from an [`ItemPage`].

use common::operations::{By, Insert, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        booking, listing, page, user, Booking, ItemPage, Listing,
        Notification, Quote, User,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for requesting a [`Booking`] of the [`Listing`] shown on an
/// [`ItemPage`] for the picked dates.
#[derive(Clone, Copy, Debug)]
pub struct RequestItemPageBooking {
    /// ID of the [`ItemPage`] the [`Booking`] is requested from.
    pub page_id: page::Id,

    /// ID of the authenticated [`User`], if any.
    pub renter_id: Option<user::Id>,
}

impl RequestItemPageBooking {
    /// [`Notification`] about the [`Booking`] being requested.
    pub const SENT: Notification = Notification::new(
        "Booking request sent",
        "The owner will be notified of your request.",
    );

    /// Returns the name of a [`Listing`] owner who is not registered.
    #[expect(unsafe_code, reason = "constant")]
    fn unknown_owner() -> user::Name {
        // SAFETY: The name is non-empty and trimmed.
        unsafe { user::Name::new_unchecked("Unknown Owner") }
    }
}

/// Output of [`RequestItemPageBooking`] [`Command`].
#[derive(Clone, Debug)]
pub struct Output {
    /// Requested [`Booking`].
    pub booking: Booking,

    /// [`Notification`] about the request.
    pub notification: Notification,
}

impl<Db> Command<RequestItemPageBooking> for Service<Db>
where
    Db: Database<
            Select<By<Option<ItemPage>, page::Id>>,
            Ok = Option<ItemPage>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Listing>, listing::Id>>,
            Ok = Option<Listing>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Insert<Booking>, Err = Traced<database::Error>>,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: RequestItemPageBooking,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;
        use RequestItemPageBooking as Cmd;

        let RequestItemPageBooking { page_id, renter_id } = cmd;

        let renter_id = renter_id
            .ok_or(E::Unauthenticated)
            .map_err(tracerr::wrap!())?;

        let page = self
            .database()
            .execute(Select(By::new(page_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::PageNotExists(page_id))
            .map_err(tracerr::wrap!())?;

        let (start, end) = page
            .dates
            .bounds()
            .ok_or(E::DatesRequired)
            .map_err(tracerr::wrap!())?;

        let listing = self
            .database()
            .execute(Select(By::new(page.listing_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::ListingNotExists(page.listing_id))
            .map_err(tracerr::wrap!())?;
        if listing.owner_id == renter_id {
            return Err(tracerr::new!(E::OwnListing(listing.id)));
        }

        let renter = self
            .database()
            .execute(Select(By::new(renter_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::UserNotExists(renter_id))
            .map_err(tracerr::wrap!())?;
        let owner_name = self
            .database()
            .execute(Select(By::new(listing.owner_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .map_or_else(Cmd::unknown_owner, |owner| owner.name);

        let quote = Quote::new(&listing, &page.dates)
            .ok_or(E::QuoteOverflow(listing.id))
            .map_err(tracerr::wrap!())?;

        let booking = Booking {
            id: booking::Id::new(),
            listing_id: listing.id,
            item_image: listing.cover().cloned(),
            item_name: listing.title,
            owner_id: listing.owner_id,
            owner_name,
            renter_id,
            renter_name: renter.name,
            start_date: start.coerce(),
            end_date: end.coerce(),
            total_price: quote.rental_total,
            status: booking::Status::Pending,
            created_at: booking::CreationDateTime::now(),
        };
        self.database()
            .execute(Insert(booking.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        log::info!(
            "`User(id: {renter_id})` requested `Booking(id: {})` of \
             `Listing(id: {})` for {} days",
            booking.id,
            booking.listing_id,
            quote.duration_days,
        );

        Ok(Output {
            booking,
            notification: Cmd::SENT,
        })
    }
}

/// Error of [`RequestItemPageBooking`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Booking`] is requested by an anonymous visitor.
    #[display("Only authenticated `User`s can book items")]
    Unauthenticated,

    /// [`ItemPage`] with the provided ID does not exist.
    #[display("`ItemPage(id: {_0})` does not exist")]
    PageNotExists(#[error(not(source))] page::Id),

    /// Start or end date is not picked.
    #[display("Both start and end dates must be picked")]
    DatesRequired,

    /// [`Listing`] shown on the [`ItemPage`] does not exist anymore.
    #[display("`Listing(id: {_0})` does not exist")]
    ListingNotExists(#[error(not(source))] listing::Id),

    /// [`Listing`] is booked by its owner.
    #[display("`Listing(id: {_0})` cannot be booked by its owner")]
    OwnListing(#[error(not(source))] listing::Id),

    /// Authenticated [`User`] does not exist.
    #[display("`User(id: {_0})` does not exist")]
    UserNotExists(#[error(not(source))] user::Id),

    /// [`Quote`] of the [`Listing`] cannot be calculated.
    #[display("`Listing(id: {_0})` quote overflows")]
    QuoteOverflow(#[error(not(source))] listing::Id),
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::{
        operations::{By, Insert, Select},
        DateTime, Money,
    };

    use crate::{
        command::{OpenItemPage, SelectItemPageDates},
        domain::{booking, quote, user, Booking, DateRange},
        infra::{Database as _, Memory},
        spec, Command as _, Service,
    };

    use super::{ExecutionError, RequestItemPageBooking};

    async fn bookings(
        svc: &Service<Memory>,
        renter: user::Id,
    ) -> Vec<Booking> {
        svc.database()
            .execute(Select(By::<Vec<Booking>, _>::new(renter)))
            .await
            .unwrap()
    }

    fn three_days() -> DateRange {
        let start = DateTime::from_rfc3339("2024-06-10T00:00:00Z").unwrap();
        let end = start + Duration::from_secs(3 * 24 * 60 * 60);
        DateRange::new(Some(start.coerce()), Some(end.coerce()))
    }

    #[tokio::test]
    async fn books_for_other_user() {
        let svc = spec::service();
        let owner = spec::user(&svc, "owner").await;
        let renter = spec::user(&svc, "renter").await;
        let page = spec::page(&svc, owner.id, "20USD", "50USD").await;
        _ = svc
            .execute(SelectItemPageDates {
                page_id: page.id,
                dates: three_days(),
            })
            .await
            .unwrap();

        let out = svc
            .execute(RequestItemPageBooking {
                page_id: page.id,
                renter_id: Some(renter.id),
            })
            .await
            .unwrap();

        let b = &out.booking;
        assert_eq!(b.status, booking::Status::Pending);
        assert_eq!(b.total_price, "60USD".parse::<Money>().unwrap());
        assert_eq!(b.listing_id, page.listing_id);
        assert_eq!(b.owner_id, owner.id);
        assert_eq!(b.owner_name, owner.name);
        assert_eq!(b.renter_id, renter.id);
        assert_eq!(b.renter_name, renter.name);
        assert_eq!(b.item_name.to_string(), "Cordless drill");
        assert!(b.item_image.is_some());
        assert_eq!(out.notification, RequestItemPageBooking::SENT);

        let stored = bookings(&svc, renter.id).await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, b.id);
    }

    #[tokio::test]
    async fn names_unregistered_owner_unknown() {
        let svc = spec::service();
        let renter = spec::user(&svc, "renter").await;
        let listing = quote::spec::listing(user::Id::new(), "20USD", "50USD");
        svc.database()
            .execute(Insert(listing.clone()))
            .await
            .unwrap();
        let page = svc
            .execute(OpenItemPage {
                listing_id: listing.id,
            })
            .await
            .unwrap();
        _ = svc
            .execute(SelectItemPageDates {
                page_id: page.id,
                dates: three_days(),
            })
            .await
            .unwrap();

        let out = svc
            .execute(RequestItemPageBooking {
                page_id: page.id,
                renter_id: Some(renter.id),
            })
            .await
            .unwrap();

        assert_eq!(out.booking.owner_name.to_string(), "Unknown Owner");
    }

    #[tokio::test]
    async fn anonymous_never_books() {
        let svc = spec::service();
        let owner = spec::user(&svc, "owner").await;
        let page = spec::page(&svc, owner.id, "20USD", "50USD").await;

        let err = svc
            .execute(RequestItemPageBooking {
                page_id: page.id,
                renter_id: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::Unauthenticated));
    }

    #[tokio::test]
    async fn requires_both_dates() {
        let svc = spec::service();
        let owner = spec::user(&svc, "owner").await;
        let renter = spec::user(&svc, "renter").await;
        let page = spec::page(&svc, owner.id, "20USD", "50USD").await;
        _ = svc
            .execute(SelectItemPageDates {
                page_id: page.id,
                dates: DateRange::new(three_days().start, None),
            })
            .await
            .unwrap();

        let err = svc
            .execute(RequestItemPageBooking {
                page_id: page.id,
                renter_id: Some(renter.id),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::DatesRequired));
        assert!(bookings(&svc, renter.id).await.is_empty());
    }

    #[tokio::test]
    async fn owner_never_books() {
        let svc = spec::service();
        let owner = spec::user(&svc, "owner").await;
        let page = spec::page(&svc, owner.id, "20USD", "50USD").await;
        _ = svc
            .execute(SelectItemPageDates {
                page_id: page.id,
                dates: three_days(),
            })
            .await
            .unwrap();

        let err = svc
            .execute(RequestItemPageBooking {
                page_id: page.id,
                renter_id: Some(owner.id),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::OwnListing(_)));
        assert!(bookings(&svc, owner.id).await.is_empty());
    }

    #[tokio::test]
    async fn checks_authentication_before_dates() {
        let svc = spec::service();
        let owner = spec::user(&svc, "owner").await;
        let page = spec::page(&svc, owner.id, "20USD", "50USD").await;

        let err = svc
            .execute(RequestItemPageBooking {
                page_id: page.id,
                renter_id: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::Unauthenticated));

        let err = svc
            .execute(RequestItemPageBooking {
                page_id: page.id,
                renter_id: Some(owner.id),
            })
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::DatesRequired));
    }
}
