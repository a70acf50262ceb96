//! [`Command`] for listing an item for rent.

use common::{
    operations::{By, Insert, Select},
    DateTime, Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{listing, user, Listing, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for listing an item for rent.
#[derive(Clone, Debug)]
pub struct CreateListing {
    /// ID of the [`User`] lending the item.
    pub owner_id: user::Id,

    /// [`listing::Title`] of the new [`Listing`].
    pub title: listing::Title,

    /// [`listing::Description`] of the new [`Listing`].
    pub description: listing::Description,

    /// [`listing::ImageUrl`]s of the new [`Listing`].
    pub images: Vec<listing::ImageUrl>,

    /// Price of renting the item for a single day.
    pub price_per_day: Money,

    /// Refundable deposit of the new [`Listing`].
    pub deposit_fee: Money,

    /// [`listing::Condition`] of the item.
    pub condition: listing::Condition,

    /// [`listing::Category`] of the item.
    pub category: listing::Category,

    /// [`listing::Location`] of the item.
    pub location: listing::Location,

    /// [`listing::RentalPeriod`] accepted by the owner.
    pub rental_period: listing::RentalPeriod,
}

impl<Db> Command<CreateListing> for Service<Db>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Insert<Listing>, Err = Traced<database::Error>>,
{
    type Ok = Listing;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateListing,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateListing {
            owner_id,
            title,
            description,
            images,
            price_per_day,
            deposit_fee,
            condition,
            category,
            location,
            rental_period,
        } = cmd;

        if images.is_empty() {
            return Err(tracerr::new!(E::NoImages));
        }
        for price in [price_per_day, deposit_fee] {
            if !Listing::is_valid_price(&price) {
                return Err(tracerr::new!(E::InvalidPrice(price)));
            }
        }
        if price_per_day.currency != deposit_fee.currency {
            return Err(tracerr::new!(E::CurrencyMismatch(deposit_fee)));
        }

        _ = self
            .database()
            .execute(Select(By::new(owner_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::OwnerNotExists(owner_id))
            .map_err(tracerr::wrap!())?;

        let listing = Listing {
            id: listing::Id::new(),
            owner_id,
            title,
            description,
            images,
            price_per_day,
            deposit_fee,
            condition,
            category,
            location,
            rental_period,
            rating: None,
            review_count: 0,
            created_at: DateTime::now().coerce(),
        };
        self.database()
            .execute(Insert(listing.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(listing)
    }
}

/// Error of [`CreateListing`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Listing`] has no images.
    #[display("`Listing` must have at least one image")]
    NoImages,

    /// Price is negative or exceeds [`Listing::MAX_PRICE`].
    #[display("`{_0}` price is out of range")]
    InvalidPrice(#[error(not(source))] Money),

    /// Deposit is in a different currency than the daily price.
    #[display("`{_0}` deposit currency differs from the daily price one")]
    CurrencyMismatch(#[error(not(source))] Money),

    /// Owner [`User`] does not exist.
    #[display("`User(id: {_0})` does not exist")]
    OwnerNotExists(#[error(not(source))] user::Id),
}

#[cfg(test)]
mod spec {
    use crate::{domain::user, spec, Command as _};

    use super::{CreateListing, ExecutionError};

    #[tokio::test]
    async fn creates_listing() {
        let svc = spec::service();
        let owner = spec::user(&svc, "owner").await;

        let listing = svc
            .execute(spec::create_listing(owner.id, "20USD", "50USD"))
            .await
            .unwrap();

        assert_eq!(listing.owner_id, owner.id);
        assert_eq!(listing.review_count, 0);
        assert!(listing.rating.is_none());
    }

    #[tokio::test]
    async fn validates_prices() {
        let svc = spec::service();
        let owner = spec::user(&svc, "owner").await;

        let err = svc
            .execute(spec::create_listing(owner.id, "-1USD", "50USD"))
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::InvalidPrice(_)));

        let err = svc
            .execute(spec::create_listing(owner.id, "20USD", "50EUR"))
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::CurrencyMismatch(_)));
    }

    #[tokio::test]
    async fn requires_images() {
        let svc = spec::service();
        let owner = spec::user(&svc, "owner").await;

        let err = svc
            .execute(CreateListing {
                images: vec![],
                ..spec::create_listing(owner.id, "20USD", "50USD")
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::NoImages));
    }

    #[tokio::test]
    async fn requires_existing_owner() {
        let svc = spec::service();

        let err = svc
            .execute(spec::create_listing(user::Id::new(), "20USD", "0USD"))
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::OwnerNotExists(_)));
    }
}
