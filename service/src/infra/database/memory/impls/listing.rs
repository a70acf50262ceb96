//! [`Listing`]-related [`Database`] implementations.

use std::cmp::Reverse;

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{listing, user, Listing},
    infra::{
        database::{self, memory},
        Database, Memory,
    },
};

impl Database<Select<By<Option<Listing>, listing::Id>>> for Memory {
    type Ok = Option<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Listing>, listing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.read().await.listings.get(&id).cloned())
    }
}

impl Database<Select<By<Vec<Listing>, ()>>> for Memory {
    type Ok = Vec<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Listing>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut listings =
            self.read().await.listings.values().cloned().collect::<Vec<_>>();
        listings.sort_by_key(|l| Reverse(l.created_at));
        Ok(listings)
    }
}

impl Database<Select<By<Vec<Listing>, user::Id>>> for Memory {
    type Ok = Vec<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Listing>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let owner_id = by.into_inner();
        let mut listings = self
            .read()
            .await
            .listings
            .values()
            .filter(|l| l.owner_id == owner_id)
            .cloned()
            .collect::<Vec<_>>();
        listings.sort_by_key(|l| Reverse(l.created_at));
        Ok(listings)
    }
}

impl Database<Insert<Listing>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(listing): Insert<Listing>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut storage = self.write().await;
        if storage.listings.contains_key(&listing.id) {
            return Err(tracerr::new!(database::Error::from(
                memory::Error::UniqueViolation {
                    constraint: "listings_pkey",
                },
            )));
        }
        drop(storage.listings.insert(listing.id, listing));
        Ok(())
    }
}
