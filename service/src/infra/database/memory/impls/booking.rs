//! [`Booking`]-related [`Database`] implementations.

use std::cmp::Reverse;

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{user, Booking},
    infra::{database, Database, Memory},
};

impl Database<Insert<Booking>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(booking): Insert<Booking>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write().await.bookings.push(booking);
        Ok(())
    }
}

impl Database<Select<By<Vec<Booking>, user::Id>>> for Memory {
    type Ok = Vec<Booking>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Booking>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let renter_id = by.into_inner();
        let mut bookings = self
            .read()
            .await
            .bookings
            .iter()
            .filter(|b| b.renter_id == renter_id)
            .cloned()
            .collect::<Vec<_>>();
        bookings.sort_by_key(|b| Reverse(b.created_at));
        Ok(bookings)
    }
}
