//! [`Query`] definition.

pub mod bookings;
pub mod item_page;
pub mod listing;
pub mod listings;
pub mod user;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    infra::{database, Database},
    Service,
};

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;

/// [`Query`] [`Select`]ing a `T`ype from a [`Database`].
#[derive(Clone, Copy, Debug)]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
pub struct DatabaseQuery<T>(T);

impl<W, B> DatabaseQuery<By<W, B>> {
    /// Creates a new [`DatabaseQuery`] selecting a `W` by the provided `B`.
    #[must_use]
    pub fn by(by: B) -> Self {
        Self(By::new(by))
    }
}

impl<Db, W, B> Query<DatabaseQuery<By<W, B>>> for Service<Db>
where
    Db: Database<Select<By<W, B>>, Ok = W, Err = Traced<database::Error>>,
{
    type Ok = W;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        DatabaseQuery(by): DatabaseQuery<By<W, B>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.database()
            .execute(Select(by))
            .await
            .map_err(tracerr::wrap!())
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use crate::{spec, Query as _};

    use super::{listing, listings, user};

    #[tokio::test]
    async fn selects_through_database() {
        let svc = spec::service();
        let owner = spec::user(&svc, "owner").await;
        let older = spec::listing(&svc, owner.id, "20USD", "50USD").await;
        tokio::time::sleep(Duration::from_millis(2)).await;
        let newer = spec::listing(&svc, owner.id, "5EUR", "0EUR").await;

        let found = svc.execute(user::ById::by(owner.id)).await.unwrap();
        assert_eq!(found.map(|u| u.login), Some(owner.login));

        let found = svc.execute(listing::ById::by(older.id)).await.unwrap();
        assert_eq!(found.map(|l| l.id), Some(older.id));

        let all = svc.execute(listings::All::by(())).await.unwrap();
        assert_eq!(
            all.iter().map(|l| l.id).collect::<Vec<_>>(),
            [newer.id, older.id],
        );

        let stranger = spec::user(&svc, "stranger").await;
        let owned =
            svc.execute(listings::ByOwner::by(owner.id)).await.unwrap();
        assert_eq!(
            owned.iter().map(|l| l.id).collect::<Vec<_>>(),
            [newer.id, older.id],
        );
        let owned =
            svc.execute(listings::ByOwner::by(stranger.id)).await.unwrap();
        assert!(owned.is_empty());
    }
}
