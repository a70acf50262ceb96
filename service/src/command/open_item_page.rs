//! [`Command`] for opening an [`ItemPage`].

use common::operations::{By, Insert, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{listing, ItemPage, Listing},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for opening an [`ItemPage`] of a [`Listing`].
#[derive(Clone, Copy, Debug)]
pub struct OpenItemPage {
    /// ID of the [`Listing`] to open the [`ItemPage`] of.
    pub listing_id: listing::Id,
}

impl<Db> Command<OpenItemPage> for Service<Db>
where
    Db: Database<
            Select<By<Option<Listing>, listing::Id>>,
            Ok = Option<Listing>,
            Err = Traced<database::Error>,
        > + Database<Insert<ItemPage>, Err = Traced<database::Error>>,
{
    type Ok = ItemPage;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: OpenItemPage) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let OpenItemPage { listing_id } = cmd;

        let listing = self
            .database()
            .execute(Select(By::new(listing_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::ListingNotExists(listing_id))
            .map_err(tracerr::wrap!())?;

        let page = ItemPage::open(&listing);
        self.database()
            .execute(Insert(page.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        log::debug!("opened `ItemPage(id: {})` of `{listing_id}`", page.id);

        Ok(page)
    }
}

/// Error of [`OpenItemPage`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Listing`] with the provided ID does not exist.
    #[display("`Listing(id: {_0})` does not exist")]
    #[from(ignore)]
    ListingNotExists(#[error(not(source))] listing::Id),
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Select};

    use crate::{
        domain::{listing, review, ItemPage},
        infra::Database as _,
        spec, Command as _,
    };

    use super::{ExecutionError, OpenItemPage};

    #[tokio::test]
    async fn opens_page_with_sample_reviews() {
        let svc = spec::service();
        let owner = spec::user(&svc, "owner").await;
        let listing = spec::listing(&svc, owner.id, "20USD", "50USD").await;

        let page = svc
            .execute(OpenItemPage {
                listing_id: listing.id,
            })
            .await
            .unwrap();

        assert_eq!(page.listing_id, listing.id);
        assert_eq!(page.review_form, review::Form::Idle);
        assert_eq!(page.reviews.len(), 3);
        assert!(!page.is_wishlisted);
        assert!(page.dates.bounds().is_none());

        let stored = svc
            .database()
            .execute(Select(By::<Option<ItemPage>, _>::new(page.id)))
            .await
            .unwrap();
        assert!(stored.is_some());
    }

    #[tokio::test]
    async fn rejects_unknown_listing() {
        let svc = spec::service();

        let err = svc
            .execute(OpenItemPage {
                listing_id: listing::Id::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::ListingNotExists(_)));
    }
}
