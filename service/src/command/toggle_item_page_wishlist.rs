//! [`Command`] for toggling whether an [`ItemPage`] item is wishlisted.

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{page, ItemPage, Notification},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for toggling whether an [`ItemPage`] item is wishlisted.
#[derive(Clone, Copy, Debug)]
pub struct ToggleItemPageWishlist {
    /// ID of the [`ItemPage`] to toggle the wishlist indicator on.
    pub page_id: page::Id,
}

impl ToggleItemPageWishlist {
    /// [`Notification`] about the item being added to the wishlist.
    pub const ADDED: Notification = Notification::new(
        "Added to wishlist",
        "This item has been added to your wishlist.",
    );

    /// [`Notification`] about the item being removed from the wishlist.
    pub const REMOVED: Notification = Notification::new(
        "Removed from wishlist",
        "This item has been removed from your wishlist.",
    );
}

/// Output of [`ToggleItemPageWishlist`] [`Command`].
#[derive(Clone, Debug)]
pub struct Output {
    /// Toggled [`ItemPage`].
    pub page: ItemPage,

    /// [`Notification`] describing the new state.
    pub notification: Notification,
}

impl<Db> Command<ToggleItemPageWishlist> for Service<Db>
where
    Db: Database<
            Select<By<Option<ItemPage>, page::Id>>,
            Ok = Option<ItemPage>,
            Err = Traced<database::Error>,
        > + Database<Update<ItemPage>, Err = Traced<database::Error>>,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: ToggleItemPageWishlist,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;
        use ToggleItemPageWishlist as Cmd;

        let ToggleItemPageWishlist { page_id } = cmd;

        let mut page = self
            .database()
            .execute(Select(By::new(page_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::PageNotExists(page_id))
            .map_err(tracerr::wrap!())?;

        let notification = if page.toggle_wishlist() {
            Cmd::ADDED
        } else {
            Cmd::REMOVED
        };
        self.database()
            .execute(Update(page.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(Output { page, notification })
    }
}

/// Error of [`ToggleItemPageWishlist`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`ItemPage`] with the provided ID does not exist.
    #[display("`ItemPage(id: {_0})` does not exist")]
    #[from(ignore)]
    PageNotExists(#[error(not(source))] page::Id),
}

#[cfg(test)]
mod spec {
    use crate::{spec, Command as _};

    use super::ToggleItemPageWishlist;

    #[tokio::test]
    async fn double_toggle_restores_state() {
        let svc = spec::service();
        let owner = spec::user(&svc, "owner").await;
        let page = spec::page(&svc, owner.id, "20USD", "50USD").await;
        let cmd = ToggleItemPageWishlist { page_id: page.id };

        let added = svc.execute(cmd).await.unwrap();
        assert!(added.page.is_wishlisted);
        assert_eq!(added.notification, ToggleItemPageWishlist::ADDED);

        let removed = svc.execute(cmd).await.unwrap();
        assert!(!removed.page.is_wishlisted);
        assert_eq!(removed.notification, ToggleItemPageWishlist::REMOVED);
    }
}
