//! [`Command`] for sharing an [`ItemPage`].

use std::fmt;

use common::operations::{By, Perform, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{listing, page, ItemPage, Listing, Notification},
    infra::{database, Database, Platform},
    Service,
};

use super::Command;

/// [`Command`] for sharing an [`ItemPage`] through the [`Platform`] it's
/// visited on.
#[derive(Clone, Debug)]
pub struct ShareItemPage<'p, P> {
    /// ID of the [`ItemPage`] to share.
    pub page_id: page::Id,

    /// [`page::Url`] the [`ItemPage`] is visited at.
    pub url: page::Url,

    /// [`Platform`] sharing capability, if the visitor has one.
    pub platform: Option<&'p P>,
}

impl<P> ShareItemPage<'_, P> {
    /// [`Notification`] about the visitor having no sharing capability.
    pub const UNSUPPORTED: Notification = Notification::destructive(
        "Sharing not supported",
        "Your browser does not support the Web Share API.",
    );
}

impl<'p, Db, P> Command<ShareItemPage<'p, P>> for Service<Db>
where
    Db: Database<
            Select<By<Option<ItemPage>, page::Id>>,
            Ok = Option<ItemPage>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Listing>, listing::Id>>,
            Ok = Option<Listing>,
            Err = Traced<database::Error>,
        >,
    P: Platform<Perform<page::Share>, Err: fmt::Display>,
{
    type Ok = Option<Notification>;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: ShareItemPage<'p, P>,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ShareItemPage {
            page_id,
            url,
            platform,
        } = cmd;

        let page = self
            .database()
            .execute(Select(By::new(page_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::PageNotExists(page_id))
            .map_err(tracerr::wrap!())?;

        let Some(platform) = platform else {
            return Ok(Some(ShareItemPage::<'p, P>::UNSUPPORTED));
        };

        let listing = self
            .database()
            .execute(Select(By::new(page.listing_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::ListingNotExists(page.listing_id))
            .map_err(tracerr::wrap!())?;

        if let Err(e) = platform
            .execute(Perform(page::Share::new(&listing, url)))
            .await
        {
            log::error!("failed to share `ItemPage(id: {page_id})`: {e}");
        }

        Ok(None)
    }
}

/// Error of [`ShareItemPage`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`ItemPage`] with the provided ID does not exist.
    #[display("`ItemPage(id: {_0})` does not exist")]
    #[from(ignore)]
    PageNotExists(#[error(not(source))] page::Id),

    /// [`Listing`] shown on the [`ItemPage`] does not exist anymore.
    #[display("`Listing(id: {_0})` does not exist")]
    #[from(ignore)]
    ListingNotExists(#[error(not(source))] listing::Id),
}

#[cfg(test)]
mod spec {
    use std::sync::Mutex;

    use common::operations::Perform;

    use crate::{
        domain::{notification::Severity, page},
        infra::Platform,
        spec, Command as _,
    };

    use super::ShareItemPage;

    /// [`Platform`] remembering everything it shares.
    #[derive(Debug, Default)]
    struct Recorder(Mutex<Vec<page::Share>>);

    impl Platform<Perform<page::Share>> for Recorder {
        type Ok = ();
        type Err = &'static str;

        async fn execute(
            &self,
            Perform(share): Perform<page::Share>,
        ) -> Result<Self::Ok, Self::Err> {
            self.0.lock().unwrap().push(share);
            Ok(())
        }
    }

    /// [`Platform`] refusing to share anything.
    #[derive(Debug)]
    struct Refusing;

    impl Platform<Perform<page::Share>> for Refusing {
        type Ok = ();
        type Err = &'static str;

        async fn execute(
            &self,
            _: Perform<page::Share>,
        ) -> Result<Self::Ok, Self::Err> {
            Err("user dismissed the share sheet")
        }
    }

    fn url() -> page::Url {
        page::Url::new("https://rent.example.com/item?id=1").unwrap()
    }

    #[tokio::test]
    async fn shares_through_platform() {
        let svc = spec::service();
        let owner = spec::user(&svc, "owner").await;
        let page = spec::page(&svc, owner.id, "20USD", "50USD").await;
        let platform = Recorder::default();

        let notification = svc
            .execute(ShareItemPage {
                page_id: page.id,
                url: url(),
                platform: Some(&platform),
            })
            .await
            .unwrap();

        assert!(notification.is_none());
        let shared = platform.0.into_inner().unwrap();
        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].text, "Check out this item: Cordless drill");
        assert_eq!(shared[0].url, url());
    }

    #[tokio::test]
    async fn swallows_platform_failure() {
        let svc = spec::service();
        let owner = spec::user(&svc, "owner").await;
        let page = spec::page(&svc, owner.id, "20USD", "50USD").await;

        let notification = svc
            .execute(ShareItemPage {
                page_id: page.id,
                url: url(),
                platform: Some(&Refusing),
            })
            .await
            .unwrap();

        assert!(notification.is_none());
    }

    #[tokio::test]
    async fn notifies_without_platform() {
        let svc = spec::service();
        let owner = spec::user(&svc, "owner").await;
        let page = spec::page(&svc, owner.id, "20USD", "50USD").await;

        let notification = svc
            .execute(ShareItemPage::<Refusing> {
                page_id: page.id,
                url: url(),
                platform: None,
            })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(notification.title, "Sharing not supported");
        assert_eq!(notification.severity, Severity::Destructive);
    }
}
