//! [`ItemPage`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select, Update};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{page, ItemPage},
    infra::{
        database::{self, memory},
        Database, Memory,
    },
};

impl Database<Select<By<Option<ItemPage>, page::Id>>> for Memory {
    type Ok = Option<ItemPage>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<ItemPage>, page::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.read().await.pages.get(&id).cloned())
    }
}

impl Database<Insert<ItemPage>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(page): Insert<ItemPage>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut storage = self.write().await;
        if storage.pages.contains_key(&page.id) {
            return Err(tracerr::new!(database::Error::from(
                memory::Error::UniqueViolation {
                    constraint: "pages_pkey",
                },
            )));
        }
        drop(storage.pages.insert(page.id, page));
        Ok(())
    }
}

impl Database<Update<ItemPage>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(mut page): Update<ItemPage>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut storage = self.write().await;
        let Some(stored) = storage.pages.get_mut(&page.id) else {
            return Err(tracerr::new!(database::Error::from(
                memory::Error::NotExists {
                    entity: "ItemPage",
                    id: page.id.into(),
                },
            )));
        };
        page.last_active_at = page::ActiveDateTime::now();
        *stored = page;
        Ok(())
    }
}

impl Database<Delete<By<ItemPage, page::ActiveDateTime>>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<ItemPage, page::ActiveDateTime>>,
    ) -> Result<Self::Ok, Self::Err> {
        let deadline = by.into_inner();
        let mut storage = self.write().await;
        let before = storage.pages.len();
        storage.pages.retain(|_, p| p.last_active_at >= deadline);
        log::debug!("expired {} `ItemPage`s", before - storage.pages.len());
        Ok(())
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::operations::{By, Delete, Insert, Select, Update};

    use crate::{
        domain::{page, quote, user, ItemPage},
        infra::{Database as _, Memory},
    };

    fn page() -> ItemPage {
        ItemPage::open(&quote::spec::listing(user::Id::new(), "1USD", "1USD"))
    }

    #[tokio::test]
    async fn updates_existing_page_only() {
        let db = Memory::new();
        let mut p = page();
        db.execute(Insert(p.clone())).await.unwrap();

        _ = p.toggle_wishlist();
        db.execute(Update(p.clone())).await.unwrap();
        let stored = db
            .execute(Select(By::<Option<ItemPage>, _>::new(p.id)))
            .await
            .unwrap()
            .unwrap();
        assert!(stored.is_wishlisted);

        assert!(db.execute(Update(page())).await.is_err());
    }

    #[tokio::test]
    async fn update_marks_page_active() {
        let db = Memory::new();
        let mut p = page();
        p.last_active_at = p.last_active_at - Duration::from_secs(60 * 60);
        db.execute(Insert(p.clone())).await.unwrap();

        db.execute(Update(p.clone())).await.unwrap();
        let stored = db
            .execute(Select(By::<Option<ItemPage>, _>::new(p.id)))
            .await
            .unwrap()
            .unwrap();

        assert!(stored.last_active_at > p.last_active_at);
        assert_eq!(stored.opened_at, p.opened_at);
    }

    #[tokio::test]
    async fn deletes_pages_idle_before_deadline() {
        let db = Memory::new();
        let two_hours = Duration::from_secs(2 * 60 * 60);
        let mut stale = page();
        stale.last_active_at = stale.last_active_at - two_hours;
        let mut revisited = page();
        revisited.opened_at = revisited.opened_at - two_hours;
        revisited.last_active_at = revisited.last_active_at - two_hours;
        let fresh = page();
        for p in [&stale, &revisited, &fresh] {
            db.execute(Insert(p.clone())).await.unwrap();
        }
        db.execute(Update(revisited.clone())).await.unwrap();

        let deadline =
            page::ActiveDateTime::now() - Duration::from_secs(60 * 60);
        db.execute(Delete(By::<ItemPage, _>::new(deadline)))
            .await
            .unwrap();

        let select = |id: page::Id| {
            db.execute(Select(By::<Option<ItemPage>, _>::new(id)))
        };
        assert!(select(stale.id).await.unwrap().is_none());
        assert!(select(revisited.id).await.unwrap().is_some());
        assert!(select(fresh.id).await.unwrap().is_some());
    }
}
