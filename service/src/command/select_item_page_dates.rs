//! [`Command`] for picking rental dates on an [`ItemPage`].

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{page, DateRange, ItemPage},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for picking rental dates on an [`ItemPage`].
///
/// Both bounds are replaced, so passing [`None`] clears a bound.
#[derive(Clone, Copy, Debug)]
pub struct SelectItemPageDates {
    /// ID of the [`ItemPage`] to pick the dates on.
    pub page_id: page::Id,

    /// Picked [`DateRange`].
    pub dates: DateRange,
}

impl<Db> Command<SelectItemPageDates> for Service<Db>
where
    Db: Database<
            Select<By<Option<ItemPage>, page::Id>>,
            Ok = Option<ItemPage>,
            Err = Traced<database::Error>,
        > + Database<Update<ItemPage>, Err = Traced<database::Error>>,
{
    type Ok = ItemPage;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: SelectItemPageDates,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SelectItemPageDates { page_id, dates } = cmd;

        let mut page = self
            .database()
            .execute(Select(By::new(page_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::PageNotExists(page_id))
            .map_err(tracerr::wrap!())?;

        page.dates = dates;
        self.database()
            .execute(Update(page.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(page)
    }
}

/// Error of [`SelectItemPageDates`] [`Command`] execution.
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
    use std::time::Duration;

    use common::DateTime;

    use crate::{
        domain::{page, DateRange},
        spec, Command as _,
    };

    use super::{ExecutionError, SelectItemPageDates};

    #[tokio::test]
    async fn picks_and_clears_dates() {
        let svc = spec::service();
        let owner = spec::user(&svc, "owner").await;
        let page = spec::page(&svc, owner.id, "20USD", "50USD").await;
        let start = DateTime::now();

        let page = svc
            .execute(SelectItemPageDates {
                page_id: page.id,
                dates: DateRange::new(
                    Some(start.coerce()),
                    Some((start + Duration::from_secs(3 * 86_400)).coerce()),
                ),
            })
            .await
            .unwrap();
        assert_eq!(page.dates.duration_days(), 3);

        let page = svc
            .execute(SelectItemPageDates {
                page_id: page.id,
                dates: DateRange::new(page.dates.start, None),
            })
            .await
            .unwrap();
        assert_eq!(page.dates.duration_days(), 0);
        assert!(page.dates.start.is_some());
    }

    #[tokio::test]
    async fn rejects_unknown_page() {
        let svc = spec::service();

        let err = svc
            .execute(SelectItemPageDates {
                page_id: page::Id::new(),
                dates: DateRange::default(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::PageNotExists(_)));
    }
}
