//! [`Command`] for filling in the add-review form of an [`ItemPage`].

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::{page, review, user, ItemPage},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for filling in the add-review [`review::Form`] of an
/// [`ItemPage`].
#[derive(Clone, Debug)]
pub struct EditItemPageReview {
    /// ID of the [`ItemPage`] to edit the [`review::Form`] on.
    pub page_id: page::Id,

    /// ID of the authenticated [`User`], if any.
    pub user_id: Option<user::Id>,

    /// [`Edit`] to apply.
    pub edit: Edit,
}

/// Change of a [`review::Form`].
#[derive(Clone, Debug)]
pub enum Edit {
    /// Shows the [`review::Form`].
    Open,

    /// Selects a [`review::Rating`].
    Rate(review::Rating),

    /// Replaces the comment text.
    Comment(String),

    /// Hides the [`review::Form`], discarding its contents.
    Cancel,
}

impl<Db> Command<EditItemPageReview> for Service<Db>
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
        cmd: EditItemPageReview,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let EditItemPageReview {
            page_id,
            user_id,
            edit,
        } = cmd;

        if user_id.is_none() {
            return Err(tracerr::new!(E::Unauthenticated));
        }

        let mut page = self
            .database()
            .execute(Select(By::new(page_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::PageNotExists(page_id))
            .map_err(tracerr::wrap!())?;

        let form = &mut page.review_form;
        match edit {
            Edit::Open => form.open(),
            Edit::Rate(rating) => {
                form.rate(rating).map_err(tracerr::from_and_wrap!(=> E))?;
            }
            Edit::Comment(text) => {
                form.comment(text).map_err(tracerr::from_and_wrap!(=> E))?;
            }
            Edit::Cancel => form.cancel(),
        }

        self.database()
            .execute(Update(page.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(page)
    }
}

/// Error of [`EditItemPageReview`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`ItemPage`] with the provided ID does not exist.
    #[display("`ItemPage(id: {_0})` does not exist")]
    PageNotExists(#[error(not(source))] page::Id),

    /// [`review::Form`] is edited by an anonymous visitor.
    #[display("Only authenticated `User`s can leave reviews")]
    Unauthenticated,

    /// [`review::Form`] is edited while hidden.
    #[display("`review::Form` is closed: {_0}")]
    #[from]
    FormClosed(review::ClosedError),
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::{
            review::{self, Draft},
            user,
        },
        spec, Command as _,
    };

    use super::{Edit, EditItemPageReview, ExecutionError};

    #[tokio::test]
    async fn fills_in_form() {
        let svc = spec::service();
        let owner = spec::user(&svc, "owner").await;
        let page = spec::page(&svc, owner.id, "20USD", "50USD").await;
        let edit = |edit| EditItemPageReview {
            page_id: page.id,
            user_id: Some(owner.id),
            edit,
        };

        _ = svc.execute(edit(Edit::Open)).await.unwrap();
        _ = svc
            .execute(edit(Edit::Rate(review::Rating::new(4).unwrap())))
            .await
            .unwrap();
        let page = svc
            .execute(edit(Edit::Comment("Solid drill".into())))
            .await
            .unwrap();

        assert_eq!(
            page.review_form,
            review::Form::Composing(Draft {
                rating: review::Rating::new(4),
                comment: "Solid drill".into(),
            }),
        );

        let page = svc.execute(edit(Edit::Cancel)).await.unwrap();
        assert_eq!(page.review_form, review::Form::Idle);
    }

    #[tokio::test]
    async fn anonymous_cannot_edit_form() {
        let svc = spec::service();
        let owner = spec::user(&svc, "owner").await;
        let page = spec::page(&svc, owner.id, "20USD", "50USD").await;
        _ = svc
            .execute(EditItemPageReview {
                page_id: page.id,
                user_id: Some(owner.id),
                edit: Edit::Open,
            })
            .await
            .unwrap();

        for edit in [
            Edit::Open,
            Edit::Rate(review::Rating::new(1).unwrap()),
            Edit::Comment("Spam".into()),
            Edit::Cancel,
        ] {
            let err = svc
                .execute(EditItemPageReview {
                    page_id: page.id,
                    user_id: None,
                    edit,
                })
                .await
                .unwrap_err();

            assert!(matches!(err.as_ref(), ExecutionError::Unauthenticated));
        }

        let stored = svc
            .execute(crate::query::item_page::ById::by(page.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            stored.review_form,
            review::Form::Composing(Draft::default()),
        );
    }

    #[tokio::test]
    async fn cannot_edit_closed_form() {
        let svc = spec::service();
        let owner = spec::user(&svc, "owner").await;
        let page = spec::page(&svc, owner.id, "20USD", "50USD").await;

        let err = svc
            .execute(EditItemPageReview {
                page_id: page.id,
                user_id: Some(user::Id::new()),
                edit: Edit::Comment("Hello".into()),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::FormClosed(_)));
    }
}
