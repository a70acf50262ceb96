//! [`Command`] for submitting the add-review form of an [`ItemPage`].

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{page, review, user, ItemPage, Notification, Review, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for submitting the add-review [`review::Form`] of an
/// [`ItemPage`].
#[derive(Clone, Copy, Debug)]
pub struct SubmitItemPageReview {
    /// ID of the [`ItemPage`] to submit the [`review::Form`] on.
    pub page_id: page::Id,

    /// ID of the authenticated [`User`], if any.
    pub user_id: Option<user::Id>,
}

impl SubmitItemPageReview {
    /// [`Notification`] about the [`Review`] being accepted.
    pub const SUBMITTED: Notification =
        Notification::new("Review submitted", "Thank you for your feedback!");
}

/// Output of [`SubmitItemPageReview`] [`Command`].
#[derive(Clone, Debug)]
pub struct Output {
    /// [`ItemPage`] with the submitted [`Review`] on top.
    pub page: ItemPage,

    /// Submitted [`Review`].
    pub review: Review,

    /// [`Notification`] about the submission.
    pub notification: Notification,
}

impl<Db> Command<SubmitItemPageReview> for Service<Db>
where
    Db: Database<
            Select<By<Option<ItemPage>, page::Id>>,
            Ok = Option<ItemPage>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Update<ItemPage>, Err = Traced<database::Error>>,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: SubmitItemPageReview,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SubmitItemPageReview { page_id, user_id } = cmd;

        let user_id = user_id
            .ok_or(E::Unauthenticated)
            .map_err(tracerr::wrap!())?;

        let mut page = self
            .database()
            .execute(Select(By::new(page_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::PageNotExists(page_id))
            .map_err(tracerr::wrap!())?;

        let (rating, comment) = page
            .review_form
            .submission()
            .map_err(tracerr::from_and_wrap!(=> E))?;

        let user = self
            .database()
            .execute(Select(By::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::UserNotExists(user_id))
            .map_err(tracerr::wrap!())?;

        let review = Review {
            id: review::Id::new(),
            listing_id: page.listing_id,
            user_id,
            user_name: user.name,
            rating,
            comment,
            created_at: review::CreationDateTime::now(),
        };
        page.prepend_review(review.clone());
        _ = page.review_form.reset();

        self.database()
            .execute(Update(page.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        log::debug!(
            "`User(id: {user_id})` reviewed `Listing(id: {})` with {rating} \
             stars",
            page.listing_id,
        );

        Ok(Output {
            page,
            review,
            notification: SubmitItemPageReview::SUBMITTED,
        })
    }
}

/// Error of [`SubmitItemPageReview`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`ItemPage`] with the provided ID does not exist.
    #[display("`ItemPage(id: {_0})` does not exist")]
    PageNotExists(#[error(not(source))] page::Id),

    /// [`Review`] is submitted by an anonymous visitor.
    #[display("Only authenticated `User`s can leave reviews")]
    Unauthenticated,

    /// Authenticated [`User`] does not exist.
    #[display("`User(id: {_0})` does not exist")]
    UserNotExists(#[error(not(source))] user::Id),

    /// [`review::Form`] is incomplete.
    #[display("`review::Form` is incomplete: {_0}")]
    #[from]
    Incomplete(review::SubmissionError),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{edit_item_page_review::Edit, EditItemPageReview},
        domain::{page, review, user, ItemPage},
        spec, Command as _, Service,
    };

    use super::{ExecutionError, SubmitItemPageReview};

    async fn edit(
        svc: &Service<crate::infra::Memory>,
        page_id: page::Id,
        user_id: user::Id,
        edits: impl IntoIterator<Item = Edit>,
    ) -> ItemPage {
        let mut page = None;
        for edit in edits {
            page = Some(
                svc.execute(EditItemPageReview {
                    page_id,
                    user_id: Some(user_id),
                    edit,
                })
                .await
                .unwrap(),
            );
        }
        page.unwrap()
    }

    fn rate(stars: u8) -> Edit {
        Edit::Rate(review::Rating::new(stars).unwrap())
    }

    #[tokio::test]
    async fn prepends_review_and_resets_form() {
        let svc = spec::service();
        let owner = spec::user(&svc, "owner").await;
        let renter = spec::user(&svc, "renter").await;
        let page = spec::page(&svc, owner.id, "20USD", "50USD").await;
        _ = edit(
            &svc,
            page.id,
            renter.id,
            [Edit::Open, rate(4), Edit::Comment(" Works well ".into())],
        )
        .await;

        let out = svc
            .execute(SubmitItemPageReview {
                page_id: page.id,
                user_id: Some(renter.id),
            })
            .await
            .unwrap();

        assert_eq!(out.page.reviews.len(), page.reviews.len() + 1);
        assert_eq!(out.page.reviews[0].id, out.review.id);
        assert_eq!(out.review.user_id, renter.id);
        assert_eq!(out.review.user_name, renter.name);
        assert_eq!(out.review.rating.stars(), 4);
        assert_eq!(out.review.comment.as_ref(), " Works well ");
        assert_eq!(out.page.review_form, review::Form::Idle);
        assert_eq!(out.notification, SubmitItemPageReview::SUBMITTED);
    }

    #[tokio::test]
    async fn rejects_anonymous() {
        let svc = spec::service();
        let owner = spec::user(&svc, "owner").await;
        let page = spec::page(&svc, owner.id, "20USD", "50USD").await;

        let err = svc
            .execute(SubmitItemPageReview {
                page_id: page.id,
                user_id: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::Unauthenticated));
    }

    #[tokio::test]
    async fn incomplete_form_never_mutates_reviews() {
        let svc = spec::service();
        let owner = spec::user(&svc, "owner").await;
        let renter = spec::user(&svc, "renter").await;
        let page = spec::page(&svc, owner.id, "20USD", "50USD").await;
        let submit = SubmitItemPageReview {
            page_id: page.id,
            user_id: Some(renter.id),
        };

        let err = svc.execute(submit).await.unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::Incomplete(
                review::SubmissionError::RatingRequired
            ),
        ));

        _ = edit(
            &svc,
            page.id,
            renter.id,
            [Edit::Open, Edit::Comment("No stars".into())],
        )
        .await;
        let err = svc.execute(submit).await.unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::Incomplete(
                review::SubmissionError::RatingRequired
            ),
        ));

        let stored = edit(
            &svc,
            page.id,
            renter.id,
            [rate(5), Edit::Comment(" \n ".into())],
        )
        .await;
        let err = svc.execute(submit).await.unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::Incomplete(
                review::SubmissionError::CommentRequired
            ),
        ));

        let stored = edit(
            &svc,
            page.id,
            renter.id,
            [Edit::Comment("a".repeat(5000))],
        )
        .await;
        let err = svc.execute(submit).await.unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::Incomplete(
                review::SubmissionError::CommentTooLong
            ),
        ));

        assert_eq!(stored.reviews.len(), page.reviews.len());
        assert!(matches!(stored.review_form, review::Form::Composing(_)));
    }
}
