//! [`Command`] definition.

pub mod authorize_user_session;
pub mod create_listing;
pub mod create_user;
pub mod create_user_session;
pub mod edit_item_page_review;
pub mod open_item_page;
pub mod request_item_page_booking;
pub mod select_item_page_dates;
pub mod share_item_page;
pub mod submit_item_page_review;
pub mod toggle_item_page_wishlist;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    authorize_user_session::AuthorizeUserSession,
    create_listing::CreateListing, create_user::CreateUser,
    create_user_session::CreateUserSession,
    edit_item_page_review::EditItemPageReview, open_item_page::OpenItemPage,
    request_item_page_booking::RequestItemPageBooking,
    select_item_page_dates::SelectItemPageDates,
    share_item_page::ShareItemPage,
    submit_item_page_review::SubmitItemPageReview,
    toggle_item_page_wishlist::ToggleItemPageWishlist,
};
