//! Domain definitions.

pub mod booking;
pub mod listing;
pub mod notification;
pub mod page;
pub mod quote;
pub mod review;
pub mod user;

pub use self::{
    booking::Booking,
    listing::Listing,
    notification::Notification,
    page::ItemPage,
    quote::{DateRange, Quote},
    review::Review,
    user::User,
};
