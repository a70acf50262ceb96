//! Business logic of the rental marketplace item page: listings, quotes,
//! bookings, reviews and the ephemeral state of opened item pages.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
pub mod query;
pub mod task;

use common::operations::{By, Start};
use derive_more::{Debug, Display, Error};

#[cfg(doc)]
use infra::Database;

pub use self::{command::Command, query::Query, task::Task};

/// [`Service`] configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// [JWT] encoding key.
    ///
    /// [JWT]: https://datatracker.ietf.org/doc/html/rfc7519
    #[debug(skip)]
    pub jwt_encoding_key: jsonwebtoken::EncodingKey,

    /// [JWT] decoding key.
    ///
    /// [JWT]: https://datatracker.ietf.org/doc/html/rfc7519
    #[debug(skip)]
    pub jwt_decoding_key: jsonwebtoken::DecodingKey,

    /// [`task::ExpireItemPages`] configuration.
    pub expire_item_pages: task::expire_item_pages::Config,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<Db> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Database`] of this [`Service`].
    database: Db,
}

impl<Db> Service<Db> {
    /// Creates a new [`Service`] with the provided parameters.
    pub fn new(config: Config, database: Db) -> (Self, task::Background)
    where
        Self: Task<
                Start<
                    By<
                        task::ExpireItemPages<Self>,
                        task::expire_item_pages::Config,
                    >,
                >,
                Ok = (),
                Err: Error,
            > + Clone
            + 'static,
    {
        let this = Service { config, database };

        let mut bg = task::Background::default();
        let svc = this.clone();
        bg.spawn(async move {
            svc.execute(Start(By::new(svc.config().expire_item_pages)))
                .await
        });

        (this, bg)
    }

    /// Returns [`Config`] of this [`Service`].
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Database`] of this [`Service`].
    #[must_use]
    pub fn database(&self) -> &Db {
        &self.database
    }
}

/// Shortcut for the error of starting a [`Task`].
type TaskStartError<Svc, T, Args> = <Svc as Task<Start<By<T, Args>>>>::Err;

/// Error of starting a [`Service`].
#[derive(Debug, Display, Error)]
pub enum StartupError<Svc>
where
    Svc: Task<
        Start<
            By<
                task::ExpireItemPages<Svc>,
                task::expire_item_pages::Config,
            >,
        >,
    >,
{
    /// [`task::ExpireItemPages`] failed to start.
    ExpireItemPagesTask(
        TaskStartError<
            Svc,
            task::ExpireItemPages<Svc>,
            task::expire_item_pages::Config,
        >,
    ),
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::Money;
    use secrecy::SecretBox;

    use crate::{
        command::{CreateListing, CreateUser, OpenItemPage},
        domain::{listing, user, ItemPage, Listing, User},
        infra::Memory,
        task, Command as _, Config, Service,
    };

    /// Password of every [`User`] created by [`user()`].
    pub(crate) const PASSWORD: &str = "qwerty123";

    /// Creates a new [`Service`] backed by an empty [`Memory`] database.
    pub(crate) fn service() -> Service<Memory> {
        Service {
            config: Config {
                jwt_encoding_key: jsonwebtoken::EncodingKey::from_secret(
                    b"secret",
                ),
                jwt_decoding_key: jsonwebtoken::DecodingKey::from_secret(
                    b"secret",
                ),
                expire_item_pages: task::expire_item_pages::Config {
                    interval: Duration::from_secs(10 * 60),
                    timeout: Duration::from_secs(60 * 60),
                },
            },
            database: Memory::new(),
        }
    }

    /// Registers a new [`User`] with the provided `login`.
    pub(crate) async fn user(svc: &Service<Memory>, login: &str) -> User {
        svc.execute(CreateUser {
            name: user::Name::new(format!("{login} name")).unwrap(),
            login: user::Login::new(login).unwrap(),
            password: SecretBox::new(Box::new(
                user::Password::new(PASSWORD).unwrap(),
            )),
        })
        .await
        .unwrap()
    }

    /// Returns a [`CreateListing`] of a cordless drill.
    pub(crate) fn create_listing(
        owner_id: user::Id,
        price_per_day: &str,
        deposit_fee: &str,
    ) -> CreateListing {
        CreateListing {
            owner_id,
            title: listing::Title::new("Cordless drill").unwrap(),
            description: listing::Description::new("18V, two batteries.")
                .unwrap(),
            images: vec![listing::ImageUrl::new("/img/drill.jpg").unwrap()],
            price_per_day: price_per_day.parse::<Money>().unwrap(),
            deposit_fee: deposit_fee.parse::<Money>().unwrap(),
            condition: listing::Condition::Good,
            category: listing::Category::new("Tools").unwrap(),
            location: listing::Location::new("Portland, OR").unwrap(),
            rental_period: listing::RentalPeriod::new(1, 14).unwrap(),
        }
    }

    /// Lists a cordless drill owned by the provided [`User`].
    pub(crate) async fn listing(
        svc: &Service<Memory>,
        owner_id: user::Id,
        price_per_day: &str,
        deposit_fee: &str,
    ) -> Listing {
        svc.execute(create_listing(owner_id, price_per_day, deposit_fee))
            .await
            .unwrap()
    }

    /// Opens an [`ItemPage`] of a freshly listed cordless drill.
    pub(crate) async fn page(
        svc: &Service<Memory>,
        owner_id: user::Id,
        price_per_day: &str,
        deposit_fee: &str,
    ) -> ItemPage {
        let listing = listing(svc, owner_id, price_per_day, deposit_fee).await;
        svc.execute(OpenItemPage {
            listing_id: listing.id,
        })
        .await
        .unwrap()
    }
}
