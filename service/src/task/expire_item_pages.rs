//! [`ExpireItemPages`] [`Task`].

use std::{convert::Infallible, error::Error, time};

use common::operations::{By, Delete, Perform, Start};
use tokio::time::interval;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{page, ItemPage},
    infra::{database, Database},
    Service,
};

use super::Task;

/// Configuration for [`ExpireItemPages`] [`Task`].
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Interval between [`ItemPage`]s expiration rounds.
    pub interval: time::Duration,

    /// Idle timeout after which an opened [`ItemPage`] expires.
    pub timeout: time::Duration,
}

/// [`Task`] for forgetting [`ItemPage`]s left idle for too long.
#[derive(Clone, Copy, Debug)]
pub struct ExpireItemPages<S> {
    /// [`Config`] of this [`Task`].
    config: Config,

    /// [`Service`] instance.
    service: S,
}

impl<Db> Task<Start<By<ExpireItemPages<Self>, Config>>> for Service<Db>
where
    ExpireItemPages<Service<Db>>:
        Task<Perform<()>, Ok = (), Err: Error> + 'static,
    Self: Clone,
{
    type Ok = ();
    type Err = Infallible;

    async fn execute(
        &self,
        Start(by): Start<By<ExpireItemPages<Self>, Config>>,
    ) -> Result<Self::Ok, Self::Err> {
        let config = by.into_inner();
        let task = ExpireItemPages {
            config,
            service: self.clone(),
        };

        let mut interval = interval(task.config.interval);
        loop {
            _ = interval.tick().await;
            _ = task.execute(Perform(())).await.map_err(|e| {
                log::error!("`task::ExpireItemPages` failed: {e}");
            });
        }
    }
}

impl<Db> Task<Perform<()>> for ExpireItemPages<Service<Db>>
where
    Db: Database<
        Delete<By<ItemPage, page::ActiveDateTime>>,
        Ok = (),
        Err = Traced<database::Error>,
    >,
{
    type Ok = ();
    type Err = ExecutionError;

    async fn execute(&self, _: Perform<()>) -> Result<Self::Ok, Self::Err> {
        let deadline = page::ActiveDateTime::now() - self.config.timeout;
        self.service
            .database()
            .execute(Delete(By::new(deadline)))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`ExpireItemPages`] execution.
pub type ExecutionError = Traced<database::Error>;
