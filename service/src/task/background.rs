//! Background environment for running [`Task`]s.

use std::{
    error::Error,
    future::{Future, IntoFuture},
    iter,
};

use futures::{
    future::{self, LocalBoxFuture},
    FutureExt as _, TryFutureExt as _,
};
use tokio::task::{self, JoinError};

#[cfg(doc)]
use crate::Task;

/// Boxed error of a [`Task`] running in the [`Background`].
type BoxedError = Box<dyn Error + 'static>;

/// Background environment for running [`Task`]s on the current thread.
///
/// Resolves once every spawned [`Task`] finishes, or as soon as any of them
/// fails.
#[derive(Debug, Default)]
pub struct Background {
    /// Local set of tasks.
    set: task::LocalSet,

    /// Handles of spawned tasks.
    handles: Vec<task::JoinHandle<Result<(), BoxedError>>>,
}

impl Background {
    /// Spawns a new [`Task`] inside the [`Background`] environment.
    pub fn spawn<F, E>(&mut self, future: F)
    where
        F: Future<Output = Result<(), E>> + 'static,
        E: Error + 'static,
    {
        self.handles.push(
            self.set
                .spawn_local(future.map_err(|e| BoxedError::from(Box::new(e)))),
        );
    }

    /// Flattens the result of joining a spawned [`Task`].
    fn flatten(
        joined: Result<Result<(), BoxedError>, JoinError>,
    ) -> Result<(), BoxedError> {
        joined.unwrap_or_else(|e| Err(BoxedError::from(Box::new(e))))
    }
}

impl IntoFuture for Background {
    type Output = Result<(), BoxedError>;
    type IntoFuture = LocalBoxFuture<'static, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        let Self { set, handles } = self;
        let set = set.map(Ok).boxed_local();
        let handles = handles
            .into_iter()
            .map(|h| h.map(Self::flatten).boxed_local());
        future::try_join_all(iter::once(set).chain(handles))
            .map_ok(drop)
            .boxed_local()
    }
}
