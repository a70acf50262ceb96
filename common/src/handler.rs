//! [`Handler`] abstractions.

use std::future::Future;

/// Asynchronous executor of some `Args`.
///
/// Commands, queries, database operations and platform capabilities are all
/// expressed as [`Handler`]s parametrized by the operation they accept.
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided `args`.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
