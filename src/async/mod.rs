//! Support for asynchronous pool backends.

mod impls;
mod pool;

use std::time::Duration;

pub use crate::{
    error::Error,
    r#async::pool::MeteredPool,
    snapshot::{PoolCounters, PoolGauges},
};

/// Pool backends implementing this trait can be metered and sampled.
#[async_trait::async_trait]
pub trait ManagedPool<'p> {
    /// Resource type contained in the pool.
    type Resource;

    /// Acquire a resource from the pool.
    ///
    /// # Errors
    ///
    /// Returns `Err` if there was a problem acquiring a resource from the
    /// pool.
    async fn acquire(&'p self) -> Result<Self::Resource, Error>;

    /// Instantly acquire a resource from the pool.
    ///
    /// # Errors
    ///
    /// Returns `Err` if blocking is required, or if this operation is not
    /// implemented for this pool type.
    fn try_acquire(&'p self) -> Result<Self::Resource, Error> {
        Err(Error::NotImplemented)
    }

    /// Try to acquire a resource from the pool, waiting for a bounded time.
    ///
    /// # Errors
    ///
    /// Must return [`Error::AcquireTimeout`] if waiting time was exhausted.
    ///
    /// Returns [`Error::NotImplemented`] if this operation is not implemented
    /// for this pool type.
    async fn acquire_timeout(&'p self, _timeout: Duration) -> Result<Self::Resource, Error> {
        Err(Error::NotImplemented)
    }

    /// Current connection counts.
    ///
    /// Read on every sampling tick, so it must be cheap and must not block.
    fn gauges(&'p self) -> PoolGauges;

    /// Cumulative close counters, for backends that track them.
    fn counters(&'p self) -> PoolCounters {
        PoolCounters::default()
    }
}
