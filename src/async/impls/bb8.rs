use std::time::Duration;

use bb8::{ManageConnection, Pool, PooledConnection, RunError};

use crate::r#async::*;

#[async_trait::async_trait]
impl<'p, M> ManagedPool<'p> for Pool<M>
where
    M: ManageConnection,
    M::Error: std::error::Error + Send + Sync + 'static,
{
    type Resource = PooledConnection<'p, M>;

    async fn acquire(&'p self) -> Result<Self::Resource, Error> {
        Pool::get(self).await.map_err(|e| match e {
            RunError::TimedOut => Error::AcquireTimeout,
            RunError::User(e) => Error::Pool(e.into()),
        })
    }

    async fn acquire_timeout(&'p self, timeout: Duration) -> Result<Self::Resource, Error> {
        match tokio::time::timeout(timeout, <Self as ManagedPool<'p>>::acquire(self)).await {
            Ok(res) => res,
            Err(_) => Err(Error::AcquireTimeout),
        }
    }

    fn gauges(&'p self) -> PoolGauges {
        let inner = Pool::state(self);
        PoolGauges {
            open: u64::from(inner.connections),
            idle: u64::from(inner.idle_connections),
            in_use: u64::from(inner.connections.saturating_sub(inner.idle_connections)),
        }
    }
}
