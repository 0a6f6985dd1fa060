use std::time::Duration;

use deadpool::managed::{Manager, Object, Pool, PoolError, Timeouts};

use crate::r#async::*;

#[async_trait::async_trait]
impl<'p, M, W> ManagedPool<'p> for Pool<M, W>
where
    M: Manager,
    M::Error: std::error::Error + Send + Sync + 'static,
    W: From<Object<M>> + 'p,
{
    type Resource = W;

    async fn acquire(&'p self) -> Result<Self::Resource, Error> {
        Pool::get(self).await.map_err(|e| match e {
            PoolError::Timeout(_) => Error::AcquireTimeout,
            PoolError::Backend(err) => Error::Pool(err.into()),
            _ => Error::PoolExhausted,
        })
    }

    async fn acquire_timeout(&'p self, timeout: Duration) -> Result<Self::Resource, Error> {
        let timeouts = Timeouts {
            wait: Some(timeout),
            create: Some(timeout),
            recycle: Some(timeout),
        };
        Pool::timeout_get(self, &timeouts)
            .await
            .map_err(|e| match e {
                PoolError::Timeout(_) => Error::AcquireTimeout,
                PoolError::Backend(err) => Error::Pool(err.into()),
                _ => Error::PoolExhausted,
            })
    }

    fn gauges(&'p self) -> PoolGauges {
        let status = Pool::status(self);
        PoolGauges {
            open: status.size as u64,
            idle: status.available as u64,
            in_use: status.size.saturating_sub(status.available) as u64,
        }
    }
}
