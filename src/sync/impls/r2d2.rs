use std::time::Duration;

use r2d2::{ManageConnection, Pool, PooledConnection};

use crate::sync::*;

impl<'p, M: ManageConnection> ManagedPool<'p> for Pool<M> {
    type Resource = PooledConnection<M>;

    fn acquire(&'p self) -> Result<Self::Resource, Error> {
        // r2d2 error is untyped, and has no additional info apart from error string.
        Pool::get(self).map_err(|e| Error::Pool(e.into()))
    }

    fn try_acquire(&'p self) -> Result<Self::Resource, Error> {
        Pool::try_get(self).ok_or(Error::WouldBlock)
    }

    fn acquire_timeout(&'p self, timeout: Duration) -> Result<Self::Resource, Error> {
        Pool::get_timeout(self, timeout).map_err(|e| Error::Pool(e.into()))
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
