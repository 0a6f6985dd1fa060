use std::time::Duration;

use crate::r#async::*;

/// Dummy pool for testing purposes.
#[derive(Clone)]
pub(crate) struct DummyPool;

/// Dummy resource for testing purposes.
pub(crate) struct DummyResource;

#[async_trait::async_trait]
impl<'p> ManagedPool<'p> for DummyPool {
    type Resource = DummyResource;

    async fn acquire(&'p self) -> Result<Self::Resource, Error> {
        tokio::time::sleep(Duration::from_millis(10)).await;
        Ok(DummyResource)
    }

    fn try_acquire(&'p self) -> Result<Self::Resource, Error> {
        Ok(DummyResource)
    }

    async fn acquire_timeout(&'p self, timeout: Duration) -> Result<Self::Resource, Error> {
        tokio::time::sleep(timeout).await;
        Ok(DummyResource)
    }

    fn gauges(&'p self) -> PoolGauges {
        PoolGauges {
            open: 4,
            idle: 1,
            in_use: 3,
        }
    }

    fn counters(&'p self) -> PoolCounters {
        PoolCounters {
            idle_closed: Some(6),
            lifetime_closed: Some(2),
        }
    }
}
