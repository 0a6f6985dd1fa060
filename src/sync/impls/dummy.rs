use std::time::Duration;

use crate::sync::*;

/// Dummy pool for testing purposes.
pub(crate) struct DummyPool;

/// Dummy resource for testing purposes.
pub(crate) struct DummyResource;

impl ManagedPool<'_> for DummyPool {
    type Resource = DummyResource;

    fn acquire(&self) -> Result<Self::Resource, Error> {
        std::thread::sleep(Duration::from_millis(1));
        Ok(DummyResource)
    }

    fn try_acquire(&self) -> Result<Self::Resource, Error> {
        Ok(DummyResource)
    }

    fn acquire_timeout(&self, timeout: Duration) -> Result<Self::Resource, Error> {
        std::thread::sleep(timeout);
        Ok(DummyResource)
    }

    fn gauges(&self) -> PoolGauges {
        PoolGauges {
            open: 4,
            idle: 1,
            in_use: 3,
        }
    }

    fn counters(&self) -> PoolCounters {
        PoolCounters {
            idle_closed: Some(6),
            lifetime_closed: Some(2),
        }
    }
}
