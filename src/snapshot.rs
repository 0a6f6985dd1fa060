//! Pool counter snapshots and the trait used to obtain them.

use std::{sync::Arc, time::Duration};

/// Point-in-time view of pool counters.
///
/// The three connection counts are instantaneous gauges. All remaining fields
/// are cumulative since pool creation and must never decrease.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolSnapshot {
    /// Total (idle + in-use) open connections.
    pub open_connections: u64,
    /// Connections sitting idle in the pool.
    pub idle: u64,
    /// Connections currently acquired from the pool.
    pub in_use: u64,
    /// Number of acquisitions that had to wait, cumulative.
    pub wait_count: u64,
    /// Total time spent waiting for acquisitions, cumulative.
    pub wait_duration: Duration,
    /// Connections closed due to idle limits, cumulative.
    pub max_idle_closed: u64,
    /// Connections closed due to maximum lifetime limits, cumulative.
    pub max_lifetime_closed: u64,
}

/// Pools implementing this trait can be periodically sampled.
pub trait ObservablePool {
    /// Read a snapshot of the pool's counters.
    ///
    /// Called once per tick from the sampling loop, so it must be cheap and
    /// must not block.
    fn snapshot(&self) -> PoolSnapshot;
}

impl<P: ObservablePool> ObservablePool for Arc<P> {
    fn snapshot(&self) -> PoolSnapshot {
        P::snapshot(self)
    }
}

/// A fixed snapshot is its own trivial source. Mostly useful in tests and
/// documentation examples.
impl ObservablePool for PoolSnapshot {
    fn snapshot(&self) -> PoolSnapshot {
        *self
    }
}

/// Instantaneous connection counts reported by a pool backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolGauges {
    /// Total (idle + in-use) open connections.
    pub open: u64,
    /// Connections sitting idle in the pool.
    pub idle: u64,
    /// Connections currently acquired from the pool.
    pub in_use: u64,
}

/// Cumulative close counters reported by a pool backend.
///
/// If a backend doesn't track some counter, it must be left as `None`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolCounters {
    /// Connections closed due to idle limits.
    pub idle_closed: Option<u64>,
    /// Connections closed due to maximum lifetime limits.
    pub lifetime_closed: Option<u64>,
}
