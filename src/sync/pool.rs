use std::{
    borrow::Cow,
    ops::{Deref, DerefMut},
    sync::Arc,
    time::{Duration, Instant},
};

use opentelemetry::KeyValue;
use tracing::debug_span;

use crate::{
    error::Error,
    metrics::{pool_kv, Metrics, POOL_METRICS},
    resource::MeteredResource,
    snapshot::{ObservablePool, PoolSnapshot},
    stats::WaitTracker,
    sync::ManagedPool,
};

/// Metered pool.
///
/// Wraps a pool backend, measures every acquisition and keeps the cumulative
/// wait counters that the sampling loop reads through [`ObservablePool`].
pub struct MeteredPool<P> {
    /// Pool label.
    label: [KeyValue; 1],
    /// Linked metrics storage.
    metrics: Arc<Metrics>,
    /// Cumulative acquisition wait counters, shared between clones.
    waits: Arc<WaitTracker>,
    /// Original resource pool.
    pool: P,
}

impl<P: for<'p> ManagedPool<'p>> MeteredPool<P> {
    /// Meter the provided resource pool.
    #[must_use]
    pub fn meter<L: Into<Cow<'static, str>>>(label: Option<L>, pool: P) -> Self {
        Self {
            label: pool_kv(label.map(Into::into)),
            metrics: POOL_METRICS.deref().clone(),
            waits: Arc::new(WaitTracker::default()),
            pool,
        }
    }

    /// Record wait-side counters and metrics after resource acquisition.
    #[inline]
    fn measure_acquire(&self, before: Instant) {
        let waited = before.elapsed();
        self.waits.record(waited);
        self.metrics
            .wait_time
            .record(waited.as_secs_f64(), &self.label);
    }

    /// Acquire a metered resource from the pool.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the underlying pool failed to produce a resource.
    pub fn acquire(&self) -> Result<MeteredResource<<P as ManagedPool<'_>>::Resource>, Error> {
        let now = Instant::now();
        let span = debug_span!("pool_acquire", name = self.label[0].value.as_str().as_ref())
            .entered();
        let resource = self.pool.acquire()?;
        drop(span);
        self.measure_acquire(now);
        Ok(MeteredResource::new(
            self.metrics.clone(),
            self.label.clone(),
            resource,
        ))
    }

    /// Instantly acquire a metered resource from the pool.
    ///
    /// # Errors
    ///
    /// Returns `Err` if blocking is required, or if this operation is not
    /// implemented for this pool type.
    pub fn try_acquire(&self) -> Result<MeteredResource<<P as ManagedPool<'_>>::Resource>, Error> {
        let now = Instant::now();
        let span = debug_span!(
            "pool_try_acquire",
            name = self.label[0].value.as_str().as_ref()
        )
        .entered();
        let resource = self.pool.try_acquire()?;
        drop(span);
        self.measure_acquire(now);
        Ok(MeteredResource::new(
            self.metrics.clone(),
            self.label.clone(),
            resource,
        ))
    }

    /// Try to acquire a metered resource from the pool, waiting for a bounded
    /// time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AcquireTimeout`] if waiting time was exhausted, or
    /// [`Error::NotImplemented`] if this operation is not implemented for
    /// this pool type.
    pub fn acquire_timeout(
        &self,
        timeout: Duration,
    ) -> Result<MeteredResource<<P as ManagedPool<'_>>::Resource>, Error> {
        let now = Instant::now();
        let span = debug_span!(
            "pool_timed_acquire",
            name = self.label[0].value.as_str().as_ref()
        )
        .entered();
        let resource = self.pool.acquire_timeout(timeout)?;
        drop(span);
        self.measure_acquire(now);
        Ok(MeteredResource::new(
            self.metrics.clone(),
            self.label.clone(),
            resource,
        ))
    }
}

impl<P: for<'p> ManagedPool<'p>> ObservablePool for MeteredPool<P> {
    fn snapshot(&self) -> PoolSnapshot {
        let gauges = self.pool.gauges();
        let counters = self.pool.counters();
        let waits = self.waits.totals();
        PoolSnapshot {
            open_connections: gauges.open,
            idle: gauges.idle,
            in_use: gauges.in_use,
            wait_count: waits.count,
            wait_duration: waits.duration,
            max_idle_closed: counters.idle_closed.unwrap_or(0),
            max_lifetime_closed: counters.lifetime_closed.unwrap_or(0),
        }
    }
}

impl<P> Deref for MeteredPool<P> {
    type Target = P;

    fn deref(&self) -> &Self::Target {
        &self.pool
    }
}

impl<P> DerefMut for MeteredPool<P> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.pool
    }
}

impl<P> AsRef<P> for MeteredPool<P> {
    fn as_ref(&self) -> &P {
        &self.pool
    }
}

impl<P> AsMut<P> for MeteredPool<P> {
    fn as_mut(&mut self) -> &mut P {
        &mut self.pool
    }
}

impl<P: Clone> Clone for MeteredPool<P> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            metrics: self.metrics.clone(),
            // Clones keep feeding the same counters; a snapshot taken through
            // any clone sees every acquisition.
            waits: self.waits.clone(),
            pool: self.pool.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::impls::dummy::DummyPool;

    #[test]
    fn acquisitions_feed_cumulative_counters() {
        let pool = MeteredPool::meter(Some("sync-test"), DummyPool);
        drop(pool.acquire().unwrap());
        drop(pool.try_acquire().unwrap());

        let snapshot = pool.snapshot();
        assert_eq!(snapshot.wait_count, 2);
        assert!(snapshot.wait_duration >= Duration::from_millis(1));
        assert_eq!(snapshot.open_connections, 4);
        assert_eq!(snapshot.idle, 1);
        assert_eq!(snapshot.in_use, 3);
        assert_eq!(snapshot.max_idle_closed, 6);
        assert_eq!(snapshot.max_lifetime_closed, 2);
    }

    #[test]
    fn timed_acquire_is_counted() {
        let pool = MeteredPool::meter(None::<&str>, DummyPool);
        drop(pool.acquire_timeout(Duration::from_millis(1)).unwrap());
        assert_eq!(pool.snapshot().wait_count, 1);
    }
}
