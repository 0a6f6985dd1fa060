use std::{
    borrow::Cow,
    sync::{Arc, LazyLock},
};

use opentelemetry::{
    global,
    metrics::{Gauge, Histogram},
    Key, KeyValue,
};

/// Central metrics singleton shared by all sinks and metered pools.
pub(crate) static POOL_METRICS: LazyLock<Arc<Metrics>> = LazyLock::new(|| Arc::new(Metrics::new()));

const KEY_POOL_NAME: Key = Key::from_static_str("db.client.connection.pool.name");

/// Storage for pool metrics instruments.
///
/// Sampled values are recorded through gauges, cumulative counters included:
/// each tick re-records the running total as a point-in-time value.
pub(crate) struct Metrics {
    /// Total number of currently open connections.
    pub(crate) open: Gauge<u64>,
    /// Number of currently idle connections.
    pub(crate) idle: Gauge<u64>,
    /// Number of connections currently in use.
    pub(crate) active: Gauge<u64>,
    /// Cumulative number of acquisitions that had to wait.
    pub(crate) wait_count: Gauge<u64>,
    /// Cumulative time spent waiting for acquisitions, in milliseconds.
    pub(crate) wait_duration: Gauge<f64>,
    /// Average wait per acquisition over the last sampling window.
    pub(crate) avg_wait: Gauge<f64>,
    /// Cumulative number of connections closed due to idle limits.
    pub(crate) idle_closed: Gauge<u64>,
    /// Cumulative number of connections closed due to lifetime limits.
    pub(crate) lifetime_closed: Gauge<u64>,
    /// The time it took to obtain an open connection from the pool.
    pub(crate) wait_time: Histogram<f64>,
    /// The time between borrowing a connection and returning it to the pool.
    pub(crate) use_time: Histogram<f64>,
}

impl Metrics {
    /// Create new storage for pool metrics.
    ///
    /// You probably don't need this, as all sinks and pools use a central
    /// metrics singleton for storage.
    pub(crate) fn new() -> Self {
        let meter = global::meter("poolwatch");
        // db.client.connection.pool.name (string)
        let open = meter
            .u64_gauge(crate::measure::OPEN_CONNECTIONS)
            .with_description("Total number of currently open connections.")
            .build();
        let idle = meter
            .u64_gauge(crate::measure::IDLE_CONNECTIONS)
            .with_description("Number of currently idle connections.")
            .build();
        let active = meter
            .u64_gauge(crate::measure::ACTIVE_CONNECTIONS)
            .with_description("Number of connections currently in use.")
            .build();
        let wait_count = meter
            .u64_gauge(crate::measure::WAIT_COUNT)
            .with_description("Cumulative number of acquisitions that had to wait.")
            .build();
        let wait_duration = meter
            .f64_gauge(crate::measure::WAIT_DURATION)
            .with_unit("ms")
            .with_description("Cumulative time spent waiting for acquisitions.")
            .build();
        let avg_wait = meter
            .f64_gauge(crate::measure::AVG_WAIT)
            .with_unit("ms")
            .with_description("Average wait per acquisition over the last sampling window.")
            .build();
        let idle_closed = meter
            .u64_gauge(crate::measure::IDLE_CLOSED)
            .with_description("Cumulative number of connections closed due to idle limits.")
            .build();
        let lifetime_closed = meter
            .u64_gauge(crate::measure::LIFETIME_CLOSED)
            .with_description("Cumulative number of connections closed due to lifetime limits.")
            .build();
        let wait_time = meter
            .f64_histogram("db.client.connection.wait_time")
            .with_unit("s")
            .with_description("The time it took to obtain an open connection from the pool.")
            .build();
        let use_time = meter
            .f64_histogram("db.client.connection.use_time")
            .with_unit("s")
            .with_description(
                "The time between borrowing a connection and returning it to the pool.",
            )
            .build();
        Metrics {
            open,
            idle,
            active,
            wait_count,
            wait_duration,
            avg_wait,
            idle_closed,
            lifetime_closed,
            wait_time,
            use_time,
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Metrics::new()
    }
}

pub(crate) fn pool_kv(name: Option<Cow<'static, str>>) -> [KeyValue; 1] {
    match name {
        Some(n) => [KeyValue::new(KEY_POOL_NAME, n)],
        None => [KeyValue::new(KEY_POOL_NAME, "default")],
    }
}
