//! Measurement vocabulary shared by the sampler and its sinks.
//!
//! Each sampled batch carries exactly one measurement per name defined here.
//! Wait count and wait duration are emitted as cumulative totals; only the
//! average wait is derived from the per-interval window.

/// Currently open connections, gauge.
pub const OPEN_CONNECTIONS: &str = "db.client.connection.open";
/// Currently idle connections, gauge.
pub const IDLE_CONNECTIONS: &str = "db.client.connection.idle";
/// Connections currently in use, gauge.
pub const ACTIVE_CONNECTIONS: &str = "db.client.connection.active";
/// Acquisitions that had to wait, cumulative.
pub const WAIT_COUNT: &str = "db.client.connection.wait_count";
/// Total time spent waiting for acquisitions in milliseconds, cumulative.
pub const WAIT_DURATION: &str = "db.client.connection.wait_duration";
/// Average wait per acquisition over the last sampling window, milliseconds.
pub const AVG_WAIT: &str = "db.client.connection.avg_wait";
/// Connections closed due to idle limits, cumulative.
pub const IDLE_CLOSED: &str = "db.client.connection.closed.idle";
/// Connections closed due to maximum lifetime limits, cumulative.
pub const LIFETIME_CLOSED: &str = "db.client.connection.closed.lifetime";

/// Numeric value carried by a single measurement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MeasureValue {
    /// Integer gauge or cumulative count.
    UInt(u64),
    /// Floating-point value, used for millisecond durations.
    Float(f64),
}

impl From<u64> for MeasureValue {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<f64> for MeasureValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Single named measurement within a sampled batch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurement {
    /// Fixed measurement identity, one of the constants in this module.
    pub name: &'static str,
    /// Measured value.
    pub value: MeasureValue,
}

impl Measurement {
    /// Bundle a name and a value into a measurement.
    #[must_use]
    pub fn new(name: &'static str, value: impl Into<MeasureValue>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}
