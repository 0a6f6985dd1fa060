//! Sink-side contract for sampled measurement batches.

use std::{borrow::Cow, ops::Deref, sync::Arc};

use opentelemetry::KeyValue;

use crate::{
    error::Error,
    measure::{self, MeasureValue, Measurement},
    metrics::{pool_kv, Metrics, POOL_METRICS},
};

/// Receiver for batches of named measurements.
///
/// A sink owns aggregation, export and any backpressure toward the telemetry
/// backend. The sampler treats each batch as fire-and-forget: a failed record
/// call is logged and the next tick proceeds normally.
pub trait RecordSink {
    /// Record one batch of measurements.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the batch could not be recorded.
    fn record(&self, batch: &[Measurement]) -> Result<(), Error>;
}

impl<S: RecordSink> RecordSink for Arc<S> {
    fn record(&self, batch: &[Measurement]) -> Result<(), Error> {
        S::record(self, batch)
    }
}

/// OpenTelemetry-backed sink.
///
/// Dispatches each measurement to a pre-built instrument, tagged with the
/// pool name it was created with.
pub struct OtelSink {
    /// Premade label used to record metrics.
    label: [KeyValue; 1],
    /// Linked metrics storage.
    metrics: Arc<Metrics>,
}

impl OtelSink {
    /// Create a sink labeled with the given pool name.
    #[must_use]
    pub fn new<L: Into<Cow<'static, str>>>(label: Option<L>) -> Self {
        Self {
            label: pool_kv(label.map(Into::into)),
            metrics: POOL_METRICS.deref().clone(),
        }
    }
}

impl RecordSink for OtelSink {
    fn record(&self, batch: &[Measurement]) -> Result<(), Error> {
        for m in batch {
            match (m.name, m.value) {
                (measure::OPEN_CONNECTIONS, MeasureValue::UInt(v)) => {
                    self.metrics.open.record(v, &self.label);
                }
                (measure::IDLE_CONNECTIONS, MeasureValue::UInt(v)) => {
                    self.metrics.idle.record(v, &self.label);
                }
                (measure::ACTIVE_CONNECTIONS, MeasureValue::UInt(v)) => {
                    self.metrics.active.record(v, &self.label);
                }
                (measure::WAIT_COUNT, MeasureValue::UInt(v)) => {
                    self.metrics.wait_count.record(v, &self.label);
                }
                (measure::WAIT_DURATION, MeasureValue::Float(v)) => {
                    self.metrics.wait_duration.record(v, &self.label);
                }
                (measure::AVG_WAIT, MeasureValue::Float(v)) => {
                    self.metrics.avg_wait.record(v, &self.label);
                }
                (measure::IDLE_CLOSED, MeasureValue::UInt(v)) => {
                    self.metrics.idle_closed.record(v, &self.label);
                }
                (measure::LIFETIME_CLOSED, MeasureValue::UInt(v)) => {
                    self.metrics.lifetime_closed.record(v, &self.label);
                }
                _ => return Err(Error::UnknownMeasurement(m.name)),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::Measurement;

    /// All eight identities dispatch without error.
    #[test]
    fn otel_sink_accepts_full_batch() {
        let sink = OtelSink::new(Some("test-pool"));
        let batch = [
            Measurement::new(measure::OPEN_CONNECTIONS, 5_u64),
            Measurement::new(measure::IDLE_CONNECTIONS, 3_u64),
            Measurement::new(measure::ACTIVE_CONNECTIONS, 2_u64),
            Measurement::new(measure::WAIT_COUNT, 100_u64),
            Measurement::new(measure::WAIT_DURATION, 50.0),
            Measurement::new(measure::AVG_WAIT, 0.5),
            Measurement::new(measure::IDLE_CLOSED, 7_u64),
            Measurement::new(measure::LIFETIME_CLOSED, 9_u64),
        ];
        assert!(sink.record(&batch).is_ok());
    }

    /// Names outside the fixed vocabulary are rejected.
    #[test]
    fn otel_sink_rejects_unknown_name() {
        let sink = OtelSink::new(None::<&str>);
        let batch = [Measurement::new("db.client.connection.bogus", 1_u64)];
        match sink.record(&batch) {
            Err(Error::UnknownMeasurement(name)) => {
                assert_eq!(name, "db.client.connection.bogus");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    /// A type mismatch on a known name is rejected too.
    #[test]
    fn otel_sink_rejects_mistyped_value() {
        let sink = OtelSink::new(None::<&str>);
        let batch = [Measurement::new(measure::OPEN_CONNECTIONS, 5.0)];
        assert!(sink.record(&batch).is_err());
    }
}
