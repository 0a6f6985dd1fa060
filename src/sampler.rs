//! Periodic sampling of pool counters into a measurement sink.

use std::{future::Future, time::Duration};

use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{trace_span, warn, Instrument};

use crate::{
    error::Error,
    handle::StopHandle,
    measure::{self, Measurement},
    sink::RecordSink,
    snapshot::{ObservablePool, PoolSnapshot},
};

/// Baseline cumulative counters left behind by the previous tick.
///
/// Owned exclusively by the sampling task. Both fields start at zero and
/// advance together, from the same snapshot, strictly after the window for
/// that snapshot has been computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct SamplerState {
    /// Cumulative wait count seen at the previous tick.
    last_wait_count: u64,
    /// Cumulative wait duration seen at the previous tick.
    last_wait_duration: Duration,
}

impl SamplerState {
    /// Move the baseline up to `snapshot`.
    fn advance(&mut self, snapshot: &PoolSnapshot) {
        self.last_wait_count = snapshot.wait_count;
        self.last_wait_duration = snapshot.wait_duration;
    }
}

/// Per-interval deltas derived from one snapshot, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct WindowMetrics {
    /// Acquisition waits that happened during this window.
    wait_count: u64,
    /// Time spent waiting during this window.
    wait_duration: Duration,
}

impl WindowMetrics {
    /// Deltas between a fresh snapshot and the previous baseline.
    ///
    /// Subtraction saturates: a pool whose cumulative counters went backwards
    /// produces an empty window instead of a panic or a nonsensical average.
    fn compute(snapshot: &PoolSnapshot, state: &SamplerState) -> Self {
        Self {
            wait_count: snapshot.wait_count.saturating_sub(state.last_wait_count),
            wait_duration: snapshot
                .wait_duration
                .saturating_sub(state.last_wait_duration),
        }
    }

    /// Average wait per acquisition over the window, in fractional
    /// milliseconds. Exactly zero for an empty window.
    fn avg_wait_ms(&self) -> f64 {
        if self.wait_count > 0 {
            duration_ms(self.wait_duration) / self.wait_count as f64
        } else {
            0.0
        }
    }
}

/// Duration as fractional milliseconds, keeping nanosecond precision.
fn duration_ms(dur: Duration) -> f64 {
    dur.as_nanos() as f64 / 1e6
}

/// Start sampling pool counters into the given sink at a fixed interval.
///
/// Returns immediately with a [`StopHandle`]; the sampling task runs on the
/// current Tokio runtime until the handle is signaled. The first sample is
/// taken one full `interval` after start, and one batch of eight measurements
/// is recorded per tick. Ticks never overlap; a slow sink delays the next
/// tick instead.
///
/// A sink error is logged and swallowed. A sink that panics tears down the
/// sampling task, never the caller.
///
/// # Errors
///
/// Returns [`Error::InvalidInterval`] if `interval` is zero, before any task
/// is spawned.
pub fn start_sampling<P, S>(pool: P, sink: S, interval: Duration) -> Result<StopHandle, Error>
where
    P: ObservablePool + Send + 'static,
    S: RecordSink + Send + 'static,
{
    if interval.is_zero() {
        return Err(Error::InvalidInterval);
    }
    let handle = StopHandle::new();
    tokio::spawn(sampler_task(pool, sink, interval, handle.token()));
    Ok(handle)
}

/// Create the background sampling future.
fn sampler_task<P, S>(
    pool: P,
    sink: S,
    interval: Duration,
    stop: CancellationToken,
) -> impl Future<Output = ()>
where
    P: ObservablePool,
    S: RecordSink,
{
    let span = trace_span!("pool_sampler");
    async move {
        let mut timer = time::interval_at(time::Instant::now() + interval, interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut state = SamplerState::default();
        loop {
            // Stop wins over a simultaneously ready tick.
            tokio::select! {
                biased;
                () = stop.cancelled() => break,
                _ = timer.tick() => sample_tick(&pool, &sink, &mut state),
            }
        }
    }
    .instrument(span)
}

/// Read one snapshot, emit its measurements and advance the baseline.
fn sample_tick<P: ObservablePool, S: RecordSink>(pool: &P, sink: &S, state: &mut SamplerState) {
    let snapshot = pool.snapshot();
    let window = WindowMetrics::compute(&snapshot, state);
    // Wait count and duration are emitted as cumulative totals; only the
    // average is derived from the window.
    let batch = [
        Measurement::new(measure::OPEN_CONNECTIONS, snapshot.open_connections),
        Measurement::new(measure::IDLE_CONNECTIONS, snapshot.idle),
        Measurement::new(measure::ACTIVE_CONNECTIONS, snapshot.in_use),
        Measurement::new(measure::WAIT_COUNT, snapshot.wait_count),
        Measurement::new(measure::WAIT_DURATION, duration_ms(snapshot.wait_duration)),
        Measurement::new(measure::AVG_WAIT, window.avg_wait_ms()),
        Measurement::new(measure::IDLE_CLOSED, snapshot.max_idle_closed),
        Measurement::new(measure::LIFETIME_CLOSED, snapshot.max_lifetime_closed),
    ];
    if let Err(err) = sink.record(&batch) {
        warn!(%err, "failed to record pool sample");
    }
    // The baseline must advance from the same snapshot whether or not the
    // emission succeeded, or the next window would double-count this one.
    state.advance(&snapshot);
}
