//! Error types and error support code.

/// Generalized error type used by metered pools and the stats sampler.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Pool operation not supported.
    #[error("operation not supported")]
    NotImplemented,
    /// No available resources were found in the pool.
    #[error("pool is exhausted")]
    PoolExhausted,
    /// Call would block the thread, and non-blocking operation was requested.
    #[error("acquisition from pool would block execution")]
    WouldBlock,
    /// Resource acquisition took longer than the specified timeout.
    #[error("connection acquisition timeout")]
    AcquireTimeout,
    /// Sampling interval must be greater than zero.
    #[error("sampling interval must be greater than zero")]
    InvalidInterval,
    /// Measurement name is not recognized by the sink.
    #[error("measurement not recognized by sink: {0}")]
    UnknownMeasurement(&'static str),
    /// Pool implementation-specific error.
    #[error("pool error: {0}")]
    Pool(Box<dyn std::error::Error + Send + Sync>),
    /// Sink implementation-specific error.
    #[error("sink error: {0}")]
    Sink(Box<dyn std::error::Error + Send + Sync>),
}
