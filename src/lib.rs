#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![deny(elided_lifetimes_in_paths, unreachable_pub)]
#![warn(
    missing_docs,
    clippy::doc_link_with_quotes,
    clippy::doc_markdown,
    clippy::missing_errors_doc
)]

#[cfg(feature = "async")]
pub mod r#async;
pub mod config;
pub mod error;
mod handle;
pub mod measure;
mod metrics;
mod resource;
mod sampler;
pub mod sink;
pub mod snapshot;
mod stats;
pub mod sync;

pub use crate::{
    config::SamplerConfig,
    error::Error,
    handle::StopHandle,
    measure::{MeasureValue, Measurement},
    resource::MeteredResource,
    sampler::start_sampling,
    sink::{OtelSink, RecordSink},
    snapshot::{ObservablePool, PoolSnapshot},
};
