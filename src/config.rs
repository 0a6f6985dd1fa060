//! Sampler configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    error::Error, handle::StopHandle, sampler::start_sampling, sink::RecordSink,
    snapshot::ObservablePool,
};

/// Configuration for periodic pool sampling.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[non_exhaustive]
pub struct SamplerConfig {
    /// Interval between samples.
    ///
    /// Default is 15 seconds.
    #[serde(default = "SamplerConfig::default_interval", with = "humantime_serde")]
    interval: Duration,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            interval: Self::default_interval(),
        }
    }
}

impl SamplerConfig {
    /// Default value for [`Self::interval`].
    #[must_use]
    #[inline]
    fn default_interval() -> Duration {
        Duration::from_secs(15)
    }

    /// Create a configuration with the given sampling interval.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Configured sampling interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start sampling `pool` into `sink` using this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInterval`] if the configured interval is zero.
    pub fn spawn<P, S>(&self, pool: P, sink: S) -> Result<StopHandle, Error>
    where
        P: ObservablePool + Send + 'static,
        S: RecordSink + Send + 'static,
    {
        start_sampling(pool, sink, self.interval)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{from_str, json, to_value};

    use super::*;

    /// Deserialize - empty object uses the default interval.
    #[test]
    fn config_de_default() {
        let deserialized: SamplerConfig = from_str("{}").unwrap();
        assert_eq!(deserialized, SamplerConfig::default());
        assert_eq!(deserialized.interval(), Duration::from_secs(15));
    }

    /// Deserialize - human-readable interval.
    #[test]
    fn config_de_humantime() {
        let serialized = r#"{
            "interval": "2s 500ms"
        }"#;
        let deserialized: SamplerConfig = from_str(serialized).unwrap();
        assert_eq!(deserialized.interval(), Duration::from_millis(2500));
    }

    /// Serialize - interval is written in human-readable form.
    #[test]
    fn config_ser_humantime() {
        let config = SamplerConfig::new(Duration::from_secs(30));
        assert_eq!(to_value(&config).unwrap(), json!({"interval": "30s"}));
    }
}
