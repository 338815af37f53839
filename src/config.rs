use anyhow::Result;
use std::time::Duration;

/// Immutable sweep parameters, built once from CLI flags at startup.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    pub url: String,
    pub requests: u64,
    pub max_concurrency: u32,
    pub step: u32,
    /// Delay between concurrency levels, in seconds. Lets backend
    /// connections settle between load bursts.
    pub interval: f64,
}

impl SweepConfig {
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            anyhow::bail!("Target URL must not be empty");
        }
        if self.requests == 0 {
            anyhow::bail!("Request count must be at least 1");
        }
        if self.max_concurrency == 0 {
            anyhow::bail!("Maximum concurrency must be at least 1");
        }
        if self.step == 0 {
            anyhow::bail!("Concurrency step must be at least 1");
        }
        if !self.interval.is_finite() || self.interval < 0.0 {
            anyhow::bail!("Interval must be a non-negative number of seconds");
        }
        Ok(())
    }

    /// The ordered concurrency levels to measure: 1, then every multiple
    /// of `step` up to and including `max_concurrency`.
    pub fn concurrency_sequence(&self) -> Vec<u32> {
        (1..=self.max_concurrency)
            .filter(|n| *n == 1 || n % self.step == 0)
            .collect()
    }

    pub fn interval_duration(&self) -> Duration {
        Duration::from_secs_f64(self.interval)
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8000/".to_string(),
            requests: 1000,
            max_concurrency: 100,
            step: 10,
            interval: 30.0,
        }
    }
}
