use std::time::Duration;

/// Time the risk-scoring collaborator is given before its result is fetched.
pub const DEFAULT_RISK_FETCH_DELAY: Duration = Duration::from_secs(5);

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Tuning for [`SimulationLifecycle`](crate::application::lifecycle::SimulationLifecycle).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleConfig {
    /// Fixed wait between a schedule becoming ready and the risk-score fetch.
    pub risk_fetch_delay: Duration,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            risk_fetch_delay: DEFAULT_RISK_FETCH_DELAY,
        }
    }
}

impl LifecycleConfig {
    pub fn with_risk_fetch_delay(mut self, delay: Duration) -> Self {
        self.risk_fetch_delay = delay;
        self
    }
}

/// Connection settings for the HTTP collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}
