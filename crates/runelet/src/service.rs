//! ConverterService: transport-agnostic conversion entry points.
//!
//! Owns the decode policy and the HTTP metrics registry. Transports hold
//! an `Arc<ConverterService>` and delegate to it; the codec itself stays
//! pure and free of transport concerns.

use crate::codec::{self, DecodeError, DecodePolicy};
use crate::metrics::HttpMetrics;

/// Conversion facade shared across requests.
///
/// Stateless per request: both entry points read only their input and the
/// immutable policy, so no locking is needed.
pub struct ConverterService {
    policy: DecodePolicy,
    metrics: HttpMetrics,
}

impl ConverterService {
    /// Create a service with the default policy ([`DecodePolicy::Replace`]).
    pub fn new() -> Result<Self, prometheus::Error> {
        Ok(Self {
            policy: DecodePolicy::default(),
            metrics: HttpMetrics::new()?,
        })
    }

    /// Override the malformed-token policy used by [`reverse`](Self::reverse).
    pub fn with_policy(mut self, policy: DecodePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Text → escape-token notation.
    pub fn convert(&self, text: &str) -> String {
        codec::encode(text)
    }

    /// Escape-token notation → text, under the configured policy.
    ///
    /// Only [`DecodePolicy::Reject`] can produce an error.
    pub fn reverse(&self, text: &str) -> Result<String, DecodeError> {
        codec::decode(text, self.policy)
    }

    /// The request metrics recorded by the HTTP transport.
    pub fn metrics(&self) -> &HttpMetrics {
        &self.metrics
    }
}
