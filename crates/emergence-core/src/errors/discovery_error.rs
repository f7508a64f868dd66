//! Discovery-function errors.
//!
//! These never abort the pipeline: the runner logs them and substitutes an
//! empty result for the failing sub-analysis.

use super::error_code::{self, EmergenceErrorCode};

/// Errors raised by a pluggable discovery function.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("{analysis} analysis failed: {reason}")]
    AnalysisFailed {
        analysis: &'static str,
        reason: String,
    },

    #[error("signal {feature} is unusable: {reason}")]
    InvalidSignal { feature: String, reason: String },
}

impl EmergenceErrorCode for DiscoveryError {
    fn error_code(&self) -> &'static str {
        error_code::DISCOVERY_ERROR
    }
}

pub type DiscoveryResult<T> = Result<T, DiscoveryError>;
