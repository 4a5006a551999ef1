//! Analysis service — remote classification with heuristic fallback.
//!
//! Flow per message:
//! 1. Remote classifier (if configured) → structured JSON verdict
//! 2. Any remote failure → heuristic classifier on the same text
//!
//! The service never fails: once the handler has validated the input, a
//! verdict is always produced.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::analysis::{HeuristicClassifier, Verdict};
use crate::llm::RemoteClassifier;

pub struct AnalysisService {
    heuristic: HeuristicClassifier,
    remote: Option<Arc<dyn RemoteClassifier>>,
}

impl AnalysisService {
    pub fn new(remote: Option<Arc<dyn RemoteClassifier>>) -> Self {
        Self {
            heuristic: HeuristicClassifier::new(),
            remote,
        }
    }

    /// Heuristic-only service (no API credential configured).
    pub fn local_only() -> Self {
        Self::new(None)
    }

    /// Analyze a message. Expects `message` to be non-empty and trimmed;
    /// the HTTP handler enforces that before calling.
    pub async fn analyze(&self, message: &str) -> Verdict {
        let Some(remote) = &self.remote else {
            debug!("No remote classifier configured, using heuristic analysis");
            return self.heuristic.classify(message);
        };

        match remote.classify(message).await {
            Ok(verdict) => verdict,
            Err(e) => {
                warn!(error = %e, "Remote classification failed, falling back to heuristic");
                self.heuristic.classify(message)
            }
        }
    }
}
