//! Message analysis — verdict types, heuristic classifier, and the
//! analysis service that layers the remote classifier on top.

pub mod heuristic;
pub mod service;

pub use heuristic::HeuristicClassifier;
pub use service::AnalysisService;

use serde::{Deserialize, Serialize};

/// Risk tier for an analyzed message, ordered from harmless to fraudulent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Safe,
    Warning,
    Scam,
}

/// Structured classification result returned to callers.
///
/// Built fresh per request and serialized directly into the response; never
/// mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// True iff `risk_level` is `Scam`.
    pub is_scam: bool,
    /// Confidence in the verdict, clamped to [20, 95].
    pub confidence: u8,
    pub risk_level: RiskLevel,
    /// Human-readable Portuguese explanation.
    pub explanation: String,
    /// Scam-vocabulary terms found in the message, in vocabulary order.
    #[serde(default)]
    pub indicators: Vec<String>,
}
