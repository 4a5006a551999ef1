//! Remote AI classification via the OpenRouter chat-completions API.
//!
//! The model is instructed to reply with pure JSON in the `Verdict` shape.
//! Replies are defensively unwrapped from markdown code fences before
//! parsing, since models routinely ignore the "no markdown" instruction.
//! Typed deserialization into `Verdict` doubles as shape validation — a
//! JSON-valid reply with a missing or unknown `risk_level` fails parsing and
//! triggers the heuristic fallback upstream.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;

use crate::analysis::Verdict;
use crate::error::LlmError;

/// Default model served through OpenRouter.
pub const DEFAULT_MODEL: &str = "deepseek/deepseek-chat-v3-0324:free";

const OPENROUTER_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Single attempt, no retries: a failed call falls back to the heuristic.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Low temperature — classification, not generation.
const TEMPERATURE: f32 = 0.3;

const MAX_TOKENS: u32 = 500;

const SYSTEM_PROMPT: &str = "Você é um especialista em deteção de burlas e mensagens fraudulentas \
     em português. Analise a mensagem fornecida e determine se é uma tentativa de burla/scam.\n\n\
     Considere indicadores como:\n\
     - Urgência excessiva\n\
     - Pedidos de informação pessoal/financeira\n\
     - Links suspeitos\n\
     - Erros ortográficos propositais\n\
     - Ofertas irrealistas\n\
     - Pressão para ação imediata\n\
     - Imitação de entidades oficiais (bancos, correios, etc.)\n\
     - Prémios ou sorteios falsos\n\
     - Ameaças de suspensão de conta\n\n\
     IMPORTANTE: Responda APENAS com JSON puro, sem markdown, sem ```json, sem formatação \
     adicional. Apenas o objeto JSON:\n\n\
     {\n\
       \"is_scam\": boolean,\n\
       \"confidence\": number (0-100),\n\
       \"risk_level\": \"safe\" | \"warning\" | \"scam\",\n\
       \"explanation\": \"explicação detalhada em português\",\n\
       \"indicators\": [\"lista\", \"de\", \"indicadores\", \"encontrados\"]\n\
     }";

/// Seam for the remote AI classifier, so tests can stub it out.
#[async_trait]
pub trait RemoteClassifier: Send + Sync {
    async fn classify(&self, message: &str) -> Result<Verdict, LlmError>;
}

/// OpenRouter-backed classifier.
pub struct OpenRouterClassifier {
    client: reqwest::Client,
    api_key: SecretString,
    model: String,
    endpoint: String,
}

impl OpenRouterClassifier {
    pub fn new(api_key: SecretString, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model: model.into(),
            endpoint: OPENROUTER_ENDPOINT.to_string(),
        }
    }

    /// Override the chat-completions endpoint (used by tests with a mock
    /// upstream server).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

// ── Wire types ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[async_trait]
impl RemoteClassifier for OpenRouterClassifier {
    async fn classify(&self, message: &str) -> Result<Verdict, LlmError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": format!("Analise esta mensagem: \"{message}\"")},
            ],
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            // OpenRouter attribution headers
            .header("HTTP-Referer", "http://localhost:3000")
            .header("X-Title", "Burlómetro")
            .json(&body)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed {
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(LlmError::HttpStatus {
                status: response.status().as_u16(),
            });
        }

        let completion: ChatCompletionResponse =
            response.json().await.map_err(|e| LlmError::InvalidResponse {
                reason: format!("malformed completion payload: {e}"),
            })?;

        let content = completion
            .choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .ok_or_else(|| LlmError::InvalidResponse {
                reason: "empty choices array".to_string(),
            })?;

        debug!(raw = %content, "Remote classifier reply");

        let cleaned = strip_code_fences(content);
        serde_json::from_str(cleaned).map_err(|e| LlmError::InvalidResponse {
            reason: format!("JSON parse error: {e}"),
        })
    }
}

/// Strip optional surrounding markdown code fences from a model reply.
///
/// Explicit prefix/suffix trimming against the two fence markers the models
/// actually emit — not general markdown parsing.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    for marker in ["```json", "```"] {
        if let Some(rest) = trimmed.strip_prefix(marker) {
            let rest = rest.strip_suffix("```").unwrap_or(rest);
            return rest.trim();
        }
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::analysis::RiskLevel;

    #[test]
    fn strips_json_fence() {
        let input = "```json\n{\"is_scam\": true}\n```";
        assert_eq!(strip_code_fences(input), "{\"is_scam\": true}");
    }

    #[test]
    fn strips_bare_fence() {
        let input = "```\n{\"is_scam\": false}\n```";
        assert_eq!(strip_code_fences(input), "{\"is_scam\": false}");
    }

    #[test]
    fn leaves_plain_json_untouched() {
        let input = "{\"is_scam\": true}";
        assert_eq!(strip_code_fences(input), input);
    }

    #[test]
    fn handles_missing_closing_fence() {
        let input = "```json\n{\"is_scam\": true}";
        assert_eq!(strip_code_fences(input), "{\"is_scam\": true}");
    }

    #[test]
    fn fenced_verdict_parses() {
        let reply = "```json\n{\"is_scam\": true, \"confidence\": 90, \"risk_level\": \"scam\", \
                     \"explanation\": \"Burla evidente.\", \"indicators\": [\"urgente\"]}\n```";
        let verdict: Verdict = serde_json::from_str(strip_code_fences(reply)).unwrap();
        assert!(verdict.is_scam);
        assert_eq!(verdict.risk_level, RiskLevel::Scam);
        assert_eq!(verdict.indicators, vec!["urgente"]);
    }

    #[test]
    fn missing_indicators_default_to_empty() {
        let reply = "{\"is_scam\": false, \"confidence\": 25, \"risk_level\": \"safe\", \
                     \"explanation\": \"Parece legítima.\"}";
        let verdict: Verdict = serde_json::from_str(strip_code_fences(reply)).unwrap();
        assert!(verdict.indicators.is_empty());
    }

    #[test]
    fn unknown_risk_level_fails_parsing() {
        let reply = "{\"is_scam\": false, \"confidence\": 25, \"risk_level\": \"unknown\", \
                     \"explanation\": \"?\", \"indicators\": []}";
        assert!(serde_json::from_str::<Verdict>(reply).is_err());
    }
}
