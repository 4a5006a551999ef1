//! Rule-based heuristic scoring engine.
//!
//! A fixed scoring function over lexical and structural features of the
//! message text. Runs when no remote classifier is configured, and as the
//! fallback whenever the remote call fails or returns unparseable output.

use regex::Regex;

use crate::analysis::{RiskLevel, Verdict};

/// Portuguese scam-vocabulary: urgency phrases, financial/credential terms,
/// phishing bait, pressure language. Matched case-insensitively as substrings;
/// match order in a verdict follows this list, not occurrence order.
const SCAM_INDICATORS: [&str; 36] = [
    "urgente",
    "imediatamente",
    "último dia",
    "oferta limitada",
    "clique aqui",
    "verifique agora",
    "confirme os dados",
    "conta bloqueada",
    "suspensa",
    "dados bancários",
    "transferência",
    "prémio",
    "ganhou",
    "sorteio",
    "phishing",
    "bitcoin",
    "criptomoeda",
    "nib",
    "iban",
    "multibanco",
    "cartão de crédito",
    "password",
    "código de segurança",
    "pin",
    "dados pessoais",
    "validar conta",
    "atualizar dados",
    "expirou",
    "desconto especial",
    "oferta exclusiva",
    "apenas hoje",
    "clique no link",
    "download",
    "instale agora",
    "vírus detectado",
    "computador infetado",
];

/// Banks, government bodies, utility/telecom providers — used to detect
/// impersonation of official entities.
const OFFICIAL_ENTITIES: [&str; 18] = [
    "banco",
    "caixa geral",
    "millennium",
    "santander",
    "ctt",
    "correios",
    "emel",
    "edp",
    "nos",
    "meo",
    "vodafone",
    "segurança social",
    "finanças",
    "at",
    "tribunal",
    "polícia",
    "gnr",
    "psp",
];

/// Risk score at or above which a message is classified as a scam.
const SCAM_THRESHOLD: u32 = 70;

/// Risk score at or above which a message gets a warning.
const WARNING_THRESHOLD: u32 = 35;

/// Heuristic classifier with pre-compiled structural patterns.
///
/// Stateless after construction; `classify` is a pure function of its input.
pub struct HeuristicClassifier {
    url_re: Regex,
    long_number_re: Regex,
    capital_run_re: Regex,
}

impl HeuristicClassifier {
    pub fn new() -> Self {
        Self {
            url_re: Regex::new(r"https?://\S+").unwrap(),
            long_number_re: Regex::new(r"\d{6,}").unwrap(),
            capital_run_re: Regex::new(r"[A-Z]{3,}").unwrap(),
        }
    }

    /// Classify a message. Total over any input, including the empty string
    /// (callers reject empty messages before analysis, not here).
    pub fn classify(&self, text: &str) -> Verdict {
        let lowered = text.to_lowercase();

        // Keyword features on the lowercased text
        let indicators: Vec<String> = SCAM_INDICATORS
            .iter()
            .filter(|term| lowered.contains(*term))
            .map(|term| term.to_string())
            .collect();
        let mentions_official_entity =
            OFFICIAL_ENTITIES.iter().any(|entity| lowered.contains(entity));

        // Structural features on the original text (case matters here)
        let has_suspicious_url = self.url_re.is_match(text);
        let has_long_numbers = self.long_number_re.is_match(text);
        let has_multiple_exclamations = text.matches('!').count() > 2;
        let has_capital_words = self.capital_run_re.find_iter(text).count() > 1;

        let mut risk_score: u32 = indicators.len() as u32 * 15;
        if has_suspicious_url {
            risk_score += 25;
        }
        if has_long_numbers {
            risk_score += 20;
        }
        // Impersonation of an official entity combined with bait language
        if mentions_official_entity && !indicators.is_empty() {
            risk_score += 30;
        }
        if has_multiple_exclamations {
            risk_score += 10;
        }
        if has_capital_words {
            risk_score += 15;
        }

        let risk_level = if risk_score >= SCAM_THRESHOLD {
            RiskLevel::Scam
        } else if risk_score >= WARNING_THRESHOLD {
            RiskLevel::Warning
        } else {
            RiskLevel::Safe
        };

        let confidence = (risk_score + 10).clamp(20, 95) as u8;

        Verdict {
            is_scam: risk_level == RiskLevel::Scam,
            confidence,
            risk_level,
            explanation: build_explanation(risk_level, &indicators, mentions_official_entity),
            indicators,
        }
    }
}

impl Default for HeuristicClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the Portuguese explanation text for a verdict.
fn build_explanation(
    risk_level: RiskLevel,
    indicators: &[String],
    mentions_official_entity: bool,
) -> String {
    match risk_level {
        RiskLevel::Safe => "A mensagem parece ser legítima. Não foram encontrados indicadores \
                            significativos de burla."
            .to_string(),
        RiskLevel::Warning => {
            let mut text = String::from("A mensagem contém alguns elementos suspeitos");
            if !indicators.is_empty() {
                let shown = &indicators[..indicators.len().min(3)];
                text.push_str(&format!(": {}", shown.join(", ")));
            }
            text.push_str(
                ". Tenha cuidado e verifique sempre a fonte antes de fornecer qualquer informação.",
            );
            text
        }
        RiskLevel::Scam => {
            let mut text =
                String::from("🚨 ATENÇÃO: Esta mensagem tem várias características típicas de burla");
            if !indicators.is_empty() {
                let shown = &indicators[..indicators.len().min(4)];
                text.push_str(&format!(", incluindo: {}", shown.join(", ")));
            }
            if mentions_official_entity {
                text.push_str(". A mensagem parece imitar uma entidade oficial");
            }
            text.push_str(
                ". NÃO forneça informações pessoais, não clique em links e não faça transferências.",
            );
            text
        }
    }
}
