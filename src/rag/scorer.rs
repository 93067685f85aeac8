//! Per-candidate LLM scoring

use std::sync::Arc;

use futures::stream;
use futures::StreamExt;
use futures::TryStreamExt;
use serde_json::Value;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::errors::PropMatchError;
use crate::errors::ResponseParseError;
use crate::errors::Result;
use crate::llm::response::extract_json_object;
use crate::llm::LanguageModel;
use crate::llm::MatchPrompts;
use crate::llm::PromptTemplate;
use crate::models::Candidate;
use crate::models::PropertyDetails;
use crate::models::ScoredMatch;

/// A validated score response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreVerdict {
    pub score: u8,
    pub reason: String,
}

/// Scores each candidate with one model call and sorts by score
pub struct MatchScorer {
    llm: Arc<dyn LanguageModel>,
    template: PromptTemplate,
    concurrency: usize,
}

impl MatchScorer {
    /// Sequential scoring
    pub fn new(llm: Arc<dyn LanguageModel>) -> Self {
        Self::with_concurrency(llm, 1)
    }

    /// At most `concurrency` scoring calls in flight
    pub fn with_concurrency(llm: Arc<dyn LanguageModel>, concurrency: usize) -> Self {
        Self {
            llm,
            template: MatchPrompts::match_score(),
            concurrency: concurrency.max(1),
        }
    }

    /// Score `candidates` against `user_input`, highest score first.
    ///
    /// A candidate whose response cannot be validated is dropped; the rest are kept.
    /// Equal scores keep the input order.
    ///
    /// # Errors
    /// - Transport errors from the language model; these abort the whole batch
    pub async fn score(&self, user_input: &str, candidates: Vec<Candidate>) -> Result<Vec<ScoredMatch>> {
        if candidates.is_empty() {
            debug!("No candidates to score");
            return Ok(Vec::new());
        }
        let total = candidates.len();
        info!("Scoring {} candidates (concurrency {})", total, self.concurrency);

        // `buffered` yields in input order, so the stable sort below sees retrieval order
        let outcomes: Vec<(Candidate, std::result::Result<ScoreVerdict, ResponseParseError>)> =
            stream::iter(candidates)
                .map(|candidate| async move {
                    let verdict = self.score_one(user_input, &candidate).await?;
                    Ok::<_, PropMatchError>((candidate, verdict))
                })
                .buffered(self.concurrency)
                .try_collect()
                .await?;

        let mut matches = Vec::with_capacity(total);
        for (candidate, verdict) in outcomes {
            match verdict {
                Ok(verdict) => matches.push(ScoredMatch {
                    id: candidate.id().to_string(),
                    score: verdict.score,
                    reason: verdict.reason,
                    details: PropertyDetails::from(&candidate.document),
                }),
                Err(e) => warn!("Dropping {}: unusable score response ({e})", candidate.id()),
            }
        }

        matches.sort_by(|a, b| b.score.cmp(&a.score));
        info!("Scored {}/{} candidates", matches.len(), total);
        Ok(matches)
    }

    async fn score_one(
        &self,
        user_input: &str,
        candidate: &Candidate,
    ) -> Result<std::result::Result<ScoreVerdict, ResponseParseError>> {
        let price = candidate.price().to_string();
        let summary = format!("{} | Price: ${}", candidate.document.content, price);
        let prompt = self.template.render_with(&[
            ("user_input", user_input),
            ("property", &summary),
            ("price", &price),
        ]);

        let response = self.llm.invoke(&prompt).await?;
        debug!("Score response for {}: {}", candidate.id(), response);
        Ok(parse_score_response(&response))
    }
}

/// Validate a score response.
///
/// `score` must be numeric (a numeric string is accepted); fractions round to the
/// nearest integer and the result is clamped to 0..=100. `reason` must be a string.
pub fn parse_score_response(content: &str) -> std::result::Result<ScoreVerdict, ResponseParseError> {
    let object = extract_json_object(content)?;

    let raw_score = match object.get("score") {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|s| s.is_finite())
    .ok_or(ResponseParseError::InvalidField("score"))?;

    let reason = object
        .get("reason")
        .and_then(Value::as_str)
        .ok_or(ResponseParseError::InvalidField("reason"))?
        .trim()
        .to_string();

    Ok(ScoreVerdict {
        score: raw_score.round().clamp(0.0, 100.0) as u8,
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_score() {
        let verdict = parse_score_response(r#"{"score": 85, "reason": "Close to the beach"}"#).unwrap();
        assert_eq!(verdict.score, 85);
        assert_eq!(verdict.reason, "Close to the beach");
    }

    #[test]
    fn test_score_is_clamped_and_rounded() {
        assert_eq!(parse_score_response(r#"{"score": 140, "reason": "x"}"#).unwrap().score, 100);
        assert_eq!(parse_score_response(r#"{"score": -12, "reason": "x"}"#).unwrap().score, 0);
        assert_eq!(parse_score_response(r#"{"score": 72.6, "reason": "x"}"#).unwrap().score, 73);
        assert_eq!(parse_score_response(r#"{"score": "64", "reason": "x"}"#).unwrap().score, 64);
    }

    #[test]
    fn test_missing_or_wrong_fields() {
        assert_eq!(
            parse_score_response(r#"{"reason": "no score"}"#),
            Err(ResponseParseError::InvalidField("score"))
        );
        assert_eq!(
            parse_score_response(r#"{"score": "high", "reason": "x"}"#),
            Err(ResponseParseError::InvalidField("score"))
        );
        assert_eq!(
            parse_score_response(r#"{"score": 50}"#),
            Err(ResponseParseError::InvalidField("reason"))
        );
        assert_eq!(
            parse_score_response(r#"{"score": 50, "reason": 7}"#),
            Err(ResponseParseError::InvalidField("reason"))
        );
    }

    #[test]
    fn test_prose_response_is_rejected() {
        assert_eq!(
            parse_score_response("I would rate this an 8 out of 10."),
            Err(ResponseParseError::NoJson)
        );
    }

    #[test]
    fn test_json_embedded_in_prose() {
        let verdict =
            parse_score_response("Here you go: {\"score\": 40, \"reason\": \"Too far inland\"} Hope that helps")
                .unwrap();
        assert_eq!(verdict.score, 40);
    }
}
