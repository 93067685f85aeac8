//! API request and response types

use serde::Deserialize;
use serde::Serialize;

use crate::models::MatchRequest;

/// Standard API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub indexed_properties: usize,
}

/// Match request body.
///
/// Either `user_input` as free text, or the profile fields the text is composed from.
#[derive(Debug, Default, Deserialize)]
pub struct MatchApiRequest {
    #[serde(default)]
    pub user_input: Option<String>,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub preferences: Option<String>,
}

impl MatchApiRequest {
    /// Resolve to a pipeline request; `None` when neither form carries any text
    #[must_use]
    pub fn into_match_request(self) -> Option<MatchRequest> {
        if let Some(input) = self.user_input.filter(|s| !s.trim().is_empty()) {
            return Some(MatchRequest::new(input));
        }

        let budget = self.budget.filter(|s| !s.trim().is_empty());
        let preferences = self.preferences.filter(|s| !s.trim().is_empty());
        if budget.is_none() && preferences.is_none() && self.bedrooms.is_none() {
            return None;
        }

        Some(MatchRequest::from_preferences(
            budget.as_deref().unwrap_or("not specified"),
            self.bedrooms.unwrap_or(0),
            preferences.as_deref().unwrap_or("none"),
        ))
    }
}
