//! Request and response bodies of the HTTP API.
//!
//! All bodies are JSON. Field names follow the legacy question sheet, so the
//! answer columns keep their `responseA`..`responseD` spelling.

use serde::{Deserialize, Serialize};

use crate::models::QuestionView;

/// Body of `POST /questions/random`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionRequest {
    /// Test type, e.g. "Positioning test".
    pub r#use: String,
    /// Subjects to draw from.
    pub subjects: Vec<String>,
    /// Number of questions, one of 5, 10 or 20.
    pub limit: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionResponse {
    pub questions: Vec<QuestionView>,
    pub total_returned: usize,
}

/// Body of `POST /questions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateQuestionRequest {
    pub question: String,
    pub subject: String,
    pub r#use: String,
    pub correct: String,
    #[serde(rename = "responseA")]
    pub response_a: String,
    #[serde(rename = "responseB", default)]
    pub response_b: Option<String>,
    #[serde(rename = "responseC", default)]
    pub response_c: Option<String>,
    #[serde(rename = "responseD", default)]
    pub response_d: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateQuestionResponse {
    pub id: i64,
    pub message: String,
}

/// Liveness probe body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            message: STATUS_MESSAGE.to_string(),
        }
    }
}

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

pub const STATUS_MESSAGE: &str = "Questionnaire API is running";
pub const CREATED_MESSAGE: &str = "Question created successfully";

/// Default server port.
pub const DEFAULT_PORT: u16 = 8000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_field_names() {
        let json = r#"{
            "question": "Which port does HTTPS use?",
            "subject": "Networking",
            "use": "Positioning test",
            "correct": "B",
            "responseA": "80",
            "responseB": "443",
            "responseC": null
        }"#;
        let request: CreateQuestionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.r#use, "Positioning test");
        assert_eq!(request.response_b.as_deref(), Some("443"));
        assert_eq!(request.response_c, None);
        assert_eq!(request.response_d, None);
    }

    #[test]
    fn test_selection_request_uses_plain_use_key() {
        let request = SelectionRequest {
            r#use: "Positioning test".to_string(),
            subjects: vec!["Databases".to_string()],
            limit: 5,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["use"], "Positioning test");
        assert_eq!(json["limit"], 5);
    }

    #[test]
    fn test_status_body() {
        let json = serde_json::to_string(&StatusResponse::ok()).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains(STATUS_MESSAGE));
    }
}
