//! Wire types of the HTTP surface.
//!
//! The shapes here are a fixed contract with the browser frontend: `/ask`
//! answers either `{"response": …}` or a binary PNG attachment, uploads
//! answer `{"message", "filename"}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// GET / response
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
}

/// POST /upload response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub filename: String,
}

/// POST /ask form body
#[derive(Debug, Deserialize)]
pub struct AskForm {
    pub pergunta: String,
}

/// POST /ask textual response
#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub response: Value,
}

/// GET /current response
#[derive(Debug, Serialize)]
pub struct CurrentFileResponse {
    pub current_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
