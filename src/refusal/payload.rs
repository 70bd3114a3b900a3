use crate::refusal::codes::RefusalCode;
use serde::Serialize;
use serde_json::Value;

pub const ENVELOPE_VERSION: &str = "docsift.v0";

/// Refusal envelope emitted to stdout on exit 2.
#[derive(Debug, Serialize)]
pub struct RefusalPayload {
    pub version: String,
    pub outcome: String,
    pub refusal: RefusalDetail,
}

/// Detail within a refusal envelope.
#[derive(Debug, Serialize)]
pub struct RefusalDetail {
    pub code: RefusalCode,
    pub message: String,
    pub detail: Value,
    pub next_command: Option<String>,
}

impl RefusalPayload {
    /// Build a refusal payload for run-mode errors.
    pub fn new(
        code: RefusalCode,
        message: &str,
        detail: Value,
        next_command: Option<&str>,
    ) -> Self {
        Self {
            version: ENVELOPE_VERSION.to_owned(),
            outcome: "REFUSAL".to_owned(),
            refusal: RefusalDetail {
                code,
                message: message.to_owned(),
                detail,
                next_command: next_command.map(str::to_owned),
            },
        }
    }
}
