// Response envelope returned to callers

use crate::classify::Outcome;
use crate::extract::Extracted;
use crate::invoker::RawExecutionResult;
use serde::Serialize;

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_INTERNAL: u16 = 500;

/// Payload of a response that reached the external tool
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseData {
    /// `success`, `warning`, `user_error`, `tool_error` or `timeout`
    pub outcome: &'static str,
    /// Warning text, present only for the warning outcome
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub summary: Extracted,
    pub exit_code: i32,
    pub duration_ms: u64,
    pub truncated: bool,
}

impl ResponseData {
    pub fn new(outcome: &Outcome, summary: Extracted, raw: &RawExecutionResult) -> Self {
        let warning = match outcome {
            Outcome::Warning(msg) => Some(msg.clone()),
            _ => None,
        };
        Self {
            outcome: outcome.label(),
            warning,
            summary,
            exit_code: raw.exit_code,
            duration_ms: raw.duration_ms,
            truncated: raw.truncated,
        }
    }
}

/// `{ success, data?, error? }` plus the status a transport should send
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip)]
    pub status: u16,
}

impl ApiResponse {
    pub fn ok(data: ResponseData) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            status: STATUS_OK,
        }
    }

    /// Rejected before anything ran
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(non_empty(message.into())),
            status: STATUS_BAD_REQUEST,
        }
    }

    /// The tool could not be run at all
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(non_empty(message.into())),
            status: STATUS_INTERNAL,
        }
    }

    /// Envelope for a classified run; failures keep the parsed data alongside the error
    pub fn from_outcome(outcome: &Outcome, data: ResponseData) -> Self {
        let (status, error) = match outcome {
            Outcome::Success | Outcome::Warning(_) => return Self::ok(data),
            Outcome::UserError(msg) => (STATUS_BAD_REQUEST, msg.clone()),
            Outcome::ToolError(msg) => (STATUS_INTERNAL, msg.clone()),
            Outcome::Timeout => (STATUS_INTERNAL, "command timed out".to_string()),
        };
        Self {
            success: false,
            data: Some(data),
            error: Some(non_empty(error)),
            status,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| {
            format!(r#"{{"success":false,"error":"failed to encode response: {e}"}}"#)
        })
    }
}

fn non_empty(message: String) -> String {
    if message.trim().is_empty() {
        "unknown error".to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(outcome: &Outcome) -> ResponseData {
        ResponseData::new(
            outcome,
            Extracted::Raw {
                raw_output: String::new(),
            },
            &RawExecutionResult::success(""),
        )
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (Outcome::Success, 200),
            (Outcome::Warning("warning[W1]: x".into()), 200),
            (Outcome::UserError("bad path".into()), 400),
            (Outcome::ToolError("boom".into()), 500),
            (Outcome::Timeout, 500),
        ];
        for (outcome, status) in cases {
            let response = ApiResponse::from_outcome(&outcome, data(&outcome));
            assert_eq!(response.status, status, "{outcome:?}");
            assert_eq!(response.success, status == 200);
            if !response.success {
                assert!(!response.error.as_deref().unwrap_or("").is_empty());
            }
        }
    }

    #[test]
    fn test_empty_error_replaced() {
        let response = ApiResponse::from_outcome(
            &Outcome::ToolError("  ".into()),
            data(&Outcome::ToolError("  ".into())),
        );
        assert_eq!(response.error.as_deref(), Some("unknown error"));
    }

    #[test]
    fn test_envelope_json_shape() {
        let response = ApiResponse::bad_request("package path is required");
        let value: serde_json::Value = serde_json::from_str(&response.to_json()).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "package path is required");
        assert!(value.get("data").is_none());
        assert!(value.get("status").is_none());
    }

    #[test]
    fn test_warning_is_carried_in_data() {
        let outcome = Outcome::Warning("warning[W09002]: unused".into());
        let response = ApiResponse::from_outcome(&outcome, data(&outcome));
        let value: serde_json::Value = serde_json::from_str(&response.to_json()).unwrap();
        assert_eq!(value["data"]["outcome"], "warning");
        assert_eq!(value["data"]["warning"], "warning[W09002]: unused");
        assert_eq!(value["data"]["summary"]["kind"], "raw");
    }
}
