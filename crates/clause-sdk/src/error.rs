//! Error extraction from non-success responses.

use clause_core::ClauseError;
use reqwest::Response;

/// Fallback labels used when a failed response carries no detail.
pub const EVALUATE_FAILED: &str = "An unknown error occurred.";
pub const DOWNLOAD_FAILED: &str = "PDF generation failed.";
pub const SUMMARIZE_FAILED: &str = "PDF summarization failed.";

/// Convert a non-success response into a transport error.
///
/// A JSON body with a `detail` field supplies the message. A JSON body
/// without one yields `fallback`; a body that is not JSON yields the status
/// text, then `fallback`.
pub async fn error_from_response(response: Response, fallback: &str) -> ClauseError {
    let status = response.status();
    let body = response.bytes().await.unwrap_or_default();
    let reason = status.canonical_reason();
    ClauseError::status(status.as_u16(), detail_message(&body, reason, fallback))
}

pub(crate) fn detail_message(body: &[u8], status_text: Option<&str>, fallback: &str) -> String {
    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(value) => match value.get("detail") {
            Some(serde_json::Value::String(detail)) if !detail.is_empty() => detail.clone(),
            Some(serde_json::Value::Null) | Some(serde_json::Value::String(_)) | None => {
                fallback.to_string()
            }
            Some(other) => other.to_string(),
        },
        Err(_) => status_text
            .filter(|text| !text.is_empty())
            .unwrap_or(fallback)
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_is_used() {
        let body = br#"{"detail": "Prompt is too short to be meaningful."}"#;
        assert_eq!(
            detail_message(body, Some("Bad Request"), EVALUATE_FAILED),
            "Prompt is too short to be meaningful."
        );
    }

    #[test]
    fn test_json_without_detail_uses_fallback() {
        assert_eq!(detail_message(br#"{"error": 1}"#, Some("Bad Request"), DOWNLOAD_FAILED), DOWNLOAD_FAILED);
        assert_eq!(detail_message(br#"{"detail": ""}"#, Some("Bad Request"), DOWNLOAD_FAILED), DOWNLOAD_FAILED);
    }

    #[test]
    fn test_structured_detail_is_rendered() {
        let body = br#"{"detail": [{"msg": "field required"}]}"#;
        assert_eq!(
            detail_message(body, None, EVALUATE_FAILED),
            r#"[{"msg":"field required"}]"#
        );
    }

    #[test]
    fn test_non_json_uses_status_text_then_fallback() {
        assert_eq!(
            detail_message(b"<html>oops</html>", Some("Internal Server Error"), SUMMARIZE_FAILED),
            "Internal Server Error"
        );
        assert_eq!(detail_message(b"", None, SUMMARIZE_FAILED), SUMMARIZE_FAILED);
    }
}
