use serde::Deserialize;
use serde_json::Value;

use super::agent::FetchError;
use super::snapshot::WalletSnapshot;

const GENERIC_UPSTREAM_ERROR: &str = "API request failed";

/// Decodes either a bare snapshot or a `{success, data, error}` envelope.
pub(super) fn decode_payload(raw: &str) -> Result<WalletSnapshot, FetchError> {
    let parsed: Value = serde_json::from_str(raw)?;
    let object = parsed.as_object().ok_or(FetchError::UnexpectedShape)?;

    if object.get("success").and_then(Value::as_bool) == Some(false) {
        return Err(FetchError::Upstream(
            error_message(&parsed).unwrap_or_else(|| GENERIC_UPSTREAM_ERROR.to_owned()),
        ));
    }

    let payload = match object.get("data") {
        Some(data) if data.is_object() => data,
        _ => &parsed,
    };

    Ok(WalletSnapshot::deserialize(payload)?)
}

/// Pulls `error`, then `message`, out of an upstream error body.
pub(super) fn error_message(body: &Value) -> Option<String> {
    ["error", "message"].iter().find_map(|key| {
        body.get(*key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .map(str::to_owned)
    })
}

pub(super) fn error_message_from_text(raw: &str) -> String {
    serde_json::from_str::<Value>(raw)
        .ok()
        .and_then(|body| error_message(&body))
        .unwrap_or_else(|| GENERIC_UPSTREAM_ERROR.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwraps_success_envelope() {
        let raw = r#"{"success": true, "data": {"address": "abc", "isValid": true, "relatedAccounts": []}}"#;
        let snapshot = decode_payload(raw).expect("envelope decodes");
        assert_eq!(snapshot.address, "abc");
        assert!(snapshot.is_valid);
    }

    #[test]
    fn accepts_bare_snapshot() {
        let raw = r#"{"address": "abc", "isValid": false}"#;
        let snapshot = decode_payload(raw).expect("bare snapshot decodes");
        assert!(!snapshot.is_valid);
        assert!(snapshot.related_accounts.is_empty());
    }

    #[test]
    fn reports_upstream_failure() {
        let raw = r#"{"success": false, "error": "rate limited"}"#;
        match decode_payload(raw) {
            Err(FetchError::Upstream(message)) => assert_eq!(message, "rate limited"),
            other => panic!("unexpected result: {other:?}"),
        }

        let raw = r#"{"success": false, "message": "try later"}"#;
        match decode_payload(raw) {
            Err(FetchError::Upstream(message)) => assert_eq!(message, "try later"),
            other => panic!("unexpected result: {other:?}"),
        }

        let raw = r#"{"success": false}"#;
        match decode_payload(raw) {
            Err(FetchError::Upstream(message)) => assert_eq!(message, GENERIC_UPSTREAM_ERROR),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn rejects_non_object_payloads() {
        assert!(matches!(
            decode_payload("[1, 2, 3]"),
            Err(FetchError::UnexpectedShape)
        ));
        assert!(matches!(decode_payload("not json"), Err(FetchError::Decode(_))));
    }

    #[test]
    fn error_text_falls_back_to_generic_message() {
        assert_eq!(error_message_from_text("<html>502</html>"), GENERIC_UPSTREAM_ERROR);
        assert_eq!(error_message_from_text(r#"{"error": "bad address"}"#), "bad address");
    }
}
