//! Decoding of the `{ success, data, message }` response envelope.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ClientError;

#[derive(Debug, Deserialize)]
struct RawEnvelope {
    success: bool,
    #[serde(default)]
    data: serde_json::Value,
    #[serde(default)]
    message: Option<String>,
}

/// A decoded success envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    pub data: T,
    pub message: Option<String>,
}

/// Decode a response body received with HTTP `status`.
///
/// Non-2xx statuses become [`ClientError::Api`] carrying the server's
/// message when the body has one. A 2xx body with `success: false` or a
/// `data` field that does not match `T` is a [`ClientError::Envelope`].
pub fn decode<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<Envelope<T>, ClientError> {
    if !(200..300).contains(&status) {
        return Err(ClientError::Api {
            status,
            message: error_message(body),
        });
    }

    let raw: RawEnvelope =
        serde_json::from_slice(body).map_err(|e| ClientError::Envelope(e.to_string()))?;
    if !raw.success {
        return Err(ClientError::Envelope(
            raw.message
                .unwrap_or_else(|| "Request was not successful".to_string()),
        ));
    }

    let data = serde_json::from_value(raw.data)
        .map_err(|e| ClientError::Envelope(format!("unexpected data: {e}")))?;
    Ok(Envelope {
        data,
        message: raw.message,
    })
}

/// The `message` of an error body, or the raw text when it is not JSON.
fn error_message(body: &[u8]) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }

    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(b) => b.message,
        Err(_) if body.is_empty() => "<empty body>".to_string(),
        Err(_) => String::from_utf8_lossy(body).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn decodes_data_and_message() {
        let env: Envelope<Vec<i64>> =
            decode(200, br#"{"success":true,"data":[1,2],"message":"ok"}"#).unwrap();
        assert_eq!(env.data, vec![1, 2]);
        assert_eq!(env.message.as_deref(), Some("ok"));
    }

    #[test]
    fn null_data_decodes_as_unit() {
        let env: Envelope<()> =
            decode(200, br#"{"success":true,"data":null,"message":"User deleted"}"#).unwrap();
        assert_eq!(env.message.as_deref(), Some("User deleted"));
    }

    #[test]
    fn error_status_uses_server_message() {
        let body = br#"{"success":false,"message":"Complaint is not Pending","code":"CONFLICT"}"#;
        let err = decode::<()>(409, body).unwrap_err();
        assert_matches!(
            err,
            ClientError::Api { status: 409, ref message } if message == "Complaint is not Pending"
        );
    }

    #[test]
    fn non_json_error_body_is_kept() {
        let err = decode::<()>(502, b"Bad Gateway").unwrap_err();
        assert_matches!(err, ClientError::Api { status: 502, ref message } if message == "Bad Gateway");
    }

    #[test]
    fn unsuccessful_envelope_is_an_error() {
        let err = decode::<()>(200, br#"{"success":false,"message":"nope"}"#).unwrap_err();
        assert_matches!(err, ClientError::Envelope(ref m) if m == "nope");
    }

    #[test]
    fn mismatched_data_is_an_error() {
        let err = decode::<Vec<i64>>(200, br#"{"success":true,"data":{"a":1}}"#).unwrap_err();
        assert_matches!(err, ClientError::Envelope(_));
        assert_matches!(decode::<i64>(200, b"not json"), Err(ClientError::Envelope(_)));
    }
}
