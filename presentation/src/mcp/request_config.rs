//! Per-request configuration carried in the `?config=` query parameter.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE, URL_SAFE_NO_PAD};
use gdrive_application::Credentials;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RequestConfigError {
    #[error("config is not valid base64")]
    Encoding,
    #[error("config is not a valid JSON object: {0}")]
    Json(String),
}

/// Credential keys accepted in the decoded JSON object
#[derive(Debug, Default, Deserialize)]
struct RequestConfig {
    #[serde(default, rename = "CLIENT_ID", alias = "clientId", alias = "client_id")]
    client_id: Option<String>,
    #[serde(
        default,
        rename = "CLIENT_SECRET",
        alias = "clientSecret",
        alias = "client_secret"
    )]
    client_secret: Option<String>,
    #[serde(
        default,
        rename = "REFRESH_TOKEN",
        alias = "refreshToken",
        alias = "refresh_token"
    )]
    refresh_token: Option<String>,
}

/// Decode a base64 JSON object into credential overrides.
///
/// Standard and URL-safe alphabets are accepted. A `+` turned into a space
/// by form decoding of the query string is restored first.
pub fn decode_credentials(encoded: &str) -> Result<Credentials, RequestConfigError> {
    let encoded = encoded.trim().replace(' ', "+");
    let bytes = STANDARD
        .decode(&encoded)
        .or_else(|_| URL_SAFE.decode(&encoded))
        .or_else(|_| URL_SAFE_NO_PAD.decode(&encoded))
        .map_err(|_| RequestConfigError::Encoding)?;

    let config: RequestConfig =
        serde_json::from_slice(&bytes).map_err(|e| RequestConfigError::Json(e.to_string()))?;

    Ok(Credentials {
        client_id: config.client_id,
        client_secret: config.client_secret,
        refresh_token: config.refresh_token,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(json: &str) -> String {
        STANDARD.encode(json)
    }

    #[test]
    fn test_upper_case_keys() {
        let creds = decode_credentials(&encode(
            r#"{"CLIENT_ID":"id","CLIENT_SECRET":"secret","REFRESH_TOKEN":"1//tok"}"#,
        ))
        .unwrap();
        assert_eq!(creds, Credentials::new("id", "secret", "1//tok"));
    }

    #[test]
    fn test_camel_and_snake_keys() {
        let creds =
            decode_credentials(&encode(r#"{"refreshToken":"a","client_secret":"b"}"#)).unwrap();
        assert_eq!(creds.refresh_token.as_deref(), Some("a"));
        assert_eq!(creds.client_secret.as_deref(), Some("b"));
        assert_eq!(creds.client_id, None);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let creds = decode_credentials(&encode(r#"{"PORT":9000}"#)).unwrap();
        assert!(creds.is_empty());
    }

    #[test]
    fn test_url_safe_without_padding() {
        let encoded = URL_SAFE_NO_PAD.encode(r#"{"REFRESH_TOKEN":">>?"}"#);
        assert!(encoded.contains('_'));
        let creds = decode_credentials(&encoded).unwrap();
        assert_eq!(creds.refresh_token.as_deref(), Some(">>?"));
    }

    #[test]
    fn test_space_restored_to_plus() {
        let encoded = encode(r#"{"CLIENT_ID":">>>"}"#);
        assert!(encoded.contains('+'));
        let creds = decode_credentials(&encoded.replace('+', " ")).unwrap();
        assert_eq!(creds.client_id.as_deref(), Some(">>>"));
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(
            decode_credentials("%%%"),
            Err(RequestConfigError::Encoding)
        );
        assert!(matches!(
            decode_credentials(&encode("[1, 2]")),
            Err(RequestConfigError::Json(_))
        ));
        assert!(matches!(
            decode_credentials(&encode("not json")),
            Err(RequestConfigError::Json(_))
        ));
    }
}
