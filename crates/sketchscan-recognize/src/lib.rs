//! Client for the remote handwriting-recognition service.
//!
//! The service accepts a single still-image snapshot of the canvas as a
//! base64 PNG data URI and answers with a list of recognized expressions,
//! each paired with its computed result. Only the first entry is surfaced.
//!
//! ## Protocol
//!
//! ```json
//! POST /calculate
//! { "image": "data:image/png;base64,..." }
//!
//! 200 OK
//! { "value": [ { "expr": "1+2", "result": "3" } ] }
//! ```

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the recognition round trip.
#[derive(Debug, Error)]
pub enum RecognizeError {
    /// Transport or decoding failure talking to the service.
    #[error("recognition request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with no recognition entries.
    #[error("recognition service returned no results")]
    EmptyResponse,
}

/// Request body for the recognition endpoint.
#[derive(Debug, Serialize)]
struct RecognizeRequest<'a> {
    image: &'a str,
}

/// One recognized expression with its computed result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recognition {
    pub expr: String,
    pub result: String,
}

/// Response body from the recognition endpoint.
#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    value: Vec<Recognition>,
}

/// Encode PNG bytes as a `data:image/png;base64,...` URI.
pub fn png_data_uri(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", BASE64.encode(png))
}

/// Blocking client for the recognition service.
#[derive(Debug, Clone)]
pub struct RecognizeClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl RecognizeClient {
    /// Create a client for the service rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Submit a PNG snapshot and return the first recognition.
    ///
    /// Callers run this off the UI thread; failures are plain error values
    /// and leave no state behind.
    pub fn recognize_png(&self, png: &[u8]) -> Result<Recognition, RecognizeError> {
        let image = png_data_uri(png);
        log::debug!(
            "posting {} byte snapshot to {}/calculate",
            png.len(),
            self.base_url
        );

        let response: RecognizeResponse = self
            .http
            .post(format!("{}/calculate", self.base_url))
            .json(&RecognizeRequest { image: &image })
            .send()?
            .error_for_status()?
            .json()?;

        response
            .value
            .into_iter()
            .next()
            .ok_or(RecognizeError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri_prefix() {
        let uri = png_data_uri(&[0x89, 0x50, 0x4e, 0x47]);
        assert!(uri.starts_with("data:image/png;base64,"));
        assert_eq!(uri, "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn test_request_serialization() {
        let body = serde_json::to_string(&RecognizeRequest {
            image: "data:image/png;base64,AAAA",
        })
        .unwrap();
        assert_eq!(body, r#"{"image":"data:image/png;base64,AAAA"}"#);
    }

    #[test]
    fn test_response_parsing_surfaces_first() {
        let json = r#"{ "value": [
            { "expr": "1+2", "result": "3" },
            { "expr": "2+2", "result": "4" }
        ] }"#;
        let response: RecognizeResponse = serde_json::from_str(json).unwrap();
        let first = response.value.into_iter().next().unwrap();
        assert_eq!(
            first,
            Recognition {
                expr: "1+2".to_string(),
                result: "3".to_string()
            }
        );
    }

    #[test]
    fn test_empty_response_is_error() {
        let response: RecognizeResponse = serde_json::from_str(r#"{ "value": [] }"#).unwrap();
        let result = response
            .value
            .into_iter()
            .next()
            .ok_or(RecognizeError::EmptyResponse);
        assert!(matches!(result, Err(RecognizeError::EmptyResponse)));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = RecognizeClient::new("https://example.test/");
        assert_eq!(client.base_url, "https://example.test");
    }
}
