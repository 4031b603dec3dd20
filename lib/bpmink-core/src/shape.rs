//! Shape tokens and the envelope decoder.
//!
//! A [`Shape<T>`] is a zero-sized value naming the payload type a call
//! expects. It travels inside the [`ApiCall`](crate::ApiCall) and is what the
//! decoder uses to rebuild `T` from the `data` section.

use std::marker::PhantomData;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::{Error, ErrorInfo, Response, Result, RootResult, from_json, from_json_value};

/// Envelope key holding the payload.
pub const DATA_KEY: &str = "data";

/// Envelope keys that may hold the error section, in lookup order.
pub const ERROR_KEYS: [&str; 2] = ["Data", "error"];

/// Shape token for a payload of type `T`.
pub struct Shape<T>(PhantomData<fn() -> T>);

impl<T> Shape<T> {
    /// Create the token.
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }

    /// Name of the payload type, for diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

impl<T> Clone for Shape<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Shape<T> {}

impl<T> Default for Shape<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Shape<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Shape").field(&self.type_name()).finish()
    }
}

impl<T: DeserializeOwned> Shape<T> {
    /// Decode a raw response into a [`RootResult`].
    pub fn decode(&self, response: &Response<Bytes>) -> Result<RootResult<T>> {
        self.decode_parts(response.status(), response.body())
    }

    /// Decode a raw status code and body into a [`RootResult`].
    ///
    /// - an empty body is a successful "no content" result
    /// - the error section and the data section are read independently
    /// - a body that is not a JSON object fails with a decode error; on a
    ///   non-2xx status that error is [`Error::Http`] and keeps the body
    pub fn decode_parts(&self, http_status: u16, body: &[u8]) -> Result<RootResult<T>> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(RootResult::empty(http_status));
        }

        let mut container = match from_json::<Map<String, Value>>(body) {
            Ok(container) => container,
            Err(err) if is_2xx(http_status) => return Err(err),
            Err(_) => {
                let reason = http::StatusCode::from_u16(http_status)
                    .ok()
                    .and_then(|status| status.canonical_reason())
                    .unwrap_or("unexpected response");
                return Err(Error::http_with_body(
                    http_status,
                    reason,
                    Bytes::copy_from_slice(body),
                ));
            }
        };

        let status = container.remove("status").and_then(status_text);
        let error = take_error(&mut container);
        let data = match container.remove(DATA_KEY) {
            None | Some(Value::Null) => None,
            Some(value) => match from_json_value::<T>(DATA_KEY, value) {
                Ok(data) => Some(data),
                Err(err) if error.is_none() => return Err(err),
                Err(err) => {
                    tracing::debug!(
                        shape = self.type_name(),
                        error = %err,
                        "data section unreadable next to a server error, dropping it"
                    );
                    None
                }
            },
        };

        Ok(RootResult::new(http_status, status, data, error))
    }
}

const fn is_2xx(status: u16) -> bool {
    status >= 200 && status < 300
}

fn status_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn take_error(container: &mut Map<String, Value>) -> Option<ErrorInfo> {
    ERROR_KEYS
        .into_iter()
        .find_map(|key| container.remove(key).and_then(|section| error_info(key, section)))
}

/// Read one error section. Empty values mean "no error"; a section that does
/// not fit [`ErrorInfo`] is kept as a message so the failure is not lost.
fn error_info(key: &str, section: Value) -> Option<ErrorInfo> {
    match section {
        Value::Null | Value::Bool(false) => None,
        Value::Object(ref fields) if fields.is_empty() => None,
        Value::Array(ref items) if items.is_empty() => None,
        Value::String(message) if message.trim().is_empty() => None,
        Value::String(message) => Some(ErrorInfo::new(None, message)),
        Value::Object(_) => {
            let raw = section.to_string();
            match from_json_value(key, section) {
                Ok(info) => Some(info),
                Err(err) => {
                    tracing::debug!(error = %err, "error section has an unexpected shape");
                    Some(ErrorInfo::new(None, raw))
                }
            }
        }
        other => Some(ErrorInfo::new(None, other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert2::{check, let_assert};
    use serde::Deserialize;

    use super::*;
    use crate::ErrorCode;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Task {
        tkiid: String,
        #[serde(default)]
        name: Option<String>,
    }

    fn decode(status: u16, body: &str) -> Result<RootResult<Task>> {
        Shape::<Task>::new().decode_parts(status, body.as_bytes())
    }

    #[test]
    fn data_without_error() {
        let result = decode(200, r#"{"status":"200","data":{"tkiid":"1234","name":"Review"}}"#)
            .expect("decode");

        check!(result.is_success());
        check!(result.status() == Some("200"));
        check!(
            result.data()
                == Some(&Task {
                    tkiid: "1234".to_string(),
                    name: Some("Review".to_string())
                })
        );
    }

    #[test]
    fn error_section_regardless_of_status() {
        for status in [200, 400, 500] {
            let result = decode(
                status,
                r#"{"status":"error","Data":{"errorNumber":"CWTBG0019E","errorMessage":"closed"}}"#,
            )
            .expect("decode");

            let_assert!(Some(error) = result.error());
            check!(error.code() == Some(&ErrorCode::Text("CWTBG0019E".to_string())));
            check!(error.message() == Some("closed"));
            check!(result.data().is_none());
            check!(result.http_status() == status);
        }
    }

    #[test]
    fn lowercase_error_key() {
        let result = decode(409, r#"{"error":{"code":409,"message":"conflict"}}"#).expect("decode");
        let_assert!(Some(error) = result.error());
        check!(error.code() == Some(&ErrorCode::Number(409)));
    }

    #[test]
    fn string_error_section_becomes_message() {
        let result = decode(500, r#"{"error":"backend unavailable"}"#).expect("decode");
        let_assert!(Some(error) = result.error());
        check!(error.message() == Some("backend unavailable"));
        check!(error.code().is_none());
    }

    #[test]
    fn partial_result_keeps_both_sections() {
        let result = decode(
            200,
            r#"{"data":{"tkiid":"1"},"Data":{"errorNumber":"CWTBG0001E","errorMessage":"partial"}}"#,
        )
        .expect("decode");

        check!(result.is_partial());
        check!(result.data().map(|t| t.tkiid.as_str()) == Some("1"));
    }

    #[test]
    fn undecodable_data_next_to_error_is_dropped() {
        let result = decode(
            500,
            r#"{"data":{"unexpected":true},"Data":{"errorMessage":"boom"}}"#,
        )
        .expect("decode");

        check!(result.data().is_none());
        check!(result.error().and_then(ErrorInfo::message) == Some("boom"));
    }

    #[test]
    fn undecodable_data_alone_is_a_decode_error() {
        let_assert!(Err(err) = decode(200, r#"{"data":{"tkiid":1234}}"#));
        let_assert!(Error::JsonDeserialization { path, .. } = &err);
        check!(path == "data.tkiid");
    }

    #[test]
    fn empty_body_is_no_content() {
        for body in ["", "  \n"] {
            let result = decode(200, body).expect("decode");
            check!(result.is_success());
            check!(result.data().is_none());
            check!(result.error().is_none());
        }
    }

    #[test]
    fn empty_sections_are_absent() {
        let result = decode(200, r#"{"status":"200","data":null,"Data":{}}"#).expect("decode");
        check!(result.is_success());
        check!(result.data().is_none());
    }

    #[test]
    fn empty_array_and_false_error_sections_are_absent() {
        for body in [
            r#"{"data":{"tkiid":"1"},"error":[]}"#,
            r#"{"data":{"tkiid":"1"},"error":false}"#,
            r#"{"data":{"tkiid":"1"},"Data":"  ","error":null}"#,
        ] {
            let result = decode(200, body).expect("decode");
            check!(result.is_success());
            check!(result.data().map(|t| t.tkiid.as_str()) == Some("1"));
        }
    }

    #[test]
    fn odd_error_section_keeps_data() {
        let result = decode(500, r#"{"data":{"tkiid":"1"},"error":true}"#).expect("decode");
        check!(result.is_partial());
        check!(result.error().and_then(ErrorInfo::message) == Some("true"));

        let result = decode(
            500,
            r#"{"data":{"tkiid":"2"},"Data":{"errorNumber":[1,2]}}"#,
        )
        .expect("decode");
        check!(result.data().map(|t| t.tkiid.as_str()) == Some("2"));
        let_assert!(Some(error) = result.error());
        check!(error.code().is_none());
        check!(error.message() == Some(r#"{"errorNumber":[1,2]}"#));
    }

    #[test]
    fn malformed_body_on_success_status() {
        let_assert!(Err(err) = decode(200, "<html>oops</html>"));
        check!(err.is_decode());
        check!(err.status().is_none());

        let_assert!(Err(err) = decode(200, r#"["not","an","envelope"]"#));
        check!(err.is_decode());
    }

    #[test]
    fn malformed_body_on_error_status_keeps_body() {
        let_assert!(Err(err) = decode(502, "<html>Bad Gateway</html>"));
        check!(err.is_decode());
        check!(err.status() == Some(502));
        check!(err.body() == Some(&Bytes::from("<html>Bad Gateway</html>")));
        insta::assert_snapshot!(err, @"HTTP error 502: Bad Gateway");
    }

    #[test]
    fn data_on_error_status_without_error_section() {
        let result = decode(404, r#"{"data":{"tkiid":"9"}}"#).expect("decode");
        check!(result.is_success());
        check!(!result.is_http_success());
        check!(result.data().is_some());
    }

    #[test]
    fn numeric_envelope_status() {
        let result = decode(200, r#"{"status":200}"#).expect("decode");
        check!(result.status() == Some("200"));
    }

    #[test]
    fn decode_response() {
        let response = Response::new(
            200,
            HashMap::new(),
            Bytes::from(r#"{"data":{"tkiid":"77"}}"#),
        );
        let result = Shape::<Task>::new().decode(&response).expect("decode");
        check!(result.into_data().map(|t| t.tkiid) == Some("77".to_string()));
    }

    #[test]
    fn shape_debug_names_the_type() {
        let debug = format!("{:?}", Shape::<Task>::new());
        check!(debug.contains("Task"));
    }
}
