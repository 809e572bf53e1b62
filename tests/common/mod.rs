//! Common test utilities and helpers for integration tests
#![allow(dead_code)]

pub mod fakes;
pub mod test_data;

use lambda_http::http::Method;
use lambda_http::{Body, Request, Response};

/// Builds a POST request carrying a JSON action payload.
pub fn post_request(payload: &serde_json::Value) -> Request {
    Request::new(Body::Text(payload.to_string()))
}

/// Builds a CORS preflight request.
pub fn options_request() -> Request {
    let mut request = Request::new(Body::Empty);
    *request.method_mut() = Method::OPTIONS;
    request
}

/// Parses the JSON body of a handler response.
pub fn response_json(response: &Response<Body>) -> serde_json::Value {
    let bytes: &[u8] = match response.body() {
        Body::Empty => &[],
        Body::Text(text) => text.as_bytes(),
        Body::Binary(data) => data,
    };
    serde_json::from_slice(bytes).expect("response body is not valid JSON")
}
