use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use hospital_api::ApiError;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Propagates `x-request-id` from the request, or generates a UUID v4, and
/// echoes it on the response. The value is also stored in request extensions
/// so the trace span can record it.
pub async fn request_id(mut req: Request<Body>, next: Next) -> Response {
    let header_name = HeaderName::from_static(REQUEST_ID_HEADER);

    let req_id_value = match req.headers().get(&header_name) {
        Some(v) => v.clone(),
        None => generate_request_id(),
    };

    req.extensions_mut().insert(req_id_value.clone());

    let mut res = next.run(req).await;
    res.headers_mut().insert(header_name, req_id_value);
    res
}

fn generate_request_id() -> HeaderValue {
    // A hyphenated UUID is always a valid header value.
    HeaderValue::from_str(&Uuid::new_v4().to_string())
        .unwrap_or_else(|_| HeaderValue::from_static("unknown"))
}

/// Rewrites framework-generated 405, 408 and 413 responses into the
/// structured `{kind, message}` error body. JSON responses pass through.
pub async fn structured_errors(res: Response) -> Response {
    let is_json = res
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    if is_json {
        return res;
    }

    let err = match res.status() {
        StatusCode::METHOD_NOT_ALLOWED => ApiError::method_not_allowed("Method not allowed"),
        StatusCode::REQUEST_TIMEOUT => ApiError::timeout("Request timed out"),
        StatusCode::PAYLOAD_TOO_LARGE => {
            ApiError::payload_too_large("Request body exceeds the configured limit")
        }
        _ => return res,
    };

    let mut structured = err.into_response();
    if let Some(allow) = res.headers().get(header::ALLOW) {
        structured.headers_mut().insert(header::ALLOW, allow.clone());
    }
    structured
}
