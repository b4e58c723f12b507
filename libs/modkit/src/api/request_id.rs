use axum::http::HeaderMap;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request id set by the request-id layer (or the client), if any.
pub fn request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(REQUEST_ID_HEADER)
        .or_else(|| headers.get("x-trace-id"))
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_request_id_prefers_request_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(request_id(&headers), None);

        headers.insert("x-trace-id", HeaderValue::from_static("t-1"));
        assert_eq!(request_id(&headers).as_deref(), Some("t-1"));

        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("r-1"));
        assert_eq!(request_id(&headers).as_deref(), Some("r-1"));
    }
}
