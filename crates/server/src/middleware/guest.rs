//! Guest key extractor for favorites routes.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;

use wine_cellar_core::{GUEST_KEY_HEADER, GuestKey};

/// Extractor for the `X-Guest-Key` header.
///
/// Rejects with `400 Bad Request` when the header is missing, empty or
/// not valid UTF-8. The key itself is opaque; any non-empty value is
/// accepted.
pub struct GuestKeyHeader(pub GuestKey);

/// Rejection returned when the guest key header is unusable.
pub struct GuestKeyRejection;

impl IntoResponse for GuestKeyRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "X-Guest-Key header is required" })),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for GuestKeyHeader
where
    S: Send + Sync,
{
    type Rejection = GuestKeyRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(GUEST_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(GuestKeyRejection)?;

        let key = GuestKey::parse(value).map_err(|_| GuestKeyRejection)?;
        Ok(Self(key))
    }
}
