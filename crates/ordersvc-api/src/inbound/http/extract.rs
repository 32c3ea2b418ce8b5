use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;

use crate::errors::AppError;
use ordersvc_types::domain::DataValidationError;

/// Strict JSON body extractor. The request must declare exactly
/// `application/json` (415 otherwise), and any decoding failure surfaces as
/// a 400 carrying the deserializer's message, instead of axum's default
/// 415/422 split.
pub struct StrictJson<T>(pub T);

impl<S, T> FromRequest<S> for StrictJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if content_type != "application/json" {
            return Err(AppError::UnsupportedMediaType(
                "Content-Type must be application/json".into(),
            ));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| DataValidationError(e.to_string()))?;
        let value = serde_json::from_slice(&bytes).map_err(DataValidationError::from)?;
        Ok(Self(value))
    }
}
