//! JSON body extractor that only decodes.
//!
//! Entity rules are enforced by the domain layer after decoding, so this
//! extractor never runs `validator` checks. Any decode failure (wrong content
//! type, syntax error, wrong field type) becomes a `JSON_EXTRACTION` 400.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;

pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(data))
    }
}
