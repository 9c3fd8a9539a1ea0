use axum::body::Body;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::{
    async_trait,
    response::{IntoResponse, Response},
    Form, Json, RequestExt,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::middleware::error::ErrorResponseBody;

/// Body extractor accepting JSON or urlencoded forms, validated before the handler runs.
pub struct JsonOrFormValidated<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonOrFormValidated<T>
where
    S: Send + Sync,
    Json<T>: FromRequest<()>,
    Form<T>: FromRequest<()>,
    T: DeserializeOwned + Validate + Send + Sync + 'static,
{
    type Rejection = Response;

    async fn from_request(req: Request<Body>, _state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let payload: T = match content_type {
            Some(ct) if ct.starts_with("application/json") => {
                let Json(payload) = req.extract().await.map_err(IntoResponse::into_response)?;
                payload
            }
            Some(ct) if ct.starts_with("application/x-www-form-urlencoded") => {
                let Form(payload) = req.extract().await.map_err(IntoResponse::into_response)?;
                payload
            }
            _ => return Err(StatusCode::UNSUPPORTED_MEDIA_TYPE.into_response()),
        };

        payload.validate().map_err(|err| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponseBody::new(err.to_string(), None)),
            )
                .into_response()
        })?;

        Ok(Self(payload))
    }
}
