//! Response envelope decoding.
//!
//! listmonk answers with one of three body shapes, fixed per endpoint:
//!
//! - [`Data<T>`] - the payload nested under a `data` key (most endpoints)
//! - [`Bare<T>`] - the payload itself, no wrapping
//! - [`Text`] - raw text (HTML previews), never parsed
//!
//! Any status other than 200 carries an [`ErrorEnvelope`] instead,
//! whatever the endpoint.

use std::marker::PhantomData;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ListmonkError, Result};

/// The only status listmonk uses for success.
pub const SUCCESS_STATUS: StatusCode = StatusCode::OK;

/// Body of every non-success response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub message: String,
}

/// `{ "data": T }` wrapper used by most endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// How a successful body is turned into a typed value.
pub trait ResponseShape {
    /// The payload handed back to the caller.
    type Output;

    /// Decode a success body.
    fn decode_success(body: &[u8]) -> Result<Self::Output>;
}

/// Payload wrapped in `{ "data": ... }`.
pub struct Data<T>(PhantomData<fn() -> T>);

/// Payload returned without any wrapping.
pub struct Bare<T>(PhantomData<fn() -> T>);

/// Raw text body.
pub struct Text;

impl<T: DeserializeOwned> ResponseShape for Data<T> {
    type Output = T;

    fn decode_success(body: &[u8]) -> Result<T> {
        serde_json::from_slice::<Envelope<T>>(body)
            .map(|envelope| envelope.data)
            .map_err(ListmonkError::Decode)
    }
}

impl<T: DeserializeOwned> ResponseShape for Bare<T> {
    type Output = T;

    fn decode_success(body: &[u8]) -> Result<T> {
        serde_json::from_slice(body).map_err(ListmonkError::Decode)
    }
}

impl ResponseShape for Text {
    type Output = String;

    fn decode_success(body: &[u8]) -> Result<String> {
        Ok(String::from_utf8_lossy(body).into_owned())
    }
}

/// Read the response body once and decode it as `S`.
pub async fn decode<S: ResponseShape>(response: Response) -> Result<S::Output> {
    let status = response.status();
    let body = response.bytes().await?;
    tracing::trace!(%status, bytes = body.len(), "decoding response body");
    decode_body::<S>(status, &body)
}

/// Decode an already-read body according to its status.
pub fn decode_body<S: ResponseShape>(status: StatusCode, body: &[u8]) -> Result<S::Output> {
    if status != SUCCESS_STATUS {
        return Err(error_from_body(status, body));
    }
    S::decode_success(body)
}

fn error_from_body(status: StatusCode, body: &[u8]) -> ListmonkError {
    match serde_json::from_slice::<ErrorEnvelope>(body) {
        Ok(envelope) => ListmonkError::Api {
            message: envelope.message,
            status_code: status.as_u16(),
        },
        Err(source) => ListmonkError::MalformedError {
            status_code: status.as_u16(),
            body: String::from_utf8_lossy(body).into_owned(),
            source,
        },
    }
}
