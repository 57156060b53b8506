//! HTTP surface for the prediction service.
//!
//! Routing is a pure function over (method, path, body) so the request
//! contract can be tested without opening a socket; the tiny_http loop only
//! shuttles bytes in and out. One request at a time, no shared mutable state.

use std::io::Read;
use std::sync::Arc;

use serde::Serialize;
use tiny_http::{Header, Response, Server};
use tracing::{debug, info, warn};

use crate::core::service::InferenceService;
use crate::core::validator;
use crate::utils::error::{Result, ServeError};

pub const WELCOME_MESSAGE: &str = "Welcome to the Churn Prediction API.";

/// Requests larger than this are rejected outright.
const MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiReply {
    pub status: u16,
    pub body: String,
}

impl ApiReply {
    fn json<T: Serialize>(status: u16, value: &T) -> Self {
        let body = serde_json::to_string(value)
            .unwrap_or_else(|_| r#"{"error":"response serialization failed"}"#.to_string());
        Self { status, body }
    }

    fn error(status: u16, description: impl Into<String>) -> Self {
        Self::json(status, &ErrorBody {
            error: description.into(),
        })
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Serialize)]
struct WelcomeBody {
    message: &'static str,
}

/// Map one request onto the service. Never panics; every failure mode comes
/// back as a structured `{"error": ...}` body.
pub fn dispatch(method: &str, path: &str, body: &str, service: &InferenceService) -> ApiReply {
    match (method, path) {
        ("GET", "/") => ApiReply::json(200, &WelcomeBody {
            message: WELCOME_MESSAGE,
        }),
        ("POST", "/predict") => predict(body, service),
        (_, "/") | (_, "/predict") => ApiReply::error(405, "method not allowed"),
        _ => ApiReply::error(404, "not found"),
    }
}

fn predict(body: &str, service: &InferenceService) -> ApiReply {
    let payload: serde_json::Value = match serde_json::from_str(body) {
        Ok(payload) => payload,
        Err(e) => {
            debug!(error = %e, "Rejected unparseable request body");
            return ApiReply::error(400, format!("invalid JSON body: {e}"));
        }
    };

    let record = match validator::validate_payload(&payload) {
        Ok(record) => record,
        Err(e) => {
            debug!(error = %e, "Rejected invalid payload");
            return ApiReply::error(422, e.to_string());
        }
    };

    match service.predict(&record) {
        Ok(prediction) => ApiReply::json(200, &prediction),
        Err(e) => {
            warn!(error = %e, "Prediction request failed");
            ApiReply::error(error_status(&e), e.to_string())
        }
    }
}

fn error_status(error: &ServeError) -> u16 {
    match error {
        ServeError::ValidationError { .. } => 422,
        ServeError::ModelUnavailable => 503,
        _ => 500,
    }
}

pub struct ApiServer {
    server: Server,
    service: Arc<InferenceService>,
}

impl ApiServer {
    pub fn bind(addr: &str, service: Arc<InferenceService>) -> Result<Self> {
        let server = Server::http(addr)
            .map_err(|e| ServeError::config(format!("failed to bind {addr}: {e}")))?;
        Ok(Self { server, service })
    }

    /// Serve requests until the process is terminated.
    pub fn run(&self) {
        for mut request in self.server.incoming_requests() {
            let method = request.method().to_string();
            let path = request.url().to_string();

            let reply = match read_body(&mut request) {
                Ok(body) => dispatch(&method, &path, &body, &self.service),
                Err(reply) => reply,
            };

            info!(%method, %path, status = reply.status, "Handled request");
            respond(request, reply);
        }
    }
}

fn read_body(request: &mut tiny_http::Request) -> std::result::Result<String, ApiReply> {
    if request
        .body_length()
        .is_some_and(|length| length > MAX_BODY_BYTES)
    {
        return Err(ApiReply::error(413, "request body too large"));
    }

    let mut body = String::new();
    request
        .as_reader()
        .take(MAX_BODY_BYTES as u64 + 1)
        .read_to_string(&mut body)
        .map_err(|e| ApiReply::error(400, format!("failed to read request body: {e}")))?;

    if body.len() > MAX_BODY_BYTES {
        return Err(ApiReply::error(413, "request body too large"));
    }

    Ok(body)
}

fn respond(request: tiny_http::Request, reply: ApiReply) {
    let header = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
        .unwrap_or_else(|_| unreachable!("static header is always valid"));
    let response = Response::from_string(reply.body)
        .with_status_code(reply.status)
        .with_header(header);

    if let Err(e) = request.respond(response) {
        warn!(error = %e, "Failed to write response");
    }
}
