//! Request logging with error classification.
//!
//! One event is emitted per severity that occurred during the request
//! (error, then warn, then info), or a single info event when nothing went
//! wrong. The liveness route is never logged. When any error was recorded
//! the response body is replaced with the envelope of the last one.

use std::net::SocketAddr;
use std::time::Instant;

use axum::extract::{ConnectInfo, MatchedPath, Request};
use axum::http::StatusCode;
use axum::http::header::HOST;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{error, info, warn};

use strata_core::error::{AppError, LogLevel};

use crate::error::{ResponseError, error_envelope};
use crate::extractors::ErrorSink;

/// Route whose requests are not logged.
pub const PING_ROUTE: &str = "/api/ping";

struct RequestFields {
    host: String,
    route: String,
    protocol: String,
    uri: String,
    method: String,
    remote_addr: String,
    client_ip: String,
    query_string: String,
}

impl RequestFields {
    fn capture(request: &Request) -> Self {
        let headers = request.headers();
        let remote_addr = request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.to_string())
            .unwrap_or_default();
        let forwarded = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        let client_ip = forwarded.unwrap_or_else(|| {
            remote_addr
                .parse::<SocketAddr>()
                .map(|addr| addr.ip().to_string())
                .unwrap_or_default()
        });

        Self {
            host: headers
                .get(HOST)
                .and_then(|v| v.to_str().ok())
                .map(String::from)
                .or_else(|| request.uri().authority().map(|a| a.to_string()))
                .unwrap_or_default(),
            route: request
                .extensions()
                .get::<MatchedPath>()
                .map(|p| p.as_str().to_string())
                .unwrap_or_else(|| request.uri().path().to_string()),
            protocol: format!("{:?}", request.version()),
            uri: request.uri().to_string(),
            method: request.method().to_string(),
            remote_addr,
            client_ip,
            query_string: request.uri().query().unwrap_or_default().to_string(),
        }
    }
}

/// Logs every request and turns recorded errors into the error envelope.
pub async fn request_logging(mut request: Request, next: Next) -> Response {
    let start = Instant::now();
    let fields = RequestFields::capture(&request);
    let sink = ErrorSink::default();
    request.extensions_mut().insert(sink.clone());

    let response = next.run(request).await;

    let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    let status = response.status();

    let mut errors = sink.drain();
    if let Some(ResponseError(err)) = response.extensions().get::<ResponseError>() {
        errors.push(err.clone());
    }

    if fields.route != PING_ROUTE {
        emit(&fields, status, elapsed_ms, &errors);
    }

    match errors.last() {
        Some(last) => {
            let status = if status.is_client_error() || status.is_server_error() {
                status
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            error_envelope(status, &last.message)
        }
        None => response,
    }
}

fn emit(fields: &RequestFields, status: StatusCode, elapsed_ms: u64, errors: &[AppError]) {
    let message = format!(
        "{} {} {} responded {} in {} ms",
        fields.protocol,
        fields.method,
        fields.uri,
        status.as_u16(),
        elapsed_ms
    );

    macro_rules! log_event {
        ($level:ident, $errors:expr) => {
            $level!(
                host = %fields.host,
                route = %fields.route,
                protocol = %fields.protocol,
                uri = %fields.uri,
                method = %fields.method,
                remote_addr = %fields.remote_addr,
                client_ip = %fields.client_ip,
                query_string = %fields.query_string,
                status_code = status.as_u16(),
                elapsed_milliseconds = elapsed_ms,
                errors = ?$errors,
                "{}",
                message
            )
        };
    }

    if errors.is_empty() {
        let none: [&str; 0] = [];
        log_event!(info, none);
        return;
    }

    let bucket = |level: LogLevel| -> Vec<&str> {
        errors
            .iter()
            .filter(|e| e.log_level() == level)
            .map(|e| e.message.as_str())
            .collect()
    };

    let errored = bucket(LogLevel::Error);
    if !errored.is_empty() {
        log_event!(error, errored);
    }
    let warned = bucket(LogLevel::Warn);
    if !warned.is_empty() {
        log_event!(warn, warned);
    }
    let informed = bucket(LogLevel::Info);
    if !informed.is_empty() {
        log_event!(info, informed);
    }
}
