//! Shared test helpers for the API integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use tracing::subscriber::DefaultGuard;
use tracing::span::{Attributes, Id};
use tracing::{Event, Level, Span, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;

use strata_api::{AppState, build_app};
use strata_auth::{JwtDecoder, JwtEncoder, PasswordHasher};
use strata_cache::CacheManager;
use strata_cache::memory::MemoryCacheProvider;
use strata_core::config::auth::AuthConfig;
use strata_core::config::cache::MemoryCacheConfig;
use strata_core::error::AppError;
use strata_core::result::AppResult;
use strata_database::repositories::{AuthStore, HealthProbe, SampleStore};
use strata_entity::message::SampleMessage;
use strata_entity::sample::SampleRecord;
use strata_entity::user::{NewRefreshToken, User};
use strata_messaging::SamplePublisher;
use strata_proxy::{
    SampleProxy, SampleProxyRequest, SampleProxyResponse, SampleXmlProxy, SampleXmlRequest,
    SampleXmlResponse,
};
use strata_service::{AuthService, HealthService, SampleService};

pub const PASSWORD: &str = "password123";

pub fn auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "integration-secret".into(),
        issuer: "Strata".into(),
        access_token_ttl_minutes: 30,
        refresh_token_ttl_days: 30,
    }
}

// ── Fakes ────────────────────────────────────────────────────

#[derive(Default)]
pub struct FakeAuthStore {
    pub users: Mutex<Vec<(User, String)>>,
    pub tokens: Mutex<Vec<NewRefreshToken>>,
}

#[async_trait]
impl AuthStore for FakeAuthStore {
    async fn find_by_credentials(
        &self,
        username: &str,
        password_hash: &str,
    ) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|(u, hash)| u.username == username && hash == password_hash)
            .map(|(u, _)| u.clone()))
    }

    async fn find_by_refresh_token(&self, refresh_token: &str) -> AppResult<Option<User>> {
        let owner = self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.refresh_token == refresh_token)
            .map(|t| t.user_id);
        Ok(owner.and_then(|id| {
            self.users
                .lock()
                .unwrap()
                .iter()
                .find(|(u, _)| u.id == id)
                .map(|(u, _)| u.clone())
        }))
    }

    async fn add_refresh_token(&self, token: &NewRefreshToken) -> AppResult<()> {
        self.tokens.lock().unwrap().push(token.clone());
        Ok(())
    }
}

pub struct FakeSampleStore;

#[async_trait]
impl SampleStore for FakeSampleStore {
    async fn get_sample(&self) -> AppResult<SampleRecord> {
        Ok(SampleRecord {
            id: 1,
            sample_name: "sample name here!!".into(),
        })
    }
}

pub struct FakeDatabase {
    pub healthy: AtomicBool,
}

#[async_trait]
impl HealthProbe for FakeDatabase {
    async fn ping(&self) -> AppResult<()> {
        if self.healthy.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AppError::database("connection refused"))
        }
    }
}

pub struct FakeProxy;

#[async_trait]
impl SampleProxy for FakeProxy {
    async fn get_sample(&self, request: &SampleProxyRequest) -> AppResult<SampleProxyResponse> {
        Ok(SampleProxyResponse {
            id: request.id,
            sample_name: format!("{}<", request.sample_name),
        })
    }
}

pub struct FakeXmlProxy;

#[async_trait]
impl SampleXmlProxy for FakeXmlProxy {
    async fn post_sample_xml(&self, request: &SampleXmlRequest) -> AppResult<SampleXmlResponse> {
        Ok(SampleXmlResponse {
            is_success: true,
            message: format!("{} accepted", request.sample_name),
        })
    }
}

#[derive(Default)]
pub struct FakePublisher {
    pub calls: AtomicUsize,
    pub failing: AtomicBool,
}

#[async_trait]
impl SamplePublisher for FakePublisher {
    async fn publish(
        &self,
        _message: &SampleMessage,
        _attribute_overrides: &HashMap<String, String>,
    ) -> AppResult<String> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::external_service("publish rejected"));
        }
        Ok(format!("message-{n}"))
    }
}

// ── Test application ─────────────────────────────────────────

/// Response captured from the router
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Router wired to in-memory fakes
pub struct TestApp {
    pub router: Router,
    pub auth_store: Arc<FakeAuthStore>,
    pub publisher: Arc<FakePublisher>,
    pub database: Arc<FakeDatabase>,
    pub encoder: JwtEncoder,
}

impl TestApp {
    pub fn new() -> Self {
        let config = auth_config();
        let auth_store = Arc::new(FakeAuthStore::default());
        let publisher = Arc::new(FakePublisher::default());
        let database = Arc::new(FakeDatabase {
            healthy: AtomicBool::new(true),
        });
        let cache = CacheManager::from_provider(Arc::new(MemoryCacheProvider::new(
            &MemoryCacheConfig { max_capacity: 100 },
        )));

        let auth_service = AuthService::new(
            auth_store.clone(),
            Arc::new(JwtEncoder::new(&config)),
            Arc::new(PasswordHasher::new()),
        );
        let sample_service = SampleService::new(
            Arc::new(FakeProxy),
            Arc::new(FakeXmlProxy),
            Arc::new(FakeSampleStore),
            publisher.clone(),
            cache.clone(),
        );
        let health_service = HealthService::new(Arc::new(cache), database.clone());

        let state = AppState {
            jwt_decoder: Arc::new(JwtDecoder::new(&config)),
            auth_service: Arc::new(auth_service),
            sample_service: Arc::new(sample_service),
            health_service: Arc::new(health_service),
        };

        Self {
            router: build_app(state),
            auth_store,
            publisher,
            database,
            encoder: JwtEncoder::new(&config),
        }
    }

    /// Builds the app while `span` is current, the way the server binary
    /// builds it inside its process-wide span.
    pub fn within(span: &Span) -> Self {
        span.in_scope(Self::new)
    }

    pub fn add_user(&self, id: i64, username: &str, is_active: bool, is_programmatic: bool) {
        let user = User {
            id,
            username: username.into(),
            email: Some(format!("{username}@example.com")),
            is_active,
            is_programmatic,
        };
        let hash = PasswordHasher::new().hash_password(PASSWORD);
        self.auth_store.users.lock().unwrap().push((user, hash));
    }

    pub fn token_for(&self, id: i64, username: &str) -> String {
        self.encoder
            .encode_access_token(id, username, &format!("{username}@example.com"))
            .unwrap()
    }

    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        auth_header: Option<&str>,
    ) -> TestResponse {
        send(self.router.clone(), method, path, body, auth_header).await
    }
}

pub async fn send(
    router: Router,
    method: &str,
    path: &str,
    body: Option<Value>,
    auth_header: Option<&str>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(value) = auth_header {
        builder = builder.header("authorization", value);
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    TestResponse {
        status,
        headers,
        body,
    }
}

// ── Log capture ──────────────────────────────────────────────

/// One event emitted by the request logging middleware
#[derive(Debug, Clone)]
pub struct LoggedEvent {
    pub level: Level,
    pub message: String,
    pub fields: HashMap<String, String>,
    /// Enclosing span names, innermost first.
    pub spans: Vec<String>,
    /// Fields of every enclosing span.
    pub span_fields: HashMap<String, String>,
}

/// Fields recorded when a span was created.
struct SpanFields(HashMap<String, String>);

#[derive(Clone, Default)]
pub struct LogCapture {
    events: Arc<Mutex<Vec<LoggedEvent>>>,
}

impl LogCapture {
    /// Installs the capture as the default subscriber for this thread.
    pub fn install() -> (Self, DefaultGuard) {
        let capture = Self::default();
        let subscriber = tracing_subscriber::registry().with(capture.clone());
        let guard = tracing::subscriber::set_default(subscriber);
        (capture, guard)
    }

    /// Events from the request logging middleware only.
    pub fn request_events(&self) -> Vec<LoggedEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl<S> Layer<S> for LogCapture
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        attrs.record(&mut visitor);
        if let Some(span) = ctx.span(id) {
            span.extensions_mut().insert(SpanFields(visitor.fields));
        }
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata
            .target()
            .starts_with("strata_api::middleware::logging")
        {
            return;
        }

        let mut spans = Vec::new();
        let mut span_fields = HashMap::new();
        if let Some(scope) = ctx.event_scope(event) {
            for span in scope {
                spans.push(span.name().to_string());
                if let Some(SpanFields(fields)) = span.extensions().get::<SpanFields>() {
                    for (name, value) in fields {
                        span_fields
                            .entry(name.clone())
                            .or_insert_with(|| value.clone());
                    }
                }
            }
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        self.events.lock().unwrap().push(LoggedEvent {
            level: *metadata.level(),
            message: visitor.message,
            fields: visitor.fields,
            spans,
            span_fields,
        });
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: HashMap<String, String>,
}

impl tracing::field::Visit for FieldVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.record_debug(field, &format_args!("{value}"));
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields
                .insert(field.name().to_string(), format!("{value:?}"));
        }
    }
}
