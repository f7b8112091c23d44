//! Router assembly and cross-cutting layers.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | /tasks | [`list_tasks`] |
//! | POST | /tasks | [`create_task`] |
//! | PUT | /tasks/{id} | [`update_task`] |
//! | DELETE | /tasks/{id} | [`delete_task`] |
//! | GET | /health | [`health_check`] |

use super::handlers::{create_task, delete_task, health_check, list_tasks, update_task};
use crate::{
    config::AllowedOrigin,
    task::{ports::TaskRepository, services::TaskService},
};
use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method},
    routing::{get, put},
};
use mockable::Clock;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

/// Baseline security headers added to every response that lacks them.
pub const SECURITY_HEADERS: [(&str, &str); 12] = [
    (
        "content-security-policy",
        "default-src 'self';base-uri 'self';font-src 'self' https: data:;\
         form-action 'self';frame-ancestors 'self';img-src 'self' data:;\
         object-src 'none';script-src 'self';script-src-attr 'none';\
         style-src 'self' https: 'unsafe-inline';upgrade-insecure-requests",
    ),
    ("cross-origin-opener-policy", "same-origin"),
    ("cross-origin-resource-policy", "same-origin"),
    ("origin-agent-cluster", "?1"),
    ("referrer-policy", "no-referrer"),
    (
        "strict-transport-security",
        "max-age=31536000; includeSubDomains",
    ),
    ("x-content-type-options", "nosniff"),
    ("x-dns-prefetch-control", "off"),
    ("x-download-options", "noopen"),
    ("x-frame-options", "SAMEORIGIN"),
    ("x-permitted-cross-domain-policies", "none"),
    ("x-xss-protection", "0"),
];

/// Builds the REST router around `service`.
///
/// Layers, outermost first: request tracing, CORS for `origin`, security
/// headers.
pub fn create_router<R, C>(service: TaskService<R, C>, origin: &AllowedOrigin) -> Router
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let routes = Router::new()
        .route("/tasks", get(list_tasks::<R, C>).post(create_task::<R, C>))
        .route(
            "/tasks/{id}",
            put(update_task::<R, C>).delete(delete_task::<R, C>),
        )
        .route("/health", get(health_check))
        .with_state(service);

    with_security_headers(routes)
        .layer(cors_layer(origin))
        .layer(TraceLayer::new_for_http())
}

fn with_security_headers(router: Router) -> Router {
    SECURITY_HEADERS
        .iter()
        .fold(router, |layered, &(name, value)| {
            layered.layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            ))
        })
}

fn cors_layer(origin: &AllowedOrigin) -> CorsLayer {
    let allow_origin = match origin {
        AllowedOrigin::Any => AllowOrigin::any(),
        AllowedOrigin::Exact(exact) => match HeaderValue::from_str(exact) {
            Ok(value) => AllowOrigin::exact(value),
            Err(err) => {
                tracing::warn!(origin = %exact, error = %err, "ignoring invalid CORS origin");
                AllowOrigin::list(Vec::<HeaderValue>::new())
            }
        },
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(Any)
}
