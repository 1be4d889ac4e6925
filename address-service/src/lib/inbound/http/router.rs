use std::sync::Arc;
use std::time::Duration;

use auth::AuthGate;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::addresses::create_address::create_address;
use super::handlers::addresses::delete_address::delete_address;
use super::handlers::addresses::get_address::get_address;
use super::handlers::addresses::list_addresses::list_addresses;
use super::handlers::addresses::update_address::update_address;
use super::handlers::users::delete_me::delete_me;
use super::handlers::users::get_me::get_me;
use super::handlers::users::login::login;
use super::handlers::users::register_user::register_user;
use super::handlers::users::update_me::update_me;
use super::middleware::authenticate as auth_middleware;
use crate::domain::address::ports::AddressServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub address_service: Arc<dyn AddressServicePort>,
    pub auth_gate: Arc<AuthGate>,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    address_service: Arc<dyn AddressServicePort>,
    auth_gate: Arc<AuthGate>,
) -> Router {
    let state = AppState {
        user_service,
        address_service,
        auth_gate,
    };

    let public_routes = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/users", post(register_user));

    let protected_routes = Router::new()
        .route("/api/users/me", get(get_me).patch(update_me).delete(delete_me))
        .route("/api/addresses", post(create_address).get(list_addresses))
        .route(
            "/api/addresses/:address_id",
            get(get_address)
                .patch(update_address)
                .delete(delete_address),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers are left out of the span: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
