use auth::AuthRejection;
use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Identity of the caller, inserted into request extensions once the
/// credential header has been accepted.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that resolves the `Authorization` header into an
/// [`AuthenticatedUser`]. Rejected requests never reach the handler.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = match req.headers().get(http::header::AUTHORIZATION) {
        None => None,
        Some(value) => Some(
            value
                .to_str()
                .map_err(|_| ApiError::from(AuthRejection::MalformedCredential))?,
        ),
    };

    let identity = state.auth_gate.validate(header)?;

    let user_id = UserId::from_string(identity.subject()).map_err(|e| {
        tracing::warn!(error = %e, "Token subject is not a user id");
        ApiError::from(AuthRejection::InvalidCredential)
    })?;

    tracing::debug!(user_id = %user_id, "Request authenticated");

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}
