use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::AddressData;
use crate::domain::address::ports::AddressServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_addresses(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<Vec<AddressData>>, ApiError> {
    state
        .address_service
        .list_addresses(auth_user.user_id)
        .await
        .map_err(ApiError::from)
        .map(|addresses| {
            ApiSuccess::new(
                StatusCode::OK,
                addresses.iter().map(AddressData::from).collect(),
            )
        })
}
