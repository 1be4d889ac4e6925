use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::address::errors::AddressError;
use crate::domain::address::models::AddressId;
use crate::domain::address::ports::AddressServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::MessageData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn delete_address(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(address_id): Path<String>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let address_id = AddressId::from_string(&address_id).map_err(AddressError::from)?;

    state
        .address_service
        .delete_address(auth_user.user_id, address_id)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                MessageData::new("Address deleted successfully"),
            )
        })
}
