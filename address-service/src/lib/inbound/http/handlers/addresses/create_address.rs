use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::AddressData;
use crate::domain::address::models::CreateAddressCommand;
use crate::domain::address::ports::AddressServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// HTTP request body for creating an address (raw JSON).
///
/// Has no owner field: unknown keys such as `owner_id` are ignored and the
/// owner is always the authenticated caller.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAddressRequest {
    pub street: String,
    #[serde(default)]
    pub number: String,
    pub complement: Option<String>,
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zipcode: String,
    pub country: String,
}

impl From<CreateAddressRequest> for CreateAddressCommand {
    fn from(req: CreateAddressRequest) -> Self {
        Self {
            street: req.street,
            number: req.number,
            complement: req.complement,
            city: req.city,
            state: req.state,
            zipcode: req.zipcode,
            country: req.country,
        }
    }
}

pub async fn create_address(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Json(req): Json<CreateAddressRequest>,
) -> Result<ApiSuccess<AddressData>, ApiError> {
    state
        .address_service
        .create_address(auth_user.user_id, req.into())
        .await
        .map_err(ApiError::from)
        .map(|ref address| ApiSuccess::new(StatusCode::CREATED, address.into()))
}
