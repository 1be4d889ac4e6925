use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::AddressData;
use crate::domain::address::errors::AddressError;
use crate::domain::address::models::AddressId;
use crate::domain::address::models::UpdateAddressCommand;
use crate::domain::address::ports::AddressServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// HTTP request body for a partial address update (raw JSON)
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAddressRequest {
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
    pub country: Option<String>,
}

impl From<UpdateAddressRequest> for UpdateAddressCommand {
    fn from(req: UpdateAddressRequest) -> Self {
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

pub async fn update_address(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(address_id): Path<String>,
    Json(req): Json<UpdateAddressRequest>,
) -> Result<ApiSuccess<AddressData>, ApiError> {
    let address_id = AddressId::from_string(&address_id).map_err(AddressError::from)?;

    state
        .address_service
        .update_address(auth_user.user_id, address_id, req.into())
        .await
        .map_err(ApiError::from)
        .map(|ref address| ApiSuccess::new(StatusCode::OK, address.into()))
}
