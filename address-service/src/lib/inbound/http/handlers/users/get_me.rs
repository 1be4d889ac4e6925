use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::UserData;
use crate::domain::address::ports::AddressServicePort;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::addresses::AddressData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// The caller's profile together with the addresses they own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileData {
    #[serde(flatten)]
    pub user: UserData,
    pub addresses: Vec<AddressData>,
}

pub async fn get_me(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<ProfileData>, ApiError> {
    let user = state.user_service.get_user(&auth_user.user_id).await?;
    let addresses = state
        .address_service
        .list_addresses(auth_user.user_id)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ProfileData {
            user: (&user).into(),
            addresses: addresses.iter().map(AddressData::from).collect(),
        },
    ))
}
