use axum::{extract::State, Json};
use service_core::error::AppError;

use crate::{models::OrganizationalUnit, AppState};

/// Organizational units for the registration form, ordered by name.
pub async fn list_units(
    State(state): State<AppState>,
) -> Result<Json<Vec<OrganizationalUnit>>, AppError> {
    let units = state.auth.units().await.map_err(AppError::from)?;
    Ok(Json(units))
}
