use axum::{extract::State, response::IntoResponse, Json};
use tracing::error;

use crate::{error::Result, AppState};

#[utoipa::path(
    get,
    path = "/api/reclutadores",
    responses(
        (status = 200, description = "All recruiters", body = Json<Vec<Recruiter>>),
        (status = 500, description = "Database failure")
    )
)]
#[axum::debug_handler]
pub async fn list_recruiters(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let recruiters = state.recruiter_service.list().await.map_err(|e| {
        error!(error = ?e, "Failed to list recruiters");
        e.or_generic("Error al obtener los reclutadores")
    })?;
    Ok(Json(recruiters))
}
