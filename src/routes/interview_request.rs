use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use tracing::{error, info, warn};

use crate::{
    dto::interview_request_dto::{
        ConfirmRequestPayload, CreateRequestPayload, CreateRequestResponse, MessageResponse,
    },
    error::Result,
    services::templates,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/solicitudes",
    request_body = CreateRequestPayload,
    responses(
        (status = 201, description = "Request, aspirant and appointment created", body = Json<CreateRequestResponse>),
        (status = 409, description = "Aspirant email already registered"),
        (status = 500, description = "Creation failed and was rolled back")
    )
)]
#[axum::debug_handler]
pub async fn create_request(
    State(state): State<AppState>,
    Json(payload): Json<CreateRequestPayload>,
) -> Result<impl IntoResponse> {
    let created = state
        .interview_request_service
        .create(payload)
        .await
        .map_err(|e| {
            error!(error = ?e, "Failed to create interview request");
            e.or_generic("Error al crear la solicitud")
        })?;

    info!(
        id_solicitud = created.request.id_solicitud,
        id_aspirante = created.aspirant.id_aspirante,
        "Interview request created"
    );

    let response = CreateRequestResponse {
        message: "Solicitud creada exitosamente".to_string(),
        id_solicitud: created.request.id_solicitud,
    };

    let notification = templates::request_received(&created.aspirant, &created.appointment);

    Ok((StatusCode::CREATED, Extension(notification), Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/solicitudes",
    responses(
        (status = 200, description = "Every request with its aspirant and appointment, newest first", body = Json<Vec<RequestListItem>>),
        (status = 500, description = "Database failure")
    )
)]
#[axum::debug_handler]
pub async fn list_requests(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let items = state.interview_request_service.list().await.map_err(|e| {
        error!(error = ?e, "Failed to list interview requests");
        e.or_generic("Error al obtener las solicitudes")
    })?;
    Ok(Json(items))
}

#[utoipa::path(
    put,
    path = "/api/solicitudes/{id}/confirmar",
    params(
        ("id" = i32, Path, description = "Request ID")
    ),
    request_body = ConfirmRequestPayload,
    responses(
        (status = 200, description = "Request confirmed, appointment rescheduled", body = Json<MessageResponse>),
        (status = 500, description = "Confirmation failed and was rolled back")
    )
)]
#[axum::debug_handler]
pub async fn confirm_request(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ConfirmRequestPayload>,
) -> Result<impl IntoResponse> {
    let details = state
        .interview_request_service
        .confirm(id, payload.fecha_cita, payload.hora_cita)
        .await
        .map_err(|e| {
            error!(error = ?e, id_solicitud = id, "Failed to confirm interview request");
            e.or_generic("Error al confirmar la solicitud")
        })?;

    let notification = match details {
        Some(details) => {
            info!(id_solicitud = id, "Interview request confirmed");
            Some(Extension(templates::request_confirmed(&details)))
        }
        None => {
            warn!(
                id_solicitud = id,
                "Confirmed an unknown request, no email queued"
            );
            None
        }
    };

    Ok((
        notification,
        Json(MessageResponse::new("Solicitud confirmada exitosamente")),
    ))
}

#[utoipa::path(
    put,
    path = "/api/solicitudes/{id}/rechazar",
    params(
        ("id" = i32, Path, description = "Request ID")
    ),
    responses(
        (status = 200, description = "Request rejected", body = Json<MessageResponse>),
        (status = 500, description = "Database failure")
    )
)]
#[axum::debug_handler]
pub async fn reject_request(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    let affected = state
        .interview_request_service
        .reject(id)
        .await
        .map_err(|e| {
            error!(error = ?e, id_solicitud = id, "Failed to reject interview request");
            e.or_generic("Error al rechazar la solicitud")
        })?;

    if affected == 0 {
        warn!(id_solicitud = id, "Rejected an unknown request");
    } else {
        info!(id_solicitud = id, "Interview request rejected");
    }

    Ok(Json(MessageResponse::new("Solicitud rechazada exitosamente")))
}
