use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/solicitudes`. Fields are stored as given; the
/// database constraints are the only validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRequestPayload {
    pub nombre: String,
    pub apellidos: String,
    pub celular: String,
    pub correo: String,
    pub fecha_cita: NaiveDate,
    #[serde(with = "crate::utils::time::hhmm")]
    pub hora_cita: NaiveTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRequestResponse {
    pub message: String,
    pub id_solicitud: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmRequestPayload {
    pub fecha_cita: NaiveDate,
    #[serde(with = "crate::utils::time::hhmm")]
    pub hora_cita: NaiveTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
