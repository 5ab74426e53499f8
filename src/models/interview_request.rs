use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// Lifecycle state stored in `solicitudes.estado`.
///
/// `Cancelled` is accepted by the schema but no endpoint produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    #[serde(rename = "pendiente")]
    Pending,
    #[serde(rename = "confirmada")]
    Confirmed,
    #[serde(rename = "rechazada")]
    Rejected,
    #[serde(rename = "cancelada")]
    Cancelled,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pendiente",
            RequestStatus::Confirmed => "confirmada",
            RequestStatus::Rejected => "rechazada",
            RequestStatus::Cancelled => "cancelada",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown request status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for RequestStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pendiente" => Ok(RequestStatus::Pending),
            "confirmada" => Ok(RequestStatus::Confirmed),
            "rechazada" => Ok(RequestStatus::Rejected),
            "cancelada" => Ok(RequestStatus::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

impl TryFrom<String> for RequestStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewRequest {
    pub id_solicitud: i32,
    pub fecha_solicitud: DateTime<Utc>,
    #[sqlx(try_from = "String")]
    pub estado: RequestStatus,
    pub id_aspirante: i32,
}

/// One row of the request listing: the request, its aspirant and, when
/// present, its appointment.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RequestListItem {
    pub id_solicitud: i32,
    pub fecha_solicitud: DateTime<Utc>,
    #[sqlx(try_from = "String")]
    pub estado: RequestStatus,
    pub id_aspirante: i32,
    pub nombre: String,
    pub apellidos: String,
    pub celular: String,
    pub correo: String,
    pub id_cita: Option<i32>,
    pub fecha_cita: Option<NaiveDate>,
    #[serde(with = "crate::utils::time::option_hhmm", default)]
    pub hora_cita: Option<NaiveTime>,
}

/// Data read back inside the confirm transaction to address the email.
#[derive(Debug, Clone, FromRow)]
pub struct ConfirmationDetails {
    pub id_solicitud: i32,
    pub nombre: String,
    pub apellidos: String,
    pub correo: String,
    pub fecha_cita: NaiveDate,
    pub hora_cita: NaiveTime,
}
