use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Appointment {
    pub id_cita: i32,
    pub fecha_cita: NaiveDate,
    #[serde(with = "crate::utils::time::hhmm")]
    pub hora_cita: NaiveTime,
    pub id_solicitud: i32,
    pub id_reclutador: Option<i32>,
}
