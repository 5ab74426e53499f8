use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Recruiter {
    pub id_reclutador: i32,
    pub nombre: String,
    pub correo: String,
    pub fecha_registro: DateTime<Utc>,
}
