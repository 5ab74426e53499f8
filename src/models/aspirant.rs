use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Aspirant {
    pub id_aspirante: i32,
    pub nombre: String,
    pub apellidos: String,
    pub celular: String,
    pub correo: String,
    pub fecha_registro: DateTime<Utc>,
}

impl Aspirant {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.nombre, self.apellidos)
    }
}
