use sqlx::PgPool;

use crate::error::Result;
use crate::models::recruiter::Recruiter;

#[derive(Clone)]
pub struct RecruiterService {
    pool: PgPool,
}

impl RecruiterService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Recruiter>> {
        let recruiters = sqlx::query_as::<_, Recruiter>(
            r#"
            SELECT id_reclutador, nombre, correo, fecha_registro
            FROM reclutadores
            ORDER BY id_reclutador ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(recruiters)
    }
}
