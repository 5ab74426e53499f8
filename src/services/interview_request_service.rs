use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;

use crate::dto::interview_request_dto::CreateRequestPayload;
use crate::error::Result;
use crate::models::appointment::Appointment;
use crate::models::aspirant::Aspirant;
use crate::models::interview_request::{
    ConfirmationDetails, InterviewRequest, RequestListItem, RequestStatus,
};

/// Everything persisted by a successful create.
#[derive(Debug, Clone)]
pub struct CreatedRequest {
    pub request: InterviewRequest,
    pub aspirant: Aspirant,
    pub appointment: Appointment,
}

#[derive(Clone)]
pub struct InterviewRequestService {
    pool: PgPool,
}

impl InterviewRequestService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts the aspirant, a pending request and its unassigned
    /// appointment in one transaction. Any failure drops the transaction,
    /// which rolls every insert back.
    pub async fn create(&self, payload: CreateRequestPayload) -> Result<CreatedRequest> {
        let mut tx = self.pool.begin().await?;

        let aspirant = sqlx::query_as::<_, Aspirant>(
            r#"
            INSERT INTO aspirantes (nombre, apellidos, celular, correo)
            VALUES ($1, $2, $3, $4)
            RETURNING id_aspirante, nombre, apellidos, celular, correo, fecha_registro
            "#,
        )
        .bind(&payload.nombre)
        .bind(&payload.apellidos)
        .bind(&payload.celular)
        .bind(&payload.correo)
        .fetch_one(&mut *tx)
        .await?;

        let request = sqlx::query_as::<_, InterviewRequest>(
            r#"
            INSERT INTO solicitudes (id_aspirante, estado)
            VALUES ($1, $2)
            RETURNING id_solicitud, fecha_solicitud, estado, id_aspirante
            "#,
        )
        .bind(aspirant.id_aspirante)
        .bind(RequestStatus::Pending.as_str())
        .fetch_one(&mut *tx)
        .await?;

        let appointment = sqlx::query_as::<_, Appointment>(
            r#"
            INSERT INTO citas (fecha_cita, hora_cita, id_solicitud, id_reclutador)
            VALUES ($1, $2, $3, NULL)
            RETURNING id_cita, fecha_cita, hora_cita, id_solicitud, id_reclutador
            "#,
        )
        .bind(payload.fecha_cita)
        .bind(payload.hora_cita)
        .bind(request.id_solicitud)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(CreatedRequest {
            request,
            aspirant,
            appointment,
        })
    }

    pub async fn list(&self) -> Result<Vec<RequestListItem>> {
        let items = sqlx::query_as::<_, RequestListItem>(
            r#"
            SELECT
                id_solicitud, fecha_solicitud, estado,
                id_aspirante, nombre, apellidos, celular, correo,
                id_cita, fecha_cita, hora_cita
            FROM vista_solicitudes_completas
            ORDER BY fecha_solicitud DESC, id_solicitud DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Marks the request confirmed and moves its appointment to the given
    /// slot, whatever the current status. An unknown id updates nothing and
    /// yields `None`.
    pub async fn confirm(
        &self,
        id: i32,
        fecha_cita: NaiveDate,
        hora_cita: NaiveTime,
    ) -> Result<Option<ConfirmationDetails>> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE solicitudes SET estado = $1 WHERE id_solicitud = $2")
            .bind(RequestStatus::Confirmed.as_str())
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE citas SET fecha_cita = $1, hora_cita = $2 WHERE id_solicitud = $3")
            .bind(fecha_cita)
            .bind(hora_cita)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let details = sqlx::query_as::<_, ConfirmationDetails>(
            r#"
            SELECT s.id_solicitud, a.nombre, a.apellidos, a.correo, c.fecha_cita, c.hora_cita
            FROM solicitudes s
            INNER JOIN aspirantes a ON a.id_aspirante = s.id_aspirante
            INNER JOIN citas c ON c.id_solicitud = s.id_solicitud
            WHERE s.id_solicitud = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(details)
    }

    /// Sets the status to rejected. Returns the number of rows touched,
    /// which is zero for an unknown id.
    pub async fn reject(&self, id: i32) -> Result<u64> {
        let result = sqlx::query("UPDATE solicitudes SET estado = $1 WHERE id_solicitud = $2")
            .bind(RequestStatus::Rejected.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
