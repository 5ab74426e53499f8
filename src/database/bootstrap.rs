//! One-shot schema setup run before the server starts accepting traffic.
//!
//! The routine looks for the `aspirantes` table and, when it is missing,
//! applies the full schema: tables, indexes, the joined read view, the slot
//! availability function and a seed recruiter. Every DDL statement is safe to
//! re-run; only the existence check decides whether they run at all.

use chrono::{NaiveDate, NaiveTime};
use sqlx::{postgres::PgPoolOptions, Executor, PgConnection, PgPool};
use tracing::info;

use crate::error::Result;

pub const SEED_RECRUITER_NAME: &str = "Reclutador General";
pub const SEED_RECRUITER_EMAIL: &str = "reclutador@empresa.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    AlreadyPresent,
    Created,
}

const SCHEMA_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS aspirantes (
        id_aspirante SERIAL PRIMARY KEY,
        nombre VARCHAR(100) NOT NULL,
        apellidos VARCHAR(150) NOT NULL,
        celular VARCHAR(20) NOT NULL,
        correo VARCHAR(150) NOT NULL UNIQUE,
        fecha_registro TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS reclutadores (
        id_reclutador SERIAL PRIMARY KEY,
        nombre VARCHAR(150) NOT NULL,
        correo VARCHAR(150) NOT NULL UNIQUE,
        fecha_registro TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS solicitudes (
        id_solicitud SERIAL PRIMARY KEY,
        fecha_solicitud TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        estado VARCHAR(20) NOT NULL DEFAULT 'pendiente'
            CHECK (estado IN ('pendiente', 'confirmada', 'rechazada', 'cancelada')),
        id_aspirante INTEGER NOT NULL
            REFERENCES aspirantes (id_aspirante) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS citas (
        id_cita SERIAL PRIMARY KEY,
        fecha_cita DATE NOT NULL,
        hora_cita TIME NOT NULL,
        id_solicitud INTEGER NOT NULL UNIQUE
            REFERENCES solicitudes (id_solicitud) ON DELETE CASCADE,
        id_reclutador INTEGER
            REFERENCES reclutadores (id_reclutador) ON DELETE SET NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_solicitudes_estado ON solicitudes (estado)",
    "CREATE INDEX IF NOT EXISTS idx_solicitudes_aspirante ON solicitudes (id_aspirante)",
    "CREATE INDEX IF NOT EXISTS idx_citas_fecha ON citas (fecha_cita)",
    "CREATE INDEX IF NOT EXISTS idx_aspirantes_correo ON aspirantes (correo)",
    r#"
    CREATE OR REPLACE VIEW vista_solicitudes_completas AS
    SELECT
        s.id_solicitud,
        s.fecha_solicitud,
        s.estado,
        a.id_aspirante,
        a.nombre,
        a.apellidos,
        a.celular,
        a.correo,
        c.id_cita,
        c.fecha_cita,
        c.hora_cita,
        r.id_reclutador,
        r.nombre AS nombre_reclutador,
        r.correo AS correo_reclutador
    FROM solicitudes s
    INNER JOIN aspirantes a ON a.id_aspirante = s.id_aspirante
    LEFT JOIN citas c ON c.id_solicitud = s.id_solicitud
    LEFT JOIN reclutadores r ON r.id_reclutador = c.id_reclutador
    "#,
    r#"
    CREATE OR REPLACE FUNCTION verificar_disponibilidad(p_fecha DATE, p_hora TIME)
    RETURNS BOOLEAN AS $$
        SELECT NOT EXISTS (
            SELECT 1
            FROM citas c
            INNER JOIN solicitudes s ON s.id_solicitud = c.id_solicitud
            WHERE c.fecha_cita = p_fecha
              AND c.hora_cita = p_hora
              AND s.estado = 'confirmada'
        );
    $$ LANGUAGE sql STABLE
    "#,
];

/// Opens a dedicated single-connection pool, bootstraps the schema and
/// closes the pool again whatever the outcome.
pub async fn run(database_url: &str) -> Result<BootstrapOutcome> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(database_url)
        .await?;

    let outcome = bootstrap(&pool).await;
    pool.close().await;
    outcome
}

pub async fn bootstrap(pool: &PgPool) -> Result<BootstrapOutcome> {
    let mut conn = pool.acquire().await?;

    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM information_schema.tables
            WHERE table_schema = current_schema() AND table_name = 'aspirantes'
        )
        "#,
    )
    .fetch_one(&mut *conn)
    .await?;

    if exists {
        info!("Database schema already present, skipping bootstrap");
        return Ok(BootstrapOutcome::AlreadyPresent);
    }

    info!("Creating database schema");
    apply_schema(&mut conn).await?;
    info!("Database schema created");
    Ok(BootstrapOutcome::Created)
}

/// Executes every schema statement in order, then inserts the seed
/// recruiter when the recruiter table is empty.
pub async fn apply_schema(conn: &mut PgConnection) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        (&mut *conn).execute(*statement).await?;
    }

    let seeded = sqlx::query(
        r#"
        INSERT INTO reclutadores (nombre, correo)
        SELECT $1, $2
        WHERE NOT EXISTS (SELECT 1 FROM reclutadores)
        "#,
    )
    .bind(SEED_RECRUITER_NAME)
    .bind(SEED_RECRUITER_EMAIL)
    .execute(&mut *conn)
    .await?;

    if seeded.rows_affected() > 0 {
        info!(correo = SEED_RECRUITER_EMAIL, "Seed recruiter inserted");
    }
    Ok(())
}

/// True when no confirmed appointment occupies the slot. Nothing in the
/// request path calls this; slot conflicts are not enforced.
pub async fn is_slot_available(pool: &PgPool, date: NaiveDate, time: NaiveTime) -> Result<bool> {
    let available: bool = sqlx::query_scalar("SELECT verificar_disponibilidad($1, $2)")
        .bind(date)
        .bind(time)
        .fetch_one(pool)
        .await?;
    Ok(available)
}
