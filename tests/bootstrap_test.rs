mod common;

use interview_scheduler::database::bootstrap::{self, BootstrapOutcome, SEED_RECRUITER_EMAIL};

#[tokio::test]
async fn bootstrap_is_idempotent() {
    let Some(pool) = common::test_pool().await else {
        return;
    };
    let url = common::database_url().expect("DATABASE_URL");

    let second = bootstrap::run(&url).await.expect("second bootstrap");
    assert_eq!(second, BootstrapOutcome::AlreadyPresent);

    let before: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reclutadores")
        .fetch_one(&pool)
        .await
        .expect("count recruiters");

    // Re-applying every statement directly must not fail either.
    let mut conn = pool.acquire().await.expect("conn");
    bootstrap::apply_schema(&mut conn).await.expect("reapply schema");
    bootstrap::apply_schema(&mut conn).await.expect("reapply schema twice");
    drop(conn);

    let after: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reclutadores")
        .fetch_one(&pool)
        .await
        .expect("count recruiters");
    assert_eq!(before, after, "re-running the schema inserted recruiters");
    assert!(after >= 1);

    let seeds: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM reclutadores WHERE correo = $1")
            .bind(SEED_RECRUITER_EMAIL)
            .fetch_one(&pool)
            .await
            .expect("count seeds");
    assert!(seeds <= 1);
}

#[tokio::test]
async fn schema_objects_exist_after_bootstrap() {
    let Some(pool) = common::test_pool().await else {
        return;
    };

    for table in ["aspirantes", "reclutadores", "solicitudes", "citas"] {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM information_schema.tables WHERE table_schema = current_schema() AND table_name = $1)",
        )
        .bind(table)
        .fetch_one(&pool)
        .await
        .expect("table lookup");
        assert!(exists, "missing table {}", table);
    }

    for index in [
        "idx_solicitudes_estado",
        "idx_solicitudes_aspirante",
        "idx_citas_fecha",
        "idx_aspirantes_correo",
    ] {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM pg_indexes WHERE indexname = $1)")
                .bind(index)
                .fetch_one(&pool)
                .await
                .expect("index lookup");
        assert!(exists, "missing index {}", index);
    }

    let view: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM information_schema.views WHERE table_name = 'vista_solicitudes_completas')",
    )
    .fetch_one(&pool)
    .await
    .expect("view lookup");
    assert!(view);
}
