use sqlx::{PgPool, postgres::PgPoolOptions};
use std::time::Duration;

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    // Create analysis jobs table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS analysis_jobs (
            id UUID PRIMARY KEY,
            stream_id VARCHAR(255) NOT NULL,
            source_uri TEXT NOT NULL,
            platform VARCHAR(50) NOT NULL,
            status VARCHAR(50) NOT NULL,
            phase VARCHAR(50) NOT NULL,
            total_segments INTEGER NOT NULL,
            completed_segments INTEGER NOT NULL DEFAULT 0,
            failed_segments INTEGER NOT NULL DEFAULT 0,
            hands_found INTEGER NOT NULL DEFAULT 0,
            phase1_completed_segments INTEGER NOT NULL DEFAULT 0,
            phase2_total_hands INTEGER NOT NULL DEFAULT 0,
            phase2_completed_hands INTEGER NOT NULL DEFAULT 0,
            segments JSONB NOT NULL DEFAULT '[]',
            players TEXT[],
            error_message TEXT,
            created_at TIMESTAMPTZ NOT NULL,
            started_at TIMESTAMPTZ,
            completed_at TIMESTAMPTZ
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes for better query performance
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_analysis_jobs_stream_id ON analysis_jobs(stream_id)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_analysis_jobs_status ON analysis_jobs(status)")
        .execute(pool)
        .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_analysis_jobs_created_at ON analysis_jobs(created_at DESC)",
    )
    .execute(pool)
    .await?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}
