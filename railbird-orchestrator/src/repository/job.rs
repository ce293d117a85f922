//! Job Repository
//!
//! Handles all database operations for analysis jobs. Updates are simple
//! field writes with no optimistic concurrency check; workers updating the
//! same record concurrently is a known, tolerated race.

use railbird_core::domain::job::{AnalysisJob, AnalysisPhase, JobStatus, Platform, SegmentInfo};
use sqlx::PgPool;
use uuid::Uuid;

/// Persist a newly created job
pub async fn create(pool: &PgPool, job: &AnalysisJob) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO analysis_jobs (
            id, stream_id, source_uri, platform, status, phase,
            total_segments, completed_segments, failed_segments, hands_found,
            phase1_completed_segments, phase2_total_hands, phase2_completed_hands,
            segments, players, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
        "#,
    )
    .bind(job.job_id)
    .bind(&job.stream_id)
    .bind(&job.source_uri)
    .bind(platform_to_string(job.platform))
    .bind(status_to_string(job.status))
    .bind(phase_to_string(job.phase))
    .bind(job.total_segments)
    .bind(job.completed_segments)
    .bind(job.failed_segments)
    .bind(job.hands_found)
    .bind(job.phase1_completed_segments)
    .bind(job.phase2_total_hands)
    .bind(job.phase2_completed_hands)
    .bind(sqlx::types::Json(&job.segments))
    .bind(&job.players)
    .bind(job.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Find a job by ID
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<AnalysisJob>, sqlx::Error> {
    let row = sqlx::query_as::<_, JobRow>(
        r#"
        SELECT id, stream_id, source_uri, platform, status, phase,
               total_segments, completed_segments, failed_segments, hands_found,
               phase1_completed_segments, phase2_total_hands, phase2_completed_hands,
               segments, players, error_message, created_at, started_at, completed_at
        FROM analysis_jobs
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| r.into()))
}

/// Move a job to `analyzing` once all segment tasks are enqueued
pub async fn mark_analyzing(pool: &PgPool, job_id: Uuid) -> Result<(), sqlx::Error> {
    let now = chrono::Utc::now();

    sqlx::query(
        r#"
        UPDATE analysis_jobs
        SET status = $1, started_at = $2
        WHERE id = $3
        "#,
    )
    .bind("analyzing")
    .bind(now)
    .bind(job_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Record phase-1 completion and reset phase-2 counters
pub async fn begin_phase2(
    pool: &PgPool,
    job_id: Uuid,
    total_hands: i32,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE analysis_jobs
        SET phase = $1, phase1_completed_segments = $2,
            phase2_total_hands = $3, phase2_completed_hands = 0
        WHERE id = $4
        "#,
    )
    .bind("phase2")
    .bind(total_hands)
    .bind(total_hands)
    .bind(job_id)
    .execute(pool)
    .await?;

    Ok(())
}

// =============================================================================
// Helper Functions
// =============================================================================

fn status_to_string(status: JobStatus) -> &'static str {
    match status {
        JobStatus::Pending => "pending",
        JobStatus::Analyzing => "analyzing",
        JobStatus::Completed => "completed",
        JobStatus::Failed => "failed",
    }
}

fn string_to_status(s: &str) -> JobStatus {
    match s {
        "pending" => JobStatus::Pending,
        "analyzing" => JobStatus::Analyzing,
        "completed" => JobStatus::Completed,
        "failed" => JobStatus::Failed,
        _ => JobStatus::Pending,
    }
}

fn platform_to_string(platform: Platform) -> &'static str {
    match platform {
        Platform::Ept => "ept",
        Platform::Triton => "triton",
        Platform::Wsop => "wsop",
    }
}

fn string_to_platform(s: &str) -> Platform {
    match s {
        "ept" => Platform::Ept,
        "triton" => Platform::Triton,
        "wsop" => Platform::Wsop,
        _ => Platform::Ept,
    }
}

fn phase_to_string(phase: AnalysisPhase) -> &'static str {
    match phase {
        AnalysisPhase::Phase1 => "phase1",
        AnalysisPhase::Phase2 => "phase2",
    }
}

fn string_to_phase(s: &str) -> AnalysisPhase {
    match s {
        "phase1" => AnalysisPhase::Phase1,
        "phase2" => AnalysisPhase::Phase2,
        _ => AnalysisPhase::Phase1,
    }
}

// =============================================================================
// Database Row Types
// =============================================================================

#[derive(sqlx::FromRow)]
struct JobRow {
    id: Uuid,
    stream_id: String,
    source_uri: String,
    platform: String,
    status: String,
    phase: String,
    total_segments: i32,
    completed_segments: i32,
    failed_segments: i32,
    hands_found: i32,
    phase1_completed_segments: i32,
    phase2_total_hands: i32,
    phase2_completed_hands: i32,
    segments: serde_json::Value,
    players: Option<Vec<String>>,
    error_message: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    started_at: Option<chrono::DateTime<chrono::Utc>>,
    completed_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<JobRow> for AnalysisJob {
    fn from(row: JobRow) -> Self {
        let segments: Vec<SegmentInfo> =
            serde_json::from_value(row.segments).unwrap_or_default();

        AnalysisJob {
            job_id: row.id,
            stream_id: row.stream_id,
            source_uri: row.source_uri,
            platform: string_to_platform(&row.platform),
            status: string_to_status(&row.status),
            phase: string_to_phase(&row.phase),
            total_segments: row.total_segments,
            completed_segments: row.completed_segments,
            failed_segments: row.failed_segments,
            hands_found: row.hands_found,
            phase1_completed_segments: row.phase1_completed_segments,
            phase2_total_hands: row.phase2_total_hands,
            phase2_completed_hands: row.phase2_completed_hands,
            segments,
            players: row.players,
            error_message: row.error_message,
            created_at: row.created_at,
            started_at: row.started_at,
            completed_at: row.completed_at,
        }
    }
}
