//! Task dispatch
//!
//! Fans analysis work out to the segment analyzer through an external task
//! queue that accepts HTTP-callback tasks with a scheduled execution time.
//! The queue itself is behind the [`TaskQueue`] trait; the production adapter
//! lives in [`http_queue`].

pub mod http_queue;

use std::sync::Arc;

use async_trait::async_trait;
use railbird_core::domain::job::AnalysisJob;
use railbird_core::dto::analyze::SegmentBounds;
use railbird_core::dto::callback::Phase1CompleteRequest;
use railbird_core::dto::task::{ProcessHandRequest, ProcessSegmentRequest};
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

/// Errors that can occur while enqueueing tasks
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Request to the queue service failed
    #[error("queue request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Queue service rejected the task
    #[error("queue rejected task (status {status}): {message}")]
    Rejected { status: u16, message: String },

    /// Task payload could not be serialized
    #[error("failed to serialize task payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// One HTTP-callback task handed to the queue
#[derive(Debug, Clone)]
pub struct HttpTask {
    /// Worker endpoint the queue will POST to
    pub url: String,
    /// JSON body delivered to the worker
    pub body: serde_json::Value,
    /// Scheduling offset from now, in seconds
    pub delay_secs: u64,
}

/// Port for the external task queue
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TaskQueue: Send + Sync {
    /// Enqueue a task, returning the queue-assigned task name
    async fn enqueue(&self, task: HttpTask) -> Result<String, DispatchError>;
}

/// Builds task payloads and fans them out to the queue.
///
/// The per-index stagger spreads worker start times so all segments don't hit
/// the analyzer simultaneously. It is advisory only: the queue may still run
/// tasks concurrently or out of order.
pub struct Dispatcher {
    queue: Arc<dyn TaskQueue>,
    analyzer_url: String,
    segment_stagger_secs: u64,
    hand_stagger_secs: u64,
}

impl Dispatcher {
    pub fn new(
        queue: Arc<dyn TaskQueue>,
        analyzer_url: &str,
        segment_stagger_secs: u64,
        hand_stagger_secs: u64,
    ) -> Self {
        Self {
            queue,
            analyzer_url: analyzer_url.trim_end_matches('/').to_string(),
            segment_stagger_secs,
            hand_stagger_secs,
        }
    }

    /// Enqueue one phase-1 task per segment of the job.
    ///
    /// All enqueues run in parallel; the first failure aborts the fan-out and
    /// is returned as-is. Already-enqueued tasks are not compensated.
    pub async fn dispatch_segments(&self, job: &AnalysisJob) -> Result<Vec<String>, DispatchError> {
        let mut tasks = Vec::with_capacity(job.segments.len());

        for seg in &job.segments {
            let payload = ProcessSegmentRequest {
                job_id: job.job_id,
                stream_id: job.stream_id.clone(),
                segment_index: seg.index,
                source_uri: job.source_uri.clone(),
                segment: SegmentBounds {
                    start: seg.start,
                    end: seg.end,
                },
                platform: job.platform,
            };

            tasks.push(HttpTask {
                url: format!("{}/analyze-segment", self.analyzer_url),
                body: serde_json::to_value(&payload)?,
                delay_secs: seg.index as u64 * self.segment_stagger_secs,
            });
        }

        let names =
            futures::future::try_join_all(tasks.into_iter().map(|t| self.queue.enqueue(t)))
                .await?;

        tracing::debug!("Enqueued {} segment tasks", names.len());

        Ok(names)
    }

    /// Enqueue one phase-2 task per hand found by phase 1.
    pub async fn dispatch_hands(
        &self,
        req: &Phase1CompleteRequest,
    ) -> Result<Vec<String>, DispatchError> {
        let mut tasks = Vec::with_capacity(req.hands.len());

        for (i, hand) in req.hands.iter().enumerate() {
            let payload = ProcessHandRequest {
                job_id: req.job_id,
                stream_id: req.stream_id.clone(),
                hand_index: hand.hand_number,
                source_uri: req.source_uri.clone(),
                hand_timestamp: hand.clone(),
                platform: req.platform,
            };

            tasks.push(HttpTask {
                url: format!("{}/analyze-phase2", self.analyzer_url),
                body: serde_json::to_value(&payload)?,
                delay_secs: i as u64 * self.hand_stagger_secs,
            });
        }

        let names =
            futures::future::try_join_all(tasks.into_iter().map(|t| self.queue.enqueue(t)))
                .await?;

        tracing::debug!("Enqueued {} phase-2 tasks", names.len());

        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use railbird_core::domain::hand::HandTimestamp;
    use railbird_core::domain::job::{
        AnalysisPhase, JobStatus, Platform, SegmentInfo, SegmentStatus,
    };
    use std::sync::Mutex;
    use uuid::Uuid;

    fn job_with_segments(count: i32) -> AnalysisJob {
        let segments = (0..count)
            .map(|i| SegmentInfo {
                index: i,
                start: (i * 60) as f64,
                end: ((i + 1) * 60) as f64,
                status: SegmentStatus::Pending,
                hands_found: None,
                error_message: None,
                segment_uri: None,
            })
            .collect();

        AnalysisJob {
            job_id: Uuid::new_v4(),
            stream_id: "stream-1".to_string(),
            source_uri: "gs://bucket/video.mp4".to_string(),
            platform: Platform::Wsop,
            status: JobStatus::Pending,
            phase: AnalysisPhase::Phase1,
            total_segments: count,
            completed_segments: 0,
            failed_segments: 0,
            hands_found: 0,
            phase1_completed_segments: 0,
            phase2_total_hands: 0,
            phase2_completed_hands: 0,
            segments,
            players: None,
            error_message: None,
            created_at: chrono::Utc::now(),
            started_at: None,
            completed_at: None,
        }
    }

    fn recording_queue(seen: Arc<Mutex<Vec<HttpTask>>>) -> MockTaskQueue {
        let mut queue = MockTaskQueue::new();
        queue.expect_enqueue().returning(move |task| {
            seen.lock().unwrap().push(task);
            Ok("queues/analysis/tasks/t".to_string())
        });
        queue
    }

    #[tokio::test]
    async fn test_dispatch_segments_staggers_by_index() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let queue = recording_queue(seen.clone());
        let dispatcher = Dispatcher::new(Arc::new(queue), "http://analyzer", 2, 3);

        let job = job_with_segments(3);
        let names = dispatcher.dispatch_segments(&job).await.unwrap();
        assert_eq!(names.len(), 3);

        let mut tasks = seen.lock().unwrap().clone();
        tasks.sort_by_key(|t| t.delay_secs);
        let delays: Vec<u64> = tasks.iter().map(|t| t.delay_secs).collect();
        assert_eq!(delays, vec![0, 2, 4]);

        for task in &tasks {
            assert_eq!(task.url, "http://analyzer/analyze-segment");
            assert_eq!(task.body["jobId"], serde_json::json!(job.job_id));
            assert_eq!(task.body["platform"], serde_json::json!("wsop"));
        }
        assert_eq!(tasks[1].body["segmentIndex"], serde_json::json!(1));
        assert_eq!(tasks[1].body["segment"]["start"], serde_json::json!(60.0));
    }

    #[tokio::test]
    async fn test_dispatch_segments_propagates_first_failure() {
        let mut queue = MockTaskQueue::new();
        queue.expect_enqueue().returning(|task| {
            if task.delay_secs == 0 {
                Ok("queues/analysis/tasks/t0".to_string())
            } else {
                Err(DispatchError::Rejected {
                    status: 500,
                    message: "queue unavailable".to_string(),
                })
            }
        });
        let dispatcher = Dispatcher::new(Arc::new(queue), "http://analyzer", 2, 3);

        let result = dispatcher.dispatch_segments(&job_with_segments(2)).await;
        assert!(matches!(
            result,
            Err(DispatchError::Rejected { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_dispatch_hands_targets_phase2_endpoint() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let queue = recording_queue(seen.clone());
        let dispatcher = Dispatcher::new(Arc::new(queue), "http://analyzer/", 2, 3);

        let req = Phase1CompleteRequest {
            job_id: Uuid::new_v4(),
            stream_id: "stream-1".to_string(),
            source_uri: "gs://bucket/video.mp4".to_string(),
            platform: Platform::Ept,
            hands: vec![
                HandTimestamp {
                    hand_number: 12,
                    start: "00:10".to_string(),
                    end: "03:45".to_string(),
                },
                HandTimestamp {
                    hand_number: 13,
                    start: "04:00".to_string(),
                    end: "06:30".to_string(),
                },
            ],
        };

        let names = dispatcher.dispatch_hands(&req).await.unwrap();
        assert_eq!(names.len(), 2);

        let mut tasks = seen.lock().unwrap().clone();
        tasks.sort_by_key(|t| t.delay_secs);
        assert_eq!(tasks[0].url, "http://analyzer/analyze-phase2");
        assert_eq!(tasks[0].delay_secs, 0);
        assert_eq!(tasks[1].delay_secs, 3);
        assert_eq!(tasks[0].body["handIndex"], serde_json::json!(12));
        assert_eq!(
            tasks[1].body["handTimestamp"]["start"],
            serde_json::json!("04:00")
        );
    }
}
