//! Simulated file uploads and marketing asset generation.
//!
//! Nothing is processed: a job sits in `processing` for a fixed delay and then
//! flips to `success` or `error` with a biased coin. A failed job stays failed;
//! starting a new job is the only way to retry.

use crate::config::AppConfig;
use crate::core::traits::SimulatorService;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use di::{Ref, inject, injectable};
use log::{info, warn};
use rand::Rng;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

pub const POSTER_TEMPLATES: [&str; 5] = [
    "Festival Sale - 20% off on all groceries with colorful diyas and rangoli design",
    "Fresh Vegetables Daily - Farm to your table with green and natural theme",
    "Bulk Purchase Discount - Buy more save more with professional pricing layout",
    "New Store Opening - Grand celebration with balloons and ribbons",
    "Weekend Special Offers - Limited time deals with bold modern design",
];

pub const VIDEO_TEMPLATES: [&str; 5] = [
    "Product showcase with smooth transitions highlighting fresh vegetables and prices",
    "Customer testimonial style with local community members praising quality",
    "Quick recipe video using store ingredients with cooking steps",
    "Store tour showing clean aisles and fresh produce sections",
    "Festival greeting video with traditional music and product highlights",
];

const POSTER_URL: &str = "https://images.unsplash.com/photo-1607082348824-0a96f2a4b9da?w=400&h=600&fit=crop&crop=center";
const VIDEO_THUMBNAIL_URL: &str = "https://images.unsplash.com/photo-1556742049-0cfed4f6a45d?w=400&h=300&fit=crop&crop=center";
const VIDEO_DURATION: &str = "15s";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JobKind {
    Upload { file_name: String, size_bytes: u64 },
    Poster { prompt: String },
    Video { prompt: String },
}

impl JobKind {
    fn input(&self) -> &str {
        match self {
            JobKind::Upload { file_name, .. } => file_name,
            JobKind::Poster { prompt } | JobKind::Video { prompt } => prompt,
        }
    }

    pub fn group(&self) -> JobGroup {
        match self {
            JobKind::Upload { .. } => JobGroup::Uploads,
            JobKind::Poster { .. } | JobKind::Video { .. } => JobGroup::Generations,
        }
    }
}

/// Which list a job belongs to. Lookups never cross from one list to the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobGroup {
    Uploads,
    Generations,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Processing,
    Success,
    Error,
}

/// Placeholder output of a successful generation job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Asset {
    pub url: String,
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationJob {
    pub id: Uuid,
    #[serde(flatten)]
    pub kind: JobKind,
    /// Human readable size for uploads, e.g. `1.50 MB`.
    pub size: Option<String>,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    pub asset: Option<Asset>,
}

pub fn format_size(size_bytes: u64) -> String {
    format!("{:.2} MB", size_bytes as f64 / 1024.0 / 1024.0)
}

pub struct MockSimulator {
    config: AppConfig,
    jobs: Arc<RwLock<Vec<SimulationJob>>>,
}

#[injectable(SimulatorService)]
impl MockSimulator {
    #[inject]
    pub fn create(config: Ref<AppConfig>) -> MockSimulator {
        MockSimulator::new(AppConfig::clone(&config))
    }
}

impl MockSimulator {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            jobs: Arc::new(RwLock::new(Vec::new())),
        }
    }

    fn delay_for(&self, kind: &JobKind) -> Duration {
        match kind {
            JobKind::Upload { .. } => self.config.upload_delay,
            JobKind::Poster { .. } => self.config.poster_delay,
            JobKind::Video { .. } => self.config.video_delay,
        }
    }
}

async fn settle(
    jobs: Arc<RwLock<Vec<SimulationJob>>>,
    job_id: Uuid,
    delay: Duration,
    success_rate: f64,
) {
    tokio::time::sleep(delay).await;

    let succeeded = rand::rng().random_bool(success_rate);

    let mut jobs = jobs.write().await;
    let Some(job) = jobs.iter_mut().find(|j| j.id == job_id) else {
        // removed while processing
        return;
    };

    if succeeded {
        job.status = JobStatus::Success;
        job.asset = match &job.kind {
            JobKind::Upload { .. } => None,
            JobKind::Poster { .. } => Some(Asset {
                url: POSTER_URL.to_owned(),
                duration: None,
            }),
            JobKind::Video { .. } => Some(Asset {
                url: VIDEO_THUMBNAIL_URL.to_owned(),
                duration: Some(VIDEO_DURATION.to_owned()),
            }),
        };
        info!("job {job_id} finished");
    } else {
        job.status = JobStatus::Error;
        warn!("job {job_id} failed: {}", job.kind.input());
    }
}

#[async_trait]
impl SimulatorService for MockSimulator {
    async fn start(&self, kind: JobKind) -> AppResult<SimulationJob> {
        if kind.input().trim().is_empty() {
            return Err(match kind {
                JobKind::Upload { .. } => AppError::Rejected("file name must not be blank"),
                _ => AppError::Rejected("prompt must not be blank"),
            });
        }

        let size = match &kind {
            JobKind::Upload { size_bytes, .. } => Some(format_size(*size_bytes)),
            _ => None,
        };
        let delay = self.delay_for(&kind);
        let job = SimulationJob {
            id: Uuid::now_v7(),
            kind,
            size,
            status: JobStatus::Processing,
            created_at: Utc::now(),
            asset: None,
        };

        self.jobs.write().await.push(job.clone());
        tokio::spawn(settle(
            self.jobs.clone(),
            job.id,
            delay,
            self.config.success_rate,
        ));

        info!("started job {} ({:?})", job.id, job.kind);
        Ok(job)
    }

    async fn get(&self, group: JobGroup, job_id: Uuid) -> AppResult<SimulationJob> {
        self.jobs
            .read()
            .await
            .iter()
            .find(|j| j.id == job_id && j.kind.group() == group)
            .cloned()
            .ok_or(AppError::JobNotFound(job_id))
    }

    async fn list_uploads(&self) -> Vec<SimulationJob> {
        self.jobs
            .read()
            .await
            .iter()
            .filter(|j| j.kind.group() == JobGroup::Uploads)
            .cloned()
            .collect()
    }

    async fn list_generations(&self) -> Vec<SimulationJob> {
        self.jobs
            .read()
            .await
            .iter()
            .rev()
            .filter(|j| j.kind.group() == JobGroup::Generations)
            .cloned()
            .collect()
    }

    async fn remove(&self, group: JobGroup, job_id: Uuid) -> AppResult<()> {
        let mut jobs = self.jobs.write().await;
        let before = jobs.len();
        jobs.retain(|j| j.id != job_id || j.kind.group() != group);

        if jobs.len() == before {
            Err(AppError::JobNotFound(job_id))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulator(success_rate: f64) -> MockSimulator {
        MockSimulator::new(AppConfig {
            success_rate,
            ..AppConfig::default()
        })
    }

    fn upload(name: &str) -> JobKind {
        JobKind::Upload {
            file_name: name.to_owned(),
            size_bytes: 1_572_864,
        }
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(1_572_864), "1.50 MB");
        assert_eq!(format_size(0), "0.00 MB");
    }

    #[tokio::test]
    async fn test_blank_input_rejected() {
        let simulator = simulator(1.0);

        assert!(simulator.start(upload("  ")).await.is_err());
        assert!(
            simulator
                .start(JobKind::Poster { prompt: String::new() })
                .await
                .is_err()
        );
        assert!(simulator.list_uploads().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_upload_succeeds_after_delay() {
        let simulator = simulator(1.0);
        let job = simulator.start(upload("sales.csv")).await.unwrap();
        assert_eq!(job.status, JobStatus::Processing);
        assert_eq!(job.size.as_deref(), Some("1.50 MB"));

        tokio::time::sleep(Duration::from_millis(1999)).await;
        let pending = simulator.get(JobGroup::Uploads, job.id).await.unwrap();
        assert_eq!(pending.status, JobStatus::Processing);

        tokio::time::sleep(Duration::from_millis(2)).await;
        let job = simulator.get(JobGroup::Uploads, job.id).await.unwrap();
        assert_eq!(job.status, JobStatus::Success);
        assert!(job.asset.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_is_terminal() {
        let simulator = simulator(0.0);
        let job = simulator
            .start(JobKind::Video { prompt: "store tour".into() })
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_secs(60)).await;

        let job = simulator.get(JobGroup::Generations, job.id).await.unwrap();
        assert_eq!(job.status, JobStatus::Error);
        assert!(job.asset.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_video_asset_has_duration() {
        let simulator = simulator(1.0);
        let job = simulator
            .start(JobKind::Video { prompt: "recipe".into() })
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(5001)).await;

        let asset = simulator.get(JobGroup::Generations, job.id).await.unwrap().asset.unwrap();
        assert_eq!(asset.duration.as_deref(), Some("15s"));
    }

    #[tokio::test]
    async fn test_generations_newest_first_and_uploads_separate() {
        let simulator = simulator(1.0);
        let upload = simulator.start(upload("a.csv")).await.unwrap();
        let poster = simulator
            .start(JobKind::Poster { prompt: "sale".into() })
            .await
            .unwrap();
        let video = simulator
            .start(JobKind::Video { prompt: "tour".into() })
            .await
            .unwrap();

        let generations: Vec<_> = simulator.list_generations().await.iter().map(|j| j.id).collect();
        assert_eq!(generations, vec![video.id, poster.id]);

        let uploads: Vec<_> = simulator.list_uploads().await.iter().map(|j| j.id).collect();
        assert_eq!(uploads, vec![upload.id]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_removed_job_is_not_settled() {
        let simulator = simulator(1.0);
        let job = simulator.start(upload("a.csv")).await.unwrap();

        simulator.remove(JobGroup::Uploads, job.id).await.unwrap();
        tokio::time::sleep(Duration::from_secs(3)).await;

        assert_eq!(
            simulator.get(JobGroup::Uploads, job.id).await.unwrap_err(),
            AppError::JobNotFound(job.id)
        );
        assert!(simulator.remove(JobGroup::Uploads, job.id).await.is_err());
    }

    #[tokio::test]
    async fn test_lookups_stay_within_their_group() {
        let simulator = simulator(1.0);
        let upload = simulator.start(upload("a.csv")).await.unwrap();
        let poster = simulator
            .start(JobKind::Poster { prompt: "sale".into() })
            .await
            .unwrap();

        assert_eq!(
            simulator.get(JobGroup::Uploads, poster.id).await.unwrap_err(),
            AppError::JobNotFound(poster.id)
        );
        assert_eq!(
            simulator.get(JobGroup::Generations, upload.id).await.unwrap_err(),
            AppError::JobNotFound(upload.id)
        );
        assert!(simulator.remove(JobGroup::Uploads, poster.id).await.is_err());
        assert!(simulator.remove(JobGroup::Generations, upload.id).await.is_err());

        assert_eq!(simulator.list_uploads().await.len(), 1);
        assert_eq!(simulator.list_generations().await.len(), 1);
        simulator.remove(JobGroup::Generations, poster.id).await.unwrap();
        assert!(simulator.list_generations().await.is_empty());
    }
}
