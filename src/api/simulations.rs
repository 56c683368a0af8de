//! Upload and marketing generation endpoints

use crate::core::simulators::{JobGroup, JobKind, POSTER_TEMPLATES, SimulationJob, VIDEO_TEMPLATES};
use crate::core::traits::SimulatorService;
use crate::error::AppError;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use di_axum::Inject;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub fn uploads_router() -> Router {
    Router::new()
        .route("/", get(list_uploads).post(upload))
        .route("/:id", get(get_upload).delete(remove_upload))
}

pub fn marketing_router() -> Router {
    Router::new()
        .route("/posters", post(generate_poster))
        .route("/videos", post(generate_video))
        .route("/jobs", get(list_generations))
        .route("/jobs/:id", get(get_generation).delete(remove_generation))
        .route("/templates", get(templates))
}

#[derive(Deserialize, Debug)]
pub struct UploadFile {
    pub file_name: String,
    pub size_bytes: u64,
}

#[derive(Deserialize, Debug)]
pub struct GenerateAsset {
    pub prompt: String,
}

#[derive(Serialize, Debug)]
pub struct JobList {
    pub jobs: Vec<SimulationJob>,
}

#[derive(Serialize, Debug)]
pub struct Templates {
    pub posters: Vec<&'static str>,
    pub videos: Vec<&'static str>,
}

async fn start(
    simulator: &dyn SimulatorService,
    kind: JobKind,
) -> Result<(StatusCode, Json<SimulationJob>), AppError> {
    let job = simulator.start(kind).await?;
    Ok((StatusCode::ACCEPTED, Json(job)))
}

async fn upload(
    Inject(simulator): Inject<dyn SimulatorService>,
    Json(file): Json<UploadFile>,
) -> Result<(StatusCode, Json<SimulationJob>), AppError> {
    start(
        &*simulator,
        JobKind::Upload {
            file_name: file.file_name,
            size_bytes: file.size_bytes,
        },
    )
    .await
}

async fn generate_poster(
    Inject(simulator): Inject<dyn SimulatorService>,
    Json(request): Json<GenerateAsset>,
) -> Result<(StatusCode, Json<SimulationJob>), AppError> {
    start(&*simulator, JobKind::Poster { prompt: request.prompt }).await
}

async fn generate_video(
    Inject(simulator): Inject<dyn SimulatorService>,
    Json(request): Json<GenerateAsset>,
) -> Result<(StatusCode, Json<SimulationJob>), AppError> {
    start(&*simulator, JobKind::Video { prompt: request.prompt }).await
}

async fn list_uploads(Inject(simulator): Inject<dyn SimulatorService>) -> Json<JobList> {
    Json(JobList {
        jobs: simulator.list_uploads().await,
    })
}

async fn list_generations(Inject(simulator): Inject<dyn SimulatorService>) -> Json<JobList> {
    Json(JobList {
        jobs: simulator.list_generations().await,
    })
}

async fn get_upload(
    Inject(simulator): Inject<dyn SimulatorService>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<SimulationJob>, AppError> {
    Ok(Json(simulator.get(JobGroup::Uploads, job_id).await?))
}

async fn get_generation(
    Inject(simulator): Inject<dyn SimulatorService>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<SimulationJob>, AppError> {
    Ok(Json(simulator.get(JobGroup::Generations, job_id).await?))
}

async fn remove_upload(
    Inject(simulator): Inject<dyn SimulatorService>,
    Path(job_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    simulator.remove(JobGroup::Uploads, job_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn remove_generation(
    Inject(simulator): Inject<dyn SimulatorService>,
    Path(job_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    simulator.remove(JobGroup::Generations, job_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn templates() -> Json<Templates> {
    Json(Templates {
        posters: POSTER_TEMPLATES.to_vec(),
        videos: VIDEO_TEMPLATES.to_vec(),
    })
}
