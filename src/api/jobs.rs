use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::instrument;

use crate::{
    api::{json_body::JsonBody, json_error::JsonError},
    app::App,
    job::Job,
};

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

type Relayed = (StatusCode, Json<MessageResponse>);

fn relay(status: StatusCode, message: &'static str) -> Relayed {
    (status, Json(MessageResponse { message }))
}

/// `GET /jobs`
#[instrument(skip(app))]
pub async fn list(State(app): State<App>) -> Result<Json<Vec<Job>>, JsonError> {
    let jobs = app.upstream.list_jobs().await?;

    Ok(Json(jobs))
}

/// `POST /jobs`
#[instrument(skip(app, job), fields(job_name = job.name.as_deref()))]
pub async fn create(
    State(app): State<App>,
    JsonBody(job): JsonBody<Job>,
) -> Result<Relayed, JsonError> {
    let status = app.upstream.create_job(&job).await?;

    Ok(relay(status, "Job created"))
}

/// `PUT /jobs/{name}`
#[instrument(skip(app, job))]
pub async fn update(
    State(app): State<App>,
    Path(name): Path<String>,
    JsonBody(job): JsonBody<Job>,
) -> Result<Relayed, JsonError> {
    let status = app.upstream.update_job(&name, &job).await?;

    Ok(relay(status, "Job updated"))
}

/// `DELETE /jobs/{name}`
#[instrument(skip(app))]
pub async fn delete(
    State(app): State<App>,
    Path(name): Path<String>,
) -> Result<Relayed, JsonError> {
    let status = app.upstream.delete_job(&name).await?;

    Ok(relay(status, "Job deleted"))
}
