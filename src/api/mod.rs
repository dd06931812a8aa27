use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::Router;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::db::repository::{self, StateUpdate};
use crate::error::AppError;
use crate::grades::GradeTable;
use crate::models::{DegreeSnapshot, ProjectionDetails};
use crate::services::projection::{self, ProjectionEngine};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/snapshot", get(get_snapshot))
        .route("/transcript", get(get_transcript))
        .route("/refresh", post(refresh))
        .route("/grades", get(list_grades))
        .route("/grades/{course_id}", put(put_grade).delete(delete_grade))
        .route("/projection", get(get_projection))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

async fn get_snapshot(
    State(state): State<AppState>,
) -> Result<Json<Option<DegreeSnapshot>>, AppError> {
    Ok(Json(state.provider.degree_snapshot().await?))
}

async fn get_transcript(State(state): State<AppState>) -> Result<Json<Option<Value>>, AppError> {
    Ok(Json(state.provider.raw_transcript().await?))
}

async fn refresh(State(state): State<AppState>) -> Result<Json<Option<DegreeSnapshot>>, AppError> {
    Ok(Json(state.provider.refresh().await?))
}

async fn list_grades(
    State(state): State<AppState>,
) -> Result<Json<HashMap<String, String>>, AppError> {
    let local = repository::load_state(&state.db).await?;
    Ok(Json(local.grades))
}

#[derive(Debug, Deserialize)]
struct GradeUpdateRequest {
    grade: String,
}

/// Stores the override as raw text. Validation happens when the projection
/// reads it back, so a typo simply excludes the course instead of erroring.
async fn put_grade(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
    Json(req): Json<GradeUpdateRequest>,
) -> Result<StatusCode, AppError> {
    let local = repository::load_state(&state.db).await?;
    let mut grades = local.grades;
    grades.insert(course_id, req.grade);

    repository::save_state(
        &state.db,
        StateUpdate {
            grades: Some(grades),
            ..Default::default()
        },
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_grade(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let local = repository::load_state(&state.db).await?;
    let mut grades = local.grades;
    if grades.remove(&course_id).is_none() {
        return Err(AppError::NotFound);
    }

    repository::save_state(
        &state.db,
        StateUpdate {
            grades: Some(grades),
            ..Default::default()
        },
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Serialize)]
pub struct ProjectionReport {
    pub snapshot: DegreeSnapshot,
    pub details: ProjectionDetails,
    pub current_gpa: Option<f64>,
    pub projected_gpa: Option<f64>,
}

async fn get_projection(
    State(state): State<AppState>,
) -> Result<Json<Option<ProjectionReport>>, AppError> {
    let Some(mut snapshot) = state.provider.degree_snapshot().await? else {
        return Ok(Json(None));
    };

    let stored = repository::load_state(&state.db).await?.grades;
    let table = GradeTable::standard();
    for course in &mut snapshot.pending_courses {
        course.grade = stored.get(&course.id).and_then(|raw| table.normalize(raw));
    }

    let engine = ProjectionEngine::new(table);
    let details = engine.project(&snapshot.pending_courses);
    let current_gpa = projection::current_gpa(snapshot.grade_points, snapshot.credit_hours);
    let projected_gpa = projection::projected_gpa(&snapshot, &details);

    Ok(Json(Some(ProjectionReport {
        snapshot,
        details,
        current_gpa,
        projected_gpa,
    })))
}
