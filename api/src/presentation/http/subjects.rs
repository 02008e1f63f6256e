use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::use_cases::subjects::get_subject::GetSubject;
use crate::application::use_cases::subjects::list_subjects::ListSubjects;
use crate::bootstrap::app_context::AppContext;
use crate::domain::courses::subject::Subject;
use crate::presentation::http::error;

#[derive(Debug, Serialize, ToSchema)]
pub struct SubjectResponse {
    pub id: i64,
    pub title: String,
    pub slug: String,
}

impl From<Subject> for SubjectResponse {
    fn from(s: Subject) -> Self {
        Self {
            id: s.id,
            title: s.title,
            slug: s.slug,
        }
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/subjects", get(list_subjects))
        .route("/subjects/:id", get(get_subject))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/subjects", tag = "Subjects", security(()),
    responses((status = 200, body = [SubjectResponse])))]
pub async fn list_subjects(
    State(ctx): State<AppContext>,
) -> Result<Json<Vec<SubjectResponse>>, StatusCode> {
    let repo = ctx.subject_repo();
    let uc = ListSubjects {
        repo: repo.as_ref(),
    };
    let subjects = uc.execute().await.map_err(error::internal)?;
    Ok(Json(subjects.into_iter().map(Into::into).collect()))
}

#[utoipa::path(get, path = "/api/subjects/{id}", tag = "Subjects", security(()),
    params(("id" = i64, Path, description = "Subject ID")),
    responses((status = 200, body = SubjectResponse), (status = 404)))]
pub async fn get_subject(
    State(ctx): State<AppContext>,
    Path(id): Path<i64>,
) -> Result<Json<SubjectResponse>, StatusCode> {
    let repo = ctx.subject_repo();
    let uc = GetSubject {
        repo: repo.as_ref(),
    };
    let subject = uc
        .execute(id)
        .await
        .map_err(error::internal)?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(subject.into()))
}
