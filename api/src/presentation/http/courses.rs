use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::dto::courses::{CourseContentsDto, CourseOverviewDto, RenderedContentDto};
use crate::application::use_cases::courses::enroll::EnrollCourse;
use crate::application::use_cases::courses::get_contents::GetCourseContents;
use crate::application::use_cases::courses::get_course::GetCourse;
use crate::application::use_cases::courses::list_courses::ListCourses;
use crate::application::use_cases::courses::list_enrolled::ListEnrolledCourses;
use crate::bootstrap::app_context::AppContext;
use crate::domain::courses::course::Course;
use crate::domain::courses::module::Module;
use crate::presentation::http::auth::{self, Bearer};
use crate::presentation::http::error;

#[derive(Debug, Serialize, ToSchema)]
pub struct ModuleSummary {
    pub order: i32,
    pub title: String,
    pub description: String,
}

impl From<Module> for ModuleSummary {
    fn from(m: Module) -> Self {
        Self {
            order: m.order,
            title: m.title,
            description: m.description,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseResponse {
    pub modules: Vec<ModuleSummary>,
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub overview: String,
    pub created: chrono::DateTime<chrono::Utc>,
    pub owner: Uuid,
    pub subject: i64,
    pub students: Vec<Uuid>,
}

impl CourseResponse {
    pub(crate) fn new(course: Course, modules: Vec<Module>) -> Self {
        Self {
            modules: modules.into_iter().map(Into::into).collect(),
            id: course.id,
            title: course.title,
            slug: course.slug,
            overview: course.overview,
            created: course.created_at,
            owner: course.owner_id,
            subject: course.subject_id,
            students: course.students,
        }
    }
}

impl From<CourseOverviewDto> for CourseResponse {
    fn from(dto: CourseOverviewDto) -> Self {
        Self::new(dto.course, dto.modules)
    }
}

/// A content item as shown to students: `item` is a rendered HTML fragment.
#[derive(Debug, Serialize, ToSchema)]
pub struct RenderedContent {
    pub order: i32,
    pub item: String,
}

impl From<RenderedContentDto> for RenderedContent {
    fn from(c: RenderedContentDto) -> Self {
        Self {
            order: c.order,
            item: c.html,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ModuleWithContents {
    pub order: i32,
    pub title: String,
    pub description: String,
    pub contents: Vec<RenderedContent>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseWithContentsResponse {
    pub modules: Vec<ModuleWithContents>,
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub overview: String,
    pub created: chrono::DateTime<chrono::Utc>,
    pub owner: Uuid,
    pub subject: i64,
    pub students: Vec<Uuid>,
}

impl From<CourseContentsDto> for CourseWithContentsResponse {
    fn from(dto: CourseContentsDto) -> Self {
        let course = dto.course;
        Self {
            modules: dto
                .modules
                .into_iter()
                .map(|m| ModuleWithContents {
                    order: m.module.order,
                    title: m.module.title,
                    description: m.module.description,
                    contents: m.contents.into_iter().map(Into::into).collect(),
                })
                .collect(),
            id: course.id,
            title: course.title,
            slug: course.slug,
            overview: course.overview,
            created: course.created_at,
            owner: course.owner_id,
            subject: course.subject_id,
            students: course.students,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EnrollResponse {
    pub enrolled: bool,
}

#[derive(Debug, Deserialize)]
pub struct ListCoursesQuery {
    pub subject: Option<String>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/courses", get(list_courses))
        .route("/courses/:id", get(get_course))
        .route("/courses/:id/enroll", post(enroll))
        .route("/courses/:id/contents", get(get_course_contents))
        .route("/students/courses", get(list_enrolled_courses))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/courses", tag = "Courses", security(()),
    params(("subject" = Option<String>, Query, description = "Subject slug filter")),
    responses((status = 200, body = [CourseResponse])))]
pub async fn list_courses(
    State(ctx): State<AppContext>,
    q: Option<Query<ListCoursesQuery>>,
) -> Result<Json<Vec<CourseResponse>>, StatusCode> {
    let subject = q.and_then(|Query(v)| v.subject);
    let courses = ctx.course_repo();
    let modules = ctx.module_repo();
    let uc = ListCourses {
        courses: courses.as_ref(),
        modules: modules.as_ref(),
    };
    let items = uc.execute(subject).await.map_err(error::internal)?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(get, path = "/api/courses/{id}", tag = "Courses", security(()),
    params(("id" = i64, Path, description = "Course ID")),
    responses((status = 200, body = CourseResponse), (status = 404)))]
pub async fn get_course(
    State(ctx): State<AppContext>,
    Path(id): Path<i64>,
) -> Result<Json<CourseResponse>, StatusCode> {
    let courses = ctx.course_repo();
    let modules = ctx.module_repo();
    let uc = GetCourse {
        courses: courses.as_ref(),
        modules: modules.as_ref(),
    };
    let course = uc
        .execute(id)
        .await
        .map_err(error::internal)?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(course.into()))
}

#[utoipa::path(post, path = "/api/courses/{id}/enroll", tag = "Courses",
    params(("id" = i64, Path, description = "Course ID")),
    responses((status = 200, body = EnrollResponse), (status = 401), (status = 404)))]
pub async fn enroll(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<i64>,
) -> Result<Json<EnrollResponse>, StatusCode> {
    let user_id = auth::require_user(&ctx.cfg, bearer)?;
    let courses = ctx.course_repo();
    let uc = EnrollCourse {
        courses: courses.as_ref(),
    };
    uc.execute(id, user_id).await.map_err(error::status_for)?;
    Ok(Json(EnrollResponse { enrolled: true }))
}

#[utoipa::path(get, path = "/api/courses/{id}/contents", tag = "Courses",
    params(("id" = i64, Path, description = "Course ID")),
    responses(
        (status = 200, body = CourseWithContentsResponse),
        (status = 403, description = "Not enrolled and not the owner"),
        (status = 404)
    ))]
pub async fn get_course_contents(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    Path(id): Path<i64>,
) -> Result<Json<CourseWithContentsResponse>, StatusCode> {
    let actor = auth::resolve_actor(&ctx.cfg, bearer);
    let courses = ctx.course_repo();
    let modules = ctx.module_repo();
    let contents = ctx.content_repo();
    let access = ctx.access_repo();
    let render = ctx.render_context();
    let uc = GetCourseContents {
        courses: courses.as_ref(),
        modules: modules.as_ref(),
        contents: contents.as_ref(),
        access: access.as_ref(),
        render: &render,
    };
    let dto = uc.execute(&actor, id).await.map_err(error::status_for)?;
    Ok(Json(dto.into()))
}

#[utoipa::path(get, path = "/api/students/courses", tag = "Courses",
    responses((status = 200, body = [CourseResponse]), (status = 401)))]
pub async fn list_enrolled_courses(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<Vec<CourseResponse>>, StatusCode> {
    let user_id = auth::require_user(&ctx.cfg, bearer)?;
    let courses = ctx.course_repo();
    let modules = ctx.module_repo();
    let uc = ListEnrolledCourses {
        courses: courses.as_ref(),
        modules: modules.as_ref(),
    };
    let items = uc.execute(user_id).await.map_err(error::internal)?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}
