use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::ports::module_repository::ModuleRepository;
use crate::application::use_cases::contents::create_content::{CreateContent, CreateContentInput};
use crate::application::use_cases::contents::delete_content::DeleteContent;
use crate::application::use_cases::contents::list_contents::ListModuleContents;
use crate::application::use_cases::contents::reorder_contents::ReorderContents;
use crate::application::use_cases::contents::update_content::UpdateContent;
use crate::application::use_cases::courses::create_course::CreateCourse;
use crate::application::use_cases::courses::delete_course::DeleteCourse;
use crate::application::use_cases::courses::list_owned::ListOwnedCourses;
use crate::application::use_cases::courses::update_course::UpdateCourse;
use crate::application::use_cases::modules::create_module::CreateModule;
use crate::application::use_cases::modules::delete_module::DeleteModule;
use crate::application::use_cases::modules::list_modules::ListCourseModules;
use crate::application::use_cases::modules::reorder_modules::ReorderModules;
use crate::application::use_cases::modules::update_module::UpdateModule;
use crate::bootstrap::app_context::AppContext;
use crate::domain::courses::ValidationError;
use crate::domain::courses::content::{Content, ContentChanges, ContentKind, ItemPayload};
use crate::domain::courses::course::{CourseChanges, NewCourse};
use crate::domain::courses::module::{Module, ModuleChanges, NewModule};
use crate::presentation::http::auth::{self, Bearer};
use crate::presentation::http::courses::CourseResponse;
use crate::presentation::http::error;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCourseRequest {
    pub subject: i64,
    pub title: String,
    pub slug: String,
    pub overview: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateCourseRequest {
    pub subject: Option<i64>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub overview: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ManagedModule {
    pub id: i64,
    pub course: i64,
    pub order: i32,
    pub title: String,
    pub description: String,
}

impl From<Module> for ManagedModule {
    fn from(m: Module) -> Self {
        Self {
            id: m.id,
            course: m.course_id,
            order: m.order,
            title: m.title,
            description: m.description,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateModuleRequest {
    pub title: String,
    pub description: Option<String>,
    /// Placed after the last module of the course when omitted.
    pub order: Option<i32>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateModuleRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub order: Option<i32>,
}

/// An item as seen in the course editor, with its raw payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct ManagedContent {
    pub id: i64,
    pub module: i64,
    pub order: i32,
    pub kind: String,
    pub title: String,
    pub owner: Uuid,
    pub created: chrono::DateTime<chrono::Utc>,
    pub updated: chrono::DateTime<chrono::Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl From<Content> for ManagedContent {
    fn from(c: Content) -> Self {
        let base = c.item.base().clone();
        let (content, url, file) = match c.item.payload() {
            ItemPayload::Text { content } => (Some(content), None, None),
            ItemPayload::Video { url } => (None, Some(url), None),
            ItemPayload::Image { file } | ItemPayload::File { file } => (None, None, Some(file)),
        };
        Self {
            id: c.id,
            module: c.module_id,
            order: c.order,
            kind: c.item.kind().as_str().to_string(),
            title: base.title,
            owner: base.owner_id,
            created: base.created_at,
            updated: base.updated_at,
            content,
            url,
            file,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ModuleItemsResponse {
    pub module: ManagedModule,
    pub contents: Vec<ManagedContent>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateContentRequest {
    /// One of `text`, `video`, `image`, `file`.
    pub kind: String,
    pub title: String,
    pub content: Option<String>,
    pub url: Option<String>,
    pub file: Option<String>,
    pub order: Option<i32>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateContentRequest {
    /// Required together with a payload field; must match the stored kind.
    pub kind: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub url: Option<String>,
    pub file: Option<String>,
    pub order: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SavedResponse {
    pub saved: &'static str,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/manage/courses", get(list_owned_courses).post(create_course))
        .route(
            "/manage/courses/:id",
            patch(update_course).delete(delete_course),
        )
        .route(
            "/manage/courses/:id/modules",
            get(list_course_modules).post(create_module),
        )
        .route("/manage/modules/order", post(reorder_modules))
        .route(
            "/manage/modules/:id",
            patch(update_module).delete(delete_module),
        )
        .route(
            "/manage/modules/:id/contents",
            get(list_module_contents).post(create_content),
        )
        .route("/manage/contents/order", post(reorder_contents))
        .route(
            "/manage/contents/:id",
            patch(update_content).delete(delete_content),
        )
        .with_state(ctx)
}

fn parse_kind(kind: &str) -> Result<ContentKind, StatusCode> {
    ContentKind::parse(kind.trim()).ok_or_else(|| {
        tracing::debug!(kind, "unknown_content_kind");
        StatusCode::BAD_REQUEST
    })
}

fn bad_request(err: ValidationError) -> StatusCode {
    tracing::debug!(error = %err, "request_rejected");
    StatusCode::BAD_REQUEST
}

fn order_pairs(orders: HashMap<i64, i32>) -> Vec<(i64, i32)> {
    let mut pairs: Vec<(i64, i32)> = orders.into_iter().collect();
    pairs.sort_unstable();
    pairs
}

// --- Courses ---

#[utoipa::path(get, path = "/api/manage/courses", tag = "Course management",
    responses((status = 200, body = [CourseResponse]), (status = 401)))]
pub async fn list_owned_courses(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<Vec<CourseResponse>>, StatusCode> {
    let user_id = auth::require_user(&ctx.cfg, bearer)?;
    let courses = ctx.course_repo();
    let modules = ctx.module_repo();
    let uc = ListOwnedCourses {
        courses: courses.as_ref(),
        modules: modules.as_ref(),
    };
    let items = uc.execute(user_id).await.map_err(error::internal)?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(post, path = "/api/manage/courses", tag = "Course management",
    request_body = CreateCourseRequest,
    responses((status = 200, body = CourseResponse), (status = 400), (status = 401), (status = 409, description = "Slug already taken")))]
pub async fn create_course(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Json(req): Json<CreateCourseRequest>,
) -> Result<Json<CourseResponse>, StatusCode> {
    let user_id = auth::require_user(&ctx.cfg, bearer)?;
    let courses = ctx.course_repo();
    let subjects = ctx.subject_repo();
    let uc = CreateCourse {
        courses: courses.as_ref(),
        subjects: subjects.as_ref(),
    };
    let draft = NewCourse {
        owner_id: user_id,
        subject_id: req.subject,
        title: req.title,
        slug: req.slug,
        overview: req.overview.unwrap_or_default(),
    };
    let course = uc.execute(&draft).await.map_err(error::status_for)?;
    Ok(Json(CourseResponse::new(course, Vec::new())))
}

#[utoipa::path(patch, path = "/api/manage/courses/{id}", tag = "Course management",
    params(("id" = i64, Path, description = "Course ID")),
    request_body = UpdateCourseRequest,
    responses((status = 200, body = CourseResponse), (status = 400), (status = 403), (status = 404), (status = 409, description = "Slug already taken")))]
pub async fn update_course(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<i64>,
    Json(req): Json<UpdateCourseRequest>,
) -> Result<Json<CourseResponse>, StatusCode> {
    let user_id = auth::require_user(&ctx.cfg, bearer)?;
    let courses = ctx.course_repo();
    let subjects = ctx.subject_repo();
    let modules = ctx.module_repo();
    let access = ctx.access_repo();
    let uc = UpdateCourse {
        courses: courses.as_ref(),
        subjects: subjects.as_ref(),
        access: access.as_ref(),
    };
    let changes = CourseChanges {
        subject_id: req.subject,
        title: req.title,
        slug: req.slug,
        overview: req.overview,
    };
    let course = uc
        .execute(user_id, id, &changes)
        .await
        .map_err(error::status_for)?;
    let modules = modules
        .list_for_courses(&[course.id])
        .await
        .map_err(error::internal)?;
    Ok(Json(CourseResponse::new(course, modules)))
}

#[utoipa::path(delete, path = "/api/manage/courses/{id}", tag = "Course management",
    params(("id" = i64, Path, description = "Course ID")),
    responses((status = 204), (status = 403), (status = 404)))]
pub async fn delete_course(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    let user_id = auth::require_user(&ctx.cfg, bearer)?;
    let courses = ctx.course_repo();
    let access = ctx.access_repo();
    let uc = DeleteCourse {
        courses: courses.as_ref(),
        access: access.as_ref(),
    };
    uc.execute(user_id, id).await.map_err(error::status_for)?;
    Ok(StatusCode::NO_CONTENT)
}

// --- Modules ---

#[utoipa::path(get, path = "/api/manage/courses/{id}/modules", tag = "Course management",
    params(("id" = i64, Path, description = "Course ID")),
    responses((status = 200, body = [ManagedModule]), (status = 403), (status = 404)))]
pub async fn list_course_modules(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(course_id): Path<i64>,
) -> Result<Json<Vec<ManagedModule>>, StatusCode> {
    let user_id = auth::require_user(&ctx.cfg, bearer)?;
    let modules = ctx.module_repo();
    let access = ctx.access_repo();
    let uc = ListCourseModules {
        modules: modules.as_ref(),
        access: access.as_ref(),
    };
    let items = uc
        .execute(user_id, course_id)
        .await
        .map_err(error::status_for)?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(post, path = "/api/manage/courses/{id}/modules", tag = "Course management",
    params(("id" = i64, Path, description = "Course ID")),
    request_body = CreateModuleRequest,
    responses((status = 200, body = ManagedModule), (status = 400), (status = 403), (status = 404), (status = 409, description = "No order left in the course")))]
pub async fn create_module(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(course_id): Path<i64>,
    Json(req): Json<CreateModuleRequest>,
) -> Result<Json<ManagedModule>, StatusCode> {
    let user_id = auth::require_user(&ctx.cfg, bearer)?;
    let modules = ctx.module_repo();
    let orders = ctx.order_source();
    let access = ctx.access_repo();
    let uc = CreateModule {
        modules: modules.as_ref(),
        orders: orders.as_ref(),
        access: access.as_ref(),
    };
    let draft = NewModule {
        course_id,
        title: req.title,
        description: req.description.unwrap_or_default(),
        order: req.order,
    };
    let module = uc
        .execute(user_id, draft)
        .await
        .map_err(error::status_for)?;
    Ok(Json(module.into()))
}

#[utoipa::path(patch, path = "/api/manage/modules/{id}", tag = "Course management",
    params(("id" = i64, Path, description = "Module ID")),
    request_body = UpdateModuleRequest,
    responses((status = 200, body = ManagedModule), (status = 400), (status = 403), (status = 404)))]
pub async fn update_module(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<i64>,
    Json(req): Json<UpdateModuleRequest>,
) -> Result<Json<ManagedModule>, StatusCode> {
    let user_id = auth::require_user(&ctx.cfg, bearer)?;
    let modules = ctx.module_repo();
    let access = ctx.access_repo();
    let uc = UpdateModule {
        modules: modules.as_ref(),
        access: access.as_ref(),
    };
    let changes = ModuleChanges {
        title: req.title,
        description: req.description,
        order: req.order,
    };
    let module = uc
        .execute(user_id, id, &changes)
        .await
        .map_err(error::status_for)?;
    Ok(Json(module.into()))
}

#[utoipa::path(delete, path = "/api/manage/modules/{id}", tag = "Course management",
    params(("id" = i64, Path, description = "Module ID")),
    responses((status = 204), (status = 403), (status = 404)))]
pub async fn delete_module(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    let user_id = auth::require_user(&ctx.cfg, bearer)?;
    let modules = ctx.module_repo();
    let access = ctx.access_repo();
    let uc = DeleteModule {
        modules: modules.as_ref(),
        access: access.as_ref(),
    };
    uc.execute(user_id, id).await.map_err(error::status_for)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(post, path = "/api/manage/modules/order", tag = "Course management",
    request_body(content = HashMap<String, i32>, description = "Module id to its new order"),
    responses((status = 200, body = SavedResponse), (status = 400), (status = 401)))]
pub async fn reorder_modules(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Json(orders): Json<HashMap<i64, i32>>,
) -> Result<Json<SavedResponse>, StatusCode> {
    let user_id = auth::require_user(&ctx.cfg, bearer)?;
    let modules = ctx.module_repo();
    let uc = ReorderModules {
        modules: modules.as_ref(),
    };
    uc.execute(user_id, &order_pairs(orders))
        .await
        .map_err(error::status_for)?;
    Ok(Json(SavedResponse { saved: "OK" }))
}

// --- Contents ---

#[utoipa::path(get, path = "/api/manage/modules/{id}/contents", tag = "Course management",
    params(("id" = i64, Path, description = "Module ID")),
    responses((status = 200, body = ModuleItemsResponse), (status = 403), (status = 404)))]
pub async fn list_module_contents(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(module_id): Path<i64>,
) -> Result<Json<ModuleItemsResponse>, StatusCode> {
    let user_id = auth::require_user(&ctx.cfg, bearer)?;
    let modules = ctx.module_repo();
    let contents = ctx.content_repo();
    let access = ctx.access_repo();
    let uc = ListModuleContents {
        modules: modules.as_ref(),
        contents: contents.as_ref(),
        access: access.as_ref(),
    };
    let dto = uc
        .execute(user_id, module_id)
        .await
        .map_err(error::status_for)?;
    Ok(Json(ModuleItemsResponse {
        module: dto.module.into(),
        contents: dto.contents.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(post, path = "/api/manage/modules/{id}/contents", tag = "Course management",
    params(("id" = i64, Path, description = "Module ID")),
    request_body = CreateContentRequest,
    responses((status = 200, body = ManagedContent), (status = 400), (status = 403), (status = 404), (status = 409, description = "No order left in the module")))]
pub async fn create_content(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(module_id): Path<i64>,
    Json(req): Json<CreateContentRequest>,
) -> Result<Json<ManagedContent>, StatusCode> {
    let user_id = auth::require_user(&ctx.cfg, bearer)?;
    let kind = parse_kind(&req.kind)?;
    let payload =
        ItemPayload::from_fields(kind, req.content, req.url, req.file).map_err(bad_request)?;
    let contents = ctx.content_repo();
    let orders = ctx.order_source();
    let access = ctx.access_repo();
    let uc = CreateContent {
        contents: contents.as_ref(),
        orders: orders.as_ref(),
        access: access.as_ref(),
    };
    let input = CreateContentInput {
        module_id,
        title: req.title,
        payload,
        order: req.order,
    };
    let content = uc
        .execute(user_id, input)
        .await
        .map_err(error::status_for)?;
    Ok(Json(content.into()))
}

#[utoipa::path(patch, path = "/api/manage/contents/{id}", tag = "Course management",
    params(("id" = i64, Path, description = "Content ID")),
    request_body = UpdateContentRequest,
    responses((status = 200, body = ManagedContent), (status = 400), (status = 403), (status = 404)))]
pub async fn update_content(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<i64>,
    Json(req): Json<UpdateContentRequest>,
) -> Result<Json<ManagedContent>, StatusCode> {
    let user_id = auth::require_user(&ctx.cfg, bearer)?;
    let has_payload = req.content.is_some() || req.url.is_some() || req.file.is_some();
    let payload = match (&req.kind, has_payload) {
        (Some(kind), true) => Some(
            ItemPayload::from_fields(parse_kind(kind)?, req.content, req.url, req.file)
                .map_err(bad_request)?,
        ),
        (None, true) => {
            tracing::debug!(content_id = id, "payload_without_kind");
            return Err(StatusCode::BAD_REQUEST);
        }
        (_, false) => None,
    };
    let contents = ctx.content_repo();
    let access = ctx.access_repo();
    let uc = UpdateContent {
        contents: contents.as_ref(),
        access: access.as_ref(),
    };
    let changes = ContentChanges {
        title: req.title,
        payload,
        order: req.order,
    };
    let content = uc
        .execute(user_id, id, &changes)
        .await
        .map_err(error::status_for)?;
    Ok(Json(content.into()))
}

#[utoipa::path(delete, path = "/api/manage/contents/{id}", tag = "Course management",
    params(("id" = i64, Path, description = "Content ID")),
    responses((status = 204), (status = 403), (status = 404)))]
pub async fn delete_content(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    let user_id = auth::require_user(&ctx.cfg, bearer)?;
    let contents = ctx.content_repo();
    let access = ctx.access_repo();
    let uc = DeleteContent {
        contents: contents.as_ref(),
        access: access.as_ref(),
    };
    uc.execute(user_id, id).await.map_err(error::status_for)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(post, path = "/api/manage/contents/order", tag = "Course management",
    request_body(content = HashMap<String, i32>, description = "Content id to its new order"),
    responses((status = 200, body = SavedResponse), (status = 400), (status = 401)))]
pub async fn reorder_contents(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Json(orders): Json<HashMap<i64, i32>>,
) -> Result<Json<SavedResponse>, StatusCode> {
    let user_id = auth::require_user(&ctx.cfg, bearer)?;
    let contents = ctx.content_repo();
    let uc = ReorderContents {
        contents: contents.as_ref(),
    };
    uc.execute(user_id, &order_pairs(orders))
        .await
        .map_err(error::status_for)?;
    Ok(Json(SavedResponse { saved: "OK" }))
}
