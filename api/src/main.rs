use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use educa_api::bootstrap::app_context::{AppContext, AppServices};
use educa_api::bootstrap::config::Config;
use educa_api::infrastructure::db::repositories::{
    access_repository_sqlx::SqlxAccessRepository, account_repository_sqlx::SqlxAccountRepository,
    content_repository_sqlx::SqlxContentRepository, course_repository_sqlx::SqlxCourseRepository,
    module_repository_sqlx::SqlxModuleRepository, order_source_sqlx::SqlxOrderSource,
    subject_repository_sqlx::SqlxSubjectRepository,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            educa_api::presentation::http::auth::register,
            educa_api::presentation::http::auth::login,
            educa_api::presentation::http::auth::logout,
            educa_api::presentation::http::auth::me,
            educa_api::presentation::http::subjects::list_subjects,
            educa_api::presentation::http::subjects::get_subject,
            educa_api::presentation::http::courses::list_courses,
            educa_api::presentation::http::courses::get_course,
            educa_api::presentation::http::courses::enroll,
            educa_api::presentation::http::courses::get_course_contents,
            educa_api::presentation::http::courses::list_enrolled_courses,
            educa_api::presentation::http::manage::list_owned_courses,
            educa_api::presentation::http::manage::create_course,
            educa_api::presentation::http::manage::update_course,
            educa_api::presentation::http::manage::delete_course,
            educa_api::presentation::http::manage::list_course_modules,
            educa_api::presentation::http::manage::create_module,
            educa_api::presentation::http::manage::update_module,
            educa_api::presentation::http::manage::delete_module,
            educa_api::presentation::http::manage::reorder_modules,
            educa_api::presentation::http::manage::list_module_contents,
            educa_api::presentation::http::manage::create_content,
            educa_api::presentation::http::manage::update_content,
            educa_api::presentation::http::manage::delete_content,
            educa_api::presentation::http::manage::reorder_contents,
            educa_api::presentation::http::health::health,
        ),
        components(schemas(
            educa_api::presentation::http::auth::RegisterRequest,
            educa_api::presentation::http::auth::LoginRequest,
            educa_api::presentation::http::auth::LoginResponse,
            educa_api::presentation::http::auth::UserResponse,
            educa_api::presentation::http::subjects::SubjectResponse,
            educa_api::presentation::http::courses::ModuleSummary,
            educa_api::presentation::http::courses::CourseResponse,
            educa_api::presentation::http::courses::RenderedContent,
            educa_api::presentation::http::courses::ModuleWithContents,
            educa_api::presentation::http::courses::CourseWithContentsResponse,
            educa_api::presentation::http::courses::EnrollResponse,
            educa_api::presentation::http::manage::CreateCourseRequest,
            educa_api::presentation::http::manage::UpdateCourseRequest,
            educa_api::presentation::http::manage::ManagedModule,
            educa_api::presentation::http::manage::CreateModuleRequest,
            educa_api::presentation::http::manage::UpdateModuleRequest,
            educa_api::presentation::http::manage::ManagedContent,
            educa_api::presentation::http::manage::ModuleItemsResponse,
            educa_api::presentation::http::manage::CreateContentRequest,
            educa_api::presentation::http::manage::UpdateContentRequest,
            educa_api::presentation::http::manage::SavedResponse,
            educa_api::presentation::http::health::HealthResp,
        )),
        tags(
            (name = "Auth", description = "Authentication"),
            (name = "Subjects", description = "Subject catalogue"),
            (name = "Courses", description = "Course catalogue, enrollment and course contents"),
            (name = "Course management", description = "Instructor CRUD over courses, modules and contents"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

fn cors_layer(cfg: &Config) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            http::Method::GET,
            http::Method::POST,
            http::Method::PUT,
            http::Method::DELETE,
            http::Method::PATCH,
            http::Method::OPTIONS,
        ])
        .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION]);
    match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => base.allow_origin(origin).allow_credentials(true),
        // In production FRONTEND_URL is mandatory (enforced by Config), deny all otherwise
        _ if cfg.is_production => base.allow_origin(AllowOrigin::exact(HeaderValue::from_static(
            "http://invalid",
        ))),
        _ => base
            .allow_origin(AllowOrigin::mirror_request())
            .allow_credentials(true),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "educa_api=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting Educa backend");

    // Database
    let pool = educa_api::infrastructure::db::connect_pool(&cfg.database_url).await?;
    educa_api::infrastructure::db::migrate(&pool).await?;

    let services = AppServices::new(
        Arc::new(SqlxAccountRepository::new(pool.clone())),
        Arc::new(SqlxSubjectRepository::new(pool.clone())),
        Arc::new(SqlxCourseRepository::new(pool.clone())),
        Arc::new(SqlxModuleRepository::new(pool.clone())),
        Arc::new(SqlxContentRepository::new(pool.clone())),
        Arc::new(SqlxAccessRepository::new(pool.clone())),
        Arc::new(SqlxOrderSource::new(pool.clone())),
    );
    let ctx = AppContext::new(cfg.clone(), services);

    let app = Router::new()
        .nest(
            "/api",
            educa_api::presentation::http::health::routes(pool.clone()),
        )
        .nest(
            "/api/auth",
            educa_api::presentation::http::auth::routes(ctx.clone()),
        )
        .nest(
            "/api",
            educa_api::presentation::http::subjects::routes(ctx.clone()),
        )
        .nest(
            "/api",
            educa_api::presentation::http::courses::routes(ctx.clone()),
        )
        .nest(
            "/api",
            educa_api::presentation::http::manage::routes(ctx.clone()),
        )
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer(&cfg))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(?e, "API server failed");
        return Err(e.into());
    }
    info!("HTTP API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(?e, "Failed to listen for shutdown signal");
    }
}
