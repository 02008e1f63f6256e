use std::sync::Arc;

use crate::application::ports::access_repository::AccessRepository;
use crate::application::ports::account_repository::AccountRepository;
use crate::application::ports::content_repository::ContentRepository;
use crate::application::ports::course_repository::CourseRepository;
use crate::application::ports::module_repository::ModuleRepository;
use crate::application::ports::order_source::OrderSource;
use crate::application::ports::subject_repository::SubjectRepository;
use crate::bootstrap::config::Config;
use crate::domain::courses::content::RenderContext;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    account_repo: Arc<dyn AccountRepository>,
    subject_repo: Arc<dyn SubjectRepository>,
    course_repo: Arc<dyn CourseRepository>,
    module_repo: Arc<dyn ModuleRepository>,
    content_repo: Arc<dyn ContentRepository>,
    access_repo: Arc<dyn AccessRepository>,
    order_source: Arc<dyn OrderSource>,
}

impl AppServices {
    pub fn new(
        account_repo: Arc<dyn AccountRepository>,
        subject_repo: Arc<dyn SubjectRepository>,
        course_repo: Arc<dyn CourseRepository>,
        module_repo: Arc<dyn ModuleRepository>,
        content_repo: Arc<dyn ContentRepository>,
        access_repo: Arc<dyn AccessRepository>,
        order_source: Arc<dyn OrderSource>,
    ) -> Self {
        Self {
            account_repo,
            subject_repo,
            course_repo,
            module_repo,
            content_repo,
            access_repo,
            order_source,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn account_repo(&self) -> Arc<dyn AccountRepository> {
        self.services.account_repo.clone()
    }

    pub fn subject_repo(&self) -> Arc<dyn SubjectRepository> {
        self.services.subject_repo.clone()
    }

    pub fn course_repo(&self) -> Arc<dyn CourseRepository> {
        self.services.course_repo.clone()
    }

    pub fn module_repo(&self) -> Arc<dyn ModuleRepository> {
        self.services.module_repo.clone()
    }

    pub fn content_repo(&self) -> Arc<dyn ContentRepository> {
        self.services.content_repo.clone()
    }

    pub fn access_repo(&self) -> Arc<dyn AccessRepository> {
        self.services.access_repo.clone()
    }

    pub fn order_source(&self) -> Arc<dyn OrderSource> {
        self.services.order_source.clone()
    }

    pub fn render_context(&self) -> RenderContext {
        RenderContext {
            media_url: self.cfg.media_url.clone(),
        }
    }
}
